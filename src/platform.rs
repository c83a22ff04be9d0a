//! Platform-specific key hints

/// Submit shortcut display
/// Ctrl+S works on all platforms (terminals do not forward Cmd)
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Reload options shortcut display
pub const RELOAD_SHORTCUT: &str = "Ctrl+L";
