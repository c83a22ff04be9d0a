//! Application state definitions

use super::forms::ScanForm;
use super::models::SubmitMode;
use chrono::{DateTime, Local};

/// Inline hint under a form section, styled ok or bad
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub ok: bool,
}

impl StatusMessage {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ok: true,
        }
    }

    pub fn bad(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ok: false,
        }
    }
}

/// Submission lifecycle: `Idle -> Submitting -> Succeeded | Failed`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting(SubmitMode),
    Succeeded(String),
    Failed(String),
}

impl SubmitState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmitState::Submitting(_))
    }

    /// The inline message for this state, if any
    pub fn message(&self) -> Option<StatusMessage> {
        match self {
            SubmitState::Idle => None,
            SubmitState::Submitting(mode) => {
                Some(StatusMessage::ok(format!("Submitting ({})...", mode.label())))
            }
            SubmitState::Succeeded(body) => Some(StatusMessage::ok(format!("Success: {body}"))),
            SubmitState::Failed(message) => Some(StatusMessage::bad(message.clone())),
        }
    }
}

/// Option loading lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

impl LoadState {
    pub fn message(&self) -> Option<StatusMessage> {
        match self {
            LoadState::Idle => None,
            LoadState::Loading => Some(StatusMessage::ok("Loading options...")),
            LoadState::Loaded => Some(StatusMessage::ok("Dropdown options loaded.")),
            LoadState::Failed(message) => Some(StatusMessage::bad(message.clone())),
        }
    }
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub form: ScanForm,
    pub load_state: LoadState,
    pub submit_state: SubmitState,
    /// `task` parameter of the launch link
    pub query_task: Option<String>,
    /// Requests sent but not yet answered
    pub in_flight: usize,
    pub last_success_at: Option<DateTime<Local>>,
}

impl AppState {
    pub fn new(form: ScanForm) -> Self {
        Self {
            form,
            load_state: LoadState::default(),
            submit_state: SubmitState::default(),
            query_task: None,
            in_flight: 0,
            last_success_at: None,
        }
    }
}
