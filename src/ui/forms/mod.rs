//! Form rendering module
//!
//! - `field_renderer`: Field rendering utilities
//! - `scan_form`: The task update form and its action panel

mod field_renderer;
mod scan_form;

pub use scan_form::draw_scan_form;
