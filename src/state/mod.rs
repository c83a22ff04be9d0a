//! Application state module

mod app_state;
mod forms;
mod launch;
mod models;
mod select;

pub use app_state::*;
pub use forms::*;
pub use launch::*;
pub use models::*;
pub use select::*;
