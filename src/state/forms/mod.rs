//! Form domain layer
//!
//! Pure form state: no terminal and no network, so everything here is unit
//! tested directly.

mod field;
mod form_state;

pub use field::FormField;
pub use form_state::{FieldId, Form, FormButton, ScanForm};
