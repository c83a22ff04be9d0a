//! Scan form state and payload building

use super::field::FormField;
use crate::backend::{resolve_backend, FormError, FormResult};
use crate::state::{OptionKind, OptionLists, SubmitPayload};
use std::path::PathBuf;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Identifies a field of the scan form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Backend,
    TaskId,
    Action,
    Option(OptionKind),
    Reason,
    Photo,
}

impl FieldId {
    pub fn is_select(&self) -> bool {
        matches!(self, FieldId::Action | FieldId::Option(_))
    }
}

/// Buttons on the action panel, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormButton {
    Submit,
    LoadOptions,
    Clear,
}

impl FormButton {
    pub const ALL: [FormButton; 3] = [FormButton::Submit, FormButton::LoadOptions, FormButton::Clear];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Submit => "Submit",
            Self::LoadOptions => "Load Options",
            Self::Clear => "Clear",
        }
    }
}

/// Everything needed to send a submission, minus the photo bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedSubmission {
    pub backend: String,
    pub payload: SubmitPayload,
    pub photo_path: Option<PathBuf>,
}

/// The task update form
#[derive(Debug, Clone)]
pub struct ScanForm {
    pub backend: FormField,
    pub task_id: FormField,
    pub action: FormField,
    pub options: OptionLists,
    pub reason: FormField,
    pub photo: FormField,
    pub hide_backend: bool,
    pub hide_task: bool,
    pub active_field_index: usize,
    /// Index into `FormButton::ALL` when the buttons row is active
    pub selected_button: usize,
}

impl ScanForm {
    pub fn new(actions: Vec<String>) -> Self {
        Self {
            backend: FormField::text("Backend URL", false),
            task_id: FormField::text("Task ID", false),
            action: FormField::choice("Action", actions),
            options: OptionLists::new(),
            reason: FormField::text("Reason", true),
            photo: FormField::text("Photo (file path)", false),
            hide_backend: false,
            hide_task: false,
            active_field_index: 0,
            selected_button: 0,
        }
    }

    /// Visible fields in focus order
    pub fn field_order(&self) -> Vec<FieldId> {
        let mut order = Vec::with_capacity(11);
        if !self.hide_backend {
            order.push(FieldId::Backend);
        }
        if !self.hide_task {
            order.push(FieldId::TaskId);
        }
        order.push(FieldId::Action);
        order.extend(OptionKind::ALL.iter().map(|kind| FieldId::Option(*kind)));
        order.push(FieldId::Reason);
        order.push(FieldId::Photo);
        order
    }

    /// The focused field, `None` while the buttons row is active
    pub fn active_field_id(&self) -> Option<FieldId> {
        self.field_order().get(self.active_field_index).copied()
    }

    /// Returns true if the buttons row is currently active
    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_id().is_none()
    }

    pub fn selected_form_button(&self) -> FormButton {
        FormButton::ALL[self.selected_button % FormButton::ALL.len()]
    }

    /// Move to the next button (wraps around)
    pub fn next_button(&mut self) {
        self.selected_button = (self.selected_button + 1) % FormButton::ALL.len();
    }

    /// Move to the previous button (wraps around)
    pub fn prev_button(&mut self) {
        if self.selected_button == 0 {
            self.selected_button = FormButton::ALL.len() - 1;
        } else {
            self.selected_button -= 1;
        }
    }

    /// Text field behind an id; select lists are not `FormField`s
    pub fn field(&self, id: FieldId) -> Option<&FormField> {
        match id {
            FieldId::Backend => Some(&self.backend),
            FieldId::TaskId => Some(&self.task_id),
            FieldId::Action => Some(&self.action),
            FieldId::Reason => Some(&self.reason),
            FieldId::Photo => Some(&self.photo),
            FieldId::Option(_) => None,
        }
    }

    fn field_mut(&mut self, id: FieldId) -> Option<&mut FormField> {
        match id {
            FieldId::Backend => Some(&mut self.backend),
            FieldId::TaskId => Some(&mut self.task_id),
            FieldId::Action => Some(&mut self.action),
            FieldId::Reason => Some(&mut self.reason),
            FieldId::Photo => Some(&mut self.photo),
            FieldId::Option(_) => None,
        }
    }

    /// Type a character into the focused text field
    pub fn input_char(&mut self, c: char) {
        if let Some(field) = self.active_field_id().and_then(|id| self.field_mut(id)) {
            field.push_char(c);
        }
    }

    /// Delete the last character of the focused text field
    pub fn backspace(&mut self) {
        if let Some(field) = self.active_field_id().and_then(|id| self.field_mut(id)) {
            field.pop_char();
        }
    }

    /// Enter adds a newline only in multiline fields
    pub fn newline(&mut self) {
        if let Some(field) = self.active_field_id().and_then(|id| self.field_mut(id)) {
            if field.is_multiline {
                field.push_char('\n');
            }
        }
    }

    /// Cycle the focused dropdown forward
    pub fn select_next(&mut self) {
        match self.active_field_id() {
            Some(FieldId::Action) => self.action.next_choice(),
            Some(FieldId::Option(kind)) => self.options.get_mut(kind).next(),
            _ => {}
        }
    }

    /// Cycle the focused dropdown backward
    pub fn select_prev(&mut self) {
        match self.active_field_id() {
            Some(FieldId::Action) => self.action.prev_choice(),
            Some(FieldId::Option(kind)) => self.options.get_mut(kind).prev(),
            _ => {}
        }
    }

    /// Reset selections, reason and photo; backend and task id are kept
    pub fn clear(&mut self) {
        self.action.clear();
        self.options.reset_selections();
        self.reason.clear();
        self.photo.clear();
        self.active_field_index = 0;
        self.selected_button = 0;
    }

    /// Task id from the field, falling back to the launch link's `task` parameter
    pub fn resolve_task_id(&self, query_task: Option<&str>) -> Option<String> {
        let from_field = self.task_id.as_text().trim();
        if !from_field.is_empty() {
            return Some(from_field.to_string());
        }
        query_task
            .map(str::trim)
            .filter(|task| !task.is_empty())
            .map(str::to_string)
    }

    /// Attached photo path, if any
    pub fn photo_path(&self) -> Option<PathBuf> {
        let path = self.photo.as_text().trim();
        (!path.is_empty()).then(|| PathBuf::from(path))
    }

    /// Build the payload from the current selections
    pub fn build_payload(&self, task_id: String) -> SubmitPayload {
        SubmitPayload {
            task_id,
            action: self.action.as_text().to_string(),
            status_option_id: self.options.status.selected_id(),
            building_option_id: self.options.building.selected_id(),
            shelf_option_id: self.options.shelf.selected_id(),
            tote_box_option_id: self.options.tote_box.selected_id(),
            checked_out_by_option_id: self.options.checked_out_by.selected_id(),
            condition_option_id: self.options.condition.selected_id(),
            reason: self.reason.as_text().to_string(),
        }
    }

    /// Whether both a backend and a task id resolve
    pub fn can_submit(&self, default_backend: &str, query_task: Option<&str>) -> bool {
        !resolve_backend(self.backend.as_text(), default_backend).is_empty()
            && self.resolve_task_id(query_task).is_some()
    }

    /// Check preconditions and snapshot the form for submission
    pub fn prepare_submission(
        &self,
        default_backend: &str,
        query_task: Option<&str>,
    ) -> FormResult<PreparedSubmission> {
        let backend = resolve_backend(self.backend.as_text(), default_backend);
        if backend.is_empty() {
            return Err(FormError::MissingBackend);
        }
        let task_id = self
            .resolve_task_id(query_task)
            .ok_or(FormError::MissingTaskId)?;

        Ok(PreparedSubmission {
            backend,
            payload: self.build_payload(task_id),
            photo_path: self.photo_path(),
        })
    }
}

impl Form for ScanForm {
    fn field_count(&self) -> usize {
        self.field_order().len() + 1 // fields + buttons row
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.field_count() - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ConfigResponse, OptionItem};
    use pretty_assertions::assert_eq;

    fn actions() -> Vec<String> {
        vec!["checkout".to_string(), "checkin".to_string()]
    }

    fn loaded_form() -> ScanForm {
        let mut form = ScanForm::new(actions());
        form.options.apply_config(ConfigResponse {
            status_options: vec![OptionItem::new("st-in", "In"), OptionItem::new("st-out", "Out")],
            building_options: vec![OptionItem::new("b-n", "North")],
            shelf_options: vec![OptionItem::new("sh-1", "A1")],
            tote_box_options: vec![OptionItem::new("t-1", "T-01")],
            checked_out_by_options: vec![OptionItem::new("e-1", "Ana")],
            condition_options: vec![OptionItem::new("c-g", "Good")],
        });
        form
    }

    fn type_into(form: &mut ScanForm, id: FieldId, text: &str) {
        let index = form.field_order().iter().position(|f| *f == id).unwrap();
        form.set_active_field(index);
        for c in text.chars() {
            form.input_char(c);
        }
    }

    #[test]
    fn test_field_order_all_visible() {
        let form = ScanForm::new(actions());
        let order = form.field_order();
        assert_eq!(order.len(), 11);
        assert_eq!(order[0], FieldId::Backend);
        assert_eq!(order[1], FieldId::TaskId);
        assert_eq!(order[3], FieldId::Option(OptionKind::Status));
        assert_eq!(order[10], FieldId::Photo);
        assert_eq!(form.field_count(), 12);
    }

    #[test]
    fn test_hidden_fields_leave_focus_order() {
        let mut form = ScanForm::new(actions());
        form.hide_backend = true;
        form.hide_task = true;
        let order = form.field_order();
        assert_eq!(order.len(), 9);
        assert_eq!(order[0], FieldId::Action);
        assert!(!order.contains(&FieldId::Backend));
    }

    #[test]
    fn test_next_field_wraps_through_buttons_row() {
        let mut form = ScanForm::new(actions());
        form.set_active_field(10);
        form.next_field();
        assert!(form.is_buttons_row_active());
        form.next_field();
        assert_eq!(form.active_field_id(), Some(FieldId::Backend));
        form.prev_field();
        assert!(form.is_buttons_row_active());
    }

    #[test]
    fn test_set_active_field_clamps() {
        let mut form = ScanForm::new(actions());
        form.set_active_field(100);
        assert_eq!(form.active_field_index, 11);
    }

    #[test]
    fn test_typing_goes_to_focused_text_field() {
        let mut form = ScanForm::new(actions());
        type_into(&mut form, FieldId::TaskId, "86a1");
        form.backspace();
        assert_eq!(form.task_id.as_text(), "86a");

        type_into(&mut form, FieldId::Option(OptionKind::Shelf), "x");
        assert_eq!(form.task_id.as_text(), "86a");
    }

    #[test]
    fn test_newline_only_in_reason() {
        let mut form = ScanForm::new(actions());
        type_into(&mut form, FieldId::Reason, "a");
        form.newline();
        form.input_char('b');
        assert_eq!(form.reason.as_text(), "a\nb");

        type_into(&mut form, FieldId::TaskId, "t");
        form.newline();
        assert_eq!(form.task_id.as_text(), "t");
    }

    #[test]
    fn test_select_next_cycles_focused_dropdown() {
        let mut form = loaded_form();
        let index = form
            .field_order()
            .iter()
            .position(|f| *f == FieldId::Option(OptionKind::Status))
            .unwrap();
        form.set_active_field(index);
        form.select_next();
        form.select_next();
        assert_eq!(form.options.status.selected_id().as_deref(), Some("st-out"));
        form.select_prev();
        assert_eq!(form.options.status.selected_id().as_deref(), Some("st-in"));
    }

    #[test]
    fn test_select_action() {
        let mut form = loaded_form();
        form.set_active_field(2);
        form.select_next();
        assert_eq!(form.action.as_text(), "checkin");
    }

    #[test]
    fn test_resolve_task_id_prefers_field() {
        let mut form = ScanForm::new(actions());
        assert_eq!(form.resolve_task_id(Some("from-link")).as_deref(), Some("from-link"));
        type_into(&mut form, FieldId::TaskId, "  typed  ");
        assert_eq!(form.resolve_task_id(Some("from-link")).as_deref(), Some("typed"));
    }

    #[test]
    fn test_resolve_task_id_missing() {
        let form = ScanForm::new(actions());
        assert!(form.resolve_task_id(None).is_none());
        assert!(form.resolve_task_id(Some("   ")).is_none());
    }

    #[test]
    fn test_build_payload_unselected_are_none() {
        let mut form = loaded_form();
        form.options.building.select(1);
        type_into(&mut form, FieldId::Reason, "damaged lid");

        let payload = form.build_payload("86a1b2".to_string());
        assert_eq!(
            payload,
            SubmitPayload {
                task_id: "86a1b2".to_string(),
                action: "checkout".to_string(),
                status_option_id: None,
                building_option_id: Some("b-n".to_string()),
                shelf_option_id: None,
                tote_box_option_id: None,
                checked_out_by_option_id: None,
                condition_option_id: None,
                reason: "damaged lid".to_string(),
            }
        );

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 9);
        assert!(json["statusOptionId"].is_null());
        assert_eq!(json["buildingOptionId"], "b-n");
    }

    #[test]
    fn test_prepare_submission_uses_default_backend() {
        let mut form = loaded_form();
        type_into(&mut form, FieldId::TaskId, "t-9");
        let prepared = form
            .prepare_submission("192.168.1.10:8080/", None)
            .unwrap();
        assert_eq!(prepared.backend, "http://192.168.1.10:8080");
        assert_eq!(prepared.payload.task_id, "t-9");
        assert!(prepared.photo_path.is_none());
    }

    #[test]
    fn test_prepare_submission_missing_task() {
        let form = loaded_form();
        let err = form.prepare_submission("http://x", None).unwrap_err();
        assert!(matches!(err, FormError::MissingTaskId));
    }

    #[test]
    fn test_prepare_submission_missing_backend() {
        let form = loaded_form();
        let err = form.prepare_submission("", Some("t")).unwrap_err();
        assert!(matches!(err, FormError::MissingBackend));
    }

    #[test]
    fn test_prepare_submission_with_photo_path() {
        let mut form = loaded_form();
        type_into(&mut form, FieldId::Photo, " /tmp/tote.jpg ");
        let prepared = form.prepare_submission("http://x", Some("t")).unwrap();
        assert_eq!(prepared.photo_path, Some(PathBuf::from("/tmp/tote.jpg")));
    }

    #[test]
    fn test_can_submit_needs_backend_and_task() {
        let mut form = ScanForm::new(actions());
        assert!(!form.can_submit("gw:8080", None));
        assert!(form.can_submit("gw:8080", Some("from-link")));

        form.task_id.set_text("T-1".to_string());
        assert!(form.can_submit("gw:8080", None));
        assert!(!form.can_submit("", None));
    }

    #[test]
    fn test_clear_keeps_backend_and_task() {
        let mut form = loaded_form();
        type_into(&mut form, FieldId::Backend, "gw:8080");
        type_into(&mut form, FieldId::TaskId, "t-1");
        type_into(&mut form, FieldId::Reason, "note");
        form.options.shelf.select(1);
        form.action.next_choice();

        form.clear();

        assert_eq!(form.backend.as_text(), "gw:8080");
        assert_eq!(form.task_id.as_text(), "t-1");
        assert_eq!(form.reason.as_text(), "");
        assert_eq!(form.action.as_text(), "checkout");
        assert!(form.options.shelf.selected_id().is_none());
        assert!(form.options.shelf.is_loaded());
    }

    #[test]
    fn test_buttons_wrap() {
        let mut form = ScanForm::new(actions());
        form.prev_button();
        assert_eq!(form.selected_form_button(), FormButton::Clear);
        form.next_button();
        assert_eq!(form.selected_form_button(), FormButton::Submit);
    }
}
