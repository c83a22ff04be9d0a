//! Form field value objects

/// Type-safe field values
#[derive(Debug, Clone)]
pub enum FieldValue {
    Text(String),
    /// Fixed set of values cycled with Left/Right
    Choice { choices: Vec<String>, index: usize },
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: String,
    pub value: FieldValue,
    pub is_multiline: bool,
}

impl FormField {
    /// Create a new text field
    pub fn text(label: &str, is_multiline: bool) -> Self {
        Self {
            label: label.to_string(),
            value: FieldValue::Text(String::new()),
            is_multiline,
        }
    }

    /// Create a choice field; the first choice is selected
    pub fn choice(label: &str, choices: Vec<String>) -> Self {
        Self {
            label: label.to_string(),
            value: FieldValue::Choice { choices, index: 0 },
            is_multiline: false,
        }
    }

    /// Get the text value (the selected choice for choice fields)
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            FieldValue::Choice { choices, index } => {
                choices.get(*index).map(String::as_str).unwrap_or("")
            }
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.value, FieldValue::Choice { .. })
    }

    /// Set the text value (ignored by choice fields)
    pub fn set_text(&mut self, value: String) {
        if let FieldValue::Text(s) = &mut self.value {
            *s = value;
        }
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        if let FieldValue::Text(s) = &mut self.value {
            s.push(c);
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        if let FieldValue::Text(s) = &mut self.value {
            s.pop();
        }
    }

    /// Select the next choice (wraps around)
    pub fn next_choice(&mut self) {
        if let FieldValue::Choice { choices, index } = &mut self.value {
            if !choices.is_empty() {
                *index = (*index + 1) % choices.len();
            }
        }
    }

    /// Select the previous choice (wraps around)
    pub fn prev_choice(&mut self) {
        if let FieldValue::Choice { choices, index } = &mut self.value {
            if !choices.is_empty() {
                *index = if *index == 0 {
                    choices.len() - 1
                } else {
                    *index - 1
                };
            }
        }
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) => s.clear(),
            FieldValue::Choice { index, .. } => *index = 0,
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Choice { choices, .. } if choices.is_empty() => "(none)".to_string(),
            FieldValue::Choice { .. } => format!("◀ {} ▶", self.as_text()),
        }
    }
}
