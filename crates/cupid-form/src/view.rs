use crate::notice::SuccessNotice;
use ahash::{HashMap, HashMapExt};

/// Collapsible sections of the message form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Section with the description field.
    Description,
    /// Section with the custom message field.
    CustomMessage,
}

/// The surface a form controller reads from and annotates.
pub trait FormView {
    /// Returns the current value of the field.
    fn field_value(&self, name: &str) -> Option<String>;

    /// Shows the error next to the field, or hides it if `None`.
    fn set_field_error(&mut self, name: &str, error: Option<&str>);

    /// Shows or hides the section.
    fn toggle_section(&mut self, section: Section, visible: bool);

    /// Marks the field as required or optional.
    fn set_field_required(&mut self, name: &str, required: bool);

    /// Sets the placeholder of the field.
    fn set_placeholder(&mut self, name: &str, placeholder: &str);

    /// Shows the error status line of the form, or hides it if `None`.
    fn set_status(&mut self, status: Option<&str>);

    /// Shows the notice for a scheduled message.
    fn show_success(&mut self, notice: &SuccessNotice);

    /// Shows the confirmation for a premium services request.
    fn show_premium_confirmation(&mut self);

    /// Shows a blocking alert.
    fn alert(&mut self, message: &str);

    /// Restores the form fields to their initial values.
    fn reset(&mut self);
}

/// A form view which keeps the state in memory.
#[derive(Debug, Clone)]
pub struct MemoryView {
    values: HashMap<String, String>,
    errors: HashMap<String, String>,
    required: HashMap<String, bool>,
    placeholders: HashMap<String, String>,
    sections: HashMap<Section, bool>,
    status: Option<String>,
    notices: Vec<SuccessNotice>,
    premium_confirmations: usize,
    alerts: Vec<String>,
}

impl MemoryView {
    /// Creates a new instance with the description section shown
    /// and the custom message section hidden.
    pub fn new() -> Self {
        let mut sections = HashMap::new();
        sections.insert(Section::Description, true);
        sections.insert(Section::CustomMessage, false);
        Self {
            values: HashMap::new(),
            errors: HashMap::new(),
            required: HashMap::new(),
            placeholders: HashMap::new(),
            sections,
            status: None,
            notices: Vec::new(),
            premium_confirmations: 0,
            alerts: Vec::new(),
        }
    }

    /// Sets the value of the field.
    #[inline]
    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Returns the visible error of the field.
    #[inline]
    pub fn field_error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(|s| s.as_str())
    }

    /// Returns `true` if the field is marked as required.
    #[inline]
    pub fn is_required(&self, name: &str) -> bool {
        self.required.get(name).copied().unwrap_or(false)
    }

    /// Returns the placeholder of the field.
    #[inline]
    pub fn placeholder(&self, name: &str) -> Option<&str> {
        self.placeholders.get(name).map(|s| s.as_str())
    }

    /// Returns `true` if the section is shown.
    #[inline]
    pub fn is_visible(&self, section: Section) -> bool {
        self.sections.get(&section).copied().unwrap_or(false)
    }

    /// Returns the visible status line.
    #[inline]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Returns the notices shown so far.
    #[inline]
    pub fn notices(&self) -> &[SuccessNotice] {
        &self.notices
    }

    /// Returns the number of premium confirmations shown so far.
    #[inline]
    pub fn premium_confirmations(&self) -> usize {
        self.premium_confirmations
    }

    /// Returns the alerts shown so far.
    #[inline]
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }
}

impl Default for MemoryView {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl FormView for MemoryView {
    #[inline]
    fn field_value(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }

    fn set_field_error(&mut self, name: &str, error: Option<&str>) {
        match error {
            Some(error) => {
                self.errors.insert(name.to_owned(), error.to_owned());
            }
            None => {
                self.errors.remove(name);
            }
        }
    }

    #[inline]
    fn toggle_section(&mut self, section: Section, visible: bool) {
        self.sections.insert(section, visible);
    }

    #[inline]
    fn set_field_required(&mut self, name: &str, required: bool) {
        self.required.insert(name.to_owned(), required);
    }

    #[inline]
    fn set_placeholder(&mut self, name: &str, placeholder: &str) {
        self.placeholders
            .insert(name.to_owned(), placeholder.to_owned());
    }

    #[inline]
    fn set_status(&mut self, status: Option<&str>) {
        self.status = status.map(|s| s.to_owned());
    }

    #[inline]
    fn show_success(&mut self, notice: &SuccessNotice) {
        self.notices.push(notice.clone());
    }

    #[inline]
    fn show_premium_confirmation(&mut self) {
        self.premium_confirmations += 1;
    }

    #[inline]
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_owned());
    }

    fn reset(&mut self) {
        self.values.clear();
        self.errors.clear();
    }
}
