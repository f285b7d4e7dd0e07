//! Derived presentation hints for a field.

use super::state::Field;

/// Toggle label while the password is hidden.
pub const SHOW_PASSWORD_LABEL: &str = "Show password";
/// Toggle label while the password is shown.
pub const HIDE_PASSWORD_LABEL: &str = "Hide password";

/// The message line under the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldMessage {
    Error(String),
    Helper(String),
}

impl FieldMessage {
    pub fn text(&self) -> &str {
        match self {
            FieldMessage::Error(text) | FieldMessage::Helper(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FieldMessage::Error(_))
    }
}

impl Field {
    /// The error message while invalid, otherwise the helper text.
    ///
    /// An invalid field without an error message falls back to the helper text.
    pub fn message(&self) -> Option<FieldMessage> {
        self.read_config(|c| match (&c.error_message, &c.helper_text) {
            (Some(error), _) if c.invalid => Some(FieldMessage::Error(error.clone())),
            (_, Some(helper)) => Some(FieldMessage::Helper(helper.clone())),
            _ => None,
        })
        .flatten()
    }

    /// Id of the helper text element, when helper text is configured.
    pub fn helper_id(&self) -> Option<String> {
        let has_helper = self
            .read_config(|c| c.helper_text.is_some())
            .unwrap_or(false);
        has_helper.then(|| format!("{}-help", self.id()))
    }

    /// Show a busy spinner.
    pub fn show_spinner(&self) -> bool {
        self.read_config(|c| c.loading).unwrap_or(false)
    }

    /// Show the password visibility toggle.
    pub fn show_visibility_toggle(&self) -> bool {
        self.is_password()
    }

    /// Label for the visibility toggle.
    pub fn visibility_toggle_label(&self) -> &'static str {
        if self.password_visible() {
            HIDE_PASSWORD_LABEL
        } else {
            SHOW_PASSWORD_LABEL
        }
    }

    pub fn label(&self) -> Option<String> {
        self.read_config(|c| c.label.clone()).flatten()
    }

    pub fn placeholder(&self) -> Option<String> {
        self.read_config(|c| c.placeholder.clone()).flatten()
    }
}
