use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use super::config::{FieldConfig, InputType};

/// Unique identifier for a Field instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(usize);

impl FieldId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__field_{}", self.0)
    }
}

/// Receives every new value, controlled or not.
pub type ChangeFn = Arc<dyn Fn(&str) + Send + Sync>;

/// Who owns the field's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Controlled: the caller owns the value and re-supplies it after each change.
    External(String),
    /// Uncontrolled: the field stores the value itself.
    Internal(String),
}

impl ValueSource {
    /// The value currently in effect.
    pub fn current(&self) -> &str {
        match self {
            ValueSource::External(value) | ValueSource::Internal(value) => value,
        }
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self, ValueSource::External(_))
    }
}

/// Internal state for a Field.
struct FieldInner {
    source: ValueSource,
    password_visible: bool,
    config: FieldConfig,
    on_change: Option<ChangeFn>,
}

impl FieldInner {
    fn shows_clear(&self) -> bool {
        !self.source.current().is_empty() && !self.config.disabled && !self.config.loading
    }

    fn can_clear(&self) -> bool {
        self.shows_clear() && self.config.input_type != InputType::Password
    }
}

/// A text input field with controlled or uncontrolled value handling.
///
/// A field created with [`Field::uncontrolled`] stores edits itself. A field
/// created with [`Field::controlled`] only reports edits through `on_change`
/// and shows whatever the caller last supplied via
/// [`Field::set_external_value`].
///
/// # Example
///
/// ```
/// use glasswork::Field;
///
/// let field = Field::uncontrolled();
/// field.handle_change("ab");
/// assert_eq!(field.value(), "ab");
/// assert!(field.show_clear_affordance());
///
/// field.clear();
/// assert_eq!(field.value(), "");
/// assert!(!field.show_clear_affordance());
/// ```
pub struct Field {
    id: FieldId,
    inner: Arc<RwLock<FieldInner>>,
    dirty: Arc<AtomicBool>,
}

impl Field {
    fn from_source(source: ValueSource) -> Self {
        Self {
            id: FieldId::new(),
            inner: Arc::new(RwLock::new(FieldInner {
                source,
                password_visible: false,
                config: FieldConfig::default(),
                on_change: None,
            })),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a field that owns its value, starting empty.
    pub fn uncontrolled() -> Self {
        Self::from_source(ValueSource::Internal(String::new()))
    }

    /// Create a field that owns its value, starting at `value`.
    pub fn with_default(value: impl Into<String>) -> Self {
        Self::from_source(ValueSource::Internal(value.into()))
    }

    /// Create a field whose value is owned by the caller.
    pub fn controlled(value: impl Into<String>) -> Self {
        Self::from_source(ValueSource::External(value.into()))
    }

    /// Apply configuration.
    pub fn with_config(self, config: FieldConfig) -> Self {
        self.set_config(config);
        self
    }

    /// Set the change observer.
    pub fn on_change<F>(self, callback: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        if let Ok(mut guard) = self.inner.write() {
            guard.on_change = Some(Arc::new(callback));
        }
        self
    }

    /// The element id: the configured id, or a generated unique one.
    pub fn id(&self) -> String {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.config.id.clone())
            .unwrap_or_else(|| self.id.to_string())
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    /// Get the current value.
    pub fn value(&self) -> String {
        self.inner
            .read()
            .map(|g| g.source.current().to_string())
            .unwrap_or_default()
    }

    /// Get the value source.
    pub fn source(&self) -> ValueSource {
        self.inner
            .read()
            .map(|g| g.source.clone())
            .unwrap_or(ValueSource::Internal(String::new()))
    }

    /// Check if the caller owns the value.
    pub fn is_controlled(&self) -> bool {
        self.inner
            .read()
            .map(|g| g.source.is_controlled())
            .unwrap_or(false)
    }

    /// Check if the value is empty.
    pub fn is_empty(&self) -> bool {
        self.inner
            .read()
            .map(|g| g.source.current().is_empty())
            .unwrap_or(true)
    }

    /// Get the configuration.
    pub fn config(&self) -> FieldConfig {
        self.inner
            .read()
            .map(|g| g.config.clone())
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Value changes
    // -------------------------------------------------------------------------

    /// Handle an edit from the user.
    ///
    /// Always reports `new_value` to the change observer. Only an
    /// uncontrolled field stores it; a controlled field waits for the caller
    /// to supply the next value.
    pub fn handle_change(&self, new_value: &str) {
        let callback = {
            let Ok(mut guard) = self.inner.write() else {
                return;
            };
            if let ValueSource::Internal(value) = &mut guard.source
                && value.as_str() != new_value
            {
                *value = new_value.to_string();
                self.dirty.store(true, Ordering::SeqCst);
            }
            guard.on_change.clone()
        };
        log::trace!("{}: change to {} chars", self.id, new_value.chars().count());
        if let Some(callback) = callback {
            callback(new_value);
        }
    }

    /// Supply the controlled value. Makes the field controlled.
    pub fn set_external_value(&self, value: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            let value = value.into();
            if guard.source != ValueSource::External(value.clone()) {
                guard.source = ValueSource::External(value);
                self.dirty.store(true, Ordering::SeqCst);
            }
        }
    }

    /// Clear the value and report `""` to `on_change`.
    ///
    /// Only runs when [`Field::can_clear`] holds; the check and the update
    /// share one write lock. Returns true if it ran.
    pub fn clear(&self) -> bool {
        let callback = {
            let Ok(mut guard) = self.inner.write() else {
                return false;
            };
            if !guard.can_clear() {
                log::trace!("{}: clear ignored", self.id);
                return false;
            }
            if let ValueSource::Internal(value) = &mut guard.source {
                value.clear();
                self.dirty.store(true, Ordering::SeqCst);
            }
            guard.on_change.clone()
        };
        log::debug!("{}: cleared", self.id);
        if let Some(callback) = callback {
            callback("");
        }
        true
    }

    // -------------------------------------------------------------------------
    // Password visibility
    // -------------------------------------------------------------------------

    /// Check if a password is currently shown as plain text.
    pub fn password_visible(&self) -> bool {
        self.inner
            .read()
            .map(|g| g.password_visible)
            .unwrap_or(false)
    }

    /// Show or hide the password. Only valid for password fields.
    ///
    /// Returns true if visibility flipped.
    pub fn toggle_visibility(&self) -> bool {
        if let Ok(mut guard) = self.inner.write()
            && guard.config.input_type == InputType::Password
        {
            guard.password_visible = !guard.password_visible;
            log::debug!("{}: password visible = {}", self.id, guard.password_visible);
            self.dirty.store(true, Ordering::SeqCst);
            return true;
        }
        false
    }

    /// The type a renderer should present: plain text while a password is
    /// visible, otherwise the configured type.
    pub fn effective_type(&self) -> InputType {
        self.inner
            .read()
            .map(|g| match g.config.input_type {
                InputType::Password if g.password_visible => InputType::Text,
                other => other,
            })
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    /// Replace the configuration.
    ///
    /// Hides the password again if the field is no longer a password field.
    pub fn set_config(&self, config: FieldConfig) {
        if let Ok(mut guard) = self.inner.write() {
            if config.input_type != InputType::Password {
                guard.password_visible = false;
            }
            guard.config = config;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.update_config(|c| c.disabled = disabled);
    }

    pub fn set_loading(&self, loading: bool) {
        self.update_config(|c| c.loading = loading);
    }

    /// Set the invalid flag and its message together.
    pub fn set_invalid(&self, invalid: bool, message: Option<String>) {
        self.update_config(|c| {
            c.invalid = invalid;
            c.error_message = message;
        });
    }

    fn update_config(&self, f: impl FnOnce(&mut FieldConfig)) {
        if let Ok(mut guard) = self.inner.write() {
            f(&mut guard.config);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Derived state
    // -------------------------------------------------------------------------

    /// Non-empty, enabled and not loading.
    pub fn show_clear_affordance(&self) -> bool {
        self.inner.read().map(|g| g.shows_clear()).unwrap_or(false)
    }

    /// The clear affordance is shown and the field is not a password field.
    pub fn can_clear(&self) -> bool {
        self.inner.read().map(|g| g.can_clear()).unwrap_or(false)
    }

    /// Check if the configured type is password.
    pub fn is_password(&self) -> bool {
        self.inner
            .read()
            .map(|g| g.config.input_type == InputType::Password)
            .unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the field has changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    pub(super) fn read_config<R>(&self, f: impl FnOnce(&FieldConfig) -> R) -> Option<R> {
        self.inner.read().ok().map(|g| f(&g.config))
    }
}

impl Clone for Field {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::uncontrolled()
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Field");
        s.field("id", &self.id);
        if let Ok(g) = self.inner.read() {
            s.field("source", &g.source)
                .field("password_visible", &g.password_visible)
                .field("config", &g.config);
        }
        s.finish_non_exhaustive()
    }
}
