//! Field component - a single-line text input with controlled or uncontrolled value.

mod config;
mod state;
mod view;

pub use config::{FieldConfig, InputType, Size, Variant};
pub use state::{ChangeFn, Field, FieldId, ValueSource};
pub use view::{FieldMessage, HIDE_PASSWORD_LABEL, SHOW_PASSWORD_LABEL};
