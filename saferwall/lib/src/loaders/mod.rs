//! Route loaders.
//!
//! Each loader pulls route parameters apart, calls the portal client and
//! hands a reshaped, serializable page model to the rendering layer.

mod bound_imports;
mod file_layout;
mod nt_header;
mod register;
mod strings;

pub use bound_imports::load_bound_imports;
pub use file_layout::{FileLayout, LAYOUT_FIELDS, load_file_layout};
pub use nt_header::{load_nt_header, reshape_nt_header};
pub use register::{ActionOutcome, RegisterForm, register_action};
pub use strings::{DEFAULT_PAGE, DEFAULT_PER_PAGE, PageQuery, load_strings};

use serde_json::Value;

/// Takes the `pe` object out of a file response.
fn take_pe(mut file: Value) -> Result<Value, crate::LoaderError> {
    file.get_mut("pe")
        .map(Value::take)
        .filter(|pe| !pe.is_null())
        .ok_or(crate::LoaderError::MissingField { field: "pe" })
}
