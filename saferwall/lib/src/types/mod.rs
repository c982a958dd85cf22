//! Records exchanged with the portal API.
//!
//! These are pass-through shapes: the client decodes them but enforces no
//! invariants of its own.

mod file;
mod forms;
mod pagination;
mod user;

pub use file::{ApiFile, ApiStrings, ApiSummary, FileSummary, Submission};
pub use forms::{
    ChangePasswordData, EmailData, LoginData, RegisterData, UpdateEmailData, UpdatePasswordData,
    UpdateProfileData,
};
pub use pagination::ApiPagination;
pub use user::{Activity, ActivityAuthor, Session, User};
