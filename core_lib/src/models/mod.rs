pub mod contact;
pub mod request;

pub use contact::{ContactResponse, ContactSubmission, SubmissionRequest};
pub use request::ApiResponse;
