//! Decoding of the backend's response envelope.

pub mod types;
pub mod unwrap;

pub use types::{is_truthy, ContentPart, Envelope};
pub use unwrap::{classify_error, inner_result, unwrap_body, ResponseBody, UNKNOWN_ERROR};
