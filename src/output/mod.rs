//! Output formatting for the binary.

mod response;

pub use response::{ErrorResponse, Response, format_error, format_response};
