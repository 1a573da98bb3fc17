use thiserror::Error;

/// Errors that can occur while serving gateway requests. Vendor-side
/// failures are not here: those are passed back to the caller as response
/// data, not as service errors.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("failed to read request body: {0}")]
    RequestBody(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
