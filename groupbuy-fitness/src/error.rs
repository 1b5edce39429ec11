use thiserror::Error;

/// Errors that can occur while configuring or driving the harness.
///
/// Domain-level unavailability (a simulated service being down) is never an
/// error; it is reported through `ServiceResult` / `PathResult` values with
/// `succeeded = false`. These variants cover usage errors only, and they are
/// fatal to the current invocation: no partial results are emitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HarnessError {
    /// An unknown service or scenario name was supplied.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// A probe count or threshold value was out of range.
    #[error("validation error: {0}")]
    Validation(String),
}

/// A type alias for `Result<T, HarnessError>`.
pub type HarnessResult<T> = Result<T, HarnessError>;
