use std::time::Duration;

use thiserror::Error;

/// Failure of a single identity check.
///
/// Messages are the SDK's own; nothing is prefixed so the printed error reads
/// the same as the SDK would report it.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Building the credential chain, session or client failed.
    #[error("{0}")]
    ConfigurationLoad(String),
    /// The identity lookup itself was rejected or never reached the service.
    #[error("{0}")]
    RemoteCall(String),
    /// The service answered successfully but left out a field.
    #[error("caller identity response is missing `{0}`")]
    MissingField(&'static str),
    /// Credential lookup or the call outlived the `--timeout` deadline.
    #[error("identity call did not complete within {0:?}")]
    Timeout(Duration),
}
