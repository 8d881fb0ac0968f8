use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_sts as sts;
use aws_sdk_sts::error::ProvideErrorMetadata;
use aws_sdk_sts::operation::get_caller_identity::{
    GetCallerIdentityError, GetCallerIdentityOutput,
};
use aws_smithy_types::error::display::DisplayErrorContext;
use tracing::debug;

#[allow(unused_imports)]
use mockall::automock;

use crate::error::IdentityError;
use crate::resolver::IdentityResolver;
use crate::types::CallerIdentity;

pub struct StsImpl {
    inner: sts::Client,
}

#[cfg(test)]
pub use MockStsImpl as Sts;
#[cfg(not(test))]
pub use StsImpl as Sts;

#[cfg_attr(test, automock)]
impl StsImpl {
    #[allow(dead_code)]
    pub fn new(inner: sts::Client) -> Self {
        Self { inner }
    }

    #[allow(dead_code)]
    pub async fn get_caller_identity(
        &self,
    ) -> Result<GetCallerIdentityOutput, sts::error::SdkError<GetCallerIdentityError>> {
        self.inner.get_caller_identity().send().await
    }
}

/// Per-call options for the modern client.
///
/// `timeout` bounds the credential lookup and the call separately. `None` means
/// both run until the SDK's own settings end them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallOptions {
    pub timeout: Option<Duration>,
}

/// Awaits `fut`, giving up once `options.timeout` elapses.
pub async fn with_deadline<F: Future>(
    options: &CallOptions,
    fut: F,
) -> Result<F::Output, IdentityError> {
    match options.timeout {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| IdentityError::Timeout(limit)),
        None => Ok(fut.await),
    }
}

pub struct StsResolver {
    client: Sts,
    options: CallOptions,
}

impl StsResolver {
    pub fn new(client: Sts, options: CallOptions) -> Self {
        Self { client, options }
    }
}

fn remote_call_error(err: sts::error::SdkError<GetCallerIdentityError>) -> IdentityError {
    match err.as_service_error() {
        Some(service_err) => IdentityError::RemoteCall(format!(
            "{}: {}",
            service_err.code().unwrap_or("Unknown"),
            service_err.message().unwrap_or_default()
        )),
        None => IdentityError::RemoteCall(DisplayErrorContext(&err).to_string()),
    }
}

#[async_trait]
impl IdentityResolver for StsResolver {
    async fn caller_identity(&self) -> Result<CallerIdentity, IdentityError> {
        let output = with_deadline(&self.options, self.client.get_caller_identity())
            .await?
            .map_err(remote_call_error)?;
        debug!(account = ?output.account, "modern sdk resolved caller identity");

        CallerIdentity::try_from(output)
    }
}
