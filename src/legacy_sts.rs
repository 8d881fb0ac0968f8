use async_trait::async_trait;
use rusoto_core::RusotoError;
use rusoto_credential::{
    AwsCredentials, ContainerProvider, CredentialsError, EnvironmentProvider,
    InstanceMetadataProvider, ProvideAwsCredentials as ProvideCredentials,
};
use rusoto_sts::{
    GetCallerIdentityError, GetCallerIdentityRequest, GetCallerIdentityResponse, Sts as _,
    StsClient,
};
use tracing::debug;

#[allow(unused_imports)]
use mockall::automock;

use crate::error::IdentityError;
use crate::resolver::IdentityResolver;
use crate::types::CallerIdentity;

pub struct LegacyStsImpl {
    inner: StsClient,
}

#[cfg(test)]
pub use MockLegacyStsImpl as LegacySts;
#[cfg(not(test))]
pub use LegacyStsImpl as LegacySts;

#[cfg_attr(test, automock)]
impl LegacyStsImpl {
    #[allow(dead_code)]
    pub fn new(inner: StsClient) -> Self {
        Self { inner }
    }

    #[allow(dead_code)]
    pub async fn get_caller_identity(
        &self,
    ) -> Result<GetCallerIdentityResponse, RusotoError<GetCallerIdentityError>> {
        self.inner
            .get_caller_identity(GetCallerIdentityRequest {})
            .await
    }
}

fn legacy_error(err: RusotoError<GetCallerIdentityError>) -> IdentityError {
    match err {
        RusotoError::Credentials(err) => IdentityError::ConfigurationLoad(err.to_string()),
        err => IdentityError::RemoteCall(err.to_string()),
    }
}

#[async_trait]
impl IdentityResolver for LegacySts {
    async fn caller_identity(&self) -> Result<CallerIdentity, IdentityError> {
        let response = self.get_caller_identity().await.map_err(legacy_error)?;
        debug!(account = ?response.account, "legacy sdk resolved caller identity");

        CallerIdentity::try_from(response)
    }
}

/// Credential chain that never reads `~/.aws/config` or `~/.aws/credentials`.
///
/// Order: environment variables, ECS container endpoint, EC2 instance metadata.
pub struct NoSharedConfigProvider {
    environment: EnvironmentProvider,
    container: ContainerProvider,
    instance_metadata: InstanceMetadataProvider,
}

impl NoSharedConfigProvider {
    pub fn new() -> Self {
        Self {
            environment: EnvironmentProvider::default(),
            container: ContainerProvider::new(),
            instance_metadata: InstanceMetadataProvider::new(),
        }
    }
}

impl Default for NoSharedConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProvideCredentials for NoSharedConfigProvider {
    async fn credentials(&self) -> Result<AwsCredentials, CredentialsError> {
        if let Ok(creds) = self.environment.credentials().await {
            debug!("credentials resolved from environment");
            return Ok(creds);
        }
        if let Ok(creds) = self.container.credentials().await {
            debug!("credentials resolved from container endpoint");
            return Ok(creds);
        }
        if let Ok(creds) = self.instance_metadata.credentials().await {
            debug!("credentials resolved from instance metadata");
            return Ok(creds);
        }

        Err(CredentialsError::new(
            "Couldn't find AWS credentials in environment, container or instance metadata.",
        ))
    }
}
