use crate::sts::CallOptions;

/// What every check is built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub region: String,
    pub call_options: CallOptions,
}

/// Builds real SDK clients for each check.
pub struct Context {
    pub settings: Settings,
}

impl Context {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

#[cfg(not(test))]
mod aws {
    use async_trait::async_trait;
    use aws_config::BehaviorVersion;
    use aws_credential_types::provider::ProvideCredentials;
    use aws_smithy_types::error::display::DisplayErrorContext;
    use rusoto_core::HttpClient;
    use rusoto_credential::ChainProvider;
    use rusoto_sts::StsClient;
    use tracing::debug;

    use super::{Context, Settings};
    use crate::error::IdentityError;
    use crate::legacy_sts::{LegacySts, NoSharedConfigProvider};
    use crate::region;
    use crate::resolver::{IdentityResolver, ResolverFactory};
    use crate::sts::{with_deadline, Sts, StsResolver};
    use crate::types::Check;

    fn legacy_client(settings: &Settings, shared_config: bool) -> Result<LegacySts, IdentityError> {
        let region = region::legacy_region(&settings.region)?;
        let http = HttpClient::new().map_err(|e| IdentityError::ConfigurationLoad(e.to_string()))?;

        let client = if shared_config {
            StsClient::new_with(http, ChainProvider::new(), region)
        } else {
            StsClient::new_with(http, NoSharedConfigProvider::new(), region)
        };
        debug!(shared_config, region = %settings.region, "built legacy sts client");

        Ok(LegacySts::new(client))
    }

    async fn modern_client(settings: &Settings) -> Result<StsResolver, IdentityError> {
        let loaded = aws_config::defaults(BehaviorVersion::latest()).load().await;
        let config = region::apply_region(&loaded, &settings.region);

        let provider = config.credentials_provider().ok_or_else(|| {
            IdentityError::ConfigurationLoad("no credentials provider configured".to_string())
        })?;
        let credentials = with_deadline(&settings.call_options, provider.provide_credentials())
            .await?
            .map_err(|e| IdentityError::ConfigurationLoad(DisplayErrorContext(&e).to_string()))?;
        debug!(region = %settings.region, "resolved modern sdk credentials");

        let sts_config = aws_sdk_sts::config::Builder::from(&config)
            .credentials_provider(credentials)
            .build();
        let client = Sts::new(aws_sdk_sts::Client::from_conf(sts_config));

        Ok(StsResolver::new(client, settings.call_options.clone()))
    }

    #[async_trait]
    impl ResolverFactory for Context {
        async fn resolver(
            &self,
            check: Check,
        ) -> Result<Box<dyn IdentityResolver>, IdentityError> {
            let resolver: Box<dyn IdentityResolver> = match check {
                Check::Legacy => Box::new(legacy_client(&self.settings, true)?),
                Check::LegacyNoSharedConfig => Box::new(legacy_client(&self.settings, false)?),
                Check::Modern => Box::new(modern_client(&self.settings).await?),
            };

            Ok(resolver)
        }
    }
}
