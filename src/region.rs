use aws_config::{Region, SdkConfig};

use crate::error::IdentityError;

pub const DEFAULT_REGION: &str = "us-east-2";

/// Returns a copy of `config` pinned to `region`, whatever region the
/// environment or profile resolved.
pub fn apply_region(config: &SdkConfig, region: &str) -> SdkConfig {
    config
        .to_builder()
        .region(Region::new(region.to_owned()))
        .build()
}

pub fn legacy_region(region: &str) -> Result<rusoto_core::Region, IdentityError> {
    region
        .parse::<rusoto_core::Region>()
        .map_err(|e| IdentityError::ConfigurationLoad(e.to_string()))
}
