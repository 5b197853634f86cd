use aws_config::{SdkConfig, meta::region::RegionProviderChain};
use aws_sdk_ec2::config::Region;
use tracing::debug;

/// Shared SDK configuration. An explicit region wins over the default chain
/// (`AWS_REGION`, profile, IMDS).
pub(super) async fn get_config(region: Option<&str>) -> SdkConfig {
    let region_provider = match region {
        Some(region) => {
            RegionProviderChain::first_try(Region::new(region.to_string())).or_default_provider()
        }
        None => RegionProviderChain::default_provider(),
    };
    let config = aws_config::from_env().region(region_provider).load().await;
    debug!(region = ?config.region(), "Loaded AWS configuration");
    config
}
