use tracing::debug;

use crate::{cloud_provider::CloudProvider, error::Result};

/// One `target-id\tport\tstate\treason` line per registered target.
pub async fn describe_target_health(
    provider: &dyn CloudProvider,
    target_group_name: &str,
) -> Result<Vec<String>> {
    let targets = provider.describe_target_health(target_group_name).await?;
    debug!(target_group_name, count = targets.len(), "Described target health");
    Ok(targets.iter().map(|target| target.to_line()).collect())
}
