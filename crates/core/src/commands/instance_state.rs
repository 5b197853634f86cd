use std::time::Duration;

use tracing::info;

use crate::{
    cloud_provider::{
        ChangeInstanceStateParams, CloudProvider, InstanceAction, InstanceStateChange,
        WaitInstanceStateParams,
    },
    error::{ComputeError, Result},
};

/// Starts or stops the given instances and returns one state change per instance.
pub async fn change_instance_state(
    provider: &dyn CloudProvider,
    instance_ids: &[String],
    action: InstanceAction,
) -> Result<Vec<InstanceStateChange>> {
    let params = ChangeInstanceStateParams {
        instance_ids,
        action,
    };

    let changes = provider
        .change_instance_state(&params)
        .await
        .map_err(|error| ComputeError::InstanceStateChangeFailed {
            instance_identifiers: instance_ids.join(","),
            reason: error.to_string(),
        })?;

    info!(%action, count = changes.len(), "Requested instance state change");
    Ok(changes)
}

pub async fn wait_for_instance_state(
    provider: &dyn CloudProvider,
    instance_ids: &[String],
    action: InstanceAction,
    timeout: Duration,
) -> Result<()> {
    let params = WaitInstanceStateParams {
        instance_ids,
        action,
        timeout,
    };

    info!(
        target_state = action.target_state(),
        timeout_seconds = timeout.as_secs(),
        "Waiting for instances"
    );
    provider.wait_for_instance_state(&params).await
}
