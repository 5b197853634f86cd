use tracing::info;

use crate::{
    cloud_provider::{CloudProvider, SetDesiredCapacityParams},
    error::{ComputeError, Result},
    waiter::{DesiredState, Sleeper, WaiterConfig, wait_for_convergence},
};

/// Sets the group's desired capacity and returns the value the group reports
/// afterwards, which is what the waiter should converge on.
pub async fn update_desired_capacity(
    provider: &dyn CloudProvider,
    group_name: &str,
    desired_capacity: i32,
) -> Result<i32> {
    let params = SetDesiredCapacityParams {
        group_name,
        desired_capacity,
    };

    let applied = provider
        .set_desired_capacity(&params)
        .await
        .map_err(|error| ComputeError::CapacityUpdateFailed {
            group_name: group_name.to_string(),
            reason: error.to_string(),
        })?;

    info!(group_name, requested = desired_capacity, applied, "Updated desired capacity");
    Ok(applied)
}

/// Blocks until the group converges on `desired_capacity`. Returns the number
/// of polls it took.
pub async fn wait_for_capacity(
    provider: &dyn CloudProvider,
    sleeper: &dyn Sleeper,
    group_name: &str,
    desired_capacity: i32,
    config: &WaiterConfig,
) -> Result<u32> {
    let desired = DesiredState::new(desired_capacity);
    wait_for_convergence(provider, sleeper, group_name, &desired, config)
        .await
        .into_result(group_name)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::{
        error::Error,
        resource::{AutoScalingGroup, GroupInstance},
        testing::StaticProvider,
    };

    struct NoSleep;

    #[async_trait]
    impl Sleeper for NoSleep {
        async fn sleep(&self, _duration: Duration) {}
    }

    fn group(name: &str, states: &[&str]) -> AutoScalingGroup {
        AutoScalingGroup {
            name: name.to_string(),
            instances: states
                .iter()
                .map(|state| GroupInstance {
                    instance_id: "i-1".to_string(),
                    lifecycle_state: Some(state.to_string()),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_update_records_capacity_change() {
        let provider = StaticProvider::default();
        let applied = update_desired_capacity(&provider, "web-asg", 4).await.unwrap();
        assert_eq!(applied, 4);
        assert_eq!(
            *provider.capacity_changes.lock().unwrap(),
            vec![("web-asg".to_string(), 4)]
        );
    }

    #[tokio::test]
    async fn test_wait_converges_on_healthy_group() {
        let provider = StaticProvider {
            auto_scaling_groups: vec![group("web-asg", &["InService", "InService"])],
            ..Default::default()
        };
        let attempts = wait_for_capacity(&provider, &NoSleep, "web-asg", 2, &WaiterConfig::default())
            .await
            .unwrap();
        assert_eq!(attempts, 2);
    }

    #[tokio::test]
    async fn test_wait_times_out_when_capacity_never_matches() {
        let provider = StaticProvider {
            auto_scaling_groups: vec![group("web-asg", &["InService"])],
            ..Default::default()
        };
        let config = WaiterConfig {
            capacity_attempts: 2,
            ..Default::default()
        };
        let error = wait_for_capacity(&provider, &NoSleep, "web-asg", 3, &config)
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            Error::Compute(ComputeError::ConvergenceTimedOut { attempts: 2, .. })
        ));
    }

    #[tokio::test]
    async fn test_wait_fails_on_unknown_group() {
        let provider = StaticProvider::default();
        let error = wait_for_capacity(&provider, &NoSleep, "missing", 1, &WaiterConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            Error::Compute(ComputeError::ResourceNotFound { .. })
        ));
    }
}
