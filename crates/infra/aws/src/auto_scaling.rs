use aws_sdk_autoscaling::{Client as AutoScalingClient, types};
use cloudls_core::{
    cloud_provider::{FetchQuery, SetDesiredCapacityParams},
    error::{ComputeError, Result},
    resource::{AutoScalingGroup, GroupInstance, ResourceKind, Tag},
};
use tracing::{debug, info, warn};

use crate::aws_error::map_aws_error;

pub(super) async fn describe_auto_scaling_groups(
    auto_scaling_client: &AutoScalingClient,
    _query: &FetchQuery,
) -> Result<Vec<AutoScalingGroup>> {
    let response = auto_scaling_client
        .describe_auto_scaling_groups()
        .send()
        .await
        .map_err(|error| map_aws_error("DescribeAutoScalingGroups", error))?;

    let groups: Vec<AutoScalingGroup> = response
        .auto_scaling_groups()
        .iter()
        .filter_map(to_auto_scaling_group)
        .collect();

    debug!(count = groups.len(), "Described autoscaling groups");
    Ok(groups)
}

pub(super) async fn describe_auto_scaling_group(
    auto_scaling_client: &AutoScalingClient,
    group_name: &str,
) -> Result<AutoScalingGroup> {
    let response = auto_scaling_client
        .describe_auto_scaling_groups()
        .auto_scaling_group_names(group_name)
        .send()
        .await
        .map_err(|error| map_aws_error("DescribeAutoScalingGroups", error))?;

    response
        .auto_scaling_groups()
        .iter()
        .find_map(to_auto_scaling_group)
        .ok_or_else(|| {
            ComputeError::ResourceNotFound {
                kind: ResourceKind::AutoScalingGroup,
                identifier: group_name.to_string(),
            }
            .into()
        })
}

pub(super) async fn set_desired_capacity(
    auto_scaling_client: &AutoScalingClient,
    params: &SetDesiredCapacityParams<'_>,
) -> Result<i32> {
    auto_scaling_client
        .set_desired_capacity()
        .auto_scaling_group_name(params.group_name)
        .desired_capacity(params.desired_capacity)
        .send()
        .await
        .map_err(|error| map_aws_error("SetDesiredCapacity", error))?;

    let group = describe_auto_scaling_group(auto_scaling_client, params.group_name).await?;
    let applied = group.desired_capacity.unwrap_or(params.desired_capacity);

    info!(
        group_name = params.group_name,
        requested = params.desired_capacity,
        applied,
        "Set desired capacity"
    );
    Ok(applied)
}

fn to_auto_scaling_group(group: &types::AutoScalingGroup) -> Option<AutoScalingGroup> {
    let Some(name) = group.auto_scaling_group_name() else {
        warn!("Skipping autoscaling group without a name");
        return None;
    };

    Some(AutoScalingGroup {
        name: name.to_string(),
        desired_capacity: group.desired_capacity(),
        min_size: group.min_size(),
        max_size: group.max_size(),
        instances: group.instances().iter().filter_map(to_group_instance).collect(),
        availability_zones: group.availability_zones().to_vec(),
        tags: group
            .tags()
            .iter()
            .filter_map(|tag| Some(Tag::new(tag.key()?, tag.value().unwrap_or_default())))
            .collect(),
    })
}

fn to_group_instance(instance: &types::Instance) -> Option<GroupInstance> {
    Some(GroupInstance {
        instance_id: instance.instance_id()?.to_string(),
        lifecycle_state: instance
            .lifecycle_state()
            .map(|state| state.as_str().to_string()),
        health_status: instance.health_status().map(ToString::to_string),
        availability_zone: instance.availability_zone().map(ToString::to_string),
    })
}

#[cfg(test)]
mod tests {
    use aws_sdk_autoscaling::types::{LifecycleState, TagDescription};

    use super::*;

    fn member(instance_id: &str, state: LifecycleState) -> types::Instance {
        types::Instance::builder()
            .instance_id(instance_id)
            .lifecycle_state(state)
            .health_status("Healthy")
            .availability_zone("ap-northeast-1a")
            .build()
    }

    #[test]
    fn test_to_auto_scaling_group_counts_in_service_members() {
        let sdk_group = types::AutoScalingGroup::builder()
            .auto_scaling_group_name("web-asg")
            .desired_capacity(3)
            .min_size(1)
            .max_size(6)
            .instances(member("i-1", LifecycleState::InService))
            .instances(member("i-2", LifecycleState::Pending))
            .instances(member("i-3", LifecycleState::InService))
            .availability_zones("ap-northeast-1a")
            .tags(
                TagDescription::builder()
                    .key("Service")
                    .value("web")
                    .build(),
            )
            .build();

        let group = to_auto_scaling_group(&sdk_group).unwrap();

        assert_eq!(group.name, "web-asg");
        assert_eq!(group.desired_capacity, Some(3));
        assert_eq!(group.instances.len(), 3);
        assert_eq!(group.in_service_count(), 2);
        assert_eq!(group.instances[1].lifecycle_state.as_deref(), Some("Pending"));
        assert_eq!(group.availability_zones, vec!["ap-northeast-1a"]);
        assert_eq!(group.tags, vec![Tag::new("Service", "web")]);
    }

    #[test]
    fn test_group_without_name_is_skipped() {
        let sdk_group = types::AutoScalingGroup::builder().desired_capacity(1).build();
        assert!(to_auto_scaling_group(&sdk_group).is_none());
    }
}
