use async_trait::async_trait;

use super::{Field, Resource, ResourceKind, Tag};
use crate::{
    cloud_provider::{CloudProvider, FetchQuery},
    error::Result,
    field::{PLACEHOLDER, tab_joined},
};

/// Lifecycle state of a group member that is serving traffic.
pub const IN_SERVICE: &str = "InService";

#[derive(Debug, Clone, Default)]
pub struct AutoScalingGroup {
    pub name: String,
    pub desired_capacity: Option<i32>,
    pub min_size: Option<i32>,
    pub max_size: Option<i32>,
    pub instances: Vec<GroupInstance>,
    pub availability_zones: Vec<String>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Default)]
pub struct GroupInstance {
    pub instance_id: String,
    pub lifecycle_state: Option<String>,
    pub health_status: Option<String>,
    pub availability_zone: Option<String>,
}

impl GroupInstance {
    pub fn is_in_service(&self) -> bool {
        self.lifecycle_state.as_deref() == Some(IN_SERVICE)
    }
}

impl AutoScalingGroup {
    pub fn in_service_count(&self) -> usize {
        self.instances
            .iter()
            .filter(|instance| instance.is_in_service())
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoScalingGroupField {
    AutoScalingGroupName,
    DesiredCapacity,
    MinSize,
    MaxSize,
    Instances,
    InService,
    AvailabilityZones,
}

fn format_size(size: Option<i32>) -> String {
    size.map(|size| size.to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

impl Field for AutoScalingGroupField {
    type Resource = AutoScalingGroup;

    const ALL: &'static [Self] = &[
        AutoScalingGroupField::AutoScalingGroupName,
        AutoScalingGroupField::DesiredCapacity,
        AutoScalingGroupField::MinSize,
        AutoScalingGroupField::MaxSize,
        AutoScalingGroupField::Instances,
        AutoScalingGroupField::InService,
        AutoScalingGroupField::AvailabilityZones,
    ];

    fn name(self) -> &'static str {
        match self {
            AutoScalingGroupField::AutoScalingGroupName => "AutoScalingGroupName",
            AutoScalingGroupField::DesiredCapacity => "DesiredCapacity",
            AutoScalingGroupField::MinSize => "MinSize",
            AutoScalingGroupField::MaxSize => "MaxSize",
            AutoScalingGroupField::Instances => "Instances",
            AutoScalingGroupField::InService => "InService",
            AutoScalingGroupField::AvailabilityZones => "AvailabilityZones",
        }
    }

    fn format(self, group: &AutoScalingGroup) -> String {
        match self {
            AutoScalingGroupField::AutoScalingGroupName => group.name.clone(),
            AutoScalingGroupField::DesiredCapacity => format_size(group.desired_capacity),
            AutoScalingGroupField::MinSize => format_size(group.min_size),
            AutoScalingGroupField::MaxSize => format_size(group.max_size),
            AutoScalingGroupField::Instances => group.instances.len().to_string(),
            AutoScalingGroupField::InService => group.in_service_count().to_string(),
            AutoScalingGroupField::AvailabilityZones => tab_joined(&group.availability_zones),
        }
    }
}

#[async_trait]
impl Resource for AutoScalingGroup {
    type Field = AutoScalingGroupField;

    const KIND: ResourceKind = ResourceKind::AutoScalingGroup;
    const IDENTIFIER: AutoScalingGroupField = AutoScalingGroupField::AutoScalingGroupName;
    const DEFAULT_FIELDS: &'static str =
        "AutoScalingGroupName DesiredCapacity MinSize MaxSize Instances InService";

    fn tags(&self) -> &[Tag] {
        &self.tags
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    async fn fetch(provider: &dyn CloudProvider, query: &FetchQuery) -> Result<Vec<Self>> {
        provider.describe_auto_scaling_groups(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(lifecycle_state: &str) -> GroupInstance {
        GroupInstance {
            instance_id: "i-1".to_string(),
            lifecycle_state: Some(lifecycle_state.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_in_service_count() {
        let group = AutoScalingGroup {
            name: "web-asg".to_string(),
            instances: vec![member("InService"), member("Pending"), member("InService")],
            ..Default::default()
        };
        assert_eq!(AutoScalingGroupField::Instances.format(&group), "3");
        assert_eq!(AutoScalingGroupField::InService.format(&group), "2");
    }

    #[test]
    fn test_missing_lifecycle_state_is_not_in_service() {
        let instance = GroupInstance {
            instance_id: "i-1".to_string(),
            ..Default::default()
        };
        assert!(!instance.is_in_service());
    }
}
