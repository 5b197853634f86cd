use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    cloud_provider::{
        ChangeInstanceStateParams, CloudProvider, FetchQuery, InstanceStateChange,
        SetDesiredCapacityParams, WaitInstanceStateParams,
    },
    error::{ComputeError, Error, Result},
    resource::{
        Address, AutoScalingGroup, Image, Instance, LoadBalancer, ResourceKind, Snapshot,
        TargetGroup, TargetHealth, Volume,
    },
};

#[derive(Default)]
pub struct StaticProvider {
    pub instances: Vec<Instance>,
    pub volumes: Vec<Volume>,
    pub addresses: Vec<Address>,
    pub snapshots: Vec<Snapshot>,
    pub images: Vec<Image>,
    pub load_balancers: Vec<LoadBalancer>,
    pub target_groups: Vec<TargetGroup>,
    pub target_health: Vec<(String, Vec<TargetHealth>)>,
    pub auto_scaling_groups: Vec<AutoScalingGroup>,
    /// Every describe call fails with a transient error.
    pub unavailable: bool,
    pub queries: Mutex<Vec<FetchQuery>>,
    pub capacity_changes: Mutex<Vec<(String, i32)>>,
    pub state_changes: Mutex<Vec<(Vec<String>, String)>>,
}

impl StaticProvider {
    fn describe<T: Clone>(
        &self,
        operation_name: &str,
        query: &FetchQuery,
        items: &[T],
    ) -> Result<Vec<T>> {
        if self.unavailable {
            return Err(Error::Transient {
                operation_name: operation_name.to_string(),
            });
        }
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.clone());
        }
        Ok(items.to_vec())
    }

    pub fn recorded_queries(&self) -> Vec<FetchQuery> {
        self.queries.lock().map(|queries| queries.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl CloudProvider for StaticProvider {
    async fn describe_instances(&self, query: &FetchQuery) -> Result<Vec<Instance>> {
        self.describe("DescribeInstances", query, &self.instances)
    }

    async fn describe_volumes(&self, query: &FetchQuery) -> Result<Vec<Volume>> {
        self.describe("DescribeVolumes", query, &self.volumes)
    }

    async fn describe_addresses(&self, query: &FetchQuery) -> Result<Vec<Address>> {
        self.describe("DescribeAddresses", query, &self.addresses)
    }

    async fn describe_snapshots(&self, query: &FetchQuery) -> Result<Vec<Snapshot>> {
        self.describe("DescribeSnapshots", query, &self.snapshots)
    }

    async fn describe_images(&self, query: &FetchQuery) -> Result<Vec<Image>> {
        self.describe("DescribeImages", query, &self.images)
    }

    async fn describe_load_balancers(&self, query: &FetchQuery) -> Result<Vec<LoadBalancer>> {
        self.describe("DescribeLoadBalancers", query, &self.load_balancers)
    }

    async fn describe_target_groups(&self, query: &FetchQuery) -> Result<Vec<TargetGroup>> {
        self.describe("DescribeTargetGroups", query, &self.target_groups)
    }

    async fn describe_target_health(&self, target_group_name: &str) -> Result<Vec<TargetHealth>> {
        self.target_health
            .iter()
            .find(|(name, _)| name == target_group_name)
            .map(|(_, targets)| targets.clone())
            .ok_or_else(|| {
                ComputeError::ResourceNotFound {
                    kind: ResourceKind::TargetGroup,
                    identifier: target_group_name.to_string(),
                }
                .into()
            })
    }

    async fn describe_auto_scaling_groups(
        &self,
        query: &FetchQuery,
    ) -> Result<Vec<AutoScalingGroup>> {
        self.describe("DescribeAutoScalingGroups", query, &self.auto_scaling_groups)
    }

    async fn describe_auto_scaling_group(&self, group_name: &str) -> Result<AutoScalingGroup> {
        if self.unavailable {
            return Err(Error::Transient {
                operation_name: "DescribeAutoScalingGroups".to_string(),
            });
        }
        self.auto_scaling_groups
            .iter()
            .find(|group| group.name == group_name)
            .cloned()
            .ok_or_else(|| {
                ComputeError::ResourceNotFound {
                    kind: ResourceKind::AutoScalingGroup,
                    identifier: group_name.to_string(),
                }
                .into()
            })
    }

    async fn set_desired_capacity(&self, params: &SetDesiredCapacityParams) -> Result<i32> {
        if let Ok(mut changes) = self.capacity_changes.lock() {
            changes.push((params.group_name.to_string(), params.desired_capacity));
        }
        Ok(params.desired_capacity)
    }

    async fn change_instance_state(
        &self,
        params: &ChangeInstanceStateParams,
    ) -> Result<Vec<InstanceStateChange>> {
        if let Ok(mut changes) = self.state_changes.lock() {
            changes.push((params.instance_ids.to_vec(), params.action.to_string()));
        }
        Ok(params
            .instance_ids
            .iter()
            .map(|instance_id| InstanceStateChange {
                instance_id: instance_id.clone(),
                previous_state: Some("stopped".to_string()),
                current_state: Some("pending".to_string()),
            })
            .collect())
    }

    async fn wait_for_instance_state(&self, params: &WaitInstanceStateParams) -> Result<()> {
        if self.unavailable {
            return Err(ComputeError::InstanceWaitFailed {
                target_state: params.action.target_state().to_string(),
                reason: "waiter timed out".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
