use std::{
    fmt::{self, Display, Formatter},
    time::Duration,
};

use async_trait::async_trait;

use crate::{
    error::Result,
    field::{PLACEHOLDER, padded},
    filter::TagFilter,
    resource::{
        Address, AutoScalingGroup, Image, Instance, LoadBalancer, Snapshot, TargetGroup,
        TargetHealth, Volume,
    },
};

/// Server-side narrowing hints derived from the user's filters. Providers may
/// ignore them; the listing pipeline re-applies the same predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchQuery {
    pub active_only: bool,
    pub tag: Option<TagFilter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceAction {
    Start,
    Stop,
}

impl InstanceAction {
    /// State the instances settle in once the action completes.
    pub fn target_state(self) -> &'static str {
        match self {
            InstanceAction::Start => "running",
            InstanceAction::Stop => "stopped",
        }
    }
}

impl Display for InstanceAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let value = match self {
            InstanceAction::Start => "start",
            InstanceAction::Stop => "stop",
        };
        write!(f, "{}", value)
    }
}

pub struct ChangeInstanceStateParams<'a> {
    pub instance_ids: &'a [String],
    pub action: InstanceAction,
}

pub struct WaitInstanceStateParams<'a> {
    pub instance_ids: &'a [String],
    pub action: InstanceAction,
    pub timeout: Duration,
}

pub struct SetDesiredCapacityParams<'a> {
    pub group_name: &'a str,
    pub desired_capacity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceStateChange {
    pub instance_id: String,
    pub previous_state: Option<String>,
    pub current_state: Option<String>,
}

impl InstanceStateChange {
    pub fn to_line(&self) -> String {
        [
            self.instance_id.as_str(),
            self.previous_state.as_deref().unwrap_or(PLACEHOLDER),
            self.current_state.as_deref().unwrap_or(PLACEHOLDER),
        ]
        .map(padded)
        .join("\t")
    }
}

#[async_trait]
pub trait CloudProvider: Send + Sync {
    async fn describe_instances(&self, query: &FetchQuery) -> Result<Vec<Instance>>;
    async fn describe_volumes(&self, query: &FetchQuery) -> Result<Vec<Volume>>;
    async fn describe_addresses(&self, query: &FetchQuery) -> Result<Vec<Address>>;
    async fn describe_snapshots(&self, query: &FetchQuery) -> Result<Vec<Snapshot>>;
    async fn describe_images(&self, query: &FetchQuery) -> Result<Vec<Image>>;
    async fn describe_load_balancers(&self, query: &FetchQuery) -> Result<Vec<LoadBalancer>>;
    async fn describe_target_groups(&self, query: &FetchQuery) -> Result<Vec<TargetGroup>>;
    async fn describe_target_health(&self, target_group_name: &str) -> Result<Vec<TargetHealth>>;
    async fn describe_auto_scaling_groups(
        &self,
        query: &FetchQuery,
    ) -> Result<Vec<AutoScalingGroup>>;
    async fn describe_auto_scaling_group(&self, group_name: &str) -> Result<AutoScalingGroup>;
    /// Returns the group's desired capacity as reported after the change.
    async fn set_desired_capacity(&self, params: &SetDesiredCapacityParams) -> Result<i32>;
    async fn change_instance_state(
        &self,
        params: &ChangeInstanceStateParams,
    ) -> Result<Vec<InstanceStateChange>>;
    async fn wait_for_instance_state(&self, params: &WaitInstanceStateParams) -> Result<()>;
}
