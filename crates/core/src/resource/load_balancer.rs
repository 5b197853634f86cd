use async_trait::async_trait;

use super::{Field, Resource, ResourceKind, Tag};
use crate::{
    cloud_provider::{CloudProvider, FetchQuery},
    error::Result,
    field::{PLACEHOLDER, or_placeholder, padded, padded_or_placeholder, tab_joined},
};

#[derive(Debug, Clone, Default)]
pub struct LoadBalancer {
    pub name: String,
    pub arn: Option<String>,
    pub dns_name: Option<String>,
    pub vpc_id: Option<String>,
    pub load_balancer_type: Option<String>,
    pub scheme: Option<String>,
    pub state: Option<String>,
    pub availability_zones: Vec<String>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadBalancerField {
    LoadBalancerName,
    LoadBalancerArn,
    DnsName,
    VpcId,
    Type,
    Scheme,
    State,
    AvailabilityZones,
}

impl Field for LoadBalancerField {
    type Resource = LoadBalancer;

    const ALL: &'static [Self] = &[
        LoadBalancerField::LoadBalancerName,
        LoadBalancerField::LoadBalancerArn,
        LoadBalancerField::DnsName,
        LoadBalancerField::VpcId,
        LoadBalancerField::Type,
        LoadBalancerField::Scheme,
        LoadBalancerField::State,
        LoadBalancerField::AvailabilityZones,
    ];

    fn name(self) -> &'static str {
        match self {
            LoadBalancerField::LoadBalancerName => "LoadBalancerName",
            LoadBalancerField::LoadBalancerArn => "LoadBalancerArn",
            LoadBalancerField::DnsName => "DNSName",
            LoadBalancerField::VpcId => "VpcId",
            LoadBalancerField::Type => "Type",
            LoadBalancerField::Scheme => "Scheme",
            LoadBalancerField::State => "State",
            LoadBalancerField::AvailabilityZones => "AvailabilityZones",
        }
    }

    fn format(self, load_balancer: &LoadBalancer) -> String {
        match self {
            LoadBalancerField::LoadBalancerName => load_balancer.name.clone(),
            LoadBalancerField::LoadBalancerArn => or_placeholder(load_balancer.arn.as_deref()),
            LoadBalancerField::DnsName => or_placeholder(load_balancer.dns_name.as_deref()),
            LoadBalancerField::VpcId => padded_or_placeholder(load_balancer.vpc_id.as_deref()),
            LoadBalancerField::Type => {
                padded_or_placeholder(load_balancer.load_balancer_type.as_deref())
            }
            LoadBalancerField::Scheme => padded_or_placeholder(load_balancer.scheme.as_deref()),
            LoadBalancerField::State => padded_or_placeholder(load_balancer.state.as_deref()),
            LoadBalancerField::AvailabilityZones => tab_joined(&load_balancer.availability_zones),
        }
    }
}

#[async_trait]
impl Resource for LoadBalancer {
    type Field = LoadBalancerField;

    const KIND: ResourceKind = ResourceKind::LoadBalancer;
    const IDENTIFIER: LoadBalancerField = LoadBalancerField::LoadBalancerName;
    const DEFAULT_FIELDS: &'static str = "LoadBalancerName Type Scheme State DNSName";

    fn tags(&self) -> &[Tag] {
        &self.tags
    }

    fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    async fn fetch(provider: &dyn CloudProvider, query: &FetchQuery) -> Result<Vec<Self>> {
        provider.describe_load_balancers(query).await
    }
}

#[derive(Debug, Clone, Default)]
pub struct TargetGroup {
    pub name: String,
    pub arn: Option<String>,
    pub port: Option<i32>,
    pub protocol: Option<String>,
    pub target_type: Option<String>,
    pub vpc_id: Option<String>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetGroupField {
    TargetGroupName,
    Port,
    Protocol,
    TargetType,
    VpcId,
    TargetGroupArn,
}

impl Field for TargetGroupField {
    type Resource = TargetGroup;

    const ALL: &'static [Self] = &[
        TargetGroupField::TargetGroupName,
        TargetGroupField::Port,
        TargetGroupField::Protocol,
        TargetGroupField::TargetType,
        TargetGroupField::VpcId,
        TargetGroupField::TargetGroupArn,
    ];

    fn name(self) -> &'static str {
        match self {
            TargetGroupField::TargetGroupName => "TargetGroupName",
            TargetGroupField::Port => "Port",
            TargetGroupField::Protocol => "Protocol",
            TargetGroupField::TargetType => "TargetType",
            TargetGroupField::VpcId => "VpcId",
            TargetGroupField::TargetGroupArn => "TargetGroupArn",
        }
    }

    fn format(self, target_group: &TargetGroup) -> String {
        match self {
            TargetGroupField::TargetGroupName => target_group.name.clone(),
            TargetGroupField::Port => target_group
                .port
                .map(|port| port.to_string())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            TargetGroupField::Protocol => padded_or_placeholder(target_group.protocol.as_deref()),
            TargetGroupField::TargetType => {
                padded_or_placeholder(target_group.target_type.as_deref())
            }
            TargetGroupField::VpcId => padded_or_placeholder(target_group.vpc_id.as_deref()),
            TargetGroupField::TargetGroupArn => or_placeholder(target_group.arn.as_deref()),
        }
    }
}

#[async_trait]
impl Resource for TargetGroup {
    type Field = TargetGroupField;

    const KIND: ResourceKind = ResourceKind::TargetGroup;
    const IDENTIFIER: TargetGroupField = TargetGroupField::TargetGroupName;
    const DEFAULT_FIELDS: &'static str = "TargetGroupName Port Protocol TargetType VpcId";

    fn tags(&self) -> &[Tag] {
        &self.tags
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    async fn fetch(provider: &dyn CloudProvider, query: &FetchQuery) -> Result<Vec<Self>> {
        provider.describe_target_groups(query).await
    }
}

/// Health of one target registered in a target group.
#[derive(Debug, Clone, Default)]
pub struct TargetHealth {
    pub target_id: String,
    pub port: Option<i32>,
    pub state: Option<String>,
    pub reason: Option<String>,
}

impl TargetHealth {
    pub fn to_line(&self) -> String {
        let port = self
            .port
            .map(|port| port.to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        [
            padded(&self.target_id),
            port,
            padded_or_placeholder(self.state.as_deref()),
            or_placeholder(self.reason.as_deref()),
        ]
        .join("\t")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_zones_are_tab_joined() {
        let load_balancer = LoadBalancer {
            name: "web".to_string(),
            availability_zones: vec!["ap-northeast-1a".to_string(), "ap-northeast-1c".to_string()],
            ..Default::default()
        };
        assert_eq!(
            LoadBalancerField::AvailabilityZones.format(&load_balancer),
            "ap-northeast-1a\tap-northeast-1c"
        );
    }

    #[test]
    fn test_no_availability_zones_renders_placeholder() {
        let load_balancer = LoadBalancer {
            name: "web".to_string(),
            ..Default::default()
        };
        assert_eq!(
            LoadBalancerField::AvailabilityZones.format(&load_balancer),
            "-"
        );
    }

    #[test]
    fn test_display_name_is_resource_name() {
        let target_group = TargetGroup {
            name: "api-tg".to_string(),
            tags: vec![Tag::new("Name", "other")],
            ..Default::default()
        };
        assert_eq!(target_group.display_name(), "api-tg");
    }

    #[test]
    fn test_target_health_line() {
        let health = TargetHealth {
            target_id: "i-0abc".to_string(),
            port: Some(8080),
            state: Some("unhealthy".to_string()),
            reason: Some("Target.ResponseCodeMismatch".to_string()),
        };
        assert_eq!(
            health.to_line(),
            "i-0abc     \t8080\tunhealthy  \tTarget.ResponseCodeMismatch"
        );
    }

    #[test]
    fn test_target_port_is_plain_number() {
        let target_group = TargetGroup {
            name: "api-tg".to_string(),
            port: Some(443),
            ..Default::default()
        };
        assert_eq!(TargetGroupField::Port.format(&target_group), "443");
    }
}
