use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{Field, Resource, ResourceKind, Tag};
use crate::{
    cloud_provider::{CloudProvider, FetchQuery},
    error::Result,
    field::{format_timestamp, ip_or_placeholder, or_placeholder, padded_or_placeholder},
};

#[derive(Debug, Clone, Default)]
pub struct Instance {
    pub id: String,
    pub instance_type: Option<String>,
    pub public_ip_v4: Option<String>,
    pub private_ip_v4: Option<String>,
    pub availability_zone: Option<String>,
    pub state: Option<String>,
    pub launch_time: Option<DateTime<Utc>>,
    pub image_id: Option<String>,
    pub vpc_id: Option<String>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceField {
    InstanceId,
    InstanceType,
    PublicIpAddress,
    PrivateIpAddress,
    AvailabilityZone,
    StateName,
    LaunchTime,
    ImageId,
    VpcId,
}

impl Field for InstanceField {
    type Resource = Instance;

    const ALL: &'static [Self] = &[
        InstanceField::InstanceId,
        InstanceField::InstanceType,
        InstanceField::PublicIpAddress,
        InstanceField::PrivateIpAddress,
        InstanceField::AvailabilityZone,
        InstanceField::StateName,
        InstanceField::LaunchTime,
        InstanceField::ImageId,
        InstanceField::VpcId,
    ];

    fn name(self) -> &'static str {
        match self {
            InstanceField::InstanceId => "InstanceId",
            InstanceField::InstanceType => "InstanceType",
            InstanceField::PublicIpAddress => "PublicIpAddress",
            InstanceField::PrivateIpAddress => "PrivateIpAddress",
            InstanceField::AvailabilityZone => "AvailabilityZone",
            InstanceField::StateName => "StateName",
            InstanceField::LaunchTime => "LaunchTime",
            InstanceField::ImageId => "ImageId",
            InstanceField::VpcId => "VpcId",
        }
    }

    fn format(self, instance: &Instance) -> String {
        match self {
            InstanceField::InstanceId => instance.id.clone(),
            InstanceField::InstanceType => padded_or_placeholder(instance.instance_type.as_deref()),
            InstanceField::PublicIpAddress => ip_or_placeholder(instance.public_ip_v4.as_deref()),
            InstanceField::PrivateIpAddress => ip_or_placeholder(instance.private_ip_v4.as_deref()),
            InstanceField::AvailabilityZone => {
                padded_or_placeholder(instance.availability_zone.as_deref())
            }
            InstanceField::StateName => padded_or_placeholder(instance.state.as_deref()),
            InstanceField::LaunchTime => format_timestamp(instance.launch_time.as_ref()),
            InstanceField::ImageId => or_placeholder(instance.image_id.as_deref()),
            InstanceField::VpcId => padded_or_placeholder(instance.vpc_id.as_deref()),
        }
    }
}

#[async_trait]
impl Resource for Instance {
    type Field = InstanceField;

    const KIND: ResourceKind = ResourceKind::Instance;
    const IDENTIFIER: InstanceField = InstanceField::InstanceId;
    const DEFAULT_FIELDS: &'static str =
        "InstanceId InstanceType PublicIpAddress PrivateIpAddress AvailabilityZone StateName LaunchTime Tag:Name Tag:Service 'Tag:In Charge'";

    fn tags(&self) -> &[Tag] {
        &self.tags
    }

    fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    async fn fetch(provider: &dyn CloudProvider, query: &FetchQuery) -> Result<Vec<Self>> {
        provider.describe_instances(query).await
    }
}
