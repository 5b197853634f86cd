use async_trait::async_trait;

use super::{Field, Resource, ResourceKind, Tag};
use crate::{
    cloud_provider::{CloudProvider, FetchQuery},
    error::Result,
    field::{ip_or_placeholder, padded, padded_or_placeholder},
};

/// An Elastic IP allocation.
#[derive(Debug, Clone, Default)]
pub struct Address {
    pub public_ip: Option<String>,
    pub allocation_id: Option<String>,
    pub instance_id: Option<String>,
    pub private_ip: Option<String>,
    pub association_id: Option<String>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressField {
    PublicIp,
    AllocationId,
    InstanceId,
    PrivateIpAddress,
    AssociationId,
}

impl Field for AddressField {
    type Resource = Address;

    const ALL: &'static [Self] = &[
        AddressField::PublicIp,
        AddressField::AllocationId,
        AddressField::InstanceId,
        AddressField::PrivateIpAddress,
        AddressField::AssociationId,
    ];

    fn name(self) -> &'static str {
        match self {
            AddressField::PublicIp => "PublicIp",
            AddressField::AllocationId => "AllocationId",
            AddressField::InstanceId => "InstanceId",
            AddressField::PrivateIpAddress => "PrivateIpAddress",
            AddressField::AssociationId => "AssociationId",
        }
    }

    fn format(self, address: &Address) -> String {
        match self {
            AddressField::PublicIp => padded(&ip_or_placeholder(address.public_ip.as_deref())),
            AddressField::AllocationId => padded_or_placeholder(address.allocation_id.as_deref()),
            AddressField::InstanceId => padded_or_placeholder(address.instance_id.as_deref()),
            AddressField::PrivateIpAddress => {
                padded(&ip_or_placeholder(address.private_ip.as_deref()))
            }
            AddressField::AssociationId => {
                padded_or_placeholder(address.association_id.as_deref())
            }
        }
    }
}

#[async_trait]
impl Resource for Address {
    type Field = AddressField;

    const KIND: ResourceKind = ResourceKind::Address;
    const IDENTIFIER: AddressField = AddressField::AllocationId;
    const DEFAULT_FIELDS: &'static str =
        "PublicIp AllocationId InstanceId PrivateIpAddress AssociationId Tag:Name";

    fn tags(&self) -> &[Tag] {
        &self.tags
    }

    async fn fetch(provider: &dyn CloudProvider, query: &FetchQuery) -> Result<Vec<Self>> {
        provider.describe_addresses(query).await
    }
}
