mod address;
mod auto_scaling_group;
mod image;
mod instance;
mod load_balancer;
mod snapshot;
mod volume;

use std::fmt::{self, Display, Formatter};

use async_trait::async_trait;

pub use address::{Address, AddressField};
pub use auto_scaling_group::{
    AutoScalingGroup, AutoScalingGroupField, GroupInstance, IN_SERVICE,
};
pub use image::{Image, ImageField};
pub use instance::{Instance, InstanceField};
pub use load_balancer::{
    LoadBalancer, LoadBalancerField, TargetGroup, TargetGroupField, TargetHealth,
};
pub use snapshot::{Snapshot, SnapshotField};
pub use volume::{Volume, VolumeAttachment, VolumeField};

use crate::{
    cloud_provider::{CloudProvider, FetchQuery},
    error::Result,
};

pub const NAME_TAG: &str = "Name";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Value of the first tag named `key`, or an empty string when it is unset.
pub fn lookup_tag<'a>(tags: &'a [Tag], key: &str) -> &'a str {
    tags.iter()
        .find(|tag| tag.key == key)
        .map(|tag| tag.value.as_str())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Instance,
    Volume,
    Address,
    Snapshot,
    Image,
    LoadBalancer,
    TargetGroup,
    AutoScalingGroup,
}

impl ResourceKind {
    /// State a resource must be in to survive the default (non `--all`) listing.
    /// `None` means the kind has no state concept and is never filtered on it.
    pub fn active_state(self) -> Option<&'static str> {
        match self {
            ResourceKind::Instance => Some("running"),
            ResourceKind::LoadBalancer => Some("active"),
            ResourceKind::Volume
            | ResourceKind::Address
            | ResourceKind::Snapshot
            | ResourceKind::Image
            | ResourceKind::TargetGroup
            | ResourceKind::AutoScalingGroup => None,
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let value = match self {
            ResourceKind::Instance => "instance",
            ResourceKind::Volume => "volume",
            ResourceKind::Address => "address",
            ResourceKind::Snapshot => "snapshot",
            ResourceKind::Image => "image",
            ResourceKind::LoadBalancer => "load balancer",
            ResourceKind::TargetGroup => "target group",
            ResourceKind::AutoScalingGroup => "autoscaling group",
        };
        write!(f, "{}", value)
    }
}

/// A built-in output column of one resource kind.
pub trait Field: Copy + fmt::Debug + Send + Sync + 'static {
    type Resource;

    const ALL: &'static [Self];

    fn name(self) -> &'static str;

    fn format(self, resource: &Self::Resource) -> String;

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.name() == name)
    }
}

#[async_trait]
pub trait Resource: Send + Sync + Sized {
    type Field: Field<Resource = Self>;

    const KIND: ResourceKind;

    /// Column printed in quiet mode.
    const IDENTIFIER: Self::Field;

    /// Field list used when neither the command line nor the settings file set one.
    const DEFAULT_FIELDS: &'static str;

    fn tags(&self) -> &[Tag];

    fn state(&self) -> Option<&str> {
        None
    }

    /// Name the domain filter is matched against when no `Tag:Name` column is requested.
    fn display_name(&self) -> &str {
        lookup_tag(self.tags(), NAME_TAG)
    }

    async fn fetch(provider: &dyn CloudProvider, query: &FetchQuery) -> Result<Vec<Self>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    mod lookup_tag_tests {
        use super::*;

        #[test]
        fn test_present_key_returns_value() {
            let tags = vec![Tag::new("Name", "web-1"), Tag::new("Service", "api")];
            assert_eq!(lookup_tag(&tags, "Service"), "api");
            assert_eq!(lookup_tag(&tags, "Name"), "web-1");
        }

        #[test]
        fn test_absent_key_returns_empty() {
            let tags = vec![Tag::new("Name", "web-1")];
            assert_eq!(lookup_tag(&tags, "Owner"), "");
        }

        #[test]
        fn test_empty_tag_set_returns_empty() {
            assert_eq!(lookup_tag(&[], "Name"), "");
        }

        #[test]
        fn test_key_match_is_case_sensitive() {
            let tags = vec![Tag::new("Name", "web-1")];
            assert_eq!(lookup_tag(&tags, "name"), "");
        }

        #[test]
        fn test_key_with_spaces() {
            let tags = vec![Tag::new("In Charge", "ops")];
            assert_eq!(lookup_tag(&tags, "In Charge"), "ops");
        }
    }

    #[test]
    fn test_active_state_only_for_stateful_kinds() {
        assert_eq!(ResourceKind::Instance.active_state(), Some("running"));
        assert_eq!(ResourceKind::LoadBalancer.active_state(), Some("active"));
        assert_eq!(ResourceKind::Volume.active_state(), None);
        assert_eq!(ResourceKind::AutoScalingGroup.active_state(), None);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ResourceKind::TargetGroup.to_string(), "target group");
        assert_eq!(ResourceKind::Instance.to_string(), "instance");
    }
}
