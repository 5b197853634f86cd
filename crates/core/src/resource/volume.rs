use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{Field, Resource, ResourceKind, Tag};
use crate::{
    cloud_provider::{CloudProvider, FetchQuery},
    error::Result,
    field::{PLACEHOLDER, format_timestamp, padded, padded_or_placeholder},
};

#[derive(Debug, Clone, Default)]
pub struct Volume {
    pub id: String,
    pub volume_type: Option<String>,
    pub size_gib: Option<i32>,
    pub state: Option<String>,
    pub availability_zone: Option<String>,
    pub create_time: Option<DateTime<Utc>>,
    pub attachments: Vec<VolumeAttachment>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Default)]
pub struct VolumeAttachment {
    pub instance_id: Option<String>,
    pub device: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeField {
    VolumeId,
    VolumeType,
    Size,
    State,
    AvailabilityZone,
    CreateTime,
    Attachments,
}

impl Field for VolumeField {
    type Resource = Volume;

    const ALL: &'static [Self] = &[
        VolumeField::VolumeId,
        VolumeField::VolumeType,
        VolumeField::Size,
        VolumeField::State,
        VolumeField::AvailabilityZone,
        VolumeField::CreateTime,
        VolumeField::Attachments,
    ];

    fn name(self) -> &'static str {
        match self {
            VolumeField::VolumeId => "VolumeId",
            VolumeField::VolumeType => "VolumeType",
            VolumeField::Size => "Size",
            VolumeField::State => "State",
            VolumeField::AvailabilityZone => "AvailabilityZone",
            VolumeField::CreateTime => "CreateTime",
            VolumeField::Attachments => "Attachments",
        }
    }

    fn format(self, volume: &Volume) -> String {
        match self {
            VolumeField::VolumeId => volume.id.clone(),
            VolumeField::VolumeType => padded_or_placeholder(volume.volume_type.as_deref()),
            VolumeField::Size => volume
                .size_gib
                .map(|size| format!("{size}GiB"))
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            VolumeField::State => padded_or_placeholder(volume.state.as_deref()),
            VolumeField::AvailabilityZone => {
                padded_or_placeholder(volume.availability_zone.as_deref())
            }
            VolumeField::CreateTime => format_timestamp(volume.create_time.as_ref()),
            VolumeField::Attachments => format_attachments(&volume.attachments),
        }
    }
}

/// Instance ids and devices as two tab-separated sub-columns, each
/// comma-joined when the volume is multi-attached.
fn format_attachments(attachments: &[VolumeAttachment]) -> String {
    let join = |values: Vec<&str>| {
        if values.is_empty() {
            PLACEHOLDER.to_string()
        } else {
            values.join(",")
        }
    };

    let instance_ids = attachments
        .iter()
        .map(|attachment| attachment.instance_id.as_deref().unwrap_or(PLACEHOLDER))
        .collect();
    let devices = attachments
        .iter()
        .map(|attachment| attachment.device.as_deref().unwrap_or(PLACEHOLDER))
        .collect();

    format!("{}\t{}", padded(&join(instance_ids)), padded(&join(devices)))
}

#[async_trait]
impl Resource for Volume {
    type Field = VolumeField;

    const KIND: ResourceKind = ResourceKind::Volume;
    const IDENTIFIER: VolumeField = VolumeField::VolumeId;
    const DEFAULT_FIELDS: &'static str =
        "VolumeId VolumeType Size State AvailabilityZone CreateTime Attachments Tag:Name";

    fn tags(&self) -> &[Tag] {
        &self.tags
    }

    fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    async fn fetch(provider: &dyn CloudProvider, query: &FetchQuery) -> Result<Vec<Self>> {
        provider.describe_volumes(query).await
    }
}
