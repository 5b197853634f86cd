use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{Field, Resource, ResourceKind, Tag};
use crate::{
    cloud_provider::{CloudProvider, FetchQuery},
    error::Result,
    field::{PLACEHOLDER, format_timestamp, or_placeholder, padded, padded_or_placeholder},
};

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub id: String,
    pub volume_id: Option<String>,
    pub volume_size_gib: Option<i32>,
    pub state: Option<String>,
    pub description: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotField {
    SnapshotId,
    VolumeId,
    VolumeSize,
    State,
    Description,
    SnapshotStartTime,
}

impl Field for SnapshotField {
    type Resource = Snapshot;

    const ALL: &'static [Self] = &[
        SnapshotField::SnapshotId,
        SnapshotField::VolumeId,
        SnapshotField::VolumeSize,
        SnapshotField::State,
        SnapshotField::Description,
        SnapshotField::SnapshotStartTime,
    ];

    fn name(self) -> &'static str {
        match self {
            SnapshotField::SnapshotId => "SnapshotId",
            SnapshotField::VolumeId => "VolumeId",
            SnapshotField::VolumeSize => "VolumeSize",
            SnapshotField::State => "State",
            SnapshotField::Description => "Description",
            SnapshotField::SnapshotStartTime => "SnapshotStartTime",
        }
    }

    fn format(self, snapshot: &Snapshot) -> String {
        match self {
            SnapshotField::SnapshotId => padded(&snapshot.id),
            SnapshotField::VolumeId => padded_or_placeholder(snapshot.volume_id.as_deref()),
            SnapshotField::VolumeSize => snapshot
                .volume_size_gib
                .map(|size| format!("{size}GiB"))
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            SnapshotField::State => padded_or_placeholder(snapshot.state.as_deref()),
            SnapshotField::Description => {
                or_placeholder(snapshot.description.as_deref().filter(|d| !d.is_empty()))
            }
            SnapshotField::SnapshotStartTime => format_timestamp(snapshot.start_time.as_ref()),
        }
    }
}

#[async_trait]
impl Resource for Snapshot {
    type Field = SnapshotField;

    const KIND: ResourceKind = ResourceKind::Snapshot;
    const IDENTIFIER: SnapshotField = SnapshotField::SnapshotId;
    const DEFAULT_FIELDS: &'static str =
        "SnapshotId VolumeId VolumeSize State SnapshotStartTime Description Tag:Name";

    fn tags(&self) -> &[Tag] {
        &self.tags
    }

    fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    async fn fetch(provider: &dyn CloudProvider, query: &FetchQuery) -> Result<Vec<Self>> {
        provider.describe_snapshots(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_is_not_padded() {
        let snapshot = Snapshot {
            id: "snap-1".to_string(),
            description: Some("nightly".to_string()),
            ..Default::default()
        };
        assert_eq!(SnapshotField::Description.format(&snapshot), "nightly");
    }

    #[test]
    fn test_empty_description_renders_placeholder() {
        let snapshot = Snapshot {
            id: "snap-1".to_string(),
            description: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(SnapshotField::Description.format(&snapshot), "-");
        assert_eq!(SnapshotField::SnapshotStartTime.format(&snapshot), "-");
    }
}
