use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{Field, Resource, ResourceKind, Tag};
use crate::{
    cloud_provider::{CloudProvider, FetchQuery},
    error::Result,
    field::{format_timestamp, or_placeholder, padded, padded_or_placeholder},
};

/// An AMI owned by the calling account.
#[derive(Debug, Clone, Default)]
pub struct Image {
    pub id: String,
    pub name: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub state: Option<String>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageField {
    ImageId,
    AmiName,
    CreationDate,
    State,
}

impl Field for ImageField {
    type Resource = Image;

    const ALL: &'static [Self] = &[
        ImageField::ImageId,
        ImageField::AmiName,
        ImageField::CreationDate,
        ImageField::State,
    ];

    fn name(self) -> &'static str {
        match self {
            ImageField::ImageId => "ImageId",
            ImageField::AmiName => "AmiName",
            ImageField::CreationDate => "CreationDate",
            ImageField::State => "State",
        }
    }

    fn format(self, image: &Image) -> String {
        match self {
            ImageField::ImageId => padded(&image.id),
            ImageField::AmiName => or_placeholder(image.name.as_deref()),
            ImageField::CreationDate => format_timestamp(image.creation_date.as_ref()),
            ImageField::State => padded_or_placeholder(image.state.as_deref()),
        }
    }
}

#[async_trait]
impl Resource for Image {
    type Field = ImageField;

    const KIND: ResourceKind = ResourceKind::Image;
    const IDENTIFIER: ImageField = ImageField::ImageId;
    const DEFAULT_FIELDS: &'static str = "ImageId AmiName CreationDate State Tag:Name";

    fn tags(&self) -> &[Tag] {
        &self.tags
    }

    fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    async fn fetch(provider: &dyn CloudProvider, query: &FetchQuery) -> Result<Vec<Self>> {
        provider.describe_images(query).await
    }
}
