use aws_sdk_ec2::{Client as Ec2Client, types};
use cloudls_core::{cloud_provider::FetchQuery, error::Result, resource::Image};
use tracing::{debug, warn};

use crate::{
    aws_error::map_aws_error,
    conversion::{ec2_filters, ec2_tags, parse_utc},
};

/// Only images owned by the calling account.
const OWNER: &str = "self";

pub(super) async fn describe_images(
    ec2_client: &Ec2Client,
    query: &FetchQuery,
) -> Result<Vec<Image>> {
    let response = ec2_client
        .describe_images()
        .owners(OWNER)
        .set_filters(Some(ec2_filters(query, None)))
        .send()
        .await
        .map_err(|error| map_aws_error("DescribeImages", error))?;

    let images: Vec<Image> = response.images().iter().filter_map(to_image).collect();

    debug!(count = images.len(), "Described images");
    Ok(images)
}

fn to_image(image: &types::Image) -> Option<Image> {
    let Some(id) = image.image_id() else {
        warn!("Skipping image without an image id");
        return None;
    };

    Some(Image {
        id: id.to_string(),
        name: image.name().map(ToString::to_string),
        creation_date: image.creation_date().and_then(parse_utc),
        state: image.state().map(|state| state.as_str().to_string()),
        tags: ec2_tags(image.tags()),
    })
}

#[cfg(test)]
mod tests {
    use aws_sdk_ec2::types::ImageState;

    use super::*;

    #[test]
    fn test_to_image_parses_creation_date() {
        let sdk_image = types::Image::builder()
            .image_id("ami-1")
            .name("web-2024-03-01")
            .creation_date("2024-03-01T09:30:00.000Z")
            .state(ImageState::Available)
            .build();

        let image = to_image(&sdk_image).unwrap();

        assert_eq!(image.name.as_deref(), Some("web-2024-03-01"));
        assert_eq!(image.state.as_deref(), Some("available"));
        assert_eq!(
            image
                .creation_date
                .map(|date| date.format("%Y-%m-%d %H:%M:%S").to_string())
                .as_deref(),
            Some("2024-03-01 09:30:00")
        );
    }
}
