use aws_sdk_ec2::{Client as Ec2Client, types};
use cloudls_core::{
    cloud_provider::FetchQuery,
    error::Result,
    resource::{Volume, VolumeAttachment},
};
use tracing::{debug, warn};

use crate::{
    aws_error::map_aws_error,
    conversion::{ec2_filters, ec2_tags, to_utc},
};

pub(super) async fn describe_volumes(
    ec2_client: &Ec2Client,
    query: &FetchQuery,
) -> Result<Vec<Volume>> {
    let response = ec2_client
        .describe_volumes()
        .set_filters(Some(ec2_filters(query, None)))
        .send()
        .await
        .map_err(|error| map_aws_error("DescribeVolumes", error))?;

    let volumes: Vec<Volume> = response.volumes().iter().filter_map(to_volume).collect();

    debug!(count = volumes.len(), "Described volumes");
    Ok(volumes)
}

fn to_volume(volume: &types::Volume) -> Option<Volume> {
    let Some(id) = volume.volume_id() else {
        warn!("Skipping volume without a volume id");
        return None;
    };

    Some(Volume {
        id: id.to_string(),
        volume_type: volume
            .volume_type()
            .map(|volume_type| volume_type.as_str().to_string()),
        size_gib: volume.size(),
        state: volume.state().map(|state| state.as_str().to_string()),
        availability_zone: volume.availability_zone().map(ToString::to_string),
        create_time: volume.create_time().and_then(to_utc),
        attachments: volume
            .attachments()
            .iter()
            .map(|attachment| VolumeAttachment {
                instance_id: attachment.instance_id().map(ToString::to_string),
                device: attachment.device().map(ToString::to_string),
            })
            .collect(),
        tags: ec2_tags(volume.tags()),
    })
}

#[cfg(test)]
mod tests {
    use aws_sdk_ec2::types::{VolumeState, VolumeType};

    use super::*;

    #[test]
    fn test_to_volume_keeps_attachments_in_order() {
        let sdk_volume = types::Volume::builder()
            .volume_id("vol-1")
            .volume_type(VolumeType::Gp3)
            .size(100)
            .state(VolumeState::InUse)
            .attachments(
                types::VolumeAttachment::builder()
                    .instance_id("i-1")
                    .device("/dev/xvda")
                    .build(),
            )
            .attachments(
                types::VolumeAttachment::builder()
                    .instance_id("i-2")
                    .device("/dev/xvdf")
                    .build(),
            )
            .build();

        let volume = to_volume(&sdk_volume).unwrap();

        assert_eq!(volume.volume_type.as_deref(), Some("gp3"));
        assert_eq!(volume.size_gib, Some(100));
        assert_eq!(volume.state.as_deref(), Some("in-use"));
        let instance_ids: Vec<&str> = volume
            .attachments
            .iter()
            .filter_map(|attachment| attachment.instance_id.as_deref())
            .collect();
        assert_eq!(instance_ids, vec!["i-1", "i-2"]);
    }
}
