use aws_sdk_ec2::{Client as Ec2Client, types};
use cloudls_core::{cloud_provider::FetchQuery, error::Result, resource::Snapshot};
use tracing::{debug, warn};

use crate::{
    aws_error::map_aws_error,
    conversion::{ec2_filters, ec2_tags, to_utc},
};

/// Public snapshots are never listed.
const OWNER: &str = "self";

pub(super) async fn describe_snapshots(
    ec2_client: &Ec2Client,
    query: &FetchQuery,
) -> Result<Vec<Snapshot>> {
    let response = ec2_client
        .describe_snapshots()
        .owner_ids(OWNER)
        .set_filters(Some(ec2_filters(query, None)))
        .send()
        .await
        .map_err(|error| map_aws_error("DescribeSnapshots", error))?;

    let snapshots: Vec<Snapshot> = response
        .snapshots()
        .iter()
        .filter_map(to_snapshot)
        .collect();

    debug!(count = snapshots.len(), "Described snapshots");
    Ok(snapshots)
}

fn to_snapshot(snapshot: &types::Snapshot) -> Option<Snapshot> {
    let Some(id) = snapshot.snapshot_id() else {
        warn!("Skipping snapshot without a snapshot id");
        return None;
    };

    Some(Snapshot {
        id: id.to_string(),
        volume_id: snapshot.volume_id().map(ToString::to_string),
        volume_size_gib: snapshot.volume_size(),
        state: snapshot.state().map(|state| state.as_str().to_string()),
        description: snapshot.description().map(ToString::to_string),
        start_time: snapshot.start_time().and_then(to_utc),
        tags: ec2_tags(snapshot.tags()),
    })
}
