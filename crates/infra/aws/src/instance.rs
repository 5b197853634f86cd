use std::time::Duration;

use aws_sdk_ec2::{Client as Ec2Client, client::Waiters, types};
use cloudls_core::{
    cloud_provider::{
        ChangeInstanceStateParams, FetchQuery, InstanceAction, InstanceStateChange,
        WaitInstanceStateParams,
    },
    error::{ComputeError, Result},
    resource::Instance,
};
use tracing::{debug, warn};

use crate::{
    aws_error::map_aws_error,
    conversion::{ec2_filters, ec2_tags, to_utc},
};

const STATE_FILTER: (&str, &str) = ("instance-state-name", "running");

pub(super) async fn describe_instances(
    ec2_client: &Ec2Client,
    query: &FetchQuery,
) -> Result<Vec<Instance>> {
    let response = ec2_client
        .describe_instances()
        .set_filters(Some(ec2_filters(query, Some(STATE_FILTER))))
        .send()
        .await
        .map_err(|error| map_aws_error("DescribeInstances", error))?;

    let instances: Vec<Instance> = response
        .reservations()
        .iter()
        .flat_map(|reservation| reservation.instances())
        .filter_map(to_instance)
        .collect();

    debug!(count = instances.len(), "Described instances");
    Ok(instances)
}

fn state_name(state: Option<&types::InstanceState>) -> Option<String> {
    state
        .and_then(|state| state.name())
        .map(|name| name.as_str().to_string())
}

fn to_instance(instance: &types::Instance) -> Option<Instance> {
    let Some(id) = instance.instance_id() else {
        warn!("Skipping instance without an instance id");
        return None;
    };

    Some(Instance {
        id: id.to_string(),
        instance_type: instance
            .instance_type()
            .map(|instance_type| instance_type.as_str().to_string()),
        public_ip_v4: instance.public_ip_address().map(ToString::to_string),
        private_ip_v4: instance.private_ip_address().map(ToString::to_string),
        availability_zone: instance
            .placement()
            .and_then(|placement| placement.availability_zone())
            .map(ToString::to_string),
        state: state_name(instance.state()),
        launch_time: instance.launch_time().and_then(to_utc),
        image_id: instance.image_id().map(ToString::to_string),
        vpc_id: instance.vpc_id().map(ToString::to_string),
        tags: ec2_tags(instance.tags()),
    })
}

fn to_state_change(change: &types::InstanceStateChange) -> Option<InstanceStateChange> {
    Some(InstanceStateChange {
        instance_id: change.instance_id()?.to_string(),
        previous_state: state_name(change.previous_state()),
        current_state: state_name(change.current_state()),
    })
}

pub(super) async fn change_instance_state(
    ec2_client: &Ec2Client,
    params: &ChangeInstanceStateParams<'_>,
) -> Result<Vec<InstanceStateChange>> {
    let instance_ids = Some(params.instance_ids.to_vec());

    let changes: Vec<InstanceStateChange> = match params.action {
        InstanceAction::Start => ec2_client
            .start_instances()
            .set_instance_ids(instance_ids)
            .send()
            .await
            .map_err(|error| map_aws_error("StartInstances", error))?
            .starting_instances()
            .iter()
            .filter_map(to_state_change)
            .collect(),
        InstanceAction::Stop => ec2_client
            .stop_instances()
            .set_instance_ids(instance_ids)
            .send()
            .await
            .map_err(|error| map_aws_error("StopInstances", error))?
            .stopping_instances()
            .iter()
            .filter_map(to_state_change)
            .collect(),
    };

    debug!(action = %params.action, count = changes.len(), "Changed instance state");
    Ok(changes)
}

pub(super) async fn wait_for_instance_state(
    ec2_client: &Ec2Client,
    params: &WaitInstanceStateParams<'_>,
) -> Result<()> {
    let instance_ids = Some(params.instance_ids.to_vec());
    let timeout: Duration = params.timeout;
    let target_state = params.action.target_state();

    let result = match params.action {
        InstanceAction::Start => ec2_client
            .wait_until_instance_running()
            .set_instance_ids(instance_ids)
            .wait(timeout)
            .await
            .map(|_| ())
            .map_err(|error| error.to_string()),
        InstanceAction::Stop => ec2_client
            .wait_until_instance_stopped()
            .set_instance_ids(instance_ids)
            .wait(timeout)
            .await
            .map(|_| ())
            .map_err(|error| error.to_string()),
    };

    result.map_err(|reason| {
        ComputeError::InstanceWaitFailed {
            target_state: target_state.to_string(),
            reason,
        }
        .into()
    })
}
