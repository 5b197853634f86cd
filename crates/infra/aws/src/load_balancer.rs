use std::collections::HashMap;

use aws_sdk_elasticloadbalancingv2::{Client as ElbClient, types};
use cloudls_core::{
    cloud_provider::FetchQuery,
    error::{ComputeError, Result},
    resource::{LoadBalancer, ResourceKind, Tag, TargetGroup, TargetHealth},
};
use tracing::{debug, warn};

use crate::aws_error::map_aws_error;

/// DescribeTags accepts at most this many ARNs per call.
const DESCRIBE_TAGS_LIMIT: usize = 20;

fn elb_tags(tags: &[types::Tag]) -> Vec<Tag> {
    tags.iter()
        .map(|tag| Tag::new(tag.key(), tag.value().unwrap_or_default()))
        .collect()
}

async fn describe_tags(
    elb_client: &ElbClient,
    arns: &[String],
) -> Result<HashMap<String, Vec<Tag>>> {
    let mut tags_by_arn = HashMap::new();

    for chunk in arns.chunks(DESCRIBE_TAGS_LIMIT) {
        let response = elb_client
            .describe_tags()
            .set_resource_arns(Some(chunk.to_vec()))
            .send()
            .await
            .map_err(|error| map_aws_error("DescribeTags", error))?;

        for description in response.tag_descriptions() {
            if let Some(arn) = description.resource_arn() {
                tags_by_arn.insert(arn.to_string(), elb_tags(description.tags()));
            }
        }
    }

    debug!(resources = arns.len(), "Described ELBv2 tags");
    Ok(tags_by_arn)
}

fn take_tags(tags_by_arn: &mut HashMap<String, Vec<Tag>>, arn: Option<&str>) -> Vec<Tag> {
    arn.and_then(|arn| tags_by_arn.remove(arn)).unwrap_or_default()
}

pub(super) async fn describe_load_balancers(
    elb_client: &ElbClient,
    _query: &FetchQuery,
) -> Result<Vec<LoadBalancer>> {
    let response = elb_client
        .describe_load_balancers()
        .send()
        .await
        .map_err(|error| map_aws_error("DescribeLoadBalancers", error))?;

    let arns: Vec<String> = response
        .load_balancers()
        .iter()
        .filter_map(|load_balancer| load_balancer.load_balancer_arn())
        .map(ToString::to_string)
        .collect();
    let mut tags_by_arn = describe_tags(elb_client, &arns).await?;

    let load_balancers: Vec<LoadBalancer> = response
        .load_balancers()
        .iter()
        .filter_map(|load_balancer| {
            let tags = take_tags(&mut tags_by_arn, load_balancer.load_balancer_arn());
            to_load_balancer(load_balancer, tags)
        })
        .collect();

    debug!(count = load_balancers.len(), "Described load balancers");
    Ok(load_balancers)
}

fn to_load_balancer(load_balancer: &types::LoadBalancer, tags: Vec<Tag>) -> Option<LoadBalancer> {
    let Some(name) = load_balancer.load_balancer_name() else {
        warn!("Skipping load balancer without a name");
        return None;
    };

    Some(LoadBalancer {
        name: name.to_string(),
        arn: load_balancer.load_balancer_arn().map(ToString::to_string),
        dns_name: load_balancer.dns_name().map(ToString::to_string),
        vpc_id: load_balancer.vpc_id().map(ToString::to_string),
        load_balancer_type: load_balancer
            .r#type()
            .map(|load_balancer_type| load_balancer_type.as_str().to_string()),
        scheme: load_balancer
            .scheme()
            .map(|scheme| scheme.as_str().to_string()),
        state: load_balancer
            .state()
            .and_then(|state| state.code())
            .map(|code| code.as_str().to_string()),
        availability_zones: load_balancer
            .availability_zones()
            .iter()
            .filter_map(|zone| zone.zone_name())
            .map(ToString::to_string)
            .collect(),
        tags,
    })
}

pub(super) async fn describe_target_groups(
    elb_client: &ElbClient,
    _query: &FetchQuery,
) -> Result<Vec<TargetGroup>> {
    let response = elb_client
        .describe_target_groups()
        .send()
        .await
        .map_err(|error| map_aws_error("DescribeTargetGroups", error))?;

    let arns: Vec<String> = response
        .target_groups()
        .iter()
        .filter_map(|target_group| target_group.target_group_arn())
        .map(ToString::to_string)
        .collect();
    let mut tags_by_arn = describe_tags(elb_client, &arns).await?;

    let target_groups: Vec<TargetGroup> = response
        .target_groups()
        .iter()
        .filter_map(|target_group| {
            let tags = take_tags(&mut tags_by_arn, target_group.target_group_arn());
            to_target_group(target_group, tags)
        })
        .collect();

    debug!(count = target_groups.len(), "Described target groups");
    Ok(target_groups)
}

fn to_target_group(target_group: &types::TargetGroup, tags: Vec<Tag>) -> Option<TargetGroup> {
    let Some(name) = target_group.target_group_name() else {
        warn!("Skipping target group without a name");
        return None;
    };

    Some(TargetGroup {
        name: name.to_string(),
        arn: target_group.target_group_arn().map(ToString::to_string),
        port: target_group.port(),
        protocol: target_group
            .protocol()
            .map(|protocol| protocol.as_str().to_string()),
        target_type: target_group
            .target_type()
            .map(|target_type| target_type.as_str().to_string()),
        vpc_id: target_group.vpc_id().map(ToString::to_string),
        tags,
    })
}

async fn find_target_group_arn(
    elb_client: &ElbClient,
    target_group_name: &str,
) -> Result<String> {
    let not_found = || ComputeError::ResourceNotFound {
        kind: ResourceKind::TargetGroup,
        identifier: target_group_name.to_string(),
    };

    let response = match elb_client
        .describe_target_groups()
        .names(target_group_name)
        .send()
        .await
    {
        Ok(response) => response,
        Err(error)
            if error
                .as_service_error()
                .is_some_and(|service_error| service_error.is_target_group_not_found_exception()) =>
        {
            return Err(not_found().into());
        }
        Err(error) => return Err(map_aws_error("DescribeTargetGroups", error)),
    };

    response
        .target_groups()
        .iter()
        .find_map(|target_group| target_group.target_group_arn())
        .map(ToString::to_string)
        .ok_or_else(|| not_found().into())
}

pub(super) async fn describe_target_health(
    elb_client: &ElbClient,
    target_group_name: &str,
) -> Result<Vec<TargetHealth>> {
    let arn = find_target_group_arn(elb_client, target_group_name).await?;

    let response = elb_client
        .describe_target_health()
        .target_group_arn(&arn)
        .send()
        .await
        .map_err(|error| map_aws_error("DescribeTargetHealth", error))?;

    let targets: Vec<TargetHealth> = response
        .target_health_descriptions()
        .iter()
        .filter_map(to_target_health)
        .collect();

    debug!(target_group_name, count = targets.len(), "Described target health");
    Ok(targets)
}

fn to_target_health(description: &types::TargetHealthDescription) -> Option<TargetHealth> {
    let target = description.target()?;
    let health = description.target_health();

    Some(TargetHealth {
        target_id: target.id().to_string(),
        port: target.port(),
        state: health
            .and_then(|health| health.state())
            .map(|state| state.as_str().to_string()),
        reason: health
            .and_then(|health| health.reason())
            .map(|reason| reason.as_str().to_string()),
    })
}
