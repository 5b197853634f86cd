use async_trait::async_trait;
use aws_sdk_autoscaling::Client as AutoScalingClient;
use aws_sdk_ec2::Client as Ec2Client;
use aws_sdk_elasticloadbalancingv2::Client as ElbClient;
use cloudls_core::{
    cloud_provider::{
        ChangeInstanceStateParams, CloudProvider, FetchQuery, InstanceStateChange,
        SetDesiredCapacityParams, WaitInstanceStateParams,
    },
    error::Result,
    resource::{
        Address, AutoScalingGroup, Image, Instance, LoadBalancer, Snapshot, TargetGroup,
        TargetHealth, Volume,
    },
};

use crate::{address, auto_scaling, config, image, instance, load_balancer, snapshot, volume};

pub struct AwsProvider {
    pub ec2_client: Ec2Client,
    pub elb_client: ElbClient,
    pub auto_scaling_client: AutoScalingClient,
}

impl AwsProvider {
    pub async fn new(region: Option<&str>) -> Self {
        let config = config::get_config(region).await;
        Self {
            ec2_client: Ec2Client::new(&config),
            elb_client: ElbClient::new(&config),
            auto_scaling_client: AutoScalingClient::new(&config),
        }
    }
}

#[async_trait]
impl CloudProvider for AwsProvider {
    async fn describe_instances(&self, query: &FetchQuery) -> Result<Vec<Instance>> {
        instance::describe_instances(&self.ec2_client, query).await
    }

    async fn describe_volumes(&self, query: &FetchQuery) -> Result<Vec<Volume>> {
        volume::describe_volumes(&self.ec2_client, query).await
    }

    async fn describe_addresses(&self, query: &FetchQuery) -> Result<Vec<Address>> {
        address::describe_addresses(&self.ec2_client, query).await
    }

    async fn describe_snapshots(&self, query: &FetchQuery) -> Result<Vec<Snapshot>> {
        snapshot::describe_snapshots(&self.ec2_client, query).await
    }

    async fn describe_images(&self, query: &FetchQuery) -> Result<Vec<Image>> {
        image::describe_images(&self.ec2_client, query).await
    }

    async fn describe_load_balancers(&self, query: &FetchQuery) -> Result<Vec<LoadBalancer>> {
        load_balancer::describe_load_balancers(&self.elb_client, query).await
    }

    async fn describe_target_groups(&self, query: &FetchQuery) -> Result<Vec<TargetGroup>> {
        load_balancer::describe_target_groups(&self.elb_client, query).await
    }

    async fn describe_target_health(&self, target_group_name: &str) -> Result<Vec<TargetHealth>> {
        load_balancer::describe_target_health(&self.elb_client, target_group_name).await
    }

    async fn describe_auto_scaling_groups(
        &self,
        query: &FetchQuery,
    ) -> Result<Vec<AutoScalingGroup>> {
        auto_scaling::describe_auto_scaling_groups(&self.auto_scaling_client, query).await
    }

    async fn describe_auto_scaling_group(&self, group_name: &str) -> Result<AutoScalingGroup> {
        auto_scaling::describe_auto_scaling_group(&self.auto_scaling_client, group_name).await
    }

    async fn set_desired_capacity(&self, params: &SetDesiredCapacityParams) -> Result<i32> {
        auto_scaling::set_desired_capacity(&self.auto_scaling_client, params).await
    }

    async fn change_instance_state(
        &self,
        params: &ChangeInstanceStateParams,
    ) -> Result<Vec<InstanceStateChange>> {
        instance::change_instance_state(&self.ec2_client, params).await
    }

    async fn wait_for_instance_state(&self, params: &WaitInstanceStateParams) -> Result<()> {
        instance::wait_for_instance_state(&self.ec2_client, params).await
    }
}
