use aws_sdk_ec2::{Client as Ec2Client, types};
use cloudls_core::{cloud_provider::FetchQuery, error::Result, resource::Address};
use tracing::debug;

use crate::{
    aws_error::map_aws_error,
    conversion::{ec2_filters, ec2_tags},
};

pub(super) async fn describe_addresses(
    ec2_client: &Ec2Client,
    query: &FetchQuery,
) -> Result<Vec<Address>> {
    let response = ec2_client
        .describe_addresses()
        .set_filters(Some(ec2_filters(query, None)))
        .send()
        .await
        .map_err(|error| map_aws_error("DescribeAddresses", error))?;

    let addresses: Vec<Address> = response.addresses().iter().map(to_address).collect();

    debug!(count = addresses.len(), "Described addresses");
    Ok(addresses)
}

fn to_address(address: &types::Address) -> Address {
    Address {
        public_ip: address.public_ip().map(ToString::to_string),
        allocation_id: address.allocation_id().map(ToString::to_string),
        instance_id: address.instance_id().map(ToString::to_string),
        private_ip: address.private_ip_address().map(ToString::to_string),
        association_id: address.association_id().map(ToString::to_string),
        tags: ec2_tags(address.tags()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unassociated_address_has_no_instance() {
        let sdk_address = types::Address::builder()
            .public_ip("203.0.113.10")
            .allocation_id("eipalloc-1")
            .build();

        let address = to_address(&sdk_address);

        assert_eq!(address.public_ip.as_deref(), Some("203.0.113.10"));
        assert_eq!(address.allocation_id.as_deref(), Some("eipalloc-1"));
        assert_eq!(address.instance_id, None);
        assert_eq!(address.association_id, None);
    }
}
