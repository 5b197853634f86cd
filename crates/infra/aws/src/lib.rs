mod address;
mod auto_scaling;
mod aws_error;
mod config;
mod conversion;
mod image;
mod instance;
mod load_balancer;
mod provider;
mod snapshot;
mod volume;

pub use provider::AwsProvider;
