use std::time::Duration;

use clap::{Args, Subcommand};
use cloudls_core::{
    cloud_provider::CloudProvider,
    commands::capacity::{update_desired_capacity, wait_for_capacity},
    config::Settings,
    error::Result,
    resource::AutoScalingGroup,
    waiter::{TokioSleeper, WaiterConfig},
};

use super::{ListArgs, print_list};

#[derive(Debug, Subcommand)]
pub enum AutoscalingCommand {
    /// List autoscaling groups
    Ls(ListArgs),
    /// Change an autoscaling group's desired capacity
    Update(UpdateArgs),
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    #[arg(value_name = "AUTO_SCALING_GROUP_NAME")]
    pub group_name: String,

    #[arg(short = 'c', long, value_parser = clap::value_parser!(i32).range(0..))]
    pub desired_capacity: i32,

    /// Wait until the group has the desired number of InService instances
    #[arg(short, long)]
    pub wait: bool,

    /// Seconds between polls while waiting
    #[arg(long, default_value_t = 15, value_name = "SECONDS")]
    pub delay: u64,

    /// Polls allowed in each wait phase
    #[arg(long, default_value_t = 20)]
    pub max_attempts: u32,
}

pub async fn run(
    provider: &dyn CloudProvider,
    settings: &Settings,
    command: AutoscalingCommand,
) -> Result<()> {
    match command {
        AutoscalingCommand::Ls(args) => {
            print_list::<AutoScalingGroup>(provider, settings, "autoscaling.ls", args).await
        }
        AutoscalingCommand::Update(args) => update(provider, args).await,
    }
}

async fn update(provider: &dyn CloudProvider, args: UpdateArgs) -> Result<()> {
    let applied = update_desired_capacity(provider, &args.group_name, args.desired_capacity).await?;
    println!("{}\t{}", args.group_name, applied);

    if args.wait {
        eprintln!("Waiting until the desired capacity instances are InService...");
        let config = WaiterConfig {
            delay: Duration::from_secs(args.delay),
            capacity_attempts: args.max_attempts,
            in_service_attempts: args.max_attempts,
        };
        let attempts =
            wait_for_capacity(provider, &TokioSleeper, &args.group_name, applied, &config).await?;
        eprintln!("{} converged after {} polls", args.group_name, attempts);
    }
    Ok(())
}
