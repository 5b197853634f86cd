use std::time::Duration;

use clap::{Args, Subcommand};
use cloudls_core::{
    cloud_provider::{CloudProvider, InstanceAction},
    commands::instance_state::{change_instance_state, wait_for_instance_state},
    config::Settings,
    error::Result,
    resource::{Address, Image, Instance, Snapshot, Volume},
};

use super::{ListArgs, print_list};

#[derive(Debug, Subcommand)]
pub enum Ec2Command {
    /// List EC2 instances
    Ls(ListArgs),
    /// List EBS volumes
    Vls(ListArgs),
    /// List AMIs owned by the account
    Ils(ListArgs),
    /// List EBS snapshots owned by the account
    Sls(ListArgs),
    /// List Elastic IP addresses
    Als(ListArgs),
    /// Start instances
    Start(InstanceStateArgs),
    /// Stop instances
    Stop(InstanceStateArgs),
}

#[derive(Debug, Args)]
pub struct InstanceStateArgs {
    #[arg(required = true, value_name = "INSTANCE_ID")]
    pub instance_ids: Vec<String>,

    /// Block until every instance reaches the target state
    #[arg(long)]
    pub wait: bool,

    /// Give up waiting after this many seconds
    #[arg(long, default_value_t = 600, value_name = "SECONDS")]
    pub timeout: u64,
}

pub async fn run(provider: &dyn CloudProvider, settings: &Settings, command: Ec2Command) -> Result<()> {
    match command {
        Ec2Command::Ls(args) => print_list::<Instance>(provider, settings, "ec2.ls", args).await,
        Ec2Command::Vls(args) => print_list::<Volume>(provider, settings, "ec2.vls", args).await,
        Ec2Command::Ils(args) => print_list::<Image>(provider, settings, "ec2.ils", args).await,
        Ec2Command::Sls(args) => print_list::<Snapshot>(provider, settings, "ec2.sls", args).await,
        Ec2Command::Als(args) => print_list::<Address>(provider, settings, "ec2.als", args).await,
        Ec2Command::Start(args) => set_instance_state(provider, InstanceAction::Start, args).await,
        Ec2Command::Stop(args) => set_instance_state(provider, InstanceAction::Stop, args).await,
    }
}

async fn set_instance_state(
    provider: &dyn CloudProvider,
    action: InstanceAction,
    args: InstanceStateArgs,
) -> Result<()> {
    let changes = change_instance_state(provider, &args.instance_ids, action).await?;
    for change in &changes {
        println!("{}", change.to_line());
    }

    if args.wait {
        eprintln!(
            "Waiting until the instances are {}...",
            action.target_state()
        );
        wait_for_instance_state(
            provider,
            &args.instance_ids,
            action,
            Duration::from_secs(args.timeout),
        )
        .await?;
    }
    Ok(())
}
