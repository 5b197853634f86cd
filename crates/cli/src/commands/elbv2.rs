use clap::Subcommand;
use cloudls_core::{
    cloud_provider::CloudProvider,
    commands::target_health::describe_target_health,
    config::Settings,
    error::Result,
    resource::{LoadBalancer, TargetGroup},
};

use super::{ListArgs, print_list};

#[derive(Debug, Subcommand)]
pub enum Elbv2Command {
    /// List application and network load balancers
    Ls(ListArgs),
    /// List target groups
    Tls(ListArgs),
    /// Show the health of every target in a target group
    Ps {
        #[arg(value_name = "TARGET_GROUP_NAME")]
        target_group_name: String,
    },
}

pub async fn run(
    provider: &dyn CloudProvider,
    settings: &Settings,
    command: Elbv2Command,
) -> Result<()> {
    match command {
        Elbv2Command::Ls(args) => {
            print_list::<LoadBalancer>(provider, settings, "elbv2.ls", args).await
        }
        Elbv2Command::Tls(args) => {
            print_list::<TargetGroup>(provider, settings, "elbv2.tls", args).await
        }
        Elbv2Command::Ps { target_group_name } => {
            for line in describe_target_health(provider, &target_group_name).await? {
                println!("{line}");
            }
            Ok(())
        }
    }
}
