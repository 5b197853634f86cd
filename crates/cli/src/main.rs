use std::{path::PathBuf, process::ExitCode};

use clap::{Args, Parser, Subcommand};
use cloudls_aws::AwsProvider;
use cloudls_core::{config::load_settings, error::Result};

use crate::{
    commands::{autoscaling::AutoscalingCommand, ec2::Ec2Command, elbv2::Elbv2Command},
    logging::LogFormat,
};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "cloudls", version)]
#[command(about = "List and operate EC2, ELBv2 and autoscaling resources", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// AWS region; falls back to the SDK's region chain
    #[arg(long, global = true, env = "AWS_REGION")]
    region: Option<String>,

    /// Settings file [default: ~/.cloudls/config]
    #[arg(long, global = true, env = "CLOUDLS_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, global = true, default_value = "warn", env = "CLOUDLS_LOG_LEVEL")]
    log_level: String,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text, env = "CLOUDLS_LOG_FORMAT")]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// EC2 instances, volumes, images, snapshots and addresses
    #[command(subcommand)]
    Ec2(Ec2Command),
    /// Load balancers and target groups
    #[command(subcommand)]
    Elbv2(Elbv2Command),
    /// Autoscaling groups
    #[command(subcommand)]
    Autoscaling(AutoscalingCommand),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.global.log_format, &cli.global.log_level);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::debug!(?error, "Command failed");
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(cli.global.config.as_deref()).await?;
    let aws = AwsProvider::new(cli.global.region.as_deref()).await;

    match cli.command {
        Commands::Ec2(command) => commands::ec2::run(&aws, &settings, command).await,
        Commands::Elbv2(command) => commands::elbv2::run(&aws, &settings, command).await,
        Commands::Autoscaling(command) => {
            commands::autoscaling::run(&aws, &settings, command).await
        }
    }
}
