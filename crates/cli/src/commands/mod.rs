pub mod autoscaling;
pub mod ec2;
pub mod elbv2;

use clap::Args;
use cloudls_core::{
    cloud_provider::CloudProvider,
    commands::list::{ListFlags, ListOptions, list},
    config::Settings,
    error::Result,
    resource::Resource,
};

#[derive(Debug, Args)]
pub struct ListArgs {
    /// List everything (by default only running instances and active load balancers)
    #[arg(short, long)]
    pub all: bool,

    /// Only print each resource's identifier
    #[arg(short, long)]
    pub quiet: bool,

    /// Keep resources whose tag value contains VALUE, e.g. "Name:app-production"
    #[arg(short = 't', long, value_name = "KEY:VALUE")]
    pub filter_tag: Option<String>,

    /// Space separated output fields; quote names containing spaces
    #[arg(short = 'F', long)]
    pub fields: Option<String>,

    /// Regular expression the resource's name must match
    #[arg(short = 'D', long)]
    pub domain: Option<String>,
}

impl From<ListArgs> for ListFlags {
    fn from(args: ListArgs) -> Self {
        Self {
            all: args.all,
            quiet: args.quiet,
            filter_tag: args.filter_tag,
            fields: args.fields,
            domain: args.domain,
        }
    }
}

/// Resolves options for the `section` command and prints one line per resource.
pub(crate) async fn print_list<R: Resource>(
    provider: &dyn CloudProvider,
    settings: &Settings,
    section: &str,
    args: ListArgs,
) -> Result<()> {
    let defaults = settings.list_defaults(section)?;
    let options = ListOptions::resolve::<R>(&args.into(), &defaults)?;

    for line in list::<R>(provider, &options).await? {
        println!("{line}");
    }
    Ok(())
}
