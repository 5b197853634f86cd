use tracing::debug;

use crate::{
    cloud_provider::CloudProvider,
    config::ListDefaults,
    error::{ComputeError, Error, Result},
    field::parse_field_list,
    filter::{FilterSpec, Filters},
    render::Renderer,
    resource::Resource,
};

/// List options as given on the command line. `None` means the flag was not
/// passed and the settings file or built-in default applies.
#[derive(Debug, Clone, Default)]
pub struct ListFlags {
    pub all: bool,
    pub quiet: bool,
    pub filter_tag: Option<String>,
    pub fields: Option<String>,
    pub domain: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub filter: FilterSpec,
    pub fields: Vec<String>,
    pub domain: Option<String>,
    pub quiet: bool,
}

impl ListOptions {
    /// Merges flags over settings-file defaults over the kind's built-in field list.
    pub fn resolve<R: Resource>(flags: &ListFlags, defaults: &ListDefaults) -> Result<Self> {
        let fields = flags
            .fields
            .as_deref()
            .or(defaults.fields.as_deref())
            .unwrap_or(R::DEFAULT_FIELDS);

        Ok(Self {
            filter: FilterSpec {
                all: flags.all || defaults.all.unwrap_or(false),
                tag_filter: flags
                    .filter_tag
                    .clone()
                    .or_else(|| defaults.filter_tag.clone())
                    .unwrap_or_default(),
            },
            fields: parse_field_list(fields)?,
            domain: flags.domain.clone().or_else(|| defaults.domain.clone()),
            quiet: flags.quiet,
        })
    }
}

/// Fetches every resource of kind `R`, keeps those passing the filters and
/// renders them in fetch order. Option errors surface before any API call.
pub async fn list<R: Resource>(
    provider: &dyn CloudProvider,
    options: &ListOptions,
) -> Result<Vec<String>> {
    let filters = Filters::build(&options.filter)?;
    let domain = options.domain.as_deref();
    let renderer = if options.quiet {
        Renderer::<R>::quiet(domain)?
    } else {
        Renderer::<R>::new(options.fields.as_slice(), domain)?
    };

    let resources = R::fetch(provider, &filters.query())
        .await
        .map_err(describe_failed::<R>)?;
    let fetched = resources.len();

    let lines: Vec<String> = filters
        .apply(resources)
        .iter()
        .filter_map(|resource| renderer.render(resource))
        .collect();

    debug!(kind = %R::KIND, fetched, rendered = lines.len(), "Listed resources");
    Ok(lines)
}

fn describe_failed<R: Resource>(error: Error) -> Error {
    match error {
        Error::Compute(_) | Error::Configuration(_) => error,
        other => ComputeError::DescribeFailed {
            kind: R::KIND,
            reason: other.to_string(),
        }
        .into(),
    }
}
