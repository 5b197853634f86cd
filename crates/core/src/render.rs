use regex::Regex;

use crate::{
    error::{ConfigurationError, Result},
    field::FieldSpec,
    resource::{Field, Resource},
};

/// Renders resources of kind `R` as tab-separated lines over a fixed,
/// pre-resolved field list, optionally restricted by a domain pattern.
#[derive(Debug)]
pub struct Renderer<R: Resource> {
    fields: Vec<FieldSpec<R::Field>>,
    domain: Option<Regex>,
}

impl<R: Resource> Renderer<R> {
    /// Resolves every field name and compiles the domain pattern up front.
    pub fn new<S: AsRef<str>>(field_names: &[S], domain: Option<&str>) -> Result<Self> {
        let fields = field_names
            .iter()
            .map(|name| FieldSpec::resolve::<R>(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let domain = domain
            .filter(|pattern| !pattern.is_empty())
            .map(|pattern| {
                Regex::new(pattern).map_err(|error| ConfigurationError::InvalidDomainPattern {
                    pattern: pattern.to_string(),
                    reason: error.to_string(),
                })
            })
            .transpose()?;

        Ok(Self { fields, domain })
    }

    /// Renderer printing only the kind's identifier column.
    pub fn quiet(domain: Option<&str>) -> Result<Self> {
        Self::new(&[R::IDENTIFIER.name()], domain)
    }

    /// Returns `None` when the domain pattern rejects the resource.
    pub fn render(&self, resource: &R) -> Option<String> {
        let mut identity_name: Option<String> = None;
        let mut columns = Vec::with_capacity(self.fields.len());

        for field in &self.fields {
            let value = field.format(resource);
            if field.is_name_tag() {
                identity_name = Some(value.clone());
            }
            columns.push(value);
        }

        if let Some(domain) = &self.domain {
            let name = identity_name
                .as_deref()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| resource.display_name());
            if !domain.is_match(name) {
                return None;
            }
        }

        Some(columns.join("\t"))
    }
}
