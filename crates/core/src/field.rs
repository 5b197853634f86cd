use chrono::{DateTime, Utc};

use crate::{
    error::{ConfigurationError, Result},
    resource::{Field, NAME_TAG, Resource, lookup_tag},
};

pub const TAG_PREFIX: &str = "Tag:";

const COLUMN_WIDTH: usize = 11;
pub(crate) const PLACEHOLDER: &str = "-";
pub(crate) const IP_PLACEHOLDER: &str = "___.___.___.___";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSpec<F> {
    Builtin(F),
    Tag(String),
}

impl<F: Field> FieldSpec<F> {
    /// Resolves a column name for resource kind `R`. Unknown names fail here,
    /// once, instead of on every rendered row.
    pub fn resolve<R>(name: &str) -> Result<Self>
    where
        R: Resource<Field = F>,
    {
        if let Some(field) = F::from_name(name) {
            return Ok(FieldSpec::Builtin(field));
        }

        match name.strip_prefix(TAG_PREFIX) {
            Some(key) if !key.is_empty() => Ok(FieldSpec::Tag(key.to_string())),
            _ => Err(ConfigurationError::UnknownField {
                kind: R::KIND,
                field: name.to_string(),
            }
            .into()),
        }
    }

    pub fn format<R>(&self, resource: &R) -> String
    where
        R: Resource<Field = F>,
        F: Field<Resource = R>,
    {
        match self {
            FieldSpec::Builtin(field) => field.format(resource),
            FieldSpec::Tag(key) => lookup_tag(resource.tags(), key).to_string(),
        }
    }

    pub fn is_name_tag(&self) -> bool {
        matches!(self, FieldSpec::Tag(key) if key == NAME_TAG)
    }
}

/// Splits a space separated field list. Single or double quotes group words,
/// so `'Tag:In Charge'` stays one field.
pub fn parse_field_list(fields: &str) -> Result<Vec<String>> {
    let mut parsed = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_field = false;

    for character in fields.chars() {
        match (quote, character) {
            (Some(open), c) if c == open => quote = None,
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => {
                quote = Some(character);
                in_field = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_field {
                    parsed.push(std::mem::take(&mut current));
                    in_field = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_field = true;
            }
        }
    }

    if quote.is_some() {
        return Err(ConfigurationError::UnbalancedQuote {
            fields: fields.to_string(),
        }
        .into());
    }
    if in_field {
        parsed.push(current);
    }
    Ok(parsed)
}

pub(crate) fn padded(value: &str) -> String {
    format!("{value:<COLUMN_WIDTH$}")
}

pub(crate) fn or_placeholder(value: Option<&str>) -> String {
    value.unwrap_or(PLACEHOLDER).to_string()
}

pub(crate) fn padded_or_placeholder(value: Option<&str>) -> String {
    padded(value.unwrap_or(PLACEHOLDER))
}

pub(crate) fn ip_or_placeholder(value: Option<&str>) -> String {
    value.unwrap_or(IP_PLACEHOLDER).to_string()
}

pub(crate) fn format_timestamp(value: Option<&DateTime<Utc>>) -> String {
    value
        .map(|timestamp| timestamp.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Multi-valued attributes stay inside one logical column as a tab-joined
/// sub-string.
pub(crate) fn tab_joined<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = values
        .into_iter()
        .map(|value| value.as_ref().to_string())
        .collect::<Vec<_>>()
        .join("\t");
    if joined.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::Error,
        resource::{Instance, InstanceField, ResourceKind, Volume, VolumeField},
    };

    mod resolve_tests {
        use super::*;

        #[test]
        fn test_builtin_name_resolves_to_builtin() {
            let spec = FieldSpec::resolve::<Instance>("InstanceId").unwrap();
            assert_eq!(spec, FieldSpec::Builtin(InstanceField::InstanceId));
        }

        #[test]
        fn test_tag_reference_resolves_to_tag() {
            let spec = FieldSpec::<InstanceField>::resolve::<Instance>("Tag:In Charge").unwrap();
            assert_eq!(spec, FieldSpec::Tag("In Charge".to_string()));
        }

        #[test]
        fn test_unknown_name_is_configuration_error() {
            let error = FieldSpec::<VolumeField>::resolve::<Volume>("InstanceType").unwrap_err();
            match error {
                Error::Configuration(ConfigurationError::UnknownField { kind, field }) => {
                    assert_eq!(kind, ResourceKind::Volume);
                    assert_eq!(field, "InstanceType");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }

        #[test]
        fn test_empty_tag_key_is_unknown_field() {
            let result = FieldSpec::<InstanceField>::resolve::<Instance>("Tag:");
            assert!(result.is_err());
        }

        #[test]
        fn test_builtin_names_are_case_sensitive() {
            let result = FieldSpec::<InstanceField>::resolve::<Instance>("instanceid");
            assert!(result.is_err());
        }

        #[test]
        fn test_name_tag_detection() {
            let spec = FieldSpec::<InstanceField>::resolve::<Instance>("Tag:Name").unwrap();
            assert!(spec.is_name_tag());
            let spec = FieldSpec::<InstanceField>::resolve::<Instance>("Tag:Names").unwrap();
            assert!(!spec.is_name_tag());
        }
    }

    mod parse_field_list_tests {
        use super::*;

        #[test]
        fn test_splits_on_whitespace() {
            let fields = parse_field_list("InstanceId  InstanceType\tTag:Name").unwrap();
            assert_eq!(fields, vec!["InstanceId", "InstanceType", "Tag:Name"]);
        }

        #[test]
        fn test_single_quotes_group_words() {
            let fields = parse_field_list("Tag:Name 'Tag:In Charge'").unwrap();
            assert_eq!(fields, vec!["Tag:Name", "Tag:In Charge"]);
        }

        #[test]
        fn test_double_quotes_inside_word() {
            let fields = parse_field_list("Tag:\"In Charge\" VolumeId").unwrap();
            assert_eq!(fields, vec!["Tag:In Charge", "VolumeId"]);
        }

        #[test]
        fn test_empty_string_yields_no_fields() {
            assert!(parse_field_list("   ").unwrap().is_empty());
        }

        #[test]
        fn test_unbalanced_quote_is_error() {
            assert!(parse_field_list("Tag:Name 'Tag:In Charge").is_err());
        }
    }

    mod formatting_tests {
        use super::*;

        #[test]
        fn test_padded_left_aligns_to_column_width() {
            assert_eq!(padded("t3.micro"), "t3.micro   ");
            assert_eq!(padded("m5.24xlarge-extra"), "m5.24xlarge-extra");
        }

        #[test]
        fn test_tab_joined_empty_renders_placeholder() {
            assert_eq!(tab_joined(Vec::<String>::new()), PLACEHOLDER);
            assert_eq!(tab_joined(["a", "b"]), "a\tb");
        }

        #[test]
        fn test_missing_timestamp_renders_placeholder() {
            assert_eq!(format_timestamp(None), PLACEHOLDER);
        }

        #[test]
        fn test_timestamp_format() {
            let timestamp = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
            assert_eq!(format_timestamp(Some(&timestamp)), "2023-11-14 22:13:20");
        }
    }
}
