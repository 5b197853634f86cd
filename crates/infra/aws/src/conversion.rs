use aws_sdk_ec2::{primitives::DateTime as SdkDateTime, types::Filter};
use chrono::{DateTime, Utc};
use cloudls_core::{cloud_provider::FetchQuery, resource::Tag};

pub(crate) fn to_utc(timestamp: &SdkDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp.secs(), timestamp.subsec_nanos())
}

/// Parses the RFC 3339 strings some describe calls return instead of timestamps.
pub(crate) fn parse_utc(timestamp: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .map(|timestamp| timestamp.with_timezone(&Utc))
}

pub(crate) fn ec2_tags(tags: &[aws_sdk_ec2::types::Tag]) -> Vec<Tag> {
    tags.iter()
        .filter_map(|tag| Some(Tag::new(tag.key()?, tag.value().unwrap_or_default())))
        .collect()
}

/// EC2 filter values treat `*`, `?` and `\` as wildcard syntax.
fn escape_wildcards(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for character in value.chars() {
        if matches!(character, '*' | '?' | '\\') {
            escaped.push('\\');
        }
        escaped.push(character);
    }
    escaped
}

/// EC2 filters narrowing a describe call. `state_filter` names the filter
/// holding the kind's state, when it has one the query can use.
pub(crate) fn ec2_filters(query: &FetchQuery, state_filter: Option<(&str, &str)>) -> Vec<Filter> {
    let mut filters = Vec::new();

    if let Some((name, value)) = state_filter.filter(|_| query.active_only) {
        filters.push(Filter::builder().name(name).values(value).build());
    }

    // An empty partial value matches untagged resources too, which a
    // `tag:` filter would drop.
    if let Some(tag) = query
        .tag
        .as_ref()
        .filter(|tag| !tag.partial_value.is_empty())
    {
        filters.push(
            Filter::builder()
                .name(format!("tag:{}", tag.key))
                .values(format!("*{}*", escape_wildcards(&tag.partial_value)))
                .build(),
        );
    }

    filters
}

#[cfg(test)]
mod tests {
    use cloudls_core::filter::TagFilter;

    use super::*;

    mod ec2_filters_tests {
        use super::*;

        const RUNNING: Option<(&str, &str)> = Some(("instance-state-name", "running"));

        #[test]
        fn test_default_query_has_no_filters() {
            assert!(ec2_filters(&FetchQuery::default(), RUNNING).is_empty());
        }

        #[test]
        fn test_active_only_adds_state_filter() {
            let query = FetchQuery {
                active_only: true,
                tag: None,
            };
            let filters = ec2_filters(&query, RUNNING);
            assert_eq!(filters.len(), 1);
            assert_eq!(filters[0].name(), Some("instance-state-name"));
            assert_eq!(filters[0].values(), ["running".to_string()]);
        }

        #[test]
        fn test_active_only_without_state_filter_is_ignored() {
            let query = FetchQuery {
                active_only: true,
                tag: None,
            };
            assert!(ec2_filters(&query, None).is_empty());
        }

        #[test]
        fn test_tag_becomes_wildcard_filter() {
            let query = FetchQuery {
                active_only: false,
                tag: Some(TagFilter {
                    key: "In Charge".to_string(),
                    partial_value: "ops".to_string(),
                }),
            };
            let filters = ec2_filters(&query, RUNNING);
            assert_eq!(filters.len(), 1);
            assert_eq!(filters[0].name(), Some("tag:In Charge"));
            assert_eq!(filters[0].values(), ["*ops*".to_string()]);
        }

        #[test]
        fn test_wildcard_characters_in_partial_value_are_escaped() {
            let query = FetchQuery {
                active_only: false,
                tag: Some(TagFilter {
                    key: "Path".to_string(),
                    partial_value: r"C:\data*?".to_string(),
                }),
            };
            let filters = ec2_filters(&query, RUNNING);
            assert_eq!(filters[0].values(), [r"*C:\\data\*\?*".to_string()]);
        }

        #[test]
        fn test_empty_partial_value_is_not_sent() {
            let query = FetchQuery {
                active_only: false,
                tag: Some(TagFilter {
                    key: "Name".to_string(),
                    partial_value: String::new(),
                }),
            };
            assert!(ec2_filters(&query, RUNNING).is_empty());
        }
    }

    mod timestamp_tests {
        use super::*;

        #[test]
        fn test_sdk_timestamp_converts_to_utc() {
            let converted = to_utc(&SdkDateTime::from_secs(1_700_000_000)).unwrap();
            assert_eq!(
                converted.format("%Y-%m-%d %H:%M:%S").to_string(),
                "2023-11-14 22:13:20"
            );
        }

        #[test]
        fn test_rfc3339_string_is_normalised_to_utc() {
            let parsed = parse_utc("2024-03-01T09:30:00.000+09:00").unwrap();
            assert_eq!(
                parsed.format("%Y-%m-%d %H:%M:%S").to_string(),
                "2024-03-01 00:30:00"
            );
        }

        #[test]
        fn test_garbage_timestamp_is_none() {
            assert!(parse_utc("yesterday").is_none());
        }
    }

    #[test]
    fn test_untagged_keys_are_skipped() {
        let tags = vec![
            aws_sdk_ec2::types::Tag::builder()
                .key("Name")
                .value("web-1")
                .build(),
            aws_sdk_ec2::types::Tag::builder().value("orphan").build(),
        ];
        assert_eq!(ec2_tags(&tags), vec![Tag::new("Name", "web-1")]);
    }
}
