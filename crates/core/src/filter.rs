use tracing::debug;

use crate::{
    cloud_provider::FetchQuery,
    error::{ConfigurationError, Result},
    resource::{Resource, lookup_tag},
};

/// Raw filter options as given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub all: bool,
    pub tag_filter: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    pub key: String,
    pub partial_value: String,
}

impl TagFilter {
    /// Splits on the first `:`; the value may itself contain colons.
    pub fn parse(filter: &str) -> Result<Self> {
        let (key, partial_value) =
            filter
                .split_once(':')
                .ok_or_else(|| ConfigurationError::MalformedTagFilter {
                    filter: filter.to_string(),
                })?;
        Ok(Self {
            key: key.to_string(),
            partial_value: partial_value.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    ActiveState,
    TagContains(TagFilter),
}

impl Predicate {
    pub fn matches<R: Resource>(&self, resource: &R) -> bool {
        match self {
            Predicate::ActiveState => match R::KIND.active_state() {
                Some(active) => resource.state() == Some(active),
                None => true,
            },
            Predicate::TagContains(tag) => {
                lookup_tag(resource.tags(), &tag.key).contains(tag.partial_value.as_str())
            }
        }
    }
}

/// Conjunction of predicates. Empty keeps everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    predicates: Vec<Predicate>,
}

impl Filters {
    pub fn build(spec: &FilterSpec) -> Result<Self> {
        let mut predicates = Vec::new();

        if !spec.all {
            predicates.push(Predicate::ActiveState);
        }
        if !spec.tag_filter.is_empty() {
            predicates.push(Predicate::TagContains(TagFilter::parse(&spec.tag_filter)?));
        }

        debug!(predicates = ?predicates, "Built resource filters");
        Ok(Self { predicates })
    }

    pub fn matches<R: Resource>(&self, resource: &R) -> bool {
        self.predicates
            .iter()
            .all(|predicate| predicate.matches(resource))
    }

    pub fn apply<R: Resource>(&self, resources: Vec<R>) -> Vec<R> {
        resources
            .into_iter()
            .filter(|resource| self.matches(resource))
            .collect()
    }

    pub fn query(&self) -> FetchQuery {
        let mut query = FetchQuery::default();
        for predicate in &self.predicates {
            match predicate {
                Predicate::ActiveState => query.active_only = true,
                Predicate::TagContains(tag) => query.tag = Some(tag.clone()),
            }
        }
        query
    }
}
