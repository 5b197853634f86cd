use thiserror::Error;

use crate::resource::ResourceKind;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("home directory not available")]
    HomeDirectoryNotAvailable,

    #[error("invalid configuration file {path}: {reason}")]
    InvalidFile { path: String, reason: String },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("unknown field {field} for {kind}")]
    UnknownField { kind: ResourceKind, field: String },

    #[error("malformed tag filter {filter:?}: expected KEY:VALUE")]
    MalformedTagFilter { filter: String },

    #[error("invalid domain pattern {pattern:?}: {reason}")]
    InvalidDomainPattern { pattern: String, reason: String },

    #[error("unbalanced quote in field list {fields:?}")]
    UnbalancedQuote { fields: String },
}
