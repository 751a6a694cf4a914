//! Frontmatter wire support for Folio documents.
//!
//! A document on disk is a YAML metadata block fenced by `---` lines followed by freeform
//! body text:
//!
//! ```text
//! ---
//! title: Hello World
//! date: 2024-05-01T09:30:00Z
//! tags:
//! - rust
//! ---
//! Body text starts here.
//! ```
//!
//! This crate provides:
//! - [`Frontmatter`]: the untyped codec, raw text <-> (metadata mapping, body)
//! - [`PostFile`]: typed translation between the mapping and [`PostMetadata`]
//!
//! Unrecognised metadata keys survive both layers so that fields written by other tools
//! are never dropped on rewrite.

pub mod codec;
pub mod post;

pub use codec::Frontmatter;
pub use post::{normalise_tags, parse_date, render_date, PostFile, PostMetadata};

pub use serde_yaml::{Mapping, Value};

/// Errors returned by the `frontmatter` crate.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("frontmatter block is not closed by a `---` line")]
    Unterminated,

    #[error("frontmatter must be a YAML mapping")]
    NotAMapping,

    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid value for `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("metadata schema mismatch at {path}: {message}")]
    Schema { path: String, message: String },
}

/// Type alias for Results that can fail with a [`FrontmatterError`].
pub type FrontmatterResult<T> = Result<T, FrontmatterError>;
