//! Document types shared by the repository, webhook, and admin surfaces.

use crate::constants::{PUBLIC_URL_PREFIX, WRITE_EXTENSION};
use crate::{BlogError, BlogResult};
use chrono::{DateTime, Utc};
use folio_types::{NonEmptyText, Slug};
use frontmatter::{normalise_tags, PostMetadata};
use std::collections::BTreeMap;

/// A stored document: identity, typed metadata, and body.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub slug: Slug,
    /// Name of the backing file inside the storage directory.
    pub file_name: String,
    pub metadata: PostMetadata,
    pub body: String,
}

impl Document {
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            slug: self.slug.clone(),
            title: self.metadata.title.as_str().to_owned(),
            date: self.metadata.date,
            summary: self.metadata.summary.clone(),
            tags: self.metadata.tags.clone(),
            draft: self.metadata.draft,
            header_image: self.metadata.header_image.clone(),
            header_image_alt: self.metadata.header_image_alt.clone(),
        }
    }

    /// Public path at which the document is served once published.
    pub fn url(&self) -> String {
        public_url(&self.slug)
    }
}

/// Listing view of a document, without its body.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentSummary {
    pub slug: Slug,
    pub title: String,
    pub date: DateTime<Utc>,
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub draft: bool,
    pub header_image: Option<String>,
    pub header_image_alt: Option<String>,
}

/// File name a newly written document receives.
pub fn file_name_for(slug: &Slug) -> String {
    format!("{slug}.{WRITE_EXTENSION}")
}

pub fn public_url(slug: &Slug) -> String {
    format!("{PUBLIC_URL_PREFIX}/{slug}")
}

/// Parse a caller-supplied date: RFC 3339, or `YYYY-MM-DD` taken as midnight UTC.
pub fn parse_date(raw: &str) -> BlogResult<DateTime<Utc>> {
    frontmatter::parse_date(raw).map_err(|e| BlogError::InvalidInput(e.to_string()))
}

/// Unvalidated input for creating or replacing a document.
///
/// Produced by transports from request payloads; nothing here has been checked yet.
#[derive(Clone, Debug, Default)]
pub struct DocumentDraft {
    pub slug: String,
    pub title: String,
    pub body: String,
    pub date: Option<DateTime<Utc>>,
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub draft: bool,
    pub header_image: Option<String>,
    pub header_image_alt: Option<String>,
}

/// A draft that passed validation.
#[derive(Clone, Debug)]
pub struct ValidDraft {
    pub slug: Slug,
    pub metadata: PostMetadata,
    pub body: String,
}

impl DocumentDraft {
    /// Check required fields and normalise optional ones.
    ///
    /// `now` fills in a missing date. Blank optional strings become absent, tags are trimmed
    /// and de-duplicated, and alt text without an image is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::InvalidInput`] if the slug is not a valid slug, or the title or
    /// body is blank. No storage is touched.
    pub fn validate(self, now: DateTime<Utc>) -> BlogResult<ValidDraft> {
        let slug = Slug::parse(&self.slug)?;
        let title = NonEmptyText::new(&self.title)
            .map_err(|_| BlogError::InvalidInput("title is required".into()))?;
        if self.body.trim().is_empty() {
            return Err(BlogError::InvalidInput("body is required".into()));
        }

        let header_image = non_blank(self.header_image);
        let header_image_alt = header_image
            .as_ref()
            .and_then(|_| non_blank(self.header_image_alt));

        Ok(ValidDraft {
            slug,
            metadata: PostMetadata {
                title,
                date: self.date.unwrap_or(now),
                summary: non_blank(self.summary),
                tags: normalise_tags(self.tags),
                draft: self.draft,
                header_image,
                header_image_alt,
                extra: BTreeMap::new(),
            },
            body: self.body,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
