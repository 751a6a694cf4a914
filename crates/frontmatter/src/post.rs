//! Typed blog post metadata and its wire model.
//!
//! Responsibilities:
//! - Define the domain-level [`PostMetadata`] carrier
//! - Define the on-disk wire struct (camelCase keys, optional fields omitted)
//! - Translate between the two, validating required fields
//!
//! Notes:
//! - Keys the wire struct does not know are kept in [`PostMetadata::extra`] and written back
//! - `tags` is omitted when empty and `draft` when false, so a rewrite never introduces
//!   `tags: []` or `draft: false` into a file that did not have them

use crate::codec::Frontmatter;
use crate::{FrontmatterError, FrontmatterResult};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use folio_types::NonEmptyText;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

// ============================================================================
// Public domain-level types
// ============================================================================

/// Domain-level carrier for a post's frontmatter.
#[derive(Clone, Debug, PartialEq)]
pub struct PostMetadata {
    pub title: NonEmptyText,

    /// Publication timestamp.
    pub date: DateTime<Utc>,

    pub summary: Option<String>,

    /// Ordered, duplicate-free tag list.
    pub tags: Vec<String>,

    pub draft: bool,

    pub header_image: Option<String>,

    /// Alt text for `header_image`.
    pub header_image_alt: Option<String>,

    /// Unrecognised keys, preserved verbatim.
    pub extra: BTreeMap<String, Value>,
}

/// Post file operations.
///
/// Zero-sized namespace for parsing and rendering complete post files.
pub struct PostFile;

impl PostFile {
    /// Parse a complete post file into typed metadata and body.
    ///
    /// # Errors
    ///
    /// Returns [`FrontmatterError`] if:
    /// - the frontmatter block is malformed (see [`Frontmatter::parse`]),
    /// - a field has an unexpected type (the error names the field path),
    /// - `title` or `date` is missing, blank, or unparseable.
    pub fn parse(text: &str) -> FrontmatterResult<(PostMetadata, String)> {
        let (mapping, body) = Frontmatter::parse(text)?;
        let metadata = Self::from_mapping(mapping)?;
        Ok((metadata, body))
    }

    /// Render typed metadata and body into post file text.
    ///
    /// # Errors
    ///
    /// Returns [`FrontmatterError`] if YAML serialisation fails.
    pub fn render(metadata: &PostMetadata, body: &str) -> FrontmatterResult<String> {
        let mapping = Self::to_mapping(metadata)?;
        Frontmatter::render(body, &mapping)
    }

    /// Translate an untyped metadata mapping into [`PostMetadata`].
    pub fn from_mapping(mapping: Mapping) -> FrontmatterResult<PostMetadata> {
        let wire = match serde_path_to_error::deserialize::<_, PostMetadataWire>(Value::Mapping(
            mapping,
        )) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>".to_owned()
                } else {
                    path
                };
                return Err(FrontmatterError::Schema {
                    path,
                    message: source.to_string(),
                });
            }
        };

        wire_to_domain(wire)
    }

    /// Translate [`PostMetadata`] into an untyped metadata mapping.
    pub fn to_mapping(metadata: &PostMetadata) -> FrontmatterResult<Mapping> {
        match serde_yaml::to_value(domain_to_wire(metadata))? {
            Value::Mapping(mapping) => Ok(mapping),
            _ => Err(FrontmatterError::NotAMapping),
        }
    }
}

/// Trim tags, drop blank entries and keep only the first occurrence of each.
pub fn normalise_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !out.iter().any(|seen| seen == tag) {
            out.push(tag.to_owned());
        }
    }
    out
}

// ============================================================================
// Wire types (internal)
// ============================================================================

/// Exact on-disk shape of the frontmatter block. Field order is the rendered key order.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct PostMetadataWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    summary: Option<String>,

    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    header_image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    header_image_alt: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    draft: bool,

    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A bare `tags:` line is YAML null; treat it as no tags.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn wire_to_domain(wire: PostMetadataWire) -> FrontmatterResult<PostMetadata> {
    let title = wire.title.ok_or(FrontmatterError::MissingField("title"))?;
    let title = NonEmptyText::new(&title).map_err(|e| FrontmatterError::InvalidField {
        field: "title",
        reason: e.to_string(),
    })?;

    let date = wire.date.ok_or(FrontmatterError::MissingField("date"))?;
    let date = parse_date(&date)?;

    Ok(PostMetadata {
        title,
        date,
        summary: wire.summary.filter(|s| !s.trim().is_empty()),
        tags: normalise_tags(wire.tags),
        draft: wire.draft,
        header_image: wire.header_image.filter(|s| !s.trim().is_empty()),
        header_image_alt: wire.header_image_alt.filter(|s| !s.trim().is_empty()),
        extra: wire.extra,
    })
}

fn domain_to_wire(metadata: &PostMetadata) -> PostMetadataWire {
    PostMetadataWire {
        title: Some(metadata.title.as_str().to_owned()),
        date: Some(render_date(&metadata.date)),
        summary: metadata.summary.clone(),
        tags: metadata.tags.clone(),
        header_image: metadata.header_image.clone(),
        header_image_alt: metadata.header_image_alt.clone(),
        draft: metadata.draft,
        extra: metadata.extra.clone(),
    }
}

/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (taken as midnight UTC).
pub fn parse_date(raw: &str) -> FrontmatterResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| FrontmatterError::InvalidField {
            field: "date",
            reason: format!("{raw:?} is not an ISO 8601 date"),
        })
}

/// RFC 3339 in UTC with a `Z` suffix, keeping sub-second precision when present.
pub fn render_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_metadata() -> PostMetadata {
        let mut extra = BTreeMap::new();
        extra.insert("layout".to_owned(), Value::String("PostSimple".to_owned()));
        PostMetadata {
            title: NonEmptyText::new("Hello World").unwrap(),
            date: "2024-05-01T09:30:00.123456Z".parse().unwrap(),
            summary: Some("A first post".to_owned()),
            tags: vec!["rust".to_owned(), "go".to_owned()],
            draft: true,
            header_image: Some("/static/images/blog/hero.png".to_owned()),
            header_image_alt: Some("A hero".to_owned()),
            extra,
        }
    }

    #[test]
    fn round_trips_full_metadata() {
        let metadata = sample_metadata();
        let text = PostFile::render(&metadata, "Body\n").expect("render");
        let (parsed, body) = PostFile::parse(&text).expect("parse");

        assert_eq!(parsed, metadata);
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn renders_keys_in_canonical_order() {
        let text = PostFile::render(&sample_metadata(), "b").expect("render");
        let positions: Vec<usize> = [
            "title:",
            "date:",
            "summary:",
            "tags:",
            "headerImage:",
            "headerImageAlt:",
            "draft:",
            "layout:",
        ]
        .iter()
        .map(|k| text.find(k).unwrap_or_else(|| panic!("missing {k}")))
        .collect();

        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn omits_empty_tags_and_false_draft() {
        let mut metadata = sample_metadata();
        metadata.tags.clear();
        metadata.draft = false;
        metadata.summary = None;

        let text = PostFile::render(&metadata, "b").expect("render");
        assert!(!text.contains("tags"));
        assert!(!text.contains("draft"));
        assert!(!text.contains("summary"));
    }

    #[test]
    fn accepts_bare_dates() {
        let (metadata, _) =
            PostFile::parse("---\ntitle: Old post\ndate: 2021-03-04\n---\nbody").expect("parse");
        assert_eq!(
            metadata.date,
            "2021-03-04T00:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );
    }

    #[test]
    fn deduplicates_tags_on_parse() {
        let (metadata, _) = PostFile::parse(
            "---\ntitle: T\ndate: 2021-03-04\ntags:\n- go\n- ' go '\n- rust\n- ''\n---\n",
        )
        .expect("parse");
        assert_eq!(metadata.tags, vec!["go", "rust"]);
    }

    #[test]
    fn missing_title_is_reported() {
        let err = PostFile::parse("---\ndate: 2021-03-04\n---\nbody").expect_err("should fail");
        assert!(matches!(err, FrontmatterError::MissingField("title")));
    }

    #[test]
    fn invalid_date_is_reported() {
        let err =
            PostFile::parse("---\ntitle: T\ndate: last tuesday\n---\n").expect_err("should fail");
        assert!(matches!(err, FrontmatterError::InvalidField { field: "date", .. }));
    }

    #[test]
    fn bare_tags_key_means_no_tags() {
        let (metadata, _) =
            PostFile::parse("---\ntitle: T\ndate: 2021-03-04\ntags:\n---\nbody").expect("parse");
        assert!(metadata.tags.is_empty());
    }

    #[test]
    fn renders_dates_with_z_suffix() {
        let date: DateTime<Utc> = "2024-05-01T09:30:00.120Z".parse().unwrap();
        assert_eq!(render_date(&date), "2024-05-01T09:30:00.120Z");
    }

    #[test]
    fn wrong_type_is_a_schema_error() {
        let err = PostFile::parse("---\ntitle: T\ndate: 2021-03-04\ntags: nope\n---\n")
            .expect_err("should fail");
        match err {
            FrontmatterError::Schema { message, .. } => assert!(message.contains("sequence")),
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn normalise_tags_keeps_first_occurrence() {
        assert_eq!(
            normalise_tags(["b", "a", "b", " ", "a "]),
            vec!["b".to_owned(), "a".to_owned()]
        );
    }
}
