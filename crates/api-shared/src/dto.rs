//! JSON request and response types.
//!
//! Field names are camelCase on the wire. Dates are RFC 3339 strings.

use folio_core::{
    parse_date, render_date, BlogResult, Document, DocumentDraft, DocumentSummary, TagCount,
    WebhookReceipt,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Body of every error response.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostSummaryRes {
    #[schema(example = "hello-world")]
    pub slug: String,
    pub title: String,
    #[schema(example = "2024-05-01T09:30:00Z")]
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub draft: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_image_alt: Option<String>,
}

impl From<DocumentSummary> for PostSummaryRes {
    fn from(s: DocumentSummary) -> Self {
        Self {
            slug: s.slug.to_string(),
            title: s.title,
            date: render_date(&s.date),
            summary: s.summary,
            tags: s.tags,
            draft: s.draft,
            header_image: s.header_image,
            header_image_alt: s.header_image_alt,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PostListRes {
    pub posts: Vec<PostSummaryRes>,
}

impl From<Vec<DocumentSummary>> for PostListRes {
    fn from(summaries: Vec<DocumentSummary>) -> Self {
        Self {
            posts: summaries.into_iter().map(Into::into).collect(),
        }
    }
}

/// A full document: listing fields plus body.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostRes {
    pub slug: String,
    pub file_name: String,
    pub url: String,
    pub title: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub draft: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_image_alt: Option<String>,
    pub content: String,
}

impl From<Document> for PostRes {
    fn from(doc: Document) -> Self {
        let url = doc.url();
        let meta = doc.metadata;
        Self {
            slug: doc.slug.to_string(),
            file_name: doc.file_name,
            url,
            title: meta.title.into_string(),
            date: render_date(&meta.date),
            summary: meta.summary,
            tags: meta.tags,
            draft: meta.draft,
            header_image: meta.header_image,
            header_image_alt: meta.header_image_alt,
            content: doc.body,
        }
    }
}

/// Create or replace request for the interactive surface.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostReq {
    /// Target slug. On replace, defaults to the slug in the path; a different value renames.
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "body")]
    pub content: String,
    /// RFC 3339 timestamp or `YYYY-MM-DD`; defaults to now.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub header_image: Option<String>,
    #[serde(default)]
    pub header_image_alt: Option<String>,
}

impl PostReq {
    /// Convert into an unvalidated draft, using `default_slug` when the request names none.
    pub fn into_draft(self, default_slug: Option<&str>) -> BlogResult<DocumentDraft> {
        let slug = self
            .slug
            .filter(|s| !s.trim().is_empty())
            .or_else(|| default_slug.map(str::to_owned))
            .unwrap_or_default();

        let date = match self.date.filter(|d| !d.trim().is_empty()) {
            Some(raw) => Some(parse_date(&raw)?),
            None => None,
        };

        Ok(DocumentDraft {
            slug,
            title: self.title,
            body: self.content,
            date,
            summary: self.summary,
            tags: self.tags,
            draft: self.draft,
            header_image: self.header_image,
            header_image_alt: self.header_image_alt,
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedRes {
    pub success: bool,
    pub slug: String,
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct TagRes {
    pub name: String,
    pub count: usize,
}

impl From<TagCount> for TagRes {
    fn from(t: TagCount) -> Self {
        Self {
            name: t.name,
            count: t.count,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct TagListRes {
    pub tags: Vec<TagRes>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct TagReq {
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct TagCreatedRes {
    pub name: String,
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagRemovedRes {
    pub name: String,
    /// Number of documents rewritten.
    pub updated: usize,
    pub message: String,
}

/// Credential check request; the bearer header is used when `token` is absent.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct VerifyReq {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyRes {
    pub valid: bool,
}

/// Acknowledgement for webhook calls.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRes {
    pub success: bool,
    #[schema(example = "published")]
    pub action: String,
    pub message: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[schema(example = "/blog/hello-world")]
    pub url: String,
}

impl From<WebhookReceipt> for WebhookRes {
    fn from(r: WebhookReceipt) -> Self {
        let action = r.action.as_str();
        Self {
            success: true,
            action: action.to_owned(),
            message: format!("Post {action} successfully"),
            slug: r.slug.to_string(),
            file_name: r.file_name,
            url: r.url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::BlogError;

    #[test]
    fn post_request_falls_back_to_path_slug() {
        let req: PostReq = serde_json::from_value(serde_json::json!({
            "title": "T",
            "content": "c",
            "date": "2021-01-02",
            "headerImage": "/img.png"
        }))
        .unwrap();

        let draft = req.into_draft(Some("from-path")).unwrap();
        assert_eq!(draft.slug, "from-path");
        assert_eq!(draft.header_image.as_deref(), Some("/img.png"));
        assert_eq!(
            draft.date.unwrap().to_rfc3339(),
            "2021-01-02T00:00:00+00:00"
        );
    }

    #[test]
    fn post_request_rejects_bad_dates() {
        let req = PostReq {
            date: Some("someday".into()),
            ..Default::default()
        };
        assert!(matches!(req.into_draft(None), Err(BlogError::InvalidInput(_))));
    }

    #[test]
    fn summary_serialises_camel_case_and_skips_absent_fields() {
        let res = PostSummaryRes {
            slug: "s".into(),
            title: "T".into(),
            date: "2024-01-01T00:00:00Z".into(),
            summary: None,
            tags: vec![],
            draft: false,
            header_image: Some("/a.png".into()),
            header_image_alt: None,
        };
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["headerImage"], "/a.png");
        assert!(json.get("summary").is_none());
        assert!(json.get("headerImageAlt").is_none());
    }
}
