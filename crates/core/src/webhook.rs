//! Signed webhook ingestion.
//!
//! Automated publishers push documents as JSON, signed with HMAC-SHA256 over the raw request
//! body. Every operation checks the signature before looking at the payload, so an unsigned
//! request never reaches JSON decoding or storage.
//!
//! Payload fields (camelCase):
//!
//! | field            | publish  | replace  | retract  |
//! |------------------|----------|----------|----------|
//! | `slug`           | optional | required | required |
//! | `title`          | required | required |          |
//! | `content`        | required | required |          |
//! | `summary`, `tags`, `draft`, `headerImage`, `headerImageAlt`, `date` | optional | optional | |
//!
//! A publish without a slug derives one from the title. Replace never renames: the slug in
//! the payload names both the target and the result.

use crate::document::{parse_date, public_url, DocumentDraft};
use crate::repositories::documents::DocumentService;
use crate::signature::SignatureVerifier;
use crate::{BlogError, BlogResult};
use chrono::{DateTime, Utc};
use folio_types::Slug;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// What a webhook call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WebhookAction {
    Published,
    Replaced,
    Retracted,
}

impl WebhookAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookAction::Published => "published",
            WebhookAction::Replaced => "replaced",
            WebhookAction::Retracted => "retracted",
        }
    }
}

/// Acknowledgement returned to the publisher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WebhookReceipt {
    pub action: WebhookAction,
    pub slug: Slug,
    /// Backing file written; absent for a retraction.
    pub file_name: Option<String>,
    pub url: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct DocumentPayload {
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, alias = "body")]
    content: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    draft: Option<bool>,
    #[serde(default)]
    header_image: Option<String>,
    #[serde(default)]
    header_image_alt: Option<String>,
    #[serde(default)]
    date: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RetractPayload {
    #[serde(default)]
    slug: Option<String>,
}

fn required(value: Option<String>, field: &str) -> BlogResult<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| BlogError::InvalidInput(format!("{field} is required")))
}

fn parse_payload_date(raw: Option<String>) -> BlogResult<Option<DateTime<Utc>>> {
    match raw.filter(|d| !d.trim().is_empty()) {
        None => Ok(None),
        Some(raw) => parse_date(&raw).map(Some),
    }
}

impl DocumentPayload {
    fn into_draft(self, slug: String) -> BlogResult<DocumentDraft> {
        Ok(DocumentDraft {
            slug,
            title: required(self.title, "title")?,
            body: required(self.content, "content")?,
            date: parse_payload_date(self.date)?,
            summary: self.summary,
            tags: self.tags.unwrap_or_default(),
            draft: self.draft.unwrap_or(false),
            header_image: self.header_image,
            header_image_alt: self.header_image_alt,
        })
    }
}

/// Service behind the webhook endpoints.
#[derive(Clone, Debug)]
pub struct WebhookService {
    documents: DocumentService,
    verifier: SignatureVerifier,
}

impl WebhookService {
    pub fn new(documents: DocumentService, verifier: SignatureVerifier) -> Self {
        Self {
            documents,
            verifier,
        }
    }

    fn authenticate(&self, raw: &[u8], signature: Option<&str>) -> BlogResult<()> {
        if self.verifier.verify(raw, signature) {
            return Ok(());
        }
        tracing::warn!(
            signature_present = signature.is_some(),
            "rejected webhook with invalid signature"
        );
        Err(BlogError::Unauthorized)
    }

    fn decode<T: DeserializeOwned>(raw: &[u8]) -> BlogResult<T> {
        serde_json::from_slice(raw)
            .map_err(|e| BlogError::InvalidInput(format!("malformed JSON payload: {e}")))
    }

    /// Create a document from a signed payload.
    ///
    /// # Errors
    ///
    /// - [`BlogError::Unauthorized`] if the signature does not match `raw`.
    /// - [`BlogError::InvalidInput`] for malformed JSON or missing fields.
    /// - [`BlogError::Conflict`] if the slug is taken.
    pub fn publish(&self, raw: &[u8], signature: Option<&str>) -> BlogResult<WebhookReceipt> {
        self.authenticate(raw, signature)?;
        let payload: DocumentPayload = Self::decode(raw)?;

        let slug = match payload.slug.clone().filter(|s| !s.trim().is_empty()) {
            Some(slug) => slug,
            None => {
                let title = required(payload.title.clone(), "title")?;
                Slug::from_title(&title)?.to_string()
            }
        };

        let document = self.documents.create(payload.into_draft(slug)?)?;
        tracing::info!(slug = %document.slug, "webhook published document");

        Ok(WebhookReceipt {
            action: WebhookAction::Published,
            url: document.url(),
            file_name: Some(document.file_name),
            slug: document.slug,
        })
    }

    /// Replace an existing document in place from a signed payload.
    ///
    /// # Errors
    ///
    /// As [`publish`](Self::publish), with [`BlogError::NotFound`] instead of `Conflict`.
    pub fn replace(&self, raw: &[u8], signature: Option<&str>) -> BlogResult<WebhookReceipt> {
        self.authenticate(raw, signature)?;
        let mut payload: DocumentPayload = Self::decode(raw)?;

        let slug = required(payload.slug.take(), "slug")?;
        let document = self.documents.update(&slug, payload.into_draft(slug.clone())?)?;
        tracing::info!(slug = %document.slug, "webhook replaced document");

        Ok(WebhookReceipt {
            action: WebhookAction::Replaced,
            url: document.url(),
            file_name: Some(document.file_name),
            slug: document.slug,
        })
    }

    /// Delete a document named by a signed payload.
    pub fn retract(&self, raw: &[u8], signature: Option<&str>) -> BlogResult<WebhookReceipt> {
        self.authenticate(raw, signature)?;
        let payload: RetractPayload = Self::decode(raw)?;

        let slug = Slug::parse(required(payload.slug, "slug")?)?;
        self.documents.delete(slug.as_str())?;
        tracing::info!(slug = %slug, "webhook retracted document");

        Ok(WebhookReceipt {
            action: WebhookAction::Retracted,
            url: public_url(&slug),
            file_name: None,
            slug,
        })
    }
}
