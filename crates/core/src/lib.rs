//! # Folio Core
//!
//! Core business logic for the Folio document store.
//!
//! This crate contains pure data operations over a flat directory of frontmatter documents:
//! - Document create, read, update, rename, delete and listing
//! - The tag catalogue derived from document metadata
//! - Signed webhook ingestion for automated publishers
//! - Capability-gated administration for human editors
//!
//! **No API concerns**: HTTP servers, request extraction, and response shapes belong in
//! `api-rest` or `api-shared`.

pub mod admin;
pub mod config;
pub mod constants;
pub mod document;
pub mod error;
pub mod gate;
pub mod repositories;
pub mod signature;
pub mod webhook;

pub use admin::AdminService;
pub use config::{resolve_data_dir, AdminCredential, CoreConfig};
pub use document::{parse_date, Document, DocumentDraft, DocumentSummary};
pub use error::{BlogError, BlogResult, ErrorKind};
pub use gate::{ApiKeyGate, CapabilityGate, JwtGate};
pub use repositories::documents::DocumentService;
pub use repositories::tags::{TagCount, TagService};
pub use signature::{SignatureVerifier, SIGNATURE_PREFIX};
pub use webhook::{WebhookAction, WebhookReceipt, WebhookService};

pub use folio_types::{NonEmptyText, Slug, SlugError, TextError};
pub use frontmatter::render_date;
