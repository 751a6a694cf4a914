//! Interactive administration.
//!
//! [`AdminService`] fronts the document and tag services for human editors. Every mutation and
//! every admin read consults the [`CapabilityGate`] first; only the published views are open.

use crate::config::CoreConfig;
use crate::document::{Document, DocumentDraft, DocumentSummary};
use crate::gate::CapabilityGate;
use crate::repositories::documents::DocumentService;
use crate::repositories::tags::{TagCount, TagService};
use crate::{BlogError, BlogResult};
use folio_types::NonEmptyText;
use std::sync::Arc;

#[derive(Clone)]
pub struct AdminService {
    documents: DocumentService,
    tags: TagService,
    gate: Arc<dyn CapabilityGate>,
}

impl AdminService {
    pub fn new(cfg: Arc<CoreConfig>, gate: Arc<dyn CapabilityGate>) -> Self {
        let documents = DocumentService::new(cfg);
        Self {
            tags: TagService::new(documents.clone()),
            documents,
            gate,
        }
    }

    pub fn documents(&self) -> &DocumentService {
        &self.documents
    }

    /// Check a credential without doing anything else.
    pub fn verify(&self, credential: Option<&str>) -> BlogResult<()> {
        self.gate.authorize(credential)
    }

    /// Published documents, newest first. Open to everyone.
    pub fn list_published(&self) -> BlogResult<Vec<DocumentSummary>> {
        self.documents.list_published()
    }

    /// One published document. Open to everyone; drafts read as missing.
    pub fn get_published(&self, slug: &str) -> BlogResult<Document> {
        let document = self.documents.get(slug)?;
        if document.metadata.draft {
            return Err(BlogError::NotFound(document.slug.to_string()));
        }
        Ok(document)
    }

    pub fn list_all(&self, credential: Option<&str>) -> BlogResult<Vec<DocumentSummary>> {
        self.gate.authorize(credential)?;
        self.documents.list()
    }

    pub fn get(&self, credential: Option<&str>, slug: &str) -> BlogResult<Document> {
        self.gate.authorize(credential)?;
        self.documents.get(slug)
    }

    pub fn create(&self, credential: Option<&str>, draft: DocumentDraft) -> BlogResult<Document> {
        self.gate.authorize(credential)?;
        self.documents.create(draft)
    }

    pub fn update(
        &self,
        credential: Option<&str>,
        slug: &str,
        draft: DocumentDraft,
    ) -> BlogResult<Document> {
        self.gate.authorize(credential)?;
        self.documents.update(slug, draft)
    }

    pub fn delete(&self, credential: Option<&str>, slug: &str) -> BlogResult<()> {
        self.gate.authorize(credential)?;
        self.documents.delete(slug)
    }

    pub fn list_tags(&self, credential: Option<&str>) -> BlogResult<Vec<TagCount>> {
        self.gate.authorize(credential)?;
        self.tags.list_tags()
    }

    pub fn check_new_tag(&self, credential: Option<&str>, name: &str) -> BlogResult<NonEmptyText> {
        self.gate.authorize(credential)?;
        self.tags.check_new_tag(name)
    }

    pub fn remove_tag(&self, credential: Option<&str>, name: &str) -> BlogResult<usize> {
        self.gate.authorize(credential)?;
        self.tags.remove_tag_everywhere(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdminCredential;
    use std::fs;
    use tempfile::TempDir;

    const KEY: &str = "admin-key";

    fn service(temp: &TempDir) -> AdminService {
        let cfg = CoreConfig::new(
            temp.path().join("blog"),
            "hook-secret".into(),
            AdminCredential::ApiKey(KEY.into()),
        )
        .expect("config");
        let gate = cfg.capability_gate().expect("gate");
        AdminService::new(Arc::new(cfg), gate)
    }

    fn draft(slug: &str, draft: bool) -> DocumentDraft {
        DocumentDraft {
            slug: slug.into(),
            title: slug.into(),
            body: "body".into(),
            tags: vec!["t".into()],
            draft,
            ..Default::default()
        }
    }

    #[test]
    fn every_gated_operation_rejects_missing_credential() {
        let temp = TempDir::new().unwrap();
        let admin = service(&temp);
        admin.create(Some(KEY), draft("existing", false)).unwrap();
        let before = fs::read_dir(admin.documents().data_dir()).unwrap().count();

        let results: Vec<BlogResult<()>> = vec![
            admin.verify(None),
            admin.list_all(None).map(|_| ()),
            admin.get(None, "existing").map(|_| ()),
            admin.create(None, draft("new", false)).map(|_| ()),
            admin.update(None, "existing", draft("existing", true)).map(|_| ()),
            admin.delete(None, "existing"),
            admin.list_tags(None).map(|_| ()),
            admin.check_new_tag(None, "fresh").map(|_| ()),
            admin.remove_tag(None, "t").map(|_| ()),
        ];

        for result in results {
            assert!(matches!(result, Err(BlogError::Unauthorized)));
        }
        assert_eq!(fs::read_dir(admin.documents().data_dir()).unwrap().count(), before);
        assert!(!admin.get(Some(KEY), "existing").unwrap().metadata.draft);
    }

    #[test]
    fn wrong_credential_is_rejected() {
        let temp = TempDir::new().unwrap();
        let admin = service(&temp);
        assert!(matches!(
            admin.create(Some("nope"), draft("x", false)),
            Err(BlogError::Unauthorized)
        ));
        assert!(admin.verify(Some(KEY)).is_ok());
    }

    #[test]
    fn published_views_hide_drafts_without_credentials() {
        let temp = TempDir::new().unwrap();
        let admin = service(&temp);
        admin.create(Some(KEY), draft("live", false)).unwrap();
        admin.create(Some(KEY), draft("wip", true)).unwrap();

        let listed: Vec<String> = admin
            .list_published()
            .unwrap()
            .into_iter()
            .map(|s| s.slug.to_string())
            .collect();
        assert_eq!(listed, vec!["live"]);
        assert!(admin.get_published("live").is_ok());
        assert!(matches!(admin.get_published("wip"), Err(BlogError::NotFound(_))));
        assert_eq!(admin.list_all(Some(KEY)).unwrap().len(), 2);
    }

    #[test]
    fn authorised_tag_lifecycle() {
        let temp = TempDir::new().unwrap();
        let admin = service(&temp);
        admin.create(Some(KEY), draft("a", false)).unwrap();

        assert!(matches!(admin.check_new_tag(Some(KEY), "t"), Err(BlogError::Conflict(_))));
        assert_eq!(admin.remove_tag(Some(KEY), "t").unwrap(), 1);
        assert!(admin.list_tags(Some(KEY)).unwrap().is_empty());
    }
}
