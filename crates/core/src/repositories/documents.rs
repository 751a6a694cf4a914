//! Document repository.
//!
//! Documents live as flat files directly under the configured storage directory:
//!
//! ```text
//! data/blog/
//!   hello-world.mdx
//!   older-post.md
//! ```
//!
//! The file stem is the slug. New documents are always written as `.mdx`; `.md` files are read
//! and updated in place. When both extensions exist for one slug, `.mdx` wins and the other
//! file is ignored with a warning.
//!
//! ## Consistency
//!
//! - Every write stages a temporary file in the storage directory and renames it into place.
//! - Creation uses a no-clobber rename, so concurrent creators of one slug race safely.
//! - A rename writes the new file before deleting the old one; a failure part-way can leave
//!   both, never neither.

use crate::config::CoreConfig;
use crate::constants::DOCUMENT_EXTENSIONS;
use crate::document::{file_name_for, Document, DocumentDraft, DocumentSummary};
use crate::repositories::helpers::{is_regular_file, overwrite, write_new};
use crate::{BlogError, BlogResult};
use chrono::Utc;
use folio_types::Slug;
use frontmatter::{PostFile, PostMetadata};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A parsed document together with the file backing it.
#[derive(Clone, Debug)]
pub(crate) struct StoredDocument {
    pub path: PathBuf,
    pub document: Document,
}

/// Service for reading and writing documents in the storage directory.
#[derive(Clone, Debug)]
pub struct DocumentService {
    data_dir: PathBuf,
}

impl DocumentService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self::at(cfg.blog_data_dir())
    }

    /// Service over `data_dir` alone, for callers that hold no secrets.
    pub fn at(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn ensure_data_dir(&self) -> BlogResult<&Path> {
        let dir = self.data_dir();
        fs::create_dir_all(dir).map_err(BlogError::StorageDirCreation)?;
        Ok(dir)
    }

    fn candidate_paths(&self, slug: &Slug) -> Vec<PathBuf> {
        DOCUMENT_EXTENSIONS
            .iter()
            .map(|ext| self.data_dir().join(format!("{slug}.{ext}")))
            .collect()
    }

    /// Path of the file backing `slug`, if any.
    pub fn locate(&self, slug: &Slug) -> BlogResult<Option<PathBuf>> {
        for path in self.candidate_paths(slug) {
            if is_regular_file(&path).map_err(BlogError::FileRead)? {
                return Ok(Some(path));
            }
        }
        Ok(None)
    }

    pub fn exists(&self, slug: &str) -> BlogResult<bool> {
        let slug = Slug::parse(slug)?;
        Ok(self.locate(&slug)?.is_some())
    }

    /// Every document, newest first; ties are broken by slug.
    ///
    /// Creates the storage directory if it is missing. Files that cannot be read or parsed are
    /// skipped with a warning instead of failing the listing.
    pub fn list(&self) -> BlogResult<Vec<DocumentSummary>> {
        let mut summaries: Vec<DocumentSummary> = self
            .scan()?
            .iter()
            .map(|stored| stored.document.summary())
            .collect();
        summaries.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
        Ok(summaries)
    }

    /// Like [`list`](Self::list), without drafts.
    pub fn list_published(&self) -> BlogResult<Vec<DocumentSummary>> {
        let mut summaries = self.list()?;
        summaries.retain(|s| !s.draft);
        Ok(summaries)
    }

    /// Load one document.
    ///
    /// # Errors
    ///
    /// - [`BlogError::InvalidInput`] if `slug` is not a valid slug.
    /// - [`BlogError::NotFound`] if no file backs it.
    /// - [`BlogError::Parse`] if the file exists but is malformed.
    pub fn get(&self, slug: &str) -> BlogResult<Document> {
        let slug = Slug::parse(slug)?;
        let path = self
            .locate(&slug)?
            .ok_or_else(|| BlogError::NotFound(slug.to_string()))?;
        read_document(&slug, &path)
    }

    /// Create a new document.
    ///
    /// Validation runs before any filesystem access. A missing date is set to now.
    ///
    /// # Errors
    ///
    /// - [`BlogError::InvalidInput`] if the draft is invalid.
    /// - [`BlogError::Conflict`] if the slug is already taken, including by a concurrent create.
    pub fn create(&self, draft: DocumentDraft) -> BlogResult<Document> {
        let valid = draft.validate(Utc::now())?;
        let dir = self.ensure_data_dir()?;

        if self.locate(&valid.slug)?.is_some() {
            return Err(BlogError::Conflict(valid.slug.to_string()));
        }

        let document = Document {
            file_name: file_name_for(&valid.slug),
            slug: valid.slug,
            metadata: valid.metadata,
            body: valid.body,
        };
        let path = dir.join(&document.file_name);
        write_new(dir, &path, &render(&document)?)
            .map_err(|e| write_error(e, &document.slug))?;

        tracing::info!(slug = %document.slug, "document created");
        Ok(document)
    }

    /// Replace the document at `old_slug`, renaming it when the draft carries a new slug.
    ///
    /// Metadata keys the draft cannot express are carried over from the stored file, and so is
    /// the stored date when the draft has none. An in-place update keeps the existing file
    /// extension. A rename removes every file that backed the old slug.
    ///
    /// # Errors
    ///
    /// - [`BlogError::InvalidInput`] if either slug or the draft is invalid.
    /// - [`BlogError::NotFound`] if `old_slug` does not exist.
    /// - [`BlogError::Conflict`] if renaming onto a slug that already exists.
    pub fn update(&self, old_slug: &str, draft: DocumentDraft) -> BlogResult<Document> {
        let old_slug = Slug::parse(old_slug)?;
        let keep_date = draft.date.is_none();
        let valid = draft.validate(Utc::now())?;
        let old_path = self
            .locate(&old_slug)?
            .ok_or_else(|| BlogError::NotFound(old_slug.to_string()))?;
        let dir = self.data_dir();

        let mut metadata = valid.metadata;
        if let Some(existing) = existing_metadata(&old_path) {
            metadata.extra = existing.extra;
            if keep_date {
                metadata.date = existing.date;
            }
        }

        if valid.slug == old_slug {
            let document = Document {
                file_name: file_name_of(&old_path),
                slug: valid.slug,
                metadata,
                body: valid.body,
            };
            overwrite(dir, &old_path, &render(&document)?).map_err(BlogError::FileWrite)?;
            tracing::info!(slug = %document.slug, "document updated");
            return Ok(document);
        }

        if self.locate(&valid.slug)?.is_some() {
            return Err(BlogError::Conflict(valid.slug.to_string()));
        }

        let document = Document {
            file_name: file_name_for(&valid.slug),
            slug: valid.slug,
            metadata,
            body: valid.body,
        };
        let new_path = dir.join(&document.file_name);
        write_new(dir, &new_path, &render(&document)?)
            .map_err(|e| write_error(e, &document.slug))?;

        if let Err(e) = self.remove_backing_files(&old_slug) {
            tracing::error!(
                from = %old_slug,
                to = %document.slug,
                error = %e,
                "renamed document written but old file could not be removed"
            );
            return Err(e);
        }

        tracing::info!(from = %old_slug, to = %document.slug, "document renamed");
        Ok(document)
    }

    /// Remove every file backing `slug`.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::NotFound`] without touching storage if nothing backs the slug.
    pub fn delete(&self, slug: &str) -> BlogResult<()> {
        let slug = Slug::parse(slug)?;

        if self.remove_backing_files(&slug)? == 0 {
            return Err(BlogError::NotFound(slug.to_string()));
        }

        tracing::info!(slug = %slug, "document deleted");
        Ok(())
    }

    /// Delete every file stored for `slug`, under any recognised extension.
    fn remove_backing_files(&self, slug: &Slug) -> BlogResult<usize> {
        let mut removed = 0usize;
        for path in self.candidate_paths(slug) {
            if !is_regular_file(&path).map_err(BlogError::FileRead)? {
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(BlogError::FileDelete(e)),
            }
        }
        Ok(removed)
    }

    /// Every readable document with its backing path, one per slug, in slug order.
    pub(crate) fn scan(&self) -> BlogResult<Vec<StoredDocument>> {
        let dir = self.ensure_data_dir()?;

        // slug -> (extension rank, path); lower rank wins
        let mut chosen: BTreeMap<Slug, (usize, PathBuf)> = BTreeMap::new();
        for entry in fs::read_dir(dir).map_err(BlogError::DirRead)? {
            let path = entry.map_err(BlogError::DirRead)?.path();

            let Some(rank) = extension_rank(&path) else {
                continue;
            };
            let Some(slug) = slug_of(&path) else {
                tracing::warn!(path = %path.display(), "skipping file whose name is not a valid slug");
                continue;
            };
            match is_regular_file(&path) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            }

            if let Some((existing, _)) = chosen.get(&slug) {
                if *existing <= rank {
                    tracing::warn!(path = %path.display(), "ignoring document shadowed by another extension");
                    continue;
                }
            }
            if let Some((_, shadowed)) = chosen.insert(slug, (rank, path)) {
                tracing::warn!(path = %shadowed.display(), "ignoring document shadowed by another extension");
            }
        }

        let mut documents = Vec::with_capacity(chosen.len());
        for (slug, (_, path)) in chosen {
            match read_document(&slug, &path) {
                Ok(document) => documents.push(StoredDocument { path, document }),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable document");
                }
            }
        }
        Ok(documents)
    }

    /// Atomically rewrite a scanned document in place.
    pub(crate) fn rewrite(&self, stored: &StoredDocument) -> BlogResult<()> {
        overwrite(self.data_dir(), &stored.path, &render(&stored.document)?)
            .map_err(BlogError::FileWrite)
    }
}

fn read_document(slug: &Slug, path: &Path) -> BlogResult<Document> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => BlogError::NotFound(slug.to_string()),
        _ => BlogError::FileRead(e),
    })?;
    let (metadata, body) = PostFile::parse(&text).map_err(|source| BlogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Document {
        slug: slug.clone(),
        file_name: file_name_of(path),
        metadata,
        body,
    })
}

fn render(document: &Document) -> BlogResult<String> {
    PostFile::render(&document.metadata, &document.body).map_err(BlogError::Render)
}

fn write_error(err: io::Error, slug: &Slug) -> BlogError {
    match err.kind() {
        io::ErrorKind::AlreadyExists => BlogError::Conflict(slug.to_string()),
        _ => BlogError::FileWrite(err),
    }
}

/// Metadata of the stored file, or `None` if it cannot be read or parsed.
fn existing_metadata(path: &Path) -> Option<PostMetadata> {
    let parsed = fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|text| PostFile::parse(&text).map_err(|e| e.to_string()));
    match parsed {
        Ok((metadata, _)) => Some(metadata),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "existing document unreadable; stored metadata not carried over");
            None
        }
    }
}

fn extension_rank(path: &Path) -> Option<usize> {
    let ext = path.extension()?.to_str()?;
    DOCUMENT_EXTENSIONS.iter().position(|known| *known == ext)
}

fn slug_of(path: &Path) -> Option<Slug> {
    let stem = path.file_stem()?.to_str()?;
    Slug::parse(stem).ok().filter(|slug| slug.as_str() == stem)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdminCredential;
    use chrono::{DateTime, Utc};
    use frontmatter::Value;
    use std::sync::Barrier;
    use tempfile::TempDir;

    fn service(temp: &TempDir) -> DocumentService {
        let cfg = CoreConfig::new(
            temp.path().join("blog"),
            "hook-secret".into(),
            AdminCredential::ApiKey("admin-key".into()),
        )
        .expect("config");
        DocumentService::new(Arc::new(cfg))
    }

    fn draft(slug: &str, title: &str) -> DocumentDraft {
        DocumentDraft {
            slug: slug.into(),
            title: title.into(),
            body: format!("Body of {title}\n"),
            ..Default::default()
        }
    }

    fn dated(slug: &str, date: &str) -> DocumentDraft {
        DocumentDraft {
            date: Some(date.parse::<DateTime<Utc>>().unwrap()),
            ..draft(slug, slug)
        }
    }

    fn write_raw(svc: &DocumentService, name: &str, text: &str) {
        fs::create_dir_all(svc.data_dir()).unwrap();
        fs::write(svc.data_dir().join(name), text).unwrap();
    }

    fn dir_entries(svc: &DocumentService) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(svc.data_dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    fn slugs(summaries: &[DocumentSummary]) -> Vec<&str> {
        summaries.iter().map(|s| s.slug.as_str()).collect()
    }

    #[test]
    fn service_over_a_bare_directory_reads_documents() {
        let temp = TempDir::new().unwrap();
        service(&temp).create(draft("plain", "Plain")).unwrap();

        let svc = DocumentService::at(temp.path().join("blog"));
        assert_eq!(slugs(&svc.list().expect("list")), vec!["plain"]);
    }

    #[test]
    fn list_creates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let svc = service(&temp);

        assert!(svc.list().expect("list").is_empty());
        assert!(svc.data_dir().is_dir());
    }

    #[test]
    fn create_then_get_round_trips() {
        let temp = TempDir::new().unwrap();
        let svc = service(&temp);

        let created = svc
            .create(DocumentDraft {
                tags: vec!["rust".into(), "web".into()],
                summary: Some("About things".into()),
                ..draft("hello-world", "Hello World")
            })
            .expect("create");
        assert_eq!(created.file_name, "hello-world.mdx");

        let loaded = svc.get("hello-world").expect("get");
        assert_eq!(loaded, created);
        assert_eq!(loaded.body, "Body of Hello World\n");
        assert_eq!(dir_entries(&svc), vec!["hello-world.mdx"]);

        let raw = fs::read_to_string(svc.data_dir().join("hello-world.mdx")).unwrap();
        assert!(raw.starts_with("---\ntitle: Hello World\n"));
    }

    #[test]
    fn invalid_draft_never_touches_storage() {
        let temp = TempDir::new().unwrap();
        let svc = service(&temp);

        let err = svc.create(draft("", "No slug")).expect_err("should fail");
        assert!(matches!(err, BlogError::InvalidInput(_)));
        assert!(!svc.data_dir().exists());
    }

    #[test]
    fn create_conflicts_on_existing_slug() {
        let temp = TempDir::new().unwrap();
        let svc = service(&temp);
        svc.create(draft("taken", "First")).expect("create");

        let err = svc.create(draft("taken", "Second")).expect_err("should conflict");
        assert!(matches!(err, BlogError::Conflict(_)));
        assert_eq!(svc.get("taken").unwrap().metadata.title.as_str(), "First");
    }

    #[test]
    fn create_conflicts_with_legacy_md_file() {
        let temp = TempDir::new().unwrap();
        let svc = service(&temp);
        write_raw(&svc, "legacy.md", "---\ntitle: Legacy\ndate: 2020-01-01\n---\nold\n");

        let err = svc.create(draft("legacy", "New")).expect_err("should conflict");
        assert!(matches!(err, BlogError::Conflict(_)));
        assert_eq!(dir_entries(&svc), vec!["legacy.md"]);
    }

    #[test]
    fn concurrent_creates_have_one_winner() {
        let temp = TempDir::new().unwrap();
        let svc = service(&temp);
        let barrier = Arc::new(Barrier::new(2));

        let handles: Vec<_> = (0..2)
            .map(|i| {
                let svc = svc.clone();
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    svc.create(draft("race", &format!("Writer {i}")))
                })
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .any(|r| matches!(r, Err(BlogError::Conflict(_)))));
        assert_eq!(dir_entries(&svc), vec!["race.mdx"]);
    }

    #[test]
    fn list_orders_newest_first_then_by_slug() {
        let temp = TempDir::new().unwrap();
        let svc = service(&temp);
        svc.create(dated("old", "2020-01-01T00:00:00Z")).unwrap();
        svc.create(dated("b-same", "2023-06-01T12:00:00Z")).unwrap();
        svc.create(dated("a-same", "2023-06-01T12:00:00Z")).unwrap();
        svc.create(dated("new", "2024-02-02T00:00:00Z")).unwrap();

        let listed = svc.list().expect("list");
        assert_eq!(slugs(&listed), vec!["new", "a-same", "b-same", "old"]);
    }

    #[test]
    fn list_skips_bad_and_foreign_files() {
        let temp = TempDir::new().unwrap();
        let svc = service(&temp);
        svc.create(draft("good", "Good")).unwrap();
        write_raw(&svc, "no-date.mdx", "---\ntitle: Missing date\n---\nbody");
        write_raw(&svc, "broken.md", "---\ntitle: [unclosed\n---\n");
        write_raw(&svc, "notes.txt", "---\ntitle: T\ndate: 2020-01-01\n---\n");
        write_raw(&svc, "bad name.mdx", "---\ntitle: T\ndate: 2020-01-01\n---\n");
        write_raw(&svc, ".folio-abc.tmp", "partial");
        fs::create_dir(svc.data_dir().join("folder.mdx")).unwrap();

        let listed = svc.list().expect("list");
        assert_eq!(slugs(&listed), vec!["good"]);
    }

    #[test]
    fn mdx_shadows_md_for_the_same_slug() {
        let temp = TempDir::new().unwrap();
        let svc = service(&temp);
        write_raw(&svc, "dup.md", "---\ntitle: From md\ndate: 2020-01-01\n---\n");
        write_raw(&svc, "dup.mdx", "---\ntitle: From mdx\ndate: 2020-01-01\n---\n");

        let listed = svc.list().expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "From mdx");
        assert_eq!(svc.get("dup").unwrap().file_name, "dup.mdx");
    }

    #[test]
    fn list_published_hides_drafts() {
        let temp = TempDir::new().unwrap();
        let svc = service(&temp);
        svc.create(draft("public", "Public")).unwrap();
        svc.create(DocumentDraft {
            draft: true,
            ..draft("hidden", "Hidden")
        })
        .unwrap();

        assert_eq!(svc.list().unwrap().len(), 2);
        assert_eq!(slugs(&svc.list_published().unwrap()), vec!["public"]);
    }

    #[test]
    fn get_reports_missing_invalid_and_corrupt() {
        let temp = TempDir::new().unwrap();
        let svc = service(&temp);
        write_raw(&svc, "corrupt.mdx", "---\ntitle: never closed\n");

        assert!(matches!(svc.get("absent"), Err(BlogError::NotFound(_))));
        assert!(matches!(svc.get("../secret"), Err(BlogError::InvalidInput(_))));
        assert!(matches!(svc.get("corrupt"), Err(BlogError::Parse { .. })));
        assert!(!svc.exists("absent").unwrap());
        assert!(svc.exists("corrupt").unwrap());
    }

    #[test]
    fn update_in_place_keeps_extension_and_extra_fields() {
        let temp = TempDir::new().unwrap();
        let svc = service(&temp);
        write_raw(
            &svc,
            "legacy.md",
            "---\ntitle: Legacy\ndate: 2020-01-01\nlayout: PostBanner\n---\nold body\n",
        );

        let updated = svc
            .update(
                "legacy",
                DocumentDraft {
                    body: "new body\n".into(),
                    ..draft("legacy", "Legacy, revised")
                },
            )
            .expect("update");

        assert_eq!(updated.file_name, "legacy.md");
        assert_eq!(dir_entries(&svc), vec!["legacy.md"]);

        let loaded = svc.get("legacy").unwrap();
        assert_eq!(loaded.metadata.title.as_str(), "Legacy, revised");
        assert_eq!(loaded.body, "new body\n");
        assert_eq!(
            loaded.metadata.extra.get("layout"),
            Some(&Value::String("PostBanner".into()))
        );
    }

    #[test]
    fn update_renames_document() {
        let temp = TempDir::new().unwrap();
        let svc = service(&temp);
        svc.create(draft("before", "Title")).unwrap();

        let renamed = svc.update("before", draft("after", "Title")).expect("rename");

        assert_eq!(renamed.slug.as_str(), "after");
        assert_eq!(dir_entries(&svc), vec!["after.mdx"]);
        assert!(matches!(svc.get("before"), Err(BlogError::NotFound(_))));
    }

    #[test]
    fn rename_removes_shadowed_md_file_too() {
        let temp = TempDir::new().unwrap();
        let svc = service(&temp);
        write_raw(&svc, "a.md", "---\ntitle: Stale\ndate: 2020-01-01\n---\nstale md\n");
        write_raw(&svc, "a.mdx", "---\ntitle: Current\ndate: 2021-01-01\n---\ncurrent\n");

        svc.update("a", draft("b", "Current")).expect("rename");

        assert!(matches!(svc.get("a"), Err(BlogError::NotFound(_))));
        assert_eq!(dir_entries(&svc), vec!["b.mdx"]);
    }

    #[test]
    fn update_without_date_keeps_stored_date() {
        let temp = TempDir::new().unwrap();
        let svc = service(&temp);
        svc.create(dated("p", "2019-05-05T00:00:00Z")).unwrap();
        let stored: DateTime<Utc> = "2019-05-05T00:00:00Z".parse().unwrap();

        let updated = svc.update("p", draft("p", "Edited")).expect("update");
        assert_eq!(updated.metadata.date, stored);
        assert_eq!(svc.get("p").unwrap().metadata.date, stored);

        let moved = svc.update("p", draft("q", "Moved")).expect("rename");
        assert_eq!(moved.metadata.date, stored);

        let redated = svc
            .update("q", dated("q", "2022-02-02T00:00:00Z"))
            .expect("update");
        assert_eq!(
            redated.metadata.date,
            "2022-02-02T00:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );
    }

    #[test]
    fn rename_onto_existing_slug_conflicts() {
        let temp = TempDir::new().unwrap();
        let svc = service(&temp);
        svc.create(draft("a", "A")).unwrap();
        svc.create(draft("b", "B")).unwrap();

        let err = svc.update("a", draft("b", "A moved")).expect_err("should conflict");

        assert!(matches!(err, BlogError::Conflict(_)));
        assert_eq!(svc.get("a").unwrap().metadata.title.as_str(), "A");
        assert_eq!(svc.get("b").unwrap().metadata.title.as_str(), "B");
    }

    #[test]
    fn failed_rename_write_leaves_original_intact() {
        let temp = TempDir::new().unwrap();
        let svc = service(&temp);
        svc.create(draft("a", "A")).unwrap();
        let blocker = svc.data_dir().join("b.mdx");
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("keep"), "x").unwrap();

        svc.update("a", draft("b", "A moved")).expect_err("write should fail");

        assert_eq!(svc.get("a").unwrap().metadata.title.as_str(), "A");
        assert_eq!(dir_entries(&svc), vec!["a.mdx", "b.mdx"]);
    }

    #[test]
    fn update_missing_document_is_not_found() {
        let temp = TempDir::new().unwrap();
        let svc = service(&temp);

        let err = svc.update("ghost", draft("ghost", "Ghost")).expect_err("should fail");
        assert!(matches!(err, BlogError::NotFound(_)));
    }

    #[test]
    fn delete_removes_all_backing_files() {
        let temp = TempDir::new().unwrap();
        let svc = service(&temp);
        write_raw(&svc, "dup.md", "---\ntitle: md\ndate: 2020-01-01\n---\n");
        write_raw(&svc, "dup.mdx", "---\ntitle: mdx\ndate: 2020-01-01\n---\n");

        svc.delete("dup").expect("delete");

        assert!(dir_entries(&svc).is_empty());
        assert!(matches!(svc.delete("dup"), Err(BlogError::NotFound(_))));
    }

    #[test]
    fn delete_missing_leaves_storage_untouched() {
        let temp = TempDir::new().unwrap();
        let svc = service(&temp);
        svc.create(draft("keep", "Keep")).unwrap();

        assert!(matches!(svc.delete("other"), Err(BlogError::NotFound(_))));
        assert_eq!(dir_entries(&svc), vec!["keep.mdx"]);
    }
}
