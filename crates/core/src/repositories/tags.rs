//! Tag catalogue.
//!
//! Tags have no storage of their own: the catalogue is derived from document metadata on every
//! call, and a tag exists exactly as long as some document carries it.

use crate::repositories::documents::DocumentService;
use crate::{BlogError, BlogResult};
use folio_types::NonEmptyText;
use std::collections::BTreeMap;

/// A tag and the number of documents carrying it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagCount {
    pub name: String,
    pub count: usize,
}

#[derive(Clone, Debug)]
pub struct TagService {
    documents: DocumentService,
}

impl TagService {
    pub fn new(documents: DocumentService) -> Self {
        Self { documents }
    }

    /// Every tag in use, sorted by name (byte order), with its document count.
    ///
    /// Drafts count. Unreadable documents are skipped, as in listing.
    pub fn list_tags(&self) -> BlogResult<Vec<TagCount>> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for stored in self.documents.scan()? {
            for tag in stored.document.metadata.tags {
                *counts.entry(tag).or_default() += 1;
            }
        }

        Ok(counts
            .into_iter()
            .map(|(name, count)| TagCount { name, count })
            .collect())
    }

    pub fn tag_exists(&self, name: &str) -> BlogResult<bool> {
        let name = name.trim();
        Ok(self.list_tags()?.iter().any(|t| t.name == name))
    }

    /// Validate a prospective tag name.
    ///
    /// Nothing is stored: the tag comes into being when a document first uses it.
    ///
    /// # Errors
    ///
    /// - [`BlogError::InvalidInput`] if the name is blank.
    /// - [`BlogError::Conflict`] if some document already carries it.
    pub fn check_new_tag(&self, name: &str) -> BlogResult<NonEmptyText> {
        let name = NonEmptyText::new(name)
            .map_err(|_| BlogError::InvalidInput("tag name is required".into()))?;
        if self.tag_exists(name.as_str())? {
            return Err(BlogError::Conflict(format!("tag {:?}", name.as_str())));
        }
        Ok(name)
    }

    /// Strip `name` from every document carrying it and return how many were rewritten.
    ///
    /// Each document is rewritten atomically, but the sweep as a whole is not: if a rewrite
    /// fails, documents already rewritten stay rewritten and the error is returned.
    ///
    /// # Errors
    ///
    /// - [`BlogError::InvalidInput`] if the name is blank.
    /// - [`BlogError::NotFound`] if no document carries the tag.
    pub fn remove_tag_everywhere(&self, name: &str) -> BlogResult<usize> {
        let name = NonEmptyText::new(name)
            .map_err(|_| BlogError::InvalidInput("tag name is required".into()))?;

        let mut updated = 0usize;
        for mut stored in self.documents.scan()? {
            let tags = &mut stored.document.metadata.tags;
            let before = tags.len();
            tags.retain(|t| t != name.as_str());
            if tags.len() == before {
                continue;
            }

            if let Err(e) = self.documents.rewrite(&stored) {
                tracing::error!(
                    tag = %name,
                    slug = %stored.document.slug,
                    rewritten = updated,
                    error = %e,
                    "tag removal stopped part-way"
                );
                return Err(e);
            }
            updated += 1;
        }

        if updated == 0 {
            return Err(BlogError::NotFound(format!("tag {:?}", name.as_str())));
        }

        tracing::info!(tag = %name, documents = updated, "tag removed");
        Ok(updated)
    }
}
