//! Constants shared across the core crate.

/// Default storage directory for documents, relative to the working directory.
pub const DEFAULT_BLOG_DATA_DIR: &str = "data/blog";

/// Extension used for every document this crate writes.
pub const WRITE_EXTENSION: &str = "mdx";

/// Recognised document extensions, in precedence order.
///
/// When a slug is backed by more than one file, the earliest extension wins.
pub const DOCUMENT_EXTENSIONS: &[&str] = &[WRITE_EXTENSION, "md"];

/// Public URL prefix under which published documents are served.
pub const PUBLIC_URL_PREFIX: &str = "/blog";

/// Prefix and suffix for in-flight temporary files inside the storage directory.
///
/// The leading dot and `.tmp` suffix keep them out of every listing.
pub const TEMP_FILE_PREFIX: &str = ".folio-";
pub const TEMP_FILE_SUFFIX: &str = ".tmp";
