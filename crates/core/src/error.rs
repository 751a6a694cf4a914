use frontmatter::FrontmatterError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum BlogError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("a document with slug {0:?} already exists")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("failed to parse {path}: {source}", path = path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: FrontmatterError,
    },
    #[error("failed to render document: {0}")]
    Render(FrontmatterError),

    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to read storage directory: {0}")]
    DirRead(std::io::Error),
    #[error("failed to read document file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write document file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to delete document file: {0}")]
    FileDelete(std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Coarse classification of [`BlogError`] used by the transport layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    Conflict,
    NotFound,
    Unauthorized,
    Parse,
    Storage,
    /// Server misconfiguration.
    Config,
}

impl BlogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogError::InvalidInput(_) => ErrorKind::InvalidInput,
            BlogError::Config(_) => ErrorKind::Config,
            BlogError::Conflict(_) => ErrorKind::Conflict,
            BlogError::NotFound(_) => ErrorKind::NotFound,
            BlogError::Unauthorized => ErrorKind::Unauthorized,
            BlogError::Parse { .. } => ErrorKind::Parse,
            BlogError::Render(_)
            | BlogError::StorageDirCreation(_)
            | BlogError::DirRead(_)
            | BlogError::FileRead(_)
            | BlogError::FileWrite(_)
            | BlogError::FileDelete(_) => ErrorKind::Storage,
        }
    }

    /// True when the caller caused the failure (4xx-equivalent).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidInput
                | ErrorKind::Conflict
                | ErrorKind::NotFound
                | ErrorKind::Unauthorized
        )
    }
}

impl From<folio_types::TextError> for BlogError {
    fn from(err: folio_types::TextError) -> Self {
        BlogError::InvalidInput(err.to_string())
    }
}

impl From<folio_types::SlugError> for BlogError {
    fn from(err: folio_types::SlugError) -> Self {
        BlogError::InvalidInput(err.to_string())
    }
}

pub type BlogResult<T> = std::result::Result<T, BlogError>;
