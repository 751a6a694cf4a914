//! Validated primitive types shared across the Folio crates.
//!
//! - [`NonEmptyText`]: trimmed text with at least one non-whitespace character
//! - [`Slug`]: the URL-safe identifier that doubles as a document's storage key

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// Errors that can occur when parsing or deriving a [`Slug`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SlugError {
    #[error("slug cannot be empty")]
    Empty,
    #[error("slug contains invalid character {0:?}")]
    InvalidCharacter(char),
    #[error("slug must start with a letter or digit")]
    InvalidStart,
    #[error("no slug can be derived from title {0:?}")]
    Underivable(String),
}

/// A string type that guarantees non-empty content.
///
/// The input is trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// Returns `Err(TextError::Empty)` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// URL-safe document identifier.
///
/// A slug is also the file stem of the document on disk, so it is restricted to ASCII
/// letters, digits, `-` and `_`, and must begin with a letter or digit. That rules out
/// path separators, `.` and `..` segments, and hidden files.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slug(String);

impl Slug {
    /// Parses an explicit slug. Surrounding whitespace is ignored; case is preserved.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, SlugError> {
        let candidate = input.as_ref().trim();
        let first = candidate.chars().next().ok_or(SlugError::Empty)?;
        if !first.is_ascii_alphanumeric() {
            return Err(SlugError::InvalidStart);
        }
        if let Some(bad) = candidate
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(SlugError::InvalidCharacter(bad));
        }
        Ok(Self(candidate.to_owned()))
    }

    /// Derives a slug from a human title.
    ///
    /// The title is lowercased, every run of characters outside `[a-z0-9]` collapses into a
    /// single `-`, and leading/trailing separators are dropped: `"Hello, World!"` becomes
    /// `hello-world`.
    pub fn from_title(title: &str) -> Result<Self, SlugError> {
        let mut out = String::with_capacity(title.len());
        let mut pending_separator = false;

        for c in title.to_lowercase().chars() {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                if pending_separator && !out.is_empty() {
                    out.push('-');
                }
                pending_separator = false;
                out.push(c);
            } else {
                pending_separator = true;
            }
        }

        if out.is_empty() {
            return Err(SlugError::Underivable(title.to_owned()));
        }
        Ok(Self(out))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Slug::parse(s)
    }
}

impl serde::Serialize for Slug {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Slug {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Slug::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_and_rejects_blank() {
        assert_eq!(NonEmptyText::new("  hi  ").unwrap().as_str(), "hi");
        assert_eq!(NonEmptyText::new(" \n\t"), Err(TextError::Empty));
    }

    #[test]
    fn derives_slug_from_title() {
        assert_eq!(Slug::from_title("Hello World").unwrap().as_str(), "hello-world");
        assert_eq!(
            Slug::from_title("  Rust & Go: 2024 edition!! ").unwrap().as_str(),
            "rust-go-2024-edition"
        );
        assert_eq!(Slug::from_title("--a--b--").unwrap().as_str(), "a-b");
    }

    #[test]
    fn derivation_fails_without_alphanumerics() {
        assert!(matches!(
            Slug::from_title("!!! ???"),
            Err(SlugError::Underivable(_))
        ));
    }

    #[test]
    fn non_ascii_letters_become_separators() {
        assert_eq!(Slug::from_title("Café au lait").unwrap().as_str(), "caf-au-lait");
    }

    #[test]
    fn parse_accepts_url_safe_slugs() {
        assert_eq!(Slug::parse("my-post_2").unwrap().as_str(), "my-post_2");
        assert_eq!(Slug::parse(" Mixed-Case ").unwrap().as_str(), "Mixed-Case");
    }

    #[test]
    fn parse_rejects_path_like_input() {
        assert_eq!(Slug::parse(""), Err(SlugError::Empty));
        assert_eq!(Slug::parse("../etc"), Err(SlugError::InvalidStart));
        assert_eq!(Slug::parse(".hidden"), Err(SlugError::InvalidStart));
        assert_eq!(Slug::parse("a/b"), Err(SlugError::InvalidCharacter('/')));
        assert_eq!(Slug::parse("a.mdx"), Err(SlugError::InvalidCharacter('.')));
        assert_eq!(Slug::parse("a b"), Err(SlugError::InvalidCharacter(' ')));
    }

    #[test]
    fn slug_deserialize_validates() {
        let ok: Slug = serde_json::from_str("\"hello\"").unwrap();
        assert_eq!(ok.as_str(), "hello");
        assert!(serde_json::from_str::<Slug>("\"../x\"").is_err());
    }
}
