//! Untyped frontmatter codec.
//!
//! Splits raw document text into its YAML metadata mapping and body, and joins them back
//! together. The body is carried byte-for-byte: everything after the closing fence line
//! belongs to it, including leading blank lines and the absence of a trailing newline.

use crate::{FrontmatterError, FrontmatterResult};
use serde_yaml::{Mapping, Value};

/// Line that opens and closes the metadata block.
const FENCE: &str = "---";

/// Frontmatter codec operations.
///
/// Zero-sized namespace; all methods are associated functions.
pub struct Frontmatter;

impl Frontmatter {
    /// Decode raw document text into `(metadata, body)`.
    ///
    /// Text that does not open with a fence line has no frontmatter: the mapping is empty
    /// and the whole text is the body. A leading UTF-8 byte order mark is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`FrontmatterError`] if:
    /// - the block is opened but never closed,
    /// - the block is not valid YAML,
    /// - the YAML is a scalar or sequence rather than a mapping.
    pub fn parse(text: &str) -> FrontmatterResult<(Mapping, String)> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut lines = text.split_inclusive('\n');

        let Some(opening) = lines.next() else {
            return Ok((Mapping::new(), String::new()));
        };
        if opening.trim_end() != FENCE {
            return Ok((Mapping::new(), text.to_owned()));
        }

        let yaml_start = opening.len();
        let mut offset = yaml_start;
        for line in lines {
            if line.trim_end() == FENCE {
                let metadata = parse_mapping(&text[yaml_start..offset])?;
                let body = &text[offset + line.len()..];
                return Ok((metadata, body.to_owned()));
            }
            offset += line.len();
        }

        Err(FrontmatterError::Unterminated)
    }

    /// Encode a body and its metadata into document text.
    ///
    /// Output is `---\n<yaml>---\n<body>`; an empty mapping renders as two bare fences.
    ///
    /// # Errors
    ///
    /// Returns [`FrontmatterError::InvalidYaml`] if the mapping cannot be serialised.
    pub fn render(body: &str, metadata: &Mapping) -> FrontmatterResult<String> {
        let mut out = String::with_capacity(body.len() + 128);
        out.push_str(FENCE);
        out.push('\n');

        if !metadata.is_empty() {
            let yaml = serde_yaml::to_string(metadata)?;
            out.push_str(&yaml);
            if !yaml.ends_with('\n') {
                out.push('\n');
            }
        }

        out.push_str(FENCE);
        out.push('\n');
        out.push_str(body);
        Ok(out)
    }
}

fn parse_mapping(yaml: &str) -> FrontmatterResult<Mapping> {
    if yaml.trim().is_empty() {
        return Ok(Mapping::new());
    }

    match serde_yaml::from_str::<Value>(yaml)? {
        Value::Mapping(mapping) => Ok(mapping),
        // A block holding only comments
        Value::Null => Ok(Mapping::new()),
        _ => Err(FrontmatterError::NotAMapping),
    }
}
