//! Repository management modules.
//!
//! Services over the flat document directory: the documents themselves and the tag catalogue
//! derived from them.

pub mod documents;
pub(crate) mod helpers;
pub mod tags;
