//! Credential extraction shared by the API surfaces.
//!
//! Nothing here decides whether a credential is valid; that is the capability gate's job in
//! `folio-core`. These helpers only pull the raw credential out of transport headers.

/// Header carrying the webhook payload signature, `sha256=<hex>`.
pub const SIGNATURE_HEADER: &str = "x-webhook-signature";

const BEARER_SCHEME: &str = "bearer";

/// Extract the token from an `Authorization: Bearer <token>` header value.
///
/// The scheme is matched case-insensitively. Any other scheme, or an empty token, yields `None`.
pub fn bearer_token(header_value: Option<&str>) -> Option<&str> {
    let value = header_value?.trim();
    let (scheme, token) = value.split_once(char::is_whitespace)?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
