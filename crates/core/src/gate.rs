//! Capability gate for interactive administration.
//!
//! Every interactive mutation and every admin read asks a [`CapabilityGate`] first. The gate
//! only answers "may this credential edit the blog"; transports extract the credential
//! (typically a bearer token) and pass it in verbatim.

use crate::{BlogError, BlogResult};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use subtle::ConstantTimeEq;

pub trait CapabilityGate: Send + Sync {
    /// Succeeds when `credential` grants the editing capability.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::Unauthorized`] for a missing, malformed, expired, or wrong credential.
    fn authorize(&self, credential: Option<&str>) -> BlogResult<()>;
}

fn present(credential: Option<&str>) -> BlogResult<&str> {
    credential
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or(BlogError::Unauthorized)
}

#[derive(Deserialize, Debug)]
struct AdminClaims {
    #[serde(default)]
    sub: Option<String>,
}

/// Accepts HS256 JSON Web Tokens signed with a shared secret.
///
/// Tokens must carry an `exp` claim that has not passed.
pub struct JwtGate {
    key: DecodingKey,
    validation: Validation,
}

impl JwtGate {
    pub fn new(secret: &str) -> BlogResult<Self> {
        if secret.trim().is_empty() {
            return Err(BlogError::Config("JWT secret cannot be empty".into()));
        }

        Ok(Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        })
    }
}

impl CapabilityGate for JwtGate {
    fn authorize(&self, credential: Option<&str>) -> BlogResult<()> {
        let token = present(credential)?;
        match decode::<AdminClaims>(token, &self.key, &self.validation) {
            Ok(data) => {
                tracing::debug!(subject = ?data.claims.sub, "admin token accepted");
                Ok(())
            }
            Err(e) => {
                tracing::debug!(error = %e, "admin token rejected");
                Err(BlogError::Unauthorized)
            }
        }
    }
}

/// Accepts a single static API key.
pub struct ApiKeyGate {
    key: Vec<u8>,
}

impl ApiKeyGate {
    pub fn new(key: &str) -> BlogResult<Self> {
        let key = key.trim();
        if key.is_empty() {
            return Err(BlogError::Config("API key cannot be empty".into()));
        }
        Ok(Self {
            key: key.as_bytes().to_vec(),
        })
    }
}

impl CapabilityGate for ApiKeyGate {
    fn authorize(&self, credential: Option<&str>) -> BlogResult<()> {
        let provided = present(credential)?;
        if bool::from(provided.as_bytes().ct_eq(&self.key)) {
            Ok(())
        } else {
            Err(BlogError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestClaims {
        sub: String,
        exp: i64,
    }

    fn token(secret: &str, exp_offset_secs: i64) -> String {
        let claims = TestClaims {
            sub: "editor".into(),
            exp: chrono::Utc::now().timestamp() + exp_offset_secs,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("encode token")
    }

    #[test]
    fn jwt_gate_accepts_valid_token() {
        let gate = JwtGate::new("jwt-secret").expect("gate");
        assert!(gate.authorize(Some(&token("jwt-secret", 3600))).is_ok());
    }

    #[test]
    fn jwt_gate_rejects_bad_tokens() {
        let gate = JwtGate::new("jwt-secret").expect("gate");

        for credential in [
            None,
            Some(String::new()),
            Some("not.a.jwt".to_owned()),
            Some(token("other-secret", 3600)),
            Some(token("jwt-secret", -3600)),
        ] {
            let err = gate.authorize(credential.as_deref()).expect_err("should reject");
            assert!(matches!(err, BlogError::Unauthorized));
        }
    }

    #[test]
    fn api_key_gate_compares_exactly() {
        let gate = ApiKeyGate::new("letmein").expect("gate");
        assert!(gate.authorize(Some("letmein")).is_ok());
        assert!(gate.authorize(Some("letmein2")).is_err());
        assert!(gate.authorize(Some("LETMEIN")).is_err());
        assert!(gate.authorize(None).is_err());
    }
}
