//! JWT signing for server and user authentication, and webhook verification.

use hmac::{Hmac, Mac};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;
use sha2::Sha256;

use crate::error::Result;

type HmacSha256 = Hmac<Sha256>;

/// Claims of the token the server authenticates with.
#[derive(Debug, Serialize)]
struct ServerClaims {
    // The API expects the string form, not a JSON boolean.
    server: &'static str,
}

/// Claims of a user token.
#[derive(Debug, Serialize)]
struct UserClaims<'a> {
    user_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    iat: Option<i64>,
}

/// Signs HS256 tokens with the application secret.
#[derive(Clone)]
pub struct JwtSigner {
    secret: String,
    key: EncodingKey,
}

impl std::fmt::Debug for JwtSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSigner").finish_non_exhaustive()
    }
}

impl JwtSigner {
    /// Create a signer for the given API secret.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        let key = EncodingKey::from_secret(secret.as_bytes());
        Self { secret, key }
    }

    /// Token used for every server-side request.
    pub fn server_token(&self) -> Result<String> {
        self.sign(&ServerClaims { server: "true" })
    }

    /// Token a chat user connects with.
    ///
    /// Without `expiration` the token is valid indefinitely. Both timestamps
    /// are unix seconds.
    pub fn user_token(
        &self,
        user_id: &str,
        expiration: Option<i64>,
        issued_at: Option<i64>,
    ) -> Result<String> {
        self.sign(&UserClaims {
            user_id,
            exp: expiration,
            iat: issued_at,
        })
    }

    /// Check an `X-Signature` header against the raw webhook body.
    pub fn verify_webhook(&self, body: &[u8], signature: &str) -> bool {
        let Ok(expected) = hex::decode(signature.trim()) else {
            return false;
        };
        let Ok(mut mac) = HmacSha256::new_from_slice(self.secret.as_bytes()) else {
            return false;
        };
        mac.update(body);
        mac.verify_slice(&expected).is_ok()
    }

    fn sign<T: Serialize>(&self, claims: &T) -> Result<String> {
        Ok(encode(&Header::default(), claims, &self.key)?)
    }
}
