use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::{config::JwtConfig, state::AppState};

/// Token payload. `exp` is only present when a TTL is configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub public_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub ttl: Option<Duration>,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::from_config(&state.config.jwt)
    }
}

impl JwtKeys {
    pub fn from_config(cfg: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            // minutes() panics on overflow; out-of-range values surface in issue()
            ttl: cfg
                .ttl_minutes
                .map(|m| Duration::seconds(m.saturating_mul(60))),
        }
    }

    /// Mints a token for an already authenticated user.
    pub fn issue(&self, public_id: Uuid) -> anyhow::Result<String> {
        let exp = match self.ttl {
            Some(ttl) => {
                let at = OffsetDateTime::now_utc()
                    .checked_add(ttl)
                    .ok_or_else(|| anyhow::anyhow!("token ttl out of range"))?;
                Some(at.unix_timestamp() as u64)
            }
            None => None,
        };
        let claims = Claims { public_id, exp };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        debug!(%public_id, expires = ?exp, "jwt issued");
        Ok(token)
    }

    /// Checks the signature (and expiry when a TTL is configured). Does not
    /// consult the credential store.
    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation())?;
        debug!(public_id = %data.claims.public_id, "jwt verified");
        Ok(data.claims)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        if self.ttl.is_none() {
            validation.required_spec_claims.clear();
            validation.validate_exp = false;
        }
        validation
    }
}
