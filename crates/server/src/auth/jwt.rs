use config::AuthConfig;
use context::{AccessToken, Claims};
use http::{header::AUTHORIZATION, request::Parts};
use jwt_compact::{
    AlgorithmExt, TimeOptions, Token, UntrustedToken,
    alg::{Hs256, Hs256Key},
};
use secrecy::{ExposeSecret, SecretString};

use super::{AuthResult, error::AuthError};

/// Verifies HS256 bearer tokens signed with a shared secret.
pub(super) struct JwtAuth {
    key: Hs256Key,
    issuer: Option<String>,
    audience: Option<String>,
}

impl JwtAuth {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            key: Hs256Key::new(config.jwt_secret.expose_secret().as_bytes()),
            issuer: config.issuer,
            audience: config.audience,
        }
    }

    pub fn authenticate(&self, parts: &Parts) -> AuthResult<AccessToken> {
        let raw = bearer_token(parts)?;

        let untrusted = UntrustedToken::new(raw).map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        let token: Token<Claims> = Hs256
            .validator::<Claims>(&self.key)
            .validate(&untrusted)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        self.validate_claims(&token)?;

        Ok(AccessToken {
            raw: SecretString::from(raw.to_owned()),
            token,
        })
    }

    fn validate_claims(&self, token: &Token<Claims>) -> AuthResult<()> {
        let claims = token.claims();
        let time_options = TimeOptions::default();

        // Time claims are optional, but enforced when present.
        if claims.expiration.is_some() {
            claims
                .validate_expiration(&time_options)
                .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        }

        if claims.not_before.is_some() {
            claims
                .validate_maturity(&time_options)
                .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        }

        if let Some(issuer) = &self.issuer
            && claims.custom.issuer.as_ref() != Some(issuer)
        {
            return Err(AuthError::InvalidToken("issuer mismatch".to_string()));
        }

        if let Some(audience) = &self.audience
            && !claims.custom.has_audience(audience)
        {
            return Err(AuthError::InvalidToken("audience mismatch".to_string()));
        }

        Ok(())
    }
}

fn bearer_token(parts: &Parts) -> AuthResult<&str> {
    let header = parts.headers.get(AUTHORIZATION).ok_or(AuthError::MissingToken)?;

    let value = header
        .to_str()
        .map_err(|_| AuthError::InvalidToken("authorization header is not valid ASCII".to_string()))?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or_else(|| AuthError::InvalidToken("expected a bearer token".to_string()))?;

    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return Err(AuthError::InvalidToken("expected a bearer token".to_string()));
    }

    Ok(token.trim())
}
