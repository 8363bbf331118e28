use std::collections::HashMap;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inserted into the request extensions by the authentication gate.
#[derive(Default, Clone, Debug)]
pub struct Authentication {
    pub token: Option<AccessToken>,
}

impl Authentication {
    /// The `sub` claim of the validated token, if any.
    pub fn subject(&self) -> Option<&str> {
        self.token.as_ref().and_then(|token| token.claims().custom.subject.as_deref())
    }
}

#[derive(Clone, Debug)]
pub struct AccessToken {
    pub raw: SecretString,
    pub token: jwt_compact::Token<Claims>,
}

impl std::ops::Deref for AccessToken {
    type Target = jwt_compact::Token<Claims>;
    fn deref(&self) -> &Self::Target {
        &self.token
    }
}

/// Standard JWT claims the gate checks, plus whatever else the issuer put in the token.
#[serde_with::serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer claim - identifies the principal that issued the JWT
    #[serde(default, rename = "iss", skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,

    /// Audience claim - identifies the recipients that the JWT is intended for
    #[serde_as(deserialize_as = "Option<serde_with::OneOrMany<_>>")]
    #[serde(default, rename = "aud", skip_serializing_if = "Option::is_none")]
    pub audience: Option<Vec<String>>,

    /// Subject claim - identifies the principal that is the subject of the JWT
    #[serde(default, rename = "sub", skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Additional claims for flexible access to custom fields
    #[serde(flatten)]
    pub additional: HashMap<String, Value>,
}

impl Claims {
    /// Claims carrying only a subject.
    pub fn for_subject(subject: impl Into<String>) -> Self {
        Self {
            issuer: None,
            audience: None,
            subject: Some(subject.into()),
            additional: HashMap::new(),
        }
    }

    /// Whether the `aud` claim lists `audience`.
    pub fn has_audience(&self, audience: &str) -> bool {
        self.audience
            .as_ref()
            .is_some_and(|audiences| audiences.iter().any(|candidate| candidate == audience))
    }
}
