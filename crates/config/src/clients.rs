use serde::Deserialize;

/// Where the client routes are mounted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientsConfig {
    pub path: String,
}

impl Default for ClientsConfig {
    fn default() -> Self {
        Self {
            path: "/clients".to_string(),
        }
    }
}
