//! Service configuration read from the environment

use contract::RenderOptions;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_CONTRACTS_DIR: &str = "contratos_gerados";
const DEFAULT_LOGO_PATH: &str = "logo.png";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    /// Partner endpoint queried as `{url}?id={cliente_id}`
    pub clients_api_url: String,
    pub api_user: String,
    pub api_password: String,
    /// Where generated PDFs are written
    pub contracts_dir: PathBuf,
    pub logo_path: PathBuf,
    pub watermark: String,
    pub bind_addr: String,
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None => {
                let user = require("POSTGRES_USER")?;
                let password = require("POSTGRES_PASSWORD")?;
                let db = require("POSTGRES_DB")?;
                let host = get("POSTGRES_HOST").unwrap_or_else(|| "db".to_string());
                format!("postgres://{user}:{password}@{host}/{db}")
            }
        };

        let clients_api_url = require("API_CLIENTES_URL")?;
        if !clients_api_url.starts_with("http://") && !clients_api_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                name: "API_CLIENTES_URL",
                reason: format!("expected an http(s) URL, got {clients_api_url:?}"),
            });
        }

        let allowed_origins = match get("ALLOWED_ORIGINS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect(),
            None => DEFAULT_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        Ok(Self {
            database_url,
            clients_api_url,
            api_user: require("API_USER")?,
            api_password: require("API_PASSWORD")?,
            contracts_dir: get("CONTRACTS_DIR")
                .unwrap_or_else(|| DEFAULT_CONTRACTS_DIR.to_string())
                .into(),
            logo_path: get("LOGO_PATH")
                .unwrap_or_else(|| DEFAULT_LOGO_PATH.to_string())
                .into(),
            watermark: get("WATERMARK_TEXT").unwrap_or_else(|| contract::clauses::WATERMARK.to_string()),
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            allowed_origins,
        })
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            logo_path: Some(self.logo_path.clone()),
            watermark: self.watermark.clone(),
            ..RenderOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    const BASE: [(&str, &str); 3] = [
        ("API_CLIENTES_URL", "http://parceiro.local/clientes"),
        ("API_USER", "cometa"),
        ("API_PASSWORD", "segredo"),
    ];

    #[test]
    fn test_defaults() {
        let mut vars = BASE.to_vec();
        vars.push(("DATABASE_URL", "postgres://u:p@localhost/contratos"));
        let config = AppConfig::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.contracts_dir, PathBuf::from("contratos_gerados"));
        assert_eq!(config.logo_path, PathBuf::from("logo.png"));
        assert_eq!(config.watermark, "COMETA");
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
        assert_eq!(config.allowed_origins.len(), 2);
    }

    #[test]
    fn test_database_url_from_parts() {
        let mut vars = BASE.to_vec();
        vars.extend([
            ("POSTGRES_USER", "cometa"),
            ("POSTGRES_PASSWORD", "pw"),
            ("POSTGRES_DB", "contratos"),
        ]);
        let config = AppConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.database_url, "postgres://cometa:pw@db/contratos");
    }

    #[test]
    fn test_missing_credentials() {
        let vars = [
            ("DATABASE_URL", "postgres://localhost/x"),
            ("API_CLIENTES_URL", "http://parceiro.local"),
            ("API_USER", "cometa"),
        ];
        let err = AppConfig::from_lookup(lookup(&vars)).unwrap_err();
        assert_eq!(err, ConfigError::Missing("API_PASSWORD"));
    }

    #[test]
    fn test_invalid_partner_url() {
        let mut vars = BASE.to_vec();
        vars[0] = ("API_CLIENTES_URL", "parceiro.local");
        vars.push(("DATABASE_URL", "postgres://localhost/x"));
        let err = AppConfig::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "API_CLIENTES_URL", .. }));
    }

    #[test]
    fn test_origin_list() {
        let mut vars = BASE.to_vec();
        vars.push(("DATABASE_URL", "postgres://localhost/x"));
        vars.push(("ALLOWED_ORIGINS", "http://a.example, ,http://b.example"));
        let config = AppConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.allowed_origins, vec!["http://a.example", "http://b.example"]);
    }
}
