//! Server configuration for `leadform`.
//!
//! Loads configuration from environment variables with sensible defaults.
//! All settings can be overridden via `LEADFORM_*` environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use leadform_storage::StoreConfig;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Which document store to open at startup.
    pub store: StoreConfig,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Branding and contact details shown on the landing page.
    pub site: SiteConfig,
}

/// Landing page branding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Name shown in the header, title, and footer.
    pub name: String,
    /// Address for the footer `mailto:` link, if any.
    pub contact_email: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "AutomateIQ".to_owned(),
            contact_email: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT`: port to bind on (binds to `0.0.0.0`)
    /// - `LEADFORM_BIND_ADDR`: full bind address (overrides `PORT`, default: `127.0.0.1:8080`)
    /// - `LEADFORM_STORE`: `memory`, `file`, `redb`, `postgres`, or `firestore` (default: `memory`)
    /// - `LEADFORM_STORE_PATH`: directory (`file`) or database file (`redb`) (default: `./data`)
    /// - `DATABASE_URL`: PostgreSQL connection string (used when `LEADFORM_STORE=postgres`)
    /// - `FIRESTORE_PROJECT_ID`, `FIRESTORE_API_KEY`: Firestore credentials
    /// - `FIRESTORE_DATABASE`: Firestore database id (default: `(default)`)
    /// - `LEADFORM_LOG_LEVEL`: log filter (default: `info`)
    /// - `LEADFORM_SITE_NAME`: brand name (default: `AutomateIQ`)
    /// - `LEADFORM_CONTACT_EMAIL`: footer contact address (optional)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        // Priority: LEADFORM_BIND_ADDR > PORT > default 127.0.0.1:8080
        let default_addr = SocketAddr::from(([127, 0, 0, 1], 8080));
        let bind_addr = if let Some(addr) = var("LEADFORM_BIND_ADDR") {
            addr.parse().unwrap_or(default_addr)
        } else if let Some(port) = var("PORT") {
            SocketAddr::from(([0, 0, 0, 0], port.parse().unwrap_or(8080)))
        } else {
            default_addr
        };

        let store_path = var("LEADFORM_STORE_PATH").unwrap_or_else(|| "./data".to_owned());

        let store = match var("LEADFORM_STORE")
            .unwrap_or_else(|| "memory".to_owned())
            .to_lowercase()
            .as_str()
        {
            "file" | "jsonl" => StoreConfig::File {
                path: PathBuf::from(store_path),
            },
            "redb" => StoreConfig::Redb {
                path: PathBuf::from(store_path),
            },
            "postgres" | "postgresql" => StoreConfig::Postgres {
                url: var("DATABASE_URL")
                    .unwrap_or_else(|| "postgres://localhost/leadform".to_owned()),
            },
            "firestore" => StoreConfig::Firestore {
                project_id: var("FIRESTORE_PROJECT_ID").unwrap_or_default(),
                api_key: var("FIRESTORE_API_KEY").unwrap_or_default(),
                database: var("FIRESTORE_DATABASE").unwrap_or_else(|| "(default)".to_owned()),
            },
            _ => StoreConfig::Memory,
        };

        let log_level = var("LEADFORM_LOG_LEVEL").unwrap_or_else(|| "info".to_owned());

        let defaults = SiteConfig::default();
        let site = SiteConfig {
            name: var("LEADFORM_SITE_NAME")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.name),
            contact_email: var("LEADFORM_CONTACT_EMAIL").filter(|s| !s.trim().is_empty()),
        };

        Self {
            bind_addr,
            store,
            log_level,
            site,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> ServerConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]);
        assert_eq!(cfg.bind_addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(cfg.store, StoreConfig::Memory);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.site, SiteConfig::default());
    }

    #[test]
    fn bind_addr_beats_port() {
        let cfg = config(&[("PORT", "3000")]);
        assert_eq!(cfg.bind_addr, "0.0.0.0:3000".parse().unwrap());

        let cfg = config(&[("PORT", "3000"), ("LEADFORM_BIND_ADDR", "127.0.0.1:9000")]);
        assert_eq!(cfg.bind_addr, "127.0.0.1:9000".parse().unwrap());
    }

    #[test]
    fn firestore_store() {
        let cfg = config(&[
            ("LEADFORM_STORE", "Firestore"),
            ("FIRESTORE_PROJECT_ID", "automateiq"),
            ("FIRESTORE_API_KEY", "k"),
        ]);
        assert_eq!(
            cfg.store,
            StoreConfig::Firestore {
                project_id: "automateiq".to_owned(),
                api_key: "k".to_owned(),
                database: "(default)".to_owned(),
            }
        );
    }

    #[test]
    fn file_store_uses_path() {
        let cfg = config(&[("LEADFORM_STORE", "file"), ("LEADFORM_STORE_PATH", "/srv/leads")]);
        assert_eq!(
            cfg.store,
            StoreConfig::File {
                path: PathBuf::from("/srv/leads")
            }
        );
    }

    #[test]
    fn site_overrides() {
        let cfg = config(&[
            ("LEADFORM_SITE_NAME", "Acme Builds"),
            ("LEADFORM_CONTACT_EMAIL", "hello@acme.test"),
        ]);
        assert_eq!(cfg.site.name, "Acme Builds");
        assert_eq!(cfg.site.contact_email.as_deref(), Some("hello@acme.test"));
    }
}
