#[cfg(feature = "config")]
use core_config::{env_or_default, ConfigError, FromEnv};

/// Which object storage backend to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    /// Remote media service reached over HTTP.
    Remote,
    /// Local filesystem under a media root, served from a public base URL.
    Local,
}

/// Object storage configuration.
///
/// The remote backend needs `endpoint` and `api_key`; the local backend
/// needs `media_root` and `media_base_url`. Both sets are kept here so the
/// backend can be switched by configuration alone.
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub media_root: String,
    pub media_base_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Local,
            endpoint: None,
            api_key: None,
            media_root: "./media".to_string(),
            media_base_url: "http://localhost:8000/media".to_string(),
        }
    }
}

/// Load StorageConfig from environment variables.
///
/// - `STORAGE_BACKEND`: "remote" or "local" (default "local")
/// - `STORAGE_ENDPOINT`, `STORAGE_API_KEY`: required when remote
/// - `MEDIA_ROOT` (default "./media"), `MEDIA_BASE_URL`
///   (default "http://localhost:8000/media"): used when local
#[cfg(feature = "config")]
impl FromEnv for StorageConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let backend = match env_or_default("STORAGE_BACKEND", "local").to_ascii_lowercase().as_str()
        {
            "remote" => StorageBackend::Remote,
            "local" => StorageBackend::Local,
            other => {
                return Err(ConfigError::InvalidValue {
                    key: "STORAGE_BACKEND".to_string(),
                    details: format!("expected 'remote' or 'local', got '{}'", other),
                })
            }
        };

        let endpoint = std::env::var("STORAGE_ENDPOINT").ok();
        let api_key = std::env::var("STORAGE_API_KEY").ok();

        if backend == StorageBackend::Remote {
            if endpoint.is_none() {
                return Err(ConfigError::MissingEnvVar("STORAGE_ENDPOINT".to_string()));
            }
            if api_key.is_none() {
                return Err(ConfigError::MissingEnvVar("STORAGE_API_KEY".to_string()));
            }
        }

        Ok(Self {
            backend,
            endpoint,
            api_key,
            media_root: env_or_default("MEDIA_ROOT", "./media"),
            media_base_url: env_or_default("MEDIA_BASE_URL", "http://localhost:8000/media"),
        })
    }
}

#[cfg(all(test, feature = "config"))]
mod tests {
    use super::*;
    use core_config::FromEnv;

    #[test]
    fn defaults_to_local_backend() {
        temp_env::with_vars(
            [
                ("STORAGE_BACKEND", None::<&str>),
                ("MEDIA_ROOT", None),
                ("MEDIA_BASE_URL", None),
            ],
            || {
                let config = StorageConfig::from_env().unwrap();
                assert_eq!(config.backend, StorageBackend::Local);
                assert_eq!(config.media_root, "./media");
            },
        );
    }

    #[test]
    fn remote_backend_requires_endpoint_and_key() {
        temp_env::with_vars(
            [
                ("STORAGE_BACKEND", Some("remote")),
                ("STORAGE_ENDPOINT", None),
                ("STORAGE_API_KEY", None),
            ],
            || {
                let err = StorageConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("STORAGE_ENDPOINT"));
            },
        );

        temp_env::with_vars(
            [
                ("STORAGE_BACKEND", Some("remote")),
                ("STORAGE_ENDPOINT", Some("https://media.example.com")),
                ("STORAGE_API_KEY", Some("secret")),
            ],
            || {
                let config = StorageConfig::from_env().unwrap();
                assert_eq!(config.backend, StorageBackend::Remote);
                assert_eq!(config.endpoint.as_deref(), Some("https://media.example.com"));
            },
        );
    }

    #[test]
    fn unknown_backend_is_rejected() {
        temp_env::with_var("STORAGE_BACKEND", Some("ftp"), || {
            let err = StorageConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("STORAGE_BACKEND"));
        });
    }
}
