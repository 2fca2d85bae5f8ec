use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::explain::{ExpressiveMarkerRule, GenerationConfig, ResponseValidator};
use crate::core::llm::providers::{GROQ_BASE_URL, GROQ_DEFAULT_MODEL, OPENAI_BASE_URL};
use crate::core::llm::ProviderConfig;

/// Prefix for environment overrides, e.g. `EXPLAINTHIS_SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "EXPLAINTHIS_";

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("no API key configured for the {provider} provider")]
    #[diagnostic(
        code(explainthis::config::missing_credential),
        help("set GROQ_API_KEY or provider.api_key in the config file")
    )]
    MissingCredential { provider: String },

    #[error("config file not found: {0}")]
    #[diagnostic(code(explainthis::config::not_found))]
    NotFound(PathBuf),

    #[error("failed to load configuration")]
    #[diagnostic(code(explainthis::config::load))]
    Load(#[source] Box<figment::Error>),

    #[error("invalid configuration: {0}")]
    #[diagnostic(code(explainthis::config::invalid))]
    Invalid(String),
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub provider: ProviderSettings,
    pub generation: GenerationSettings,
    pub validator: ValidatorSettings,
    pub server: ServerSettings,
    pub repl: ReplSettings,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[default]
    Groq,
    OpenaiCompatible,
}

/// Completion endpoint and credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    pub api_key: Option<String>,
    pub model: String,
    /// Override the provider's default endpoint.
    pub base_url: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Groq,
            api_key: None,
            model: GROQ_DEFAULT_MODEL.to_string(),
            base_url: None,
            request_timeout_secs: 120,
        }
    }
}

/// Sampling parameters and retry policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.9,
            max_tokens: 2048,
            max_retries: 2,
            retry_delay_ms: 2000,
        }
    }
}

/// Expressive-marker heuristic for child-level responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorSettings {
    pub expressive_min_count: usize,
    /// Exclusive code-point bounds.
    pub expressive_range: (u32, u32),
}

impl Default for ValidatorSettings {
    fn default() -> Self {
        let rule = ExpressiveMarkerRule::default();
        Self {
            expressive_min_count: rule.min_count,
            expressive_range: (rule.lower_exclusive, rule.upper_exclusive),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplSettings {
    /// Run the validator on REPL requests.
    pub validate: bool,
}

impl AppConfig {
    /// Load defaults, then the config file, then the environment.
    ///
    /// An explicit `path` must exist. Without one, the default location
    /// under the user config dir is used only if present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_config_path().filter(|p| p.exists()),
        };

        let config: AppConfig = Self::figment(file.as_deref())
            .extract()
            .map_err(|e| ConfigError::Load(Box::new(e)))?;
        config.check()?;

        match &file {
            Some(path) => log::info!("Loaded config from {}", path.display()),
            None => log::debug!("No config file found, using defaults and environment"),
        }
        Ok(config)
    }

    /// The layered figment without any existence checks.
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(
                Env::raw()
                    .only(&["GROQ_API_KEY"])
                    .map(|_| "provider.api_key".into()),
            )
            .merge(
                Env::raw()
                    .only(&["GROQ_MODEL"])
                    .map(|_| "provider.model".into()),
            )
    }

    /// `~/.config/explainthis/config.toml` on Linux.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("explainthis").join("config.toml"))
    }

    fn check(&self) -> Result<(), ConfigError> {
        let (lower, upper) = self.validator.expressive_range;
        if lower >= upper {
            return Err(ConfigError::Invalid(format!(
                "validator.expressive_range must be increasing, got ({lower}, {upper})"
            )));
        }
        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return Err(ConfigError::Invalid(format!(
                "generation.temperature must be within 0.0-2.0, got {}",
                self.generation.temperature
            )));
        }
        if !(0.0..=1.0).contains(&self.generation.top_p) {
            return Err(ConfigError::Invalid(format!(
                "generation.top_p must be within 0.0-1.0, got {}",
                self.generation.top_p
            )));
        }
        Ok(())
    }

    /// The credential, or `MissingCredential` if unset or blank.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        match self.provider.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(ConfigError::MissingCredential {
                provider: match self.provider.kind {
                    ProviderKind::Groq => "groq".to_string(),
                    ProviderKind::OpenaiCompatible => "openai_compatible".to_string(),
                },
            }),
        }
    }

    pub fn provider_config(&self) -> Result<ProviderConfig, ConfigError> {
        let api_key = self.require_api_key()?.to_string();
        let model = self.provider.model.clone();
        let timeout = Duration::from_secs(self.provider.request_timeout_secs);

        Ok(match self.provider.kind {
            ProviderKind::Groq => ProviderConfig::Groq {
                api_key,
                model,
                base_url: self.provider.base_url.clone(),
                timeout,
            },
            ProviderKind::OpenaiCompatible => ProviderConfig::OpenAICompatible {
                api_key,
                model,
                base_url: self
                    .provider
                    .base_url
                    .clone()
                    .unwrap_or_else(|| OPENAI_BASE_URL.to_string()),
                timeout,
            },
        })
    }

    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            temperature: self.generation.temperature,
            top_p: self.generation.top_p,
            max_tokens: self.generation.max_tokens,
            max_retries: self.generation.max_retries,
            retry_delay: Duration::from_millis(self.generation.retry_delay_ms),
        }
    }

    pub fn validator(&self) -> ResponseValidator {
        let (lower, upper) = self.validator.expressive_range;
        ResponseValidator::new().with_expressive_rule(ExpressiveMarkerRule {
            min_count: self.validator.expressive_min_count,
            lower_exclusive: lower,
            upper_exclusive: upper,
        })
    }

    /// Endpoint the configured provider will call.
    pub fn effective_base_url(&self) -> &str {
        match (&self.provider.base_url, self.provider.kind) {
            (Some(url), _) => url,
            (None, ProviderKind::Groq) => GROQ_BASE_URL,
            (None, ProviderKind::OpenaiCompatible) => OPENAI_BASE_URL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.provider.kind, ProviderKind::Groq);
        assert_eq!(config.provider.model, "llama-3.3-70b-versatile");
        assert_eq!(config.provider.request_timeout_secs, 120);
        assert_eq!(config.generation.max_retries, 2);
        assert_eq!(config.generation.retry_delay_ms, 2000);
        assert_eq!(config.validator.expressive_min_count, 8);
        assert_eq!(config.validator.expressive_range, (127, 128512));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert!(!config.repl.validate);
    }

    #[test]
    fn test_generation_config_matches_core_defaults() {
        assert_eq!(
            AppConfig::default().generation_config(),
            GenerationConfig::default()
        );
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = AppConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_file_then_env_layering() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file(
                "config.toml",
                r#"
                [provider]
                api_key = "from-file"
                model = "llama-3.1-8b-instant"

                [server]
                port = 8080

                [generation]
                max_retries = 4
                "#,
            )?;
            jail.set_env("EXPLAINTHIS_SERVER__PORT", "9090");
            jail.set_env("EXPLAINTHIS_REPL__VALIDATE", "true");

            let config = AppConfig::load(Some(Path::new("config.toml")))
                .map_err(|e| e.to_string())?;

            assert_eq!(config.provider.api_key.as_deref(), Some("from-file"));
            assert_eq!(config.provider.model, "llama-3.1-8b-instant");
            assert_eq!(config.server.port, 9090);
            assert_eq!(config.generation.max_retries, 4);
            assert_eq!(config.generation.top_p, 0.9);
            assert!(config.repl.validate);
            Ok(())
        });
    }

    #[test]
    fn test_groq_env_overrides_file_credential() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file("config.toml", "[provider]\napi_key = \"from-file\"\n")?;
            jail.set_env("GROQ_API_KEY", "gsk_env");
            jail.set_env("GROQ_MODEL", "mixtral-8x7b-32768");

            let config = AppConfig::load(Some(Path::new("config.toml")))
                .map_err(|e| e.to_string())?;

            assert_eq!(config.require_api_key().map_err(|e| e.to_string())?, "gsk_env");
            assert_eq!(config.provider.model, "mixtral-8x7b-32768");
            Ok(())
        });
    }

    #[test]
    fn test_figment_reads_file_outside_jail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("explainthis.toml");
        std::fs::write(
            &path,
            "[validator]\nexpressive_min_count = 3\n\n[provider]\nkind = \"openai_compatible\"\n",
        )
        .unwrap();

        let config: AppConfig = AppConfig::figment(Some(&path)).extract().unwrap();

        assert_eq!(config.validator.expressive_min_count, 3);
        assert_eq!(config.provider.kind, ProviderKind::OpenaiCompatible);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        Jail::expect_with(|_jail| {
            let err = AppConfig::load(Some(Path::new("absent.toml"))).unwrap_err();
            assert!(matches!(err, ConfigError::NotFound(_)));
            Ok(())
        });
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file("config.toml", "[server]\nport = \"not a number\"\n")?;
            let err = AppConfig::load(Some(Path::new("config.toml"))).unwrap_err();
            assert!(matches!(err, ConfigError::Load(_)));
            Ok(())
        });
    }

    #[test]
    fn test_inverted_expressive_range_is_rejected() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file(
                "config.toml",
                "[validator]\nexpressive_range = [500, 100]\n",
            )?;
            let err = AppConfig::load(Some(Path::new("config.toml"))).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)));
            Ok(())
        });
    }

    #[test]
    fn test_blank_credential_is_missing() {
        let mut config = AppConfig::default();
        assert!(matches!(
            config.require_api_key(),
            Err(ConfigError::MissingCredential { .. })
        ));

        config.provider.api_key = Some("   ".to_string());
        assert!(config.provider_config().is_err());

        config.provider.api_key = Some("gsk_test".to_string());
        let provider = config.provider_config().unwrap();
        assert_eq!(provider.provider_id(), "groq");
        assert_eq!(provider.model_name(), "llama-3.3-70b-versatile");
    }

    #[test]
    fn test_openai_compatible_defaults_base_url() {
        let mut config = AppConfig::default();
        config.provider.kind = ProviderKind::OpenaiCompatible;
        config.provider.api_key = Some("sk-test".to_string());
        config.provider.model = "gpt-4o-mini".to_string();

        match config.provider_config().unwrap() {
            ProviderConfig::OpenAICompatible { base_url, .. } => {
                assert_eq!(base_url, OPENAI_BASE_URL)
            }
            other => panic!("unexpected provider config: {other:?}"),
        }
        assert_eq!(config.effective_base_url(), OPENAI_BASE_URL);
    }

    #[test]
    fn test_validator_uses_configured_rule() {
        let mut config = AppConfig::default();
        config.validator.expressive_min_count = 3;
        config.validator.expressive_range = (1000, 2000);

        let validator = config.validator();
        let rule = validator.expressive_rule();
        assert_eq!(rule.min_count, 3);
        assert_eq!(rule.lower_exclusive, 1000);
        assert_eq!(rule.upper_exclusive, 2000);
    }
}
