//! Configuração do review-notifier carregada a partir de `review-notifier.toml`.
//!
//! A struct [`NotifierConfig`] contém todos os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! As variáveis de ambiente `TOKEN_YP`, `TOKEN_TG` e `TOKEN_ID` têm
//! precedência sobre o arquivo.

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;
use crate::notifier::TELEGRAM_API_URL;
use crate::practicum::client::ENDPOINT;

/// Arquivo de configuração procurado no diretório atual.
pub const CONFIG_FILE: &str = "review-notifier.toml";

/// Token da API do Practicum.
pub const ENV_API_TOKEN: &str = "TOKEN_YP";
/// Token do bot do Telegram.
pub const ENV_BOT_TOKEN: &str = "TOKEN_TG";
/// Chat que recebe as notificações.
pub const ENV_CHAT_ID: &str = "TOKEN_ID";

/// As três credenciais exigidas antes de o loop começar.
#[derive(Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub api_token: String,
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub chat_id: String,
}

impl Credentials {
    /// Verdadeiro se todas as credenciais estão presentes e não vazias.
    pub fn check(&self) -> bool {
        self.missing().is_empty()
    }

    /// Nomes das variáveis de ambiente cujas credenciais estão ausentes.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (ENV_API_TOKEN, &self.api_token),
            (ENV_BOT_TOKEN, &self.bot_token),
            (ENV_CHAT_ID, &self.chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Converte [`check`](Self::check) em erro fatal de configuração.
    pub fn require(&self) -> Result<(), ConfigError> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingCredentials(missing))
        }
    }
}

// Tokens nunca aparecem em logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(s: &str) -> &'static str {
            if s.is_empty() { "<missing>" } else { "<redacted>" }
        }
        f.debug_struct("Credentials")
            .field("api_token", &redact(&self.api_token))
            .field("bot_token", &redact(&self.bot_token))
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

/// Configuração de nível superior carregada de `review-notifier.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct NotifierConfig {
    /// Credenciais; o arquivo pode omiti-las e deixá-las para o ambiente.
    #[serde(flatten)]
    pub credentials: Credentials,

    /// URL do endpoint de status de homeworks.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// URL base da Bot API do Telegram.
    #[serde(default = "default_telegram_api_url")]
    pub telegram_api_url: String,

    /// Intervalo fixo entre ciclos, em segundos.
    #[serde(default = "default_retry_interval_secs")]
    pub retry_interval_secs: u64,

    /// Timeout de cada requisição HTTP, em segundos.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_endpoint() -> String {
    ENDPOINT.to_string()
}

fn default_telegram_api_url() -> String {
    TELEGRAM_API_URL.to_string()
}

// Valor padrão para o intervalo entre ciclos: 10 minutos.
fn default_retry_interval_secs() -> u64 {
    600
}

// Valor padrão para o timeout de requisição: 30s.
fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            endpoint: default_endpoint(),
            telegram_api_url: default_telegram_api_url(),
            retry_interval_secs: default_retry_interval_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl NotifierConfig {
    /// Carrega a configuração de `review-notifier.toml` no diretório atual.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Carrega a configuração do caminho dado, usando defaults se o arquivo
    /// não existir, e aplica as variáveis de ambiente por cima.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.display().to_string(),
                source,
            })?;
            toml::from_str::<NotifierConfig>(&contents)?
        } else {
            Self::default()
        };

        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Rejeita intervalos nulos: o loop não pode girar sem espera.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retry_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "retry_interval_secs",
                reason: "must be at least 1 second",
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_secs",
                reason: "must be at least 1 second",
            });
        }
        Ok(())
    }

    /// Sobrescreve as credenciais com os valores não brancos de `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let creds = &mut self.credentials;
        for (name, slot) in [
            (ENV_API_TOKEN, &mut creds.api_token),
            (ENV_BOT_TOKEN, &mut creds.bot_token),
            (ENV_CHAT_ID, &mut creds.chat_id),
        ] {
            if let Some(value) = lookup(name)
                && !value.trim().is_empty()
            {
                *slot = value;
            }
        }
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn full_credentials() -> Credentials {
        Credentials {
            api_token: "yp".into(),
            bot_token: "tg".into(),
            chat_id: "42".into(),
        }
    }

    #[test]
    fn default_config_values() {
        let config = NotifierConfig::default();
        assert_eq!(config.endpoint, ENDPOINT);
        assert_eq!(config.telegram_api_url, TELEGRAM_API_URL);
        assert_eq!(config.retry_interval(), Duration::from_secs(600));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(!config.credentials.check());
    }

    #[test]
    fn check_requires_all_three_credentials() {
        assert!(full_credentials().check());

        let mut c = full_credentials();
        c.api_token.clear();
        assert!(!c.check());
        assert_eq!(c.missing(), vec![ENV_API_TOKEN]);

        let mut c = full_credentials();
        c.bot_token = "   ".into();
        assert!(!c.check());
        assert_eq!(c.missing(), vec![ENV_BOT_TOKEN]);

        let mut c = full_credentials();
        c.chat_id.clear();
        assert!(!c.check());
        assert!(matches!(
            c.require(),
            Err(ConfigError::MissingCredentials(names)) if names == vec![ENV_CHAT_ID]
        ));
    }

    #[test]
    fn debug_redacts_tokens() {
        let out = format!("{:?}", full_credentials());
        assert!(!out.contains("yp"));
        assert!(!out.contains("\"tg\""));
        assert!(out.contains("<redacted>"));
    }

    #[test]
    fn deserialize_partial_toml() {
        let toml_str = r#"
            api_token = "yp-file"
            retry_interval_secs = 60
        "#;
        let config: NotifierConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.credentials.api_token, "yp-file");
        assert!(config.credentials.bot_token.is_empty());
        assert_eq!(config.retry_interval_secs, 60);
        assert_eq!(config.endpoint, ENDPOINT);
    }

    #[test]
    fn env_overrides_file_credentials() {
        let mut config: NotifierConfig = toml::from_str(
            r#"
            api_token = "from-file"
            chat_id = "1"
        "#,
        )
        .unwrap();
        config.apply_env(|name| match name {
            ENV_API_TOKEN => Some("from-env".into()),
            ENV_BOT_TOKEN => Some("tg".into()),
            ENV_CHAT_ID => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.credentials.api_token, "from-env");
        assert_eq!(config.credentials.bot_token, "tg");
        // Empty env values do not clobber the file.
        assert_eq!(config.credentials.chat_id, "1");
    }

    #[test]
    fn blank_env_value_keeps_file_credential() {
        let mut config: NotifierConfig = toml::from_str(
            r#"
            api_token = "yp"
            bot_token = "tg"
            chat_id = "42"
        "#,
        )
        .unwrap();
        config.apply_env(|name| match name {
            ENV_BOT_TOKEN => Some("   ".into()),
            ENV_CHAT_ID => Some("\t\n".into()),
            _ => None,
        });
        assert_eq!(config.credentials.bot_token, "tg");
        assert_eq!(config.credentials.chat_id, "42");
        assert!(config.credentials.check());
    }

    #[test]
    fn load_from_rejects_zero_retry_interval() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "retry_interval_secs = 0").unwrap();
        let err = NotifierConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "retry_interval_secs",
                ..
            }
        ));
    }

    #[test]
    fn validate_rejects_zero_request_timeout() {
        let config = NotifierConfig {
            request_timeout_secs: 0,
            ..NotifierConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "request_timeout_secs",
                ..
            })
        ));
        assert!(NotifierConfig::default().validate().is_ok());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "endpoint = \"http://localhost:9/api/\"\nrequest_timeout_secs = 5"
        )
        .unwrap();
        let config = NotifierConfig::load_from(file.path()).unwrap();
        assert_eq!(config.endpoint, "http://localhost:9/api/");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.retry_interval_secs, 600);
    }

    #[test]
    fn load_from_malformed_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "retry_interval_secs = \"soon\"").unwrap();
        let err = NotifierConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn load_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = NotifierConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.retry_interval_secs, 600);
    }
}
