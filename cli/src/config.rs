use anyhow::{bail, ensure};
use chrono::{DateTime, Local};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use shared_types::{LoginRequest, RegisterStudentRequest};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://projetodepersistenciatp3.onrender.com";
pub const DEFAULT_API_PREFIX: &str = "/api/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_PREFIX: &str = "ROTAFACIL";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SmokeConfig {
    pub base_url: String,
    pub api_prefix: String,
    pub timeout_secs: u64,
    pub login: LoginConfig,
    pub student: StudentConfig,
}

/// Pre-existing account used when registration does not yield a token
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoginConfig {
    pub email: String,
    pub password: String,
}

/// Fixed parts of the student registered on every run
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StudentConfig {
    pub full_name: String,
    pub password: String,
    pub phone: String,
    pub enrollment_prefix: String,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            login: LoginConfig {
                email: "teste@exemplo.com".to_string(),
                password: "123456".to_string(),
            },
            student: StudentConfig {
                full_name: "Aluno Teste".to_string(),
                password: "123456".to_string(),
                phone: "11999999999".to_string(),
                enrollment_prefix: "2024".to_string(),
            },
        }
    }
}

impl SmokeConfig {
    /// Load defaults, then the config file, then `ROTAFACIL_*` variables.
    ///
    /// An explicit `path` must exist. Without one, the per-user file is
    /// read only if present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(Some(path), None),
            None => {
                let discovered = get_config_path().filter(|p| p.exists());
                if let Some(ref p) = discovered {
                    debug!("Using config file at {}", p.display());
                }
                Self::load_from(discovered.as_deref(), None)
            }
        }
    }

    /// Same layering as [`SmokeConfig::load`], with an explicit environment
    /// map instead of the process environment when `env` is given.
    pub fn load_from(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let defaults = SmokeConfig::default();

        let mut builder = Config::builder()
            .set_default("base_url", defaults.base_url)?
            .set_default("api_prefix", defaults.api_prefix)?
            .set_default("timeout_secs", defaults.timeout_secs as i64)?
            .set_default("login.email", defaults.login.email)?
            .set_default("login.password", defaults.login.password)?
            .set_default("student.full_name", defaults.student.full_name)?
            .set_default("student.password", defaults.student.password)?
            .set_default("student.phone", defaults.student.phone)?
            .set_default("student.enrollment_prefix", defaults.student.enrollment_prefix)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let mut config: SmokeConfig = builder.build()?.try_deserialize()?;
        config.normalize();
        config
            .validate()
            .map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(config)
    }

    /// Strip trailing slashes from the base URL and force a single leading
    /// slash on the API prefix.
    pub fn normalize(&mut self) {
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();

        let prefix = self.api_prefix.trim().trim_matches('/');
        self.api_prefix = if prefix.is_empty() {
            String::new()
        } else {
            format!("/{prefix}")
        };
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            bail!(
                "base_url must start with http:// or https://, got '{}'",
                self.base_url
            );
        }
        ensure!(self.timeout_secs > 0, "timeout_secs must be greater than zero");
        ensure!(!self.login.email.is_empty(), "login.email must not be empty");
        Ok(())
    }

    pub fn login_request(&self) -> LoginRequest {
        LoginRequest::new(&self.login.email, &self.login.password)
    }
}

impl StudentConfig {
    /// Build a registration payload whose email and enrollment id are unique
    /// to the second `now` falls in.
    pub fn payload_at(&self, now: DateTime<Local>) -> RegisterStudentRequest {
        let stamp = now.format("%Y%m%d%H%M%S").to_string();

        RegisterStudentRequest {
            nome_completo: self.full_name.clone(),
            email: format!("aluno.teste.{stamp}@exemplo.com"),
            senha: self.password.clone(),
            matricula: format!("{}{stamp}", self.enrollment_prefix),
            telefone: self.phone.clone(),
        }
    }
}

fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rotafacil/smoke.toml"))
}
