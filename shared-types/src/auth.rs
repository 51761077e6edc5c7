use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{lenient::or_none, NOT_AVAILABLE};

// ============ Requests ============

/// Login request body for `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub senha: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, senha: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            senha: senha.into(),
        }
    }
}

/// Student registration body for `POST /auth/register/aluno`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterStudentRequest {
    pub nome_completo: String,
    pub email: String,
    pub senha: String,
    pub matricula: String,
    pub telefone: String,
}

// ============ Responses ============

/// Response of both the login and the registration endpoints.
///
/// Every field is optional: a 200 without `access_token` is still a
/// successful call, it just does not yield a session. Fields of the wrong
/// type are read as missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default, deserialize_with = "or_none")]
    pub access_token: Option<String>,
    #[serde(default, deserialize_with = "or_none")]
    pub user_info: Option<UserInfo>,
}

impl AuthResponse {
    pub fn session_token(&self) -> Option<SessionToken> {
        self.access_token.as_deref().and_then(SessionToken::new)
    }

    pub fn user_id(&self) -> String {
        self.user_info
            .as_ref()
            .and_then(|user| user.id.as_ref())
            .map(|id| id.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    pub fn user_name(&self) -> &str {
        self.user_info
            .as_ref()
            .map(UserInfo::display_name)
            .unwrap_or(NOT_AVAILABLE)
    }
}

/// User information, embedded in auth responses and returned by `GET /auth/me`.
///
/// Only the fields the checks print are modeled; the rest of the object
/// (`email`, `tipo`, `telefone`, `matricula`, ...) is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default, deserialize_with = "or_none")]
    pub id: Option<UserId>,
    #[serde(default, deserialize_with = "or_none")]
    pub nome: Option<String>,
}

impl UserInfo {
    pub fn display_name(&self) -> &str {
        self.nome.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

/// User ids come back as numbers from some deployments and as strings from others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Numeric(i64),
    Text(String),
    Other(serde_json::Value),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Numeric(id) => write!(f, "{id}"),
            UserId::Text(id) => f.write_str(id),
            UserId::Other(value) => write!(f, "{value}"),
        }
    }
}

// ============ Session ============

/// Bearer token issued by a successful register or login call.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Returns `None` for an empty or blank token.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First `len` characters of the token, for console previews.
    pub fn prefix(&self, len: usize) -> String {
        self.0.chars().take(len).collect()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken(<{} chars>)", self.0.chars().count())
    }
}
