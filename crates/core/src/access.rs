//! Static API-key access control.
//!
//! The club hands out a short list of API keys, each bound to a role. The
//! list is parsed once at startup into an [`ApiKeyRegistry`] and shared
//! read-only by every request. Read endpoints accept any known key, write
//! endpoints require the `admin` role.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Keys used when `API_KEYS` is not configured (local development only).
pub const DEFAULT_API_KEYS: &str = "admin_secret_key_123:admin,user_readonly_key_456:user";

/// Role bound to an API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::User => ROLE_USER,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_USER => Ok(Role::User),
            other => Err(CoreError::Validation(format!(
                "Unknown role '{other}'. Valid roles: {ROLE_ADMIN}, {ROLE_USER}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Access levels and denials
// ---------------------------------------------------------------------------

/// Privilege an endpoint requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    Read,
    Write,
}

/// Why a request was turned away at the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    #[error("API-ключ не предоставлен")]
    MissingKey,

    #[error("Неверный API-ключ")]
    InvalidKey,

    #[error("Отказано в доступе. Требуются права администратора")]
    AdminRequired,
}

impl AccessDenied {
    /// Stable machine-readable rejection code.
    pub fn code(self) -> &'static str {
        match self {
            AccessDenied::MissingKey => "forbidden: no key",
            AccessDenied::InvalidKey => "forbidden: invalid key",
            AccessDenied::AdminRequired => "forbidden: admin required",
        }
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Read-only lookup table of API keys and their roles.
#[derive(Clone, Default)]
pub struct ApiKeyRegistry {
    keys: HashMap<String, Role>,
}

impl ApiKeyRegistry {
    pub fn new(entries: impl IntoIterator<Item = (String, Role)>) -> Self {
        Self {
            keys: entries.into_iter().collect(),
        }
    }

    /// Parse a comma-separated list of `key:role` pairs.
    ///
    /// Whitespace around entries is ignored, empty entries are skipped.
    /// Malformed pairs, unknown roles and duplicate keys are rejected.
    pub fn parse(spec: &str) -> Result<Self, CoreError> {
        let mut keys = HashMap::new();

        for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (key, role) = entry.rsplit_once(':').ok_or_else(|| {
                CoreError::Validation(format!("API key entry '{entry}' must be key:role"))
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(CoreError::Validation("API key must not be empty".into()));
            }
            let role: Role = role.trim().parse()?;
            if keys.insert(key.to_string(), role).is_some() {
                return Err(CoreError::Validation(
                    "API key listed more than once".into(),
                ));
            }
        }

        Ok(Self { keys })
    }

    pub fn role_of(&self, key: &str) -> Option<Role> {
        self.keys.get(key).copied()
    }

    pub fn is_valid_key(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    pub fn is_admin(&self, key: &str) -> bool {
        self.role_of(key) == Some(Role::Admin)
    }

    /// Check a client-supplied key against the required access level.
    ///
    /// An empty key counts as missing.
    pub fn authorize(&self, key: Option<&str>, level: AccessLevel) -> Result<Role, AccessDenied> {
        let key = key.filter(|k| !k.is_empty()).ok_or(AccessDenied::MissingKey)?;
        let role = self.role_of(key).ok_or(AccessDenied::InvalidKey)?;
        if level == AccessLevel::Write && role != Role::Admin {
            return Err(AccessDenied::AdminRequired);
        }
        Ok(role)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

// Keys are secrets; never print them.
impl fmt::Debug for ApiKeyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyRegistry")
            .field("keys", &self.keys.len())
            .finish()
    }
}
