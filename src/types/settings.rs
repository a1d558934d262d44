use std::fmt;

use serde::{Deserialize, Serialize};

/// Parameters used to open a session.
///
/// Empty strings ask the driver to use its own default for that field.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    pub host: String,
    pub port: String,
    pub options: String,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: "5432".to_string(),
            options: String::new(),
            database: String::new(),
            user: String::new(),
            password: String::new(),
        }
    }
}

impl ConnectionSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds settings from the `PG*` environment variables, keeping defaults for unset ones.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();
        let fields: [(&str, &mut String); 6] = [
            ("PGHOST", &mut settings.host),
            ("PGPORT", &mut settings.port),
            ("PGOPTIONS", &mut settings.options),
            ("PGDATABASE", &mut settings.database),
            ("PGUSER", &mut settings.user),
            ("PGPASSWORD", &mut settings.password),
        ];
        for (key, field) in fields {
            if let Some(value) = lookup(key) {
                *field = value;
            }
        }
        settings
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn port(mut self, port: impl ToString) -> Self {
        self.port = port.to_string();
        self
    }

    pub fn options(mut self, options: impl Into<String>) -> Self {
        self.options = options.into();
        self
    }

    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }
}

impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("options", &self.options)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}
