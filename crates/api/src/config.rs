use std::path::PathBuf;

/// Where the builder store keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceBackend {
    /// PostgreSQL at `DATABASE_URL`.
    Postgres { database_url: String },
    /// A single JSON document at `DATA_FILE`.
    File { path: PathBuf },
    /// Process memory; nothing survives a restart.
    Memory,
}

impl PersistenceBackend {
    /// Value of `PERSISTENCE_BACKEND` that selects this backend.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Postgres { .. } => "postgres",
            Self::File { .. } => "file",
            Self::Memory => "memory",
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub persistence: PersistenceBackend,
    /// Optional CSS file used instead of the embedded export stylesheet.
    pub export_stylesheet: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `PERSISTENCE_BACKEND`  | `postgres`                 |
    /// | `DATABASE_URL`         | required for `postgres`    |
    /// | `DATA_FILE`            | `wirekit-data.json`        |
    /// | `EXPORT_STYLESHEET`    | unset (embedded CSS)       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let backend = std::env::var("PERSISTENCE_BACKEND").unwrap_or_else(|_| "postgres".into());
        let persistence = match backend.trim().to_lowercase().as_str() {
            "postgres" => PersistenceBackend::Postgres {
                database_url: std::env::var("DATABASE_URL")
                    .expect("DATABASE_URL must be set when PERSISTENCE_BACKEND=postgres"),
            },
            "file" => PersistenceBackend::File {
                path: std::env::var("DATA_FILE")
                    .unwrap_or_else(|_| "wirekit-data.json".into())
                    .into(),
            },
            "memory" => PersistenceBackend::Memory,
            other => panic!("PERSISTENCE_BACKEND must be postgres, file or memory, got '{other}'"),
        };

        let export_stylesheet = std::env::var("EXPORT_STYLESHEET")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            persistence,
            export_stylesheet,
        }
    }
}
