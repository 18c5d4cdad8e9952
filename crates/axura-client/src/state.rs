//! Everything a console command needs: configuration, the local key/value
//! database and a handle on the mock API.

use axura_store::Database;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::session::SessionGate;
use crate::source::HttpUserSource;

pub struct AppState {
    pub config: ClientConfig,

    /// Local SQLite store holding the session flag and settings.
    pub database: Database,

    pub source: HttpUserSource,
}

impl AppState {
    /// Open the database in the configured data directory (or the platform
    /// default) and point the HTTP source at the configured API.
    pub fn open(config: ClientConfig) -> Result<Self> {
        let database = match config.data_dir.as_deref() {
            Some(dir) => Database::open_in_dir(dir)?,
            None => Database::new()?,
        };
        let source = HttpUserSource::new(config.api_url.clone());

        Ok(Self {
            config,
            database,
            source,
        })
    }

    pub fn session(&self) -> SessionGate<&Database> {
        SessionGate::new(&self.database, self.config.credentials.clone())
    }
}
