use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use logging::init_logging;
pub use settings::{Config, LoggingSettings, StorageMode, StorageSettings};

/// Loads the application configuration from `config.toml` in the working directory.
///
/// The file is optional. Any key can be overridden from the environment with the
/// `TRADELOG__` prefix, e.g. `TRADELOG__STORAGE__LOCAL_PATH=/tmp/journal.json`.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(Path::new("config.toml"))
}

/// Same as [`load_config`], reading the file at `path` instead.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("TRADELOG")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let mut config = builder.try_deserialize::<Config>()?;

    if config.storage.database_url.is_none() {
        config.storage.database_url = std::env::var("DATABASE_URL").ok();
    }

    config.validate()?;
    Ok(config)
}
