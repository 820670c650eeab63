use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::errors::{AppError, AppResult};

/// Application configuration: database location plus the shift policy the
/// clock engine accounts against. Stored as YAML in the user config dir.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// IANA timezone used by the sweep and as the request default.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Official shift start (HH:MM local).
    #[serde(default = "default_shift_start")]
    pub shift_start: String,
    /// Official shift end (HH:MM local).
    #[serde(default = "default_shift_end")]
    pub shift_end: String,
    #[serde(default = "default_lunch_start")]
    pub lunch_start: String,
    #[serde(default = "default_lunch_end")]
    pub lunch_end: String,
    /// Clock-ins within this many minutes of the official start snap to it.
    #[serde(default = "default_grace_minutes")]
    pub grace_minutes: i64,
}

fn default_timezone() -> String {
    "Africa/Johannesburg".to_string()
}
fn default_shift_start() -> String {
    "07:30".to_string()
}
fn default_shift_end() -> String {
    "17:30".to_string()
}
fn default_lunch_start() -> String {
    "12:00".to_string()
}
fn default_lunch_end() -> String {
    "13:00".to_string()
}
fn default_grace_minutes() -> i64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            timezone: default_timezone(),
            shift_start: default_shift_start(),
            shift_end: default_shift_end(),
            lunch_start: default_lunch_start(),
            lunch_end: default_lunch_end(),
            grace_minutes: default_grace_minutes(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("vinetally")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".vinetally")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("vinetally.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("vinetally.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_yaml::from_str(&content)
                .map_err(|e| AppError::Config(format!("Failed to parse {}: {}", path.display(), e)))
        } else {
            Ok(Config::default())
        }
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> io::Result<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = if let Some(name) = custom_db {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| io::Error::other(e.to_string()))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("Database:    {:?}", db_path);

        Ok(())
    }
}
