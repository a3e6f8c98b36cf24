use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "cardbook";
pub const CONFIG_FILE_NAME: &str = "cardbook.toml";
pub const CONFIG_ENV_VAR: &str = "CARDBOOK_CONFIG";

/// Loader options with defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct LoadOptions {
    pub parallelism: usize,             // address books loaded concurrently; 1 = sequential
    pub progress: bool,                 // show a per-address-book progress bar
    pub progress_label: Option<String>, // optional prefix for the progress bar label
    pub current_year: Option<i32>,      // None = read the local clock
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            parallelism: 1,
            progress: false,
            progress_label: None,
            current_year: None,
        }
    }
}

impl LoadOptions {
    pub fn with_parallelism(mut self, n: usize) -> Self {
        self.parallelism = n.max(1);
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_progress_label(mut self, label: impl Into<String>) -> Self {
        self.progress_label = Some(label.into());
        self
    }
    /// Pin the year used to anchor year-less birthdays.
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = Some(year);
        self
    }

    pub fn resolved_year(&self) -> i32 {
        self.current_year.unwrap_or_else(crate::date::current_year)
    }
}

/// Contents of `cardbook.toml`:
///
/// ```toml
/// [addressbook.personal]
/// path = "~/contacts/personal"
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default, rename = "addressbook")]
    pub address_books: BTreeMap<String, AddressBookConfig>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AddressBookConfig {
    #[serde(default)]
    pub path: String,
}

/// `~/.config/cardbook/cardbook.toml`
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
    Ok(home.join(".config").join(APP_NAME).join(CONFIG_FILE_NAME))
}

/// Expand a leading `~/` to the home directory. Other paths are returned unchanged.
pub fn expand_path(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/") {
        match dirs::home_dir() {
            Some(home) => return home.join(rest),
            None => tracing::warn!(path = raw, "Failed to get home directory for path expansion"),
        }
    }
    PathBuf::from(raw)
}

impl AppConfig {
    /// Read, parse and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        tracing::debug!(path = %path.display(), "Looking for config file");
        if !path.exists() {
            return Err(ConfigError::NotFound { path: path.to_path_buf() });
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let config = Self::from_toml_str(&text)?;

        tracing::debug!(addressbooks = config.address_books.len(), "Config loaded");
        for (name, ab) in &config.address_books {
            tracing::debug!(name = %name, path = %ab.path, "Address book");
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse without validating paths.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Every address book needs a non-empty path to a readable directory.
    /// All problems are reported together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.address_books.is_empty() {
            return Err(ConfigError::Validation {
                problems: vec![
                    "no address books configured; add at least one [addressbook.<name>] section".to_string(),
                ],
            });
        }

        let problems: Vec<String> = self
            .address_books
            .iter()
            .filter_map(|(name, ab)| validate_address_book(name, ab).err())
            .collect();

        if problems.is_empty() { Ok(()) } else { Err(ConfigError::Validation { problems }) }
    }

    /// Expanded paths in address-book name order.
    pub fn address_book_paths(&self) -> Vec<PathBuf> {
        self.address_books.values().map(|ab| expand_path(&ab.path)).collect()
    }
}

fn validate_address_book(name: &str, ab: &AddressBookConfig) -> Result<(), String> {
    if ab.path.trim().is_empty() {
        return Err(format!("address book '{name}': path cannot be empty"));
    }
    let expanded = expand_path(&ab.path);
    let meta = match fs::metadata(&expanded) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(format!(
                "address book '{name}': path does not exist: {} (expanded from: {})",
                expanded.display(),
                ab.path
            ));
        }
        Err(e) => return Err(format!("address book '{name}': cannot access path {}: {e}", expanded.display())),
    };
    if !meta.is_dir() {
        return Err(format!("address book '{name}': path must be a directory, got file: {}", expanded.display()));
    }
    if let Err(e) = fs::read_dir(&expanded) {
        return Err(format!("address book '{name}': directory is not readable: {} ({e})", expanded.display()));
    }
    Ok(())
}

impl ConfigError {
    /// Follow-up advice printed under the error by the binary.
    pub fn guidance(&self) -> String {
        match self {
            ConfigError::NotFound { path } => format!(
                "To get started, create a configuration file at:\n  {}\n\n\
                 Example configuration:\n  [addressbook.personal]\n  path = \"~/contacts/personal\"\n\n  \
                 [addressbook.work]\n  path = \"/path/to/work/contacts\"\n\n\
                 Make sure the contact directories exist and contain .vcf files.",
                path.display()
            ),
            ConfigError::Validation { .. } => "Troubleshooting tips:\n  \
                 - Ensure all addressbook paths exist\n  \
                 - Check that paths are directories, not files\n  \
                 - Verify you have read access to the directories\n  \
                 - Use absolute paths or ~ for home directory\n\n\
                 Use --debug for more detailed error information."
                .to_string(),
            ConfigError::Parse(_) => "The configuration file has invalid TOML syntax.\n\
                 Please check the file format and fix any syntax errors.\n\n\
                 Example of correct format:\n  [addressbook.name]\n  path = \"/path/to/contacts\""
                .to_string(),
            ConfigError::NoHomeDirectory | ConfigError::Read { .. } => {
                "Use --debug for more detailed error information.".to_string()
            }
        }
    }
}
