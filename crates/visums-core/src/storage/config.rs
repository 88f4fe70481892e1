use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use crate::kernel::constants;
use crate::kernel::error::{Error, Result};
use crate::storage::StorageProvider;
use crate::storage::env_file::{self, EnvMap};
use crate::storage::error::StorageSystemError;
use crate::storage::local::LocalStorageProvider;

/// Supported formats for dumping the configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFormat {
    /// JSON format
    Json,
    /// YAML format - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Name of this format as accepted by [`FromStr`]
    pub fn name(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    fn render(&self, values: &BTreeMap<String, String>) -> Result<String> {
        let rendered = match self {
            ConfigFormat::Json => serde_json::to_string_pretty(values).map_err(boxed),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::to_string(values).map_err(boxed),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::to_string_pretty(values).map_err(boxed),
        };
        rendered.map_err(|source| {
            StorageSystemError::SerializationError {
                format: self.name().to_string(),
                source,
            }
            .into()
        })
    }
}

fn boxed<E: std::error::Error + Send + Sync + 'static>(
    e: E,
) -> Box<dyn std::error::Error + Send + Sync + 'static> {
    Box::new(e)
}

impl FromStr for ConfigFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ConfigFormat::Json),
            #[cfg(feature = "yaml-config")]
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            #[cfg(feature = "toml-config")]
            "toml" => Ok(ConfigFormat::Toml),
            other => Err(StorageSystemError::UnsupportedConfigFormat(other.to_string()).into()),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Key/value settings loaded lazily from a base env file and a local override file.
///
/// The files are read on the first access that needs them (`get_value`,
/// `datas`), base first, so the local override wins on shared keys. A missing
/// base file is an error; a missing local override file means "no overrides".
///
/// Values assigned with [`ConfigStore::set_value`] are kept apart from the
/// file values and always take precedence over them, including across
/// [`ConfigStore::reload`].
///
/// The store is meant for single-threaded use and is not `Sync`.
#[derive(Debug)]
pub struct ConfigStore {
    /// Storage provider env files are read through
    provider: Arc<dyn StorageProvider>,
    /// Base settings file
    base_file: PathBuf,
    /// Higher-precedence local override file
    local_file: PathBuf,
    /// Values read from the env files
    file_values: RefCell<EnvMap>,
    /// Values assigned explicitly at runtime
    overrides: RefCell<EnvMap>,
    loaded: Cell<bool>,
}

impl ConfigStore {
    /// Store over `.env` and `.env.local` in the current directory
    pub fn new() -> Self {
        Self::with_files(constants::BASE_ENV_FILE, constants::LOCAL_ENV_FILE)
    }

    /// Store over explicitly named base and local override files
    pub fn with_files(base_file: impl Into<PathBuf>, local_file: impl Into<PathBuf>) -> Self {
        Self::with_provider(
            Arc::new(LocalStorageProvider::current_dir()),
            base_file,
            local_file,
        )
    }

    /// Store reading its files through a specific storage provider
    pub fn with_provider(
        provider: Arc<dyn StorageProvider>,
        base_file: impl Into<PathBuf>,
        local_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            provider,
            base_file: base_file.into(),
            local_file: local_file.into(),
            file_values: RefCell::new(HashMap::new()),
            overrides: RefCell::new(HashMap::new()),
            loaded: Cell::new(false),
        }
    }

    /// Get the base file path
    pub fn base_file(&self) -> &Path {
        &self.base_file
    }

    /// Get the local override file path
    pub fn local_file(&self) -> &Path {
        &self.local_file
    }

    /// Whether the env files have been read
    pub fn is_loaded(&self) -> bool {
        self.loaded.get()
    }

    /// Get a setting, loading the env files first if needed.
    ///
    /// An unknown key is `Ok(None)`; only a failed file load is an error.
    pub fn get_value(&self, name: &str) -> Result<Option<String>> {
        self.ensure_loaded()?;
        if let Some(value) = self.overrides.borrow().get(name) {
            return Ok(Some(value.clone()));
        }
        Ok(self.file_values.borrow().get(name).cloned())
    }

    /// Set a setting, replacing any previous value.
    pub fn set_value(&self, name: impl Into<String>, value: impl Into<String>) {
        self.overrides.borrow_mut().insert(name.into(), value.into());
    }

    /// Snapshot of every setting, loading the env files first if needed.
    pub fn datas(&self) -> Result<BTreeMap<String, String>> {
        self.ensure_loaded()?;
        let mut all: BTreeMap<String, String> = self
            .file_values
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        for (key, value) in self.overrides.borrow().iter() {
            all.insert(key.clone(), value.clone());
        }
        Ok(all)
    }

    /// Read the base file, then the local override file.
    pub fn init(&self) -> Result<()> {
        let mut values = env_file::parse_env_file(self.provider.as_ref(), &self.base_file)?;
        log::info!(
            "Loaded {} setting(s) from {}",
            values.len(),
            self.base_file.display()
        );

        if self.provider.exists(&self.local_file) {
            let local = env_file::parse_env_file(self.provider.as_ref(), &self.local_file)?;
            log::info!(
                "Loaded {} override(s) from {}",
                local.len(),
                self.local_file.display()
            );
            values.extend(local);
        } else {
            log::debug!(
                "No local override file at {}, using base settings only",
                self.local_file.display()
            );
        }

        *self.file_values.borrow_mut() = values;
        self.loaded.set(true);
        Ok(())
    }

    /// Forget the file values so the next access re-reads both files.
    pub fn reload(&self) {
        self.file_values.borrow_mut().clear();
        self.loaded.set(false);
    }

    /// Render all settings in the given format.
    pub fn export(&self, format: ConfigFormat) -> Result<String> {
        let values = self.datas()?;
        format.render(&values)
    }

    /// Persisting settings back to an env file is not supported.
    pub fn save_env_file(&self, path: &Path) -> Result<()> {
        log::warn!("Refusing to save configuration to {}", path.display());
        Err(Error::not_implemented("save_env_file"))
    }

    fn ensure_loaded(&self) -> Result<()> {
        if !self.loaded.get() {
            self.init()?;
        }
        Ok(())
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}
