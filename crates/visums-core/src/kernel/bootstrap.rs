use std::cell::RefCell;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::database::Database;
use crate::kernel::component::{
    Capability, Component, ComponentConstructor, ComponentError, ComponentRegistry,
};
use crate::kernel::constants;
use crate::kernel::error::Result;
use crate::storage::ConfigStore;

/// Application context owning the settings store and the component registry.
///
/// Built once at process start and passed to whatever needs settings or
/// components. Components are constructed lazily against this context's
/// store, so a component's own settings come from the same files.
#[derive(Debug)]
pub struct Application {
    config: ConfigStore,
    components: RefCell<ComponentRegistry>,
}

impl Application {
    /// Creates an application over `.env` and `.env.local` in the current directory.
    pub fn new() -> Self {
        Self::with_config(ConfigStore::new())
    }

    /// Creates an application over an explicitly configured store.
    pub fn with_config(config: ConfigStore) -> Self {
        log::debug!(
            "Initializing {} v{} (settings: {}, overrides: {})",
            constants::APP_NAME,
            constants::APP_VERSION,
            config.base_file().display(),
            config.local_file().display()
        );
        Self {
            config,
            components: RefCell::new(ComponentRegistry::new()),
        }
    }

    /// The settings store
    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// Get a setting; `Ok(None)` when unset.
    pub fn value(&self, name: &str) -> Result<Option<String>> {
        self.config.get_value(name)
    }

    /// Set a setting, replacing any previous value.
    pub fn set_value(&self, name: impl Into<String>, value: impl Into<String>) {
        self.config.set_value(name, value);
    }

    /// Snapshot of every setting.
    pub fn datas(&self) -> Result<BTreeMap<String, String>> {
        self.config.datas()
    }

    /// Gets the component registered under `name`, constructing it on first use.
    pub fn component(&self, name: &str) -> Result<Arc<dyn Component>> {
        self.components.borrow_mut().get(name, &self.config)
    }

    /// Registers `component` under `name` if it provides the expected capability.
    pub fn set_component(&self, name: &str, component: Arc<dyn Component>) -> Result<()> {
        self.components.borrow_mut().set_component(name, component)
    }

    /// Declares how an additional component name is resolved.
    pub fn register_factory(
        &self,
        name: impl Into<String>,
        capability: Capability,
        constructor: ComponentConstructor,
    ) {
        self.components
            .borrow_mut()
            .register_factory(name, capability, constructor);
    }

    /// Whether an instance exists under `name`.
    pub fn has_component(&self, name: &str) -> bool {
        self.components.borrow().contains(name)
    }

    /// Gets the component under `name` through its database capability.
    pub fn database(&self, name: &str) -> Result<Arc<dyn Database>> {
        let component = self.component(name)?;
        let component_name = component.name();
        component.into_database().ok_or_else(|| {
            ComponentError::CapabilityMismatch {
                name: name.to_string(),
                component: component_name.to_string(),
                expected: Capability::Database,
            }
            .into()
        })
    }

    /// Shortcut for the default `db` component.
    pub fn db(&self) -> Result<Arc<dyn Database>> {
        self.database(constants::DB_COMPONENT)
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}
