use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use thiserror::Error as ThisError;

use crate::database::{Database, SqliteDatabase};
use crate::kernel::constants;
use crate::kernel::error::Result;
use crate::storage::ConfigStore;

/// A set of operations a component must expose to be accepted under a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ThisError)]
pub enum Capability {
    #[error("Database")]
    Database,
}

impl Capability {
    pub const ALL: [Capability; 1] = [Capability::Database];
}

/// Core trait for every service instance held by the [`ComponentRegistry`]
pub trait Component: Send + Sync + Debug {
    /// Implementation name, used in logs and errors
    fn name(&self) -> &'static str;

    /// Borrow the database capability, if this component has it
    fn as_database(&self) -> Option<&dyn Database> {
        None
    }

    /// Convert into a shared database handle, if this component has the capability
    fn into_database(self: Arc<Self>) -> Option<Arc<dyn Database>> {
        None
    }

    /// Whether this component exposes `capability` by reference.
    ///
    /// The registry additionally requires the owned accessor to agree; see
    /// [`satisfies`].
    fn provides(&self, capability: Capability) -> bool {
        match capability {
            Capability::Database => self.as_database().is_some(),
        }
    }

    /// Every capability this component provides
    fn capabilities(&self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|capability| self.provides(*capability))
            .collect()
    }
}

/// Whether a shared component satisfies `capability` through both its borrowed
/// and its owned accessor.
pub fn satisfies(component: &Arc<dyn Component>, capability: Capability) -> bool {
    match capability {
        Capability::Database => {
            component.as_database().is_some() && Arc::clone(component).into_database().is_some()
        }
    }
}

/// Errors raised while resolving or registering components
#[derive(Debug, ThisError)]
pub enum ComponentError {
    #[error("No component implementation is known for '{name}'")]
    UnknownComponent { name: String },

    #[error("Component '{component}' cannot be registered as '{name}': it does not provide the {expected} capability")]
    CapabilityMismatch {
        name: String,
        component: String,
        expected: Capability,
    },
}

/// Builds a component instance, reading its own settings from the store
pub type ComponentConstructor = fn(&ConfigStore) -> Result<Arc<dyn Component>>;

/// The built-in component names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Relational database access, logical name `db`
    Db,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 1] = [ComponentKind::Db];

    /// Logical name the kind is registered under
    pub fn name(&self) -> &'static str {
        match self {
            ComponentKind::Db => constants::DB_COMPONENT,
        }
    }

    /// Look up a built-in kind by logical name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Capability any component registered under this name must provide
    pub fn capability(&self) -> Capability {
        match self {
            ComponentKind::Db => Capability::Database,
        }
    }

    /// Default implementation constructor
    pub fn constructor(&self) -> ComponentConstructor {
        match self {
            ComponentKind::Db => construct_db,
        }
    }
}

fn construct_db(config: &ConfigStore) -> Result<Arc<dyn Component>> {
    Ok(Arc::new(SqliteDatabase::from_config(config)?))
}

/// How a logical name is resolved: required capability plus default constructor
#[derive(Debug, Clone, Copy)]
pub struct ComponentFactory {
    pub capability: Capability,
    pub constructor: ComponentConstructor,
}

/// Registry mapping logical names to lazily constructed component instances
#[derive(Debug)]
pub struct ComponentRegistry {
    /// Known names and how to build them
    factories: HashMap<String, ComponentFactory>,
    /// Instances created so far, at most one per name
    instances: HashMap<String, Arc<dyn Component>>,
}

impl ComponentRegistry {
    /// Create a registry that knows every built-in [`ComponentKind`]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for kind in ComponentKind::ALL {
            registry.register_factory(kind.name(), kind.capability(), kind.constructor());
        }
        registry
    }

    /// Create a registry with no known names
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
            instances: HashMap::new(),
        }
    }

    /// Declare (or redeclare) how `name` is resolved. Existing instances are kept.
    pub fn register_factory(
        &mut self,
        name: impl Into<String>,
        capability: Capability,
        constructor: ComponentConstructor,
    ) {
        self.factories.insert(
            name.into(),
            ComponentFactory {
                capability,
                constructor,
            },
        );
    }

    /// Get the instance registered under `name`, constructing and caching it on first use.
    pub fn get(&mut self, name: &str, config: &ConfigStore) -> Result<Arc<dyn Component>> {
        if let Some(instance) = self.instances.get(name) {
            return Ok(instance.clone());
        }

        let factory = self.factory(name)?;
        let instance = (factory.constructor)(config)?;
        check_capability(name, &instance, factory.capability)?;

        log::info!("Constructed component '{}' as {}", name, instance.name());
        self.instances.insert(name.to_string(), instance.clone());
        Ok(instance)
    }

    /// Register an externally built component under `name`.
    ///
    /// The component must provide the capability declared for `name`;
    /// otherwise the previous entry, if any, stays in place and
    /// [`ComponentError::CapabilityMismatch`] is returned.
    pub fn set_component(&mut self, name: &str, component: Arc<dyn Component>) -> Result<()> {
        let factory = self.factory(name)?;
        if let Err(e) = check_capability(name, &component, factory.capability) {
            log::warn!("Rejected component {} for '{}': {}", component.name(), name, e);
            return Err(e);
        }

        match self.instances.insert(name.to_string(), component.clone()) {
            Some(previous) => log::info!(
                "Replaced component '{}' ({} -> {})",
                name,
                previous.name(),
                component.name()
            ),
            None => log::info!("Registered component '{}' as {}", name, component.name()),
        }
        Ok(())
    }

    /// Whether an instance exists under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.instances.contains_key(name)
    }

    /// Names with an instance, sorted
    pub fn registered_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.instances.keys().cloned().collect();
        names.sort();
        names
    }

    /// Names that can be resolved, sorted
    pub fn known_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    fn factory(&self, name: &str) -> Result<ComponentFactory> {
        self.factories.get(name).copied().ok_or_else(|| {
            ComponentError::UnknownComponent {
                name: name.to_string(),
            }
            .into()
        })
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn check_capability(name: &str, component: &Arc<dyn Component>, expected: Capability) -> Result<()> {
    if satisfies(component, expected) {
        Ok(())
    } else {
        Err(ComponentError::CapabilityMismatch {
            name: name.to_string(),
            component: component.name().to_string(),
            expected,
        }
        .into())
    }
}
