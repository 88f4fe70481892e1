//! # Visums Kernel
//!
//! The `kernel` module ties settings and components together.
//!
//! ## Key Responsibilities & Components:
//!
//! - **Application Context**: [`Application`](bootstrap::Application) owns the
//!   settings store and the component registry for the lifetime of the process.
//! - **Component Registry**: the [`Component`](component::Component) trait,
//!   the closed set of built-in [`ComponentKind`](component::ComponentKind)s and
//!   the memoizing [`ComponentRegistry`](component::ComponentRegistry), which
//!   validates components against the [`Capability`](component::Capability)
//!   expected for their name.
//! - **Core Constants**: file names and setting keys in the `constants` submodule.
//! - **Error Handling**: the crate-wide [`Error`](error::Error) and `Result` alias.
pub mod bootstrap;
pub mod component;
pub mod constants;
pub mod error;

pub use bootstrap::Application;
pub use component::{
    Capability, Component, ComponentConstructor, ComponentError, ComponentKind, ComponentRegistry,
};
pub use error::{Error, Result};
