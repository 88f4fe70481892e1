//! Cross-module flows: env files feeding the store, the store feeding the `db` component.
mod common;
mod component_tests;
mod config_tests;
