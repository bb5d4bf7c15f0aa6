//! Update resolution for installed game mods.
//!
//! The [`core::mod_manager::ModManager`] ties the pieces together: an
//! [`core::scanner::InventoryScanner`] produces the installed mods, the
//! [`core::resolver::UpdateResolver`] checks each one against the registered
//! [`core::provider::CatalogProvider`]s, and results land in the
//! [`core::registry::ModStateRegistry`] for frontends to read.

pub mod config;
pub mod core;
pub mod models;
pub mod providers;
pub mod utils;

pub use crate::core::mod_manager::ModManager;
pub use crate::core::provider::{CatalogProvider, ProviderRegistry};
pub use crate::models::error::SError;
