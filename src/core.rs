pub mod mod_manager;
pub mod provider;
pub mod registry;
pub mod resolver;
pub mod scanner;
pub mod version;
