pub mod config;
pub mod error;
pub mod mod_dto;
pub mod resolution;
pub mod state;
pub mod host;
