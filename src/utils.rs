pub mod logging;
pub mod toml;
