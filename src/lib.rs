pub mod commands;
pub mod config;
pub mod forge;
pub mod git;
pub mod paths;
pub mod scaffold;

// Re-export commonly used types
pub use commands::launch::{LaunchOptions, LaunchReport};
pub use config::{Settings, Substitutions};
