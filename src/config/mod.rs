pub mod guard;
pub mod identity;
pub mod loader;
pub mod settings;
pub mod types;
