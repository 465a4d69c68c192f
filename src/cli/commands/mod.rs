//! CLI command implementations

pub mod collect;
pub mod config;
pub mod link;
pub mod root;
pub mod walk;
pub mod write;

pub use collect::execute as collect;
pub use config::execute as config;
pub use link::execute as link;
pub use root::execute as root;
pub use walk::execute as walk;
pub use write::execute as write;
