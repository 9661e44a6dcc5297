// Command handlers module
pub mod cpu_oid;
pub mod enrich;
pub mod version;

// Re-exports for cleaner imports
pub use cpu_oid::execute as cpu_oid;
pub use enrich::execute as enrich;
pub use version::execute as version;
