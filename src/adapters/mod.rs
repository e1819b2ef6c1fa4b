// Adapters - External system implementations

pub mod catalog_tmdb;
pub mod confirm_stdin;
pub mod fs_local;
pub mod probe_ffprobe;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use catalog_tmdb::TmdbCatalogAdapter;
pub use confirm_stdin::{AssumeYesAdapter, StdinConfirmAdapter};
pub use fs_local::LocalFsAdapter;
pub use probe_ffprobe::FFprobeAdapter;
pub use toml_config::TomlConfigAdapter;
pub use tracing_log::TracingLogAdapter;
