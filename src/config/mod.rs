pub mod toml_config;

pub use toml_config::{DedupConfig, LoggingConfig, MergeConfig, PhoneConfig, SourcesConfig};
