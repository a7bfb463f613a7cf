pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod monitor;

pub use adapters::DhisClient;
pub use config::AppConfig;
pub use error::{MonitorError, Result};
pub use monitor::{
    CompletionPoller, DataValue, IntegrityService, MappingPipeline, PollerConfig, RunReport,
};
