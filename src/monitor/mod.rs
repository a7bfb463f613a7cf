pub mod pipeline;
pub mod poller;
pub mod publisher;
pub mod service;

pub use pipeline::{MappingPipeline, RunReport};
pub use poller::{CompletionPoller, PollerConfig};
pub use publisher::{DataValue, ATTRIBUTE_OPTION_COMBO, DATA_SET};
pub use service::IntegrityService;
