pub mod cache;
pub mod config;
pub mod dictionary;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod observability;
pub mod orchestrator;
pub mod server;
pub mod service;

pub use cache::{CacheStore, TypedCache};
pub use config::{AppConfig, DictionaryConfig, LoggingConfig, ServerConfig, SpellCheckConfig};
pub use dictionary::{DictionaryLookup, HttpDictionary, LookupError};
pub use middleware::{CounterSnapshot, RequestCounter};
pub use observability::{apply_logging_level, init_tracing};
pub use orchestrator::SpellCheckOrchestrator;
pub use server::{AppState, OrthocheckServer, ServerBuilder, build_app};
pub use service::{CategoryService, ServiceError, SpellCheckService};
