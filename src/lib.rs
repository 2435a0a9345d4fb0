// Crate root library declaration and module exports.
pub mod batch;
pub mod cli;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod protocol;
pub mod worker;

pub use batch::{BatchProcessor, ProcessOptions, ProcessOutcome};
pub use dispatcher::{Dispatcher, RequestHandler};
pub use error::EngineError;
pub use protocol::{EngineEvent, Request, RequestType, Response};
pub use worker::{EngineHandle, spawn_engine};
