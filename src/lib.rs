//! Plain-text file logger.
//!
//! Each line carries a timestamp, an optional initiator label, optional
//! client IP context, a level tag and a one-line dump of the message value.

pub mod context;
pub mod logger;
pub mod model;
pub mod resolver;

pub use context::{ConnectionAddresses, RequestContext, StaticAddresses};
pub use logger::FileLogger;
pub use model::config::LoggerConfig;
pub use model::error::{LoggerError, Status};
pub use model::level::Level;
pub use model::message::Message;
