#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

mod config;
mod session;

pub use config::{from_toml_path, PublisherConfig, DEFAULT_MAX_IN_FLIGHT_BLOBS};
pub use session::DaSession;
pub use tokio_util::sync::CancellationToken;
