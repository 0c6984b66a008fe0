#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

mod config;
mod layer;
mod proof;
mod service;

pub use config::MockDaConfig;
pub use proof::{MockHash, MockProof};
pub use service::{MockDaBackend, MockDaStats, MockFault};
