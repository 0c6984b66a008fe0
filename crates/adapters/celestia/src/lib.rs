#![doc = include_str!("../README.md")]

mod config;
mod da_service;

pub use config::CelestiaConfig;
pub use da_service::{CelestiaBackend, CelestiaProof};
