use std::fs::File;
use std::io::Read;
use std::path::Path;

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use seqda_interface::BlobLayout;

/// Default number of blobs submitted or fetched concurrently by a session.
pub const DEFAULT_MAX_IN_FLIGHT_BLOBS: usize = 8;

/// Publisher configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
pub struct PublisherConfig<Da> {
    /// How sequences are laid out in blobs. Must never change for a deployment.
    pub blob_layout: BlobLayout,
    /// How many blobs of one sequence may be in flight at once. At least 1.
    #[serde(default = "default_max_in_flight_blobs")]
    pub max_in_flight_blobs: usize,
    /// DA backend configuration.
    pub da: Da,
}

const fn default_max_in_flight_blobs() -> usize {
    DEFAULT_MAX_IN_FLIGHT_BLOBS
}

/// Reads toml file as a specific type.
pub fn from_toml_path<P: AsRef<Path>, R: DeserializeOwned>(path: P) -> anyhow::Result<R> {
    let mut contents = String::new();
    {
        let mut file = File::open(path)?;
        file.read_to_string(&mut contents)?;
    }
    tracing::debug!(size_in_bytes = contents.len(), "Parsing config file");

    let result: R = toml::from_str(&contents)?;

    Ok(result)
}
