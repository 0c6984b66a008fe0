use celestia_types::nmt::Namespace;
use seqda_interface::DaError;

/// Runtime configuration for the [`crate::CelestiaBackend`].
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CelestiaConfig {
    /// The JWT used to authenticate with the Celestia RPC server
    pub celestia_rpc_auth_token: String,
    /// The address of the Celestia RPC server
    #[serde(default = "default_rpc_addr")]
    pub celestia_rpc_address: String,
    /// Hex encoded id of the v0 namespace blobs are published under. At most 10 bytes.
    pub namespace_id: String,
    /// Gas price passed to `blob.Submit`. A negative value lets the node pick one.
    #[serde(default = "default_gas_price")]
    pub gas_price: f64,
    /// The maximum size of a Celestia RPC response, in bytes
    #[serde(default = "default_max_response_size")]
    pub max_celestia_response_body_size: u32,
    /// The timeout for a Celestia RPC request, in seconds
    #[serde(default = "default_request_timeout_seconds")]
    pub celestia_rpc_timeout_seconds: u64,
}

fn default_rpc_addr() -> String {
    "http://localhost:26658/".into()
}

const fn default_gas_price() -> f64 {
    -1.0
}

fn default_max_response_size() -> u32 {
    1024 * 1024 * 100 // 100 MB
}

pub(crate) const fn default_request_timeout_seconds() -> u64 {
    60
}

impl CelestiaConfig {
    /// Parses [`CelestiaConfig::namespace_id`] into a v0 namespace.
    pub fn namespace(&self) -> Result<Namespace, DaError> {
        let namespace_id = self.namespace_id.trim();
        if namespace_id.is_empty() {
            return Err(DaError::Config("namespace id cannot be blank".to_string()));
        }
        let id = hex::decode(namespace_id.strip_prefix("0x").unwrap_or(namespace_id))
            .map_err(|e| DaError::Config(format!("namespace id is not valid hex: {e}")))?;

        Namespace::new_v0(&id)
            .map_err(|e| DaError::Config(format!("invalid namespace id {namespace_id}: {e}")))
    }
}
