//! `registry.set_values`: writes a batch of registry values

use std::sync::Arc;

use async_trait::async_trait;
use lappi_common::{Registry, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::info;

use super::decode_payload;
use crate::dispatch::{Handler, HandlerResponse};

#[derive(Debug, Deserialize)]
pub struct SetValuesRequest {
    #[serde(rename = "registryValues", alias = "registry_values")]
    pub registry_values: Map<String, Value>,
}

pub struct SetRegistryValues {
    registry: Arc<Registry>,
}

impl SetRegistryValues {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl Handler for SetRegistryValues {
    async fn handle(&self, payload: Value) -> Result<HandlerResponse> {
        let request: SetValuesRequest = decode_payload(payload)?;
        let keys: Vec<String> = request.registry_values.keys().cloned().collect();

        self.registry.set_many(request.registry_values);

        // Keys only; values may be credentials
        info!(keys = ?keys, "Registry values updated");
        Ok(HandlerResponse::Empty)
    }
}
