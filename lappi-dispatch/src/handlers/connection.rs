//! `check_connection`: echoes the payload back

use async_trait::async_trait;
use lappi_common::Result;
use serde_json::Value;

use crate::dispatch::{Handler, HandlerResponse};

pub struct CheckConnection;

#[async_trait]
impl Handler for CheckConnection {
    async fn handle(&self, payload: Value) -> Result<HandlerResponse> {
        Ok(HandlerResponse::Data(payload))
    }
}
