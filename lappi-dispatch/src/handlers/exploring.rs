//! Exploring-source handlers

use std::sync::Arc;

use async_trait::async_trait;
use lappi_common::Result;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::decode_payload;
use crate::dispatch::{Handler, HandlerResponse};
use crate::exploring::SourceProvider;

#[derive(Debug, Deserialize)]
pub struct ArtistDescriptionRequest {
    #[serde(rename = "sourceName", alias = "source_name")]
    pub source_name: String,
    #[serde(rename = "artistName", alias = "artist_name")]
    pub artist_name: String,
}

/// `exploring.sources.get_artist_description`
pub struct GetArtistDescription {
    sources: Arc<SourceProvider>,
}

impl GetArtistDescription {
    pub fn new(sources: Arc<SourceProvider>) -> Self {
        Self { sources }
    }
}

#[async_trait]
impl Handler for GetArtistDescription {
    async fn handle(&self, payload: Value) -> Result<HandlerResponse> {
        let request: ArtistDescriptionRequest = decode_payload(payload)?;
        debug!(
            source = %request.source_name,
            artist = %request.artist_name,
            "Artist description requested"
        );

        let source = self.sources.create(&request.source_name)?;
        let description = source.get_artist_description(&request.artist_name).await?;

        Ok(HandlerResponse::Data(json!({ "description": description })))
    }
}

/// `exploring.sources.list`
pub struct ListSources {
    sources: Arc<SourceProvider>,
}

impl ListSources {
    pub fn new(sources: Arc<SourceProvider>) -> Self {
        Self { sources }
    }
}

#[async_trait]
impl Handler for ListSources {
    async fn handle(&self, _payload: Value) -> Result<HandlerResponse> {
        Ok(HandlerResponse::Data(json!({ "sources": self.sources.source_names() })))
    }
}
