//! Built-in request handlers
//!
//! | key | request | response |
//! |---|---|---|
//! | `check_connection` | any | payload echoed |
//! | `registry.set_values` | `{registryValues: {..}}` | empty |
//! | `exploring.sources.get_artist_description` | `{sourceName, artistName}` | `{description}` |
//! | `exploring.sources.list` | any | `{sources: [..]}` |

pub mod connection;
pub mod exploring;
pub mod registry;

use std::sync::Arc;

use lappi_common::{Error, Registry, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::dispatch::Dispatcher;
use crate::exploring::SourceProvider;

pub use connection::CheckConnection;
pub use exploring::{GetArtistDescription, ListSources};
pub use registry::SetRegistryValues;

pub const CHECK_CONNECTION: &str = "check_connection";
pub const REGISTRY_SET_VALUES: &str = "registry.set_values";
pub const GET_ARTIST_DESCRIPTION: &str = "exploring.sources.get_artist_description";
pub const LIST_SOURCES: &str = "exploring.sources.list";

/// Register every built-in handler on `dispatcher`
pub fn install_builtin_handlers(
    dispatcher: &Dispatcher,
    registry: Arc<Registry>,
    sources: Arc<SourceProvider>,
) {
    dispatcher.register_handler(CHECK_CONNECTION, Arc::new(CheckConnection));
    dispatcher.register_handler(REGISTRY_SET_VALUES, Arc::new(SetRegistryValues::new(registry)));
    dispatcher.register_handler(
        GET_ARTIST_DESCRIPTION,
        Arc::new(GetArtistDescription::new(Arc::clone(&sources))),
    );
    dispatcher.register_handler(LIST_SOURCES, Arc::new(ListSources::new(sources)));
}

/// Decode a handler payload into its request type
pub(crate) fn decode_payload<T: DeserializeOwned>(payload: Value) -> Result<T> {
    serde_json::from_value(payload).map_err(|e| Error::InvalidPayload(e.to_string()))
}
