//! JSON entity reader backed by serde_json.

use super::{Entity, EntityReader, TargetType};
use crate::error::{RestError, Result};
use crate::protocol::{constants::media_types, media_type_essence};
use std::io::BufRead;

/// Reads JSON bodies into any `Deserialize` target.
///
/// Accepts `application/json` and structured-syntax types such as
/// `application/problem+json`; media type parameters are ignored. Not registered by
/// default, add it to a [`ReaderRegistry`](super::ReaderRegistry) to enable it.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEntityReader;

impl JsonEntityReader {
    /// Create the reader.
    pub fn new() -> Self {
        JsonEntityReader
    }
}

impl EntityReader for JsonEntityReader {
    fn supports(&self, _target: &TargetType, content_type: &str) -> bool {
        let essence = media_type_essence(content_type);
        essence == media_types::APPLICATION_JSON
            || (essence.starts_with("application/") && essence.ends_with("+json"))
    }

    fn read(&self, target: &TargetType, content_type: &str, data: &mut dyn BufRead) -> Result<Entity> {
        let mut deserializer = serde_json::Deserializer::from_reader(data);
        let entity = {
            let mut erased = <dyn erased_serde::Deserializer>::erase(&mut deserializer);
            target
                .deserialize(&mut erased)
                .map_err(|err| RestError::parse_failed(target.name(), content_type, err))?
        };
        // trailing garbage after the value
        deserializer
            .end()
            .map_err(|err| RestError::parse_failed(target.name(), content_type, err))?;
        Ok(entity)
    }
}
