//! Pluggable, content-type driven entity readers.
//!
//! An [`EntityReader`] turns a response body of some media type into an instance of a
//! requested target type. Readers are registered in a [`ReaderRegistry`] and consulted
//! in registration order by [`Response::as_entity`]; the first reader whose
//! [`supports`](EntityReader::supports) returns `true` reads the body.
//!
//! # Target Types
//!
//! Readers are stored as trait objects, so the target type travels as a runtime
//! [`TargetType`] value. It carries the type's identity and a type-erased serde entry
//! point, which lets any serde-capable format produce the concrete type:
//!
//! ```
//! use serde::Deserialize;
//! use simple_rest_client::entity::{read_as, XmlEntityReader};
//!
//! #[derive(Deserialize)]
//! struct CustomEntity {
//!     body: String,
//! }
//!
//! let xml = b"<CustomEntity><body>text</body></CustomEntity>";
//! let entity: CustomEntity = read_as(&XmlEntityReader::new(), "application/xml", &mut &xml[..]).unwrap();
//! assert_eq!(entity.body, "text");
//! ```
//!
//! # Shipped Readers
//!
//! | Reader | Media types | Registered by default |
//! |--------|-------------|-----------------------|
//! | [`XmlEntityReader`] | `*/xml`, `*/xml+suffix` | yes, as `"xml"` |
//! | [`JsonEntityReader`] | `application/json`, `application/*+json` | no |
//!
//! [`Response::as_entity`]: crate::Response::as_entity

mod json;
mod registry;
mod xml;

pub use json::JsonEntityReader;
pub use registry::ReaderRegistry;
pub use xml::XmlEntityReader;

use crate::error::{RestError, Result};
use serde::de::DeserializeOwned;
use std::any::{Any, TypeId};
use std::fmt;
use std::io::BufRead;

/// A deserialized entity of a type described by a [`TargetType`].
pub type Entity = Box<dyn Any + Send>;

type DeserializeFn =
    for<'de> fn(&mut dyn erased_serde::Deserializer<'de>) -> std::result::Result<Entity, erased_serde::Error>;

/// Runtime description of the type an entity should be read into.
#[derive(Clone, Copy)]
pub struct TargetType {
    id: TypeId,
    name: &'static str,
    deserialize: DeserializeFn,
}

impl TargetType {
    /// Describe the type `T`.
    pub fn of<T>() -> Self
    where
        T: DeserializeOwned + Send + 'static,
    {
        TargetType {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            deserialize: deserialize_boxed::<T>,
        }
    }

    /// The [`TypeId`] of the described type.
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// The type name, for diagnostics only.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// True if this describes `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// Drive `deserializer` into a boxed instance of the described type.
    pub fn deserialize<'de>(
        &self,
        deserializer: &mut dyn erased_serde::Deserializer<'de>,
    ) -> std::result::Result<Entity, erased_serde::Error> {
        (self.deserialize)(deserializer)
    }
}

impl fmt::Debug for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TargetType").field(&self.name).finish()
    }
}

impl PartialEq for TargetType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TargetType {}

fn deserialize_boxed<T>(
    deserializer: &mut dyn erased_serde::Deserializer<'_>,
) -> std::result::Result<Entity, erased_serde::Error>
where
    T: DeserializeOwned + Send + 'static,
{
    erased_serde::deserialize::<T>(deserializer).map(|value| Box::new(value) as Entity)
}

/// Reads entities of some media types into requested target types.
///
/// Implementations must be cheap to query: [`supports`](Self::supports) is called for
/// every registered reader until one matches.
pub trait EntityReader: Send + Sync {
    /// Whether this reader can produce `target` from data of `content_type`.
    ///
    /// Must be a pure predicate.
    fn supports(&self, target: &TargetType, content_type: &str) -> bool;

    /// Read `data` of `content_type` into an instance of `target`.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::ParseFailed`] when the data cannot be bound to the target.
    fn read(&self, target: &TargetType, content_type: &str, data: &mut dyn BufRead) -> Result<Entity>;

    /// Read an in-memory buffer; see [`read`](Self::read).
    fn read_bytes(&self, target: &TargetType, content_type: &str, data: &[u8]) -> Result<Entity> {
        let mut data = data;
        self.read(target, content_type, &mut data)
    }
}

/// Read `data` with `reader` and return the concrete `T`.
///
/// Does not consult [`EntityReader::supports`].
///
/// # Errors
///
/// Propagates the reader's error, and returns [`RestError::ParseFailed`] if the reader
/// produced a value of some other type.
pub fn read_as<T>(reader: &dyn EntityReader, content_type: &str, data: &mut dyn BufRead) -> Result<T>
where
    T: DeserializeOwned + Send + 'static,
{
    let target = TargetType::of::<T>();
    let entity = reader.read(&target, content_type, data)?;
    downcast_entity(entity, &target, content_type)
}

pub(crate) fn downcast_entity<T: 'static>(entity: Entity, target: &TargetType, content_type: &str) -> Result<T> {
    entity.downcast::<T>().map(|value| *value).map_err(|_| {
        RestError::parse_failed(
            target.name(),
            content_type,
            format!("reader produced a value that is not a {}", target.name()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        body: String,
    }

    struct WrongTypeReader;

    impl EntityReader for WrongTypeReader {
        fn supports(&self, _target: &TargetType, _content_type: &str) -> bool {
            true
        }

        fn read(&self, _target: &TargetType, _content_type: &str, _data: &mut dyn BufRead) -> Result<Entity> {
            Ok(Box::new(42_u32))
        }
    }

    #[test]
    fn test_target_type_identity() {
        let target = TargetType::of::<Sample>();
        assert!(target.is::<Sample>());
        assert!(!target.is::<String>());
        assert_eq!(target, TargetType::of::<Sample>());
        assert!(target.name().ends_with("Sample"));
    }

    #[test]
    fn test_read_as_wrong_type_is_parse_failure() {
        let result: Result<Sample> = read_as(&WrongTypeReader, "text/plain", &mut &b""[..]);
        assert!(matches!(result, Err(RestError::ParseFailed { .. })));
    }

    #[test]
    fn test_read_bytes_default_delegates_to_read() {
        let entity = WrongTypeReader
            .read_bytes(&TargetType::of::<u32>(), "text/plain", b"ignored")
            .unwrap();
        assert_eq!(*entity.downcast::<u32>().unwrap(), 42);
    }
}
