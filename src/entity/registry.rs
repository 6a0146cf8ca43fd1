//! Ordered registry of entity readers.
//!
//! Readers are kept in registration order and looked up by a linear scan: the first
//! reader that supports the requested target type and content type wins.
//!
//! # Thread Safety
//!
//! The reader list sits behind a `parking_lot::RwLock`. Lookups take a read lock
//! and clone the matching reader's `Arc`, so the lock is never held while a body
//! is being parsed.
//!
//! # Examples
//!
//! ```
//! use simple_rest_client::entity::{JsonEntityReader, ReaderRegistry, TargetType};
//!
//! let registry = ReaderRegistry::with_defaults();
//! registry.register("json", JsonEntityReader::new());
//! assert_eq!(registry.ids(), vec!["xml", "json"]);
//!
//! let target = TargetType::of::<String>();
//! let (id, _reader) = registry.find(&target, "application/json").unwrap();
//! assert_eq!(id, "json");
//! ```

use super::{EntityReader, TargetType, XmlEntityReader};
use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, LazyLock};

static GLOBAL: LazyLock<Arc<ReaderRegistry>> = LazyLock::new(|| Arc::new(ReaderRegistry::with_defaults()));

/// Registration-ordered mapping from reader id to reader.
pub struct ReaderRegistry {
    readers: RwLock<Vec<(String, Arc<dyn EntityReader>)>>,
}

impl ReaderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        ReaderRegistry {
            readers: RwLock::new(Vec::new()),
        }
    }

    /// Create a registry holding the readers enabled by default: [`XmlEntityReader`]
    /// as `"xml"`.
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register("xml", XmlEntityReader::new());
        registry
    }

    /// The process-wide registry used by clients that were not given their own.
    ///
    /// Starts out as [`with_defaults`](Self::with_defaults). Readers registered here are
    /// visible to every such client.
    pub fn global() -> Arc<ReaderRegistry> {
        Arc::clone(&GLOBAL)
    }

    /// Register `reader` under `id`.
    ///
    /// A reader already registered under the same id is replaced in place, keeping its
    /// position in the lookup order.
    pub fn register<R>(&self, id: impl Into<String>, reader: R) -> &Self
    where
        R: EntityReader + 'static,
    {
        self.register_shared(id, Arc::new(reader))
    }

    /// Register an already shared reader; see [`register`](Self::register).
    pub fn register_shared(&self, id: impl Into<String>, reader: Arc<dyn EntityReader>) -> &Self {
        let id = id.into();
        let mut readers = self.readers.write();
        match readers.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => {
                tracing::debug!(id = %id, "replacing entity reader");
                entry.1 = reader;
            }
            None => {
                tracing::debug!(id = %id, "registering entity reader");
                readers.push((id, reader));
            }
        }
        self
    }

    /// Remove the reader registered under `id`. Returns whether one was removed.
    pub fn unregister(&self, id: &str) -> bool {
        let mut readers = self.readers.write();
        let before = readers.len();
        readers.retain(|(existing, _)| existing != id);
        readers.len() != before
    }

    /// Registered ids in lookup order.
    pub fn ids(&self) -> Vec<String> {
        self.readers.read().iter().map(|(id, _)| id.clone()).collect()
    }

    /// Number of registered readers.
    pub fn len(&self) -> usize {
        self.readers.read().len()
    }

    /// True if no reader is registered.
    pub fn is_empty(&self) -> bool {
        self.readers.read().is_empty()
    }

    /// The first reader, in registration order, supporting `target` and `content_type`.
    pub fn find(&self, target: &TargetType, content_type: &str) -> Option<(String, Arc<dyn EntityReader>)> {
        self.readers
            .read()
            .iter()
            .find(|(_, reader)| reader.supports(target, content_type))
            .map(|(id, reader)| (id.clone(), Arc::clone(reader)))
    }
}

impl Default for ReaderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ReaderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderRegistry").field("readers", &self.ids()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{read_as, Entity, JsonEntityReader};
    use crate::error::Result;
    use std::io::BufRead;

    /// Supports everything and returns a fixed label.
    struct LabelReader(&'static str);

    impl EntityReader for LabelReader {
        fn supports(&self, _target: &TargetType, _content_type: &str) -> bool {
            true
        }

        fn read(&self, _target: &TargetType, _content_type: &str, _data: &mut dyn BufRead) -> Result<Entity> {
            Ok(Box::new(self.0.to_string()))
        }
    }

    fn label_of(registry: &ReaderRegistry, content_type: &str) -> Option<String> {
        let (_, reader) = registry.find(&TargetType::of::<String>(), content_type)?;
        Some(read_as::<String>(reader.as_ref(), content_type, &mut &b""[..]).unwrap())
    }

    #[test]
    fn test_defaults_hold_xml_reader() {
        let registry = ReaderRegistry::with_defaults();
        assert_eq!(registry.ids(), vec!["xml"]);
        assert!(registry.find(&TargetType::of::<String>(), "text/xml").is_some());
        assert!(registry.find(&TargetType::of::<String>(), "application/json").is_none());
    }

    #[test]
    fn test_new_is_empty() {
        let registry = ReaderRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.find(&TargetType::of::<String>(), "text/xml").is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let registry = ReaderRegistry::new();
        registry.register("first", LabelReader("first"));
        registry.register("second", LabelReader("second"));
        assert_eq!(label_of(&registry, "text/plain").as_deref(), Some("first"));
    }

    #[test]
    fn test_register_same_id_replaces_in_place() {
        let registry = ReaderRegistry::new();
        registry
            .register("a", LabelReader("a1"))
            .register("b", LabelReader("b"))
            .register("a", LabelReader("a2"));
        assert_eq!(registry.ids(), vec!["a", "b"]);
        assert_eq!(registry.len(), 2);
        assert_eq!(label_of(&registry, "text/plain").as_deref(), Some("a2"));
    }

    #[test]
    fn test_unregister() {
        let registry = ReaderRegistry::with_defaults();
        registry.register("json", JsonEntityReader::new());
        assert!(registry.unregister("xml"));
        assert!(!registry.unregister("xml"));
        assert_eq!(registry.ids(), vec!["json"]);
    }

    #[test]
    fn test_global_starts_with_defaults() {
        assert!(ReaderRegistry::global().ids().contains(&"xml".to_string()));
    }
}
