//! XML entity reader backed by quick-xml's serde support.

use super::{Entity, EntityReader, TargetType};
use crate::error::{RestError, Result};
use regex::Regex;
use std::io::BufRead;
use std::sync::LazyLock;

// The literal `xml` token is matched case-sensitively, the `+suffix` in either case.
// Media type parameters (`; charset=...`) are not accepted.
static XML_MEDIA_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.+/xml(\+[a-zA-Z0-9]+)?$").expect("XML media type pattern is valid"));

/// Reads XML bodies into any `Deserialize` target.
///
/// The root element name is not checked; its children bind to the target's fields.
///
/// ```
/// use simple_rest_client::entity::{EntityReader, TargetType, XmlEntityReader};
///
/// let reader = XmlEntityReader::new();
/// let target = TargetType::of::<String>();
/// assert!(reader.supports(&target, "text/xml"));
/// assert!(reader.supports(&target, "application/xml+Atom"));
/// assert!(!reader.supports(&target, "application/json"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlEntityReader;

impl XmlEntityReader {
    /// Create the reader.
    pub fn new() -> Self {
        XmlEntityReader
    }
}

impl EntityReader for XmlEntityReader {
    fn supports(&self, _target: &TargetType, content_type: &str) -> bool {
        XML_MEDIA_TYPE.is_match(content_type)
    }

    fn read(&self, target: &TargetType, content_type: &str, data: &mut dyn BufRead) -> Result<Entity> {
        let mut deserializer = quick_xml::de::Deserializer::from_reader(data);
        let mut erased = <dyn erased_serde::Deserializer>::erase(&mut deserializer);
        target
            .deserialize(&mut erased)
            .map_err(|err| RestError::parse_failed(target.name(), content_type, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::read_as;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct CustomEntity {
        body: String,
    }

    #[derive(Debug, Deserialize)]
    struct Order {
        id: u32,
        #[serde(rename = "item", default)]
        items: Vec<String>,
        note: Option<String>,
    }

    fn supports(content_type: &str) -> bool {
        XmlEntityReader::new().supports(&TargetType::of::<CustomEntity>(), content_type)
    }

    #[test]
    fn test_supports_application_xml() {
        assert!(supports("application/xml"));
    }

    #[test]
    fn test_supports_text_xml() {
        assert!(supports("text/xml"));
    }

    #[test]
    fn test_supports_xml_with_suffix() {
        assert!(supports("application/xml+other"));
        assert!(supports("text/xml+Other"));
    }

    #[test]
    fn test_xml_token_is_case_sensitive() {
        assert!(!supports("application/XML"));
        assert!(!supports("text/Xml+other"));
    }

    #[test]
    fn test_does_not_support_other_types() {
        assert!(!supports("application/json"));
        assert!(!supports("*/*"));
        assert!(!supports("/xml"));
        assert!(!supports("application/xml+"));
        assert!(!supports("application/xml+a-b"));
    }

    #[test]
    fn test_parameters_are_not_accepted() {
        assert!(!supports("application/xml; charset=utf-8"));
    }

    #[test]
    fn test_read_entity_from_stream() {
        let xml = b"<CustomEntity><body>text</body></CustomEntity>";
        let entity: CustomEntity = read_as(&XmlEntityReader::new(), "application/xml", &mut &xml[..]).unwrap();
        assert_eq!(entity.body, "text");
    }

    #[test]
    fn test_read_entity_from_bytes() {
        let target = TargetType::of::<CustomEntity>();
        let entity = XmlEntityReader::new()
            .read_bytes(&target, "text/xml", b"<CustomEntity><body>text</body></CustomEntity>")
            .unwrap();
        let entity = entity.downcast::<CustomEntity>().unwrap();
        assert_eq!(entity.body, "text");
    }

    #[test]
    fn test_read_nested_shape() {
        let xml = b"<order><id>7</id><item>a</item><item>b</item></order>";
        let order: Order = read_as(&XmlEntityReader::new(), "application/xml", &mut &xml[..]).unwrap();
        assert_eq!(order.id, 7);
        assert_eq!(order.items, vec!["a", "b"]);
        assert_eq!(order.note, None);
    }

    #[test]
    fn test_read_malformed_is_parse_failure() {
        let xml = b"<CustomEntity><body>text</wrong></CustomEntity>";
        let result: Result<CustomEntity> = read_as(&XmlEntityReader::new(), "text/xml", &mut &xml[..]);
        match result {
            Err(RestError::ParseFailed { content_type, .. }) => assert_eq!(content_type, "text/xml"),
            other => panic!("expected ParseFailed, got {:?}", other.map(|e| e.body)),
        }
    }

    #[test]
    fn test_read_type_mismatch_is_parse_failure() {
        let xml = b"<order><id>seven</id></order>";
        let result: Result<Order> = read_as(&XmlEntityReader::new(), "text/xml", &mut &xml[..]);
        assert!(matches!(result, Err(RestError::ParseFailed { .. })));
    }
}
