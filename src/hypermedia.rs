//! Hypermedia links attached to response entities.

use serde::{Deserialize, Serialize};
use url::Url;

/// Media type of every representation this service produces.
pub const MEDIA_TYPE_JSON: &str = "application/json";

/// A link to a related resource.
///
/// `href` is a [`Url`], so it is always absolute. Empty optional fields are
/// left out of the JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: Url,
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub media_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(rename = "rel", default, skip_serializing_if = "String::is_empty")]
    pub relation: String,
}

impl Link {
    pub fn new(
        href: Url,
        relation: impl Into<String>,
        media_type: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            href,
            media_type: media_type.into(),
            title: title.into(),
            relation: relation.into(),
        }
    }
}

/// An ordered list of links, flattened into an entity under `links`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Linked {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    links: Vec<Link>,
}

impl Linked {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a link. `None` is ignored.
    pub fn add_link(&mut self, link: impl Into<Option<Link>>) {
        if let Some(link) = link.into() {
            self.links.push(link);
        }
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Entities that carry a [`Linked`] list.
pub trait Linkable {
    fn linked(&self) -> &Linked;

    fn linked_mut(&mut self) -> &mut Linked;

    fn add_link(&mut self, link: impl Into<Option<Link>>) {
        self.linked_mut().add_link(link);
    }

    fn links(&self) -> &[Link] {
        self.linked().links()
    }
}

impl Linkable for Linked {
    fn linked(&self) -> &Linked {
        self
    }

    fn linked_mut(&mut self) -> &mut Linked {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_link_serializes_in_field_order() {
        let link = Link::new(
            url("https://example.org/manufacturers"),
            "manufacturers",
            MEDIA_TYPE_JSON,
            "Manufacturers",
        );
        assert_eq!(
            serde_json::to_string(&link).unwrap(),
            r#"{"href":"https://example.org/manufacturers","type":"application/json","title":"Manufacturers","rel":"manufacturers"}"#
        );
    }

    #[test]
    fn test_link_omits_empty_fields() {
        let link = Link::new(url("http://example.org/x"), "vehicles", MEDIA_TYPE_JSON, "");
        assert_eq!(
            serde_json::to_string(&link).unwrap(),
            r#"{"href":"http://example.org/x","type":"application/json","rel":"vehicles"}"#
        );
    }

    #[test]
    fn test_empty_linked_has_no_links_key() {
        let linked = Linked::new();
        assert_eq!(serde_json::to_string(&linked).unwrap(), "{}");
    }

    #[test]
    fn test_add_none_is_noop() {
        let mut linked = Linked::new();
        linked.add_link(Link::new(url("http://example.org/"), "self", MEDIA_TYPE_JSON, ""));
        linked.add_link(None);
        assert_eq!(linked.links().len(), 1);
    }

    #[test]
    fn test_link_deserializes() {
        let link: Link = serde_json::from_str(r#"{"href":"http://example.org/a","rel":"self"}"#).unwrap();
        assert_eq!(link.href.as_str(), "http://example.org/a");
        assert_eq!(link.relation, "self");
        assert!(link.title.is_empty());
    }
}
