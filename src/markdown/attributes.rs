//! HTML attribute sets attached to rendered blocks.
//!
//! Attributes are collected while the document is walked (fence attribute
//! syntax, renderer hooks) and written once when the block is emitted.

use std::fmt::Write;

use smallvec::SmallVec;

use crate::utils::html::escape_attr;

/// Mutable attribute set of a single block: an optional id, an ordered class
/// list without duplicates, and any other `key="value"` properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlAttributes {
    id: Option<String>,
    classes: SmallVec<[String; 4]>,
    properties: Vec<(String, String)>,
}

impl HtmlAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Append a class unless it is already present.
    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !class.is_empty() && !self.has_class(&class) {
            self.classes.push(class);
        }
    }

    /// Remove a class, returning whether it was present.
    pub fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        self.classes.len() != before
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// Set a property, replacing an earlier value with the same key.
    ///
    /// Keys outside `[A-Za-z0-9_:-]` are ignored since they are written
    /// unescaped.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if !is_valid_key(&key) {
            return;
        }
        let value = value.into();
        match self.properties.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.properties.push((key, value)),
        }
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.classes.is_empty() && self.properties.is_empty()
    }

    /// Merge `other` into `self`: classes are appended, id and properties
    /// from `other` win.
    pub fn merge(&mut self, other: HtmlAttributes) {
        if let Some(id) = other.id {
            self.id = Some(id);
        }
        for class in other.classes {
            self.add_class(class);
        }
        for (key, value) in other.properties {
            self.set_property(key, value);
        }
    }

    /// Write attributes as ` id=".." class=".." key=".."` (leading space
    /// included, nothing written when empty).
    pub fn write_to(&self, out: &mut String) -> std::fmt::Result {
        if let Some(id) = &self.id {
            write!(out, " id=\"{}\"", escape_attr(id))?;
        }
        if !self.classes.is_empty() {
            out.push_str(" class=\"");
            for (i, class) in self.classes.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                out.push_str(&escape_attr(class));
            }
            out.push('"');
        }
        for (key, value) in &self.properties {
            write!(out, " {}=\"{}\"", key, escape_attr(value))?;
        }
        Ok(())
    }

    /// Parse the body of a `{#id .class key=value}` attribute block.
    ///
    /// Unknown shapes are kept as valueless properties, the way HTML treats
    /// boolean attributes.
    pub fn parse(s: &str) -> Self {
        let mut attrs = Self::new();
        let mut chars = s.chars().peekable();

        while let Some(c) = chars.next() {
            if c.is_whitespace() {
                continue;
            }

            let mut name = String::new();
            name.push(c);
            while let Some(&next) = chars.peek() {
                if next == '=' || next.is_whitespace() {
                    break;
                }
                name.push(next);
                chars.next();
            }

            if chars.peek() != Some(&'=') {
                if let Some(id) = name.strip_prefix('#') {
                    attrs.set_id(id);
                } else if let Some(class) = name.strip_prefix('.') {
                    attrs.add_class(class);
                } else {
                    attrs.set_property(name, "");
                }
                continue;
            }

            chars.next(); // '='
            let value = match chars.peek() {
                Some(&quote @ ('"' | '\'')) => {
                    chars.next();
                    chars.by_ref().take_while(|&c| c != quote).collect()
                }
                _ => {
                    let mut val = String::new();
                    while let Some(&c) = chars.peek() {
                        if c.is_whitespace() {
                            break;
                        }
                        val.push(c);
                        chars.next();
                    }
                    val
                }
            };

            match name.as_str() {
                "id" => attrs.set_id(value),
                "class" => value.split_whitespace().for_each(|c| attrs.add_class(c)),
                _ => attrs.set_property(name, value),
            }
        }

        attrs
    }
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b':' | b'-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(attrs: &HtmlAttributes) -> String {
        let mut out = String::new();
        attrs.write_to(&mut out).unwrap();
        out
    }

    #[test]
    fn test_class_order_and_dedup() {
        let mut attrs = HtmlAttributes::new();
        attrs.add_class("language-csharp");
        attrs.add_class("lang-csharp");
        attrs.add_class("lang-csharp");
        assert!(attrs.remove_class("language-csharp"));
        assert!(!attrs.remove_class("language-csharp"));
        attrs.add_class("editor-colors");

        assert_eq!(written(&attrs), " class=\"lang-csharp editor-colors\"");
    }

    #[test]
    fn test_write_order_id_class_properties() {
        let mut attrs = HtmlAttributes::new();
        attrs.set_property("data-title", "a \"quoted\" title");
        attrs.add_class("wide");
        attrs.set_id("main");

        assert_eq!(
            written(&attrs),
            " id=\"main\" class=\"wide\" data-title=\"a &quot;quoted&quot; title\""
        );
    }

    #[test]
    fn test_empty_writes_nothing() {
        assert!(HtmlAttributes::new().is_empty());
        assert_eq!(written(&HtmlAttributes::new()), "");
    }

    #[test]
    fn test_parse_shorthand() {
        let attrs = HtmlAttributes::parse("#main .wide .numbered data-start=10 hidden");
        assert_eq!(attrs.id(), Some("main"));
        assert_eq!(attrs.classes().collect::<Vec<_>>(), ["wide", "numbered"]);
        assert_eq!(attrs.property("data-start"), Some("10"));
        assert_eq!(attrs.property("hidden"), Some(""));
    }

    #[test]
    fn test_parse_quoted_values() {
        let attrs = HtmlAttributes::parse("title='hello world' class=\"a b\" id=x");
        assert_eq!(attrs.property("title"), Some("hello world"));
        assert_eq!(attrs.classes().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(attrs.id(), Some("x"));
    }

    #[test]
    fn test_parse_skips_invalid_keys() {
        let attrs = HtmlAttributes::parse("x\"><i> data-ok=2 on<b>=1");
        assert_eq!(attrs.property("x\"><i>"), None);
        assert_eq!(attrs.property("on<b>"), None);
        assert_eq!(written(&attrs), " data-ok=\"2\"");
    }

    #[test]
    fn test_merge() {
        let mut base = HtmlAttributes::parse(".a #first");
        base.merge(HtmlAttributes::parse(".b .a #second"));
        assert_eq!(base.id(), Some("second"));
        assert_eq!(base.classes().collect::<Vec<_>>(), ["a", "b"]);
    }
}
