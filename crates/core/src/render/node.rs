//! Minimal virtual DOM produced by render functions.
//!
//! Attribute order is insertion order, so serializing the same tree always
//! yields the same bytes.

use serde::Serialize;

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderNode {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        children: Vec<RenderNode>,
    },
    Text {
        content: String,
    },
    /// Pre-sanitized HTML, emitted verbatim.
    Raw {
        html: String,
    },
    Fragment {
        children: Vec<RenderNode>,
    },
}

impl RenderNode {
    pub fn element(tag: impl Into<String>) -> Self {
        RenderNode::Element {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        RenderNode::Text {
            content: content.into(),
        }
    }

    /// Rich text from an author; sanitized on the way in.
    pub fn rich_text(html: &str) -> Self {
        RenderNode::Raw {
            html: crate::richtext::sanitize(html),
        }
    }

    /// Markup the caller guarantees is safe (generated by us).
    pub fn trusted_html(html: impl Into<String>) -> Self {
        RenderNode::Raw { html: html.into() }
    }

    pub fn fragment(children: Vec<RenderNode>) -> Self {
        RenderNode::Fragment { children }
    }

    /// Set an attribute, replacing an existing value with the same name.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let RenderNode::Element {
            ref mut attributes, ..
        } = self
        {
            let name = name.into();
            let value = value.into();
            match attributes.iter_mut().find(|(n, _)| *n == name) {
                Some(existing) => existing.1 = value,
                None => attributes.push((name, value)),
            }
        }
        self
    }

    /// Set a boolean attribute when `on` is true.
    pub fn with_flag(self, name: &str, on: bool) -> Self {
        if on {
            self.with_attr(name, "")
        } else {
            self
        }
    }

    /// Append a class to the `class` attribute.
    pub fn with_class(mut self, class: &str) -> Self {
        if let RenderNode::Element {
            ref mut attributes, ..
        } = self
        {
            match attributes.iter_mut().find(|(n, _)| n == "class") {
                Some((_, existing)) if existing.is_empty() => *existing = class.to_string(),
                Some((_, existing)) => {
                    existing.push(' ');
                    existing.push_str(class);
                }
                None => attributes.push(("class".to_string(), class.to_string())),
            }
        }
        self
    }

    pub fn with_child(mut self, child: RenderNode) -> Self {
        if let RenderNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: impl IntoIterator<Item = RenderNode>) -> Self {
        if let RenderNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    pub fn with_text(self, content: impl Into<String>) -> Self {
        self.with_child(RenderNode::text(content))
    }

    /// Look up an attribute value on an element.
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            RenderNode::Element { attributes, .. } => attributes
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    /// Serialize to an HTML string.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    pub fn write_html(&self, out: &mut String) {
        match self {
            RenderNode::Element {
                tag,
                attributes,
                children,
            } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push(' ');
                    out.push_str(name);
                    if !value.is_empty() {
                        out.push_str("=\"");
                        out.push_str(&escape_attr(value));
                        out.push('"');
                    }
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }
                for child in children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
            RenderNode::Text { content } => out.push_str(&escape_text(content)),
            RenderNode::Raw { html } => out.push_str(html),
            RenderNode::Fragment { children } => {
                for child in children {
                    child.write_html(out);
                }
            }
        }
    }
}

/// Escape text content.
pub fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape an attribute value for use inside double quotes.
pub fn escape_attr(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_nested_elements_in_order() {
        let node = RenderNode::element("div")
            .with_attr("id", "a")
            .with_class("one")
            .with_class("two")
            .with_child(RenderNode::element("span").with_text("hi"));
        assert_eq!(
            node.to_html(),
            r#"<div id="a" class="one two"><span>hi</span></div>"#
        );
    }

    #[test]
    fn escapes_text_and_attributes() {
        let node = RenderNode::element("a")
            .with_attr("title", r#"Tom & "Jerry""#)
            .with_text("<b>");
        assert_eq!(
            node.to_html(),
            r#"<a title="Tom &amp; &quot;Jerry&quot;">&lt;b&gt;</a>"#
        );
    }

    #[test]
    fn void_and_flag_attributes() {
        let node = RenderNode::element("input")
            .with_attr("type", "checkbox")
            .with_flag("disabled", true)
            .with_flag("checked", false);
        assert_eq!(node.to_html(), r#"<input type="checkbox" disabled>"#);
    }

    #[test]
    fn with_attr_replaces_existing_value() {
        let node = RenderNode::element("button")
            .with_attr("aria-expanded", "false")
            .with_attr("aria-expanded", "true");
        assert_eq!(node.attr("aria-expanded"), Some("true"));
        assert_eq!(node.to_html(), r#"<button aria-expanded="true"></button>"#);
    }

    #[test]
    fn rich_text_is_sanitized() {
        let node = RenderNode::rich_text("<p>ok</p><script>x()</script>");
        assert_eq!(node.to_html(), "<p>ok</p>");
    }
}
