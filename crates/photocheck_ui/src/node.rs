//! HTML node tree with escaping
//!
//! Views build markup as a tree of [`Node`]s instead of string templates. Text
//! and attribute values are escaped when rendered, so response data can never
//! inject markup into the page.

use std::borrow::Cow;
use std::fmt::Write;

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

/// A node in an HTML fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// An element with attributes and children
    Element(ElementNode),
    /// Escaped text content
    Text(String),
    /// A sequence of sibling nodes without a wrapper
    Fragment(Vec<Node>),
}

/// An HTML element under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

/// Start building an element.
pub fn el(tag: &'static str) -> ElementNode {
    ElementNode {
        tag,
        attrs: Vec::new(),
        children: Vec::new(),
    }
}

/// Create a text node.
pub fn text(content: impl Into<String>) -> Node {
    Node::Text(content.into())
}

impl ElementNode {
    /// Set an attribute, replacing any previous value.
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        if let Some(slot) = self.attrs.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.attrs.push((name, value));
        }
        self
    }

    /// Append one or more space-separated classes.
    pub fn class(mut self, class: &str) -> Self {
        if let Some(slot) = self.attrs.iter_mut().find(|(n, _)| *n == "class") {
            slot.1.push(' ');
            slot.1.push_str(class);
            self
        } else {
            self.attrs.push(("class", class.to_string()));
            self
        }
    }

    /// Set the `id` attribute.
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    /// Append a child node.
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several child nodes.
    pub fn children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Append a text child.
    pub fn text(self, content: impl Into<String>) -> Self {
        self.child(text(content))
    }

    /// Tag name of this element.
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Look up an attribute value.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the element carries the given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }
}

impl From<ElementNode> for Node {
    fn from(element: ElementNode) -> Self {
        Node::Element(element)
    }
}

impl From<Vec<Node>> for Node {
    fn from(nodes: Vec<Node>) -> Self {
        Node::Fragment(nodes)
    }
}

impl Node {
    /// Render the tree to an HTML string.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        match self {
            Node::Text(content) => out.push_str(&escape_html(content)),
            Node::Fragment(nodes) => nodes.iter().for_each(|n| n.render_into(out)),
            Node::Element(element) => {
                out.push('<');
                out.push_str(element.tag);
                for (name, value) in &element.attrs {
                    // Writing into a String cannot fail.
                    let _ = write!(out, " {}=\"{}\"", name, escape_html(value));
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&element.tag) {
                    return;
                }
                for child in &element.children {
                    child.render_into(out);
                }
                let _ = write!(out, "</{}>", element.tag);
            }
        }
    }

    /// Concatenated text of the tree, ignoring markup.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(content) => out.push_str(content),
            Node::Fragment(nodes) => nodes.iter().for_each(|n| n.collect_text(out)),
            Node::Element(element) => element.children.iter().for_each(|n| n.collect_text(out)),
        }
    }

    /// All elements in document order that carry `class`.
    pub fn find_by_class(&self, class: &str) -> Vec<&ElementNode> {
        let mut found = Vec::new();
        self.walk(&mut |element| {
            if element.has_class(class) {
                found.push(element);
            }
        });
        found
    }

    /// The first element in document order with the given id.
    pub fn find_by_id(&self, id: &str) -> Option<&ElementNode> {
        let mut found = None;
        self.walk(&mut |element| {
            if found.is_none() && element.get_attr("id") == Some(id) {
                found = Some(element);
            }
        });
        found
    }

    fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a ElementNode)) {
        match self {
            Node::Text(_) => {}
            Node::Fragment(nodes) => nodes.iter().for_each(|n| n.walk(visit)),
            Node::Element(element) => {
                visit(element);
                element.children.iter().for_each(|n| n.walk(visit));
            }
        }
    }
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape_html(input: &str) -> Cow<'_, str> {
    if !input.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len() + 8);
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
    Cow::Owned(out)
}
