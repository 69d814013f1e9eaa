//! Live element trees that views render into.
//!
//! A [`Surface`] is the target region a view owns: an ordered list of
//! [`LiveNode`] elements with stable identities. Markup strings produced by
//! templates are parsed into detached node lists with `scraper`, then either
//! adopted wholesale (full render) or diffed against the live nodes
//! (incremental update, see [`crate::reconcile`]).

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use scraper::{ElementRef, Html};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// A named target region of the live element tree.
#[derive(Debug)]
pub struct Surface {
    name: String,
    children: Vec<LiveNode>,
}

impl Surface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[LiveNode] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [LiveNode] {
        &mut self.children
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Tears down the current contents and adopts freshly parsed markup.
    /// Every node gets a new identity.
    pub fn set_markup(&mut self, markup: &str) {
        self.children = parse_fragment(markup);
    }

    pub(crate) fn replace_children(&mut self, children: Vec<LiveNode>) {
        self.children = children;
    }

    /// First element matching `tag` in document order.
    pub fn find(&self, tag: &str) -> Option<&LiveNode> {
        find_in(&self.children, &|node| node.tag == tag)
    }

    /// First element carrying `class` among its `class` attribute values.
    pub fn find_by_class(&self, class: &str) -> Option<&LiveNode> {
        find_in(&self.children, &|node| node.has_class(class))
    }

    /// All descendant text joined in document order, whitespace collapsed.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            out.push(' ');
            child.collect_text(&mut out);
        }
        out.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for child in &self.children {
            write!(f, "{child}")?;
        }
        Ok(())
    }
}

/// One element of a rendering surface.
///
/// The `id` is a stable identity: it survives in-place patches and only
/// changes when the node is torn down and rebuilt. Direct text content is
/// kept separate from child elements so a text patch never disturbs element
/// identities.
#[derive(Debug, Clone)]
pub struct LiveNode {
    id: u64,
    tag: String,
    attrs: BTreeMap<String, String>,
    text: String,
    children: Vec<LiveNode>,
}

impl LiveNode {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn children(&self) -> &[LiveNode] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [LiveNode] {
        &mut self.children
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|value| value.split_whitespace().any(|c| c == class))
    }

    /// Copies every attribute of `other` onto this node. Attributes absent
    /// from `other` are left in place (no attribute removal).
    pub(crate) fn merge_attrs(&mut self, other: &LiveNode) {
        for (name, value) in &other.attrs {
            self.attrs.insert(name.clone(), value.clone());
        }
    }

    /// First text-bearing node in this subtree, own text first.
    pub fn first_text(&self) -> Option<&str> {
        if !self.text.is_empty() {
            return Some(&self.text);
        }
        self.children.iter().find_map(LiveNode::first_text)
    }

    /// Structural equality: tag, attributes and text, recursively.
    /// Identities are ignored.
    pub fn is_equal(&self, other: &LiveNode) -> bool {
        self.tag == other.tag
            && self.attrs == other.attrs
            && self.text == other.text
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(a, b)| a.is_equal(b))
    }

    fn collect_text(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.children {
            // Separator so adjacent elements do not run their text together
            out.push(' ');
            child.collect_text(out);
        }
    }
}

impl fmt::Display for LiveNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (name, value) in &self.attrs {
            write!(f, " {name}=\"{value}\"")?;
        }
        write!(f, ">{}", self.text)?;
        for child in &self.children {
            write!(f, "{child}")?;
        }
        write!(f, "</{}>", self.tag)
    }
}

/// Parses a markup string into a detached list of elements in document
/// order. Top-level bare text is dropped; templates always wrap text in
/// elements.
pub fn parse_fragment(markup: &str) -> Vec<LiveNode> {
    let html = Html::parse_fragment(markup);
    html.root_element().child_elements().map(convert).collect()
}

fn convert(element: ElementRef) -> LiveNode {
    let tag = element.value().name().to_string();
    let attrs = element
        .value()
        .attrs()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

    let mut text = String::new();
    let mut children = Vec::new();
    for child in element.children() {
        if let Some(fragment) = child.value().as_text() {
            text.push_str(fragment);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            children.push(convert(child_element));
        }
    }

    LiveNode {
        id: next_id(),
        tag,
        attrs,
        text,
        children,
    }
}

fn find_in<'a>(nodes: &'a [LiveNode], matches: &dyn Fn(&LiveNode) -> bool) -> Option<&'a LiveNode> {
    for node in nodes {
        if matches(node) {
            return Some(node);
        }
        if let Some(found) = find_in(&node.children, matches) {
            return Some(found);
        }
    }
    None
}
