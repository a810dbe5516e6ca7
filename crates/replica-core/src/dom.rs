//! HTML tree access shared by the extractor and the rewriter.
//!
//! Both parse the markup independently; the element selection rules live here
//! so they cannot drift apart.

use html5ever::parse_document;
use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::{Attribute, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

/// Parses a full HTML document (scripting disabled, like a static DOMParser).
pub fn parse(markup: &str) -> RcDom {
    let opts = ParseOpts {
        tree_builder: html5ever::tree_builder::TreeBuilderOpts {
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    parse_document(RcDom::default(), opts).one(markup)
}

/// Serializes the whole document (doctype, root element, all attributes).
pub fn to_html(dom: &RcDom) -> std::io::Result<Vec<u8>> {
    let mut out = Vec::new();
    let document: SerializableHandle = dom.document.clone().into();
    let opts = SerializeOpts {
        scripting_enabled: false,
        traversal_scope: TraversalScope::ChildrenOnly(None),
        ..Default::default()
    };
    serialize(&mut out, &document, opts)?;
    Ok(out)
}

/// Element kinds the pipeline cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selected {
    /// `<img>` carrying a `src` attribute.
    Image,
    /// `<link rel="stylesheet">` carrying an `href` attribute.
    StylesheetLink,
    /// `<style>` block.
    Style,
}

impl Selected {
    /// Name of the attribute holding the reference, if any.
    pub fn url_attribute(self) -> Option<&'static str> {
        match self {
            Selected::Image => Some("src"),
            Selected::StylesheetLink => Some("href"),
            Selected::Style => None,
        }
    }
}

fn attr<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|a| a.name.ns.is_empty() && &*a.name.local == name)
        .map(|a| &*a.value)
}

/// Classifies a node according to the selection rules, or `None`.
pub fn classify(node: &Handle) -> Option<Selected> {
    let NodeData::Element { name, attrs, .. } = &node.data else {
        return None;
    };
    let attrs = attrs.borrow();
    match &*name.local {
        "img" if attr(&attrs, "src").is_some() => Some(Selected::Image),
        "link"
            if attr(&attrs, "rel").is_some_and(|rel| rel.eq_ignore_ascii_case("stylesheet"))
                && attr(&attrs, "href").is_some() =>
        {
            Some(Selected::StylesheetLink)
        }
        "style" => Some(Selected::Style),
        _ => None,
    }
}

/// Value of attribute `name` on an element node.
pub fn get_attr(node: &Handle, name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attr(&attrs.borrow(), name).map(str::to_string),
        _ => None,
    }
}

/// Replaces the value of an existing attribute; returns false if it is absent.
pub fn set_attr(node: &Handle, name: &str, value: &str) -> bool {
    let NodeData::Element { attrs, .. } = &node.data else {
        return false;
    };
    let mut attrs = attrs.borrow_mut();
    match attrs
        .iter_mut()
        .find(|a| a.name.ns.is_empty() && &*a.name.local == name)
    {
        Some(a) => {
            a.value = value.into();
            true
        }
        None => false,
    }
}

/// Text children of a node (a `<style>` block holds its stylesheet as text).
pub fn text_children(node: &Handle) -> Vec<Handle> {
    node.children
        .borrow()
        .iter()
        .filter(|c| matches!(c.data, NodeData::Text { .. }))
        .cloned()
        .collect()
}

/// Visits every node in document order (pre-order). Template contents are not
/// descended into, matching `querySelectorAll`.
pub fn walk(node: &Handle, f: &mut impl FnMut(&Handle)) {
    f(node);
    for child in node.children.borrow().iter() {
        walk(child, f);
    }
}
