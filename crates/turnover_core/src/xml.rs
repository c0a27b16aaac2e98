//! Small XML navigation and output helpers shared by the format modules.
//!
//! Navigation helpers return `Option` so a missing tag reads as "absent",
//! never an error — the tolerance the vendor dialects require. Tag names
//! are compared without namespace, which also absorbs prefixed documents
//! (`<cdl:ColorCorrection>` matches `ColorCorrection`).

use roxmltree::Node;

/// First direct child element with the given (namespace-less) tag name.
pub(crate) fn child<'a, 'input>(
    node: Node<'a, 'input>,
    name: &str,
) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

/// Trimmed text of a direct child element.
pub(crate) fn child_text(node: Node, name: &str) -> Option<String> {
    child(node, name)
        .and_then(|n| n.text())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// First descendant element (excluding the node itself) with the given name.
pub(crate) fn descendant<'a, 'input>(
    node: Node<'a, 'input>,
    name: &str,
) -> Option<Node<'a, 'input>> {
    node.descendants()
        .filter(|n| n.id() != node.id())
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

/// Trimmed text of the first descendant element with the given name.
pub(crate) fn descendant_text(node: Node, name: &str) -> Option<String> {
    descendant(node, name)
        .and_then(|n| n.text())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// First descendant with the given name and attribute value.
pub(crate) fn descendant_with_attr<'a, 'input>(
    node: Node<'a, 'input>,
    name: &str,
    attr: &str,
    value: &str,
) -> Option<Node<'a, 'input>> {
    node.descendants()
        .filter(|n| n.id() != node.id())
        .find(|n| n.is_element() && n.tag_name().name() == name && n.attribute(attr) == Some(value))
}

/// Trimmed text of the first matching descendant-with-attribute.
pub(crate) fn descendant_text_with_attr(
    node: Node,
    name: &str,
    attr: &str,
    value: &str,
) -> Option<String> {
    descendant_with_attr(node, name, attr, value)
        .and_then(|n| n.text())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Escape special XML characters for text/attribute output.
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
