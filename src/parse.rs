// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use log::warn;

use crate::tree::{Attribute, Document, NodeData, NodeId, NodeKind};
use crate::Error;

const XML_NAMESPACE_NS: &str = "http://www.w3.org/XML/1998/namespace";

impl Document {
    /// Parses a `Document` from a string.
    ///
    /// Namespace prefixes and `xmlns` declarations are folded back into
    /// plain names/attributes, so the tree serializes the way it was written.
    pub fn parse(text: &str) -> Result<Document, Error> {
        parse(text)
    }
}

fn parse(text: &str) -> Result<Document, Error> {
    let xml = roxmltree::Document::parse(text)?;

    let mut doc = Document {
        nodes: vec![NodeData {
            parent: None,
            children: Vec::new(),
            kind: NodeKind::Root,
        }],
    };

    parse_xml_node_children(xml.root(), NodeId(0), &mut doc);

    // Check that the root element is `svg`.
    match doc.root().first_element_child() {
        Some(child) if child.has_tag_name("svg") => {}
        _ => return Err(Error::NotAnSvg),
    }

    Ok(doc)
}

fn parse_xml_node_children(parent: roxmltree::Node, parent_id: NodeId, doc: &mut Document) {
    for node in parent.children() {
        parse_xml_node(node, parent_id, doc);
    }
}

fn parse_xml_node(node: roxmltree::Node, parent_id: NodeId, doc: &mut Document) {
    if node.is_element() {
        let node_id = parse_xml_element(node, parent_id, doc);
        parse_xml_node_children(node, node_id, doc);
    } else if node.is_text() {
        if let Some(text) = node.text() {
            doc.append(parent_id, NodeKind::Text(text.to_string()));
        }
    } else if node.is_comment() {
        if let Some(text) = node.text() {
            doc.append(parent_id, NodeKind::Comment(text.to_string()));
        }
    }

    // Processing instructions are not preserved.
}

fn parse_xml_element(node: roxmltree::Node, parent_id: NodeId, doc: &mut Document) -> NodeId {
    let mut attributes = Vec::new();

    // Namespace declarations are not attributes to roxmltree.
    // Re-emit the ones introduced by this element, so they round-trip.
    for ns in node.namespaces() {
        if ns.uri() == XML_NAMESPACE_NS {
            continue;
        }

        if is_inherited_namespace(node, ns.name(), ns.uri()) {
            continue;
        }

        let name = match ns.name() {
            Some(prefix) => format!("xmlns:{}", prefix),
            None => "xmlns".to_string(),
        };

        attributes.push(Attribute {
            name,
            value: ns.uri().to_string(),
        });
    }

    for attr in node.attributes() {
        attributes.push(Attribute {
            name: qualified_attribute_name(node, attr.namespace(), attr.name()),
            value: attr.value().to_string(),
        });
    }

    doc.append(
        parent_id,
        NodeKind::Element {
            tag_name: qualified_tag_name(node),
            attributes,
        },
    )
}

fn is_inherited_namespace(node: roxmltree::Node, prefix: Option<&str>, uri: &str) -> bool {
    match node.parent() {
        Some(parent) => parent
            .namespaces()
            .any(|ns| ns.name() == prefix && ns.uri() == uri),
        None => false,
    }
}

fn qualified_tag_name(node: roxmltree::Node) -> String {
    let name = node.tag_name();
    match name.namespace() {
        Some(uri) => {
            // Elements in the default namespace are written without a prefix.
            let is_default = node
                .namespaces()
                .any(|ns| ns.name().is_none() && ns.uri() == uri);

            if is_default {
                name.name().to_string()
            } else {
                match node.lookup_prefix(uri) {
                    Some(prefix) => format!("{}:{}", prefix, name.name()),
                    None => name.name().to_string(),
                }
            }
        }
        None => name.name().to_string(),
    }
}

fn qualified_attribute_name(node: roxmltree::Node, namespace: Option<&str>, local: &str) -> String {
    match namespace {
        Some(uri) => {
            let prefix = if uri == XML_NAMESPACE_NS {
                Some("xml")
            } else {
                node.lookup_prefix(uri)
            };

            match prefix {
                Some(prefix) => format!("{}:{}", prefix, local),
                None => {
                    warn!(
                        "No prefix for the '{}' namespace of the '{}' attribute.",
                        uri, local
                    );
                    local.to_string()
                }
            }
        }
        None => local.to_string(),
    }
}
