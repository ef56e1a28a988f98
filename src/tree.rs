// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// An SVG document.
///
/// A mutable tree stored as a flat arena. Nodes are referenced by [`NodeId`]
/// and keep an index-based link to their parent and children,
/// so structural edits never invalidate other nodes.
///
/// The first node is always [`NodeKind::Root`] and the root `svg` element
/// is its first element child.
pub struct Document {
    pub(crate) nodes: Vec<NodeData>,
}

impl Document {
    /// Returns the root node.
    #[inline]
    pub fn root(&self) -> Node {
        Node {
            id: NodeId(0),
            d: &self.nodes[0],
            doc: self,
        }
    }

    /// Returns the root `svg` element.
    pub fn root_element(&self) -> Node {
        // `unwrap` is safe, because `Document` is guaranteed to have
        // an `svg` element after parsing.
        self.root().first_element_child().unwrap()
    }

    /// Returns an iterator over document's nodes.
    ///
    /// Shorthand for `doc.root().descendants()`.
    pub fn descendants(&self) -> Descendants {
        self.root().descendants()
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> Node {
        Node {
            id,
            d: &self.nodes[id.0],
            doc: self,
        }
    }

    pub(crate) fn append(&mut self, parent_id: NodeId, kind: NodeKind) -> NodeId {
        let new_child_id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            parent: Some(parent_id),
            children: Vec::new(),
            kind,
        });

        self.nodes[parent_id.0].children.push(new_child_id);
        new_child_id
    }

    /// Detaches a node from its parent.
    ///
    /// The node stays in the arena, but is no longer reachable from the root.
    pub(crate) fn detach(&mut self, id: NodeId) {
        // Detaching an already detached node indicates a defect
        // in a tree-rewriting pass.
        debug_assert!(self.nodes[id.0].parent.is_some());

        if let Some(parent_id) = self.nodes[id.0].parent.take() {
            let children = &mut self.nodes[parent_id.0].children;
            if let Some(pos) = children.iter().position(|&child| child == id) {
                children.remove(pos);
            }
        }
    }

    /// Takes the node's child list, leaving it empty.
    ///
    /// The children keep their parent link until they are reattached
    /// via `set_children`.
    pub(crate) fn take_children(&mut self, id: NodeId) -> Vec<NodeId> {
        std::mem::take(&mut self.nodes[id.0].children)
    }

    /// Sets the node's child list, updating each child's parent link.
    pub(crate) fn set_children(&mut self, id: NodeId, children: Vec<NodeId>) {
        for &child in &children {
            self.nodes[child.0].parent = Some(id);
        }

        self.nodes[id.0].children = children;
    }

    /// Sets an element's attribute, replacing the value in place
    /// when the attribute is already present.
    pub(crate) fn set_attribute(&mut self, id: NodeId, name: &str, value: String) {
        if let NodeKind::Element { ref mut attributes, .. } = self.nodes[id.0].kind {
            match attributes.iter_mut().find(|a| a.name == name) {
                Some(attr) => attr.value = value,
                None => attributes.push(Attribute {
                    name: name.to_string(),
                    value,
                }),
            }
        }
    }

    /// Removes an element's attribute. Does nothing when it's absent.
    pub(crate) fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let NodeKind::Element { ref mut attributes, .. } = self.nodes[id.0].kind {
            attributes.retain(|a| a.name != name);
        }
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        if !self.root().has_children() {
            return write!(f, "Document []");
        }

        macro_rules! writeln_indented {
            ($depth:expr, $f:expr, $fmt:expr) => {
                for _ in 0..$depth { write!($f, "    ")?; }
                writeln!($f, $fmt)?;
            };
            ($depth:expr, $f:expr, $fmt:expr, $($arg:tt)*) => {
                for _ in 0..$depth { write!($f, "    ")?; }
                writeln!($f, $fmt, $($arg)*)?;
            };
        }

        fn print_children(
            parent: Node,
            depth: usize,
            f: &mut std::fmt::Formatter,
        ) -> Result<(), std::fmt::Error> {
            for child in parent.children() {
                if child.is_element() {
                    writeln_indented!(depth, f, "Element {{");
                    writeln_indented!(depth, f, "    tag_name: {:?}", child.tag_name());

                    if !child.attributes().is_empty() {
                        writeln_indented!(depth + 1, f, "attributes: [");
                        for attr in child.attributes() {
                            writeln_indented!(depth + 2, f, "{:?}", attr);
                        }
                        writeln_indented!(depth + 1, f, "]");
                    }

                    if child.has_children() {
                        writeln_indented!(depth, f, "    children: [");
                        print_children(child, depth + 2, f)?;
                        writeln_indented!(depth, f, "    ]");
                    }

                    writeln_indented!(depth, f, "}}");
                } else {
                    writeln_indented!(depth, f, "{:?}", child);
                }
            }

            Ok(())
        }

        writeln!(f, "Document [")?;
        print_children(self.root(), 1, f)?;
        writeln!(f, "]")?;

        Ok(())
    }
}

/// A node identifier.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct NodeId(pub(crate) usize);

pub(crate) enum NodeKind {
    Root,
    Element {
        tag_name: String,
        attributes: Vec<Attribute>,
    },
    Text(String),
    Comment(String),
}

pub(crate) struct NodeData {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) kind: NodeKind,
}

/// An attribute.
///
/// Names and values are kept verbatim, including namespace prefixes
/// and `xmlns` declarations.
#[derive(Clone, PartialEq)]
pub struct Attribute {
    /// Attribute's name.
    pub name: String,
    /// Attribute's value.
    pub value: String,
}

impl std::fmt::Debug for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(
            f,
            "Attribute {{ name: {:?}, value: {:?} }}",
            self.name, self.value
        )
    }
}

/// A read-only node handle.
#[derive(Clone, Copy)]
pub struct Node<'a> {
    pub(crate) id: NodeId,
    pub(crate) doc: &'a Document,
    pub(crate) d: &'a NodeData,
}

impl Eq for Node<'_> {}

impl PartialEq for Node<'_> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && std::ptr::eq(self.doc, other.doc)
    }
}

impl<'a> Node<'a> {
    /// Returns the node's identifier.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Checks if the current node is an element.
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.d.kind, NodeKind::Element { .. })
    }

    /// Checks if the current node is a text.
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.d.kind, NodeKind::Text(_))
    }

    /// Checks if the current node is a comment.
    #[inline]
    pub fn is_comment(&self) -> bool {
        matches!(self.d.kind, NodeKind::Comment(_))
    }

    #[inline]
    pub(crate) fn kind(&self) -> &'a NodeKind {
        &self.d.kind
    }

    /// Returns element's tag name, unless the current node is not an element.
    ///
    /// The name is returned verbatim, with its namespace prefix when one
    /// was used in the source document.
    #[inline]
    pub fn tag_name(&self) -> Option<&'a str> {
        match self.d.kind {
            NodeKind::Element { ref tag_name, .. } => Some(tag_name),
            _ => None,
        }
    }

    /// Returns element's tag name without a namespace prefix.
    #[inline]
    pub fn local_name(&self) -> Option<&'a str> {
        self.tag_name().map(local_name)
    }

    /// Checks that the element's tag name, ignoring a namespace prefix,
    /// is equal to `name`.
    #[inline]
    pub fn has_tag_name(&self, name: &str) -> bool {
        self.local_name() == Some(name)
    }

    /// Returns an attribute value by an exact, fully-qualified name.
    #[inline]
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.attributes()
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Checks if an attribute is present.
    #[inline]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes().iter().any(|a| a.name == name)
    }

    /// Returns a list of all element's attributes.
    #[inline]
    pub fn attributes(&self) -> &'a [Attribute] {
        match self.d.kind {
            NodeKind::Element { ref attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Returns node's text, unless the current node is not a text node.
    #[inline]
    pub fn text(&self) -> Option<&'a str> {
        match self.d.kind {
            NodeKind::Text(ref text) => Some(text),
            _ => None,
        }
    }

    /// Returns a parent node.
    #[inline]
    pub fn parent(&self) -> Option<Self> {
        self.d.parent.map(|id| self.doc.get(id))
    }

    /// Checks if the node has child nodes.
    #[inline]
    pub fn has_children(&self) -> bool {
        !self.d.children.is_empty()
    }

    /// Returns the first child element.
    #[inline]
    pub fn first_element_child(&self) -> Option<Self> {
        self.children().find(|n| n.is_element())
    }

    /// Returns an iterator over children nodes.
    #[inline]
    pub fn children(&self) -> Children<'a> {
        Children {
            doc: self.doc,
            iter: self.d.children.iter(),
        }
    }

    /// Returns an iterator over this node and its descendants
    /// in document order.
    #[inline]
    pub fn descendants(&self) -> Descendants<'a> {
        Descendants {
            doc: self.doc,
            stack: vec![self.id],
        }
    }
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        match self.d.kind {
            NodeKind::Root => write!(f, "Root"),
            NodeKind::Element { .. } => {
                write!(
                    f,
                    "Element {{ tag_name: {:?}, attributes: {:?} }}",
                    self.tag_name(),
                    self.attributes()
                )
            }
            NodeKind::Text(ref text) => write!(f, "Text({:?})", text),
            NodeKind::Comment(ref text) => write!(f, "Comment({:?})", text),
        }
    }
}

/// An iterator over children nodes.
#[derive(Clone, Debug)]
pub struct Children<'a> {
    doc: &'a Document,
    iter: std::slice::Iter<'a, NodeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = Node<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|&id| self.doc.get(id))
    }
}

/// A descendants iterator.
#[derive(Clone, Debug)]
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.doc.get(id);
        self.stack.extend(node.d.children.iter().rev().copied());
        Some(node)
    }
}

/// Strips a namespace prefix, if any.
#[inline]
pub(crate) fn local_name(tag_name: &str) -> &str {
    match tag_name.split_once(':') {
        Some((_, local)) => local,
        None => tag_name,
    }
}
