// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use xmlwriter::XmlWriter;

use crate::tree::{Document, Node, NodeKind};

/// XML writing options.
#[derive(Clone, Copy, Debug)]
pub struct XmlOptions {
    /// `xmlwriter` options.
    pub writer_opts: xmlwriter::Options,
}

impl Default for XmlOptions {
    fn default() -> Self {
        // Whitespace text nodes pass through verbatim,
        // so the writer itself must not indent.
        XmlOptions {
            writer_opts: xmlwriter::Options {
                use_single_quote: false,
                indent: xmlwriter::Indent::None,
                attributes_indent: xmlwriter::Indent::None,
            },
        }
    }
}

impl Document {
    /// Writes the document back to SVG text.
    ///
    /// Attribute values that were not modified by the normalization passes
    /// are written byte-for-byte, modulo XML escaping.
    pub fn to_string(&self, opt: &XmlOptions) -> String {
        convert(self, opt)
    }
}

pub(crate) fn convert(doc: &Document, opt: &XmlOptions) -> String {
    let mut xml = XmlWriter::new(opt.writer_opts);

    for child in doc.root().children() {
        conv_node(child, &mut xml);
    }

    xml.end_document()
}

fn conv_node(node: Node, xml: &mut XmlWriter) {
    match *node.kind() {
        NodeKind::Element {
            ref tag_name,
            ref attributes,
        } => {
            xml.start_element(tag_name);
            for attr in attributes {
                xml.write_attribute(&attr.name, &escape(&attr.value));
            }

            for child in node.children() {
                conv_node(child, xml);
            }

            xml.end_element();
        }
        NodeKind::Text(ref text) => xml.write_text(&escape(text)),
        NodeKind::Comment(ref text) => xml.write_comment(text),
        NodeKind::Root => {}
    }
}

// `xmlwriter` escapes only quotes, so markup characters in attribute
// values and text must be escaped here. Without it, an input like
// `a &amp; b` would serialize as raw `a & b` and the output would no
// longer parse.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
