// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::tree::{Document, NodeId};

/// Root attributes that are useless to a morphing target.
const ROOT_ATTRIBUTES: &[&str] = &["xmlns:xlink", "zoomAndPan", "preserveAspectRatio", "version"];

/// Removes everything irrelevant or harmful to morphing:
/// the `defs` subtree, `clip-path` references
/// and presentational root attributes.
///
/// Every step is a no-op when its target is absent.
pub(crate) fn sanitize(doc: &mut Document) {
    remove_defs(doc);
    remove_clip_path_attributes(doc);
    cleanup_root_attributes(doc);
}

/// Detaches the first `defs` element in document order.
fn remove_defs(doc: &mut Document) {
    let defs = doc
        .descendants()
        .find(|n| n.has_tag_name("defs"))
        .map(|n| n.id());

    if let Some(id) = defs {
        doc.detach(id);
    }
}

/// Strips the `clip-path` attribute from every element,
/// keeping the elements themselves.
fn remove_clip_path_attributes(doc: &mut Document) {
    let nodes: Vec<NodeId> = doc
        .descendants()
        .filter(|n| n.has_attribute("clip-path"))
        .map(|n| n.id())
        .collect();

    for id in nodes {
        doc.remove_attribute(id, "clip-path");
    }
}

fn cleanup_root_attributes(doc: &mut Document) {
    let root = doc.root_element().id();
    for name in ROOT_ATTRIBUTES {
        doc.remove_attribute(root, name);
    }
}
