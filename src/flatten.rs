// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::tree::{Document, NodeId};

/// Eliminates every `g` element while preserving the rendered geometry.
///
/// A single top-down walk carries the concatenated transforms of all
/// ancestor groups. Each group hands the accumulated transform down to its
/// `path` descendants and then its children are spliced into the parent at
/// the group's position, so document order is preserved. Each path is
/// rewritten at most once, which keeps arbitrary nesting depths correct.
///
/// Transforms are opaque strings. Composition is transform-list
/// concatenation with the ancestor's part first, never matrix math,
/// so the output stays textually predictable.
///
/// Returns the number of eliminated groups.
pub(crate) fn flatten(doc: &mut Document) -> usize {
    let root = doc.root_element().id();
    let mut removed = 0;
    flatten_children(doc, root, "", &mut removed);
    removed
}

fn flatten_children(doc: &mut Document, parent: NodeId, inherited: &str, removed: &mut usize) {
    let old_children = doc.take_children(parent);
    let mut new_children = Vec::with_capacity(old_children.len());

    for child in old_children {
        if doc.get(child).has_tag_name("g") {
            let transform = compose(inherited, doc.get(child).attribute("transform"));

            flatten_children(doc, child, &transform, removed);

            // Promote the group's children to the group's position.
            new_children.append(&mut doc.take_children(child));
            doc.detach(child);
            *removed += 1;
        } else {
            if doc.get(child).has_tag_name("path") && !inherited.is_empty() {
                let transform = compose(inherited, doc.get(child).attribute("transform"));
                doc.set_attribute(child, "transform", transform);
            }

            if doc.get(child).is_element() {
                // Groups inside non-group containers are flattened into
                // that container and their paths still receive
                // all ancestor group transforms.
                flatten_children(doc, child, inherited, removed);
            }

            new_children.push(child);
        }
    }

    doc.set_children(parent, new_children);
}

/// Concatenates two transform lists, the ancestor's part first.
fn compose(ancestor: &str, own: Option<&str>) -> String {
    match own {
        Some(own) if !own.is_empty() => {
            if ancestor.is_empty() {
                own.to_string()
            } else {
                format!("{} {}", ancestor, own)
            }
        }
        _ => ancestor.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{compose, flatten};
    use crate::Document;

    #[test]
    fn compose_skips_empty_parts() {
        assert_eq!(compose("", Some("rotate(5)")), "rotate(5)");
        assert_eq!(compose("scale(2)", None), "scale(2)");
        assert_eq!(compose("scale(2)", Some("")), "scale(2)");
        assert_eq!(compose("scale(2)", Some("rotate(5)")), "scale(2) rotate(5)");
    }

    #[test]
    fn keeps_malformed_transforms_as_is() {
        // Transform syntax is never validated, only concatenated.
        let mut doc = Document::parse(
            "<svg xmlns='http://www.w3.org/2000/svg'>\
                <g transform='not-a-transform('><path d='M 0 0' transform='broken)'/></g>\
             </svg>",
        )
        .unwrap();

        flatten(&mut doc);

        let path = doc.root_element().first_element_child().unwrap();
        assert_eq!(path.attribute("transform"), Some("not-a-transform( broken)"));
    }

    #[test]
    fn counts_transform_free_groups() {
        let mut doc = Document::parse(
            "<svg xmlns='http://www.w3.org/2000/svg'>\
                <g><g/></g><g/>\
             </svg>",
        )
        .unwrap();

        assert_eq!(flatten(&mut doc), 3);
        assert!(!doc.descendants().any(|n| n.has_tag_name("g")));
    }

    #[test]
    fn group_inside_other_container() {
        let mut doc = Document::parse(
            "<svg xmlns='http://www.w3.org/2000/svg'>\
                <g transform='translate(1 2)'>\
                    <a href='#x'><g transform='scale(3)'><path d='M 0 0'/></g></a>\
                </g>\
             </svg>",
        )
        .unwrap();

        flatten(&mut doc);

        // The `a` container survives and now holds the path directly.
        let a = doc.root_element().first_element_child().unwrap();
        assert_eq!(a.tag_name(), Some("a"));
        let path = a.first_element_child().unwrap();
        assert_eq!(path.tag_name(), Some("path"));
        assert_eq!(path.attribute("transform"), Some("translate(1 2) scale(3)"));
    }

    #[test]
    fn non_path_children_are_untouched() {
        let mut doc = Document::parse(
            "<svg xmlns='http://www.w3.org/2000/svg'>\
                <g transform='scale(2)'><circle r='5'/><path d='M 0 0'/></g>\
             </svg>",
        )
        .unwrap();

        flatten(&mut doc);

        let svg = doc.root_element();
        let circle = svg.first_element_child().unwrap();
        assert_eq!(circle.tag_name(), Some("circle"));
        assert!(!circle.has_attribute("transform"));

        let path = svg.children().find(|n| n.has_tag_name("path")).unwrap();
        assert_eq!(path.attribute("transform"), Some("scale(2)"));
    }
}
