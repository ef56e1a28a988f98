// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`morphsvg` prepares an SVG document for shape-morphing animation tooling.

Morphing libraries want a flat list of `path` elements: no groups between
them, no external definitions, no clipping that hides geometry.
Real-world SVG exports are nothing like that, so `morphsvg` rewrites the
document into an equivalent-looking one where the root `svg` and `path`
elements are the only structural nodes.

## What it does

- Removes the `defs` subtree.
- Removes the `clip-path` attribute from every element.
- Removes the `xmlns:xlink`, `zoomAndPan`, `preserveAspectRatio` and
  `version` root attributes.
- Eliminates every `g` element by splicing its children into its parent
  at the group's position, folding all group-level transforms into each
  affected path's own `transform` attribute.
- Reports how many paths survived, how many groups were eliminated
  and how large the output is.

Transforms are composed by transform-list concatenation in
ancestor-to-descendant order, never by matrix multiplication,
so the output stays textually predictable.

## What it doesn't do

- Path data is an opaque payload. `d` attributes are copied verbatim.
- Non-path shapes (`circle`, `rect`, ...) are promoted out of groups
  but otherwise untouched. No group transform is folded into them.
- `use`/`symbol` references are not resolved.
- No SVG schema validation. The only possible failure is an input
  without a root `svg` element.

## Example

```rust
let (svg, stats) = morphsvg::normalize(
    "<svg xmlns='http://www.w3.org/2000/svg'>\
        <g transform='scale(2)'><path d='M 0 0'/></g>\
     </svg>",
).unwrap();

assert_eq!(
    svg,
    "<svg xmlns=\"http://www.w3.org/2000/svg\">\
        <path d=\"M 0 0\" transform=\"scale(2)\"/>\
     </svg>",
);
assert_eq!(stats.path_count, 1);
assert_eq!(stats.groups_removed, 1);
```
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(missing_copy_implementations)]

mod error;
mod export;
mod flatten;
mod parse;
mod sanitize;
mod tree;

pub use xmlwriter;

pub use crate::error::Error;
pub use crate::export::XmlOptions;
pub use crate::tree::{Attribute, Children, Descendants, Document, Node, NodeId};

/// Conversion statistics.
///
/// The structured result the presentation layer consumes.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Stats {
    /// Number of `path` elements in the output document.
    pub path_count: usize,
    /// Number of eliminated `g` elements.
    pub groups_removed: usize,
    /// Size of the serialized output in bytes.
    pub output_size: usize,
}

impl Stats {
    /// Returns the output size in kilobytes.
    pub fn kilobytes(&self) -> f64 {
        self.output_size as f64 / 1024.0
    }
}

impl Document {
    /// Removes `defs`, `clip-path` attributes and presentational
    /// root attributes.
    pub fn sanitize(&mut self) {
        sanitize::sanitize(self);
    }

    /// Eliminates every `g` element, folding group transforms into
    /// descendant paths. Returns the number of eliminated groups.
    pub fn flatten_groups(&mut self) -> usize {
        flatten::flatten(self)
    }

    /// Returns the number of `path` elements in the document.
    pub fn paths_count(&self) -> usize {
        self.descendants()
            .filter(|n| n.has_tag_name("path"))
            .count()
    }
}

/// Normalizes an SVG document for morphing.
///
/// A pure function: SVG text in, normalized SVG text and [`Stats`] out.
/// The only failure is [`Error`] when the input has no root `svg` element;
/// there is no partial output.
pub fn normalize(text: &str) -> Result<(String, Stats), Error> {
    normalize_with_options(text, &XmlOptions::default())
}

/// Same as [`normalize`], but with custom XML writing options.
pub fn normalize_with_options(text: &str, opt: &XmlOptions) -> Result<(String, Stats), Error> {
    let mut doc = Document::parse(text)?;

    doc.sanitize();
    let groups_removed = doc.flatten_groups();
    let path_count = doc.paths_count();

    let svg = doc.to_string(opt);
    let stats = Stats {
        path_count,
        groups_removed,
        output_size: svg.len(),
    };

    Ok((svg, stats))
}
