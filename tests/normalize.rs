use std::fmt;

use pretty_assertions::assert_eq;

#[derive(Clone, Copy, PartialEq)]
struct MStr<'a>(&'a str);

impl<'a> fmt::Debug for MStr<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn write_options() -> morphsvg::XmlOptions {
    let mut opt = morphsvg::XmlOptions::default();
    opt.writer_opts.use_single_quote = true;
    opt
}

macro_rules! test {
    ($name:ident, $input:expr, $output:expr) => {
        #[test]
        fn $name() {
            let (svg, _) = morphsvg::normalize_with_options($input, &write_options()).unwrap();
            assert_eq!(MStr(&svg), MStr($output));
        }
    };
}

test!(transform_composition,
"<svg><g transform='translate(10,0)'><g transform='scale(2)'><path d='M0 0' transform='rotate(5)'/></g></g></svg>",
"<svg><path d='M0 0' transform='translate(10,0) scale(2) rotate(5)'/></svg>");

test!(no_transform_group,
"<svg><g><path d='M1 1'/></g></svg>",
"<svg><path d='M1 1'/></svg>");

test!(group_without_paths,
"<svg><g transform='scale(2)'><rect width='1' height='1'/></g></svg>",
"<svg><rect width='1' height='1'/></svg>");

test!(defs_removal,
"<svg><defs><linearGradient id='a'/></defs><path d='M0 0'/></svg>",
"<svg><path d='M0 0'/></svg>");

test!(only_first_defs_is_removed,
"<svg><defs id='a'/><path d='M0 0'/><defs id='b'/></svg>",
"<svg><path d='M0 0'/><defs id='b'/></svg>");

test!(clip_path_elimination,
"<svg><g clip-path='url(#c)'><path clip-path='url(#c)' d='M0 0'/></g><rect clip-path='url(#c)'/></svg>",
"<svg><path d='M0 0'/><rect/></svg>");

test!(root_attribute_cleanup,
"<svg xmlns='http://www.w3.org/2000/svg' xmlns:xlink='http://www.w3.org/1999/xlink' version='1.1' zoomAndPan='magnify' preserveAspectRatio='xMidYMid meet' viewBox='0 0 10 10'><path d='M0 0'/></svg>",
"<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 10 10'><path d='M0 0'/></svg>");

test!(sibling_order_preservation,
"<svg><path d='A'/><g><path d='B'/></g><path d='C'/></svg>",
"<svg><path d='A'/><path d='B'/><path d='C'/></svg>");

test!(deeply_nested_sibling_order,
"<svg><g><path d='A'/><g><path d='B'/><path d='C'/></g><path d='D'/></g></svg>",
"<svg><path d='A'/><path d='B'/><path d='C'/><path d='D'/></svg>");

test!(group_transform_skips_non_paths,
"<svg><g transform='scale(2)'><circle r='5'/><path d='M0 0'/></g></svg>",
"<svg><circle r='5'/><path d='M0 0' transform='scale(2)'/></svg>");

test!(comments_and_text_pass_through,
"<svg><g><!-- keep --><path d='M0 0'/></g><title>morph</title></svg>",
"<svg><!-- keep --><path d='M0 0'/><title>morph</title></svg>");

test!(whitespace_is_preserved_verbatim,
"<svg>\n  <g>\n    <path d='M0 0'/>\n  </g>\n</svg>",
"<svg>\n  \n    <path d='M0 0'/>\n  \n</svg>");

test!(group_inside_non_group_container,
"<svg><a href='#x'><g transform='scale(2)'><path d='M0 0'/></g></a></svg>",
"<svg><a href='#x'><path d='M0 0' transform='scale(2)'/></a></svg>");

test!(already_flat_document_is_unchanged,
"<svg viewBox='0 0 10 10'><path d='M0 0' transform='rotate(5)'/><path d='M1 1'/></svg>",
"<svg viewBox='0 0 10 10'><path d='M0 0' transform='rotate(5)'/><path d='M1 1'/></svg>");

test!(attribute_entities_are_escaped,
"<svg><g><path d='M0 0' data-label='a &amp; b &lt;c&gt;'/></g></svg>",
"<svg><path d='M0 0' data-label='a &amp; b &lt;c&gt;'/></svg>");

#[test]
fn entities_survive_renormalization() {
    let input = "<svg xmlns='http://www.w3.org/2000/svg'>\
                    <g><path d='M0 0' data-label='a &amp; b &lt;c&gt; &quot;q&quot;'/></g>\
                    <title>x &amp; y ]]&gt; z</title>\
                 </svg>";

    let (first, first_stats) = morphsvg::normalize(input).unwrap();
    let (second, _) = morphsvg::normalize(&first).unwrap();

    assert_eq!(first_stats.path_count, 1);
    assert_eq!(MStr(&second), MStr(&first));
}

#[test]
fn idempotence() {
    let input = "<svg xmlns='http://www.w3.org/2000/svg' version='1.1'>\
                    <defs><clipPath id='c'/></defs>\
                    <g transform='translate(1 2)'>\
                        <g><path clip-path='url(#c)' d='M0 0'/></g>\
                    </g>\
                    <path d='M1 1'/>\
                 </svg>";

    let (first, first_stats) = morphsvg::normalize(input).unwrap();
    let (second, second_stats) = morphsvg::normalize(&first).unwrap();

    assert_eq!(MStr(&second), MStr(&first));
    assert_eq!(second_stats.path_count, first_stats.path_count);
    assert_eq!(second_stats.groups_removed, 0);
}

#[test]
fn group_and_clip_path_elimination() {
    let input = "<svg xmlns='http://www.w3.org/2000/svg'>\
                    <g><g transform='scale(2)'><g><path clip-path='url(#c)' d='M0 0'/></g></g></g>\
                 </svg>";

    let (svg, _) = morphsvg::normalize(input).unwrap();
    let doc = morphsvg::Document::parse(&svg).unwrap();

    assert!(!doc.descendants().any(|n| n.has_tag_name("g")));
    assert!(!doc.descendants().any(|n| n.has_attribute("clip-path")));
}

#[test]
fn path_count_is_preserved() {
    let input = "<svg xmlns='http://www.w3.org/2000/svg'>\
                    <path d='M0 0'/>\
                    <g><path d='M1 1'/><g><path d='M2 2'/></g></g>\
                 </svg>";

    let (svg, stats) = morphsvg::normalize(input).unwrap();
    let doc = morphsvg::Document::parse(&svg).unwrap();

    assert_eq!(doc.paths_count(), 3);
    assert_eq!(stats.path_count, 3);
}

#[test]
fn stats_accuracy() {
    let input = "<svg xmlns='http://www.w3.org/2000/svg'>\
                    <g transform='scale(2)'>\
                        <path d='M0 0'/>\
                        <g><path d='M1 1'/></g>\
                    </g>\
                    <path d='M2 2'/>\
                 </svg>";

    let (svg, stats) = morphsvg::normalize(input).unwrap();

    assert_eq!(stats.path_count, 3);
    assert_eq!(stats.groups_removed, 2);
    assert_eq!(stats.output_size, svg.len());
    assert!((stats.kilobytes() - svg.len() as f64 / 1024.0).abs() < 1e-9);
}

#[test]
fn paths_inside_defs_are_not_counted() {
    let input = "<svg xmlns='http://www.w3.org/2000/svg'>\
                    <defs><path d='M9 9'/></defs>\
                    <path d='M0 0'/>\
                 </svg>";

    let (_, stats) = morphsvg::normalize(input).unwrap();
    assert_eq!(stats.path_count, 1);
}

#[test]
fn invalid_input() {
    assert!(morphsvg::normalize("not an svg at all").is_err());
    assert!(morphsvg::normalize("<svg><unclosed</svg>").is_err());
    assert!(matches!(
        morphsvg::normalize("<div><svg/></div>"),
        Err(morphsvg::Error::NotAnSvg)
    ));
}
