//! Square an SVG by widening its viewBox and translating visible content.
//!
//! The document is streamed with quick-xml and split at the root level:
//!
//! ```text
//! prolog  <svg viewBox=…>  lead  child₀ tail₀  child₁ tail₁ …  </svg>  epilog
//! ```
//!
//! Non-visual children (defs, metadata, title, desc, style) are written back
//! in place; everything else is collected into one trailing
//! `<g transform="matrix(1,0,0,1,tx,ty)">`. Raw events are replayed as-is, so
//! namespaces, entities and formatting inside each child survive untouched.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use encoding_rs::{Encoding, UTF_8};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::viewbox::ViewBox;
use crate::error::SquarizeError;
use crate::image::ensure_parent_dir;
use crate::image::padding::SquarePadding;
use crate::log;

/// Root children that never move into the wrapper group.
const PRESERVED_TAGS: &[&[u8]] = &[b"defs", b"metadata", b"title", b"desc", b"style"];

/// Result of squaring an SVG document.
#[derive(Debug, Clone)]
pub struct SquaredSvg {
    /// Serialized output document.
    pub document: String,
    /// viewBox as declared by the input.
    pub original: ViewBox,
    /// Square viewBox written to the output.
    pub viewbox: ViewBox,
    pub padding: SquarePadding<f64>,
}

/// A root-level element together with its subtree and trailing nodes.
struct RootChild<'a> {
    preserved: bool,
    events: Vec<Event<'a>>,
}

/// Document split at the root level.
struct SplitDocument<'a> {
    prolog: Vec<Event<'a>>,
    root: BytesStart<'a>,
    lead: Vec<Event<'a>>,
    children: Vec<RootChild<'a>>,
    epilog: Vec<Event<'a>>,
}

/// Where an event read inside the root element belongs.
enum Slot {
    RootEnd,
    Child { preserved: bool, open: bool },
    Tail,
    Nested,
}

/// Square an SVG file and write the result to `output`.
pub fn squarize_svg(input: &Path, output: &Path) -> Result<SquaredSvg, SquarizeError> {
    let bytes = fs::read(input).map_err(|e| SquarizeError::io(input, e))?;
    let source = decode_source(&bytes)?;
    let squared = squarize_svg_str(&source)?;

    log!("svg"; "Original dimensions: {} x {}", squared.original.width, squared.original.height);
    log!("svg"; "Square size: {} x {}", squared.padding.side, squared.padding.side);
    log!("svg"; "Padding: {}", squared.padding);

    ensure_parent_dir(output)?;
    fs::write(output, &squared.document).map_err(|e| SquarizeError::io(output, e))?;
    Ok(squared)
}

/// Square an SVG document held in memory.
pub fn squarize_svg_str(source: &str) -> Result<SquaredSvg, SquarizeError> {
    let doc = split_document(source)?;

    let raw = find_viewbox(&doc.root)?
        .filter(|value| !value.trim().is_empty())
        .ok_or(SquarizeError::MissingViewBox)?;

    let original = ViewBox::parse(&raw)?;
    let (viewbox, padding) = original.squared();
    let document = write_document(doc, &viewbox, &padding)?;

    Ok(SquaredSvg {
        document,
        original,
        viewbox,
        padding,
    })
}

/// Decode raw document bytes into UTF-8 text.
///
/// A byte-order mark wins over the `encoding` named in the XML declaration.
/// With neither, the document is read as UTF-8.
fn decode_source(bytes: &[u8]) -> Result<Cow<'_, str>, SquarizeError> {
    let encoding = match declared_encoding(bytes) {
        Some(label) => Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| SquarizeError::InvalidSvg(format!("unknown encoding `{label}`")))?,
        None => UTF_8,
    };

    let (text, used, malformed) = encoding.decode(bytes);
    if malformed {
        return Err(SquarizeError::InvalidSvg(format!(
            "document is not valid {}",
            used.name()
        )));
    }
    Ok(text)
}

/// `encoding` pseudo-attribute of a leading XML declaration.
fn declared_encoding(bytes: &[u8]) -> Option<String> {
    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();
    let Ok(Event::Decl(decl)) = reader.read_event_into(&mut buf) else {
        return None;
    };
    let label = decl.encoding()?.ok()?;
    Some(String::from_utf8_lossy(&label).into_owned())
}

fn find_viewbox(root: &BytesStart) -> Result<Option<String>, SquarizeError> {
    for attr in root.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"viewBox" {
            return Ok(Some(String::from_utf8_lossy(&attr.value).into_owned()));
        }
    }
    Ok(None)
}

#[inline]
fn is_preserved(elem: &BytesStart) -> bool {
    PRESERVED_TAGS.contains(&elem.local_name().as_ref())
}

fn is_blank(event: &Event) -> bool {
    matches!(event, Event::Text(t) if t.iter().all(u8::is_ascii_whitespace))
}

fn split_document(source: &str) -> Result<SplitDocument<'_>, SquarizeError> {
    let mut reader = Reader::from_str(source);

    let mut prolog = Vec::new();
    let (root, self_closing) = loop {
        match reader.read_event()? {
            Event::Start(e) => break (e, false),
            Event::Empty(e) => break (e, true),
            Event::Eof => {
                return Err(SquarizeError::InvalidSvg("document has no root element".into()));
            }
            event => prolog.push(event),
        }
    };

    let mut lead = Vec::new();
    let mut children: Vec<RootChild> = Vec::new();

    if !self_closing {
        // open elements below the root
        let mut depth = 0usize;
        loop {
            let event = reader.read_event()?;
            let slot = match &event {
                Event::Eof => {
                    return Err(SquarizeError::InvalidSvg("root element is not closed".into()));
                }
                Event::End(_) if depth == 0 => Slot::RootEnd,
                Event::Start(e) if depth == 0 => Slot::Child {
                    preserved: is_preserved(e),
                    open: true,
                },
                Event::Empty(e) if depth == 0 => Slot::Child {
                    preserved: is_preserved(e),
                    open: false,
                },
                _ if depth == 0 => Slot::Tail,
                Event::Start(_) => {
                    depth += 1;
                    Slot::Nested
                }
                Event::End(_) => {
                    depth -= 1;
                    Slot::Nested
                }
                _ => Slot::Nested,
            };

            match slot {
                Slot::RootEnd => break,
                Slot::Child { preserved, open } => {
                    if open {
                        depth = 1;
                    }
                    children.push(RootChild {
                        preserved,
                        events: vec![event],
                    });
                }
                Slot::Tail | Slot::Nested => match children.last_mut() {
                    Some(child) => child.events.push(event),
                    None => lead.push(event),
                },
            }
        }
    }

    let mut epilog = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Eof => break,
            event => epilog.push(event),
        }
    }

    Ok(SplitDocument {
        prolog,
        root,
        lead,
        children,
        epilog,
    })
}

fn write_document(
    doc: SplitDocument<'_>,
    viewbox: &ViewBox,
    padding: &SquarePadding<f64>,
) -> Result<String, SquarizeError> {
    let root_name = std::str::from_utf8(doc.root.name().as_ref())
        .map_err(|_| SquarizeError::InvalidSvg("root tag is not valid UTF-8".into()))?
        .to_owned();

    let mut root = BytesStart::new(root_name.clone());
    for attr in doc.root.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"viewBox" {
            root.push_attribute(("viewBox", viewbox.to_string().as_str()));
        } else {
            root.push_attribute(attr);
        }
    }

    // same prefix as the root so the group stays in the SVG namespace
    let group_name = match root_name.rsplit_once(':') {
        Some((prefix, _)) => format!("{prefix}:g"),
        None => "g".to_owned(),
    };
    let transform = format!("matrix(1,0,0,1,{},{})", padding.pad_x, padding.pad_y);
    let mut group = BytesStart::new(group_name.as_str());
    group.push_attribute(("transform", transform.as_str()));

    let (preserved, visible): (Vec<_>, Vec<_>) =
        doc.children.into_iter().partition(|c| c.preserved);

    let mut writer = Writer::new(Vec::new());
    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    emit(&mut writer, Event::Text(BytesText::new("\n")))?;

    for event in doc.prolog {
        if matches!(event, Event::Decl(_)) || is_blank(&event) {
            continue;
        }
        emit(&mut writer, event)?;
        emit(&mut writer, Event::Text(BytesText::new("\n")))?;
    }

    emit(&mut writer, Event::Start(root))?;
    for event in doc.lead {
        emit(&mut writer, event)?;
    }
    for event in preserved.into_iter().flat_map(|c| c.events) {
        emit(&mut writer, event)?;
    }
    if visible.is_empty() {
        emit(&mut writer, Event::Empty(group))?;
    } else {
        emit(&mut writer, Event::Start(group))?;
        for event in visible.into_iter().flat_map(|c| c.events) {
            emit(&mut writer, event)?;
        }
        emit(&mut writer, Event::End(BytesEnd::new(group_name.as_str())))?;
    }
    emit(&mut writer, Event::End(BytesEnd::new(root_name.as_str())))?;

    for event in doc.epilog {
        if is_blank(&event) {
            continue;
        }
        emit(&mut writer, Event::Text(BytesText::new("\n")))?;
        emit(&mut writer, event)?;
    }
    emit(&mut writer, Event::Text(BytesText::new("\n")))?;

    String::from_utf8(writer.into_inner())
        .map_err(|_| SquarizeError::InvalidSvg("output is not valid UTF-8".into()))
}

#[inline]
fn emit<'e>(writer: &mut Writer<Vec<u8>>, event: Event<'e>) -> Result<(), SquarizeError> {
    writer
        .write_event(event)
        .map_err(|e| SquarizeError::InvalidSvg(format!("failed to serialize: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LANDSCAPE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 60" width="100">
  <title>Logo</title>
  <defs><linearGradient id="g1"/></defs>
  <rect x="0" y="0" width="100" height="60" fill="url(#g1)"/>
  <style>.a { fill: red; }</style>
  <path class="a" d="M0 0L10 10"/>
</svg>
"#;

    /// Byte range of the wrapper group in the output.
    fn group_span(doc: &str) -> (usize, usize) {
        let start = doc.find("<g transform=").expect("wrapper group");
        let end = doc.rfind("</g>").expect("wrapper end");
        (start, end)
    }

    #[test]
    fn test_landscape_example() {
        let out = squarize_svg_str(LANDSCAPE).unwrap();
        assert_eq!(out.viewbox.to_string(), "0 0 100 100");
        assert_eq!(out.padding.pad_x, 0.0);
        assert_eq!(out.padding.pad_y, 20.0);
        assert!(out.document.contains(r#"viewBox="0 0 100 100""#));
        assert!(out.document.contains(r#"<g transform="matrix(1,0,0,1,0,20)">"#));
    }

    #[test]
    fn test_declaration_written_once() {
        let out = squarize_svg_str(LANDSCAPE).unwrap();
        assert!(
            out.document
                .starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#)
        );
        assert_eq!(out.document.matches("<?xml").count(), 1);
    }

    #[test]
    fn test_preserved_elements_stay_at_root() {
        let out = squarize_svg_str(LANDSCAPE).unwrap();
        let (start, end) = group_span(&out.document);

        for tag in ["<title>", "<defs>", "<style>"] {
            let pos = out.document.find(tag).unwrap();
            assert!(pos < start, "{tag} moved into the wrapper");
        }
        let inside = &out.document[start..end];
        assert!(inside.contains("<rect"));
        assert!(inside.contains("<path"));
    }

    #[test]
    fn test_visible_order_kept() {
        let out = squarize_svg_str(LANDSCAPE).unwrap();
        let rect = out.document.find("<rect").unwrap();
        let path = out.document.find("<path").unwrap();
        assert!(rect < path);
    }

    #[test]
    fn test_wrapper_is_last_root_child() {
        let out = squarize_svg_str(LANDSCAPE).unwrap();
        let tail = out.document.trim_end();
        assert!(tail.ends_with("</g></svg>"));
    }

    #[test]
    fn test_other_root_attributes_preserved() {
        let out = squarize_svg_str(LANDSCAPE).unwrap();
        assert!(
            out.document
                .contains(r#"xmlns="http://www.w3.org/2000/svg""#)
        );
        assert!(out.document.contains(r#"width="100""#));
    }

    #[test]
    fn test_portrait_pads_x() {
        let svg = r#"<svg viewBox="-10 5 30 90"><circle r="3"/></svg>"#;
        let out = squarize_svg_str(svg).unwrap();
        assert_eq!(out.viewbox.to_string(), "-10 5 90 90");
        assert!(out.document.contains("matrix(1,0,0,1,30,0)"));
    }

    #[test]
    fn test_fractional_padding_not_rounded() {
        let svg = r#"<svg viewBox="0 0 10 7"><rect/></svg>"#;
        let out = squarize_svg_str(svg).unwrap();
        assert_eq!(out.padding.pad_y, 1.5);
        assert!(out.document.contains("matrix(1,0,0,1,0,1.5)"));
    }

    #[test]
    fn test_square_input_zero_translation() {
        let svg = r#"<svg viewBox="0 0 24 24"><path d="M1 1"/></svg>"#;
        let out = squarize_svg_str(svg).unwrap();
        assert!(out.padding.is_noop());
        assert_eq!(out.viewbox, out.original);
        assert!(out.document.contains("matrix(1,0,0,1,0,0)"));
        assert!(out.document.contains(r#"<path d="M1 1"/>"#));
    }

    #[test]
    fn test_nested_preserved_tags_move_with_parent() {
        let svg = r#"<svg viewBox="0 0 4 2"><g id="a"><title>inner</title><defs/></g></svg>"#;
        let out = squarize_svg_str(svg).unwrap();
        let (start, end) = group_span(&out.document);
        let inner_title = out.document.find("<title>inner").unwrap();
        assert!(start < inner_title && inner_title < end);
    }

    #[test]
    fn test_prefixed_root_uses_prefixed_group() {
        let svg = r#"<svg:svg xmlns:svg="http://www.w3.org/2000/svg" viewBox="0 0 2 1"><svg:title>t</svg:title><svg:rect/></svg:svg>"#;
        let out = squarize_svg_str(svg).unwrap();
        assert!(out.document.contains(r#"<svg:g transform="matrix(1,0,0,1,0,0.5)"><svg:rect/></svg:g></svg:svg>"#));
        // preserved by local name despite the prefix
        let title = out.document.find("<svg:title>").unwrap();
        let group = out.document.find("<svg:g ").unwrap();
        assert!(title < group);
    }

    #[test]
    fn test_only_preserved_children_gives_empty_group() {
        let svg = r#"<svg viewBox="0 0 2 1"><desc>d</desc><metadata/></svg>"#;
        let out = squarize_svg_str(svg).unwrap();
        assert!(out.document.contains(r#"<g transform="matrix(1,0,0,1,0,0.5)"/></svg>"#));
    }

    #[test]
    fn test_self_closing_root() {
        let svg = r#"<svg viewBox="0 0 2 1"/>"#;
        let out = squarize_svg_str(svg).unwrap();
        assert!(out.document.contains(r#"<svg viewBox="0 0 2 2"><g transform="matrix(1,0,0,1,0,0.5)"/></svg>"#));
    }

    #[test]
    fn test_entities_and_comments_survive() {
        let svg = "<svg viewBox=\"0 0 2 1\"><text>a &amp; b</text><!-- note --></svg>";
        let out = squarize_svg_str(svg).unwrap();
        assert!(out.document.contains("<text>a &amp; b</text><!-- note --></g>"));
    }

    #[test]
    fn test_doctype_kept() {
        let svg = "<!DOCTYPE svg>\n<svg viewBox=\"0 0 2 1\"/>";
        let out = squarize_svg_str(svg).unwrap();
        let doctype = out.document.find("<!DOCTYPE").unwrap();
        assert!(doctype < out.document.find("<svg ").unwrap());
    }

    #[test]
    fn test_missing_viewbox() {
        let err = squarize_svg_str(r#"<svg width="10" height="5"><rect/></svg>"#).unwrap_err();
        assert!(matches!(err, SquarizeError::MissingViewBox));
    }

    #[test]
    fn test_blank_viewbox_is_missing() {
        for value in ["", "   ", "\t\n"] {
            let doc = format!(r#"<svg viewBox="{value}"><rect/></svg>"#);
            let err = squarize_svg_str(&doc).unwrap_err();
            assert!(matches!(err, SquarizeError::MissingViewBox), "{value:?}");
        }
    }

    #[test]
    fn test_malformed_viewbox() {
        let err = squarize_svg_str(r#"<svg viewBox="0 0 10"><rect/></svg>"#).unwrap_err();
        assert!(matches!(err, SquarizeError::MalformedViewBox(_)));
    }

    #[test]
    fn test_no_root_element() {
        let err = squarize_svg_str("<?xml version=\"1.0\"?>\n").unwrap_err();
        assert!(matches!(err, SquarizeError::InvalidSvg(_)));
    }

    #[test]
    fn test_file_roundtrip_leaves_input_untouched() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("logo.svg");
        let output = dir.path().join("out/logo_sq.svg");
        fs::write(&input, LANDSCAPE).unwrap();

        let squared = squarize_svg(&input, &output).unwrap();
        assert_eq!(fs::read_to_string(&input).unwrap(), LANDSCAPE);
        assert_eq!(fs::read_to_string(&output).unwrap(), squared.document);

        // the output is itself a valid input and is already square
        let again = squarize_svg_str(&squared.document).unwrap();
        assert!(again.padding.is_noop());
    }

    #[test]
    fn test_latin1_input_written_as_utf8() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("latin1.svg");
        let output = dir.path().join("latin1_sq.svg");
        let mut bytes =
            br#"<?xml version="1.0" encoding="ISO-8859-1"?><svg viewBox="0 0 100 60"><title>caf"#
                .to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(br#"</title><rect width="100" height="60"/></svg>"#);
        fs::write(&input, &bytes).unwrap();

        let squared = squarize_svg(&input, &output).unwrap();
        assert_eq!(squared.padding.pad_y, 20.0);

        let out = fs::read_to_string(&output).unwrap();
        assert!(out.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(out.contains("<title>café</title>"));
        assert!(!out.contains("ISO-8859-1"));
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let mut bytes = b"\xEF\xBB\xBF".to_vec();
        bytes.extend_from_slice(LANDSCAPE.as_bytes());
        let source = decode_source(&bytes).unwrap();
        assert!(source.starts_with("<?xml"));
        assert!(squarize_svg_str(&source).is_ok());
    }

    #[test]
    fn test_unknown_or_mismatched_encoding() {
        let err = decode_source(br#"<?xml version="1.0" encoding="x-klingon"?><svg/>"#).unwrap_err();
        assert!(matches!(err, SquarizeError::InvalidSvg(ref msg) if msg.contains("x-klingon")));

        // no declaration means UTF-8
        let err = decode_source(b"<svg viewBox=\"0 0 1 1\"><title>caf\xE9</title></svg>").unwrap_err();
        assert!(matches!(err, SquarizeError::InvalidSvg(_)));
    }
}
