//! Package writer: in-memory document back to a ZIP container.
//!
//! Every part is emitted in its original archive order. Only two things
//! are ever rewritten: the `<p:sldSz>` attributes when the canvas
//! changed, and the geometry/font-size attributes of dirty elements.
//! A rewritten tag is spliced into the original bytes; nothing else is
//! re-serialized.

use super::reader::{attr_i64, attr_u32};
use crate::detect::PRESENTATION_PART;
use crate::error::{Error, Result};
use crate::model::{Canvas, Document, Element, Slide, SlideSegment};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;
use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::ops::Range;
use std::path::Path;
use zip::write::SimpleFileOptions;

/// Save a presentation to a file path.
pub fn write_file<P: AsRef<Path>>(document: &Document, path: P) -> Result<()> {
    let bytes = write_bytes(document)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Serialize a presentation to package bytes.
pub fn write_bytes(document: &Document) -> Result<Vec<u8>> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let dirty_slides: HashMap<&str, &Slide> = document
        .slides
        .iter()
        .filter(|s| s.is_dirty())
        .map(|s| (s.part_name.as_str(), s))
        .collect();

    for part in &document.package.parts {
        let data: Cow<'_, [u8]> = if part.name == PRESENTATION_PART {
            match rewrite_slide_size(&part.data, document.canvas)? {
                Some(rewritten) => Cow::Owned(rewritten),
                None => Cow::Borrowed(&part.data),
            }
        } else if let Some(slide) = dirty_slides.get(part.name.as_str()) {
            Cow::Owned(assemble_slide(slide)?)
        } else {
            Cow::Borrowed(&part.data)
        };
        writer.start_file(part.name.as_str(), options)?;
        writer.write_all(&data)?;
    }

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

/// Rewrite the `cx`/`cy` attributes of the first `<p:sldSz>`.
///
/// Returns `None` when the stored size already matches the canvas, so
/// an untransformed document round-trips byte-for-byte.
fn rewrite_slide_size(xml: &[u8], canvas: Canvas) -> Result<Option<Vec<u8>>> {
    let mut reader = Reader::from_reader(xml);
    loop {
        let start = reader.buffer_position() as usize;
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                if e.local_name().as_ref() == b"sldSz" =>
            {
                let end = reader.buffer_position() as usize;
                if attr_i64(e, b"cx") == Some(canvas.width)
                    && attr_i64(e, b"cy") == Some(canvas.height)
                {
                    return Ok(None);
                }
                let is_empty = xml[..end].ends_with(b"/>");
                let replacements = [
                    (&b"cx"[..], canvas.width.to_string()),
                    (&b"cy"[..], canvas.height.to_string()),
                ];
                let tag = rebuild_tag(e, is_empty, &replacements);
                return Ok(Some(splice(xml, vec![(start..end, tag)])));
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(format!("{PRESENTATION_PART}: {e}"))),
            _ => {}
        }
    }
    Err(Error::Xml(format!(
        "{PRESENTATION_PART}: missing p:sldSz element"
    )))
}

/// Reassemble a slide part from its segments.
fn assemble_slide(slide: &Slide) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for segment in &slide.segments {
        match segment {
            SlideSegment::Raw(bytes) => out.extend_from_slice(bytes),
            SlideSegment::Element(element) => {
                if element.is_dirty() {
                    out.extend_from_slice(&reserialize_element(element)?);
                } else {
                    out.extend_from_slice(&element.xml);
                }
            }
        }
    }
    Ok(out)
}

/// Rewrite a dirty element's geometry and font-size attributes inside
/// its raw XML.
///
/// The walk mirrors the reader exactly: the first `<a:off>`, the first
/// `<a:ext>`, and the k-th run-properties tag carrying a parseable
/// `sz` directly inside `<a:r>` line up with the capabilities the
/// reader collected.
fn reserialize_element(element: &Element) -> Result<Vec<u8>> {
    let xml = element.xml.as_slice();
    let runs = element.runs();
    let mut reader = Reader::from_reader(xml);
    let mut rewrites: Vec<(Range<usize>, Vec<u8>)> = Vec::new();
    let mut depth = 0usize;
    let mut run_depth: Option<usize> = None;
    let mut run_index = 0usize;
    let mut did_off = false;
    let mut did_ext = false;

    loop {
        let start = reader.buffer_position() as usize;
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let end = reader.buffer_position() as usize;
                plan_rewrite(
                    e,
                    false,
                    start..end,
                    element,
                    runs,
                    depth,
                    run_depth,
                    &mut run_index,
                    &mut did_off,
                    &mut did_ext,
                    &mut rewrites,
                );
                if run_depth.is_none() && e.local_name().as_ref() == b"r" {
                    run_depth = Some(depth);
                }
                depth += 1;
            }
            Ok(Event::Empty(ref e)) => {
                let end = reader.buffer_position() as usize;
                plan_rewrite(
                    e,
                    true,
                    start..end,
                    element,
                    runs,
                    depth,
                    run_depth,
                    &mut run_index,
                    &mut did_off,
                    &mut did_ext,
                    &mut rewrites,
                );
            }
            Ok(Event::End(_)) => {
                depth -= 1;
                if run_depth == Some(depth) {
                    run_depth = None;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(format!("element re-serialize: {e}"))),
            _ => {}
        }
    }

    if rewrites.is_empty() {
        return Ok(element.xml.clone());
    }
    Ok(splice(xml, rewrites))
}

#[allow(clippy::too_many_arguments)]
fn plan_rewrite(
    e: &BytesStart<'_>,
    is_empty: bool,
    span: Range<usize>,
    element: &Element,
    runs: &[crate::model::TextRun],
    depth: usize,
    run_depth: Option<usize>,
    run_index: &mut usize,
    did_off: &mut bool,
    did_ext: &mut bool,
    rewrites: &mut Vec<(Range<usize>, Vec<u8>)>,
) {
    match e.local_name().as_ref() {
        b"off" if !*did_off => {
            *did_off = true;
            if let Some(anchor) = element.anchor() {
                let replacements = [
                    (&b"x"[..], anchor.x.to_string()),
                    (&b"y"[..], anchor.y.to_string()),
                ];
                rewrites.push((span, rebuild_tag(e, is_empty, &replacements)));
            }
        }
        b"ext" if !*did_ext => {
            *did_ext = true;
            if let Some(extent) = element.extent() {
                let replacements = [
                    (&b"cx"[..], extent.cx.to_string()),
                    (&b"cy"[..], extent.cy.to_string()),
                ];
                rewrites.push((span, rebuild_tag(e, is_empty, &replacements)));
            }
        }
        b"rPr" if run_depth.is_some_and(|d| depth == d + 1) => {
            if attr_u32(e, b"sz").is_some() {
                if let Some(run) = runs.get(*run_index) {
                    let replacements = [(&b"sz"[..], run.font_size.to_string())];
                    rewrites.push((span, rebuild_tag(e, is_empty, &replacements)));
                }
                *run_index += 1;
            }
        }
        _ => {}
    }
}

/// Rebuild one tag with selected attribute values replaced. Attribute
/// order and every non-replaced value are preserved.
fn rebuild_tag(e: &BytesStart<'_>, is_empty: bool, replacements: &[(&[u8], String)]) -> Vec<u8> {
    let mut out = Vec::with_capacity(64);
    out.push(b'<');
    out.extend_from_slice(e.name().as_ref());
    for attr in e.attributes().flatten() {
        out.push(b' ');
        out.extend_from_slice(attr.key.as_ref());
        out.extend_from_slice(b"=\"");
        match replacements.iter().find(|(key, _)| *key == attr.key.as_ref()) {
            Some((_, value)) => out.extend_from_slice(value.as_bytes()),
            None => {
                // Raw value bytes are still escaped; only a quote from a
                // single-quoted source needs re-escaping.
                for &byte in attr.value.iter() {
                    if byte == b'"' {
                        out.extend_from_slice(b"&quot;");
                    } else {
                        out.push(byte);
                    }
                }
            }
        }
        out.push(b'"');
    }
    if is_empty {
        out.extend_from_slice(b"/>");
    } else {
        out.push(b'>');
    }
    out
}

/// Replace byte ranges of `xml` with new bytes. Ranges must be
/// non-overlapping and in increasing order.
fn splice(xml: &[u8], rewrites: Vec<(Range<usize>, Vec<u8>)>) -> Vec<u8> {
    let mut out = Vec::with_capacity(xml.len() + 64);
    let mut cursor = 0usize;
    for (span, bytes) in rewrites {
        out.extend_from_slice(&xml[cursor..span.start]);
        out.extend_from_slice(&bytes);
        cursor = span.end;
    }
    out.extend_from_slice(&xml[cursor..]);
    out
}
