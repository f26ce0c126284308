//! Package reader: ZIP container to in-memory document.
//!
//! Loading splits each slide part into byte spans: raw XML is kept
//! verbatim, and every top-level shape-tree child becomes an element
//! with parsed geometry capabilities. The split walks events with
//! `quick_xml` but extracts elements by byte offsets, so namespace
//! prefixes, attribute order and whitespace all survive.

use super::{Package, PackagePart};
use crate::detect::{CORE_PROPERTIES_PART, PRESENTATION_PART, ZIP_MAGIC};
use crate::error::{Error, Result};
use crate::model::{
    Canvas, CoreProperties, Document, Element, ElementKind, EmuExtent, EmuPoint, Slide,
    SlideSegment, TextRun,
};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::Path;

/// Relationships part for the presentation part.
const PRESENTATION_RELS_PART: &str = "ppt/_rels/presentation.xml.rels";

/// Load a presentation from a file path.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let data = std::fs::read(path)?;
    read_bytes(&data)
}

/// Load a presentation from bytes.
pub fn read_bytes(data: &[u8]) -> Result<Document> {
    if !data.starts_with(ZIP_MAGIC) {
        return Err(Error::UnknownFormat);
    }
    let package = read_package(data)?;

    let presentation = package
        .part(PRESENTATION_PART)
        .ok_or(Error::UnknownFormat)?;
    let (canvas, slide_rids) = parse_presentation(&presentation.data)?;
    debug!(
        "presentation canvas {}, {} slide reference(s)",
        canvas,
        slide_rids.len()
    );

    let relationships = match package.part(PRESENTATION_RELS_PART) {
        Some(part) => parse_relationships(&part.data)?,
        None if slide_rids.is_empty() => HashMap::new(),
        None => return Err(Error::MissingPart(PRESENTATION_RELS_PART.to_string())),
    };

    let mut slides = Vec::with_capacity(slide_rids.len());
    for rid in &slide_rids {
        let target = relationships
            .get(rid)
            .ok_or_else(|| Error::MissingRelationship(rid.clone()))?;
        let part_name = resolve_target("ppt", target);
        let part = package
            .part(&part_name)
            .ok_or_else(|| Error::MissingPart(part_name.clone()))?;
        slides.push(parse_slide(&part_name, &part.data)?);
    }

    let properties = match package.part(CORE_PROPERTIES_PART) {
        Some(part) => Some(parse_core_properties(&part.data)?),
        None => None,
    };

    Ok(Document::new(canvas, slides, properties, package))
}

/// Read every archive entry into memory, in original order.
fn read_package(data: &[u8]) -> Result<Package> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;
    let mut parts = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let mut file = archive.by_index(index)?;
        if file.is_dir() {
            continue;
        }
        let mut bytes = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut bytes)?;
        parts.push(PackagePart {
            name: file.name().to_string(),
            data: bytes,
        });
    }
    Ok(Package { parts })
}

/// Parse the canvas size and ordered slide relationship ids from
/// `ppt/presentation.xml`.
fn parse_presentation(data: &[u8]) -> Result<(Canvas, Vec<String>)> {
    let mut reader = Reader::from_reader(data);
    let mut canvas = None;
    let mut slide_rids = Vec::new();
    let mut in_slide_list = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                match e.local_name().as_ref() {
                    b"sldSz" => {
                        let cx = attr_i64(e, b"cx");
                        let cy = attr_i64(e, b"cy");
                        match (cx, cy) {
                            (Some(width), Some(height)) => {
                                canvas = Some(Canvas::new(width, height));
                            }
                            _ => {
                                return Err(Error::Xml(format!(
                                    "{PRESENTATION_PART}: p:sldSz is missing cx/cy"
                                )));
                            }
                        }
                    }
                    b"sldIdLst" => in_slide_list = true,
                    b"sldId" if in_slide_list => {
                        if let Some(rid) = attr_string(e, b"r:id") {
                            slide_rids.push(rid);
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) if e.local_name().as_ref() == b"sldIdLst" => {
                in_slide_list = false;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(format!("{PRESENTATION_PART}: {e}"))),
            _ => {}
        }
    }

    let canvas = canvas.ok_or_else(|| {
        Error::Xml(format!("{PRESENTATION_PART}: missing p:sldSz element"))
    })?;
    Ok((canvas, slide_rids))
}

/// Parse a relationships part into an id-to-target map.
///
/// External targets are skipped; they can never name a slide part.
fn parse_relationships(data: &[u8]) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_reader(data);
    let mut map = HashMap::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"Relationship" {
                    let external = attr_string(e, b"TargetMode")
                        .is_some_and(|mode| mode.eq_ignore_ascii_case("External"));
                    if external {
                        continue;
                    }
                    if let (Some(id), Some(target)) =
                        (attr_string(e, b"Id"), attr_string(e, b"Target"))
                    {
                        map.insert(id, target);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(format!("{PRESENTATION_RELS_PART}: {e}"))),
            _ => {}
        }
    }
    Ok(map)
}

/// Resolve a relationship target against a base directory.
///
/// Targets are usually relative ("slides/slide1.xml"); absolute targets
/// start with "/", and "../" segments step out of the base.
fn resolve_target(base: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }
    let mut segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Split a slide part into raw spans and elements.
pub(super) fn parse_slide(part_name: &str, data: &[u8]) -> Result<Slide> {
    let mut reader = Reader::from_reader(data);
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut sp_tree_depth: Option<usize> = None;
    let mut segment_start = 0usize;

    loop {
        let event_start = reader.buffer_position() as usize;
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let child_of_tree = sp_tree_depth == Some(depth.wrapping_sub(1));
                let kind = if child_of_tree {
                    ElementKind::from_local_name(e.local_name().as_ref())
                } else {
                    None
                };
                if sp_tree_depth.is_none() && e.local_name().as_ref() == b"spTree" {
                    sp_tree_depth = Some(depth);
                }
                depth += 1;

                if let Some(kind) = kind {
                    // Consume the subtree, then lift the whole byte span.
                    let element_depth = depth;
                    loop {
                        match reader.read_event() {
                            Ok(Event::Start(_)) => depth += 1,
                            Ok(Event::End(_)) => {
                                depth -= 1;
                                if depth < element_depth {
                                    break;
                                }
                            }
                            Ok(Event::Eof) => {
                                return Err(Error::Xml(format!(
                                    "{part_name}: unexpected end of file inside element"
                                )));
                            }
                            Err(e) => {
                                return Err(Error::Xml(format!("{part_name}: {e}")));
                            }
                            _ => {}
                        }
                    }
                    let element_end = reader.buffer_position() as usize;
                    if event_start > segment_start {
                        segments.push(SlideSegment::Raw(data[segment_start..event_start].to_vec()));
                    }
                    let xml = data[event_start..element_end].to_vec();
                    segments.push(SlideSegment::Element(parse_element(kind, xml)));
                    segment_start = element_end;
                }
            }
            Ok(Event::Empty(ref e)) => {
                let child_of_tree = sp_tree_depth == Some(depth.wrapping_sub(1));
                if child_of_tree {
                    if let Some(kind) = ElementKind::from_local_name(e.local_name().as_ref()) {
                        let element_end = reader.buffer_position() as usize;
                        if event_start > segment_start {
                            segments
                                .push(SlideSegment::Raw(data[segment_start..event_start].to_vec()));
                        }
                        let xml = data[event_start..element_end].to_vec();
                        segments.push(SlideSegment::Element(parse_element(kind, xml)));
                        segment_start = element_end;
                    }
                }
            }
            Ok(Event::End(_)) => {
                depth -= 1;
                if sp_tree_depth == Some(depth) {
                    sp_tree_depth = None;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(format!("{part_name}: {e}"))),
            _ => {}
        }
    }

    if segment_start < data.len() {
        segments.push(SlideSegment::Raw(data[segment_start..].to_vec()));
    }
    Ok(Slide::new(part_name.to_string(), segments))
}

/// Parse an element's capabilities out of its subtree.
///
/// Geometry comes from the first `<a:off>` and `<a:ext>` in document
/// order; a group's child offset (`chOff`/`chExt`) never matches. Text
/// runs are collected only for kinds that carry a text frame, from
/// `sz` attributes on run properties directly inside `<a:r>`.
fn parse_element(kind: ElementKind, xml: Vec<u8>) -> Element {
    let mut reader = Reader::from_reader(xml.as_slice());
    let mut name = None;
    let mut anchor = None;
    let mut extent = None;
    let mut runs = Vec::new();
    let mut depth = 0usize;
    let mut run_depth: Option<usize> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                inspect_tag(
                    e, kind, depth, run_depth, &mut name, &mut anchor, &mut extent, &mut runs,
                );
                if run_depth.is_none() && e.local_name().as_ref() == b"r" {
                    run_depth = Some(depth);
                }
                depth += 1;
            }
            Ok(Event::Empty(ref e)) => {
                inspect_tag(
                    e, kind, depth, run_depth, &mut name, &mut anchor, &mut extent, &mut runs,
                );
            }
            Ok(Event::End(_)) => {
                depth -= 1;
                if run_depth == Some(depth) {
                    run_depth = None;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                // The slide part already parsed; treat a re-parse error
                // as a missing capability rather than a load failure.
                warn!("element subtree re-parse failed: {e}");
                break;
            }
            _ => {}
        }
    }

    Element::new(kind, name, xml, anchor, extent, runs)
}

#[allow(clippy::too_many_arguments)]
fn inspect_tag(
    e: &BytesStart<'_>,
    kind: ElementKind,
    depth: usize,
    run_depth: Option<usize>,
    name: &mut Option<String>,
    anchor: &mut Option<EmuPoint>,
    extent: &mut Option<EmuExtent>,
    runs: &mut Vec<TextRun>,
) {
    match e.local_name().as_ref() {
        // The element's own non-visual properties sit exactly two
        // levels down; nested shapes inside a group sit deeper.
        b"cNvPr" if depth == 2 && name.is_none() => {
            *name = attr_string(e, b"name").filter(|n| !n.is_empty());
        }
        b"off" if anchor.is_none() => {
            if let (Some(x), Some(y)) = (attr_i64(e, b"x"), attr_i64(e, b"y")) {
                *anchor = Some(EmuPoint { x, y });
            } else {
                warn!("a:off with unreadable coordinates, position capability dropped");
            }
        }
        b"ext" if extent.is_none() => {
            if let (Some(cx), Some(cy)) = (attr_i64(e, b"cx"), attr_i64(e, b"cy")) {
                *extent = Some(EmuExtent { cx, cy });
            } else {
                warn!("a:ext with unreadable dimensions, size capability dropped");
            }
        }
        b"rPr" if kind.has_text() && run_depth.is_some_and(|d| depth == d + 1) => {
            if let Some(size) = attr_u32(e, b"sz") {
                runs.push(TextRun { font_size: size });
            }
        }
        _ => {}
    }
}

/// Parse docProps/core.xml.
fn parse_core_properties(data: &[u8]) -> Result<CoreProperties> {
    let mut reader = Reader::from_reader(data);
    reader.config_mut().trim_text(true);
    let mut props = CoreProperties::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let local = e.local_name().as_ref().to_vec();
                let known = matches!(
                    local.as_slice(),
                    b"title"
                        | b"subject"
                        | b"creator"
                        | b"keywords"
                        | b"lastModifiedBy"
                        | b"revision"
                        | b"created"
                        | b"modified"
                );
                if !known {
                    continue;
                }
                let text = read_text(&mut reader)?;
                match local.as_slice() {
                    b"title" => props.title = text,
                    b"subject" => props.subject = text,
                    b"creator" => props.creator = text,
                    b"keywords" => props.keywords = text,
                    b"lastModifiedBy" => props.last_modified_by = text,
                    b"revision" => {
                        props.revision = text.and_then(|t| t.trim().parse().ok());
                    }
                    b"created" => props.created = text.as_deref().and_then(parse_datetime),
                    b"modified" => props.modified = text.as_deref().and_then(parse_datetime),
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::Xml(format!("{CORE_PROPERTIES_PART}: {e}")));
            }
            _ => {}
        }
    }
    Ok(props)
}

/// Collect the text content of the element just opened.
fn read_text(reader: &mut Reader<&[u8]>) -> Result<Option<String>> {
    let mut text = String::new();
    let mut depth = 0usize;
    loop {
        match reader.read_event() {
            Ok(Event::Text(ref e)) => {
                text.push_str(&e.unescape().map_err(|e| Error::Xml(e.to_string()))?);
            }
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e.to_string())),
            _ => {}
        }
    }
    if text.is_empty() {
        Ok(None)
    } else {
        Ok(Some(text))
    }
}

/// Parse a W3CDTF timestamp, tolerating a missing zone designator.
fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(DateTime::from_naive_utc_and_offset(dt, Utc));
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let dt = date.and_hms_opt(0, 0, 0)?;
        return Some(DateTime::from_naive_utc_and_offset(dt, Utc));
    }
    debug!("unparseable core property timestamp: {s}");
    None
}

pub(super) fn attr_string(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == key {
            return Some(String::from_utf8_lossy(&attr.value).into_owned());
        }
    }
    None
}

pub(super) fn attr_i64(e: &BytesStart<'_>, key: &[u8]) -> Option<i64> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == key {
            return std::str::from_utf8(&attr.value)
                .ok()
                .and_then(|s| s.parse().ok());
        }
    }
    None
}

pub(super) fn attr_u32(e: &BytesStart<'_>, key: &[u8]) -> Option<u32> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == key {
            return std::str::from_utf8(&attr.value)
                .ok()
                .and_then(|s| s.parse().ok());
        }
    }
    None
}
