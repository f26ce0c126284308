//! End-to-end resize tests over in-memory presentation packages.

use std::io::{Cursor, Read, Write};

use repptx::{
    read_bytes, read_file, resize_bytes, resize_file, Canvas, EmuExtent, EmuPoint, Error, GridSnap,
    ResizeOptions, ScaleMode,
};
use zip::write::SimpleFileOptions;

const NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#;

const PRESENTATION_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml"/></Relationships>"#;

const CORE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:title>Quarterly Review</dc:title><dc:creator>iyulab</dc:creator><dcterms:created xsi:type="dcterms:W3CDTF">2024-03-01T09:30:00Z</dcterms:created><dcterms:modified xsi:type="dcterms:W3CDTF">2024-03-05T10:00:00Z</dcterms:modified></cp:coreProperties>"#;

const PART_NAMES: &[&str] = &[
    "[Content_Types].xml",
    "_rels/.rels",
    "ppt/presentation.xml",
    "ppt/_rels/presentation.xml.rels",
    "ppt/slides/slide1.xml",
    "docProps/core.xml",
];

fn presentation_xml(cx: i64, cy: i64) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation {NS}><p:sldIdLst><p:sldId id="256" r:id="rId2"/></p:sldIdLst><p:sldSz cx="{cx}" cy="{cy}"/><p:notesSz cx="6858000" cy="9144000"/></p:presentation>"#
    )
}

/// One shape with explicit geometry, a sized text run and an unsized one.
fn slide_xml(x: i64, y: i64, w: i64, h: i64) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld {NS}><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr><p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr><a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{w}" cy="{h}"/></a:xfrm></p:spPr><p:txBody><a:bodyPr/><a:p><a:r><a:rPr lang="en-US" sz="1800"/><a:t>Quarter summary</a:t></a:r><a:r><a:rPr lang="en-US" b="1"/><a:t> plain</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#
    )
}

fn build_deck_with(cx: i64, cy: i64, slide: &str, extra: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let presentation = presentation_xml(cx, cy);
    let parts: Vec<(&str, &[u8])> = vec![
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
        ("_rels/.rels", ROOT_RELS.as_bytes()),
        ("ppt/presentation.xml", presentation.as_bytes()),
        ("ppt/_rels/presentation.xml.rels", PRESENTATION_RELS.as_bytes()),
        ("ppt/slides/slide1.xml", slide.as_bytes()),
        ("docProps/core.xml", CORE_XML.as_bytes()),
    ];
    for (name, data) in parts.iter().chain(extra.iter()) {
        writer.start_file(*name, options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn build_deck(cx: i64, cy: i64, slide: &str) -> Vec<u8> {
    build_deck_with(cx, cy, slide, &[])
}

fn part_bytes(package: &[u8], name: &str) -> Vec<u8> {
    let mut archive = zip::ZipArchive::new(Cursor::new(package)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut data = Vec::new();
    file.read_to_end(&mut data).unwrap();
    data
}

#[test]
fn test_fit_resize_scales_geometry_and_text() {
    // 10 x 10 in canvas, shape at (1, 1) in sized 2 x 2 in.
    let deck = build_deck(
        9_144_000,
        9_144_000,
        &slide_xml(914_400, 914_400, 1_828_800, 1_828_800),
    );
    let options = ResizeOptions::new().target_inches(36.0, 48.0);
    let (resized, summary) = resize_bytes(&deck, &options).unwrap();

    assert_eq!(summary.source, Canvas::new(9_144_000, 9_144_000));
    assert_eq!(summary.target, Canvas::new(32_918_400, 43_891_200));
    assert!((summary.transform.scale_x - 3.6).abs() < 1e-12);
    assert!((summary.transform.scale_y - 3.6).abs() < 1e-12);
    assert_eq!(summary.stats.slides, 1);
    assert_eq!(summary.stats.moved, 1);
    assert_eq!(summary.stats.resized, 1);
    assert_eq!(summary.stats.text_runs_scaled, 1);
    assert!(summary.stats.is_clean());

    let doc = read_bytes(&resized).unwrap();
    assert_eq!(doc.canvas, Canvas::new(32_918_400, 43_891_200));

    // Fit is width-bound here, so content is centered vertically.
    let element = doc.slides[0].elements().next().unwrap();
    assert_eq!(
        element.anchor(),
        Some(EmuPoint {
            x: 3_291_840,
            y: 8_778_240
        })
    );
    assert_eq!(
        element.extent(),
        Some(EmuExtent {
            cx: 6_583_680,
            cy: 6_583_680
        })
    );
    assert_eq!(element.text_runs().unwrap()[0].font_size, 6480);

    // The unsized run keeps its attributes verbatim.
    let slide_part = String::from_utf8(part_bytes(&resized, "ppt/slides/slide1.xml")).unwrap();
    assert!(slide_part.contains(r#"sz="6480""#));
    assert!(slide_part.contains(r#"<a:rPr lang="en-US" b="1"/>"#));
}

#[test]
fn test_stretch_resize_scales_axes_independently() {
    let deck = build_deck(
        9_144_000,
        9_144_000,
        &slide_xml(914_400, 914_400, 1_828_800, 1_828_800),
    );
    let options = ResizeOptions::new()
        .target_inches(36.0, 48.0)
        .with_mode(ScaleMode::Stretch);
    let (resized, summary) = resize_bytes(&deck, &options).unwrap();

    assert!((summary.transform.scale_x - 3.6).abs() < 1e-12);
    assert!((summary.transform.scale_y - 4.8).abs() < 1e-12);
    assert_eq!(summary.transform.offset_x, 0.0);
    assert_eq!(summary.transform.offset_y, 0.0);

    let doc = read_bytes(&resized).unwrap();
    let element = doc.slides[0].elements().next().unwrap();
    assert_eq!(
        element.anchor(),
        Some(EmuPoint {
            x: 3_291_840,
            y: 4_389_120
        })
    );
    assert_eq!(
        element.extent(),
        Some(EmuExtent {
            cx: 6_583_680,
            cy: 8_778_240
        })
    );

    // Text follows the smaller axis scale.
    assert_eq!(element.text_runs().unwrap()[0].font_size, 6480);
}

#[test]
fn test_fill_resize_covers_target() {
    let deck = build_deck(
        9_144_000,
        9_144_000,
        &slide_xml(914_400, 914_400, 1_828_800, 1_828_800),
    );
    let options = ResizeOptions::new()
        .target_inches(36.0, 48.0)
        .with_mode(ScaleMode::Fill);
    let (resized, summary) = resize_bytes(&deck, &options).unwrap();

    assert!((summary.transform.scale_x - 4.8).abs() < 1e-12);
    assert!((summary.transform.scale_y - 4.8).abs() < 1e-12);

    // Content overflows the narrower axis; geometry may go negative.
    let doc = read_bytes(&resized).unwrap();
    let element = doc.slides[0].elements().next().unwrap();
    assert_eq!(
        element.anchor(),
        Some(EmuPoint {
            x: -1_097_280,
            y: 4_389_120
        })
    );
    assert_eq!(
        element.extent(),
        Some(EmuExtent {
            cx: 8_778_240,
            cy: 8_778_240
        })
    );
    assert_eq!(element.text_runs().unwrap()[0].font_size, 8640);
}

#[test]
fn test_identity_resize_preserves_every_byte() {
    let deck = build_deck(
        9_144_000,
        9_144_000,
        &slide_xml(914_400, 914_400, 1_828_800, 1_828_800),
    );
    let options = ResizeOptions::new().target_inches(10.0, 10.0);
    let (resized, summary) = resize_bytes(&deck, &options).unwrap();

    assert_eq!(summary.transform.scale_x, 1.0);
    assert!(summary.stats.is_clean());
    for name in PART_NAMES {
        assert_eq!(
            part_bytes(&deck, name),
            part_bytes(&resized, name),
            "part {name} changed"
        );
    }
}

#[test]
fn test_untouched_parts_survive_resize() {
    let png: &[u8] = &[
        0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x01, 0x02, 0x03,
    ];
    let theme = br#"<?xml version="1.0"?><a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office"/>"#;
    let deck = build_deck_with(
        9_144_000,
        9_144_000,
        &slide_xml(914_400, 914_400, 1_828_800, 1_828_800),
        &[
            ("ppt/media/image1.png", png),
            ("ppt/theme/theme1.xml", theme),
        ],
    );
    let options = ResizeOptions::new().target_inches(36.0, 48.0);
    let (resized, _) = resize_bytes(&deck, &options).unwrap();

    assert_eq!(part_bytes(&resized, "ppt/media/image1.png"), png);
    assert_eq!(part_bytes(&resized, "ppt/theme/theme1.xml"), theme.to_vec());
    assert_eq!(
        part_bytes(&deck, "docProps/core.xml"),
        part_bytes(&resized, "docProps/core.xml")
    );
    assert_ne!(
        part_bytes(&deck, "ppt/slides/slide1.xml"),
        part_bytes(&resized, "ppt/slides/slide1.xml")
    );
    assert_ne!(
        part_bytes(&deck, "ppt/presentation.xml"),
        part_bytes(&resized, "ppt/presentation.xml")
    );
}

#[test]
fn test_grid_snap_aligns_scaled_geometry() {
    // Off-grid source position; size already lands on the grid.
    let deck = build_deck(
        9_144_000,
        9_144_000,
        &slide_xml(914_567, 914_567, 1_828_800, 1_828_800),
    );
    let options = ResizeOptions::new()
        .target_inches(36.0, 48.0)
        .with_mode(ScaleMode::Independent)
        .with_grid(GridSnap::from_inches(0.1).unwrap());
    let (resized, summary) = resize_bytes(&deck, &options).unwrap();

    assert_eq!(summary.stats.snapped, 1);

    let doc = read_bytes(&resized).unwrap();
    let element = doc.slides[0].elements().next().unwrap();
    let anchor = element.anchor().unwrap();
    assert_eq!(anchor, EmuPoint {
        x: 3_291_840,
        y: 4_389_120
    });
    assert_eq!(anchor.x % 91_440, 0);
    assert_eq!(anchor.y % 91_440, 0);
    assert_eq!(
        element.extent(),
        Some(EmuExtent {
            cx: 6_583_680,
            cy: 8_778_240
        })
    );
}

#[test]
fn test_resize_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("deck.pptx");
    let output = dir.path().join("poster.pptx");
    std::fs::write(
        &input,
        build_deck(
            9_144_000,
            9_144_000,
            &slide_xml(914_400, 914_400, 1_828_800, 1_828_800),
        ),
    )
    .unwrap();

    let options = ResizeOptions::new().target_inches(36.0, 48.0);
    let summary = resize_file(&input, &output, &options).unwrap();
    assert_eq!(summary.stats.slides, 1);

    let doc = read_file(&output).unwrap();
    assert_eq!(doc.canvas, Canvas::from_inches(36.0, 48.0));
    assert_eq!(doc.slide_count(), 1);
}

#[test]
fn test_missing_input_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = resize_file(
        dir.path().join("absent.pptx"),
        dir.path().join("out.pptx"),
        &ResizeOptions::new(),
    );
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_invalid_target_aborts_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("deck.pptx");
    let output = dir.path().join("out.pptx");
    std::fs::write(
        &input,
        build_deck(
            9_144_000,
            9_144_000,
            &slide_xml(914_400, 914_400, 1_828_800, 1_828_800),
        ),
    )
    .unwrap();

    let options = ResizeOptions::new().with_target(Canvas::new(0, 914_400));
    let result = resize_file(&input, &output, &options);
    assert!(matches!(result, Err(Error::InvalidCanvas { .. })));
    assert!(!output.exists());
}

#[test]
fn test_core_properties_survive_resize() {
    let deck = build_deck(
        9_144_000,
        9_144_000,
        &slide_xml(914_400, 914_400, 1_828_800, 1_828_800),
    );
    let (resized, _) = resize_bytes(&deck, &ResizeOptions::new()).unwrap();

    let doc = read_bytes(&resized).unwrap();
    let properties = doc.properties.unwrap();
    assert_eq!(properties.title.as_deref(), Some("Quarterly Review"));
    assert_eq!(properties.creator.as_deref(), Some("iyulab"));
}
