//! Slide element types and their geometry capabilities.

use serde::{Deserialize, Serialize};

/// Kinds of top-level children a slide shape tree can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Text-bearing shape (`p:sp`)
    Shape,
    /// Picture (`p:pic`)
    Picture,
    /// Graphic frame hosting a table, chart or diagram (`p:graphicFrame`)
    GraphicFrame,
    /// Group of shapes (`p:grpSp`)
    Group,
    /// Connector (`p:cxnSp`)
    Connector,
}

impl ElementKind {
    /// Map an XML local name to an element kind.
    pub(crate) fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"sp" => Some(ElementKind::Shape),
            b"pic" => Some(ElementKind::Picture),
            b"graphicFrame" => Some(ElementKind::GraphicFrame),
            b"grpSp" => Some(ElementKind::Group),
            b"cxnSp" => Some(ElementKind::Connector),
            _ => None,
        }
    }

    /// XML local name of the element's outer tag.
    pub fn local_name(&self) -> &'static str {
        match self {
            ElementKind::Shape => "sp",
            ElementKind::Picture => "pic",
            ElementKind::GraphicFrame => "graphicFrame",
            ElementKind::Group => "grpSp",
            ElementKind::Connector => "cxnSp",
        }
    }

    /// Whether elements of this kind can carry a text frame.
    ///
    /// Only plain shapes hold text frames; table text inside graphic
    /// frames and text inside grouped child shapes is out of scope.
    pub fn has_text(&self) -> bool {
        matches!(self, ElementKind::Shape)
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ElementKind::Shape => "shape",
            ElementKind::Picture => "picture",
            ElementKind::GraphicFrame => "graphic frame",
            ElementKind::Group => "group",
            ElementKind::Connector => "connector",
        };
        f.write_str(label)
    }
}

/// A position in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmuPoint {
    pub x: i64,
    pub y: i64,
}

/// An extent (width and height) in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmuExtent {
    pub cx: i64,
    pub cy: i64,
}

/// A text run with an explicit font size.
///
/// Runs that inherit their size from paragraph or placeholder defaults
/// are not represented; they scale implicitly with whatever defines them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    /// Font size in hundredths of a point (`sz="1200"` is 12pt).
    pub font_size: u32,
}

/// A positioned object on a slide.
///
/// The element keeps the raw XML of its whole subtree. The transform
/// mutates only the typed capability fields; on save, exactly the
/// attributes backing those fields are rewritten inside the raw bytes
/// and everything else is preserved.
#[derive(Debug, Clone)]
pub struct Element {
    /// What kind of shape-tree child this is.
    pub kind: ElementKind,

    /// Shape name from its non-visual properties, when present.
    pub name: Option<String>,

    /// Raw XML of the element subtree.
    pub(crate) xml: Vec<u8>,

    /// Position capability: the first `<a:off>` in the subtree.
    anchor: Option<EmuPoint>,

    /// Size capability: the first `<a:ext>` in the subtree.
    extent: Option<EmuExtent>,

    /// Text capability: runs carrying an explicit font size, in
    /// document order.
    runs: Vec<TextRun>,

    /// Set when a capability field changed after load.
    pub(crate) dirty: bool,
}

impl Element {
    pub(crate) fn new(
        kind: ElementKind,
        name: Option<String>,
        xml: Vec<u8>,
        anchor: Option<EmuPoint>,
        extent: Option<EmuExtent>,
        runs: Vec<TextRun>,
    ) -> Self {
        Self {
            kind,
            name,
            xml,
            anchor,
            extent,
            runs,
            dirty: false,
        }
    }

    /// Position capability. `None` when the element has no explicit
    /// offset (a placeholder inheriting layout geometry).
    pub fn anchor(&self) -> Option<EmuPoint> {
        self.anchor
    }

    /// Size capability. `None` when the element has no explicit extent.
    pub fn extent(&self) -> Option<EmuExtent> {
        self.extent
    }

    /// Text capability. `None` for kinds that cannot carry a text
    /// frame; `Some` (possibly empty) for text shapes.
    pub fn text_runs(&self) -> Option<&[TextRun]> {
        if self.kind.has_text() {
            Some(&self.runs)
        } else {
            None
        }
    }

    /// Move the element. No effect when the position capability is
    /// absent; setting the current position leaves the element clean.
    pub fn set_anchor(&mut self, anchor: EmuPoint) {
        if self.anchor.is_some() && self.anchor != Some(anchor) {
            self.anchor = Some(anchor);
            self.dirty = true;
        }
    }

    /// Resize the element. Same contract as [`set_anchor`](Self::set_anchor).
    pub fn set_extent(&mut self, extent: EmuExtent) {
        if self.extent.is_some() && self.extent != Some(extent) {
            self.extent = Some(extent);
            self.dirty = true;
        }
    }

    /// Set one run's font size in hundredths of a point. Returns false
    /// when no such run exists.
    pub fn set_font_size(&mut self, run: usize, centipoints: u32) -> bool {
        match self.runs.get_mut(run) {
            Some(r) => {
                if r.font_size != centipoints {
                    r.font_size = centipoints;
                    self.dirty = true;
                }
                true
            }
            None => false,
        }
    }

    /// Whether any capability changed since load.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn runs(&self) -> &[TextRun] {
        &self.runs
    }
}
