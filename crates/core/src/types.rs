//! Domain types for representing a slide deck before it is serialized.

use crate::palette::{Color, TYPEFACE, WHITE};
use crate::units::{inches, Emu};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An entire presentation: document properties, slide size and slides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    /// Core document properties written to `docProps/core.xml`.
    pub properties: DocumentProperties,

    /// Slide width.
    pub width: Emu,

    /// Slide height.
    pub height: Emu,

    /// Slides in presentation order.
    pub slides: Vec<Slide>,
}

impl Deck {
    /// Create an empty 16:9 deck (13.333in x 7.5in).
    pub fn new(properties: DocumentProperties) -> Self {
        Self {
            properties,
            width: inches(13.333),
            height: inches(7.5),
            slides: Vec::new(),
        }
    }

    /// Append a slide. Its number is reassigned to its 1-based position.
    pub fn add_slide(&mut self, mut slide: Slide) {
        slide.number = self.slides.len() + 1;
        self.slides.push(slide);
    }

    /// Number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}

/// Core document properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentProperties {
    pub title: String,
    pub author: String,
    pub created: DateTime<Utc>,
}

impl DocumentProperties {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            created: Utc::now(),
        }
    }

    /// Pin the creation timestamp.
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }
}

impl Default for DocumentProperties {
    fn default() -> Self {
        Self::new("Agentic AI Testing Architecture", "Testing Architect")
    }
}

/// A single slide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slide {
    /// 1-based slide number.
    pub number: usize,

    /// Solid background fill.
    pub background: Color,

    /// Shapes in z-order (first is furthest back).
    pub shapes: Vec<Shape>,
}

impl Slide {
    /// Create an empty slide with a white background.
    pub fn new(number: usize) -> Self {
        Self {
            number,
            background: WHITE,
            shapes: Vec::new(),
        }
    }

    /// Add a shape on top of the existing ones.
    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }
}

/// Position and size of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub x: Emu,
    pub y: Emu,
    pub cx: Emu,
    pub cy: Emu,
}

impl Frame {
    pub fn new(x: Emu, y: Emu, cx: Emu, cy: Emu) -> Self {
        Self { x, y, cx, cy }
    }
}

/// Anything that can be placed on a slide.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    TextBox(TextBox),
    Rectangle(Rectangle),
    Table(Table),
}

impl Shape {
    pub fn frame(&self) -> &Frame {
        match self {
            Shape::TextBox(t) => &t.frame,
            Shape::Rectangle(r) => &r.frame,
            Shape::Table(t) => &t.frame,
        }
    }

    /// Paragraph texts of this shape in document order.
    ///
    /// Tables yield every cell, row by row.
    pub fn paragraph_texts(&self) -> Vec<String> {
        match self {
            Shape::TextBox(t) => t.paragraphs.iter().map(Paragraph::text).collect(),
            Shape::Rectangle(_) => Vec::new(),
            Shape::Table(t) => t
                .rows
                .iter()
                .flat_map(|row| row.cells.iter().map(|c| c.paragraph.text()))
                .collect(),
        }
    }
}

/// A free-floating text box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBox {
    pub frame: Frame,

    /// Wrap text at the box width; otherwise the box grows to fit.
    pub word_wrap: bool,

    pub paragraphs: Vec<Paragraph>,
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Value of the `algn` attribute.
    pub fn code(self) -> &'static str {
        match self {
            Alignment::Left => "l",
            Alignment::Center => "ctr",
            Alignment::Right => "r",
        }
    }
}

/// A paragraph of one or more runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub alignment: Alignment,

    /// Space before, in points.
    pub space_before: Option<f64>,

    /// Space after, in points.
    pub space_after: Option<f64>,

    /// Bullet character, if the paragraph is a list item.
    pub bullet: Option<char>,
}

impl Paragraph {
    /// A paragraph holding a single run.
    pub fn plain(text: impl Into<String>, font: Font) -> Self {
        Self {
            runs: vec![Run::new(text, font)],
            ..Self::default()
        }
    }

    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Concatenated run text.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// A run of uniformly formatted text. `\n` marks a line break.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    pub font: Font,
}

impl Run {
    pub fn new(text: impl Into<String>, font: Font) -> Self {
        Self {
            text: text.into(),
            font,
        }
    }
}

/// Character formatting of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    /// Size in points.
    pub size: f64,
    pub color: Color,
    pub bold: bool,
    pub italic: bool,
    pub typeface: String,
}

impl Font {
    /// Regular Calibri of the given size and color.
    pub fn new(size: f64, color: Color) -> Self {
        Self {
            size,
            color,
            bold: false,
            italic: false,
            typeface: TYPEFACE.to_string(),
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Size in hundredths of a point, as written to `sz`.
    pub fn size_centipoints(&self) -> u32 {
        (self.size * 100.0).round() as u32
    }
}

/// A rectangle autoshape with no text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rectangle {
    pub frame: Frame,
    pub fill: Option<Color>,
    pub line: Line,
}

/// Outline of an autoshape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Line {
    /// No outline at all.
    None,
    Solid { color: Color, width: Emu },
}

/// Vertical anchoring of text inside a table cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    #[default]
    Top,
    Middle,
    Bottom,
}

impl Anchor {
    /// Value of the `anchor` attribute.
    pub fn code(self) -> &'static str {
        match self {
            Anchor::Top => "t",
            Anchor::Middle => "ctr",
            Anchor::Bottom => "b",
        }
    }
}

/// A table graphic frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub frame: Frame,

    /// Column widths.
    pub columns: Vec<Emu>,

    /// Rows, header first.
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRow {
    pub height: Emu,
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCell {
    pub paragraph: Paragraph,
    pub fill: Option<Color>,
    pub anchor: Anchor,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{BLACK, BLUE};

    #[test]
    fn test_add_slide_renumbers() {
        let mut deck = Deck::new(DocumentProperties::default());
        deck.add_slide(Slide::new(42));
        deck.add_slide(Slide::new(7));
        assert_eq!(deck.slide_count(), 2);
        assert_eq!(deck.slides[0].number, 1);
        assert_eq!(deck.slides[1].number, 2);
    }

    #[test]
    fn test_deck_is_widescreen() {
        let deck = Deck::new(DocumentProperties::default());
        assert_eq!(deck.width, Emu(12_191_695));
        assert_eq!(deck.height, Emu(6_858_000));
    }

    #[test]
    fn test_paragraph_text_concatenates_runs() {
        let p = Paragraph {
            runs: vec![
                Run::new("  Accuracy -- ", Font::new(18.0, BLUE).bold()),
                Run::new("AI quality is measured", Font::new(18.0, BLUE)),
            ],
            ..Paragraph::default()
        };
        assert_eq!(p.text(), "  Accuracy -- AI quality is measured");
    }

    #[test]
    fn test_font_centipoints() {
        assert_eq!(Font::new(30.0, BLACK).size_centipoints(), 3000);
        assert_eq!(Font::new(10.5, BLACK).size_centipoints(), 1050);
    }

    #[test]
    fn test_codes() {
        assert_eq!(Alignment::Center.code(), "ctr");
        assert_eq!(Alignment::Right.code(), "r");
        assert_eq!(Anchor::Middle.code(), "ctr");
    }
}
