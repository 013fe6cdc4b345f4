//! Plain-text outline of a deck: the text of every shape in reading order.
//!
//! The outline can be derived from the in-memory model or read back from a
//! written file, which is how a written deck is checked against its model.

use crate::error::{Error, Result};
use crate::types::Deck;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Text outline of an entire deck.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckOutline {
    /// Slides in presentation order.
    pub slides: Vec<ExtractedSlide>,
}

impl DeckOutline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a slide to the outline.
    pub fn add_slide(&mut self, slide: ExtractedSlide) {
        self.slides.push(slide);
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Get all text lines from all slides, flattened.
    pub fn all_lines(&self) -> Vec<&str> {
        self.slides
            .iter()
            .flat_map(|s| s.lines.iter().map(|l| l.text.as_str()))
            .collect()
    }

    /// Check that `actual` (typically read back from disk) carries the same
    /// slides and text as `self`.
    pub fn verify(&self, actual: &DeckOutline) -> Result<()> {
        if self.slide_count() != actual.slide_count() {
            return Err(Error::VerificationFailed(format!(
                "expected {} slides, found {}",
                self.slide_count(),
                actual.slide_count()
            )));
        }

        for (expected, found) in self.slides.iter().zip(&actual.slides) {
            let expected_lines = expected.non_empty_lines();
            let found_lines = found.non_empty_lines();
            if expected_lines.len() != found_lines.len() {
                return Err(Error::VerificationFailed(format!(
                    "slide {}: expected {} text shapes, found {}",
                    expected.number,
                    expected_lines.len(),
                    found_lines.len()
                )));
            }
            if let Some((e, f)) = expected_lines
                .iter()
                .zip(&found_lines)
                .find(|(e, f)| e != f)
            {
                return Err(Error::VerificationFailed(format!(
                    "slide {}: expected {:?}, found {:?}",
                    expected.number, e, f
                )));
            }
        }

        Ok(())
    }
}

/// The text of a single slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSlide {
    /// 1-based slide number.
    pub number: usize,

    /// Text of each shape, in reading order.
    pub lines: Vec<SlideText>,
}

impl ExtractedSlide {
    /// Create a new slide with the given number.
    pub fn new(number: usize) -> Self {
        Self {
            number,
            lines: Vec::new(),
        }
    }

    /// Add a text line with position information.
    pub fn add_line_with_position(&mut self, text: impl Into<String>, y: f64, x: f64) {
        self.lines.push(SlideText::with_position(text, y, x));
    }

    /// Sort lines by position (top-to-bottom, then left-to-right).
    pub fn sort_by_position(&mut self) {
        self.lines.sort_by(|a, b| {
            let y_cmp = a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal);
            if y_cmp == Ordering::Equal {
                a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal)
            } else {
                y_cmp
            }
        });
    }

    /// Get non-empty text lines.
    pub fn non_empty_lines(&self) -> Vec<&str> {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .filter(|s| !s.trim().is_empty())
            .collect()
    }

    /// The first line, which on every slide of this deck is its title.
    pub fn heading(&self) -> Option<&str> {
        self.non_empty_lines().first().copied()
    }
}

/// Text content of one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideText {
    /// Paragraphs joined with `\n`.
    pub text: String,

    /// Vertical offset in EMUs.
    pub y: f64,

    /// Horizontal offset in EMUs.
    pub x: f64,
}

impl SlideText {
    pub fn with_position(text: impl Into<String>, y: f64, x: f64) -> Self {
        Self {
            text: text.into(),
            y,
            x,
        }
    }
}

/// Join paragraph texts the way a reader of the written XML sees them:
/// newline-separated, with the whole block trimmed.
pub fn join_paragraphs<I, S>(paragraphs: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();
    for paragraph in paragraphs {
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(paragraph.as_ref());
    }
    text.trim().to_string()
}

impl Deck {
    /// Derive the text outline of this deck.
    pub fn outline(&self) -> DeckOutline {
        let mut outline = DeckOutline::new();
        for slide in &self.slides {
            let mut extracted = ExtractedSlide::new(slide.number);
            for shape in &slide.shapes {
                let text = join_paragraphs(shape.paragraph_texts());
                if text.is_empty() {
                    continue;
                }
                let frame = shape.frame();
                extracted.add_line_with_position(
                    text,
                    frame.y.value() as f64,
                    frame.x.value() as f64,
                );
            }
            extracted.sort_by_position();
            outline.add_slide(extracted);
        }
        outline
    }
}

/// Renders an outline as plain text, one block per slide.
///
/// ```text
/// Slide 1
/// Agentic AI Testing Architecture
/// for Automated Tool Validation
///
/// Slide 2
/// Problem Statement
/// ```
#[derive(Debug, Clone, Default)]
pub struct OutlineFormatter {
    /// Replace line breaks inside a shape's text with ` / `.
    flatten: bool,
}

impl OutlineFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print every shape on a single line.
    pub fn flattened(mut self) -> Self {
        self.flatten = true;
        self
    }

    /// Format the outline, slides separated by blank lines.
    pub fn format(&self, outline: &DeckOutline) -> String {
        outline
            .slides
            .iter()
            .map(|slide| {
                let mut block = format!("Slide {}", slide.number);
                for line in slide.non_empty_lines() {
                    block.push('\n');
                    if self.flatten {
                        block.push_str(&line.replace('\n', " / "));
                    } else {
                        block.push_str(line);
                    }
                }
                block
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Format and add a trailing newline.
    pub fn format_with_newline(&self, outline: &DeckOutline) -> String {
        let formatted = self.format(outline);
        if formatted.is_empty() {
            formatted
        } else {
            format!("{}\n", formatted)
        }
    }
}
