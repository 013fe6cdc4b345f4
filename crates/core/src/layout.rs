//! Layout helpers that place titles, text, bullet lists, tables and cards.
//!
//! Every helper appends shapes to the slide being built, in call order, so
//! later calls draw on top of earlier ones.

use crate::error::{Error, Result};
use crate::palette::{
    Color, BLACK, BLUE, DARK, GRAY, LIGHT_GRAY, PANEL, TABLE_HEAD, TABLE_ROW1, TABLE_ROW2, WHITE,
};
use crate::types::{
    Alignment, Anchor, Font, Frame, Line, Paragraph, Rectangle, Run, Shape, Slide, Table,
    TableCell, TableRow, TextBox,
};
use crate::units::{inches, points, Emu};

/// Marks the bold lead-in of a bullet item: `"Lead -- rest of the item"`.
const LEAD_SEPARATOR: &str = " -- ";

/// Bullet glyph used by every list.
const BULLET: char = '\u{2022}';

/// Styling of a single-paragraph text box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub color: Color,
    pub bold: bool,
    pub italic: bool,
    pub align: Alignment,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 16.0,
            color: BLACK,
            bold: false,
            italic: false,
            align: Alignment::Left,
        }
    }
}

impl TextStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Regular text of the given size and color.
    pub fn sized(size: f64, color: Color) -> Self {
        Self::new().size(size).color(color)
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    fn font(&self) -> Font {
        Font {
            bold: self.bold,
            italic: self.italic,
            ..Font::new(self.size, self.color)
        }
    }
}

/// Styling of a bullet list.
#[derive(Debug, Clone, PartialEq)]
pub struct BulletStyle {
    pub size: f64,
    pub color: Color,

    /// Space before and after each item, in points.
    pub spacing: f64,
}

impl Default for BulletStyle {
    fn default() -> Self {
        Self {
            size: 15.0,
            color: BLACK,
            spacing: 4.0,
        }
    }
}

impl BulletStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }
}

/// Builds one slide out of the deck's layout primitives.
#[derive(Debug)]
pub struct SlideBuilder {
    slide: Slide,
}

impl SlideBuilder {
    /// Start a blank white slide.
    pub fn new(number: usize) -> Self {
        Self {
            slide: Slide::new(number),
        }
    }

    /// Finish building and return the slide.
    pub fn finish(self) -> Slide {
        log::debug!(
            "Built slide {} with {} shapes",
            self.slide.number,
            self.slide.shapes.len()
        );
        self.slide
    }

    /// Slide title at the standard position.
    pub fn title(&mut self, text: &str) -> &mut Self {
        self.title_at(text, inches(0.3))
    }

    /// Slide title with its underline bar, starting at `top`.
    pub fn title_at(&mut self, text: &str, top: Emu) -> &mut Self {
        let style = TextStyle::new().size(30.0).color(BLUE).bold();
        self.push_text(
            Frame::new(inches(0.6), top, inches(12.0), inches(0.7)),
            false,
            text,
            &style,
        );
        self.bar(inches(0.6), top + inches(0.65), inches(2.5), inches(0.04), BLUE)
    }

    /// Italic gray subtitle under the title.
    pub fn subtitle(&mut self, text: &str) -> &mut Self {
        self.subtitle_at(text, inches(1.05))
    }

    pub fn subtitle_at(&mut self, text: &str, top: Emu) -> &mut Self {
        let style = TextStyle::new().size(16.0).color(GRAY).italic();
        self.push_text(
            Frame::new(inches(0.6), top, inches(12.0), inches(0.5)),
            false,
            text,
            &style,
        );
        self
    }

    /// Word-wrapped single-paragraph text box.
    pub fn text(
        &mut self,
        left: Emu,
        top: Emu,
        width: Emu,
        height: Emu,
        text: &str,
        style: TextStyle,
    ) -> &mut Self {
        self.push_text(Frame::new(left, top, width, height), true, text, &style);
        self
    }

    /// Bulleted list, one paragraph per item.
    ///
    /// The box is `0.35in` tall per item. An item of the form
    /// `"Lead -- detail"` renders its lead-in in bold.
    pub fn bullets(
        &mut self,
        left: Emu,
        top: Emu,
        width: Emu,
        items: &[&str],
        style: BulletStyle,
    ) -> &mut Self {
        let height = inches(0.35 * items.len() as f64);
        let paragraphs = items
            .iter()
            .map(|item| bullet_paragraph(item, &style))
            .collect();

        self.slide.add_shape(Shape::TextBox(TextBox {
            frame: Frame::new(left, top, width, height),
            word_wrap: true,
            paragraphs,
        }));
        self
    }

    /// Table with a blue header row and zebra-striped body rows.
    ///
    /// Columns share `width` equally and every row is `row_height` inches
    /// tall. Fails if there are no headers or if a row's length differs from
    /// the header count.
    #[allow(clippy::too_many_arguments)]
    pub fn table(
        &mut self,
        left: Emu,
        top: Emu,
        width: Emu,
        row_height: f64,
        headers: &[&str],
        rows: &[&[&str]],
        font_size: f64,
    ) -> Result<&mut Self> {
        if headers.is_empty() {
            return Err(Error::InvalidLayout(format!(
                "table on slide {} has no columns",
                self.slide.number
            )));
        }
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != headers.len())
        {
            return Err(Error::InvalidLayout(format!(
                "table on slide {}: row {} has {} cells, expected {}",
                self.slide.number,
                index + 1,
                row.len(),
                headers.len()
            )));
        }

        let total_rows = rows.len() + 1;
        let column_width = Emu(width.value() / headers.len() as i64);
        let row_emu = inches(row_height);

        let header_font = Font::new(font_size, WHITE).bold();
        let mut table_rows = Vec::with_capacity(total_rows);
        table_rows.push(TableRow {
            height: row_emu,
            cells: headers
                .iter()
                .map(|h| TableCell {
                    paragraph: Paragraph::plain(*h, header_font.clone()),
                    fill: Some(TABLE_HEAD),
                    anchor: Anchor::Middle,
                })
                .collect(),
        });

        let body_font = Font::new(font_size, BLACK);
        for (index, row) in rows.iter().enumerate() {
            let fill = if index % 2 == 0 { TABLE_ROW1 } else { TABLE_ROW2 };
            table_rows.push(TableRow {
                height: row_emu,
                cells: row
                    .iter()
                    .map(|value| TableCell {
                        paragraph: Paragraph::plain(*value, body_font.clone()),
                        fill: Some(fill),
                        anchor: Anchor::Middle,
                    })
                    .collect(),
            });
        }

        self.slide.add_shape(Shape::Table(Table {
            frame: Frame::new(left, top, width, inches(row_height * total_rows as f64)),
            columns: vec![column_width; headers.len()],
            rows: table_rows,
        }));
        Ok(self)
    }

    /// Table with the default 12pt font.
    pub fn simple_table(
        &mut self,
        left: Emu,
        top: Emu,
        width: Emu,
        row_height: f64,
        headers: &[&str],
        rows: &[&[&str]],
    ) -> Result<&mut Self> {
        self.table(left, top, width, row_height, headers, rows, 12.0)
    }

    /// Outlined panel with a bold blue heading and a bullet list.
    pub fn section_box(
        &mut self,
        left: Emu,
        top: Emu,
        width: Emu,
        height: Emu,
        title: &str,
        items: &[&str],
    ) -> &mut Self {
        self.panel(left, top, width, height);
        self.text(
            left + inches(0.15),
            top + inches(0.08),
            width - inches(0.3),
            inches(0.35),
            title,
            TextStyle::new().size(16.0).color(BLUE).bold(),
        );
        self.bullets(
            left + inches(0.15),
            top + inches(0.45),
            width - inches(0.3),
            items,
            BulletStyle::new().size(13.0).color(DARK),
        )
    }

    /// Light panel rectangle with a thin gray outline.
    pub fn panel(&mut self, left: Emu, top: Emu, width: Emu, height: Emu) -> &mut Self {
        self.slide.add_shape(Shape::Rectangle(Rectangle {
            frame: Frame::new(left, top, width, height),
            fill: Some(PANEL),
            line: Line::Solid {
                color: LIGHT_GRAY,
                width: points(1.0),
            },
        }));
        self
    }

    /// Solid rectangle with no outline (accent bars, dividers, banners).
    pub fn bar(
        &mut self,
        left: Emu,
        top: Emu,
        width: Emu,
        height: Emu,
        color: Color,
    ) -> &mut Self {
        self.slide.add_shape(Shape::Rectangle(Rectangle {
            frame: Frame::new(left, top, width, height),
            fill: Some(color),
            line: Line::None,
        }));
        self
    }

    /// Page number in the bottom-right corner.
    pub fn slide_number(&mut self, number: usize) -> &mut Self {
        self.text(
            inches(12.3),
            inches(7.05),
            inches(0.8),
            inches(0.3),
            &number.to_string(),
            TextStyle::new().size(10.0).color(GRAY).align(Alignment::Right),
        )
    }

    fn push_text(&mut self, frame: Frame, word_wrap: bool, text: &str, style: &TextStyle) {
        self.slide.add_shape(Shape::TextBox(TextBox {
            frame,
            word_wrap,
            paragraphs: vec![Paragraph::plain(text, style.font()).aligned(style.align)],
        }));
    }
}

fn bullet_paragraph(item: &str, style: &BulletStyle) -> Paragraph {
    let font = Font::new(style.size, style.color);
    let runs = match item.split_once(LEAD_SEPARATOR) {
        Some((lead, rest)) => vec![
            Run::new(
                format!("  {lead}{LEAD_SEPARATOR}"),
                font.clone().bold(),
            ),
            Run::new(rest, font),
        ],
        None => vec![Run::new(format!("  {item}"), font)],
    };

    Paragraph {
        runs,
        alignment: Alignment::Left,
        space_before: Some(style.spacing),
        space_after: Some(style.spacing),
        bullet: Some(BULLET),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_boxes(slide: &Slide) -> Vec<&TextBox> {
        slide
            .shapes
            .iter()
            .filter_map(|s| match s {
                Shape::TextBox(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_text_style_font_matches_font_builder() {
        let style = TextStyle::sized(13.0, GRAY).italic();
        assert_eq!(style.font(), Font::new(13.0, GRAY).italic());

        let style = TextStyle::sized(16.0, BLUE).bold().italic();
        assert_eq!(style.font(), Font::new(16.0, BLUE).bold().italic());
        assert_eq!(TextStyle::new().size(12.0).color(BLUE).font(), Font::new(12.0, BLUE));
    }

    #[test]
    fn test_title_adds_text_and_bar() {
        let mut b = SlideBuilder::new(1);
        b.title("Problem Statement");
        let slide = b.finish();

        assert_eq!(slide.shapes.len(), 2);
        let Shape::TextBox(title) = &slide.shapes[0] else {
            panic!("expected title text box");
        };
        assert!(!title.word_wrap);
        let run = &title.paragraphs[0].runs[0];
        assert_eq!(run.text, "Problem Statement");
        assert_eq!(run.font.size, 30.0);
        assert!(run.font.bold);
        assert_eq!(run.font.color, BLUE);

        let Shape::Rectangle(bar) = &slide.shapes[1] else {
            panic!("expected underline bar");
        };
        assert_eq!(bar.frame.y, inches(0.3) + inches(0.65));
        assert_eq!(bar.line, Line::None);
    }

    #[test]
    fn test_bullets_split_lead_in() {
        let mut b = SlideBuilder::new(1);
        b.bullets(
            inches(0.6),
            inches(4.6),
            inches(11.0),
            &["Trust -- Every AI decision is auditable", "Plain item"],
            BulletStyle::new(),
        );
        let slide = b.finish();
        let list = text_boxes(&slide)[0];

        assert_eq!(list.frame.cy, inches(0.7));
        assert_eq!(list.paragraphs.len(), 2);

        let first = &list.paragraphs[0];
        assert_eq!(first.runs.len(), 2);
        assert_eq!(first.runs[0].text, "  Trust -- ");
        assert!(first.runs[0].font.bold);
        assert_eq!(first.runs[1].text, "Every AI decision is auditable");
        assert!(!first.runs[1].font.bold);
        assert_eq!(first.bullet, Some('\u{2022}'));
        assert_eq!(first.space_before, Some(4.0));

        let second = &list.paragraphs[1];
        assert_eq!(second.runs.len(), 1);
        assert_eq!(second.runs[0].text, "  Plain item");
    }

    #[test]
    fn test_bullets_split_on_first_separator_only() {
        let p = bullet_paragraph("a -- b -- c", &BulletStyle::new());
        assert_eq!(p.runs[0].text, "  a -- ");
        assert_eq!(p.runs[1].text, "b -- c");
    }

    #[test]
    fn test_table_striping_and_geometry() {
        let mut b = SlideBuilder::new(5);
        b.simple_table(
            inches(0.6),
            inches(1.5),
            inches(12.0),
            0.45,
            &["Challenge", "Impact"],
            &[&["a", "b"], &["c", "d"], &["e", "f"]],
        )
        .unwrap();
        let slide = b.finish();
        let Shape::Table(table) = &slide.shapes[0] else {
            panic!("expected table");
        };

        assert_eq!(table.columns, vec![Emu(inches(12.0).value() / 2); 2]);
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.frame.cy, inches(0.45 * 4.0));
        assert_eq!(table.rows[0].cells[0].fill, Some(TABLE_HEAD));
        assert!(table.rows[0].cells[0].paragraph.runs[0].font.bold);
        assert_eq!(table.rows[1].cells[0].fill, Some(TABLE_ROW1));
        assert_eq!(table.rows[2].cells[0].fill, Some(TABLE_ROW2));
        assert_eq!(table.rows[3].cells[1].fill, Some(TABLE_ROW1));
        assert!(table
            .rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .all(|c| c.anchor == Anchor::Middle));
    }

    #[test]
    fn test_table_rejects_ragged_rows() {
        let mut b = SlideBuilder::new(3);
        let err = b
            .simple_table(
                inches(0.6),
                inches(1.5),
                inches(12.0),
                0.4,
                &["Metric", "Target"],
                &[&["only one"]],
            )
            .unwrap_err();
        assert!(matches!(err, Error::InvalidLayout(_)));
        assert!(err.to_string().contains("slide 3"));
    }

    #[test]
    fn test_table_rejects_no_columns() {
        let mut b = SlideBuilder::new(1);
        let result = b.simple_table(inches(0.0), inches(0.0), inches(1.0), 0.4, &[], &[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_section_box_composition() {
        let mut b = SlideBuilder::new(4);
        b.section_box(
            inches(0.6),
            inches(1.6),
            inches(3.7),
            inches(2.5),
            "Autonomous Execution",
            &["one", "two"],
        );
        let slide = b.finish();

        assert_eq!(slide.shapes.len(), 3);
        assert!(matches!(slide.shapes[0], Shape::Rectangle(_)));
        let boxes = text_boxes(&slide);
        assert_eq!(boxes[0].frame.x, inches(0.6) + inches(0.15));
        assert_eq!(boxes[0].frame.cx, inches(3.7) - inches(0.3));
        assert_eq!(boxes[0].paragraphs[0].runs[0].font.size, 16.0);
        assert_eq!(boxes[1].frame.y, inches(1.6) + inches(0.45));
        assert_eq!(boxes[1].paragraphs[0].runs[0].font.color, DARK);
        assert_eq!(boxes[1].paragraphs[0].runs[0].font.size, 13.0);
    }

    #[test]
    fn test_slide_number_right_aligned() {
        let mut b = SlideBuilder::new(9);
        b.slide_number(9);
        let slide = b.finish();
        let number = text_boxes(&slide)[0];
        assert_eq!(number.paragraphs[0].alignment, Alignment::Right);
        assert_eq!(number.paragraphs[0].text(), "9");
        assert_eq!(number.frame.x, inches(12.3));
    }
}
