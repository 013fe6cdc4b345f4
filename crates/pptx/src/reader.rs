//! Reads the text outline back out of a `.pptx` package.

use crate::package::{PRESENTATION_PART, PRESENTATION_RELS_PART};
use deck_core::{DeckOutline, Error, ExtractedSlide, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{Read, Seek};
use zip::result::ZipError;
use zip::ZipArchive;

/// Extracts per-shape text from PPTX files.
pub struct PptxReader;

impl PptxReader {
    /// Create a new PPTX reader.
    pub fn new() -> Self {
        Self
    }

    /// Read the outline of a PPTX package.
    pub fn read<R: Read + Seek>(&self, reader: R) -> Result<DeckOutline> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let mut outline = DeckOutline::new();

        let slide_order = self.get_slide_order(&mut archive)?;
        log::debug!("Package lists {} slides", slide_order.len());

        for (idx, slide_path) in slide_order.iter().enumerate() {
            let slide = self.parse_slide(&mut archive, slide_path, idx + 1)?;
            outline.add_slide(slide);
        }

        Ok(outline)
    }

    /// Get the ordered list of slide paths.
    ///
    /// The order comes from `p:sldIdLst` in `presentation.xml`; when that list
    /// is absent, slides are ordered by the number in their relationship id.
    fn get_slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let rels_content = self.read_file_from_archive(archive, PRESENTATION_RELS_PART)?;
        let slide_rels = self.parse_slide_relationships(&rels_content)?;

        let presentation = self.read_file_from_archive(archive, PRESENTATION_PART)?;
        let listed = self.parse_slide_id_list(&presentation)?;

        if !listed.is_empty() {
            let targets: HashMap<&str, &str> = slide_rels
                .iter()
                .map(|rel| (rel.id.as_str(), rel.path.as_str()))
                .collect();
            return listed
                .iter()
                .map(|id| {
                    targets.get(id.as_str()).map(|p| p.to_string()).ok_or_else(|| {
                        Error::MissingPart(format!("no slide relationship '{}'", id))
                    })
                })
                .collect();
        }

        let mut slides: Vec<(String, Option<usize>)> = slide_rels
            .into_iter()
            .map(|rel| {
                let order_num =
                    extract_slide_number(&rel.id).or_else(|| extract_slide_number(&rel.path));
                (rel.path, order_num)
            })
            .collect();

        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }

    /// Collect the slide relationships of `presentation.xml.rels`.
    fn parse_slide_relationships(&self, rels_content: &str) -> Result<Vec<SlideRel>> {
        let mut slides = Vec::new();
        let mut reader = Reader::from_str(rels_content);
        reader.trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if local_name(e.name().as_ref()) == b"Relationship" =>
                {
                    let rel_type = attribute(e, b"Type").unwrap_or_default();
                    let target = attribute(e, b"Target").unwrap_or_default();
                    let id = attribute(e, b"Id").unwrap_or_default();

                    // Slides only, not layouts or masters
                    if rel_type.ends_with("/slide") {
                        let path = match target.strip_prefix('/') {
                            Some(absolute) => absolute.to_string(),
                            None => format!("ppt/{}", target),
                        };
                        slides.push(SlideRel { id, path });
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error parsing relationships: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        Ok(slides)
    }

    /// Relationship ids listed in `p:sldIdLst`, in presentation order.
    fn parse_slide_id_list(&self, presentation: &str) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut reader = Reader::from_str(presentation);
        reader.trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if local_name(e.name().as_ref()) == b"sldId" =>
                {
                    if let Some(id) = attribute(e, b"r:id") {
                        ids.push(id);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error parsing presentation: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        Ok(ids)
    }

    /// Parse a single slide from the archive.
    fn parse_slide<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        slide_path: &str,
        slide_number: usize,
    ) -> Result<ExtractedSlide> {
        let content = self.read_file_from_archive(archive, slide_path)?;
        let mut slide = ExtractedSlide::new(slide_number);

        for shape in self.extract_shapes_from_xml(&content)? {
            slide.add_line_with_position(shape.text, shape.y, shape.x);
        }

        // Top-to-bottom, left-to-right
        slide.sort_by_position();

        log::debug!(
            "Read slide {} from {} ({} text shapes)",
            slide_number,
            slide_path,
            slide.lines.len()
        );
        Ok(slide)
    }

    /// Extract shapes with text and position from slide XML.
    fn extract_shapes_from_xml(&self, xml_content: &str) -> Result<Vec<ShapeInfo>> {
        let mut shapes = Vec::new();
        let mut reader = Reader::from_str(xml_content);
        // Leading spaces inside <a:t> are content
        reader.trim_text(false);

        let mut current_shape: Option<ShapeInfo> = None;
        let mut in_text_body = false;
        let mut in_text = false;
        let mut current_text = String::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                    b"sp" | b"pic" | b"graphicFrame" => {
                        current_shape = Some(ShapeInfo::default());
                        current_text.clear();
                    }
                    b"off" => {
                        if let Some(ref mut shape) = current_shape {
                            shape.set_offset(e);
                        }
                    }
                    b"txBody" => {
                        in_text_body = true;
                    }
                    b"p" if in_text_body => {
                        if !current_text.is_empty() {
                            current_text.push('\n');
                        }
                    }
                    b"br" if in_text_body => {
                        current_text.push('\n');
                    }
                    b"t" if in_text_body => {
                        in_text = true;
                    }
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => match local_name(e.name().as_ref()) {
                    b"off" => {
                        if let Some(ref mut shape) = current_shape {
                            shape.set_offset(e);
                        }
                    }
                    b"br" if in_text_body => {
                        current_text.push('\n');
                    }
                    _ => {}
                },
                Ok(Event::Text(ref e)) => {
                    if in_text {
                        let text = e
                            .unescape()
                            .map_err(|e| Error::XmlError(format!("Bad text content: {}", e)))?;
                        current_text.push_str(&text);
                    }
                }
                Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                    b"sp" | b"pic" | b"graphicFrame" => {
                        if let Some(mut shape) = current_shape.take() {
                            shape.text = current_text.trim().to_string();
                            if !shape.text.is_empty() {
                                shapes.push(shape);
                            }
                        }
                        current_text.clear();
                        in_text_body = false;
                        in_text = false;
                    }
                    b"txBody" => {
                        in_text_body = false;
                    }
                    b"t" => {
                        in_text = false;
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error parsing slide at byte {}: {}",
                        reader.buffer_position(),
                        e
                    )));
                }
                _ => {}
            }
        }

        Ok(shapes)
    }

    /// Read a file from the ZIP archive.
    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        let mut file = archive.by_name(path).map_err(|e| match e {
            ZipError::FileNotFound => Error::MissingPart(path.to_string()),
            e => Error::ZipError(format!("Failed to open '{}': {}", path, e)),
        })?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

impl Default for PptxReader {
    fn default() -> Self {
        Self::new()
    }
}

/// A slide relationship of the presentation part.
#[derive(Debug)]
struct SlideRel {
    id: String,
    path: String,
}

/// Information about a shape extracted from XML.
#[derive(Debug, Default)]
struct ShapeInfo {
    text: String,
    x: f64,
    y: f64,
}

impl ShapeInfo {
    /// Take the position from an `<a:off x=".." y=".."/>` element.
    fn set_offset(&mut self, e: &BytesStart) {
        if let Some(x) = attribute(e, b"x").and_then(|v| v.parse::<f64>().ok()) {
            self.x = x;
        }
        if let Some(y) = attribute(e, b"y").and_then(|v| v.parse::<f64>().ok()) {
            self.y = y;
        }
    }
}

/// Value of the attribute with the given (qualified) name.
fn attribute(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract a slide number from a string like "rId2" or "slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::PptxWriter;
    use deck_core::{
        agentic_testing_deck, inches, Deck, DocumentProperties, SlideBuilder, TextStyle,
        SLIDE_COUNT,
    };
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn round_trip(deck: &Deck) -> DeckOutline {
        let cursor = PptxWriter::new()
            .write(deck, Cursor::new(Vec::new()))
            .unwrap();
        PptxReader::new()
            .read(Cursor::new(cursor.into_inner()))
            .unwrap()
    }

    #[test]
    fn test_extract_slide_number() {
        assert_eq!(extract_slide_number("rId1"), Some(1));
        assert_eq!(extract_slide_number("rId12"), Some(12));
        assert_eq!(extract_slide_number("slide1.xml"), Some(1));
        assert_eq!(extract_slide_number("slide123.xml"), Some(123));
        assert_eq!(extract_slide_number("nodigits"), None);
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"p:sp"), b"sp");
        assert_eq!(local_name(b"a:t"), b"t");
        assert_eq!(local_name(b"sp"), b"sp");
    }

    #[test]
    fn test_shape_text_and_position() {
        let xml = r#"<p:sld xmlns:a="a" xmlns:p="p"><p:cSld><p:spTree>
            <p:sp><p:spPr><a:xfrm><a:off x="100" y="200"/></a:xfrm></p:spPr>
              <p:txBody><a:p><a:r><a:t>  lead -- </a:t></a:r><a:r><a:t>rest</a:t></a:r></a:p>
              <a:p><a:r><a:t>one</a:t></a:r><a:br><a:rPr/></a:br><a:r><a:t>two &amp; three</a:t></a:r></a:p></p:txBody></p:sp>
            <p:sp><p:spPr><a:xfrm><a:off x="0" y="0"/></a:xfrm></p:spPr>
              <p:txBody><a:p><a:endParaRPr/></a:p></p:txBody></p:sp>
            </p:spTree></p:cSld></p:sld>"#;

        let shapes = PptxReader::new().extract_shapes_from_xml(xml).unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].text, "lead -- rest\none\ntwo & three");
        assert_eq!(shapes[0].x, 100.0);
        assert_eq!(shapes[0].y, 200.0);
    }

    #[test]
    fn test_table_cells_are_one_shape() {
        let mut b = SlideBuilder::new(1);
        b.simple_table(
            inches(0.6),
            inches(1.5),
            inches(12.0),
            0.45,
            &["Challenge", "Impact"],
            &[&["a", "b"]],
        )
        .unwrap();
        let mut deck = Deck::new(DocumentProperties::default());
        deck.add_slide(b.finish());

        let outline = round_trip(&deck);
        assert_eq!(outline.all_lines(), vec!["Challenge\nImpact\na\nb"]);
        assert_eq!(outline.slides[0].lines[0].x, inches(0.6).value() as f64);
    }

    #[test]
    fn test_round_trip_matches_model() {
        let mut deck = Deck::new(DocumentProperties::default());
        let mut b = SlideBuilder::new(1);
        b.title("Q&A <session>");
        b.text(
            inches(0.8),
            inches(5.9),
            inches(11.5),
            inches(0.7),
            "\"quoted\nsecond line\"",
            TextStyle::new(),
        );
        b.slide_number(1);
        deck.add_slide(b.finish());

        let expected = deck.outline();
        let actual = round_trip(&deck);
        assert_eq!(actual, expected);
        assert!(expected.verify(&actual).is_ok());
    }

    #[test]
    fn test_full_deck_round_trip() {
        let deck = agentic_testing_deck(DocumentProperties::default()).unwrap();
        let actual = round_trip(&deck);

        assert_eq!(actual.slide_count(), SLIDE_COUNT);
        deck.outline().verify(&actual).unwrap();
        assert_eq!(
            actual.slides[16].heading(),
            Some("Architecture Value & Closing")
        );
    }

    #[test]
    fn test_empty_deck_round_trip() {
        let outline = round_trip(&Deck::new(DocumentProperties::default()));
        assert_eq!(outline.slide_count(), 0);
    }

    const SLIDE_REL: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";

    fn package(parts: &[(&str, &str)]) -> Cursor<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in parts {
            zip.start_file(*name, FileOptions::default()).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        let cursor = zip.finish().unwrap();
        Cursor::new(cursor.into_inner())
    }

    fn one_line_slide(text: &str) -> String {
        format!(
            r#"<p:sld xmlns:a="a" xmlns:p="p"><p:sp><p:txBody><a:p><a:r><a:t>{}</a:t></a:r></a:p></p:txBody></p:sp></p:sld>"#,
            text
        )
    }

    #[test]
    fn test_slide_order_falls_back_to_relationship_ids() {
        let rels = format!(
            r#"<Relationships><Relationship Id="rId10" Type="{rel}" Target="slides/slide9.xml"/><Relationship Id="rId2" Type="{rel}" Target="slides/slide1.xml"/><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/></Relationships>"#,
            rel = SLIDE_REL
        );
        let first = one_line_slide("one");
        let ninth = one_line_slide("nine");
        let archive = package(&[
            ("ppt/_rels/presentation.xml.rels", &rels),
            ("ppt/presentation.xml", r#"<p:presentation xmlns:p="p"/>"#),
            ("ppt/slides/slide9.xml", &ninth),
            ("ppt/slides/slide1.xml", &first),
        ]);

        let outline = PptxReader::new().read(archive).unwrap();
        assert_eq!(outline.slide_count(), 2);
        assert_eq!(outline.all_lines(), vec!["one", "nine"]);
        assert_eq!(outline.slides[1].number, 2);
    }

    #[test]
    fn test_slide_order_follows_id_list() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default();
        let parts = [
            (
                "ppt/_rels/presentation.xml.rels",
                r#"<Relationships><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide2.xml"/></Relationships>"#,
            ),
            (
                "ppt/presentation.xml",
                r#"<p:presentation xmlns:p="p" xmlns:r="r"><p:sldIdLst><p:sldId id="256" r:id="rId3"/><p:sldId id="257" r:id="rId2"/></p:sldIdLst></p:presentation>"#,
            ),
            (
                "ppt/slides/slide1.xml",
                r#"<p:sld xmlns:a="a" xmlns:p="p"><p:sp><p:txBody><a:p><a:r><a:t>first part</a:t></a:r></a:p></p:txBody></p:sp></p:sld>"#,
            ),
            (
                "ppt/slides/slide2.xml",
                r#"<p:sld xmlns:a="a" xmlns:p="p"><p:sp><p:txBody><a:p><a:r><a:t>second part</a:t></a:r></a:p></p:txBody></p:sp></p:sld>"#,
            ),
        ];
        for (name, content) in parts {
            zip.start_file(name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        let cursor = zip.finish().unwrap();

        let outline = PptxReader::new()
            .read(Cursor::new(cursor.into_inner()))
            .unwrap();
        assert_eq!(outline.all_lines(), vec!["second part", "first part"]);
        assert_eq!(outline.slides[0].number, 1);
    }

    #[test]
    fn test_missing_presentation_part() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("ppt/_rels/presentation.xml.rels", FileOptions::default())
            .unwrap();
        zip.write_all(b"<Relationships/>").unwrap();
        let cursor = zip.finish().unwrap();

        let err = PptxReader::new()
            .read(Cursor::new(cursor.into_inner()))
            .unwrap_err();
        assert!(matches!(err, Error::MissingPart(ref p) if p == "ppt/presentation.xml"));
    }
}
