//! Writes a [`Deck`] as a `.pptx` package.

use crate::package::{self, Relationships};
use crate::template;
use crate::xml::slide_xml;
use deck_core::{Deck, Error, Result};
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Serializes decks to PresentationML packages.
#[derive(Debug, Clone, Copy)]
pub struct PptxWriter {
    compression: CompressionMethod,
}

impl PptxWriter {
    /// Create a writer that deflates every part.
    pub fn new() -> Self {
        Self {
            compression: CompressionMethod::Deflated,
        }
    }

    /// Write `deck` into `writer` and return the writer once the archive is
    /// finished.
    pub fn write<W: Write + Seek>(&self, deck: &Deck, writer: W) -> Result<W> {
        let mut zip = ZipWriter::new(writer);
        let slide_count = deck.slide_count();

        self.add_part(
            &mut zip,
            package::CONTENT_TYPES_PART,
            &package::content_types_xml(slide_count)?,
        )?;
        self.add_rels(&mut zip, package::ROOT_RELS_PART, &package::root_relationships())?;
        self.add_part(
            &mut zip,
            package::CORE_PROPS_PART,
            &package::core_properties_xml(&deck.properties)?,
        )?;
        self.add_part(
            &mut zip,
            package::APP_PROPS_PART,
            &package::app_properties_xml(slide_count)?,
        )?;

        let (presentation_rels, slide_rel_ids) = package::presentation_relationships(slide_count);
        self.add_part(
            &mut zip,
            package::PRESENTATION_PART,
            &package::presentation_xml(deck, &slide_rel_ids)?,
        )?;
        self.add_rels(&mut zip, package::PRESENTATION_RELS_PART, &presentation_rels)?;

        self.add_part(&mut zip, package::SLIDE_MASTER_PART, template::SLIDE_MASTER_XML)?;
        self.add_rels(
            &mut zip,
            package::SLIDE_MASTER_RELS_PART,
            &package::slide_master_relationships(),
        )?;
        self.add_part(&mut zip, package::SLIDE_LAYOUT_PART, template::SLIDE_LAYOUT_XML)?;
        self.add_rels(
            &mut zip,
            package::SLIDE_LAYOUT_RELS_PART,
            &package::slide_layout_relationships(),
        )?;
        self.add_part(&mut zip, package::THEME_PART, template::THEME_XML)?;
        self.add_part(&mut zip, package::PRES_PROPS_PART, template::PRES_PROPS_XML)?;
        self.add_part(&mut zip, package::VIEW_PROPS_PART, template::VIEW_PROPS_XML)?;
        self.add_part(&mut zip, package::TABLE_STYLES_PART, template::TABLE_STYLES_XML)?;

        let slide_rels = package::slide_relationships();
        for (index, slide) in deck.slides.iter().enumerate() {
            let number = index + 1;
            log::debug!("Writing slide {} ({} shapes)", number, slide.shapes.len());
            self.add_part(&mut zip, &package::slide_part(number), &slide_xml(slide)?)?;
            self.add_rels(&mut zip, &package::slide_rels_part(number), &slide_rels)?;
        }

        let writer = zip
            .finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish archive: {}", e)))?;
        log::info!("Wrote package with {} slides", slide_count);
        Ok(writer)
    }

    /// Write `deck` to a file at `path`, replacing any existing file.
    pub fn save<P: AsRef<Path>>(&self, deck: &Deck, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut writer = self.write(deck, BufWriter::new(file))?;
        writer.flush()?;
        log::debug!("Saved {}", path.display());
        Ok(())
    }

    fn add_part<W: Write + Seek>(&self, zip: &mut ZipWriter<W>, name: &str, content: &str) -> Result<()> {
        let options = FileOptions::default().compression_method(self.compression);
        zip.start_file(name, options)
            .map_err(|e| Error::ZipError(format!("Failed to start '{}': {}", name, e)))?;
        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn add_rels<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        name: &str,
        rels: &Relationships,
    ) -> Result<()> {
        self.add_part(zip, name, &rels.to_xml()?)
    }
}

impl Default for PptxWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{inches, DocumentProperties, SlideBuilder, TextStyle};
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn written(deck: &Deck) -> ZipArchive<Cursor<Vec<u8>>> {
        let cursor = PptxWriter::new()
            .write(deck, Cursor::new(Vec::new()))
            .unwrap();
        ZipArchive::new(Cursor::new(cursor.into_inner())).unwrap()
    }

    fn read_part(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
        let mut content = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        content
    }

    fn two_slide_deck() -> Deck {
        let mut deck = Deck::new(DocumentProperties::default());
        for number in 1..=2 {
            let mut b = SlideBuilder::new(number);
            b.title(&format!("Slide {}", number));
            b.text(
                inches(0.6),
                inches(2.0),
                inches(4.0),
                inches(0.5),
                "Tom & Jerry",
                TextStyle::new(),
            );
            deck.add_slide(b.finish());
        }
        deck
    }

    #[test]
    fn test_package_parts() {
        let mut archive = written(&two_slide_deck());
        let mut names: Vec<_> = archive.file_names().map(str::to_string).collect();
        names.sort();

        let mut expected = vec![
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/app.xml",
            "docProps/core.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/presProps.xml",
            "ppt/presentation.xml",
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slides/_rels/slide1.xml.rels",
            "ppt/slides/_rels/slide2.xml.rels",
            "ppt/slides/slide1.xml",
            "ppt/slides/slide2.xml",
            "ppt/tableStyles.xml",
            "ppt/theme/theme1.xml",
            "ppt/viewProps.xml",
        ];
        expected.sort();
        assert_eq!(names, expected);

        let slide = read_part(&mut archive, "ppt/slides/slide2.xml");
        assert!(slide.contains("<a:t>Slide 2</a:t>"));
        assert!(slide.contains("<a:t>Tom &amp; Jerry</a:t>"));

        let rels = read_part(&mut archive, "ppt/slides/_rels/slide1.xml.rels");
        assert!(rels.contains(r#"Target="../slideLayouts/slideLayout1.xml""#));
    }

    #[test]
    fn test_parts_are_deflated() {
        let mut archive = written(&two_slide_deck());
        let file = archive.by_name("ppt/theme/theme1.xml").unwrap();
        assert_eq!(file.compression(), CompressionMethod::Deflated);
    }

    #[test]
    fn test_empty_deck() {
        let mut archive = written(&Deck::new(DocumentProperties::default()));
        assert!(archive.by_name("ppt/slides/slide1.xml").is_err());

        let presentation = read_part(&mut archive, "ppt/presentation.xml");
        assert!(!presentation.contains("sldIdLst"));
    }

    #[test]
    fn test_save_to_file() {
        let dir = std::env::temp_dir().join(format!("deck-pptx-save-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("deck.pptx");

        PptxWriter::new().save(&two_slide_deck(), &path).unwrap();
        let archive = ZipArchive::new(File::open(&path).unwrap()).unwrap();
        assert!(archive.len() > 10);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
