//! Package-level parts: content types, relationships, presentation and
//! document properties.

use crate::constants::{
    content_type as ct, namespace, relationship_type as rt, FIRST_SLIDE_ID, NOTES_SIZE,
    SLIDE_MASTER_ID,
};
use crate::xml::escape_xml;
use chrono::SecondsFormat;
use deck_core::{Deck, DocumentProperties, Error, Result};
use std::fmt::Write as FmtWrite;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
pub const ROOT_RELS_PART: &str = "_rels/.rels";
pub const CORE_PROPS_PART: &str = "docProps/core.xml";
pub const APP_PROPS_PART: &str = "docProps/app.xml";
pub const PRESENTATION_PART: &str = "ppt/presentation.xml";
pub const PRESENTATION_RELS_PART: &str = "ppt/_rels/presentation.xml.rels";
pub const SLIDE_MASTER_PART: &str = "ppt/slideMasters/slideMaster1.xml";
pub const SLIDE_MASTER_RELS_PART: &str = "ppt/slideMasters/_rels/slideMaster1.xml.rels";
pub const SLIDE_LAYOUT_PART: &str = "ppt/slideLayouts/slideLayout1.xml";
pub const SLIDE_LAYOUT_RELS_PART: &str = "ppt/slideLayouts/_rels/slideLayout1.xml.rels";
pub const THEME_PART: &str = "ppt/theme/theme1.xml";
pub const PRES_PROPS_PART: &str = "ppt/presProps.xml";
pub const VIEW_PROPS_PART: &str = "ppt/viewProps.xml";
pub const TABLE_STYLES_PART: &str = "ppt/tableStyles.xml";

/// Part name of the slide at 1-based `number`.
pub fn slide_part(number: usize) -> String {
    format!("ppt/slides/slide{}.xml", number)
}

/// Relationships part of the slide at 1-based `number`.
pub fn slide_rels_part(number: usize) -> String {
    format!("ppt/slides/_rels/slide{}.xml.rels", number)
}

fn fmt_error(e: std::fmt::Error) -> Error {
    Error::XmlError(e.to_string())
}

/// A relationships part under construction.
#[derive(Debug, Default)]
pub struct Relationships {
    items: Vec<(String, &'static str, String)>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relationship and return its id (`rId1`, `rId2`, ...).
    pub fn add(&mut self, rel_type: &'static str, target: impl Into<String>) -> String {
        let id = format!("rId{}", self.items.len() + 1);
        self.items.push((id.clone(), rel_type, target.into()));
        id
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(256 + self.items.len() * 160);
        xml.push_str(XML_DECLARATION);
        xml.push('\n');
        write!(xml, r#"<Relationships xmlns="{}">"#, namespace::RELATIONSHIPS)
            .map_err(fmt_error)?;
        for (id, rel_type, target) in &self.items {
            write!(
                xml,
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                id,
                rel_type,
                escape_xml(target)
            )
            .map_err(fmt_error)?;
        }
        xml.push_str("</Relationships>");
        Ok(xml)
    }
}

/// `[Content_Types].xml` for a deck with `slide_count` slides.
pub fn content_types_xml(slide_count: usize) -> Result<String> {
    let mut xml = String::with_capacity(2048 + slide_count * 128);
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    write!(xml, r#"<Types xmlns="{}">"#, namespace::CONTENT_TYPES).map_err(fmt_error)?;
    write!(
        xml,
        r#"<Default Extension="rels" ContentType="{}"/><Default Extension="xml" ContentType="{}"/>"#,
        ct::OPC_RELATIONSHIPS,
        ct::XML
    )
    .map_err(fmt_error)?;

    let mut overrides: Vec<(String, &str)> = vec![
        (PRESENTATION_PART.to_string(), ct::PML_PRESENTATION_MAIN),
        (SLIDE_MASTER_PART.to_string(), ct::PML_SLIDE_MASTER),
        (SLIDE_LAYOUT_PART.to_string(), ct::PML_SLIDE_LAYOUT),
    ];
    for number in 1..=slide_count {
        overrides.push((slide_part(number), ct::PML_SLIDE));
    }
    overrides.extend([
        (THEME_PART.to_string(), ct::OFC_THEME),
        (PRES_PROPS_PART.to_string(), ct::PML_PRES_PROPS),
        (VIEW_PROPS_PART.to_string(), ct::PML_VIEW_PROPS),
        (TABLE_STYLES_PART.to_string(), ct::PML_TABLE_STYLES),
        (CORE_PROPS_PART.to_string(), ct::OPC_CORE_PROPERTIES),
        (APP_PROPS_PART.to_string(), ct::OFC_EXTENDED_PROPERTIES),
    ]);

    for (part, content_type) in overrides {
        write!(
            xml,
            r#"<Override PartName="/{}" ContentType="{}"/>"#,
            part, content_type
        )
        .map_err(fmt_error)?;
    }
    xml.push_str("</Types>");
    Ok(xml)
}

/// Package relationships (`_rels/.rels`).
pub fn root_relationships() -> Relationships {
    let mut rels = Relationships::new();
    rels.add(rt::OFFICE_DOCUMENT, PRESENTATION_PART);
    rels.add(rt::CORE_PROPERTIES, CORE_PROPS_PART);
    rels.add(rt::EXTENDED_PROPERTIES, APP_PROPS_PART);
    rels
}

/// Relationships of `ppt/presentation.xml`, with the relationship id of each
/// slide in order.
///
/// The master is always `rId1` and slides follow from `rId2`.
pub fn presentation_relationships(slide_count: usize) -> (Relationships, Vec<String>) {
    let mut rels = Relationships::new();
    rels.add(rt::SLIDE_MASTER, "slideMasters/slideMaster1.xml");
    let slide_ids: Vec<String> = (1..=slide_count)
        .map(|number| rels.add(rt::SLIDE, format!("slides/slide{}.xml", number)))
        .collect();
    rels.add(rt::PRES_PROPS, "presProps.xml");
    rels.add(rt::VIEW_PROPS, "viewProps.xml");
    rels.add(rt::THEME, "theme/theme1.xml");
    rels.add(rt::TABLE_STYLES, "tableStyles.xml");
    (rels, slide_ids)
}

pub fn slide_master_relationships() -> Relationships {
    let mut rels = Relationships::new();
    rels.add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
    rels.add(rt::THEME, "../theme/theme1.xml");
    rels
}

pub fn slide_layout_relationships() -> Relationships {
    let mut rels = Relationships::new();
    rels.add(rt::SLIDE_MASTER, "../slideMasters/slideMaster1.xml");
    rels
}

pub fn slide_relationships() -> Relationships {
    let mut rels = Relationships::new();
    rels.add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
    rels
}

/// Generate `ppt/presentation.xml`.
///
/// `slide_rel_ids` holds the relationship id of each slide, in order.
pub fn presentation_xml(deck: &Deck, slide_rel_ids: &[String]) -> Result<String> {
    let mut xml = String::with_capacity(2048);

    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    write!(
        xml,
        r#"<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">"#,
        namespace::DML_MAIN,
        namespace::OFC_RELATIONSHIPS,
        namespace::PML_MAIN
    )
    .map_err(fmt_error)?;

    xml.push_str("<p:sldMasterIdLst>");
    write!(
        xml,
        r#"<p:sldMasterId id="{}" r:id="rId1"/>"#,
        SLIDE_MASTER_ID
    )
    .map_err(fmt_error)?;
    xml.push_str("</p:sldMasterIdLst>");

    if !slide_rel_ids.is_empty() {
        xml.push_str("<p:sldIdLst>");
        for (index, rel_id) in slide_rel_ids.iter().enumerate() {
            write!(
                xml,
                r#"<p:sldId id="{}" r:id="{}"/>"#,
                FIRST_SLIDE_ID + index as u32,
                rel_id
            )
            .map_err(fmt_error)?;
        }
        xml.push_str("</p:sldIdLst>");
    }

    write!(
        xml,
        r#"<p:sldSz cx="{}" cy="{}"/>"#,
        deck.width, deck.height
    )
    .map_err(fmt_error)?;
    write!(
        xml,
        r#"<p:notesSz cx="{}" cy="{}"/>"#,
        NOTES_SIZE.0, NOTES_SIZE.1
    )
    .map_err(fmt_error)?;
    xml.push_str("<p:defaultTextStyle><a:defPPr><a:defRPr lang=\"en-US\"/></a:defPPr></p:defaultTextStyle>");
    xml.push_str("</p:presentation>");

    Ok(xml)
}

/// Generate `docProps/core.xml`.
pub fn core_properties_xml(properties: &DocumentProperties) -> Result<String> {
    let timestamp = properties
        .created
        .to_rfc3339_opts(SecondsFormat::Secs, true);

    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#);
    write!(xml, "<dc:title>{}</dc:title>", escape_xml(&properties.title)).map_err(fmt_error)?;
    write!(
        xml,
        "<dc:creator>{}</dc:creator>",
        escape_xml(&properties.author)
    )
    .map_err(fmt_error)?;
    write!(
        xml,
        "<cp:lastModifiedBy>{}</cp:lastModifiedBy>",
        escape_xml(&properties.author)
    )
    .map_err(fmt_error)?;
    xml.push_str("<cp:revision>1</cp:revision>");
    write!(
        xml,
        r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
        timestamp
    )
    .map_err(fmt_error)?;
    write!(
        xml,
        r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>"#,
        timestamp
    )
    .map_err(fmt_error)?;
    xml.push_str("</cp:coreProperties>");
    Ok(xml)
}

/// `AppVersion` must have the `XX.YYYY` form.
const APP_VERSION: &str = "16.0000";

/// Generate `docProps/app.xml`.
pub fn app_properties_xml(slide_count: usize) -> Result<String> {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#);
    write!(
        xml,
        "<Application>{}</Application>",
        escape_xml(env!("CARGO_PKG_NAME"))
    )
    .map_err(fmt_error)?;
    xml.push_str("<PresentationFormat>Widescreen</PresentationFormat>");
    write!(xml, "<Slides>{}</Slides>", slide_count).map_err(fmt_error)?;
    write!(xml, "<AppVersion>{}</AppVersion>", APP_VERSION).map_err(fmt_error)?;
    xml.push_str("</Properties>");
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_relationship_ids_are_sequential() {
        let (rels, slide_ids) = presentation_relationships(3);
        assert_eq!(slide_ids, vec!["rId2", "rId3", "rId4"]);
        assert_eq!(rels.len(), 8);

        let xml = rels.to_xml().unwrap();
        assert!(xml.contains(r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>"#));
        assert!(xml.contains(r#"Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide3.xml""#));
        assert!(xml.contains(r#"Id="rId7" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme""#));
    }

    #[test]
    fn test_content_types_lists_every_slide() {
        let xml = content_types_xml(2).unwrap();
        assert!(xml.contains(r#"<Override PartName="/ppt/slides/slide1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#));
        assert!(xml.contains(r#"PartName="/ppt/slides/slide2.xml""#));
        assert!(!xml.contains("slide3.xml"));
        assert!(xml.contains(r#"PartName="/docProps/core.xml""#));
    }

    #[test]
    fn test_presentation_xml() {
        let deck = Deck::new(DocumentProperties::default());
        let ids = vec!["rId2".to_string(), "rId3".to_string()];
        let xml = presentation_xml(&deck, &ids).unwrap();

        assert!(xml.contains(r#"<p:sldMasterId id="2147483648" r:id="rId1"/>"#));
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId2"/><p:sldId id="257" r:id="rId3"/>"#));
        assert!(xml.contains(r#"<p:sldSz cx="12191695" cy="6858000"/>"#));
        assert!(xml.contains(r#"<p:notesSz cx="6858000" cy="9144000"/>"#));
    }

    #[test]
    fn test_presentation_xml_without_slides() {
        let deck = Deck::new(DocumentProperties::default());
        let xml = presentation_xml(&deck, &[]).unwrap();
        assert!(!xml.contains("sldIdLst"));
    }

    #[test]
    fn test_core_properties() {
        let created = Utc.with_ymd_and_hms(2026, 2, 3, 9, 30, 0).unwrap();
        let props = DocumentProperties::new("Q&A <Deck>", "Testing Architect").with_created(created);
        let xml = core_properties_xml(&props).unwrap();

        assert!(xml.contains("<dc:title>Q&amp;A &lt;Deck&gt;</dc:title>"));
        assert!(xml.contains("<dc:creator>Testing Architect</dc:creator>"));
        assert!(xml.contains(r#"<dcterms:created xsi:type="dcterms:W3CDTF">2026-02-03T09:30:00Z</dcterms:created>"#));
    }

    #[test]
    fn test_app_properties_count_slides() {
        let xml = app_properties_xml(17).unwrap();
        assert!(xml.contains("<Slides>17</Slides>"));
    }

    #[test]
    fn test_app_version_is_major_dot_four_digits() {
        let xml = app_properties_xml(1).unwrap();
        let start = xml.find("<AppVersion>").unwrap() + "<AppVersion>".len();
        let end = xml.find("</AppVersion>").unwrap();
        let (major, minor) = xml[start..end].split_once('.').unwrap();

        assert_eq!(major.len(), 2);
        assert_eq!(minor.len(), 4);
        assert!(major.chars().chain(minor.chars()).all(|c| c.is_ascii_digit()));
    }
}
