//! Slide and shape XML.

use crate::constants::{namespace, TABLE_STYLE_ID};
use deck_core::{
    Color, Error, Frame, Line, Paragraph, Rectangle, Result, Run, Shape, Slide, Table, TextBox,
};
use std::fmt::Write as FmtWrite;

/// Id of the shape tree group; shapes are numbered from the next one.
const SHAPE_TREE_ID: u32 = 1;

/// Escape XML special characters.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn fmt_error(e: std::fmt::Error) -> Error {
    Error::XmlError(e.to_string())
}

/// Generate `ppt/slides/slideN.xml` for one slide.
pub fn slide_xml(slide: &Slide) -> Result<String> {
    let mut xml = String::with_capacity(8192);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    write!(
        xml,
        r#"<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
        namespace::DML_MAIN,
        namespace::OFC_RELATIONSHIPS,
        namespace::PML_MAIN
    )
    .map_err(fmt_error)?;

    xml.push_str("<p:cSld>");
    xml.push_str("<p:bg><p:bgPr>");
    solid_fill(&mut xml, slide.background)?;
    xml.push_str("<a:effectLst/></p:bgPr></p:bg>");

    xml.push_str("<p:spTree>");
    write!(
        xml,
        r#"<p:nvGrpSpPr><p:cNvPr id="{}" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
        SHAPE_TREE_ID
    )
    .map_err(fmt_error)?;
    xml.push_str(r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#);

    for (index, shape) in slide.shapes.iter().enumerate() {
        let shape_id = SHAPE_TREE_ID + 1 + index as u32;
        match shape {
            Shape::TextBox(text_box) => text_box_xml(&mut xml, shape_id, text_box)?,
            Shape::Rectangle(rect) => rectangle_xml(&mut xml, shape_id, rect)?,
            Shape::Table(table) => table_xml(&mut xml, shape_id, table)?,
        }
    }

    xml.push_str("</p:spTree>");
    xml.push_str("</p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sld>");

    Ok(xml)
}

fn text_box_xml(xml: &mut String, shape_id: u32, text_box: &TextBox) -> Result<()> {
    xml.push_str("<p:sp>");
    xml.push_str("<p:nvSpPr>");
    write!(
        xml,
        r#"<p:cNvPr id="{}" name="TextBox {}"/>"#,
        shape_id,
        shape_id - 1
    )
    .map_err(fmt_error)?;
    xml.push_str("<p:cNvSpPr txBox=\"1\"/>");
    xml.push_str("<p:nvPr/>");
    xml.push_str("</p:nvSpPr>");

    xml.push_str("<p:spPr>");
    xfrm(xml, "a:xfrm", &text_box.frame)?;
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
    xml.push_str("<a:noFill/>");
    xml.push_str("</p:spPr>");

    xml.push_str("<p:txBody>");
    let wrap = if text_box.word_wrap { "square" } else { "none" };
    write!(xml, r#"<a:bodyPr wrap="{}" rtlCol="0">"#, wrap).map_err(fmt_error)?;
    xml.push_str("<a:spAutoFit/>");
    xml.push_str("</a:bodyPr>");
    xml.push_str("<a:lstStyle/>");
    for paragraph in &text_box.paragraphs {
        paragraph_xml(xml, paragraph)?;
    }
    xml.push_str("</p:txBody>");

    xml.push_str("</p:sp>");
    Ok(())
}

fn rectangle_xml(xml: &mut String, shape_id: u32, rect: &Rectangle) -> Result<()> {
    xml.push_str("<p:sp>");
    xml.push_str("<p:nvSpPr>");
    write!(
        xml,
        r#"<p:cNvPr id="{}" name="Rectangle {}"/>"#,
        shape_id,
        shape_id - 1
    )
    .map_err(fmt_error)?;
    xml.push_str("<p:cNvSpPr/>");
    xml.push_str("<p:nvPr/>");
    xml.push_str("</p:nvSpPr>");

    xml.push_str("<p:spPr>");
    xfrm(xml, "a:xfrm", &rect.frame)?;
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
    match rect.fill {
        Some(color) => solid_fill(xml, color)?,
        None => xml.push_str("<a:noFill/>"),
    }
    match rect.line {
        Line::None => xml.push_str("<a:ln><a:noFill/></a:ln>"),
        Line::Solid { color, width } => {
            write!(xml, r#"<a:ln w="{}">"#, width).map_err(fmt_error)?;
            solid_fill(xml, color)?;
            xml.push_str("</a:ln>");
        }
    }
    xml.push_str("</p:spPr>");

    // Autoshapes carry an empty centered text body
    xml.push_str(r#"<p:txBody><a:bodyPr rtlCol="0" anchor="ctr"/><a:lstStyle/><a:p><a:pPr algn="ctr"/><a:endParaRPr lang="en-US" dirty="0"/></a:p></p:txBody>"#);

    xml.push_str("</p:sp>");
    Ok(())
}

fn table_xml(xml: &mut String, shape_id: u32, table: &Table) -> Result<()> {
    xml.push_str("<p:graphicFrame>");
    xml.push_str("<p:nvGraphicFramePr>");
    write!(
        xml,
        r#"<p:cNvPr id="{}" name="Table {}"/>"#,
        shape_id,
        shape_id - 1
    )
    .map_err(fmt_error)?;
    xml.push_str(r#"<p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr>"#);
    xml.push_str("<p:nvPr/>");
    xml.push_str("</p:nvGraphicFramePr>");
    xfrm(xml, "p:xfrm", &table.frame)?;

    xml.push_str("<a:graphic>");
    write!(xml, r#"<a:graphicData uri="{}">"#, namespace::DML_TABLE).map_err(fmt_error)?;
    xml.push_str("<a:tbl>");
    write!(
        xml,
        r#"<a:tblPr firstRow="1" bandRow="1"><a:tableStyleId>{}</a:tableStyleId></a:tblPr>"#,
        TABLE_STYLE_ID
    )
    .map_err(fmt_error)?;

    xml.push_str("<a:tblGrid>");
    for width in &table.columns {
        write!(xml, r#"<a:gridCol w="{}"/>"#, width).map_err(fmt_error)?;
    }
    xml.push_str("</a:tblGrid>");

    for row in &table.rows {
        write!(xml, r#"<a:tr h="{}">"#, row.height).map_err(fmt_error)?;
        for cell in &row.cells {
            xml.push_str("<a:tc>");
            xml.push_str("<a:txBody><a:bodyPr/><a:lstStyle/>");
            paragraph_xml(xml, &cell.paragraph)?;
            xml.push_str("</a:txBody>");
            write!(xml, r#"<a:tcPr anchor="{}">"#, cell.anchor.code()).map_err(fmt_error)?;
            if let Some(color) = cell.fill {
                solid_fill(xml, color)?;
            }
            xml.push_str("</a:tcPr>");
            xml.push_str("</a:tc>");
        }
        xml.push_str("</a:tr>");
    }

    xml.push_str("</a:tbl>");
    xml.push_str("</a:graphicData>");
    xml.push_str("</a:graphic>");
    xml.push_str("</p:graphicFrame>");
    Ok(())
}

fn paragraph_xml(xml: &mut String, paragraph: &Paragraph) -> Result<()> {
    xml.push_str("<a:p>");

    write!(xml, r#"<a:pPr algn="{}">"#, paragraph.alignment.code()).map_err(fmt_error)?;
    if let Some(before) = paragraph.space_before {
        write!(
            xml,
            r#"<a:spcBef><a:spcPts val="{}"/></a:spcBef>"#,
            (before * 100.0).round() as i64
        )
        .map_err(fmt_error)?;
    }
    if let Some(after) = paragraph.space_after {
        write!(
            xml,
            r#"<a:spcAft><a:spcPts val="{}"/></a:spcAft>"#,
            (after * 100.0).round() as i64
        )
        .map_err(fmt_error)?;
    }
    if let Some(bullet) = paragraph.bullet {
        let mut buf = [0u8; 4];
        write!(
            xml,
            r#"<a:buChar char="{}"/>"#,
            escape_xml(bullet.encode_utf8(&mut buf))
        )
        .map_err(fmt_error)?;
    }
    xml.push_str("</a:pPr>");

    for run in &paragraph.runs {
        run_xml(xml, run)?;
    }

    xml.push_str("</a:p>");
    Ok(())
}

/// Write a run, turning each `\n` into a soft line break.
fn run_xml(xml: &mut String, run: &Run) -> Result<()> {
    for (index, segment) in run.text.split('\n').enumerate() {
        if index > 0 {
            xml.push_str("<a:br>");
            run_properties(xml, run)?;
            xml.push_str("</a:br>");
        }
        if segment.is_empty() {
            continue;
        }
        xml.push_str("<a:r>");
        run_properties(xml, run)?;
        write!(xml, "<a:t>{}</a:t>", escape_xml(segment)).map_err(fmt_error)?;
        xml.push_str("</a:r>");
    }
    Ok(())
}

fn run_properties(xml: &mut String, run: &Run) -> Result<()> {
    let font = &run.font;
    write!(
        xml,
        r#"<a:rPr lang="en-US" sz="{}""#,
        font.size_centipoints()
    )
    .map_err(fmt_error)?;
    if font.bold {
        xml.push_str(" b=\"1\"");
    }
    if font.italic {
        xml.push_str(" i=\"1\"");
    }
    xml.push_str(" dirty=\"0\">");
    solid_fill(xml, font.color)?;
    write!(
        xml,
        r#"<a:latin typeface="{}"/>"#,
        escape_xml(&font.typeface)
    )
    .map_err(fmt_error)?;
    xml.push_str("</a:rPr>");
    Ok(())
}

fn solid_fill(xml: &mut String, color: Color) -> Result<()> {
    write!(
        xml,
        r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
        color.hex()
    )
    .map_err(fmt_error)
}

fn xfrm(xml: &mut String, tag: &str, frame: &Frame) -> Result<()> {
    write!(
        xml,
        r#"<{tag}><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></{tag}>"#,
        frame.x, frame.y, frame.cx, frame.cy
    )
    .map_err(fmt_error)
}
