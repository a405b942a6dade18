//! WordprocessingML fragment builders.
//!
//! Every builder returns a `String` fragment; text content goes through
//! [`escape_xml`] before it is embedded.

pub const BODY_FONT: &str = "SimSun";
pub const HEADING_FONT: &str = "SimHei";

/// Escapes the five reserved XML characters.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStyle {
    pub font: &'static str,
    /// Half-points.
    pub size: u32,
    pub bold: bool,
    pub color: Option<&'static str>,
}

impl Default for RunStyle {
    fn default() -> Self {
        Self {
            font: BODY_FONT,
            size: 21,
            bold: false,
            color: None,
        }
    }
}

impl RunStyle {
    pub fn sized(size: u32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn heading(size: u32) -> Self {
        Self {
            font: HEADING_FONT,
            size,
            bold: true,
            color: None,
        }
    }

    pub fn with_color(mut self, color: &'static str) -> Self {
        self.color = Some(color);
        self
    }

    fn properties(&self) -> String {
        let mut xml = String::from("<w:rPr>");
        xml.push_str(&font_properties(self.font, self.size));
        if self.bold {
            xml.push_str("<w:b/>");
        }
        if let Some(color) = self.color {
            xml.push_str(&format!(r#"<w:color w:val="{}"/>"#, color));
        }
        xml.push_str("</w:rPr>");
        xml
    }
}

/// Font family and size elements shared by every run.
pub fn font_properties(font: &str, size: u32) -> String {
    format!(
        r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:eastAsia="{font}"/><w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#
    )
}

pub fn run(text: &str, style: RunStyle) -> String {
    format!(
        r#"<w:r>{}<w:t xml:space="preserve">{}</w:t></w:r>"#,
        style.properties(),
        escape_xml(text)
    )
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
}

impl Alignment {
    fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParagraphStyle {
    pub align: Option<Alignment>,
    pub spacing_before: Option<u32>,
    pub spacing_after: Option<u32>,
}

impl ParagraphStyle {
    pub fn aligned(align: Alignment) -> Self {
        Self {
            align: Some(align),
            ..Self::default()
        }
    }

    pub fn spaced(before: Option<u32>, after: Option<u32>) -> Self {
        Self {
            spacing_before: before,
            spacing_after: after,
            ..Self::default()
        }
    }
}

pub fn paragraph(runs: &[String], style: ParagraphStyle) -> String {
    let mut ppr = String::new();
    if let Some(align) = style.align {
        ppr.push_str(&format!(r#"<w:jc w:val="{}"/>"#, align.as_str()));
    }
    if style.spacing_before.is_some() || style.spacing_after.is_some() {
        ppr.push_str(&format!(
            r#"<w:spacing w:before="{}" w:after="{}"/>"#,
            style.spacing_before.unwrap_or(0),
            style.spacing_after.unwrap_or(0)
        ));
    }

    if ppr.is_empty() {
        format!("<w:p>{}</w:p>", runs.concat())
    } else {
        format!("<w:p><w:pPr>{}</w:pPr>{}</w:p>", ppr, runs.concat())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellStyle {
    pub fill: Option<&'static str>,
    pub align: Alignment,
    pub bold: bool,
    /// Text color, used for light text on dark fills.
    pub color: Option<&'static str>,
}

const CELL_MARGINS: &str = concat!(
    r#"<w:tcMar><w:top w:w="80" w:type="dxa"/><w:bottom w:w="80" w:type="dxa"/>"#,
    r#"<w:left w:w="120" w:type="dxa"/><w:right w:w="120" w:type="dxa"/></w:tcMar>"#,
);

const CELL_BORDERS: &str = concat!(
    "<w:tcBorders>",
    r#"<w:top w:val="single" w:sz="8" w:color="666666"/>"#,
    r#"<w:left w:val="single" w:sz="8" w:color="666666"/>"#,
    r#"<w:bottom w:val="single" w:sz="8" w:color="666666"/>"#,
    r#"<w:right w:val="single" w:sz="8" w:color="666666"/>"#,
    "</w:tcBorders>",
);

pub fn table_cell(text: &str, width: u32, style: CellStyle) -> String {
    let mut tc_pr = format!(r#"<w:tcW w:w="{}" w:type="dxa"/>"#, width);
    tc_pr.push_str(CELL_MARGINS);
    tc_pr.push_str(r#"<w:vAlign w:val="center"/>"#);
    tc_pr.push_str(CELL_BORDERS);
    if let Some(fill) = style.fill {
        tc_pr.push_str(&format!(
            r#"<w:shd w:val="clear" w:color="auto" w:fill="{}"/>"#,
            fill
        ));
    }

    let run_style = RunStyle {
        font: if style.bold { HEADING_FONT } else { BODY_FONT },
        size: if style.bold { 22 } else { 21 },
        bold: style.bold,
        color: style.color,
    };
    let content = paragraph(&[run(text, run_style)], ParagraphStyle::aligned(style.align));

    format!("<w:tc><w:tcPr>{}</w:tcPr>{}</w:tc>", tc_pr, content)
}

pub fn table_row(cells: &[String]) -> String {
    format!("<w:tr>{}</w:tr>", cells.concat())
}

/// A fixed-width table; `columns` are the grid widths in dxa.
pub fn table(columns: &[u32], rows: &[String]) -> String {
    let total: u32 = columns.iter().sum();
    let grid: String = columns
        .iter()
        .map(|w| format!(r#"<w:gridCol w:w="{}"/>"#, w))
        .collect();

    format!(
        r#"<w:tbl><w:tblPr><w:tblW w:w="{}" w:type="dxa"/></w:tblPr><w:tblGrid>{}</w:tblGrid>{}</w:tbl>"#,
        total,
        grid,
        rows.concat()
    )
}
