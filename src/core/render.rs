//! Builds every XML part of the verification document.
//!
//! Rendering is pure: the same metadata, items and timestamp always produce
//! byte-identical parts.

use crate::core::xml::{
    escape_xml, font_properties, paragraph, run, table, table_cell, table_row, Alignment,
    CellStyle, ParagraphStyle, RunStyle, BODY_FONT,
};
use crate::domain::model::{ChecklistItem, DocumentMetadata, OutputPackage, PackagePart};
use chrono::{DateTime, SecondsFormat, Utc};

pub const DOCUMENT_TITLE: &str = "行芯产品验证文档";
pub const COMPANY: &str = "行芯科技";

pub const BRAND_COLOR: &str = "2E5090";
pub const LABEL_FILL: &str = "E8EEF7";
pub const ZEBRA_FILL: &str = "F5F5F5";

/// Result cell content, identical on every data row.
pub const RESULT_PLACEHOLDER: &str = "□ 通过    □ 失败    □ 待测试";

pub mod part_names {
    pub const CONTENT_TYPES: &str = "[Content_Types].xml";
    pub const PACKAGE_RELS: &str = "_rels/.rels";
    pub const APP: &str = "docProps/app.xml";
    pub const CORE: &str = "docProps/core.xml";
    pub const DOCUMENT: &str = "word/document.xml";
    pub const STYLES: &str = "word/styles.xml";
    pub const HEADER: &str = "word/header1.xml";
    pub const FOOTER: &str = "word/footer1.xml";
    pub const DOCUMENT_RELS: &str = "word/_rels/document.xml.rels";
}

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const INFO_COLUMNS: [u32; 4] = [1800, 2880, 1800, 2880];
const CHECKLIST_COLUMNS: [u32; 3] = [2800, 4560, 2000];

/// Renders all parts, in archive order.
pub fn render_package(
    metadata: &DocumentMetadata,
    items: &[ChecklistItem],
    generated_at: DateTime<Utc>,
) -> OutputPackage {
    OutputPackage::new(vec![
        PackagePart {
            path: part_names::CONTENT_TYPES,
            content: content_types_xml(),
        },
        PackagePart {
            path: part_names::PACKAGE_RELS,
            content: package_rels_xml(),
        },
        PackagePart {
            path: part_names::APP,
            content: app_xml(),
        },
        PackagePart {
            path: part_names::CORE,
            content: core_xml(&metadata.user, generated_at),
        },
        PackagePart {
            path: part_names::DOCUMENT,
            content: document_xml(metadata, items),
        },
        PackagePart {
            path: part_names::STYLES,
            content: styles_xml(),
        },
        PackagePart {
            path: part_names::HEADER,
            content: header_xml(),
        },
        PackagePart {
            path: part_names::FOOTER,
            content: footer_xml(),
        },
        PackagePart {
            path: part_names::DOCUMENT_RELS,
            content: document_rels_xml(),
        },
    ])
}

fn label_cell(text: &str) -> String {
    table_cell(
        text,
        INFO_COLUMNS[0],
        CellStyle {
            fill: Some(LABEL_FILL),
            bold: true,
            ..CellStyle::default()
        },
    )
}

fn value_cell(text: &str) -> String {
    table_cell(text, INFO_COLUMNS[1], CellStyle::default())
}

fn info_table(metadata: &DocumentMetadata) -> String {
    let rows = [
        table_row(&[
            label_cell("产品名称："),
            value_cell(&metadata.product),
            label_cell("版本号："),
            value_cell(&metadata.version),
        ]),
        table_row(&[
            label_cell("测试日期："),
            value_cell(&metadata.date),
            label_cell("测试人员："),
            value_cell(&metadata.user),
        ]),
    ];
    table(&INFO_COLUMNS, &rows)
}

fn checklist_table(items: &[ChecklistItem]) -> String {
    let header_style = CellStyle {
        fill: Some(BRAND_COLOR),
        align: Alignment::Center,
        bold: true,
        color: Some("FFFFFF"),
    };

    let mut rows = Vec::with_capacity(items.len() + 1);
    rows.push(table_row(&[
        table_cell("测试功能点", CHECKLIST_COLUMNS[0], header_style),
        table_cell("测试要点", CHECKLIST_COLUMNS[1], header_style),
        table_cell("测试结果", CHECKLIST_COLUMNS[2], header_style),
    ]));

    for (index, item) in items.iter().enumerate() {
        let fill = if index % 2 == 1 { Some(ZEBRA_FILL) } else { None };
        let style = CellStyle {
            fill,
            ..CellStyle::default()
        };
        rows.push(table_row(&[
            table_cell(&item.function, CHECKLIST_COLUMNS[0], style),
            table_cell(&item.points, CHECKLIST_COLUMNS[1], style),
            table_cell(
                RESULT_PLACEHOLDER,
                CHECKLIST_COLUMNS[2],
                CellStyle {
                    align: Alignment::Center,
                    ..style
                },
            ),
        ]));
    }

    table(&CHECKLIST_COLUMNS, &rows)
}

fn section_heading(text: &str, before: u32, after: u32) -> String {
    paragraph(
        &[run(text, RunStyle::heading(28))],
        ParagraphStyle::spaced(Some(before), Some(after)),
    )
}

pub fn document_xml(metadata: &DocumentMetadata, items: &[ChecklistItem]) -> String {
    let body = [
        paragraph(
            &[run(DOCUMENT_TITLE, RunStyle::heading(36).with_color(BRAND_COLOR))],
            ParagraphStyle {
                align: Some(Alignment::Center),
                spacing_after: Some(220),
                ..ParagraphStyle::default()
            },
        ),
        info_table(metadata),
        paragraph(&[run("", RunStyle::default())], ParagraphStyle::spaced(Some(200), Some(200))),
        section_heading("测试项目清单", 160, 140),
        checklist_table(items),
        paragraph(&[run("", RunStyle::default())], ParagraphStyle::spaced(Some(260), Some(160))),
        section_heading("备注", 120, 120),
        paragraph(
            &[run(
                "（此处可填写测试过程中的特殊情况说明、环境配置信息、问题记录等）",
                RunStyle::default().with_color("999999"),
            )],
            ParagraphStyle::spaced(None, Some(220)),
        ),
        section_heading("签字确认", 120, 120),
        paragraph(
            &[run(
                "测试人员签字：____________________    日期：____________________",
                RunStyle::sized(22),
            )],
            ParagraphStyle::spaced(Some(180), Some(120)),
        ),
        paragraph(
            &[run(
                "审核人员签字：____________________    日期：____________________",
                RunStyle::sized(22),
            )],
            ParagraphStyle::spaced(Some(140), Some(120)),
        ),
    ];

    let sect_pr = concat!(
        "<w:sectPr>",
        r#"<w:headerReference w:type="default" r:id="rId1"/>"#,
        r#"<w:footerReference w:type="default" r:id="rId2"/>"#,
        r#"<w:pgSz w:w="11906" w:h="16838"/>"#,
        r#"<w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/>"#,
        "</w:sectPr>",
    );

    format!(
        r#"{}<w:document xmlns:w="{}" xmlns:r="{}"><w:body>{}{}</w:body></w:document>"#,
        XML_DECLARATION,
        WORDML_NS,
        RELATIONSHIPS_NS,
        body.concat(),
        sect_pr
    )
}

pub fn header_xml() -> String {
    format!(
        concat!(
            r#"{}<w:hdr xmlns:w="{}">"#,
            r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr>{}</w:p>"#,
            r#"<w:p><w:pPr><w:pBdr><w:bottom w:val="single" w:sz="6" w:color="{}"/></w:pBdr></w:pPr><w:r><w:t/></w:r></w:p>"#,
            "</w:hdr>"
        ),
        XML_DECLARATION,
        WORDML_NS,
        run(
            "行芯科技 | 产品验证文档",
            RunStyle::heading(20).with_color(BRAND_COLOR)
        ),
        BRAND_COLOR
    )
}

fn page_field(instr: &str) -> String {
    format!(
        r#"<w:fldSimple w:instr=" {} "><w:r><w:rPr>{}</w:rPr><w:t>1</w:t></w:r></w:fldSimple>"#,
        instr,
        font_properties(BODY_FONT, 18)
    )
}

pub fn footer_xml() -> String {
    let small = RunStyle::sized(18);
    format!(
        concat!(
            r#"{}<w:ftr xmlns:w="{}"><w:p>"#,
            r#"<w:pPr><w:jc w:val="center"/><w:pBdr><w:top w:val="single" w:sz="4" w:color="CCCCCC"/></w:pBdr></w:pPr>"#,
            "{}{}{}{}{}",
            "</w:p></w:ftr>"
        ),
        XML_DECLARATION,
        WORDML_NS,
        run("机密文件  •  第 ", small),
        page_field("PAGE"),
        run(" 页  •  共 ", small),
        page_field("NUMPAGES"),
        run(" 页", small)
    )
}

pub fn styles_xml() -> String {
    format!(
        r#"{}
<w:styles xmlns:w="{}">
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:qFormat/>
    <w:rPr>
      <w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:eastAsia="{font}"/>
      <w:sz w:val="21"/>
      <w:szCs w:val="21"/>
    </w:rPr>
  </w:style>
</w:styles>
"#,
        XML_DECLARATION,
        WORDML_NS,
        font = BODY_FONT
    )
}

pub fn content_types_xml() -> String {
    let overrides = [
        (
            "/word/document.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
        ),
        (
            "/word/styles.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
        ),
        (
            "/word/header1.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml",
        ),
        (
            "/word/footer1.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml",
        ),
        (
            "/docProps/core.xml",
            "application/vnd.openxmlformats-package.core-properties+xml",
        ),
        (
            "/docProps/app.xml",
            "application/vnd.openxmlformats-officedocument.extended-properties+xml",
        ),
    ];

    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
    xml.push('\n');
    xml.push_str(
        r#"  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    );
    xml.push('\n');
    xml.push_str(r#"  <Default Extension="xml" ContentType="application/xml"/>"#);
    xml.push('\n');
    for (part, content_type) in overrides {
        xml.push_str(&format!(
            r#"  <Override PartName="{}" ContentType="{}"/>"#,
            part, content_type
        ));
        xml.push('\n');
    }
    xml.push_str("</Types>\n");
    xml
}

fn relationships_xml(relationships: &[(&str, &str, &str)]) -> String {
    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    xml.push('\n');
    for (id, rel_type, target) in relationships {
        xml.push_str(&format!(
            r#"  <Relationship Id="{}" Type="{}" Target="{}"/>"#,
            id, rel_type, target
        ));
        xml.push('\n');
    }
    xml.push_str("</Relationships>\n");
    xml
}

pub fn package_rels_xml() -> String {
    relationships_xml(&[
        (
            "rId1",
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument",
            "word/document.xml",
        ),
        (
            "rId2",
            "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties",
            "docProps/core.xml",
        ),
        (
            "rId3",
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties",
            "docProps/app.xml",
        ),
    ])
}

/// `rId1`/`rId2` are referenced from the section properties in `document.xml`.
pub fn document_rels_xml() -> String {
    relationships_xml(&[
        (
            "rId1",
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/header",
            "header1.xml",
        ),
        (
            "rId2",
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer",
            "footer1.xml",
        ),
        (
            "rId3",
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles",
            "styles.xml",
        ),
    ])
}

pub fn app_xml() -> String {
    format!(
        r#"{}
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"
            xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
  <Application>Microsoft Office Word</Application>
  <DocSecurity>0</DocSecurity>
  <ScaleCrop>false</ScaleCrop>
  <Company>{}</Company>
  <LinksUpToDate>false</LinksUpToDate>
  <SharedDoc>false</SharedDoc>
  <HyperlinksChanged>false</HyperlinksChanged>
  <AppVersion>16.0000</AppVersion>
</Properties>
"#,
        XML_DECLARATION, COMPANY
    )
}

pub fn core_xml(user: &str, generated_at: DateTime<Utc>) -> String {
    let timestamp = generated_at.to_rfc3339_opts(SecondsFormat::Secs, true);
    let creator = escape_xml(user);
    format!(
        r#"{declaration}
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties"
                   xmlns:dc="http://purl.org/dc/elements/1.1/"
                   xmlns:dcterms="http://purl.org/dc/terms/"
                   xmlns:dcmitype="http://purl.org/dc/dcmitype/"
                   xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:title>{title}</dc:title>
  <dc:subject>产品测试验证</dc:subject>
  <dc:creator>{creator}</dc:creator>
  <cp:keywords>验证,测试,文档</cp:keywords>
  <dc:description>自动生成的产品测试验证文档</dc:description>
  <cp:lastModifiedBy>{creator}</cp:lastModifiedBy>
  <dcterms:created xsi:type="dcterms:W3CDTF">{timestamp}</dcterms:created>
  <dcterms:modified xsi:type="dcterms:W3CDTF">{timestamp}</dcterms:modified>
</cp:coreProperties>
"#,
        declaration = XML_DECLARATION,
        title = DOCUMENT_TITLE,
        creator = creator,
        timestamp = timestamp
    )
}
