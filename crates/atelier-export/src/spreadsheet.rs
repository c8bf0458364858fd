//! # Spreadsheet Exporter
//!
//! Writes work-status records to a one-sheet `.xlsx` workbook.
//!
//! ## Package Layout
//! ```text
//! 작업현황_2025-09-16.xlsx (zip)
//! ├── [Content_Types].xml
//! ├── _rels/.rels
//! └── xl/
//!     ├── workbook.xml              sheet "작업현황"
//!     ├── _rels/workbook.xml.rels
//!     ├── styles.xml                style 1 = bold header
//!     └── worksheets/sheet1.xml     header row + one row per record
//! ```
//!
//! Strings are written inline (`t="inlineStr"`), so no shared-string table
//! is needed. Empty strings produce no cell.

use std::fmt::Write as _;
use std::sync::Arc;
use tracing::info;

use atelier_core::format::{spreadsheet_file_name, WORK_STATUS_BASENAME};
use atelier_core::{Clock, StatusLabels, WorkStatusRecord};

use crate::archive::ArchiveBuilder;
use crate::error::ExportResult;
use crate::sink::{FileSink, SavedFile};

/// Column headers, in sheet order.
pub const SPREADSHEET_HEADERS: [&str; 14] = [
    "번호",
    "거래처명",
    "스타일넘버",
    "오더수량",
    "입고일",
    "작업지시서",
    "단가",
    "예상출고일",
    "출고일",
    "작업수량",
    "데이터파일",
    "진행상태",
    "디자인팀메모",
    "영업관리메모",
];

/// Column widths in characters.
pub const SPREADSHEET_WIDTHS: [u32; 14] = [8, 18, 14, 12, 12, 20, 14, 12, 12, 20, 20, 20, 20, 20];

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

const HEADER_STYLE: u32 = 1;

/// One spreadsheet cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(i64),
    Text(String),
}

/// Cells of one data row, in [`SPREADSHEET_HEADERS`] order.
pub fn record_row(index: usize, record: &WorkStatusRecord, labels: &StatusLabels) -> [Cell; 14] {
    let text = |value: &str| Cell::Text(value.to_string());
    [
        Cell::Number(index as i64 + 1),
        text(&record.partner_name),
        text(&record.style_no),
        Cell::Number(record.order_quantity),
        text(&record.receive_date),
        text(&record.work_order_file),
        Cell::Number(record.unit_price),
        text(&record.expected_ship_date),
        text(&record.ship_date),
        Cell::Number(record.work_quantity),
        text(&record.data_file),
        text(labels.label_for(&record.status)),
        text(record.design_memo.as_deref().unwrap_or_default()),
        text(record.sales_memo.as_deref().unwrap_or_default()),
    ]
}

/// Builds the `.xlsx` bytes for `records`, in input order.
pub fn build_workbook(records: &[WorkStatusRecord], labels: &StatusLabels) -> ExportResult<Vec<u8>> {
    let mut archive = ArchiveBuilder::new();
    archive.add("[Content_Types].xml", content_types_xml().as_bytes())?;
    archive.add("_rels/.rels", root_rels_xml().as_bytes())?;
    archive.add("xl/workbook.xml", workbook_xml().as_bytes())?;
    archive.add("xl/_rels/workbook.xml.rels", workbook_rels_xml().as_bytes())?;
    archive.add("xl/styles.xml", styles_xml().as_bytes())?;
    archive.add("xl/worksheets/sheet1.xml", sheet_xml(records, labels).as_bytes())?;
    archive.finish()
}

/// Saves work-status spreadsheets to a sink.
pub struct SpreadsheetExporter {
    sink: Arc<dyn FileSink>,
    clock: Arc<dyn Clock>,
    labels: StatusLabels,
}

impl SpreadsheetExporter {
    pub fn new(sink: Arc<dyn FileSink>, clock: Arc<dyn Clock>) -> Self {
        SpreadsheetExporter {
            sink,
            clock,
            labels: StatusLabels::default(),
        }
    }

    pub fn with_status_labels(mut self, labels: StatusLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Exports `records`; `file_name` overrides `작업현황_{date}.xlsx`.
    pub async fn export(
        &self,
        records: &[WorkStatusRecord],
        file_name: Option<&str>,
    ) -> ExportResult<SavedFile> {
        let bytes = build_workbook(records, &self.labels)?;
        let name = match file_name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => name.to_string(),
            None => spreadsheet_file_name(self.clock.today()),
        };

        let saved = self.sink.save(&name, &bytes).await?;
        info!(file = %saved.file_name, rows = records.len(), "Spreadsheet exported");
        Ok(saved)
    }
}

// =============================================================================
// XML Parts
// =============================================================================

/// Escapes text for XML element content and attribute values.
pub fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            // control characters other than tab/newline are not valid XML 1.0
            c if c.is_control() && c != '\t' && c != '\n' && c != '\r' => {}
            c => out.push(c),
        }
    }
    out
}

/// Spreadsheet column letters for a zero-based index: `0 → A`, `26 → AA`.
pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

fn content_types_xml() -> String {
    format!(
        "{XML_DECL}<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
<Default Extension=\"xml\" ContentType=\"application/xml\"/>\
<Override PartName=\"/xl/workbook.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml\"/>\
<Override PartName=\"/xl/worksheets/sheet1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>\
<Override PartName=\"/xl/styles.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml\"/>\
</Types>"
    )
}

fn root_rels_xml() -> String {
    format!(
        "{XML_DECL}<Relationships xmlns=\"{NS_PKG_REL}\">\
<Relationship Id=\"rId1\" Type=\"{NS_REL}/officeDocument\" Target=\"xl/workbook.xml\"/>\
</Relationships>"
    )
}

fn workbook_xml() -> String {
    format!(
        "{XML_DECL}<workbook xmlns=\"{NS_MAIN}\" xmlns:r=\"{NS_REL}\">\
<sheets><sheet name=\"{}\" sheetId=\"1\" r:id=\"rId1\"/></sheets>\
</workbook>",
        escape_xml(WORK_STATUS_BASENAME)
    )
}

fn workbook_rels_xml() -> String {
    format!(
        "{XML_DECL}<Relationships xmlns=\"{NS_PKG_REL}\">\
<Relationship Id=\"rId1\" Type=\"{NS_REL}/worksheet\" Target=\"worksheets/sheet1.xml\"/>\
<Relationship Id=\"rId2\" Type=\"{NS_REL}/styles\" Target=\"styles.xml\"/>\
</Relationships>"
    )
}

fn styles_xml() -> String {
    format!(
        "{XML_DECL}<styleSheet xmlns=\"{NS_MAIN}\">\
<fonts count=\"2\"><font><sz val=\"11\"/><name val=\"Calibri\"/></font>\
<font><b/><sz val=\"11\"/><name val=\"Calibri\"/></font></fonts>\
<fills count=\"2\"><fill><patternFill patternType=\"none\"/></fill>\
<fill><patternFill patternType=\"gray125\"/></fill></fills>\
<borders count=\"1\"><border><left/><right/><top/><bottom/><diagonal/></border></borders>\
<cellStyleXfs count=\"1\"><xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\"/></cellStyleXfs>\
<cellXfs count=\"2\"><xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\" xfId=\"0\"/>\
<xf numFmtId=\"0\" fontId=\"1\" fillId=\"0\" borderId=\"0\" xfId=\"0\" applyFont=\"1\"/></cellXfs>\
</styleSheet>"
    )
}

fn sheet_xml(records: &[WorkStatusRecord], labels: &StatusLabels) -> String {
    let mut xml = String::with_capacity(512 + records.len() * 512);
    let _ = write!(xml, "{XML_DECL}<worksheet xmlns=\"{NS_MAIN}\">");

    xml.push_str("<cols>");
    for (i, width) in SPREADSHEET_WIDTHS.iter().enumerate() {
        let _ = write!(
            xml,
            "<col min=\"{n}\" max=\"{n}\" width=\"{width}\" customWidth=\"1\"/>",
            n = i + 1
        );
    }
    xml.push_str("</cols><sheetData>");

    xml.push_str("<row r=\"1\">");
    for (col, header) in SPREADSHEET_HEADERS.iter().enumerate() {
        push_cell(&mut xml, col, 1, &Cell::Text(header.to_string()), Some(HEADER_STYLE));
    }
    xml.push_str("</row>");

    for (index, record) in records.iter().enumerate() {
        let row = index + 2;
        let _ = write!(xml, "<row r=\"{row}\">");
        for (col, cell) in record_row(index, record, labels).iter().enumerate() {
            push_cell(&mut xml, col, row, cell, None);
        }
        xml.push_str("</row>");
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

fn push_cell(xml: &mut String, col: usize, row: usize, cell: &Cell, style: Option<u32>) {
    let reference = format!("{}{}", column_letter(col), row);
    let style = style.map(|s| format!(" s=\"{s}\"")).unwrap_or_default();
    match cell {
        Cell::Number(value) => {
            let _ = write!(xml, "<c r=\"{reference}\"{style}><v>{value}</v></c>");
        }
        Cell::Text(text) if text.is_empty() => {}
        Cell::Text(text) => {
            let _ = write!(
                xml,
                "<c r=\"{reference}\" t=\"inlineStr\"{style}><is><t xml:space=\"preserve\">{}</t></is></c>",
                escape_xml(text)
            );
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use atelier_core::{FixedClock, WorkStatus};
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn records() -> Vec<WorkStatusRecord> {
        let mut first = WorkStatusRecord::new("1", "A파트너");
        first.style_no = "ST-1".to_string();
        first.order_quantity = 100;
        first.unit_price = 1500;
        first.work_quantity = 90;
        first.receive_date = "2025-09-01".to_string();
        first.status = WorkStatus::InProgress;
        first.design_memo = Some("R&D <샘플>".to_string());

        let mut second = WorkStatusRecord::new("2", "B파트너");
        second.status = WorkStatus::Other("작업완료".to_string());
        second.sales_memo = Some("긴급".to_string());

        vec![first, second]
    }

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        let mut out = String::new();
        archive.by_name(name).unwrap().read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(13), "N");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(701), "ZZ");
        assert_eq!(column_letter(702), "AAA");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&apos;");
        assert_eq!(escape_xml("x\u{1}y"), "xy");
    }

    #[test]
    fn test_headers_and_widths() {
        assert_eq!(SPREADSHEET_HEADERS.len(), SPREADSHEET_WIDTHS.len());
        assert_eq!(SPREADSHEET_HEADERS[0], "번호");
        assert_eq!(SPREADSHEET_HEADERS[11], "진행상태");
        assert_eq!(SPREADSHEET_HEADERS[13], "영업관리메모");
    }

    #[test]
    fn test_record_row_cells() {
        let row = record_row(0, &records()[0], &StatusLabels::default());
        assert_eq!(row[0], Cell::Number(1));
        assert_eq!(row[1], Cell::Text("A파트너".to_string()));
        assert_eq!(row[3], Cell::Number(100));
        assert_eq!(row[6], Cell::Number(1500));
        assert_eq!(row[9], Cell::Number(90));
        assert_eq!(row[11], Cell::Text("작업중".to_string()));
        assert_eq!(row[13], Cell::Text(String::new()));
    }

    #[test]
    fn test_workbook_parts() {
        let bytes = build_workbook(&records(), &StatusLabels::default()).unwrap();
        let archive = ZipArchive::new(Cursor::new(bytes.clone())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "xl/workbook.xml",
            "xl/_rels/workbook.xml.rels",
            "xl/styles.xml",
            "xl/worksheets/sheet1.xml",
        ] {
            assert!(names.contains(&part), "missing part {part}");
        }

        let workbook = read_part(&bytes, "xl/workbook.xml");
        assert!(workbook.contains("name=\"작업현황\""));

        let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");
        let positions: Vec<usize> = SPREADSHEET_HEADERS
            .iter()
            .map(|h| sheet.find(&format!(">{h}<")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        assert!(sheet.contains("<c r=\"A2\"><v>1</v></c>"));
        assert!(sheet.contains("<c r=\"G2\"><v>1500</v></c>"));
        assert!(sheet.contains("R&amp;D &lt;샘플&gt;"));
        assert!(sheet.contains("<row r=\"3\">"));
        assert!(sheet.contains(">작업완료<"));
        assert!(sheet.contains(">긴급<"));
        assert!(!sheet.contains("<row r=\"4\">"));
        assert!(sheet.contains("width=\"8\""));
    }

    #[tokio::test]
    async fn test_export_file_name() {
        let sink = Arc::new(MemorySink::new());
        let exporter = SpreadsheetExporter::new(sink.clone(), Arc::new(FixedClock::ymd(2025, 9, 16)));

        let saved = exporter.export(&records(), None).await.unwrap();
        assert_eq!(saved.file_name, "작업현황_2025-09-16.xlsx");

        let saved = exporter.export(&records(), Some("주간.xlsx")).await.unwrap();
        assert_eq!(saved.file_name, "주간.xlsx");
        assert_eq!(sink.file_names().await.len(), 2);
    }

    #[tokio::test]
    async fn test_export_uses_configured_labels() {
        let sink = Arc::new(MemorySink::new());
        let labels = StatusLabels {
            in_progress: "Working".to_string(),
            ..StatusLabels::default()
        };
        let exporter = SpreadsheetExporter::new(sink.clone(), Arc::new(FixedClock::ymd(2025, 9, 16)))
            .with_status_labels(labels);

        let saved = exporter.export(&records(), None).await.unwrap();
        let bytes = sink.get(&saved.file_name).await.unwrap();
        assert!(read_part(&bytes, "xl/worksheets/sheet1.xml").contains(">Working<"));
    }
}
