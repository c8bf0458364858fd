//! Off-screen work-status view captured to PNG.

use atelier_core::format::filter_label;
use atelier_core::{WorkStatus, WorkStatusRecord, ALL_FILTER_LABEL};

pub const CAPTURE_HEADING: &str = "작업 현황";
pub const EMPTY_MESSAGE: &str = "조건에 해당하는 작업 현황이 없습니다.";
pub const ALL_PERIODS_LABEL: &str = "전체 기간";

pub const CAPTURE_HEADERS: [&str; 9] = [
    "이미지",
    "거래처명",
    "스타일넘버",
    "오더수량",
    "입고일",
    "예상출고일",
    "진행상태",
    "작업수량",
    "출고일",
];

/// Active filters printed next to the heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSummary {
    pub partner: String,
    pub status: String,
    pub period: String,
}

impl FilterSummary {
    /// Unset partner/status filters print as `전체`.
    pub fn new(partner: Option<&str>, status: Option<&str>, period: impl Into<String>) -> Self {
        FilterSummary {
            partner: filter_label(partner).to_string(),
            status: filter_label(status).to_string(),
            period: period.into(),
        }
    }

    /// `start ~ end` when both ends are set, else `{month}월`, else `전체 기간`.
    ///
    /// The month value is printed as given (`2025-09` → `2025-09월`).
    pub fn period_label(start: Option<&str>, end: Option<&str>, month: Option<&str>) -> String {
        match (non_empty(start), non_empty(end), non_empty(month)) {
            (Some(start), Some(end), _) => format!("{start} ~ {end}"),
            (_, _, Some(month)) if month != ALL_FILTER_LABEL => format!("{month}월"),
            _ => ALL_PERIODS_LABEL.to_string(),
        }
    }

    /// Lines as printed in the summary box.
    pub fn lines(&self) -> [String; 3] {
        [
            format!("거래처: {}", self.partner),
            format!("진행 상태: {}", self.status),
            format!("기간: {}", self.period),
        ]
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

impl Default for FilterSummary {
    fn default() -> Self {
        FilterSummary::new(None, None, ALL_PERIODS_LABEL)
    }
}

/// One table row of the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRow {
    pub image_url: String,
    pub partner_name: String,
    pub style_no: String,
    pub order_quantity: i64,
    pub receive_date: String,
    pub expected_ship_date: String,
    pub status: WorkStatus,
    pub work_quantity: i64,
    pub ship_date: String,
}

impl From<&WorkStatusRecord> for CaptureRow {
    fn from(record: &WorkStatusRecord) -> Self {
        CaptureRow {
            image_url: record.image_url.clone(),
            partner_name: record.partner_name.clone(),
            style_no: record.style_no.clone(),
            order_quantity: record.order_quantity,
            receive_date: record.receive_date.clone(),
            expected_ship_date: record.expected_ship_date.clone(),
            status: record.status.clone(),
            work_quantity: record.work_quantity,
            ship_date: record.ship_date.clone(),
        }
    }
}

/// A node of the captured view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureNode {
    Heading(String),
    FilterSummary(FilterSummary),
    Table(Vec<CaptureRow>),
    Script(String),
    Style(String),
    NoScript(String),
}

impl CaptureNode {
    /// Element tag name the node corresponds to.
    pub fn tag_name(&self) -> &'static str {
        match self {
            CaptureNode::Heading(_) => "H2",
            CaptureNode::FilterSummary(_) => "DIV",
            CaptureNode::Table(_) => "TABLE",
            CaptureNode::Script(_) => "SCRIPT",
            CaptureNode::Style(_) => "STYLE",
            CaptureNode::NoScript(_) => "NOSCRIPT",
        }
    }
}

/// Node list handed to the rasterizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureView {
    nodes: Vec<CaptureNode>,
}

impl CaptureView {
    /// Heading, filter summary, then one table row per record in order.
    pub fn from_records(records: &[WorkStatusRecord], summary: FilterSummary) -> Self {
        CaptureView {
            nodes: vec![
                CaptureNode::Heading(CAPTURE_HEADING.to_string()),
                CaptureNode::FilterSummary(summary),
                CaptureNode::Table(records.iter().map(CaptureRow::from).collect()),
            ],
        }
    }

    pub fn from_nodes(nodes: Vec<CaptureNode>) -> Self {
        CaptureView { nodes }
    }

    pub fn push(&mut self, node: CaptureNode) {
        self.nodes.push(node);
    }

    pub fn nodes(&self) -> &[CaptureNode] {
        &self.nodes
    }

    /// Number of data rows across all tables.
    pub fn row_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|node| match node {
                CaptureNode::Table(rows) => rows.len(),
                _ => 0,
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_label() {
        assert_eq!(
            FilterSummary::period_label(Some("2025-09-01"), Some("2025-09-30"), Some("2025-09")),
            "2025-09-01 ~ 2025-09-30"
        );
        assert_eq!(
            FilterSummary::period_label(Some("2025-09-01"), None, Some("2025-09")),
            "2025-09월"
        );
        assert_eq!(FilterSummary::period_label(None, None, Some("전체")), "전체 기간");
        assert_eq!(FilterSummary::period_label(None, Some(""), None), "전체 기간");
    }

    #[test]
    fn test_summary_defaults_to_all() {
        let summary = FilterSummary::new(None, Some("작업중"), "전체 기간");
        assert_eq!(summary.partner, "전체");
        assert_eq!(summary.status, "작업중");
        assert_eq!(summary.lines()[1], "진행 상태: 작업중");
    }

    #[test]
    fn test_view_from_records() {
        let mut record = WorkStatusRecord::new("1", "A파트너");
        record.order_quantity = 1200;
        let view = CaptureView::from_records(&[record], FilterSummary::default());

        assert_eq!(view.nodes().len(), 3);
        assert_eq!(view.row_count(), 1);
        assert_eq!(view.nodes()[0], CaptureNode::Heading("작업 현황".to_string()));
        match &view.nodes()[2] {
            CaptureNode::Table(rows) => assert_eq!(rows[0].order_quantity, 1200),
            other => panic!("unexpected node {other:?}"),
        }
    }

    #[test]
    fn test_tag_names() {
        assert_eq!(CaptureNode::Script(String::new()).tag_name(), "SCRIPT");
        assert_eq!(CaptureNode::Table(Vec::new()).tag_name(), "TABLE");
    }
}
