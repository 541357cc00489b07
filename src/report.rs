use serde::Deserialize;

/// Sort key used for records whose `Rank` is missing or non-numeric.
/// Such rows sink to the bottom of the ranking table.
pub const RANK_SENTINEL: i64 = 999;

/// A scalar that may arrive as a JSON number or as a display string
/// ("85.5%", "1,234"). The upstream exporter is not consistent about
/// which one it emits, so both are accepted and coerced on demand.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Null(()),
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Text(String::new())
    }
}

impl CellValue {
    /// Display form, matching how the value appeared in the input.
    /// Whole numbers render without a trailing `.0`.
    pub fn display(&self) -> String {
        match self {
            CellValue::Number(n) if n.fract() == 0.0 => format!("{}", *n as i64),
            CellValue::Number(n) => format!("{n}"),
            CellValue::Text(s) => s.clone(),
            CellValue::Null(()) => String::new(),
        }
    }

    /// Numeric value after stripping `%` and thousands separators.
    /// `None` when absent or unparseable.
    pub fn percent(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => {
                let cleaned: String = s.chars().filter(|c| *c != '%' && *c != ',').collect();
                cleaned.trim().parse::<f64>().ok()
            }
            CellValue::Null(()) => None,
        }
    }

    /// Integer rank for sorting; missing/non-numeric ranks sort last.
    pub fn rank_key(&self) -> i64 {
        self.percent().map_or(RANK_SENTINEL, |v| v as i64)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Null(()))
            || matches!(self, CellValue::Text(s) if s.trim().is_empty())
    }
}

/// Serde helpers for fields the upstream exporter emits loosely typed,
/// in the spirit of the lenient parsers used for messy CSV exports.
pub(crate) mod de {
    use super::CellValue;
    use serde::{Deserialize, Deserializer};

    /// Number, numeric string ("1,234", "85.5%") or null → f64, else 0.
    pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = CellValue::deserialize(deserializer)?;
        Ok(value.percent().unwrap_or(0.0))
    }
}

fn default_level() -> String {
    "N/A".to_string()
}

fn default_issues() -> String {
    "-".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

/// One top-line KPI row. `unit` drives formatting: `"percentage"` values
/// are parsed and classified, `"tasks"`/`"users"` values feed the
/// summary chart, anything else is written verbatim.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryItem {
    #[serde(rename = "Metric", default)]
    pub metric: String,
    #[serde(rename = "Value", default)]
    pub value: CellValue,
    #[serde(rename = "Unit", default)]
    pub unit: String,
    #[serde(rename = "Description", default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPerformance {
    #[serde(rename = "Rank", default)]
    pub rank: CellValue,
    #[serde(rename = "User Name", default)]
    pub user_name: String,
    #[serde(rename = "Total Tasks", default, deserialize_with = "de::lenient_f64")]
    pub total_tasks: f64,
    #[serde(rename = "Eligible", default, deserialize_with = "de::lenient_f64")]
    pub eligible: f64,
    #[serde(rename = "Not Eligible", default, deserialize_with = "de::lenient_f64")]
    pub not_eligible: f64,
    #[serde(rename = "Invited", default, deserialize_with = "de::lenient_f64")]
    pub invited: f64,
    #[serde(rename = "Changed Mind", default, deserialize_with = "de::lenient_f64")]
    pub changed_mind: f64,
    #[serde(rename = "No Response", default, deserialize_with = "de::lenient_f64")]
    pub no_response: f64,
    #[serde(rename = "Success Rate", default, deserialize_with = "de::lenient_f64")]
    pub success_rate: f64,
    #[serde(rename = "Response Rate", default, deserialize_with = "de::lenient_f64")]
    pub response_rate: f64,
    #[serde(rename = "Conversion Rate", default, deserialize_with = "de::lenient_f64")]
    pub conversion_rate: f64,
    #[serde(rename = "Projects", default)]
    pub projects: String,
    #[serde(rename = "Cities", default)]
    pub cities: String,
    #[serde(rename = "Performance Level", default = "default_level")]
    pub performance_level: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InsightItem {
    #[serde(rename = "Category", default)]
    pub category: String,
    #[serde(rename = "User", default)]
    pub user: String,
    #[serde(rename = "Total Tasks", default, deserialize_with = "de::lenient_f64")]
    pub total_tasks: f64,
    #[serde(rename = "Success Rate", default, deserialize_with = "de::lenient_f64")]
    pub success_rate: f64,
    #[serde(rename = "Performance Level", default)]
    pub performance_level: String,
    #[serde(rename = "Rank", default)]
    pub rank: CellValue,
    #[serde(rename = "Issues", default = "default_issues")]
    pub issues: String,
}

/// Full input payload for one rendering pass. Every field is optional;
/// builders render a blank sheet when their slice is empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(default)]
    pub date_range: Option<DateRange>,
    #[serde(default)]
    pub summary_data: Vec<SummaryItem>,
    #[serde(default)]
    pub performance_data: Vec<UserPerformance>,
    #[serde(default)]
    pub insights_data: Vec<InsightItem>,
}

impl Report {
    /// Performance rows sorted ascending by rank. The sort is stable, so
    /// rows with equal (or missing) ranks keep their input order.
    pub fn ranked_performance(&self) -> Vec<&UserPerformance> {
        let mut rows: Vec<&UserPerformance> = self.performance_data.iter().collect();
        rows.sort_by_key(|p| p.rank.rank_key());
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_value_percent_parsing() {
        assert_eq!(CellValue::Number(85.5).percent(), Some(85.5));
        assert_eq!(CellValue::Text("85.5%".into()).percent(), Some(85.5));
        assert_eq!(CellValue::Text("1,234".into()).percent(), Some(1234.0));
        assert_eq!(CellValue::Text(" 42 ".into()).percent(), Some(42.0));
        assert_eq!(CellValue::Text("n/a".into()).percent(), None);
        assert_eq!(CellValue::Text(String::new()).percent(), None);
        assert_eq!(CellValue::Null(()).percent(), None);
    }

    #[test]
    fn test_cell_value_display_drops_trailing_zero() {
        assert_eq!(CellValue::Number(42.0).display(), "42");
        assert_eq!(CellValue::Number(42.5).display(), "42.5");
        assert_eq!(CellValue::Text("87%".into()).display(), "87%");
    }

    #[test]
    fn test_rank_key_sentinel() {
        assert_eq!(CellValue::Text("3".into()).rank_key(), 3);
        assert_eq!(CellValue::Number(7.0).rank_key(), 7);
        assert_eq!(CellValue::Text("first".into()).rank_key(), RANK_SENTINEL);
        assert_eq!(CellValue::default().rank_key(), RANK_SENTINEL);
    }

    #[test]
    fn test_report_deserializes_renamed_fields() {
        let report: Report = serde_json::from_value(json!({
            "dateRange": {"start": "2026-01-01", "end": "2026-01-31"},
            "summaryData": [
                {"Metric": "Overall Success Rate", "Value": "64.2%", "Unit": "percentage", "Description": "d"}
            ],
            "performanceData": [
                {"Rank": "2", "User Name": "Sari", "Total Tasks": "1,204", "Success Rate": 71.3},
                {"Rank": 1, "User Name": "Budi", "Total Tasks": 940}
            ],
            "insightsData": [
                {"Category": "Top Performer", "User": "Budi", "Success Rate": "88%"}
            ]
        }))
        .unwrap();

        assert_eq!(report.date_range.as_ref().unwrap().start, "2026-01-01");
        assert_eq!(report.summary_data[0].value.percent(), Some(64.2));
        assert_eq!(report.performance_data[0].total_tasks, 1204.0);
        assert_eq!(report.performance_data[1].success_rate, 0.0);
        assert_eq!(report.performance_data[1].performance_level, "N/A");
        assert_eq!(report.insights_data[0].issues, "-");
        assert_eq!(report.insights_data[0].success_rate, 88.0);
    }

    #[test]
    fn test_report_all_fields_optional() {
        let report: Report = serde_json::from_value(json!({})).unwrap();
        assert!(report.date_range.is_none());
        assert!(report.summary_data.is_empty());
        assert!(report.performance_data.is_empty());
        assert!(report.insights_data.is_empty());
    }

    #[test]
    fn test_ranked_performance_stable_sort() {
        let mk = |rank: CellValue, name: &str| UserPerformance {
            rank,
            user_name: name.to_string(),
            ..Default::default()
        };
        let report = Report {
            performance_data: vec![
                mk(CellValue::Number(2.0), "b1"),
                mk(CellValue::Text("bad".into()), "last1"),
                mk(CellValue::Number(1.0), "a"),
                mk(CellValue::Text("2".into()), "b2"),
                mk(CellValue::default(), "last2"),
            ],
            ..Default::default()
        };
        let names: Vec<&str> = report
            .ranked_performance()
            .iter()
            .map(|p| p.user_name.as_str())
            .collect();
        assert_eq!(names, ["a", "b1", "b2", "last1", "last2"]);
    }
}
