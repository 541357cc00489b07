//! The two rate classifiers and the fixed label→style tables.
//!
//! The summary KPIs and the per-user success-rate column deliberately use
//! different threshold schemes (3-tier with N/A vs 4-tier fills). They are
//! kept as separate functions so the rendered output of each sheet stays
//! exactly as designed.

use crate::style::Palette;

/// Qualitative status for a summary KPI: label, semantic color and trend
/// indicator symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricStatus {
    pub label: &'static str,
    pub color: &'static str,
    pub indicator: &'static str,
}

/// 3-tier classification for percentage KPIs. Total: unparseable values
/// map to an explicit N/A status instead of failing.
pub fn classify_metric(value: Option<f64>, pal: &Palette) -> MetricStatus {
    match value {
        Some(v) if v >= 70.0 => MetricStatus {
            label: "Excellent",
            color: pal.success,
            indicator: "↑",
        },
        Some(v) if v >= 50.0 => MetricStatus {
            label: "Good",
            color: pal.warning,
            indicator: "→",
        },
        Some(_) => MetricStatus {
            label: "Needs Attention",
            color: pal.danger,
            indicator: "↓",
        },
        None => MetricStatus {
            label: "N/A",
            color: pal.muted,
            indicator: "-",
        },
    }
}

/// Fill + font color pair for a single table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateStyle {
    pub fill: &'static str,
    pub font: &'static str,
}

/// 4-tier visual treatment for the success-rate column. Finer-grained
/// than [`classify_metric`] and intentionally not unified with it.
pub fn success_rate_style(rate: f64, pal: &Palette) -> RateStyle {
    if rate >= 70.0 {
        RateStyle {
            fill: pal.success_tint,
            font: pal.success,
        }
    } else if rate >= 50.0 {
        RateStyle {
            fill: pal.info_tint,
            font: pal.secondary,
        }
    } else if rate >= 30.0 {
        RateStyle {
            fill: pal.warning_tint,
            font: pal.warning,
        }
    } else {
        RateStyle {
            fill: pal.danger_tint,
            font: pal.danger,
        }
    }
}

/// Performance tier as reported upstream. Anything outside the three
/// known labels falls back to the lowest tier for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceLevel {
    Excellent,
    Good,
    Fair,
    Other,
}

impl PerformanceLevel {
    pub fn parse(label: &str) -> Self {
        match label.trim() {
            "Excellent" => PerformanceLevel::Excellent,
            "Good" => PerformanceLevel::Good,
            "Fair" => PerformanceLevel::Fair,
            _ => PerformanceLevel::Other,
        }
    }

    /// Solid block color for the performance-level column.
    pub fn block_color(self, pal: &Palette) -> &'static str {
        match self {
            PerformanceLevel::Excellent => pal.success,
            PerformanceLevel::Good => pal.secondary,
            PerformanceLevel::Fair => pal.warning,
            PerformanceLevel::Other => pal.danger,
        }
    }
}

/// The three insight buckets. Rows tagged with any other category are
/// dropped from the insights sheet entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightCategory {
    TopPerformer,
    PriorityArea,
    VolumeLeader,
}

impl InsightCategory {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "Top Performer" => Some(InsightCategory::TopPerformer),
            "Priority Area" => Some(InsightCategory::PriorityArea),
            "Volume Leader" => Some(InsightCategory::VolumeLeader),
            _ => None,
        }
    }

    pub fn priority(self) -> Priority {
        match self {
            InsightCategory::PriorityArea => Priority::High,
            InsightCategory::VolumeLeader => Priority::Medium,
            InsightCategory::TopPerformer => Priority::Normal,
        }
    }
}

/// Derived urgency label for an insight row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Normal,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Normal => "Normal",
        }
    }

    /// Banner fill for the priority cell; Normal rows keep the plain grid.
    pub fn fill(self, pal: &Palette) -> Option<&'static str> {
        match self {
            Priority::High => Some(pal.danger),
            Priority::Medium => Some(pal.warning),
            Priority::Normal => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAL: Palette = Palette::DEFAULT;

    #[test]
    fn test_classify_metric_tiers() {
        assert_eq!(classify_metric(Some(70.0), &PAL).label, "Excellent");
        assert_eq!(classify_metric(Some(92.3), &PAL).indicator, "↑");
        assert_eq!(classify_metric(Some(69.9), &PAL).label, "Good");
        assert_eq!(classify_metric(Some(50.0), &PAL).indicator, "→");
        assert_eq!(classify_metric(Some(49.9), &PAL).label, "Needs Attention");
        assert_eq!(classify_metric(Some(0.0), &PAL).indicator, "↓");
        assert_eq!(classify_metric(None, &PAL).label, "N/A");
        assert_eq!(classify_metric(None, &PAL).color, PAL.muted);
    }

    #[test]
    fn test_classify_metric_monotonic() {
        // Higher value never yields a worse status.
        let tier = |v: f64| match classify_metric(Some(v), &PAL).label {
            "Needs Attention" => 0,
            "Good" => 1,
            "Excellent" => 2,
            other => panic!("unexpected status {other}"),
        };
        let mut prev = 0;
        for v in [0.0, 10.0, 29.9, 30.0, 49.9, 50.0, 69.9, 70.0, 100.0] {
            let t = tier(v);
            assert!(t >= prev, "status regressed at {v}");
            prev = t;
        }
    }

    #[test]
    fn test_success_rate_four_tiers() {
        assert_eq!(success_rate_style(70.0, &PAL).font, PAL.success);
        assert_eq!(success_rate_style(69.9, &PAL).font, PAL.secondary);
        assert_eq!(success_rate_style(50.0, &PAL).fill, PAL.info_tint);
        assert_eq!(success_rate_style(49.9, &PAL).fill, PAL.warning_tint);
        assert_eq!(success_rate_style(30.0, &PAL).font, PAL.warning);
        assert_eq!(success_rate_style(29.9, &PAL).fill, PAL.danger_tint);
        assert_eq!(success_rate_style(0.0, &PAL).font, PAL.danger);
    }

    #[test]
    fn test_performance_level_fallback() {
        assert_eq!(PerformanceLevel::parse("Excellent").block_color(&PAL), PAL.success);
        assert_eq!(PerformanceLevel::parse("Good").block_color(&PAL), PAL.secondary);
        assert_eq!(PerformanceLevel::parse("Fair").block_color(&PAL), PAL.warning);
        assert_eq!(PerformanceLevel::parse("Poor").block_color(&PAL), PAL.danger);
        assert_eq!(PerformanceLevel::parse("N/A").block_color(&PAL), PAL.danger);
    }

    #[test]
    fn test_insight_category_parse_and_priority() {
        assert_eq!(
            InsightCategory::parse("Top Performer").unwrap().priority(),
            Priority::Normal
        );
        assert_eq!(
            InsightCategory::parse("Priority Area").unwrap().priority().label(),
            "High"
        );
        assert_eq!(
            InsightCategory::parse("Volume Leader").unwrap().priority().label(),
            "Medium"
        );
        assert!(InsightCategory::parse("Other").is_none());
        assert!(InsightCategory::parse("").is_none());
    }

    #[test]
    fn test_priority_fill() {
        assert_eq!(Priority::High.fill(&PAL), Some(PAL.danger));
        assert_eq!(Priority::Medium.fill(&PAL), Some(PAL.warning));
        assert_eq!(Priority::Normal.fill(&PAL), None);
    }
}
