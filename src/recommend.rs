//! Rule engine deriving management recommendations from summary and
//! insights data. Rules run in a fixed sequence and the resulting order
//! is the display order on the recommendations sheet.

use crate::classify::InsightCategory;
use crate::report::{InsightItem, SummaryItem};
use crate::style::Palette;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecCategory {
    Critical,
    HighPriority,
    Operational,
    Strategic,
}

impl RecCategory {
    pub fn label(self) -> &'static str {
        match self {
            RecCategory::Critical => "Critical",
            RecCategory::HighPriority => "High Priority",
            RecCategory::Operational => "Operational",
            RecCategory::Strategic => "Strategic",
        }
    }

    pub fn banner_color(self, pal: &Palette) -> &'static str {
        match self {
            RecCategory::Critical => pal.danger,
            RecCategory::HighPriority => pal.warning,
            RecCategory::Operational | RecCategory::Strategic => pal.secondary,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Recommendation {
    pub category: RecCategory,
    pub title: String,
    pub description: String,
    pub actions: &'static [&'static str],
    pub timeline: &'static str,
    pub owner: &'static str,
}

/// Value and display string of the summary metric with the given name.
///
/// An absent metric and an unparseable one both come back as 0, so a
/// missing "Overall Success Rate" behaves like a 0% rate and still
/// triggers the threshold rules below. Callers relying on the
/// distinction should go through `CellValue::percent` instead.
fn metric_percent(summary: &[SummaryItem], name: &str) -> (f64, String) {
    summary
        .iter()
        .find(|item| item.metric == name)
        .map(|item| (item.value.percent().unwrap_or(0.0), item.value.display()))
        .unwrap_or((0.0, "0".to_string()))
}

fn count_category(insights: &[InsightItem], category: InsightCategory) -> usize {
    insights
        .iter()
        .filter(|item| InsightCategory::parse(&item.category) == Some(category))
        .count()
}

/// Evaluate the rule cascade. Always returns at least one entry (the
/// closing strategic recommendation is unconditional).
pub fn build_recommendations(
    summary: &[SummaryItem],
    insights: &[InsightItem],
) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    let (overall, overall_display) = metric_percent(summary, "Overall Success Rate");
    if overall < 50.0 {
        recs.push(Recommendation {
            category: RecCategory::Critical,
            title: "Overall Success Rate Below Target".to_string(),
            description: format!(
                "Current success rate is {overall_display}%. Immediate intervention required."
            ),
            actions: &[
                "Conduct comprehensive review of task qualification criteria",
                "Implement mandatory training program for all users",
                "Establish weekly performance monitoring meetings",
                "Review and update standard operating procedures",
            ],
            timeline: "Immediate (1-2 weeks)",
            owner: "Operations Manager",
        });
    }

    let priority_count = count_category(insights, InsightCategory::PriorityArea);
    if priority_count > 0 {
        recs.push(Recommendation {
            category: RecCategory::HighPriority,
            title: format!("Performance Improvement Required for {priority_count} Users"),
            description: "Multiple users showing below-target performance metrics requiring immediate coaching."
                .to_string(),
            actions: &[
                "Schedule one-on-one coaching sessions with underperforming users",
                "Assign mentors from top performer group",
                "Implement 30-day performance improvement plans",
                "Provide additional resources and training materials",
            ],
            timeline: "Short-term (2-4 weeks)",
            owner: "Team Lead & HR",
        });
    }

    let top_count = count_category(insights, InsightCategory::TopPerformer);
    if top_count >= 3 {
        recs.push(Recommendation {
            category: RecCategory::Strategic,
            title: "Leverage Top Performers for Knowledge Transfer".to_string(),
            description: format!("{top_count} users demonstrating excellence in task execution."),
            actions: &[
                "Document best practices from top performers",
                "Establish peer mentoring program",
                "Create case studies of successful task completions",
                "Recognize and reward top performers publicly",
            ],
            timeline: "Medium-term (1-2 months)",
            owner: "Training & Development",
        });
    }

    let (response, response_display) = metric_percent(summary, "Response Rate");
    if response < 70.0 {
        recs.push(Recommendation {
            category: RecCategory::Operational,
            title: "Improve Response Rate and Follow-up Process".to_string(),
            description: format!(
                "Current response rate is {response_display}%. Optimization opportunity identified."
            ),
            actions: &[
                "Implement automated follow-up reminder system",
                "Review and optimize contact timing strategies",
                "Develop multi-channel communication approach",
                "Create response tracking dashboard",
            ],
            timeline: "Medium-term (4-6 weeks)",
            owner: "Operations Team",
        });
    }

    recs.push(Recommendation {
        category: RecCategory::Strategic,
        title: "Data-Driven Decision Making Enhancement".to_string(),
        description: "Establish robust analytics framework for continuous improvement.".to_string(),
        actions: &[
            "Implement real-time performance monitoring dashboard",
            "Schedule monthly analytics review meetings",
            "Develop predictive models for success rate optimization",
            "Create automated reporting system for management",
        ],
        timeline: "Long-term (2-3 months)",
        owner: "Data Analytics Team",
    });

    recs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::CellValue;

    fn summary_item(metric: &str, value: &str, unit: &str) -> SummaryItem {
        SummaryItem {
            metric: metric.to_string(),
            value: CellValue::Text(value.to_string()),
            unit: unit.to_string(),
            description: String::new(),
        }
    }

    fn insight(category: &str) -> InsightItem {
        InsightItem {
            category: category.to_string(),
            ..Default::default()
        }
    }

    fn healthy_summary() -> Vec<SummaryItem> {
        vec![
            summary_item("Overall Success Rate", "82.4", "percentage"),
            summary_item("Response Rate", "91.0", "percentage"),
        ]
    }

    #[test]
    fn test_low_success_rate_yields_critical_then_strategic() {
        let summary = vec![summary_item("Overall Success Rate", "42", "percentage")];
        // Response Rate missing → treated as 0 → Operational also fires,
        // so pin it above threshold to isolate the Critical rule.
        let summary = {
            let mut s = summary;
            s.push(summary_item("Response Rate", "88", "percentage"));
            s
        };
        let recs = build_recommendations(&summary, &[]);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].category, RecCategory::Critical);
        assert!(recs[0].description.contains("42%"));
        assert_eq!(recs[1].category, RecCategory::Strategic);
    }

    #[test]
    fn test_missing_metrics_still_trigger_threshold_rules() {
        // An absent metric is indistinguishable from a 0-valued one, so
        // both the Critical and Operational rules fire on empty input.
        let recs = build_recommendations(&[], &[]);
        let categories: Vec<RecCategory> = recs.iter().map(|r| r.category).collect();
        assert_eq!(
            categories,
            [
                RecCategory::Critical,
                RecCategory::Operational,
                RecCategory::Strategic
            ]
        );
        assert!(recs[0].description.contains("0%"));
    }

    #[test]
    fn test_healthy_report_yields_only_final_strategic() {
        let recs = build_recommendations(&healthy_summary(), &[]);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].category, RecCategory::Strategic);
        assert_eq!(recs[0].title, "Data-Driven Decision Making Enhancement");
    }

    #[test]
    fn test_priority_area_count_embedded_in_title() {
        let insights = vec![
            insight("Priority Area"),
            insight("Priority Area"),
            insight("Volume Leader"),
        ];
        let recs = build_recommendations(&healthy_summary(), &insights);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].category, RecCategory::HighPriority);
        assert_eq!(recs[0].title, "Performance Improvement Required for 2 Users");
    }

    #[test]
    fn test_top_performer_rule_needs_three() {
        let two = vec![insight("Top Performer"), insight("Top Performer")];
        let recs = build_recommendations(&healthy_summary(), &two);
        assert_eq!(recs.len(), 1);

        let three = vec![
            insight("Top Performer"),
            insight("Top Performer"),
            insight("Top Performer"),
        ];
        let recs = build_recommendations(&healthy_summary(), &three);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].category, RecCategory::Strategic);
        assert!(recs[0].description.starts_with("3 users"));
    }

    #[test]
    fn test_unparseable_metric_treated_as_zero() {
        let summary = vec![
            summary_item("Overall Success Rate", "n/a", "percentage"),
            summary_item("Response Rate", "95", "percentage"),
        ];
        let recs = build_recommendations(&summary, &[]);
        assert_eq!(recs[0].category, RecCategory::Critical);
        // Found-but-unparseable keeps the raw display string.
        assert!(recs[0].description.contains("n/a%"));
    }

    #[test]
    fn test_banner_colors() {
        let pal = Palette::DEFAULT;
        assert_eq!(RecCategory::Critical.banner_color(&pal), pal.danger);
        assert_eq!(RecCategory::HighPriority.banner_color(&pal), pal.warning);
        assert_eq!(RecCategory::Operational.banner_color(&pal), pal.secondary);
        assert_eq!(RecCategory::Strategic.banner_color(&pal), pal.secondary);
    }
}
