//! Sheet builders and the workbook assembler.
//!
//! Each submodule renders one sheet from its slice of the [`Report`]
//! into a shared [`Workbook`]. Builders run in a fixed order that
//! determines tab order only; they do not depend on each other.

pub mod cover;
pub mod insights;
pub mod performance;
pub mod recommendations;
pub mod summary;

use chrono::{DateTime, Local};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook};
use tracing::debug;

use crate::error::ReportError;
use crate::report::Report;
use crate::style::Palette;

/// Table header: bold white on the dark header background, medium
/// bottom border, centered.
pub(crate) fn create_header_format(pal: &Palette) -> Format {
    Format::new()
        .set_bold()
        .set_font_size(11)
        .set_font_color("FFFFFF")
        .set_background_color(pal.header_bg)
        .set_border_bottom(FormatBorder::Medium)
        .set_border_bottom_color(pal.primary)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
}

/// Sheet title: large bold text in the primary brand color.
pub(crate) fn create_title_format(pal: &Palette) -> Format {
    Format::new()
        .set_bold()
        .set_font_size(16)
        .set_font_color(pal.primary)
}

/// Muted caption under a sheet title.
pub(crate) fn create_caption_format(pal: &Palette) -> Format {
    Format::new().set_font_size(10).set_font_color(pal.muted)
}

/// Section label inside a sheet body.
pub(crate) fn create_section_format(pal: &Palette) -> Format {
    Format::new()
        .set_bold()
        .set_font_size(12)
        .set_font_color(pal.primary)
}

/// Integer count format #,##0.
pub(crate) fn create_integer_format() -> Format {
    Format::new().set_num_format("#,##0")
}

/// One-decimal percentage with a literal percent sign (rates arrive
/// pre-scaled 0-100, so the sign is text rather than a % multiplier).
pub(crate) fn create_percent1_format() -> Format {
    Format::new().set_num_format("0.0\"%\"")
}

/// Two-decimal variant used for summary KPI values.
pub(crate) fn create_percent2_format() -> Format {
    Format::new().set_num_format("0.00\"%\"")
}

/// Add the thin light-gray grid border used on data tables.
pub(crate) fn with_grid(format: Format, pal: &Palette) -> Format {
    format
        .set_border(FormatBorder::Thin)
        .set_border_color(pal.grid)
}

/// Render the full dashboard workbook and return the XLSX bytes.
///
/// `generated_at` is captured by the caller so runs can be reproduced
/// with a fixed clock.
pub fn generate_dashboard(
    report: &Report,
    generated_at: DateTime<Local>,
) -> Result<Vec<u8>, ReportError> {
    let pal = Palette::DEFAULT;
    let mut wb = Workbook::new();

    cover::write_cover(&mut wb, report, &pal, generated_at)?;
    summary::write_summary(&mut wb, &report.summary_data, &pal, generated_at)?;
    performance::write_performance(&mut wb, report, &pal)?;
    insights::write_insights(&mut wb, &report.insights_data, &pal)?;
    recommendations::write_recommendations(&mut wb, report, &pal)?;

    debug!(
        summary = report.summary_data.len(),
        performance = report.performance_data.len(),
        insights = report.insights_data.len(),
        "dashboard rendered"
    );

    Ok(wb.save_to_buffer()?)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::report::{CellValue, DateRange, InsightItem, Report, SummaryItem, UserPerformance};

    pub fn summary_item(metric: &str, value: &str, unit: &str, description: &str) -> SummaryItem {
        SummaryItem {
            metric: metric.to_string(),
            value: CellValue::Text(value.to_string()),
            unit: unit.to_string(),
            description: description.to_string(),
        }
    }

    pub fn performer(rank: f64, name: &str, success_rate: f64, level: &str) -> UserPerformance {
        UserPerformance {
            rank: CellValue::Number(rank),
            user_name: name.to_string(),
            total_tasks: 100.0 + rank,
            eligible: 60.0,
            not_eligible: 40.0,
            invited: 30.0,
            changed_mind: 5.0,
            no_response: 10.0,
            success_rate,
            response_rate: 66.0,
            conversion_rate: 21.5,
            projects: "Alpha, Beta".to_string(),
            cities: "Jakarta, Bandung".to_string(),
            performance_level: level.to_string(),
        }
    }

    pub fn insight(category: &str, user: &str, success_rate: f64) -> InsightItem {
        InsightItem {
            category: category.to_string(),
            user: user.to_string(),
            total_tasks: 150.0,
            success_rate,
            performance_level: "Good".to_string(),
            rank: CellValue::Number(1.0),
            issues: "-".to_string(),
        }
    }

    pub fn sample_report() -> Report {
        Report {
            date_range: Some(DateRange {
                start: "2026-01-01".to_string(),
                end: "2026-01-31".to_string(),
            }),
            summary_data: vec![
                summary_item("Total Tasks", "1,240", "tasks", "Tasks processed in period"),
                summary_item("Active Users", "37", "users", "Users with assigned tasks"),
                summary_item("Overall Success Rate", "64.2%", "percentage", "Eligible over total"),
                summary_item("Response Rate", "81.5", "percentage", "Responses over invites"),
            ],
            performance_data: vec![
                performer(1.0, "Budi", 88.0, "Excellent"),
                performer(2.0, "Sari", 72.5, "Excellent"),
                performer(3.0, "Agus", 55.0, "Good"),
                performer(4.0, "Dewi", 41.0, "Fair"),
                performer(5.0, "Rina", 18.0, "Poor"),
            ],
            insights_data: vec![
                insight("Top Performer", "Budi", 88.0),
                insight("Top Performer", "Sari", 72.5),
                insight("Priority Area", "Rina", 18.0),
                insight("Volume Leader", "Agus", 55.0),
            ],
        }
    }
}
