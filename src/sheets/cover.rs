use chrono::{DateTime, Local};
use rust_xlsxwriter::{Format, FormatAlign, Workbook, XlsxError};

use crate::report::{CellValue, Report};
use crate::style::Palette;

const SECTIONS: [(&str, &str); 4] = [
    ("Executive Summary", "High-level KPIs and performance metrics"),
    ("User Performance Analysis", "Detailed breakdown by user with rankings"),
    ("Strategic Insights", "Top performers and priority improvement areas"),
    ("Management Recommendations", "Data-driven action items for leadership"),
];

/// Cover sheet: title block, report metadata, up to four headline KPIs
/// and a static index of the other sheets. No charts.
pub fn write_cover(
    wb: &mut Workbook,
    report: &Report,
    pal: &Palette,
    generated_at: DateTime<Local>,
) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name("Dashboard Overview")?;

    let title = Format::new()
        .set_bold()
        .set_font_size(24)
        .set_font_color(pal.primary)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    ws.merge_range(1, 1, 1, 7, "TASK MANAGEMENT PERFORMANCE ANALYTICS", &title)?;

    let subtitle = Format::new()
        .set_font_size(14)
        .set_font_color(pal.muted)
        .set_italic()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    ws.merge_range(
        2,
        1,
        2,
        7,
        "Comprehensive Task Performance & User Analytics Report",
        &subtitle,
    )?;

    let label = Format::new().set_bold().set_font_size(11);
    let value = Format::new().set_font_size(11);

    ws.write_with_format(4, 1, "Report Generated:", &label)?;
    ws.write_with_format(
        4,
        2,
        generated_at.format("%d %B %Y, %H:%M").to_string(),
        &value,
    )?;

    ws.write_with_format(5, 1, "Report Period:", &label)?;
    let period = match &report.date_range {
        Some(range) => format!("{} - {}", range.start, range.end),
        None => "All Time Data".to_string(),
    };
    ws.write_with_format(5, 2, period, &value)?;

    ws.write_with_format(6, 1, "Department:", &label)?;
    ws.write_with_format(6, 2, "Task Management & Data Analytics", &value)?;

    if !report.summary_data.is_empty() {
        let kpi_header = Format::new()
            .set_bold()
            .set_font_size(14)
            .set_font_color(pal.primary);
        ws.write_with_format(8, 1, "KEY PERFORMANCE INDICATORS", &kpi_header)?;

        let metric_name = Format::new()
            .set_bold()
            .set_font_size(11)
            .set_background_color(pal.light_bg);
        let metric_value = Format::new()
            .set_bold()
            .set_font_size(13)
            .set_font_color(pal.secondary)
            .set_align(FormatAlign::Right);
        let metric_unit = Format::new().set_font_size(10).set_font_color(pal.muted);

        // Headline KPIs on alternating rows, first four entries only.
        for (i, item) in report.summary_data.iter().take(4).enumerate() {
            let row = 10 + 2 * i as u32;
            ws.write_with_format(row, 1, item.metric.as_str(), &metric_name)?;
            match &item.value {
                CellValue::Number(n) => {
                    ws.write_with_format(row, 2, *n, &metric_value)?;
                }
                other => {
                    ws.write_with_format(row, 2, other.display(), &metric_value)?;
                }
            };
            ws.write_with_format(row, 3, item.unit.as_str(), &metric_unit)?;
        }
    }

    let index_header = Format::new()
        .set_bold()
        .set_font_size(12)
        .set_font_color(pal.primary);
    ws.write_with_format(19, 1, "REPORT SECTIONS", &index_header)?;

    let section_name = Format::new().set_bold().set_font_size(11);
    let section_desc = Format::new()
        .set_font_size(10)
        .set_font_color(pal.muted)
        .set_italic();
    for (i, (section, desc)) in SECTIONS.iter().enumerate() {
        let row = 21 + i as u32;
        ws.write_with_format(row, 1, format!("• {section}"), &section_name)?;
        ws.write_with_format(row, 2, *desc, &section_desc)?;
    }

    ws.set_column_width(0, 2)?;
    ws.set_column_width(1, 30)?;
    ws.set_column_width(2, 35)?;
    for col in 3u16..=7 {
        ws.set_column_width(col, 15)?;
    }
    ws.set_row_height(1, 35)?;
    ws.set_row_height(2, 25)?;

    Ok(())
}
