use chrono::{DateTime, Local};
use rust_xlsxwriter::{Chart, ChartType, Format, FormatAlign, Workbook, XlsxError};

use crate::classify::classify_metric;
use crate::report::{CellValue, SummaryItem};
use crate::sheets::{
    create_caption_format, create_header_format, create_percent2_format, create_title_format,
};
use crate::style::Palette;

const SHEET_NAME: &str = "Executive Summary";

const HEADERS: [&str; 6] = [
    "Metric",
    "Value",
    "Unit",
    "Status",
    "Performance Indicator",
    "Description",
];

/// Units whose values are comparable counts; only these feed the
/// overview chart (percentages would mix scales).
fn is_chartable_unit(unit: &str) -> bool {
    unit == "tasks" || unit == "users"
}

/// Metric/value pairs staged below the table as the chart source range.
pub(crate) fn chart_rows(summary: &[SummaryItem]) -> Vec<(&str, f64)> {
    summary
        .iter()
        .filter(|item| is_chartable_unit(&item.unit))
        .filter_map(|item| item.value.percent().map(|v| (item.metric.as_str(), v)))
        .collect()
}

/// Executive summary sheet: one classified row per KPI plus a column
/// chart over the count-type metrics.
pub fn write_summary(
    wb: &mut Workbook,
    summary: &[SummaryItem],
    pal: &Palette,
    generated_at: DateTime<Local>,
) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name(SHEET_NAME)?;

    if summary.is_empty() {
        return Ok(());
    }

    ws.merge_range(
        0,
        0,
        0,
        5,
        "EXECUTIVE SUMMARY - KEY METRICS",
        &create_title_format(pal),
    )?;
    ws.write_with_format(
        1,
        0,
        format!("Generated: {}", generated_at.format("%d %B %Y")),
        &create_caption_format(pal),
    )?;

    let hdr = create_header_format(pal);
    for (col, header) in HEADERS.iter().enumerate() {
        ws.write_with_format(3, col as u16, *header, &hdr)?;
    }

    let metric_fmt = Format::new()
        .set_bold()
        .set_font_size(11)
        .set_background_color(pal.light_bg)
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::VerticalCenter);
    let value_fmt = Format::new()
        .set_bold()
        .set_font_size(12)
        .set_align(FormatAlign::Right)
        .set_align(FormatAlign::VerticalCenter);
    let unit_fmt = Format::new()
        .set_font_size(10)
        .set_font_color(pal.muted)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    let desc_fmt = Format::new()
        .set_font_size(10)
        .set_font_color(pal.body)
        .set_text_wrap()
        .set_align(FormatAlign::VerticalCenter);

    for (i, item) in summary.iter().enumerate() {
        let row = 4 + i as u32;

        ws.write_with_format(row, 0, item.metric.as_str(), &metric_fmt)?;

        let is_percentage = item.unit == "percentage";
        let parsed = if is_percentage { item.value.percent() } else { None };

        // Percentage values become real numbers with a percent format and
        // tier coloring; anything unparseable keeps the raw display text.
        match parsed {
            Some(v) => {
                let status = classify_metric(Some(v), pal);
                let colored = create_percent2_format()
                    .set_bold()
                    .set_font_size(12)
                    .set_align(FormatAlign::Right)
                    .set_align(FormatAlign::VerticalCenter)
                    .set_font_color(status.color);
                ws.write_with_format(row, 1, v, &colored)?;
            }
            None => match &item.value {
                CellValue::Number(n) => {
                    ws.write_with_format(row, 1, *n, &value_fmt)?;
                }
                other => {
                    ws.write_with_format(row, 1, other.display(), &value_fmt)?;
                }
            },
        }

        ws.write_with_format(row, 2, item.unit.as_str(), &unit_fmt)?;

        // Non-percentage metrics default to the top status by design.
        let status = if is_percentage {
            classify_metric(parsed, pal)
        } else {
            classify_metric(Some(100.0), pal)
        };

        let status_fmt = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color("FFFFFF")
            .set_background_color(status.color)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);
        ws.write_with_format(row, 3, status.label, &status_fmt)?;

        let indicator_fmt = Format::new()
            .set_bold()
            .set_font_size(14)
            .set_font_color(status.color)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);
        ws.write_with_format(row, 4, status.indicator, &indicator_fmt)?;

        ws.write_with_format(row, 5, item.description.as_str(), &desc_fmt)?;
    }

    for (col, width) in [25, 16, 12, 18, 15, 50].into_iter().enumerate() {
        ws.set_column_width(col as u16, width)?;
    }
    for row in 3..=(3 + summary.len() as u32) {
        ws.set_row_height(row, 28)?;
    }
    ws.set_freeze_panes(4, 0)?;

    write_overview_chart(ws, summary, pal)?;

    Ok(())
}

/// Stage the chartable metrics below the table and attach the column
/// chart. Skipped entirely when no count-type metrics exist.
fn write_overview_chart(
    ws: &mut rust_xlsxwriter::Worksheet,
    summary: &[SummaryItem],
    pal: &Palette,
) -> Result<(), XlsxError> {
    let section_row = summary.len() as u32 + 6;
    ws.write_with_format(
        section_row,
        0,
        "KEY METRICS VISUALIZATION",
        &crate::sheets::create_section_format(pal),
    )?;

    let rows = chart_rows(summary);
    let data_row = section_row + 2;
    let bold = Format::new().set_bold();
    ws.write_with_format(data_row, 0, "Metric", &bold)?;
    ws.write_with_format(data_row, 1, "Value", &bold)?;
    for (i, (metric, value)) in rows.iter().enumerate() {
        let row = data_row + 1 + i as u32;
        ws.write(row, 0, *metric)?;
        ws.write(row, 1, *value)?;
    }

    if rows.is_empty() {
        return Ok(());
    }

    let last = data_row + rows.len() as u32;
    let mut chart = Chart::new(ChartType::Column);
    chart.title().set_name("Task Management Overview");
    chart.x_axis().set_name("Metrics");
    chart.y_axis().set_name("Count");
    chart
        .add_series()
        .set_name((SHEET_NAME, data_row, 1))
        .set_values((SHEET_NAME, data_row + 1, 1, last, 1))
        .set_categories((SHEET_NAME, data_row + 1, 0, last, 0));
    chart.set_width(720);
    chart.set_height(480);
    ws.insert_chart(data_row, 0, &chart)?;

    Ok(())
}
