use rust_xlsxwriter::{Chart, ChartType, Format, FormatAlign, Workbook, Worksheet, XlsxError};

use crate::classify::{InsightCategory, Priority};
use crate::report::InsightItem;
use crate::sheets::{
    create_header_format, create_integer_format, create_percent1_format, create_section_format,
    create_title_format, with_grid,
};
use crate::style::Palette;

const SHEET_NAME: &str = "Strategic Insights";

/// At most this many top performers feed the comparison chart.
const COMPARISON_CAP: usize = 10;

const HEADERS: [&str; 8] = [
    "Category",
    "User",
    "Total Tasks",
    "Success Rate %",
    "Performance Level",
    "Rank",
    "Key Issues",
    "Priority",
];

/// Partition rows into the three fixed buckets, preserving input order.
/// Rows with an unknown category are dropped.
pub(crate) fn bucketize(
    insights: &[InsightItem],
) -> (Vec<&InsightItem>, Vec<&InsightItem>, Vec<&InsightItem>) {
    let mut top = Vec::new();
    let mut priority = Vec::new();
    let mut volume = Vec::new();
    for item in insights {
        match InsightCategory::parse(&item.category) {
            Some(InsightCategory::TopPerformer) => top.push(item),
            Some(InsightCategory::PriorityArea) => priority.push(item),
            Some(InsightCategory::VolumeLeader) => volume.push(item),
            None => {}
        }
    }
    (top, priority, volume)
}

/// Number of staged rows for the top-performer comparison chart.
pub(crate) fn comparison_rows(top_performer_count: usize) -> usize {
    top_performer_count.min(COMPARISON_CAP)
}

/// Strategic insights sheet: one banner + table block per non-empty
/// bucket, plus a horizontal bar chart comparing the top performers.
pub fn write_insights(
    wb: &mut Workbook,
    insights: &[InsightItem],
    pal: &Palette,
) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name(SHEET_NAME)?;

    if insights.is_empty() {
        return Ok(());
    }

    ws.merge_range(
        0,
        0,
        0,
        7,
        "STRATEGIC INSIGHTS & PRIORITY AREAS",
        &create_title_format(pal),
    )?;

    let hdr = create_header_format(pal);
    for (col, header) in HEADERS.iter().enumerate() {
        ws.write_with_format(2, col as u16, *header, &hdr)?;
    }

    let (top, priority, volume) = bucketize(insights);
    let buckets: [(&str, &[&InsightItem], &str, &str); 3] = [
        (
            "TOP PERFORMERS - EXCELLENCE IN EXECUTION",
            &top,
            pal.success_tint,
            pal.success,
        ),
        (
            "PRIORITY AREAS - IMMEDIATE ATTENTION REQUIRED",
            &priority,
            pal.danger_tint,
            pal.danger,
        ),
        (
            "VOLUME LEADERS - HIGH PRODUCTIVITY",
            &volume,
            pal.info_tint,
            pal.secondary,
        ),
    ];

    let plain_fmt = with_grid(Format::new(), pal);
    let tasks_fmt = with_grid(
        create_integer_format()
            .set_align(FormatAlign::Right)
            .set_align(FormatAlign::VerticalCenter),
        pal,
    );
    let rate_fmt = with_grid(
        create_percent1_format()
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter),
        pal,
    );
    let centered_fmt = with_grid(
        Format::new()
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter),
        pal,
    );
    let issues_fmt = with_grid(
        Format::new()
            .set_font_size(9)
            .set_text_wrap()
            .set_align(FormatAlign::VerticalCenter),
        pal,
    );

    let mut row = 3u32;
    for (banner, items, bg_color, text_color) in buckets {
        if items.is_empty() {
            continue;
        }

        let banner_fmt = Format::new()
            .set_bold()
            .set_font_size(12)
            .set_font_color(text_color)
            .set_background_color(bg_color)
            .set_align(FormatAlign::Left)
            .set_align(FormatAlign::VerticalCenter);
        ws.merge_range(row, 0, row, 7, banner, &banner_fmt)?;
        ws.set_row_height(row, 28)?;
        row += 1;

        for item in items {
            ws.write_with_format(row, 0, item.category.as_str(), &plain_fmt)?;
            ws.write_with_format(row, 1, item.user.as_str(), &plain_fmt)?;
            ws.write_with_format(row, 2, item.total_tasks, &tasks_fmt)?;
            ws.write_with_format(row, 3, item.success_rate, &rate_fmt)?;
            ws.write_with_format(row, 4, item.performance_level.as_str(), &centered_fmt)?;
            match item.rank.percent() {
                Some(r) => ws.write_with_format(row, 5, r, &centered_fmt)?,
                None => ws.write_with_format(row, 5, item.rank.display(), &centered_fmt)?,
            };
            ws.write_with_format(row, 6, item.issues.as_str(), &issues_fmt)?;

            // Priority is derived from the category, never read from input.
            let priority_label = InsightCategory::parse(&item.category)
                .map(InsightCategory::priority)
                .unwrap_or(Priority::Normal);
            let priority_fmt = match priority_label.fill(pal) {
                Some(fill) => centered_fmt
                    .clone()
                    .set_bold()
                    .set_font_color("FFFFFF")
                    .set_background_color(fill),
                None => centered_fmt.clone(),
            };
            ws.write_with_format(row, 7, priority_label.label(), &priority_fmt)?;
            row += 1;
        }

        // Blank spacer row between buckets.
        row += 1;
    }

    for (col, width) in [20, 20, 14, 15, 20, 10, 35, 12].into_iter().enumerate() {
        ws.set_column_width(col as u16, width)?;
    }
    ws.set_freeze_panes(3, 0)?;

    if !top.is_empty() {
        write_comparison_chart(ws, &top, &priority, pal, row + 2)?;
    }

    Ok(())
}

/// Horizontal bar chart of the first 10 top performers. Priority-area
/// rows ride along for context but are not charted.
fn write_comparison_chart(
    ws: &mut Worksheet,
    top_performers: &[&InsightItem],
    _priority_areas: &[&InsightItem],
    pal: &Palette,
    start_row: u32,
) -> Result<(), XlsxError> {
    ws.write_with_format(
        start_row,
        0,
        "PERFORMANCE COMPARISON",
        &create_section_format(pal),
    )?;

    let data_row = start_row + 2;
    let bold = Format::new().set_bold();
    ws.write_with_format(data_row, 0, "User", &bold)?;
    ws.write_with_format(data_row, 1, "Success Rate (%)", &bold)?;

    let staged = comparison_rows(top_performers.len());
    for (i, item) in top_performers.iter().take(staged).enumerate() {
        let row = data_row + 1 + i as u32;
        ws.write(row, 0, item.user.as_str())?;
        ws.write(row, 1, item.success_rate)?;
    }

    let last = data_row + staged as u32;
    let mut chart = Chart::new(ChartType::Bar);
    chart.title().set_name("Top 10 Performers by Success Rate");
    chart.x_axis().set_name("Success Rate (%)");
    chart.y_axis().set_name("User");
    chart
        .add_series()
        .set_name((SHEET_NAME, data_row, 1))
        .set_values((SHEET_NAME, data_row + 1, 1, last, 1))
        .set_categories((SHEET_NAME, data_row + 1, 0, last, 0));
    chart.set_width(760);
    chart.set_height(490);
    ws.insert_chart(start_row + 4, 0, &chart)?;

    Ok(())
}
