use std::collections::BTreeMap;

use rust_xlsxwriter::{Chart, ChartType, Format, FormatAlign, Workbook, Worksheet, XlsxError};

use crate::classify::{success_rate_style, PerformanceLevel};
use crate::report::{Report, UserPerformance};
use crate::sheets::{
    create_caption_format, create_header_format, create_integer_format, create_percent1_format,
    create_section_format, create_title_format, with_grid,
};
use crate::style::Palette;

const SHEET_NAME: &str = "User Performance Analysis";

/// Table rows are capped to the top 15 for the success-rate chart.
const CHART_ROW_CAP: usize = 15;

/// First header row of the ranking table (0-based).
const TABLE_HEADER_ROW: u32 = 3;

const HEADERS: [&str; 14] = [
    "Rank",
    "User Name",
    "Total Tasks",
    "Eligible",
    "Not Eligible",
    "Success Rate %",
    "Invited",
    "Changed Mind",
    "No Response",
    "Response Rate %",
    "Conversion Rate %",
    "Projects",
    "Cities",
    "Performance Level",
];

const COLUMN_WIDTHS: [u16; 14] = [7, 20, 12, 10, 12, 14, 10, 13, 12, 14, 14, 25, 25, 18];

/// Last 0-based data row referenced by the success-rate chart.
pub(crate) fn success_chart_last_row(row_count: usize) -> u32 {
    TABLE_HEADER_ROW + row_count.min(CHART_ROW_CAP) as u32
}

/// Count rows per performance level, alphabetically by level name.
pub(crate) fn level_counts(rows: &[&UserPerformance]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for row in rows {
        *counts.entry(row.performance_level.clone()).or_insert(0) += 1;
    }
    counts
}

/// Ranked user table with per-column styling plus a success-rate column
/// chart and a performance-level pie chart.
pub fn write_performance(wb: &mut Workbook, report: &Report, pal: &Palette) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name(SHEET_NAME)?;

    let rows = report.ranked_performance();
    if rows.is_empty() {
        return Ok(());
    }

    ws.merge_range(
        0,
        0,
        0,
        13,
        "USER PERFORMANCE ANALYSIS & RANKINGS",
        &create_title_format(pal),
    )?;
    ws.write_with_format(
        1,
        0,
        format!("Total Users: {}", rows.len()),
        &create_caption_format(pal),
    )?;

    let hdr = create_header_format(pal).set_font_size(10).set_text_wrap();
    for (col, header) in HEADERS.iter().enumerate() {
        ws.write_with_format(TABLE_HEADER_ROW, col as u16, *header, &hdr)?;
    }

    let rank_fmt = with_grid(
        Format::new()
            .set_bold()
            .set_font_size(10)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter),
        pal,
    );
    let rank_top3_fmt = rank_fmt.clone().set_background_color(pal.warning_tint);
    let name_fmt = with_grid(Format::new().set_bold().set_font_size(10), pal);
    let count_fmt = with_grid(create_integer_format(), pal);
    let rate_fmt = with_grid(
        create_percent1_format()
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter),
        pal,
    );
    let text_fmt = with_grid(Format::new().set_text_wrap(), pal);

    for (idx, user) in rows.iter().enumerate() {
        let row = TABLE_HEADER_ROW + 1 + idx as u32;

        // Top three ranks get a highlight fill on the rank cell only.
        let fmt = if idx < 3 { &rank_top3_fmt } else { &rank_fmt };
        if user.rank.is_empty() {
            ws.write_with_format(row, 0, (idx + 1) as f64, fmt)?;
        } else {
            match user.rank.percent() {
                Some(r) => ws.write_with_format(row, 0, r, fmt)?,
                None => ws.write_with_format(row, 0, user.rank.display(), fmt)?,
            };
        }

        ws.write_with_format(row, 1, user.user_name.as_str(), &name_fmt)?;
        ws.write_with_format(row, 2, user.total_tasks, &count_fmt)?;
        ws.write_with_format(row, 3, user.eligible, &count_fmt)?;
        ws.write_with_format(row, 4, user.not_eligible, &count_fmt)?;

        let style = success_rate_style(user.success_rate, pal);
        let success_fmt = rate_fmt
            .clone()
            .set_bold()
            .set_background_color(style.fill)
            .set_font_color(style.font);
        ws.write_with_format(row, 5, user.success_rate, &success_fmt)?;

        ws.write_with_format(row, 6, user.invited, &count_fmt)?;
        ws.write_with_format(row, 7, user.changed_mind, &count_fmt)?;
        ws.write_with_format(row, 8, user.no_response, &count_fmt)?;
        ws.write_with_format(row, 9, user.response_rate, &rate_fmt)?;
        ws.write_with_format(row, 10, user.conversion_rate, &rate_fmt)?;
        ws.write_with_format(row, 11, user.projects.as_str(), &text_fmt)?;
        ws.write_with_format(row, 12, user.cities.as_str(), &text_fmt)?;

        let level = PerformanceLevel::parse(&user.performance_level);
        let level_fmt = with_grid(
            Format::new()
                .set_bold()
                .set_font_size(9)
                .set_font_color("FFFFFF")
                .set_background_color(level.block_color(pal))
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            pal,
        );
        ws.write_with_format(row, 13, user.performance_level.as_str(), &level_fmt)?;
    }

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        ws.set_column_width(col as u16, *width)?;
    }
    for row in TABLE_HEADER_ROW..=(TABLE_HEADER_ROW + rows.len() as u32) {
        ws.set_row_height(row, 24)?;
    }
    ws.set_freeze_panes(4, 2)?;

    write_performance_charts(ws, &rows, pal)?;

    Ok(())
}

fn write_performance_charts(
    ws: &mut Worksheet,
    rows: &[&UserPerformance],
    pal: &Palette,
) -> Result<(), XlsxError> {
    let section_row = rows.len() as u32 + 6;
    ws.write_with_format(
        section_row,
        0,
        "PERFORMANCE VISUALIZATION",
        &create_section_format(pal),
    )?;

    // Success-rate chart reads the live table range, top-ranked first.
    let last = success_chart_last_row(rows.len());
    let mut chart = Chart::new(ChartType::Column);
    chart.title().set_name("Top 15 Users by Success Rate");
    chart.x_axis().set_name("User");
    chart.y_axis().set_name("Success Rate (%)");
    chart
        .add_series()
        .set_name((SHEET_NAME, TABLE_HEADER_ROW, 5))
        .set_values((SHEET_NAME, TABLE_HEADER_ROW + 1, 5, last, 5))
        .set_categories((SHEET_NAME, TABLE_HEADER_ROW + 1, 1, last, 1));
    chart.set_width(800);
    chart.set_height(520);
    ws.insert_chart(section_row + 2, 0, &chart)?;

    // Pie chart needs its own staged Level/Count table.
    let counts = level_counts(rows);
    let pie_label_row = section_row + 22;
    let bold = Format::new().set_bold();
    ws.write_with_format(
        pie_label_row,
        0,
        "Performance Level Distribution",
        &Format::new().set_bold().set_font_size(11),
    )?;
    let pie_header_row = pie_label_row + 1;
    ws.write_with_format(pie_header_row, 0, "Level", &bold)?;
    ws.write_with_format(pie_header_row, 1, "Count", &bold)?;
    for (i, (level, count)) in counts.iter().enumerate() {
        let row = pie_header_row + 1 + i as u32;
        ws.write(row, 0, level.as_str())?;
        ws.write(row, 1, *count as f64)?;
    }

    let pie_last = pie_header_row + counts.len() as u32;
    let mut pie = Chart::new(ChartType::Pie);
    pie.title().set_name("Distribution by Performance Level");
    pie.add_series()
        .set_name((SHEET_NAME, pie_header_row, 1))
        .set_values((SHEET_NAME, pie_header_row + 1, 1, pie_last, 1))
        .set_categories((SHEET_NAME, pie_header_row + 1, 0, pie_last, 0));
    pie.set_width(680);
    pie.set_height(490);
    ws.insert_chart(section_row + 2, 11, &pie)?;

    Ok(())
}
