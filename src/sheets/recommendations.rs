use rust_xlsxwriter::{Format, FormatAlign, Workbook, XlsxError};

use crate::recommend::{build_recommendations, Recommendation};
use crate::report::Report;
use crate::sheets::create_title_format;
use crate::style::Palette;

/// Management recommendations sheet. Always renders content: the rule
/// engine's closing recommendation is unconditional.
pub fn write_recommendations(
    wb: &mut Workbook,
    report: &Report,
    pal: &Palette,
) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name("Management Recommendations")?;

    ws.merge_range(
        0,
        0,
        0,
        5,
        "MANAGEMENT RECOMMENDATIONS & ACTION ITEMS",
        &create_title_format(pal),
    )?;
    let caption = Format::new()
        .set_font_size(11)
        .set_font_color(pal.muted)
        .set_italic();
    ws.write_with_format(
        1,
        0,
        "Data-Driven Insights for Leadership Decision Making",
        &caption,
    )?;

    let recs = build_recommendations(&report.summary_data, &report.insights_data);

    let mut row = 3u32;
    for rec in &recs {
        row = write_block(ws, row, rec, pal)?;
    }

    ws.set_column_width(0, 50)?;
    for col in 1u16..=5 {
        ws.set_column_width(col, 20)?;
    }

    Ok(())
}

/// One recommendation block. Returns the row following the spacer.
fn write_block(
    ws: &mut rust_xlsxwriter::Worksheet,
    mut row: u32,
    rec: &Recommendation,
    pal: &Palette,
) -> Result<u32, XlsxError> {
    let banner = Format::new()
        .set_bold()
        .set_font_size(11)
        .set_font_color("FFFFFF")
        .set_background_color(rec.category.banner_color(pal))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    ws.merge_range(
        row,
        0,
        row,
        5,
        &format!("[{}]", rec.category.label().to_uppercase()),
        &banner,
    )?;
    ws.set_row_height(row, 22)?;
    row += 1;

    let title = Format::new().set_bold().set_font_size(12);
    ws.merge_range(row, 0, row, 5, &rec.title, &title)?;
    row += 1;

    let description = Format::new()
        .set_font_size(10)
        .set_font_color(pal.body)
        .set_italic()
        .set_text_wrap();
    ws.merge_range(row, 0, row, 5, &rec.description, &description)?;
    ws.set_row_height(row, 30)?;
    row += 1;

    ws.write_with_format(row, 0, "Action Items:", &Format::new().set_bold().set_font_size(10))?;
    row += 1;

    let action = Format::new()
        .set_font_size(10)
        .set_text_wrap()
        .set_indent(1);
    for item in rec.actions {
        ws.merge_range(row, 0, row, 5, &format!("  • {item}"), &action)?;
        ws.set_row_height(row, 25)?;
        row += 1;
    }

    let footer = Format::new()
        .set_bold()
        .set_font_size(10)
        .set_font_color(pal.purple);
    ws.merge_range(row, 0, row, 2, &format!("Timeline: {}", rec.timeline), &footer)?;
    ws.merge_range(row, 3, row, 5, &format!("Owner: {}", rec.owner), &footer)?;

    // Spacer row before the next block.
    Ok(row + 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::fixtures::sample_report;

    #[test]
    fn test_write_recommendations_full_report() {
        let mut wb = Workbook::new();
        write_recommendations(&mut wb, &sample_report(), &Palette::DEFAULT).unwrap();
        assert_eq!(&wb.save_to_buffer().unwrap()[..2], b"PK");
    }

    #[test]
    fn test_write_recommendations_empty_report_still_renders() {
        // Empty input fires the absent-metric rules plus the closing
        // strategic block, so the sheet is never blank.
        let mut wb = Workbook::new();
        write_recommendations(&mut wb, &Report::default(), &Palette::DEFAULT).unwrap();
        assert_eq!(&wb.save_to_buffer().unwrap()[..2], b"PK");
    }
}
