use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Chart, ChartType, Format, FormatAlign, Workbook, Worksheet, XlsxError};
use std::path::Path;

use mortgage_core::report::{
    format_thousands, row_values, summary_entries, SCHEDULE_COLUMNS, SUMMARY_COLUMNS,
};
use mortgage_core::AmortizationResult;

pub const SUMMARY_SHEET: &str = "Summary";
pub const SCHEDULE_SHEET: &str = "Amortization";

/// Integers with thousands separators.
const NUMBER_FORMAT: &str = "#,##0";

const CHART_TITLE: &str = "Payment split between interest and principal";

pub fn save_workbook(result: &AmortizationResult, path: &Path) -> Result<(), XlsxError> {
    let mut workbook = build_workbook(result)?;
    workbook.save(path)?;
    Ok(())
}

pub fn build_workbook(result: &AmortizationResult) -> Result<Workbook, XlsxError> {
    let text = Format::new()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    let number = text.clone().set_num_format(NUMBER_FORMAT);

    let mut workbook = Workbook::new();

    let summary = workbook.add_worksheet();
    summary.set_name(SUMMARY_SHEET)?;
    let mut widths = ColumnWidths::new(SUMMARY_COLUMNS.len());
    write_header(summary, &SUMMARY_COLUMNS, &text, &mut widths)?;
    for (i, entry) in summary_entries(&result.summary).iter().enumerate() {
        let row = i as u32 + 1;
        summary.write_string_with_format(row, 0, &entry.label, &text)?;
        summary.write_number_with_format(row, 1, to_cell(entry.value), &number)?;
        widths.observe(0, &entry.label);
        widths.observe(1, &format_thousands(entry.value));
    }
    widths.apply(summary)?;

    let schedule = workbook.add_worksheet();
    schedule.set_name(SCHEDULE_SHEET)?;
    let mut widths = ColumnWidths::new(SCHEDULE_COLUMNS.len());
    write_header(schedule, &SCHEDULE_COLUMNS, &text, &mut widths)?;
    for (i, row) in result.rows.iter().enumerate() {
        let excel_row = i as u32 + 1;
        for (col, value) in row_values(row).into_iter().enumerate() {
            schedule.write_number_with_format(excel_row, col as u16, to_cell(value), &number)?;
            widths.observe(col, &format_thousands(value));
        }
    }
    widths.apply(schedule)?;

    if !result.rows.is_empty() {
        let chart = payment_split_chart(result.rows.len() as u32);
        schedule.insert_chart(1, SCHEDULE_COLUMNS.len() as u16 + 1, &chart)?;
    }

    Ok(workbook)
}

fn write_header(
    worksheet: &mut Worksheet,
    columns: &[&str],
    format: &Format,
    widths: &mut ColumnWidths,
) -> Result<(), XlsxError> {
    for (col, name) in columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, format)?;
        widths.observe(col, name);
    }
    Ok(())
}

/// Interest and principal per month, read from schedule columns 2 and 3.
fn payment_split_chart(row_count: u32) -> Chart {
    let mut chart = Chart::new(ChartType::Line);
    chart.title().set_name(CHART_TITLE);
    chart.x_axis().set_name(SCHEDULE_COLUMNS[0]);
    chart.y_axis().set_name("Amount");

    for col in [2u16, 3u16] {
        chart
            .add_series()
            .set_name(SCHEDULE_COLUMNS[col as usize])
            .set_categories((SCHEDULE_SHEET, 1, 0, row_count, 0))
            .set_values((SCHEDULE_SHEET, 1, col, row_count, col));
    }

    chart
}

fn to_cell(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// Tracks the longest rendered cell per column; width is that length plus 2.
struct ColumnWidths {
    max_chars: Vec<usize>,
}

impl ColumnWidths {
    fn new(columns: usize) -> Self {
        ColumnWidths {
            max_chars: vec![0; columns],
        }
    }

    fn observe(&mut self, col: usize, rendered: &str) {
        if let Some(max) = self.max_chars.get_mut(col) {
            *max = (*max).max(rendered.chars().count());
        }
    }

    fn width(&self, col: usize) -> f64 {
        self.max_chars.get(col).map_or(0.0, |n| (*n + 2) as f64)
    }

    fn apply(&self, worksheet: &mut Worksheet) -> Result<(), XlsxError> {
        for col in 0..self.max_chars.len() {
            worksheet.set_column_width(col as u16, self.width(col))?;
        }
        Ok(())
    }
}
