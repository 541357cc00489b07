use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Usage: task-analytics <input_json_path> <output_xlsx_path>")]
    Usage,

    #[error("Input file not found: {0}")]
    InputNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Workbook error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
