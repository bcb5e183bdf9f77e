//! Error types of the exporter, the user store and the HTTP handlers.

use std::path::PathBuf;
use thiserror::Error;

#[cfg(feature = "web")]
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
#[cfg(feature = "web")]
use log::error;
#[cfg(feature = "web")]
use serde::Serialize;

/// Failures of a single workbook export
#[derive(Error, Debug)]
pub enum ExportError {
    /// No records and no declared schema, so there is no header to write
    #[error("cannot derive a header from an empty record set")]
    EmptyInput,

    /// A record's field names differ from the header's
    #[error("record at row {row} has fields {found:?}, expected {expected:?}")]
    SchemaMismatch {
        /// Worksheet row the record would have been written to
        row: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// The header or a record is wider than the 16,384 columns of a worksheet
    #[error("{0} columns do not fit in a worksheet")]
    TooManyColumns(usize),

    /// Header plus records exceed the 1,048,576 rows of a worksheet
    #[error("{0} rows do not fit in a worksheet")]
    TooManyRows(usize),

    #[error("xlsx writer error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Failures while loading or replacing the user data set
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid user data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate user id {0}")]
    DuplicateId(i64),
}

/// Errors a handler turns into an HTTP response
#[cfg(feature = "web")]
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}

#[cfg(feature = "web")]
#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

#[cfg(feature = "web")]
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Export(e) => {
                error!("Report export failed: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let detail = match &self {
            AppError::NotFound(what) => format!("{} not found", what),
            AppError::Export(_) => "Could not build the report".to_string(),
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}

#[cfg(all(test, feature = "web"))]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_404() {
        let response = AppError::NotFound("User").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_export_failure_is_500() {
        let response = AppError::from(ExportError::EmptyInput).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
