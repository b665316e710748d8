use axum::{
    body::Bytes,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use plantillas_model::SheetRequest;
use tracing::warn;

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

pub const SHEET_FILENAME: &str = "imagenes.pdf";

/// POST /images/pdf - build a PDF sheet from `{"uuids": [...]}`.
///
/// The body is decoded by hand so a missing or wrong content type is still
/// reported as an invalid payload.
pub async fn create_sheet_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Response> {
    let request: SheetRequest = serde_json::from_slice(&body).map_err(|err| {
        warn!(error = %err, bytes = body.len(), "rejecting sheet request");
        AppError::bad_request("invalid payload")
    })?;

    if request.is_empty() {
        return Err(AppError::bad_request("no identifiers supplied"));
    }

    let pdf = state.sheets.compose(&request.uuids).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={SHEET_FILENAME}"),
            ),
        ],
        pdf,
    )
        .into_response())
}
