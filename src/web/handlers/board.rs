//! Board page handlers.

use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use crate::board::{BoardService, DeleteOutcome, SubmitOutcome};
use crate::web::error::PageError;
use crate::web::form::{BoardAction, BoardForm};
use crate::web::view::BoardTemplate;

use super::AppState;

/// Where every form post ends up.
pub const BOARD_LOCATION: &str = "/";

/// Redirect target after a failed delete.
pub const DELETE_FAILED_LOCATION: &str = "/?delete_failed=1";

/// Query parameters of the board page.
#[derive(Debug, Default, Deserialize)]
pub struct BoardQuery {
    /// Page number; anything unparsable or below 1 means page 1.
    pub page: Option<String>,
    /// Set after a rejected delete.
    pub delete_failed: Option<String>,
}

impl BoardQuery {
    /// Requested page number.
    pub fn page_number(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|&p| p >= 1)
            .unwrap_or(1)
    }

    /// Whether the wrong-password alert should be shown.
    pub fn delete_failed(&self) -> bool {
        matches!(self.delete_failed.as_deref(), Some(v) if !v.is_empty() && v != "0")
    }
}

/// `302 Found` to the given location.
fn found(location: &'static str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// GET / - Render the board.
pub async fn show_board(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BoardQuery>,
) -> Result<Html<String>, PageError> {
    let service = BoardService::new(&state.db, &state.storage);
    let page = service
        .list_page(query.page_number(), state.page_size)
        .await?;

    let html = BoardTemplate::new(&state.title, &page, &state.timezone, query.delete_failed())
        .render()
        .map_err(crate::BbsError::from)?;

    Ok(Html(html))
}

/// POST / - Create or delete a post, then redirect back to the board.
pub async fn handle_post(
    State(state): State<Arc<AppState>>,
    form: BoardForm,
) -> Result<Response, PageError> {
    let service = BoardService::new(&state.db, &state.storage);

    match form.into_action() {
        BoardAction::Submit(submission) => {
            if let SubmitOutcome::Rejected(reason) = service.submit(submission).await? {
                tracing::debug!(?reason, "Submission rejected");
            }
            Ok(found(BOARD_LOCATION))
        }
        BoardAction::Delete { id, password } => {
            let outcome = match id {
                Some(id) => service.delete(id, &password).await?,
                None => DeleteOutcome::NotFound,
            };
            if outcome.is_deleted() {
                Ok(found(BOARD_LOCATION))
            } else {
                tracing::debug!(?id, ?outcome, "Delete refused");
                Ok(found(DELETE_FAILED_LOCATION))
            }
        }
        BoardAction::Unknown => Ok(found(BOARD_LOCATION)),
    }
}

/// GET /health - Liveness probe.
pub async fn health_check() -> &'static str {
    "OK"
}
