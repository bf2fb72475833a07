use axum::{extract::State, Json};

use crate::auth::session::SessionUser;
use crate::errors::AppError;
use crate::state::AppState;
use crate::suggestions::suggester::{suggest, SuggestionRequest, SuggestionResponse};

/// POST /api/v1/ai/suggest
/// Returns 3-5 suggestions for the field being edited.
pub async fn handle_suggest(
    State(state): State<AppState>,
    _user: SessionUser,
    Json(req): Json<SuggestionRequest>,
) -> Result<Json<SuggestionResponse>, AppError> {
    let response = suggest(state.suggester.as_ref(), &req).await?;
    Ok(Json(response))
}
