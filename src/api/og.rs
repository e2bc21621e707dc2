//! Open Graph image endpoint.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::render;
use crate::AppState;

/// Query parameters of the image endpoint.
#[derive(Debug, Deserialize)]
pub struct OgImageQuery {
    /// Repository identifier.
    pub id: Option<String>,
}

/// GET /?id={id} - Render the preview card for a repository as PNG.
pub async fn og_image(
    State(state): State<AppState>,
    Query(params): Query<OgImageQuery>,
) -> Result<Response, AppError> {
    let id = params
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("Repository ID is required".to_string()))?;

    let (metadata, readme) = state.api.collect(id).await.inspect_err(|e| {
        tracing::error!(id = %id, "Failed to fetch repository: {}", e);
    })?;

    let snippet = render::sanitize(readme.as_deref());
    let html = render::render_card(&metadata, &snippet, &state.logo, &state.config.site_domain);

    let png = state.screenshots.render(&html).await.inspect_err(|e| {
        tracing::error!(id = %id, "Failed to generate OG image: {}", e);
    })?;

    tracing::info!(
        id = %id,
        repository = %metadata.full_name,
        repository_id = %metadata.id,
        size = png.len(),
        "OG image generated"
    );

    Ok((StatusCode::OK, [(header::CONTENT_TYPE, "image/png")], png).into_response())
}
