//! Repository page endpoint with crawler-aware meta tags.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::assets;
use crate::errors::AppError;
use crate::render::{inject_meta_tags, PageMeta};
use crate::AppState;

/// GET /repository/{id} - Serve the SPA shell.
///
/// Crawlers get the shell with title, description, Open Graph and Twitter Card
/// tags for the repository. If the metadata cannot be fetched they get the
/// plain shell, like everyone else.
pub async fn repository_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let shell = assets::load_shell(&state.config.index_path)
        .await
        .inspect_err(|e| tracing::error!(id = %id, "{}", e))?;

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());

    if !state.crawlers.is_bot(user_agent) {
        return Ok(html_response(shell));
    }

    tracing::info!(
        id = %id,
        user_agent = user_agent.unwrap_or_default(),
        "Bot detected, serving SSR version"
    );

    match state.api.fetch_repository(&id).await {
        Ok(metadata) => {
            let meta = PageMeta::for_repository(
                &metadata,
                &id,
                &state.config.site_name,
                &state.config.og_image_base_url,
            );
            Ok(html_response(inject_meta_tags(&shell, &meta)))
        }
        Err(e) => {
            tracing::warn!(id = %id, "Failed to SSR for bot, serving plain shell: {}", e);
            Ok(html_response(shell))
        }
    }
}

fn html_response(html: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        html,
    )
        .into_response()
}
