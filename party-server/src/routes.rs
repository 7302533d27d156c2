//! HTTP routes for the star map.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::QueryRejection, Query, Request, State},
    http::header,
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use ephemeris::{resolve_visible, Ephemeris, BRIGHT_STARS};
use skychart::{StarChartRenderer, PNG_CONTENT_TYPE};

use crate::embedded_assets::{serve_page_asset, serve_page_with_data, STARMAP_PAGE};
use crate::error::{Result, ServerError};
use crate::query::{PageDefaults, StarmapParams, StarmapQuery};

/// Read-only state shared by every request.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub renderer: StarChartRenderer,
    pub ephemeris: Ephemeris,
}

impl AppState {
    /// Resolve the sky for `params` and render it as PNG bytes.
    pub fn render(&self, params: &StarmapParams) -> Result<Vec<u8>> {
        let resolution = resolve_visible(&self.ephemeris, &BRIGHT_STARS, &params.observer);
        let png = self.renderer.render_sky(
            &resolution,
            &params.title,
            params.caption.as_deref(),
            params.footer(),
        )?;
        Ok(png)
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_redirect))
        .route("/starmap", get(starmap_page))
        .route("/starmap.png", get(starmap_png))
        .fallback(get(serve_page_asset))
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
}

async fn index_redirect() -> Redirect {
    Redirect::to("/starmap")
}

async fn starmap_page() -> Response {
    let defaults = PageDefaults::default();
    serve_page_with_data(STARMAP_PAGE, &defaults.attributes())
}

async fn starmap_png(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<StarmapQuery>, QueryRejection>,
) -> Result<Response> {
    // Malformed query strings get the same generic 500 as bad field values
    let Query(query) = query.map_err(|e| ServerError::InvalidQuery {
        field: "query",
        reason: e.body_text(),
    })?;
    let params = StarmapParams::from_query(&query)?;
    let png = state.render(&params)?;
    Ok(png_response(png))
}

fn png_response(png: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, PNG_CONTENT_TYPE),
            (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
            (header::PRAGMA, "no-cache"),
            (header::EXPIRES, "0"),
        ],
        png,
    )
        .into_response()
}

async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;

    tracing::info!(
        "{} {} -> {} - {:.1}ms",
        method,
        uri.path(),
        response.status().as_u16(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    response
}
