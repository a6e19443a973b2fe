//! HTTP server rendering pages per request

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::pages::Pages;
use crate::remote::{ContentApi, HttpContentApi};
use crate::Site;

/// Shared server state. The post list itself is never cached here: every
/// request runs the full load-merge-render pipeline.
struct AppState {
    site: Site,
    api: Arc<dyn ContentApi>,
    pages: Pages,
}

/// Start the site server
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    let api = HttpContentApi::new(&site.config.api)?;
    serve(site.clone(), Arc::new(api), ip, port).await
}

async fn serve(site: Site, api: Arc<dyn ContentApi>, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState {
        site,
        api,
        pages: Pages::new()?,
    });

    let app = Router::new()
        .route("/blog", get(blog_list_handler))
        .route("/blog/:slug", get(post_detail_handler))
        .route("/healthz", get(|| async { "ok" }))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Deserialize)]
struct ListQuery {
    page: Option<usize>,
}

async fn blog_list_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Response {
    match state.pages.blog_list(&state.site, query.page.unwrap_or(1)) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Blog listing failed: {:#}", e);
            let body = state.pages.error_page(
                &state.site.config,
                500,
                "The blog listing is unavailable right now.",
            );
            (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
        }
    }
}

async fn post_detail_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Response {
    match state
        .pages
        .post_detail(&state.site, state.api.as_ref(), &slug)
        .await
    {
        Ok(Some(html)) => Html(html).into_response(),
        Ok(None) => {
            let body =
                state
                    .pages
                    .error_page(&state.site.config, 404, "This post does not exist.");
            (StatusCode::NOT_FOUND, Html(body)).into_response()
        }
        Err(e) => {
            tracing::error!("Post page for {:?} failed: {:#}", slug, e);
            let body = state.pages.error_page(
                &state.site.config,
                500,
                "This post could not be rendered.",
            );
            (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
        }
    }
}
