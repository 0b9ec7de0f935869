use crate::constants::SERVICE_NAME;
use crate::crossref::LabeledReference;
use crate::error::BibleError;
use crate::library::Library;
use crate::types::{Book, BookCrossReferences, BookMetadata, Chapter, CrossReference};
use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

type AppState = Arc<Library>;

/// Maps core errors onto HTTP responses without leaking parse details
pub struct ApiError(StatusCode, &'static str);

impl From<BibleError> for ApiError {
    fn from(e: BibleError) -> Self {
        match e {
            BibleError::NotFound(what) => {
                info!("Not found: {}", what);
                ApiError(StatusCode::NOT_FOUND, "Not found")
            }
            other => {
                error!("Request failed: {}", other);
                ApiError(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

fn parse_number(raw: &str) -> Result<u32, ApiError> {
    raw.parse()
        .map_err(|_| ApiError(StatusCode::BAD_REQUEST, "Invalid chapter or verse number"))
}

/// Runs a lookup on the blocking pool. The first request for a book reads
/// and parses its file from disk.
async fn load<T, F>(library: AppState, lookup: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&Library) -> crate::error::Result<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(move || lookup(&library)).await {
        Ok(result) => Ok(Json(result?)),
        Err(e) => {
            error!("Lookup task failed: {}", e);
            Err(ApiError(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"))
        }
    }
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn list_books(State(library): State<AppState>) -> impl IntoResponse {
    Json(library.registry().books().to_vec())
}

async fn get_book(
    State(library): State<AppState>,
    Path(book_id): Path<String>,
) -> ApiResult<BookMetadata> {
    Ok(Json(library.registry().book(&book_id)?.clone()))
}

async fn get_book_chapters(
    State(library): State<AppState>,
    Path(book_id): Path<String>,
) -> ApiResult<Book> {
    load(library, move |library| library.store().book(&book_id)).await
}

async fn get_chapter(
    State(library): State<AppState>,
    Path((book_id, chapter)): Path<(String, String)>,
) -> ApiResult<Chapter> {
    let chapter = parse_number(&chapter)?;
    load(library, move |library| library.store().chapter(&book_id, chapter)).await
}

async fn get_crossrefs(
    State(library): State<AppState>,
    Path(book_id): Path<String>,
) -> ApiResult<BookCrossReferences> {
    load(library, move |library| {
        let refs = library.resolver().cross_references(&book_id)?;
        Ok(refs.as_ref().clone())
    })
    .await
}

async fn get_crossrefs_chapter(
    State(library): State<AppState>,
    Path((book_id, chapter)): Path<(String, String)>,
) -> ApiResult<Vec<CrossReference>> {
    let chapter = parse_number(&chapter)?;
    load(library, move |library| {
        library.resolver().cross_references_for_chapter(&book_id, chapter)
    })
    .await
}

async fn get_crossrefs_verse(
    State(library): State<AppState>,
    Path((book_id, chapter, verse)): Path<(String, String, String)>,
) -> ApiResult<Vec<LabeledReference>> {
    let chapter = parse_number(&chapter)?;
    let verse = parse_number(&verse)?;
    load(library, move |library| {
        library.resolver().labeled_for_verse(&book_id, chapter, verse)
    })
    .await
}

/// Create the HTTP router with all routes
pub fn create_server(library: Arc<Library>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(Duration::from_secs(300));

    Router::new()
        .route("/health", get(health))
        .route("/books", get(list_books))
        .route("/books/:book_id", get(get_book))
        .route("/books/:book_id/chapters", get(get_book_chapters))
        .route("/books/:book_id/chapter/:chapter", get(get_chapter))
        .route("/crossrefs/:book_id", get(get_crossrefs))
        .route("/crossrefs/:book_id/chapter/:chapter", get(get_crossrefs_chapter))
        .route(
            "/crossrefs/:book_id/chapter/:chapter/verse/:verse",
            get(get_crossrefs_verse),
        )
        .with_state(library)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

/// Start the HTTP server on the given address
pub async fn start_server(library: Arc<Library>, addr: SocketAddr) -> anyhow::Result<()> {
    let app = create_server(library);

    info!("HTTP server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
