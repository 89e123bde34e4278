//! HTTP service exposing the analyzers and the document store.
//!
//! Endpoints come from the [`RouteTable`]; with no routes configured the
//! defaults in [`crate::routes::default_routes`] are served, including
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/score-website` | `{url}` → `{score, recommendations}` |
//! | `POST` | `/api/v1/optimize/{id}` | content suggestions for a document |
//! | `GET`  | `/api/v1/search/agent?query=&type=` | semantic or keyword search |
//! | `GET`  | `/health` | health check |
//!
//! Errors use the body `{ "error": { "code": "...", "message": "..." } }`.

use crate::analysis::{enhance, structured_data};
use crate::config::{AppConfig, SiteConfig};
use crate::error::{Error, FetchError, Result};
use crate::results::{AnalysisResult, ContentAnalysis};
use crate::routes::{HandlerKind, HttpMethod, RouteConfig, RouteTable};
use crate::store::{
    ANALYSIS_KEY, Document, DocumentPage, DocumentStore, OptimizationData, STRUCTURED_DATA_KEY,
    VisibilityStats,
};
use crate::Analyzer;
use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{MethodFilter, MethodRouter, get, on},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub store: Arc<DocumentStore>,
    pub site: Arc<SiteConfig>,
}

impl AppState {
    pub fn new(analyzer: Arc<Analyzer>, store: Arc<DocumentStore>, site: SiteConfig) -> Self {
        Self {
            analyzer,
            store,
            site: Arc::new(site),
        }
    }
}

/// Build the analyzer, store and route table from configuration and serve until terminated
pub async fn run_server(config: &AppConfig) -> Result<()> {
    let analyzer = Arc::new(Analyzer::from_config(config)?);
    let store = match &config.server.documents {
        Some(path) => DocumentStore::from_file(path)?,
        None => DocumentStore::default(),
    };
    let table = RouteTable::from_config(&config.server.routes)?;
    let state = AppState::new(analyzer, Arc::new(store), config.site.clone());

    for route in table.routes() {
        ::log::info!("Route {:?} {}", route.method(), route.path());
    }

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    ::log::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, build_router(state, &table)).await?;

    Ok(())
}

/// Turn a validated route table into a router
pub fn build_router(state: AppState, table: &RouteTable) -> Router {
    let mut by_path: BTreeMap<String, MethodRouter<AppState>> = BTreeMap::new();

    for route in table.routes() {
        let method_router = match route {
            RouteConfig::CollectionQuery {
                post_type,
                per_page,
                ..
            } => collection_route(post_type.clone(), *per_page),
            RouteConfig::Custom {
                method, handler, ..
            } => custom_route(*method, *handler),
        };

        let path = route.path().to_string();
        let merged = match by_path.remove(&path) {
            Some(existing) => existing.merge(method_router),
            None => method_router,
        };
        by_path.insert(path, merged);
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    by_path
        .into_iter()
        .fold(Router::new(), |router, (path, method_router)| {
            router.route(&path, method_router)
        })
        .layer(cors)
        .with_state(state)
}

fn method_filter(method: HttpMethod) -> MethodFilter {
    match method {
        HttpMethod::Get => MethodFilter::GET,
        HttpMethod::Post => MethodFilter::POST,
        HttpMethod::Put => MethodFilter::PUT,
        HttpMethod::Delete => MethodFilter::DELETE,
    }
}

fn custom_route(method: HttpMethod, handler: HandlerKind) -> MethodRouter<AppState> {
    let filter = method_filter(method);
    match handler {
        HandlerKind::ScoreWebsite => on(filter, score_website),
        HandlerKind::GenerateMetadata => on(filter, generate_metadata),
        HandlerKind::OptimizeDocument => on(filter, optimize_document),
        HandlerKind::SaveOptimization => on(filter, save_optimization),
        HandlerKind::StructuredData => on(filter, get_structured_data),
        HandlerKind::RenderDocument => on(filter, render_document),
        HandlerKind::AgentSearch => on(filter, agent_search),
        HandlerKind::VisibilityAnalytics => on(filter, visibility_analytics),
        HandlerKind::RobotsTxt => on(filter, robots_txt),
        HandlerKind::Health => on(filter, health),
    }
}

// ============ Errors ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Error converted into an HTTP response
pub struct AppError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl AppError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "bad_request",
            message: message.into(),
        }
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        let (status, code) = match &err {
            Error::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            Error::Fetch(FetchError::InvalidUrl { .. } | FetchError::Rejected(_)) => {
                (StatusCode::BAD_REQUEST, "bad_request")
            }
            Error::Fetch(_) => (StatusCode::BAD_GATEWAY, "fetch_failed"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };
        Self {
            status,
            code,
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Error::from(err).into()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            ::log::error!("{} ({})", self.message, self.status);
        } else {
            ::log::debug!("{} ({})", self.message, self.status);
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code.to_string(),
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

type HandlerResult<T> = std::result::Result<T, AppError>;

// Extractor rejections are taken as values so they reach clients as `AppError` bodies
type JsonBody<T> = std::result::Result<Json<T>, JsonRejection>;
type IdParam = std::result::Result<Path<u64>, PathRejection>;
type QueryParams<T> = std::result::Result<Query<T>, QueryRejection>;

// ============ Handlers ============

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Deserialize)]
struct ScoreRequest {
    url: String,
}

async fn score_website(
    State(state): State<AppState>,
    body: JsonBody<ScoreRequest>,
) -> HandlerResult<Json<AnalysisResult>> {
    let Json(request) = body?;
    let analysis = state.analyzer.score_url(&request.url).await?;
    Ok(Json(analysis.result()))
}

#[derive(Deserialize)]
struct MetadataRequest {
    title: Option<String>,
    description: Option<String>,
}

async fn generate_metadata(
    State(state): State<AppState>,
    body: JsonBody<MetadataRequest>,
) -> HandlerResult<Json<structured_data::GeneratedMetadata>> {
    let Json(request) = body?;
    Ok(Json(structured_data::generate_metadata(
        request.title.as_deref(),
        request.description.as_deref(),
        &state.site,
    )))
}

#[derive(Serialize)]
struct OptimizeResponse {
    post_id: u64,
    #[serde(flatten)]
    analysis: ContentAnalysis,
}

async fn optimize_document(
    State(state): State<AppState>,
    id: IdParam,
) -> HandlerResult<Json<OptimizeResponse>> {
    let Path(id) = id?;
    let document = state.store.get(id).await?;
    let analysis = state.analyzer.analyze_content(&document.content);
    state
        .store
        .set_meta(id, ANALYSIS_KEY, serde_json::to_value(&analysis)?)
        .await?;

    Ok(Json(OptimizeResponse {
        post_id: id,
        analysis,
    }))
}

#[derive(Serialize)]
struct SaveOptimizationResponse {
    post_id: u64,
    optimization: OptimizationData,
}

/// Store optimization data and refresh the document's structured data
async fn save_optimization(
    State(state): State<AppState>,
    id: IdParam,
    body: JsonBody<OptimizationData>,
) -> HandlerResult<Json<SaveOptimizationResponse>> {
    let Path(id) = id?;
    let Json(data) = body?;
    state.store.set_optimization_data(id, &data).await?;

    let document = state.store.get(id).await?;
    let schema = structured_data::article_schema(&document, &state.site);
    state
        .store
        .set_meta(id, STRUCTURED_DATA_KEY, serde_json::to_value(schema)?)
        .await?;

    Ok(Json(SaveOptimizationResponse {
        post_id: id,
        optimization: data,
    }))
}

async fn get_structured_data(
    State(state): State<AppState>,
    id: IdParam,
) -> HandlerResult<Json<serde_json::Value>> {
    let Path(id) = id?;
    let document = state.store.get(id).await?;
    let value = match document.meta.get(STRUCTURED_DATA_KEY) {
        Some(stored) if !stored.is_null() => stored.clone(),
        _ => serde_json::to_value(structured_data::article_schema(&document, &state.site))?,
    };
    Ok(Json(value))
}

/// Full HTML page for a document with agent meta tags, JSON-LD and semantic markup
async fn render_document(
    State(state): State<AppState>,
    id: IdParam,
) -> HandlerResult<Html<String>> {
    let Path(id) = id?;
    let document = state.store.get(id).await?;
    Ok(Html(render_page(&document, &state.site)?))
}

fn render_page(document: &Document, site: &SiteConfig) -> serde_json::Result<String> {
    let schema = structured_data::article_schema(document, site);
    let mut head = format!(
        "<title>{}</title>\n{}",
        crate::utils::escape_attr(&document.title),
        structured_data::json_ld_script(&schema)?
    );

    let body = match document.optimization_data() {
        Some(data) => {
            head.push_str(&enhance::agent_meta_tags(&data, site));
            enhance::enhance_content(&document.content, &data)?
        }
        None => document.content.clone(),
    };

    Ok(format!(
        "<!DOCTYPE html>\n<html><head>\n{}\n</head><body>\n{}\n</body></html>\n",
        head, body
    ))
}

#[derive(Deserialize)]
struct SearchParams {
    query: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Search listing entry for a document
#[derive(Serialize)]
struct SearchEntry {
    id: u64,
    title: String,
    excerpt: String,
    optimization_score: i64,
    keywords: String,
    agent_description: String,
    last_modified: String,
}

impl From<Document> for SearchEntry {
    fn from(document: Document) -> Self {
        let data = document.optimization_data().unwrap_or_default();
        Self {
            id: document.id,
            title: document.title,
            excerpt: document.excerpt,
            optimization_score: data.optimization_score,
            keywords: data.keywords,
            agent_description: data.agent_description,
            last_modified: document.modified,
        }
    }
}

#[derive(Serialize)]
struct ScoredEntry {
    post: SearchEntry,
    score: f64,
}

async fn agent_search(
    State(state): State<AppState>,
    params: QueryParams<SearchParams>,
) -> HandlerResult<Response> {
    let Query(params) = params?;
    let query = params
        .query
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::bad_request("query is required"))?;

    let config = state.analyzer.content_config();
    match params.kind.as_deref().unwrap_or("semantic") {
        "semantic" => {
            if !config.enable_semantic_search {
                return Err(AppError::bad_request("semantic search is disabled"));
            }
            let hits = state
                .store
                .semantic_search(&query, config.relevance_threshold)
                .await;
            let entries: Vec<ScoredEntry> = hits
                .into_iter()
                .map(|hit| ScoredEntry {
                    post: hit.document.into(),
                    score: hit.score,
                })
                .collect();
            Ok(Json(entries).into_response())
        }
        "keyword" => {
            let entries: Vec<SearchEntry> = state
                .store
                .keyword_search(&query)
                .await
                .into_iter()
                .map(SearchEntry::from)
                .collect();
            Ok(Json(entries).into_response())
        }
        other => Err(AppError::bad_request(format!(
            "invalid search type '{}'",
            other
        ))),
    }
}

async fn visibility_analytics(State(state): State<AppState>) -> Json<VisibilityStats> {
    Json(state.store.visibility_stats().await)
}

async fn robots_txt(State(state): State<AppState>) -> impl IntoResponse {
    let body = enhance::robots_txt("User-agent: *\nDisallow:\n", &state.site);
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body)
}

#[derive(Deserialize)]
struct CollectionParams {
    search: Option<String>,
    page: Option<usize>,
}

fn collection_route(post_type: Option<String>, per_page: usize) -> MethodRouter<AppState> {
    get(
        move |State(state): State<AppState>, params: QueryParams<CollectionParams>| {
            let post_type = post_type.clone();
            async move {
                let Query(params) = params?;
                let page: DocumentPage = state
                    .store
                    .query(
                        post_type.as_deref(),
                        params.search.as_deref(),
                        params.page.unwrap_or(1),
                        per_page,
                    )
                    .await;
                HandlerResult::Ok(Json(page))
            }
        },
    )
}
