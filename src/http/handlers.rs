use axum::Json;
use axum::extract::{Form, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::{Deserialize, Serialize};

use crate::core::{Guide, StoreError};
use crate::http::backend::Backend;
use crate::http::page::{self, SectionView};
use crate::render::{Block, elements_to_html, layout_body};
use crate::search::{SearchResult, error_count, normalize_query};

const DEFAULT_STYLE: &str = include_str!("../../resources/style.css");

/// Query string as ordered pairs, so a repeated key is not a rejection
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct QueryPairs(Vec<(String, String)>);

impl QueryPairs {
    /// First value given for `key`
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Both editor forms post here; `action=save_full` selects the replace form
#[derive(Debug, Default, Deserialize)]
pub struct EditorForm {
    pub action: Option<String>,
    #[serde(rename = "fullContent")]
    pub full_content: Option<String>,
    #[serde(rename = "appName")]
    pub app_name: Option<String>,
    #[serde(rename = "appSteps")]
    pub app_steps: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchItem>,
    pub count: usize,
    pub query: String,
}

/// Wire shape of one search result
#[derive(Debug, Serialize)]
pub struct SearchItem {
    pub app: String,
    pub slug: String,
    pub summary: String,
    pub snippet: String,
    pub errors: usize,
    pub matched: bool,
}

impl From<SearchResult> for SearchItem {
    fn from(result: SearchResult) -> Self {
        Self {
            slug: result.slug(),
            app: result.label,
            summary: result.summary,
            snippet: result.snippet,
            errors: result.error_count,
            matched: result.matched,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SectionEntry {
    pub slug: String,
    pub name: String,
    pub errors: usize,
}

#[derive(Debug, Serialize)]
pub struct SectionBlocks {
    pub slug: String,
    pub name: String,
    pub blocks: Vec<Block>,
}

/// `GET /` and `/index.html`
pub async fn index(State(backend): State<Backend>, Query(params): Query<QueryPairs>) -> Html<String> {
    let mut guide = backend.guide.lock().await;
    let document = guide.document();

    let views: Vec<SectionView> = document
        .sections
        .iter()
        .map(|section| SectionView {
            slug: section.slug(),
            name: section.name.clone(),
            error_count: error_count(&section.body),
            html: elements_to_html(&layout_body(&section.body)),
        })
        .collect();

    let last_updated = guide.last_modified().map(page::format_timestamp);

    Html(page::index_page(
        &views,
        last_updated.as_deref(),
        params.first("msg"),
    ))
}

/// `GET /editor`
pub async fn editor(State(backend): State<Backend>) -> Html<String> {
    let guide = backend.guide.lock().await;
    Html(page::editor_page(&guide.raw_text()))
}

/// `POST /editor`
pub async fn save(State(backend): State<Backend>, Form(form): Form<EditorForm>) -> Response {
    let mut guide = backend.guide.lock().await;

    if form.action.as_deref() == Some("save_full") {
        let text = form.full_content.unwrap_or_default();
        return match guide.replace_all(&text) {
            Ok(()) => redirect_with_message("Content saved successfully"),
            Err(e) => internal_error(&e),
        };
    }

    let name = form.app_name.unwrap_or_default();
    let steps = form.app_steps.unwrap_or_default();

    match guide.append_section(&name, &steps) {
        Ok(()) => redirect_with_message(&format!("Added: {}", name.trim())),
        Err(StoreError::Validation(message)) => redirect_with_message(&message),
        Err(e) => internal_error(&e),
    }
}

/// `GET /api/search?q=`
pub async fn search(
    State(backend): State<Backend>,
    Query(params): Query<QueryPairs>,
) -> Json<SearchResponse> {
    let query = normalize_query(params.first("q").unwrap_or_default());
    let results: Vec<SearchItem> = backend
        .guide
        .lock()
        .await
        .search(&query)
        .into_iter()
        .map(SearchItem::from)
        .collect();

    Json(SearchResponse {
        count: results.len(),
        results,
        query,
    })
}

/// `GET /api/sections`
pub async fn sections(State(backend): State<Backend>) -> Json<Vec<SectionEntry>> {
    let document = backend.guide.lock().await.document();

    Json(
        document
            .sections
            .iter()
            .map(|section| SectionEntry {
                slug: section.slug(),
                name: section.name.clone(),
                errors: error_count(&section.body),
            })
            .collect(),
    )
}

/// `GET /api/sections/{id}`
pub async fn section(
    State(backend): State<Backend>,
    Path(id): Path<String>,
) -> Result<Json<SectionBlocks>, StatusCode> {
    let ordinal = Guide::resolve(&id).ok_or(StatusCode::NOT_FOUND)?;
    let mut guide = backend.guide.lock().await;
    let section = guide.section(ordinal).ok_or(StatusCode::NOT_FOUND)?;
    let blocks = guide.render_section(ordinal).unwrap_or_default();

    Ok(Json(SectionBlocks {
        slug: section.slug(),
        name: section.name,
        blocks,
    }))
}

/// `GET /style.css`: the configured stylesheet, else the built-in one
pub async fn style(State(backend): State<Backend>) -> Response {
    let css = match tokio::fs::read_to_string(&backend.config.style_path).await {
        Ok(css) => css,
        Err(_) => DEFAULT_STYLE.to_string(),
    };

    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], css).into_response()
}

pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

fn redirect_with_message(message: &str) -> Response {
    let target = match serde_urlencoded::to_string([("msg", message)]) {
        Ok(query) => format!("/?{query}"),
        Err(e) => {
            log::warn!("Could not encode redirect message {:?}: {}", message, e);
            "/".to_string()
        }
    };
    Redirect::to(&target).into_response()
}

fn internal_error(error: &StoreError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        format!("Error: {error}"),
    )
        .into_response()
}
