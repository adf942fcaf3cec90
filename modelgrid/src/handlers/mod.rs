//! HTTP handlers and router assembly
//!
//! Thin axum glue: extract the request context, resolve the `{model}`
//! segment through the state registry, delegate to the model's
//! [`crate::view::ModelAdmin`], and let [`crate::error::AdminError`]
//! map failures onto status codes.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use axum_htmx::HxRequest;
use serde::Deserialize;
use serde_json::{Map, Value};
use tower_http::trace::TraceLayer;

use crate::error::{AdminError, AdminResult};
use crate::model::ModelId;
use crate::state::AdminState;
use crate::template::{Crumb, ModelLink, ModelsPage};
use crate::view::{parse_submission, RenderFormat, RequestContext};

/// Query parameters every admin route understands.
///
/// `cells` and `partial` are presence flags, matching the grid-widget
/// convention of the original surface.
#[derive(Debug, Default, Deserialize)]
pub struct AdminQuery {
    /// Explicit representation (`html`, `json`, ...)
    pub format: Option<String>,
    /// 1-based listing page
    pub page: Option<u64>,
    /// Narrow a partial to one field
    pub field: Option<String>,
    /// Row objects carry a `cell` array
    pub cells: Option<String>,
    /// Force the bare-fragment path without the htmx header
    pub partial: Option<String>,
    /// Redirect override for successful creates
    pub next: Option<String>,
}

fn context(query: &AdminQuery, htmx: bool, headers: &HeaderMap) -> RequestContext {
    RequestContext {
        format: RenderFormat::parse(query.format.as_deref(), headers),
        partial: htmx || query.partial.is_some(),
        page: query.page.unwrap_or(1),
        field: query.field.clone(),
        cells: query.cells.is_some(),
        next: query.next.clone(),
    }
}

fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
}

/// Index of registered models.
pub async fn models_index(
    State(state): State<AdminState>,
    Query(query): Query<AdminQuery>,
    HxRequest(htmx): HxRequest,
    headers: HeaderMap,
) -> AdminResult<Response> {
    let ctx = context(&query, htmx, &headers);
    let urls = state.urls();
    let models: Vec<ModelLink> = state
        .model_names()
        .map(|name| ModelLink {
            name: name.to_string(),
            url: urls.collection(name),
        })
        .collect();

    if ctx.partial {
        let items: String = models
            .iter()
            .map(|model| format!("<li><a href=\"{}\">{}</a></li>\n", model.url, model.name))
            .collect();
        return Ok(Html(format!("<ul class=\"models\">\n{items}</ul>")).into_response());
    }
    match &ctx.format {
        RenderFormat::Json => {
            let map: Map<String, Value> = models
                .into_iter()
                .map(|model| (model.name, Value::from(model.url)))
                .collect();
            Ok(Json(serde_json::json!({ "models": map })).into_response())
        }
        RenderFormat::Html => {
            let page = ModelsPage {
                site_title: state.config().site_title.clone(),
                crumbs: vec![Crumb::new(urls.root(), state.translate("root"), "root_url")],
                models,
            };
            Ok(Html(askama::Template::render(&page)?).into_response())
        }
        RenderFormat::Other(other) => {
            Err(AdminError::not_found(format!("no renderer for format {other}")))
        }
    }
}

/// Paginated listing of one model.
pub async fn listing(
    State(state): State<AdminState>,
    Path(model): Path<String>,
    Query(query): Query<AdminQuery>,
    HxRequest(htmx): HxRequest,
    headers: HeaderMap,
) -> AdminResult<Response> {
    let ctx = context(&query, htmx, &headers);
    tracing::debug!(model = %model, page = ctx.page, "listing requested");
    state.admin(&model)?.listing(&state, &ctx).await
}

/// One record, read-only.
pub async fn show(
    State(state): State<AdminState>,
    Path((model, id)): Path<(String, String)>,
    Query(query): Query<AdminQuery>,
    HxRequest(htmx): HxRequest,
    headers: HeaderMap,
) -> AdminResult<Response> {
    let ctx = context(&query, htmx, &headers);
    let id = ModelId::from(id);
    state.admin(&model)?.show(&state, &ctx, &id).await
}

/// Unbound add form.
pub async fn new_form(
    State(state): State<AdminState>,
    Path(model): Path<String>,
    Query(query): Query<AdminQuery>,
    HxRequest(htmx): HxRequest,
    headers: HeaderMap,
) -> AdminResult<Response> {
    let ctx = context(&query, htmx, &headers);
    state.admin(&model)?.new_form(&state, &ctx).await
}

/// Create a record from a form-encoded or JSON submission.
pub async fn create(
    State(state): State<AdminState>,
    Path(model): Path<String>,
    Query(query): Query<AdminQuery>,
    HxRequest(htmx): HxRequest,
    headers: HeaderMap,
    body: Bytes,
) -> AdminResult<Response> {
    let ctx = context(&query, htmx, &headers);
    let data = parse_submission(content_type(&headers), &body)?;
    tracing::debug!(model = %model, fields = data.len(), "create submitted");
    state.admin(&model)?.create(&state, &ctx, data).await
}

/// Edit form bound to one record.
pub async fn edit(
    State(state): State<AdminState>,
    Path((model, id)): Path<(String, String)>,
    Query(query): Query<AdminQuery>,
    HxRequest(htmx): HxRequest,
    headers: HeaderMap,
) -> AdminResult<Response> {
    let ctx = context(&query, htmx, &headers);
    let id = ModelId::from(id);
    state.admin(&model)?.edit(&state, &ctx, &id).await
}

/// Update one record from a submission.
pub async fn update(
    State(state): State<AdminState>,
    Path((model, id)): Path<(String, String)>,
    Query(query): Query<AdminQuery>,
    HxRequest(htmx): HxRequest,
    headers: HeaderMap,
    body: Bytes,
) -> AdminResult<Response> {
    let ctx = context(&query, htmx, &headers);
    let id = ModelId::from(id);
    let data = parse_submission(content_type(&headers), &body)?;
    tracing::debug!(model = %model, id = %id, fields = data.len(), "update submitted");
    state.admin(&model)?.update(&state, &ctx, &id, data).await
}

/// Delete one record.
pub async fn destroy(
    State(state): State<AdminState>,
    Path((model, id)): Path<(String, String)>,
    Query(query): Query<AdminQuery>,
    HxRequest(htmx): HxRequest,
    headers: HeaderMap,
) -> AdminResult<Response> {
    let ctx = context(&query, htmx, &headers);
    let id = ModelId::from(id);
    state.admin(&model)?.delete(&state, &ctx, &id).await
}

/// Build the admin router.
///
/// The router is rooted at `/`; mount it under the configured
/// `root_path` so generated URLs line up:
///
/// ```rust,ignore
/// let app = Router::new().nest(&config.root_path, modelgrid::handlers::router(state));
/// ```
#[must_use]
pub fn router(state: AdminState) -> Router {
    Router::new()
        .route("/", get(models_index))
        .route("/{model}", get(listing).post(create).put(create))
        .route("/{model}/new", get(new_form))
        .route(
            "/{model}/{id}",
            get(show).post(update).put(update).delete(destroy),
        )
        .route("/{model}/{id}/edit", get(edit))
        .route("/{model}/{id}/delete", axum::routing::post(destroy))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
