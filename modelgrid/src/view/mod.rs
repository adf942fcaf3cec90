//! Model-bound request handling
//!
//! [`ModelView`] is the RESTful view bound to one model type: it owns
//! the seven CRUD operations and the representation negotiation between
//! full HTML pages, bare fragments for partial (htmx/XHR) requests, and
//! JSON. Handlers reach it through the object-safe [`ModelAdmin`] trait
//! held in the state registry.

use std::marker::PhantomData;

use askama::Template;
use async_trait::async_trait;
use axum::http::header;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use serde_json::{Map, Value};

use crate::error::{AdminError, AdminResult};
use crate::forms::{FieldSet, FormData};
use crate::grid::Grid;
use crate::model::{AdminModel, ModelId};
use crate::page::Page;
use crate::session::Session;
use crate::state::AdminState;
use crate::template::{Crumb, FormPage, ListingPage};

/// Requested representation.
///
/// The original request names a format explicitly or falls back to the
/// `Accept` header. Formats without a renderer fail Not-Found when the
/// response is produced, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderFormat {
    /// Full HTML page (or fragment, for partial requests)
    Html,
    /// JSON payload
    Json,
    /// A declared format this layer has no renderer for
    Other(String),
}

impl RenderFormat {
    /// Negotiate from the `format` query parameter and `Accept` header.
    #[must_use]
    pub fn parse(format: Option<&str>, headers: &HeaderMap) -> Self {
        match format {
            Some("html") => Self::Html,
            Some("json") => Self::Json,
            Some(other) => Self::Other(other.to_string()),
            None => {
                let accepts_json = headers
                    .get(header::ACCEPT)
                    .and_then(|value| value.to_str().ok())
                    .is_some_and(|accept| accept.contains("application/json"));
                if accepts_json {
                    Self::Json
                } else {
                    Self::Html
                }
            }
        }
    }

    /// Whether JSON was requested.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    /// Whether HTML was requested.
    #[must_use]
    pub const fn is_html(&self) -> bool {
        matches!(self, Self::Html)
    }
}

/// Per-request rendering inputs, extracted once by the handlers.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Negotiated representation
    pub format: RenderFormat,
    /// Bare-fragment (htmx/XHR) request
    pub partial: bool,
    /// 1-based listing page number
    pub page: u64,
    /// Narrow a partial to one named field
    pub field: Option<String>,
    /// Row objects carry a `cell` array instead of a field map
    pub cells: bool,
    /// Redirect override for successful creates
    pub next: Option<String>,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self {
            format: RenderFormat::Html,
            partial: false,
            page: 1,
            field: None,
            cells: false,
            next: None,
        }
    }
}

/// Which form a render call is producing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormAction {
    New,
    Edit,
    Show,
}

impl FormAction {
    const fn label(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Edit => "edit",
            Self::Show => "show",
        }
    }
}

/// Decode a submission body: JSON object for JSON requests,
/// form-encoded otherwise. Values bind as their raw text either way.
///
/// # Errors
///
/// [`AdminError::BadRequest`] when the body does not decode.
pub fn parse_submission(content_type: Option<&str>, body: &[u8]) -> AdminResult<FormData> {
    let is_json = content_type.is_some_and(|ct| ct.contains("application/json"));
    if is_json {
        let object: Map<String, Value> = serde_json::from_slice(body)
            .map_err(|error| AdminError::BadRequest(format!("malformed JSON body: {error}")))?;
        Ok(object
            .into_iter()
            .filter_map(|(name, value)| match value {
                Value::Null => None,
                Value::String(text) => Some((name, text)),
                other => Some((name, other.to_string())),
            })
            .collect())
    } else {
        if body.is_empty() {
            return Ok(FormData::new());
        }
        let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
            .map_err(|error| AdminError::BadRequest(format!("malformed form body: {error}")))?;
        Ok(pairs.into_iter().collect())
    }
}

/// The empty 200 returned to partial requests after a successful write.
#[must_use]
pub(crate) fn empty_fragment() -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        String::new(),
    )
        .into_response()
}

/// Object-safe surface of a [`ModelView`], held in the state registry.
#[async_trait]
pub trait ModelAdmin: Send + Sync + 'static {
    /// Name the admin is registered under.
    fn model_name(&self) -> &'static str;

    /// Paginated grid over all records.
    async fn listing(&self, state: &AdminState, ctx: &RequestContext) -> AdminResult<Response>;

    /// One record, read-only.
    async fn show(
        &self,
        state: &AdminState,
        ctx: &RequestContext,
        id: &ModelId,
    ) -> AdminResult<Response>;

    /// Unbound add form.
    async fn new_form(&self, state: &AdminState, ctx: &RequestContext) -> AdminResult<Response>;

    /// Validate and persist a new record.
    async fn create(
        &self,
        state: &AdminState,
        ctx: &RequestContext,
        data: FormData,
    ) -> AdminResult<Response>;

    /// Edit form bound to one record.
    async fn edit(
        &self,
        state: &AdminState,
        ctx: &RequestContext,
        id: &ModelId,
    ) -> AdminResult<Response>;

    /// Validate and persist changes to one record.
    async fn update(
        &self,
        state: &AdminState,
        ctx: &RequestContext,
        id: &ModelId,
        data: FormData,
    ) -> AdminResult<Response>;

    /// Delete one record.
    async fn delete(
        &self,
        state: &AdminState,
        ctx: &RequestContext,
        id: &ModelId,
    ) -> AdminResult<Response>;
}

/// A RESTful view bound to a model type and its session.
pub struct ModelView<M, S> {
    session: S,
    _model: PhantomData<fn() -> M>,
}

impl<M, S> ModelView<M, S>
where
    M: AdminModel,
    S: Session<M>,
{
    /// Bind a session to the model type.
    pub const fn new(session: S) -> Self {
        Self {
            session,
            _model: PhantomData,
        }
    }

    /// The record for `id`, or Not-Found.
    async fn fetch(&self, id: &ModelId) -> AdminResult<M> {
        self.session
            .get(id)
            .await?
            .ok_or_else(|| AdminError::not_found(format!("{} {id}", M::model_name())))
    }

    /// Breadcrumb trail: root, collection, and the instance when one is
    /// addressed. Instances are labeled by their display string when
    /// the model has one, else by the id.
    fn breadcrumb(&self, state: &AdminState, instance: Option<(&ModelId, Option<String>)>) -> Vec<Crumb> {
        let urls = state.urls();
        let mut crumbs = vec![Crumb::new(urls.root(), state.translate("root"), "root_url")];
        crumbs.push(Crumb::new(
            urls.collection(M::model_name()),
            M::model_name(),
            "model_url",
        ));
        if let Some((id, display)) = instance {
            let label = display.unwrap_or_else(|| id.to_string());
            crumbs.push(Crumb::new(urls.item(M::model_name(), id), label, "instance_url"));
        }
        crumbs
    }

    /// Item JSON payload: `fields` map, `item_url` when the record has a
    /// key, `errors` when validation failed, plus caller extras (the
    /// update status marker).
    fn json_item(&self, state: &AdminState, fs: &FieldSet<M>, extra: Map<String, Value>) -> Response {
        let mut data = Map::new();
        data.insert("fields".to_string(), Value::Object(fs.jsonify()));
        if let Some(pk) = fs.model().pk() {
            data.insert(
                "item_url".to_string(),
                Value::from(state.urls().item(M::model_name(), &pk)),
            );
        }
        if !fs.errors().is_empty() {
            data.insert(
                "errors".to_string(),
                serde_json::to_value(fs.errors()).unwrap_or(Value::Null),
            );
        }
        data.extend(extra);
        Json(Value::Object(data)).into_response()
    }

    /// Bare-fragment rendering: the whole field set, or one named field.
    fn render_partial(&self, ctx: &RequestContext, fs: &FieldSet<M>) -> AdminResult<Response> {
        if let Some(field) = &ctx.field {
            let html = fs
                .render_field(field)
                .ok_or_else(|| AdminError::not_found(format!("field {field}")))?;
            return Ok(Html(html).into_response());
        }
        Ok(Html(fs.render()).into_response())
    }

    /// The single render entry point for form-shaped responses.
    /// Partial requests short-circuit to fragments; otherwise the
    /// negotiated format picks the renderer, and a format without one
    /// fails Not-Found.
    fn render_form(
        &self,
        state: &AdminState,
        ctx: &RequestContext,
        fs: &FieldSet<M>,
        action: FormAction,
        id: Option<&ModelId>,
        extra: Map<String, Value>,
    ) -> AdminResult<Response> {
        if ctx.partial {
            return self.render_partial(ctx, fs);
        }
        match &ctx.format {
            RenderFormat::Json => Ok(self.json_item(state, fs, extra)),
            RenderFormat::Html => {
                let urls = state.urls();
                let instance = id.map(|id| (id, fs.model().display()));
                let action_url = id.map_or_else(
                    || urls.collection(M::model_name()),
                    |id| urls.item(M::model_name(), id),
                );
                let page = FormPage {
                    site_title: state.config().site_title.clone(),
                    crumbs: self.breadcrumb(state, instance),
                    heading: format!("{} {}", state.translate(action.label()), M::model_name()),
                    action_url,
                    submit_label: state.translate("save"),
                    readonly: fs.is_readonly(),
                    form: fs.render(),
                };
                Ok(Html(page.render()?).into_response())
            }
            RenderFormat::Other(other) => {
                Err(AdminError::not_found(format!("no renderer for format {other}")))
            }
        }
    }

    async fn listing_response(
        &self,
        state: &AdminState,
        ctx: &RequestContext,
    ) -> AdminResult<Response> {
        let size = state.config().page_size;
        let number = ctx.page.max(1);
        let total = self.session.count().await?;
        let items = self
            .session
            .page(Page::<M>::offset(number, size), size)
            .await?;
        let page = Page::new(items, number, size, total);

        let mut grid = Grid::for_model::<M>();
        grid.decorate();

        if ctx.partial {
            return Ok(Html(grid.render(page.items(), state.urls(), state.translator())).into_response());
        }
        match &ctx.format {
            RenderFormat::Json => {
                let rows: Vec<Value> = page
                    .items()
                    .iter()
                    .map(|item| grid.row_json(item, state.urls(), ctx.cells))
                    .collect();
                let records = rows.len();
                Ok(Json(serde_json::json!({
                    "rows": rows,
                    "records": records,
                    "total": page.page_count(),
                    "page": page.number(),
                }))
                .into_response())
            }
            RenderFormat::Html => {
                let urls = state.urls();
                let template = ListingPage {
                    site_title: state.config().site_title.clone(),
                    crumbs: self.breadcrumb(state, None),
                    model_name: M::model_name().to_string(),
                    new_url: urls.new_form(M::model_name()),
                    new_label: state.translate("new"),
                    grid: grid.render(page.items(), urls, state.translator()),
                    pager: page.pager(&urls.collection(M::model_name())),
                };
                Ok(Html(template.render()?).into_response())
            }
            RenderFormat::Other(other) => {
                Err(AdminError::not_found(format!("no renderer for format {other}")))
            }
        }
    }

    async fn create_response(
        &self,
        state: &AdminState,
        ctx: &RequestContext,
        data: FormData,
    ) -> AdminResult<Response> {
        let mut fs = FieldSet::<M>::unbound().without_readonly();
        let next = data.get("next").cloned().or_else(|| ctx.next.clone());
        fs.bind_data(&data);

        if fs.validate() {
            let mut model = fs.model().clone();
            self.session.add(&mut model).await?;
            self.session.flush().await?;
            tracing::info!(model = M::model_name(), id = ?model.pk(), "record created");

            if ctx.partial && ctx.format.is_html() {
                return Ok(empty_fragment());
            }
            match &ctx.format {
                RenderFormat::Html => {
                    let location =
                        next.unwrap_or_else(|| state.urls().collection(M::model_name()));
                    Ok(Redirect::to(&location).into_response())
                }
                RenderFormat::Json => {
                    // Rebind without submitted data so the payload shows
                    // the synced record, assigned key included.
                    let fs = FieldSet::bind(model);
                    Ok(self.json_item(state, &fs, Map::new()))
                }
                RenderFormat::Other(other) => {
                    Err(AdminError::not_found(format!("no renderer for format {other}")))
                }
            }
        } else {
            tracing::debug!(model = M::model_name(), "create validation failed");
            self.render_form(state, ctx, &fs, FormAction::New, None, Map::new())
        }
    }

    async fn update_response(
        &self,
        state: &AdminState,
        ctx: &RequestContext,
        id: &ModelId,
        data: FormData,
    ) -> AdminResult<Response> {
        let record = self.fetch(id).await?;
        if data.is_empty() {
            return Err(AdminError::EmptySubmission);
        }
        let mut fs = FieldSet::bind(record);
        fs.bind_data(&data);

        if fs.validate() {
            let model = fs.model().clone();
            self.session.merge(&model).await?;
            self.session.flush().await?;
            tracing::info!(model = M::model_name(), id = %id, "record updated");

            if ctx.partial && ctx.format.is_html() {
                return Ok(empty_fragment());
            }
            match &ctx.format {
                RenderFormat::Html => {
                    let pk = model.pk().unwrap_or_else(|| id.clone());
                    Ok(Redirect::to(&state.urls().item(M::model_name(), &pk)).into_response())
                }
                RenderFormat::Json => {
                    let mut extra = Map::new();
                    extra.insert("status".to_string(), Value::from(0));
                    Ok(self.json_item(state, &fs, extra))
                }
                RenderFormat::Other(other) => {
                    Err(AdminError::not_found(format!("no renderer for format {other}")))
                }
            }
        } else {
            tracing::debug!(model = M::model_name(), id = %id, "update validation failed");
            let mut extra = Map::new();
            extra.insert("status".to_string(), Value::from(1));
            self.render_form(state, ctx, &fs, FormAction::Edit, Some(id), extra)
        }
    }

    async fn delete_response(
        &self,
        state: &AdminState,
        ctx: &RequestContext,
        id: &ModelId,
    ) -> AdminResult<Response> {
        let record = self.fetch(id).await?;
        self.session.delete(&record).await?;
        self.session.flush().await?;
        tracing::info!(model = M::model_name(), id = %id, "record deleted");

        if ctx.partial && ctx.format.is_html() {
            return Ok(empty_fragment());
        }
        match &ctx.format {
            RenderFormat::Html => {
                Ok(Redirect::to(&state.urls().collection(M::model_name())).into_response())
            }
            RenderFormat::Json => {
                Ok(Json(serde_json::json!({ "id": id.to_string() })).into_response())
            }
            RenderFormat::Other(other) => {
                Err(AdminError::not_found(format!("no renderer for format {other}")))
            }
        }
    }
}

#[async_trait]
impl<M, S> ModelAdmin for ModelView<M, S>
where
    M: AdminModel,
    S: Session<M>,
{
    fn model_name(&self) -> &'static str {
        M::model_name()
    }

    async fn listing(&self, state: &AdminState, ctx: &RequestContext) -> AdminResult<Response> {
        self.listing_response(state, ctx).await
    }

    async fn show(
        &self,
        state: &AdminState,
        ctx: &RequestContext,
        id: &ModelId,
    ) -> AdminResult<Response> {
        let record = self.fetch(id).await?;
        let fs = FieldSet::bind(record).readonly();
        self.render_form(state, ctx, &fs, FormAction::Show, Some(id), Map::new())
    }

    async fn new_form(&self, state: &AdminState, ctx: &RequestContext) -> AdminResult<Response> {
        let fs = FieldSet::<M>::unbound().without_readonly();
        self.render_form(state, ctx, &fs, FormAction::New, None, Map::new())
    }

    async fn create(
        &self,
        state: &AdminState,
        ctx: &RequestContext,
        data: FormData,
    ) -> AdminResult<Response> {
        self.create_response(state, ctx, data).await
    }

    async fn edit(
        &self,
        state: &AdminState,
        ctx: &RequestContext,
        id: &ModelId,
    ) -> AdminResult<Response> {
        let record = self.fetch(id).await?;
        let fs = FieldSet::bind(record);
        self.render_form(state, ctx, &fs, FormAction::Edit, Some(id), Map::new())
    }

    async fn update(
        &self,
        state: &AdminState,
        ctx: &RequestContext,
        id: &ModelId,
        data: FormData,
    ) -> AdminResult<Response> {
        self.update_response(state, ctx, id, data).await
    }

    async fn delete(
        &self,
        state: &AdminState,
        ctx: &RequestContext,
        id: &ModelId,
    ) -> AdminResult<Response> {
        self.delete_response(state, ctx, id).await
    }
}
