// File: src/handlers.rs
// Purpose: Page, partial and form action handlers

use crate::app::AppState;
use axum::{
    body::Bytes,
    extract::{Path, Query as AxumQuery, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{Html, IntoResponse, Json, Response},
};
use formsample::pages::{
    form_sample_page, manual_form, not_found_page, post_slot, suspense_page, validated_form,
};
use formsample::{
    FetchState, Field, FormData, FormEvent, FormValues, ManualForm, Markup, PageRoute, QueryParams,
    RequestContext, SubmitOutcome, ValidatedForm,
};
use serde_json::json;
use std::collections::HashMap;
use tracing::{debug, info, warn};

type QueryMap = AxumQuery<HashMap<String, String>>;

/// Rejection for bodies that cannot be read as form values
pub struct InvalidBody(String);

impl From<serde_json::Error> for InvalidBody {
    fn from(err: serde_json::Error) -> Self {
        InvalidBody(err.to_string())
    }
}

impl IntoResponse for InvalidBody {
    fn into_response(self) -> Response {
        warn!(error = %self.0, "invalid form body");
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "status": "invalid", "error": self.0 })),
        )
            .into_response()
    }
}

type FormResult = Result<Response, InvalidBody>;

fn create_request_context(
    query_params: HashMap<String, String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<RequestContext, InvalidBody> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    let form = FormData::from_body(content_type, &body)?;

    Ok(RequestContext::new(QueryParams::new(query_params), form, headers))
}

fn form_values(ctx: &RequestContext) -> Result<FormValues, InvalidBody> {
    Ok(FormValues::from_form(&ctx.form)?)
}

/// Whether the request carries the "submit already attempted" marker
fn submit_attempted(ctx: &RequestContext) -> bool {
    ctx.form.get("_submitted").map(String::as_str) == Some("true")
}

/// The field whose change triggered the request, if it is one we know
fn changed_field(ctx: &RequestContext) -> Option<Field> {
    let name = ctx.trigger_name()?;
    let field = Field::from_name(name);
    if field.is_none() {
        warn!(trigger = name, "change from unknown field");
    }
    field
}

/// Fragment for htmx, the whole page otherwise
fn render(ctx: &RequestContext, fragment: Markup, page: impl FnOnce() -> Markup) -> Response {
    if ctx.wants_partial() {
        Html(fragment.into_string()).into_response()
    } else {
        Html(page().into_string()).into_response()
    }
}

fn not_found(path: &str) -> Response {
    (StatusCode::NOT_FOUND, Html(not_found_page(path).into_string())).into_response()
}

fn fresh_validated(state: &AppState) -> ValidatedForm<'static> {
    state.validated_form(FormValues::default())
}

/// GET pages, matched against the route table
pub async fn page(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let path = uri.path();
    match PageRoute::resolve(path, &state.config.routing) {
        Some(PageRoute::Suspense) => {
            let post_id = state.config.fetch.post_id;
            let fetch_state = state.posts.state(&state.post_url(post_id));
            debug!(post_id, pending = fetch_state.is_pending(), "rendering suspense page");
            Html(suspense_page(&fetch_state, post_id).into_string()).into_response()
        }
        Some(PageRoute::FormSample) => {
            let page = form_sample_page(&ManualForm::new(), &fresh_validated(&state));
            Html(page.into_string()).into_response()
        }
        None => not_found(path),
    }
}

/// Suspends on the configured post and renders it in place of the placeholder.
/// Other ids are not served.
pub async fn post_partial(
    State(state): State<AppState>,
    Path(post_id): Path<u32>,
    uri: Uri,
    headers: HeaderMap,
    query: QueryMap,
) -> Response {
    if post_id != state.config.fetch.post_id {
        debug!(post_id, "post partial for unconfigured id");
        return not_found(uri.path());
    }

    let ctx = RequestContext::new(QueryParams::new(query.0), FormData::new(), headers);
    let key = state.post_url(post_id);

    if ctx.query.get("refresh").map(String::as_str) == Some("true") && state.posts.invalidate(&key) {
        debug!(key = %key, "post invalidated");
    }

    let result = state.posts.resolve(&key).await;
    if let Err(err) = &result {
        warn!(key = %key, error = %err, "post fetch failed");
    }

    if ctx.accepts_json() {
        return match result {
            Ok(post) => Json(post).into_response(),
            Err(err) => (StatusCode::BAD_GATEWAY, Json(json!({ "error": err.to_string() })))
                .into_response(),
        };
    }

    Html(post_slot(&FetchState::from(result), post_id).into_string()).into_response()
}

pub async fn manual_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: QueryMap,
    body: Bytes,
) -> FormResult {
    let ctx = create_request_context(query.0, headers, body)?;
    let form = ManualForm::with_values(form_values(&ctx)?);

    let mut event = FormEvent::new();
    let values = form.submit(&mut event);

    if ctx.accepts_json() {
        return Ok(Json(json!({ "status": "logged", "values": values })).into_response());
    }
    Ok(render(&ctx, manual_form(&form), || {
        form_sample_page(&form, &fresh_validated(&state))
    }))
}

/// htmx posts the whole form on change, so the body already holds the new
/// value; the response is a re-render of those values
pub async fn manual_change(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: QueryMap,
    body: Bytes,
) -> FormResult {
    let ctx = create_request_context(query.0, headers, body)?;
    if let Some(field) = changed_field(&ctx) {
        debug!(%field, "manual form field changed");
    }
    let form = ManualForm::with_values(form_values(&ctx)?);

    Ok(render(&ctx, manual_form(&form), || {
        form_sample_page(&form, &fresh_validated(&state))
    }))
}

pub async fn manual_reset(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: QueryMap,
    body: Bytes,
) -> FormResult {
    let ctx = create_request_context(query.0, headers, body)?;
    let mut form = ManualForm::with_values(form_values(&ctx)?);
    form.reset(&mut FormEvent::new());

    Ok(render(&ctx, manual_form(&form), || {
        form_sample_page(&form, &fresh_validated(&state))
    }))
}

pub async fn validated_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: QueryMap,
    body: Bytes,
) -> FormResult {
    let ctx = create_request_context(query.0, headers, body)?;
    let mut form = state.validated_form(form_values(&ctx)?);

    let mut event = FormEvent::new();
    let outcome = form.submit(&mut event, |values| {
        info!(values = ?values, "validated form submitted");
    });

    if ctx.accepts_json() {
        return Ok(match outcome {
            SubmitOutcome::Submitted(values) => {
                Json(json!({ "status": "submitted", "values": values })).into_response()
            }
            SubmitOutcome::Rejected(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "status": "rejected", "errors": errors })),
            )
                .into_response(),
        });
    }
    Ok(render(&ctx, validated_form(&form), || {
        form_sample_page(&ManualForm::new(), &form)
    }))
}

/// Re-render of the posted values; errors follow the change rule of the
/// configured validation mode
pub async fn validated_change(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: QueryMap,
    body: Bytes,
) -> FormResult {
    let ctx = create_request_context(query.0, headers, body)?;
    if let Some(field) = changed_field(&ctx) {
        debug!(%field, "validated form field changed");
    }

    let mut form = state
        .validated_form(form_values(&ctx)?)
        .with_submit_attempted(submit_attempted(&ctx));
    form.refresh();

    if ctx.accepts_json() {
        return Ok(
            Json(json!({ "values": form.values(), "errors": form.errors() })).into_response(),
        );
    }
    Ok(render(&ctx, validated_form(&form), || {
        form_sample_page(&ManualForm::new(), &form)
    }))
}

pub async fn validated_reset(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: QueryMap,
    body: Bytes,
) -> FormResult {
    let ctx = create_request_context(query.0, headers, body)?;
    let mut form = state
        .validated_form(form_values(&ctx)?)
        .with_submit_attempted(submit_attempted(&ctx));
    form.reset(&mut FormEvent::new());

    Ok(render(&ctx, validated_form(&form), || {
        form_sample_page(&ManualForm::new(), &form)
    }))
}
