//! HTTP handlers: the query entry point, preference-cookie management and
//! the health/info endpoints.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::info;

use lib_resolver::{strip_sigil, Action, InfoKind, ResolveError, Resolver};

use crate::config::SepConfig;
use crate::cookie::{self, COOKIE_NAME, ONE_YEAR_SECS};
use crate::pages;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver>,
    pub config: Arc<SepConfig>,
    /// Discovered public address, filled in by a background task.
    pub external_address: Arc<RwLock<Option<String>>>,
}

#[derive(Debug, Deserialize)]
pub struct QueryParams {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetCookieForm {
    pub search_engine_url: Option<String>,
    pub search_engine_custom: Option<String>,
    pub q: Option<String>,
}

/// `GET /` — the proxy entry point.
///
/// Without a preference cookie the user is prompted to choose an engine;
/// without a query the usage page is shown; otherwise the query runs
/// through the resolution pipeline and the resulting action becomes the
/// HTTP response.
pub async fn query(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
    headers: HeaderMap,
) -> Response {
    let preference = cookie::get(&headers, COOKIE_NAME);
    let Some(preference) = preference else {
        return Html(pages::engine_selection_form(
            &state.config.engines,
            params.q.as_deref(),
        ))
        .into_response();
    };

    let Some(query) = params.q.filter(|q| !q.is_empty()) else {
        let external = state.external_address.read().await.clone();
        return Html(pages::usage_page(
            &state.config.example_url(external.as_deref()),
        ))
        .into_response();
    };

    let action = state.resolver.resolve(&query, Some(&preference)).await;
    action_response(action, &state.config)
}

/// Translate a pipeline action into the HTTP response the spec of each
/// action kind calls for.
pub fn action_response(action: Action, config: &SepConfig) -> Response {
    match action {
        Action::Redirect(target) => found(&with_scheme(&target)),
        Action::SearchRedirect(url) => found(&url),
        Action::ExplorerRedirect(subject) => found(&format!(
            "{}{}",
            config.explorer_url,
            strip_sigil(&subject)
        )),
        Action::InfoPage {
            kind: InfoKind::Transfer,
            subject,
        } => Html(pages::transfer_page(&subject, &config.pinning_url)).into_response(),
        Action::InfoPage {
            kind: InfoKind::Bid,
            subject,
        } => Html(pages::bid_page(
            &subject,
            &config.explorer_url,
            &config.pinning_url,
        ))
        .into_response(),
        Action::RawZone(zone) => Json(zone).into_response(),
        Action::Error(ResolveError::MissingPreference) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "search preference cookie is missing"})),
        )
            .into_response(),
        Action::Error(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": err.to_string()})),
        )
            .into_response(),
    }
}

/// `POST /set_search_cookie` — store the chosen engine template and bounce
/// back to the pending query.
pub async fn set_search_cookie(Form(form): Form<SetCookieForm>) -> Response {
    let custom = form
        .search_engine_custom
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let Some(template) = custom.or(form.search_engine_url.as_deref()) else {
        return (
            StatusCode::BAD_REQUEST,
            "Search engine URL (either selected or custom) is required.",
        )
            .into_response();
    };

    info!(template = %template, "search engine preference set");

    let location = match form.q.as_deref().filter(|q| !q.is_empty()) {
        Some(q) => format!("/?q={}", urlencoding::encode(q)),
        None => "/".to_string(),
    };

    let mut response = Redirect::to(&location).into_response();
    if let Ok(value) = cookie::set(COOKIE_NAME, template, ONE_YEAR_SECS).parse() {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}

/// `GET /del_search_cookie` — drop the stored preference.
pub async fn del_search_cookie(headers: HeaderMap) -> Response {
    if cookie::get(&headers, COOKIE_NAME).is_none() {
        return "Search engine preference cookie not found.".into_response();
    }

    let mut response = "Search engine preference cookie deleted.".into_response();
    if let Ok(value) = cookie::clear(COOKIE_NAME).parse() {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}

/// `GET /health` — liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}

/// `GET /info` — proxy metadata.
pub async fn info(State(state): State<AppState>) -> Json<serde_json::Value> {
    let external = state.external_address.read().await.clone();
    Json(json!({
        "version": crate::VERSION,
        "external_address": external,
        "explorer_url": state.config.explorer_url,
    }))
}

/// 302 with a Location header.
fn found(location: &str) -> Response {
    match location.parse() {
        Ok(value) => {
            let mut response = StatusCode::FOUND.into_response();
            response.headers_mut().insert(header::LOCATION, value);
            response
        }
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "resolved target is not a valid header value"})),
        )
            .into_response(),
    }
}

/// Resolved targets may be bare hosts or IPs; browsers need a scheme.
fn with_scheme(target: &str) -> String {
    if target.contains("://") {
        target.to_string()
    } else {
        format!("http://{target}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SepConfig;
    use lib_resolver::Zone;

    fn config() -> SepConfig {
        SepConfig::from_lookup(|_| None)
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .expect("Location header")
            .to_str()
            .unwrap()
    }

    #[test]
    fn redirect_gets_a_scheme_when_missing() {
        let response = action_response(Action::Redirect("10.0.0.5".to_string()), &config());
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "http://10.0.0.5");
    }

    #[test]
    fn redirect_keeps_an_existing_scheme() {
        let response =
            action_response(Action::Redirect("https://10.0.0.1/app".to_string()), &config());
        assert_eq!(location(&response), "https://10.0.0.1/app");
    }

    #[test]
    fn search_redirect_location_is_verbatim() {
        let response =
            action_response(Action::SearchRedirect("https://x/?q=bar".to_string()), &config());
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "https://x/?q=bar");
    }

    #[test]
    fn explorer_redirect_appends_the_unsigiled_name() {
        let response = action_response(Action::ExplorerRedirect("@foo".to_string()), &config());
        assert_eq!(
            location(&response),
            "https://explorer.spacesprotocol.org/space/foo"
        );
    }

    #[test]
    fn info_pages_render_html() {
        let transfer = action_response(
            Action::InfoPage {
                kind: InfoKind::Transfer,
                subject: "@example".to_string(),
            },
            &config(),
        );
        assert_eq!(transfer.status(), StatusCode::OK);

        let bid = action_response(
            Action::InfoPage {
                kind: InfoKind::Bid,
                subject: "@example".to_string(),
            },
            &config(),
        );
        assert_eq!(bid.status(), StatusCode::OK);
    }

    #[test]
    fn raw_zone_is_echoed_as_json() {
        let response = action_response(Action::RawZone(Zone::default()), &config());
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn errors_become_500() {
        let response = action_response(
            Action::Error(ResolveError::MissingPreference),
            &config(),
        );
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
