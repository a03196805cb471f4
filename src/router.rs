use crate::agent::{ingest, project_state};
use crate::domain::LifecycleSignal;
use crate::errors::ServerError;
use crate::responses::{html_response, html_response_with_status, ResultResp};
use crate::search::{PropertySearch, SearchError};
use crate::templates::pages::{agent_panel, search_page, SearchOutcome, SearchVm};
use astra::Request;
use serde::Deserialize;
use serde_json::Value;
use std::io::Read;

/// Shared, read-only state handed to every request.
pub struct App<S> {
    pub search: S,
}

/// Body of `POST /agent/render`.
#[derive(Debug, Deserialize)]
struct AgentRenderRequest {
    #[serde(default)]
    state: Value,
    #[serde(default)]
    lifecycle: LifecycleSignal,
}

pub fn handle<S: PropertySearch>(mut req: Request, app: &App<S>) -> ResultResp {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();

    tracing::debug!(%method, %path, "request");

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => html_response(search_page(&SearchVm::default())),
        ("POST", "/search") => {
            let body = read_body(&mut req)?;
            search(&body, app)
        }
        ("POST", "/agent/render") => {
            let body = read_body(&mut req)?;
            render_agent(&body)
        }
        _ => Err(ServerError::NotFound),
    }
}

fn search<S: PropertySearch>(body: &[u8], app: &App<S>) -> ResultResp {
    let query = form_field(body, "query").unwrap_or_default();
    let query = query.trim().to_string();

    if query.is_empty() {
        let vm = SearchVm {
            query,
            outcome: SearchOutcome::Failed("Please enter a query to search for properties.".into()),
        };
        return html_response_with_status(400, search_page(&vm));
    }

    let (status, outcome) = match app.search.search(&query) {
        Ok(properties) => (200, SearchOutcome::Found(properties)),
        Err(err) => {
            tracing::error!(error = %err, "property search failed");
            let status = match err {
                SearchError::Config(_) => 500,
                _ => 502,
            };
            (status, SearchOutcome::Failed(err.to_string()))
        }
    };

    html_response_with_status(status, search_page(&SearchVm { query, outcome }))
}

fn render_agent(body: &[u8]) -> ResultResp {
    let request: AgentRenderRequest = serde_json::from_slice(body)
        .map_err(|e| ServerError::BadRequest(format!("invalid agent state payload: {e}")))?;

    let state = ingest(&request.state);
    let status = project_state(&state, request.lifecycle);

    html_response(agent_panel(&state, &status, request.lifecycle))
}

fn read_body(req: &mut Request) -> Result<Vec<u8>, ServerError> {
    let mut bytes = Vec::new();
    req.body_mut()
        .reader()
        .read_to_end(&mut bytes)
        .map_err(|e| ServerError::BadRequest(format!("could not read request body: {e}")))?;
    Ok(bytes)
}

fn form_field(body: &[u8], name: &str) -> Option<String> {
    url::form_urlencoded::parse(body)
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
