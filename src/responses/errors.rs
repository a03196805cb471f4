use crate::errors::ServerError;
use crate::templates::pages::error_page;
use astra::{Body, Response, ResponseBuilder};

pub type ResultResp = Result<Response, ServerError>;

/// Convert a ServerError into an HTML error page.
pub fn error_response(err: &ServerError) -> Response {
    let status = err.status();
    let page = error_page(status, &err.to_string());

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(page.into_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
