//! HTTP response handlers.

use crate::utils::mime::types::{CSS, HTML, PLAIN};
use anyhow::{Context, Result, anyhow};
use std::{fs, path::Path};
use tiny_http::{Header, Method, Request, Response, StatusCode};

/// Respond with a rendered page.
pub fn respond_html(request: Request, status: u16, body: String) -> Result<()> {
    respond_bytes(request, status, HTML, body.into_bytes())
}

/// Respond with the generated highlight stylesheet.
pub fn respond_css(request: Request, css: &str) -> Result<()> {
    respond_bytes(request, 200, CSS, css.as_bytes().to_vec())
}

/// Respond with a file from disk, typed by its extension.
pub fn respond_file(request: Request, path: &Path) -> Result<()> {
    let content_type = crate::utils::mime::from_path(path);

    if is_head_request(&request) {
        return send_head(request, 200, content_type);
    }

    let body = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    send_body(request, 200, content_type, body)
}

/// Respond with a 404 page.
pub fn respond_not_found(request: Request, body: String) -> Result<()> {
    respond_html(request, 404, body)
}

/// Respond with a 500 page showing the error chain.
pub fn respond_error(request: Request, error: &anyhow::Error) -> Result<()> {
    let error_str = format!("{error:#}");
    let msg = crate::utils::html::escape_body(&error_str);
    let body = format!("<html><body><h1>Render Error</h1><pre>{msg}</pre></body></html>");
    respond_html(request, 500, body)
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(request, 503, PLAIN, b"503 Service Unavailable".to_vec())
}

fn respond_bytes(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    if is_head_request(&request) {
        return send_head(request, status, content_type);
    }
    send_body(request, status, content_type, body)
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(request: Request, status: u16, content_type: &'static str) -> Result<()> {
    let response =
        Response::empty(StatusCode(status)).with_header(make_header("Content-Type", content_type)?);
    request.respond(response)?;
    Ok(())
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type)?);
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &str) -> Result<Header> {
    Header::from_bytes(key, value).map_err(|()| anyhow!("invalid header {key}: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_header() {
        let header = make_header("Content-Type", HTML).unwrap();
        assert!(header.field.equiv("content-type"));
        assert_eq!(header.value.as_str(), HTML);
    }
}
