// src/tests/utils.rs

use crate::domain::PropertyRecord;
use crate::search::{PropertySearch, SearchError};
use astra::{Body, Request, Response};
use scraper::{Html, Selector};
use std::cell::RefCell;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use url::Url;

/// Canned search backend that records every query it receives.
pub struct StubSearch {
    result: Result<Vec<PropertyRecord>, SearchError>,
    pub queries: RefCell<Vec<String>>,
}

impl StubSearch {
    pub fn returning(result: Result<Vec<PropertyRecord>, SearchError>) -> Self {
        Self {
            result,
            queries: RefCell::new(Vec::new()),
        }
    }
}

impl PropertySearch for StubSearch {
    fn search(&self, query: &str) -> Result<Vec<PropertyRecord>, SearchError> {
        self.queries.borrow_mut().push(query.to_string());
        self.result.clone()
    }
}

pub fn post(path: &str, content_type: &str, body: impl Into<String>) -> Request {
    http::Request::builder()
        .method("POST")
        .uri(path)
        .header("Content-Type", content_type)
        .body(Body::from(body.into()))
        .unwrap()
}

pub fn get(path: &str) -> Request {
    http::Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn count(html: &str, css: &str) -> usize {
    let document = Html::parse_document(html);
    let selector = Selector::parse(css).unwrap();
    document.select(&selector).count()
}

pub fn texts(html: &str, css: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(css).unwrap();
    document
        .select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect()
}

/// Serves exactly one HTTP response on an ephemeral port. The join handle
/// yields the raw request body it received.
pub fn serve_once(status_line: &'static str, body: &'static str) -> (Url, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(&stream);

        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap();
                }
            }
        }

        let mut request_body = vec![0u8; content_length];
        reader.read_exact(&mut request_body).unwrap();

        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        (&stream).write_all(response.as_bytes()).unwrap();

        String::from_utf8(request_body).unwrap()
    });

    (Url::parse(&format!("http://{addr}/chat")).unwrap(), handle)
}
