// src/tests/router_tests/search_tests.rs

use crate::domain::PropertyRecord;
use crate::router::{handle, App};
use crate::search::{SearchClient, SearchError};
use crate::tests::utils::{body_string, count, get, post, serve_once, texts, StubSearch};
use std::time::Duration;

const FORM: &str = "application/x-www-form-urlencoded";

fn main_st() -> PropertyRecord {
    PropertyRecord {
        address: "1 Main St".into(),
        price: 500000.0,
        bedrooms: 3,
        bathrooms: 2,
        sqft: 1800.0,
        ..PropertyRecord::default()
    }
}

#[test]
fn home_renders_empty_search_form() {
    let app = App {
        search: StubSearch::returning(Ok(vec![])),
    };

    let resp = handle(get("/"), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let html = body_string(resp);
    assert_eq!(count(&html, "form.search-form textarea[name=query]"), 1);
    assert_eq!(count(&html, ".property-card"), 0);
    assert_eq!(count(&html, ".error-message"), 0);
    assert!(app.search.queries.borrow().is_empty());
}

#[test]
fn search_renders_one_card_per_property() {
    let app = App {
        search: StubSearch::returning(Ok(vec![main_st()])),
    };

    let resp = handle(post("/search", FORM, "query=3+bedrooms+in+Seattle"), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let html = body_string(resp);
    assert_eq!(count(&html, "li.property-card"), 1);
    assert_eq!(texts(&html, ".property-address"), vec!["1 Main St"]);
    assert_eq!(texts(&html, ".property-price"), vec!["$500,000"]);
    assert_eq!(texts(&html, ".risk-badge"), vec!["N/A"]);
    assert_eq!(*app.search.queries.borrow(), vec!["3 bedrooms in Seattle"]);
}

#[test]
fn search_keeps_query_in_textarea() {
    let app = App {
        search: StubSearch::returning(Ok(vec![])),
    };

    let html = body_string(handle(post("/search", FORM, "query=condos"), &app).unwrap());

    assert_eq!(texts(&html, "textarea[name=query]"), vec!["condos"]);
    assert_eq!(count(&html, ".notice-empty"), 1);
}

#[test]
fn blank_query_is_rejected_without_calling_backend() {
    let app = App {
        search: StubSearch::returning(Ok(vec![main_st()])),
    };

    let resp = handle(post("/search", FORM, "query=+++"), &app).unwrap();
    assert_eq!(resp.status(), 400);

    let html = body_string(resp);
    assert_eq!(
        texts(&html, ".error-message"),
        vec!["Please enter a query to search for properties."]
    );
    assert!(app.search.queries.borrow().is_empty());
}

#[test]
fn backend_failure_is_shown_to_user() {
    let app = App {
        search: StubSearch::returning(Err(SearchError::Network("connection refused".into()))),
    };

    let resp = handle(post("/search", FORM, "query=houses"), &app).unwrap();
    assert_eq!(resp.status(), 502);

    let html = body_string(resp);
    assert_eq!(count(&html, ".property-card"), 0);
    assert!(html.contains("connection refused"));
}

#[test]
fn search_round_trips_through_http_backend() {
    let (url, server) = serve_once(
        "200 OK",
        r#"{"properties":[{"address":"1 Main St","price":"$500,000","bedrooms":3,"environmental_risks":{"flood":{"level":"High","score":8}}}]}"#,
    );
    let app = App {
        search: SearchClient::new(url, Duration::from_secs(5)).unwrap(),
    };

    let resp = handle(post("/search", FORM, "query=near+the+river"), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let html = body_string(resp);
    assert_eq!(count(&html, "li.property-card"), 1);
    assert_eq!(texts(&html, ".property-price"), vec!["$500,000"]);
    assert_eq!(texts(&html, ".risk-badge"), vec!["HIGH"]);

    let sent: serde_json::Value = serde_json::from_str(&server.join().unwrap()).unwrap();
    assert_eq!(sent, serde_json::json!({ "query": "near the river" }));
}

#[test]
fn http_error_body_reaches_the_page() {
    let (url, server) = serve_once("500 Internal Server Error", "server error");
    let app = App {
        search: SearchClient::new(url, Duration::from_secs(5)).unwrap(),
    };

    let resp = handle(post("/search", FORM, "query=anything"), &app).unwrap();
    assert_eq!(resp.status(), 502);

    let html = body_string(resp);
    assert_eq!(count(&html, ".property-card"), 0);
    let errors = texts(&html, ".error-message");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("Status: 500"));
    assert!(errors[0].contains("server error"));

    server.join().unwrap();
}

#[test]
fn unknown_route_is_not_found() {
    let app = App {
        search: StubSearch::returning(Ok(vec![])),
    };

    match handle(get("/dashboard"), &app) {
        Err(err) => assert_eq!(err.status(), 404),
        Ok(_) => panic!("expected 404"),
    }
}
