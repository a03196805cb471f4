// src/tests/router_tests/agent_tests.rs

use crate::router::{handle, App};
use crate::tests::utils::{body_string, count, post, texts, StubSearch};
use serde_json::json;

const JSON: &str = "application/json";

fn app() -> App<StubSearch> {
    App {
        search: StubSearch::returning(Ok(vec![])),
    }
}

fn render(payload: serde_json::Value) -> String {
    let resp = handle(post("/agent/render", JSON, payload.to_string()), &app()).unwrap();
    assert_eq!(resp.status(), 200);
    body_string(resp)
}

#[test]
fn structured_state_renders_cards_and_success_banner() {
    let html = render(json!({
        "state": {
            "properties": [
                { "address": "1 Main St", "price": 500000 },
                { "address": "2 Side St", "price": "$750,000" },
                { "address": "1 Main St", "price": 510000 }
            ],
            "status": { "state": "complete", "message": "done" }
        },
        "lifecycle": "success"
    }));

    assert_eq!(count(&html, ".agent-panel[data-payload=structured]"), 1);
    assert_eq!(texts(&html, ".property-address"), vec!["1 Main St", "2 Side St"]);
    assert_eq!(texts(&html, ".property-price"), vec!["$510,000", "$750,000"]);
    assert_eq!(
        texts(&html, ".status-headline"),
        vec!["Found 2 properties matching your criteria"]
    );
    assert_eq!(count(&html, ".status-success"), 1);
    assert_eq!(count(&html, ".agent-narrative"), 0);
}

#[test]
fn narrative_with_embedded_array_is_recovered() {
    let outputs = r#"I found these: "properties": [{"address": "3 Hill Rd", "price": 420000}] Let me know!"#;
    let html = render(json!({
        "state": { "outputs": outputs },
        "lifecycle": "executing"
    }));

    assert_eq!(count(&html, ".agent-panel[data-payload=recovered]"), 1);
    assert_eq!(texts(&html, ".property-address"), vec!["3 Hill Rd"]);
    assert_eq!(texts(&html, ".status-headline"), vec!["Searching for properties..."]);
    assert_eq!(count(&html, ".status-pending .spinner"), 1);
}

#[test]
fn plain_narrative_is_shown_verbatim() {
    let html = render(json!({
        "state": {
            "outputs": "No listings match that budget yet.",
            "status": { "state": "analyzing", "progress": 40 }
        }
    }));

    assert_eq!(count(&html, ".agent-panel[data-payload=narrative]"), 1);
    assert_eq!(count(&html, ".property-card"), 0);
    assert_eq!(
        texts(&html, ".agent-narrative pre"),
        vec!["No listings match that budget yet."]
    );
    assert_eq!(
        texts(&html, ".status-headline"),
        vec!["Analyzing environmental risks for each property..."]
    );
    assert_eq!(texts(&html, ".status-detail"), vec!["40% complete"]);
}

#[test]
fn missing_state_renders_initial_banner() {
    let html = render(json!({}));

    assert_eq!(count(&html, ".agent-panel[data-payload=empty]"), 1);
    assert_eq!(texts(&html, ".status-headline"), vec!["Getting ready to search..."]);
    assert_eq!(count(&html, ".status-idle"), 1);
}

#[test]
fn malformed_body_is_bad_request() {
    match handle(post("/agent/render", JSON, "{not json"), &app()) {
        Err(err) => assert_eq!(err.status(), 400),
        Ok(_) => panic!("expected bad request"),
    }
}
