mod common;

use common::{init_logging, invalid_key, summary, url_rows, ScriptedClient, TestSink};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use summarizer_engine::{
    fetch_summaries, FetchOutcome, FetchPlan, FieldUpdate, NamedField, Row, ServiceFailureKind,
    Stage,
};

fn plan<'a>(source: &'a NamedField, sentence_count: u8) -> FetchPlan<'a> {
    FetchPlan {
        source,
        destination_field: "Summary",
        api_key: "key-123",
        sentence_count,
    }
}

#[tokio::test]
async fn summaries_map_to_updates_in_row_order() {
    init_logging();
    let rows = vec![
        Row::new("r1").with_field("URL", "a.com"),
        Row::new("r2").with_field("URL", "b.com"),
    ];
    let client = ScriptedClient::new(vec![summary("S1"), summary("S2")]);
    let source = NamedField::new("URL");
    let sink = TestSink::new();

    let outcome = fetch_summaries(&client, &rows, &plan(&source, 7), &sink)
        .await
        .expect("fetch ok");

    assert_eq!(
        outcome,
        FetchOutcome::Updates(vec![
            FieldUpdate::single("r1", "Summary", json!("S1")),
            FieldUpdate::single("r2", "Summary", json!("S2")),
        ])
    );
    let targets: Vec<_> = client.requests().into_iter().map(|r| r.target_url).collect();
    assert_eq!(targets, vec!["a.com", "b.com"]);

    let progress = sink.take();
    assert_eq!(progress.len(), 2);
    assert!(progress.iter().all(|p| p.stage == Stage::Summarizing && p.total == 2));
    assert_eq!(progress[1].done, 2);
}

#[tokio::test]
async fn invalid_key_discards_earlier_rows_and_stops() {
    init_logging();
    let rows = url_rows(5);
    let client = ScriptedClient::new(vec![summary("S1"), summary("S2"), invalid_key()]);
    let source = NamedField::new("URL");
    let sink = TestSink::new();

    let outcome = fetch_summaries(&client, &rows, &plan(&source, 7), &sink)
        .await
        .expect("fetch ok");

    assert_eq!(outcome, FetchOutcome::InvalidApiKey);
    // Rows after the rejection are never requested.
    assert_eq!(client.requests().len(), 3);
}

#[tokio::test]
async fn invalid_key_on_first_row_returns_no_updates() {
    let rows = url_rows(1);
    let client = ScriptedClient::new(vec![invalid_key()]);
    let source = NamedField::new("URL");

    let outcome = fetch_summaries(&client, &rows, &plan(&source, 7), &TestSink::new())
        .await
        .unwrap();

    assert_eq!(outcome, FetchOutcome::InvalidApiKey);
}

#[tokio::test]
async fn no_rows_yields_empty_updates_without_requests() {
    let client = ScriptedClient::echo();
    let source = NamedField::new("URL");

    let outcome = fetch_summaries(&client, &[], &plan(&source, 7), &TestSink::new())
        .await
        .unwrap();

    assert_eq!(outcome, FetchOutcome::Updates(Vec::new()));
    assert!(client.requests().is_empty());
}

#[tokio::test]
async fn requests_carry_key_and_sentence_count() {
    let client = ScriptedClient::echo();
    let source = NamedField::new("URL");

    fetch_summaries(&client, &url_rows(2), &plan(&source, 3), &TestSink::new())
        .await
        .unwrap();

    for request in client.requests() {
        assert_eq!(request.api_key, "key-123");
        assert_eq!(request.sentence_count, 3);
    }
}

#[tokio::test]
async fn missing_content_clears_destination() {
    let rows = vec![Row::new("r1").with_field("URL", "a.com")];
    let client = ScriptedClient::new(vec![Default::default()]);
    let source = NamedField::new("URL");

    let outcome = fetch_summaries(&client, &rows, &plan(&source, 7), &TestSink::new())
        .await
        .unwrap();

    assert_eq!(
        outcome,
        FetchOutcome::Updates(vec![FieldUpdate::single("r1", "Summary", Value::Null)])
    );
}

#[tokio::test]
async fn service_failure_aborts_without_partial_results() {
    let client = ScriptedClient::new(vec![summary("S1")]);
    client.push_error(ServiceFailureKind::HttpStatus(502));
    let source = NamedField::new("URL");

    let err = fetch_summaries(&client, &url_rows(4), &plan(&source, 7), &TestSink::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind, ServiceFailureKind::HttpStatus(502));
    assert_eq!(client.requests().len(), 2);
}
