use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

#[test]
fn split_input_list_handles_whitespace_and_commas() {
    let items = split_input_list("B000000001, B000000002\nB000000003\tB000000004");
    assert_eq!(
        items,
        vec!["B000000001", "B000000002", "B000000003", "B000000004"]
    );
}

#[test]
fn split_input_list_drops_empty_entries() {
    assert_eq!(split_input_list(" , ,\n"), Vec::<String>::new());
    assert_eq!(split_input_list("B000000001,,B000000002"), vec![
        "B000000001",
        "B000000002"
    ]);
}

fn test_client(server: &MockServer) -> ProxyClient {
    ProxyClient::new(5, 0, 0)
        .unwrap()
        .with_endpoints(
            &format!("{}/v1/", server.uri()),
            &format!("{}/headers", server.uri()),
            "us",
        )
}

#[tokio::test]
async fn run_batch_yields_one_record_per_input() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<html><span id="productTitle">Thing</span></html>"#),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/headers"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let cancel = Arc::new(AtomicBool::new(false));
    let (tx, mut rx) = mpsc::unbounded_channel();

    // The malformed identifier still produces a record, not a missing row.
    let items: Vec<String> = vec![
        "B000000001".to_string(),
        "not-an-asin".to_string(),
        "B000000003".to_string(),
    ];
    let records = run_batch(&client, &items, None, "test-key", 2, &cancel, &tx).await;
    drop(tx);

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].asin, "B000000001");
    assert_eq!(records[0].title, "Thing");
    assert!(records[1].is_error_fallback());
    assert_eq!(records[1].asin, "not-an-asin");
    assert_eq!(records[2].asin, "B000000003");

    let mut statuses = Vec::new();
    while let Some(event) = rx.recv().await {
        statuses.push((event.identifier, event.status));
    }
    assert_eq!(statuses.len(), 3);
    assert!(statuses
        .iter()
        .any(|(id, status)| id == "not-an-asin" && *status == ItemStatus::Failed));
    assert!(statuses
        .iter()
        .any(|(id, status)| id == "B000000001" && *status == ItemStatus::Succeeded));
}

#[tokio::test]
async fn cancellation_stops_at_the_group_boundary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let cancel = Arc::new(AtomicBool::new(true));
    let (tx, _rx) = mpsc::unbounded_channel();

    let items: Vec<String> = vec!["B000000001".to_string(), "B000000002".to_string()];
    let records = run_batch(&client, &items, None, "test-key", 1, &cancel, &tx).await;
    assert!(records.is_empty(), "pre-cancelled run processes no group");
}
