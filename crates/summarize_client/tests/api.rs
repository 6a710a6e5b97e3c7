use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use summarize_client::{
    ClientSettings, EntrySource, FailureKind, ReqwestApi, SettingsOverrides, SubmitReceipt,
    UrlSubmitter,
};
use summarize_core::EntryStatus;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestApi {
    let overrides = SettingsOverrides {
        server_url: Some(server.uri()),
        ..Default::default()
    };
    let settings = ClientSettings::resolve(&overrides).expect("settings");
    ReqwestApi::new(settings).expect("client")
}

#[tokio::test]
async fn poll_decodes_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/entries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1,
                "name": "City Council Meeting",
                "status": "done",
                "url": "https://youtu.be/abc",
                "transcription": "full text",
                "summary": "short",
                "insertion_date": "Tue, 02 Jan 2024 10:00:00 GMT"
            },
            {
                "id": 2,
                "name": "https://youtu.be/def",
                "status": "downloading",
                "url": "https://youtu.be/def",
                "transcription": null,
                "summary": null,
                "insertion_date": "2024-01-03T08:00:00+00:00"
            }
        ])))
        .mount(&server)
        .await;

    let entries = api_for(&server).poll_entries().await.expect("poll ok");

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "City Council Meeting");
    assert!(entries[0].is_eligible());
    assert_eq!(entries[1].status, EntryStatus::Downloading);
    assert!(!entries[1].is_eligible());
}

#[tokio::test]
async fn poll_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/entries"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = api_for(&server).poll_entries().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
}

#[tokio::test]
async fn poll_fails_on_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/entries"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = api_for(&server).poll_entries().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn poll_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/entries"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;

    let overrides = SettingsOverrides {
        server_url: Some(server.uri()),
        ..Default::default()
    };
    let mut settings = ClientSettings::resolve(&overrides).unwrap();
    settings.request_timeout = Duration::from_millis(50);
    let api = ReqwestApi::new(settings).unwrap();

    let err = api.poll_entries().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn submit_posts_minimal_body_and_accepts_acknowledgement() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/entries"))
        .and(body_json(json!({ "url": "https://youtu.be/abc" })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "id": 7, "message": "Entry added successfully." })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let receipt = api_for(&server)
        .submit_url("  https://youtu.be/abc ")
        .await
        .expect("submit ok");
    assert_eq!(
        receipt,
        SubmitReceipt::Acknowledged {
            message: Some("Entry added successfully.".into())
        }
    );
}

#[tokio::test]
async fn submit_accepts_created_entry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/entries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "https://youtu.be/new",
            "status": "not_started",
            "url": "https://youtu.be/new",
            "insertion_date": "2024-01-03T08:00:00Z"
        })))
        .mount(&server)
        .await;

    let receipt = api_for(&server).submit_url("https://youtu.be/new").await.unwrap();
    match receipt {
        SubmitReceipt::Created(entry) => assert_eq!(entry.status, EntryStatus::NotStarted),
        other => panic!("unexpected receipt {other:?}"),
    }
}

#[tokio::test]
async fn submit_surfaces_server_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/entries"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({ "error": "A video with this URL already exists." })),
        )
        .mount(&server)
        .await;

    let err = api_for(&server)
        .submit_url("https://youtu.be/dup")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Rejected { status: 409 });
    assert_eq!(err.user_message(), "A video with this URL already exists.");
}

#[tokio::test]
async fn submit_falls_back_to_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/entries"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .submit_url("https://youtu.be/x")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Rejected { status: 500 });
    assert_eq!(err.message, summarize_core::SUBMIT_FALLBACK_ERROR);
}

#[tokio::test]
async fn submit_rejects_invalid_url_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let api = api_for(&server);
    for bad in ["not a url", "", "ftp://example.com/video"] {
        let err = api.submit_url(bad).await.unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl, "input {bad:?}");
    }
}
