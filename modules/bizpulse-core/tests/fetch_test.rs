//! Fetch-to-session flow against a local stand-in for the registry endpoint.

use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
use bizpulse_core::{FetchError, LoadStatus, RecordFetcher, Session};
use serde_json::json;
use socrata_client::SocrataClient;

const ZIPS: [&str; 3] = ["90046", "90068", "90069"];

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/resource/r4uk-afju.json")
}

fn fetcher(url: &str) -> RecordFetcher {
    RecordFetcher::new(
        SocrataClient::new(url),
        ZIPS.iter().map(|z| z.to_string()).collect(),
    )
}

#[tokio::test]
async fn service_unavailable_is_transport_error_and_session_stays_empty() {
    let app = Router::new().route(
        "/resource/r4uk-afju.json",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down for maintenance") }),
    );
    let url = serve(app).await;

    let result = fetcher(&url).fetch(5000).await;
    assert!(
        matches!(result, Err(FetchError::Transport(ref msg)) if msg.contains("503")),
        "got {result:?}"
    );

    let mut session = Session::new(ZIPS.iter().map(|z| z.to_string()).collect());
    session.complete_load(result);
    assert_eq!(session.status(), LoadStatus::Failed);
    assert!(session.catalog().is_empty());
    assert!(session.filtered().is_empty());
    assert!(session.list_view().empty);
    assert!(session.notice().is_some());
}

#[tokio::test]
async fn malformed_body_is_deserialization_error() {
    let app = Router::new().route(
        "/resource/r4uk-afju.json",
        get(|| async { Json(json!({ "error": true, "message": "not an array" })) }),
    );
    let url = serve(app).await;

    let result = fetcher(&url).fetch(10).await;
    assert!(matches!(result, Err(FetchError::Deserialization(_))), "got {result:?}");
}

#[tokio::test]
async fn success_sends_bounded_query_and_normalizes_rows() {
    let app = Router::new().route(
        "/resource/r4uk-afju.json",
        get(|Query(params): Query<Vec<(String, String)>>| async move {
            let limit = params
                .iter()
                .find(|(k, _)| k == "$limit")
                .map(|(_, v)| v.clone())
                .unwrap_or_default();
            let order = params
                .iter()
                .find(|(k, _)| k == "$order")
                .map(|(_, v)| v.clone())
                .unwrap_or_default();
            Json(json!([
                {
                    "location_account": "0002000001-0001-1",
                    "business_name": "HILLS HARDWARE INC",
                    "dba_name": "Hills Hardware|HH Supply",
                    "zip_code": "90068-2201",
                    "primary_naics_description": order,
                    "naics": 444130,
                    "location": { "latitude": "34.1201", "longitude": "-118.3389" }
                },
                {
                    "location_account": "0002000002-0001-1",
                    "business_name": limit,
                    "zip_code": "90046",
                    "location": { "latitude": "", "longitude": "" }
                }
            ]))
        }),
    );
    let url = serve(app).await;

    let records = fetcher(&url).fetch(2).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].primary_naics_description, "location_start_date DESC");
    assert_eq!(records[0].naics, "444130");
    assert_eq!(records[0].aliases(), vec!["Hills Hardware", "HH Supply"]);
    assert_eq!(records[1].business_name, "2");
    assert_eq!(records[1].dba_name, "");
    assert!(records[1].coordinates().is_none());

    let mut session = Session::new(ZIPS.iter().map(|z| z.to_string()).collect());
    session.complete_load(Ok(records));
    assert_eq!(session.status(), LoadStatus::Ready);

    let map = session.map_view();
    assert_eq!(map.markers.len(), 1);
    assert_eq!(map.skipped, 1);

    session.set_search("hh supply");
    assert_eq!(session.filtered().len(), 1);
}
