//! Admin lead review API.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use common::{app, post_json, seeded_directory, send, test_config, ADMIN_KEY};
use facility_directory::HttpServer;

fn authed(method: Method, uri: &str, body: Option<&str>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {ADMIN_KEY}"));
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn submit(app: &Router, name: &str) -> i64 {
    let res = post_json(app, "/api/contact", &format!(r#"{{"name":"{name}"}}"#)).await;
    res.json()["submission"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_rejects_missing_or_wrong_token() {
    let app = app();
    let res = send(&app, Request::get("/admin/leads").body(Body::empty()).unwrap()).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let wrong = Request::get("/admin/leads")
        .header("authorization", "Bearer nope")
        .body(Body::empty())
        .unwrap();
    let res = send(&app, wrong).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert!(res.json()["message"].is_string());
}

#[tokio::test]
async fn test_lists_newest_first_with_status_filter() {
    let app = app();
    let first = submit(&app, "First").await;
    let second = submit(&app, "Second").await;

    let res = send(&app, authed(Method::GET, "/admin/leads", None)).await;
    assert_eq!(res.status, StatusCode::OK);
    let ids: Vec<_> = res
        .json()
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![second, first]);

    let uri = format!("/admin/leads/{first}");
    let res = send(
        &app,
        authed(Method::PATCH, &uri, Some(r#"{"status":"qualified"}"#)),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);

    let res = send(&app, authed(Method::GET, "/admin/leads?status=qualified", None)).await;
    let leads = res.json();
    assert_eq!(leads.as_array().unwrap().len(), 1);
    assert_eq!(leads[0]["name"], "First");

    let res = send(&app, authed(Method::GET, "/admin/leads?limit=1", None)).await;
    assert_eq!(res.json().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_lead_fields() {
    let app = app();
    let id = submit(&app, "Pat").await;

    let uri = format!("/admin/leads/{id}");
    let res = send(
        &app,
        authed(
            Method::PATCH,
            &uri,
            Some(r#"{"priority":"high","notes":"called back","contacted":true}"#),
        ),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    let lead = res.json();
    assert_eq!(lead["priority"], "high");
    assert_eq!(lead["notes"], "called back");
    assert_eq!(lead["contacted"], true);
    assert_eq!(lead["status"], "new");
}

#[tokio::test]
async fn test_update_errors() {
    let app = app();
    let id = submit(&app, "Pat").await;

    let missing = authed(Method::PATCH, "/admin/leads/999", Some(r#"{"status":"x"}"#));
    let res = send(&app, missing).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let uri = format!("/admin/leads/{id}");
    let res = send(&app, authed(Method::PATCH, &uri, Some("{}"))).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_disabled_admin_routes_are_unmatched() {
    let mut config = test_config();
    config.admin.enabled = false;
    let app = HttpServer::new(config, seeded_directory()).router();

    let res = send(&app, authed(Method::GET, "/admin/leads", None)).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json()["message"], "Route not found");
}

fn assert_json_bad_request(res: &common::TestResponse) {
    assert_eq!(res.status, StatusCode::BAD_REQUEST, "{}", res.body);
    assert!(res.headers["content-type"]
        .to_str()
        .unwrap()
        .starts_with("application/json"));
    assert!(res.json()["message"].is_string());
}

#[tokio::test]
async fn test_malformed_input_gets_json_errors() {
    let app = app();
    let id = submit(&app, "Pat").await;
    let uri = format!("/admin/leads/{id}");

    let bad_id = authed(Method::PATCH, "/admin/leads/abc", Some(r#"{"status":"x"}"#));
    let res = send(&app, bad_id).await;
    assert_json_bad_request(&res);

    let res = send(&app, authed(Method::PATCH, &uri, Some(r#"{"contacted":"yes"}"#))).await;
    assert_json_bad_request(&res);

    let res = send(&app, authed(Method::PATCH, &uri, Some("{not json"))).await;
    assert_json_bad_request(&res);

    let no_content_type = Request::builder()
        .method(Method::PATCH)
        .uri(&uri)
        .header("authorization", format!("Bearer {ADMIN_KEY}"))
        .body(Body::from(r#"{"status":"x"}"#))
        .unwrap();
    let res = send(&app, no_content_type).await;
    assert_json_bad_request(&res);

    let res = send(&app, authed(Method::GET, "/admin/leads?limit=abc", None)).await;
    assert_json_bad_request(&res);
}
