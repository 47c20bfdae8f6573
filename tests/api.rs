//! End-to-end API behaviour over the seeded in-memory directory.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{app, get, post_json, send, BASE_URL};
use serde_json::Value;

fn ids(value: &Value) -> Vec<i64> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health_reports_ok() {
    let res = get(&app(), "/api/health").await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
    assert!(chrono::DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_unmatched_route_is_json_404() {
    let app = app();
    for uri in ["/api/nope", "/api/states/florida/extra/segments", "/"] {
        let res = get(&app, uri).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(res.json()["message"], "Route not found");
    }
}

#[tokio::test]
async fn test_wrong_method_is_unmatched() {
    let res = post_json(&app(), "/api/states", "{}").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_preflight_and_cors_headers() {
    let app = app();
    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/anything/at/all")
        .body(Body::empty())
        .unwrap();
    let res = send(&app, preflight).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.headers["access-control-allow-origin"], "*");

    let res = get(&app, "/api/states").await;
    assert_eq!(res.headers["access-control-allow-origin"], "*");
    assert!(res.headers.contains_key("access-control-allow-methods"));
    assert!(res.headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_states_sorted_by_name() {
    let res = get(&app(), "/api/states").await;
    let names: Vec<_> = res
        .json()
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Florida", "Texas"]);
}

#[tokio::test]
async fn test_state_detail_orders_cities_by_facility_count() {
    let app = app();
    let res = get(&app, "/api/states/florida").await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["slug"], "florida");
    let cities: Vec<_> = body["cities"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["slug"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(cities, vec!["miami", "tampa", "jacksonville"]);

    let res = get(&app, "/api/states/atlantis").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json()["message"], "State not found");
}

#[tokio::test]
async fn test_categories_sorted_by_name() {
    let res = get(&app(), "/api/categories").await;
    let slugs: Vec<_> = res
        .json()
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["slug"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(slugs, vec!["power-plants", "refineries", "shipyards"]);
}

#[tokio::test]
async fn test_facility_list_filters_and_limits() {
    let app = app();
    let all = get(&app, "/api/facilities").await.json();
    assert_eq!(all.as_array().unwrap().len(), 7);
    assert_eq!(all[0]["name"], "Big Bend Power Station");
    assert_eq!(all[0]["city"]["slug"], "tampa");
    assert_eq!(all[0]["state"]["slug"], "florida");
    assert_eq!(all[0]["category"]["slug"], "power-plants");

    let tampa = get(&app, "/api/facilities?cityId=1").await.json();
    assert_eq!(ids(&tampa), vec![1, 2, 3]);

    let limited = get(&app, "/api/facilities?limit=2").await.json();
    assert_eq!(limited.as_array().unwrap().len(), 2);

    let bad = get(&app, "/api/facilities?cityId=abc").await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_facility_lookup_with_and_without_suffix() {
    let app = app();
    let plain = get(&app, "/api/facilities/florida/tampa/big-bend-power-station").await;
    let suffixed = get(
        &app,
        "/api/facilities/florida/tampa/big-bend-power-station-asbestos-exposure",
    )
    .await;
    assert_eq!(plain.status, StatusCode::OK);
    assert_eq!(suffixed.status, StatusCode::OK);
    assert_eq!(plain.json(), suffixed.json());
    assert_eq!(plain.json()["companyName"], "Tampa Electric");
}

#[tokio::test]
async fn test_facility_lookup_requires_all_slugs() {
    let app = app();
    for uri in [
        "/api/facilities/florida/miami/big-bend-power-station",
        "/api/facilities/texas/tampa/big-bend-power-station",
        "/api/facilities/florida/tampa/unknown",
    ] {
        let res = get(&app, uri).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(res.json()["message"], "Facility not found");
    }
}

#[tokio::test]
async fn test_uncategorized_facility_has_null_category() {
    let res = get(&app(), "/api/facilities/florida/jacksonville/jacksonville-paper-mill").await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.json()["category"].is_null());
}

#[tokio::test]
async fn test_nearby_same_city_excluding_self() {
    let res = get(&app(), "/api/facilities/1/nearby").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(ids(&res.json()), vec![2, 3]);
}

#[tokio::test]
async fn test_related_same_category_excluding_self() {
    let app = app();
    let res = get(&app, "/api/facilities/1/related").await;
    assert_eq!(ids(&res.json()), vec![2, 5]);

    // No category: every other facility
    let res = get(&app, "/api/facilities/6/related").await;
    assert_eq!(ids(&res.json()), vec![1, 2, 7, 4, 3, 5]);
}

#[tokio::test]
async fn test_neighbours_of_unknown_or_invalid_id() {
    let app = app();
    let res = get(&app, "/api/facilities/999/nearby").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), Value::Array(vec![]));

    let res = get(&app, "/api/facilities/abc/related").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json()["message"], "Route not found");
}

#[tokio::test]
async fn test_city_detail_and_facilities() {
    let app = app();
    let res = get(&app, "/api/cities/florida/tampa").await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["name"], "Tampa");
    assert_eq!(body["state"]["slug"], "florida");

    let res = get(&app, "/api/cities/florida/tampa/facilities").await;
    assert_eq!(ids(&res.json()), vec![1, 2, 3]);

    let res = get(&app, "/api/cities/texas/tampa").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json()["message"], "City not found");

    let res = get(&app, "/api/cities/texas/tampa/facilities").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search() {
    let app = app();
    // City name match
    let res = get(&app, "/api/search?q=TAMPA").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(ids(&res.json()), vec![1, 2, 3]);

    // Company name match
    let res = get(&app, "/api/search?q=gulf%20coast").await;
    assert_eq!(ids(&res.json()), vec![7]);

    let res = get(&app, "/api/search?q=zzzz").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), Value::Array(vec![]));

    let res = get(&app, "/api/search?q=tampa&limit=1").await;
    assert_eq!(res.json().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_search_requires_query() {
    let app = app();
    for uri in ["/api/search", "/api/search?q=", "/api/search?q=%20%20"] {
        let res = get(&app, uri).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(res.json()["message"], "Search query is required");
    }
}

#[tokio::test]
async fn test_contact_subject_mapping() {
    let app = app();
    let cases = [
        (r#"{"name":"A","diagnosis":"mesothelioma"}"#, "Mesothelioma Lead"),
        (r#"{"name":"B","diagnosis":"lung-cancer"}"#, "Lung Cancer Lead"),
        (r#"{"name":"C","diagnosis":"asbestosis"}"#, "Asbestosis Lead"),
        (r#"{"name":"D","diagnosis":"unsure"}"#, "Asbestos Exposure Lead"),
        (r#"{"name":"E"}"#, "Asbestos Exposure Lead"),
    ];
    for (body, subject) in cases {
        let res = post_json(&app, "/api/contact", body).await;
        assert_eq!(res.status, StatusCode::OK, "{body}");
        let json = res.json();
        assert_eq!(json["message"], "Contact form submitted successfully");
        assert_eq!(json["submission"]["subject"], subject);
        assert_eq!(json["submission"]["status"], "new");
        assert_eq!(json["submission"]["priority"], "normal");
        assert_eq!(json["submission"]["contacted"], false);
    }
}

#[tokio::test]
async fn test_contact_defaults_missing_fields() {
    let res = post_json(&app(), "/api/contact", "{}").await;
    assert_eq!(res.status, StatusCode::OK);
    let submission = &res.json()["submission"];
    assert_eq!(submission["name"], "");
    assert_eq!(submission["email"], "");
    assert_eq!(submission["diagnosisTimeline"], "");
}

#[tokio::test]
async fn test_contact_rejects_malformed_json() {
    let res = post_json(&app(), "/api/contact", "{not json").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.json()["message"].is_string());
}

#[tokio::test]
async fn test_contact_rejects_oversized_body() {
    // Default limit is 64 KiB
    let message = "x".repeat(70 * 1024);
    let body = format!(r#"{{"name":"Pat","message":"{message}"}}"#);
    let res = post_json(&app(), "/api/contact", &body).await;
    assert_eq!(res.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(res.json()["message"], "Request body too large");
}

#[tokio::test]
async fn test_content_template_lookup() {
    let app = app();
    let res = get(&app, "/api/content-templates/state/florida_content_adaptive").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["templateName"], "florida_content_adaptive");

    for uri in [
        "/api/content-templates/state/texas_content_adaptive",
        "/api/content-templates/region/florida_content_adaptive",
        "/api/content-templates/city/florida_content_adaptive",
        "/api/content-templates/facility/tampa-shipyards_content_v1",
    ] {
        let res = get(&app, uri).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn test_facility_description_falls_through_versions() {
    let app = app();
    // Primary is v2; only v3 exists.
    let res = get(
        &app,
        "/api/facilities/florida/tampa/big-bend-power-station-asbestos-exposure/description",
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["templateName"], "big-bend-power-station_content_v3");
    assert_eq!(body["fallback"], false);
    assert_eq!(
        body["blocks"][0],
        "Big Bend Power Station in Tampa was run by Tampa Electric."
    );

    // Only active template is inactive
    let res = get(&app, "/api/facilities/florida/tampa/tampa-shipyards/description").await;
    let body = res.json();
    assert!(body["templateName"].is_null());
    assert_eq!(body["fallback"], true);
    assert!(body["blocks"][0].as_str().unwrap().contains("Tampa Shipyards"));
}

#[tokio::test]
async fn test_state_and_city_descriptions() {
    let app = app();
    let body = get(&app, "/api/states/florida/description").await.json();
    assert_eq!(body["templateName"], "florida_content_adaptive");
    assert_eq!(body["blocks"][0], "Asbestos exposure sites across Florida.");

    let body = get(&app, "/api/cities/florida/miami/description").await.json();
    assert_eq!(body["fallback"], true);

    let res = get(&app, "/api/states/atlantis/description").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_state_sitemap_one_url_per_city_and_facility() {
    let res = get(&app(), "/sitemap-florida.xml").await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.headers["content-type"]
        .to_str()
        .unwrap()
        .starts_with("application/xml"));
    assert_eq!(res.body.matches("<url>").count(), 3 + 6);
    assert!(res
        .body
        .contains(&format!("<loc>{BASE_URL}/florida/tampa</loc>")));
    assert!(res.body.contains(&format!(
        "<loc>{BASE_URL}/florida/tampa/big-bend-power-station-asbestos-exposure</loc>"
    )));
    assert!(!res.body.contains("houston"));
}

#[tokio::test]
async fn test_site_sitemap() {
    let app = app();
    let res = get(&app, "/sitemap.xml").await;
    assert_eq!(res.status, StatusCode::OK);
    // home + 2 states + 4 cities + 7 facilities
    assert_eq!(res.body.matches("<url>").count(), 1 + 2 + 4 + 7);
    assert!(res.body.contains("<priority>1.0</priority>"));
    assert!(res.body.contains("<changefreq>monthly</changefreq>"));

    let res = get(&app, "/sitemap-atlantis.xml").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}
