mod common;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use common::{names, TestApp};

const SEARCH: &str = "/api/v1/places_search";

struct Fixture {
    app: TestApp,
    s1: String,
    s2: String,
    c1: String,
    c2: String,
    c3: String,
    wifi: String,
    pool: String,
}

/// S1 -> {C1, C2}, S2 -> {C3}; C1 -> {P1, P2}, C2 -> {P3}, C3 -> {P4}.
/// wifi on P1, P3, P4; pool on P3.
async fn fixture() -> Fixture {
    let app = TestApp::new();
    let user = app
        .create("/api/v1/users", json!({ "email": "host@example.com", "password": "pw" }))
        .await;

    let s1 = app.create("/api/v1/states", json!({ "name": "S1" })).await;
    let s2 = app.create("/api/v1/states", json!({ "name": "S2" })).await;
    let city = |state: &str| format!("/api/v1/states/{state}/cities");
    let c1 = app.create(&city(&s1), json!({ "name": "C1" })).await;
    let c2 = app.create(&city(&s1), json!({ "name": "C2" })).await;
    let c3 = app.create(&city(&s2), json!({ "name": "C3" })).await;

    let place = |city: &str| format!("/api/v1/cities/{city}/places");
    let p1 = app.create(&place(&c1), json!({ "user_id": user, "name": "P1" })).await;
    app.create(&place(&c1), json!({ "user_id": user, "name": "P2" })).await;
    let p3 = app.create(&place(&c2), json!({ "user_id": user, "name": "P3" })).await;
    let p4 = app.create(&place(&c3), json!({ "user_id": user, "name": "P4" })).await;

    let wifi = app.create("/api/v1/amenities", json!({ "name": "wifi" })).await;
    let pool = app.create("/api/v1/amenities", json!({ "name": "pool" })).await;
    for (p, a) in [(&p1, &wifi), (&p3, &wifi), (&p4, &wifi), (&p3, &pool)] {
        let (status, _) = app
            .raw(
                Method::POST,
                &format!("/api/v1/places/{p}/amenities/{a}"),
                None,
                "",
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    Fixture {
        app,
        s1,
        s2,
        c1,
        c2,
        c3,
        wifi,
        pool,
    }
}

async fn search(app: &TestApp, filter: Value) -> Vec<String> {
    let (status, body) = app.post(SEARCH, filter).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    names(&body)
}

#[tokio::test]
async fn empty_filter_lists_every_place() {
    let f = fixture().await;
    let all = vec!["P1", "P2", "P3", "P4"];

    assert_eq!(search(&f.app, json!({})).await, all);
    assert_eq!(
        search(&f.app, json!({ "states": [], "cities": [], "amenities": [] })).await,
        all
    );
    assert_eq!(
        search(&f.app, json!({ "states": null, "cities": null, "amenities": null })).await,
        all
    );
}

#[tokio::test]
async fn states_expand_to_their_cities() {
    let f = fixture().await;

    let by_state = search(&f.app, json!({ "states": [f.s1] })).await;
    let by_cities = search(&f.app, json!({ "cities": [f.c1, f.c2] })).await;
    assert_eq!(by_state, vec!["P1", "P2", "P3"]);
    assert_eq!(by_state, by_cities);
}

#[tokio::test]
async fn cities_select_their_places() {
    let f = fixture().await;
    assert_eq!(search(&f.app, json!({ "cities": [f.c1] })).await, vec!["P1", "P2"]);
}

#[tokio::test]
async fn state_and_city_results_are_unioned_without_duplicates() {
    let f = fixture().await;
    let found = search(&f.app, json!({ "states": [f.s1], "cities": [f.c1, f.c3] })).await;
    assert_eq!(found, vec!["P1", "P2", "P3", "P4"]);
}

#[tokio::test]
async fn amenities_narrow_geo_results() {
    let f = fixture().await;
    let found = search(&f.app, json!({ "states": [f.s1], "amenities": [f.wifi] })).await;
    assert_eq!(found, vec!["P1", "P3"]);
}

#[tokio::test]
async fn amenity_only_filter_searches_all_places() {
    let f = fixture().await;
    assert_eq!(
        search(&f.app, json!({ "amenities": [f.wifi] })).await,
        vec!["P1", "P3", "P4"]
    );
}

#[tokio::test]
async fn amenities_are_conjunctive() {
    let f = fixture().await;
    assert_eq!(
        search(&f.app, json!({ "amenities": [f.wifi, f.pool] })).await,
        vec!["P3"]
    );
    assert_eq!(
        search(&f.app, json!({ "states": [f.s2], "amenities": [f.pool] })).await,
        Vec::<String>::new()
    );
}

#[tokio::test]
async fn unknown_ids_are_skipped() {
    let f = fixture().await;

    assert!(search(&f.app, json!({ "states": ["nope"] })).await.is_empty());
    assert!(search(&f.app, json!({ "cities": ["nope"], "amenities": [f.wifi] }))
        .await
        .is_empty());
    assert!(search(&f.app, json!({ "amenities": ["nope"] })).await.is_empty());
    assert_eq!(
        search(&f.app, json!({ "states": ["nope", f.s2] })).await,
        vec!["P4"]
    );
}

#[tokio::test]
async fn search_is_idempotent() {
    let f = fixture().await;
    let filter = json!({ "states": [f.s1, f.s2], "cities": [f.c2], "amenities": [f.wifi] });
    let first = search(&f.app, filter.clone()).await;
    assert_eq!(first, search(&f.app, filter).await);
}

#[tokio::test]
async fn malformed_bodies_are_client_errors() {
    let f = fixture().await;

    let (status, body) = f
        .app
        .raw(Method::POST, SEARCH, Some("text/plain"), "states=1")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Not a JSON" }));

    let (status, body) = f.app.raw(Method::POST, SEARCH, None, "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Not a JSON");

    let (status, body) = f.app.post(SEARCH, Value::Null).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = f.app.post(SEARCH, json!({ "states": "not-a-list" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn array_bodies_are_not_filters() {
    let f = fixture().await;

    for body in [json!([]), json!([[f.s1]]), json!("states")] {
        let (status, resp) = f.app.post(SEARCH, body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(resp, json!({ "error": "Not a JSON" }));
    }
}

#[tokio::test]
async fn results_are_full_place_objects() {
    let f = fixture().await;
    let (_, body) = f.app.post(SEARCH, json!({ "cities": [f.c2] })).await;
    let place = &body[0];
    assert_eq!(place["name"], "P3");
    assert_eq!(place["city_id"], f.c2);
    assert_eq!(place["amenity_ids"], json!([f.wifi, f.pool]));
}
