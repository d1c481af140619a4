mod common;

use axum::http::{Method, StatusCode};
use hbnb_server::network::NetworkConfig;
use serde_json::json;

use common::{names, TestApp};

#[tokio::test]
async fn status_and_stats() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/v1/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "OK" }));

    app.create("/api/v1/states", json!({ "name": "Texas" })).await;
    let (status, body) = app.get("/api/v1/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "amenities": 0,
            "cities": 0,
            "places": 0,
            "reviews": 0,
            "states": 1,
            "users": 0,
        })
    );
}

#[tokio::test]
async fn unknown_routes_are_json_404() {
    let app = TestApp::new();
    for uri in ["/nope", "/api/v1/nope", "/api/v2/status"] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, json!({ "error": "Not found" }));
    }
}

#[tokio::test]
async fn health_probes() {
    let app = TestApp::new();

    let (status, _) = app.get("/health/live").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get("/health/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    app.state.lifecycle.set_ready();
    let (status, _) = app.get("/health/ready").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "ready");
    // the probe itself is in flight while it is answered
    assert_eq!(body["in_flight"], 1);
}

#[tokio::test]
async fn user_lifecycle_never_exposes_password() {
    let app = TestApp::new();

    let (status, created) = app
        .post(
            "/api/v1/users",
            json!({ "email": "ada@example.com", "password": "secret", "first_name": "Ada" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created.get("password").is_none());
    let id = created["id"].as_str().unwrap();

    let (status, fetched) = app.get(&format!("/api/v1/users/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["email"], "ada@example.com");
    assert!(fetched.get("password").is_none());

    let (_, list) = app.get("/api/v1/users").await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert!(list[0].get("password").is_none());

    let (status, updated) = app
        .put(
            &format!("/api/v1/users/{id}"),
            json!({ "last_name": "Lovelace", "email": "x@y.z", "id": "hijack" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["last_name"], "Lovelace");
    assert_eq!(updated["email"], "ada@example.com");
    assert_eq!(updated["id"], id);

    let (status, body) = app.delete(&format!("/api/v1/users/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    let (status, _) = app.delete(&format!("/api/v1/users/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_validation_messages() {
    let app = TestApp::new();

    let (status, body) = app.post("/api/v1/users", json!({ "password": "pw" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing email" }));

    let (status, body) = app.post("/api/v1/users", json!({ "email": "a@b.c" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing password" }));

    let (status, body) = app.post("/api/v1/states", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing name" }));

    let (status, body) = app
        .raw(Method::POST, "/api/v1/amenities", Some("text/plain"), "wifi")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Not a JSON" }));

    let (status, body) = app
        .raw(Method::POST, "/api/v1/amenities", Some("application/json"), "{oops")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Not a JSON" }));
}

#[tokio::test]
async fn lookups_fail_before_body_is_read() {
    let app = TestApp::new();

    for uri in [
        "/api/v1/states/missing/cities",
        "/api/v1/cities/missing/places",
        "/api/v1/places/missing/reviews",
    ] {
        let (status, body) = app
            .raw(Method::POST, uri, Some("text/plain"), "not json")
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["error"], "Not found");
    }

    let (status, _) = app
        .raw(Method::PUT, "/api/v1/states/missing", None, "not json")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn states_and_cities() {
    let app = TestApp::new();
    let texas = app.create("/api/v1/states", json!({ "name": "Texas" })).await;
    app.create(
        &format!("/api/v1/states/{texas}/cities"),
        json!({ "name": "Austin" }),
    )
    .await;
    let dallas = app
        .create(
            &format!("/api/v1/states/{texas}/cities"),
            json!({ "name": "Dallas", "state_id": "elsewhere" }),
        )
        .await;

    let (status, cities) = app.get(&format!("/api/v1/states/{texas}/cities")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&cities), vec!["Austin", "Dallas"]);
    assert_eq!(cities[1]["state_id"], texas);

    let (status, city) = app
        .put(
            &format!("/api/v1/cities/{dallas}"),
            json!({ "name": "Big D", "state_id": "elsewhere", "created_at": "1999-01-01T00:00:00Z" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(city["name"], "Big D");
    assert_eq!(city["state_id"], texas);
    assert_ne!(city["created_at"], "1999-01-01T00:00:00Z");

    let (status, state) = app
        .put(&format!("/api/v1/states/{texas}"), json!({ "name": "Lone Star" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["name"], "Lone Star");

    let (status, _) = app.get("/api/v1/cities/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn places_require_existing_user() {
    let app = TestApp::new();
    let state = app.create("/api/v1/states", json!({ "name": "Ohio" })).await;
    let city = app
        .create(&format!("/api/v1/states/{state}/cities"), json!({ "name": "Akron" }))
        .await;
    let user = app
        .create("/api/v1/users", json!({ "email": "o@h.io", "password": "pw" }))
        .await;
    let uri = format!("/api/v1/cities/{city}/places");

    let (status, body) = app.post(&uri, json!({ "name": "Loft" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing user_id");

    let (status, _) = app
        .post(&uri, json!({ "user_id": "ghost", "name": "Loft" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.post(&uri, json!({ "user_id": user })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing name");

    let (status, place) = app
        .post(
            &uri,
            json!({ "user_id": user, "name": "Loft", "number_rooms": 2, "latitude": 41.08 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(place["city_id"], city);
    assert_eq!(place["number_rooms"], 2);
    assert_eq!(place["price_by_night"], 0);
    assert_eq!(place["amenity_ids"], json!([]));

    let id = place["id"].as_str().unwrap();
    let (status, updated) = app
        .put(
            &format!("/api/v1/places/{id}"),
            json!({ "price_by_night": 120, "user_id": "someone-else", "city_id": "x" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price_by_night"], 120);
    assert_eq!(updated["user_id"], user);
    assert_eq!(updated["city_id"], city);

    let (_, listed) = app.get(&uri).await;
    assert_eq!(names(&listed), vec!["Loft"]);
}

#[tokio::test]
async fn reviews_require_existing_user_then_text() {
    let app = TestApp::new();
    let state = app.create("/api/v1/states", json!({ "name": "Ohio" })).await;
    let city = app
        .create(&format!("/api/v1/states/{state}/cities"), json!({ "name": "Akron" }))
        .await;
    let user = app
        .create("/api/v1/users", json!({ "email": "o@h.io", "password": "pw" }))
        .await;
    let place = app
        .create(
            &format!("/api/v1/cities/{city}/places"),
            json!({ "user_id": user, "name": "Loft" }),
        )
        .await;
    let uri = format!("/api/v1/places/{place}/reviews");

    let (status, body) = app.post(&uri, json!({ "text": "nice" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing user_id");

    let (status, _) = app.post(&uri, json!({ "user_id": "ghost", "text": "nice" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.post(&uri, json!({ "user_id": user })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing text");

    let review = app
        .create(&uri, json!({ "user_id": user, "text": "nice" }))
        .await;

    let (status, updated) = app
        .put(&format!("/api/v1/reviews/{review}"), json!({ "text": "great" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["text"], "great");
    assert_eq!(updated["place_id"], place);

    let (_, listed) = app.get(&uri).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, _) = app.delete(&format!("/api/v1/reviews/{review}")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.get(&format!("/api/v1/reviews/{review}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn amenity_links() {
    let app = TestApp::new();
    let state = app.create("/api/v1/states", json!({ "name": "Ohio" })).await;
    let city = app
        .create(&format!("/api/v1/states/{state}/cities"), json!({ "name": "Akron" }))
        .await;
    let user = app
        .create("/api/v1/users", json!({ "email": "o@h.io", "password": "pw" }))
        .await;
    let place = app
        .create(
            &format!("/api/v1/cities/{city}/places"),
            json!({ "user_id": user, "name": "Loft" }),
        )
        .await;
    let wifi = app.create("/api/v1/amenities", json!({ "name": "wifi" })).await;
    let link = format!("/api/v1/places/{place}/amenities/{wifi}");

    let (status, body) = app.raw(Method::POST, &link, None, "").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "wifi");

    let (status, _) = app.raw(Method::POST, &link, None, "").await;
    assert_eq!(status, StatusCode::OK);

    let (status, linked) = app.get(&format!("/api/v1/places/{place}/amenities")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&linked), vec!["wifi"]);

    let (status, _) = app
        .raw(Method::POST, &format!("/api/v1/places/{place}/amenities/nope"), None, "")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.delete(&link).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    let (status, _) = app.delete(&link).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_amenity_unlinks_places() {
    let app = TestApp::new();
    let state = app.create("/api/v1/states", json!({ "name": "Ohio" })).await;
    let city = app
        .create(&format!("/api/v1/states/{state}/cities"), json!({ "name": "Akron" }))
        .await;
    let user = app
        .create("/api/v1/users", json!({ "email": "o@h.io", "password": "pw" }))
        .await;
    let place = app
        .create(
            &format!("/api/v1/cities/{city}/places"),
            json!({ "user_id": user, "name": "Loft" }),
        )
        .await;
    let pool = app.create("/api/v1/amenities", json!({ "name": "pool" })).await;
    app.raw(
        Method::POST,
        &format!("/api/v1/places/{place}/amenities/{pool}"),
        None,
        "",
    )
    .await;

    let (status, _) = app.delete(&format!("/api/v1/amenities/{pool}")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, fetched) = app.get(&format!("/api/v1/places/{place}")).await;
    assert_eq!(fetched["amenity_ids"], json!([]));
}

#[tokio::test]
async fn deleting_state_cascades() {
    let app = TestApp::new();
    let state = app.create("/api/v1/states", json!({ "name": "Ohio" })).await;
    let city = app
        .create(&format!("/api/v1/states/{state}/cities"), json!({ "name": "Akron" }))
        .await;
    let user = app
        .create("/api/v1/users", json!({ "email": "o@h.io", "password": "pw" }))
        .await;
    let place = app
        .create(
            &format!("/api/v1/cities/{city}/places"),
            json!({ "user_id": user, "name": "Loft" }),
        )
        .await;

    let (status, _) = app.delete(&format!("/api/v1/states/{state}")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get(&format!("/api/v1/cities/{city}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.get(&format!("/api/v1/places/{place}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.get(&format!("/api/v1/users/{user}")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn oversized_bodies_are_rejected() {
    let app = TestApp::with_config(NetworkConfig {
        max_body_bytes: 32,
        ..NetworkConfig::default()
    });

    let (status, _) = app
        .post("/api/v1/states", json!({ "name": "x".repeat(100) }))
        .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}
