use actix_web::{
    App,
    http::{StatusCode, header},
    test, web,
};
use serde_json::{Value, json};

use ads_songs::models::config::ServerConfig;
use ads_songs::repository::DieselRepository;
use ads_songs::routes;

mod common;

const APP: &str = "adsSongsApp";

fn server_config() -> ServerConfig {
    ServerConfig {
        address: "127.0.0.1".to_string(),
        port: 0,
        database_url: ":memory:".to_string(),
        application_name: APP.to_string(),
    }
}

macro_rules! init_app {
    ($test_db:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(DieselRepository::new($test_db.pool().clone())))
                .app_data(web::Data::new(server_config()))
                .service(web::scope("/api").configure(routes::configure)),
        )
        .await
    };
}

fn header_str<'a>(resp: &'a actix_web::dev::ServiceResponse, name: &str) -> &'a str {
    resp.headers()
        .get(name)
        .unwrap_or_else(|| panic!("missing header {name}"))
        .to_str()
        .unwrap()
}

#[actix_web::test]
async fn create_assigns_id_and_location() {
    let test_db = common::TestDb::new("create_assigns_id_and_location.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/ads-songs")
        .set_json(json!({"title": "Jingle", "artist": "Band", "duration": 30}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let id = {
        let location = header_str(&resp, header::LOCATION.as_str()).to_string();
        assert!(location.starts_with("/api/ads-songs/"));
        assert_eq!(
            header_str(&resp, "X-adsSongsApp-alert"),
            format!(
                "A new adsSong is created with identifier {}",
                location.trim_start_matches("/api/ads-songs/")
            )
        );
        location.trim_start_matches("/api/ads-songs/").to_string()
    };

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"].to_string(), id);
    assert_eq!(body["title"], "Jingle");

    let req = test::TestRequest::get()
        .uri(&format!("/api/ads-songs/{id}"))
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched, body);
}

#[actix_web::test]
async fn create_with_id_is_rejected() {
    let test_db = common::TestDb::new("create_with_id_is_rejected.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/ads-songs")
        .set_json(json!({"id": 7, "title": "Jingle"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(header_str(&resp, "X-adsSongsApp-error"), "error.idexists");
    assert_eq!(header_str(&resp, "X-adsSongsApp-params"), "adsSong");

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errorKey"], "idexists");
    assert_eq!(body["entityName"], "adsSong");
    assert_eq!(body["message"], "error.idexists");
    assert_eq!(body["status"], 400);
}

#[actix_web::test]
async fn update_without_id_is_rejected() {
    let test_db = common::TestDb::new("update_without_id_is_rejected.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::put()
        .uri("/api/ads-songs")
        .set_json(json!({"title": "Jingle"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errorKey"], "idnull");
}

#[actix_web::test]
async fn update_replaces_fields() {
    let test_db = common::TestDb::new("update_replaces_fields.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/ads-songs")
        .set_json(json!({"title": "Jingle", "artist": "Band"}))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::put()
        .uri("/api/ads-songs")
        .set_json(json!({"id": id, "title": "Jingle v2", "duration": 45}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        header_str(&resp, "X-adsSongsApp-alert"),
        format!("A adsSong is updated with identifier {id}")
    );
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "Jingle v2");
    assert_eq!(body["duration"], 45);
    assert_eq!(body["artist"], Value::Null);
}

#[actix_web::test]
async fn update_of_unknown_id_is_not_found() {
    let test_db = common::TestDb::new("update_of_unknown_id_is_not_found.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::put()
        .uri("/api/ads-songs")
        .set_json(json!({"id": 999, "title": "Ghost"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn invalid_payload_is_bad_request() {
    let test_db = common::TestDb::new("invalid_payload_is_bad_request.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/ads-songs")
        .set_json(json!({"title": "Jingle", "url": "not a url"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errorKey"], "validation");
}

#[actix_web::test]
async fn get_missing_is_not_found_and_delete_is_idempotent() {
    let test_db = common::TestDb::new("get_missing_is_not_found.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::get()
        .uri("/api/ads-songs/12345")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    for _ in 0..2 {
        let req = test::TestRequest::delete()
            .uri("/api/ads-songs/12345")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            header_str(&resp, "X-adsSongsApp-alert"),
            "A adsSong is deleted with identifier 12345"
        );
    }
}

#[actix_web::test]
async fn delete_removes_song() {
    let test_db = common::TestDb::new("delete_removes_song.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/ads-songs")
        .set_json(json!({"title": "Jingle"}))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/ads-songs/{id}"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NO_CONTENT
    );

    let req = test::TestRequest::get()
        .uri(&format!("/api/ads-songs/{id}"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn list_count_and_search_report_pagination() {
    let test_db = common::TestDb::new("list_count_and_search_report_pagination.db");
    let app = init_app!(test_db);

    for i in 1..=5 {
        let req = test::TestRequest::post()
            .uri("/api/ads-songs")
            .set_json(json!({"title": format!("Jingle {i}"), "duration": i * 10}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );
    }

    let req = test::TestRequest::get()
        .uri("/api/ads-songs?duration.greaterThan=10&page=1&size=2")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header_str(&resp, "X-Total-Count"), "4");
    let link = header_str(&resp, "Link").to_string();
    assert!(link.contains("rel=\"prev\""));
    assert!(!link.contains("rel=\"next\""));
    assert!(link.contains("</api/ads-songs?duration.greaterThan=10&page=1&size=2>; rel=\"last\""));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let req = test::TestRequest::get()
        .uri("/api/ads-songs/count?duration.greaterThan=10")
        .to_request();
    let count: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(count, json!(4));

    let req = test::TestRequest::get()
        .uri("/api/_search/ads-songs?query=jingle&size=3")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header_str(&resp, "X-Total-Count"), "5");
    assert!(header_str(&resp, "Link").contains("rel=\"next\""));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn bad_criteria_and_sort_are_rejected() {
    let test_db = common::TestDb::new("bad_criteria_and_sort_are_rejected.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::get()
        .uri("/api/ads-songs?id.equals=abc")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::get()
        .uri("/api/ads-songs?sort=album,asc")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::get()
        .uri("/api/_search/ads-songs")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[actix_web::test]
async fn page_number_at_usize_max_is_served_without_next_link() {
    let test_db = common::TestDb::new("page_number_at_usize_max.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/ads-songs")
        .set_json(json!({"title": "Jingle"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    for uri in [
        format!("/api/ads-songs?page={}", usize::MAX),
        format!("/api/_search/ads-songs?query=jingle&page={}", usize::MAX),
    ] {
        let req = test::TestRequest::get().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(header_str(&resp, "X-Total-Count"), "1");
        let link = header_str(&resp, "Link").to_string();
        assert!(!link.contains("rel=\"next\""));
        assert!(link.contains("page=0&size=20>; rel=\"last\""));
        let body: Value = test::read_body_json(resp).await;
        assert!(body.as_array().unwrap().is_empty());
    }
}

#[actix_web::test]
async fn non_positive_ids_are_not_found_and_delete_is_no_content() {
    let test_db = common::TestDb::new("non_positive_path_ids.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::get().uri("/api/ads-songs/0").to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::delete()
        .uri("/api/ads-songs/-1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        header_str(&resp, "X-adsSongsApp-alert"),
        "A adsSong is deleted with identifier -1"
    );
    assert_eq!(header_str(&resp, "X-adsSongsApp-params"), "-1");
}
