//! HTTP navigation through the axum router: symbolic week resolution, the auth gate
//! and the fallback routes.
use axum::{
    body::Body,
    extract::Request,
    http::{StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use time::macros::date;
use tower::ServiceExt;
use weekmenu_week::WeekStart;

mod common;

use common::{TestApp, create_test_app};

// Sunday: its week starts on Monday 2024-01-01
const TODAY: time::Date = date!(2024 - 01 - 07);

async fn get(app: &TestApp, uri: &str, token: Option<&str>) -> Response {
    let mut request = Request::builder().uri(uri);
    if let Some(token) = token {
        request = request.header(header::COOKIE, format!("auth_token={token}"));
    }

    app.router
        .clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

async fn json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_current_week_redirects_to_week_row() {
    let app = create_test_app(TODAY).await;
    let id = app
        .store
        .add_week("2024-01-01".parse::<WeekStart>().unwrap())
        .await
        .unwrap();

    let response = get(&app, "/weeks/current", None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/weeks/{id}"));
}

#[tokio::test]
async fn test_root_without_week_redirects_to_no_week() {
    let app = create_test_app(TODAY).await;
    app.store
        .add_week("2024-01-08".parse::<WeekStart>().unwrap())
        .await
        .unwrap();

    let response = get(&app, "/", None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/no-week");
}

#[tokio::test]
async fn test_week_by_year_and_number() {
    let app = create_test_app(TODAY).await;
    let id = app
        .store
        .add_week("2023-01-02".parse::<WeekStart>().unwrap())
        .await
        .unwrap();

    let response = get(&app, "/2023/1", None).await;
    assert_eq!(location(&response), format!("/weeks/{id}"));

    let response = get(&app, "/2023/2", None).await;
    assert_eq!(location(&response), "/no-week");
}

#[tokio::test]
async fn test_invalid_week_number_redirects_to_no_week() {
    let app = create_test_app(TODAY).await;

    let response = get(&app, "/2024/abc", None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/no-week");
}

#[tokio::test]
async fn test_week_view_requires_session() {
    let app = create_test_app(TODAY).await;

    let response = get(&app, "/weeks/1", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = get(&app, "/dishes", Some("not-a-token")).await;
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_week_view_with_session_renders_view() {
    let app = create_test_app(TODAY).await;
    let token = app.auth.issue_token("user-1").unwrap();

    let response = get(&app, "/weeks/12", Some(&token)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json(response).await;
    assert_eq!(body["view"], "WeekView");
    assert_eq!(body["path"], "/weeks/12");
    assert_eq!(body["params"]["id"], "12");
}

#[tokio::test]
async fn test_public_views_render_without_session() {
    let app = create_test_app(TODAY).await;

    for (uri, view) in [("/login", "Login"), ("/no-week", "NoWeek")] {
        let response = get(&app, uri, None).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert_eq!(json(response).await["view"], view, "{uri}");
    }
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let app = create_test_app(TODAY).await;

    let response = get(&app, "/a/b/c", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json(response).await["error"], "no route matches /a/b/c");
}

#[tokio::test]
async fn test_health() {
    let app = create_test_app(TODAY).await;

    let response = get(&app, "/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"OK");
}
