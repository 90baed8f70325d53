use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use shared::{domain::Language, error::FetchError, protocol::WikiDocument};
use tokio::net::TcpListener;

use super::*;

fn document(path: &str) -> WikiDocument {
    WikiDocument {
        path: path.to_string(),
        title: path.replace('_', " "),
        subtitle: None,
        layout: "markdown_page".to_string(),
        locale: "en".to_string(),
        markdown: format!("# {path}"),
        available_locales: vec!["en".to_string()],
        tags: Vec::new(),
    }
}

async fn serve_page(Path((locale, path)): Path<(String, String)>) -> impl IntoResponse {
    match path.as_str() {
        "Broken" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        "Garbled" => (StatusCode::OK, "not json at all").into_response(),
        "Missing" => StatusCode::NOT_FOUND.into_response(),
        // Simulate a server-side redirect to a renamed page.
        "Old_name" => Json(document("New_name")).into_response(),
        _ => {
            let mut doc = document(&path);
            doc.locale = locale;
            Json(doc).into_response()
        }
    }
}

async fn spawn_wiki_server() -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new().route("/wiki/:locale/*path", get(serve_page));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn fetch_decodes_document_for_requested_locale() {
    let api_url = spawn_wiki_server().await;
    let api = HttpContentApi::new(api_url, "https://wiki.example");

    let doc = api
        .fetch("Rules/Appeals", Language::Ja)
        .await
        .expect("fetch should succeed");

    assert_eq!(doc.path, "Rules/Appeals");
    assert_eq!(doc.locale, "ja");
    assert!(doc.markdown.contains("Rules/Appeals"));
}

#[tokio::test]
async fn fetch_adopts_redirected_canonical_path() {
    let api_url = spawn_wiki_server().await;
    let api = HttpContentApi::new(api_url, "https://wiki.example");

    let doc = api
        .fetch("Old_name", Language::En)
        .await
        .expect("fetch should succeed");

    assert_eq!(doc.path, "New_name");
}

#[tokio::test]
async fn missing_page_maps_to_not_found() {
    let api_url = spawn_wiki_server().await;
    let api = HttpContentApi::new(api_url, "https://wiki.example");

    let err = api
        .fetch("Missing", Language::En)
        .await
        .expect_err("must fail");

    assert!(matches!(err, FetchError::NotFound { path } if path == "Missing"));
}

#[tokio::test]
async fn server_error_maps_to_remote() {
    let api_url = spawn_wiki_server().await;
    let api = HttpContentApi::new(api_url, "https://wiki.example");

    let err = api
        .fetch("Broken", Language::En)
        .await
        .expect_err("must fail");

    match err {
        FetchError::Remote { path, status, .. } => {
            assert_eq!(path, "Broken");
            assert_eq!(status, 500);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn invalid_body_maps_to_decode() {
    let api_url = spawn_wiki_server().await;
    let api = HttpContentApi::new(api_url, "https://wiki.example");

    let err = api
        .fetch("Garbled", Language::En)
        .await
        .expect_err("must fail");

    assert!(matches!(err, FetchError::Decode { .. }));
}

#[tokio::test]
async fn unreachable_server_maps_to_transport() {
    // Port 1 is never listening locally.
    let api = HttpContentApi::new("http://127.0.0.1:1", "https://wiki.example");

    let err = api
        .fetch("Anything", Language::En)
        .await
        .expect_err("must fail");

    assert!(matches!(err, FetchError::Transport { .. }));
}

#[test]
fn trailing_slashes_are_normalised() {
    let api = HttpContentApi::new("http://api.example/", "https://wiki.example/");
    assert_eq!(api.website_root_url(), "https://wiki.example");

    let url = api.page_url("Rules", Language::En).expect("url");
    assert_eq!(url.as_str(), "http://api.example/wiki/en/Rules");
}
