//! End-to-end background fetch: from reference to published image.

use base64::Engine;
use emojiart_core::{DocumentId, DocumentState, DocumentStore, Url};
use emojiart_loader::{load_background, refresh_background};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// A minimal valid PNG: one red pixel.
const PNG_1X1_B64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8DwHwAFBQIAX8jx0gAAAABJRU5ErkJggg==";

fn png_bytes() -> Vec<u8> {
    base64::engine::general_purpose::STANDARD
        .decode(PNG_1X1_B64)
        .expect("valid base64")
}

fn fresh_state() -> DocumentState {
    DocumentState::open(DocumentStore::in_memory(), DocumentId::new())
}

async fn png_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bg.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes()))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_http_fetch_publishes_image() {
    let server = png_server().await;
    let mut state = fresh_state();
    state.set_background(Some(
        Url::parse(&format!("{}/bg.png", server.uri())).expect("url"),
    ));
    assert!(state.is_loading());

    let published = refresh_background(&mut state, &reqwest::Client::new()).await;
    assert!(published);
    assert!(!state.is_loading());
    assert_eq!(state.background_size(), Some((1, 1)));
}

#[tokio::test]
async fn test_stale_fetch_is_discarded() {
    let server = png_server().await;
    let old = Url::parse(&format!("{}/bg.png", server.uri())).expect("url");

    let mut state = fresh_state();
    state.set_background(Some(old.clone()));

    // The fetch for `old` completes only after the document has moved on.
    let image = load_background(&reqwest::Client::new(), &old)
        .await
        .expect("fetch");
    state.set_background(Some(Url::parse("https://example.com/new.png").expect("url")));

    assert!(!state.publish_background(&old, image));
    assert!(state.background_image().is_none());
    assert!(state.is_loading());
}

#[tokio::test]
async fn test_failed_fetch_leaves_document_usable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut state = fresh_state();
    state.set_background(Some(
        Url::parse(&format!("{}/missing.png", server.uri())).expect("url"),
    ));

    let published = refresh_background(&mut state, &reqwest::Client::new()).await;
    assert!(!published);
    assert!(state.background_image().is_none());

    // The document absorbs the failure and keeps working.
    state.add_emoji("😀", 0, 0, 40).expect("add");
    assert_eq!(state.emojis().len(), 1);
}

#[tokio::test]
async fn test_refresh_without_reference_is_a_no_op() {
    let mut state = fresh_state();
    let published = refresh_background(&mut state, &reqwest::Client::new()).await;
    assert!(!published);
}

#[tokio::test]
async fn test_file_reference_fetches_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("bg.png");
    std::fs::write(&file, png_bytes()).expect("write png");

    let reference = Url::from_file_path(&file).expect("file url");
    let image = load_background(&reqwest::Client::new(), &reference)
        .await
        .expect("fetch");
    assert_eq!((image.width, image.height), (1, 1));
}

#[tokio::test]
async fn test_data_reference_decodes_inline() {
    let reference =
        Url::parse(&format!("data:image/png;base64,{PNG_1X1_B64}")).expect("data url");
    let image = load_background(&reqwest::Client::new(), &reference)
        .await
        .expect("fetch");
    assert_eq!((image.width, image.height), (1, 1));
}

#[tokio::test]
async fn test_unsupported_scheme_is_an_error() {
    let reference = Url::parse("ftp://example.com/bg.png").expect("url");
    let result = load_background(&reqwest::Client::new(), &reference).await;
    assert!(matches!(
        result,
        Err(emojiart_loader::FetchError::UnsupportedScheme(_))
    ));
}
