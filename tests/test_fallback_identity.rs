use std::sync::Arc;

use recipe_extract::config::{DEFAULT_FALLBACK_USER_AGENT, DEFAULT_USER_AGENT};
use recipe_extract::{
    EngineConfig, ExtractError, ExtractionEvent, RecipeExtractor, RecordingObserver,
};

const RECIPE_HTML: &str = r#"
<html><head><script type="application/ld+json">
{"@type": "Recipe", "name": "Guarded Stew",
 "recipeIngredient": ["1 lb beef", "2 cups stock"],
 "recipeInstructions": ["Brown the beef.", "Simmer in the stock for two hours."]}
</script></head><body></body></html>
"#;

fn extractor(observer: Arc<RecordingObserver>) -> RecipeExtractor {
    RecipeExtractor::builder()
        .config(EngineConfig::default())
        .observer(observer)
        .build()
        .unwrap()
}

fn fetch_status(err: ExtractError) -> Option<u16> {
    match err {
        ExtractError::Fetch(e) => e.status(),
        _ => None,
    }
}

#[tokio::test]
async fn test_forbidden_retries_once_with_fallback_identity() {
    let mut server = mockito::Server::new_async().await;
    let primary = server
        .mock("GET", "/stew")
        .match_header("user-agent", DEFAULT_USER_AGENT)
        .with_status(403)
        .expect(1)
        .create_async()
        .await;
    let fallback = server
        .mock("GET", "/stew")
        .match_header("user-agent", DEFAULT_FALLBACK_USER_AGENT)
        .with_status(200)
        .with_body(RECIPE_HTML)
        .expect(1)
        .create_async()
        .await;

    let observer = Arc::new(RecordingObserver::new());
    let url = format!("{}/stew", server.url());
    let recipe = extractor(observer.clone())
        .extract(&url)
        .await
        .unwrap()
        .unwrap();

    primary.assert_async().await;
    fallback.assert_async().await;
    assert_eq!(recipe.name, "Guarded Stew");
    assert!(observer
        .events()
        .contains(&ExtractionEvent::FallbackIdentity { url: url.clone() }));
}

#[tokio::test]
async fn test_fallback_result_is_final() {
    let mut server = mockito::Server::new_async().await;
    let m = server
        .mock("GET", "/stew")
        .with_status(403)
        .expect(2)
        .create_async()
        .await;

    let observer = Arc::new(RecordingObserver::new());
    let url = format!("{}/stew", server.url());
    let err = extractor(observer.clone()).extract(&url).await.unwrap_err();

    m.assert_async().await;
    assert_eq!(fetch_status(err), Some(403));
    assert!(observer.strategies_tried().is_empty());
}

#[tokio::test]
async fn test_other_errors_are_not_retried() {
    let mut server = mockito::Server::new_async().await;
    let m = server
        .mock("GET", "/stew")
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let observer = Arc::new(RecordingObserver::new());
    let url = format!("{}/stew", server.url());
    let err = extractor(observer.clone()).extract(&url).await.unwrap_err();

    m.assert_async().await;
    assert_eq!(fetch_status(err), Some(500));
    assert!(!observer
        .events()
        .iter()
        .any(|event| matches!(event, ExtractionEvent::FallbackIdentity { .. })));
}

#[tokio::test]
async fn test_browser_headers_are_sent() {
    let mut server = mockito::Server::new_async().await;
    let m = server
        .mock("GET", "/stew")
        .match_header("user-agent", DEFAULT_USER_AGENT)
        .match_header("accept-language", "en-US,en;q=0.9")
        .match_header("accept", mockito::Matcher::Regex("text/html".to_string()))
        .with_status(200)
        .with_body(RECIPE_HTML)
        .create_async()
        .await;

    let url = format!("{}/stew", server.url());
    let recipe = extractor(Arc::new(RecordingObserver::new()))
        .extract(&url)
        .await
        .unwrap();

    m.assert_async().await;
    assert!(recipe.is_some());
}
