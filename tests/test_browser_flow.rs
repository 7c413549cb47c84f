use mockito::{Matcher, Server, ServerGuard};
use recipe_browser::{Category, NoticeLevel, Outcome, RecipeBrowser, RecipeSummary};
use tempfile::TempDir;

fn random_body(count: u64) -> String {
    let recipes: Vec<String> = (1..=count)
        .map(|i| {
            format!(
                r#"{{"id": {i}, "title": "Random Recipe {i}", "image": "https://img.spoonacular.com/recipes/{i}-556x370.jpg", "readyInMinutes": 30}}"#
            )
        })
        .collect();
    format!(r#"{{"recipes": [{}]}}"#, recipes.join(","))
}

async fn mock_random(server: &mut ServerGuard) -> mockito::Mock {
    server
        .mock("GET", "/recipes/random")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("apiKey".into(), "test_key".into()),
            Matcher::UrlEncoded("number".into(), "30".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(random_body(30))
        .create_async()
        .await
}

fn browser_for(server: &ServerGuard, dir: &TempDir) -> RecipeBrowser {
    RecipeBrowser::builder()
        .api_key("test_key")
        .base_url(server.url())
        .cache_path(dir.path().join("recipes.json"))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_startup_with_corrupted_snapshot() {
    let _ = env_logger::try_init();
    let mut server = Server::new_async().await;
    let mock = mock_random(&mut server).await;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("recipes.json"), "this is not json").unwrap();

    let browser = browser_for(&server, &dir);
    assert_eq!(browser.initialize().await, Outcome::Updated);

    let recipes = browser.recipes().await;
    assert_eq!(recipes.len(), 30);
    assert_eq!(recipes[0].title, "Random Recipe 1");
    // The snapshot was rewritten with the fresh list
    assert_eq!(browser.cache().load().await, recipes);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_startup_restores_snapshot_then_refreshes() {
    let mut server = Server::new_async().await;
    let mock = mock_random(&mut server).await;

    let dir = tempfile::tempdir().unwrap();
    let saved = vec![RecipeSummary {
        id: 999,
        title: "Yesterday's Lasagna".to_string(),
        image: None,
    }];
    std::fs::write(
        dir.path().join("recipes.json"),
        serde_json::to_string(&saved).unwrap(),
    )
    .unwrap();

    let browser = browser_for(&server, &dir);
    browser.initialize().await;

    let recipes = browser.recipes().await;
    assert_eq!(recipes.len(), 30);
    assert!(recipes.iter().all(|r| r.id != 999));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_startup_offline_keeps_snapshot() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/recipes/random")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let saved = vec![RecipeSummary {
        id: 5,
        title: "Cached Chili".to_string(),
        image: Some("https://img/5.jpg".to_string()),
    }];
    std::fs::write(
        dir.path().join("recipes.json"),
        serde_json::to_string(&saved).unwrap(),
    )
    .unwrap();

    let browser = browser_for(&server, &dir);
    let outcome = browser.initialize().await;
    assert_eq!(outcome.notice().unwrap().level, NoticeLevel::Error);
    assert_eq!(browser.recipes().await, saved);
}

#[tokio::test]
async fn test_keyword_search_without_results() {
    let mut server = Server::new_async().await;
    let _random = mock_random(&mut server).await;
    let search = server
        .mock("GET", "/recipes/complexSearch")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), "zzzznorecipe".into()),
            Matcher::UrlEncoded("number".into(), "24".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"results": [], "offset": 0, "number": 24, "totalResults": 0}"#)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let browser = browser_for(&server, &dir);
    browser.initialize().await;
    let before = browser.recipes().await;

    let outcome = browser.search("zzzznorecipe").await;
    let notice = outcome.notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Info);
    assert!(notice.message.contains("zzzznorecipe"));
    assert_eq!(browser.recipes().await, before);
    search.assert_async().await;
}

#[tokio::test]
async fn test_category_search_uses_cuisine_identifier() {
    let mut server = Server::new_async().await;
    let search = server
        .mock("GET", "/recipes/complexSearch")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("cuisine".into(), "Italian".into()),
            Matcher::UrlEncoded("number".into(), "24".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"results": [
                {"id": 654959, "title": "Pasta With Tuna", "image": "https://img/654959.jpg", "imageType": "jpg"},
                {"id": 511728, "title": "Pasta Margherita", "image": "https://img/511728.jpg", "imageType": "jpg"}
            ], "offset": 0, "number": 24, "totalResults": 2}"#,
        )
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let browser = browser_for(&server, &dir);

    assert_eq!(browser.select_category_label("Italiana").await, Outcome::Updated);
    let state = browser.state().await;
    assert!(state.active_category.is_none());
    let ids: Vec<u64> = state.recipes.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![654959, 511728]);
    assert_eq!(browser.cache().load().await, state.recipes);
    search.assert_async().await;
}

#[tokio::test]
async fn test_open_detail_round_trip() {
    let mut server = Server::new_async().await;
    let detail = server
        .mock("GET", "/recipes/716429/information")
        .match_query(Matcher::UrlEncoded("apiKey".into(), "test_key".into()))
        .with_status(200)
        .with_body(
            r#"{
                "id": 716429,
                "title": "Pasta with Garlic, Scallions, Cauliflower & Breadcrumbs",
                "image": "https://img.spoonacular.com/recipes/716429-556x370.jpg",
                "servings": 2,
                "readyInMinutes": 45,
                "sourceUrl": "https://fullbellysisters.blogspot.com/2012/06/pasta-with-garlic-scallions-cauliflower.html",
                "extendedIngredients": [
                    {"id": 1001, "name": "butter", "original": "1 tbsp butter", "amount": 1.0, "unit": "tbsp"},
                    {"id": 10011135, "name": "cauliflower florets", "original": "about 2 cups frozen cauliflower florets", "amount": 2.0, "unit": "cups"}
                ],
                "instructions": "<ol><li>Melt the butter.</li><li>Add the cauliflower.</li></ol>",
                "dishTypes": ["lunch", "main course"]
            }"#,
        )
        .expect(2)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let browser = browser_for(&server, &dir);

    assert_eq!(browser.open_detail(716429).await, Outcome::Updated);
    let state = browser.state().await;
    assert!(state.detail_visible);
    let opened = state.selected_detail.unwrap();
    assert_eq!(opened.id, 716429);
    assert_eq!(opened.extended_ingredients.len(), 2);
    assert!(opened.extra.contains_key("dishTypes"));

    browser.close_detail().await;
    assert!(!browser.state().await.detail_visible);

    browser.open_detail(716429).await;
    assert!(browser.state().await.detail_visible);
    detail.assert_async().await;
}

#[tokio::test]
async fn test_open_detail_unknown_id() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/recipes/1/information")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"status": "failure", "code": 404, "message": "A recipe with the id 1 does not exist."}"#)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let browser = browser_for(&server, &dir);

    let outcome = browser.open_detail(1).await;
    assert_eq!(outcome.notice().unwrap().level, NoticeLevel::Error);
    let state = browser.state().await;
    assert!(!state.detail_visible);
    assert!(state.selected_detail.is_none());
}

#[tokio::test]
async fn test_clear_after_category() {
    let mut server = Server::new_async().await;
    let _random = mock_random(&mut server).await;
    let _search = server
        .mock("GET", "/recipes/complexSearch")
        .match_query(Matcher::UrlEncoded("cuisine".into(), "Mexican".into()))
        .with_status(200)
        .with_body(r#"{"results": [{"id": 1, "title": "Tacos"}]}"#)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let browser = browser_for(&server, &dir);

    browser.select_category(Category::Mexican).await;
    assert_eq!(browser.recipes().await.len(), 1);

    assert_eq!(browser.clear().await, Outcome::Updated);
    let state = browser.state().await;
    assert!(state.active_category.is_none());
    assert_eq!(state.recipes.len(), 30);
}
