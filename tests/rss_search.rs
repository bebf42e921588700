mod utils;

use qbittorrent_webui::entities::{RssItem, RssRule, SearchState};
use serde_json::{Value, json};
use utils::{body_from_file, form_param, setup_client};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, Request, ResponseTemplate};

fn form_value(request: &Request, key: &str) -> Option<String> {
    form_urlencoded::parse(&request.body)
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

#[tokio::test]
async fn test_rss_items_tree() {
    let (server, qbit) = setup_client().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/rss/items"))
        .and(query_param("withData", "true"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(body_from_file("test-files/rss_items.json")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let items = qbit.rss_items(true).await.unwrap();
    server.verify().await;

    let Some(RssItem::Folder(linux)) = items.get("Linux") else {
        panic!("Linux should be a folder");
    };
    let Some(RssItem::Feed(ubuntu)) = linux.get("Ubuntu") else {
        panic!("Ubuntu should be a feed");
    };
    assert_eq!(ubuntu.url, "https://example.com/ubuntu.xml");
    assert_eq!(ubuntu.articles.len(), 1);
    assert_eq!(
        ubuntu.articles[0].torrent_url.as_deref(),
        Some("https://example.com/ubuntu-24.04.torrent")
    );
    assert_eq!(ubuntu.articles[0].is_read, Some(false));

    assert!(matches!(items.get("News"), Some(RssItem::Feed(feed)) if feed.articles.is_empty()));
}

#[tokio::test]
async fn test_rss_feed_management() {
    let (server, qbit) = setup_client().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/rss/addFeed"))
        .and(form_param("url", "https://example.com/debian.xml"))
        .and(form_param("path", "Linux\\Debian"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v2/rss/moveItem"))
        .and(form_param("itemPath", "Linux\\Debian"))
        .and(form_param("destPath", "Debian"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v2/rss/markAsRead"))
        .and(form_param("itemPath", "Debian"))
        .and(|request: &Request| form_value(request, "articleId").is_none())
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    qbit.rss_add_feed("https://example.com/debian.xml", Some("Linux\\Debian"))
        .await
        .unwrap();
    qbit.rss_move_item("Linux\\Debian", "Debian").await.unwrap();
    qbit.rss_mark_as_read("Debian", None).await.unwrap();

    server.verify().await;
}

#[tokio::test]
async fn test_rss_existing_item_conflict() {
    let (server, qbit) = setup_client().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/rss/addFolder"))
        .respond_with(ResponseTemplate::new(409).set_body_string("Item already exists"))
        .mount(&server)
        .await;

    let error = qbit.rss_add_folder("Linux").await.unwrap_err();
    assert!(error.to_string().contains("status=409"));
    assert!(error.to_string().contains("Item already exists"));
}

#[tokio::test]
async fn test_rss_rules() {
    let (server, qbit) = setup_client().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/rss/rules"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(body_from_file("test-files/rss_rules.json")),
        )
        .mount(&server)
        .await;

    let rules = qbit.rss_rules().await.unwrap();
    let rule = &rules["Ubuntu LTS"];

    assert!(rule.enabled);
    assert_eq!(rule.must_contain, "LTS");
    assert_eq!(rule.affected_feeds, ["https://example.com/ubuntu.xml"]);
    assert_eq!(rule.add_paused, Some(false));
    assert_eq!(rule.other["torrentParams"], json!({"category": "linux"}));
}

#[tokio::test]
async fn test_rss_set_rule_sends_json_definition() {
    let (server, qbit) = setup_client().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/rss/setRule"))
        .and(form_param("ruleName", "Debian"))
        .and(|request: &Request| {
            let Some(definition) = form_value(request, "ruleDef") else {
                return false;
            };
            let Ok(definition) = serde_json::from_str::<Value>(&definition) else {
                return false;
            };
            definition["enabled"] == json!(true)
                && definition["mustContain"] == json!("debian")
                && definition["affectedFeeds"] == json!(["https://example.com/debian.xml"])
                && definition.get("addPaused").is_none()
        })
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let rule = RssRule {
        enabled: true,
        must_contain: "debian".into(),
        affected_feeds: vec!["https://example.com/debian.xml".into()],
        ..Default::default()
    };
    qbit.rss_set_rule("Debian", &rule).await.unwrap();

    server.verify().await;
}

#[tokio::test]
async fn test_rss_remove_rules_pipe_joined() {
    let (server, qbit) = setup_client().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/rss/removeRule"))
        .and(form_param("ruleName", "Ubuntu LTS|Debian"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    qbit.rss_remove_rules(["Ubuntu LTS", "Debian"]).await.unwrap();

    server.verify().await;
}

#[tokio::test]
async fn test_search_start_and_results() {
    let (server, qbit) = setup_client().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/search/start"))
        .and(form_param("pattern", "debian netinst"))
        .and(form_param("plugins", "legittorrents|linuxtracker"))
        .and(form_param("category", "all"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":12345}"#))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/search/results"))
        .and(query_param("id", "12345"))
        .and(query_param("limit", "0"))
        .and(query_param("offset", "0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body_from_file("test-files/search_results.json")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let job = qbit
        .search_start("debian netinst", ["legittorrents", "linuxtracker"], "all")
        .await
        .unwrap();
    assert_eq!(job.id, 12345);

    let results = qbit.search_results(job.id, 0, 0).await.unwrap();
    server.verify().await;

    assert_eq!(results.status, SearchState::Running);
    assert_eq!(results.total, 1);
    assert_eq!(results.results[0].nb_seeders, 250);
    assert!(results.results[0].file_url.starts_with("magnet:"));
}

#[tokio::test]
async fn test_search_status_of_every_job() {
    let (server, qbit) = setup_client().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/search/status"))
        .and(|request: &Request| request.url.query().is_none())
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[{"id":1,"status":"Stopped","total":10},{"id":2,"status":"Running","total":3}]"#,
        ))
        .mount(&server)
        .await;

    let jobs = qbit.search_status(None).await.unwrap();

    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].status, SearchState::Stopped);
    assert_eq!(jobs[1].total, 3);
}

#[tokio::test]
async fn test_search_plugins() {
    let (server, qbit) = setup_client().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/search/plugins"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[{"enabled":true,"fullName":"Legit Torrents","name":"legittorrents",
                 "supportedCategories":[{"id":"all","name":"All categories"},
                                        {"id":"software","name":"Software"}],
                 "url":"http://www.legittorrents.info","version":"2.3"}]"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v2/search/enablePlugin"))
        .and(form_param("names", "legittorrents|linuxtracker"))
        .and(form_param("enable", "false"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let plugins = qbit.search_plugins().await.unwrap();
    assert_eq!(plugins[0].full_name, "Legit Torrents");
    assert_eq!(plugins[0].supported_categories.len(), 2);

    qbit.search_enable_plugins(["legittorrents", "linuxtracker"], false)
        .await
        .unwrap();

    server.verify().await;
}
