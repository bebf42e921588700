mod utils;

use qbittorrent_webui::client::QbitError;
use qbittorrent_webui::entities::{FilePriority, TorrentState};
use qbittorrent_webui::requests::{
    AddTorrentOptions, ShareLimits, TorrentFilter, TorrentListQuery, TorrentSource,
};
use std::path::PathBuf;
use utils::{body_from_file, form_param, multipart_text, raw_query, setup_client};
use wiremock::matchers::{header_regex, method, path, query_param};
use wiremock::{Mock, Request, ResponseTemplate};

const UBUNTU: &str = "8c212779b4abde7c6bc608063a0d008b7e40ce32";
const DEBIAN: &str = "5a8062c076fa85e8056451c0d9aa04349ae27909";
const MAGNET_ONLY: &str = "3f3b5e5a8d9c2a1b0e7f6d5c4b3a29180f7e6d5c";

fn body_contains(needle: &'static str) -> impl Fn(&Request) -> bool {
    move |request: &Request| String::from_utf8_lossy(&request.body).contains(needle)
}

fn count_occurrences(request: &Request, needle: &str) -> usize {
    String::from_utf8_lossy(&request.body).matches(needle).count()
}

#[tokio::test]
async fn test_list_torrents() {
    let (server, qbit) = setup_client().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/torrents/info"))
        .and(query_param("filter", "downloading"))
        .and(query_param("category", "linux"))
        .and(query_param("sort", "added_on"))
        .and(query_param("reverse", "true"))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body_from_file("test-files/torrents_info.json")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let query = TorrentListQuery::new()
        .filter(TorrentFilter::Downloading)
        .category("linux")
        .sort("added_on", true)
        .page(10, 0);
    let torrents = qbit.torrents(&query).await.unwrap();

    server.verify().await;
    assert_eq!(torrents.len(), 3);

    let ubuntu = &torrents[0];
    assert_eq!(ubuntu.hash, UBUNTU);
    assert_eq!(ubuntu.state, TorrentState::StalledUp);
    assert_eq!(ubuntu.tags, "iso,lts");
    assert_eq!(ubuntu.added_on.timestamp(), 1_716_150_000);
    assert!(ubuntu.is_seeding());
    assert_eq!(ubuntu.calculate_progress(), 100.0);

    let debian = &torrents[1];
    assert_eq!(debian.hash, DEBIAN);
    assert_eq!(debian.state, TorrentState::Downloading);
    assert_eq!(debian.completion_on, -1);
    assert_eq!(debian.calculate_speed(), "(2.46 MB/s)");
    assert_eq!(debian.calculate_time_left(), "⏳Time left: 2 m 0 s");

    let magnet_only = &torrents[2];
    assert_eq!(magnet_only.hash, MAGNET_ONLY);
    assert_eq!(magnet_only.state, TorrentState::MetaDl);
    assert_eq!(magnet_only.size, -1);
    assert_eq!(magnet_only.total_size, -1);
    assert_eq!(magnet_only.amount_left, -1);
    assert_eq!(magnet_only.calculate_size(), "Unknown");
    assert_eq!(magnet_only.calculate_time_left(), "⏳Time left: Unknown");
}

#[tokio::test]
async fn test_list_torrents_without_filters_sends_no_query() {
    let (server, qbit) = setup_client().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/torrents/info"))
        .and(raw_query(None))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let torrents = qbit.torrents(&TorrentListQuery::new()).await.unwrap();

    server.verify().await;
    assert!(torrents.is_empty());
}

#[tokio::test]
async fn test_list_torrents_by_hashes() {
    let (server, qbit) = setup_client().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/torrents/info"))
        .and(raw_query(Some(&format!("hashes={UBUNTU}%7C{DEBIAN}"))))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let query = TorrentListQuery::new().hashes([UBUNTU, DEBIAN]);
    qbit.torrents(&query).await.unwrap();

    server.verify().await;
}

#[tokio::test]
async fn test_torrent_count() {
    let (server, qbit) = setup_client().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/torrents/count"))
        .respond_with(ResponseTemplate::new(200).set_body_string("42"))
        .mount(&server)
        .await;

    assert_eq!(qbit.torrent_count().await.unwrap(), 42);
}

#[tokio::test]
async fn test_torrent_properties() {
    let (server, qbit) = setup_client().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/torrents/properties"))
        .and(query_param("hash", UBUNTU))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body_from_file("test-files/properties.json")),
        )
        .mount(&server)
        .await;

    let properties = qbit.properties(UBUNTU).await.unwrap();

    assert_eq!(properties.save_path, "/downloads/");
    assert_eq!(properties.piece_size, 262_144);
    assert_eq!(properties.pieces_num, 23_326);
    assert_eq!(properties.creation_date.timestamp(), 1_713_974_400);
    assert_eq!(properties.is_private, Some(false));
}

#[tokio::test]
async fn test_torrent_properties_without_metadata() {
    let (server, qbit) = setup_client().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/torrents/properties"))
        .and(query_param("hash", MAGNET_ONLY))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body_from_file("test-files/properties_no_metadata.json")),
        )
        .mount(&server)
        .await;

    let properties = qbit.properties(MAGNET_ONLY).await.unwrap();

    assert_eq!(properties.save_path, "/downloads/");
    assert_eq!(properties.piece_size, -1);
    assert_eq!(properties.total_size, -1);
    assert_eq!(properties.total_wasted, -1);
    assert_eq!(properties.dl_speed_avg, -1);
    assert_eq!(properties.pieces_num, -1);
    assert_eq!(properties.completion_date, -1);
    assert_eq!(properties.is_private, None);
}

#[tokio::test]
async fn test_torrent_files_with_indexes() {
    let (server, qbit) = setup_client().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/torrents/files"))
        .and(query_param("hash", UBUNTU))
        .and(query_param("indexes", "0|1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(body_from_file("test-files/files.json")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let files = qbit.files(UBUNTU, Some(&[0, 1][..])).await.unwrap();

    server.verify().await;
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].index, Some(0));
    assert_eq!(files[0].priority, FilePriority::Normal);
    assert_eq!(files[0].piece_range, [0, 23_325]);
    assert_eq!(files[1].priority, FilePriority::DoNotDownload);
    assert_eq!(files[1].is_seed, None);
}

#[tokio::test]
async fn test_pause_joins_hashes_with_pipe() {
    let (server, qbit) = setup_client().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/torrents/pause"))
        .and(header_regex(
            "content-type",
            "application/x-www-form-urlencoded",
        ))
        .and(form_param("hashes", format!("{UBUNTU}|{DEBIAN}")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    qbit.pause([UBUNTU, DEBIAN]).await.unwrap();

    server.verify().await;
}

#[tokio::test]
async fn test_all_sentinel_is_sent_verbatim() {
    let (server, qbit) = setup_client().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/torrents/resume"))
        .and(form_param("hashes", "all"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v2/torrents/delete"))
        .and(form_param("hashes", "all"))
        .and(form_param("deleteFiles", "true"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    qbit.resume("all").await.unwrap();
    qbit.delete("all", true).await.unwrap();

    server.verify().await;
}

#[tokio::test]
async fn test_tag_separators() {
    let (server, qbit) = setup_client().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/torrents/addTags"))
        .and(form_param("hashes", UBUNTU))
        .and(form_param("tags", "movies,2024"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v2/torrents/removeTags"))
        .and(form_param("hashes", UBUNTU))
        .and(form_param("tags", "movies|2024"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v2/torrents/createTags"))
        .and(form_param("tags", "iso,lts"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    qbit.add_tags(UBUNTU, ["movies", "2024"]).await.unwrap();
    qbit.remove_tags(UBUNTU, ["movies", "2024"]).await.unwrap();
    qbit.create_tags(["iso", "lts"]).await.unwrap();

    server.verify().await;
}

#[tokio::test]
async fn test_trackers_are_newline_joined() {
    let (server, qbit) = setup_client().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/torrents/addTrackers"))
        .and(form_param("hash", UBUNTU))
        .and(form_param(
            "urls",
            "udp://tracker.example.com:80/announce\nhttps://tracker.example.org/announce",
        ))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    qbit.add_trackers(
        UBUNTU,
        [
            "udp://tracker.example.com:80/announce",
            "https://tracker.example.org/announce",
        ],
    )
    .await
    .unwrap();

    server.verify().await;
}

#[tokio::test]
async fn test_set_file_priority() {
    let (server, qbit) = setup_client().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/torrents/filePrio"))
        .and(form_param("hash", UBUNTU))
        .and(form_param("id", "0|2"))
        .and(form_param("priority", "6"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    qbit.set_file_priority(UBUNTU, &[0, 2], FilePriority::High)
        .await
        .unwrap();

    server.verify().await;
}

#[tokio::test]
async fn test_download_limits_and_share_limits() {
    let (server, qbit) = setup_client().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/torrents/downloadLimit"))
        .and(form_param("hashes", format!("{UBUNTU}|{DEBIAN}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(format!(r#"{{"{UBUNTU}":0,"{DEBIAN}":1048576}}"#)),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v2/torrents/setShareLimits"))
        .and(form_param("hashes", UBUNTU))
        .and(form_param("ratioLimit", "1.5"))
        .and(form_param("seedingTimeLimit", "-2"))
        .and(form_param("inactiveSeedingTimeLimit", "-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let limits = qbit.download_limits([UBUNTU, DEBIAN]).await.unwrap();
    assert_eq!(limits[UBUNTU], 0);
    assert_eq!(limits[DEBIAN], 1_048_576);

    let share = ShareLimits {
        ratio_limit: 1.5,
        inactive_seeding_time_limit: -1,
        ..Default::default()
    };
    qbit.set_share_limits(UBUNTU, share).await.unwrap();

    server.verify().await;
}

#[tokio::test]
async fn test_add_torrents_mixes_links_and_files() {
    let (server, qbit) = setup_client().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/torrents/add"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .and(multipart_text(
            "urls",
            concat!(
                "magnet:?xt=urn:btih:5a8062c076fa85e8056451c0d9aa04349ae27909\n",
                "https://example.com/a.torrent"
            ),
        ))
        .and(multipart_text("category", "linux"))
        .and(multipart_text("tags", "iso,lts"))
        .and(multipart_text("paused", "true"))
        .and(body_contains("filename=\"test.torrent\""))
        .and(body_contains("filename=\"memory.torrent\""))
        .and(body_contains("Content-Type: application/x-bittorrent"))
        .and(|request: &Request| count_occurrences(request, "name=\"torrents\"") == 2)
        .respond_with(ResponseTemplate::new(200).set_body_string("Ok."))
        .expect(1)
        .mount(&server)
        .await;

    let options = AddTorrentOptions {
        category: Some("linux".into()),
        tags: Some(vec!["iso".into(), "lts".into()]),
        paused: Some(true),
        ..Default::default()
    };
    let sources = vec![
        TorrentSource::from(format!("magnet:?xt=urn:btih:{DEBIAN}")),
        TorrentSource::from(PathBuf::from("test-files/test.torrent")),
        TorrentSource::from("https://example.com/a.torrent"),
        TorrentSource::bytes("memory.torrent", b"d4:infod4:name3:abcee".to_vec()),
    ];
    let answer = qbit.add_torrents(sources, &options).await.unwrap();

    server.verify().await;
    assert_eq!(answer, "Ok.");
}

#[tokio::test]
async fn test_add_torrents_from_a_stream() {
    let (server, qbit) = setup_client().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/torrents/add"))
        .and(body_contains("filename=\"streamed.torrent\""))
        .and(body_contains("d8:announce"))
        .and(|request: &Request| count_occurrences(request, "name=\"urls\"") == 0)
        .respond_with(ResponseTemplate::new(200).set_body_string("Ok."))
        .expect(1)
        .mount(&server)
        .await;

    let reader: &'static [u8] = b"d8:announce30:http://tracker.example.com/annee";
    let sources = [TorrentSource::stream("streamed.torrent", reader)];
    qbit.add_torrents(sources, &AddTorrentOptions::default())
        .await
        .unwrap();

    server.verify().await;
}

#[tokio::test]
async fn test_add_torrents_requires_a_source() {
    let (server, qbit) = setup_client().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/torrents/add"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let sources: Vec<TorrentSource> = Vec::new();
    let result = qbit.add_torrents(sources, &AddTorrentOptions::default()).await;

    assert!(matches!(result, Err(QbitError::InvalidInput(_))));
    server.verify().await;
}

#[tokio::test]
async fn test_add_torrents_with_missing_file() {
    let (server, qbit) = setup_client().await;

    let result = qbit
        .add_torrents(["test-files/missing.torrent"], &AddTorrentOptions::default())
        .await;

    assert!(matches!(result, Err(QbitError::Io(_))));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unsupported_torrent_file() {
    let (server, qbit) = setup_client().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/torrents/add"))
        .respond_with(ResponseTemplate::new(415).set_body_string("Torrent file is not valid"))
        .mount(&server)
        .await;

    let result = qbit
        .add_torrents(
            [TorrentSource::bytes("bad.torrent", b"garbage".to_vec())],
            &AddTorrentOptions::default(),
        )
        .await;

    assert!(matches!(
        result,
        Err(QbitError::Request { status: 415, message }) if message == "Torrent file is not valid"
    ));
}

#[tokio::test]
async fn test_categories() {
    let (server, qbit) = setup_client().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/torrents/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"linux": {"name": "linux", "savePath": "/downloads/linux"},
                "misc": {"name": "misc", "savePath": ""}}"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v2/torrents/removeCategories"))
        .and(form_param("categories", "linux|misc"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let categories = qbit.categories().await.unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories["linux"].save_path, "/downloads/linux");

    qbit.remove_categories(["linux", "misc"]).await.unwrap();

    server.verify().await;
}

#[tokio::test]
async fn test_trackers_with_pseudo_trackers() {
    let (server, qbit) = setup_client().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/torrents/trackers"))
        .and(query_param("hash", DEBIAN))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[{"url": "** [DHT] **", "status": 2, "tier": "", "num_peers": 12,
                 "num_seeds": 0, "num_leeches": 0, "num_downloaded": 0, "msg": ""},
                {"url": "http://bttracker.debian.org:6969/announce", "status": 2, "tier": 0,
                 "num_peers": 50, "num_seeds": 40, "num_leeches": 10, "num_downloaded": 900,
                 "msg": ""}]"#,
        ))
        .mount(&server)
        .await;

    let trackers = qbit.trackers(DEBIAN).await.unwrap();

    assert_eq!(trackers.len(), 2);
    assert_eq!(trackers[0].tier, None);
    assert_eq!(trackers[1].tier, Some(0));
    assert_eq!(trackers[1].num_seeds, 40);
}
