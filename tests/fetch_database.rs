use serde_json::json;
use std::collections::HashSet;
use std::time::Duration;
use swu_database::analysis::parse_aspects;
use swu_database::api::SwuClient;
use swu_database::database_controller::build_and_save;
use swu_database::fetcher::build_database;
use swu_database::sets::SetTable;
use swu_database::stats::Statistics;
use swu_database::storage::{load_cards_json, load_csv_rows};
use swu_database::{Settings, SwuError};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer, dir: &TempDir) -> Settings {
    Settings {
        api_base_url: format!("{}/cards", server.uri()),
        database_dir: dir.path().join("database"),
        request_delay: Duration::ZERO,
        ..Settings::default()
    }
}

async fn mount_card(server: &MockServer, set: &str, number: u32, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/cards/{}/{}", set, number)))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_sample_cards(server: &MockServer) {
    mount_card(
        server,
        "sor",
        1,
        json!({
            "Set": "SOR", "Number": "001", "Name": "Director Krennic",
            "Subtitle": "Aspiring to Authority", "Type": "Leader", "Rarity": "Common",
            "Aspects": ["Vigilance", "Villainy"], "Arenas": ["Ground"], "Cost": "5"
        }),
    )
    .await;
    mount_card(
        server,
        "sor",
        3,
        json!({
            "Set": "SOR", "Number": "003", "Name": "Chewbacca",
            "Subtitle": "Walking Carpet", "Type": "Leader", "Rarity": "Common",
            "Aspects": ["Vigilance", "Heroism"], "Arenas": ["Ground"], "Cost": "4"
        }),
    )
    .await;
    mount_card(
        server,
        "twi",
        1,
        json!({
            "Set": "TWI", "Number": "001", "Name": "Nute Gunray",
            "Subtitle": "Vindictive Viceroy", "Type": "Leader", "Rarity": "Special",
            "Aspects": ["Vigilance", "Villainy"], "Cost": "6"
        }),
    )
    .await;
}

fn small_table() -> SetTable {
    vec![("SOR".to_string(), 3), ("TWI".to_string(), 2)]
        .into_iter()
        .collect()
}

#[tokio::test]
async fn failed_cards_are_skipped() {
    let server = MockServer::start().await;
    mount_sample_cards(&server).await;
    Mock::given(method("GET"))
        .and(path("/cards/sor/2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = SwuClient::new(&Settings {
        api_base_url: format!("{}/cards", server.uri()),
        ..Settings::default()
    })
    .unwrap();

    let cards = build_database(&client, &small_table(), Duration::ZERO).await;
    let names: Vec<&str> = cards.iter().filter_map(|c| c.name()).collect();
    assert_eq!(names, vec!["Director Krennic", "Chewbacca", "Nute Gunray"]);
}

#[tokio::test]
async fn non_200_is_a_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = SwuClient::new(&Settings {
        api_base_url: format!("{}/cards", server.uri()),
        ..Settings::default()
    })
    .unwrap();

    match client.fetch_card("SOR", 7).await {
        Err(SwuError::Status { set, number, status }) => {
            assert_eq!(set, "SOR");
            assert_eq!(number, 7);
            assert_eq!(status, 404);
        }
        other => panic!("expected a status error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn duplicate_responses_are_dropped() {
    let server = MockServer::start().await;
    let card = json!({"Set": "SOR", "Number": "001", "Name": "Director Krennic"});
    mount_card(&server, "sor", 1, card.clone()).await;
    mount_card(&server, "sor", 2, card).await;

    let client = SwuClient::new(&Settings {
        api_base_url: format!("{}/cards", server.uri()),
        ..Settings::default()
    })
    .unwrap();

    let table: SetTable = vec![("SOR".to_string(), 2)].into_iter().collect();
    let cards = build_database(&client, &table, Duration::ZERO).await;
    assert_eq!(cards.len(), 1);
}

#[tokio::test]
async fn empty_responses_are_skipped() {
    let server = MockServer::start().await;
    mount_card(&server, "sor", 1, json!({})).await;
    mount_card(&server, "sor", 2, json!({"Set": "SOR", "Number": "002", "Name": "Iden Versio"})).await;

    let client = SwuClient::new(&Settings {
        api_base_url: format!("{}/cards", server.uri()),
        ..Settings::default()
    })
    .unwrap();

    let table: SetTable = vec![("SOR".to_string(), 2)].into_iter().collect();
    let cards = build_database(&client, &table, Duration::ZERO).await;
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].name(), Some("Iden Versio"));
}

#[tokio::test]
async fn nothing_is_written_when_no_card_is_fetched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let settings = settings_for(&server, &dir);
    let client = SwuClient::new(&settings).unwrap();

    let stats = build_and_save(&client, &settings, &small_table()).await.unwrap();
    assert!(stats.is_none());
    assert!(!settings.database_dir.exists());
}

#[tokio::test]
async fn writes_every_output_file() {
    let server = MockServer::start().await;
    mount_sample_cards(&server).await;
    let dir = TempDir::new().unwrap();
    let settings = settings_for(&server, &dir);
    let client = SwuClient::new(&settings).unwrap();

    let stats = build_and_save(&client, &settings, &small_table())
        .await
        .unwrap()
        .expect("cards were fetched");
    assert_eq!(stats.total_cards, 3);
    assert_eq!(stats.by_set["SOR"], 2);
    assert_eq!(stats.by_aspect["Vigilance"], 3);
    assert_eq!(stats.by_arena["Ground"], 2);

    let cards = load_cards_json(&settings.cards_json_path()).unwrap();
    assert_eq!(cards.len(), 3);
    let keys: HashSet<(String, String)> = cards
        .iter()
        .filter_map(|c| c.key())
        .map(|(s, n)| (s.to_string(), n.to_string()))
        .collect();
    assert_eq!(keys.len(), cards.len());

    let rows = load_csv_rows(&settings.cards_csv_path()).unwrap();
    assert_eq!(rows.len(), 3);
    for (row, card) in rows.iter().zip(&cards) {
        assert_eq!(parse_aspects(&row["Aspects"]), card.aspects());
    }
    assert_eq!(rows[2]["Arenas"], "");

    let sor = load_cards_json(&settings.by_set_dir().join("SOR.json")).unwrap();
    let twi = load_cards_json(&settings.by_set_dir().join("TWI.json")).unwrap();
    assert_eq!((sor.len(), twi.len()), (2, 1));

    let saved: Statistics =
        serde_json::from_str(&std::fs::read_to_string(settings.statistics_path()).unwrap())
            .unwrap();
    assert_eq!(saved, stats);
}
