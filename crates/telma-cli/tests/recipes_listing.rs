#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::{SEARCH_PATH, Sandbox, hit, search_page, stdout_json};
use predicates::prelude::*;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn recipes_follows_next_links_until_exhausted() {
    let server = MockServer::start().await;
    let next = format!("{}{SEARCH_PATH}?_cont=page2&type=public", server.uri());

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("cuisineType", "asian"))
        .and(query_param("q", "chicken soup"))
        .and(query_param("app_id", "test-id"))
        .and(query_param("field", "totalTime"))
        .and(query_param_is_missing("_cont"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(
            vec![hit("a1", "Pho", 45.0), hit("a2", "Ramen", 90.0)],
            Some(&next),
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("_cont", "page2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(search_page(vec![hit("a3", "Laksa", 0.0)], None)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let sandbox = Sandbox::new();
    let output = sandbox
        .cmd(&server.uri())
        .args([
            "recipes",
            "cuisineType=asian",
            "-s",
            "chicken soup",
            "--pages",
            "5",
            "--format",
            "json",
        ])
        .output()
        .expect("run telma recipes");
    assert!(output.status.success(), "{output:?}");

    let payload = stdout_json(&output);
    assert_eq!(payload["query"], "cuisineType=asian&q=chicken%20soup");
    assert_eq!(payload["filterCount"], 2);
    assert_eq!(payload["pagesLoaded"], 2);
    assert_eq!(payload["exhausted"], true);
    assert_eq!(payload["message"], "No more recipes");

    let ids: Vec<&str> = payload["recipes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|card| card["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["a1", "a2", "a3"]);
    assert_eq!(payload["recipes"][2]["cookTime"], "<1 minute");
    assert_eq!(payload["recipes"][1]["cookTime"], "1 hour");
}

#[tokio::test]
async fn recipes_stops_at_requested_page_count() {
    let server = MockServer::start().await;
    let next = format!("{}{SEARCH_PATH}?_cont=page2", server.uri());

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param_is_missing("_cont"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(search_page(vec![hit("b1", "Toast", 5.0)], Some(&next))),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("_cont", "page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(vec![], None)))
        .expect(0)
        .mount(&server)
        .await;

    let sandbox = Sandbox::new();
    sandbox
        .cmd(&server.uri())
        .args(["recipes", "mealType=breakfast", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Toast"))
        .stdout(predicate::str::contains(
            "More recipes available: telma recipes \"mealType=breakfast\" --pages 2",
        ));
}

#[tokio::test]
async fn recipes_without_filters_queries_every_meal_type() {
    let server = MockServer::start().await;
    let mut mock = Mock::given(method("GET")).and(path(SEARCH_PATH));
    for meal in ["breakfast", "dinner", "lunch", "snack", "teatime"] {
        mock = mock.and(query_param("mealType", meal));
    }
    mock.respond_with(ResponseTemplate::new(200).set_body_json(search_page(vec![], None)))
        .expect(1)
        .mount(&server)
        .await;

    let sandbox = Sandbox::new();
    let output = sandbox
        .cmd(&server.uri())
        .args(["recipes", "--format", "json"])
        .output()
        .expect("run telma recipes");
    assert!(output.status.success(), "{output:?}");

    let payload = stdout_json(&output);
    assert_eq!(payload["filterCount"], 0);
    assert_eq!(payload["query"], "");
    assert_eq!(payload["message"], "No recipe found");
    assert_eq!(payload["recipes"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn recipes_reports_saved_state_per_card() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{SEARCH_PATH}/c2")))
        .respond_with(ResponseTemplate::new(200).set_body_json(hit("c2", "Stew", 120.0)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(
            vec![hit("c1", "Salad", 10.0), hit("c2", "Stew", 120.0)],
            None,
        )))
        .mount(&server)
        .await;

    let sandbox = Sandbox::new();
    sandbox
        .cmd(&server.uri())
        .args(["toggle", "c2"])
        .assert()
        .success();

    let output = sandbox
        .cmd(&server.uri())
        .args(["recipes", "dishType=soup", "--format", "jsonl"])
        .output()
        .expect("run telma recipes");
    assert!(output.status.success(), "{output:?}");

    let lines: Vec<serde_json::Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["saved"], false);
    assert_eq!(lines[1]["saved"], true);
}

#[tokio::test]
async fn recipes_network_failure_is_reported_inline() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let sandbox = Sandbox::new();
    sandbox
        .cmd(&server.uri())
        .args(["recipes", "q=pie", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Couldn't load recipes (network error)",
        ))
        .stderr(predicate::str::contains("failed to load recipes"));
}

#[test]
fn recipes_requires_credentials() {
    let sandbox = Sandbox::new();
    sandbox
        .offline_cmd()
        .args(["recipes", "q=pie"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("TELMA_APP_ID"));
}
