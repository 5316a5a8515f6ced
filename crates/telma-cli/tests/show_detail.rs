#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::{SEARCH_PATH, Sandbox, stdout_json};
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn detail_body() -> serde_json::Value {
    json!({
        "recipe": {
            "uri": "http://www.edamam.com/ontologies/edamam.owl#recipe_pad1",
            "label": "Pad Thai",
            "source": "Serious Eats",
            "images": {
                "REGULAR": {"url": "https://img.example/pad1-regular.jpg", "width": 300, "height": 300},
                "LARGE": {"url": "https://img.example/pad1-large.jpg", "width": 600, "height": 600}
            },
            "ingredients": [{"text": "200g rice noodles"}, {"text": "2 eggs"}, {"text": "1 lime"}],
            "totalTime": 1500.0,
            "calories": 2310.8,
            "cuisineType": ["south east asian"],
            "dietLabels": ["Balanced"],
            "dishType": ["main course"],
            "yield": 4.0,
            "ingredientLines": ["200g rice noodles", "2 eggs", "1 lime, in wedges"]
        }
    })
}

#[tokio::test]
async fn show_renders_detail_with_tag_links() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{SEARCH_PATH}/pad1")))
        .and(query_param("type", "public"))
        .and(query_param_is_missing("field"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_body()))
        .expect(1)
        .mount(&server)
        .await;

    let sandbox = Sandbox::new();
    let output = sandbox
        .cmd(&server.uri())
        .args(["show", "pad1", "--format", "json"])
        .output()
        .expect("run telma show");
    assert!(output.status.success(), "{output:?}");

    let view = stdout_json(&output);
    assert_eq!(view["id"], "pad1");
    assert_eq!(view["title"], "Pad Thai");
    assert_eq!(view["author"], "Serious Eats");
    assert_eq!(view["image"], "https://img.example/pad1-large.jpg");
    assert_eq!(view["saved"], false);
    assert_eq!(view["ingredientCount"], 3);
    assert_eq!(view["cookTime"], "1 day");
    assert_eq!(view["calories"], 2310);
    assert_eq!(view["servings"], 4.0);
    assert_eq!(view["ingredientLines"][2], "1 lime, in wedges");

    let tags = view["tags"].as_array().unwrap();
    assert_eq!(tags.len(), 3);
    assert_eq!(tags[0]["kind"], "cuisineType");
    assert_eq!(tags[0]["query"], "cuisineType=south%20east%20asian");
    assert_eq!(tags[1]["label"], "Balanced");
    assert_eq!(tags[1]["query"], "diet=balanced");
    assert_eq!(tags[2]["query"], "dishType=main%20course");
}

#[tokio::test]
async fn show_text_view() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{SEARCH_PATH}/pad1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_body()))
        .mount(&server)
        .await;

    Sandbox::new()
        .cmd(&server.uri())
        .args(["show", "pad1", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Pad Thai\nby Serious Eats\n"))
        .stdout(predicate::str::contains(
            "3 Ingredients · 1 day · 2310 Calories · 4 Servings",
        ))
        .stdout(predicate::str::contains("telma recipes \"diet=balanced\""))
        .stdout(predicate::str::contains("  - 2 eggs"));
}

#[tokio::test]
async fn show_unknown_recipe_exits_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{SEARCH_PATH}/nope")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    Sandbox::new()
        .cmd(&server.uri())
        .args(["show", "nope"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to load recipe 'nope'"))
        .stderr(predicate::str::contains("test-key").not());
}
