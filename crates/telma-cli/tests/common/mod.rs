#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::path::Path;
use std::time::Duration;

use assert_cmd::Command;
use serde_json::{Value, json};
use tempfile::TempDir;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// Path of the search endpoint on the mock server.
#[allow(dead_code)]
pub const SEARCH_PATH: &str = "/api/recipes/v2";

/// Isolated data and config directories for one test.
pub struct Sandbox {
    pub data_dir: TempDir,
    pub config_dir: TempDir,
}

impl Sandbox {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self {
            data_dir: tempfile::tempdir().expect("failed to create data dir for tests"),
            config_dir: tempfile::tempdir().expect("failed to create config dir for tests"),
        }
    }

    /// `telma` with credentials set and the API pointed at `api_root`.
    #[allow(dead_code)]
    pub fn cmd(&self, api_root: &str) -> Command {
        let mut cmd = telma_cmd_with_dirs(self.data_dir.path(), self.config_dir.path());
        cmd.env("TELMA_API_URL", format!("{api_root}{SEARCH_PATH}"));
        cmd.env("TELMA_APP_ID", "test-id");
        cmd.env("TELMA_APP_KEY", "test-key");
        cmd
    }

    /// `telma` without API credentials.
    #[allow(dead_code)]
    pub fn offline_cmd(&self) -> Command {
        telma_cmd_with_dirs(self.data_dir.path(), self.config_dir.path())
    }

    /// Raw contents of the saved-recipes file, if it exists.
    #[allow(dead_code)]
    pub fn store_contents(&self) -> Option<Value> {
        let path = self.data_dir.path().join("saved-recipes.json");
        let raw = std::fs::read_to_string(path).ok()?;
        Some(serde_json::from_str(&raw).expect("store file should be valid JSON"))
    }
}

/// Create a configured `telma` command suitable for integration tests.
#[allow(dead_code)]
pub fn telma_cmd_with_dirs(data_dir: &Path, config_dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("telma"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env_remove("TELMA_CONFIG");
    cmd.env_remove("TELMA_APP_ID");
    cmd.env_remove("TELMA_APP_KEY");
    cmd.env_remove("TELMA_API_URL");
    cmd.env_remove("TELMA_OUTPUT_FORMAT");
    cmd.env("TELMA_DATA_DIR", data_dir);
    cmd.env("TELMA_CONFIG_DIR", config_dir);
    cmd.env("NO_COLOR", "1");
    cmd
}

/// A search hit for recipe `id`.
#[allow(dead_code)]
pub fn hit(id: &str, label: &str, minutes: f64) -> Value {
    json!({
        "recipe": {
            "uri": format!("http://www.edamam.com/ontologies/edamam.owl#recipe_{id}"),
            "label": label,
            "image": format!("https://img.example/{id}.jpg"),
            "totalTime": minutes,
        }
    })
}

/// A search response body with an optional next-page link.
#[allow(dead_code)]
pub fn search_page(hits: Vec<Value>, next: Option<&str>) -> Value {
    let mut body = json!({ "from": 1, "to": hits.len(), "hits": hits, "_links": {} });
    if let Some(href) = next {
        body["_links"] = json!({ "next": { "href": href, "title": "Next page" } });
    }
    body
}

/// Parse stdout of a successful run as JSON.
#[allow(dead_code)]
pub fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|err| {
        panic!(
            "stdout is not JSON ({err}): {}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}
