//! Integration tests for the evaluating commands.
//!
//! Each test drives `run` end to end with a capturing host, the menu fixtures under
//! `tests/fixtures`, and a scratch configuration file.

use camino::Utf8PathBuf;
use menu_visibility_lib::Host;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MENUS_TOML: &str = "tests/fixtures/menus.toml";
const MENUS_JSON: &str = "tests/fixtures/menus.json";

/// Test host that captures output to in-memory buffers.
#[derive(Debug, Default)]
struct TestHost {
    output_buf: Vec<u8>,
    error_buf: Vec<u8>,
    exit_code: Option<i32>,
}

impl TestHost {
    fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }
}

impl Host for TestHost {
    fn output(&mut self) -> impl std::io::Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl std::io::Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

fn write_config(dir: &TempDir, contents: &str) -> Utf8PathBuf {
    let path = Utf8PathBuf::try_from(dir.path().join("visibility.toml")).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

async fn run(args: &[&str]) -> (TestHost, menu_visibility_lib::Result<()>) {
    let mut host = TestHost::default();
    let argv: Vec<&str> = core::iter::once("menu-visibility").chain(args.iter().copied()).collect();
    let result = menu_visibility_lib::run(&mut host, argv).await;
    (host, result)
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_filter_anonymous_visitor() {
    let (host, result) = run(&["filter", MENUS_TOML, "--color", "never"]).await;
    assert!(result.is_ok(), "{result:?}");

    let output = host.output_str();
    assert!(output.contains("  [1] Home"), "{output}");
    assert!(output.contains("  [3] Sign In"), "{output}");
    assert!(!output.contains("My Account"), "{output}");
    assert!(!output.contains("Dashboard"), "{output}");

    // optional rule categories are off by default
    assert!(output.contains("  [5] Shop"), "{output}");
    assert!(output.contains("  [10] Kenya Offers"), "{output}");
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_filter_editor_on_mobile() {
    let (host, result) = run(&[
        "filter",
        MENUS_TOML,
        "--color",
        "never",
        "--role",
        "editor",
        "--user-agent",
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Mobile/15E148",
    ])
    .await;
    assert!(result.is_ok(), "{result:?}");

    let output = host.output_str();
    assert!(output.contains("  [2] My Account"), "{output}");
    assert!(output.contains("  [4] Dashboard"), "{output}");
    assert!(!output.contains("Sign In"), "{output}");
    assert!(!output.contains("Desktop Tools"), "{output}");
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_explain_lists_reasons() {
    let (host, result) = run(&["explain", MENUS_TOML, "--color", "never", "--role", "subscriber"]).await;
    assert!(result.is_ok(), "{result:?}");

    let output = host.output_str();
    assert!(output.contains("✔ [2] My Account"), "{output}");
    assert!(output.contains("✘ [3] Sign In"), "{output}");
    assert!(output.contains("logged-out-only: visitor is logged in"), "{output}");
    assert!(output.contains("role mismatch: requires one of [administrator, editor]"), "{output}");
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_stats_error_if_hidden() {
    let (host, result) = run(&["stats", MENUS_TOML, "--color", "never", "--error-if-hidden"]).await;

    assert!(result.is_err());
    assert_eq!(host.exit_code, Some(1));

    let output = host.output_str();
    assert!(output.contains("primary : 5 total, 2 hidden, 3 visible"), "{output}");
    assert!(output.contains("footer  : 2 total, 0 hidden, 2 visible"), "{output}");
    assert!(output.contains("overall : 7 total, 2 hidden, 5 visible"), "{output}");
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_stats_nothing_hidden_succeeds() {
    let (host, result) = run(&["stats", MENUS_JSON, "--color", "never", "--error-if-hidden", "--page", "front-page"]).await;

    assert!(result.is_ok(), "{result:?}");
    assert_eq!(host.exit_code, None);
    assert!(host.output_str().contains("overall : 3 total, 0 hidden, 3 visible"));
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
async fn test_commerce_and_language_need_advanced_features() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = write_config(
        &temp_dir,
        "advanced_features = true\n[features]\ncommerce = true\nlanguage = true\n",
    );

    let (host, result) = run(&["filter", MENUS_TOML, "--color", "never", "--config", config.as_str()]).await;
    assert!(result.is_ok(), "{result:?}");
    assert!(!host.output_str().contains("Shop"));

    let (host, result) = run(&["filter", MENUS_TOML, "--color", "never", "--config", config.as_str(), "--page", "shop"]).await;
    assert!(result.is_ok(), "{result:?}");
    assert!(host.output_str().contains("  [5] Shop"));

    let (host, result) = run(&["filter", MENUS_JSON, "--color", "never", "--config", config.as_str(), "--language", "en"]).await;
    assert!(result.is_ok(), "{result:?}");
    assert!(!host.output_str().contains("Bonjour"));
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
async fn test_default_visibility_from_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = write_config(&temp_dir, "default_visibility = \"logged-in-only\"\n");

    let (host, result) = run(&["stats", MENUS_JSON, "--color", "never", "--config", config.as_str(), "--page", "front-page"]).await;
    assert!(result.is_ok(), "{result:?}");

    // the two items without a rule now require a login
    assert!(host.output_str().contains("overall : 3 total, 2 hidden, 1 visible"));
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
async fn test_json_report_replaces_console_output() {
    let temp_dir = tempfile::tempdir().unwrap();
    let json_path = Utf8PathBuf::try_from(temp_dir.path().join("report.json")).unwrap();

    let (host, result) = run(&["explain", MENUS_TOML, "--json", json_path.as_str()]).await;
    assert!(result.is_ok(), "{result:?}");
    assert!(host.output_buf.is_empty());

    let report: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    let primary = &report["menus"][0];
    assert_eq!(primary["name"], "primary");
    assert_eq!(primary["items"][1]["title"], "My Account");
    assert_eq!(primary["items"][1]["visible"], false);
    assert_eq!(primary["items"][1]["reasons"][0], "logged-in-only: visitor is not logged in");
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
async fn test_explicit_country_with_location_rules() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = write_config(
        &temp_dir,
        "advanced_features = true\n[features]\nlocation = true\n[geolocation]\napi_key = \"test-key\"\nbase_url = \"http://127.0.0.1:9\"\n",
    );

    let (host, result) = run(&["filter", MENUS_TOML, "--color", "never", "--config", config.as_str(), "--country", "ke"]).await;
    assert!(result.is_ok(), "{result:?}");
    assert!(host.output_str().contains("Kenya Offers"));

    let (host, result) = run(&["filter", MENUS_TOML, "--color", "never", "--config", config.as_str(), "--country", "US"]).await;
    assert!(result.is_ok(), "{result:?}");
    assert!(!host.output_str().contains("Kenya Offers"));

    // an unknown country never hides an item
    let (host, result) = run(&["filter", MENUS_TOML, "--color", "never", "--config", config.as_str()]).await;
    assert!(result.is_ok(), "{result:?}");
    assert!(host.output_str().contains("Kenya Offers"));
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
async fn test_ip_is_geolocated_once() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ipgeo"))
        .and(query_param("apiKey", "test-key"))
        .and(query_param("ip", "203.0.113.7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ip": "203.0.113.7", "country_code2": "US" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let temp_dir = tempfile::tempdir().unwrap();
    let config = write_config(
        &temp_dir,
        &format!(
            "advanced_features = true\n[features]\nlocation = true\n[geolocation]\napi_key = \"test-key\"\nbase_url = \"{}\"\n",
            mock_server.uri()
        ),
    );

    let (host, result) = run(&["filter", MENUS_TOML, "--color", "never", "--config", config.as_str(), "--ip", "203.0.113.7"]).await;
    assert!(result.is_ok(), "{result:?}");

    let output = host.output_str();
    assert!(!output.contains("Kenya Offers"), "{output}");
    assert!(output.contains("Home"), "{output}");
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
async fn test_ip_not_geolocated_without_country_rules() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "country_code2": "US" })))
        .expect(0)
        .mount(&mock_server)
        .await;

    let temp_dir = tempfile::tempdir().unwrap();
    let config = write_config(
        &temp_dir,
        &format!(
            "advanced_features = true\n[features]\nlocation = true\n[geolocation]\napi_key = \"test-key\"\nbase_url = \"{}\"\n",
            mock_server.uri()
        ),
    );

    // the JSON fixture has no country allow-lists
    let (_, result) = run(&["filter", MENUS_JSON, "--color", "never", "--config", config.as_str(), "--ip", "203.0.113.7"]).await;
    assert!(result.is_ok(), "{result:?}");
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
async fn test_init_then_validate() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = Utf8PathBuf::try_from(temp_dir.path().join("generated.toml")).unwrap();

    let (host, result) = run(&["init", config.as_str()]).await;
    assert!(result.is_ok(), "{result:?}");
    assert!(host.output_str().contains("generated.toml"));
    assert_eq!(fs::read_to_string(&config).unwrap(), menu_visibility_lib::commands::DEFAULT_CONFIG_TOML);

    let (host, result) = run(&["validate", "--config", config.as_str(), "--menus", MENUS_TOML]).await;
    assert!(result.is_ok(), "{result:?}");
    let output = host.output_str();
    assert!(output.contains("Configuration file is valid"), "{output}");
    assert!(output.contains("loaded with 7 item(s)"), "{output}");
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_missing_menu_file_fails() {
    let (_, result) = run(&["filter", "tests/fixtures/does-not-exist.toml"]).await;
    assert!(result.is_err());
}
