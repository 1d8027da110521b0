use std::fs;
use std::path::PathBuf;

use repo_version_manager::testing::{HostCall, InMemoryHost};
use repo_version_manager::{
    CampaignResult, ResultsStore, Runner, RunnerConfig, SearchMode, Settings, UpdatePlan,
    UpdateRequest, ValueKind, VersionClass,
};
use serde_json::json;
use tempfile::TempDir;

const REPO: &str = "acme/widgets";
const RECIPE: &str = "conanrecipe_ckit.txt";

fn fixture(path: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(path);
    fs::read_to_string(path).unwrap()
}

fn marker_settings() -> Settings {
    Settings {
        repos: vec![REPO.to_string()],
        ..Settings::default()
    }
}

fn store(dir: &TempDir) -> ResultsStore {
    ResultsStore::new(
        dir.path().join("output.json"),
        dir.path().join("created_prs.txt"),
    )
}

#[tokio::test]
async fn only_the_latest_branch_gets_a_pull_request() {
    let host = InMemoryHost::new()
        .with_file(REPO, "release/1.0", RECIPE, "constructionkit/[1.2.0]@spx00/release\n")
        .with_file(
            REPO,
            "release/1.5",
            RECIPE,
            "constructionkit/[1.4.0 || >1.0.0 <1.3.0]@spx00/release\n",
        )
        .with_file(REPO, "release/2.0", RECIPE, "constructionkit/[>=1.0.0]@spx00/release\n");
    let settings = marker_settings();
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    let runner = Runner::new(&host, RunnerConfig::immediate());

    let checked = runner.check(&settings).await.unwrap();
    store.save(&checked).unwrap();

    let result = store.load().unwrap();
    let classes: Vec<_> = result.repositories[0]
        .branches
        .iter()
        .map(|record| record.class())
        .collect();
    assert_eq!(
        classes,
        vec![
            Some(VersionClass::Fixed),
            Some(VersionClass::Fixed),
            Some(VersionClass::Latest)
        ]
    );

    let plan = UpdatePlan::for_result(
        &result,
        settings.message_formats(),
        UpdateRequest::Marker {
            version: "1.45.0".to_string(),
        },
    );
    let report = runner.update(&result, &plan).await.unwrap();
    assert!(store.save_pr_urls(&report.created_urls()).unwrap());

    assert_eq!(
        fs::read_to_string(store.pr_list_path()).unwrap(),
        "https://github.com/acme/widgets/pull/1\n"
    );
    let working_branches: Vec<String> = host
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            HostCall::CreateBranch { branch, .. } => Some(branch),
            _ => None,
        })
        .collect();
    assert_eq!(working_branches, vec!["update-version-1.45.0-release/2.0"]);
}

#[tokio::test]
async fn marker_rewrite_keeps_line_endings_and_indentation() {
    let host = InMemoryHost::new().with_file(
        REPO,
        "release/3.0",
        RECIPE,
        &fixture("files/conanrecipe_ckit.txt"),
    );
    let settings = marker_settings();
    let runner = Runner::new(&host, RunnerConfig::immediate());

    let result = runner.check(&settings).await.unwrap();
    let plan = UpdatePlan::for_result(
        &result,
        settings.message_formats(),
        UpdateRequest::Marker {
            version: "1.45.0".to_string(),
        },
    );
    let report = runner.update(&result, &plan).await.unwrap();
    assert_eq!(report.created(), 1);

    assert_eq!(
        host.file_content(REPO, "update-version-1.45.0-release/3.0", RECIPE)
            .unwrap(),
        "[requires]\r\nzlib/1.3\r\n    constructionkit/1.45.0@spx00/release\r\n\r\n[generators]\r\nCMakeDeps\r\n"
    );
}

#[tokio::test]
async fn stored_results_drive_the_update() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    fs::write(store.results_path(), fixture("results/output.json")).unwrap();

    let result: CampaignResult = store.load().unwrap();
    assert_eq!(
        result.update_candidates().collect::<Vec<_>>(),
        vec![(REPO, "release/2.0")]
    );
    assert_eq!(
        result.repository("acme/gadgets").and_then(|r| r.error.as_deref()),
        Some("GitHub API error (404): Not Found")
    );

    let host = InMemoryHost::new()
        .with_file(REPO, "release/1.0", RECIPE, "constructionkit/[1.2.0]@spx00/release\n")
        .with_file(REPO, "release/2.0", RECIPE, "constructionkit/[>=1.0.0]@spx00/release\n");
    let plan = UpdatePlan::for_result(
        &result,
        marker_settings().message_formats(),
        UpdateRequest::Marker {
            version: "2.0.0".to_string(),
        },
    );
    let report = Runner::new(&host, RunnerConfig::immediate())
        .update(&result, &plan)
        .await
        .unwrap();

    assert_eq!(report.created(), 1);
    assert_eq!(report.prs[0].source_branch, "release/2.0");
}

#[tokio::test]
async fn key_value_campaign_updates_every_searched_branch() {
    let deps = fixture("files/deps.json");
    let host = InMemoryHost::new()
        .with_file(REPO, "release/1.0", "deps.json", &deps)
        .with_file(REPO, "release/2.0", "deps.json", &deps)
        .with_file(REPO, "release/2.1", "deps.json", &deps);
    let settings = Settings {
        repos: vec![REPO.to_string()],
        target_path: "deps.json".to_string(),
        branch_pattern: "release/2.*".to_string(),
        search_mode: SearchMode::KeyValue,
        search_key: Some("Version".to_string()),
        ..Settings::default()
    };
    let runner = Runner::new(&host, RunnerConfig::immediate());

    let result = runner.check(&settings).await.unwrap();
    let record = result.find(REPO, "release/2.0").unwrap();
    assert_eq!(
        record.outcome,
        repo_version_manager::BranchOutcome::Search {
            value: json!({
                "dependencies.ConstructionKit.version": "1.44.0",
                "dependencies.zlib.version": "1.3.1"
            })
        }
    );
    assert!(result.find(REPO, "release/1.0").is_none());

    let plan = UpdatePlan::for_result(
        &result,
        settings.message_formats(),
        UpdateRequest::JsonPath {
            path: "dependencies.ConstructionKit.version".to_string(),
            value: "1.45.0".to_string(),
            kind: ValueKind::String,
        },
    );
    let report = runner.update(&result, &plan).await.unwrap();
    assert_eq!(report.created(), 2);

    let body = host
        .pull_requests()
        .into_iter()
        .find_map(|call| match call {
            HostCall::CreatePullRequest { body, .. } => Some(body),
            _ => None,
        })
        .unwrap();
    assert_eq!(
        body,
        "This PR sets `dependencies.ConstructionKit.version` to `1.45.0` in `deps.json`."
    );

    let updated = host
        .file_content(REPO, "update-version-1.45.0-release/2.1", "deps.json")
        .unwrap();
    let updated: serde_json::Value = serde_json::from_str(&updated).unwrap();
    assert_eq!(updated["dependencies"]["ConstructionKit"]["version"], "1.45.0");
    assert_eq!(updated["dependencies"]["zlib"]["version"], "1.3.1");
    assert_eq!(updated["targets"][0]["flags"][1], "-DRELEASE");
}
