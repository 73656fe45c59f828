use std::fs;

use mapf_bridge::tooling::cli::{CliContext, Commands, OutputFormat};
use tempfile::TempDir;

use crate::cli::support::{default_context, run, with_xdg_env, write_file, write_map};

fn validate_json(map: std::path::PathBuf, paths: std::path::PathBuf) -> Commands {
    Commands::Validate {
        map,
        paths,
        cells: Default::default(),
        swap: None,
        allow_wait: false,
        strict: false,
        format: OutputFormat::Json,
    }
}

#[test]
fn validate_json_contract_has_required_fields() {
    let temp_dir = TempDir::new().unwrap();
    let map = write_map(temp_dir.path(), "open.map", &["....", "....", "....", "...."]);
    let paths = write_file(temp_dir.path(), "paths.txt", "Agent 0: (5,5)\n");

    let ctx = default_context(temp_dir.path());
    let (result, diagnostics) = run(&ctx, &validate_json(map, paths));
    let output = result.unwrap();
    assert!(diagnostics.is_empty());

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed.get("valid").and_then(|v| v.as_bool()), Some(false));
    assert!(parsed.get("checked_at").and_then(|v| v.as_str()).is_some());
    assert_eq!(parsed["map"]["width"].as_u64(), Some(4));
    assert_eq!(parsed["map"]["passable_cells"].as_u64(), Some(16));
    assert_eq!(parsed["agents"].as_u64(), Some(1));
    assert_eq!(parsed["issue_count"].as_u64(), Some(1));
    let issues = parsed["issues"].as_array().unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0]["kind"], "out_of_range");
    assert_eq!(issues[0]["agent"], 0);
    assert_eq!(issues[0]["t"], 0);
    assert_eq!(issues[0]["cell"]["x"], 5);
    assert_eq!(parsed["orientation"]["source"], "forced");
}

#[test]
fn validate_text_summary_reports_clean_run() {
    let temp_dir = TempDir::new().unwrap();
    let map = write_map(temp_dir.path(), "open.map", &["...", "...", "..."]);
    let paths = write_file(temp_dir.path(), "paths.txt", "Agent 0: (0,0)->(1,0)->(1,1)\n");

    let ctx = default_context(temp_dir.path());
    let (result, diagnostics) = run(
        &ctx,
        &Commands::Validate {
            map,
            paths,
            cells: Default::default(),
            swap: None,
            allow_wait: false,
            strict: true,
            format: OutputFormat::Text,
        },
    );
    let output = result.unwrap();
    assert!(diagnostics.is_empty());
    assert!(output.contains("Cells checked: 3"));
    assert!(output.contains("OK: no issues"));
}

#[test]
fn time_major_summary_names_map_and_horizon() {
    let temp_dir = TempDir::new().unwrap();
    let map = write_map(temp_dir.path(), "row.map", &["..."]);
    let paths = write_file(temp_dir.path(), "paths.txt", "Agent 0: (0,0)->(0,1)->(0,2)\n");

    let ctx = default_context(temp_dir.path());
    let (result, _) = run(
        &ctx,
        &Commands::TimeMajor {
            map,
            paths,
            out: "vis/out.txt".into(),
            agents: None,
            swap: None,
        },
    );
    let output = result.unwrap();
    assert!(output.starts_with("OK: map=(3x1) N=1 T=3 swap=on"));
    assert!(output.contains("out.txt"));
}

#[test]
fn config_command_renders_effective_toml() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let workspace = temp_dir.path().join("workspace");
        fs::create_dir_all(&workspace).unwrap();
        fs::write(
            workspace.join("mapf-bridge.toml"),
            "[validation]\nallow_wait = true\n\n[playback]\nrepeat = 3\n",
        )
        .unwrap();

        let ctx = CliContext::new(workspace, None).unwrap();
        assert!(ctx.config().validation.allow_wait);
        assert_eq!(ctx.config().playback.repeat, 3);

        let output = ctx.execute(&Commands::Config).unwrap();
        let parsed: toml::Value = toml::from_str(&output).unwrap();
        assert_eq!(parsed["validation"]["allow_wait"].as_bool(), Some(true));
        assert_eq!(parsed["playback"]["repeat"].as_integer(), Some(3));
        assert_eq!(parsed["map"]["obstacles"].as_str(), Some("@"));
        assert_eq!(parsed["conversion"]["swap"].as_str(), Some("auto"));
    });
}

#[test]
fn explicit_config_file_must_exist() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.toml");
    let err = CliContext::new(temp_dir.path().to_path_buf(), Some(missing))
        .err()
        .unwrap();
    assert_eq!(err.exit_code(), 1);
}
