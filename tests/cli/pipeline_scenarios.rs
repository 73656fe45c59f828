use std::fs;

use mapf_bridge::error::ApiError;
use mapf_bridge::normalize::select_agents;
use mapf_bridge::orientation::SwapMode;
use mapf_bridge::paths::{extract_solver_paths, parse_visualizer_paths};
use mapf_bridge::tooling::cli::{CellRuleArgs, Commands, OutputFormat};
use mapf_bridge::types::RawPair;
use tempfile::TempDir;

use crate::cli::support::{default_context, run, write_file, write_map};

fn time_major(agents: Option<i64>, swap: Option<SwapMode>) -> Commands {
    Commands::TimeMajor {
        map: "grid.map".into(),
        paths: "paths.txt".into(),
        out: "out.txt".into(),
        agents,
        swap,
    }
}

fn convert(allow_wait: bool, strict: bool) -> Commands {
    Commands::Convert {
        map: "grid.map".into(),
        paths: "paths.txt".into(),
        out: "out.txt".into(),
        cells: CellRuleArgs::default(),
        swap: None,
        allow_wait,
        repeat: None,
        pad: None,
        only: None,
        id_offset: 0,
        strict,
    }
}

fn convert_with(only: Option<usize>, id_offset: u32) -> Commands {
    let mut command = convert(false, false);
    if let Commands::Convert {
        only: o,
        id_offset: off,
        ..
    } = &mut command
    {
        *o = only;
        *off = id_offset;
    }
    command
}

fn read_out(temp_dir: &TempDir) -> String {
    fs::read_to_string(temp_dir.path().join("out.txt")).unwrap()
}

#[test]
fn single_row_map_swaps_pairs_automatically() {
    let temp_dir = TempDir::new().unwrap();
    write_map(temp_dir.path(), "grid.map", &["..."]);
    write_file(temp_dir.path(), "paths.txt", "Agent 0: (0,0)->(0,1)->(0,2)\n");

    let ctx = default_context(temp_dir.path());
    let (result, diagnostics) = run(&ctx, &time_major(None, None));
    result.unwrap();
    assert!(diagnostics.is_empty());
    assert_eq!(read_out(&temp_dir), "0:(0,0),\n1:(1,0),\n2:(2,0),\n");
}

#[test]
fn forced_no_swap_keeps_pairs_and_warns() {
    let temp_dir = TempDir::new().unwrap();
    write_map(temp_dir.path(), "grid.map", &["..."]);
    write_file(temp_dir.path(), "paths.txt", "Agent 0: (0,0)->(0,1)->(0,2)\n");

    let ctx = default_context(temp_dir.path());
    let (result, diagnostics) = run(&ctx, &time_major(None, Some(SwapMode::Off)));
    assert!(result.unwrap().contains("swap=off"));
    assert_eq!(read_out(&temp_dir), "0:(0,0),\n1:(0,1),\n2:(0,2),\n");
    assert!(diagnostics.starts_with("WARNING: 2 out-of-range cell(s)"));
}

#[test]
fn single_column_map_keeps_pairs_automatically() {
    let temp_dir = TempDir::new().unwrap();
    write_map(temp_dir.path(), "grid.map", &[".", ".", "."]);
    write_file(temp_dir.path(), "paths.txt", "Agent 0: (0,0)->(0,1)->(0,2)\n");

    let ctx = default_context(temp_dir.path());
    let (result, _) = run(&ctx, &time_major(None, None));
    assert!(result.unwrap().contains("swap=off"));
    assert_eq!(read_out(&temp_dir), "0:(0,0),\n1:(0,1),\n2:(0,2),\n");
}

#[test]
fn shorter_agent_holds_its_goal_until_horizon() {
    let temp_dir = TempDir::new().unwrap();
    write_map(temp_dir.path(), "grid.map", &[".....", ".....", ".....", ".....", "....."]);
    write_file(
        temp_dir.path(),
        "paths.txt",
        "Agent 0: (0,0)->(0,1)->(0,2)\nAgent 1: (1,0)->(1,1)->(1,2)->(1,3)->(1,4)\n",
    );

    let ctx = default_context(temp_dir.path());
    let (result, _) = run(&ctx, &time_major(Some(0), Some(SwapMode::Off)));
    assert!(result.unwrap().contains("N=2 T=5"));
    let out = read_out(&temp_dir);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[2], "2:(0,2),(1,2),");
    assert_eq!(lines[3], "3:(0,2),(1,3),");
    assert_eq!(lines[4], "4:(0,2),(1,4),");
}

#[test]
fn positive_cap_keeps_lowest_ids() {
    let temp_dir = TempDir::new().unwrap();
    write_map(temp_dir.path(), "grid.map", &["....", "....", "....", "...."]);
    write_file(
        temp_dir.path(),
        "paths.txt",
        "Agent 3: (3,3)\nAgent 1: (1,1)\nAgent 0: (0,0)\n",
    );

    let ctx = default_context(temp_dir.path());
    let (result, _) = run(&ctx, &time_major(Some(2), Some(SwapMode::Off)));
    assert!(result.unwrap().contains("N=2 T=1"));
    assert_eq!(read_out(&temp_dir), "0:(0,0),(1,1),\n");
}

#[test]
fn stay_without_allow_wait_is_reported_but_written() {
    let temp_dir = TempDir::new().unwrap();
    write_map(temp_dir.path(), "grid.map", &["...", "...", "..."]);
    write_file(temp_dir.path(), "paths.txt", "Agent 4: (0,0)->(1,0)->(1,0)->(2,0)\n");

    let ctx = default_context(temp_dir.path());
    let (result, diagnostics) = run(&ctx, &convert(false, false));
    let summary = result.unwrap();
    assert!(summary.contains("1 issue(s)"));
    assert_eq!(diagnostics.lines().count(), 1);
    assert!(diagnostics.contains("Agent 4 step 1->2 stays on (1,0)"));
    assert_eq!(read_out(&temp_dir), "0:(0,0),(1,0),(1,0),(2,0)\n");
}

#[test]
fn stay_with_allow_wait_is_clean() {
    let temp_dir = TempDir::new().unwrap();
    write_map(temp_dir.path(), "grid.map", &["...", "...", "..."]);
    write_file(temp_dir.path(), "paths.txt", "Agent 4: (0,0)->(1,0)->(1,0)->(2,0)\n");

    let ctx = default_context(temp_dir.path());
    let (result, diagnostics) = run(&ctx, &convert(true, true));
    assert!(result.unwrap().contains("Validation passed"));
    assert!(diagnostics.is_empty());
}

#[test]
fn strict_failure_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    write_map(temp_dir.path(), "grid.map", &[".@.", "...", "..."]);
    write_file(temp_dir.path(), "paths.txt", "Agent 0: (0,0)->(1,0)->(2,0)\n");

    let ctx = default_context(temp_dir.path());
    let (result, diagnostics) = run(&ctx, &convert(false, true));
    match result {
        Err(ApiError::ValidationFailed { issues }) => assert_eq!(issues, 1),
        other => panic!("expected ValidationFailed, got {:?}", other),
    }
    assert!(diagnostics.contains("on obstacle (1,0)"));
    assert!(!temp_dir.path().join("out.txt").exists());
}

#[test]
fn convert_relabels_and_expands_playback() {
    let temp_dir = TempDir::new().unwrap();
    write_map(temp_dir.path(), "grid.map", &["...", "...", "..."]);
    write_file(
        temp_dir.path(),
        "paths.txt",
        "Agent 9: (2,2)->(2,1)\nAgent 5: (0,0)->(1,0)\n",
    );

    let ctx = default_context(temp_dir.path());
    let command = Commands::Convert {
        map: "grid.map".into(),
        paths: "paths.txt".into(),
        out: "out.txt".into(),
        cells: CellRuleArgs::default(),
        swap: None,
        allow_wait: false,
        repeat: Some(2),
        pad: Some(1),
        only: None,
        id_offset: 1,
        strict: true,
    };
    let (result, _) = run(&ctx, &command);
    assert!(result.unwrap().contains("ids 1..=2"));

    let out = read_out(&temp_dir);
    assert_eq!(
        out,
        "1:(0,0),(0,0),(1,0),(1,0),(1,0)\n2:(2,2),(2,2),(2,1),(2,1),(2,1)\n"
    );
    let reparsed = parse_visualizer_paths(&out).unwrap();
    assert_eq!(reparsed[0].0, 1);
    assert_eq!(reparsed[1].1.last(), Some(&RawPair(2, 1)));
}

#[test]
fn out_of_range_point_on_small_map() {
    let temp_dir = TempDir::new().unwrap();
    write_map(temp_dir.path(), "grid.map", &["....", "....", "....", "...."]);
    write_file(temp_dir.path(), "paths.txt", "Agent 2: (3,3)->(5,5)\n");

    let ctx = default_context(temp_dir.path());
    let (result, diagnostics) = run(
        &ctx,
        &Commands::Validate {
            map: "grid.map".into(),
            paths: "paths.txt".into(),
            cells: CellRuleArgs::default(),
            swap: None,
            allow_wait: false,
            strict: false,
            format: OutputFormat::Text,
        },
    );
    assert!(result.unwrap().contains("NG: found 2 issues"));
    assert!(diagnostics.contains("Agent 2 t=1 out-of-range (5,5)"));
    assert!(diagnostics.contains("not 4-neighbor"));
}

#[test]
fn normalize_pads_fills_and_sorts() {
    let temp_dir = TempDir::new().unwrap();
    write_file(
        temp_dir.path(),
        "vis.txt",
        "3:(1,1),(1,2)\n0:\n1:(2,2)\n",
    );

    let ctx = default_context(temp_dir.path());
    let (result, _) = run(
        &ctx,
        &Commands::Normalize {
            input: "vis.txt".into(),
            output: "out.txt".into(),
        },
    );
    assert!(result.unwrap().contains("2 steps across 3 agents"));
    assert_eq!(
        read_out(&temp_dir),
        "0:(0,0),(0,0)\n1:(2,2),(2,2)\n3:(1,1),(1,2)\n"
    );
}

#[test]
fn fatal_errors_map_to_exit_codes() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = default_context(temp_dir.path());

    write_file(temp_dir.path(), "grid.map", "type octile\nheight 2\nmap\n..\n..\n");
    write_file(temp_dir.path(), "paths.txt", "Agent 0: (0,0)\n");
    let (result, _) = run(&ctx, &time_major(None, None));
    assert_eq!(result.unwrap_err().exit_code(), 2);

    write_file(temp_dir.path(), "grid.map", "height 2\nwidth 3\nmap\n...\n..\n");
    let (result, _) = run(&ctx, &convert(false, false));
    assert_eq!(result.unwrap_err().exit_code(), 3);

    write_map(temp_dir.path(), "grid.map", &["..", ".."]);
    write_file(temp_dir.path(), "paths.txt", "no agents here\n");
    let (result, _) = run(&ctx, &time_major(None, None));
    assert_eq!(result.unwrap_err().exit_code(), 4);

    write_file(temp_dir.path(), "paths.txt", "Agent 0:\nAgent 1:   \n");
    let (result, _) = run(&ctx, &time_major(None, None));
    assert_eq!(result.unwrap_err().exit_code(), 6);

    fs::remove_file(temp_dir.path().join("paths.txt")).unwrap();
    let (result, _) = run(&ctx, &time_major(None, None));
    assert_eq!(result.unwrap_err().exit_code(), 8);

    assert!(!temp_dir.path().join("out.txt").exists());
}

#[test]
fn convert_only_zero_keeps_every_agent() {
    let temp_dir = TempDir::new().unwrap();
    write_map(temp_dir.path(), "grid.map", &["..", ".."]);
    write_file(temp_dir.path(), "paths.txt", "Agent 1: (1,1)\nAgent 0: (0,0)\n");

    let ctx = default_context(temp_dir.path());
    let (result, _) = run(&ctx, &convert_with(Some(0), 0));
    assert!(result.unwrap().contains("Wrote 2 agents"));
    assert_eq!(read_out(&temp_dir), "0:(0,0)\n1:(1,1)\n");

    let (result, _) = run(&ctx, &convert_with(Some(1), 0));
    assert!(result.unwrap().contains("Wrote 1 agents"));
    assert_eq!(read_out(&temp_dir), "0:(0,0)\n");
}

#[test]
fn zero_agent_selection_is_no_agents_in_library() {
    let paths = extract_solver_paths("Agent 0: (0,0)\n").unwrap();
    let err = select_agents(paths, Some(0)).unwrap_err();
    assert!(matches!(err, ApiError::NoAgents { cap: Some(0) }));
    assert_eq!(err.exit_code(), 5);
}

#[test]
fn id_offset_overflow_fails_before_writing() {
    let temp_dir = TempDir::new().unwrap();
    write_map(temp_dir.path(), "grid.map", &["..", ".."]);
    write_file(temp_dir.path(), "paths.txt", "Agent 0: (0,0)\nAgent 1: (1,1)\n");

    let ctx = default_context(temp_dir.path());
    let (result, _) = run(&ctx, &convert_with(None, u32::MAX));
    let err = result.unwrap_err();
    assert!(matches!(err, ApiError::IdOverflow { agents: 2, .. }));
    assert_eq!(err.exit_code(), 10);
    assert!(!temp_dir.path().join("out.txt").exists());
}

#[test]
fn id_offset_at_max_fits_a_single_agent() {
    let temp_dir = TempDir::new().unwrap();
    write_map(temp_dir.path(), "grid.map", &["..", ".."]);
    write_file(temp_dir.path(), "paths.txt", "Agent 7: (1,0)\n");

    let ctx = default_context(temp_dir.path());
    let (result, _) = run(&ctx, &convert_with(None, u32::MAX));
    let summary = result.unwrap();
    assert!(summary.contains(&format!("ids {}..={}", u32::MAX, u32::MAX)));
    assert_eq!(read_out(&temp_dir), format!("{}:(1,0)\n", u32::MAX));
}
