//! Tool Workflows
//!
//! Each tool is a linear read -> orient -> normalize -> validate -> render
//! sequence. Workflows are split into a plan step that does all the work in
//! memory and a write step, so a fatal error or a strict validation failure
//! never leaves output behind.

use crate::error::ApiError;
use crate::map::{self, CellRule, MapHeader};
use crate::normalize::{self, EmptyPathPolicy, NormalizeOptions};
use crate::orientation::{self, OrientationDecision, SwapMode};
use crate::paths;
use crate::types::{AgentPath, Cell};
use crate::validate::{ValidationIssue, ValidationOptions, ValidationReport, Validator};
use crate::writer::{self, Playback};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Inputs for the time-major converter.
#[derive(Debug, Clone)]
pub struct TimeMajorRequest {
    pub map: PathBuf,
    pub paths: PathBuf,
    pub output: PathBuf,
    pub max_agents: Option<usize>,
    pub swap: SwapMode,
}

/// What the time-major converter did.
#[derive(Debug, Clone, Serialize)]
pub struct TimeMajorSummary {
    pub header: MapHeader,
    pub agents: usize,
    pub horizon: usize,
    pub max_agents: Option<usize>,
    pub orientation: OrientationDecision,
    /// Out-of-range cells after orientation; reported, never fatal here.
    pub out_of_range: Vec<ValidationIssue>,
    pub output: PathBuf,
}

/// Fully rendered time-major output waiting to be written.
#[derive(Debug, Clone)]
pub struct TimeMajorPlan {
    pub summary: TimeMajorSummary,
    rendered: String,
}

impl TimeMajorPlan {
    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    pub fn write(&self) -> Result<(), ApiError> {
        writer::write_output(&self.summary.output, &self.rendered)
    }
}

/// Read, orient, pad and render solver output as time-major lines.
pub fn plan_time_major(request: &TimeMajorRequest) -> Result<TimeMajorPlan, ApiError> {
    let header = map::load_header(&request.map)?;
    let raw = paths::load_solver_paths(&request.paths)?;
    plan_time_major_from(header, raw, request)
}

fn plan_time_major_from(
    header: MapHeader,
    raw: crate::types::AgentPaths,
    request: &TimeMajorRequest,
) -> Result<TimeMajorPlan, ApiError> {
    let selected = normalize::select_agents(raw, request.max_agents)?;
    let orientation = orientation::resolve(&selected, &header, request.swap);
    let options = NormalizeOptions {
        max_agents: request.max_agents,
        empty_paths: EmptyPathPolicy::Drop,
    };
    let normalized = normalize::normalize(selected, &orientation, &options)?;

    let report = Validator::new(header)
        .allow_wait(true)
        .validate(normalized.paths());
    let out_of_range: Vec<ValidationIssue> = report
        .issues
        .into_iter()
        .filter(|issue| matches!(issue, ValidationIssue::OutOfRange { .. }))
        .collect();

    let rendered = writer::render_time_major(&normalized);
    Ok(TimeMajorPlan {
        summary: TimeMajorSummary {
            header,
            agents: normalized.agent_count(),
            horizon: normalized.horizon(),
            max_agents: request.max_agents,
            orientation,
            out_of_range,
            output: request.output.clone(),
        },
        rendered,
    })
}

/// Inputs for the agent-major converter.
#[derive(Debug, Clone)]
pub struct ConvertRequest {
    pub map: PathBuf,
    pub paths: PathBuf,
    pub output: PathBuf,
    pub cell_rule: CellRule,
    pub swap: SwapMode,
    pub validation: ValidationOptions,
    pub playback: Playback,
    /// Keep only the first N agents by ascending id.
    pub only: Option<usize>,
    /// Output ids are `id_offset + rank`.
    pub id_offset: u32,
}

/// Validated, rendered agent-major output waiting to be written.
#[derive(Debug, Clone)]
pub struct ConvertPlan {
    pub report: ValidationReport,
    pub orientation: OrientationDecision,
    pub agents: usize,
    pub output: PathBuf,
    rendered: String,
}

impl ConvertPlan {
    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    pub fn write(&self) -> Result<(), ApiError> {
        writer::write_output(&self.output, &self.rendered)
    }
}

/// Read, orient, validate and render solver output as agent-major lines.
pub fn plan_convert(request: &ConvertRequest) -> Result<ConvertPlan, ApiError> {
    let grid = map::load_map(&request.map, &request.cell_rule)?;
    let raw = paths::load_solver_paths(&request.paths)?;
    let oriented = oriented_selection(raw, &grid.header(), request.only, request.swap)?;

    let report = Validator::with_grid(&grid)
        .allow_wait(request.validation.allow_wait)
        .validate(&oriented.1);
    let rendered =
        writer::render_agent_major_relabelled(&oriented.1, request.id_offset, &request.playback)?;
    Ok(ConvertPlan {
        report,
        orientation: oriented.0,
        agents: oriented.1.len(),
        output: request.output.clone(),
        rendered,
    })
}

/// Inputs for the standalone validator.
#[derive(Debug, Clone)]
pub struct ValidateRequest {
    pub map: PathBuf,
    pub paths: PathBuf,
    pub cell_rule: CellRule,
    pub swap: SwapMode,
    pub allow_wait: bool,
}

/// Validation outcome for a solver file.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateSummary {
    pub header: MapHeader,
    pub passable_cells: usize,
    pub orientation: OrientationDecision,
    pub report: ValidationReport,
}

/// Check a solver file against a map without writing anything.
pub fn run_validate(request: &ValidateRequest) -> Result<ValidateSummary, ApiError> {
    let grid = map::load_map(&request.map, &request.cell_rule)?;
    let raw = paths::load_solver_paths(&request.paths)?;
    let (orientation, oriented) = oriented_selection(raw, &grid.header(), None, request.swap)?;
    let report = Validator::with_grid(&grid)
        .allow_wait(request.allow_wait)
        .validate(&oriented);
    Ok(ValidateSummary {
        header: grid.header(),
        passable_cells: grid.passable_count(),
        orientation,
        report,
    })
}

fn oriented_selection(
    raw: crate::types::AgentPaths,
    header: &MapHeader,
    cap: Option<usize>,
    swap: SwapMode,
) -> Result<(OrientationDecision, Vec<AgentPath>), ApiError> {
    let selected = normalize::select_agents(raw, cap)?;
    let orientation = orientation::resolve(&selected, header, swap);
    let oriented = normalize::orient(selected, &orientation);
    let kept = normalize::apply_empty_policy(oriented, EmptyPathPolicy::Drop)?;
    Ok((orientation, kept))
}

/// Sentinel cell used for empty visualizer lines.
pub const EMPTY_PATH_FILL: Cell = Cell { x: 0, y: 0 };

/// What the visualizer normalizer did.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizeSummary {
    pub agents: usize,
    pub horizon: usize,
    pub output: PathBuf,
}

/// Pad an agent-major visualizer file to a common length, sorted by id.
pub fn run_normalize(input: &Path, output: &Path) -> Result<NormalizeSummary, ApiError> {
    let mut lines = paths::load_visualizer_paths(input)?;
    lines.sort_by_key(|(id, _)| *id);
    let agent_paths: Vec<AgentPath> = lines
        .into_iter()
        .map(|(id, pairs)| AgentPath::new(id, pairs.into_iter().map(|p| p.orient(false)).collect()))
        .collect();
    let kept = normalize::apply_empty_policy(agent_paths, EmptyPathPolicy::Fill(EMPTY_PATH_FILL))?;
    let normalized = normalize::pad_to_horizon(kept)?;

    let rendered = writer::render_agent_major(
        normalized
            .paths()
            .iter()
            .map(|p| (p.agent, p.cells.as_slice())),
        &Playback::default(),
    );
    writer::write_output(output, &rendered)?;
    Ok(NormalizeSummary {
        agents: normalized.agent_count(),
        horizon: normalized.horizon(),
        output: output.to_path_buf(),
    })
}
