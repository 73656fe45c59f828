//! CLI Tooling
//!
//! Command-line interface for the conversion, validation and normalization
//! tools. Each command builds a typed request from the layered config plus
//! flags, runs the matching pipeline and returns a summary for stdout.
//! Issue lines and warnings go to a caller-supplied diagnostics writer.

use crate::config::{BridgeConfig, ConfigLoader, MapConfig};
use crate::error::ApiError;
use crate::map::CellRule;
use crate::orientation::SwapMode;
use crate::pipeline::{self, ConvertRequest, TimeMajorRequest, ValidateRequest};
use crate::tooling::format::{
    format_convert_summary, format_normalize_summary, format_time_major_summary,
    format_validation_json, format_validation_text,
};
use crate::validate::ValidationOptions;
use crate::writer::Playback;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// mapf-bridge - MAPF solver output conversion and validation
#[derive(Parser)]
#[command(name = "mapf-bridge")]
#[command(about = "Convert and validate MAPF solver paths for grid visualizers")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Show orientation evidence and extra counts in summaries
    #[arg(long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Convert solver paths into time-major visualizer lines
    TimeMajor {
        /// Map file (only the width/height header is read)
        map: PathBuf,
        /// Solver output with `Agent <id>: (a,b)->...` lines
        paths: PathBuf,
        /// Output file
        out: PathBuf,
        /// Keep the first K agents by id; zero or negative keeps all
        #[arg(allow_negative_numbers = true)]
        agents: Option<i64>,
        /// Coordinate orientation
        #[arg(long, value_enum)]
        swap: Option<SwapMode>,
    },
    /// Validate solver paths and write agent-major visualizer lines
    Convert {
        #[arg(long)]
        map: PathBuf,
        #[arg(long)]
        paths: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[command(flatten)]
        cells: CellRuleArgs,
        /// Coordinate orientation (default: off)
        #[arg(long, value_enum)]
        swap: Option<SwapMode>,
        /// Allow consecutive identical cells
        #[arg(long)]
        allow_wait: bool,
        /// Copies of each step in the output
        #[arg(long)]
        repeat: Option<usize>,
        /// Extra copies of the final cell
        #[arg(long)]
        pad: Option<usize>,
        /// Keep only the first N agents by id; zero keeps all
        #[arg(long)]
        only: Option<usize>,
        /// First output agent id
        #[arg(long, default_value_t = 0)]
        id_offset: u32,
        /// Fail without writing output when any issue is found
        #[arg(long)]
        strict: bool,
    },
    /// Check solver paths against a map without writing output
    Validate {
        #[arg(long)]
        map: PathBuf,
        #[arg(long)]
        paths: PathBuf,
        #[command(flatten)]
        cells: CellRuleArgs,
        /// Coordinate orientation (default: off)
        #[arg(long, value_enum)]
        swap: Option<SwapMode>,
        /// Allow consecutive identical cells
        #[arg(long)]
        allow_wait: bool,
        /// Exit non-zero when any issue is found
        #[arg(long)]
        strict: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Pad visualizer agent-major lines to a common length
    Normalize {
        /// Agent-major visualizer file
        input: PathBuf,
        /// Output file
        output: PathBuf,
    },
    /// Print the effective configuration as TOML
    Config,
}

/// Map cell classification flags.
#[derive(Args, Debug, Clone, Default)]
pub struct CellRuleArgs {
    /// Characters treated as obstacles
    #[arg(long)]
    pub obstacles: Option<String>,
    /// Only these characters are passable (wins over --obstacles)
    #[arg(long)]
    pub passable: Option<String>,
}

impl CellRuleArgs {
    /// Flags first, then the `[map]` config section.
    pub fn resolve(&self, config: &MapConfig) -> CellRule {
        match (&self.passable, &self.obstacles) {
            (Some(chars), _) => CellRule::passable(chars),
            (None, Some(chars)) => CellRule::obstacles(chars),
            (None, None) => config.cell_rule(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Agent cap from the positional K: absent, zero or negative means all agents.
pub fn agent_cap(k: Option<i64>, configured: Option<usize>) -> Option<usize> {
    match k {
        Some(k) if k > 0 => Some(k as usize),
        Some(_) => None,
        None => configured.filter(|&n| n > 0),
    }
}

/// CLI context for executing commands
pub struct CliContext {
    working_dir: PathBuf,
    config: BridgeConfig,
    verbose: bool,
}

impl CliContext {
    /// Load configuration from `config_path`, or from the standard layers
    /// rooted at `working_dir`.
    pub fn new(working_dir: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(&path)?,
            None => ConfigLoader::load(&working_dir)?,
        };
        Ok(Self::with_config(working_dir, config))
    }

    pub fn with_config(working_dir: PathBuf, config: BridgeConfig) -> Self {
        Self {
            working_dir,
            config,
            verbose: false,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Execute a command, writing diagnostics to stderr.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let stderr = std::io::stderr();
        let mut diagnostics = stderr.lock();
        self.execute_with(command, &mut diagnostics)
    }

    /// Execute a command, writing diagnostics to `diagnostics`.
    pub fn execute_with(
        &self,
        command: &Commands,
        diagnostics: &mut dyn Write,
    ) -> Result<String, ApiError> {
        info!(command = command_name(command), "Executing command");
        match command {
            Commands::TimeMajor {
                map,
                paths,
                out,
                agents,
                swap,
            } => self.handle_time_major(map, paths, out, *agents, *swap, diagnostics),
            Commands::Convert {
                map,
                paths,
                out,
                cells,
                swap,
                allow_wait,
                repeat,
                pad,
                only,
                id_offset,
                strict,
            } => {
                let validation = ValidationOptions {
                    allow_wait: *allow_wait || self.config.validation.allow_wait,
                    strict: *strict || self.config.validation.strict,
                };
                let playback = Playback {
                    repeat: repeat.unwrap_or(self.config.playback.repeat),
                    pad: pad.unwrap_or(self.config.playback.pad),
                };
                let request = ConvertRequest {
                    map: self.resolve_path(map),
                    paths: self.resolve_path(paths),
                    output: self.resolve_path(out),
                    cell_rule: cells.resolve(&self.config.map),
                    swap: swap.unwrap_or(SwapMode::Off),
                    validation,
                    playback,
                    only: only.filter(|&n| n > 0),
                    id_offset: *id_offset,
                };
                self.handle_convert(&request, diagnostics)
            }
            Commands::Validate {
                map,
                paths,
                cells,
                swap,
                allow_wait,
                strict,
                format,
            } => {
                let request = ValidateRequest {
                    map: self.resolve_path(map),
                    paths: self.resolve_path(paths),
                    cell_rule: cells.resolve(&self.config.map),
                    swap: swap.unwrap_or(SwapMode::Off),
                    allow_wait: *allow_wait || self.config.validation.allow_wait,
                };
                let strict = *strict || self.config.validation.strict;
                self.handle_validate(&request, strict, *format, diagnostics)
            }
            Commands::Normalize { input, output } => {
                let summary =
                    pipeline::run_normalize(&self.resolve_path(input), &self.resolve_path(output))?;
                Ok(format_normalize_summary(&summary))
            }
            Commands::Config => toml::to_string_pretty(&self.config)
                .map_err(|e| ApiError::ConfigError(format!("Failed to render config: {}", e))),
        }
    }

    fn handle_time_major(
        &self,
        map: &Path,
        paths: &Path,
        out: &Path,
        agents: Option<i64>,
        swap: Option<SwapMode>,
        diagnostics: &mut dyn Write,
    ) -> Result<String, ApiError> {
        let request = TimeMajorRequest {
            map: self.resolve_path(map),
            paths: self.resolve_path(paths),
            output: self.resolve_path(out),
            max_agents: agent_cap(agents, self.config.conversion.max_agents),
            swap: swap.unwrap_or(self.config.conversion.swap),
        };
        let plan = pipeline::plan_time_major(&request)?;
        if let Some(first) = plan.summary.out_of_range.first() {
            emit(
                diagnostics,
                &format!(
                    "WARNING: {} out-of-range cell(s) after orientation, first: {}",
                    plan.summary.out_of_range.len(),
                    first
                ),
            );
        }
        plan.write()?;
        Ok(format_time_major_summary(&plan.summary, self.verbose))
    }

    fn handle_convert(
        &self,
        request: &ConvertRequest,
        diagnostics: &mut dyn Write,
    ) -> Result<String, ApiError> {
        let plan = pipeline::plan_convert(request)?;
        for issue in &plan.report.issues {
            emit(diagnostics, &format!("[BAD] {}", issue));
        }
        plan.report.enforce(request.validation.strict)?;
        plan.write()?;
        Ok(format_convert_summary(&plan, request.id_offset, self.verbose))
    }

    fn handle_validate(
        &self,
        request: &ValidateRequest,
        strict: bool,
        format: OutputFormat,
        diagnostics: &mut dyn Write,
    ) -> Result<String, ApiError> {
        let summary = pipeline::run_validate(request)?;
        let rendered = match format {
            OutputFormat::Json => format_validation_json(&summary)?,
            OutputFormat::Text => {
                for issue in &summary.report.issues {
                    emit(diagnostics, &format!("[BAD] {}", issue));
                }
                format_validation_text(&summary, self.verbose)
            }
        };
        if let Err(err) = summary.report.enforce(strict) {
            emit(diagnostics, &rendered);
            return Err(err);
        }
        Ok(rendered)
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }
}

fn emit(diagnostics: &mut dyn Write, line: &str) {
    if let Err(err) = writeln!(diagnostics, "{}", line) {
        tracing::warn!(error = %err, "Failed to write diagnostic line");
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::TimeMajor { .. } => "time-major",
        Commands::Convert { .. } => "convert",
        Commands::Validate { .. } => "validate",
        Commands::Normalize { .. } => "normalize",
        Commands::Config => "config",
    }
}
