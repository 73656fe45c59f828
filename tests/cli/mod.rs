mod output_contracts;
mod pipeline_scenarios;
pub mod support;
