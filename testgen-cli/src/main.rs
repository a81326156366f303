mod cli;
mod config;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use colored::Colorize;
use config::RunConfig;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use testgen_core::render::{PLAN_FIELDS, TRACE_FIELDS};
use testgen_core::{
    find_header, strategy_for, CommandCompletionClient, CompletionClient, Pipeline, RawFragment,
    RunOutcome, SourceRef, TargetStatus, Workbook, DEFAULT_SCAN_WINDOW,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run { config } => run(&config),
        Command::CheckTemplate { template } => check_template(&template),
    }
}

fn run(config_path: &Path) -> Result<()> {
    let config = RunConfig::load(config_path)?;

    let fragments = read_fragments(&config.inputs.requirements_files)?;
    let template = load_workbook(&config.inputs.template)?;

    let backend: Option<Box<dyn CompletionClient>> = config
        .backend
        .as_ref()
        .map(|b| {
            Box::new(CommandCompletionClient::new(&b.command, b.args.clone()))
                as Box<dyn CompletionClient>
        });
    let timeout = Duration::from_secs(
        config
            .backend
            .as_ref()
            .map(|b| b.response_timeout_s)
            .unwrap_or(120),
    );

    let pipeline = Pipeline::new(strategy_for(config.strategy, backend, timeout))
        .with_trace_sheet(&config.trace_sheet)
        .with_sequence_name(&config.sequence_name);

    let outcome = pipeline.run(fragments, &template);
    write_outputs(&config, &outcome)?;
    print_summary(&outcome);

    let spreadsheet_failed = outcome
        .report
        .targets
        .iter()
        .filter(|t| t.target != "sequence-document")
        .all(|t| t.status == TargetStatus::Failed);
    if spreadsheet_failed {
        bail!("every spreadsheet target failed; see report for details");
    }
    Ok(())
}

fn check_template(path: &Path) -> Result<()> {
    let workbook = load_workbook(path)?;
    let sheet = workbook
        .sheets
        .first()
        .context("template workbook contains no sheets")?;

    let binding = find_header(sheet, &PLAN_FIELDS, &[], DEFAULT_SCAN_WINDOW)?;
    println!(
        "{} header found in sheet '{}' at row {}",
        "OK:".green().bold(),
        sheet.name,
        binding.row + 1
    );
    for field in PLAN_FIELDS {
        if let Some(col) = binding.column(field) {
            println!("  {:>16} -> column {}", field, col + 1);
        }
    }

    match workbook.sheets.iter().skip(1).find_map(|s| {
        find_header(s, &TRACE_FIELDS, &[], DEFAULT_SCAN_WINDOW)
            .ok()
            .map(|b| (s, b))
    }) {
        Some((sheet, binding)) => println!(
            "{} traceability header found in sheet '{}' at row {}",
            "OK:".green().bold(),
            sheet.name,
            binding.row + 1
        ),
        None => println!(
            "{} no traceability sheet; one will be created at run time",
            "note:".yellow()
        ),
    }
    Ok(())
}

/// Plain-text parser collaborator: one fragment per non-empty line,
/// tagged with file and line number.
fn read_fragments(paths: &[PathBuf]) -> Result<Vec<RawFragment>> {
    let mut fragments = Vec::new();
    for path in paths {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read requirements file {}", path.display()))?;
        let file = path.display().to_string();
        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            fragments.push(RawFragment::new(
                line,
                Some(SourceRef::with_location(&file, format!("line {}", idx + 1))),
            ));
        }
    }
    Ok(fragments)
}

fn load_workbook(path: &Path) -> Result<Workbook> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read template workbook {}", path.display()))?;
    Workbook::from_yaml(&content)
        .with_context(|| format!("failed to parse template workbook {}", path.display()))
}

fn write_outputs(config: &RunConfig, outcome: &RunOutcome) -> Result<()> {
    if let Some(workbook) = &outcome.workbook {
        write_file(&config.outputs.plan_workbook, &workbook.to_yaml()?)?;
    }
    write_file(
        &config.outputs.sequence_doc,
        &serde_json::to_string_pretty(&outcome.sequence)?,
    )?;
    write_file(
        &config.outputs.report,
        &serde_json::to_string_pretty(&outcome.report)?,
    )?;
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn print_summary(outcome: &RunOutcome) {
    let report = &outcome.report;

    println!("{}", "Run summary".bold());
    println!("  Strategy:     {}", report.strategy);
    println!(
        "  Fragments:    {} ({} discarded)",
        report.fragments_seen, report.fragments_discarded
    );
    println!("  Requirements: {}", report.requirement_count);
    println!("  Test cases:   {}", report.test_case_count);

    if report.backend_degraded {
        println!(
            "  {}",
            "Backend degraded for every requirement in this run".red().bold()
        );
    } else if !report.fallbacks.is_empty() {
        println!(
            "  {} requirement(s) fell back to rule-based output",
            report.fallbacks.len().to_string().yellow()
        );
    }

    if !report.uncovered_requirements.is_empty() {
        println!(
            "  Uncovered:    {}",
            report.uncovered_requirements.join(", ").yellow()
        );
    }

    for target in &report.targets {
        let status = match target.status {
            TargetStatus::Rendered => "rendered".green(),
            TargetStatus::Failed => "FAILED".red().bold(),
            TargetStatus::Skipped => "skipped".yellow(),
        };
        println!("  {:<20} {} - {}", target.target, status, target.detail);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_fragments_skips_blank_lines() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "The system shall start").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "   ").unwrap();
        writeln!(file, "The system shall stop").unwrap();

        let fragments = read_fragments(&[file.path().to_path_buf()]).unwrap();
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].raw_text, "The system shall start");
        assert_eq!(
            fragments[1].source.as_ref().unwrap().location.as_deref(),
            Some("line 4")
        );
    }

    #[test]
    fn test_read_fragments_preserves_file_order() {
        let mut first = NamedTempFile::new().unwrap();
        writeln!(first, "from first").unwrap();
        let mut second = NamedTempFile::new().unwrap();
        writeln!(second, "from second").unwrap();

        let fragments = read_fragments(&[
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ])
        .unwrap();
        assert_eq!(fragments[0].raw_text, "from first");
        assert_eq!(fragments[1].raw_text, "from second");
    }

    #[test]
    fn test_load_workbook_roundtrip() {
        let workbook = Workbook {
            sheets: vec![testgen_core::Sheet {
                name: "Test Plan".to_string(),
                rows: vec![vec!["Test ID".to_string(), "Title".to_string()]],
            }],
        };

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", workbook.to_yaml().unwrap()).unwrap();

        let loaded = load_workbook(file.path()).unwrap();
        assert_eq!(loaded, workbook);
    }
}
