use clap::{Parser, Subcommand};
use import_prune::{
    CommandReporter, FileOutcomeJson, Finding, LineBuffer, LintReporter, ReportFormat, RunReport,
    StripOptions, checksum_of, detect_source_kind, generate_execution_id, read_file, read_report,
    remove_bindings, strip_wrapper, write_file,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Lint-driven cleanup for web-frontend source trees
#[derive(Parser, Debug)]
#[command(name = "import-prune")]
#[command(version = "0.1.0")]
#[command(about = "Remove unused import bindings reported by the linter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Remove unused import bindings using lint findings
    Prune(PruneArgs),
    /// Strip a layout wrapper component from page files
    Strip(StripArgs),
}

#[derive(clap::Args, Debug)]
struct PruneArgs {
    /// Lint report file (omit to read the report from stdin)
    #[arg(short, long)]
    report: Option<String>,

    /// Spawn this lint command and parse its captured output instead
    #[arg(short, long, num_args = 1.., value_name = "ARGV", conflicts_with = "report")]
    command: Option<Vec<String>>,

    /// Report format: "text" (lint output) or "json" (structured findings)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Resolve relative finding paths against this directory
    #[arg(long)]
    root: Option<String>,

    /// Show what would change without writing any file
    #[arg(short, long)]
    dry_run: bool,

    /// Output structured JSON instead of human-readable
    #[arg(short, long)]
    json: bool,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(clap::Args, Debug)]
struct StripArgs {
    /// Name of the wrapper component to strip
    #[arg(short, long)]
    component: String,

    /// Element that replaces the wrapper tag pair
    #[arg(short, long, default_value = "div")]
    tag: String,

    /// className attribute for the replacement opening tag
    #[arg(long)]
    class: Option<String>,

    /// Show what would change without writing any file
    #[arg(short, long)]
    dry_run: bool,

    /// Output structured JSON instead of human-readable
    #[arg(short, long)]
    json: bool,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Files to process
    #[arg(required = true)]
    files: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        CliCommand::Prune(args) => run_prune(args),
        CliCommand::Strip(args) => run_strip(args),
    }
}

fn run_prune(args: PruneArgs) {
    let execution_id = generate_execution_id();

    let format = match parse_format(&args.format) {
        Some(format) => format,
        None => {
            eprintln!(
                "Unknown report format '{}': expected 'text' or 'json'",
                args.format
            );
            std::process::exit(2);
        }
    };

    // Obtain findings from the configured reporter
    let findings = if let Some(argv) = args.command.as_deref() {
        match CommandReporter::from_argv(argv) {
            Some(reporter) => reporter.collect(),
            None => {
                eprintln!("Empty lint command");
                std::process::exit(2);
            }
        }
    } else {
        read_report(args.report.as_deref(), format)
    };

    // A reporter failure is a safe empty result: nothing gets mutated
    let findings = match findings {
        Ok(map) => map,
        Err(e) => {
            let response =
                RunReport::failure(execution_id, format!("no findings available: {}", e));
            output_response(&response, args.json, args.output.as_ref());
            std::process::exit(1);
        }
    };

    let mut outcomes = Vec::new();
    for (path, file_findings) in &findings {
        let resolved = resolve_path(args.root.as_deref(), path);
        outcomes.push(process_file(&resolved, file_findings, args.dry_run));
    }

    let response = RunReport::success(execution_id, args.dry_run, outcomes);
    output_response(&response, args.json, args.output.as_ref());
}

/// Process one file's findings start-to-finish
///
/// Any failure abandons this file (the original stays on disk untouched) and
/// the run continues with the next one.
fn process_file(path: &Path, findings: &[Finding], dry_run: bool) -> FileOutcomeJson {
    let display = path.display().to_string();

    if !detect_source_kind(path).is_supported() {
        return FileOutcomeJson::skipped(
            display,
            findings.len(),
            "unsupported file kind".to_string(),
        );
    }

    let file_content = match read_file(path) {
        Ok(content) => content,
        Err(e) => return FileOutcomeJson::failed(display, e.to_string()),
    };

    let mut buffer = LineBuffer::from_text(&file_content.content);
    let outcome = remove_bindings(&mut buffer, findings);

    if !outcome.changed {
        return FileOutcomeJson::unchanged(
            display,
            outcome.applied,
            outcome.skipped,
            file_content.checksum,
        );
    }

    let new_content = buffer.to_text();
    let new_checksum = checksum_of(&new_content);

    if !dry_run {
        if let Err(e) = write_file(path, &new_content) {
            return FileOutcomeJson::failed(display, e.to_string());
        }
    }

    FileOutcomeJson::changed(
        display,
        outcome.applied,
        outcome.skipped,
        file_content.checksum,
        new_checksum,
    )
}

fn run_strip(args: StripArgs) {
    let execution_id = generate_execution_id();

    let options = StripOptions {
        component: args.component.clone(),
        tag: args.tag.clone(),
        class_name: args.class.clone(),
    };

    let mut outcomes = Vec::new();
    for file in &args.files {
        outcomes.push(strip_file(Path::new(file), &options, args.dry_run));
    }

    let response = RunReport::success(execution_id, args.dry_run, outcomes);
    output_response(&response, args.json, args.output.as_ref());
}

/// Strip the wrapper from one file
fn strip_file(path: &Path, options: &StripOptions, dry_run: bool) -> FileOutcomeJson {
    let display = path.display().to_string();

    let file_content = match read_file(path) {
        Ok(content) => content,
        Err(e) => return FileOutcomeJson::failed(display, e.to_string()),
    };

    let (new_content, changed) = strip_wrapper(&file_content.content, options);
    if !changed {
        return FileOutcomeJson::unchanged(display, 0, 0, file_content.checksum);
    }

    let new_checksum = checksum_of(&new_content);

    if !dry_run {
        if let Err(e) = write_file(path, &new_content) {
            return FileOutcomeJson::failed(display, e.to_string());
        }
    }

    FileOutcomeJson::changed(display, 0, 0, file_content.checksum, new_checksum)
}

fn parse_format(value: &str) -> Option<ReportFormat> {
    match value {
        "text" => Some(ReportFormat::Text),
        "json" => Some(ReportFormat::Json),
        _ => None,
    }
}

fn resolve_path(root: Option<&str>, path: &Path) -> PathBuf {
    match root {
        Some(root) if path.is_relative() => Path::new(root).join(path),
        _ => path.to_path_buf(),
    }
}

/// Format and output the response
fn output_response(response: &RunReport, json_mode: bool, output_path: Option<&String>) {
    let output = if json_mode {
        serde_json::to_string_pretty(response)
            .unwrap_or_else(|_| r#"{"error": "Failed to serialize response"}"#.to_string())
    } else {
        render_human(response)
    };

    // Write to file or stdout
    if let Some(path) = output_path {
        if let Err(e) = fs::write(path, &output) {
            eprintln!("Failed to write output to '{}': {}", path, e);
            std::process::exit(1);
        }
    } else {
        println!("{}", output);
    }
}

/// Human-readable rendering of a run report
fn render_human(response: &RunReport) -> String {
    if !response.success {
        return format!(
            "Error: {}",
            response.error.as_deref().unwrap_or("Unknown error")
        );
    }

    if response.files.is_empty() {
        return "No unused bindings reported".to_string();
    }

    let mut lines = Vec::new();
    for file in &response.files {
        let reason = file.reason.as_deref().unwrap_or("unknown reason");
        let line = match file.status.as_str() {
            "changed" => format!("Fixed: {}", file.path),
            "unchanged" => format!("No change: {}", file.path),
            "skipped" => format!("Skipped: {} ({})", file.path, reason),
            _ => format!("Failed: {} ({})", file.path, reason),
        };
        lines.push(line);
    }

    let mut summary = format!("Fixed {} file(s)", response.files_changed);
    if response.findings_applied + response.findings_skipped > 0 {
        summary.push_str(&format!(
            " ({} finding(s) applied, {} skipped)",
            response.findings_applied, response.findings_skipped
        ));
    }
    lines.push(summary);

    if response.dry_run {
        lines.push("Dry run: no files were written".to_string());
    }

    lines.join("\n")
}
