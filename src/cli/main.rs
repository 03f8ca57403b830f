use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

use exif_forensics::categorize::{ViewMode, categorize};
use exif_forensics::exif::ExtractionStatus;
use exif_forensics::intel::{FileInfo, quick_intel};
use exif_forensics::pipeline::{self, Analysis};
use exif_forensics::{config, export, search};

#[derive(Parser, Debug)]
#[command(
    name = "exif-forensics",
    version,
    about = "Forensic review of image metadata: risk score, tampering check, categorized EXIF/XMP/IPTC listing"
)]
struct Cli {
    /// Image files or directories to analyze
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Path to config file (default: config.json next to binary)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Initialize a default config.json and exit
    #[arg(long)]
    init: bool,

    /// Only show tags matching this query (synonyms and partial words allowed)
    #[arg(short, long, value_name = "QUERY")]
    search: Option<String>,

    /// List every tag instead of grouping by risk category
    #[arg(long)]
    complete: bool,

    /// Print the quick intel summary
    #[arg(long)]
    intel: bool,

    /// Write a text report of all tags
    #[arg(long)]
    report: bool,

    /// Write a copy of the image with all metadata removed
    #[arg(long)]
    strip: bool,

    /// Output results as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Handle --init
    if cli.init {
        let config = config::Config::default();
        let path = cli.config.as_deref();
        config.save(path)?;
        let save_path = match path {
            Some(p) => p.to_path_buf(),
            None => config::Config::config_path()?,
        };
        println!("Default config written to {}", save_path.display());
        return Ok(());
    }

    if cli.paths.is_empty() {
        anyhow::bail!("No input files or directories specified. Use --help for usage.");
    }

    let config = config::Config::load(cli.config.as_deref())?;

    let images = pipeline::collect_images(&cli.paths, config.analysis.follow_links);
    if images.is_empty() {
        anyhow::bail!("No supported image files found in the specified paths.");
    }

    log::info!("Found {} image(s) to analyze", images.len());

    let view = if cli.complete { ViewMode::Complete } else { ViewMode::Categorized };
    let query = cli.search.as_deref().unwrap_or("");
    let total = images.len();
    let mut json_results = Vec::new();
    let mut failed = 0;

    for (i, image_path) in images.iter().enumerate() {
        log::debug!("[{}/{}] Analyzing: {}", i + 1, total, image_path.display());

        let analysis = match pipeline::analyze_in_background(image_path.clone(), config.clone()).await? {
            Ok(analysis) => analysis,
            Err(e) => {
                log::error!("Failed to analyze {}: {e}", image_path.display());
                failed += 1;
                continue;
            }
        };

        let shown = search::filter(&analysis.merged(), query);
        let info = FileInfo::from_path(image_path).unwrap_or_default();
        let intel = quick_intel(&analysis.merged(), &info);

        if cli.report {
            match export::export_report(&analysis.merged(), &config.output.report_dir) {
                Ok(path) => log::info!("  Report: {}", path.display()),
                Err(e) => log::error!("  Report export failed: {e}"),
            }
        }

        if cli.strip {
            match strip_file(image_path, &info, &config.output.cleaned_dir) {
                Ok(path) => log::info!("  Metadata removed: {}", path.display()),
                Err(e) => log::error!("  Strip failed: {e}"),
            }
        }

        if cli.json {
            let categories: Vec<_> = categorize(&shown).into_iter().filter(|c| !c.is_empty()).collect();
            json_results.push(serde_json::json!({
                "path": image_path.display().to_string(),
                "status": analysis.status(),
                "failures": analysis.failures,
                "forensic": analysis.forensic,
                "record": analysis.record,
                "tags": shown,
                "categories": categories,
                "intel": cli.intel.then_some(&intel),
            }));
            continue;
        }

        print_header(image_path, &analysis);
        if cli.intel {
            print_intel(&intel);
        }
        match view {
            ViewMode::Categorized => print_categories(&shown),
            ViewMode::Complete => print_complete(&shown),
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&json_results)?);
    }

    log::info!("Done: {} analyzed, {failed} failed out of {total} images", total - failed);

    Ok(())
}

/// Read the file again and write a metadata-free copy.
fn strip_file(path: &Path, info: &FileInfo, dir: &Path) -> Result<PathBuf> {
    let bytes = std::fs::read(path)?;
    Ok(export::strip_metadata(&bytes, info.mime.as_deref(), dir)?)
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const GREEN: &str = "\x1b[32m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

/// Max width for the value column before wrapping.
const VAL_WIDTH: usize = 40;
/// Tag column width.
const TAG_WIDTH: usize = 34;

/// File name, extraction status, risk score and tampering alert.
fn print_header(path: &Path, analysis: &Analysis) {
    println!();
    println!("{BOLD}File:{RESET} {}", path.display());
    println!("{DIM}{}{RESET}", "═".repeat(80));

    let status = match analysis.status() {
        ExtractionStatus::Complete => format!("{GREEN}complete{RESET}"),
        ExtractionStatus::Partial => format!("{YELLOW}partial{RESET}"),
        ExtractionStatus::Unreadable => format!("{RED}unreadable{RESET}"),
    };
    println!("  Extraction : {status}");
    for failure in &analysis.failures {
        println!("  {DIM}{:?} reader: {}{RESET}", failure.source, failure.message);
    }

    let score = analysis.forensic.risk_score;
    let color = match score {
        0..=29 => GREEN,
        30..=59 => YELLOW,
        _ => RED,
    };
    println!("  Risk score : {color}{score}/100{RESET}");
    if let Some(alert) = &analysis.forensic.tampering_alert {
        println!("  {RED}{BOLD}{alert}{RESET}");
    }
    println!();
}

fn print_intel(intel: &[(String, String)]) {
    println!("  {BOLD}Quick Intel{RESET}");
    println!("  {DIM}{}{RESET}", "─".repeat(78));
    for (label, value) in intel {
        print_row(label, value);
    }
    println!();
}

/// Non-empty categories only.
fn print_categories(tags: &exif_forensics::record::TagMap) {
    let categories = categorize(tags);
    if categories.iter().all(|c| c.is_empty()) {
        println!("  {DIM}(no matching metadata){RESET}");
        println!();
        return;
    }

    for category in categories.iter().filter(|c| !c.is_empty()) {
        println!("  {BOLD}{}{RESET} {DIM}[{}]{RESET}", category.title, category.risk_level);
        println!("  {DIM}{}{RESET}", "─".repeat(78));
        for (tag, val) in &category.tags {
            print_row(tag, val);
        }
        println!();
    }
}

fn print_complete(tags: &exif_forensics::record::TagMap) {
    if tags.is_empty() {
        println!("  {DIM}(no matching metadata){RESET}");
    }
    for (tag, val) in tags {
        print_row(tag, val);
    }
    println!();
}

/// Print a single row in the tag table.
fn print_row(tag: &str, val: &str) {
    let tag_col = format!("{:<width$}", tag, width = TAG_WIDTH);
    let indent = " ".repeat(TAG_WIDTH + 3);
    let lines = wrap_text(val, VAL_WIDTH);
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            println!("  {tag_col} : {line}");
        } else {
            println!("  {indent}{line}");
        }
    }
}

/// Wrap text at word boundaries to fit within max_width.
fn wrap_text(s: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in s.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
        } else if current_line.len() + 1 + word.len() <= max_width {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            lines.push(current_line);
            current_line = word.to_string();
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(s.to_string());
    }

    lines
}
