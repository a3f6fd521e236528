use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

mod output;

use output::ColorMode;
use verdict_core::PdfBackend;
use verdict_pdf::PdfExtractBackend;

/// Test Report Verdict - scan QA report PDFs for test-result records and validate them
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan a PDF or text report for test-result records and validate them
    Scan {
        /// Path to the .pdf or .txt report to scan
        file_path: PathBuf,

        /// Emit outcomes as a JSON array instead of the text report
        #[arg(long)]
        json: bool,

        /// Path to output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Stop checking at the first invalid record
        #[arg(long)]
        fail_fast: bool,

        /// Dry run: extract and print records without validating them
        #[arg(long)]
        dry_run: bool,

        /// Reject PDFs larger than this many megabytes
        #[arg(long)]
        max_pdf_size_mb: Option<u32>,
    },

    /// Extract report text and print it, without matching records
    Extract {
        /// Path to the .pdf or .txt report
        file_path: PathBuf,

        /// Path to output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the record schema as JSON
    Schema,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Schema => schema(),
        Command::Extract { file_path, output } => extract(file_path, output),
        Command::Scan {
            file_path,
            json,
            output,
            no_color,
            fail_fast,
            dry_run,
            max_pdf_size_mb,
        } => scan(
            file_path,
            json,
            output,
            no_color,
            fail_fast,
            dry_run,
            max_pdf_size_mb,
        ),
    }
}

fn scan(
    file_path: PathBuf,
    json: bool,
    output: Option<PathBuf>,
    no_color: bool,
    fail_fast: bool,
    dry_run: bool,
    max_pdf_size_mb: Option<u32>,
) -> anyhow::Result<()> {
    let config = verdict_core::config_file::load_config();

    // Resolve configuration: CLI flags > env vars > config file > defaults
    let fail_fast = resolve(
        fail_fast.then_some(true),
        env_flag("VERDICT_FAIL_FAST"),
        config.validation.as_ref().and_then(|v| v.fail_fast),
        false,
    );
    let max_pdf_size_mb = resolve(
        max_pdf_size_mb,
        env_parse("VERDICT_MAX_PDF_SIZE_MB"),
        config.extraction.as_ref().and_then(|e| e.max_pdf_size_mb),
        verdict_pdf::DEFAULT_MAX_SIZE_MB,
    );
    let color_pref = resolve(
        no_color.then_some(false),
        env_flag("VERDICT_COLOR"),
        config.display.as_ref().and_then(|d| d.color),
        true,
    );

    // Determine color mode and output writer
    let use_color = color_pref && output.is_none() && !json;
    let color = ColorMode(use_color);

    let mut writer: Box<dyn Write> = if let Some(ref output_path) = output {
        Box::new(std::fs::File::create(output_path)?)
    } else {
        Box::new(std::io::stdout())
    };

    if !file_path.exists() {
        anyhow::bail!("File not found: {}", file_path.display());
    }

    let file_name = file_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| file_path.display().to_string());

    let records = if is_txt(&file_path) {
        let text = std::fs::read_to_string(&file_path)?;
        verdict_parsing::find_records(&verdict_parsing::expand_ligatures(&text))
    } else {
        let backend = PdfExtractBackend::new().with_max_size_mb(max_pdf_size_mb);
        verdict_parsing::extract_records(&file_path, &backend)?
    };

    if dry_run {
        if json {
            serde_json::to_writer_pretty(&mut writer, &records)?;
            writeln!(writer)?;
        } else {
            output::print_records(&mut writer, &file_name, &records, color)?;
        }
        return Ok(());
    }

    let matched = records.len();

    if !json {
        output::print_scan_summary(&mut writer, &file_name, matched)?;
        if records.is_empty() {
            writeln!(writer, "No records to check.")?;
            return Ok(());
        }
    }

    let report = verdict_core::check_records(records, fail_fast);

    if json {
        let outcomes: Vec<_> = report
            .outcomes
            .iter()
            .map(|o| {
                serde_json::json!({
                    "test_id": o.record.test_id,
                    "date": o.record.date,
                    "result": o.record.result,
                    "valid": o.is_valid(),
                    "violation": o.violation.as_ref().map(|v| v.to_string()),
                })
            })
            .collect();
        serde_json::to_writer_pretty(&mut writer, &outcomes)?;
        writeln!(writer)?;
    } else {
        output::print_check_report(&mut writer, matched, &report, color)?;
    }

    if !report.all_valid() {
        std::process::exit(1);
    }
    Ok(())
}

fn extract(file_path: PathBuf, output: Option<PathBuf>) -> anyhow::Result<()> {
    if !file_path.exists() {
        anyhow::bail!("File not found: {}", file_path.display());
    }

    let config = verdict_core::config_file::load_config();
    let max_pdf_size_mb = resolve(
        None,
        env_parse("VERDICT_MAX_PDF_SIZE_MB"),
        config.extraction.as_ref().and_then(|e| e.max_pdf_size_mb),
        verdict_pdf::DEFAULT_MAX_SIZE_MB,
    );

    let mut writer: Box<dyn Write> = if let Some(ref output_path) = output {
        Box::new(std::fs::File::create(output_path)?)
    } else {
        Box::new(std::io::stdout())
    };

    let text = load_report_text(&file_path, max_pdf_size_mb)?;
    writeln!(writer, "{}", text)?;
    Ok(())
}

fn schema() -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&verdict_core::schema_json())?);
    Ok(())
}

fn is_txt(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("txt"))
        .unwrap_or(false)
}

/// Read report text: `.txt` files directly, everything else through the PDF
/// backend. Ligatures are expanded either way so matching sees plain ASCII.
fn load_report_text(file_path: &Path, max_pdf_size_mb: u32) -> anyhow::Result<String> {
    let text = if is_txt(file_path) {
        std::fs::read_to_string(file_path)?
    } else {
        let backend = PdfExtractBackend::new().with_max_size_mb(max_pdf_size_mb);
        backend.extract_text(file_path)?
    };
    Ok(verdict_parsing::expand_ligatures(&text))
}

fn resolve<T>(flag: Option<T>, env: Option<T>, file: Option<T>, default: T) -> T {
    flag.or(env).or(file).unwrap_or(default)
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name)
        .ok()
        .and_then(|v| match v.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
