//! unhocr CLI - hOCR word export tool

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;

use unhocr::render::{self, ExportOptions, ExportStats};
use unhocr::{HocrParser, JsonFormat, OutputFormat, PageSelection};

#[derive(Parser)]
#[command(name = "unhocr")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Export words from hOCR documents to CSV and JSON", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export word records to CSV or JSON
    Convert {
        /// Input hOCR file
        #[arg(value_name = "INFILE")]
        input: PathBuf,

        /// Output file
        #[arg(value_name = "OUTFILE")]
        output: PathBuf,

        /// Pages to export (e.g., "2", "2-3"); may be repeated
        #[arg(long, value_name = "SPEC", num_args = 1.., action = ArgAction::Append)]
        pages: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "csv")]
        format: Format,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Extract plain text, one line per hOCR line
    Text {
        /// Input hOCR file
        #[arg(value_name = "INFILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Pages to extract (e.g., "2", "2-3"); may be repeated
        #[arg(long, value_name = "SPEC", num_args = 1.., action = ArgAction::Append)]
        pages: Vec<String>,
    },

    /// Show document information
    Info {
        /// Input hOCR file
        #[arg(value_name = "INFILE")]
        input: PathBuf,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Comma-separated values with a header row
    Csv,
    /// Array of record objects
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => OutputFormat::Csv,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(log_level(cli.verbose))
        .init();

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            pages,
            format,
            pretty,
        } => cmd_convert(&input, &output, &pages, format, pretty),
        Commands::Text {
            input,
            output,
            pages,
        } => cmd_text(&input, output.as_deref(), &pages),
        Commands::Info { input } => cmd_info(&input),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn cmd_convert(
    input: &Path,
    output: &Path,
    pages: &[String],
    format: Format,
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let selection = PageSelection::from_specs(pages)?;
    let mut options = ExportOptions::new()
        .with_pages(selection)
        .with_format(format.into());
    if pretty {
        options = options.with_json_format(JsonFormat::Pretty);
    }

    let parser = HocrParser::open(input)?;
    let doc = parser.parse()?;

    let selected = doc
        .numbered_pages()
        .filter(|(number, _)| options.pages.includes(*number))
        .count();

    let pb = ProgressBar::new(selected as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut stats = ExportStats::new(doc.page_count());
    let records = render::export_pages(&doc, &options.pages, |number, page_records| {
        pb.set_message(format!("page {}", number));
        stats.add_page(page_records);
        pb.inc(1);
    })?;
    pb.finish_with_message("Done!");

    let mut writer = BufWriter::new(File::create(output)?);
    render::render_to(&records, &options, &mut writer)?;
    writer.flush()?;

    println!("\n{}", "Export summary:".green().bold());
    println!(
        "  {} {} of {} pages",
        "├─".dimmed(),
        stats.exported_pages,
        stats.page_count
    );
    println!("  {} {} words", "├─".dimmed(), stats.word_count);
    println!("  {} {}", "└─".dimmed(), output.display());

    Ok(())
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    pages: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let selection = PageSelection::from_specs(pages)?;

    let parser = HocrParser::open(input)?;
    let doc = parser.parse()?;
    let text = render::to_text(&doc, &selection)?;

    if let Some(path) = output {
        fs::write(path, &text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let parser = HocrParser::open(input)?;
    let doc = parser.parse()?;
    let metadata = doc.metadata();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), doc.page_count());

    if let Some(ref title) = metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref system) = metadata.ocr_system {
        println!("{}: {}", "OCR system".bold(), system);
    }
    if !metadata.langs.is_empty() {
        println!("{}: {}", "Languages".bold(), metadata.langs.join(", "));
    }
    if !metadata.capabilities.is_empty() {
        println!(
            "{}: {}",
            "Capabilities".bold(),
            metadata.capabilities.join(" ")
        );
    }

    println!();
    println!("{}", "Page Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for (number, page) in doc.numbered_pages() {
        let dims = page
            .bbox()
            .map(|b| format!("{}x{}", b.width(), b.height()))
            .unwrap_or_else(|| "?".to_string());
        println!(
            "{} {}: {} {}, {} blocks, {} lines, {} words",
            "Page".bold(),
            number,
            dims,
            page.image().unwrap_or("").dimmed(),
            page.blocks()?.len(),
            page.lines()?.len(),
            page.words()?.len()
        );
    }

    println!();
    println!("{}: {}", "Total words".bold(), doc.word_count()?);

    Ok(())
}
