use clap::{Parser, Subcommand};
use pdf_carousel::collection::PageCollection;
use pdf_carousel::config::{self, CarouselConfig};
use pdf_carousel::export::{self, LopdfBuilder};
use pdf_carousel::imaging::RustBackend;
use pdf_carousel::ingest::{self, IngestReport};
use pdf_carousel::output;
use pdf_carousel::reorder::apply_move;
use pdf_carousel::telemetry::LogTelemetry;
use pdf_carousel::types::PageSummary;
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;

/// Shared flags for commands that read images.
#[derive(clap::Args, Clone)]
struct InputArgs {
    /// Image files or directories (directory contents are taken one level deep, by name)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(Parser)]
#[command(name = "pdf-carousel")]
#[command(about = "Turn images into a one-image-per-page PDF")]
#[command(long_about = "\
Turn images into a one-image-per-page PDF

Every page is exactly the size of its image. Pages follow the order the
images finish loading in, unless reordered with --move or configured with
[ingest] append_order = \"input\".

Files that cannot be decoded are skipped.

Run 'pdf-carousel gen-config' to generate a documented config file.")]
#[command(version = env!("CAROUSEL_VERSION"))]
struct Cli {
    /// Config file (TOML); stock defaults when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug diagnostics to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load images, reorder them, and write the PDF
    Build {
        #[command(flatten)]
        input: InputArgs,

        /// Directory the PDF is written to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Output file name (overrides [export] file_name)
        #[arg(long)]
        file_name: Option<String>,

        /// Move page NAME before page TARGET; repeatable, applied in order
        #[arg(long = "move", value_name = "NAME:TARGET", value_parser = parse_move)]
        moves: Vec<(String, String)>,

        /// Drop page NAME before exporting; repeatable
        #[arg(long, value_name = "NAME")]
        remove: Vec<String>,
    },
    /// Load images and print the page list
    List {
        #[command(flatten)]
        input: InputArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print a stock config file with all options documented
    GenConfig,
}

fn parse_move(value: &str) -> Result<(String, String), String> {
    match value.split_once(':') {
        Some((name, target)) if !name.is_empty() && !target.is_empty() => {
            Ok((name.to_string(), target.to_string()))
        }
        _ => Err(format!("expected NAME:TARGET, got '{value}'")),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Build {
            input,
            out_dir,
            file_name,
            moves,
            remove,
        } => {
            let mut site_config = config::load_config(cli.config.as_deref())?;
            if let Some(name) = file_name {
                site_config.export.file_name = name;
                site_config.validate()?;
            }
            init_thread_pool(&site_config.processing);

            println!("==> Loading images");
            let mut collection = PageCollection::new();
            load_pages(&input.inputs, &site_config, &mut collection)?;

            for name in &remove {
                match collection.find_by_name(name).map(|p| p.id) {
                    Some(id) => {
                        collection.remove(id);
                    }
                    None => log::warn!("--remove {name}: no such page"),
                }
            }
            for (name, target) in &moves {
                let moved = collection.find_by_name(name).map(|p| p.id);
                let before = collection.find_by_name(target).map(|p| p.id);
                match (moved, before) {
                    (Some(moved), Some(before)) => {
                        if !apply_move(&mut collection, moved, before) {
                            log::info!("--move {name}:{target} left the order unchanged");
                        }
                    }
                    _ => log::warn!("--move {name}:{target}: no such page"),
                }
            }

            println!("==> Pages");
            output::print_page_list(&collection);

            println!("==> Exporting");
            let builder = LopdfBuilder::new(
                site_config.export.quality(),
                site_config.export.compress,
            );
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_export_event(&event) {
                        println!("{}", line);
                    }
                    // The delayed clear is for interactive surfaces only
                    if event == export::ExportEvent::Finished {
                        break;
                    }
                }
            });
            let result = export::export(
                builder,
                &collection.snapshot(),
                &site_config.export.options(),
                Some(tx),
                Some(&LogTelemetry),
            );
            printer.join().map_err(|_| "output thread panicked")?;
            let artifact = result?;

            let path = artifact.save_into(&out_dir)?;
            output::print_export_summary(&artifact, &path);
        }
        Command::List { input, json } => {
            let site_config = config::load_config(cli.config.as_deref())?;
            init_thread_pool(&site_config.processing);

            let mut collection = PageCollection::new();
            if json {
                let report = run_ingest(&input.inputs, &site_config, &mut collection, false)?;
                for (name, reason) in &report.skipped {
                    log::warn!("skipped {name}: {reason}");
                }
                let summaries: Vec<PageSummary> = collection.iter().map(|p| p.summary()).collect();
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                load_pages(&input.inputs, &site_config, &mut collection)?;
                output::print_page_list(&collection);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Ingest with per-file progress printed to stdout.
fn load_pages(
    inputs: &[PathBuf],
    site_config: &CarouselConfig,
    collection: &mut PageCollection,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = run_ingest(inputs, site_config, collection, true)?;
    for line in output::format_ingest_summary(&report) {
        println!("{}", line);
    }
    Ok(())
}

fn run_ingest(
    inputs: &[PathBuf],
    site_config: &CarouselConfig,
    collection: &mut PageCollection,
    progress: bool,
) -> Result<IngestReport, Box<dyn std::error::Error>> {
    let files = ingest::expand_inputs(inputs)?;
    if !progress {
        return Ok(ingest::ingest(
            &RustBackend::new(),
            files,
            site_config.ingest.append_order,
            collection,
            None,
        ));
    }

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_ingest_event(&event) {
                println!("{}", line);
            }
        }
    });
    let report = ingest::ingest(
        &RustBackend::new(),
        files,
        site_config.ingest.append_order,
        collection,
        Some(tx),
    );
    printer.join().map_err(|_| "output thread panicked")?;
    Ok(report)
}

/// Install the stderr logger. Warnings by default, everything with `--verbose`.
fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .ok();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores: user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
