use clap::{Parser, Subcommand};
use simple_catalog::navigation::PageCursor;
use simple_catalog::types::PageSequence;
use simple_catalog::{config, generate, output, scan, sequence};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "simple-catalog")]
#[command(about = "Paginated product catalogs from a product list")]
#[command(long_about = "\
Paginated product catalogs from a product list

The catalog directory holds the selected products, in display order, and an
optional config file. Products are cut into A4 pages sized by the selected
layout, with an optional cover page and optional category divider pages.

Catalog structure:

  catalog/
  ├── catalog.toml     # Optional config (cover, toggles, layout, colors)
  └── products.json    # [{\"id\": \"p-1\", \"name\": \"Lamp\", \"category\": \"Lighting\"}, ...]

Page sequence:
  Cover       if pages.enable_cover_page
  Divider     per category, if pages.enable_category_dividers
  Products    at most N per page, N from the layout and column count

Run 'simple-catalog gen-config' to generate a documented catalog.toml.")]
#[command(version)]
struct Cli {
    /// Catalog directory
    #[arg(long, default_value = "catalog", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest, page sequence)
    #[arg(long, default_value = ".simple-catalog-temp", global = true)]
    temp_dir: PathBuf,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load products and config into a manifest
    Scan,
    /// Cut the manifest into an ordered page sequence
    Sequence,
    /// Render the page sequence to HTML
    Generate,
    /// Run the full pipeline: scan → sequence → generate
    Build,
    /// Validate the catalog directory without writing anything
    Check,
    /// Print one page of the sequence
    Show {
        /// 1-based page number; out-of-range numbers show the last page
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// List known layouts and their page capacity
    Layouts,
    /// Print a stock catalog.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let manifest_path = cli.temp_dir.join("manifest.json");
    let pages_path = cli.temp_dir.join("pages.json");

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            write_json(&cli.temp_dir, &manifest_path, &manifest)?;
            output::print_scan_output(&manifest, has_config_file(&cli.source));
        }
        Command::Sequence => {
            let manifest: scan::Manifest =
                serde_json::from_str(&std::fs::read_to_string(&manifest_path)?)?;
            let pages = sequence::sequence_catalog(&manifest)?;
            write_json(&cli.temp_dir, &pages_path, &pages)?;
            output::print_sequence_output(&pages);
        }
        Command::Generate => {
            let report = generate::generate_from_files(&manifest_path, &pages_path, &cli.output)?;
            let pages: PageSequence = serde_json::from_str(&std::fs::read_to_string(&pages_path)?)?;
            output::print_generate_output(&pages, &report);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            write_json(&cli.temp_dir, &manifest_path, &manifest)?;
            output::print_scan_output(&manifest, has_config_file(&cli.source));

            println!("==> Stage 2: Sequencing pages");
            let pages = sequence::sequence_catalog(&manifest)?;
            write_json(&cli.temp_dir, &pages_path, &pages)?;
            output::print_sequence_output(&pages);

            println!("==> Stage 3: Generating HTML → {}", cli.output.display());
            let report = generate::generate(&manifest, &pages, &cli.output)?;
            output::print_generate_output(&pages, &report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, has_config_file(&cli.source));
            let pages = sequence::sequence_catalog(&manifest)?;
            println!("==> Catalog is valid ({} pages)", pages.len());
        }
        Command::Show { page } => {
            let manifest = scan::scan(&cli.source)?;
            let pages = sequence::sequence_catalog(&manifest)?;
            let cursor = PageCursor::at(page.saturating_sub(1), pages.len());
            let number = cursor.index() + 1;
            if number != page {
                println!("Page {page} is out of range, showing page {number}");
            }
            println!("Page {} of {}", number, cursor.page_count());
            if let Some(descriptor) = pages.pages.get(cursor.index()) {
                for line in output::format_page(number, descriptor) {
                    println!("{}", line);
                }
            }
        }
        Command::Layouts => {
            let config = config::load_config(&cli.source)?;
            let registry = config.registry();
            for line in
                output::format_layouts(&registry, config.layout.columns, &config.layout.template)
            {
                println!("{}", line);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("simple_catalog={default_level}"))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn has_config_file(source: &Path) -> bool {
    source.join(config::CONFIG_FILE).exists()
}

fn write_json<T: serde::Serialize>(
    dir: &Path,
    path: &Path,
    value: &T,
) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(dir)?;
    std::fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}
