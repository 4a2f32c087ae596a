// src/main.rs
use std::error::Error;
use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use merger_search::markers::{self, MapView};
use merger_search::notice::Notice;
use merger_search::{convert, output, stats, utils, Dashboard};

#[derive(Parser)]
#[command(
    name = "merger_search",
    about = "Search and filter the 2025 ward/commune merger dataset",
    version
)]
struct Cli {
    /// Dataset JSON (defaults to $data_file, then data.json)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search units by name, province or former unit names
    Search {
        /// Query words (joined with spaces)
        query: Vec<String>,
    },

    /// Toggle merger sizes in order and show the filtered view
    Filter {
        /// Merger sizes; 1 selects unchanged units
        #[arg(allow_negative_numbers = true)]
        sizes: Vec<i64>,
    },

    /// Show one province and its units
    Province {
        /// Province id
        id: String,
    },

    /// Statistics cards and chart data
    Stats,

    /// Map markers in render batches
    Markers {
        /// Use fullscreen marker sizes
        #[arg(long)]
        fullscreen: bool,
    },

    /// Write the CSV export of every unit
    Export {
        /// Target directory (defaults to $export_dir, then Downloads)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build the dataset JSON from the crawled CSV table
    Convert {
        #[arg(short, long, default_value = "data.csv")]
        input: PathBuf,

        #[arg(short, long, default_value = "data.json")]
        output: PathBuf,
    },

    /// Read commands from stdin against one session
    Shell,
}

fn main() {
    env_logger::init();
    let start = Instant::now();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
    log::debug!("Completed in {:?}", start.elapsed());
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Commands::Convert { input, output } = &cli.command {
        return run_convert(input, output);
    }

    let path = utils::data_path(cli.data);
    let mut dashboard = match Dashboard::load(&path) {
        Ok(dashboard) => dashboard,
        Err(e) => {
            eprintln!("{}", Notice::load_failed());
            return Err(e.into());
        }
    };

    match cli.command {
        Commands::Search { query } => {
            let outcome = dashboard.search(&query.join(" "));
            output::print_json(&output::search_items(&outcome, dashboard.dataset()))?;
        }
        Commands::Filter { sizes } => {
            let mut notices = Vec::new();
            for size in sizes {
                notices.push(dashboard.toggle(size)?);
            }
            output::print_json(&output::filtered_view(&dashboard, notices))?;
        }
        Commands::Province { id } => match dashboard.province(&id) {
            Some(province) => output::print_json(&output::province_details(province))?,
            None => return Err(format!("no province with id {:?}", id).into()),
        },
        Commands::Stats => {
            output::print_json(&stats::overview(dashboard.dataset()))?;
        }
        Commands::Markers { fullscreen } => {
            let view = if fullscreen {
                MapView::Fullscreen
            } else {
                MapView::Inline
            };
            let batches: Vec<_> =
                markers::batches(markers::markers(&dashboard.dataset().provinces, view)).collect();
            output::print_json(&batches)?;
        }
        Commands::Export { output: dir } => {
            let outcome = dashboard.export(&utils::export_dir(dir));
            eprintln!("{}", outcome.notice);
            match outcome.path {
                Some(path) => println!("{}", path.display()),
                None => return Err("export failed".into()),
            }
        }
        Commands::Shell => run_shell(&mut dashboard)?,
        Commands::Convert { .. } => unreachable!("handled before loading"),
    }

    Ok(())
}

fn run_convert(input: &Path, output: &Path) -> Result<(), Box<dyn Error>> {
    log::trace!("Converting {} into {}", input.display(), output.display());
    let text = fs::read_to_string(input)?;
    let dataset = convert::dataset_from_csv(&text, Some(convert::vnexpress_metadata()))?;
    fs::write(output, dataset.to_json_pretty()?)?;

    let stats = &dataset.statistics;
    println!("Conversion complete!");
    println!("Total units: {}", stats.total_units);
    println!("Total provinces: {}", stats.total_provinces);
    println!("Merged units: {}", stats.total_merged);
    println!("Unchanged units: {}", stats.total_unchanged);
    Ok(())
}

/// One command per line: `search <q>`, `toggle <n>`, `clear`,
/// `province <id>`, `export [dir]`, `quit`.
fn run_shell(dashboard: &mut Dashboard) -> Result<(), Box<dyn Error>> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let (command, rest) = match line.trim().split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (line.trim(), ""),
        };

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "search" | "s" => {
                let outcome = dashboard.search(rest);
                output::print_json(&output::search_items(&outcome, dashboard.dataset()))?;
            }
            "toggle" | "t" => {
                let notice = match rest.parse::<i64>() {
                    Ok(size) => dashboard.toggle(size),
                    Err(_) => {
                        eprintln!("toggle expects a number, got {:?}", rest);
                        continue;
                    }
                };
                match notice {
                    Ok(notice) => {
                        output::print_json(&output::filtered_view(dashboard, vec![notice]))?
                    }
                    Err(e) => eprintln!("{}", e),
                }
            }
            "clear" | "c" => {
                let notice = dashboard.clear();
                output::print_json(&output::filtered_view(dashboard, vec![notice]))?;
            }
            "province" | "p" => match dashboard.province(rest) {
                Some(province) => output::print_json(&output::province_details(province))?,
                None => eprintln!("no province with id {:?}", rest),
            },
            "export" => {
                let dir = (!rest.is_empty()).then(|| PathBuf::from(rest));
                let outcome = dashboard.export(&utils::export_dir(dir));
                output::print_json(&outcome.notice)?;
            }
            other => eprintln!("unknown command {:?}", other),
        }
    }
    Ok(())
}
