//! Sizhu - Entry Point
//!
//! Thin command-line transport over the deterministic engine. The calendar
//! collaborator's output is supplied as a JSON file (a `LunarView`); the
//! engine itself performs no solar-term astronomy.

use sizhu::almanac::LunarView;
use sizhu::chart::pillars::{day_pillar, month_pillar, year_pillar};
use sizhu::chart::{compute_chart, Chart};
use sizhu::core::error::{BaziError, Result};
use sizhu::core::types::{Gender, Stem};
use sizhu::llm::{analyze_chart, LlmClient};
use sizhu::luck::{annual_fate, annual_fates, compute_luck_cycle};

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tokio::runtime::Runtime;

/// Four Pillars chart and luck-cycle calculator
#[derive(Parser, Debug)]
#[command(name = "sizhu")]
#[command(about = "Compute Four Pillars charts, luck cycles, and annual fates")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the full chart for a birth instant
    Chart {
        /// Calendar collaborator output (LunarView JSON file)
        #[arg(long)]
        view: PathBuf,

        /// Birth instant, e.g. 1990-03-21T08:30
        #[arg(long)]
        birth: String,

        /// Natal gender: male or female
        #[arg(long)]
        gender: String,

        /// Also request an LLM narration of the chart (needs GEMINI_API_KEY)
        #[arg(long)]
        read: bool,
    },

    /// Compute only the luck cycle for a birth instant
    Luck {
        /// Calendar collaborator output (LunarView JSON file)
        #[arg(long)]
        view: PathBuf,

        /// Birth instant, e.g. 1990-03-21T08:30
        #[arg(long)]
        birth: String,

        /// Natal gender: male or female
        #[arg(long)]
        gender: String,
    },

    /// Compute annual fates for a year or inclusive year range
    Annual {
        /// Reference day stem, e.g. 甲
        #[arg(long)]
        day_stem: String,

        /// Single year
        #[arg(long)]
        year: Option<i32>,

        /// Range start (used with --to)
        #[arg(long)]
        from: Option<i32>,

        /// Range end (used with --from)
        #[arg(long)]
        to: Option<i32>,
    },
}

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("sizhu=debug")
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Chart {
            view,
            birth,
            gender,
            read,
        } => {
            let view = load_view(&view)?;
            let birth = parse_birth(&birth)?;
            let gender: Gender = gender.parse()?;

            let chart = compute_chart(birth, gender, &view)?;
            print_json(&chart)?;

            if read {
                let reading = narrate(&chart)?;
                print_json(&reading)?;
            }
        }
        Command::Luck {
            view,
            birth,
            gender,
        } => {
            let view = load_view(&view)?;
            let birth = parse_birth(&birth)?;
            let gender: Gender = gender.parse()?;

            let year = year_pillar(&view, birth);
            let month = month_pillar(year.stem, &view);
            let day = day_pillar(&view);
            let cycle = compute_luck_cycle(gender, day.stem, month, birth, &view.jie_table);
            print_json(&cycle)?;
        }
        Command::Annual {
            day_stem,
            year,
            from,
            to,
        } => {
            let day_stem: Stem = day_stem.parse()?;
            match (year, from, to) {
                (Some(year), None, None) => print_json(&annual_fate(year, day_stem))?,
                (None, Some(from), Some(to)) => print_json(&annual_fates(from, to, day_stem)?)?,
                _ => {
                    return Err(BaziError::InvalidInput(
                        "pass either --year, or both --from and --to".into(),
                    ))
                }
            }
        }
    }

    Ok(())
}

fn load_view(path: &PathBuf) -> Result<LunarView> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn parse_birth(input: &str) -> Result<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .ok_or_else(|| {
            BaziError::InvalidInput(format!(
                "malformed birth instant {input:?} (expected e.g. 1990-03-21T08:30)"
            ))
        })
}

fn narrate(chart: &Chart) -> Result<sizhu::llm::ChartReading> {
    let client = LlmClient::from_env()?;
    tracing::info!("requesting chart narration");
    let rt = Runtime::new()?;
    rt.block_on(analyze_chart(&client, chart))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
