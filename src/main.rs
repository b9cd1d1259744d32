use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use unitverify::{TechLevel, TestEntityOption, TestEntityOptionBuilder, Unit, VerifyError};

use std::error::Error;
use std::process::ExitCode;

// Command line parsing {{{1
//
#[derive(Parser)]
#[command(version)]
#[command(about = "Check units against their construction rules", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    #[arg(help = "Show internal values")]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    Verify {
        #[arg(help = "Unit files to verify")]
        #[arg(required = true)]
        files: Vec<String>,

        #[arg(short, long)]
        #[arg(help = "Options file")]
        #[arg(conflicts_with_all = ["show_underweight", "max_overweight"])]
        options: Option<String>,

        #[arg(short, long)]
        #[arg(help = "Rules level ammunition is held to [default: the unit's level]")]
        ammo_tech_level: Option<String>,

        #[arg(long)]
        #[arg(help = "Report units lighter than their declared tonnage")]
        show_underweight: bool,

        #[arg(long, default_value_t = 0.0)]
        #[arg(help = "Allowed excess weight as a fraction of declared tonnage")]
        max_overweight: f64,

        #[arg(short, long)]
        #[arg(help = "Print verdicts as JSON")]
        json: bool,
    },

    Options {
        #[arg(short, long)]
        #[arg(help = "Filename to save default options to")]
        to: Option<String>,
    },
}

// Verify {{{1
//
/// Verify each unit and print its report. Returns the number of units that
/// failed.
///
fn verify_units(
    files: Vec<String>,
    options: &TestEntityOption,
    ammo_tech_level: Option<TechLevel>,
    json: bool,
    debug: bool,
) -> Result<usize, Box<dyn Error>> {
    let mut failed = 0;

    for file in files {
        let unit = Unit::load(&file)?;
        let verdict = unitverify::verify(&unit, options, ammo_tech_level.unwrap_or(unit.tech_level));

        if json {
            println!("{}", serde_json::to_string_pretty(&verdict)?);
        } else {
            println!("{}\n", verdict.report(&unit.name));
        }
        if debug { eprintln!("{}", verdict.breakdown); }

        if verdict.is_failure() { failed += 1; }
    }

    Ok(failed)
}

// Main {{{1
//
fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("unitverify=debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Verify { files, options, ammo_tech_level, show_underweight, max_overweight, json } => {
            let options = match options {
                Some(p) => TestEntityOption::load(&p)?,
                None => TestEntityOptionBuilder::default()
                    .show_underweight(show_underweight)
                    .max_overweight(max_overweight)
                    .build()
                    .map_err(VerifyError::from)?,
            };
            let ammo_tech_level = ammo_tech_level.map(TechLevel::from);

            let count = files.len();
            let failed = verify_units(files, &options, ammo_tech_level, json, cli.debug)?;
            info!(count, failed, "verified");

            Ok(if failed > 0 { ExitCode::FAILURE } else { ExitCode::SUCCESS })
        },

        Commands::Options { to } => {
            let options = TestEntityOption::default();

            match to {
                Some(to) => options.save(&to)?,
                None => println!("{}", serde_json::to_string_pretty(&options)?),
            }

            Ok(ExitCode::SUCCESS)
        },
    }
}

// Testing {{{1
//
#[test]
fn verify_cli() {
    use clap::CommandFactory;

    Cli::command().debug_assert();
}
