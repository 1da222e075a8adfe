use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use podmix::config::{self, ConfigOverrides};
use podmix::output;
use podmix::publish::{self, RunClock};
use podmix::types::SelectionMode;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Flags that override `config.toml` values for a single run.
#[derive(clap::Args, Clone)]
struct FeedArgs {
    /// How many files to include in the feed
    #[arg(long, allow_negative_numbers = true)]
    num: Option<i64>,

    /// Base URL where files will be hosted, e.g. https://owner.github.io/repo
    #[arg(long)]
    site_url: Option<String>,

    /// Selection mode
    #[arg(long, value_enum)]
    mode: Option<SelectionMode>,

    /// RSS channel title
    #[arg(long)]
    channel_title: Option<String>,

    /// RSS channel description
    #[arg(long)]
    channel_desc: Option<String>,

    /// Rotate as if today were this date
    #[arg(long, value_name = "YYYY-MM-DD")]
    date: Option<NaiveDate>,
}

impl FeedArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            count: self.num,
            mode: self.mode,
            site_url: self.site_url.clone(),
            channel_title: self.channel_title.clone(),
            channel_description: self.channel_desc.clone(),
        }
    }

    fn clock(&self) -> RunClock {
        let clock = RunClock::system();
        match self.date {
            Some(date) => clock.with_today(date),
            None => clock,
        }
    }
}

#[derive(Parser)]
#[command(name = "podmix")]
#[command(about = "Publish a rotating subset of MP3 files with an RSS feed")]
#[command(long_about = "\
Publish a rotating subset of MP3 files with an RSS feed

Picks a fixed number of .mp3 files from the source directory, copies them
into the output directory and writes feed.xml pointing at their public URLs.

  mp3/                      public/  (recreated every build)
  ├── config.toml           ├── 03-bedtime.mp3
  ├── 01-intro.mp3    →     ├── 04-lullaby.mp3
  ├── ...                   └── feed.xml
  └── 09-outro.mp3

Modes:
  rotate   deterministic daily window, no state file needed (default)
  random   random sample on every run

Run 'podmix gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory with source MP3s
    #[arg(long, default_value = "mp3", global = true)]
    source: PathBuf,

    /// Output directory (deleted and recreated on build)
    #[arg(long, default_value = "public", global = true)]
    output: PathBuf,

    /// Config file (defaults to config.toml in the source directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log pipeline details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Select files, copy them to the output directory and write feed.xml
    Build(FeedArgs),
    /// Show the pool and today's selection without writing anything
    Check(FeedArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Build(args) => {
            let config = config::load_config(&cli.source, cli.config.as_deref(), args.overrides())?;
            let report = publish::publish(
                &cli.source,
                &cli.output,
                &config,
                args.clock(),
                &mut rand::rng(),
            )?;
            output::print_publish_output(&report);
        }
        Command::Check(args) => {
            let config = config::load_config(&cli.source, cli.config.as_deref(), args.overrides())?;
            let clock = args.clock();
            let (pool, chosen) = publish::plan(&cli.source, &config, clock, &mut rand::rng())?;
            output::print_check_output(&pool, &chosen, config.mode, clock.today);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Send `tracing` events to stderr. `RUST_LOG` wins unless `--verbose` is set.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
