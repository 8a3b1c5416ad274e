//! campaignkit CLI - format stats, play count-ups and replay campaign builds.

#![allow(clippy::needless_pass_by_value)]

mod script;

use campaignkit_core::{
    AnimationError, CampaignKitConfig, CatalogError, ConfigError, CountUp, DisplayFormat,
    FrameLoop, StatValue,
};
use clap::{Parser, Subcommand};
use script::{replay, ReplayReport, WizardScript};
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

#[derive(Parser)]
#[command(name = "campaignkit")]
#[command(about = "Stat formatting, count-up playback and campaign wizard replay")]
#[command(version)]
struct Cli {
    /// Config file (.yaml, .yml or .toml); defaults to the XDG search path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format a value the way a stat card shows it
    Format {
        /// Number to format; anything else is shown verbatim
        value: String,

        /// Display format (number, currency, percentage, compact)
        #[arg(short, long, default_value = "number")]
        format: String,
    },

    /// Play a count-up and print every frame
    Animate {
        /// Value to count up to
        #[arg(long, allow_hyphen_values = true)]
        to: f64,

        /// Value shown before the run starts
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        from: f64,

        /// Display format (number, currency, percentage, compact)
        #[arg(short, long, default_value = "number")]
        format: String,

        /// Override the configured duration
        #[arg(long)]
        duration_ms: Option<f64>,

        /// Override the configured frame rate
        #[arg(long)]
        fps: Option<u32>,

        /// Print frames as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replay a wizard script against the campaign builder
    Wizard {
        /// YAML script of builder actions
        script: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as YAML
    Config {
        /// Print the commented default file instead
        #[arg(long)]
        default: bool,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Animation(#[from] AnimationError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid wizard script {}: {source}", path.display())]
    Script {
        path: PathBuf,
        source: serde_yaml_ng::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml_ng::Error),
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn load_config(path: Option<&Path>) -> Result<CampaignKitConfig, CliError> {
    match path {
        Some(path) => Ok(CampaignKitConfig::load_from_file(path)?),
        None => Ok(CampaignKitConfig::load()),
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Format { value, format } => {
            let format: DisplayFormat = format.parse()?;
            println!("{}", parse_stat_value(&value).render(format));
        }
        Commands::Animate {
            to,
            from,
            format,
            duration_ms,
            fps,
            json,
        } => {
            let mut config = config;
            if let Some(ms) = duration_ms {
                config.animation.duration_ms = ms;
            }
            if let Some(fps) = fps {
                config.animation.fps = fps;
            }

            let frames = animate(&config, from, to, format.parse()?)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&frames)?);
            } else {
                for frame in &frames {
                    println!("{:>8.1}ms  {}", frame.t_ms, frame.text);
                }
            }
        }
        Commands::Wizard { script, json } => {
            let contents = fs::read_to_string(&script).map_err(|source| CliError::Read {
                path: script.clone(),
                source,
            })?;
            let parsed = WizardScript::from_yaml_str(&contents)
                .map_err(|source| CliError::Script { path: script, source })?;

            let report = replay(&parsed, config.seed_draft());
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Commands::Config { default } => {
            if default {
                print!("{}", CampaignKitConfig::default_yaml());
            } else {
                print!("{}", serde_yaml_ng::to_string(&config)?);
            }
        }
    }
    Ok(())
}

/// Numbers animate; anything that does not parse is text.
fn parse_stat_value(raw: &str) -> StatValue {
    raw.trim()
        .parse::<f64>()
        .map_or_else(|_| StatValue::Text(raw.to_string()), StatValue::Number)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Frame {
    t_ms: f64,
    text: String,
}

/// Frames needed to play out one run, plus the first and settling frames.
fn frame_budget(duration_ms: f64, interval_ms: f64) -> usize {
    let frames = (duration_ms / interval_ms).ceil();
    if frames.is_finite() && frames >= 0.0 {
        (frames.min(u32::MAX.into()) as usize).saturating_add(2)
    } else {
        2
    }
}

/// Count up from `from` to `to` on a frame loop and collect what was shown.
///
/// The run towards `from` is not recorded; playback starts with `from` on
/// screen.
fn animate(
    config: &CampaignKitConfig,
    from: f64,
    to: f64,
    format: DisplayFormat,
) -> Result<Vec<Frame>, CliError> {
    config.validate()?;
    let interval = config.animation.frame_interval_ms();
    let max_frames = frame_budget(config.animation.duration_ms, interval);

    let clock = Rc::new(Cell::new(0.0));
    let recording = Rc::new(Cell::new(from == 0.0));
    let shown: Rc<RefCell<Vec<Frame>>> = Rc::new(RefCell::new(Vec::new()));

    let sink = {
        let clock = clock.clone();
        let recording = recording.clone();
        let shown = shown.clone();
        move |text: &str| {
            if recording.get() {
                shown.borrow_mut().push(Frame {
                    t_ms: clock.get(),
                    text: text.to_string(),
                });
            }
        }
    };

    let mut frames = FrameLoop::new();
    let options = config.count_up_options(format);
    let count_up = CountUp::mount(StatValue::Number(from), options, sink, 0.0, &mut frames)?;

    let mut now = 0.0;
    if from != 0.0 {
        now = frames.run_until_idle(now, interval, max_frames);
        recording.set(true);
        shown.borrow_mut().push(Frame {
            t_ms: 0.0,
            text: count_up.text(),
        });
    }

    let start = now;
    count_up.set_value(StatValue::Number(to), start, &mut frames);
    let mut ran = 0;
    while frames.has_pending() && ran < max_frames {
        clock.set(now - start);
        frames.run_frame(now);
        now += interval;
        ran += 1;
    }
    count_up.unmount(&mut frames);

    let collected = shown.borrow().clone();
    Ok(collected)
}

fn print_report(report: &ReplayReport) {
    for outcome in &report.outcomes {
        let mark = if outcome.accepted { "ok" } else { "--" };
        print!(
            "{mark} {:<24} step {} ({})",
            outcome.action, outcome.step, outcome.step_title
        );
        match &outcome.note {
            Some(note) => println!("  {note}"),
            None => println!(),
        }
    }

    println!();
    println!("Phase:            {}", report.phase);
    println!("Final step:       {}", report.final_step);
    println!("Title:            {}", report.review.title);
    println!(
        "Content type:     {}",
        report.review.content_type.unwrap_or("—")
    );
    println!("Platforms:        {}", report.review.platforms);
    println!("Rate:             {}", report.review.rate);
    println!("Total budget:     {}", report.review.total_budget);
    println!("Estimated reach:  {}", report.review.estimated_reach);
    println!("{}", report.review.creator_payout);
}
