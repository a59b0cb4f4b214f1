use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vitrine::{Bootstrap, FsPreloader, Page, PageConfig, PageEvent, Showcase, ShowcaseOptions};

#[derive(Parser, Debug)]
#[command(name = "vitrine", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bootstrap a page description and print a summary.
    Check(CheckArgs),
    /// Replay a scripted session and print one JSON line per state transition.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Page description JSON.
    #[arg(long)]
    page: PathBuf,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Page description JSON.
    #[arg(long)]
    page: PathBuf,

    /// Event script JSON: `[{"at": secs, "event": {...}}]`.
    #[arg(long)]
    script: PathBuf,

    /// Frames per second.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Seconds to keep running after the last scripted event.
    #[arg(long, default_value_t = 3.0)]
    tail: f64,
}

#[derive(Debug, serde::Deserialize)]
struct ScriptStep {
    at: f64,
    event: PageEvent,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn open_page(path: &Path, options: &ShowcaseOptions) -> anyhow::Result<Showcase> {
    let config = PageConfig::from_path(path)
        .with_context(|| format!("load page '{}'", path.display()))?;
    let preloader = FsPreloader::new(&config.assets_root);
    let page = Page::build(&config)?;
    match vitrine::bootstrap(page, options, &preloader)? {
        Bootstrap::Ready(showcase) => Ok(*showcase),
        Bootstrap::Stalled { reason, .. } => {
            anyhow::bail!("page '{}' stalled while loading: {reason}", path.display())
        }
    }
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let showcase = open_page(&args.page, &ShowcaseOptions::default())?;
    let doc = showcase.document();
    let summary = serde_json::json!({
        "items": showcase.controller().items().len(),
        "viewport": doc.viewport(),
        "scroll_limit": showcase.scroll().limit(),
        "state": showcase.state(),
    });
    println!("{summary}");
    Ok(())
}

fn read_script(path: &Path) -> anyhow::Result<Vec<ScriptStep>> {
    let f = File::open(path).with_context(|| format!("open script '{}'", path.display()))?;
    let mut steps: Vec<ScriptStep> =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse script JSON")?;
    steps.sort_by(|a, b| a.at.total_cmp(&b.at));
    Ok(steps)
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    if !(args.fps.is_finite() && args.fps > 0.0) {
        anyhow::bail!("--fps must be > 0");
    }
    let steps = read_script(&args.script)?;
    let options = ShowcaseOptions {
        frame_rate: args.fps,
        ..ShowcaseOptions::default()
    };
    let mut showcase = open_page(&args.page, &options)?;

    let end = steps.last().map_or(0.0, |s| s.at) + args.tail.max(0.0);
    let dt = 1.0 / args.fps;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut next = steps.into_iter().peekable();
    let mut state = showcase.state();

    while showcase.clock() < end || showcase.is_animating() {
        while let Some(step) = next.next_if(|s| s.at <= showcase.clock()) {
            let accepted = showcase
                .dispatch(&step.event)
                .with_context(|| format!("dispatch event at {}s", step.at))?;
            tracing::info!(at = step.at, event = ?step.event, accepted, "event");
            emit_transition(&mut out, &showcase, &mut state)?;
        }
        showcase.tick(dt);
        emit_transition(&mut out, &showcase, &mut state)?;
    }
    out.flush()?;
    Ok(())
}

fn emit_transition(
    out: &mut impl std::io::Write,
    showcase: &Showcase,
    last: &mut vitrine::TransitionState,
) -> anyhow::Result<()> {
    let now = showcase.state();
    if now == *last {
        return Ok(());
    }
    let line = serde_json::json!({
        "t": showcase.clock(),
        "from": *last,
        "to": now,
        "scroll": showcase.document().scroll_y(),
    });
    writeln!(out, "{line}")?;
    *last = now;
    Ok(())
}
