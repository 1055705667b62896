mod host;
mod replay;
mod trace;
mod watch;

use anyhow::Context;
use clap::Parser;
use orbit::Size;
use orbit::config::{self, MenuConfig};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "orbit-replay", version, about, long_about = None)]
struct Cli {
    /// Recorded pointer trace, one JSON event per line
    #[arg(required_unless_present = "init_config")]
    trace: Option<PathBuf>,

    /// Menu config to use instead of the user's config file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Viewport extent the trace was recorded in
    #[arg(long, default_value = "1280x800", value_parser = parse_viewport)]
    viewport: Size,

    /// Print one JSON snapshot per line instead of a table
    #[arg(long)]
    json: bool,

    /// Replay again whenever the trace or config changes
    #[arg(short = 'w', long)]
    watch: bool,

    /// Write the commented default config to the user's config directory and exit
    #[arg(long)]
    init_config: bool,
}

impl Cli {
    fn trace(&self) -> anyhow::Result<&Path> {
        self.trace
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("No trace file given."))
    }
}

fn parse_viewport(s: &str) -> Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
            .ok_or_else(|| format!("invalid dimension '{}'", v))
    };
    Ok(Size::new(parse(w)?, parse(h)?))
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<MenuConfig> {
    match path {
        Some(path) => config::load_config_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(config::load_or_default()),
    }
}

fn replay_once(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_ref())?;
    let path = cli.trace()?;
    let text = fs_err::read_to_string(path)?;
    let entries = trace::parse_trace(&text)
        .with_context(|| format!("Malformed trace {}", path.display()))?;

    if entries.is_empty() {
        anyhow::bail!("Trace {} contains no events.", path.display());
    }

    for step in replay::run(config, cli.viewport, &entries) {
        if cli.json {
            println!("{}", serde_json::to_string(&step)?);
        } else {
            println!("{}", step.render());
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.init_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        Ok(())
    } else if cli.watch {
        watch::run(&cli)
    } else {
        replay_once(&cli)
    }
}
