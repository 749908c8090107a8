//! Portfolio Chat - talk to the portfolio bot from a terminal.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use chat_core::{ChatWidget, Renderer, StrategyKind, TranscriptEntry, WidgetConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Overlap,
    Keyword,
}

impl From<StrategyArg> for StrategyKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Overlap => StrategyKind::Overlap,
            StrategyArg::Keyword => StrategyKind::Keyword,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "portfolio-chat",
    about = "Ask the portfolio bot questions from the terminal",
    version
)]
struct Cli {
    /// Widget config file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Knowledge file (.json or .toml); overrides the config.
    #[arg(short, long)]
    knowledge: Option<PathBuf>,

    /// Built-in table to use when no knowledge file is given.
    #[arg(short, long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Reply immediately instead of pausing first.
    #[arg(long)]
    no_delay: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Prints transcript entries that have not been printed yet.
struct TerminalRenderer<W: Write> {
    out: W,
    printed: usize,
}

impl<W: Write> TerminalRenderer<W> {
    fn new(out: W) -> Self {
        Self { out, printed: 0 }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, transcript: &[TranscriptEntry]) {
        for entry in transcript.iter().skip(self.printed) {
            let prefix = if entry.from_user { "you>" } else { "bot>" };
            // A closed stdout is not worth aborting the conversation over
            let _ = writeln!(self.out, "{} {}", prefix, entry.text);
        }
        self.printed = transcript.len();
        let _ = self.out.flush();
    }

    fn set_visible(&mut self, visible: bool) {
        let state = if visible { "opened" } else { "closed" };
        let _ = writeln!(self.out, "[chat {}]", state);
    }
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn build_config(cli: &Cli) -> Result<WidgetConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => WidgetConfig::load(path)?,
        None => WidgetConfig::default(),
    };

    if let Some(strategy) = cli.strategy {
        config.adopt_strategy(strategy.into());
    }
    if let Some(knowledge) = &cli.knowledge {
        config.knowledge = Some(knowledge.clone());
    }
    if cli.no_delay {
        config.reply_delay_ms = 0;
    }
    Ok(config)
}

/// Feed input lines to the widget until `/quit` or end of input.
fn run<R: Renderer, I: BufRead>(
    widget: &mut ChatWidget<R>,
    input: I,
    delay: Duration,
) -> io::Result<()> {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                tracing::warn!(error = %e, "Skipping input line that is not valid UTF-8");
                continue;
            }
            Err(e) => return Err(e),
        };

        match line.trim() {
            "/quit" => break,
            "/toggle" => {
                widget.toggle();
                continue;
            }
            _ => {}
        }

        if !widget.is_visible() {
            widget.open();
        }

        if widget.submit_deferred(&line).is_none() {
            continue;
        }
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        widget.deliver_reply();
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = build_config(&cli)?;
    let delay = config.reply_delay();
    let mut widget = ChatWidget::from_config(config, TerminalRenderer::new(io::stdout()))?;

    tracing::info!(
        session = %widget.session().id(),
        strategy = %widget.session().strategy().kind(),
        "Chat ready"
    );

    println!("{}", widget.config().title);
    println!("{}", widget.config().footer);
    println!("Type /toggle to show or hide the chat, /quit to leave.");
    widget.open();

    run(&mut widget, io::stdin().lock(), delay)?;
    Ok(())
}
