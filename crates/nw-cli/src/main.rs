//! Terminal frontend for the Nebelwelt adventure engine.

use std::io::{self, BufRead, Write};
use std::process;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use nw_game::GameSession;
use nw_synth::{Backend, HttpSynthesizer, SynthConfig};

#[derive(Parser)]
#[command(
    name = "nebel",
    about = "Nebelwelt — a text adventure whose world is invented while you play",
    version
)]
struct Cli {
    /// API shape of the synthesis service
    #[arg(long, value_enum, default_value_t = BackendArg::Chat)]
    backend: BackendArg,

    /// Base URL of the synthesis service
    #[arg(long, default_value = "https://api.openai.com/v1")]
    base_url: String,

    /// Model identifier passed through to the service
    #[arg(long, default_value = "gpt-4o-mini")]
    model: String,

    /// Sampling temperature
    #[arg(long, default_value_t = 0.7)]
    temperature: f64,

    /// Completion budget per request, in tokens
    #[arg(long, default_value_t = 2000)]
    max_tokens: u32,

    /// Seconds before a single request is abandoned
    #[arg(long, default_value_t = 120)]
    timeout: u64,

    /// Theme for the synthesized world, e.g. "haunted lighthouse"
    #[arg(long)]
    theme: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum BackendArg {
    /// chat/completions with a system message
    Chat,
    /// bare completions
    Completion,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Chat => Self::Chat,
            BackendArg::Completion => Self::Completion,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{} {e}", "error:".red().bold());
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = SynthConfig {
        base_url: cli.base_url,
        model: cli.model,
        temperature: cli.temperature,
        max_tokens: cli.max_tokens,
        timeout: Duration::from_secs(cli.timeout),
        backend: cli.backend.into(),
        ..SynthConfig::from_env()
    };
    let synth = HttpSynthesizer::new(config).map_err(|e| e.to_string())?;

    println!("  {} a new world...", "Synthesizing".bold());
    let mut session = GameSession::bootstrap(synth, cli.theme.as_deref())
        .map_err(|e| format!("could not synthesize a world: {e}"))?;

    println!("\n{}\n", session.intro());

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("What do you want to do? ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match session.turn(input) {
            Ok(turn) => {
                if !turn.text.is_empty() {
                    println!("{}\n", turn.text);
                }
                if turn.ended {
                    break;
                }
            }
            Err(e) => {
                // The turn failed but the world did not change; dump the
                // state for the curious and keep playing.
                println!("{}\n", e.to_string().yellow());
                eprintln!("{}", session.world().to_pretty_json());
            }
        }
    }

    Ok(())
}
