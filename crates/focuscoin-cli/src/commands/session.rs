use std::time::Duration;

use clap::{ArgGroup, Args};
use focuscoin_core::storage::MAX_TICK_INTERVAL_MS;
use focuscoin_core::{Config, Event, Preset, SessionTimer, SqliteStore, TimerState, Wallet};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render::Output;
use crate::scheduler::TokioScheduler;

#[derive(Args)]
#[command(group(ArgGroup::new("duration").required(true).args(["preset", "minutes"])))]
pub struct StartArgs {
    /// Canonical duration: 1h, 2h or 3h
    #[arg(long)]
    preset: Option<Preset>,
    /// Custom duration in minutes (decimals allowed)
    #[arg(long, allow_hyphen_values = true)]
    minutes: Option<String>,
    /// What you are focusing on
    #[arg(long, default_value = "")]
    task: String,
    /// Tick interval in milliseconds (defaults to timer.tick_interval_ms)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=MAX_TICK_INTERVAL_MS))]
    tick_ms: Option<u64>,
    /// Collect the reward without waiting for confirmation
    #[arg(long)]
    yes: bool,
    /// Print events as JSON lines
    #[arg(long)]
    json: bool,
}

enum Command {
    Pause,
    Resume,
    Exit,
    Acknowledge,
    Status,
}

fn parse_command(line: &str) -> Option<Command> {
    match line.trim().to_ascii_lowercase().as_str() {
        "p" | "pause" => Some(Command::Pause),
        "r" | "resume" => Some(Command::Resume),
        "x" | "exit" | "q" => Some(Command::Exit),
        "" | "a" | "ack" => Some(Command::Acknowledge),
        "s" | "status" => Some(Command::Status),
        _ => None,
    }
}

pub async fn run(args: StartArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut store = SqliteStore::open_default()?;
    let mut wallet = Wallet::load(&store)?;
    let out = Output::new(args.json, config.wallet.currency_symbol.clone());

    let interval = match args.tick_ms {
        Some(ms) => Duration::from_millis(ms),
        None => config.tick_interval(),
    };
    let (scheduler, mut ticks) = TokioScheduler::new();
    let mut timer = SessionTimer::with_interval(scheduler, interval);

    let started = match (args.preset, args.minutes.as_deref()) {
        (Some(preset), _) => timer.start_preset(preset, args.task),
        (None, Some(minutes)) => timer.start_custom(minutes, args.task),
        (None, None) => None,
    };
    let Some(started) = started else {
        let input = args.minutes.unwrap_or_default();
        return Err(format!("invalid duration '{input}': expected a positive number of minutes").into());
    };
    out.event(&started)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            Some(token) = ticks.recv() => {
                match timer.tick(token) {
                    Some(completed) => {
                        out.event(&completed)?;
                        if !args.yes && stdin_open && !args.json {
                            println!("Press Enter to collect your reward.");
                        }
                    }
                    None => out.progress(&timer),
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line {
                    Ok(Some(line)) => match parse_command(&line) {
                        Some(Command::Pause) => emit(&out, timer.pause())?,
                        Some(Command::Resume) => emit(&out, timer.resume())?,
                        Some(Command::Exit) => out.event(&timer.exit())?,
                        Some(Command::Acknowledge) => {
                            emit(&out, timer.acknowledge(&mut wallet, &mut store))?
                        }
                        Some(Command::Status) => {
                            let snapshot = timer.snapshot(&wallet);
                            println!("{}", serde_json::to_string(&snapshot)?);
                        }
                        None => eprintln!("unknown command: {}", line.trim()),
                    },
                    Ok(None) => stdin_open = false,
                    Err(e) => {
                        tracing::warn!(error = %e, "stdin closed");
                        stdin_open = false;
                    }
                }
            }
        }

        // Nobody left to answer: settle anything that needs a user action.
        let unattended = args.yes || !stdin_open;
        match timer.state() {
            TimerState::Completed if unattended => {
                emit(&out, timer.acknowledge(&mut wallet, &mut store))?;
            }
            TimerState::Paused if !stdin_open => {
                out.event(&timer.exit())?;
            }
            _ => {}
        }
        if timer.state() == TimerState::Idle {
            break;
        }
    }
    Ok(())
}

fn emit(out: &Output, event: Option<Event>) -> Result<(), Box<dyn std::error::Error>> {
    match event {
        Some(event) => out.event(&event),
        None => Ok(()),
    }
}
