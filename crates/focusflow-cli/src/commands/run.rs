use std::io::Write as _;
use std::path::PathBuf;

use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use focusflow_core::format::{format_time, format_total_time};
use focusflow_core::scheduler::{self, TICK_PERIOD};
use focusflow_core::{now_ms, Controller, CoreError, Event, SessionKind, SoundCatalog, TimerEngine};

#[derive(Args)]
pub struct RunArgs {
    /// Focus session length in minutes
    #[arg(long, default_value_t = 25)]
    pub focus: u64,

    /// Break session length in minutes
    #[arg(long = "break", default_value_t = 5)]
    pub break_min: u64,

    /// Ambient sound id to select at startup
    #[arg(long)]
    pub sound: Option<String>,

    /// Add a file-backed ambient sound (repeatable); its id is the file stem
    #[arg(long = "ambient-file")]
    pub ambient_files: Vec<PathBuf>,

    /// Start with sound effects disabled
    #[arg(long)]
    pub muted: bool,

    /// Show whole minutes instead of MM:SS
    #[arg(long)]
    pub hide_seconds: bool,

    /// Start the focus session immediately
    #[arg(long)]
    pub autostart: bool,
}

pub async fn run(args: RunArgs) -> Result<(), CoreError> {
    let mut catalog = SoundCatalog::builtin();
    for path in &args.ambient_files {
        let id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "ambient".into());
        catalog.add_file(id.clone(), id, path.clone());
    }

    let engine = TimerEngine::with_durations(args.focus, args.break_min);
    let mut controller = Controller::with_engine(engine, catalog);
    if args.muted {
        controller.set_sound_enabled(false).await;
    }
    if let Some(id) = &args.sound {
        if !controller.set_selected_sound(id).await {
            return Err(CoreError::Custom(format!(
                "unknown sound id: {id} (see `focusflow-cli sounds`)"
            )));
        }
    }
    if args.autostart {
        if let Some(event) = controller.start(now_ms()).await {
            announce(&event);
        }
    }

    print_help();

    let (tick_tx, mut tick_rx) = mpsc::channel::<()>(8);
    let ticks = scheduler::register_periodic(TICK_PERIOD, move || {
        // A full channel means the loop is behind; dropped wake-ups are
        // harmless, remaining time is recomputed from the deadline anyway.
        let _ = tick_tx.try_send(());
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut status_line = String::new();

    loop {
        tokio::select! {
            _ = tick_rx.recv() => {
                if let Some(event) = controller.tick(now_ms()) {
                    announce(&event);
                }
                draw_status(&controller, args.hide_seconds, &mut status_line);
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if !handle_command(&mut controller, line.trim()).await? {
                            break;
                        }
                        draw_status(&controller, args.hide_seconds, &mut status_line);
                    }
                    None => break, // stdin closed
                }
            }
        }
    }

    ticks.cancel();
    println!();
    Ok(())
}

/// Dispatch one line of input. Returns false when the user quits.
async fn handle_command(controller: &mut Controller, line: &str) -> Result<bool, CoreError> {
    let mut parts = line.split_whitespace();
    let cmd = parts.next().unwrap_or("");
    let arg = parts.next();
    let now = now_ms();

    let event = match cmd {
        "" | "t" | "toggle" => controller.toggle(now).await,
        "start" => controller.start(now).await,
        "p" | "pause" => controller.pause(now),
        "r" | "reset" => controller.reset(now),
        "c" | "cycle" => controller.reset_cycle(),
        "f" | "focus" => {
            controller.switch_view(SessionKind::Focus);
            None
        }
        "b" | "break" => {
            controller.switch_view(SessionKind::Break);
            None
        }
        "a" | "add" => {
            let minutes = arg.and_then(|a| a.parse().ok()).unwrap_or(10);
            controller.add_minutes(minutes)
        }
        "d" | "set" => match arg {
            Some(input) => {
                let event = controller.set_custom_duration(input, now);
                if event.is_none() {
                    eprintln!("\ninvalid duration: {input:?} (positive whole minutes)");
                }
                event
            }
            None => {
                eprintln!("\nusage: set <minutes>");
                None
            }
        },
        "s" | "sound" => match arg {
            Some(id) => {
                if !controller.set_selected_sound(id).await {
                    eprintln!("\nunknown sound: {id}");
                }
                None
            }
            None => {
                if let Some(id) = controller.select_next_sound().await {
                    println!("\nambient sound: {id}");
                }
                None
            }
        },
        "m" | "mute" => {
            let enabled = !controller.sound_enabled();
            controller.set_sound_enabled(enabled).await;
            println!("\nsound {}", if enabled { "on" } else { "off" });
            None
        }
        "x" | "done" => {
            controller.complete_now(now);
            None
        }
        "ack" => {
            controller.acknowledge_cycle_complete();
            None
        }
        "status" => {
            println!("\n{}", serde_json::to_string_pretty(&controller.snapshot())?);
            None
        }
        "h" | "help" | "?" => {
            print_help();
            None
        }
        "q" | "quit" => return Ok(false),
        other => {
            eprintln!("\nunknown command: {other} (h for help)");
            None
        }
    };

    if let Some(event) = event {
        announce(&event);
    }
    Ok(true)
}

fn announce(event: &Event) {
    let message = match event {
        Event::TimerStarted { kind, .. } => format!("{} started", kind.label()),
        Event::TimerPaused {
            kind, remaining_ms, ..
        } => format!("{} paused, {} left", kind.label(), format_time(*remaining_ms, false)),
        Event::TimerReset { kind, .. } => format!("{} reset", kind.label()),
        Event::CycleReset { .. } => "new cycle: focus 25, break 5".to_string(),
        Event::MinutesAdded {
            kind, added_min, ..
        } => format!("added {added_min} min to {}", kind.label()),
        Event::DurationChanged {
            kind, duration_min, ..
        } => format!("{} set to {duration_min} min", kind.label()),
        Event::SessionCompleted { .. } => {
            "Focus complete! Break is up next, press enter to start it".to_string()
        }
        Event::CycleCompleted {
            total_focus_min, ..
        } => format!(
            "Cycle complete! Total focus {} (c starts a new cycle)",
            format_total_time(*total_focus_min)
        ),
    };
    println!("\n{message}");
}

fn draw_status(controller: &Controller, hide_seconds: bool, last: &mut String) {
    let snap = controller.snapshot();
    let state = match snap.active_mode {
        Some(kind) => format!("{} running", kind.label()),
        None => format!("{} idle", snap.view_mode.label()),
    };
    let mut line = format!(
        "[{state}] {}  total focus {}",
        format_time(snap.time_left_ms, hide_seconds),
        format_total_time(snap.total_focus_min)
    );
    if snap.cycle_completed {
        line.push_str("  cycle complete");
    }
    if line != *last {
        print!("\r\x1b[K{line}");
        let _ = std::io::stdout().flush();
        *last = line;
    }
}

fn print_help() {
    println!(
        "commands: enter/t toggle, p pause, r reset, c new cycle, f/b view focus/break,\n\
         a [min] add minutes, set <min> duration, s [id] sound, m mute, x complete,\n\
         ack dismiss cycle banner, status JSON, q quit"
    );
}
