use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "focusflow-cli", version, about = "Focus/break interval timer with ambient sound")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the timer interactively in the foreground
    Run(commands::run::RunArgs),
    /// List available ambient sounds
    Sounds {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Preview the session-completion chime
    Chime,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args).await,
        Commands::Sounds { json } => commands::sounds::run(json),
        Commands::Chime => commands::chime::run().await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
