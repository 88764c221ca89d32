use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "podium-cli", version, about = "Podium Timer CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Event selection and round control
    Event {
        #[command(subcommand)]
        action: commands::event::EventAction,
    },
    /// Segment timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Prep-time budgets
    Prep {
        #[command(subcommand)]
        action: commands::prep::PrepAction,
    },
    /// Settings management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Event { action } => commands::event::run(action),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Prep { action } => commands::prep::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
