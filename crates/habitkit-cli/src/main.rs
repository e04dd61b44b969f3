use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "habitkit-cli", version, about = "Habitkit CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Completion statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Settings management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Unit options for a goal type
    Units {
        /// Goal type (e.g. "distance"); omit to list all
        goal_type: Option<String>,
    },
    /// Seed demo tasks and history
    Seed {
        /// RNG seed for the generated history
        #[arg(long, default_value = "42")]
        seed: u64,
        /// Seed even if tasks already exist
        #[arg(long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate for
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Units { goal_type } => commands::units::run(goal_type),
        Commands::Seed { seed, force } => commands::seed::run(seed, force),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
