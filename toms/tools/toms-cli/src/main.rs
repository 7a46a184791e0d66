use clap::{Parser, Subcommand};

mod commands;

use toms::{
    user_error,
    utils::{logger, prelude::*},
};

#[derive(Parser, Debug)]
#[command(name = "toms-cli")]
#[command(about = "CLI d'optimisation de placement de ressources TOMS", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone, Debug)]
enum Commands {
    /// Lance l'optimisation génétique d'un scénario
    Optimize(commands::optimize::OptimizeArgs),

    /// Génère les fichiers d'un scénario (tâches, réseaux, net-commanders)
    Generate(commands::generate::GenerateArgs),
}

#[tokio::main]
async fn main() {
    logger::init_logging();

    // clap sort avec 2 par défaut ; ici 2 est réservé aux fatals de
    // configuration, les erreurs d'usage sortent avec 1.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            err.print().ok();
            std::process::exit(usage_exit_code(&err));
        }
    };

    if let Err(e) = execute_command(cli.command).await {
        user_error!("CMD_FAIL", "{}", e);
        std::process::exit(e.exit_code());
    }

    tracing::debug!("Fin de l'exécution du CLI");
}

/// Code de sortie d'une erreur de parsing : 0 pour `--help`/`--version`,
/// sinon le code usage de la taxonomie d'erreurs.
fn usage_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        AppError::Usage(err.to_string()).exit_code()
    } else {
        0
    }
}

async fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Optimize(args) => commands::optimize::handle(args).await,
        Commands::Generate(args) => commands::generate::handle(args).await,
    }
}
