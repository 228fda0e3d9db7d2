use clap::{Parser, Subcommand};
use sea_orm::{Database, DbErr};
use sea_orm_migration::prelude::*;

use migration::Migrator;

/// Applies or inspects the splitledger schema.
#[derive(Debug, Parser)]
#[command(name = "migration")]
struct Args {
    /// SQLite connection string.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./splitledger.db?mode=rwc"
    )]
    database_url: String,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply pending migrations (default).
    Up {
        #[arg(long)]
        steps: Option<u32>,
    },
    /// Revert applied migrations, the last one unless `--steps` says otherwise.
    Down {
        #[arg(long, default_value_t = 1)]
        steps: u32,
    },
    /// Drop every table and reapply all migrations.
    Fresh,
    /// Print which migrations are applied.
    Status,
}

#[tokio::main]
async fn main() -> Result<(), DbErr> {
    let args = Args::parse();
    let db = Database::connect(&args.database_url).await?;

    match args.command.unwrap_or(Command::Up { steps: None }) {
        Command::Up { steps } => Migrator::up(&db, steps).await,
        Command::Down { steps } => Migrator::down(&db, Some(steps)).await,
        Command::Fresh => Migrator::fresh(&db).await,
        Command::Status => Migrator::status(&db).await,
    }
}
