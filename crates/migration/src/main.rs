//! Applies or inspects the `documents` table without starting the server.
//!
//! The database url is read from `BILLDONE_DATABASE__URL`, the same variable
//! the `billdone` binary honours.
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

const DEFAULT_DATABASE_URL: &str = "sqlite:billdone.db?mode=rwc";
const USAGE: &str = "usage: migration [up|down|fresh|status]";

enum Command {
    Up,
    Down,
    Fresh,
    Status,
}

impl Command {
    fn parse(arg: Option<&str>) -> Option<Self> {
        match arg.unwrap_or("up") {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "fresh" => Some(Self::Fresh),
            "status" => Some(Self::Status),
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let arg = std::env::args().nth(1);
    // Checked before connecting so a typo never creates an empty database file.
    let Some(command) = Command::parse(arg.as_deref()) else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    let url = std::env::var("BILLDONE_DATABASE__URL")
        .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    let db = Database::connect(&url).await?;

    match command {
        Command::Up => Migrator::up(&db, None).await?,
        Command::Down => Migrator::down(&db, None).await?,
        Command::Fresh => Migrator::fresh(&db).await?,
        Command::Status => Migrator::status(&db).await?,
    }

    db.close().await?;
    Ok(())
}
