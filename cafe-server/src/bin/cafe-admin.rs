//! Worker provisioning for the cafe server
//!
//! ```text
//! cafe-admin add-worker --identifier anna --password s3cret
//! cafe-admin set-password --identifier anna --password n3w
//! cafe-admin list-workers
//! ```

use cafe_server::auth::service::{add_worker, set_password};
use cafe_server::db;
use cafe_server::db::repository::worker as worker_repo;
use cafe_server::{Config, init_logger};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cafe-admin", version)]
#[command(about = "Manage cafe staff accounts")]
struct Cli {
    /// Overrides DATABASE_URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a worker (identifier is 1 to 8 characters)
    AddWorker {
        #[arg(long)]
        identifier: String,
        #[arg(long)]
        password: String,
    },
    /// Replace a worker's password
    SetPassword {
        #[arg(long)]
        identifier: String,
        #[arg(long)]
        password: String,
    },
    ListWorkers,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(url) = cli.database_url {
        config.database_url = url;
    }
    init_logger(&config.log_level);

    let pool = db::connect(&config.database_url).await?;

    match cli.command {
        Command::AddWorker {
            identifier,
            password,
        } => {
            let worker = add_worker(&pool, &identifier, &password).await?;
            println!("Created worker {} (id {})", worker.identifier, worker.id);
        }
        Command::SetPassword {
            identifier,
            password,
        } => {
            set_password(&pool, &identifier, &password).await?;
            println!("Password updated for {identifier}");
        }
        Command::ListWorkers => {
            let workers = worker_repo::find_all(&pool).await?;
            if workers.is_empty() {
                println!("No workers");
            }
            for worker in workers {
                println!("{:>4}  {}", worker.id, worker.identifier);
            }
        }
    }

    pool.close().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_worker() {
        let cli = Cli::try_parse_from([
            "cafe-admin",
            "add-worker",
            "--identifier",
            "anna",
            "--password",
            "pw",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::AddWorker { ref identifier, .. } if identifier == "anna"
        ));
    }
}
