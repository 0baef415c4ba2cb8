use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use explorecali::connector::api::{Container, ContainerConfig, Router};
use explorecali::{Commands, DomainError};

#[derive(Parser)]
#[command(name = "explorecali")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(short, long, global = true, default_value = "~/.explorecali")]
    data_dir: String,

    #[arg(long, global = true)]
    memory_storage: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    // RUST_LOG wins over --verbose when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match run(cli).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(exit_code(&e));
        }
    }
}

/// Runs one command. The container and its connection are dropped on return.
async fn run(cli: Cli) -> Result<String> {
    let data_dir = expand_tilde(&cli.data_dir);
    if !cli.memory_storage {
        std::fs::create_dir_all(&data_dir)?;
    }

    let container = Container::new(ContainerConfig {
        data_dir,
        memory_storage: cli.memory_storage,
    })
    .await?;
    let router = Router::new(&container);

    router.route(cli.command).await
}

/// 2 for a missing tour or rating, 3 for a duplicate rating, 1 otherwise.
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<DomainError>() {
        Some(DomainError::NotFound(_)) => 2,
        Some(DomainError::DuplicateKey(_)) => 3,
        _ => 1,
    }
}

fn expand_tilde(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            if path == "~" {
                return home.to_string_lossy().to_string();
            }
            return path.replacen("~", &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn rate_many_requires_customers() {
        let res = Cli::try_parse_from(["explorecali", "rate-many", "1", "5"]);
        assert!(res.is_err(), "rate-many without customer ids should be rejected");
    }

    #[test]
    fn rate_many_collects_customer_ids() {
        let cli = Cli::try_parse_from(["explorecali", "rate-many", "1", "5", "100", "101", "102"])
            .expect("valid command line");
        match cli.command {
            Commands::RateMany {
                tour_id,
                score,
                customer_ids,
            } => {
                assert_eq!(tour_id, 1);
                assert_eq!(score, 5);
                assert_eq!(customer_ids, vec![100, 101, 102]);
            }
            _ => panic!("expected rate-many"),
        }
    }

    #[test]
    fn exit_codes_distinguish_error_kinds() {
        assert_eq!(exit_code(&DomainError::not_found("tour").into()), 2);
        assert_eq!(exit_code(&DomainError::duplicate_key("pair").into()), 3);
        assert_eq!(exit_code(&anyhow::anyhow!("other")), 1);
    }

    #[tokio::test]
    async fn run_returns_domain_errors_for_exit_code() {
        let cli = Cli::try_parse_from(["explorecali", "--memory-storage", "average", "7"])
            .expect("valid command line");

        let err = run(cli).await.unwrap_err();

        assert_eq!(exit_code(&err), 2);
    }

    #[tokio::test]
    async fn run_closes_database_before_returning() {
        let dir = tempfile::tempdir().expect("tempdir");
        let data_dir = dir.path().to_string_lossy().to_string();

        let cli = Cli::try_parse_from(["explorecali", "-d", &data_dir, "rate", "7", "1", "5"])
            .expect("valid command line");
        let err = run(cli).await.unwrap_err();
        assert_eq!(exit_code(&err), 2);

        // The file opens again once the failing command has released it
        let cli = Cli::try_parse_from(["explorecali", "-d", &data_dir, "stats"])
            .expect("valid command line");
        assert!(run(cli).await.is_ok());
    }

    #[test]
    fn expand_tilde_leaves_plain_paths() {
        assert_eq!(expand_tilde("/tmp/data"), "/tmp/data");
    }
}
