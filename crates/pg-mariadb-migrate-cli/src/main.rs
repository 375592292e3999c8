//! pg-mariadb-migrate CLI - applies PostgreSQL schema dumps to MariaDB/MySQL.

use clap::{Args, Parser, Subcommand};
use pg_mariadb_migrate::{
    rewrite_statement, Config, MariadbPool, MigrateError, SchemaApplier, Segmenter, TargetConfig,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "pg-mariadb-migrate")]
#[command(about = "Applies a PostgreSQL schema dump to MariaDB/MySQL")]
#[command(version)]
struct Cli {
    /// Output JSON result to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

/// Target database connection flags.
#[derive(Args)]
struct TargetArgs {
    /// MariaDB host
    #[arg(long)]
    host: String,

    /// MariaDB port
    #[arg(long, default_value = "3306")]
    port: u16,

    /// MariaDB database name
    #[arg(long)]
    database: String,

    /// MariaDB user
    #[arg(long)]
    user: String,

    /// MariaDB password
    #[arg(long)]
    password: String,

    /// TLS mode: disable, prefer, require, verify-ca, verify-full
    #[arg(long, default_value = "prefer")]
    ssl_mode: String,
}

impl TargetArgs {
    fn into_config(self) -> Config {
        Config::from_target(TargetConfig {
            r#type: "mariadb".to_string(),
            host: self.host,
            port: self.port,
            database: self.database,
            user: self.user,
            password: self.password,
            ssl_mode: self.ssl_mode,
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a PostgreSQL schema dump to MariaDB
    Apply {
        #[command(flatten)]
        target: TargetArgs,

        /// Path to the source SQL file
        #[arg(long)]
        sql_file: PathBuf,
    },

    /// Rewrite a dump to MariaDB dialect and print it (no database)
    Convert {
        /// Path to the source SQL file
        #[arg(long)]
        sql_file: PathBuf,
    },

    /// Test the target database connection
    HealthCheck {
        #[command(flatten)]
        target: TargetArgs,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<(), MigrateError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format).map_err(MigrateError::Config)?;

    match cli.command {
        Commands::Apply { target, sql_file } => {
            let config = target.into_config();
            config.validate()?;

            // Open the source before touching the network: a missing file
            // aborts with no connection side effects.
            let statements = Segmenter::from_path(&sql_file)?;
            info!("Processing SQL file: {}", sql_file.display());

            let pool = MariadbPool::new(&config.target).await?;
            let applier = SchemaApplier::new(pool);
            let result = applier.apply(statements).await;
            applier.pool().close().await;
            let report = result?;

            if cli.output_json {
                println!("{}", report.to_json()?);
            } else {
                println!("\nSchema import completed!");
                println!("  Run ID: {}", report.run_id);
                println!("  Duration: {:.2}s", report.duration_seconds);
                println!("  Statements executed: {}", report.statements_executed);
                println!("  Statements dropped: {}", report.statements_dropped);
            }
        }

        Commands::Convert { sql_file } => {
            let statements = Segmenter::from_path(&sql_file)?;
            for candidate in statements {
                let candidate = candidate?;
                if let Some(sql) = rewrite_statement(&candidate) {
                    println!("{}", sql);
                }
            }
        }

        Commands::HealthCheck { target } => {
            let config = target.into_config();
            config.validate()?;

            let pool = MariadbPool::new(&config.target).await?;
            pool.test_connection().await?;
            pool.close().await;

            println!("Target (MariaDB): OK");
        }
    }

    Ok(())
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so `convert` output on stdout stays clean.
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    Ok(())
}
