use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::Context;
use axum::Router;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::info;

use salary_engine::api::{AppState, create_router};
use salary_engine::calculation::calculate_breakdown;
use salary_engine::config::{ConfigLoader, DeductionConfig};
use salary_engine::models::{SalaryInput, StudentLoanPlan, TaxRegion};

/// Salary Engine - UK take-home pay calculator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Port to bind the server to
        #[arg(short, long, default_value_t = 3000)]
        port: u16,

        /// Directory of YAML rate tables. Uses the built-in 2024/25 tables if omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Calculate a breakdown and print it as JSON
    Calculate {
        /// Annual gross salary
        #[arg(short, long)]
        salary: Decimal,

        /// Pension contribution percentage
        #[arg(long, default_value_t = Decimal::ZERO)]
        pension: Decimal,

        /// Tax region (standard, alternate)
        #[arg(short, long, default_value_t = TaxRegion::Standard)]
        region: TaxRegion,

        /// Student loan plan (none, planA, planB, planC, postgrad)
        #[arg(long, default_value_t = StudentLoanPlan::None)]
        student_loan: StudentLoanPlan,

        /// Directory of YAML rate tables. Uses the built-in 2024/25 tables if omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn load_config(dir: Option<&Path>) -> anyhow::Result<DeductionConfig> {
    match dir {
        Some(dir) => {
            let config = ConfigLoader::load(dir)
                .with_context(|| format!("loading rate tables from {}", dir.display()))?;
            info!("Loaded {} tables from {}", config.metadata().label, dir.display());
            Ok(config)
        }
        None => Ok(DeductionConfig::builtin().clone()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so `calculate` output stays valid JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve { port, config } => {
            let config = load_config(config.as_deref())?;
            info!("Initializing salary engine for tax year {}", config.metadata().label);

            let app: Router = create_router(AppState::new(config));

            let addr: SocketAddr = format!("127.0.0.1:{}", port).parse()?;
            info!("Server listening on {}", addr);

            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
        Command::Calculate {
            salary,
            pension,
            region,
            student_loan,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let input = SalaryInput::new(salary)
                .with_pension_percent(pension)
                .with_region(region)
                .with_student_loan_plan(student_loan);

            let result = calculate_breakdown(&input, &config)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
