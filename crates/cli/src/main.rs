//! Onboard CLI - Main entry point

use clap::{Parser, Subcommand};
use onboard_cli::{commands, AppContext};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "onboard")]
#[command(about = "Onboard - risk-adaptive onboarding engine", long_about = None)]
struct Cli {
    /// Data directory path
    #[arg(short, long, default_value = "./data")]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a session from a JSON risk-factors file
    Score {
        /// Path to the factors file
        factors: PathBuf,
    },

    /// Simulate a session dropping off and the recovery pipeline
    SimulateDropOff {
        /// User ID
        #[arg(default_value = "USER-001")]
        user: String,
    },

    /// Open a fraud case and submit a reviewer decision
    Review {
        /// User ID
        user: String,
        /// AI risk score for the case (0-100)
        #[arg(long, default_value = "80")]
        risk_score: f64,
        /// Reviewer outcome (confirm_fraud, false_positive, needs_investigation)
        #[arg(long, default_value = "confirm_fraud")]
        outcome: String,
        /// Reviewer ID
        #[arg(long, default_value = "REV-001")]
        reviewer: String,
    },

    /// Escalate a case to the staff roster
    Escalate {
        /// User ID
        user: String,
        /// Escalation reason (low_confidence, high_risk, user_request,
        /// system_error, complex_case)
        #[arg(long, default_value = "high_risk")]
        reason: String,
        /// Urgency (low, medium, high, critical)
        #[arg(long, default_value = "high")]
        urgency: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut ctx = AppContext::new(&cli.data)?;

    match cli.command {
        Commands::Score { factors } => {
            commands::score(&mut ctx, &factors)?;
        }

        Commands::SimulateDropOff { user } => {
            commands::simulate_drop_off(&mut ctx, &user).await?;
        }

        Commands::Review {
            user,
            risk_score,
            outcome,
            reviewer,
        } => {
            commands::review(&mut ctx, &user, risk_score, &outcome, &reviewer)?;
        }

        Commands::Escalate {
            user,
            reason,
            urgency,
        } => {
            commands::escalate(&mut ctx, &user, &reason, &urgency)?;
        }
    }

    Ok(())
}
