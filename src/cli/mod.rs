//! CLI module for fmr
//!
//! Provides the command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::schemas::{BudgetTarget, ProjectStatus};

/// fmr - Drive farm-to-market road proposals through eligibility, scoring,
/// engineering review and procurement
#[derive(Parser, Debug)]
#[command(name = "fmr")]
#[command(version)]
#[command(about = "Lifecycle pipeline for farm-to-market road project proposals")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress info-level output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Validate and preview transitions without uploading or writing
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Override the working directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a .fmr workspace in the current directory
    Init {
        /// Overwrite an existing config.json with defaults
        #[arg(long)]
        force: bool,
    },

    /// List projects with optional filtering
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Filter by status (e.g. PENDING_REVIEW, step3_pending)
        #[arg(long)]
        status: Option<ProjectStatus>,
    },

    /// Show details of a project
    Show {
        /// Project ID (FMR-YYYY-NNNN)
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Submit a new proposal
    Create {
        /// JSON file with the intake form
        #[arg(long)]
        payload: PathBuf,

        /// Attachment as key=path, repeatable
        #[arg(long = "doc", value_name = "KEY=PATH")]
        docs: Vec<String>,
    },

    /// Record the Step 1 validator decision
    Decide {
        id: String,

        /// JSON file with decision, checklist and remarks
        #[arg(long)]
        payload: PathBuf,
    },

    /// Put an on-hold proposal back into the Step 1 queue
    ReleaseHold { id: String },

    /// Record the Step 2 scoresheet
    Score {
        id: String,

        /// JSON file with per-criterion scores
        #[arg(long)]
        payload: PathBuf,
    },

    /// Move a scored project into the NEP or GAA
    Include {
        id: String,

        #[arg(long)]
        target: BudgetTarget,
    },

    /// Upload the Step 3 engineering documents
    SubmitDocs {
        id: String,

        /// Document as key=path, repeatable
        #[arg(long = "doc", value_name = "KEY=PATH", required = true)]
        docs: Vec<String>,
    },

    /// Record the Step 3 BAFE review
    Validate {
        id: String,

        /// JSON file with decision, answers, validated ABC and remarks
        #[arg(long)]
        payload: PathBuf,
    },

    /// Return an escalated project to the Step 3 review queue
    Resolve { id: String },

    /// Resubmit a returned project with edited details
    Resubmit {
        id: String,

        /// JSON file with the fields to change
        #[arg(long)]
        payload: PathBuf,

        /// Replacement attachment as key=path (Step 1 returns only)
        #[arg(long = "doc", value_name = "KEY=PATH")]
        docs: Vec<String>,
    },

    /// Award the contract and start implementation
    Award {
        id: String,

        /// JSON file with contractor name and bid amount
        #[arg(long)]
        payload: PathBuf,

        /// Signed notice of award
        #[arg(long)]
        notice: PathBuf,
    },

    /// Print the checklists, scoring criteria and document requirements
    Rules {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_submit_docs() {
        let cli = Cli::try_parse_from([
            "fmr",
            "submit-docs",
            "FMR-2026-0001",
            "--doc",
            "qto=./qto.xlsx",
            "--doc",
            "abc=./abc.pdf",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::SubmitDocs { id, docs }) => {
                assert_eq!(id, "FMR-2026-0001");
                assert_eq!(docs.len(), 2);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_status_and_target() {
        let cli = Cli::try_parse_from(["fmr", "list", "--status", "GAA-INCLUDED"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::List {
                status: Some(ProjectStatus::GaaIncluded),
                ..
            })
        ));

        let cli = Cli::try_parse_from(["fmr", "--dry-run", "include", "FMR-2026-0001", "--target", "nep"])
            .unwrap();
        assert!(cli.dry_run);
        assert!(matches!(
            cli.command,
            Some(Commands::Include {
                target: BudgetTarget::Nep,
                ..
            })
        ));

        assert!(Cli::try_parse_from(["fmr", "list", "--status", "DONE"]).is_err());
    }

    #[test]
    fn test_submit_docs_requires_a_document() {
        assert!(Cli::try_parse_from(["fmr", "submit-docs", "FMR-2026-0001"]).is_err());
    }
}
