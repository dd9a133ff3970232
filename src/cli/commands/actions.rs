//! Workflow action commands
//!
//! Each command reads its payload, runs one pipeline action against the
//! workspace and prints the resulting project.

use std::path::Path;

use crate::errors::Result;
use crate::schemas::{
    AwardPayload, BudgetTarget, DetailsPatch, Project, ProposalInput, ScorePayload, Step1Payload,
    Step3Payload,
};
use crate::workflow::PendingFile;

use super::{open_pipeline, print_project, read_docs, read_payload};

fn report(project: &Project, dry_run: bool) -> Result<()> {
    if dry_run {
        println!("[DRY RUN] nothing was written");
    }
    print_project(project, false)
}

/// Submit a new proposal
pub async fn create(
    cwd: Option<&Path>,
    payload: &Path,
    docs: &[String],
    dry_run: bool,
) -> Result<()> {
    let pipeline = open_pipeline(cwd, dry_run)?;
    let input: ProposalInput = read_payload(payload)?;
    let files = read_docs(docs).await?;
    let project = pipeline.create_proposal(&input, files).await?;
    report(&project, dry_run)
}

/// Record the Step 1 decision
pub async fn decide(cwd: Option<&Path>, id: &str, payload: &Path, dry_run: bool) -> Result<()> {
    let pipeline = open_pipeline(cwd, dry_run)?;
    let payload: Step1Payload = read_payload(payload)?;
    let project = pipeline.decide_step1(id, payload).await?;
    report(&project, dry_run)
}

/// Release a held proposal
pub async fn release_hold(cwd: Option<&Path>, id: &str, dry_run: bool) -> Result<()> {
    let pipeline = open_pipeline(cwd, dry_run)?;
    let project = pipeline.release_hold(id).await?;
    report(&project, dry_run)
}

/// Record the Step 2 scoresheet
pub async fn score(cwd: Option<&Path>, id: &str, payload: &Path, dry_run: bool) -> Result<()> {
    let pipeline = open_pipeline(cwd, dry_run)?;
    let payload: ScorePayload = read_payload(payload)?;
    let project = pipeline.score(id, payload).await?;
    report(&project, dry_run)
}

/// Move a scored project into a budget
pub async fn include(
    cwd: Option<&Path>,
    id: &str,
    target: BudgetTarget,
    dry_run: bool,
) -> Result<()> {
    let pipeline = open_pipeline(cwd, dry_run)?;
    let project = pipeline.include_in_budget(id, target).await?;
    report(&project, dry_run)
}

/// Upload the Step 3 documents
pub async fn submit_docs(cwd: Option<&Path>, id: &str, docs: &[String], dry_run: bool) -> Result<()> {
    let pipeline = open_pipeline(cwd, dry_run)?;
    let files = read_docs(docs).await?;
    let project = pipeline.submit_step3(id, files).await?;
    report(&project, dry_run)
}

/// Record the Step 3 review
pub async fn validate(cwd: Option<&Path>, id: &str, payload: &Path, dry_run: bool) -> Result<()> {
    let pipeline = open_pipeline(cwd, dry_run)?;
    let payload: Step3Payload = read_payload(payload)?;
    let project = pipeline.validate_step3(id, payload).await?;
    report(&project, dry_run)
}

/// Send an escalated project back to review
pub async fn resolve(cwd: Option<&Path>, id: &str, dry_run: bool) -> Result<()> {
    let pipeline = open_pipeline(cwd, dry_run)?;
    let project = pipeline.resolve_escalation(id).await?;
    report(&project, dry_run)
}

/// Resubmit a returned project
pub async fn resubmit(
    cwd: Option<&Path>,
    id: &str,
    payload: &Path,
    docs: &[String],
    dry_run: bool,
) -> Result<()> {
    let pipeline = open_pipeline(cwd, dry_run)?;
    let patch: DetailsPatch = read_payload(payload)?;
    let files = read_docs(docs).await?;
    let project = pipeline.resubmit(id, patch, files).await?;
    report(&project, dry_run)
}

/// Award the contract
pub async fn award(
    cwd: Option<&Path>,
    id: &str,
    payload: &Path,
    notice: &Path,
    dry_run: bool,
) -> Result<()> {
    let pipeline = open_pipeline(cwd, dry_run)?;
    let payload: AwardPayload = read_payload(payload)?;
    let notice = PendingFile::from_path(crate::rules::NOTICE_OF_AWARD, notice).await?;
    let project = pipeline.award(id, payload, Some(notice)).await?;
    report(&project, dry_run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs;
    use crate::schemas::project::fixtures::sample_project;
    use crate::schemas::ProjectStatus;
    use crate::store::ProjectRepository;
    use tempfile::TempDir;

    async fn workspace_with(project: &Project) -> TempDir {
        let temp = TempDir::new().unwrap();
        super::super::init::run(Some(temp.path()), false, false)
            .await
            .unwrap();
        let pipeline = open_pipeline(Some(temp.path()), false).unwrap();
        pipeline.repository().upsert(project).await.unwrap();
        temp
    }

    #[tokio::test]
    async fn test_decide_from_payload_file() {
        let project = sample_project();
        let temp = workspace_with(&project).await;
        let payload = temp.path().join("decision.json");
        std::fs::write(&payload, r#"{"decision": "hold", "remarks": "Awaiting ROW"}"#).unwrap();

        decide(Some(temp.path()), &project.id, &payload, false)
            .await
            .unwrap();

        let stored = open_pipeline(Some(temp.path()), false)
            .unwrap()
            .get(&project.id)
            .await
            .unwrap();
        assert_eq!(stored.status, ProjectStatus::OnHold);
        assert_eq!(stored.version, 2);
    }

    #[tokio::test]
    async fn test_dry_run_leaves_record() {
        let project = sample_project().with_status(ProjectStatus::OnHold);
        let temp = workspace_with(&project).await;

        release_hold(Some(temp.path()), &project.id, true).await.unwrap();

        let config = fs::read_config(temp.path()).unwrap();
        let stored = fs::read_project(temp.path(), &config, &project.id).unwrap();
        assert_eq!(stored.status, ProjectStatus::OnHold);
    }

    #[tokio::test]
    async fn test_award_reads_notice_file() {
        let project = sample_project()
            .with_status(ProjectStatus::Step4Bidding)
            .with_validated_abc(14_500_000.0);
        let temp = workspace_with(&project).await;
        let payload = temp.path().join("award.json");
        std::fs::write(
            &payload,
            r#"{"contractor_name": "RJ Builders", "bid_amount": 14200000}"#,
        )
        .unwrap();
        let notice = temp.path().join("noa.pdf");
        std::fs::write(&notice, b"%PDF").unwrap();

        award(Some(temp.path()), &project.id, &payload, &notice, false)
            .await
            .unwrap();

        let config = fs::read_config(temp.path()).unwrap();
        let stored = fs::read_project(temp.path(), &config, &project.id).unwrap();
        assert_eq!(stored.status, ProjectStatus::Implementation);
        assert_eq!(stored.attachments["notice_of_award"].name, "noa.pdf");
    }
}
