//! Pipeline service
//!
//! Runs one workflow action end to end: load the project, check the action
//! against its status, validate the payload, upload any files, apply the
//! transition and write the new revision back with a version check.
//!
//! Nothing is uploaded or written until the payload has passed validation,
//! and nothing is written if any upload fails.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::Datelike;
use futures::stream::{self, StreamExt};

use crate::domain::{
    apply_command, check_action, check_proposal, create_proposal, random_project_id, Action,
    Command,
};
use crate::errors::{FmrError, Result};
use crate::rules::NOTICE_OF_AWARD;
use crate::schemas::{
    Attachment, AwardPayload, BudgetTarget, Config, DetailsPatch, Index, Project, ProjectStatus,
    ProposalInput, ScorePayload, Step1Payload, Step3Payload,
};
use crate::store::{ProjectRepository, Uploader};


/// A file waiting to be uploaded as part of a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    /// Attachment key on the project, e.g. `locationMap` or `qto`
    pub key: String,

    pub file_name: String,

    pub bytes: Vec<u8>,
}

impl PendingFile {
    pub fn new(key: impl Into<String>, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        PendingFile {
            key: key.into(),
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read a file from disk for upload under `key`.
    pub async fn from_path(key: impl Into<String>, path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FmrError::FileNotFound(format!("File not found: {}", path.display()))
            } else {
                FmrError::Io(e)
            }
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(PendingFile::new(key, file_name, bytes))
    }

    /// Object name under `folder`, free of path separators
    fn object_name(&self, folder: &str) -> String {
        let clean = |s: &str| s.replace(['/', '\\'], "_");
        format!("{}/{}-{}", folder, clean(&self.key), clean(&self.file_name))
    }

    /// Stand-in attachment used to validate a command before uploading
    fn placeholder(&self) -> Attachment {
        Attachment::new(self.file_name.clone(), format!("pending://{}", self.key))
    }
}

/// Each attachment key may be uploaded once per transition.
fn check_unique_keys(files: &[PendingFile]) -> Result<()> {
    let mut seen = BTreeSet::new();
    let duplicates: BTreeSet<String> = files
        .iter()
        .filter(|f| !seen.insert(f.key.as_str()))
        .map(|f| format!("attachments.{}", f.key))
        .collect();
    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(FmrError::Validation {
            missing_fields: duplicates.into_iter().collect(),
        })
    }
}

fn placeholders(files: &[PendingFile]) -> BTreeMap<String, Attachment> {
    files
        .iter()
        .map(|f| (f.key.clone(), f.placeholder()))
        .collect()
}

/// Project pipeline over a repository and an object store
pub struct Pipeline<R, U> {
    repo: R,
    uploader: U,
    config: Config,
    dry_run: bool,
}

impl<R: ProjectRepository, U: Uploader> Pipeline<R, U> {
    pub fn new(repo: R, uploader: U, config: Config) -> Self {
        Pipeline {
            repo,
            uploader,
            config,
            dry_run: false,
        }
    }

    /// Validate and compute transitions without uploading or writing
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn uploader(&self) -> &U {
        &self.uploader
    }

    // ===== QUERIES =====

    pub async fn get(&self, id: &str) -> Result<Project> {
        self.repo.get(id).await
    }

    /// Summary listing, optionally restricted to one status
    pub async fn index(&self, status: Option<ProjectStatus>) -> Result<Index> {
        let projects = self.repo.list().await?;
        Ok(Index::from_projects(&projects, status))
    }

    // ===== ACTIONS =====

    /// Submit a new proposal; it starts in `PENDING_REVIEW`.
    pub async fn create_proposal(
        &self,
        input: &ProposalInput,
        files: Vec<PendingFile>,
    ) -> Result<Project> {
        if let Err(e) = check_unique_keys(&files)
            .and_then(|_| check_proposal(input, &placeholders(&files)))
        {
            tracing::warn!(action = %Action::Create, error = %e, "proposal rejected");
            return Err(e);
        }

        let id = self.allocate_id().await?;
        let attachments = self.upload_all(&id, files).await?;
        let project = create_proposal(&id, input, attachments)?;
        self.commit(&project).await?;

        tracing::info!(id = %project.id, to = %project.status, "proposal submitted");
        Ok(project)
    }

    pub async fn decide_step1(&self, id: &str, payload: Step1Payload) -> Result<Project> {
        self.execute(id, Action::DecideStep1, Vec::new(), |_| {
            Command::DecideStep1(payload.clone())
        })
        .await
    }

    pub async fn resubmit_proposal(
        &self,
        id: &str,
        patch: DetailsPatch,
        files: Vec<PendingFile>,
    ) -> Result<Project> {
        self.execute(id, Action::ResubmitProposal, files, |attachments| {
            Command::ResubmitProposal {
                patch: patch.clone(),
                attachments,
            }
        })
        .await
    }

    pub async fn release_hold(&self, id: &str) -> Result<Project> {
        self.execute(id, Action::ReleaseHold, Vec::new(), |_| Command::ReleaseHold)
            .await
    }

    pub async fn score(&self, id: &str, payload: ScorePayload) -> Result<Project> {
        self.execute(id, Action::Score, Vec::new(), |_| Command::Score(payload.clone()))
            .await
    }

    pub async fn include_in_budget(&self, id: &str, target: BudgetTarget) -> Result<Project> {
        self.execute(id, Action::IncludeInBudget, Vec::new(), |_| {
            Command::IncludeInBudget(target)
        })
        .await
    }

    pub async fn submit_step3(&self, id: &str, files: Vec<PendingFile>) -> Result<Project> {
        self.execute(id, Action::SubmitStep3, files, |documents| Command::SubmitStep3 {
            documents,
        })
        .await
    }

    pub async fn validate_step3(&self, id: &str, payload: Step3Payload) -> Result<Project> {
        self.execute(id, Action::ValidateStep3, Vec::new(), |_| {
            Command::ValidateStep3(payload.clone())
        })
        .await
    }

    pub async fn resolve_escalation(&self, id: &str) -> Result<Project> {
        self.execute(id, Action::ResolveEscalation, Vec::new(), |_| {
            Command::ResolveEscalation
        })
        .await
    }

    pub async fn resubmit_step3(&self, id: &str, patch: DetailsPatch) -> Result<Project> {
        self.execute(id, Action::ResubmitStep3, Vec::new(), |_| {
            Command::ResubmitStep3(patch.clone())
        })
        .await
    }

    /// Resubmit a returned project, whichever step returned it.
    ///
    /// Replacement files are only accepted for Step 1 returns.
    pub async fn resubmit(
        &self,
        id: &str,
        patch: DetailsPatch,
        files: Vec<PendingFile>,
    ) -> Result<Project> {
        let project = self.repo.get(id).await?;
        match project.status {
            ProjectStatus::ReturnedStep3 if !files.is_empty() => Err(FmrError::illegal(
                project.status,
                "attach replacement files to",
            )),
            ProjectStatus::ReturnedStep3 => self.resubmit_step3(id, patch).await,
            _ => self.resubmit_proposal(id, patch, files).await,
        }
    }

    pub async fn award(
        &self,
        id: &str,
        payload: AwardPayload,
        notice: Option<PendingFile>,
    ) -> Result<Project> {
        let files: Vec<PendingFile> = notice
            .into_iter()
            .map(|f| PendingFile {
                key: NOTICE_OF_AWARD.to_string(),
                ..f
            })
            .collect();
        self.execute(id, Action::Award, files, |attachments| Command::Award {
            payload: payload.clone(),
            notice: attachments.get(NOTICE_OF_AWARD).cloned(),
        })
        .await
    }

    // ===== INTERNALS =====

    /// Shared load → check → validate → upload → apply → write sequence.
    async fn execute<F>(
        &self,
        id: &str,
        action: Action,
        files: Vec<PendingFile>,
        build: F,
    ) -> Result<Project>
    where
        F: Fn(BTreeMap<String, Attachment>) -> Command,
    {
        let project = self.repo.get(id).await?;

        // Reject before any upload so a failed request leaves no stray objects
        let precheck = check_action(project.status, action)
            .and_then(|_| check_unique_keys(&files))
            .and_then(|_| apply_command(&project, &build(placeholders(&files))));
        let next = match precheck {
            Ok(next) if files.is_empty() => next,
            Ok(_) => {
                let attachments = self.upload_all(id, files).await?;
                apply_command(&project, &build(attachments))?
            }
            Err(e) => {
                tracing::warn!(
                    id,
                    action = %action,
                    status = %project.status,
                    error = %e,
                    "transition rejected"
                );
                return Err(e);
            }
        };

        self.commit(&next).await?;
        tracing::info!(
            id,
            action = %action,
            from = %project.status,
            to = %next.status,
            version = next.version,
            "transition committed"
        );
        Ok(next)
    }

    async fn commit(&self, project: &Project) -> Result<()> {
        if self.dry_run {
            tracing::info!("[DRY RUN] would write {} at version {}", project.id, project.version);
            return Ok(());
        }
        tracing::debug!(id = %project.id, version = project.version, "writing project");
        self.repo.upsert(project).await
    }

    /// Upload every file, at most `max_concurrent_uploads` at a time.
    ///
    /// All uploads are joined before returning; the first failure is returned
    /// and no attachments are produced.
    async fn upload_all(
        &self,
        folder: &str,
        files: Vec<PendingFile>,
    ) -> Result<BTreeMap<String, Attachment>> {
        if self.dry_run {
            for file in &files {
                tracing::info!("[DRY RUN] would upload {}", file.object_name(folder));
            }
            return Ok(placeholders(&files));
        }

        let limit = self.config.max_concurrent_uploads.max(1);
        let uploads = files.into_iter().map(move |file| async move {
            let object = file.object_name(folder);
            tracing::debug!(object = %object, bytes = file.bytes.len(), "uploading");
            let stored = self.uploader.store(file.bytes, &object).await?;
            Ok::<_, FmrError>((file.key, Attachment::new(file.file_name, stored.url)))
        });

        let results: Vec<Result<(String, Attachment)>> =
            stream::iter(uploads).buffer_unordered(limit).collect().await;

        results.into_iter().collect::<Result<BTreeMap<_, _>>>().map_err(|e| {
            tracing::warn!(folder, error = %e, "upload failed; transition aborted");
            e
        })
    }

    /// Draw random IDs for the current year until one is unused.
    async fn allocate_id(&self) -> Result<String> {
        let year = chrono::Utc::now().year();
        self.allocate_id_with(|| random_project_id(year, &mut rand::rng()))
            .await
    }

    async fn allocate_id_with<G>(&self, mut draw: G) -> Result<String>
    where
        G: FnMut() -> String,
    {
        let attempts = self.config.max_id_attempts;
        for attempt in 1..=attempts {
            let candidate = draw();
            if !self.repo.exists(&candidate).await? {
                return Ok(candidate);
            }
            tracing::debug!(attempt, id = %candidate, "project ID already taken");
        }
        Err(FmrError::IdExhausted(attempts))
    }
}
