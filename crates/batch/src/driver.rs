//! The batch generation driver.
//!
//! Each entry moves through a strictly forward pipeline: build the
//! workflow graph, submit it, poll history until the job appears, fetch
//! the first image artifact, write it to the output directory. Entries
//! run one at a time with a fixed pause in between; a failure is
//! recorded in the report and the batch moves on.

use std::path::PathBuf;

use bookplate_comfyui::api::{ComfyUIApi, ComfyUIApiError};
use bookplate_comfyui::poll::{wait_for_completion, PollConfig, PollError};
use bookplate_comfyui::workflow::qwen_text_to_image;
use bookplate_core::config::BatchConfig;
use bookplate_core::prompts::{PromptEntry, PromptTable};
use bookplate_core::storage::write_artifact;

use crate::report::{BatchReport, EntryOutcome};

/// Terminal failure of a single batch entry.
///
/// Only the initial connectivity check (handled by the caller before
/// the batch starts) is fatal to the whole run; every variant here is
/// recorded per entry and does not halt the batch.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The workflow submission call failed or was rejected.
    #[error("failed to submit workflow: {0}")]
    Submit(#[source] ComfyUIApiError),

    /// The job never appeared in history, or a history check failed.
    #[error(transparent)]
    Poll(#[from] PollError),

    /// The artifact download failed.
    #[error("failed to download {filename}: {source}")]
    Fetch {
        filename: String,
        #[source]
        source: ComfyUIApiError,
    },

    /// The job completed but produced no image outputs.
    #[error("job completed without producing any images")]
    NoArtifact,

    /// Writing the output file failed.
    #[error("failed to write output file: {0}")]
    Io(#[from] std::io::Error),
}

/// Drives generation jobs against one ComfyUI server.
pub struct Generator {
    api: ComfyUIApi,
    config: BatchConfig,
}

impl Generator {
    /// Create a generator talking to the server named in `config`.
    pub fn new(config: BatchConfig) -> Self {
        Self {
            api: ComfyUIApi::new(config.server_url.clone()),
            config,
        }
    }

    /// The underlying API client (used by the CLI for the startup
    /// connectivity check).
    pub fn api(&self) -> &ComfyUIApi {
        &self.api
    }

    /// Generate a single illustration and write it to the output
    /// directory. Returns the path of the written file.
    pub async fn generate_one(
        &self,
        entry: &PromptEntry,
        seed: Option<i64>,
    ) -> Result<PathBuf, GenerateError> {
        let workflow = qwen_text_to_image(&entry.text, seed);

        let submitted = self
            .api
            .submit_workflow(&workflow)
            .await
            .map_err(GenerateError::Submit)?;
        tracing::info!(
            id = %entry.id,
            prompt_id = %submitted.prompt_id,
            "Workflow queued",
        );

        let poll = PollConfig {
            interval: self.config.poll_interval,
            timeout: self.config.poll_timeout,
        };
        let history = wait_for_completion(&self.api, &submitted.prompt_id, &poll).await?;

        let image = history.first_image().ok_or(GenerateError::NoArtifact)?;
        let bytes = self
            .api
            .get_image(&image.filename, &image.subfolder, &image.kind)
            .await
            .map_err(|source| GenerateError::Fetch {
                filename: image.filename.clone(),
                source,
            })?;

        let path = write_artifact(&self.config.output_dir, &entry.id, &bytes)?;
        tracing::info!(id = %entry.id, path = %path.display(), "Image saved");
        Ok(path)
    }

    /// Run the whole prompt table sequentially.
    ///
    /// Every entry is attempted regardless of earlier failures; each
    /// outcome lands in the returned report in table order. Between
    /// entries the driver pauses for the configured inter-job delay.
    pub async fn run(&self, table: &PromptTable, seed: Option<i64>) -> BatchReport {
        let mut report = BatchReport::default();

        for (index, entry) in table.iter().enumerate() {
            tracing::info!(
                id = %entry.id,
                position = index + 1,
                total = table.len(),
                "Generating illustration",
            );

            let result = self.generate_one(entry, seed).await;
            if let Err(ref error) = result {
                tracing::error!(id = %entry.id, error = %error, "Entry failed");
            }
            report.outcomes.push(EntryOutcome {
                id: entry.id.clone(),
                result,
            });

            if index + 1 < table.len() {
                tokio::time::sleep(self.config.inter_job_delay).await;
            }
        }

        report
    }
}
