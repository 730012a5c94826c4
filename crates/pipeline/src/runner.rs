//! Sequential pipeline runner with cooperative cancellation.
//!
//! Stages execute strictly one at a time. Before each stage the runner
//! checks the cancellation token, and the simulated per-stage delay is
//! interrupted by cancellation, so a cancelled run never starts another
//! stage. The outcome reports exactly which stages completed.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use launchos_core::listing::CopyPayload;
use launchos_core::media::{MediaAsset, VideoAsset};
use launchos_core::merchant::AiDisclosure;

use crate::generators::{
    self, AttributesResult, GuardResult, PipelineInput, VisionResult,
};
use crate::stages::{stage_sequence, AiStage, StageReport};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Simulated per-stage latency: `base + U(0, jitter)`.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub base_delay: Duration,
    pub jitter: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(400),
            jitter: Duration::from_millis(300),
        }
    }
}

impl RunnerConfig {
    /// No delay at all. Used by tests.
    pub fn instant() -> Self {
        Self {
            base_delay: Duration::ZERO,
            jitter: Duration::ZERO,
        }
    }

    fn stage_delay(&self) -> Duration {
        if self.jitter.is_zero() {
            return self.base_delay;
        }
        let extra = rand::rng().random_range(Duration::ZERO..self.jitter);
        self.base_delay + extra
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    Completed,
    Cancelled,
}

/// Everything the stages produced, populated as they complete.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineArtifacts {
    pub vision: Option<VisionResult>,
    pub attributes: Option<AttributesResult>,
    pub copy: Option<CopyPayload>,
    pub disclosure: Option<AiDisclosure>,
    pub guard: Option<GuardResult>,
    pub enhanced_photos: Vec<MediaAsset>,
    pub creative_photos: Vec<MediaAsset>,
    pub videos: Vec<VideoAsset>,
}

/// Result of a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutcome {
    pub outcome: RunOutcome,
    pub completed: Vec<StageReport>,
    pub artifacts: PipelineArtifacts,
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

/// Execute the stage sequence for `input`, stopping early if `cancel`
/// fires.
pub async fn run_pipeline(
    input: &PipelineInput,
    config: &RunnerConfig,
    cancel: CancellationToken,
) -> PipelineOutcome {
    let stages = stage_sequence(input.include_creatives);
    let mut completed: Vec<StageReport> = Vec::new();
    let mut artifacts = PipelineArtifacts::default();

    for stage in stages {
        if cancel.is_cancelled() {
            tracing::info!(stage = stage.as_str(), "Pipeline cancelled before stage");
            return PipelineOutcome {
                outcome: RunOutcome::Cancelled,
                completed,
                artifacts,
            };
        }

        let delay = config.stage_delay();
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!(stage = stage.as_str(), "Pipeline cancelled during stage");
                return PipelineOutcome {
                    outcome: RunOutcome::Cancelled,
                    completed,
                    artifacts,
                };
            }
            _ = tokio::time::sleep(delay) => {}
        }

        execute_stage(stage, input, &mut artifacts);
        let cost = simulated_cost();
        tracing::debug!(stage = stage.as_str(), cost, "Pipeline stage completed");
        completed.push(StageReport::new(stage, cost));
    }

    PipelineOutcome {
        outcome: RunOutcome::Completed,
        completed,
        artifacts,
    }
}

fn execute_stage(stage: AiStage, input: &PipelineInput, artifacts: &mut PipelineArtifacts) {
    match stage {
        AiStage::Vision => {
            artifacts.vision = Some(generators::run_vision(&input.product, &input.photos));
        }
        AiStage::Attrs => {
            artifacts.attributes = Some(generators::fill_required_attrs(
                &input.product,
                &input.marketplace_key,
            ));
        }
        AiStage::Copy => {
            artifacts.copy = Some(generators::generate_copy(
                &input.product,
                &input.marketplace_key,
                input.copy_mode,
            ));
        }
        AiStage::Merchant => {
            let copy = artifacts.copy.clone().unwrap_or_default();
            artifacts.disclosure = Some(generators::format_merchant(&copy));
        }
        AiStage::Guard => {
            let copy = artifacts.copy.clone().unwrap_or_default();
            artifacts.guard = Some(generators::guard(&copy, &input.product));
        }
        AiStage::ImgEnhance => {
            artifacts.enhanced_photos = generators::enhance_images(&input.photos).photos;
        }
        AiStage::ImgGenerate => {
            artifacts.creative_photos = generators::generate_creatives(&input.photos);
        }
        AiStage::VideoGenerate => {
            artifacts.videos = generators::generate_videos(&input.photos);
        }
    }
}

fn simulated_cost() -> f64 {
    rand::rng().random_range(0.0..0.5)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use launchos_core::media::{ROLE_HERO, TRACK_LISTING_SAFE};

    fn input(include_creatives: bool) -> PipelineInput {
        PipelineInput {
            product: crate::generators::ProductInput {
                title_base: "Camiseta Básica Algodão".to_string(),
                brand: "Aurora".to_string(),
                sku_master: "TS-001".to_string(),
                recipe: "apparel".to_string(),
                materials: vec!["Algodão".to_string()],
                ..Default::default()
            },
            photos: vec![MediaAsset {
                id: "a".to_string(),
                role: ROLE_HERO.to_string(),
                track: TRACK_LISTING_SAFE.to_string(),
                url: "/mock/a.jpg".to_string(),
                filename: "a.jpg".to_string(),
                enhanced: false,
            }],
            marketplace_key: "mercadolivre".to_string(),
            copy_mode: Default::default(),
            include_creatives,
        }
    }

    #[tokio::test]
    async fn listing_run_completes_six_stages() {
        let outcome = run_pipeline(
            &input(false),
            &RunnerConfig::instant(),
            CancellationToken::new(),
        )
        .await;
        assert_eq!(outcome.outcome, RunOutcome::Completed);
        assert_eq!(outcome.completed.len(), 6);
        assert!(outcome.artifacts.copy.is_some());
        assert!(outcome.artifacts.guard.is_some());
        assert!(outcome.artifacts.creative_photos.is_empty());
        assert!(outcome.artifacts.videos.is_empty());
    }

    #[tokio::test]
    async fn creative_run_completes_eight_stages() {
        let outcome = run_pipeline(
            &input(true),
            &RunnerConfig::instant(),
            CancellationToken::new(),
        )
        .await;
        assert_eq!(outcome.outcome, RunOutcome::Completed);
        assert_eq!(outcome.completed.len(), 8);
        assert_eq!(outcome.artifacts.creative_photos.len(), 1);
        assert_eq!(outcome.artifacts.videos.len(), 1);
    }

    #[tokio::test]
    async fn stages_complete_in_sequence_order() {
        let outcome = run_pipeline(
            &input(true),
            &RunnerConfig::instant(),
            CancellationToken::new(),
        )
        .await;
        let order: Vec<AiStage> = outcome.completed.iter().map(|r| r.stage).collect();
        assert_eq!(order, crate::stages::stage_sequence(true));
    }

    #[tokio::test]
    async fn pre_cancelled_run_executes_nothing() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let outcome = run_pipeline(&input(false), &RunnerConfig::instant(), cancel).await;
        assert_eq!(outcome.outcome, RunOutcome::Cancelled);
        assert!(outcome.completed.is_empty());
        assert!(outcome.artifacts.vision.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_interrupts_stage_delay() {
        let cancel = CancellationToken::new();
        let config = RunnerConfig {
            base_delay: Duration::from_secs(3600),
            jitter: Duration::ZERO,
        };
        let handle = {
            let cancel = cancel.clone();
            let input = input(false);
            tokio::spawn(async move { run_pipeline(&input, &config, cancel).await })
        };
        // Let the runner park in the first stage's delay, then cancel.
        tokio::task::yield_now().await;
        cancel.cancel();
        let outcome = handle.await.unwrap();
        assert_eq!(outcome.outcome, RunOutcome::Cancelled);
        assert!(outcome.completed.is_empty());
    }

    #[tokio::test]
    async fn completed_reports_carry_stage_metadata() {
        let outcome = run_pipeline(
            &input(false),
            &RunnerConfig::instant(),
            CancellationToken::new(),
        )
        .await;
        let copy_report = outcome
            .completed
            .iter()
            .find(|r| r.stage == AiStage::Copy)
            .unwrap();
        assert_eq!(copy_report.model, "gpt-4-turbo");
        assert_eq!(copy_report.provider, "openai");
        assert!(copy_report.cost >= 0.0 && copy_report.cost < 0.5);
    }
}
