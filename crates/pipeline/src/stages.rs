//! Pipeline stage registry and per-stage metadata.

use serde::{Deserialize, Serialize};

use launchos_core::error::CoreError;

pub const STAGE_VISION: &str = "vision";
pub const STAGE_ATTRS: &str = "attrs";
pub const STAGE_COPY: &str = "copy";
pub const STAGE_MERCHANT: &str = "merchant";
pub const STAGE_GUARD: &str = "guard";
pub const STAGE_IMG_ENHANCE: &str = "img_enhance";
pub const STAGE_IMG_GENERATE: &str = "img_generate";
pub const STAGE_VIDEO_GENERATE: &str = "video_generate";

/// All valid stage keys.
pub const VALID_STAGES: &[&str] = &[
    STAGE_VISION,
    STAGE_ATTRS,
    STAGE_COPY,
    STAGE_MERCHANT,
    STAGE_GUARD,
    STAGE_IMG_ENHANCE,
    STAGE_IMG_GENERATE,
    STAGE_VIDEO_GENERATE,
];

/// One stage of the mock AI pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiStage {
    Vision,
    Attrs,
    Copy,
    Merchant,
    Guard,
    ImgEnhance,
    ImgGenerate,
    VideoGenerate,
}

impl AiStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiStage::Vision => STAGE_VISION,
            AiStage::Attrs => STAGE_ATTRS,
            AiStage::Copy => STAGE_COPY,
            AiStage::Merchant => STAGE_MERCHANT,
            AiStage::Guard => STAGE_GUARD,
            AiStage::ImgEnhance => STAGE_IMG_ENHANCE,
            AiStage::ImgGenerate => STAGE_IMG_GENERATE,
            AiStage::VideoGenerate => STAGE_VIDEO_GENERATE,
        }
    }

    pub fn from_str_value(value: &str) -> Result<Self, CoreError> {
        match value {
            STAGE_VISION => Ok(AiStage::Vision),
            STAGE_ATTRS => Ok(AiStage::Attrs),
            STAGE_COPY => Ok(AiStage::Copy),
            STAGE_MERCHANT => Ok(AiStage::Merchant),
            STAGE_GUARD => Ok(AiStage::Guard),
            STAGE_IMG_ENHANCE => Ok(AiStage::ImgEnhance),
            STAGE_IMG_GENERATE => Ok(AiStage::ImgGenerate),
            STAGE_VIDEO_GENERATE => Ok(AiStage::VideoGenerate),
            other => Err(CoreError::Validation(format!(
                "Invalid pipeline stage '{other}'. Must be one of: {}",
                VALID_STAGES.join(", ")
            ))),
        }
    }

    /// Whether the stage produces or transforms imagery.
    pub fn is_media_stage(&self) -> bool {
        matches!(
            self,
            AiStage::ImgEnhance | AiStage::ImgGenerate | AiStage::VideoGenerate
        )
    }

    /// The mock model id recorded for the stage.
    pub fn model(&self) -> &'static str {
        if self.is_media_stage() {
            "stable-diffusion-xl"
        } else {
            "gpt-4-turbo"
        }
    }

    /// The mock provider recorded for the stage.
    pub fn provider(&self) -> &'static str {
        if self.is_media_stage() {
            "stability"
        } else {
            "openai"
        }
    }

    /// One-line result summary recorded on completion.
    pub fn summary(&self) -> &'static str {
        match self {
            AiStage::Vision => "Análise de imagens concluída com 92% de confiança",
            AiStage::Attrs => "Atributos preenchidos automaticamente",
            AiStage::Copy => "Textos gerados no formato AIDA",
            AiStage::Merchant => "Campos estruturados formatados para Merchant Center",
            AiStage::Guard => "Verificação de compliance aprovada",
            AiStage::ImgEnhance => "Imagens otimizadas para listagem",
            AiStage::ImgGenerate => "Imagens criativas geradas",
            AiStage::VideoGenerate => "Vídeo de produto gerado",
        }
    }
}

/// The stages a run executes, in order. Creative stages are appended
/// only when requested; the listing stages always run first.
pub fn stage_sequence(include_creatives: bool) -> Vec<AiStage> {
    let mut stages = vec![
        AiStage::Vision,
        AiStage::Attrs,
        AiStage::Copy,
        AiStage::Merchant,
        AiStage::Guard,
        AiStage::ImgEnhance,
    ];
    if include_creatives {
        stages.push(AiStage::ImgGenerate);
        stages.push(AiStage::VideoGenerate);
    }
    stages
}

/// Record of one completed stage, persisted on the run's `stages`
/// JSONB column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageReport {
    pub stage: AiStage,
    pub model: String,
    pub provider: String,
    pub summary: String,
    pub cost: f64,
}

impl StageReport {
    pub fn new(stage: AiStage, cost: f64) -> Self {
        Self {
            stage,
            model: stage.model().to_string(),
            provider: stage.provider().to_string(),
            summary: stage.summary().to_string(),
            cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_round_trip() {
        for s in VALID_STAGES {
            assert_eq!(AiStage::from_str_value(s).unwrap().as_str(), *s);
        }
        assert!(AiStage::from_str_value("render").is_err());
    }

    #[test]
    fn media_stages_use_image_model() {
        assert_eq!(AiStage::ImgEnhance.model(), "stable-diffusion-xl");
        assert_eq!(AiStage::ImgEnhance.provider(), "stability");
        assert_eq!(AiStage::VideoGenerate.provider(), "stability");
    }

    #[test]
    fn text_stages_use_text_model() {
        assert_eq!(AiStage::Copy.model(), "gpt-4-turbo");
        assert_eq!(AiStage::Guard.provider(), "openai");
    }

    #[test]
    fn listing_sequence_stops_before_creatives() {
        let stages = stage_sequence(false);
        assert_eq!(stages.len(), 6);
        assert_eq!(*stages.last().unwrap(), AiStage::ImgEnhance);
    }

    #[test]
    fn full_sequence_ends_with_video() {
        let stages = stage_sequence(true);
        assert_eq!(stages.len(), 8);
        assert_eq!(*stages.last().unwrap(), AiStage::VideoGenerate);
    }
}
