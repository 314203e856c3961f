//! 分析报告
use serde::{Deserialize, Serialize};

use super::metadata::PageMetadata;
use crate::result::{DetectResult, LegacyTechnologies};
use crate::seo::SeoAnalysis;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    #[serde(flatten)]
    pub metadata: PageMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<SeoAnalysis>,
    // 旧版分组
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technologies: Option<LegacyTechnologies>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technologies_detailed: Option<DetectResult>,
}

impl AnalysisReport {
    pub fn new(metadata: PageMetadata) -> Self {
        Self {
            metadata,
            ..Self::default()
        }
    }
}
