//! 分析模式
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProbeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// 元数据 + 旧版技术提示
    #[default]
    Basic,
    /// 元数据 + SEO评分
    Seo,
    /// 元数据 + 技术检测
    Tech,
    /// SEO评分 + 技术检测
    Full,
}

impl AnalysisMode {
    pub fn includes_seo(self) -> bool {
        matches!(self, Self::Seo | Self::Full)
    }

    pub fn includes_tech(self) -> bool {
        matches!(self, Self::Tech | Self::Full)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Seo => "seo",
            Self::Tech => "tech",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisMode {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "seo" => Ok(Self::Seo),
            "tech" => Ok(Self::Tech),
            "full" => Ok(Self::Full),
            other => Err(ProbeError::InvalidInput(format!("unknown analysis mode: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modes() {
        assert_eq!("FULL".parse::<AnalysisMode>().unwrap(), AnalysisMode::Full);
        assert_eq!(" seo ".parse::<AnalysisMode>().unwrap(), AnalysisMode::Seo);
        assert!("performance".parse::<AnalysisMode>().is_err());
        assert_eq!(AnalysisMode::default(), AnalysisMode::Basic);
    }

    #[test]
    fn test_mode_sections() {
        assert!(AnalysisMode::Full.includes_seo() && AnalysisMode::Full.includes_tech());
        assert!(!AnalysisMode::Basic.includes_seo() && !AnalysisMode::Basic.includes_tech());
        assert!(AnalysisMode::Tech.includes_tech() && !AnalysisMode::Tech.includes_seo());
    }
}
