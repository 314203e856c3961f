//! 技术检测结果结构

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 技术来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMethod {
    Pattern, // HTML模式匹配
    Header,  // 响应头匹配
    Merged,  // 两种来源同时命中
}

/// 技术结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technology {
    pub name: String,
    // 置信度，范围 [0, 100]
    pub confidence: f64,
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub detection_method: DetectionMethod,
}

impl Technology {
    pub fn new(
        name: impl Into<String>,
        confidence: f64,
        categories: Vec<String>,
        detection_method: DetectionMethod,
    ) -> Self {
        Self {
            name: name.into(),
            confidence: confidence.clamp(0.0, 100.0),
            categories,
            version: None,
            detection_method,
        }
    }

    pub fn with_version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }
}

impl std::fmt::Display for Technology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.version {
            Some(v) if !v.is_empty() => write!(f, "{} {} ({:.1}%)", self.name, v, self.confidence),
            _ => write!(f, "{} ({:.1}%)", self.name, self.confidence),
        }
    }
}

/// 检测统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionStats {
    // 签名表大小
    pub total_patterns_checked: usize,
    // 检测耗时（毫秒）
    pub detection_time: f64,
    // HTML字节数
    pub html_size: usize,
}

/// 检测结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectResult {
    // 去重后按置信度降序
    pub technologies: Vec<Technology>,
    // 分类 -> 技术列表
    pub categorized: BTreeMap<String, Vec<Technology>>,
    pub stats: DetectionStats,
}

impl DetectResult {
    /// 空结果（检测器不可用时的降级返回）
    pub fn empty() -> Self {
        Self::default()
    }

    /// 由去重排序后的技术列表构建结果，同时生成分类索引
    pub fn from_technologies(technologies: Vec<Technology>, stats: DetectionStats) -> Self {
        let mut categorized: BTreeMap<String, Vec<Technology>> = BTreeMap::new();
        for tech in &technologies {
            for category in &tech.categories {
                categorized
                    .entry(category.clone())
                    .or_default()
                    .push(tech.clone());
            }
        }
        Self {
            technologies,
            categorized,
            stats,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Technology> {
        self.technologies.iter().find(|t| t.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.technologies.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.technologies.is_empty()
    }
}

impl std::fmt::Display for DetectResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let list = self
            .technologies
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "技术栈: [{}]", list)
    }
}
