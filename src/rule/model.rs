//! 签名数据模型定义
//! 仅存储规则数据，无任何业务逻辑，支持序列化/反序列化

use serde::{Deserialize, Serialize};

use super::category::is_framework_category;

/// 单条内容匹配模式
/// - Contains: 子串匹配（忽略大小写）
/// - Regex: 正则匹配（作用于原始HTML，需忽略大小写时在表达式中写 `(?i)`）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternSpec {
    Contains(String),
    Regex(String),
}

impl PatternSpec {
    pub fn contains(s: &str) -> Self {
        PatternSpec::Contains(s.to_string())
    }

    pub fn regex(s: &str) -> Self {
        PatternSpec::Regex(s.to_string())
    }
}

/// 技术签名定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub patterns: Vec<PatternSpec>,
    /// 基础置信度（全部模式命中时的上限）
    pub confidence: u8,
    pub categories: Vec<String>,
    /// 版本提取正则，取第一个捕获组
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// 否决模式：任意一条命中则丢弃该签名
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<PatternSpec>,
    #[serde(default)]
    pub requires_all: bool,
}

impl Signature {
    /// 快速创建签名（无版本/无否决/非全匹配）
    pub fn new(name: &str, patterns: Vec<PatternSpec>, confidence: u8, categories: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            patterns,
            confidence,
            categories: categories.iter().map(|c| c.to_string()).collect(),
            version: None,
            exclude: Vec::new(),
            requires_all: false,
        }
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    pub fn with_exclude(mut self, exclude: Vec<PatternSpec>) -> Self {
        self.exclude = exclude;
        self
    }

    pub fn requires_all(mut self) -> Self {
        self.requires_all = true;
        self
    }

    /// 是否属于框架签名（第一轮匹配）
    pub fn is_framework(&self) -> bool {
        self.categories.iter().any(|c| is_framework_category(c))
    }
}
