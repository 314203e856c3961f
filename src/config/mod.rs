//! 配置模块：规则来源配置与分析器配置
pub mod analyzer;
pub mod rule;

pub use self::analyzer::{AnalyzerConfig, ConfigBuilder};
pub use self::rule::{RuleConfig, RuleOrigin};
