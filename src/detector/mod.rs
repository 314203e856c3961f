//! 检测模块：技术检测核心逻辑
pub mod analyzer;
pub mod detector;
pub mod global;

// 导出核心接口
pub use self::analyzer::{HeaderAnalyzer, PatternAnalyzer, PassPolicy};
pub use self::detector::{ContextBoost, TechDetector, CONTEXT_BOOSTS, FRAMEWORK_PRECEDENCE};
pub use self::global::{detect, get_global_detector, init_global_detector};
