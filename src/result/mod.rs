//! 检测结果模块：检测结果、技术条目、统计信息与旧版分组视图
pub mod detect_result;
pub mod legacy;

pub use self::detect_result::{DetectResult, DetectionMethod, DetectionStats, Technology};
pub use self::legacy::LegacyTechnologies;
