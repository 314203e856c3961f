//! 规则模块：签名数据模型、内置签名表、Header规则与加载
pub mod category;
pub mod header_rules;
pub mod loader;
pub mod model;
pub mod signatures;

// 导出核心接口
pub use self::category::LegacyBucket;
pub use self::header_rules::{HeaderMatch, HeaderRule, HEADER_RULES};
pub use self::loader::RuleLoader;
pub use self::model::{PatternSpec, Signature};
pub use self::signatures::builtin_signatures;
