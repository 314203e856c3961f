//! 签名规则来源配置

use std::path::PathBuf;

/// 规则来源
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RuleOrigin {
    #[default]
    Builtin,            // 内置签名表
    LocalFile(PathBuf), // 本地JSON签名文件
}

/// 完整规则配置
#[derive(Debug, Clone, Default)]
pub struct RuleConfig {
    pub origin: RuleOrigin,
}

impl RuleConfig {
    /// 内置规则
    pub fn builtin() -> Self {
        Self::default()
    }

    /// 本地规则文件
    pub fn local_file(path: impl Into<PathBuf>) -> Self {
        Self {
            origin: RuleOrigin::LocalFile(path.into()),
        }
    }

    pub fn is_builtin(&self) -> bool {
        self.origin == RuleOrigin::Builtin
    }
}
