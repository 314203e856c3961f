//! 分析器全局配置，存储抓取与检测的可配置项

use std::time::Duration;

use super::rule::{RuleConfig, RuleOrigin};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// 分析器配置
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    // HTTP超时
    pub http_timeout: Duration,
    pub user_agent: String,
    // 最大重定向次数
    pub max_redirects: usize,
    // 参与分析的HTML最大字节数
    pub max_html_bytes: usize,
    pub rules: RuleConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            http_timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: 5,
            max_html_bytes: 2 * 1024 * 1024,
            rules: RuleConfig::default(),
        }
    }
}

impl AnalyzerConfig {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// 配置构建器（链式 API）
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: AnalyzerConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn http_timeout(mut self, timeout: Duration) -> Self {
        self.config.http_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn max_redirects(mut self, max: usize) -> Self {
        self.config.max_redirects = max;
        self
    }

    pub fn max_html_bytes(mut self, max: usize) -> Self {
        self.config.max_html_bytes = max;
        self
    }

    pub fn rule_origin(mut self, origin: RuleOrigin) -> Self {
        self.config.rules.origin = origin;
        self
    }

    pub fn build(self) -> AnalyzerConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = AnalyzerConfig::builder()
            .http_timeout(Duration::from_secs(3))
            .user_agent("probe/1.0")
            .max_redirects(2)
            .max_html_bytes(1024)
            .rule_origin(RuleOrigin::LocalFile("sigs.json".into()))
            .build();

        assert_eq!(config.http_timeout, Duration::from_secs(3));
        assert_eq!(config.user_agent, "probe/1.0");
        assert_eq!(config.max_redirects, 2);
        assert_eq!(config.max_html_bytes, 1024);
        assert!(!config.rules.is_builtin());
    }

    #[test]
    fn test_default_config() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert!(config.rules.is_builtin());
    }
}
