//! 签名规则加载器
//! 内置规则直接返回；本地文件按JSON数组解析

use std::fs;
use std::path::Path;

use log::info;

use crate::config::{RuleConfig, RuleOrigin};
use crate::error::{ProbeError, ProbeResult};

use super::model::Signature;
use super::signatures::builtin_signatures;

/// 规则加载器（无状态）
#[derive(Debug, Default)]
pub struct RuleLoader;

impl RuleLoader {
    pub fn new() -> Self {
        Self
    }

    /// 按配置加载签名表
    pub fn load(&self, config: &RuleConfig) -> ProbeResult<Vec<Signature>> {
        match &config.origin {
            RuleOrigin::Builtin => Ok(builtin_signatures()),
            RuleOrigin::LocalFile(path) => self.load_local_file(path),
        }
    }

    /// 从本地JSON文件加载
    pub fn load_local_file(&self, path: &Path) -> ProbeResult<Vec<Signature>> {
        if !path.exists() {
            return Err(ProbeError::RuleLoadError(format!(
                "signature file not found: {}",
                path.display()
            )));
        }
        let content = fs::read_to_string(path)?;
        let signatures = Self::parse(&content)?;
        info!(
            "Loaded {} signatures from {}",
            signatures.len(),
            path.display()
        );
        Ok(signatures)
    }

    /// 解析JSON签名数组
    pub fn parse(content: &str) -> ProbeResult<Vec<Signature>> {
        let signatures: Vec<Signature> = serde_json::from_str(content)?;
        if signatures.is_empty() {
            return Err(ProbeError::RuleParseError(
                "signature file contains no signatures".to_string(),
            ));
        }
        Ok(signatures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::model::PatternSpec;
    use std::io::Write;

    const SAMPLE: &str = r#"[
        {
            "name": "Acme CMS",
            "patterns": [{"contains": "acme-cms"}, {"regex": "/acme/assets/"}],
            "confidence": 90,
            "categories": ["CMS"],
            "version": "acme-cms/(\\d+\\.\\d+)"
        }
    ]"#;

    #[test]
    fn test_parse_signature_json() {
        let sigs = RuleLoader::parse(SAMPLE).unwrap();
        assert_eq!(sigs.len(), 1);
        let sig = &sigs[0];
        assert_eq!(sig.name, "Acme CMS");
        assert_eq!(sig.patterns[0], PatternSpec::Contains("acme-cms".into()));
        assert_eq!(sig.patterns[1], PatternSpec::Regex("/acme/assets/".into()));
        assert!(sig.exclude.is_empty());
        assert!(!sig.requires_all);
        assert_eq!(sig.version.as_deref(), Some(r"acme-cms/(\d+\.\d+)"));
    }

    #[test]
    fn test_parse_rejects_empty_and_malformed() {
        assert!(matches!(RuleLoader::parse("[]"), Err(ProbeError::RuleParseError(_))));
        assert!(matches!(RuleLoader::parse("{"), Err(ProbeError::JsonError(_))));
    }

    #[test]
    fn test_load_builtin_and_local_file() {
        let loader = RuleLoader::new();
        let builtin = loader.load(&RuleConfig::builtin()).unwrap();
        assert!(!builtin.is_empty());

        let path = std::env::temp_dir().join(format!("rswebprobe_sigs_{}.json", std::process::id()));
        {
            let mut file = fs::File::create(&path).unwrap();
            file.write_all(SAMPLE.as_bytes()).unwrap();
        }
        let loaded = loader.load(&RuleConfig::local_file(&path)).unwrap();
        assert_eq!(loaded.len(), 1);
        let _ = fs::remove_file(&path);

        let missing = loader.load(&RuleConfig::local_file("/nonexistent/rswebprobe.json"));
        assert!(matches!(missing, Err(ProbeError::RuleLoadError(_))));
    }
}
