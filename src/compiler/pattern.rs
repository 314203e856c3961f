//! 编译后模式模型
//! 签名编译后的可执行结构

use regex::Regex;

use crate::error::ProbeResult;
use crate::rule::PatternSpec;
use crate::utils::VersionExtractor;

/// 单次检测的输入视图：原始HTML + 预先小写化的副本
#[derive(Debug)]
pub struct MatchInput<'a> {
    pub raw: &'a str,
    pub lower: String,
}

impl<'a> MatchInput<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            lower: raw.to_lowercase(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Matcher {
    Contains(String), // 包含匹配（忽略大小写，存储小写）
    Regex(Regex),     // 正则匹配（作用于原始HTML）
}

impl Matcher {
    pub fn from_spec(spec: &PatternSpec) -> ProbeResult<Self> {
        Ok(match spec {
            PatternSpec::Contains(s) => Matcher::Contains(s.to_lowercase()),
            PatternSpec::Regex(s) => Matcher::Regex(Regex::new(s)?),
        })
    }

    /// 简单匹配判断
    #[inline]
    pub fn is_match(&self, input: &MatchInput) -> bool {
        match self {
            Matcher::Contains(s) => input.lower.contains(s.as_str()),
            Matcher::Regex(regex) => regex.is_match(input.raw),
        }
    }

    /// 规则描述
    pub fn describe(&self) -> String {
        match self {
            Matcher::Contains(s) => format!("contains: {}", s),
            Matcher::Regex(r) => format!("regex: {}", r.as_str()),
        }
    }
}

/// 编译后的签名
#[derive(Debug, Clone)]
pub struct CompiledSignature {
    pub name: String,
    pub matchers: Vec<Matcher>,
    pub base_confidence: u8,
    pub categories: Vec<String>,
    pub version: Option<Regex>,
    pub exclude: Vec<Matcher>,
    pub requires_all: bool,
    pub is_framework: bool,
}

impl CompiledSignature {
    /// 命中模式数
    pub fn matched_count(&self, input: &MatchInput) -> usize {
        self.matchers.iter().filter(|m| m.is_match(input)).count()
    }

    /// 命中比例 = 命中数 / 模式总数
    pub fn match_ratio(&self, input: &MatchInput) -> f64 {
        if self.matchers.is_empty() {
            return 0.0;
        }
        self.matched_count(input) as f64 / self.matchers.len() as f64
    }

    /// 返回第一条命中的否决模式
    pub fn vetoed_by(&self, input: &MatchInput) -> Option<&Matcher> {
        self.exclude.iter().find(|m| m.is_match(input))
    }

    /// 版本提取（第一个捕获组）
    pub fn extract_version(&self, input: &MatchInput) -> Option<String> {
        self.version
            .as_ref()
            .and_then(|re| re.captures(input.raw))
            .and_then(|cap| VersionExtractor::first_group(&cap))
    }
}

/// 编译后的签名表（只读，进程内共享）
#[derive(Debug, Clone, Default)]
pub struct SignatureTable {
    signatures: Vec<CompiledSignature>,
}

impl SignatureTable {
    pub(crate) fn from_compiled(signatures: Vec<CompiledSignature>) -> Self {
        Self { signatures }
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledSignature> {
        self.signatures.iter()
    }

    /// 第一轮：框架签名（保持表内顺序）
    pub fn frameworks(&self) -> impl Iterator<Item = &CompiledSignature> {
        self.signatures.iter().filter(|s| s.is_framework)
    }

    /// 第二轮：其余签名
    pub fn others(&self) -> impl Iterator<Item = &CompiledSignature> {
        self.signatures.iter().filter(|s| !s.is_framework)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_case_insensitive() {
        let m = Matcher::from_spec(&PatternSpec::contains("__NUXT__")).unwrap();
        assert!(m.is_match(&MatchInput::new("<script>window.__nuxt__={}</script>")));
        assert!(m.is_match(&MatchInput::new("<script>window.__NUXT__={}</script>")));
    }

    #[test]
    fn test_regex_respects_authored_case() {
        let strict = Matcher::from_spec(&PatternSpec::regex("__NEXT_DATA__")).unwrap();
        assert!(strict.is_match(&MatchInput::new(r#"<script id="__NEXT_DATA__">"#)));
        assert!(!strict.is_match(&MatchInput::new(r#"<script id="__next_data__">"#)));

        let loose = Matcher::from_spec(&PatternSpec::regex("(?i)tailwindcss")).unwrap();
        assert!(loose.is_match(&MatchInput::new("TailwindCSS")));
    }

    #[test]
    fn test_invalid_regex_is_error() {
        assert!(Matcher::from_spec(&PatternSpec::regex("(unclosed")).is_err());
    }

    #[test]
    fn test_describe() {
        let m = Matcher::from_spec(&PatternSpec::contains("wp-")).unwrap();
        assert_eq!(m.describe(), "contains: wp-");
    }
}
