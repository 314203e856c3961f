//! 检测器核心：整合HTML模式与Header分析，输出检测结果
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Instant;

use http::header::HeaderMap;
use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

use super::analyzer::{HeaderAnalyzer, PatternAnalyzer, FRAMEWORK_PASS, GENERAL_PASS};
use super::global::builtin_table;
use crate::compiler::{MatchInput, SignatureCompiler, SignatureTable};
use crate::config::RuleConfig;
use crate::error::ProbeResult;
use crate::result::{DetectResult, DetectionStats, LegacyTechnologies, Technology};
use crate::rule::{RuleLoader, Signature, HEADER_RULES};
use crate::utils::{DetectionUpdater, HeaderConverter};

/// 框架互斥表：检测到左侧框架时压制右侧技术
pub const FRAMEWORK_PRECEDENCE: &[(&str, &[&str])] = &[
    ("Next.js", &["React"]),
    ("Angular", &["React", "Vue.js", "Next.js"]),
];

/// 上下文加成规则
#[derive(Debug, Clone, Copy)]
pub struct ContextBoost {
    pub target: &'static str,
    pub when_framework: &'static str,
    pub bonus: f64,
}

pub const CONTEXT_BOOSTS: &[ContextBoost] = &[
    ContextBoost {
        target: "Tailwind CSS",
        when_framework: "Next.js",
        bonus: 10.0,
    },
    ContextBoost {
        target: "Vercel",
        when_framework: "Next.js",
        bonus: 15.0,
    },
];

/// 技术检测器
#[derive(Debug, Clone)]
pub struct TechDetector {
    table: Arc<SignatureTable>,
}

impl TechDetector {
    /// 按规则配置创建检测器
    pub fn new(config: &RuleConfig) -> ProbeResult<Self> {
        if config.is_builtin() {
            return Ok(Self::builtin());
        }
        let signatures = RuleLoader::new().load(config)?;
        Self::with_signatures(&signatures)
    }

    /// 内置签名表检测器（共享已编译的表）
    pub fn builtin() -> Self {
        Self {
            table: builtin_table(),
        }
    }

    /// 自定义签名表
    pub fn with_signatures(signatures: &[Signature]) -> ProbeResult<Self> {
        let table = SignatureCompiler::compile(signatures)?;
        Ok(Self {
            table: Arc::new(table),
        })
    }

    pub fn table(&self) -> &SignatureTable {
        &self.table
    }

    /// 核心检测接口（HTML + Header映射）
    pub fn detect(&self, html: &str, headers: &FxHashMap<String, String>) -> DetectResult {
        let start = Instant::now();
        let input = MatchInput::new(html);

        // 1. 第一轮：框架签名
        let mut frameworks =
            PatternAnalyzer::analyze(self.table.frameworks(), &input, &FRAMEWORK_PASS, &FxHashSet::default());

        // 2. 框架互斥
        let suppressed = Self::suppressed_by(&frameworks);
        frameworks.retain(|tech| {
            let keep = !suppressed.contains(tech.name.as_str());
            if !keep {
                debug!("[Framework]被更高优先级框架压制 | 技术: {}", tech.name);
            }
            keep
        });
        let detected_frameworks: FxHashSet<String> =
            frameworks.iter().map(|t| t.name.clone()).collect();

        // 3. 第二轮：其余签名
        let others = PatternAnalyzer::analyze(self.table.others(), &input, &GENERAL_PASS, &suppressed);

        let mut pattern_results = frameworks;
        pattern_results.extend(others);

        // 4. 上下文加成（仅作用于模式结果）
        Self::apply_boosts(&mut pattern_results, &detected_frameworks);

        // 5. Header检测
        let header_results = if headers.is_empty() {
            Vec::new()
        } else {
            HeaderAnalyzer::analyze(HEADER_RULES, &HeaderConverter::normalize(headers))
        };

        // 6. 合并、排序、分类
        let mut technologies = DetectionUpdater::merge([pattern_results, header_results]);
        DetectionUpdater::sort_by_confidence(&mut technologies);

        let stats = DetectionStats {
            total_patterns_checked: self.table.len(),
            detection_time: start.elapsed().as_secs_f64() * 1000.0,
            html_size: html.len(),
        };

        debug!(
            "Detection finished | technologies: {} | html: {} bytes | time: {:.3}ms",
            technologies.len(),
            stats.html_size,
            stats.detection_time
        );

        DetectResult::from_technologies(technologies, stats)
    }

    /// 检测接口（HeaderMap + Body）
    pub fn detect_header_map(&self, headers: &HeaderMap, body: &[u8]) -> DetectResult {
        let header_map = HeaderConverter::from_header_map(headers);
        let html: Cow<str> = String::from_utf8_lossy(body);
        self.detect(&html, &header_map)
    }

    /// 旧版分组检测接口
    pub fn detect_legacy(&self, html: &str, headers: &FxHashMap<String, String>) -> LegacyTechnologies {
        LegacyTechnologies::from_result(&self.detect(html, headers))
    }

    /// 由第一轮结果计算被压制的名称集合
    fn suppressed_by(frameworks: &[Technology]) -> FxHashSet<&'static str> {
        FRAMEWORK_PRECEDENCE
            .iter()
            .filter(|(winner, _)| frameworks.iter().any(|t| t.name == *winner))
            .flat_map(|(_, losers)| losers.iter().copied())
            .collect()
    }

    fn apply_boosts(technologies: &mut [Technology], detected_frameworks: &FxHashSet<String>) {
        for boost in CONTEXT_BOOSTS {
            if !detected_frameworks.contains(boost.when_framework) {
                continue;
            }
            if DetectionUpdater::boost(technologies, boost.target, boost.bonus) {
                debug!(
                    "[Boost]上下文加成 | 技术: {} | 条件: {} | 加成: +{}",
                    boost.target, boost.when_framework, boost.bonus
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::DetectionMethod;
    use crate::rule::PatternSpec as P;

    fn no_headers() -> FxHashMap<String, String> {
        FxHashMap::default()
    }

    fn detector() -> TechDetector {
        TechDetector::builtin()
    }

    #[test]
    fn test_empty_input() {
        let detector = detector();
        let result = detector.detect("", &no_headers());
        assert!(result.technologies.is_empty());
        assert!(result.categorized.is_empty());
        assert_eq!(result.stats.html_size, 0);
        assert_eq!(result.stats.total_patterns_checked, detector.table().len());
        assert!(detector.detect_legacy("", &no_headers()).is_empty());
    }

    #[test]
    fn test_wordpress_only() {
        let html = r#"<html><head><link rel="stylesheet" href="/wp-content/themes/astra/style.css"></head><body></body></html>"#;
        let detector = detector();
        let result = detector.detect(html, &no_headers());

        assert_eq!(result.technologies.len(), 1);
        let wp = &result.technologies[0];
        assert_eq!(wp.name, "WordPress");
        assert_eq!(wp.categories, vec!["CMS".to_string()]);
        assert_eq!(wp.confidence, 95.0);
        assert_eq!(wp.detection_method, DetectionMethod::Pattern);

        let legacy = LegacyTechnologies::from_result(&result);
        assert_eq!(legacy.cms, vec!["WordPress".to_string()]);
        assert!(legacy.frameworks.is_empty());
        assert!(legacy.analytics.is_empty());
        assert!(legacy.libraries.is_empty());
        assert!(legacy.cdn.is_empty());
        assert!(legacy.servers.is_empty());
        assert!(legacy.languages.is_empty());
        assert!(legacy.databases.is_empty());
        assert!(legacy.ecommerce.is_empty());
        assert!(legacy.marketing.is_empty());
    }

    #[test]
    fn test_nginx_header_only() {
        let mut headers = FxHashMap::default();
        headers.insert("server".to_string(), "nginx/1.18.0".to_string());

        let result = detector().detect("", &headers);
        assert_eq!(result.technologies.len(), 1);
        let nginx = &result.technologies[0];
        assert_eq!(nginx.name, "Nginx");
        assert_eq!(nginx.confidence, 95.0);
        assert_eq!(nginx.categories, vec!["Web servers".to_string()]);
        assert_eq!(nginx.detection_method, DetectionMethod::Header);
        assert!(nginx.version.is_none());
    }

    #[test]
    fn test_header_names_case_insensitive() {
        let mut headers = FxHashMap::default();
        headers.insert("Server".to_string(), "NGINX".to_string());
        let result = detector().detect("", &headers);
        assert!(result.contains("Nginx"));
    }

    #[test]
    fn test_empty_header_value_ignored() {
        let mut headers = FxHashMap::default();
        headers.insert("cf-ray".to_string(), String::new());
        let detector = detector();
        assert!(!detector.detect("", &headers).contains("Cloudflare"));

        let mut header_map = HeaderMap::new();
        header_map.insert("cf-ray", http::header::HeaderValue::from_static(""));
        assert!(!detector.detect_header_map(&header_map, b"").contains("Cloudflare"));
    }

    #[test]
    fn test_ratio_thresholds() {
        let markers = || {
            vec![
                P::contains("marker-a"),
                P::contains("marker-b"),
                P::contains("marker-c"),
                P::contains("marker-d"),
                P::contains("marker-e"),
            ]
        };
        let detector = TechDetector::with_signatures(&[
            Signature::new("Frame", markers(), 90, &["JavaScript frameworks"]),
            Signature::new("Lib", markers(), 90, &["JavaScript libraries"]),
        ])
        .unwrap();

        let one = detector.detect("marker-a", &no_headers());
        assert_eq!(one.names(), vec!["Frame"]);

        let two = detector.detect("marker-a marker-b", &no_headers());
        assert!(two.contains("Frame"));
        assert!(two.contains("Lib"));
        assert!((two.get("Lib").unwrap().confidence - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_nextjs_suppresses_react() {
        let html = r#"<div data-reactroot=""></div><script src="/static/react-dom.production.min.js"></script><script id="__NEXT_DATA__" type="application/json">{}</script>"#;
        let result = detector().detect(html, &no_headers());
        assert!(result.contains("Next.js"));
        assert!(!result.contains("React"));
    }

    #[test]
    fn test_react_without_nextjs() {
        let html = r#"<div data-reactroot=""></div><script src="/static/react-dom.production.min.js"></script>"#;
        let result = detector().detect(html, &no_headers());
        assert!(result.contains("React"));
        assert!(!result.contains("Next.js"));
    }

    #[test]
    fn test_angular_suppresses_others() {
        let html = r#"<app-root ng-version="17.0.1"></app-root><script src="/vue.global.prod.js"></script><div data-reactroot=""></div><script src="/react-dom.production.min.js"></script><script id="__NEXT_DATA__">{}</script>"#;
        let result = detector().detect(html, &no_headers());

        let angular = result.get("Angular").unwrap();
        assert_eq!(angular.version.as_deref(), Some("17.0.1"));
        assert!(!result.contains("React"));
        assert!(!result.contains("Vue.js"));
        assert!(!result.contains("Next.js"));
    }

    #[test]
    fn test_tailwind_boost_with_nextjs() {
        let tailwind_only = r#"<link rel="stylesheet" href="/tailwind.min.css"><!-- tailwindcss -->"#;
        let with_next = format!(r#"{}<script id="__NEXT_DATA__">{{}}</script>"#, tailwind_only);

        let detector = detector();
        let base = detector.detect(tailwind_only, &no_headers());
        let boosted = detector.detect(&with_next, &no_headers());

        let base_conf = base.get("Tailwind CSS").unwrap().confidence;
        let boosted_conf = boosted.get("Tailwind CSS").unwrap().confidence;
        assert!((base_conf - 42.5).abs() < 1e-9);
        assert!((boosted_conf - 52.5).abs() < 1e-9);
        assert!(boosted_conf - base_conf >= 10.0 - 1e-9 || boosted_conf == 100.0);
    }

    #[test]
    fn test_vercel_boost_with_nextjs() {
        let vercel_only = r#"<script defer src="/_vercel/insights/script.js"></script>"#;
        let with_next = format!(r#"{}<script src="/_next/static/chunks/main.js"></script>"#, vercel_only);

        let detector = detector();
        let base = detector.detect(vercel_only, &no_headers());
        let boosted = detector.detect(&with_next, &no_headers());

        assert_eq!(base.get("Vercel").unwrap().confidence, 45.0);
        assert!(boosted.contains("Next.js"));
        assert_eq!(boosted.get("Vercel").unwrap().confidence, 60.0);
    }

    #[test]
    fn test_no_boost_when_nextjs_suppressed() {
        let html = r#"<app-root ng-version="17.0.1"></app-root>
            <script src="/_next/static/chunks/main.js"></script>
            <script defer src="/_vercel/insights/script.js"></script>"#;
        let result = detector().detect(html, &no_headers());

        assert!(result.contains("Angular"));
        assert!(!result.contains("Next.js"));
        assert_eq!(result.get("Vercel").unwrap().confidence, 45.0);
    }

    #[test]
    fn test_confidence_bounds() {
        let html = r#"<script id="__NEXT_DATA__">{}</script><script src="/_next/static/chunks/main.js"></script>
            <img src="/_next/image?url=a.png"><script>import("next/router")</script>
            <link href="/tailwind.css"><!-- tailwindcss vercel --><script src="https://www.googletagmanager.com/gtag/js?id=G-ABC123"></script>"#;
        let result = detector().detect(html, &no_headers());
        assert!(!result.is_empty());
        for tech in &result.technologies {
            assert!((0.0..=100.0).contains(&tech.confidence), "{}", tech);
        }
        assert_eq!(result.get("Next.js").unwrap().confidence, 100.0);
    }

    #[test]
    fn test_sorted_descending() {
        let html = r#"<link href="/wp-content/themes/x/style.css"><link rel="stylesheet" href="/tailwind.min.css"><!-- tailwindcss -->"#;
        let result = detector().detect(html, &no_headers());
        let confidences: Vec<f64> = result.technologies.iter().map(|t| t.confidence).collect();
        assert!(confidences.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_idempotent() {
        let html = r#"<link href="/wp-content/plugins/woocommerce/style.css"><script src="https://cdn.jsdelivr.net/npm/jquery@3.7.1/dist/jquery.min.js"></script>"#;
        let mut headers = FxHashMap::default();
        headers.insert("cf-ray".to_string(), "abc".to_string());

        let detector = detector();
        let first = detector.detect(html, &headers);
        let second = detector.detect(html, &headers);
        assert_eq!(first.technologies, second.technologies);
        assert_eq!(first.categorized, second.categorized);
        assert_eq!(first.stats.html_size, second.stats.html_size);
        assert_eq!(first.stats.total_patterns_checked, second.stats.total_patterns_checked);
    }

    #[test]
    fn test_pattern_and_header_merge() {
        let html = r#"<script src="/cdn-cgi/challenge-platform/scripts/main.js"></script><script>var __cf_bm = 1;</script>"#;
        let mut headers = FxHashMap::default();
        headers.insert("cf-ray".to_string(), "8a1b2c3d4e5f-CDG".to_string());

        let result = detector().detect(html, &headers);
        let cloudflare = result.get("Cloudflare").unwrap();
        assert_eq!(cloudflare.detection_method, DetectionMethod::Merged);
        assert_eq!(cloudflare.confidence, 95.0);
        assert_eq!(result.technologies.iter().filter(|t| t.name == "Cloudflare").count(), 1);
    }

    #[test]
    fn test_legacy_cms_consistency() {
        let html = r#"<link href="/wp-content/themes/astra/style.css"><script src="/sites/default/files/js/drupal.js"></script><script>Drupal.settings = {};</script>"#;
        let result = detector().detect(html, &no_headers());
        let legacy = LegacyTechnologies::from_result(&result);

        let categorized: Vec<&str> = result
            .categorized
            .get("CMS")
            .map(|list| list.iter().map(|t| t.name.as_str()).collect())
            .unwrap_or_default();
        let mut from_index: Vec<&str> = categorized.clone();
        from_index.sort_unstable();
        let mut from_legacy: Vec<&str> = legacy.cms.iter().map(String::as_str).collect();
        from_legacy.sort_unstable();
        assert_eq!(from_index, from_legacy);
        assert!(from_legacy.contains(&"WordPress"));
    }

    #[test]
    fn test_detect_header_map() {
        let mut headers = HeaderMap::new();
        headers.insert("x-powered-by", "PHP/8.2".parse().unwrap());
        let body = br#"<link href="/wp-content/themes/astra/style.css">"#;

        let result = detector().detect_header_map(&headers, body);
        assert!(result.contains("WordPress"));
        assert_eq!(result.get("PHP").unwrap().detection_method, DetectionMethod::Header);
    }

    #[test]
    fn test_new_with_builtin_config_shares_table() {
        let a = TechDetector::new(&RuleConfig::builtin()).unwrap();
        let b = TechDetector::builtin();
        assert!(Arc::ptr_eq(&a.table, &b.table));
    }
}
