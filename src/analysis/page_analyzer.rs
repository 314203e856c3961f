//! 页面分析器：抓取 -> 提取 -> SEO / 技术检测 -> 报告
use std::time::Instant;

use http::header::HeaderMap;
use log::{debug, info, warn};

use super::metadata::PageMetadata;
use super::mode::AnalysisMode;
use super::report::AnalysisReport;
use crate::config::RuleConfig;
use crate::detector::TechDetector;
use crate::error::ProbeResult;
use crate::extractor::{HtmlExtractor, PageFacts};
use crate::fetch::{FetchedPage, PageSource, UrlGuard};
use crate::result::{DetectResult, LegacyTechnologies};
use crate::rule::LegacyBucket;
use crate::seo::SeoAnalysis;
use crate::utils::HeaderConverter;

#[cfg(feature = "fetch")]
use crate::config::AnalyzerConfig;
#[cfg(feature = "fetch")]
use crate::fetch::HttpPageSource;

pub struct PageAnalyzer<S> {
    source: S,
    // 初始化失败时为None，技术检测降级为空结果
    detector: Option<TechDetector>,
}

#[cfg(feature = "fetch")]
impl PageAnalyzer<HttpPageSource> {
    /// HTTP抓取 + 配置中的规则来源
    pub fn from_config(config: &AnalyzerConfig) -> ProbeResult<Self> {
        let source = HttpPageSource::new(config)?;
        Ok(Self::new(source, &config.rules))
    }
}

impl<S: PageSource> PageAnalyzer<S> {
    pub fn new(source: S, rules: &RuleConfig) -> Self {
        let detector = match TechDetector::new(rules) {
            Ok(detector) => Some(detector),
            Err(e) => {
                warn!("Technology detector unavailable, tech sections will be empty: {}", e);
                None
            }
        };
        Self::with_detector(source, detector)
    }

    pub fn with_detector(source: S, detector: Option<TechDetector>) -> Self {
        Self { source, detector }
    }

    pub fn detector(&self) -> Option<&TechDetector> {
        self.detector.as_ref()
    }

    /// 校验URL、抓取页面并按模式分析
    pub async fn analyze(&self, raw_url: &str, mode: AnalysisMode) -> ProbeResult<AnalysisReport> {
        let url = UrlGuard::parse(raw_url)?;
        let start = Instant::now();
        let page = self.source.fetch(&url).await?;
        let report = self.analyze_page(&page, mode);

        info!(
            "Analysis finished | url: {} | mode: {} | status: {} | technologies: {} | time: {:?}",
            page.url,
            mode,
            page.status,
            report
                .technologies_detailed
                .as_ref()
                .map_or(0, |r| r.technologies.len()),
            start.elapsed()
        );
        Ok(report)
    }

    /// 对已抓取的页面执行分析（同步，无IO）
    pub fn analyze_page(&self, page: &FetchedPage, mode: AnalysisMode) -> AnalysisReport {
        let facts = HtmlExtractor::extract(&page.html);
        let mut report = AnalysisReport::new(PageMetadata::from_facts(&facts, &page.url));

        if mode.includes_seo() {
            report.seo = Some(SeoAnalysis::analyze(&facts));
        }

        if mode.includes_tech() {
            let detailed = self.detect(page);
            report.technologies = Some(LegacyTechnologies::from_result(&detailed));
            report.technologies_detailed = Some(detailed);
        }

        if mode == AnalysisMode::Basic {
            report.technologies = Some(Self::basic_hints(&page.headers, &facts));
        }

        report
    }

    fn detect(&self, page: &FetchedPage) -> DetectResult {
        match &self.detector {
            Some(detector) => detector.detect(&page.html, &HeaderConverter::from_header_map(&page.headers)),
            None => {
                warn!("Technology detection skipped for {}: detector unavailable", page.url);
                DetectResult::empty()
            }
        }
    }

    /// 旧版提示：x-powered-by 与 generator/framework meta
    fn basic_hints(headers: &HeaderMap, facts: &PageFacts) -> LegacyTechnologies {
        let mut legacy = LegacyTechnologies::default();

        match Self::powered_by(headers) {
            Ok(Some(value)) => legacy.push(LegacyBucket::Servers, &format!("Powered by: {}", value)),
            Ok(None) => {}
            Err(e) => debug!("Skip x-powered-by hint: {}", e),
        }

        for (name, content) in &facts.meta_tags {
            if content.is_empty() {
                continue;
            }
            if name.contains("generator") {
                legacy.push(LegacyBucket::Marketing, &format!("Generator: {}", content));
            } else if name.contains("framework") {
                legacy.push(LegacyBucket::Marketing, &format!("Framework: {}", content));
            }
        }
        legacy
    }

    fn powered_by(headers: &HeaderMap) -> ProbeResult<Option<String>> {
        let Some(value) = headers.get("x-powered-by") else {
            return Ok(None);
        };
        let value = value.to_str()?.trim();
        Ok((!value.is_empty()).then(|| value.to_string()))
    }
}
