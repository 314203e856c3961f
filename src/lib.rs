//! rswebprobe - 网页分析工具：元数据提取、SEO评分与基于签名的技术栈检测

// 导出全局错误类型
pub use self::error::{ProbeError, ProbeResult};

// 导出配置模块
pub use self::config::{AnalyzerConfig, ConfigBuilder, RuleConfig, RuleOrigin};

// 导出规则模块核心接口
pub use self::rule::{builtin_signatures, LegacyBucket, PatternSpec, RuleLoader, Signature};

// 导出编译模块核心接口
pub use self::compiler::{CompiledSignature, SignatureCompiler, SignatureTable};

// 导出检测模块核心接口
pub use self::detector::{detect, get_global_detector, init_global_detector, TechDetector};

// 导出检测结果
pub use self::result::{DetectResult, DetectionMethod, DetectionStats, LegacyTechnologies, Technology};

// 导出提取、SEO与页面分析接口
pub use self::analysis::{AnalysisMode, AnalysisReport, PageAnalyzer, PageMetadata};
pub use self::extractor::{HtmlExtractor, PageFacts};
pub use self::fetch::{FetchedPage, PageSource, UrlGuard};
pub use self::seo::SeoAnalysis;

#[cfg(feature = "fetch")]
pub use self::fetch::HttpPageSource;

// 导出工具模块核心接口
pub use self::utils::HeaderConverter;

// 声明所有子模块
pub mod analysis;
pub mod compiler;
pub mod config;
pub mod detector;
pub mod error;
pub mod extractor;
pub mod fetch;
pub mod result;
pub mod rule;
pub mod seo;
pub mod utils;
