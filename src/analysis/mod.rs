//! 页面分析模块：分析模式、页面元数据、分析报告与页面分析器
pub mod metadata;
pub mod mode;
pub mod page_analyzer;
pub mod report;

pub use self::metadata::PageMetadata;
pub use self::mode::AnalysisMode;
pub use self::page_analyzer::PageAnalyzer;
pub use self::report::AnalysisReport;
