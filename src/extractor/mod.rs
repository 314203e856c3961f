//! 提取模块：HTML页面信息提取与输入守卫
pub mod html_extractor;
pub mod html_input_guard;

pub use self::html_extractor::{HtmlExtractor, PageFacts};
pub use self::html_input_guard::HtmlInputGuard;
