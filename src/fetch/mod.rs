//! 抓取模块：页面来源抽象、HTTP实现与URL安全校验
#[cfg(feature = "fetch")]
pub mod http_source;
pub mod source;
pub mod url_guard;

#[cfg(feature = "fetch")]
pub use self::http_source::HttpPageSource;
pub use self::source::{FetchedPage, PageSource};
pub use self::url_guard::UrlGuard;
