//! 页面来源抽象
use async_trait::async_trait;
use http::header::HeaderMap;
use url::Url;

use crate::error::ProbeResult;

/// 一次抓取得到的页面
#[derive(Debug, Clone)]
pub struct FetchedPage {
    // 重定向后的最终地址
    pub url: Url,
    pub status: u16,
    pub headers: HeaderMap,
    pub html: String,
}

/// 页面来源（HTTP / 测试内存实现）
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, url: &Url) -> ProbeResult<FetchedPage>;
}
