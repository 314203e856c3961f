//! 基于 reqwest 的HTTP页面来源
use async_trait::async_trait;
use log::debug;
use reqwest::{redirect, Client};
use url::Url;

use super::source::{FetchedPage, PageSource};
use super::url_guard::UrlGuard;
use crate::config::AnalyzerConfig;
use crate::error::{ProbeError, ProbeResult};
use crate::extractor::HtmlInputGuard;

#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
    max_html_bytes: usize,
}

impl HttpPageSource {
    pub fn new(config: &AnalyzerConfig) -> ProbeResult<Self> {
        let max_redirects = config.max_redirects;
        // 每一跳重定向都重新做内网校验
        let policy = redirect::Policy::custom(move |attempt| {
            if attempt.previous().len() > max_redirects {
                return attempt.error(ProbeError::NetworkError(format!(
                    "too many redirects (max {})",
                    max_redirects
                )));
            }
            match UrlGuard::check(attempt.url()) {
                Ok(()) => attempt.follow(),
                Err(e) => attempt.error(e),
            }
        });

        let client = Client::builder()
            .timeout(config.http_timeout)
            .user_agent(config.user_agent.as_str())
            .redirect(policy)
            .build()
            .map_err(|e| ProbeError::NetworkError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            max_html_bytes: config.max_html_bytes,
        })
    }

    fn map_error(url: &Url, e: reqwest::Error) -> ProbeError {
        if e.is_timeout() {
            ProbeError::Timeout(url.to_string())
        } else {
            ProbeError::NetworkError(format!("{}: {}", url, e))
        }
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch(&self, url: &Url) -> ProbeResult<FetchedPage> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Self::map_error(url, e))?;

        let status = response.status();
        let final_url = response.url().clone();
        if !status.is_success() {
            return Err(ProbeError::HttpStatus {
                status: status.as_u16(),
                url: final_url.to_string(),
            });
        }

        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|e| Self::map_error(url, e))?;
        let html = HtmlInputGuard::decode(&body, self.max_html_bytes);

        debug!(
            "Fetched page | url: {} | status: {} | bytes: {}",
            final_url,
            status.as_u16(),
            html.len()
        );

        Ok(FetchedPage {
            url: final_url,
            status: status.as_u16(),
            headers,
            html,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_build_client() {
        let config = AnalyzerConfig::builder()
            .http_timeout(Duration::from_secs(2))
            .max_redirects(1)
            .build();
        assert!(HttpPageSource::new(&config).is_ok());
    }

    #[tokio::test]
    async fn test_status_error_without_server() {
        // 保留端口上无服务，请求应以网络错误失败
        let config = AnalyzerConfig::builder()
            .http_timeout(Duration::from_millis(500))
            .build();
        let source = HttpPageSource::new(&config).unwrap();
        let url = Url::parse("http://127.0.0.1:9/").unwrap();
        let err = source.fetch(&url).await.unwrap_err();
        assert!(matches!(err, ProbeError::NetworkError(_) | ProbeError::Timeout(_)));
    }
}
