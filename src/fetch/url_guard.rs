//! URL安全校验：仅允许 http/https，拒绝内网与本机地址
use std::net::{Ipv4Addr, Ipv6Addr};

use log::warn;
use url::{Host, Url};

use crate::error::{ProbeError, ProbeResult};

pub struct UrlGuard;

impl UrlGuard {
    /// 解析并校验用户输入的URL
    pub fn parse(raw: &str) -> ProbeResult<Url> {
        let url = Url::parse(raw.trim())?;
        Self::check(&url)?;
        Ok(url)
    }

    /// 校验已解析的URL（重定向每一跳同样适用）
    pub fn check(url: &Url) -> ProbeResult<()> {
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ProbeError::InvalidInput(format!("unsupported scheme: {}", other)));
            }
        }

        let blocked = match url.host() {
            None => return Err(ProbeError::InvalidInput(format!("missing host: {}", url))),
            Some(Host::Domain(domain)) => {
                let domain = domain.trim_end_matches('.').to_ascii_lowercase();
                domain == "localhost" || domain.ends_with(".localhost")
            }
            Some(Host::Ipv4(ip)) => Self::is_internal_v4(&ip),
            Some(Host::Ipv6(ip)) => Self::is_internal_v6(&ip),
        };

        if blocked {
            warn!("Blocked internal address: {}", url);
            return Err(ProbeError::BlockedHost(url.host_str().unwrap_or_default().to_string()));
        }
        Ok(())
    }

    fn is_internal_v4(ip: &Ipv4Addr) -> bool {
        ip.is_loopback() || ip.is_private() || ip.is_link_local() || ip.is_unspecified() || ip.is_broadcast()
    }

    fn is_internal_v6(ip: &Ipv6Addr) -> bool {
        if let Some(v4) = ip.to_ipv4_mapped() {
            return Self::is_internal_v4(&v4);
        }
        let first = ip.segments()[0];
        ip.is_loopback()
            || ip.is_unspecified()
            // fc00::/7 唯一本地地址
            || (first & 0xfe00) == 0xfc00
            // fe80::/10 链路本地地址
            || (first & 0xffc0) == 0xfe80
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocked(raw: &str) -> bool {
        matches!(UrlGuard::parse(raw), Err(ProbeError::BlockedHost(_)))
    }

    #[test]
    fn test_public_urls_allowed() {
        assert!(UrlGuard::parse("https://example.com/").is_ok());
        assert!(UrlGuard::parse("http://93.184.216.34/index.html").is_ok());
        assert!(UrlGuard::parse("https://[2606:2800:220:1:248:1893:25c8:1946]/").is_ok());
    }

    #[test]
    fn test_internal_hosts_blocked() {
        assert!(blocked("http://localhost:3000/"));
        assert!(blocked("http://LOCALHOST/"));
        assert!(blocked("http://app.localhost/"));
        assert!(blocked("http://127.0.0.1/"));
        assert!(blocked("http://10.1.2.3/"));
        assert!(blocked("http://192.168.0.1/"));
        assert!(blocked("http://172.16.5.4/"));
        assert!(blocked("http://169.254.169.254/latest/meta-data"));
        assert!(blocked("http://0.0.0.0/"));
        assert!(blocked("http://[::1]/"));
        assert!(blocked("http://[fd00::1]/"));
        assert!(blocked("http://[fe80::1]/"));
        assert!(blocked("http://[::ffff:127.0.0.1]/"));
    }

    #[test]
    fn test_invalid_urls() {
        assert!(matches!(UrlGuard::parse("ftp://example.com/"), Err(ProbeError::InvalidInput(_))));
        assert!(matches!(UrlGuard::parse("not a url"), Err(ProbeError::UrlError(_))));
    }
}
