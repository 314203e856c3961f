//! 响应头检测规则
//! 固定子串/存在性规则，命中即按固定置信度产出技术

use super::category::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMatch {
    /// 值包含子串（值已小写）
    Contains(&'static str),
    /// Header存在即命中
    Exists,
}

#[derive(Debug, Clone, Copy)]
pub struct HeaderRule {
    /// 小写Header名
    pub header: &'static str,
    pub matcher: HeaderMatch,
    pub name: &'static str,
    pub confidence: u8,
    pub categories: &'static [&'static str],
}

impl HeaderRule {
    const fn contains(
        header: &'static str,
        needle: &'static str,
        name: &'static str,
        confidence: u8,
        categories: &'static [&'static str],
    ) -> Self {
        Self { header, matcher: HeaderMatch::Contains(needle), name, confidence, categories }
    }

    const fn exists(
        header: &'static str,
        name: &'static str,
        confidence: u8,
        categories: &'static [&'static str],
    ) -> Self {
        Self { header, matcher: HeaderMatch::Exists, name, confidence, categories }
    }

    /// 对单个Header值执行匹配（value须为小写）
    #[inline]
    pub fn matches(&self, value: &str) -> bool {
        match self.matcher {
            HeaderMatch::Contains(needle) => value.contains(needle),
            HeaderMatch::Exists => true,
        }
    }

    pub fn describe(&self) -> String {
        match self.matcher {
            HeaderMatch::Contains(needle) => format!("{} contains: {}", self.header, needle),
            HeaderMatch::Exists => format!("{} exists", self.header),
        }
    }
}

pub static HEADER_RULES: &[HeaderRule] = &[
    // server
    HeaderRule::contains("server", "nginx", "Nginx", 95, &[WEB_SERVERS]),
    HeaderRule::contains("server", "apache", "Apache", 95, &[WEB_SERVERS]),
    HeaderRule::contains("server", "microsoft-iis", "IIS", 95, &[WEB_SERVERS]),
    HeaderRule::contains("server", "litespeed", "LiteSpeed", 95, &[WEB_SERVERS]),
    HeaderRule::contains("server", "openresty", "OpenResty", 95, &[WEB_SERVERS]),
    HeaderRule::contains("server", "caddy", "Caddy", 95, &[WEB_SERVERS]),
    HeaderRule::contains("server", "cloudflare", "Cloudflare", 95, &[CDN]),
    HeaderRule::contains("server", "vercel", "Vercel", 95, &[PAAS]),
    HeaderRule::contains("server", "netlify", "Netlify", 95, &[PAAS]),
    HeaderRule::contains("server", "github.com", "GitHub Pages", 90, &[PAAS]),
    // x-powered-by
    HeaderRule::contains("x-powered-by", "express", "Express", 90, &[WEB_FRAMEWORKS]),
    HeaderRule::contains("x-powered-by", "php", "PHP", 90, &[PROGRAMMING_LANGUAGES]),
    HeaderRule::contains("x-powered-by", "asp.net", "ASP.NET", 90, &[WEB_FRAMEWORKS]),
    HeaderRule::contains("x-powered-by", "next.js", "Next.js", 90, &[WEB_FRAMEWORKS]),
    HeaderRule::contains("x-powered-by", "nuxt", "Nuxt.js", 90, &[WEB_FRAMEWORKS]),
    // CDN / 托管平台
    HeaderRule::exists("cf-ray", "Cloudflare", 95, &[CDN]),
    HeaderRule::exists("x-vercel-id", "Vercel", 95, &[PAAS]),
    HeaderRule::exists("x-nf-request-id", "Netlify", 95, &[PAAS]),
    HeaderRule::exists("x-github-request-id", "GitHub Pages", 90, &[PAAS]),
    HeaderRule::contains("x-served-by", "cache-", "Fastly", 85, &[CDN]),
    HeaderRule::contains("x-cache", "cloudfront", "Amazon CloudFront", 90, &[CDN]),
    HeaderRule::exists("x-amz-cf-id", "Amazon CloudFront", 95, &[CDN]),
    // 平台专属
    HeaderRule::exists("x-shopify-stage", "Shopify", 95, &[ECOMMERCE]),
    HeaderRule::exists("x-drupal-cache", "Drupal", 95, &[CMS]),
    HeaderRule::contains("x-generator", "drupal", "Drupal", 95, &[CMS]),
];
