//! 页面基础元数据
use log::debug;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::extractor::PageFacts;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    // canonical 或页面地址
    pub url: String,
    // 已解析为绝对地址
    pub favicon: Option<String>,
}

impl PageMetadata {
    pub fn from_facts(facts: &PageFacts, page_url: &Url) -> Self {
        let favicon = facts.favicon.as_deref().and_then(|href| match page_url.join(href) {
            Ok(resolved) => Some(resolved.to_string()),
            Err(e) => {
                debug!("Unresolvable favicon href {}: {}", href, e);
                None
            }
        });

        Self {
            title: facts.title.clone(),
            description: facts.description.clone(),
            image: facts.og_image.clone(),
            url: facts
                .canonical
                .clone()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| page_url.to_string()),
            favicon,
        }
    }
}
