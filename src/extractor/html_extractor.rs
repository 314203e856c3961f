//! HTML页面信息提取器
//! 单次流式解析，提取元数据、标题层级、图片、链接与meta标签
use std::cell::RefCell;

use log::debug;
use lol_html::{element, text, HtmlRewriter, Settings};

// 单个属性值长度上限
const MAX_ATTR_LEN: usize = 4096;

/// 页面提取结果
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageFacts {
    pub title: Option<String>,
    pub description: Option<String>,
    pub og_image: Option<String>,
    pub canonical: Option<String>,
    pub favicon: Option<String>,
    pub has_robots: bool,
    pub has_open_graph: bool,
    pub h1_count: usize,
    pub h2_count: usize,
    pub h3_count: usize,
    pub images_total: usize,
    pub images_with_alt: usize,
    pub internal_links: usize,
    pub external_links: usize,
    pub nofollow_links: usize,
    // (小写name, content)
    pub meta_tags: Vec<(String, String)>,
}

impl PageFacts {
    pub fn images_without_alt(&self) -> usize {
        self.images_total - self.images_with_alt
    }

    fn push_meta(&mut self, name: Option<String>, property: Option<String>, content: Option<String>) {
        let content = content.filter(|c| c.len() <= MAX_ATTR_LEN);

        if let Some(property) = property.map(|p| p.to_ascii_lowercase()) {
            if property.starts_with("og:") {
                self.has_open_graph = true;
            }
            if property == "og:image" && self.og_image.is_none() {
                self.og_image = content.clone().filter(|c| !c.is_empty());
            }
        }

        let Some(name) = name.map(|n| n.to_ascii_lowercase()) else {
            return;
        };
        match name.as_str() {
            "robots" => self.has_robots = true,
            "description" if self.description.is_none() => {
                self.description = content.clone().filter(|c| !c.is_empty());
            }
            _ => {}
        }
        if let Some(content) = content {
            self.meta_tags.push((name, content));
        }
    }

    fn push_link(&mut self, rel: &str, href: String) {
        match rel.trim().to_ascii_lowercase().as_str() {
            "canonical" if self.canonical.is_none() => self.canonical = Some(href),
            "icon" | "shortcut icon" if self.favicon.is_none() => self.favicon = Some(href),
            _ => {}
        }
    }

    fn push_anchor(&mut self, href: &str, rel: Option<String>) {
        if href.starts_with("http") || href.starts_with("//") {
            self.external_links += 1;
        } else {
            self.internal_links += 1;
        }
        if rel.is_some_and(|r| r.to_ascii_lowercase().contains("nofollow")) {
            self.nofollow_links += 1;
        }
    }
}

/// 对外暴露的HTML提取器
#[derive(Debug)]
pub struct HtmlExtractor;

impl HtmlExtractor {
    /// 流式解析HTML，只提取不修改
    pub fn extract(html: &str) -> PageFacts {
        let facts = RefCell::new(PageFacts::default());
        let title = RefCell::new(String::new());
        let title_done = RefCell::new(false);

        {
            let settings = Settings {
                strict: false, // 兼容畸形HTML/大小写标签/残缺标签
                element_content_handlers: vec![
                    element!("meta", |el| {
                        facts.borrow_mut().push_meta(
                            el.get_attribute("name"),
                            el.get_attribute("property"),
                            el.get_attribute("content"),
                        );
                        Ok(())
                    }),
                    element!("link", |el| {
                        if let (Some(rel), Some(href)) = (el.get_attribute("rel"), el.get_attribute("href")) {
                            facts.borrow_mut().push_link(&rel, href);
                        }
                        Ok(())
                    }),
                    element!("a", |el| {
                        if let Some(href) = el.get_attribute("href") {
                            facts.borrow_mut().push_anchor(&href, el.get_attribute("rel"));
                        }
                        Ok(())
                    }),
                    element!("img", |el| {
                        let mut facts = facts.borrow_mut();
                        facts.images_total += 1;
                        if el.get_attribute("alt").is_some_and(|alt| !alt.trim().is_empty()) {
                            facts.images_with_alt += 1;
                        }
                        Ok(())
                    }),
                    element!("h1", |_| {
                        facts.borrow_mut().h1_count += 1;
                        Ok(())
                    }),
                    element!("h2", |_| {
                        facts.borrow_mut().h2_count += 1;
                        Ok(())
                    }),
                    element!("h3", |_| {
                        facts.borrow_mut().h3_count += 1;
                        Ok(())
                    }),
                    // 只取第一个 <title>
                    text!("title", |chunk| {
                        if !*title_done.borrow() {
                            title.borrow_mut().push_str(chunk.as_str());
                            if chunk.last_in_text_node() {
                                *title_done.borrow_mut() = true;
                            }
                        }
                        Ok(())
                    }),
                ],
                ..Settings::default()
            };

            let mut rewriter = HtmlRewriter::new(settings, |_: &[u8]| {});
            if let Err(e) = rewriter.write(html.as_bytes()) {
                debug!("HTML rewriter write failed: {}", e);
            }
            if let Err(e) = rewriter.end() {
                debug!("HTML rewriter end failed: {}", e);
            }
        }

        let mut facts = facts.into_inner();
        let title = title.into_inner();
        let title = title.trim();
        if !title.is_empty() {
            facts.title = Some(title.to_string());
        }
        facts
    }
}
