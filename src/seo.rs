//! SEO 评分：基于页面提取结果计算得分、问题与建议

use log::debug;
use serde::{Deserialize, Serialize};

use crate::extractor::PageFacts;

const TITLE_OPTIMAL: std::ops::RangeInclusive<usize> = 30..=60;
const DESCRIPTION_OPTIMAL: std::ops::RangeInclusive<usize> = 120..=160;
const MAX_SCORE: i32 = 100;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextCheck {
    pub exists: bool,
    // 字符数
    pub length: usize,
    pub optimal: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingStats {
    pub h1_count: usize,
    pub h2_count: usize,
    pub h3_count: usize,
    pub has_h1: bool,
    pub multiple_h1: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageStats {
    pub total: usize,
    pub with_alt: usize,
    pub without_alt: usize,
    // 百分比
    pub alt_coverage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStats {
    pub internal: usize,
    pub external: usize,
    pub nofollow: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoDetails {
    pub title: TextCheck,
    pub description: TextCheck,
    pub headings: HeadingStats,
    pub images: ImageStats,
    pub links: LinkStats,
}

/// SEO 分析结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoAnalysis {
    pub score: u8,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
    pub details: SeoDetails,
}

impl SeoAnalysis {
    /// 计算评分，结果限制在 [0, 100]
    pub fn analyze(facts: &PageFacts) -> Self {
        let mut report = Self::default();
        let mut score: i32 = 0;

        score += report.check_title(facts.title.as_deref());
        score += report.check_description(facts.description.as_deref());
        score += report.check_headings(facts);
        score += report.check_images(facts);
        score += report.check_links(facts);

        if facts.has_robots {
            score += 5;
        } else {
            report.recommend("Consider adding a robots meta tag to control indexing");
        }
        if facts.canonical.is_some() {
            score += 5;
        } else {
            report.recommend("Add a canonical URL to avoid duplicate content");
        }
        if facts.has_open_graph {
            score += 10;
        } else {
            report.recommend("Add Open Graph tags to improve social sharing");
        }

        report.score = score.clamp(0, MAX_SCORE) as u8;
        debug!(
            "SEO analysis finished | score: {} | issues: {}",
            report.score,
            report.issues.len()
        );
        report
    }

    fn issue(&mut self, issue: String) {
        self.issues.push(issue);
    }

    fn recommend(&mut self, recommendation: &str) {
        self.recommendations.push(recommendation.to_string());
    }

    fn check_title(&mut self, title: Option<&str>) -> i32 {
        let Some(title) = title.filter(|t| !t.is_empty()) else {
            self.issue("Missing title".to_string());
            self.recommend("Add a unique, descriptive title");
            return 0;
        };

        let length = title.chars().count();
        self.details.title = TextCheck {
            exists: true,
            length,
            optimal: TITLE_OPTIMAL.contains(&length),
        };
        if self.details.title.optimal {
            return 15;
        }
        let verdict = if length < *TITLE_OPTIMAL.start() { "short" } else { "long" };
        self.issue(format!("Title too {} ({} characters)", verdict, length));
        self.recommend("Keep the title between 30 and 60 characters");
        5
    }

    fn check_description(&mut self, description: Option<&str>) -> i32 {
        let Some(description) = description.filter(|d| !d.is_empty()) else {
            self.issue("Missing meta description".to_string());
            self.recommend("Add a unique meta description");
            return 0;
        };

        let length = description.chars().count();
        self.details.description = TextCheck {
            exists: true,
            length,
            optimal: DESCRIPTION_OPTIMAL.contains(&length),
        };
        if self.details.description.optimal {
            return 15;
        }
        let verdict = if length < *DESCRIPTION_OPTIMAL.start() { "short" } else { "long" };
        self.issue(format!("Description too {} ({} characters)", verdict, length));
        self.recommend("Keep the description between 120 and 160 characters");
        5
    }

    fn check_headings(&mut self, facts: &PageFacts) -> i32 {
        self.details.headings = HeadingStats {
            h1_count: facts.h1_count,
            h2_count: facts.h2_count,
            h3_count: facts.h3_count,
            has_h1: facts.h1_count > 0,
            multiple_h1: facts.h1_count > 1,
        };

        let mut score = 0;
        if self.details.headings.has_h1 {
            score += 10;
            if self.details.headings.multiple_h1 {
                self.issue("Multiple H1 tags detected".to_string());
                self.recommend("Use a single H1 tag per page");
                score -= 5;
            }
        } else {
            self.issue("No H1 tag found".to_string());
            self.recommend("Add a unique, descriptive H1 tag");
        }

        if facts.h2_count > 0 {
            score += 10;
        } else {
            self.recommend("Add H2 tags to structure the content");
        }
        score
    }

    fn check_images(&mut self, facts: &PageFacts) -> i32 {
        let total = facts.images_total;
        let with_alt = facts.images_with_alt;
        self.details.images = ImageStats {
            total,
            with_alt,
            without_alt: facts.images_without_alt(),
            alt_coverage: 0.0,
        };
        if total == 0 {
            return 0;
        }

        let coverage = with_alt as f64 / total as f64 * 100.0;
        self.details.images.alt_coverage = coverage;
        if with_alt == total {
            15
        } else if coverage >= 80.0 {
            self.recommend("Add alt attributes to the remaining images");
            10
        } else {
            self.issue(format!("{} images without alt attribute", facts.images_without_alt()));
            self.recommend("Add descriptive alt attributes to every image");
            5
        }
    }

    fn check_links(&mut self, facts: &PageFacts) -> i32 {
        self.details.links = LinkStats {
            internal: facts.internal_links,
            external: facts.external_links,
            nofollow: facts.nofollow_links,
        };
        if facts.internal_links > 0 {
            10
        } else {
            self.recommend("Add internal links to improve navigation");
            0
        }
    }
}
