//! 分类常量与旧版分组映射

use serde::{Deserialize, Serialize};

pub const WEB_FRAMEWORKS: &str = "Web frameworks";
pub const JAVASCRIPT_FRAMEWORKS: &str = "JavaScript frameworks";
pub const JAVASCRIPT_LIBRARIES: &str = "JavaScript libraries";
pub const CSS_FRAMEWORKS: &str = "CSS frameworks";
pub const UI_FRAMEWORKS: &str = "UI frameworks";
pub const DEVELOPMENT_TOOLS: &str = "Development tools";
pub const CMS: &str = "CMS";
pub const ANALYTICS: &str = "Analytics";
pub const CDN: &str = "CDN";
pub const WEB_SERVERS: &str = "Web servers";
pub const PAAS: &str = "PaaS";
pub const PROGRAMMING_LANGUAGES: &str = "Programming languages";
pub const DATABASES: &str = "Databases";
pub const ECOMMERCE: &str = "Ecommerce";
pub const MARKETING_AUTOMATION: &str = "Marketing automation";
pub const SECURITY: &str = "Security";

/// 框架类分类，命中任一即进入第一轮匹配
pub const FRAMEWORK_CATEGORIES: &[&str] = &[WEB_FRAMEWORKS, JAVASCRIPT_FRAMEWORKS];

#[inline]
pub fn is_framework_category(category: &str) -> bool {
    FRAMEWORK_CATEGORIES.contains(&category)
}

/// 旧版十分组
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegacyBucket {
    Frameworks,
    Cms,
    Analytics,
    Libraries,
    Cdn,
    Servers,
    Languages,
    Databases,
    Ecommerce,
    Marketing,
}

/// 分类 -> 旧版分组 映射表
const LEGACY_CATEGORY_MAP: &[(&str, LegacyBucket)] = &[
    (WEB_FRAMEWORKS, LegacyBucket::Frameworks),
    (JAVASCRIPT_FRAMEWORKS, LegacyBucket::Frameworks),
    (JAVASCRIPT_LIBRARIES, LegacyBucket::Libraries),
    (CMS, LegacyBucket::Cms),
    (ANALYTICS, LegacyBucket::Analytics),
    (CDN, LegacyBucket::Cdn),
    (WEB_SERVERS, LegacyBucket::Servers),
    (PAAS, LegacyBucket::Servers),
    (PROGRAMMING_LANGUAGES, LegacyBucket::Languages),
    (DATABASES, LegacyBucket::Databases),
    (ECOMMERCE, LegacyBucket::Ecommerce),
    (MARKETING_AUTOMATION, LegacyBucket::Marketing),
];

impl LegacyBucket {
    /// 查找分类对应的旧版分组，未映射返回None
    pub fn from_category(category: &str) -> Option<Self> {
        LEGACY_CATEGORY_MAP
            .iter()
            .find(|(name, _)| *name == category)
            .map(|(_, bucket)| *bucket)
    }
}
