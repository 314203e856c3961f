//! 旧版十分组技术视图

use serde::{Deserialize, Serialize};

use super::detect_result::DetectResult;
use crate::rule::LegacyBucket;

/// 旧版分组（兼容老调用方）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyTechnologies {
    pub frameworks: Vec<String>,
    pub cms: Vec<String>,
    pub analytics: Vec<String>,
    pub libraries: Vec<String>,
    pub cdn: Vec<String>,
    pub servers: Vec<String>,
    pub languages: Vec<String>,
    pub databases: Vec<String>,
    pub ecommerce: Vec<String>,
    pub marketing: Vec<String>,
}

impl LegacyTechnologies {
    /// 按分类映射到分组，同组内按名称去重；未映射分类直接忽略
    pub fn from_result(result: &DetectResult) -> Self {
        let mut legacy = Self::default();
        for tech in &result.technologies {
            for category in &tech.categories {
                if let Some(bucket) = LegacyBucket::from_category(category) {
                    legacy.push(bucket, &tech.name);
                }
            }
        }
        legacy
    }

    /// 追加名称（已存在则跳过）
    pub fn push(&mut self, bucket: LegacyBucket, name: &str) {
        let list = self.bucket_mut(bucket);
        if !list.iter().any(|n| n == name) {
            list.push(name.to_string());
        }
    }

    pub fn bucket(&self, bucket: LegacyBucket) -> &[String] {
        match bucket {
            LegacyBucket::Frameworks => &self.frameworks,
            LegacyBucket::Cms => &self.cms,
            LegacyBucket::Analytics => &self.analytics,
            LegacyBucket::Libraries => &self.libraries,
            LegacyBucket::Cdn => &self.cdn,
            LegacyBucket::Servers => &self.servers,
            LegacyBucket::Languages => &self.languages,
            LegacyBucket::Databases => &self.databases,
            LegacyBucket::Ecommerce => &self.ecommerce,
            LegacyBucket::Marketing => &self.marketing,
        }
    }

    fn bucket_mut(&mut self, bucket: LegacyBucket) -> &mut Vec<String> {
        match bucket {
            LegacyBucket::Frameworks => &mut self.frameworks,
            LegacyBucket::Cms => &mut self.cms,
            LegacyBucket::Analytics => &mut self.analytics,
            LegacyBucket::Libraries => &mut self.libraries,
            LegacyBucket::Cdn => &mut self.cdn,
            LegacyBucket::Servers => &mut self.servers,
            LegacyBucket::Languages => &mut self.languages,
            LegacyBucket::Databases => &mut self.databases,
            LegacyBucket::Ecommerce => &mut self.ecommerce,
            LegacyBucket::Marketing => &mut self.marketing,
        }
    }

    /// 全部分组为空
    pub fn is_empty(&self) -> bool {
        self.frameworks.is_empty()
            && self.cms.is_empty()
            && self.analytics.is_empty()
            && self.libraries.is_empty()
            && self.cdn.is_empty()
            && self.servers.is_empty()
            && self.languages.is_empty()
            && self.databases.is_empty()
            && self.ecommerce.is_empty()
            && self.marketing.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{DetectionMethod, DetectionStats, Technology};

    fn result_of(techs: &[(&str, &[&str])]) -> DetectResult {
        let list = techs
            .iter()
            .map(|(name, cats)| {
                Technology::new(
                    *name,
                    80.0,
                    cats.iter().map(|c| c.to_string()).collect(),
                    DetectionMethod::Pattern,
                )
            })
            .collect();
        DetectResult::from_technologies(list, DetectionStats::default())
    }

    #[test]
    fn test_bucket_mapping_and_dedupe() {
        let result = result_of(&[
            ("Next.js", &["Web frameworks", "JavaScript frameworks"]),
            ("Vercel", &["PaaS", "CDN"]),
            ("Nginx", &["Web servers"]),
            ("Tailwind CSS", &["CSS frameworks"]),
        ]);
        let legacy = LegacyTechnologies::from_result(&result);
        assert_eq!(legacy.frameworks, vec!["Next.js"]);
        assert_eq!(legacy.servers, vec!["Vercel", "Nginx"]);
        assert_eq!(legacy.cdn, vec!["Vercel"]);
        // CSS frameworks 未映射
        assert!(legacy.libraries.is_empty());
        assert!(legacy.marketing.is_empty());
    }

    #[test]
    fn test_empty() {
        let legacy = LegacyTechnologies::from_result(&DetectResult::empty());
        assert!(legacy.is_empty());
        assert_eq!(legacy, LegacyTechnologies::default());
    }

    #[test]
    fn test_push_and_serialize() {
        let mut legacy = LegacyTechnologies::default();
        legacy.push(LegacyBucket::Servers, "Powered by: Express");
        legacy.push(LegacyBucket::Servers, "Powered by: Express");
        assert_eq!(legacy.bucket(LegacyBucket::Servers).len(), 1);

        let json = serde_json::to_value(&legacy).unwrap();
        assert_eq!(json["servers"][0], "Powered by: Express");
        assert!(json["cms"].as_array().unwrap().is_empty());
    }
}
