//! 检测结果更新工具
//! 负责合并多来源结果（取最大置信度、保留版本）与上下文加成

use rustc_hash::FxHashMap;

use crate::result::{DetectionMethod, Technology};

/// 检测结果更新工具
pub struct DetectionUpdater;

impl DetectionUpdater {
    /// 按名称合并，保持首次出现的位置
    /// 同名不同来源 -> merged；同名同来源 -> 仅取最大置信度
    pub fn merge<I>(batches: I) -> Vec<Technology>
    where
        I: IntoIterator<Item = Vec<Technology>>,
    {
        let mut merged: Vec<Technology> = Vec::new();
        let mut index: FxHashMap<String, usize> = FxHashMap::default();

        for tech in batches.into_iter().flatten() {
            match index.get(&tech.name) {
                Some(&pos) => Self::update(&mut merged[pos], tech),
                None => {
                    index.insert(tech.name.clone(), merged.len());
                    merged.push(tech);
                }
            }
        }

        merged
    }

    /// 更新已有条目
    fn update(existing: &mut Technology, incoming: Technology) {
        let method = if existing.detection_method == incoming.detection_method {
            existing.detection_method
        } else {
            DetectionMethod::Merged
        };
        let version = existing.version.take().or_else(|| incoming.version.clone());

        if incoming.confidence > existing.confidence {
            existing.confidence = incoming.confidence;
            existing.categories = incoming.categories;
        }
        existing.version = version;
        existing.detection_method = method;
    }

    /// 置信度降序（稳定排序，同分保持首次出现顺序）
    pub fn sort_by_confidence(technologies: &mut [Technology]) {
        technologies.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    }

    /// 对指定技术叠加置信度（上限100）
    pub fn boost(technologies: &mut [Technology], name: &str, bonus: f64) -> bool {
        match technologies.iter_mut().find(|t| t.name == name) {
            Some(tech) => {
                tech.confidence = (tech.confidence + bonus).min(100.0);
                true
            }
            None => false,
        }
    }
}
