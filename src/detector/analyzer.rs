//! 检测分析器：HTML模式匹配与Header规则匹配
use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::compiler::{CompiledSignature, MatchInput};
use crate::result::{DetectionMethod, Technology};
use crate::rule::HeaderRule;

/// 框架签名阈值
pub const FRAMEWORK_THRESHOLD: f64 = 0.2;
/// 其余签名阈值
pub const GENERAL_THRESHOLD: f64 = 0.3;
/// 框架置信度系数
pub const FRAMEWORK_BONUS: f64 = 1.2;
/// requires_all 签名阈值
pub const REQUIRE_ALL_THRESHOLD: f64 = 1.0;

/// 单轮匹配策略
#[derive(Debug, Clone, Copy)]
pub struct PassPolicy {
    pub label: &'static str,
    pub threshold: f64,
    pub bonus: f64,
}

pub const FRAMEWORK_PASS: PassPolicy = PassPolicy {
    label: "Framework",
    threshold: FRAMEWORK_THRESHOLD,
    bonus: FRAMEWORK_BONUS,
};

pub const GENERAL_PASS: PassPolicy = PassPolicy {
    label: "Pattern",
    threshold: GENERAL_THRESHOLD,
    bonus: 1.0,
};

/// 匹配成功通用处理器 - 标准日志输出
#[inline(always)]
fn handle_match_success(analyzer_type: &str, tech: &Technology, ratio: f64, rule_desc: &str) {
    debug!(
        "[{}]匹配成功 | 技术: {} | 命中比例: {:.2} | 置信度: {:.1} | 版本: {:?} | 规则: {}",
        analyzer_type, tech.name, ratio, tech.confidence, tech.version, rule_desc
    );
}

/// HTML模式分析器
pub struct PatternAnalyzer;

impl PatternAnalyzer {
    /// 对一组签名执行单轮匹配，跳过 `skip` 中的名称
    pub fn analyze<'s, I>(
        signatures: I,
        input: &MatchInput,
        policy: &PassPolicy,
        skip: &FxHashSet<&str>,
    ) -> Vec<Technology>
    where
        I: IntoIterator<Item = &'s CompiledSignature>,
    {
        signatures
            .into_iter()
            .filter(|sig| {
                let skipped = skip.contains(sig.name.as_str());
                if skipped {
                    debug!("[{}]跳过被压制的技术 | 技术: {}", policy.label, sig.name);
                }
                !skipped
            })
            .filter_map(|sig| Self::evaluate(sig, input, policy))
            .collect()
    }

    /// 单个签名评估：比例 -> 阈值 -> 否决 -> 版本 -> 置信度
    pub fn evaluate(sig: &CompiledSignature, input: &MatchInput, policy: &PassPolicy) -> Option<Technology> {
        let ratio = sig.match_ratio(input);
        let threshold = if sig.requires_all {
            REQUIRE_ALL_THRESHOLD
        } else {
            policy.threshold
        };
        if ratio <= 0.0 || ratio < threshold {
            return None;
        }

        if let Some(veto) = sig.vetoed_by(input) {
            debug!(
                "[{}]排除规则命中，放弃检测 | 技术: {} | 规则: {}",
                policy.label,
                sig.name,
                veto.describe()
            );
            return None;
        }

        let confidence = (f64::from(sig.base_confidence) * ratio * policy.bonus).min(100.0);
        let tech = Technology::new(
            sig.name.clone(),
            confidence,
            sig.categories.clone(),
            DetectionMethod::Pattern,
        )
        .with_version(sig.extract_version(input));

        handle_match_success(
            policy.label,
            &tech,
            ratio,
            &format!("{}/{} patterns", sig.matched_count(input), sig.matchers.len()),
        );
        Some(tech)
    }
}

/// Header分析器
pub struct HeaderAnalyzer;

impl HeaderAnalyzer {
    /// 按规则表顺序匹配小写键的Header映射
    pub fn analyze(rules: &[HeaderRule], headers: &FxHashMap<String, String>) -> Vec<Technology> {
        if headers.is_empty() {
            return Vec::new();
        }

        let mut detected = Vec::new();
        for rule in rules {
            let Some(value) = headers.get(rule.header) else {
                continue;
            };
            let lowered = value.to_lowercase();
            if !rule.matches(&lowered) {
                continue;
            }

            debug!(
                "[Header]匹配成功 | 技术: {} | 匹配项: {} | 内容: {} | 规则: {}",
                rule.name,
                rule.header,
                value,
                rule.describe()
            );
            detected.push(Technology::new(
                rule.name,
                f64::from(rule.confidence),
                rule.categories.iter().map(|c| c.to_string()).collect(),
                DetectionMethod::Header,
            ));
        }
        detected
    }
}
