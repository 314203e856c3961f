//! 签名编译器核心
//! 负责校验签名表不变量，并将原始签名编译为可执行模式

use std::time::Instant;

use log::debug;
use regex::Regex;
use rustc_hash::FxHashSet;

use super::pattern::{CompiledSignature, Matcher, SignatureTable};
use crate::error::{ProbeError, ProbeResult};
use crate::rule::Signature;

/// 签名编译器
pub struct SignatureCompiler;

impl SignatureCompiler {
    /// 编译签名表
    /// 校验：名称唯一且非空、分类非空、至少一条模式、基础置信度不超过100
    pub fn compile(signatures: &[Signature]) -> ProbeResult<SignatureTable> {
        let start = Instant::now();
        let mut seen = FxHashSet::default();
        let mut compiled = Vec::with_capacity(signatures.len());
        let mut pattern_count = 0usize;

        for sig in signatures {
            Self::validate(sig)?;
            if !seen.insert(sig.name.as_str()) {
                return Err(ProbeError::RuleParseError(format!(
                    "duplicate signature name: {}",
                    sig.name
                )));
            }
            pattern_count += sig.patterns.len();
            compiled.push(Self::compile_signature(sig)?);
        }

        debug!(
            "Signature table compiled | signatures: {} | patterns: {} | time: {:?}",
            compiled.len(),
            pattern_count,
            start.elapsed()
        );

        Ok(SignatureTable::from_compiled(compiled))
    }

    fn validate(sig: &Signature) -> ProbeResult<()> {
        if sig.name.trim().is_empty() {
            return Err(ProbeError::RuleParseError("signature with empty name".to_string()));
        }
        if sig.categories.is_empty() {
            return Err(ProbeError::RuleParseError(format!(
                "signature {} has no category",
                sig.name
            )));
        }
        if sig.patterns.is_empty() {
            return Err(ProbeError::RuleParseError(format!(
                "signature {} has no pattern",
                sig.name
            )));
        }
        if sig.confidence > 100 {
            return Err(ProbeError::RuleParseError(format!(
                "signature {} confidence {} exceeds 100",
                sig.name, sig.confidence
            )));
        }
        Ok(())
    }

    /// 编译单个签名
    fn compile_signature(sig: &Signature) -> ProbeResult<CompiledSignature> {
        let matchers = sig
            .patterns
            .iter()
            .map(Matcher::from_spec)
            .collect::<ProbeResult<Vec<_>>>()?;
        let exclude = sig
            .exclude
            .iter()
            .map(Matcher::from_spec)
            .collect::<ProbeResult<Vec<_>>>()?;
        let version = sig.version.as_deref().map(Regex::new).transpose()?;

        Ok(CompiledSignature {
            name: sig.name.clone(),
            matchers,
            base_confidence: sig.confidence,
            categories: sig.categories.clone(),
            version,
            exclude,
            requires_all: sig.requires_all,
            is_framework: sig.is_framework(),
        })
    }
}
