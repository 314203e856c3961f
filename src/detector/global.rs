//! 全局检测器单例管理
use std::sync::Arc;

use log::info;
use once_cell::sync::{Lazy, OnceCell};
use rustc_hash::FxHashMap;

use super::detector::TechDetector;
use crate::compiler::{SignatureCompiler, SignatureTable};
use crate::config::RuleConfig;
use crate::error::{ProbeError, ProbeResult};
use crate::result::DetectResult;
use crate::rule::builtin_signatures;

/// 内置签名表：首次使用时编译一次
static BUILTIN_TABLE: Lazy<Arc<SignatureTable>> = Lazy::new(|| {
    let table = SignatureCompiler::compile(&builtin_signatures())
        .expect("builtin signature table must compile");
    info!("Builtin signature table ready | signatures: {}", table.len());
    Arc::new(table)
});

/// 全局检测器实例
static GLOBAL_DETECTOR: OnceCell<TechDetector> = OnceCell::new();

pub(crate) fn builtin_table() -> Arc<SignatureTable> {
    Arc::clone(&BUILTIN_TABLE)
}

/// 带规则配置初始化全局检测器
/// 已安装内置检测器时再次以内置配置初始化视为成功，其余重复初始化返回错误
pub fn init_global_detector(config: &RuleConfig) -> ProbeResult<()> {
    if let Some(installed) = GLOBAL_DETECTOR.get() {
        return ensure_compatible(installed, config);
    }

    let detector = TechDetector::new(config)
        .map_err(|e| ProbeError::DetectorInitError(e.to_string()))?;
    let signatures = detector.table().len();
    match GLOBAL_DETECTOR.set(detector) {
        Ok(()) => {
            info!("Global detector initialized | signatures: {}", signatures);
            Ok(())
        }
        // 并发初始化时已被其他调用方抢先安装
        Err(_) => match GLOBAL_DETECTOR.get() {
            Some(installed) => ensure_compatible(installed, config),
            None => Err(ProbeError::DetectorInitError("global detector set failed".to_string())),
        },
    }
}

fn ensure_compatible(installed: &TechDetector, config: &RuleConfig) -> ProbeResult<()> {
    let installed_builtin = std::ptr::eq(installed.table(), &**BUILTIN_TABLE);
    if config.is_builtin() && installed_builtin {
        return Ok(());
    }
    Err(ProbeError::DetectorInitError(format!(
        "global detector already initialized ({} signatures), requested rules ignored",
        installed.table().len()
    )))
}

/// 获取全局检测器
pub fn get_global_detector() -> ProbeResult<&'static TechDetector> {
    GLOBAL_DETECTOR
        .get()
        .ok_or_else(|| ProbeError::DetectorNotInitialized("call init_global_detector first".to_string()))
}

/// 使用全局检测器检测；未初始化时使用内置签名表
pub fn detect(html: &str, headers: &FxHashMap<String, String>) -> DetectResult {
    GLOBAL_DETECTOR
        .get_or_init(TechDetector::builtin)
        .detect(html, headers)
}
