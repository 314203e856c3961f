//! 全局错误类型定义

use http::header::ToStrError;
use regex::Error as RegexError;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;
use thiserror::Error;
use url::ParseError as UrlParseError;

#[derive(Error, Debug)]
pub enum ProbeError {
    // 规则相关错误
    #[error("签名规则加载失败：{0}")]
    RuleLoadError(String),
    #[error("签名规则解析失败：{0}")]
    RuleParseError(String),

    // 编译相关错误
    #[error("正则编译失败：{0}")]
    RegexCompileError(#[from] RegexError),

    // 检测相关错误
    #[error("检测器未初始化: {0}")]
    DetectorNotInitialized(String),
    #[error("检测器初始化失败: {0}")]
    DetectorInitError(String),

    // 网络相关错误
    #[error("网络请求失败：{0}")]
    NetworkError(String),
    #[error("请求超时：{0}")]
    Timeout(String),
    #[error("HTTP状态码异常：{status} ({url})")]
    HttpStatus { status: u16, url: String },
    #[error("禁止访问内部地址：{0}")]
    BlockedHost(String),
    #[error("Header 字段转字符串失败：{0}")]
    HeaderToStrError(#[from] ToStrError),

    // 序列化/反序列化错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
    #[error("URL解析失败：{0}")]
    UrlError(#[from] UrlParseError),
    #[error("无效输入：{0}")]
    InvalidInput(String),
}

// 全局Result类型
pub type ProbeResult<T> = Result<T, ProbeError>;
