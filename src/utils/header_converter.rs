//! Header格式转换工具
//! 将不同来源的Header统一为小写键的单值映射

use std::collections::HashMap;
use std::time::Instant;

use http::header::HeaderMap;
use log::{debug, warn};
use rustc_hash::FxHashMap;

// Header迭代上限
const MAX_HEADER_ITERATIONS: usize = 1000;

/// Header转换工具
pub struct HeaderConverter;

impl HeaderConverter {
    /// HeaderMap -> 小写键单值映射
    /// 同名多值取第一个非空值；非UTF-8值忽略
    pub fn from_header_map(header_map: &HeaderMap) -> FxHashMap<String, String> {
        let start = Instant::now();
        let mut map: FxHashMap<String, String> = FxHashMap::default();

        for (iter_count, (key, value)) in header_map.iter().enumerate() {
            if iter_count >= MAX_HEADER_ITERATIONS {
                warn!("Header iteration exceeded {}, truncated", MAX_HEADER_ITERATIONS);
                break;
            }

            let value_str = match value.to_str() {
                Ok(v) => v.trim(),
                Err(e) => {
                    debug!("Skip non-UTF-8 header value | header: {} | error: {}", key, e);
                    continue;
                }
            };
            if value_str.is_empty() {
                continue;
            }

            // HeaderName 本身已是小写
            map.entry(key.as_str().to_string())
                .or_insert_with(|| value_str.to_string());
        }

        debug!(
            "Header conversion finished | time: {:?} | entries: {}",
            start.elapsed(),
            map.len()
        );

        map
    }

    /// 任意字符串映射 -> 小写键单值映射
    pub fn normalize<S: std::hash::BuildHasher>(
        headers: &HashMap<String, String, S>,
    ) -> FxHashMap<String, String> {
        headers
            .iter()
            .take(MAX_HEADER_ITERATIONS)
            .filter(|(_, v)| !v.trim().is_empty())
            .map(|(k, v)| (k.trim().to_lowercase(), v.trim().to_string()))
            .collect()
    }
}
