//! 版本提取工具模块
//! 从版本正则的捕获结果中提取合法的技术版本号

use regex::Captures;

/// 版本提取工具类
pub struct VersionExtractor;

impl VersionExtractor {
    /// 取第一个捕获组作为版本号
    ///
    /// # 返回值
    /// - `Some(String)`: 去除首尾空白后的非空版本号
    /// - `None`: 无捕获组 / 捕获组未参与匹配 / 值为空白
    pub fn first_group(captures: &Captures) -> Option<String> {
        captures
            .get(1)
            .map(|m| m.as_str().trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_extract_first_group() {
        let regex = Regex::new(r#"ng-version="([^"]+)""#).unwrap();
        let captures = regex.captures(r#"<app-root ng-version="17.0.1">"#).unwrap();
        assert_eq!(VersionExtractor::first_group(&captures), Some("17.0.1".to_string()));
    }

    #[test]
    fn test_extract_optional_group_missing() {
        // 分组未参与匹配，应返回 None
        let regex = Regex::new(r#"jquery(?:[.-]([\d.]+))?"#).unwrap();
        let captures = regex.captures("jquery.min.js").unwrap();
        assert_eq!(VersionExtractor::first_group(&captures), None);
    }

    #[test]
    fn test_extract_no_group() {
        let regex = Regex::new(r#"wp-content"#).unwrap();
        let captures = regex.captures("/wp-content/themes/").unwrap();
        assert_eq!(VersionExtractor::first_group(&captures), None);
    }

    #[test]
    fn test_extract_trims_whitespace() {
        let regex = Regex::new(r#"Vue\.js v(\s*[\d.]+\s*)"#).unwrap();
        let captures = regex.captures("Vue.js v 3.4.21 ").unwrap();
        assert_eq!(VersionExtractor::first_group(&captures), Some("3.4.21".to_string()));
    }

    #[test]
    fn test_extract_blank_group() {
        let regex = Regex::new(r#"version=(\s*)"#).unwrap();
        let captures = regex.captures("version=   ").unwrap();
        assert_eq!(VersionExtractor::first_group(&captures), None);
    }
}
