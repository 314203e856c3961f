/// HTML 输入守卫：进入提取与检测前限制输入大小
use std::borrow::Cow;

use log::warn;

pub struct HtmlInputGuard;

impl HtmlInputGuard {
    /// 默认最大 HTML 长度（2MB）
    pub const MAX_HTML_LEN: usize = 2 * 1024 * 1024;

    /// 超长截断（UTF-8 边界安全）
    pub fn truncate(html: Cow<'_, str>, max_len: usize) -> Cow<'_, str> {
        if html.len() <= max_len {
            return html;
        }

        let mut cut = max_len;
        while !html.is_char_boundary(cut) {
            cut -= 1;
        }
        warn!("HTML truncated | original: {} bytes | limit: {} bytes", html.len(), max_len);

        match html {
            Cow::Borrowed(s) => Cow::Borrowed(&s[..cut]),
            Cow::Owned(mut s) => {
                s.truncate(cut);
                Cow::Owned(s)
            }
        }
    }

    /// 字节流解码为字符串后截断
    pub fn decode(body: &[u8], max_len: usize) -> String {
        let html = String::from_utf8_lossy(body);
        Self::truncate(html, max_len).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_input_untouched() {
        let html = Cow::Borrowed("<html></html>");
        assert!(matches!(HtmlInputGuard::truncate(html, 1024), Cow::Borrowed("<html></html>")));
    }

    #[test]
    fn test_truncate_on_char_boundary() {
        // "é" 占两个字节
        let html = Cow::Owned("aé".repeat(4));
        let cut = HtmlInputGuard::truncate(html, 4);
        assert_eq!(cut, "aéa");
    }

    #[test]
    fn test_decode_lossy() {
        let body = [b'<', b'p', 0xff, b'>'];
        let html = HtmlInputGuard::decode(&body, HtmlInputGuard::MAX_HTML_LEN);
        assert_eq!(html, "<p\u{fffd}>");
    }
}
