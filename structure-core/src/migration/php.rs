//! PHP 源码的轻量扫描工具
//!
//! 只识别字符串（单引号、双引号、heredoc/nowdoc）和注释，用来定位调用参数、
//! 方法体和语句边界。所有返回的位置都落在 ASCII 字节上，可以安全切片。

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static UP_METHOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bfunction\s+up\s*\(").expect("Valid up() method regex pattern")
});

/// heredoc / nowdoc 的位置信息
struct Heredoc {
    body_start: usize,
    body_end: usize,
    end: usize,
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn line_end(text: &str, pos: usize) -> usize {
    text[pos..].find('\n').map_or(text.len(), |n| pos + n)
}

fn heredoc_at(text: &str, pos: usize) -> Option<Heredoc> {
    let bytes = text.as_bytes();
    if !bytes.get(pos..)?.starts_with(b"<<<") {
        return None;
    }

    let mut i = pos + 3;
    while matches!(bytes.get(i), Some(b' ' | b'\t')) {
        i += 1;
    }
    let quote = match bytes.get(i) {
        Some(&q @ (b'\'' | b'"')) => {
            i += 1;
            Some(q)
        }
        _ => None,
    };
    let label_start = i;
    while bytes.get(i).copied().is_some_and(is_ident_byte) {
        i += 1;
    }
    if i == label_start {
        return None;
    }
    let label = &text[label_start..i];
    if let Some(q) = quote {
        if bytes.get(i) != Some(&q) {
            return None;
        }
        i += 1;
    }

    let body_start = text[i..].find('\n')? + i + 1;
    let mut line_start = body_start;
    while line_start <= text.len() {
        let end = line_end(text, line_start);
        let line = &text[line_start..end];
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix(label) {
            if !rest.bytes().next().is_some_and(is_ident_byte) {
                let indent = line.len() - trimmed.len();
                return Some(Heredoc {
                    body_start,
                    body_end: line_start,
                    end: line_start + indent + label.len(),
                });
            }
        }
        if end == text.len() {
            break;
        }
        line_start = end + 1;
    }
    None
}

/// 如果 `pos` 处是字符串字面量的开头，返回字面量结束后的位置；未闭合时返回文本末尾
pub(crate) fn skip_literal(text: &str, pos: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    match *bytes.get(pos)? {
        quote @ (b'\'' | b'"') => {
            let mut i = pos + 1;
            while i < bytes.len() {
                match bytes[i] {
                    b'\\' => i += 2,
                    b if b == quote => return Some(i + 1),
                    _ => i += 1,
                }
            }
            Some(bytes.len())
        }
        b'<' => heredoc_at(text, pos).map(|h| h.end),
        _ => None,
    }
}

/// 如果 `pos` 处是注释的开头，返回注释结束后的位置
pub(crate) fn skip_comment(text: &str, pos: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    match (*bytes.get(pos)?, bytes.get(pos + 1).copied()) {
        (b'/', Some(b'/')) => Some(line_end(text, pos)),
        (b'/', Some(b'*')) => Some(
            text[pos + 2..]
                .find("*/")
                .map_or(text.len(), |n| pos + 2 + n + 2),
        ),
        // PHP 8 属性 #[...] 不是注释
        (b'#', next) if next != Some(b'[') => Some(line_end(text, pos)),
        _ => None,
    }
}

/// 去掉注释，字符串内容保持不变
pub(crate) fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;
    while i < text.len() {
        if let Some(end) = skip_literal(text, i) {
            i = end;
        } else if let Some(end) = skip_comment(text, i) {
            out.push_str(&text[copied..i]);
            out.push(' ');
            i = end;
            copied = end;
        } else {
            i += 1;
        }
    }
    out.push_str(&text[copied..]);
    out
}

/// 找到 `open` 处的括号（`(`、`{`、`[`）对应的闭合位置
pub(crate) fn matching_delimiter(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let (open_byte, close_byte) = match *bytes.get(open)? {
        b'(' => (b'(', b')'),
        b'{' => (b'{', b'}'),
        b'[' => (b'[', b']'),
        _ => return None,
    };

    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        if let Some(end) = skip_literal(text, i) {
            i = end;
            continue;
        }
        if let Some(end) = skip_comment(text, i) {
            i = end;
            continue;
        }
        let b = bytes[i];
        if b == open_byte {
            depth += 1;
        } else if b == close_byte {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
        i += 1;
    }
    None
}

/// 调用的参数文本（不含外层括号），括号未闭合时取到文本末尾
pub(crate) fn call_arguments(text: &str, open_paren: usize) -> &str {
    match matching_delimiter(text, open_paren) {
        Some(close) => &text[open_paren + 1..close],
        None => &text[(open_paren + 1).min(text.len())..],
    }
}

/// 按顶层分号切分语句，字符串和注释中的分号不计
pub(crate) fn split_statements(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut statements = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if let Some(end) = skip_literal(text, i) {
            i = end;
            continue;
        }
        if let Some(end) = skip_comment(text, i) {
            i = end;
            continue;
        }
        if bytes[i] == b';' {
            statements.push(&text[start..i]);
            start = i + 1;
        }
        i += 1;
    }
    if start < text.len() && !text[start..].trim().is_empty() {
        statements.push(&text[start..]);
    }
    statements
}

/// `pos` 处字符串字面量的内容（不含引号 / heredoc 标签）
pub(crate) fn string_literal_value(text: &str, pos: usize) -> Option<&str> {
    let bytes = text.as_bytes();
    match *bytes.get(pos)? {
        b'\'' | b'"' => {
            let end = skip_literal(text, pos)?;
            let inner_end = if end > pos + 1 && bytes[end - 1] == bytes[pos] {
                end - 1
            } else {
                end
            };
            Some(&text[pos + 1..inner_end])
        }
        b'<' => heredoc_at(text, pos).map(|h| &text[h.body_start..h.body_end]),
        _ => None,
    }
}

/// 字符串字面量的实际文本，引号字符串中的转义已还原
///
/// heredoc / nowdoc 原样返回
pub(crate) fn string_literal_text(text: &str, pos: usize) -> Option<Cow<'_, str>> {
    let raw = string_literal_value(text, pos)?;
    match text.as_bytes()[pos] {
        quote @ (b'\'' | b'"') => Some(unescape_quoted(raw, quote)),
        _ => Some(Cow::Borrowed(raw)),
    }
}

// 单引号只认 \' 和 \\；双引号另外还原 \$ 和常见空白转义，其余保持原样
fn unescape_quoted(raw: &str, quote: u8) -> Cow<'_, str> {
    if !raw.contains('\\') {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(next) = chars.next() else {
            out.push(c);
            break;
        };
        let unescaped = match (quote, next) {
            (_, '\\') => Some('\\'),
            (b'\'', '\'') => Some('\''),
            (b'"', '"') => Some('"'),
            (b'"', '$') => Some('$'),
            (b'"', 'n') => Some('\n'),
            (b'"', 'r') => Some('\r'),
            (b'"', 't') => Some('\t'),
            _ => None,
        };
        match unescaped {
            Some(ch) => out.push(ch),
            None => {
                out.push(c);
                out.push(next);
            }
        }
    }
    Cow::Owned(out)
}

/// 迁移类中 up() 方法的方法体
pub(crate) fn up_method_body(text: &str) -> Option<&str> {
    let found = UP_METHOD.find(text)?;
    let params_open = found.end() - 1;
    let params_close = matching_delimiter(text, params_open)?;
    let body_open = params_close + text[params_close..].find('{')?;
    let body_close = matching_delimiter(text, body_open)?;
    Some(&text[body_open + 1..body_close])
}
