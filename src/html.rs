//! Minimal HTML scanning helpers for the two roster page layouts.
//!
//! This is not a general HTML parser. It locates opening tags by exact class
//! token, finds the matching close tag with same-name depth tracking, and
//! extracts visible text. That covers everything the MCH markup needs without
//! pulling in a DOM library.

/// An opening (or closing) tag found in the document.
struct Tag<'a> {
    start: usize,
    /// Byte offset just past the `>`.
    end: usize,
    name: &'a str,
    attrs: &'a str,
    closing: bool,
    self_closing: bool,
}

fn next_tag(html: &str, from: usize) -> Option<Tag<'_>> {
    let bytes = html.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        if bytes[i] != b'<' {
            i += 1;
            continue;
        }
        let closing = i + 1 < bytes.len() && bytes[i + 1] == b'/';
        let name_start = if closing { i + 2 } else { i + 1 };
        let mut j = name_start;
        while j < bytes.len() && (bytes[j].is_ascii_alphanumeric() || bytes[j] == b'-') {
            j += 1;
        }
        if j == name_start {
            // Comment, doctype or a bare '<' in text.
            i += 1;
            continue;
        }
        let gt = match html[j..].find('>') {
            Some(rel) => j + rel,
            None => return None,
        };
        return Some(Tag {
            start: i,
            end: gt + 1,
            name: &html[name_start..j],
            attrs: &html[j..gt],
            closing,
            self_closing: gt > 0 && bytes[gt - 1] == b'/',
        });
    }
    None
}

/// Extract the value of the `class` attribute from a tag's attribute string.
fn class_attr(attrs: &str) -> Option<&str> {
    let lc = attrs.to_ascii_lowercase();
    let mut search = 0;
    while let Some(rel) = lc[search..].find("class") {
        let at = search + rel;
        let before_ok = at == 0
            || attrs.as_bytes()[at - 1].is_ascii_whitespace();
        let mut k = at + "class".len();
        let bytes = attrs.as_bytes();
        while k < bytes.len() && bytes[k].is_ascii_whitespace() {
            k += 1;
        }
        if before_ok && k < bytes.len() && bytes[k] == b'=' {
            k += 1;
            while k < bytes.len() && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < bytes.len() && (bytes[k] == b'"' || bytes[k] == b'\'') {
                let quote = bytes[k] as char;
                let val_start = k + 1;
                let val_end = attrs[val_start..].find(quote)? + val_start;
                return Some(&attrs[val_start..val_end]);
            }
            return None;
        }
        search = at + "class".len();
    }
    None
}

fn has_class_token(attrs: &str, class: &str) -> bool {
    class_attr(attrs)
        .map(|v| v.split_ascii_whitespace().any(|t| t == class))
        .unwrap_or(false)
}

/// Find the end of the block opened by `open`, tracking nesting of the same
/// tag name. Returns the byte offset just past the matching close tag.
fn block_end(html: &str, open: &Tag<'_>) -> Option<usize> {
    if open.self_closing {
        return Some(open.end);
    }
    let mut depth = 1usize;
    let mut pos = open.end;
    while let Some(tag) = next_tag(html, pos) {
        pos = tag.end;
        if !tag.name.eq_ignore_ascii_case(open.name) {
            continue;
        }
        if tag.closing {
            depth -= 1;
            if depth == 0 {
                return Some(tag.end);
            }
        } else if !tag.self_closing {
            depth += 1;
        }
    }
    None
}

/// All top-level blocks whose opening tag carries `class` as an exact class
/// token. Nested matches inside a returned block are not reported separately.
pub fn class_blocks<'a>(html: &'a str, class: &str) -> Vec<&'a str> {
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some(tag) = next_tag(html, pos) {
        if !tag.closing && has_class_token(tag.attrs, class) {
            if let Some(end) = block_end(html, &tag) {
                out.push(&html[tag.start..end]);
                pos = end;
                continue;
            }
        }
        pos = tag.end;
    }
    out
}

pub fn first_class_block<'a>(html: &'a str, class: &str) -> Option<&'a str> {
    let mut pos = 0usize;
    while let Some(tag) = next_tag(html, pos) {
        if !tag.closing && has_class_token(tag.attrs, class) {
            if let Some(end) = block_end(html, &tag) {
                return Some(&html[tag.start..end]);
            }
        }
        pos = tag.end;
    }
    None
}

/// True when any tag in the fragment carries `class` as an exact class token.
pub fn contains_class(html: &str, class: &str) -> bool {
    let mut pos = 0usize;
    while let Some(tag) = next_tag(html, pos) {
        if !tag.closing && has_class_token(tag.attrs, class) {
            return true;
        }
        pos = tag.end;
    }
    false
}

/// All top-level `<tag>...</tag>` blocks with the given tag name.
pub fn tag_blocks<'a>(html: &'a str, tag_name: &str) -> Vec<&'a str> {
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some(tag) = next_tag(html, pos) {
        if !tag.closing && tag.name.eq_ignore_ascii_case(tag_name) {
            if let Some(end) = block_end(html, &tag) {
                out.push(&html[tag.start..end]);
                pos = end;
                continue;
            }
        }
        pos = tag.end;
    }
    out
}

/// Visible text of a block: tags stripped, common entities decoded,
/// whitespace collapsed and trimmed.
pub fn text(block: &str) -> String {
    let mut stripped = String::with_capacity(block.len());
    let mut in_tag = false;
    for ch in block.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => stripped.push(ch),
            _ => {}
        }
    }
    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    normalize_ws(&decoded)
}

fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}
