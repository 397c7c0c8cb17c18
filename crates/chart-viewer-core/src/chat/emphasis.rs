//! Minimal inline emphasis: `**bold**` and `*italic*`.
//!
//! Markers pair up within a single line. Bold pairs are matched first, then
//! italic pairs, so `*a **b** c*` is one italic run holding a bold run. An
//! unpaired marker stays literal text.

const STRONG: &str = "**";
const ITALIC: &str = "*";

/// A run of inline text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
}

#[derive(Debug, Clone)]
enum Token {
    Text(String),
    Marker(&'static str),
    Strong(Vec<Token>),
}

/// Split text into plain, bold and italic runs.
pub fn parse_emphasis(text: &str) -> Vec<Inline> {
    to_inlines(&group_strong(&tokenize(text)))
}

fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut plain = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '*' {
            plain.push(ch);
            continue;
        }
        if !plain.is_empty() {
            tokens.push(Token::Text(std::mem::take(&mut plain)));
        }
        let marker = if chars.next_if_eq(&'*').is_some() { STRONG } else { ITALIC };
        tokens.push(Token::Marker(marker));
    }

    if !plain.is_empty() {
        tokens.push(Token::Text(plain));
    }
    tokens
}

/// Index of the closing marker, if it comes before the end of the line.
fn find_close(tokens: &[Token], marker: &str) -> Option<usize> {
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::Marker(m) if *m == marker => return Some(i),
            Token::Text(t) if t.contains('\n') => return None,
            _ => {}
        }
    }
    None
}

fn group_strong(tokens: &[Token]) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        match &tokens[i] {
            Token::Marker(STRONG) => match find_close(&tokens[i + 1..], STRONG) {
                Some(len) => {
                    out.push(Token::Strong(tokens[i + 1..i + 1 + len].to_vec()));
                    i += len + 2;
                    continue;
                }
                None => out.push(Token::Text(STRONG.to_string())),
            },
            other => out.push(other.clone()),
        }
        i += 1;
    }
    out
}

fn to_inlines(tokens: &[Token]) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        match &tokens[i] {
            Token::Text(t) => push_text(&mut out, t),
            Token::Strong(inner) => out.push(Inline::Strong(to_inlines(inner))),
            Token::Marker(ITALIC) => match find_close(&tokens[i + 1..], ITALIC) {
                Some(len) => {
                    out.push(Inline::Emphasis(to_inlines(&tokens[i + 1..i + 1 + len])));
                    i += len + 2;
                    continue;
                }
                None => push_text(&mut out, ITALIC),
            },
            Token::Marker(other) => push_text(&mut out, other),
        }
        i += 1;
    }
    out
}

fn push_text(out: &mut Vec<Inline>, text: &str) {
    match out.last_mut() {
        Some(Inline::Text(last)) => last.push_str(text),
        _ => out.push(Inline::Text(text.to_string())),
    }
}

/// Escape text for inclusion in HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render emphasis as escaped HTML.
pub fn to_html(text: &str) -> String {
    html_spans(&parse_emphasis(text))
}

fn html_spans(spans: &[Inline]) -> String {
    spans
        .iter()
        .map(|span| match span {
            Inline::Text(t) => escape_html(t),
            Inline::Strong(inner) => format!("<strong>{}</strong>", html_spans(inner)),
            Inline::Emphasis(inner) => format!("<em>{}</em>", html_spans(inner)),
        })
        .collect()
}

/// Render emphasis with ANSI bold / italic escapes.
pub fn to_ansi(text: &str) -> String {
    ansi_spans(&parse_emphasis(text))
}

fn ansi_spans(spans: &[Inline]) -> String {
    spans
        .iter()
        .map(|span| match span {
            Inline::Text(t) => t.clone(),
            Inline::Strong(inner) => format!("\x1b[1m{}\x1b[22m", ansi_spans(inner)),
            Inline::Emphasis(inner) => format!("\x1b[3m{}\x1b[23m", ansi_spans(inner)),
        })
        .collect()
}
