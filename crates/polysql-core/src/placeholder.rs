//! Placeholder formatting.
//!
//! Statements are composed with the generic `?` marker. Rendering rewrites
//! every marker outside quoted text into the dialect's native bind syntax,
//! numbering left to right in the order the markers appear in the final text.

use crate::builder::SqlValue;

/// The generic, dialect-neutral bind marker.
pub const GENERIC_MARKER: char = '?';

/// Native bind parameter syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderStyle {
    /// `$1, $2, ...`
    Dollar,
    /// `:p1, :p2, ...`
    Colon,
    /// `?` passed through unchanged.
    Question,
}

impl PlaceholderStyle {
    /// Returns the native marker for the 1-based parameter `index`.
    #[must_use]
    pub fn marker(self, index: usize) -> String {
        match self {
            Self::Dollar => format!("${index}"),
            Self::Colon => format!(":p{index}"),
            Self::Question => String::from("?"),
        }
    }

    /// Whether markers in this style carry an index.
    #[must_use]
    pub const fn is_numbered(self) -> bool {
        !matches!(self, Self::Question)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Text(&'a str),
    Generic,
    Numbered(usize),
}

/// Text that never contains markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Skip {
    Quoted(u8),
    LineComment,
    BlockComment,
}

/// Splits `sql` into text runs and markers, skipping quoted literals,
/// quoted identifiers and comments. Numbered markers are recognized only
/// for `numbered` styles.
fn tokenize(sql: &str, style: PlaceholderStyle) -> Vec<Token<'_>> {
    let bytes = sql.as_bytes();
    let mut tokens = vec![];
    let mut skip: Option<Skip> = None;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        let next = bytes.get(i + 1).copied();

        if let Some(kind) = skip {
            // A doubled quote closes and reopens, which is equivalent.
            match kind {
                Skip::Quoted(q) if b == q => skip = None,
                Skip::LineComment if b == b'\n' => skip = None,
                Skip::BlockComment if b == b'*' && next == Some(b'/') => {
                    skip = None;
                    i += 1;
                }
                _ => {}
            }
            i += 1;
            continue;
        }

        let marker = match b {
            b'\'' | b'"' | b'`' => {
                skip = Some(Skip::Quoted(b));
                None
            }
            b'-' if next == Some(b'-') => {
                skip = Some(Skip::LineComment);
                None
            }
            b'/' if next == Some(b'*') => {
                skip = Some(Skip::BlockComment);
                i += 1;
                None
            }
            b'?' => Some((Token::Generic, 1)),
            b'$' if style == PlaceholderStyle::Dollar => numbered_at(sql, i + 1)
                .map(|(index, len)| (Token::Numbered(index), 1 + len)),
            b':' if style == PlaceholderStyle::Colon && next == Some(b'p') => {
                numbered_at(sql, i + 2).map(|(index, len)| (Token::Numbered(index), 2 + len))
            }
            _ => None,
        };

        match marker {
            Some((token, len)) => {
                if start < i {
                    tokens.push(Token::Text(&sql[start..i]));
                }
                tokens.push(token);
                i += len;
                start = i;
            }
            None => i += 1,
        }
    }

    if start < sql.len() {
        tokens.push(Token::Text(&sql[start..]));
    }
    tokens
}

/// Parses the run of ASCII digits starting at `from`.
fn numbered_at(sql: &str, from: usize) -> Option<(usize, usize)> {
    let len = sql
        .as_bytes()
        .get(from..)?
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if len == 0 {
        return None;
    }
    let index = sql[from..from + len].parse().ok()?;
    Some((index, len))
}

/// Rewrites generic markers into native markers, numbering from 1.
#[must_use]
pub fn format(style: PlaceholderStyle, sql: &str) -> String {
    let mut counter = 0;
    format_from(style, sql, &mut counter)
}

/// Rewrites generic markers into native markers, continuing from `counter`.
///
/// `counter` holds the last index used and is advanced past every marker
/// written. Pass-through styles leave it untouched.
#[must_use]
pub fn format_from(style: PlaceholderStyle, sql: &str, counter: &mut usize) -> String {
    if !style.is_numbered() {
        return sql.to_string();
    }

    let mut out = String::with_capacity(sql.len() + 8);
    for token in tokenize(sql, PlaceholderStyle::Question) {
        match token {
            Token::Text(text) => out.push_str(text),
            Token::Generic | Token::Numbered(_) => {
                *counter += 1;
                out.push_str(&style.marker(*counter));
            }
        }
    }
    out
}

/// Rewrites native markers back into generic markers.
///
/// Markers are assumed to appear in ascending order, which holds for any
/// text produced by [`format`].
#[must_use]
pub fn to_generic(style: PlaceholderStyle, sql: &str) -> String {
    if !style.is_numbered() {
        return sql.to_string();
    }

    let mut out = String::with_capacity(sql.len());
    for token in tokenize(sql, style) {
        match token {
            Token::Text(text) => out.push_str(text),
            Token::Generic | Token::Numbered(_) => out.push(GENERIC_MARKER),
        }
    }
    out
}

/// Counts the generic markers outside quoted text.
#[must_use]
pub fn count_markers(sql: &str) -> usize {
    tokenize(sql, PlaceholderStyle::Question)
        .iter()
        .filter(|t| matches!(t, Token::Generic))
        .count()
}

/// Returns the highest parameter index referenced by rendered `sql`.
///
/// For pass-through styles this is the number of markers.
#[must_use]
pub fn max_marker_index(style: PlaceholderStyle, sql: &str) -> usize {
    tokenize(sql, style)
        .iter()
        .fold(0, |acc, token| match token {
            Token::Numbered(n) => acc.max(*n),
            Token::Generic if !style.is_numbered() => acc + 1,
            _ => acc,
        })
}

/// Adds `offset` to every numbered marker in rendered `sql`.
#[must_use]
pub fn shift(style: PlaceholderStyle, sql: &str, offset: usize) -> String {
    if !style.is_numbered() || offset == 0 {
        return sql.to_string();
    }

    let mut out = String::with_capacity(sql.len() + 8);
    for token in tokenize(sql, style) {
        match token {
            Token::Text(text) => out.push_str(text),
            Token::Generic => out.push(GENERIC_MARKER),
            Token::Numbered(n) => out.push_str(&style.marker(n + offset)),
        }
    }
    out
}

/// Joins two independently rendered statements with `op` (for example
/// `UNION`), renumbering the right-hand markers to continue after the
/// left-hand statement's highest index.
#[must_use]
pub fn join_rendered(
    style: PlaceholderStyle,
    left: (String, Vec<SqlValue>),
    op: &str,
    right: (String, Vec<SqlValue>),
) -> (String, Vec<SqlValue>) {
    let (left_sql, mut args) = left;
    let (right_sql, right_args) = right;

    let offset = max_marker_index(style, &left_sql);
    let sql = format!("{left_sql} {op} {}", shift(style, &right_sql, offset));
    args.extend(right_args);
    (sql, args)
}
