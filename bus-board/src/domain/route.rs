//! Route reference data and line label handling.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A bus route as carried by the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Full route name, usually prefixed with the operator, e.g. "市バス205".
    #[serde(rename = "n")]
    pub label: String,

    /// Badge background colour.
    #[serde(rename = "c")]
    pub color: String,

    /// Badge text colour.
    #[serde(rename = "t")]
    pub text_color: String,
}

impl Route {
    /// The label riders know the line by: the full name with the first
    /// occurrence of the operator prefix removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use bus_board::domain::Route;
    ///
    /// let route = Route {
    ///     label: "市バス205".to_string(),
    ///     color: "#E60012".to_string(),
    ///     text_color: "#FFFFFF".to_string(),
    /// };
    /// assert_eq!(route.line_label("市バス"), "205");
    /// assert_eq!(route.line_label(""), "市バス205");
    /// ```
    pub fn line_label(&self, operator_prefix: &str) -> String {
        if operator_prefix.is_empty() {
            return self.label.clone();
        }
        self.label.replacen(operator_prefix, "", 1)
    }
}

/// Compare route labels the way a rider reads them: runs of digits compare
/// by numeric value, everything else compares case-insensitively.
///
/// # Examples
///
/// ```
/// use bus_board::domain::natural_cmp;
/// use std::cmp::Ordering;
///
/// assert_eq!(natural_cmp("5", "17"), Ordering::Less);
/// assert_eq!(natural_cmp("17", "205"), Ordering::Less);
/// assert_eq!(natural_cmp("急行100", "急行17"), Ordering::Greater);
/// ```
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let chunks_a = chunks(a);
    let chunks_b = chunks(b);

    for (x, y) in chunks_a.iter().zip(chunks_b.iter()) {
        let ord = match (x, y) {
            (Chunk::Digits(x), Chunk::Digits(y)) => compare_digits(x, y),
            (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
            (Chunk::Text(x), Chunk::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }

    chunks_a.len().cmp(&chunks_b.len())
}

#[derive(Debug, PartialEq, Eq)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

/// Split into maximal runs of ASCII digits and non-digits.
fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_digits: Option<bool> = None;

    for (i, c) in s.char_indices() {
        let is_digit = c.is_ascii_digit();
        if let Some(prev) = in_digits
            && prev != is_digit
        {
            out.push(chunk(&s[start..i], prev));
            start = i;
        }
        in_digits = Some(is_digit);
    }
    if let Some(prev) = in_digits {
        out.push(chunk(&s[start..], prev));
    }

    out
}

fn chunk(s: &str, digits: bool) -> Chunk<'_> {
    if digits {
        Chunk::Digits(s)
    } else {
        Chunk::Text(s)
    }
}

/// Numeric comparison of two digit strings of any length.
fn compare_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
