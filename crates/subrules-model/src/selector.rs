//! Selector syntax checking.
//!
//! Selector grammar lives outside this crate. Parsing never consults a
//! checker; only [`Group::is_valid`](crate::Group::is_valid) and
//! [`Group::check_selectors`](crate::Group::check_selectors) do.

/// Decides whether a selector source string is syntactically acceptable.
pub trait SelectorChecker {
    fn check(&self, source: &str) -> bool;
}

impl<F> SelectorChecker for F
where
    F: Fn(&str) -> bool,
{
    fn check(&self, source: &str) -> bool {
        self(source)
    }
}

/// A conservative structural checker.
///
/// Accepts any non-blank source whose brackets and parentheses balance and
/// whose quoted strings are terminated. It cannot catch grammar errors, so
/// it may accept selectors the real grammar rejects, but never the reverse
/// for these structural mistakes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BalancedSelectorChecker;

impl SelectorChecker for BalancedSelectorChecker {
    fn check(&self, source: &str) -> bool {
        if source.trim().is_empty() {
            return false;
        }

        let mut open: Vec<char> = Vec::new();
        let mut quote: Option<char> = None;
        let mut escaped = false;

        for c in source.chars() {
            if let Some(q) = quote {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                }
                continue;
            }
            match c {
                '\'' | '"' => quote = Some(c),
                '[' | '(' => open.push(c),
                ']' => {
                    if open.pop() != Some('[') {
                        return false;
                    }
                }
                ')' => {
                    if open.pop() != Some('(') {
                        return false;
                    }
                }
                _ => {}
            }
        }

        quote.is_none() && open.is_empty()
    }
}
