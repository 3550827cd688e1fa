use std::{fs, path::Path, slice};

use anyhow::{bail, Context, Result};
use regex::{Regex, RegexBuilder};

// A pattern containing any of these is treated as a regex fragment;
// everything else is a plain case-insensitive substring.
const REGEX_META: &[char] = &[
    '\\', '.', '+', '*', '?', '(', ')', '[', ']', '{', '}', '|', '^', '$',
];

#[derive(Debug, Clone)]
enum Matcher {
    /// Lower-cased literal, matched by substring search.
    Literal(String),
    /// Compiled once at load time, case-insensitive.
    Regex(Regex),
}

#[derive(Debug, Clone)]
pub struct Keyword {
    pub pattern: String,
    pub weight: i64,
    matcher: Matcher,
}

impl Keyword {
    pub fn new(pattern: &str, weight: i64) -> Result<Self> {
        let matcher = if pattern.contains(REGEX_META) {
            let regex = RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .with_context(|| format!("invalid regex pattern {:?}", pattern))?;
            Matcher::Regex(regex)
        } else {
            Matcher::Literal(pattern.to_lowercase())
        };
        Ok(Keyword {
            pattern: pattern.to_string(),
            weight,
            matcher,
        })
    }

    /// Unanchored match anywhere in `text`. Callers pass lower-cased text;
    /// the regex side is compiled case-insensitive anyway.
    pub fn matches(&self, text: &str) -> bool {
        match &self.matcher {
            Matcher::Literal(literal) => text.contains(literal.as_str()),
            Matcher::Regex(regex) => regex.is_match(text),
        }
    }
}

/// Weighted keyword patterns, loaded once per run and immutable after.
#[derive(Debug, Clone, Default)]
pub struct KeywordTable {
    keywords: Vec<Keyword>,
}

impl KeywordTable {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = fs::read_to_string(path)
            .with_context(|| format!("failed to read keyword file {}", path.display()))?;
        Self::parse(&src).with_context(|| format!("in keyword file {}", path.display()))
    }

    /// One `pattern weight` pair per line, whitespace-separated. Blank lines
    /// and `#` comments are skipped; anything else malformed fails fast.
    pub fn parse(src: &str) -> Result<Self> {
        let mut keywords = Vec::new();
        for (idx, line) in src.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace();
            let (pattern, weight) = match (fields.next(), fields.next(), fields.next()) {
                (Some(pattern), Some(weight), None) => (pattern, weight),
                _ => bail!("line {}: expected `pattern weight`, got {:?}", idx + 1, line),
            };
            let weight: i64 = weight
                .parse()
                .with_context(|| format!("line {}: weight {:?} is not an integer", idx + 1, weight))?;
            let keyword =
                Keyword::new(pattern, weight).with_context(|| format!("line {}", idx + 1))?;
            keywords.push(keyword);
        }
        Ok(KeywordTable { keywords })
    }

    pub fn iter(&self) -> slice::Iter<'_, Keyword> {
        self.keywords.iter()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}
