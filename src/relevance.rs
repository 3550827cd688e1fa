use clap::ValueEnum;

use crate::keywords::KeywordTable;

// Words too common to count toward relevance; stripped from the title
// before matching and (by default) from the word-count denominator.
const FILLER_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "nor", "but", "of", "in", "on", "at", "to", "for", "with",
    "from", "by", "as", "into", "onto", "over", "under", "via",
];

/// Which word count divides the summed keyword weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum NormalizeBase {
    /// Word count after filler-word removal.
    #[default]
    Filtered,
    /// Word count of the title as given.
    Raw,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TitleRelevance {
    pub relevance: f64,
    /// Patterns that matched, in keyword-table order.
    pub matched: Vec<String>,
}

/// Score a title against the keyword table: sum the weights of every
/// pattern that matches the filler-stripped, lower-cased title, then
/// normalize by word count. A title with no effective words scores 0.0.
pub fn score(title: &str, keywords: &KeywordTable, base: NormalizeBase) -> TitleRelevance {
    let lower = title.to_lowercase();
    let raw_count = lower.split_whitespace().count();
    let words: Vec<&str> = lower
        .split_whitespace()
        .filter(|word| !FILLER_WORDS.contains(word))
        .collect();
    let filtered = words.join(" ");

    let mut sum = 0i64;
    let mut matched = Vec::new();
    for keyword in keywords.iter() {
        if keyword.matches(&filtered) {
            sum += keyword.weight;
            matched.push(keyword.pattern.clone());
        }
    }

    let count = match base {
        NormalizeBase::Filtered => words.len(),
        NormalizeBase::Raw => raw_count,
    };
    let relevance = if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    };
    TitleRelevance { relevance, matched }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(src: &str) -> KeywordTable {
        KeywordTable::parse(src).unwrap()
    }

    #[test]
    fn test_weighted_match_density() {
        let keywords = table("molecular 4\nmerg 6\ngas 2");
        let scored = score("Molecular gas in a major merger", &keywords, NormalizeBase::Filtered);
        // "in" and "a" are filler; 4 words remain, all three patterns match.
        assert_eq!(scored.relevance, 12.0 / 4.0);
        assert_eq!(scored.matched, vec!["molecular", "merg", "gas"]);
    }

    #[test]
    fn test_raw_base_counts_filler_words() {
        let keywords = table("molecular 4\nmerg 6\ngas 2");
        let scored = score("Molecular gas in a major merger", &keywords, NormalizeBase::Raw);
        assert_eq!(scored.relevance, 12.0 / 6.0);
    }

    #[test]
    fn test_empty_title_scores_zero() {
        let scored = score("", &table(""), NormalizeBase::Filtered);
        assert_eq!(scored.relevance, 0.0);
        assert!(scored.matched.is_empty());
    }

    #[test]
    fn test_all_filler_title_scores_zero() {
        let keywords = table("the 10");
        let scored = score("of the and in", &keywords, NormalizeBase::Filtered);
        assert_eq!(scored.relevance, 0.0);
        assert!(scored.matched.is_empty());
    }

    #[test]
    fn test_matched_patterns_account_for_the_sum() {
        let keywords = table("\\bsmg\\b 10\nmillimet 8\ndust 4\nhigh 2");
        let scored = score(
            "High redshift dust emission from an SMG",
            &keywords,
            NormalizeBase::Filtered,
        );
        let matched_sum: i64 = keywords
            .iter()
            .filter(|k| scored.matched.contains(&k.pattern))
            .map(|k| k.weight)
            .sum();
        // filtered title has 5 words
        assert_eq!(scored.relevance, matched_sum as f64 / 5.0);
        assert_eq!(scored.matched, vec!["\\bsmg\\b", "dust", "high"]);
    }

    #[test]
    fn test_deterministic_and_non_negative() {
        let keywords = table("star 2\nformation 4");
        let title = "Star formation at cosmic noon";
        let first = score(title, &keywords, NormalizeBase::Filtered);
        let second = score(title, &keywords, NormalizeBase::Filtered);
        assert_eq!(first, second);
        assert!(first.relevance >= 0.0);
    }

    #[test]
    fn test_case_is_folded_before_matching() {
        let keywords = table("herschel 6");
        let scored = score("HERSCHEL Observations", &keywords, NormalizeBase::Filtered);
        assert_eq!(scored.matched, vec!["herschel"]);
        assert_eq!(scored.relevance, 3.0);
    }
}
