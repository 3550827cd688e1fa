use serde::Serialize;

use crate::{
    keywords::KeywordTable,
    model::ArxivResult,
    relevance::{score, NormalizeBase},
};

/// An article with its title relevance filled in. Scored once, never
/// mutated again.
#[derive(Debug, Clone, Serialize)]
pub struct RankedArticle {
    pub relevance: f64,
    /// Keyword patterns that matched the title, in table order.
    pub matched: Vec<String>,
    #[serde(flatten)]
    pub article: ArxivResult,
}

/// Score every article title and sort ascending by relevance, so the most
/// relevant titles print last, nearest the prompt.
pub fn rank_articles(
    articles: Vec<ArxivResult>,
    keywords: &KeywordTable,
    base: NormalizeBase,
) -> Vec<RankedArticle> {
    let mut ranked: Vec<RankedArticle> = articles
        .into_iter()
        .map(|article| {
            let scored = score(&article.title, keywords, base);
            RankedArticle {
                relevance: scored.relevance,
                matched: scored.matched,
                article,
            }
        })
        .collect();
    ranked.sort_by(|a, b| a.relevance.total_cmp(&b.relevance));
    ranked
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn article(id: &str, title: &str) -> ArxivResult {
        ArxivResult::new(
            id.to_string(),
            title.to_string(),
            String::from("summary"),
            vec![String::from("A. Author")],
            Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap(),
            format!("http://arxiv.org/abs/{}", id),
        )
    }

    #[test]
    fn test_rank_sorts_ascending_by_relevance() {
        let keywords = KeywordTable::parse("molecular 4\nmerg 6\ngas 2").unwrap();
        let articles = vec![
            article("2501.00001v1", "Molecular gas in a major merger"),
            article("2501.00002v1", "Stellar rotation curves"),
            article("2501.00003v1", "Molecular clouds"),
        ];

        let ranked = rank_articles(articles, &keywords, NormalizeBase::Filtered);
        let ids: Vec<&str> = ranked.iter().map(|r| r.article.id.as_str()).collect();
        assert_eq!(ids, vec!["2501.00002v1", "2501.00003v1", "2501.00001v1"]);
        assert_eq!(ranked[0].relevance, 0.0);
        assert_eq!(ranked[2].relevance, 3.0);
        assert_eq!(ranked[2].matched, vec!["molecular", "merg", "gas"]);
    }
}
