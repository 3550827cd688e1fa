use anyhow::Result;

use crate::rank::RankedArticle;

// Formatter for ranked arXiv articles.
pub struct Formatter;

impl Formatter {
    /// Terminal line: relevance to one decimal, identifier, title, and
    /// optionally the matched patterns.
    pub fn to_line(data: &RankedArticle, show_keywords: bool) -> String {
        if show_keywords {
            format!(
                "{:.1}  {} {} {:?}",
                data.relevance, data.article.id, data.article.title, data.matched
            )
        } else {
            format!("{:.1}  {} {}", data.relevance, data.article.id, data.article.title)
        }
    }

    pub fn to_readme(data: &RankedArticle) -> String {
        format!(
            "### {}\n_{}_<br/>\n{}<br/>\n_Relevance: {:.1}, matched: {}_<br/>\n_Published: {}_, [{}]({})\n\n",
            data.article.title,
            data.article.authors.join(", "),
            data.article.summary,
            data.relevance,
            data.matched.join(", "),
            data.article.published.format("%Y.%m.%d"),
            data.article.link,
            data.article.link
        )
    }

    pub fn to_jsonl(data: &RankedArticle) -> Result<String> {
        let mut line = serde_json::to_string(data)?;
        line.push('\n');
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::model::ArxivResult;

    use super::*;

    fn ranked() -> RankedArticle {
        RankedArticle {
            relevance: 3.0,
            matched: vec![String::from("molecular"), String::from("gas")],
            article: ArxivResult::new(
                String::from("2501.01234v1"),
                String::from("Molecular gas in a major merger"),
                String::from("We observe molecular gas."),
                vec![String::from("A. Astronomer")],
                Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap(),
                String::from("http://arxiv.org/abs/2501.01234v1"),
            ),
        }
    }

    #[test]
    fn test_to_line() {
        assert_eq!(
            Formatter::to_line(&ranked(), false),
            "3.0  2501.01234v1 Molecular gas in a major merger"
        );
        assert_eq!(
            Formatter::to_line(&ranked(), true),
            "3.0  2501.01234v1 Molecular gas in a major merger [\"molecular\", \"gas\"]"
        );
    }

    #[test]
    fn test_to_jsonl_flattens_the_article() {
        let line = Formatter::to_jsonl(&ranked()).unwrap();
        assert!(line.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["relevance"], 3.0);
        assert_eq!(value["id"], "2501.01234v1");
        assert_eq!(value["matched"][0], "molecular");
    }
}
