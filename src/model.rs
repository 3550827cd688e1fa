use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// One fetched arXiv listing, flattened from the Atom feed entry.

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArxivResult {
    /// arXiv identifier, the tail of the Atom id URL (e.g. "2501.01234v1").
    pub id: String,
    pub title: String,
    pub summary: String,
    pub authors: Vec<String>,
    pub published: DateTime<Utc>,
    pub link: String,
}

impl ArxivResult {
    pub fn new(
        id: String,
        title: String,
        summary: String,
        authors: Vec<String>,
        published: DateTime<Utc>,
        link: String,
    ) -> Self {
        ArxivResult {
            id,
            title,
            summary,
            authors,
            published,
            link,
        }
    }
}
