use std::{collections::HashSet, fmt, marker::PhantomData, time::Duration};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use quick_xml::de::from_str;
use serde::{
    de::{MapAccess, Visitor},
    Deserialize, Deserializer,
};
use tracing::{debug, warn};

use crate::{config::ArxivConfig, model::ArxivResult};

macro_rules! arxiv_url {
    () => {
        concat!(
            "https://export.arxiv.org/api/query/?search_query=%28{}%29",
            "&start={}&max_results={}&sortBy=submittedDate&sortOrder=descending"
        )
    };
}

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug)]
pub struct ArxivParser {
    config: ArxivConfig,
    client: reqwest::Client,
}

impl ArxivParser {
    pub fn from_config(config: ArxivConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .context("failed to build http client")?;
        Ok(ArxivParser { config, client })
    }

    fn create_query_url(&self, start: i32) -> String {
        // search categories.
        let categories = self
            .config
            .categories
            .iter()
            .map(|cat| format!("cat:{}", cat))
            .collect::<Vec<_>>()
            .join("+OR+");

        // format using a named macro
        format!(arxiv_url!(), categories, start, self.config.num_entries)
    }

    async fn get_raw_xml(&self, start: i32) -> Result<String> {
        let url = self.create_query_url(start);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("failed to fetch {}", url))?
            .error_for_status()
            .context("arxiv api returned an error status")?;
        response.text().await.context("failed to read response body")
    }

    /// Fetch up to `num_pages` pages of listings, newest first, stopping
    /// early on an empty page. Entries are deduplicated by identifier,
    /// first occurrence wins.
    pub async fn get_arxiv_results(&self) -> Result<Vec<ArxivResult>> {
        let mut results: Vec<ArxivResult> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for page in 0..self.config.num_pages {
            let start = self.config.num_entries * page;
            let xml = self.get_raw_xml(start).await?;
            let parsed: ArxivDocument =
                from_str(xml.as_str()).context("failed to parse arxiv feed xml")?;
            if parsed.entries.is_empty() {
                break;
            }
            debug!(page, documents = parsed.entries.len(), "fetched feed page");
            for entry in parsed.entries {
                let Some(article) = ArxivResult::from_entry(entry) else {
                    continue;
                };
                if seen.insert(article.id.clone()) {
                    results.push(article);
                }
            }
        }
        Ok(results)
    }
}

impl ArxivResult {
    fn from_entry(entry: ArxivEntry) -> Option<Self> {
        let Some(id) = arxiv_id(&entry.id) else {
            warn!(id = %entry.id, "entry without an /abs/ identifier, skipping");
            return None;
        };

        let published = DateTime::parse_from_rfc3339(&entry.published)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|err| {
                warn!(%err, id = %id, "failed to parse published date");
                DateTime::UNIX_EPOCH
            });

        Some(Self::new(
            id,
            entry.title.replace('\n', " "),
            entry.summary.replace('\n', " "),
            entry.authors.into_iter().map(|a| a.name.value).collect(),
            published,
            entry
                .links
                .into_iter()
                .find(|field| matches!(field.link_type, Some(LinkType::Home)))
                .map(|field| field.link)
                .unwrap_or_default(),
        ))
    }
}

/// Tail of an Atom id URL such as `http://arxiv.org/abs/2501.01234v1`.
fn arxiv_id(url: &str) -> Option<String> {
    let at = url.rfind("/abs/")?;
    let id = url[at + "/abs/".len()..].trim_matches('/').trim();
    (!id.is_empty()).then(|| id.to_string())
}

// Arxiv Raw XML Model

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
struct ArxivDocument {
    #[serde(rename = "entry")]
    entries: Vec<ArxivEntry>,
}

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
struct ArxivEntry {
    id: String,
    title: String,
    summary: String,
    published: String,
    #[serde(rename = "author", flatten, deserialize_with = "de_authors")]
    authors: Vec<AuthorField>,
    #[serde(rename = "link", flatten, deserialize_with = "de_links")]
    links: Vec<LinkField>,
}

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
struct AuthorField {
    name: NameField,
}

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
struct NameField {
    #[serde(rename = "$text")]
    value: String,
}

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
struct LinkField {
    #[serde(rename = "@href")]
    link: String,
    #[serde(rename = "@type")]
    link_type: Option<LinkType>,
}

#[derive(Debug, Default, PartialEq, Deserialize)]
enum LinkType {
    #[serde(rename = "text/html")]
    Home,
    #[serde(rename = "application/pdf")]
    Pdf,
    #[default]
    Unknown,
}

// Atom repeats `author` and `link` as sibling elements; collect every
// occurrence of one field name out of the flattened children map.
struct ChildrenVisitor<T> {
    field: &'static str,
    marker: PhantomData<T>,
}

impl<'de, T: Deserialize<'de>> Visitor<'de> for ChildrenVisitor<T> {
    type Value = Vec<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "map of child elements, filtering for `{}`", self.field)
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut children = Vec::new();
        while let Some(key) = access.next_key::<String>()? {
            if key == self.field {
                children.push(access.next_value::<T>()?);
            }
        }
        Ok(children)
    }
}

fn de_authors<'de, D>(deserializer: D) -> Result<Vec<AuthorField>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(ChildrenVisitor {
        field: "author",
        marker: PhantomData,
    })
}

fn de_links<'de, D>(deserializer: D) -> Result<Vec<LinkField>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(ChildrenVisitor {
        field: "link",
        marker: PhantomData,
    })
}

// end Arxiv Raw XML Model
