use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::Parser;
use tracing::info;

use paperrank::{
    config::ArxivConfig,
    format::Formatter,
    keywords::KeywordTable,
    parser::ArxivParser,
    rank::{rank_articles, RankedArticle},
    relevance::{score, NormalizeBase},
    storage::LocalSaver,
    wrap::wrap,
};

/// Query arXiv for the latest extragalactic and cosmology papers and
/// display the titles most relevant to a weighted keyword table.
#[derive(Parser)]
#[command(name = "paperrank", version, about)]
struct Cli {
    /// Score this literal title and exit instead of querying arXiv
    title: Option<String>,

    /// arXiv category to query (repeatable)
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Display the keyword patterns matched in each title
    #[arg(long)]
    keywords: bool,

    /// Only show articles published within the past week
    #[arg(long)]
    past_week: bool,

    /// Path to the keyword file, one `pattern weight` pair per line
    #[arg(long)]
    keyword_file: Option<String>,

    /// Only show titles scoring strictly above this threshold
    #[arg(long)]
    threshold: Option<f64>,

    /// Word-count base used to normalize the keyword weight sum
    #[arg(long, value_enum, default_value_t = NormalizeBase::Filtered)]
    normalize: NormalizeBase,

    /// Print each line as-is instead of wrapping to the terminal width
    #[arg(long)]
    no_wrap: bool,

    /// Write the qualifying articles to a markdown report
    #[arg(long)]
    output: Option<String>,

    /// Write the qualifying articles to a JSONL file
    #[arg(long)]
    jsonl: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("paperrank=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = ArxivConfig::from_env();
    if !cli.categories.is_empty() {
        config.categories = cli.categories.clone();
    }
    if let Some(threshold) = cli.threshold {
        config.threshold = threshold;
    }
    if let Some(path) = &cli.keyword_file {
        config.keyword_file = path.clone();
    }

    let keywords = KeywordTable::from_file(&config.keyword_file)?;

    // score a literal title without touching the network
    if let Some(title) = &cli.title {
        let scored = score(title, &keywords, cli.normalize);
        if cli.keywords {
            println!("{:.1}  {} {:?}", scored.relevance, title, scored.matched);
        } else {
            println!("{:.1}  {}", scored.relevance, title);
        }
        return Ok(());
    }

    let parser = ArxivParser::from_config(config.clone())?;
    let mut articles = parser.get_arxiv_results().await.context("fetch failed")?;
    info!(articles = articles.len(), "fetched arxiv listings");

    if cli.past_week {
        let cutoff = Utc::now() - Duration::days(7);
        articles.retain(|article| article.published >= cutoff);
    }

    let qualifying: Vec<RankedArticle> = rank_articles(articles, &keywords, cli.normalize)
        .into_iter()
        .filter(|article| article.relevance > config.threshold)
        .collect();

    let width = if cli.no_wrap {
        None
    } else {
        Some(textwrap::termwidth())
    };
    for article in &qualifying {
        print_line(&Formatter::to_line(article, cli.keywords), width)?;
    }

    if let Some(fname) = &cli.output {
        LocalSaver::save_ranked_as_readme(fname, &qualifying)?;
        info!(file = %fname, "wrote markdown report");
    }
    if let Some(fname) = &cli.jsonl {
        LocalSaver::save_ranked_as_jsonl(fname, &qualifying)?;
        info!(file = %fname, "wrote jsonl export");
    }

    Ok(())
}

fn print_line(line: &str, width: Option<usize>) -> Result<()> {
    match width {
        Some(width) => {
            for segment in wrap(line, width)? {
                println!("{}", segment);
            }
        }
        None => println!("{}", line),
    }
    Ok(())
}
