use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use clap::Parser;
use nn_core::{
    ArticleSource, Category, DeterministicRanker, Error, RecommendationConfig, Result, TextGenerator,
    UserPreferences,
};
use nn_inference::{create_model, ModelKind, SemanticRanker, TopicExtractor};
use nn_sources::{NewsApiConfig, NewsApiSource};
use nn_web::AppState;
use tracing::info;

mod duration;
mod logging;

use duration::HumanDuration;

#[derive(Parser, Debug)]
#[command(author, version, about = "NewsNexus news recommendations", long_about = None)]
pub struct Cli {
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    news_api_key: Option<String>,
    #[arg(long, env = "NEWS_API_URL")]
    news_api_url: Option<String>,
    #[arg(long, default_value = "us")]
    country: String,
    #[arg(long, default_value = "gemini", help = "Model to use for inference. Available models: gemini (default), deepseek, dummy")]
    model: ModelKind,
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    model_api_key: Option<String>,
    #[arg(long)]
    model_name: Option<String>,
    #[arg(long)]
    model_url: Option<String>,
    /// Deadline for each model call (e.g. 30s, 1m)
    #[arg(long, default_value = "30s")]
    llm_timeout: HumanDuration,
    #[arg(long, default_value = "memory")]
    storage: String,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: IpAddr,
        #[arg(long, env = "PORT", default_value_t = 5000)]
        port: u16,
    },
    /// Rank the latest headlines against the given preferences
    Recommend {
        #[arg(long = "category")]
        categories: Vec<Category>,
        #[arg(long = "interest")]
        interests: Vec<String>,
        #[arg(long = "source")]
        sources: Vec<String>,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Ask the model to pick the headlines most relevant to a query
    Ask {
        query: String,
    },
    /// List the trending topics of the latest headlines
    Topics,
}

fn create_source(cli: &Cli) -> Result<Arc<dyn ArticleSource>> {
    let api_key = cli
        .news_api_key
        .clone()
        .ok_or_else(|| Error::InvalidInput("NEWS_API_KEY is required".to_string()))?;
    let mut config = NewsApiConfig::new(api_key);
    config.country = cli.country.clone();
    if let Some(url) = &cli.news_api_url {
        config = config.with_base_url(url.clone());
    }
    let source = NewsApiSource::new(config)?;
    info!("📰 Article source initialized (using {})", source.name());
    Ok(Arc::new(source))
}

fn create_generator(cli: &Cli) -> Result<Arc<dyn TextGenerator>> {
    let config = nn_inference::Config {
        api_key: cli.model_api_key.clone(),
        model_name: cli.model_name.clone(),
        model_url: cli.model_url.clone(),
        timeout: cli.llm_timeout.0,
    };
    let model = create_model(cli.model, config)?;
    info!("🧠 Inference model initialized (using {})", model.name());
    Ok(model)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config = RecommendationConfig {
        llm_timeout: cli.llm_timeout.0,
        ..Default::default()
    };
    let source = create_source(&cli)?;

    match &cli.command {
        Commands::Serve { host, port } => {
            let generator = create_generator(&cli)?;
            let store = nn_storage::create_storage(&cli.storage).await?;
            let state = AppState::new(source, store, generator, config);
            nn_web::serve(SocketAddr::new(*host, *port), state).await?;
        }
        Commands::Recommend {
            categories,
            interests,
            sources,
            limit,
        } => {
            let preferences = UserPreferences {
                categories: categories.clone(),
                interests: interests.clone(),
                sources: sources.clone(),
                read_articles: Vec::new(),
            };
            let batch = source.latest(1, config.recommendation_batch).await?;
            let ranker = DeterministicRanker::new(config.weights);
            for scored in ranker.rank(&batch.articles, &preferences).into_iter().take(*limit) {
                println!(
                    "{:>3}  {} ({}) {}",
                    scored.relevance_score, scored.article.title, scored.article.source, scored.article.url
                );
            }
        }
        Commands::Ask { query } => {
            let ranker = SemanticRanker::new(create_generator(&cli)?, &config);
            let batch = source.latest(1, config.semantic_batch).await?;
            for (i, article) in ranker.rank_by_query(&batch.articles, query).await?.iter().enumerate() {
                println!("{:>2}. {} ({}) {}", i + 1, article.title, article.source, article.url);
            }
        }
        Commands::Topics => {
            let extractor = TopicExtractor::new(create_generator(&cli)?, &config);
            let batch = source.latest(1, config.topic_batch).await?;
            let topics = extractor.extract_topics(&batch.articles).await;
            if topics.is_empty() {
                println!("No topics found");
            }
            for topic in topics {
                println!("- {}", topic);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_recommend_arguments() {
        let cli = Cli::try_parse_from([
            "nn",
            "--news-api-key",
            "k",
            "--model",
            "dummy",
            "--llm-timeout",
            "5s",
            "recommend",
            "--category",
            "technology",
            "--interest",
            "ai",
            "--source",
            "TechCrunch",
        ])
        .unwrap();

        assert_eq!(cli.model, ModelKind::Dummy);
        assert_eq!(cli.llm_timeout.0, std::time::Duration::from_secs(5));
        match cli.command {
            Commands::Recommend {
                categories,
                interests,
                sources,
                limit,
            } => {
                assert_eq!(categories, vec![Category::Technology]);
                assert_eq!(interests, vec!["ai".to_string()]);
                assert_eq!(sources, vec!["TechCrunch".to_string()]);
                assert_eq!(limit, 20);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let result = Cli::try_parse_from(["nn", "recommend", "--category", "politics"]);
        assert!(result.is_err());
    }
}
