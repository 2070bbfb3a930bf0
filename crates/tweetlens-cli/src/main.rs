use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tweetlens_core::{PatternsSummary, TweetRecord};

#[derive(Parser)]
#[command(name = "tweetlens")]
#[command(author, version, about = "Tweet dataset analytics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true, help = "Enable debug logging")]
    debug: bool,
}

#[derive(Args)]
struct InputArgs {
    #[arg(long, help = "Path to the tweets JSON file")]
    tweets: Option<PathBuf>,

    #[arg(long, help = "Path to the patterns JSON file")]
    patterns: Option<PathBuf>,

    #[arg(long, help = "Base URL serving /api/tweets and /api/patterns")]
    url: Option<String>,

    #[arg(long, help = "Output as JSON")]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Show dataset-wide headline numbers")]
    Overview {
        #[command(flatten)]
        input: InputArgs,
    },
    #[command(about = "Show sentiment distribution, per-language breakdown, and monthly trend")]
    Sentiment {
        #[command(flatten)]
        input: InputArgs,
    },
    #[command(about = "Show average emotion intensities")]
    Emotions {
        #[command(flatten)]
        input: InputArgs,
    },
    #[command(about = "Show engagement composition, rate distribution, and viral split")]
    Engagement {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long, num_args = 2, value_names = ["LANG_A", "LANG_B"],
              help = "Compare mean engagement between two language cohorts")]
        compare: Option<Vec<String>>,
    },
    #[command(about = "Show posting-time histograms and the day-of-week ranking")]
    Temporal {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long, default_value_t = 3, help = "Number of peak hours to highlight")]
        peaks: usize,
    },
    #[command(about = "Show discourse types, writing styles, and top named entities")]
    Linguistics {
        #[command(flatten)]
        input: InputArgs,
    },
    #[command(about = "Filter the dataset and recompute statistics over the subset")]
    Explore {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long, help = "Substring match against original or translated text")]
        query: Option<String>,
        #[arg(long, help = "Sentiment label (positive, negative, neutral), any case")]
        sentiment: Option<String>,
        #[arg(long, help = "Exact language label")]
        language: Option<String>,
        #[arg(long, default_value_t = 10, help = "Number of matches to list")]
        top: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Overview { input } => run_overview(&input),
        Commands::Sentiment { input } => run_sentiment(&input),
        Commands::Emotions { input } => run_emotions(&input),
        Commands::Engagement { input, compare } => run_engagement(&input, compare),
        Commands::Temporal { input, peaks } => run_temporal(&input, peaks),
        Commands::Linguistics { input } => run_linguistics(&input),
        Commands::Explore {
            input,
            query,
            sentiment,
            language,
            top,
        } => run_explore(&input, query, sentiment, language, top),
    }
}

/// Resolves the dataset from either local files or a remote endpoint.
/// A missing patterns source degrades to an empty patterns document.
fn load_dataset(input: &InputArgs) -> Result<(Vec<TweetRecord>, PatternsSummary)> {
    if let Some(url) = &input.url {
        use tokio::runtime::Runtime;

        let rt = Runtime::new()?;
        let (tweets, patterns) = rt
            .block_on(tweetlens_core::fetch_dataset(url))
            .with_context(|| format!("fetching dataset from {url}"))?;
        return Ok((tweets, patterns));
    }

    let Some(tweets_path) = &input.tweets else {
        bail!("either --tweets or --url is required");
    };
    let tweets = tweetlens_core::load_tweets_file(tweets_path)?;
    let patterns = match &input.patterns {
        Some(path) => tweetlens_core::load_patterns_file(path)?,
        None => PatternsSummary::default(),
    };
    Ok((tweets, patterns))
}

fn new_table(header: Vec<&str>) -> comfy_table::Table {
    use comfy_table::{ContentArrangement, Table};

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_overview(input: &InputArgs) -> Result<()> {
    let (tweets, _) = load_dataset(input)?;
    let overview = tweetlens_core::overview_summary(&tweets);

    if input.json {
        return print_json(&overview);
    }

    use colored::Colorize;

    println!("Tweets analyzed:  {}", overview.total_tweets);
    println!("Avg engagement:   {:.1}", overview.avg_engagement);
    println!(
        "Viral tweets:     {} ({}%)",
        overview.viral_count, overview.viral_percent
    );
    println!("Positive share:   {}%", overview.positive_percent);

    let mut table = new_table(vec!["Language", "Tweets"]);
    for cohort in &overview.languages {
        table.add_row(vec![cohort.language.clone(), cohort.count.to_string()]);
    }
    println!("\n{table}");

    let top = tweetlens_core::top_tweets(&tweets, tweetlens_core::TOP_TWEETS);
    if !top.is_empty() {
        println!("\n{}", "Top tweets by engagement".bold());
        for tweet in &top {
            println!(
                "  {:>7.1}  @{}  {}",
                tweet.total_engagement,
                tweet.author_username,
                truncate(&tweet.text, 60)
            );
        }
    }
    Ok(())
}

fn run_sentiment(input: &InputArgs) -> Result<()> {
    let (tweets, _) = load_dataset(input)?;
    let distribution = tweetlens_core::sentiment_distribution(&tweets);
    let by_language = tweetlens_core::sentiment_by_language(&tweets, tweetlens_core::TOP_LANGUAGES);
    let trend = tweetlens_core::sentiment_trends(&tweets);

    if input.json {
        #[derive(serde::Serialize)]
        struct SentimentJson {
            distribution: tweetlens_core::SentimentDistribution,
            by_language: Vec<tweetlens_core::LanguageSentiment>,
            trend: Vec<tweetlens_core::MonthlySentiment>,
        }
        return print_json(&SentimentJson {
            distribution,
            by_language,
            trend,
        });
    }

    let mut table = new_table(vec!["Sentiment", "Tweets", "Share"]);
    for slice in &distribution.slices {
        table.add_row(vec![
            slice.sentiment.clone(),
            slice.count.to_string(),
            format!("{}%", slice.percent),
        ]);
    }
    println!("{table}");

    if !by_language.is_empty() {
        let mut table = new_table(vec!["Language", "Tweets", "Positive", "Negative", "Neutral"]);
        for cohort in &by_language {
            table.add_row(vec![
                cohort.language.clone(),
                cohort.tweet_count.to_string(),
                format!("{}%", cohort.positive_percent),
                format!("{}%", cohort.negative_percent),
                format!("{}%", cohort.neutral_percent),
            ]);
        }
        println!("\n{table}");
    }

    if !trend.is_empty() {
        let mut table = new_table(vec!["Month", "Tweets", "Positive", "Negative", "Neutral"]);
        for month in &trend {
            table.add_row(vec![
                month.month.clone(),
                month.tweet_count.to_string(),
                format!("{}%", month.positive_percent),
                format!("{}%", month.negative_percent),
                format!("{}%", month.neutral_percent),
            ]);
        }
        println!("\n{table}");
    }
    Ok(())
}

fn run_emotions(input: &InputArgs) -> Result<()> {
    let (tweets, _) = load_dataset(input)?;
    let averages = tweetlens_core::emotion_averages(&tweets);

    if input.json {
        return print_json(&averages);
    }

    let mut table = new_table(vec!["Emotion", "Avg intensity"]);
    for average in &averages {
        table.add_row(vec![average.emotion.clone(), average.value.to_string()]);
    }
    println!("{table}");
    Ok(())
}

fn run_engagement(input: &InputArgs, compare: Option<Vec<String>>) -> Result<()> {
    let (tweets, _) = load_dataset(input)?;
    let composition = tweetlens_core::engagement_composition(&tweets);
    let rates = tweetlens_core::engagement_rate_distribution(&tweets);
    let viral = tweetlens_core::viral_split(&tweets);
    let comparison = compare
        .as_deref()
        .map(|langs| tweetlens_core::compare_language_engagement(&tweets, &langs[0], &langs[1]));

    if input.json {
        #[derive(serde::Serialize)]
        struct EngagementJson {
            composition: tweetlens_core::EngagementComposition,
            rate_distribution: tweetlens_core::RateDistribution,
            viral: tweetlens_core::ViralSplit,
            #[serde(skip_serializing_if = "Option::is_none")]
            comparison: Option<tweetlens_core::LanguageComparison>,
            top_hashtags: Vec<tweetlens_core::TermCount>,
        }
        return print_json(&EngagementJson {
            composition,
            rate_distribution: rates,
            viral,
            comparison,
            top_hashtags: tweetlens_core::top_hashtags(&tweets, tweetlens_core::TOP_HASHTAGS),
        });
    }

    use colored::Colorize;

    let mut table = new_table(vec!["Interaction", "Count", "Share"]);
    for slice in &composition.slices {
        table.add_row(vec![
            slice.name.clone(),
            slice.count.to_string(),
            format!("{:.1}%", slice.percent),
        ]);
    }
    println!("{table}");
    println!("Total interactions: {}", composition.total);

    let mut table = new_table(vec!["Rate bin", "Tweets"]);
    for bin in &rates.bins {
        table.add_row(vec![bin.label.clone(), bin.count.to_string()]);
    }
    println!("\n{table}");
    println!("Mean rate: {:.3}  Median rate: {:.3}", rates.mean, rates.median);

    println!(
        "\nViral (> {:.0} engagement): {} tweets ({:.1}%), mean {:.1}, max {:.1}; others mean {:.1}",
        viral.threshold,
        viral.viral_count,
        viral.viral_percent,
        viral.viral_mean,
        viral.viral_max,
        viral.non_viral_mean
    );

    if let Some(comparison) = comparison {
        match &comparison.leader {
            Some(leader) => println!(
                "\n{} tweets average {:.1}% more engagement ({:.1} vs {:.1})",
                leader.bold(),
                comparison.surplus_percent,
                comparison.mean_a.max(comparison.mean_b),
                comparison.mean_a.min(comparison.mean_b)
            ),
            None => println!(
                "\n{} and {} are tied at {:.1} mean engagement",
                comparison.language_a, comparison.language_b, comparison.mean_a
            ),
        }
    }

    let hashtags = tweetlens_core::top_hashtags(&tweets, tweetlens_core::TOP_HASHTAGS);
    if !hashtags.is_empty() {
        println!("\n{}", "Top hashtags".bold());
        for hashtag in &hashtags {
            println!("  {:>5}  {}", hashtag.count, hashtag.term);
        }
    }
    Ok(())
}

fn run_temporal(input: &InputArgs, peaks: usize) -> Result<()> {
    let (tweets, patterns) = load_dataset(input)?;
    let hourly = tweetlens_core::hourly_activity(&tweets);
    let daily = tweetlens_core::daily_activity(&tweets);
    let monthly = tweetlens_core::monthly_activity(&tweets);
    let ranking = tweetlens_core::day_engagement_ranking(&tweets);
    let volume = tweetlens_core::daily_volume_overlay(&patterns);
    let split = tweetlens_core::weekend_split(&daily);

    if input.json {
        #[derive(serde::Serialize)]
        struct TemporalJson {
            hourly: Vec<tweetlens_core::HourBucket>,
            daily: Vec<tweetlens_core::DayBucket>,
            monthly: Vec<tweetlens_core::MonthBucket>,
            peak_hours: Vec<u32>,
            day_ranking: tweetlens_core::DayEngagementRanking,
            daily_volume: Vec<tweetlens_core::DayBucket>,
            weekend_split: tweetlens_core::WeekendSplit,
        }
        return print_json(&TemporalJson {
            peak_hours: tweetlens_core::peak_hours(&hourly, peaks),
            hourly,
            daily,
            monthly,
            day_ranking: ranking,
            daily_volume: volume,
            weekend_split: split,
        });
    }

    use colored::Colorize;

    let mut table = new_table(vec!["Day", "Tweets", "Reported volume", "Mean engagement"]);
    for (index, bucket) in daily.iter().enumerate() {
        let mean = ranking
            .days
            .iter()
            .find(|d| d.day == bucket.day)
            .map(|d| d.mean_engagement)
            .unwrap_or(0.0);
        table.add_row(vec![
            bucket.day.clone(),
            bucket.count.to_string(),
            volume[index].count.to_string(),
            format!("{mean:.1}"),
        ]);
    }
    println!("{table}");
    println!(
        "Best day: {}  |  Weekday {}% / Weekend {}%",
        ranking.best_day.bold(),
        split.weekday_percent,
        split.weekend_percent
    );

    let peak_hours = tweetlens_core::peak_hours(&hourly, peaks);
    let formatted: Vec<String> = peak_hours.iter().map(|h| format!("{h:02}:00")).collect();
    println!("Peak hours: {}", formatted.join(", "));

    let mut table = new_table(vec!["Month", "Tweets"]);
    for bucket in &monthly {
        table.add_row(vec![bucket.month.clone(), bucket.count.to_string()]);
    }
    println!("\n{table}");
    Ok(())
}

fn run_linguistics(input: &InputArgs) -> Result<()> {
    let (tweets, _) = load_dataset(input)?;
    let discourse = tweetlens_core::discourse_types(&tweets);
    let styles = tweetlens_core::writing_styles(&tweets);
    let entities = tweetlens_core::top_named_entities(&tweets, tweetlens_core::TOP_ENTITIES);
    let coherence = tweetlens_core::average_coherence(&tweets);

    if input.json {
        #[derive(serde::Serialize)]
        struct LinguisticsJson {
            discourse_types: Vec<tweetlens_core::CategoryCount>,
            writing_styles: Vec<tweetlens_core::CategoryCount>,
            top_entities: Vec<tweetlens_core::TermCount>,
            average_coherence: f64,
        }
        return print_json(&LinguisticsJson {
            discourse_types: discourse,
            writing_styles: styles,
            top_entities: entities,
            average_coherence: coherence,
        });
    }

    use colored::Colorize;

    let mut table = new_table(vec!["Discourse type", "Tweets", "Share"]);
    for category in &discourse {
        table.add_row(vec![
            category.name.clone(),
            category.count.to_string(),
            format!("{}%", category.percent),
        ]);
    }
    println!("{table}");

    let mut table = new_table(vec!["Writing style", "Tweets", "Share"]);
    for category in &styles {
        table.add_row(vec![
            category.name.clone(),
            category.count.to_string(),
            format!("{}%", category.percent),
        ]);
    }
    println!("\n{table}");
    println!("Average coherence: {coherence:.1}");

    if !entities.is_empty() {
        println!("\n{}", "Top named entities".bold());
        for entity in &entities {
            println!("  {:>5}  {}", entity.count, entity.term);
        }
    }
    Ok(())
}

fn run_explore(
    input: &InputArgs,
    query: Option<String>,
    sentiment: Option<String>,
    language: Option<String>,
    top: usize,
) -> Result<()> {
    let (tweets, _) = load_dataset(input)?;
    let loaded = tweets.len();

    let filter = tweetlens_core::TweetFilter {
        query,
        sentiment,
        language,
    };
    let matched = tweetlens_core::apply_filter(tweets, &filter);

    let overview = tweetlens_core::overview_summary(&matched);
    let distribution = tweetlens_core::sentiment_distribution(&matched);
    let listing = tweetlens_core::top_tweets(&matched, top);

    if input.json {
        #[derive(serde::Serialize)]
        struct ExploreJson {
            loaded: usize,
            matched: usize,
            overview: tweetlens_core::OverviewSummary,
            sentiment: tweetlens_core::SentimentDistribution,
            tweets: Vec<tweetlens_core::TopTweet>,
        }
        return print_json(&ExploreJson {
            loaded,
            matched: matched.len(),
            overview,
            sentiment: distribution,
            tweets: listing,
        });
    }

    use colored::Colorize;

    println!("Matched {} of {} tweets", matched.len(), loaded);
    println!("Avg engagement: {:.1}", overview.avg_engagement);
    for slice in &distribution.slices {
        println!("  {}: {} ({}%)", slice.sentiment, slice.count, slice.percent);
    }

    if !listing.is_empty() {
        let mut table = new_table(vec!["Engagement", "Author", "Sentiment", "Text"]);
        for tweet in &listing {
            table.add_row(vec![
                format!("{:.1}", tweet.total_engagement),
                format!("@{}", tweet.author_username),
                tweet.sentiment.clone(),
                truncate(&tweet.text, 60),
            ]);
        }
        println!("\n{table}");
    } else {
        println!("{}", "No tweets matched the filter".bright_black());
    }
    Ok(())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}
