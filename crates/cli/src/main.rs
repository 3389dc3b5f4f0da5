use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use data_loader::MovieCatalog;
use mining::{generate, mine, sort_descending, AssociationRule, RuleMetric};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

/// GenreMiner - genre association mining over a MovieLens catalog
#[derive(Parser)]
#[command(name = "genre-miner")]
#[command(about = "Mines frequent genre combinations and association rules from movies.csv", long_about = None)]
struct Cli {
    /// Path to the MovieLens movies.csv file
    #[arg(short, long, default_value = "data/ml-20m/movies.csv")]
    movies: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show catalog size and genre distribution
    Overview,

    /// Mine frequent genre itemsets
    Itemsets {
        /// Minimum support fraction in (0, 1]
        #[arg(long, default_value = "0.005")]
        min_support: f64,

        /// How many itemsets to display, by support descending
        #[arg(long, default_value = "15")]
        top: usize,
    },

    /// Derive association rules from the frequent itemsets
    Rules {
        /// Minimum support fraction in (0, 1]
        #[arg(long, default_value = "0.005")]
        min_support: f64,

        /// Minimum confidence fraction in (0, 1]
        #[arg(long, default_value = "0.3")]
        min_confidence: f64,

        /// Metric to sort by, descending
        #[arg(long, value_enum, default_value_t = SortKey::Lift)]
        sort: SortKey,

        /// How many rules to display
        #[arg(long, default_value = "50")]
        top: usize,

        /// Emit the rules as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Recommend genres associated with a given genre
    Recommend {
        /// Genre whose associations to look up (e.g. "Adventure")
        #[arg(long)]
        genre: String,

        /// Minimum support fraction in (0, 1]
        #[arg(long, default_value = "0.005")]
        min_support: f64,

        /// Minimum confidence fraction in (0, 1]
        #[arg(long, default_value = "0.3")]
        min_confidence: f64,

        /// How many rules to consider, by lift descending
        #[arg(long, default_value = "10")]
        top: usize,
    },
}

/// Rule metric selectable on the command line
#[derive(Clone, Copy, ValueEnum)]
enum SortKey {
    Lift,
    Confidence,
    Support,
}

impl From<SortKey> for RuleMetric {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Lift => RuleMetric::Lift,
            SortKey::Confidence => RuleMetric::Confidence,
            SortKey::Support => RuleMetric::Support,
        }
    }
}

/// One rule as emitted on the JSON surface
#[derive(Serialize)]
struct RuleRow {
    antecedents: String,
    consequents: String,
    support: f64,
    confidence: f64,
    lift: f64,
}

impl RuleRow {
    fn new(rule: &AssociationRule, names: &[String]) -> Self {
        Self {
            antecedents: rule.antecedent.label(names),
            consequents: rule.consequent.label(names),
            support: rule.support,
            confidence: rule.confidence,
            lift: rule.lift,
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load the catalog (this may take a moment on the full 20M snapshot)
    let start = Instant::now();
    let catalog = MovieCatalog::load(&cli.movies)
        .with_context(|| format!("Failed to load catalog from {}", cli.movies.display()))?;
    eprintln!(
        "{} Loaded {} movies over {} genres in {:?}",
        "✓".green(),
        catalog.movie_count(),
        catalog.genres().len(),
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Overview => handle_overview(&catalog),
        Commands::Itemsets { min_support, top } => handle_itemsets(&catalog, min_support, top)?,
        Commands::Rules {
            min_support,
            min_confidence,
            sort,
            top,
            json,
        } => handle_rules(&catalog, min_support, min_confidence, sort, top, json)?,
        Commands::Recommend {
            genre,
            min_support,
            min_confidence,
            top,
        } => handle_recommend(&catalog, &genre, min_support, min_confidence, top)?,
    }

    Ok(())
}

/// Handle the 'overview' command
fn handle_overview(catalog: &MovieCatalog) {
    println!("\n{}", "Catalog Overview".bold());
    println!("Movies: {}", catalog.movie_count());
    println!("Genres: {}", catalog.genres().len());

    println!("\n{}", "Genre Distribution".bold());
    for (genre, count) in catalog.genre_counts() {
        println!("  {:<20} {:>7}", genre, count);
    }
}

/// Handle the 'itemsets' command
fn handle_itemsets(catalog: &MovieCatalog, min_support: f64, top: usize) -> Result<()> {
    let matrix = catalog.presence_matrix();
    let frequent = mine(&matrix, min_support).context("Mining failed")?;

    if frequent.is_empty() {
        println!(
            "{}",
            "No frequent itemsets found. Try lowering --min-support.".yellow()
        );
        return Ok(());
    }

    println!(
        "\n{} frequent itemsets at support >= {:.4} ({:.2}% of movies)",
        frequent.len(),
        min_support,
        min_support * 100.0
    );
    for size in 1..=frequent.max_size() {
        println!("  size {}: {}", size, frequent.of_size(size).count());
    }

    let mut entries: Vec<_> = frequent.iter().collect();
    entries.sort_by(|a, b| {
        b.support
            .partial_cmp(&a.support)
            .expect("supports are never NaN")
    });

    println!("\n{}", format!("Top {} by support", top.min(entries.len())).bold());
    println!("{:<45} {:>9}", "itemset", "support");
    for entry in entries.iter().take(top) {
        println!(
            "{:<45} {:>9.4}",
            entry.items.label(matrix.items()),
            entry.support
        );
    }
    Ok(())
}

/// Handle the 'rules' command
fn handle_rules(
    catalog: &MovieCatalog,
    min_support: f64,
    min_confidence: f64,
    sort: SortKey,
    top: usize,
    json: bool,
) -> Result<()> {
    let matrix = catalog.presence_matrix();
    let frequent = mine(&matrix, min_support).context("Mining failed")?;
    let mut rules = generate(&frequent, min_confidence).context("Rule generation failed")?;

    if rules.is_empty() {
        println!(
            "{}",
            "No association rules found. Try lowering --min-support or --min-confidence."
                .yellow()
        );
        return Ok(());
    }

    let total = rules.len();
    sort_descending(&mut rules, sort.into());
    rules.truncate(top);

    if json {
        let rows: Vec<RuleRow> = rules
            .iter()
            .map(|rule| RuleRow::new(rule, matrix.items()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("\n{} association rules (showing top {})", total, rules.len());
    println!(
        "{:<34} {:<34} {:>9} {:>11} {:>7}",
        "antecedents", "consequents", "support", "confidence", "lift"
    );
    for rule in &rules {
        println!(
            "{:<34} {:<34} {:>9.4} {:>11.2} {:>7.2}",
            rule.antecedent.label(matrix.items()),
            rule.consequent.label(matrix.items()),
            rule.support,
            rule.confidence,
            rule.lift
        );
    }
    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    catalog: &MovieCatalog,
    genre: &str,
    min_support: f64,
    min_confidence: f64,
    top: usize,
) -> Result<()> {
    let item = catalog
        .genre_id(genre)
        .ok_or_else(|| anyhow!("Unknown genre: {} (see 'overview' for the catalog's genres)", genre))?;

    let matrix = catalog.presence_matrix();
    let frequent = mine(&matrix, min_support).context("Mining failed")?;
    let rules = generate(&frequent, min_confidence).context("Rule generation failed")?;

    // Filter on the structured antecedent, never a display label
    let mut matching: Vec<AssociationRule> = rules
        .into_iter()
        .filter(|rule| rule.antecedent_contains(item))
        .collect();

    if matching.is_empty() {
        println!(
            "{}",
            format!(
                "No association rules found for {}. Try lowering --min-support or --min-confidence.",
                genre
            )
            .yellow()
        );
        return Ok(());
    }

    sort_descending(&mut matching, RuleMetric::Lift);
    matching.truncate(top);

    let mut associated: Vec<String> = matching
        .iter()
        .flat_map(|rule| rule.consequent.items())
        .filter_map(|&id| matrix.item_name(id))
        .map(str::to_string)
        .collect();
    associated.sort();
    associated.dedup();

    println!(
        "\nUsers who like {} also like: {}.",
        genre.bold(),
        associated.join(", ")
    );

    println!("\n{}", "Top associated rules by lift".bold());
    println!("{:<40} {:>7} {:>11} {:>9}", "consequents", "lift", "confidence", "support");
    for rule in &matching {
        println!(
            "{:<40} {:>7.2} {:>11.2} {:>9.4}",
            rule.consequent.label(matrix.items()),
            rule.lift,
            rule.confidence,
            rule.support
        );
    }
    Ok(())
}
