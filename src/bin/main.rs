use clap::{Parser, Subcommand, ValueEnum};
use crossterm::style::Stylize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use wordlist_core::core::phonotactics::PhonotacticScorer;
use wordlist_core::persistence::{
    load_category_tables, load_config, load_word_stream, save_report, save_wordlist,
};
use wordlist_core::stats::PipelineReport;
use wordlist_core::{
    AdmissionPipeline, CategoryFilters, PipelineConfig, QualityTier, WordlistResult,
};

#[derive(Parser, Debug)]
#[command(name = "wordlist_gen")]
#[command(about = "Builds a fixed-size mnemonic wordlist from a foundation list and a frequency corpus")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the admission pipeline and write the wordlist and report
    Generate(GenerateArgs),
    /// Show how individual words would be judged
    Check(CheckArgs),
}

#[derive(clap::Args, Debug)]
struct GenerateArgs {
    /// Foundation wordlist, one word per line (e.g. BIP39 english.txt)
    #[arg(long)]
    foundation: PathBuf,

    /// Candidate corpus in descending frequency order
    #[arg(long)]
    candidates: PathBuf,

    /// Category tables JSON (defaults to the bundled tables)
    #[arg(long)]
    categories: Option<PathBuf>,

    /// Pipeline configuration JSON
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(short, long, default_value = "wordlists/wordlist_65536.txt")]
    output: PathBuf,

    #[arg(long, default_value = "wordlists/wordlist_65536_report.json")]
    report: PathBuf,

    #[arg(long)]
    target_size: Option<usize>,

    #[arg(long)]
    batch_size: Option<usize>,

    /// Reject scored words below this tier (premium, excellent, very_good, good, acceptable)
    #[arg(long)]
    min_tier: Option<QualityTier>,

    #[arg(long, value_enum, default_value_t = SortOrder::Admission)]
    sort: SortOrder,

    /// Score candidates on a single thread
    #[arg(long)]
    serial: bool,
}

#[derive(clap::Args, Debug)]
struct CheckArgs {
    /// Words to evaluate
    #[arg(required = true)]
    words: Vec<String>,

    #[arg(long)]
    categories: Option<PathBuf>,

    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SortOrder {
    /// Foundation first, then corpus words by rank
    Admission,
    Alphabetical,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Generate(args) => generate(args),
        Command::Check(args) => check(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_filters(path: Option<&Path>) -> WordlistResult<CategoryFilters> {
    match path {
        Some(path) => Ok(CategoryFilters::from_tables(&load_category_tables(path)?)),
        None => CategoryFilters::bundled(),
    }
}

fn load_base_config(path: Option<&Path>) -> WordlistResult<PipelineConfig> {
    match path {
        Some(path) => load_config(path),
        None => Ok(PipelineConfig::default()),
    }
}

fn generate(args: GenerateArgs) -> WordlistResult<()> {
    let mut config = load_base_config(args.config.as_deref())?;
    if let Some(target_size) = args.target_size {
        config.target_size = target_size;
    }
    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }
    if args.min_tier.is_some() {
        config.min_tier = args.min_tier;
    }

    let filters = load_filters(args.categories.as_deref())?;
    let foundation = load_word_stream(&args.foundation)?;
    let candidates = load_word_stream(&args.candidates)?;

    let mut pipeline = AdmissionPipeline::new(config, filters)?;
    pipeline.seed(&foundation)?;
    if args.serial {
        pipeline.scan(&candidates);
    } else {
        scan_default(&mut pipeline, &candidates);
    }
    let run = pipeline.finish()?;

    let mut words = run.words;
    if args.sort == SortOrder::Alphabetical {
        words.sort_unstable();
    }
    save_wordlist(&words, &args.output)?;
    save_report(&run.report, &args.report)?;

    print_summary(&run.report, &args.output);
    if run.report.under_filled {
        warn!(
            missing = run.report.shortfall(),
            "wordlist is under-filled; supply a larger candidate corpus"
        );
    }
    Ok(())
}

#[cfg(feature = "parallel")]
fn scan_default(pipeline: &mut AdmissionPipeline, candidates: &[String]) {
    pipeline.scan_parallel(candidates);
}

#[cfg(not(feature = "parallel"))]
fn scan_default(pipeline: &mut AdmissionPipeline, candidates: &[String]) {
    pipeline.scan(candidates);
}

fn check(args: CheckArgs) -> WordlistResult<()> {
    let config = load_base_config(args.config.as_deref())?;
    let pipeline = AdmissionPipeline::new(config, load_filters(args.categories.as_deref())?)?;
    let scorer = PhonotacticScorer::new(pipeline.config().weights.clone());

    for raw in &args.words {
        let outcome = pipeline.evaluate(raw);
        if outcome.accepted {
            let breakdown = scorer.score(&outcome.word);
            println!(
                "{:12} {} score {:.3}  (length {:.2}, syllables {:.2}, alternation {:.2}, clarity {:.2}, repetition {:.2})",
                outcome.word,
                styled_tier(outcome.tier),
                outcome.score,
                breakdown.length,
                breakdown.syllables,
                breakdown.alternation,
                breakdown.clarity,
                breakdown.repetition,
            );
        } else {
            let reason = outcome.reason.map(|r| r.to_string()).unwrap_or_default();
            println!("{:12} {} {}", outcome.word, "rejected".red(), reason);
        }
    }
    Ok(())
}

fn styled_tier(tier: QualityTier) -> String {
    let label = format!("{:10}", tier.as_str());
    match tier {
        QualityTier::Premium => label.green().bold().to_string(),
        QualityTier::Excellent => label.green().to_string(),
        QualityTier::VeryGood => label.cyan().to_string(),
        QualityTier::Good => label.yellow().to_string(),
        QualityTier::Acceptable => label.dark_yellow().to_string(),
        QualityTier::Rejected => label.red().to_string(),
    }
}

fn print_summary(report: &PipelineReport, output: &Path) {
    println!("{}", "Wordlist generation complete".bold());
    println!("---------------------------------------------------------------");
    let achieved = format!("{}/{}", report.achieved, report.target_size);
    println!(
        "Words:      {} (foundation {})",
        if report.under_filled { achieved.red() } else { achieved.green() },
        report.foundation_count
    );
    println!(
        "Processed:  {} (accepted {}, rejected {})",
        report.total_processed, report.total_accepted, report.total_rejected
    );
    if !report.rejection_histogram.is_empty() {
        println!("\nRejection reasons:");
        let mut reasons: Vec<_> = report.rejection_histogram.iter().collect();
        reasons.sort_by_key(|&(_, count)| std::cmp::Reverse(*count));
        for (reason, count) in reasons {
            println!("  - {:32} {}", reason.as_str(), count);
        }
    }
    if !report.tier_distribution.is_empty() {
        println!("\nTier distribution:");
        for (tier, count) in report.tier_distribution.iter().rev() {
            println!("  {} {}", styled_tier(*tier), count);
        }
    }
    let analysis = &report.analysis;
    println!("\nList analysis:");
    println!("  average length     {:.2}", analysis.average_length);
    println!(
        "  length spread      {}",
        analysis
            .length_distribution
            .iter()
            .map(|(len, count)| format!("{}:{}", len, count))
            .collect::<Vec<_>>()
            .join(" ")
    );
    println!("  starts with vowel  {}", analysis.starts_with_vowel);
    println!("  ends with vowel    {}", analysis.ends_with_vowel);
    println!("  double letters     {}", analysis.contains_double);
    println!("  cvc / cvcv         {} / {}", analysis.cvc, analysis.cvcv);
    if let Some(mean) = analysis.mean_score {
        println!("  mean score         {:.3}", mean);
    }
    println!("\nSaved to '{}'", output.display());
}
