use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use demog::{
    Document, FittedPipeline, Gender, evaluate_all_configurations, evaluate_holdout,
    mean_accuracy_per_setting,
};
use serde::Deserialize;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "demog")]
#[command(about = "Sweep tokenizer configurations for gender classification and analyze the fitted model", long_about = None)]
struct Cli {
    /// Labeled training corpus (JSON array of {text, profile?, label})
    #[arg(long, value_name = "PATH")]
    train: PathBuf,

    /// Independently labeled held-out corpus with the same shape
    #[arg(long, value_name = "PATH")]
    holdout: PathBuf,

    /// Number of cross-validation folds
    #[arg(short = 'k', long, default_value_t = 5)]
    folds: usize,

    /// How many coefficients / misclassified documents to print per class
    #[arg(short = 'n', long, default_value_t = 5)]
    top: usize,

    /// Save the fitted pipeline as JSON
    #[arg(long, value_name = "PATH")]
    save_model: Option<PathBuf>,
}

/// One corpus entry on disk; split into label-free documents plus labels.
#[derive(Deserialize)]
struct LabeledRecord {
    text: String,
    #[serde(default)]
    profile: Option<String>,
    label: Gender,
}

fn load_corpus(path: &Path) -> Result<(Vec<Document>, Vec<Gender>)> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read corpus file: {}", path.display()))?;
    let records: Vec<LabeledRecord> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse JSON corpus: {}", path.display()))?;

    let mut documents = Vec::with_capacity(records.len());
    let mut labels = Vec::with_capacity(records.len());
    for record in records {
        let mut document = Document::new(record.text);
        if let Some(profile) = record.profile {
            document = document.with_profile(profile);
        }
        documents.push(document);
        labels.push(record.label);
    }
    Ok((documents, labels))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    let (documents, labels) = load_corpus(&cli.train)?;
    println!("Read {} training documents", documents.len());

    let ranked = evaluate_all_configurations(&documents, &labels, cli.folds)?;
    let best = ranked.first().context("configuration sweep returned no results")?;
    let worst = ranked.last().context("configuration sweep returned no results")?;
    println!("\nBest cross-validation accuracy: {:.5}", best.accuracy);
    println!("  {}", best.params);
    println!("Worst cross-validation accuracy: {:.5}", worst.accuracy);
    println!("  {}", worst.params);

    println!("\nMean accuracy per setting:");
    for (setting, mean) in mean_accuracy_per_setting(&ranked) {
        println!("  {setting}: {mean:.5}");
    }

    let pipeline = FittedPipeline::fit(&documents, &labels, best.params.clone())?;
    println!("\nTop coefficients per class:");
    for class in [Gender::Male, Gender::Female] {
        println!("{class} tokens:");
        for (token, weight) in pipeline.top_coefficients(class, cli.top)? {
            println!("  {token}: {weight:.5}");
        }
    }

    let (holdout_documents, holdout_labels) = load_corpus(&cli.holdout)?;
    let report = evaluate_holdout(&pipeline, &holdout_documents, &holdout_labels)?;
    println!(
        "\nHeld-out instances: {} male, {} female",
        report.male_count, report.female_count
    );
    println!("Held-out accuracy: {:.5}", report.accuracy);

    println!("\nTop misclassified held-out documents:");
    for item in report.top_misclassified(cli.top) {
        println!(
            "  truth={} predicted={} confidence={:.5} text={}",
            item.truth, item.predicted, item.confidence, item.document.text
        );
        if let Some(profile) = &item.document.profile {
            println!("    profile={profile}");
        }
    }

    if let Some(path) = &cli.save_model {
        pipeline
            .save(path)
            .with_context(|| format!("Failed to save fitted pipeline to {}", path.display()))?;
        println!("\nFitted pipeline saved to {}", path.display());
    }

    Ok(())
}
