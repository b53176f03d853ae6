//! Generate CV documents from a record file
//! Run with: cargo run -p cv-generator --example generate -- demos/sample_record.json [country office]
//!
//! Without a country/office pair a combined record produces all six documents,
//! any other record produces the document of its own office.
//! Set TKCV_CONFIG to a configuration JSON to override the default folders.

use anyhow::Context;
use cv_generator::{Generator, GeneratorConfig};
use cv_template::{parse_record, FamilyDetails};
use std::env;
use std::fs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let record_path = args
        .first()
        .map(String::as_str)
        .unwrap_or("demos/sample_record.json");

    let config = match env::var("TKCV_CONFIG") {
        Ok(path) => GeneratorConfig::from_file(&path)
            .with_context(|| format!("loading configuration {path}"))?,
        Err(_) => GeneratorConfig::default(),
    };
    println!("=== tkcv generator ===\n");
    println!("Templates: {}", config.template_root.display());
    println!("Output:    {}\n", config.output_dir.display());

    let json = fs::read_to_string(record_path)
        .with_context(|| format!("reading record {record_path}"))?;
    let record = parse_record(&json)?;
    let generator = Generator::from_config(config)?;

    let saved = match (args.get(1), args.get(2)) {
        (Some(country), Some(office)) => {
            vec![generator.generate(&record, country, office).await?]
        }
        _ if matches!(record.details, FamilyDetails::Combined(_)) => {
            generator.generate_all(&record).await?
        }
        _ => vec![
            generator
                .generate_for(&record, record.default_office())
                .await?,
        ],
    };

    for name in &saved {
        println!("  {name}");
    }
    println!("\n{} document(s) written", saved.len());
    Ok(())
}
