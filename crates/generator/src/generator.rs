//! Single-document and batch generation

use crate::assets::{load_backgrounds, AssetSource, FsAssetSource};
use crate::config::GeneratorConfig;
use crate::sink::{DocumentSink, FileSink};
use crate::{GeneratorError, Result};
use chrono::NaiveDate;
use cv_template::{
    plan_batch, resolve_office, ApplicantRecord, DocumentRenderer, LayoutRegistry, Office,
};
use std::sync::Arc;

/// Renders records and hands the documents to a sink
pub struct Generator<A, S> {
    registry: Arc<LayoutRegistry>,
    assets: A,
    sink: S,
    config: GeneratorConfig,
    reference_date: Option<NaiveDate>,
}

impl Generator<FsAssetSource, FileSink> {
    /// Built-in layouts, templates and output folders from `config`
    pub fn from_config(config: GeneratorConfig) -> Result<Self> {
        let registry = Arc::new(LayoutRegistry::builtin()?);
        let assets = FsAssetSource::new(&config.template_root);
        let sink = FileSink::new(&config.output_dir);
        Ok(Self::new(registry, assets, sink, config))
    }
}

impl<A: AssetSource, S: DocumentSink> Generator<A, S> {
    pub fn new(
        registry: Arc<LayoutRegistry>,
        assets: A,
        sink: S,
        config: GeneratorConfig,
    ) -> Self {
        Self {
            registry,
            assets,
            sink,
            config,
            reference_date: None,
        }
    }

    /// Fix the date used for ages and default print dates
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Generate one document for free-text selectors
    ///
    /// Unknown selectors fall back to a default office with a warning.
    /// Returns the saved file name.
    pub async fn generate(
        &self,
        record: &ApplicantRecord,
        country: &str,
        office: &str,
    ) -> Result<String> {
        let resolution = resolve_office(country, office);
        self.generate_for(record, resolution.office).await
    }

    /// Generate one document for a known office
    pub async fn generate_for(&self, record: &ApplicantRecord, office: Office) -> Result<String> {
        log::debug!("generating {office} for '{}'", record.core.full_name);
        let backgrounds = load_backgrounds(&self.assets, office, &self.config).await;

        let reference_date = self
            .reference_date
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let document = DocumentRenderer::new(&self.registry, reference_date)
            .render_pdf(record, office, &backgrounds)?;

        self.sink.save(&document).await?;
        Ok(document.file_name)
    }

    /// Generate all six documents of a combined record, one after another
    ///
    /// The first failure stops the batch. The error lists the documents
    /// already saved and how many were never attempted.
    pub async fn generate_all(&self, record: &ApplicantRecord) -> Result<Vec<String>> {
        let jobs = plan_batch(record)?;
        let total = jobs.len();
        let mut saved = Vec::with_capacity(total);

        for (i, job) in jobs.into_iter().enumerate() {
            if i > 0 && !self.config.batch_delay().is_zero() {
                tokio::time::sleep(self.config.batch_delay()).await;
            }

            match self.generate_for(&job.record, job.office).await {
                Ok(name) => saved.push(name),
                Err(source) => {
                    log::warn!("batch failed at {}: {source}", job.office);
                    return Err(GeneratorError::BatchStep {
                        office: job.office,
                        saved,
                        skipped: total - i - 1,
                        source: Box::new(source),
                    });
                }
            }
        }

        log::info!("batch complete: {} documents", saved.len());
        Ok(saved)
    }
}
