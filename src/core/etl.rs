use crate::core::{Pipeline, TopperReport};
use crate::utils::error::Result;

#[derive(Debug)]
pub struct EtlOutput {
    pub output_path: String,
    pub report: TopperReport,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<EtlOutput> {
        tracing::info!("Starting grading run...");

        // Extract
        tracing::info!("Extracting student rows...");
        let parsed = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} records ({} malformed rows skipped)",
            parsed.records.len(),
            parsed.skipped_rows
        );

        // Transform
        tracing::info!("Grading records...");
        let report = self.pipeline.transform(parsed).await?;
        tracing::info!(
            "Graded {} records across {} universities",
            report.graded_records.len(),
            report.university_toppers.len()
        );

        // Load
        tracing::info!("Writing reports...");
        let output_path = self.pipeline.load(&report).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(EtlOutput {
            output_path,
            report,
        })
    }
}
