use crate::core::grading::{calculate_grades, grade_distribution};
use crate::core::parser::read_records;
use crate::core::toppers::{find_overall_topper, find_topper_per_group};
use crate::core::{ConfigProvider, ParseOutcome, Pipeline, Storage, TopperReport};
use crate::domain::model::{Grade, GradedRecord};
use crate::utils::error::{EtlError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use zip::write::{FileOptions, ZipWriter};

pub const GRADED_CSV: &str = "graded.csv";
pub const SUMMARY_JSON: &str = "toppers.json";
pub const REPORT_ZIP: &str = "toppers_report.zip";

const CSV_HEADER: [&str; 9] = [
    "first_name",
    "last_name",
    "university",
    "test1",
    "test2",
    "test3",
    "test4",
    "final_score",
    "grade",
];

#[derive(Serialize)]
struct Summary<'a> {
    generated_at: DateTime<Utc>,
    total_records: usize,
    skipped_rows: usize,
    overall_topper: Option<&'a GradedRecord>,
    university_toppers: &'a BTreeMap<String, GradedRecord>,
    grade_counts: &'a BTreeMap<Grade, usize>,
}

pub struct GradingPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> GradingPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn output_file(&self, name: &str) -> String {
        Path::new(self.config.output_path())
            .join(name)
            .to_string_lossy()
            .into_owned()
    }
}

fn render_graded_csv(records: &[GradedRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for record in records {
        let student = record.student();
        let [t1, t2, t3, t4] = student.test_scores;
        writer.write_record([
            student.first_name.clone(),
            student.last_name.clone(),
            student.university.clone(),
            t1.to_string(),
            t2.to_string(),
            t3.to_string(),
            t4.to_string(),
            record.final_score().to_string(),
            record.grade().to_string(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}

fn render_summary(report: &TopperReport) -> Result<Vec<u8>> {
    let summary = Summary {
        generated_at: Utc::now(),
        total_records: report.graded_records.len(),
        skipped_rows: report.skipped_rows,
        overall_topper: report.overall_topper.as_ref(),
        university_toppers: &report.university_toppers,
        grade_counts: &report.grade_counts,
    };
    Ok(serde_json::to_vec_pretty(&summary)?)
}

fn bundle_zip(files: &[(&str, &[u8])]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, data) in files {
        zip.start_file::<_, ()>(*name, FileOptions::default())?;
        zip.write_all(data)?;
    }
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for GradingPipeline<S, C> {
    async fn extract(&self) -> Result<ParseOutcome> {
        let input_path = self.config.input_path();
        tracing::debug!("Reading student scores from: {}", input_path);

        let bytes = self
            .storage
            .read_file(input_path)
            .await
            .map_err(|e| EtlError::SourceUnavailable {
                path: input_path.to_string(),
                reason: e.to_string(),
            })?;

        read_records(
            bytes.as_slice(),
            self.config.delimiter(),
            self.config.has_header(),
        )
    }

    async fn transform(&self, data: ParseOutcome) -> Result<TopperReport> {
        let graded_records = calculate_grades(&data.records);

        // 沒有有效資料列時仍產出報告，只是沒有全體榜首
        let overall_topper = match find_overall_topper(&graded_records) {
            Ok(topper) => Some(topper.clone()),
            Err(EtlError::EmptyInput) => {
                tracing::warn!("No valid student rows, overall topper is empty");
                None
            }
            Err(e) => return Err(e),
        };

        let university_toppers: BTreeMap<String, GradedRecord> =
            find_topper_per_group(&graded_records)
                .into_iter()
                .map(|(university, topper)| (university.to_string(), topper.clone()))
                .collect();
        let grade_counts = grade_distribution(&graded_records);

        Ok(TopperReport {
            graded_records,
            overall_topper,
            university_toppers,
            grade_counts,
            skipped_rows: data.skipped_rows,
        })
    }

    async fn load(&self, report: &TopperReport) -> Result<String> {
        let graded_csv = render_graded_csv(&report.graded_records)?;
        let summary = render_summary(report)?;

        let csv_path = self.output_file(GRADED_CSV);
        let summary_path = self.output_file(SUMMARY_JSON);

        tracing::debug!("Writing {} ({} bytes)", csv_path, graded_csv.len());
        self.storage.write_file(&csv_path, &graded_csv).await?;

        tracing::debug!("Writing {} ({} bytes)", summary_path, summary.len());
        self.storage.write_file(&summary_path, &summary).await?;

        if !self.config.compress() {
            return Ok(summary_path);
        }

        let zip_data = bundle_zip(&[
            (GRADED_CSV, graded_csv.as_slice()),
            (SUMMARY_JSON, summary.as_slice()),
        ])?;
        let zip_path = self.output_file(REPORT_ZIP);
        tracing::debug!("Writing ZIP file ({} bytes) to {}", zip_data.len(), zip_path);
        self.storage.write_file(&zip_path, &zip_data).await?;

        Ok(zip_path)
    }
}
