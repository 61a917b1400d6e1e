use anyhow::Context;
use clap::Parser;
use std::io::Write;
use student_toppers::core::ConfigProvider;
use student_toppers::utils::{logger, validation::Validate};
use student_toppers::{
    CliConfig, EtlEngine, EtlError, EtlOutput, GradedRecord, GradingPipeline, LocalStorage,
    TomlConfig,
};

async fn run<C: ConfigProvider + Validate + 'static>(config: C) -> Result<EtlOutput, EtlError> {
    config.validate()?;

    let storage = LocalStorage::default();
    let pipeline = GradingPipeline::new(storage, config);
    EtlEngine::new(pipeline).run().await
}

fn describe(record: &GradedRecord) -> String {
    format!(
        "{} ({}) final score {:.2}, grade {}",
        record.student().full_name(),
        record.university(),
        record.final_score(),
        record.grade()
    )
}

fn print_summary(output: &EtlOutput) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let report = &output.report;

    writeln!(
        out,
        "✅ Graded {} students ({} rows skipped)",
        report.graded_records.len(),
        report.skipped_rows
    )
    .context("failed to write summary")?;

    let overall = match &report.overall_topper {
        Some(topper) => describe(topper),
        None => "none".to_string(),
    };
    writeln!(out, "🏆 Overall topper: {}", overall).context("failed to write overall topper")?;

    // BTreeMap 已依大學名稱排序
    for (university, topper) in &report.university_toppers {
        writeln!(out, "🎓 {}: {}", university, describe(topper))
            .with_context(|| format!("failed to write topper for {}", university))?;
    }

    writeln!(out, "📁 Output saved to: {}", output.output_path)
        .context("failed to write output path")?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // TOML 設定檔優先於命令列參數
    let toml_config = match cli.config.as_deref().map(TomlConfig::from_file).transpose() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    let verbose = cli.verbose || toml_config.as_ref().is_some_and(|c| c.verbose());
    if cli.json_logs || toml_config.as_ref().is_some_and(|c| c.json_logs()) {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting student-toppers CLI");
    tracing::debug!("CLI config: {:?}", cli);

    let result = match toml_config {
        Some(config) => {
            tracing::info!("Using pipeline '{}' from TOML config", config.pipeline.name);
            run(config).await
        }
        None => run(cli).await,
    };

    match result {
        Ok(output) => {
            tracing::info!("✅ Grading run completed successfully!");
            print_summary(&output)?;
        }
        Err(e) => {
            tracing::error!(
                "❌ Grading run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
