use student_toppers::core::ConfigProvider;
use student_toppers::{
    CliConfig, EtlEngine, EtlError, Grade, GradingPipeline, LocalStorage, TomlConfig,
};
use std::io::Read;
use tempfile::TempDir;

const SCORES: &str = "\
Rachel,Green,Stanford,78,82,91,70
Monica,Geller,Harvard,95,88,90,92
Ross,Geller,Stanford,90,90,90,90
Joey,Tribbiani,Harvard,30,20,40,25
Chandler,Bing,Yale,not,a,number,here
Phoebe,Buffay,Yale,60,55,45,50
Gunther,Central,Yale
";

fn cli_config(input: &str, output: &str, compress: bool) -> CliConfig {
    CliConfig {
        input: Some(input.to_string()),
        output_path: output.to_string(),
        delimiter: ',',
        has_header: false,
        compress,
        config: None,
        verbose: false,
        json_logs: false,
    }
}

fn write_input(dir: &TempDir, contents: &str) -> String {
    let path = dir.path().join("scores.csv");
    std::fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_string()
}

#[tokio::test]
async fn test_end_to_end_grading_run() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, SCORES);
    let output_dir = temp_dir.path().join("reports");
    let output_path = output_dir.to_str().unwrap().to_string();

    let config = cli_config(&input, &output_path, false);
    let pipeline = GradingPipeline::new(LocalStorage::default(), config);
    let engine = EtlEngine::new(pipeline);

    let output = engine.run().await.unwrap();
    let report = &output.report;

    assert_eq!(report.graded_records.len(), 5);
    assert_eq!(report.skipped_rows, 2);

    let overall = report.overall_topper.as_ref().unwrap();
    assert_eq!(overall.student().first_name, "Monica");
    assert!((overall.final_score() - 91.25).abs() < 1e-9);
    assert_eq!(overall.grade(), Grade::A);

    let universities: Vec<&str> = report.university_toppers.keys().map(String::as_str).collect();
    assert_eq!(universities, vec!["Harvard", "Stanford", "Yale"]);
    assert_eq!(report.university_toppers["Stanford"].student().first_name, "Ross");
    assert_eq!(report.university_toppers["Yale"].student().first_name, "Phoebe");
    assert_eq!(report.university_toppers["Yale"].grade(), Grade::B);

    assert!(output.output_path.ends_with("toppers.json"));
    assert!(output_dir.join("graded.csv").exists());
    assert!(output_dir.join("toppers.json").exists());
    assert!(!output_dir.join("toppers_report.zip").exists());

    let csv_content = std::fs::read_to_string(output_dir.join("graded.csv")).unwrap();
    assert!(csv_content.contains("Joey,Tribbiani,Harvard,30,20,40,25,28.75,F"));
    assert!(!csv_content.contains("Chandler"));
}

#[tokio::test]
async fn test_end_to_end_with_compression() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, SCORES);
    let output_path = temp_dir.path().join("out").to_str().unwrap().to_string();

    let pipeline = GradingPipeline::new(
        LocalStorage::default(),
        cli_config(&input, &output_path, true),
    );
    let output = EtlEngine::new(pipeline).run().await.unwrap();

    assert!(output.output_path.ends_with("toppers_report.zip"));

    let zip_data = std::fs::read(&output.output_path).unwrap();
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
    assert_eq!(archive.len(), 2);

    let mut summary = String::new();
    archive
        .by_name("toppers.json")
        .unwrap()
        .read_to_string(&mut summary)
        .unwrap();
    let summary: serde_json::Value = serde_json::from_str(&summary).unwrap();
    assert_eq!(summary["overall_topper"]["first_name"], "Monica");
    assert_eq!(summary["university_toppers"]["Harvard"]["grade"], "A");
    assert_eq!(summary["skipped_rows"], 2);
}

#[tokio::test]
async fn test_missing_source_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.csv");
    let output_dir = temp_dir.path().join("out");

    let pipeline = GradingPipeline::new(
        LocalStorage::default(),
        cli_config(missing.to_str().unwrap(), output_dir.to_str().unwrap(), true),
    );
    let result = EtlEngine::new(pipeline).run().await;

    let err = result.unwrap_err();
    assert!(matches!(err, EtlError::SourceUnavailable { .. }));
    assert_eq!(err.exit_code(), 3);
    assert!(!output_dir.exists());
}

#[tokio::test]
async fn test_only_malformed_rows_still_produces_report() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, "a,b,c,x,y,z,w\nshort,row\n");
    let output_dir = temp_dir.path().join("out");

    let pipeline = GradingPipeline::new(
        LocalStorage::default(),
        cli_config(&input, output_dir.to_str().unwrap(), false),
    );
    let output = EtlEngine::new(pipeline).run().await.unwrap();

    assert!(output.report.overall_topper.is_none());
    assert!(output.report.university_toppers.is_empty());
    assert_eq!(output.report.skipped_rows, 2);

    let summary: serde_json::Value =
        serde_json::from_slice(&std::fs::read(output_dir.join("toppers.json")).unwrap()).unwrap();
    assert!(summary["overall_topper"].is_null());
    assert_eq!(summary["total_records"], 0);
}

#[tokio::test]
async fn test_toml_config_run_with_header_and_tabs() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("scores.tsv");
    std::fs::write(
        &input_path,
        "first\tlast\tuniversity\tt1\tt2\tt3\tt4\nAda\tLovelace\tCambridge\t70\t70\t70\t70\n",
    )
    .unwrap();
    let output_dir = temp_dir.path().join("out");

    let toml_content = format!(
        r#"
[pipeline]
name = "tsv-run"

[source]
path = "{}"
delimiter = "\t"
has_header = true

[load]
output_path = "{}"
"#,
        input_path.to_str().unwrap(),
        output_dir.to_str().unwrap()
    );
    let config = TomlConfig::from_toml_str(&toml_content).unwrap();
    assert_eq!(config.delimiter(), b'\t');

    let pipeline = GradingPipeline::new(LocalStorage::default(), config);
    let output = EtlEngine::new(pipeline).run().await.unwrap();

    assert_eq!(output.report.skipped_rows, 0);
    let topper = output.report.overall_topper.unwrap();
    assert_eq!(topper.student().full_name(), "Ada Lovelace");
    assert_eq!(topper.grade(), Grade::A);
}

#[tokio::test]
async fn test_latin1_name_does_not_abort_run() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("scores.csv");
    std::fs::write(
        &input_path,
        b"Jos\xe9,Garcia,Madrid,90,90,90,90\nAna,Ruiz,Madrid, 95,95,95,95\n",
    )
    .unwrap();
    let output_dir = temp_dir.path().join("out");

    let pipeline = GradingPipeline::new(
        LocalStorage::default(),
        cli_config(input_path.to_str().unwrap(), output_dir.to_str().unwrap(), false),
    );
    let output = EtlEngine::new(pipeline).run().await.unwrap();

    assert_eq!(output.report.graded_records.len(), 1);
    assert_eq!(output.report.skipped_rows, 1);
    let topper = output.report.overall_topper.unwrap();
    assert_eq!(topper.student().last_name, "Garcia");
    assert_eq!(topper.university(), "Madrid");
}
