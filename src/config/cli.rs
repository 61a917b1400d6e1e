use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_delimiter, validate_path, validate_required_field, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "toppers")]
#[command(about = "Grade student test scores and find the toppers overall and per university")]
pub struct CliConfig {
    #[arg(long, help = "Delimited file with first,last,university,test1..test4 rows")]
    pub input: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = ",")]
    pub delimiter: char,

    #[arg(long, help = "Skip the first row of the input")]
    pub has_header: bool,

    #[arg(long, help = "Also bundle the reports into a ZIP archive")]
    pub compress: bool,

    #[arg(long, help = "Load settings from a TOML file instead of flags")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        self.input.as_deref().unwrap_or_default()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn delimiter(&self) -> u8 {
        validate_delimiter("delimiter", self.delimiter).unwrap_or(b',')
    }

    fn has_header(&self) -> bool {
        self.has_header
    }

    fn compress(&self) -> bool {
        self.compress
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        let input = validate_required_field("input", &self.input)?;
        validate_path("input", input)?;
        validate_path("output_path", &self.output_path)?;
        validate_delimiter("delimiter", self.delimiter)?;
        Ok(())
    }
}
