use crate::parser::ParserType;
use crate::strategy::ConverterConfig;
use clap::Parser;
use std::path::PathBuf;

/// Convert exchange exports into the Chainreport import format
#[derive(Parser, Debug)]
#[command(name = "chainreport-converter")]
#[command(about = "Convert exchange exports into the Chainreport import format", long_about = None)]
pub struct CliArgs {
    /// Export format of the input file
    #[arg(value_name = "PARSER", ignore_case = true, help = "Export format of the input file")]
    pub parser: ParserType,

    /// Exchange export to convert
    #[arg(value_name = "INPUT", help = "Path to the exchange export (CSV or PDF)")]
    pub input_file: PathBuf,

    /// Chainreport file to write
    #[arg(value_name = "OUTPUT", help = "Path of the Chainreport CSV to write")]
    pub output_file: PathBuf,

    #[arg(
        long = "delimiter",
        value_name = "CHAR",
        help = "Override the input delimiter of the selected format"
    )]
    pub delimiter: Option<char>,

    #[arg(
        long = "skip-lines",
        value_name = "N",
        help = "Override the number of preamble lines before the header"
    )]
    pub skip_lines: Option<usize>,

    #[arg(
        long = "wiki-url",
        value_name = "URL",
        help = "Base URL of the documentation linked in the summary"
    )]
    pub wiki_url: Option<String>,

    /// Suppress operator messages and the run summary
    #[arg(long = "quiet", short = 'q')]
    pub quiet: bool,
}

impl CliArgs {
    /// Create a ConverterConfig from CLI arguments
    ///
    /// Options left out keep the selected format's defaults; invalid values
    /// fall back to them with a warning.
    pub fn to_converter_config(&self) -> ConverterConfig {
        if self.delimiter.is_none() && self.skip_lines.is_none() && self.wiki_url.is_none() {
            return ConverterConfig::default();
        }
        ConverterConfig::new(self.delimiter, self.skip_lines, self.wiki_url.clone())
    }
}
