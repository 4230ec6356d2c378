//! Run statistics and the operator summary

/// Counters for one conversion run
///
/// Owned by the run and incremented by the merge engine; read once at the end
/// to build the summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStatistics {
    /// Records handed to the merge engine
    pub input_linecount: u64,
    /// Rows written to the Chainreport file
    pub output_linecount: u64,
    /// Rows the operator has to double-check
    pub warnings: u64,
    /// Unknown descriptions and dangling trade halves
    pub errors: u64,
    /// Noise lines and cancelled withdrawal pairs
    pub ignored: u64,
}

impl ConversionStatistics {
    /// Build the multi-line end-of-run summary
    ///
    /// # Arguments
    ///
    /// * `parser_name` - Name of the adapter, appended to the wiki link
    /// * `wiki_url` - Base URL of the per-parser documentation
    pub fn summary(&self, parser_name: &str, wiki_url: &str) -> String {
        let separator = "-".repeat(70);
        format!(
            "{separator}\n\
             Read lines: {}\n\
             Written lines: {}\n\
             Ignored lines: {}\n\
             Number of Warnings: {} - Please check above\n\
             Number of Errors: {} - Please report them\n\
             Please check details here:\n\
             {}/{}\n\
             {separator}",
            self.input_linecount,
            self.output_linecount,
            self.ignored,
            self.warnings,
            self.errors,
            wiki_url.trim_end_matches('/'),
            parser_name,
        )
    }
}
