//! LLM prompt for financial field extraction

/// Fields the model is asked to report, in output order
pub const FIELDS: [&str; 4] = ["Company Name", "Stock Symbol", "Revenue", "Net Income"];

/// Placeholder the model uses for fields it cannot find
pub const NOT_FOUND: &str = "Not found";

const ROLE: &str = "You are a financial data extraction assistant. \
                    Extract these details if explicitly mentioned:";

/// Builds the extraction prompt for one document
pub struct PromptBuilder<'a> {
    text: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Build the complete extraction prompt
    ///
    /// The document text is inserted verbatim; it is never interpreted as a
    /// template itself.
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(ROLE.len() + self.text.len() + 256);

        prompt.push_str(ROLE);
        prompt.push('\n');
        for field in FIELDS {
            prompt.push_str(&format!("- {}\n", field));
        }
        prompt.push_str(&format!(
            "\nReturn the information as plain text, one item per line. \
             If something is missing, write \"{}\" for that item.",
            NOT_FOUND
        ));
        prompt.push_str("\n\n");

        prompt.push_str("Text to analyze:\n\n");
        prompt.push_str(self.text);
        prompt.push_str("\n---");

        prompt
    }
}
