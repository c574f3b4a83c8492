//! API check command implementation.

use crate::error::Result;
use crate::output::Formatter;
use finex_domain::traits::LlmProvider;
use finex_extractor::FieldExtractor;
use std::fmt::Display;

/// Execute the check-api command.
///
/// Sends the built-in sample report and prints the answer. Returns whether
/// the model answered.
pub fn execute_check_api<L>(client: &FieldExtractor<L>, formatter: &Formatter) -> Result<bool>
where
    L: LlmProvider,
    L::Error: Display,
{
    let result = client.check_connection();
    println!("{}", formatter.format_result(&result)?);
    Ok(result.is_success())
}
