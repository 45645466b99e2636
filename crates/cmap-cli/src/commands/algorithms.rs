//! Algorithms command implementation.

use crate::error::Result;
use crate::output::Formatter;
use cmap_scoring::ALGORITHMS;

/// Execute the algorithms command.
pub fn execute_algorithms(formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_algorithms(ALGORITHMS)?);
    Ok(())
}
