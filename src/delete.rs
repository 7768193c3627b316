use anyhow::Result;
use std::io::BufRead;
use tracing::info;

use crate::add::confirm;
use crate::edit::row_index;
use crate::session::Session;

/// Remove one row (1-based, as shown by `list`) after confirmation
pub fn handle_delete_command<R: BufRead>(
    session: &mut Session,
    row: usize,
    yes: bool,
    input: &mut R,
) -> Result<()> {
    let index = row_index(row, session.len())?;

    println!("\n=== Delete Row {} ===", row);
    println!("📋 {}", session.records()[index]);

    if !yes
        && !confirm(
            "\n🗑️  Are you sure you want to delete this row?\nThis action cannot be undone! (y/N)",
            input,
        )?
    {
        println!("Deletion cancelled.");
        return Ok(());
    }

    let removed = session.remove_row(index)?;
    info!(row, record = %removed, "row deleted");
    println!("✅ Row deleted successfully! ({} records left)", session.len());

    Ok(())
}


// Made with Bob
