//! Create command: build a run from spreadsheet rows.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use sm_core::{FieldSet, ListCreator, Run};

/// Reads the rows from `path`, or from stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Parses `text` into a run titled `title` and writes it to `output`.
pub fn run<W: Write>(
    writer: &mut W,
    text: &str,
    fields: FieldSet,
    merge_year_and_name: bool,
    title: &str,
    output: &Path,
) -> Result<()> {
    let creator = ListCreator::new(fields, merge_year_and_name);
    let doc = creator.create(title, text);
    if doc.games.is_empty() {
        bail!("no games found in the input (columns: {fields})");
    }

    let run = Run::from_document(&doc, None).context("created game list is invalid")?;
    sm_store::save(output, &run.to_document())
        .with_context(|| format!("failed to save {}", output.display()))?;

    tracing::info!(games = doc.games.len(), path = %output.display(), "run created");
    writeln!(
        writer,
        "Created {} with {} games ({} sessions)",
        output.display(),
        run.games().len(),
        run.nb_sessions()
    )?;
    Ok(())
}
