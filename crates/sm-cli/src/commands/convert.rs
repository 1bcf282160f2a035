//! Convert command: rewrite a run file in another format.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use sm_core::Run;
use sm_store::DocumentFormat;

pub fn run<W: Write>(writer: &mut W, input: &Path, output: &Path) -> Result<()> {
    let target = DocumentFormat::from_path(output)?;
    let doc = sm_store::load(input).with_context(|| format!("failed to load {}", input.display()))?;
    let run = Run::from_document(&doc, None)
        .with_context(|| format!("invalid game list in {}", input.display()))?;

    sm_store::save(output, &run.to_document())
        .with_context(|| format!("failed to save {}", output.display()))?;

    writeln!(
        writer,
        "Converted {} games to {target}: {}",
        run.games().len(),
        output.display()
    )?;
    Ok(())
}
