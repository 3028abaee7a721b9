//! arcada-drv - Translator Driver
//!
//! Orchestrates one translation: open the source file, run the statement
//! loop until end of input, walk the AST emitting C, finalize the buffers,
//! and write the translation unit to stdout. Diagnostics go to stderr and
//! any error aborts the translation — there is no recovery and no partial
//! output on failure.

use std::io::Write;

use anyhow::{bail, Context as _, Result};

use arcada_gen::{generate, Context};
use arcada_par::Parser;

/// One-line usage diagnostic for a wrong invocation.
pub const USAGE: &str = "usage: arcada ADA_SOURCE_FILE";

/// Entry point: expects exactly one argument, the source file path.
pub fn run(args: &[String]) -> Result<()> {
    let [source_path] = args else {
        bail!("{USAGE}");
    };

    let source = std::fs::read_to_string(source_path)
        .with_context(|| format!("failed to open file: {source_path}"))?;

    let output = translate(&source)?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .context("failed to write output")?;
    Ok(())
}

/// Translates one source text into a C translation unit.
pub fn translate(source: &str) -> Result<String> {
    let mut parser = Parser::new(source);
    let mut nodes = Vec::new();
    while let Some(node) = parser.next_statement()? {
        nodes.push(node);
    }

    let mut ctx = Context::new();
    ctx.emit_prelude();
    for node in &nodes {
        generate(node, &mut ctx)?;
        ctx.flush_statement();
    }

    Ok(ctx.finalize()?)
}
