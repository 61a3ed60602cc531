//! fields command - Print the template placeholder table

use crate::core::metadata::{Registry, ValueKind};
use crate::engine::Context;
use anyhow::Result;

fn kind_name(kind: ValueKind) -> &'static str {
    match kind {
        ValueKind::Text => "text",
        ValueKind::List => "list (comma-separated)",
        ValueKind::PositiveInt => "positive integer",
    }
}

/// Render the placeholder table, one descriptor per line.
pub fn fields_table(registry: &Registry) -> String {
    let mut lines: Vec<String> = registry
        .descriptors()
        .map(|d| format!("{:<4}{:<8}{}", d.placeholder(), d.tag(), kind_name(d.kind())))
        .collect();
    lines.push(format!("{:<4}{:<8}{}", "%%", "", "literal '%'"));
    lines.join("\n")
}

/// Print the placeholders usable in templates.
pub fn fields(ctx: &Context, registry: &Registry) -> Result<()> {
    if !ctx.quiet {
        println!("{}", fields_table(registry));
    }
    Ok(())
}
