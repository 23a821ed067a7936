//! Variable listing for a template file.

use super::{io_error, read_template_file};
use crate::cli::VarsArgs;
use crate::error::{PromptsmithError, Result};
use crate::template::{TemplateVariable, sync_variables};
use std::io::Write;

pub fn cmd_vars(args: VarsArgs) -> Result<()> {
    let content = read_template_file(&args.file)?;
    let variables = sync_variables(&[], &content);
    write_variables(&variables, args.json, &mut std::io::stdout())
}

fn write_variables<W: Write>(variables: &[TemplateVariable], json: bool, out: &mut W) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(variables).map_err(|e| {
            PromptsmithError::UserError(format!("failed to serialize variables: {}", e))
        })?;
        writeln!(out, "{}", text).map_err(io_error)?;
        return Ok(());
    }

    if variables.is_empty() {
        writeln!(out, "No variables detected").map_err(io_error)?;
    }
    for variable in variables {
        writeln!(out, "{}", variable.name).map_err(io_error)?;
    }
    Ok(())
}
