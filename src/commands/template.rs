//! Export and preview for a template file.

use super::{Outbox, load_form};
use crate::cli::{ExportArgs, PreviewArgs};
use crate::config::Config;
use crate::error::Result;
use std::collections::HashMap;

pub fn cmd_export(args: ExportArgs, config: &Config) -> Result<()> {
    let mut form = load_form(&args.template, config.category_policy)?;

    if !args.copy {
        println!("{}", form.export_text());
        return Ok(());
    }

    let clipboard = config.clipboard()?;
    let outbox = Outbox::from_config(config);
    let result = form.copy_template(clipboard.as_ref());
    outbox.notify(form.take_notifications());
    outbox.publish(form.take_events())?;

    println!("{}", result?);
    Ok(())
}

pub fn cmd_preview(args: PreviewArgs, config: &Config) -> Result<()> {
    let form = load_form(&args.template, config.category_policy)?;
    let values: HashMap<String, String> = args.values.into_iter().collect();

    println!("{}", form.preview(&values)?);
    Ok(())
}
