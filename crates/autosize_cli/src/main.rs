//! Measure how tall an autosizing textarea would be for the text on stdin.
//!
//! Styling comes from `AUTOSIZE_STYLE` (an inline style string) and
//! `AUTOSIZE_PLACEHOLDER`; row bounds and caching from the usual
//! `AUTOSIZE_*` configuration variables. The result is printed as JSON.

use anyhow::{Error, anyhow};
use autosize::{HeightCalculator, NodeHeights};
use headless_dom::Document;
use log::{error, info};
use std::env;
use std::io::{self, Read as _, Write as _};
use std::process;
use textarea_autosize::AutosizeConfig;

pub fn main() {
    env_logger::init();

    if let Err(err) = run() {
        error!("{err:#}");
        process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let config = AutosizeConfig::from_env();
    info!("autosize: {config:?}");

    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    let style = env::var("AUTOSIZE_STYLE").unwrap_or_default();
    let placeholder = env::var("AUTOSIZE_PLACEHOLDER").ok();

    let heights = measure(&config, &style, placeholder.as_deref(), strip_final_newline(&text))?;

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &heights)?;
    writeln!(stdout)?;
    Ok(())
}

/// Measure `text` in a fresh headless textarea styled with `style`.
fn measure(
    config: &AutosizeConfig,
    style: &str,
    placeholder: Option<&str>,
    text: &str,
) -> Result<NodeHeights, Error> {
    let mut document = Document::new();
    let textarea = document.create_element("textarea");
    document.append_child(document.body(), textarea)?;
    document.set_attribute(textarea, "style", style)?;
    if let Some(placeholder) = placeholder {
        document.set_attribute(textarea, "placeholder", placeholder)?;
    }
    document.set_form_value(textarea, text)?;

    let mut calculator = HeightCalculator::new(config.quirks_for(&document));
    let mut cache = None;
    calculator
        .calculate(&mut document, &textarea, &mut cache, config.min_rows, config.max_rows)
        .ok_or_else(|| anyhow!("textarea could not be measured"))
}

/// Drop the newline a shell pipeline appends.
fn strip_final_newline(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text)
}
