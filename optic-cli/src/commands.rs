//! Subcommand declarations and handlers for the optic binary.

use std::fs;

use ansi_term::Colour::Cyan;
use anyhow::Context as _;
use optic_core::{Command, Context, Error, OptionSpec, Result};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CountOptions {
    lines: bool,
    words: bool,
    bytes: bool,
    exclude: Vec<String>,
    output: Option<String>,
    color: bool,
}

pub fn count() -> Command {
    Command::new("count", "Count lines, words and bytes in files")
        .with_arguments("FILE...")
        .with_options([
            OptionSpec::help(),
            OptionSpec::flag("lines", 'l', "Count lines"),
            OptionSpec::flag("words", 'w', "Count words"),
            OptionSpec::flag("bytes", 'b', "Count bytes"),
            OptionSpec::list("exclude", 'x', "File name to skip (repeatable)"),
            OptionSpec::string("output", 'o', "Write the report to this file"),
        ])
        .with_handler(run_count)
}

fn run_count(ctx: &mut Context) -> Result<()> {
    let opts: CountOptions = ctx.map_into()?;
    let files = drain_positionals(ctx)?;
    if files.is_empty() {
        return Err(Error::Message("count requires at least one FILE".to_string()));
    }
    // With no selector flags, report all three columns like wc does.
    let all = !(opts.lines || opts.words || opts.bytes);

    let mut report = String::new();
    for file in &files {
        if opts.exclude.iter().any(|skip| skip == file) {
            debug!("skipping excluded file '{}'", file);
            continue;
        }
        let data = fs::read(file).with_context(|| format!("cannot read '{file}'"))?;
        let text = String::from_utf8_lossy(&data);
        let mut cells: Vec<String> = Vec::new();
        if all || opts.lines {
            cells.push(text.lines().count().to_string());
        }
        if all || opts.words {
            cells.push(text.split_whitespace().count().to_string());
        }
        if all || opts.bytes {
            cells.push(data.len().to_string());
        }
        let name = if opts.color && opts.output.is_none() {
            Cyan.paint(file.as_str()).to_string()
        } else {
            file.clone()
        };
        report.push_str(&format!("{:>8} {name}\n", cells.join(" ")));
    }

    match &opts.output {
        Some(path) => {
            fs::write(path, &report).with_context(|| format!("cannot write '{path}'"))?
        }
        None => print!("{report}"),
    }
    Ok(())
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct HeadOptions {
    count: Option<i64>,
}

pub fn head() -> Command {
    Command::new("head", "Print the first lines of a file")
        .with_arguments("FILE")
        .with_options([
            OptionSpec::help(),
            OptionSpec::int("count", 'n', "Number of lines to print (default 10)"),
        ])
        .with_handler(run_head)
}

fn run_head(ctx: &mut Context) -> Result<()> {
    let opts: HeadOptions = ctx.map_into()?;
    let files = drain_positionals(ctx)?;
    let [file] = files.as_slice() else {
        return Err(Error::Message("head requires exactly one FILE".to_string()));
    };
    let limit = opts.count.unwrap_or(10).max(0) as usize;
    let text = fs::read_to_string(file).with_context(|| format!("cannot read '{file}'"))?;
    for line in text.lines().take(limit) {
        println!("{line}");
    }
    Ok(())
}

/// Everything left on the cursor after option parsing is positional input.
fn drain_positionals(ctx: &mut Context) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    while !ctx.arguments.is_empty() {
        tokens.push(ctx.arguments.first()?.to_string());
        ctx.arguments.pop()?;
    }
    Ok(tokens)
}
