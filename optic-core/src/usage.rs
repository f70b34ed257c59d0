//! Usage text rendering for the current command stack.

use crate::context::Context;

/// Renders help for the node on top of the context's command stack. Returns
/// a string so callers decide where it goes (stdout for `--help`, stderr for
/// error reports); an empty stack renders nothing.
pub fn render(ctx: &Context) -> String {
    let Some(cmd) = ctx.stack.last() else {
        return String::new();
    };
    let prog = ctx.command_path();
    let mut out = String::new();

    out.push_str(&format!("\nUsage:  {prog} [OPTIONS]"));
    if !cmd.commands.is_empty() {
        out.push_str(" COMMAND");
    } else if !cmd.arguments.is_empty() {
        out.push_str(&format!(" {}", cmd.arguments));
    } else {
        out.push_str(" ARGUMENTS...");
    }
    out.push_str(&format!("\n\n{}\n", cmd.description));

    if !cmd.options.is_empty() {
        out.push_str("\nOptions:\n");
        let syntax: Vec<String> = cmd.options.iter().map(|opt| opt.syntax()).collect();
        let width = syntax.iter().map(String::len).max().unwrap_or(0) + 3;
        for (column, opt) in syntax.iter().zip(&cmd.options) {
            out.push_str(&format!("  {column:<width$}{}\n", opt.usage()));
        }
    }

    if !cmd.commands.is_empty() {
        out.push_str("\nCommands:\n");
        let width = cmd.commands.iter().map(|sub| sub.name.len()).max().unwrap_or(0) + 3;
        for sub in &cmd.commands {
            out.push_str(&format!("  {:<width$}{}\n", sub.name, sub.description));
        }
    }

    if !cmd.remarks.is_empty() {
        out.push_str(&format!("\n{}\n", cmd.remarks));
    } else if !cmd.commands.is_empty() {
        out.push_str(&format!(
            "\nUse '{prog} COMMAND --help' for more information about a command.\n"
        ));
    }
    out
}
