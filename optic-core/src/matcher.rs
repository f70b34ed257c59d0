//! Token classification against a single option spec.
//!
//! One procedure handles all four POSIX syntaxes — bare short (`-x`),
//! clustered short (`-xyz`), glued-value short (`-xVALUE`) and long
//! (`--name`, `--name=value`) — without a separate tokenizer pass, because
//! the specs, not a grammar, decide whether a character is a flag or a
//! value-accepting option: `-abc` only decomposes into `-a -b -c` when `a`'s
//! spec takes no value.

use tracing::trace;

use crate::context::Context;
use crate::error::Result;
use crate::option::OptionSpec;

/// Outcome of trying one spec against the current token. Neither
/// `NextOption` nor `EndOfOptions` is a failure; they steer the executor's
/// option loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// The spec matched; the token (or its consumed part) is gone and the
    /// spec's parse step has run.
    Matched,
    /// The token is option-shaped but belongs to some other spec.
    NextOption,
    /// The token is not an option at all, or is the `--` terminator; stop
    /// option parsing for this command.
    EndOfOptions,
}

/// Tries `spec` against the first unconsumed token, mutating the cursor as
/// dictated by the syntax that matched. Errors from the spec's parse step
/// propagate unchanged.
pub fn match_option(ctx: &mut Context, spec: &OptionSpec) -> Result<Flow> {
    let arg = ctx.arguments.first()?.to_string();

    let mut chars = arg.chars();
    if chars.next() != Some('-') || arg.len() < 2 {
        return Ok(Flow::EndOfOptions);
    }
    if arg == "--" {
        ctx.arguments.pop()?;
        return Ok(Flow::EndOfOptions);
    }
    let second = chars.next();

    // Short form. Checked before the long form so a spec's alias wins even
    // for tokens it will later consume as a glued value.
    if let Some(short) = spec.short() {
        if second == Some(short) {
            let rest = &arg[1 + short.len_utf8()..];
            if spec.takes_value() {
                if rest.is_empty() {
                    // Value is the next token; the parse step consumes it.
                    ctx.arguments.pop()?;
                } else {
                    // Glued value, e.g. `-oFILE`.
                    ctx.arguments.replace_first(rest.to_string())?;
                }
            } else if rest.is_empty() {
                ctx.arguments.pop()?;
            } else {
                // Clustered short flags, e.g. `-abc`: rebuild the stream as
                // one single-character token per remaining flag, followed by
                // everything after the current token.
                let mut replacement: Vec<String> =
                    rest.chars().map(|flag| format!("-{flag}")).collect();
                replacement.extend(ctx.arguments.iter().skip(1).cloned());
                ctx.arguments.replace_all(replacement);
            }
            trace!("matched short option -{} ({})", short, spec.name());
            spec.parse(ctx)?;
            return Ok(Flow::Matched);
        }
    }

    // A short-form token that didn't match this spec's alias belongs to some
    // other spec.
    if second != Some('-') {
        return Ok(Flow::NextOption);
    }

    // Long form.
    let name = &arg[2..];
    if name == spec.name() {
        ctx.arguments.pop()?;
        trace!("matched long option --{}", spec.name());
        spec.parse(ctx)?;
        return Ok(Flow::Matched);
    }
    if let Some(value) =
        name.strip_prefix(spec.name()).and_then(|rest| rest.strip_prefix('='))
    {
        // `--name=value`: leave the value in place of the current token for
        // the parse step to consume.
        ctx.arguments.replace_first(value.to_string())?;
        trace!("matched long option --{}=...", spec.name());
        spec.parse(ctx)?;
        return Ok(Flow::Matched);
    }

    Ok(Flow::NextOption)
}
