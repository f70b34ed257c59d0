//! Command tree and the dispatch loop.
//!
//! A [`Command`] node carries its declared options, its children and an
//! optional handler; [`Application`] wraps the root node and drives one
//! parse+dispatch pass over a fresh [`Context`]. Option parsing and
//! subcommand lookup interleave: each node first drains the options it
//! declares, then runs its handler, then hands the next token to a child.

use tracing::debug;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::handler::{default_error_handler, Handler};
use crate::matcher::{self, Flow};
use crate::option::OptionSpec;
use crate::usage;

#[derive(Default)]
pub struct Command {
    pub name: String,
    pub description: String,
    /// Free-text placeholder for positional arguments in usage output,
    /// e.g. `FILE...`.
    pub arguments: String,
    /// Trailing usage paragraph; when empty, command-bearing nodes get the
    /// default `--help` hint instead.
    pub remarks: String,
    /// Declaration order is match priority: the first spec the matcher
    /// accepts wins.
    pub options: Vec<OptionSpec>,
    pub commands: Vec<Command>,
    pub handler: Option<Box<dyn Handler>>,
    pub error_handler: Option<Box<dyn Handler>>,
}

impl Command {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Command {
            name: name.into(),
            description: description.into(),
            ..Command::default()
        }
    }

    pub fn with_arguments(mut self, arguments: impl Into<String>) -> Self {
        self.arguments = arguments.into();
        self
    }

    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = remarks.into();
        self
    }

    pub fn with_options(mut self, options: impl IntoIterator<Item = OptionSpec>) -> Self {
        self.options = options.into_iter().collect();
        self
    }

    pub fn with_commands(mut self, commands: impl IntoIterator<Item = Command>) -> Self {
        self.commands = commands.into_iter().collect();
        self
    }

    pub fn with_handler(
        mut self,
        handler: impl Fn(&mut Context) -> Result<()> + 'static,
    ) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    pub fn with_error_handler(
        mut self,
        handler: impl Fn(&mut Context) -> Result<()> + 'static,
    ) -> Self {
        self.error_handler = Some(Box::new(handler));
        self
    }

    /// One dispatch pass over this node: options, handler, then children.
    fn exec<'a>(&'a self, ctx: &mut Context<'a>) -> Result<()> {
        ctx.stack.push(self);

        // Seed option defaults before any token is consumed.
        for spec in &self.options {
            spec.init(ctx);
        }

        // Drain the options this node declares. The stream is gone, an
        // end-of-options token appeared, or every iteration matched a spec.
        let mut flow = Flow::Matched;
        while !self.options.is_empty() && flow != Flow::EndOfOptions && !ctx.arguments.is_empty()
        {
            flow = Flow::NextOption;
            for spec in &self.options {
                flow = matcher::match_option(ctx, spec)?;
                if flow != Flow::NextOption {
                    break;
                }
            }
            if flow == Flow::NextOption {
                // Every spec passed: the current token is an option nobody
                // declared.
                let token = ctx.arguments.first()?.to_string();
                ctx.arguments.pop()?;
                return Err(Error::UnknownOption(token));
            }
        }

        if let Some(handler) = &self.handler {
            handler.run(ctx)?;
        }

        if !self.commands.is_empty() {
            let name = match ctx.arguments.first() {
                Ok(token) => token.to_string(),
                Err(Error::ArgumentsExhausted) => {
                    // No subcommand given: show usage and request a clean
                    // exit rather than failing.
                    eprint!("{}", usage::render(ctx));
                    return Err(Error::Exit(0));
                }
                Err(err) => return Err(err),
            };
            ctx.arguments.pop()?;
            debug!("dispatching into subcommand '{}'", name);
            for command in &self.commands {
                if command.name == name {
                    return command.execute(ctx);
                }
            }
            return Err(Error::UnknownCommand(name));
        }

        Ok(())
    }

    /// Runs this node, giving its error handler (if any) the chance to
    /// intercept a propagated error. Wrapping happens at every node, so the
    /// deepest node on the unwind path that declared a handler fires first.
    /// The termination signal always passes through untouched.
    pub fn execute<'a>(&'a self, ctx: &mut Context<'a>) -> Result<()> {
        match self.exec(ctx) {
            Err(err @ Error::Exit(_)) => Err(err),
            Err(err) => match &self.error_handler {
                Some(handler) => {
                    ctx.error = Some(err);
                    handler.run(ctx)
                }
                None => Err(err),
            },
            Ok(()) => Ok(()),
        }
    }
}

pub struct Application {
    pub command: Command,
    pub version: String,
}

impl Application {
    pub fn new(command: Command, version: impl Into<String>) -> Self {
        Application { command, version: version.into() }
    }

    /// Executes the root command over `os_args[1..]` (the leading element is
    /// the program name). On success the context is returned so callers can
    /// inspect accumulated option values and leftover tokens.
    ///
    /// When the root command declares no error handler, a default one is
    /// applied here — at the top level only — which reports the error with
    /// usage on stderr and turns it into `Error::Exit(1)`.
    pub fn run(&self, os_args: &[String]) -> Result<Context<'_>> {
        let mut ctx = Context::new(os_args.iter().skip(1));
        match self.command.execute(&mut ctx) {
            Ok(()) => Ok(ctx),
            Err(err @ Error::Exit(_)) => Err(err),
            Err(err) if self.command.error_handler.is_none() => {
                ctx.error = Some(err);
                default_error_handler().run(&mut ctx)?;
                Ok(ctx)
            }
            Err(err) => Err(err),
        }
    }
}
