//! Handler interface for commands, handler-style options and error handlers.

use crate::context::Context;
use crate::error::{Error, Result};
use crate::usage;

/// An action attached to a command node or to a handler-style option.
///
/// Handlers receive the shared execution context and may consume remaining
/// tokens, read accumulated option values, or raise the termination signal
/// (`Error::Exit`).
pub trait Handler {
    fn run(&self, ctx: &mut Context) -> Result<()>;
}

impl<F> Handler for F
where
    F: Fn(&mut Context) -> Result<()>,
{
    fn run(&self, ctx: &mut Context) -> Result<()> {
        self(ctx)
    }
}

/// The error handler applied at the top level when the root command does not
/// declare one: reports the stored error and the usage text on stderr, then
/// requests exit status 1.
pub fn default_error_handler() -> Box<dyn Handler> {
    boxed(|ctx: &mut Context| {
        if let Some(error) = &ctx.error {
            eprintln!("{error}");
        }
        eprint!("{}", usage::render(ctx));
        Err(Error::Exit(1))
    })
}

fn boxed<F>(handler: F) -> Box<dyn Handler>
where
    F: Fn(&mut Context) -> Result<()> + 'static,
{
    Box::new(handler)
}
