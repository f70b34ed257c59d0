//! Option declarations.
//!
//! An [`OptionSpec`] is the static contract for one option: its long name,
//! optional single-character short alias, usage text and kind. The kind is a
//! closed sum type so the matcher's case analysis stays exhaustive; each
//! variant carries its own parse behavior, dispatched by `match`.

use std::fmt;

use crate::context::{Context, OptionValue};
use crate::error::{Error, Result};
use crate::handler::Handler;
use crate::usage;

/// Label for the kind of value an option consumes, used in usage text and
/// error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    List,
    Int,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ValueKind::String => "string",
            ValueKind::List => "list",
            ValueKind::Int => "int",
        };
        f.write_str(label)
    }
}

pub enum OptionKind {
    /// Boolean flag, absent means `false`; matching stores `true`.
    Flag,
    /// Negatable boolean: seeded `true` before parsing starts, matching
    /// stores `false`.
    Toggle,
    /// Runs the attached action instead of storing a value.
    Handler(Box<dyn Handler>),
    /// Consumes one following token as a string value.
    String,
    /// Consumes one following token and appends it to an ordered list.
    List,
    /// Consumes one following token and parses it as a base-10 integer.
    Int,
}

pub struct OptionSpec {
    name: String,
    short: Option<char>,
    usage: String,
    kind: OptionKind,
}

impl OptionSpec {
    fn new(
        name: impl Into<String>,
        short: impl Into<Option<char>>,
        usage: impl Into<String>,
        kind: OptionKind,
    ) -> Self {
        OptionSpec { name: name.into(), short: short.into(), usage: usage.into(), kind }
    }

    pub fn flag(
        name: impl Into<String>,
        short: impl Into<Option<char>>,
        usage: impl Into<String>,
    ) -> Self {
        Self::new(name, short, usage, OptionKind::Flag)
    }

    pub fn toggle(
        name: impl Into<String>,
        short: impl Into<Option<char>>,
        usage: impl Into<String>,
    ) -> Self {
        Self::new(name, short, usage, OptionKind::Toggle)
    }

    pub fn string(
        name: impl Into<String>,
        short: impl Into<Option<char>>,
        usage: impl Into<String>,
    ) -> Self {
        Self::new(name, short, usage, OptionKind::String)
    }

    pub fn list(
        name: impl Into<String>,
        short: impl Into<Option<char>>,
        usage: impl Into<String>,
    ) -> Self {
        Self::new(name, short, usage, OptionKind::List)
    }

    pub fn int(
        name: impl Into<String>,
        short: impl Into<Option<char>>,
        usage: impl Into<String>,
    ) -> Self {
        Self::new(name, short, usage, OptionKind::Int)
    }

    pub fn handler(
        name: impl Into<String>,
        short: impl Into<Option<char>>,
        usage: impl Into<String>,
        handler: impl Fn(&mut Context) -> Result<()> + 'static,
    ) -> Self {
        Self::new(name, short, usage, OptionKind::Handler(Box::new(handler)))
    }

    /// `-h, --help`: renders the usage text for the current command stack on
    /// stdout and requests exit status 0.
    pub fn help() -> Self {
        Self::handler("help", 'h', "Usage help", |ctx: &mut Context| {
            print!("{}", usage::render(ctx));
            Err(Error::Exit(0))
        })
    }

    /// `-v, --version`: prints the given version string and requests exit
    /// status 0. The version is captured at build time, so no application
    /// state is needed at parse time.
    pub fn version(version: impl Into<String>) -> Self {
        let version = version.into();
        Self::handler("version", 'v', "Show program version", move |_: &mut Context| {
            println!("{version}");
            Err(Error::Exit(0))
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short(&self) -> Option<char> {
        self.short
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// Whether matching this option consumes a following value token.
    pub fn takes_value(&self) -> bool {
        matches!(self.kind, OptionKind::String | OptionKind::List | OptionKind::Int)
    }

    pub fn value_kind(&self) -> Option<ValueKind> {
        match self.kind {
            OptionKind::String => Some(ValueKind::String),
            OptionKind::List => Some(ValueKind::List),
            OptionKind::Int => Some(ValueKind::Int),
            OptionKind::Flag | OptionKind::Toggle | OptionKind::Handler(_) => None,
        }
    }

    /// `-f, --file` when a short alias exists, `--file` otherwise. Used in
    /// error messages.
    pub fn label(&self) -> String {
        match self.short {
            Some(short) => format!("-{short}, --{}", self.name),
            None => format!("--{}", self.name),
        }
    }

    /// Left column of the usage listing: the label padded so long names line
    /// up whether or not a short alias exists, plus the value kind.
    pub(crate) fn syntax(&self) -> String {
        let short = match self.short {
            Some(short) => format!("-{short}, "),
            None => "    ".to_string(),
        };
        match self.value_kind() {
            Some(kind) => format!("{short}--{} {kind}", self.name),
            None => format!("{short}--{}", self.name),
        }
    }

    /// Seeds defaults before any token is consumed. Runs once per spec, in
    /// declaration order.
    pub(crate) fn init(&self, ctx: &mut Context) {
        if let OptionKind::Toggle = self.kind {
            ctx.options.set(self.name.clone(), OptionValue::Bool(true));
        }
    }

    /// Parse step invoked once the matcher has decided this spec matches the
    /// current token. Value-taking kinds consume the next token themselves.
    pub(crate) fn parse(&self, ctx: &mut Context) -> Result<()> {
        match &self.kind {
            OptionKind::Flag => {
                ctx.options.set(self.name.clone(), OptionValue::Bool(true));
                Ok(())
            }
            OptionKind::Toggle => {
                ctx.options.set(self.name.clone(), OptionValue::Bool(false));
                Ok(())
            }
            OptionKind::Handler(handler) => handler.run(ctx),
            OptionKind::String => {
                let value = self.next_value(ctx, ValueKind::String)?;
                ctx.options.set(self.name.clone(), OptionValue::String(value));
                Ok(())
            }
            OptionKind::List => {
                let value = self.next_value(ctx, ValueKind::List)?;
                ctx.options.push_list(&self.name, value);
                Ok(())
            }
            OptionKind::Int => {
                let value = self.next_value(ctx, ValueKind::Int)?;
                let parsed: i64 = value.parse().map_err(|_| Error::TypeMismatch {
                    option: self.label(),
                    kind: ValueKind::Int,
                })?;
                ctx.options.set(self.name.clone(), OptionValue::Int(parsed));
                Ok(())
            }
        }
    }

    fn next_value(&self, ctx: &mut Context, kind: ValueKind) -> Result<String> {
        let value = match ctx.arguments.first() {
            Ok(token) => token.to_string(),
            Err(_) => return Err(Error::ValueRequired { option: self.label(), kind }),
        };
        ctx.arguments.pop()?;
        Ok(value)
    }
}
