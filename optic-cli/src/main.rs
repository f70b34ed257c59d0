//! optic — inspect and slice text files from the command line.

use std::env;
use std::process::ExitCode;

use optic_core::{Application, Command, Context, Error, OptionSpec, Result};

mod commands;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    match build_app().run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(Error::Exit(status)) => ExitCode::from(status.clamp(0, 255) as u8),
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn build_app() -> Application {
    Application::new(
        Command::new("optic", "Inspect and slice text files")
            .with_options([
                OptionSpec::help(),
                OptionSpec::version(VERSION),
                OptionSpec::flag("debug", 'D', "Enable debug logging"),
                OptionSpec::toggle("color", None, "Turn colored output off"),
            ])
            .with_handler(init_logging)
            .with_commands([commands::count(), commands::head()]),
        VERSION,
    )
}

/// Root handler: runs once the global options are parsed and before any
/// subcommand dispatch, so subcommand handlers always see a configured
/// subscriber.
fn init_logging(ctx: &mut Context) -> Result<()> {
    let filter = if ctx.options.flag("debug") {
        "optic=debug,optic_core=debug"
    } else {
        "optic=info,optic_core=info"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}
