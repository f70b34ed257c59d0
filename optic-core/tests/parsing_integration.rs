//! End-to-end parsing tests through `Application::run`, covering the option
//! syntaxes and the dispatch behavior of a realistic command tree.

use optic_core::{Application, Command, Context, Error, OptionSpec, OptionValue};

/// A root command declaring one option of every storing kind. The error
/// handler swallows failures so tests can inspect `ctx.error` instead of
/// the exit signal.
fn sample_app() -> Application {
    Application::new(
        Command::new("tool", "Sample tool")
            .with_options([
                OptionSpec::flag("all", 'a', "Include everything"),
                OptionSpec::flag("long", 'l', "Long listing"),
                OptionSpec::flag("human", 'k', "Human readable sizes"),
                OptionSpec::toggle("color", None, "Turn colored output off"),
                OptionSpec::string("file", 'f', "Input file"),
                OptionSpec::list("exclude", 'x', "Names to skip"),
                OptionSpec::int("jobs", 'j', "Worker count"),
            ])
            .with_error_handler(|_: &mut Context| Ok(())),
        "0.0.0",
    )
}

fn run(tokens: &[&str]) -> optic_core::Result<Context<'static>> {
    let mut argv = vec!["prog".to_string()];
    argv.extend(tokens.iter().map(|token| token.to_string()));
    // The context only borrows the application, so keep it alive.
    let app = Box::leak(Box::new(sample_app()));
    app.run(&argv)
}

#[test]
fn short_flag_sets_its_boolean() {
    let ctx = run(&["-a"]).unwrap();
    assert!(ctx.options.flag("all"));
    assert!(ctx.arguments.is_empty());
}

#[test]
fn clustered_flags_match_separate_flags() {
    let clustered = run(&["-alk"]).unwrap();
    let separate = run(&["-a", "-l", "-k"]).unwrap();
    for name in ["all", "long", "human"] {
        assert!(clustered.options.flag(name), "{name} not set by cluster");
        assert_eq!(clustered.options.flag(name), separate.options.flag(name));
    }
}

#[test]
fn glued_short_value_is_stored_verbatim() {
    let ctx = run(&["-fin.txt"]).unwrap();
    assert_eq!(ctx.options.string("file"), Some("in.txt"));
    assert!(ctx.arguments.is_empty());
}

#[test]
fn long_equals_and_spaced_forms_agree() {
    let spaced = run(&["--file", "in.txt"]).unwrap();
    let equals = run(&["--file=in.txt"]).unwrap();
    assert_eq!(spaced.options.string("file"), Some("in.txt"));
    assert_eq!(spaced.options.string("file"), equals.options.string("file"));
}

#[test]
fn double_dash_stops_option_parsing() {
    let ctx = run(&["-a", "--", "-l", "positional"]).unwrap();
    assert!(ctx.options.flag("all"));
    assert!(!ctx.options.flag("long"));
    let leftover: Vec<&String> = ctx.arguments.iter().collect();
    assert_eq!(leftover, ["-l", "positional"]);
}

#[test]
fn repeated_list_option_accumulates_in_order() {
    let ctx = run(&["-x", "a", "-x", "b", "--exclude=c"]).unwrap();
    assert_eq!(
        ctx.options.list("exclude").unwrap(),
        ["a".to_string(), "b".to_string(), "c".to_string()]
    );
}

#[test]
fn non_numeric_int_value_fails_and_stays_consumed() {
    let ctx = run(&["-j", "lots"]).unwrap();
    assert!(matches!(ctx.error, Some(Error::TypeMismatch { .. })));
    assert!(ctx.arguments.is_empty());
}

#[test]
fn missing_value_is_reported_against_the_option() {
    let ctx = run(&["--file"]).unwrap();
    match &ctx.error {
        Some(Error::ValueRequired { option, .. }) => assert_eq!(option, "-f, --file"),
        other => panic!("expected ValueRequired, got {other:?}"),
    }
}

#[test]
fn toggle_flag_defaults_true_and_negates_to_false() {
    let ctx = run(&[]).unwrap();
    assert!(ctx.options.flag("color"));
    let ctx = run(&["--color"]).unwrap();
    assert!(!ctx.options.flag("color"));
}

#[test]
fn unknown_option_names_the_offending_token() {
    let ctx = run(&["-q"]).unwrap();
    match &ctx.error {
        Some(Error::UnknownOption(token)) => assert_eq!(token, "-q"),
        other => panic!("expected UnknownOption, got {other:?}"),
    }
}

#[test]
fn help_option_signals_exit_zero() {
    let app = Application::new(
        Command::new("tool", "Sample tool").with_options([OptionSpec::help()]),
        "0.0.0",
    );
    let argv = vec!["prog".to_string(), "--help".to_string()];
    assert!(matches!(app.run(&argv), Err(Error::Exit(0))));
}

#[test]
fn version_option_signals_exit_zero() {
    let app = Application::new(
        Command::new("tool", "Sample tool").with_options([OptionSpec::version("1.2.3")]),
        "0.0.0",
    );
    let argv = vec!["prog".to_string(), "-v".to_string()];
    assert!(matches!(app.run(&argv), Err(Error::Exit(0))));
}

#[test]
fn nested_dispatch_reaches_the_right_leaf() {
    let leaf = Command::new("leaf", "").with_handler(|ctx: &mut Context| {
        ctx.options.set("leaf-ran", OptionValue::Bool(true));
        assert_eq!(ctx.arguments.first()?, "payload");
        Ok(())
    });
    let app = Application::new(
        Command::new("tool", "")
            .with_commands([Command::new("mid", "").with_commands([leaf])]),
        "0.0.0",
    );
    let argv: Vec<String> =
        ["prog", "mid", "leaf", "payload"].iter().map(|s| s.to_string()).collect();
    let ctx = app.run(&argv).unwrap();
    assert!(ctx.options.flag("leaf-ran"));
    assert_eq!(ctx.command_path(), "tool mid leaf");
}

#[test]
fn options_parse_independently_at_each_level() {
    let sub = Command::new("sub", "")
        .with_options([OptionSpec::flag("inner", 'i', "")])
        .with_handler(|_: &mut Context| Ok(()));
    let app = Application::new(
        Command::new("tool", "")
            .with_options([OptionSpec::flag("outer", 'o', "")])
            .with_commands([sub]),
        "0.0.0",
    );
    let argv: Vec<String> =
        ["prog", "-o", "sub", "-i"].iter().map(|s| s.to_string()).collect();
    let ctx = app.run(&argv).unwrap();
    assert!(ctx.options.flag("outer"));
    assert!(ctx.options.flag("inner"));
}
