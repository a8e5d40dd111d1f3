//! Command-line interface for typeshunt
//! Tokenizes, converts and parses expressions, printing intermediate results in several formats.
//!
//! Usage:
//!   typeshunt tokenize `<expr>`                    - Print the tokens
//!   typeshunt rpn `<expr>`                         - Print the postfix sequence
//!   typeshunt parse `<expr>` [--format `<format>`]   - Print the tree
//!   typeshunt type `<expr>`                        - Print a normalized type expression
//!   typeshunt list-formats                       - List output formats
//!
//! `--grammar <file>` on tokenize, rpn and parse replaces the type-expression grammar.
//! Logging goes to stderr; `-v` shows debug output and `RUST_LOG` overrides both.

use std::fmt::Display;

use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::EnvFilter;
use typeshunt::config::load_grammar;
use typeshunt::shunt::formats::FormatRegistry;
use typeshunt::shunt::Grammar;
use typeshunt::type_expression::TypeExpression;

fn expression_arg() -> Arg {
    Arg::new("expr")
        .help("Expression to process")
        .required(true)
        .index(1)
}

fn grammar_arg() -> Arg {
    Arg::new("grammar")
        .long("grammar")
        .short('g')
        .help("TOML file with the operators and delimiters to use")
}

fn main() {
    let matches = Command::new("typeshunt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse type expressions with a generalized shunting-yard algorithm")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log output (-v debug, -vv trace)"),
        )
        .subcommand(
            Command::new("tokenize")
                .about("Split an expression into tokens")
                .arg(expression_arg())
                .arg(grammar_arg()),
        )
        .subcommand(
            Command::new("rpn")
                .about("Convert an expression into postfix order")
                .arg(expression_arg())
                .arg(grammar_arg()),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse an expression into a tree")
                .arg(expression_arg())
                .arg(grammar_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (see list-formats)")
                        .default_value("treeviz"),
                ),
        )
        .subcommand(
            Command::new("type")
                .about("Parse a type expression and print its normalized form")
                .arg(expression_arg()),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    init_logging(matches.get_count("verbose"));

    match matches.subcommand() {
        Some(("tokenize", sub)) => handle_tokenize_command(&grammar(sub), expression(sub)),
        Some(("rpn", sub)) => handle_rpn_command(&grammar(sub), expression(sub)),
        Some(("parse", sub)) => {
            let format = sub
                .get_one::<String>("format")
                .map(String::as_str)
                .unwrap_or("treeviz");
            handle_parse_command(&grammar(sub), expression(sub), format);
        }
        Some(("type", sub)) => handle_type_command(expression(sub)),
        Some(("list-formats", _)) => handle_list_formats_command(),
        _ => unreachable!(),
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn fail(err: impl Display) -> ! {
    eprintln!("Error: {}", err);
    std::process::exit(1);
}

fn expression(matches: &ArgMatches) -> &str {
    matches
        .get_one::<String>("expr")
        .map(String::as_str)
        .unwrap_or_default()
}

/// The grammar named by `--grammar`, or the type-expression grammar.
fn grammar(matches: &ArgMatches) -> Grammar {
    match matches.get_one::<String>("grammar") {
        Some(path) => load_grammar(path).unwrap_or_else(|e| fail(e)),
        None => Grammar::type_expressions(),
    }
}

fn join(items: impl IntoIterator<Item = impl Display>) -> String {
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn handle_tokenize_command(grammar: &Grammar, expr: &str) {
    println!("{}", join(grammar.tokenize(expr)));
}

fn handle_rpn_command(grammar: &Grammar, expr: &str) {
    let rpn = grammar.shunt(expr).unwrap_or_else(|e| fail(e));
    println!("{}", join(rpn));
}

fn handle_parse_command(grammar: &Grammar, expr: &str, format: &str) {
    let registry = FormatRegistry::with_defaults();
    if !registry.has(format) {
        fail(format!(
            "unknown format '{}', available: {}",
            format,
            registry.list_formats().join(", ")
        ));
    }
    let tree = grammar.parse(expr).unwrap_or_else(|e| fail(e));
    let output = registry.serialize(&tree, format).unwrap_or_else(|e| fail(e));
    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
}

fn handle_type_command(expr: &str) {
    let expression = TypeExpression::parse(expr).unwrap_or_else(|e| fail(e));
    println!("{}", expression);
}

fn handle_list_formats_command() {
    println!("Available formats:\n");
    for (name, description) in FormatRegistry::with_defaults().describe_formats() {
        println!("  {:<10}{}", name, description);
    }
}
