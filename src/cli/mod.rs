//! The braq command-line interface: argument dispatch and the handlers
//! behind each subcommand. Errors are rendered through `miette` reports.

use std::fs;
use std::path::Path;
use std::process;

use clap::Parser;
use miette::{IntoDiagnostic, Result};

use crate::cli::args::{BraqArgs, Command};
use crate::cli::output::{print_ok, render_value, StdoutSink};
use crate::engine::Engine;
use crate::syntax::reader::{read_program, validate};
use crate::syntax::strip_comments;
use crate::syntax::tokenizer::tokenize;

pub mod args;
pub mod output;

/// Main entry point for the CLI.
pub fn run() {
    let args = BraqArgs::parse();

    let result = match args.command {
        Command::Run { file } => handle_run(&file),
        Command::Ast { file, json } => handle_ast(&file, json),
        Command::Tokens { file } => handle_tokens(&file),
        Command::Check { file } => handle_check(&file),
    };

    if let Err(report) = result {
        eprintln!("{:?}", report);
        process::exit(1);
    }
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).into_diagnostic()
}

fn handle_run(path: &Path) -> Result<()> {
    let source = read_source(path)?;
    let mut sink = StdoutSink;
    let value = Engine::default().run(&source, &mut sink)?;
    print!("{}", render_value(&value));
    Ok(())
}

fn handle_ast(path: &Path, json: bool) -> Result<()> {
    let source = read_source(path)?;
    let tokens = tokenize(&strip_comments(&source));
    let Some(program) = read_program(&tokens) else {
        println!("(empty program)");
        return Ok(());
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&program).into_diagnostic()?);
    } else {
        println!("{}", program.pretty());
    }
    Ok(())
}

fn handle_tokens(path: &Path) -> Result<()> {
    let source = read_source(path)?;
    for token in tokenize(&strip_comments(&source)) {
        println!("{}:{}\t{}", token.pos.line, token.pos.column, token.text);
    }
    Ok(())
}

fn handle_check(path: &Path) -> Result<()> {
    let source = read_source(path)?;
    let tokens = tokenize(&strip_comments(&source));
    validate(&tokens)?;
    print_ok(&format!("{}: ok", path.display()));
    Ok(())
}
