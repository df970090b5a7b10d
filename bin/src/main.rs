use std::{
    io::{stdin, stdout, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Context;
use clap::Parser;

use interpreter::Lox;

/// Evaluates a Lox expression from a file, or line by line from a prompt.
#[derive(clap::Parser)]
struct Args {
    /// File containing a single expression. Starts a prompt if omitted.
    file: Option<PathBuf>,

    /// Print the syntax tree instead of evaluating it.
    #[arg(long)]
    ast: bool,
}

fn run_file(path: PathBuf, args: &Args, lox: &mut Lox) -> anyhow::Result<ExitCode> {
    let source = std::fs::read_to_string(&path)
        .with_context(|| format!("Could not read {}", path.display()))?;
    run(&source, args, lox)?;
    Ok(ExitCode::from(lox.diagnostics().exit_code()))
}

fn run_prompt(args: &Args, lox: &mut Lox) -> anyhow::Result<ExitCode> {
    loop {
        print!("> ");
        stdout().flush()?;

        let mut line = String::new();
        if stdin().read_line(&mut line)? == 0 || ends_session(&line) {
            return Ok(ExitCode::SUCCESS);
        }

        run(&line, args, lox)?;
        lox.diagnostics_mut().reset();
    }
}

/// Only a line with nothing before its terminator ends the prompt; blank
/// input such as spaces is still evaluated.
fn ends_session(line: &str) -> bool {
    line.trim_end_matches(['\r', '\n']).is_empty()
}

fn run(source: &str, args: &Args, lox: &mut Lox) -> anyhow::Result<()> {
    if args.ast {
        lox.print_ast(source, &mut stdout())?;
    } else {
        lox.run_source(source, &mut stdout())?;
    }

    for issue in lox.diagnostics_mut().take_issues() {
        eprintln!("{}", issue);
    }
    Ok(())
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();
    log::debug!("Starting with file {:?}, ast: {}", args.file, args.ast);

    let mut lox = Lox::new();

    match args.file.clone() {
        Some(file) => run_file(file, &args, &mut lox),
        None => run_prompt(&args, &mut lox),
    }
}
