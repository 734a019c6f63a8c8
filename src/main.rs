use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::Ordering;

use calc_interpreter::{Session, logger};
use clap::Parser as _;

#[derive(clap::Parser, Debug)]
#[command(version, about = "Evaluate arithmetic statements from a file or interactively")]
struct Cli {
    /// Program to run line by line; starts a REPL when omitted
    file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Also print each REPL statement in postfix form
    #[arg(long)]
    postfix: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = logger::init(logger::level_for_verbosity(cli.verbose)) {
        eprintln!("Error: cannot install logger: {}", err);
    }

    match &cli.file {
        Some(path) => run_file(path),
        None => repl(cli.postfix),
    }
}

fn run_file(path: &Path) {
    let source = fs::read_to_string(path).unwrap_or_else(|err| {
        eprintln!("Error: cannot read '{}': {}", path.display(), err);
        process::exit(1);
    });

    let mut session = Session::new();
    let interrupted = session.interrupt_handle();
    ctrlc::set_handler(move || {
        interrupted.store(true, Ordering::SeqCst);
        log::warn!("Ctrl+C received, stopping after the current line");
    })
    .unwrap_or_else(|err| log::warn!("cannot set Ctrl-C handler: {}", err));

    let result = session.run_program(&source);

    println!("Variables:");
    let mut vars: Vec<_> = session.variables().iter().collect();
    vars.sort_by_key(|(name, _)| *name);
    for (name, value) in vars {
        println!("  {} = {}", name, value);
    }

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

fn repl(postfix: bool) {
    let mut session = Session::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!(">> ");
        let _ = io::stdout().flush();

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(err)) => {
                eprintln!("Error: {}", err);
                break;
            }
            None => {
                println!();
                break;
            }
        };

        let statement = match session.compile(&line) {
            Ok(Some(statement)) => statement,
            Ok(None) => continue,
            Err(err) => {
                eprintln!("Error: {}", err);
                continue;
            }
        };
        if postfix {
            println!("{}", statement.postfix());
        }
        match session.eval(&statement) {
            Ok(value) => println!("{}", value),
            Err(err) => eprintln!("Error: {}", err),
        }
    }
}
