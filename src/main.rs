//! # microcc Executable
//!
//! Command-line entry point. Takes one positional source file, writes the
//! generated assembly to stdout and diagnostics to stderr. Exit codes
//! identify the failing phase: 0 success, 1 tokenize, 2 parse, 3 codegen,
//! 4 scope, 5 external/argument error.

use clap::{Arg, ArgAction, Command, error::ErrorKind};
use microcc::{Compiler, selftest};
use std::process;

const EXTERNAL_ERROR: i32 = 5;

fn main() {
    let command = Command::new("microcc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compiler for a small C-like expression language, targeting x86-64")
        .arg(
            Arg::new("test")
                .long("test")
                .action(ArgAction::SetTrue)
                .help("Run the built-in container and scope self-tests"),
        )
        .arg(
            Arg::new("file")
                .value_name("FILE")
                .required_unless_present("test")
                .help("Source file to compile"),
        );

    let matches = match command.try_get_matches() {
        Ok(matches) => matches,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                eprintln!("{err}");
                process::exit(EXTERNAL_ERROR);
            }
        },
    };

    if matches.get_flag("test") {
        match selftest::run() {
            Ok(()) => {
                println!("OK");
                return;
            }
            Err(failure) => {
                eprintln!("self-test failed: {failure}");
                process::exit(1);
            }
        }
    }

    let Some(file) = matches.get_one::<String>("file") else {
        eprintln!("usage error: expected exactly one source file");
        process::exit(EXTERNAL_ERROR);
    };

    let compiler = Compiler::new(file);
    match compiler.build() {
        Ok(asm) => print!("{asm}"),
        Err(err) => {
            eprintln!("{err}");
            process::exit(err.exit_code());
        }
    }
}
