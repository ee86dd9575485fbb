use std::fs;
use std::io::{self, BufRead, Write};
use std::process::exit;

use anyhow::{Context, Result};
use log::{debug, trace};

use mini::backend::compile;
use mini::frontend::process_file;
use mini::parse_env;

use crate::cli::{Args, Parser};

mod cli;
mod logging;

/// compilation failed because of errors in the program
const EXIT_SEMANTIC_ERRORS: i32 = 2;
/// input could not be read or parsed, or output could not be written
const EXIT_FATAL: i32 = 1;

/// ask for the source file path on standard input
fn prompt_input() -> Result<String> {
    print!("source file: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)
        .context("failed to read source file path")?;
    Ok(String::from(line.trim()))
}

fn run(args: Args) -> Result<i32> {
    let input_path = match args.input {
        Some(path) => path,
        None => prompt_input()?,
    };
    let output_path = match args.output {
        Some(path) => path,
        None => format!("{}{}", input_path, parse_env("MINI_OUTPUT_SUFFIX", ".ll")),
    };
    debug!("compiling {} into {}", input_path, output_path);

    match process_file(&input_path) {
        Ok(program) => {
            let compiled_code = compile(&program);
            fs::write(&output_path, compiled_code)
                .with_context(|| format!("failed to write output to {}", output_path))?;
            println!("compilation successful");
            Ok(0)
        }
        Err(errors) => {
            for err in errors.iter() {
                eprintln!("{}", err);
            }
            eprintln!("{} errors detected", errors.len());
            if errors.iter().any(|err| err.item.is_fatal()) {
                Ok(EXIT_FATAL)
            } else {
                Ok(EXIT_SEMANTIC_ERRORS)
            }
        }
    }
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);
    trace!("start");

    match run(args) {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{:#}", e);
            exit(EXIT_FATAL)
        }
    }
}
