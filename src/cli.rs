pub use clap::Parser;

/// MiNI to LLVM IR compiler
#[derive(Parser, Debug)]
#[command(version)]
pub struct Args {
    /// output file, defaults to the input path with MINI_OUTPUT_SUFFIX (.ll) appended
    #[arg(short, long)]
    pub output: Option<String>,

    /// log compilation steps
    #[arg(short, long)]
    pub verbose: bool,

    /// source file, asked for on standard input when missing
    #[arg(value_parser)]
    pub input: Option<String>,
}
