use clap::Parser;
use quickbt::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
