use clap::Parser;
use sigtrader::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
