//! Pixelpad - command-line tool for frame-by-frame pixel art editing

use std::process::ExitCode;

use pixelpad::cli;

fn main() -> ExitCode {
    cli::run()
}
