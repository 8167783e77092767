//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = dishswipe_cli::run() {
        eprintln!("dishswipe: {err}");
        std::process::exit(1);
    }
}
