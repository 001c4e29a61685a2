use std::process::ExitCode;

fn main() -> ExitCode {
    laprec_cli::run()
}
