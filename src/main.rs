use std::process::ExitCode;

fn main() -> ExitCode {
    match ossfuzz_analysis::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
