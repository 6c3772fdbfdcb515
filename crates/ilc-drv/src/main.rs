use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = ilc_drv::run_cli(std::env::args()) {
        eprintln!("{}", e.to_diagnostic());
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
