use std::process::ExitCode;

fn main() -> ExitCode {
    packfetch_lib::run()
}
