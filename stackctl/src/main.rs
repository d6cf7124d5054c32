use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let code = stackctl::cli::run_cli(std::env::args_os()).await;
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
