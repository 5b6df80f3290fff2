mod cli;
mod dispatch;

use app_finder_core::{
    error::AppError,
    output::{ErrorPayload, Response},
};
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use std::io::{BufWriter, Write};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(c) => c,
        Err(e) => {
            if matches!(
                e.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) {
                e.exit();
            }
            let msg = e.to_string();
            let first_line = msg.lines().next().unwrap_or("parse error");
            emit(&Response::err("unknown", ErrorPayload::new("INVALID_ARGS", first_line)));
            std::process::exit(2);
        }
    };

    init_tracing(cli.verbose);

    let cmd = match cli.command {
        Some(c) => c,
        None => {
            Cli::command().print_help().unwrap_or(());
            std::process::exit(0);
        }
    };

    let cmd_name = cmd.name();

    if matches!(cmd, Commands::Version) {
        finish(cmd_name, app_finder_core::commands::version::execute());
        return;
    }

    let adapter = build_adapter();
    let result = dispatch::dispatch(cmd, &adapter);
    finish(cmd_name, result);
}

fn finish(cmd_name: &str, result: Result<serde_json::Value, AppError>) {
    match result {
        Ok(data) => {
            emit(&Response::ok(cmd_name, data));
            std::process::exit(0);
        }
        Err(e) => {
            tracing::debug!("{cmd_name} failed: {e}");
            let code = if e.code() == "INVALID_ARGS" { 2 } else { 1 };
            emit(&Response::err(cmd_name, ErrorPayload::from(&e)));
            std::process::exit(code);
        }
    }
}

fn emit(response: &Response) {
    let stdout = std::io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    if serde_json::to_writer(&mut writer, response).is_err() {
        return;
    }
    let _ = writer.write_all(b"\n");
    let _ = writer.flush();
}

fn build_adapter() -> impl app_finder_core::adapter::PlatformAdapter {
    #[cfg(target_os = "macos")]
    {
        app_finder_macos::MacOSAdapter::new()
    }

    #[cfg(target_os = "windows")]
    {
        app_finder_windows::WindowsAdapter::new()
    }

    #[cfg(target_os = "linux")]
    {
        app_finder_linux::LinuxAdapter::new()
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
    compile_error!("Unsupported platform")
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let filter = if verbose { "debug" } else { "warn" };
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
