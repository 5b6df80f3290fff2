use app_finder_core::{
    adapter::PlatformAdapter,
    commands::{find_app, list_apps, version},
    error::AppError,
};
use serde_json::Value;

use crate::cli::Commands;

pub fn dispatch(cmd: Commands, adapter: &dyn PlatformAdapter) -> Result<Value, AppError> {
    match cmd {
        Commands::ListApps => list_apps::execute(adapter),

        Commands::Find(a) => {
            if a.name.is_none() {
                return Err(AppError::invalid_input("find requires --name <NAME>"));
            }
            find_app::execute(
                find_app::FindAppArgs {
                    name: a.name,
                    timeout_ms: a.timeout_ms,
                    poll_interval_ms: a.poll_interval_ms,
                },
                adapter,
            )
        }

        Commands::Version => version::execute(),
    }
}
