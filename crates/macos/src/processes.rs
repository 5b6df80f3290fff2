use app_finder_core::{error::AdapterError, node::AppInfo};

#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
const LIST_SCRIPT: &str = r#"tell application "System Events"
    set out to ""
    repeat with proc in (processes where background only is false)
        set out to out & (name of proc as string) & "|" & ((unix id of proc) as string) & linefeed
    end repeat
    return out
end tell"#;

#[cfg(target_os = "macos")]
pub fn list_foreground() -> Result<Vec<AppInfo>, AdapterError> {
    use app_finder_core::session::parse_name_pid_lines;
    use std::process::Command;

    let output = Command::new("osascript")
        .arg("-e")
        .arg(LIST_SCRIPT)
        .output()
        .map_err(|e| AdapterError::connection(format!("osascript failed: {e}")))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AdapterError::connection("System Events did not return a process list")
            .with_suggestion("Allow your terminal to control System Events under Automation")
            .with_platform_detail(stderr.trim().to_string()));
    }
    Ok(parse_name_pid_lines(&String::from_utf8_lossy(&output.stdout)))
}

#[cfg(not(target_os = "macos"))]
pub fn list_foreground() -> Result<Vec<AppInfo>, AdapterError> {
    Err(AdapterError::not_supported("list_foreground"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_does_not_shadow_applescript_result() {
        assert!(!LIST_SCRIPT.contains("set result"));
        assert!(LIST_SCRIPT.contains("return out"));
    }
}
