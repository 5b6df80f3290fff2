use app_finder_core::{error::AdapterError, node::AppInfo};
use std::process::Command;

pub fn list_windows() -> Result<Vec<AppInfo>, AdapterError> {
    let output = Command::new("wmctrl").args(["-l", "-p"]).output().map_err(|e| {
        AdapterError::connection(format!("Could not run wmctrl: {e}"))
            .with_suggestion("Install wmctrl and run inside an X11 session with DISPLAY set")
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AdapterError::connection("wmctrl could not read the window list")
            .with_suggestion("Check that DISPLAY points at a running EWMH window manager")
            .with_platform_detail(stderr.trim().to_string()));
    }

    Ok(parse_window_list(&String::from_utf8_lossy(&output.stdout)))
}

/// Parses `wmctrl -lp` lines: `<id> <desktop> <pid> <host> <title...>`.
pub fn parse_window_list(text: &str) -> Vec<AppInfo> {
    text.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<AppInfo> {
    let (id, rest) = next_field(line)?;
    let (_desktop, rest) = next_field(rest)?;
    let (pid, rest) = next_field(rest)?;
    let (_host, title) = next_field(rest)?;
    let title = title.trim();
    if title.is_empty() {
        return None;
    }

    let mut info = AppInfo::named(title).with_window_id(id);
    match pid.parse::<i32>() {
        Ok(p) if p > 0 => info = info.with_pid(p),
        _ => {}
    }
    Some(info)
}

fn next_field(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    Some(s.split_once(char::is_whitespace).unwrap_or((s, "")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_titles_with_spaces() {
        let text = "\
0x03a00003  0 2345   box Simple App
0x04200007 -1 0      box Desktop
0x05000001  1 8810   box Terminal  -  ~/src
";
        let apps = parse_window_list(text);
        assert_eq!(apps.len(), 3);
        assert_eq!(apps[0], AppInfo::named("Simple App").with_window_id("0x03a00003").with_pid(2345));
        assert_eq!(apps[1].pid, None);
        assert_eq!(apps[2].name, "Terminal  -  ~/src");
    }

    #[test]
    fn skips_untitled_and_short_lines() {
        let apps = parse_window_list("0x01 0 12 box\n0x02 0 13 box   \n\ngarbage\n");
        assert!(apps.is_empty());
    }
}
