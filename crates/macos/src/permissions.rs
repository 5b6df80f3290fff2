use app_finder_core::error::AdapterError;

#[cfg(target_os = "macos")]
mod imp {
    use accessibility_sys::AXIsProcessTrusted;

    pub fn is_trusted() -> bool {
        unsafe { AXIsProcessTrusted() }
    }
}

#[cfg(not(target_os = "macos"))]
mod imp {
    pub fn is_trusted() -> bool {
        false
    }
}

pub fn ensure_trusted() -> Result<(), AdapterError> {
    if imp::is_trusted() {
        return Ok(());
    }
    Err(AdapterError::connection("Accessibility permission not granted").with_suggestion(
        "Open System Settings > Privacy & Security > Accessibility and add your terminal application",
    ))
}
