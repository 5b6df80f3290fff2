#[cfg(target_os = "macos")]
mod imp {
    use accessibility_sys::{AXUIElementCreateApplication, AXUIElementRef};
    use core_foundation::base::{CFRelease, CFTypeRef};

    pub struct AppElement(AXUIElementRef);

    // SAFETY: the element is created and released from the resolver's thread;
    // it only crosses a thread boundary inside an AppHandle, which is moved,
    // never shared.
    unsafe impl Send for AppElement {}

    impl AppElement {
        pub fn for_pid(pid: i32) -> Self {
            AppElement(unsafe { AXUIElementCreateApplication(pid) })
        }

        pub fn is_null(&self) -> bool {
            self.0.is_null()
        }
    }

    impl Drop for AppElement {
        fn drop(&mut self) {
            if !self.0.is_null() {
                tracing::trace!("macos: releasing AX application element");
                unsafe { CFRelease(self.0 as CFTypeRef) }
            }
        }
    }
}

#[cfg(not(target_os = "macos"))]
mod imp {
    pub struct AppElement;

    impl AppElement {
        pub fn for_pid(_pid: i32) -> Self {
            AppElement
        }

        pub fn is_null(&self) -> bool {
            true
        }
    }
}

pub use imp::AppElement;
