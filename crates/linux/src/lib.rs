pub mod adapter;
pub mod wmctrl;

pub use adapter::LinuxAdapter;
