pub mod adapter;
pub mod element;
pub mod permissions;
pub mod processes;

pub use adapter::MacOSAdapter;
