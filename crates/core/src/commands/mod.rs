pub mod find_app;
pub mod list_apps;
pub mod version;
