use crate::{adapter::PlatformAdapter, enumerator::ApplicationEnumerator, error::AppError};
use serde_json::{json, Value};

pub fn execute(adapter: &dyn PlatformAdapter) -> Result<Value, AppError> {
    let mut apps = ApplicationEnumerator::open(adapter)?;
    let count = apps.count();
    let listed: Vec<Value> = apps
        .names()
        .enumerate()
        .map(|(i, name)| json!({ "index": i + 1, "name": name }))
        .collect();
    apps.closedown();
    Ok(json!({ "count": count, "apps": listed }))
}
