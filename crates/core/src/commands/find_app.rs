use crate::{
    adapter::PlatformAdapter,
    error::AppError,
    resolver::{ApplicationResolver, ResolverConfig},
};
use serde_json::{json, Value};

pub struct FindAppArgs {
    pub name: Option<String>,
    pub timeout_ms: u64,
    pub poll_interval_ms: u64,
}

pub fn execute(args: FindAppArgs, adapter: &dyn PlatformAdapter) -> Result<Value, AppError> {
    let config = ResolverConfig::default()
        .with_timeout_ms(args.timeout_ms)
        .with_poll_interval_ms(args.poll_interval_ms);
    let mut resolver = ApplicationResolver::with_config(adapter, args.name.as_deref(), config)?;

    let data = json!({
        "found": true,
        "app": resolver.info(),
        "attempts": resolver.attempts(),
        "elapsed_ms": u64::try_from(resolver.elapsed().as_millis()).unwrap_or(u64::MAX),
    });
    resolver.closedown();
    Ok(data)
}
