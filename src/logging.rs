//! Logger setup.

/// Initialise the global logger. `RUST_LOG` overrides the default `warn`
/// filter; this crate's own messages default to `info`.
pub fn init() {
    let env = env_logger::Env::default().default_filter_or("warn,certmailer=info");
    if let Err(e) = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init()
    {
        eprintln!("Logger already initialised: {e}");
    }
}
