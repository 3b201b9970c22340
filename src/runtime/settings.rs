use crate::config;

/// Load settings, falling back to defaults when the file is unreadable or invalid.
pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => match s.validate() {
            Ok(()) => s,
            Err(msg) => {
                eprintln!("tagsmith: invalid config, using defaults: {msg}");
                config::Settings::default()
            }
        },
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            eprintln!("tagsmith: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}
