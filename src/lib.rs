/*!
Profile page state and role-aware remote data access for the school portal.

The backend exposes different resources for students and for staff (teachers
and administrators). The `remote` module keeps all knowledge of those shapes
behind one dispatching layer; `profile` holds the unified records and the
editable form buffers derived from them; `page` is the view-controller state
the frontend renders from.
*/
pub mod config;
pub mod page;
pub mod profile;
pub mod remote;
pub mod user;

pub fn log_level_from_env() -> simplelog::LevelFilter {
    use simplelog::LevelFilter;

    let mut level_string = match std::env::var("LOG_LEVEL") {
        Err(_) => { return LevelFilter::Warn; },
        Ok(s) => s,
    };

    level_string.make_ascii_lowercase();
    match level_string.as_str() {
        "max" => LevelFilter::max(),
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Warn,
    }
}
