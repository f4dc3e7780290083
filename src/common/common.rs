use fern::colors::{Color, ColoredLevelConfig};
use log::info;
use crate::common::structs::custom_error::CustomError;
use crate::config::structs::configuration::Configuration;

pub fn setup_logging(config: &Configuration) -> Result<(), CustomError>
{
    let level = match config.log_level.as_str() {
        "off" => log::LevelFilter::Off,
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => {
            return Err(CustomError::new(&format!("Unknown log level encountered: '{}'", config.log_level.as_str())));
        }
    };

    let colors = ColoredLevelConfig::new()
        .trace(Color::Cyan)
        .debug(Color::Magenta)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    if let Err(err) = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} [{:width$}][{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.9f"),
                colors.color(record.level()),
                record.target(),
                message,
                width = 5
            ))
        })
        .level(level)
        .chain(std::io::stdout())
        .apply()
    {
        return Err(CustomError::new(&format!("Failed to initialize logging: {err}")));
    }
    info!("logging initialized.");
    Ok(())
}

/// Splits a client user agent such as `SuperTuxKart/1.4 (Linux)` into the
/// version (`1.4`) and the operating system (`Linux`).
///
/// Strings that do not follow that shape are returned whole as the version
/// with an empty operating system.
pub fn extract_version_os(user_version: &str) -> (String, String) {
    let trimmed = user_version.trim();
    let Some((_, rest)) = trimmed.split_once('/') else {
        return (trimmed.to_string(), String::new());
    };
    match rest.split_once(' ') {
        None => (rest.to_string(), String::new()),
        Some((version, os)) => {
            let os = os.trim().trim_start_matches('(').trim_end_matches(')');
            (version.to_string(), os.to_string())
        }
    }
}
