//! Configuration validation.
//!
//! Checks the `[session]` and `[chart]` sections before a session is built.

use crate::domain::error::TickerdashError;
use crate::domain::options::STRIKE_WINDOW_PRESETS;
use crate::domain::period::INTERVALS;
use crate::ports::config_port::ConfigPort;

pub fn validate_session_config(config: &dyn ConfigPort) -> Result<(), TickerdashError> {
    validate_symbol(config)?;
    validate_interval(config)?;
    validate_strike_window(config)?;
    validate_ema_windows(config)?;
    Ok(())
}

fn validate_symbol(config: &dyn ConfigPort) -> Result<(), TickerdashError> {
    match config.get_string("session", "symbol") {
        Some(s) if s.trim().is_empty() => Err(TickerdashError::ConfigInvalid {
            section: "session".to_string(),
            key: "symbol".to_string(),
            reason: "symbol must not be empty".to_string(),
        }),
        _ => Ok(()),
    }
}

fn validate_interval(config: &dyn ConfigPort) -> Result<(), TickerdashError> {
    match config.get_string("session", "interval") {
        Some(s) if !INTERVALS.contains(&s.trim()) => Err(TickerdashError::ConfigInvalid {
            section: "session".to_string(),
            key: "interval".to_string(),
            reason: format!("interval must be one of {}", INTERVALS.join(", ")),
        }),
        _ => Ok(()),
    }
}

fn validate_strike_window(config: &dyn ConfigPort) -> Result<(), TickerdashError> {
    let Some(raw) = config.get_string("session", "strike_window") else {
        return Ok(());
    };
    let valid = raw
        .trim()
        .parse::<usize>()
        .map(|n| STRIKE_WINDOW_PRESETS.contains(&n))
        .unwrap_or(false);
    if !valid {
        return Err(TickerdashError::ConfigInvalid {
            section: "session".to_string(),
            key: "strike_window".to_string(),
            reason: format!("strike_window must be one of {:?}", STRIKE_WINDOW_PRESETS),
        });
    }
    Ok(())
}

fn validate_ema_windows(config: &dyn ConfigPort) -> Result<(), TickerdashError> {
    match config.get_usize_list("chart", "ema_windows") {
        None => Ok(()),
        Some(Err(token)) => Err(TickerdashError::ConfigInvalid {
            section: "chart".to_string(),
            key: "ema_windows".to_string(),
            reason: format!("'{}' is not a window length", token),
        }),
        Some(Ok(windows)) if windows.contains(&0) => Err(TickerdashError::ConfigInvalid {
            section: "chart".to_string(),
            key: "ema_windows".to_string(),
            reason: "EMA windows must be positive".to_string(),
        }),
        Some(Ok(_)) => Ok(()),
    }
}
