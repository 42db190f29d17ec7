//! Parsing parameter values from text.
//!
//! Config files and the command line give values as strings. Accepted forms:
//!
//! - Plain numbers: `"0.5"`, `"1000"`, `"-0.3"`
//! - Percentages, divided by 100: `"50%"` is `0.5`
//! - Frequencies, for Hz parameters: `"1kHz"`, `"440 Hz"`
//! - Times, for ms parameters: `"12ms"`, `"0.01s"`
//! - On/off words for toggles and menus: `on`, `off`, `true`, `false`, `yes`, `no`
//! - Menu labels for choice parameters: `"lowpass"`, `"Band Pass"`, `"high-pass"`
//!
//! Parsing never clamps; the store does that on `set`. A plain number above 1
//! for a percentage parameter is rejected, since it is almost always a percent
//! written without its `%`.

use ambit_core::{ParamKind, ParamUnit};

use crate::{EngineError, Param, Result};

/// Parse `text` as a value for `param`.
///
/// ```rust
/// use ambit_engine::{Param, parse_param_value};
///
/// assert_eq!(parse_param_value(Param::RoomSize, "50%").unwrap(), 0.5);
/// assert_eq!(parse_param_value(Param::Cutoff, "1.5kHz").unwrap(), 1500.0);
/// assert_eq!(parse_param_value(Param::FilterMenu, "band pass").unwrap(), 2.0);
/// assert_eq!(parse_param_value(Param::FreezeMode, "on").unwrap(), 1.0);
/// assert!(parse_param_value(Param::Gain, "loud").is_err());
/// ```
pub fn parse_param_value(param: Param, text: &str) -> Result<f32> {
    let value = text.trim();
    let descriptor = param.descriptor();

    if descriptor.kind == ParamKind::Choice
        && let Some(v) = descriptor.value_for_label(value)
    {
        return Ok(v);
    }

    if matches!(descriptor.kind, ParamKind::Bool | ParamKind::Choice)
        && let Some(on) = parse_switch(value)
    {
        return Ok(switch_value(param, on));
    }

    if descriptor.unit == ParamUnit::Percent
        && let Ok(fraction) = value.parse::<f32>()
    {
        return check_fraction(param, fraction, text);
    }

    parse_number(descriptor.unit, value).ok_or_else(|| EngineError::InvalidValue {
        key: param.key(),
        value: text.to_owned(),
    })
}

/// Reject fractions above 1 for percentage parameters.
pub(crate) fn check_fraction(param: Param, value: f32, text: &str) -> Result<f32> {
    if param.descriptor().unit == ParamUnit::Percent && value > 1.0 {
        return Err(EngineError::InvalidValue {
            key: param.key(),
            value: text.to_owned(),
        });
    }
    Ok(value)
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Some(true),
        "off" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// Toggles store on as 1. The phaser menu stores "On" as entry 1 and "Off" as 2.
fn switch_value(param: Param, on: bool) -> f32 {
    match (param, on) {
        (Param::PhaserMenu, true) => 1.0,
        (Param::PhaserMenu, false) => 2.0,
        (Param::FilterMenu, false) => 4.0,
        (_, true) => 1.0,
        (_, false) => 0.0,
    }
}

fn parse_number(unit: ParamUnit, value: &str) -> Option<f32> {
    if let Some(pct) = value.strip_suffix('%') {
        return pct.trim().parse::<f32>().ok().map(|v| v / 100.0);
    }

    match unit {
        ParamUnit::Hertz => {
            if let Some(khz) = value
                .strip_suffix("kHz")
                .or_else(|| value.strip_suffix("khz"))
            {
                return khz.trim().parse::<f32>().ok().map(|v| v * 1000.0);
            }
            if let Some(hz) = value.strip_suffix("Hz").or_else(|| value.strip_suffix("hz")) {
                return hz.trim().parse::<f32>().ok();
            }
        }
        ParamUnit::Milliseconds => {
            if let Some(ms) = value.strip_suffix("ms") {
                return ms.trim().parse::<f32>().ok();
            }
            if let Some(s) = value.strip_suffix('s') {
                return s.trim().parse::<f32>().ok().map(|v| v * 1000.0);
            }
        }
        ParamUnit::Percent | ParamUnit::None => {}
    }

    value.parse::<f32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers() {
        assert_eq!(parse_param_value(Param::Cutoff, " 1000 ").unwrap(), 1000.0);
        assert_eq!(parse_param_value(Param::Feedback, "-0.3").unwrap(), -0.3);
    }

    #[test]
    fn percent_is_normalized() {
        assert_eq!(parse_param_value(Param::WetLevel, "25%").unwrap(), 0.25);
        assert_eq!(parse_param_value(Param::Mix, "100 %").unwrap(), 1.0);
    }

    #[test]
    fn frequencies() {
        assert_eq!(parse_param_value(Param::Cutoff, "2kHz").unwrap(), 2000.0);
        assert_eq!(parse_param_value(Param::Cutoff, "440Hz").unwrap(), 440.0);
        assert_eq!(parse_param_value(Param::Rate, "0.5 hz").unwrap(), 0.5);
    }

    #[test]
    fn times_stay_in_ms() {
        assert_eq!(parse_param_value(Param::CentreDelay, "12ms").unwrap(), 12.0);
        assert!((parse_param_value(Param::CentreDelay, "0.02s").unwrap() - 20.0).abs() < 1e-4);
    }

    #[test]
    fn unit_suffix_must_match_parameter() {
        assert!(parse_param_value(Param::Cutoff, "12ms").is_err());
        assert!(parse_param_value(Param::CentreDelay, "2kHz").is_err());
        assert!(parse_param_value(Param::Gain, "3Hz").is_err());
        assert!(parse_param_value(Param::Depth, "5ms").is_err());
    }

    #[test]
    fn bare_percent_is_rejected() {
        assert!(matches!(
            parse_param_value(Param::RoomSize, "50"),
            Err(EngineError::InvalidValue { key: "ROOM_SIZE", .. })
        ));
        assert_eq!(parse_param_value(Param::RoomSize, "0.5").unwrap(), 0.5);
        assert_eq!(parse_param_value(Param::RoomSize, "1").unwrap(), 1.0);
    }

    #[test]
    fn switches() {
        assert_eq!(parse_param_value(Param::FreezeMode, "true").unwrap(), 1.0);
        assert_eq!(parse_param_value(Param::ChorusBypass, "OFF").unwrap(), 0.0);
        assert_eq!(parse_param_value(Param::PhaserMenu, "on").unwrap(), 1.0);
        assert_eq!(parse_param_value(Param::PhaserMenu, "no").unwrap(), 2.0);
        assert_eq!(parse_param_value(Param::FilterMenu, "off").unwrap(), 4.0);
    }

    #[test]
    fn menu_labels() {
        assert_eq!(parse_param_value(Param::FilterMenu, "lowpass").unwrap(), 1.0);
        assert_eq!(parse_param_value(Param::FilterMenu, "High-Pass").unwrap(), 3.0);
        assert_eq!(parse_param_value(Param::FilterMenu, "3").unwrap(), 3.0);
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_param_value(Param::Damping, "lots").unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidValue { key: "DAMPING", .. }
        ));
        // Words only apply to switches.
        assert!(parse_param_value(Param::Gain, "on").is_err());
        assert!(parse_param_value(Param::Cutoff, "1s").is_err());
    }
}
