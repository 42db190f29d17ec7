//! Parameter descriptors.
//!
//! A [`ParamDescriptor`] is the declared schema of one control: its semantic
//! [`ParamKind`], `[min, max]` range, step, default and display metadata.
//! The [`ParameterStore`](crate::ParameterStore) uses it to clamp and quantize
//! every write, and front ends use it to list and format values.
//!
//! All values are carried as `f32`, including booleans (`0.0` / `1.0`) and
//! choices (the 1-based index of the selected entry in `step_labels`).
//!
//! # Example
//!
//! ```rust
//! use ambit_core::{ParamDescriptor, ParamUnit};
//!
//! let cutoff = ParamDescriptor::float("Cutoff", "Cutoff", ParamUnit::Hertz, 20.0, 20000.0, 600.0);
//! assert_eq!(cutoff.quantize(50_000.0), 20000.0);
//!
//! let room = ParamDescriptor::float("Room Size", "Room", ParamUnit::Percent, 0.0, 1.0, 0.5)
//!     .with_step(0.01);
//! assert!((room.quantize(0.333) - 0.33).abs() < 1e-6);
//! ```

use alloc::format;
use alloc::string::String;

/// Semantic type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Continuous value.
    Float,
    /// `0.0` is off, `1.0` is on.
    Bool,
    /// One of `step_labels`, selected by a 1-based index offset from `min`.
    Choice,
}

/// Unit used when formatting a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Hertz.
    Hertz,
    /// Milliseconds.
    Milliseconds,
    /// Normalized `0..=1` value shown as a percentage.
    Percent,
    /// Dimensionless.
    None,
}

impl ParamUnit {
    /// Display suffix, including the leading space where one is used.
    ///
    /// ```rust
    /// use ambit_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Hertz.suffix(), " Hz");
    /// assert_eq!(ParamUnit::Percent.suffix(), "%");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Hertz => " Hz",
            ParamUnit::Milliseconds => " ms",
            ParamUnit::Percent => "%",
            ParamUnit::None => "",
        }
    }
}

/// Declared schema for one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full display name, e.g. "Centre Delay".
    pub name: &'static str,
    /// Short name for narrow displays, at most 8 characters.
    pub short_name: &'static str,
    /// Display unit.
    pub unit: ParamUnit,
    /// Semantic type.
    pub kind: ParamKind,
    /// Lowest stored value.
    pub min: f32,
    /// Highest stored value.
    pub max: f32,
    /// Value at construction.
    pub default: f32,
    /// Quantization step. `0.0` means continuous.
    pub step: f32,
    /// Entry names for [`ParamKind::Choice`]. Empty for other kinds.
    pub step_labels: &'static [&'static str],
}

impl ParamDescriptor {
    /// Continuous parameter.
    pub const fn float(
        name: &'static str,
        short_name: &'static str,
        unit: ParamUnit,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit,
            kind: ParamKind::Float,
            min,
            max,
            default,
            step: 0.0,
            step_labels: &[],
        }
    }

    /// On/off parameter.
    pub const fn toggle(name: &'static str, short_name: &'static str, default: bool) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            kind: ParamKind::Bool,
            min: 0.0,
            max: 1.0,
            default: if default { 1.0 } else { 0.0 },
            step: 1.0,
            step_labels: &[],
        }
    }

    /// Choice parameter over `labels`, stored as `1..=labels.len()`.
    ///
    /// `default` is the 1-based index of the default entry.
    pub const fn choice(
        name: &'static str,
        short_name: &'static str,
        labels: &'static [&'static str],
        default: usize,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            kind: ParamKind::Choice,
            min: 1.0,
            max: labels.len() as f32,
            default: default as f32,
            step: 1.0,
            step_labels: labels,
        }
    }

    /// Set the quantization step.
    pub const fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Clamp into `[min, max]`. NaN maps to `default`.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else {
            value.clamp(self.min, self.max)
        }
    }

    /// Clamp, round to the nearest multiple of `step` above `min`, clamp again.
    ///
    /// This is exactly what a store write does to its input.
    pub fn quantize(&self, value: f32) -> f32 {
        let clamped = self.clamp(value);
        if self.step <= 0.0 {
            return clamped;
        }
        let steps = libm::roundf((clamped - self.min) / self.step);
        self.clamp(self.min + steps * self.step)
    }

    /// Label for a choice value, `None` for other kinds or out-of-range values.
    pub fn label_for(&self, value: f32) -> Option<&'static str> {
        if self.kind != ParamKind::Choice {
            return None;
        }
        let index = libm::roundf(value - self.min);
        if index < 0.0 {
            return None;
        }
        self.step_labels.get(index as usize).copied()
    }

    /// Value for a choice label (case-insensitive, ignoring spaces, `-` and `_`).
    pub fn value_for_label(&self, label: &str) -> Option<f32> {
        let wanted = fold_label(label);
        self.step_labels
            .iter()
            .position(|l| fold_label(l) == wanted)
            .map(|i| self.min + i as f32)
    }

    /// Human-readable rendering of `value`.
    ///
    /// ```rust
    /// use ambit_core::ParamDescriptor;
    ///
    /// let menu = ParamDescriptor::choice("Filter Type", "Filter", &["Low Pass", "Off"], 2);
    /// assert_eq!(menu.format_value(1.0), "Low Pass");
    /// assert_eq!(ParamDescriptor::toggle("Freeze", "Freeze", false).format_value(1.0), "on");
    /// ```
    pub fn format_value(&self, value: f32) -> String {
        match self.kind {
            ParamKind::Bool => String::from(if value >= 0.5 { "on" } else { "off" }),
            ParamKind::Choice => self
                .label_for(value)
                .map_or_else(|| format!("{value}"), String::from),
            ParamKind::Float => match self.unit {
                ParamUnit::Percent => format!("{:.0}%", value * 100.0),
                ParamUnit::Hertz => format!("{value:.2} Hz"),
                ParamUnit::Milliseconds => format!("{value:.1} ms"),
                ParamUnit::None => format!("{value:.2}"),
            },
        }
    }
}

fn fold_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MENU: ParamDescriptor =
        ParamDescriptor::choice("Filter Type", "Filter", &["Low Pass", "Band Pass", "High Pass", "Off"], 4);

    #[test]
    fn nan_clamps_to_default() {
        let d = ParamDescriptor::float("Gain", "Gain", ParamUnit::None, 0.0, 2.0, 1.0);
        assert_eq!(d.clamp(f32::NAN), 1.0);
    }

    #[test]
    fn infinities_clamp_to_bounds() {
        let d = ParamDescriptor::float("Gain", "Gain", ParamUnit::None, 0.0, 2.0, 1.0);
        assert_eq!(d.quantize(f32::INFINITY), 2.0);
        assert_eq!(d.quantize(f32::NEG_INFINITY), 0.0);
    }

    #[test]
    fn stepped_values_round_from_min() {
        let d = ParamDescriptor::float("Delay", "Delay", ParamUnit::Milliseconds, 1.0, 100.0, 10.0)
            .with_step(0.1);
        assert!((d.quantize(10.04) - 10.0).abs() < 1e-4);
        assert!((d.quantize(10.06) - 10.1).abs() < 1e-4);
        assert!((d.quantize(100.04) - 100.0).abs() < 1e-4);
        assert!(d.quantize(100.04) <= 100.0);
    }

    #[test]
    fn choice_labels_roundtrip() {
        assert_eq!(MENU.min, 1.0);
        assert_eq!(MENU.max, 4.0);
        assert_eq!(MENU.label_for(3.0), Some("High Pass"));
        assert_eq!(MENU.value_for_label("high-pass"), Some(3.0));
        assert_eq!(MENU.value_for_label("HighPass"), Some(3.0));
        assert_eq!(MENU.value_for_label("notch"), None);
    }

    #[test]
    fn choice_quantizes_to_integers() {
        assert_eq!(MENU.quantize(2.4), 2.0);
        assert_eq!(MENU.quantize(0.0), 1.0);
        assert_eq!(MENU.quantize(9.0), 4.0);
    }

    #[test]
    fn toggle_quantizes_to_bool() {
        let t = ParamDescriptor::toggle("Freeze", "Freeze", false);
        assert_eq!(t.quantize(0.4), 0.0);
        assert_eq!(t.quantize(0.6), 1.0);
        assert_eq!(t.default, 0.0);
    }

    #[test]
    fn format_percent_and_hz() {
        let room = ParamDescriptor::float("Room Size", "Room", ParamUnit::Percent, 0.0, 1.0, 0.5);
        assert_eq!(room.format_value(0.25), "25%");
        let cutoff = ParamDescriptor::float("Cutoff", "Cutoff", ParamUnit::Hertz, 20.0, 20000.0, 600.0);
        assert_eq!(cutoff.format_value(1000.0), "1000.00 Hz");
    }

    #[test]
    fn choice_out_of_range_formats_as_number() {
        assert_eq!(MENU.label_for(0.0), None);
        assert_eq!(MENU.format_value(7.0), "7");
    }
}
