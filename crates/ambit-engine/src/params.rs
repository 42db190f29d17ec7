//! The engine's parameter schema.
//!
//! Every control the chain reads is a [`Param`]. Each variant has a stable
//! string key (`"CUTOFF"`, `"ROOM_SIZE"`, ...) used by config files and the
//! CLI, and a [`ParamDescriptor`] that fixes its kind, range, step and default.
//! [`new_store`] declares all of them exactly once.

use core::fmt;

use ambit_core::{ParamDescriptor, ParamUnit, ParameterStore, StoreKey};

/// Store type shared between the control surface and the graph.
pub type EngineParams = ParameterStore<Param>;

/// Entries of the filter menu, in menu order.
pub const FILTER_MENU_LABELS: &[&str] = &["Low Pass", "Band Pass", "High Pass", "Off"];

/// Entries of the phaser menu, in menu order.
pub const PHASER_MENU_LABELS: &[&str] = &["On", "Off"];

/// Every control of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Param {
    /// Filter cutoff in Hz.
    Cutoff,
    /// Phaser LFO rate in Hz.
    PhaserRate,
    /// Phaser sweep depth.
    PhaserDepth,
    /// Linear gain ahead of the phaser.
    Gain,
    /// Filter menu: low pass, band pass, high pass, off.
    FilterMenu,
    /// Phaser menu: on, off. Enables the gain + phaser stage.
    PhaserMenu,
    /// Reverb bypass.
    ReverbBypass,
    /// Reverb room size.
    RoomSize,
    /// Reverb high-frequency damping.
    Damping,
    /// Reverb stereo width.
    Width,
    /// Reverb wet level.
    WetLevel,
    /// Reverb dry level.
    DryLevel,
    /// Reverb freeze.
    FreezeMode,
    /// Modulation bypass: switches off gain, phaser and chorus together.
    ChorusBypass,
    /// Chorus LFO rate in Hz.
    Rate,
    /// Chorus sweep depth.
    Depth,
    /// Chorus centre delay in ms.
    CentreDelay,
    /// Chorus feedback.
    Feedback,
    /// Chorus wet/dry mix.
    Mix,
}

impl Param {
    /// All parameters in declaration order.
    pub const ALL: [Param; 19] = [
        Param::Cutoff,
        Param::PhaserRate,
        Param::PhaserDepth,
        Param::Gain,
        Param::FilterMenu,
        Param::PhaserMenu,
        Param::ReverbBypass,
        Param::RoomSize,
        Param::Damping,
        Param::Width,
        Param::WetLevel,
        Param::DryLevel,
        Param::FreezeMode,
        Param::ChorusBypass,
        Param::Rate,
        Param::Depth,
        Param::CentreDelay,
        Param::Feedback,
        Param::Mix,
    ];

    /// Stable string key.
    pub const fn key(self) -> &'static str {
        match self {
            Param::Cutoff => "CUTOFF",
            Param::PhaserRate => "PHASERRATE",
            Param::PhaserDepth => "PHASERDEPTH",
            Param::Gain => "GAIN",
            Param::FilterMenu => "FILTERMENU",
            Param::PhaserMenu => "PHASERMENU",
            Param::ReverbBypass => "REVERB_BYPASS",
            Param::RoomSize => "ROOM_SIZE",
            Param::Damping => "DAMPING",
            Param::Width => "WIDTH",
            Param::WetLevel => "WET_LEVEL",
            Param::DryLevel => "DRY_LEVEL",
            Param::FreezeMode => "FREEZE_MODE",
            Param::ChorusBypass => "CHORUS_BYPASS",
            Param::Rate => "RATE",
            Param::Depth => "DEPTH",
            Param::CentreDelay => "CENTRE_DELAY",
            Param::Feedback => "FEEDBACK",
            Param::Mix => "MIX",
        }
    }

    /// Look a parameter up by key, ignoring ASCII case.
    ///
    /// ```rust
    /// use ambit_engine::Param;
    ///
    /// assert_eq!(Param::from_key("room_size"), Some(Param::RoomSize));
    /// assert_eq!(Param::from_key("VOLUME"), None);
    /// ```
    pub fn from_key(key: &str) -> Option<Param> {
        let key = key.trim();
        Param::ALL
            .iter()
            .copied()
            .find(|p| p.key().eq_ignore_ascii_case(key))
    }

    /// Declared kind, range, step and default.
    pub const fn descriptor(self) -> ParamDescriptor {
        match self {
            Param::Cutoff => {
                ParamDescriptor::float("Cutoff", "Cutoff", ParamUnit::Hertz, 20.0, 20000.0, 600.0)
            }
            Param::PhaserRate => {
                ParamDescriptor::float("Rate", "PhsRate", ParamUnit::Hertz, 0.0, 2.0, 1.0)
            }
            Param::PhaserDepth => {
                ParamDescriptor::float("Depth", "PhsDepth", ParamUnit::None, 0.0, 1.0, 0.5)
            }
            Param::Gain => ParamDescriptor::float("Gain", "Gain", ParamUnit::None, 0.0, 2.0, 1.0),
            Param::FilterMenu => {
                ParamDescriptor::choice("Filter Menu", "Filter", FILTER_MENU_LABELS, 4)
            }
            Param::PhaserMenu => {
                ParamDescriptor::choice("Phaser Menu", "Phaser", PHASER_MENU_LABELS, 2)
            }
            Param::ReverbBypass => ParamDescriptor::toggle("Reverb Bypass", "RvbByp", false),
            Param::RoomSize => normalized("Room Size", "Room", 0.5),
            Param::Damping => normalized("Damping", "Damp", 0.5),
            Param::Width => normalized("Width", "Width", 1.0),
            Param::WetLevel => normalized("Wet Level", "Wet", 0.5),
            Param::DryLevel => normalized("Dry Level", "Dry", 0.5),
            Param::FreezeMode => ParamDescriptor::toggle("Freeze Mode", "Freeze", false),
            Param::ChorusBypass => ParamDescriptor::toggle("Chorus Bypass", "ChoByp", false),
            Param::Rate => {
                ParamDescriptor::float("Rate", "ChoRate", ParamUnit::Hertz, 0.0, 5.0, 1.0)
                    .with_step(0.01)
            }
            Param::Depth => {
                ParamDescriptor::float("Depth", "ChoDepth", ParamUnit::None, 0.0, 1.0, 0.5)
                    .with_step(0.01)
            }
            Param::CentreDelay => ParamDescriptor::float(
                "Centre Delay",
                "Centre",
                ParamUnit::Milliseconds,
                1.0,
                100.0,
                10.0,
            )
            .with_step(0.1),
            Param::Feedback => {
                ParamDescriptor::float("Feedback", "Fdbk", ParamUnit::None, -1.0, 1.0, 0.0)
                    .with_step(0.01)
            }
            Param::Mix => normalized("Mix", "Mix", 0.5),
        }
    }
}

const fn normalized(name: &'static str, short: &'static str, default: f32) -> ParamDescriptor {
    ParamDescriptor::float(name, short, ParamUnit::Percent, 0.0, 1.0, default).with_step(0.01)
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl StoreKey for Param {
    const COUNT: usize = Param::ALL.len();

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// A store with every [`Param`] declared at its default.
pub fn new_store() -> EngineParams {
    let mut store = ParameterStore::new();
    for param in Param::ALL {
        store.declare(param, param.descriptor());
    }
    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use ambit_core::ParamKind;

    #[test]
    fn all_is_in_index_order() {
        for (i, p) in Param::ALL.iter().enumerate() {
            assert_eq!(p.index(), i);
        }
    }

    #[test]
    fn keys_round_trip() {
        for p in Param::ALL {
            assert_eq!(Param::from_key(p.key()), Some(p));
            assert_eq!(Param::from_key(&p.key().to_lowercase()), Some(p));
        }
    }

    #[test]
    fn defaults_sit_inside_ranges() {
        for p in Param::ALL {
            let d = p.descriptor();
            assert!(d.min <= d.default && d.default <= d.max, "{p}");
            assert!((d.quantize(d.default) - d.default).abs() < 1e-5, "{p} default off its step grid");
        }
    }

    #[test]
    fn store_declares_everything() {
        let store = new_store();
        assert_eq!(store.declared_count(), Param::COUNT);
        assert_eq!(store.get(Param::Cutoff), 600.0);
        assert_eq!(store.get(Param::FilterMenu), 4.0);
        assert_eq!(store.get(Param::PhaserMenu), 2.0);
        assert!(!store.get_bool(Param::ChorusBypass));
        assert_eq!(store.get(Param::Width), 1.0);
    }

    #[test]
    fn menus_are_choices() {
        let filter = Param::FilterMenu.descriptor();
        assert_eq!(filter.kind, ParamKind::Choice);
        assert_eq!(filter.label_for(1.0), Some("Low Pass"));
        assert_eq!(filter.value_for_label("off"), Some(4.0));
        assert_eq!(Param::PhaserMenu.descriptor().value_for_label("ON"), Some(1.0));
    }
}
