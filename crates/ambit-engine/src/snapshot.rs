//! Per-block parameter capture.
//!
//! [`capture`] reads every parameter once and turns the raw store values
//! into the stage configurations for one block: menu indices become modes,
//! toggles become bools, and the cutoff is limited to what the sample rate
//! can represent.

use ambit_core::ProcessSpec;
use ambit_effects::{
    ChainSnapshot, ChorusConfig, FilterConfig, FilterMode, ModulationConfig, ReverbConfig,
};

use crate::{EngineParams, Param};

/// Lowest cutoff handed to the filter stage.
pub const MIN_CUTOFF_HZ: f32 = 20.0;
/// Highest cutoff as a fraction of the sample rate.
pub const MAX_CUTOFF_RATIO: f32 = 0.49;

/// Phaser menu entry that enables the modulation section.
const PHASER_ON: f32 = 1.0;

/// Build the configuration for the next block from the live store.
///
/// Lock-free and allocation-free; safe to call on the audio thread.
pub fn capture(store: &EngineParams, spec: &ProcessSpec) -> ChainSnapshot {
    let max_cutoff = (spec.sample_rate * MAX_CUTOFF_RATIO).max(MIN_CUTOFF_HZ);
    let menu = store.get(Param::FilterMenu);
    // Gain, phaser and chorus switch together.
    let modulation_bypass =
        store.get(Param::PhaserMenu) != PHASER_ON || store.get_bool(Param::ChorusBypass);

    ChainSnapshot {
        filter: FilterConfig {
            mode: FilterMode::from_menu_index(menu_index(menu)),
            cutoff_hz: store.get(Param::Cutoff).clamp(MIN_CUTOFF_HZ, max_cutoff),
        },
        modulation: ModulationConfig {
            bypass: modulation_bypass,
            gain: store.get(Param::Gain),
            rate_hz: store.get(Param::PhaserRate),
            depth: store.get(Param::PhaserDepth),
        },
        chorus: ChorusConfig {
            bypass: modulation_bypass,
            rate_hz: store.get(Param::Rate),
            depth: store.get(Param::Depth),
            centre_delay_ms: store.get(Param::CentreDelay),
            feedback: store.get(Param::Feedback),
            mix: store.get(Param::Mix),
        },
        reverb: ReverbConfig {
            bypass: store.get_bool(Param::ReverbBypass),
            room_size: store.get(Param::RoomSize),
            damping: store.get(Param::Damping),
            width: store.get(Param::Width),
            wet_level: store.get(Param::WetLevel),
            dry_level: store.get(Param::DryLevel),
            freeze: store.get_bool(Param::FreezeMode),
        },
    }
}

fn menu_index(value: f32) -> u32 {
    libm::roundf(value).max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::new_store;

    const SPEC: ProcessSpec = ProcessSpec::new(48000.0, 512, 2);

    #[test]
    fn defaults() {
        let snap = capture(&new_store(), &SPEC);
        assert_eq!(snap.filter.mode, FilterMode::Disabled);
        assert_eq!(snap.filter.cutoff_hz, 600.0);
        assert!(snap.modulation.bypass);
        assert!(snap.chorus.bypass);
        assert!(!snap.reverb.bypass);
        assert!(!snap.reverb.freeze);
        assert_eq!(snap.reverb.width, 1.0);
    }

    #[test]
    fn menus_resolve() {
        let store = new_store();
        store.set(Param::FilterMenu, 3.0);
        store.set(Param::PhaserMenu, 1.0);
        let snap = capture(&store, &SPEC);
        assert_eq!(snap.filter.mode, FilterMode::Highpass);
        assert!(!snap.modulation.bypass);
        assert!(!snap.chorus.bypass);
    }

    #[test]
    fn chorus_bypass_switches_off_modulation() {
        let store = new_store();
        store.set(Param::PhaserMenu, 1.0);
        store.set(Param::ChorusBypass, 1.0);
        let snap = capture(&store, &SPEC);
        assert!(snap.modulation.bypass);
        assert!(snap.chorus.bypass);

        store.set(Param::ChorusBypass, 0.0);
        store.set(Param::PhaserMenu, 2.0);
        let snap = capture(&store, &SPEC);
        assert!(snap.modulation.bypass);
        assert!(snap.chorus.bypass);
    }

    #[test]
    fn menu_index_rounds_half_away_from_zero() {
        assert_eq!(menu_index(2.5), 3);
        assert_eq!(menu_index(1.49), 1);
        assert_eq!(menu_index(-0.7), 0);
    }

    #[test]
    fn cutoff_limited_by_sample_rate() {
        let store = new_store();
        store.set(Param::Cutoff, 20000.0);
        let low_rate = ProcessSpec::new(22050.0, 512, 2);
        let snap = capture(&store, &low_rate);
        assert!((snap.filter.cutoff_hz - 22050.0 * MAX_CUTOFF_RATIO).abs() < 1e-3);
        assert_eq!(capture(&store, &SPEC).filter.cutoff_hz, 20000.0);
    }

    #[test]
    fn capture_is_pure() {
        let store = new_store();
        store.set(Param::RoomSize, 0.8);
        assert_eq!(capture(&store, &SPEC), capture(&store, &SPEC));
    }
}
