//! Startup resolution of config entries into fader controllers.
//!
//! Resolution is a filtering pass: every entry either produces exactly one
//! controller or is dropped. Drops are policy, not errors: a config may
//! legitimately describe hardware that is absent on this machine. Each drop
//! leaves a debug breadcrumb and nothing else.

use tfd_core::SensorId;
use tfd_devices::DeviceRegistry;
use tfd_project::FaderDef;

use crate::band::FadeBand;
use crate::fader::{FaderController, PollIntervals};

/// Build one controller per valid definition.
pub fn build_faders(defs: &[FaderDef], devices: &DeviceRegistry) -> Vec<FaderController> {
    defs.iter()
        .filter_map(|def| build_fader(def, devices))
        .collect()
}

fn build_fader(def: &FaderDef, devices: &DeviceRegistry) -> Option<FaderController> {
    if !def.enable {
        return None;
    }

    let Some(designator) = def.resolved_designator() else {
        tracing::debug!("fader '{}' dropped: no designator", def.name);
        return None;
    };

    let sources: Vec<SensorId> = devices
        .sensor_ids()
        .filter(|&id| devices.sensor_designator(id) == Some(designator))
        .collect();
    if sources.is_empty() {
        tracing::debug!(
            "fader '{}' dropped: no sensors tagged '{}'",
            def.name,
            designator
        );
        return None;
    }

    let Some(switch_name) = def.resolved_switch() else {
        tracing::debug!("fader '{}' dropped: no switch configured", def.name);
        return None;
    };
    let Some(switch) = devices.find_switch(switch_name) else {
        tracing::debug!(
            "fader '{}' dropped: switch '{}' not registered",
            def.name,
            switch_name
        );
        return None;
    };

    let band = FadeBand::new(
        def.min_fade_temp,
        def.max_fade_temp,
        def.min_fade_pwm,
        def.max_fade_pwm,
    );
    let poll = PollIntervals {
        heatup: def.heatup_poll,
        cooldown: def.cooldown_poll,
        fading: def.fading_poll,
    };

    FaderController::new(def.name.clone(), sources, band, switch, poll).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfd_devices::{SimSensor, SimSwitch};

    fn def(yaml: &str) -> FaderDef {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn registry_with(tags: &[char], switches: &[&str]) -> DeviceRegistry {
        let mut devices = DeviceRegistry::new();
        for &tag in tags {
            devices.register_sensor(Box::new(SimSensor::new(tag, 20.0)));
        }
        for &name in switches {
            devices
                .register_switch(name, Box::new(SimSwitch::new()))
                .unwrap();
        }
        devices
    }

    #[test]
    fn disabled_entry_produces_nothing() {
        let devices = registry_with(&['T'], &["fan"]);
        let defs = [def("{name: hotend, switch: fan}")];
        assert!(build_faders(&defs, &devices).is_empty());
    }

    #[test]
    fn legacy_hotend_binds_t_sensors() {
        let devices = registry_with(&['T', 'B'], &["fan"]);
        let defs = [def("{name: hotend, enable: true, switch: fan}")];

        let faders = build_faders(&defs, &devices);
        assert_eq!(faders.len(), 1);
        assert_eq!(faders[0].sources().len(), 1);
        assert_eq!(
            devices.sensor_designator(faders[0].sources()[0]),
            Some('T')
        );
    }

    #[test]
    fn missing_designator_drops_entry() {
        let devices = registry_with(&['T'], &["fan"]);
        let defs = [def("{name: case_fan, enable: true, switch: fan}")];
        assert!(build_faders(&defs, &devices).is_empty());
    }

    #[test]
    fn no_matching_sensors_drops_entry() {
        // Designator 'T' with zero sensors tagged 'T'
        let devices = registry_with(&['B'], &["fan"]);
        let defs = [def("{name: hotend, enable: true, switch: fan}")];
        assert!(build_faders(&defs, &devices).is_empty());
    }

    #[test]
    fn legacy_device_field_resolves_switch() {
        let devices = registry_with(&['T'], &["fan"]);
        let defs = [def("{name: hotend, enable: true, device: fan}")];

        let faders = build_faders(&defs, &devices);
        assert_eq!(faders.len(), 1);
        assert_eq!(devices.switch_name(faders[0].switch()), Some("fan"));
    }

    #[test]
    fn missing_switch_drops_entry() {
        let devices = registry_with(&['T'], &["fan"]);
        let defs = [def("{name: hotend, enable: true}")];
        assert!(build_faders(&defs, &devices).is_empty());
    }

    #[test]
    fn unregistered_switch_name_drops_entry() {
        let devices = registry_with(&['T'], &["fan"]);
        let defs = [def("{name: hotend, enable: true, switch: nonexistent}")];
        assert!(build_faders(&defs, &devices).is_empty());
    }

    #[test]
    fn defaults_and_clamping_flow_into_band() {
        let devices = registry_with(&['T'], &["fan"]);
        // max bounds configured below the min bounds: clamped up, not rejected
        let defs = [def(
            "{name: hotend, enable: true, switch: fan, \
             min_fade_temp: 90, max_fade_temp: 60, \
             min_fade_pwm: 120, max_fade_pwm: 40}",
        )];

        let faders = build_faders(&defs, &devices);
        assert_eq!(faders.len(), 1);
        let band = faders[0].band();
        assert_eq!(band.temp_low, 90.0);
        assert_eq!(band.temp_high, 90.0);
        assert_eq!(band.pwm_low, 120.0);
        assert_eq!(band.pwm_high, 120.0);
    }

    #[test]
    fn fresh_fader_starts_on_heatup_countdown() {
        let devices = registry_with(&['T'], &["fan"]);
        let defs = [def("{name: hotend, enable: true, switch: fan, heatup_poll: 7}")];

        let faders = build_faders(&defs, &devices);
        assert_eq!(faders[0].countdown(), 7);
        assert!(!faders[0].is_on());
        assert_eq!(faders[0].last_value(), None);
    }

    #[test]
    fn multiple_entries_resolve_independently() {
        let devices = registry_with(&['T', 'B'], &["fan", "bed_fan"]);
        let defs = [
            def("{name: hotend, enable: true, switch: fan}"),
            def("{name: bed, enable: true, designator: B, switch: bed_fan}"),
            def("{name: broken, enable: true, switch: fan}"), // no designator
        ];

        let faders = build_faders(&defs, &devices);
        assert_eq!(faders.len(), 2);
        assert_eq!(faders[0].name(), "hotend");
        assert_eq!(faders[1].name(), "bed");
    }
}
