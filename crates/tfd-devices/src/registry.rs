//! Device arena and handle resolution.

use tfd_core::{SensorId, SwitchId};

use crate::error::{DeviceError, DeviceResult};
use crate::sensor::TemperatureSource;
use crate::switch::SwitchOutput;

struct SwitchEntry {
    name: String,
    output: Box<dyn SwitchOutput>,
}

/// Arena of registered devices.
///
/// Registration hands out a compact handle; all later access goes through
/// that handle. Devices are registered once at startup and never removed,
/// so handles stay valid for the process lifetime.
#[derive(Default)]
pub struct DeviceRegistry {
    sensors: Vec<Box<dyn TemperatureSource>>,
    switches: Vec<SwitchEntry>,
}

impl DeviceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a temperature source and get its handle.
    pub fn register_sensor(&mut self, sensor: Box<dyn TemperatureSource>) -> SensorId {
        let id = SensorId::from_index(self.sensors.len() as u32);
        self.sensors.push(sensor);
        id
    }

    /// Register a switch output under a unique name.
    pub fn register_switch(
        &mut self,
        name: impl Into<String>,
        output: Box<dyn SwitchOutput>,
    ) -> DeviceResult<SwitchId> {
        let name = name.into();
        if self.switches.iter().any(|s| s.name == name) {
            return Err(DeviceError::DuplicateName { name });
        }
        let id = SwitchId::from_index(self.switches.len() as u32);
        self.switches.push(SwitchEntry { name, output });
        Ok(id)
    }

    /// Iterate over all registered sensor handles.
    pub fn sensor_ids(&self) -> impl Iterator<Item = SensorId> + '_ {
        (0..self.sensors.len() as u32).map(SensorId::from_index)
    }

    /// Designator tag of a sensor, or `None` for a stale handle.
    pub fn sensor_designator(&self, id: SensorId) -> Option<char> {
        self.sensors
            .get(id.index() as usize)
            .map(|s| s.designator())
    }

    /// Read a sensor's current temperature.
    pub fn read_temperature(&self, id: SensorId) -> DeviceResult<f64> {
        let sensor =
            self.sensors
                .get(id.index() as usize)
                .ok_or(DeviceError::UnknownDevice {
                    kind: "sensor",
                    index: id.index(),
                })?;
        sensor.current_temperature()
    }

    /// Resolve a configured switch name to its handle.
    pub fn find_switch(&self, name: &str) -> Option<SwitchId> {
        self.switches
            .iter()
            .position(|s| s.name == name)
            .map(|i| SwitchId::from_index(i as u32))
    }

    /// Name a switch was registered under, or `None` for a stale handle.
    pub fn switch_name(&self, id: SwitchId) -> Option<&str> {
        self.switches
            .get(id.index() as usize)
            .map(|s| s.name.as_str())
    }

    /// Write a switch's on/off state.
    pub fn set_switch_state(&mut self, id: SwitchId, on: bool) -> DeviceResult<()> {
        self.switch_mut(id)?.set_state(on)
    }

    /// Write a switch's duty value.
    pub fn set_switch_value(&mut self, id: SwitchId, duty: f64) -> DeviceResult<()> {
        self.switch_mut(id)?.set_value(duty)
    }

    /// Number of registered sensors.
    pub fn sensor_count(&self) -> usize {
        self.sensors.len()
    }

    /// Number of registered switches.
    pub fn switch_count(&self) -> usize {
        self.switches.len()
    }

    fn switch_mut(&mut self, id: SwitchId) -> DeviceResult<&mut Box<dyn SwitchOutput>> {
        self.switches
            .get_mut(id.index() as usize)
            .map(|s| &mut s.output)
            .ok_or(DeviceError::UnknownDevice {
                kind: "switch",
                index: id.index(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{SimSensor, SimSwitch};

    #[test]
    fn empty_registry() {
        let reg = DeviceRegistry::new();
        assert_eq!(reg.sensor_count(), 0);
        assert_eq!(reg.switch_count(), 0);
        assert!(reg.find_switch("fan").is_none());
    }

    #[test]
    fn register_and_read_sensor() {
        let mut reg = DeviceRegistry::new();
        let id = reg.register_sensor(Box::new(SimSensor::new('T', 42.0)));

        assert_eq!(reg.sensor_designator(id), Some('T'));
        assert_eq!(reg.read_temperature(id).unwrap(), 42.0);
    }

    #[test]
    fn sensor_ids_cover_all_registered() {
        let mut reg = DeviceRegistry::new();
        reg.register_sensor(Box::new(SimSensor::new('T', 0.0)));
        reg.register_sensor(Box::new(SimSensor::new('B', 0.0)));

        let tags: Vec<char> = reg
            .sensor_ids()
            .map(|id| reg.sensor_designator(id).unwrap())
            .collect();
        assert_eq!(tags, vec!['T', 'B']);
    }

    #[test]
    fn offline_sensor_read_fails() {
        let mut reg = DeviceRegistry::new();
        let sensor = SimSensor::new('T', 42.0);
        let probe = sensor.probe();
        let id = reg.register_sensor(Box::new(sensor));

        probe.set_online(false);
        assert!(matches!(
            reg.read_temperature(id),
            Err(DeviceError::NotAvailable { .. })
        ));
    }

    #[test]
    fn switch_lookup_by_name() {
        let mut reg = DeviceRegistry::new();
        let id = reg.register_switch("fan", Box::new(SimSwitch::new())).unwrap();

        assert_eq!(reg.find_switch("fan"), Some(id));
        assert_eq!(reg.switch_name(id), Some("fan"));
        assert!(reg.find_switch("light").is_none());
    }

    #[test]
    fn duplicate_switch_name_rejected() {
        let mut reg = DeviceRegistry::new();
        reg.register_switch("fan", Box::new(SimSwitch::new())).unwrap();

        let err = reg
            .register_switch("fan", Box::new(SimSwitch::new()))
            .unwrap_err();
        assert!(matches!(err, DeviceError::DuplicateName { .. }));
    }

    #[test]
    fn switch_writes_reach_device() {
        let mut reg = DeviceRegistry::new();
        let switch = SimSwitch::new();
        let probe = switch.probe();
        let id = reg.register_switch("fan", Box::new(switch)).unwrap();

        reg.set_switch_state(id, true).unwrap();
        reg.set_switch_value(id, 127.0).unwrap();

        assert_eq!(probe.last_state(), Some(true));
        assert_eq!(probe.last_value(), Some(127.0));
    }
}
