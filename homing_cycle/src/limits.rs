//! Limit input initialisation.

use homing_common::hal::pins::PinMap;
use homing_common::hal::port::StepPort;
use homing_common::settings::HomingSettings;
use tracing::info;

/// Configure every mapped limit pin as an input.
///
/// Pull-ups follow `limit_pullup`. Call once before the first homing run.
pub fn init_limits<P: StepPort>(port: &mut P, settings: &HomingSettings, pins: &PinMap) {
    let mask = pins.limit_mask();
    port.configure_limit_inputs(mask, settings.limit_pullup);
    info!(
        "Limit inputs {:#010b} configured (pullup: {})",
        mask, settings.limit_pullup
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use homing_hal::{PortEvent, ScriptedPort};

    #[test]
    fn enables_pullups_on_limit_pins() {
        let pins = PinMap::default();
        let settings = HomingSettings::default();
        let mut port = ScriptedPort::new(pins.clone());

        init_limits(&mut port, &settings, &pins);

        assert_eq!(port.pullups(), pins.limit_mask());
        assert_eq!(
            port.log().snapshot(),
            vec![PortEvent::ConfigureLimits {
                mask: pins.limit_mask(),
                pullup: true
            }]
        );
    }

    #[test]
    fn pullups_disabled_by_setting() {
        let pins = PinMap::default();
        let settings = HomingSettings {
            limit_pullup: false,
            ..Default::default()
        };
        let mut port = ScriptedPort::new(pins.clone());

        init_limits(&mut port, &settings, &pins);

        assert_eq!(port.pullups(), 0);
    }
}
