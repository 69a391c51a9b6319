//! Integer mapping from 12-bit joystick samples to LED and screen space.

/// Largest value a 12-bit ADC sample (and a PWM level) can take.
pub const ADC_MAX: u16 = 4095;
/// Raw sample reported with the stick at rest.
pub const ADC_CENTER: u16 = 2048;
/// Displacements strictly below this are treated as rest.
pub const DEAD_ZONE: u16 = 50;
/// Brightness gained per count of displacement from center.
pub const BRIGHTNESS_GAIN: u32 = 2;

/// Maps a raw axis sample to a PWM brightness level in `0..=ADC_MAX`.
///
/// Inside the dead zone the LED is off. Outside it brightness grows linearly
/// with displacement from [`ADC_CENTER`]. Only `raw = 0` would land one count
/// past [`ADC_MAX`]; it saturates.
pub const fn map_joystick_to_brightness(raw: u16) -> u16 {
    let diff = raw.abs_diff(ADC_CENTER);
    if diff < DEAD_ZONE {
        return 0;
    }

    let level = diff as u32 * BRIGHTNESS_GAIN;
    if level > ADC_MAX as u32 {
        ADC_MAX
    } else {
        level as u16
    }
}

/// Flips an axis so that "up" on the stick is "up" on the screen.
pub const fn invert_axis(raw: u16) -> u16 {
    ADC_MAX.saturating_sub(raw)
}

/// Scales a raw sample linearly into `0..=extent`.
pub const fn scale_to_extent(raw: u16, extent: u16) -> u16 {
    let raw = if raw > ADC_MAX { ADC_MAX } else { raw };
    (raw as u32 * extent as u32 / ADC_MAX as u32) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_position_is_dark() {
        assert_eq!(map_joystick_to_brightness(ADC_CENTER), 0);
        assert_eq!(map_joystick_to_brightness(2000), 0);
        assert_eq!(map_joystick_to_brightness(2090), 0);
    }

    #[test]
    fn dead_zone_boundary() {
        // 49 counts away is still rest, 50 is not.
        assert_eq!(map_joystick_to_brightness(2097), 0);
        assert_eq!(map_joystick_to_brightness(1999), 0);
        assert_eq!(map_joystick_to_brightness(2098), 100);
        assert_eq!(map_joystick_to_brightness(1998), 100);
        assert_ne!(map_joystick_to_brightness(2099), 0);
        assert_eq!(map_joystick_to_brightness(2100), 104);
    }

    #[test]
    fn brightness_is_twice_the_displacement() {
        assert_eq!(map_joystick_to_brightness(3000), 1904);
        assert_eq!(map_joystick_to_brightness(1000), 2096);
        assert_eq!(map_joystick_to_brightness(ADC_MAX), 4094);
    }

    #[test]
    fn full_deflection_low_side_saturates() {
        assert_eq!(map_joystick_to_brightness(0), ADC_MAX);
        assert_eq!(map_joystick_to_brightness(1), 4094);
    }

    #[test]
    fn mapping_is_deterministic_and_in_range() {
        for raw in 0..=ADC_MAX {
            let level = map_joystick_to_brightness(raw);
            assert!(level <= ADC_MAX);
            assert_eq!(level, map_joystick_to_brightness(raw));
        }
    }

    #[test]
    fn inversion_mirrors_around_midpoint() {
        assert_eq!(invert_axis(0), ADC_MAX);
        assert_eq!(invert_axis(ADC_MAX), 0);
        assert_eq!(invert_axis(2047), ADC_CENTER);
    }

    #[test]
    fn scaling_hits_both_ends() {
        assert_eq!(scale_to_extent(0, 120), 0);
        assert_eq!(scale_to_extent(ADC_MAX, 120), 120);
        assert_eq!(scale_to_extent(ADC_CENTER, 120), 60);
        assert_eq!(scale_to_extent(ADC_CENTER, 56), 28);
        assert_eq!(scale_to_extent(u16::MAX, 56), 56);
    }
}
