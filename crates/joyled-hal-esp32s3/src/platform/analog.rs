use esp_hal::{
    Blocking,
    analog::adc::{Adc, AdcChannel, AdcPin},
    peripherals::ADC1,
};
use joyled_core::{
    control::{AnalogSource, Axis},
    mapping::ADC_MAX,
};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SampleError {
    /// The converter rejected a oneshot read on this axis.
    Conversion(Axis),
}

/// Both joystick axes on ADC1.
///
/// The converter serves one channel at a time; each [`AnalogSource::sample`]
/// call selects the axis pin and blocks until its conversion completes.
pub struct JoystickAdc<'d, XPIN, YPIN> {
    adc: Adc<'d, ADC1<'d>, Blocking>,
    x: AdcPin<XPIN, ADC1<'d>>,
    y: AdcPin<YPIN, ADC1<'d>>,
}

impl<'d, XPIN, YPIN> JoystickAdc<'d, XPIN, YPIN>
where
    XPIN: AdcChannel,
    YPIN: AdcChannel,
{
    pub fn new(
        adc: Adc<'d, ADC1<'d>, Blocking>,
        x: AdcPin<XPIN, ADC1<'d>>,
        y: AdcPin<YPIN, ADC1<'d>>,
    ) -> Self {
        Self { adc, x, y }
    }
}

impl<XPIN, YPIN> AnalogSource for JoystickAdc<'_, XPIN, YPIN>
where
    XPIN: AdcChannel,
    YPIN: AdcChannel,
{
    type Error = SampleError;

    fn sample(&mut self, axis: Axis) -> Result<u16, Self::Error> {
        let raw = match axis {
            Axis::X => nb::block!(self.adc.read_oneshot(&mut self.x)),
            Axis::Y => nb::block!(self.adc.read_oneshot(&mut self.y)),
        };

        raw.map(|value| value.min(ADC_MAX))
            .map_err(|_| SampleError::Conversion(axis))
    }
}
