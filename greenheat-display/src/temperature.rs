//! Temperature value type shared between the heating controller and the display.

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Temperature(f32);

impl Temperature {
    pub fn from_celsius(degrees: f32) -> Self {
        Self(degrees)
    }

    pub fn celsius(&self) -> f32 {
        self.0
    }
}

impl From<f32> for Temperature {
    fn from(degrees: f32) -> Self {
        Self::from_celsius(degrees)
    }
}
