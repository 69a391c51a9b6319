pub mod analog;
pub mod clock;
pub mod display;
