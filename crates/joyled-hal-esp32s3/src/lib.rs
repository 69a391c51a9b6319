#![no_std]

//! ESP32-S3 adapters for the joyled core: OLED display, joystick ADC, boot
//! clock and the button interrupt glue.

pub mod input;
pub mod platform;
