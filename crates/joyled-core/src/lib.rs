#![cfg_attr(not(test), no_std)]

//! Board-independent input/state core: joystick mapping, debounced button
//! handling and the render/control loop.

pub mod control;
pub mod debounce;
pub mod input;
pub mod mapping;
pub mod render;
pub mod state;
pub mod timing;
