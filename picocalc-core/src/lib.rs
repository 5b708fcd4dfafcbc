//! Board-agnostic core logic for the PicoCalc system firmware
//!
//! This crate contains the parts of the firmware that coordinate work
//! across the two RP2040 cores without touching registers:
//!
//! - Dirty flag and frame lock shared by the renderer and the flush worker
//! - Flush worker loop (runs on core 1)
//! - Periodic signal sources (dirty tick, status header refresh)
//! - Cooperative tone scheduler with a blocking-entry reentrancy guard
//! - Keyboard battery gauge and clock formatting for the header
//! - System configuration types and parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod display;
pub mod signal;
pub mod status;
pub mod terminal;
pub mod timer;
pub mod tone;

#[cfg(test)]
pub(crate) mod mock;
