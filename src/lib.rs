//! Host-side helpers for kernel bring-up: the interrupt vector table
//! generator and a UDP client for exercising the network stack.

#![warn(clippy::pedantic)]
#![deny(unsafe_code)]

pub mod emitter;
pub mod logging;
pub mod probe;
pub mod vectors;
