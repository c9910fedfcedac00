//! # uart-shell
//!
//! Interactive command-line front end for a microcontroller, reachable
//! over a raw serial byte stream.
//!
//! ## Architecture
//!
//! ```text
//! rx irq ──▶ RingBuffer ──▶ Console ──▶ commands ──▶ RingBuffer ──▶ tx irq
//!            (transport)    (editor)                 (transport)
//! ```
//!
//! Two execution contexts share the transport: the hardware interrupt
//! domain and the cooperative main loop. Each direction is a strict
//! single-producer/single-consumer ring, so no locks are needed and no
//! operation blocks. The concrete peripheral sits behind the
//! [`SerialPort`] trait; the crate links no HAL and never allocates.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod console;
pub mod logging;
pub mod ring;
pub mod shell;
pub mod transport;

pub use console::{Console, ConsoleError};
pub use logging::{LogLevel, LogStream};
pub use ring::RingBuffer;
pub use shell::Shell;
pub use transport::{SerialPort, Transport, TransportWriter};
