//! Shell pump tying transport, console and diagnostics together.
//!
//! One `poll` per main-loop iteration: drain whatever the rx interrupt
//! has queued, feed it byte-by-byte through the editor, then flush any
//! pending diagnostics out of the TX path. Nothing here blocks.

use core::fmt::Write;

use crate::console::Console;
use crate::logging::{LogLevel, LogStream};
use crate::shell_log;
use crate::transport::{SerialPort, Transport, TransportWriter};

/// Cooperative front end over one transport.
///
/// Owns the console state and borrows the transport, so the interrupt
/// handlers can keep their own reference to the same transport instance.
pub struct Shell<'a, P: SerialPort> {
    transport: &'a Transport<P>,
    log: &'a LogStream,
    console: Console,
}

impl<'a, P: SerialPort> Shell<'a, P> {
    pub fn new(transport: &'a Transport<P>, log: &'a LogStream) -> Self {
        Self {
            transport,
            log,
            console: Console::new(),
        }
    }

    /// Initialize the transport and greet the terminal.
    ///
    /// Returns `false` if the peripheral refused to arm reception.
    pub fn start(&mut self) -> bool {
        if !self.transport.init() {
            shell_log!(self.log, LogLevel::Error, "transport init failed");
            return false;
        }

        let mut out = TransportWriter::new(self.transport);
        self.console.print_banner(&mut out);
        true
    }

    /// Drain pending RX bytes through the editor, then flush queued
    /// diagnostics.
    pub fn poll(&mut self) {
        while let Some(byte) = self.transport.receive_byte() {
            let mut out = TransportWriter::new(self.transport);
            if let Some(Err(err)) = self.console.process_byte(byte, &mut out) {
                shell_log!(self.log, LogLevel::Warn, "command failed: {}", err);
            }
        }

        self.drain_diagnostics();
    }

    /// Change the serial rate, quiescing in-flight I/O first.
    ///
    /// On failure the prior configuration is attempted-but-unconfirmed;
    /// the failure is also recorded on the diagnostic stream.
    pub fn reconfigure(&self, baud: u32) -> bool {
        let ok = self.transport.reconfigure(baud);
        if !ok {
            shell_log!(self.log, LogLevel::Error, "reconfigure to {} baud failed", baud);
        }
        ok
    }

    /// Console state, mainly for inspection.
    pub fn console(&self) -> &Console {
        &self.console
    }

    fn drain_diagnostics(&mut self) {
        while let Some(entry) = self.log.drain() {
            let mut out = TransportWriter::new(self.transport);
            let _ = writeln!(
                out,
                "[{:05}] {}: {}",
                entry.seq,
                entry.level.as_str(),
                entry.message()
            );
        }
    }
}
