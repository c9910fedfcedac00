//! Byte transport bridging the serial interrupt domain and the main loop.
//!
//! Owns one RX ring and one TX ring. The interrupt side does nothing but
//! ring push/pop plus re-arming the next single-byte transfer; all line
//! handling lives upstream in the console. At most one byte is in flight
//! on the wire per direction.
//!
//! The concrete peripheral is reached only through [`SerialPort`], so the
//! crate carries no hardware-abstraction dependency.

use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};

use crate::config::{RX_RING_CAPACITY, TX_RING_CAPACITY};
use crate::ring::RingBuffer;

/// Narrow interface to an interrupt-driven serial peripheral.
///
/// Methods take `&self`: implementations talk to memory-mapped registers
/// or a vendor driver and handle their own interior mutability. Every
/// method must be non-blocking.
pub trait SerialPort {
    /// Begin transmission of a single byte. Completion is reported
    /// through [`Transport::on_tx_interrupt`]. Returns `false` if the
    /// peripheral rejected the transfer.
    fn start_tx(&self, byte: u8) -> bool;

    /// Arm reception of the next byte. Completion is reported through
    /// [`Transport::on_rx_interrupt`]. Returns `false` if the peripheral
    /// rejected the request.
    fn arm_rx(&self) -> bool;

    /// The byte latched by the last completed reception. Only meaningful
    /// inside the receive-complete interrupt.
    fn last_rx(&self) -> u8;

    /// Abort any in-flight transfer in either direction.
    fn abort(&self);

    /// Re-initialize the peripheral at a new baud rate.
    fn set_baud(&self, baud: u32) -> bool;
}

/// Interrupt-driven byte transport over a [`SerialPort`].
///
/// Producer/consumer roles are fixed by construction: the rx interrupt
/// produces into the RX ring and the main loop consumes it; the main
/// loop produces into the TX ring and the tx interrupt consumes it.
/// With that split both rings are lock-free and nothing here blocks.
pub struct Transport<P: SerialPort> {
    port: P,
    rx: RingBuffer<RX_RING_CAPACITY>,
    tx: RingBuffer<TX_RING_CAPACITY>,
    /// True while a byte is physically in flight on the TX wire.
    tx_busy: AtomicBool,
}

impl<P: SerialPort> Transport<P> {
    /// Wrap a peripheral. Call [`init`](Self::init) before use.
    pub const fn new(port: P) -> Self {
        Self {
            port,
            rx: RingBuffer::new(),
            tx: RingBuffer::new(),
            tx_busy: AtomicBool::new(false),
        }
    }

    /// Reset both rings, mark TX idle and arm single-byte reception.
    ///
    /// Returns `false` if the peripheral refused to arm.
    pub fn init(&self) -> bool {
        self.rx.clear();
        self.tx.clear();
        self.tx_busy.store(false, Ordering::Release);
        self.port.arm_rx()
    }

    /// Queue bytes for transmission and start the wire if it is idle.
    ///
    /// Each byte is pushed into the TX ring under the overwrite-on-full
    /// policy, so a caller that floods this faster than the line drains
    /// loses the oldest queued bytes. Returns the number of bytes
    /// enqueued: 0 for an empty slice, or 0 if transmission could not be
    /// started because the ring was unexpectedly empty or the peripheral
    /// refused the first byte.
    pub fn send(&self, data: &[u8]) -> usize {
        if data.is_empty() {
            return 0;
        }

        for &byte in data {
            self.tx.push(byte);
        }

        // If the wire is idle, claim it and push the first byte out.
        if !self.tx_busy.swap(true, Ordering::AcqRel) {
            let started = match self.tx.pop() {
                Some(first) => self.port.start_tx(first),
                None => false,
            };
            if !started {
                self.tx_busy.store(false, Ordering::Release);
                return 0;
            }
        }

        data.len()
    }

    /// Receive-complete interrupt entry point.
    ///
    /// Pushes the latched byte into the RX ring and immediately re-arms
    /// reception. Bounded, minimal work only.
    pub fn on_rx_interrupt(&self) {
        self.rx.push(self.port.last_rx());
        let _ = self.port.arm_rx();
    }

    /// Transmit-complete interrupt entry point.
    ///
    /// Starts the next queued byte, or marks TX idle when the ring is
    /// drained. The busy flag is also dropped if the peripheral refuses
    /// the byte, so the flag can never disagree with the hardware and
    /// stall the queue.
    pub fn on_tx_interrupt(&self) {
        match self.tx.pop() {
            Some(next) => {
                if !self.port.start_tx(next) {
                    self.tx_busy.store(false, Ordering::Release);
                }
            }
            None => self.tx_busy.store(false, Ordering::Release),
        }
    }

    /// Non-blocking pop from the RX ring. Main-loop side only.
    #[inline]
    pub fn receive_byte(&self) -> Option<u8> {
        self.rx.pop()
    }

    /// True while a byte is in flight on the TX wire.
    #[inline]
    pub fn tx_busy(&self) -> bool {
        self.tx_busy.load(Ordering::Acquire)
    }

    /// Number of bytes waiting in the TX ring.
    #[inline]
    pub fn tx_pending(&self) -> usize {
        self.tx.len()
    }

    /// The wrapped peripheral.
    #[inline]
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Quiesce in-flight I/O, re-initialize the peripheral at `baud` and
    /// re-arm reception.
    ///
    /// Returns `false` on any peripheral error. In that case the prior
    /// configuration has been attempted but not confirmed; recovery is
    /// the caller's responsibility.
    pub fn reconfigure(&self, baud: u32) -> bool {
        if baud == 0 {
            return false;
        }

        self.port.abort();
        self.tx_busy.store(false, Ordering::Release);

        if !self.port.set_baud(baud) {
            return false;
        }

        self.port.arm_rx()
    }
}

/// `core::fmt::Write` adapter over [`Transport::send`].
///
/// Expands `\n` to `\r\n` so call sites can use plain `writeln!` and the
/// terminal still sees CRLF line endings.
pub struct TransportWriter<'a, P: SerialPort> {
    transport: &'a Transport<P>,
}

impl<'a, P: SerialPort> TransportWriter<'a, P> {
    pub fn new(transport: &'a Transport<P>) -> Self {
        Self { transport }
    }
}

impl<P: SerialPort> fmt::Write for TransportWriter<'_, P> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut rest = s.as_bytes();

        while let Some(pos) = rest.iter().position(|&b| b == b'\n') {
            if pos > 0 {
                self.transport.send(&rest[..pos]);
            }
            self.transport.send(b"\r\n");
            rest = &rest[pos + 1..];
        }

        if !rest.is_empty() {
            self.transport.send(rest);
        }
        Ok(())
    }
}
