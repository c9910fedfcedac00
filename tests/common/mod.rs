//! Shared test fixtures: a scriptable serial peripheral.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use uart_shell::{SerialPort, Transport};

/// Serial peripheral double that records everything the transport does.
pub struct MockSerialPort {
    /// Bytes handed to `start_tx`, in order.
    pub tx_log: RefCell<Vec<u8>>,
    /// Byte reported by `last_rx`.
    pub rx_byte: Cell<u8>,
    /// Number of `arm_rx` calls.
    pub armed: Cell<u32>,
    /// Number of `abort` calls.
    pub aborted: Cell<u32>,
    /// Last rate applied by `set_baud`.
    pub baud: Cell<u32>,
    /// When set, `start_tx` reports failure.
    pub fail_tx: Cell<bool>,
    /// When set, `arm_rx` reports failure.
    pub fail_arm: Cell<bool>,
    /// When set, `set_baud` reports failure.
    pub fail_baud: Cell<bool>,
}

impl MockSerialPort {
    pub fn new() -> Self {
        Self {
            tx_log: RefCell::new(Vec::new()),
            rx_byte: Cell::new(0),
            armed: Cell::new(0),
            aborted: Cell::new(0),
            baud: Cell::new(0),
            fail_tx: Cell::new(false),
            fail_arm: Cell::new(false),
            fail_baud: Cell::new(false),
        }
    }

    /// Everything transmitted so far, as text.
    pub fn tx_string(&self) -> String {
        String::from_utf8(self.tx_log.borrow().clone()).unwrap()
    }
}

impl SerialPort for MockSerialPort {
    fn start_tx(&self, byte: u8) -> bool {
        if self.fail_tx.get() {
            return false;
        }
        self.tx_log.borrow_mut().push(byte);
        true
    }

    fn arm_rx(&self) -> bool {
        if self.fail_arm.get() {
            return false;
        }
        self.armed.set(self.armed.get() + 1);
        true
    }

    fn last_rx(&self) -> u8 {
        self.rx_byte.get()
    }

    fn abort(&self) {
        self.aborted.set(self.aborted.get() + 1);
    }

    fn set_baud(&self, baud: u32) -> bool {
        if self.fail_baud.get() {
            return false;
        }
        self.baud.set(baud);
        true
    }
}

/// Deliver `bytes` one at a time, the way the receive interrupt would.
pub fn feed_rx(transport: &Transport<MockSerialPort>, bytes: &[u8]) {
    for &b in bytes {
        transport.port().rx_byte.set(b);
        transport.on_rx_interrupt();
    }
}

/// Run the transmit-complete interrupt until the wire goes idle.
pub fn drain_tx(transport: &Transport<MockSerialPort>) {
    while transport.tx_busy() {
        transport.on_tx_interrupt();
    }
}
