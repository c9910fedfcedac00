//! Build-time configuration constants.
//!
//! Everything here is fixed at compile time. There is no runtime
//! negotiation of buffer sizes: the rings, the line buffer and the
//! history are all statically sized from these values.

/// Line buffer capacity in bytes.
///
/// One slot is reserved for the line terminator handed to the command
/// interpreter, so interactive input is limited to `MAX_LINE_LEN - 1`
/// characters.
pub const MAX_LINE_LEN: usize = 128;

/// Number of command lines kept in the history ring.
pub const HISTORY_DEPTH: usize = 8;

/// RX ring buffer capacity in bytes. Must be a power of two.
pub const RX_RING_CAPACITY: usize = 256;

/// TX ring buffer capacity in bytes. Must be a power of two.
pub const TX_RING_CAPACITY: usize = 256;

/// Diagnostic log ring depth. Must be a power of two.
pub const LOG_RING_DEPTH: usize = 16;

/// Maximum diagnostic message length in bytes.
pub const LOG_MSG_LEN: usize = 64;

/// Maximum number of arguments a command line is split into.
pub const MAX_ARGS: usize = 4;

/// Default serial rate: 8 data bits, no parity, 1 stop bit.
pub const DEFAULT_BAUD: u32 = 115_200;

/// Prompt emitted after every completed or reset line.
pub const PROMPT: &str = "uart> ";

// The free-running ring indices rely on power-of-two capacities.
const _: () = assert!(RX_RING_CAPACITY.is_power_of_two());
const _: () = assert!(TX_RING_CAPACITY.is_power_of_two());
const _: () = assert!(LOG_RING_DEPTH.is_power_of_two());
