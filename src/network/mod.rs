//! Network Layer: Socket transmit dan connection handling
//!
//! Menggunakan `send(2)` via libc agar flags bisa diteruskan apa adanya,
//! dan mio untuk readiness registration.
//!
//! Fitur:
//! - Satu syscall per drain, tidak ada retry internal
//! - Write interest hanya aktif saat ada pending bytes

mod connection;
mod socket;

pub use connection::{Connection, ConnectionConfig, DEFAULT_CHUNK_SIZE};
pub use socket::RawSocket;
