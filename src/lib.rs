//! Sendbuf - Growable staging buffer untuk non-blocking socket sends
//!
//! Arsitektur:
//! - Short write: Append hanya copy yang muat, growth selalu eksplisit
//! - Partial send: Drain satu kali `send(2)`, cursor maju sesuai hasil OS
//! - Tagged result: Sukses dengan count vs gagal dengan OS error code
//!
//! ```no_run
//! use sendbuf::core::{SendBuffer, SendFlags};
//! use std::os::unix::net::UnixStream;
//!
//! let (mut tx, _rx) = UnixStream::pair()?;
//! tx.set_nonblocking(true)?;
//!
//! let mut buf = SendBuffer::new(16)?;
//! if buf.append(b"hello, world") < 12 {
//!     // grow atau queue sisanya
//! }
//! match buf.drain(&mut tx, SendFlags::NONE) {
//!     Ok(_) if buf.is_drained() => {}
//!     Ok(_) => {} // partial send, tunggu writable
//!     Err(e) if e.is_would_block() => {}
//!     Err(e) => return Err(e.into()),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod core;
#[cfg(unix)]
pub mod network;

pub use crate::core::{BufferQueue, Error, SendBuffer, SendFlags, Transmit};
