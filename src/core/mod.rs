//! Core module: Growable send buffer dan pending queue
//!
//! Prinsip desain:
//! - Explicit growth: Append tidak pernah alokasi, grow selalu keputusan caller
//! - Partial I/O: Short write dan partial send adalah hasil normal, bukan error
//! - Single owner: Tidak ada lock, tidak ada atomic

mod buffer;
mod error;
mod queue;
mod transmit;

pub use buffer::SendBuffer;
pub use error::Error;
pub use queue::BufferQueue;
pub use transmit::{SendFlags, Transmit};
