//! Error taxonomy untuk buffer dan transmit
//!
//! Short write (append) dan partial send (drain) BUKAN error,
//! keduanya dilaporkan lewat byte count.

use std::io;

use thiserror::Error;

/// Errors returned by [`SendBuffer`](super::SendBuffer) and
/// [`BufferQueue`](super::BufferQueue) operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Storage could not be obtained or resized. Buffer state is unchanged.
    #[error("allocation failed: capacity {capacity} + {additional} bytes")]
    Allocation { capacity: usize, additional: usize },

    /// The single OS send attempt failed.
    #[error("transmit failed: {0}")]
    Transmit(#[from] io::Error),

    /// Transport claimed more bytes than it was offered. Cursor is not moved.
    #[error("transport reported {reported} bytes sent but only {offered} were offered")]
    SendOverrun { reported: usize, offered: usize },
}

impl Error {
    /// OS error code of a failed transmit, if any.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Error::Transmit(err) => err.raw_os_error(),
            _ => None,
        }
    }

    /// `io::ErrorKind` of a failed transmit, if any.
    pub fn kind(&self) -> Option<io::ErrorKind> {
        match self {
            Error::Transmit(err) => Some(err.kind()),
            _ => None,
        }
    }

    /// Socket send buffer penuh, coba lagi saat writable.
    #[inline]
    pub fn is_would_block(&self) -> bool {
        self.kind() == Some(io::ErrorKind::WouldBlock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transmit_exposes_os_code() {
        let err = Error::from(io::Error::from_raw_os_error(104));
        assert_eq!(err.raw_os_error(), Some(104));
        assert!(!err.is_would_block());
    }

    #[test]
    fn test_would_block_detection() {
        let err = Error::Transmit(io::ErrorKind::WouldBlock.into());
        assert!(err.is_would_block());
        assert_eq!(err.raw_os_error(), None);
    }

    #[test]
    fn test_non_transmit_has_no_code() {
        let err = Error::Allocation {
            capacity: 8,
            additional: usize::MAX,
        };
        assert_eq!(err.kind(), None);
        assert!(err.to_string().contains("allocation failed"));
    }
}
