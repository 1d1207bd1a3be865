//! Transmit seam: satu kali send attempt per call
//!
//! Socket implementations live in `network::socket`. Test doubles
//! implement [`Transmit`] directly.

use std::ffi::c_int;
use std::io;
use std::ops::BitOr;

/// Control flags passed verbatim to the underlying `send(2)`.
///
/// Flags tidak diinterpretasi di sini, hanya diteruskan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SendFlags(c_int);

impl SendFlags {
    pub const NONE: Self = Self(0);

    #[cfg(unix)]
    pub const OUT_OF_BAND: Self = Self(libc::MSG_OOB);

    #[cfg(unix)]
    pub const DONT_WAIT: Self = Self(libc::MSG_DONTWAIT);

    /// Suppress SIGPIPE on a broken connection (no-op where unsupported).
    #[cfg(any(target_os = "linux", target_os = "android"))]
    pub const NO_SIGNAL: Self = Self(libc::MSG_NOSIGNAL);
    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    pub const NO_SIGNAL: Self = Self(0);

    #[inline(always)]
    pub const fn from_bits(bits: c_int) -> Self {
        Self(bits)
    }

    #[inline(always)]
    pub const fn bits(self) -> c_int {
        self.0
    }

    #[inline(always)]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for SendFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// A destination that accepts bytes with a single, non-blocking attempt.
///
/// `transmit` must issue exactly one send and return how many bytes the
/// transport accepted, which may be fewer than `data.len()`.
pub trait Transmit {
    fn transmit(&mut self, data: &[u8], flags: SendFlags) -> io::Result<usize>;
}

impl<T: Transmit + ?Sized> Transmit for &mut T {
    #[inline]
    fn transmit(&mut self, data: &[u8], flags: SendFlags) -> io::Result<usize> {
        (**self).transmit(data, flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_pass_through() {
        let flags = SendFlags::from_bits(0x4000);
        assert_eq!(flags.bits(), 0x4000);
        assert_eq!(SendFlags::default(), SendFlags::NONE);
    }

    #[cfg(unix)]
    #[test]
    fn test_flags_combine() {
        let flags = SendFlags::DONT_WAIT | SendFlags::NO_SIGNAL;
        assert!(flags.contains(SendFlags::DONT_WAIT));
        assert!(flags.contains(SendFlags::NO_SIGNAL));
        assert!(!SendFlags::NONE.contains(SendFlags::DONT_WAIT));
    }
}
