//! Socket transmit via `send(2)`
//!
//! Satu syscall per transmit, flags diteruskan apa adanya.
//! Socket harus sudah connected dan dalam non-blocking mode; modul ini
//! tidak pernah membuka, mengkonfigurasi, atau menutup socket.

use std::io;
use std::net::TcpStream;
use std::os::unix::io::{AsRawFd, RawFd};
use std::os::unix::net::UnixStream;

use crate::core::{SendFlags, Transmit};

/// Opaque socket descriptor milik caller.
///
/// Tidak menutup fd saat di-drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSocket(RawFd);

impl RawSocket {
    #[inline(always)]
    pub const fn new(fd: RawFd) -> Self {
        Self(fd)
    }

    #[inline(always)]
    pub fn from_socket<S: AsRawFd>(socket: &S) -> Self {
        Self(socket.as_raw_fd())
    }
}

impl AsRawFd for RawSocket {
    fn as_raw_fd(&self) -> RawFd {
        self.0
    }
}

#[inline]
fn send_fd(fd: RawFd, data: &[u8], flags: SendFlags) -> io::Result<usize> {
    // SAFETY: pointer dan len berasal dari slice yang valid selama call;
    // validitas fd adalah kontrak caller (send ke fd invalid -> EBADF).
    let ret = unsafe { libc::send(fd, data.as_ptr().cast(), data.len(), flags.bits()) };
    if ret < 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(ret as usize)
    }
}

impl Transmit for RawSocket {
    #[inline]
    fn transmit(&mut self, data: &[u8], flags: SendFlags) -> io::Result<usize> {
        send_fd(self.0, data, flags)
    }
}

impl Transmit for TcpStream {
    #[inline]
    fn transmit(&mut self, data: &[u8], flags: SendFlags) -> io::Result<usize> {
        send_fd(self.as_raw_fd(), data, flags)
    }
}

impl Transmit for UnixStream {
    #[inline]
    fn transmit(&mut self, data: &[u8], flags: SendFlags) -> io::Result<usize> {
        send_fd(self.as_raw_fd(), data, flags)
    }
}

impl Transmit for mio::net::TcpStream {
    #[inline]
    fn transmit(&mut self, data: &[u8], flags: SendFlags) -> io::Result<usize> {
        send_fd(self.as_raw_fd(), data, flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_unix_pair_transmit() {
        let (mut tx, mut rx) = UnixStream::pair().unwrap();
        tx.set_nonblocking(true).unwrap();

        let n = tx.transmit(b"hello", SendFlags::NONE).unwrap();
        assert_eq!(n, 5);

        let mut out = [0u8; 5];
        rx.read_exact(&mut out).unwrap();
        assert_eq!(&out, b"hello");
    }

    #[test]
    fn test_raw_socket_does_not_own_fd() {
        let (tx, mut rx) = UnixStream::pair().unwrap();
        tx.set_nonblocking(true).unwrap();

        {
            let mut raw = RawSocket::from_socket(&tx);
            assert_eq!(raw.transmit(b"ab", SendFlags::NONE).unwrap(), 2);
        }

        // fd masih hidup setelah RawSocket di-drop
        let mut raw = RawSocket::new(tx.as_raw_fd());
        assert_eq!(raw.transmit(b"c", SendFlags::NONE).unwrap(), 1);

        let mut out = [0u8; 3];
        rx.read_exact(&mut out).unwrap();
        assert_eq!(&out, b"abc");
    }

    #[test]
    fn test_invalid_fd_reports_os_error() {
        let mut raw = RawSocket::new(-1);
        let err = raw.transmit(b"x", SendFlags::NONE).unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::EBADF));
    }
}
