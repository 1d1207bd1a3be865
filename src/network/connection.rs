//! Connection handling dengan buffered non-blocking writes
//!
//! Outbound bytes di-stage di [`BufferQueue`], lalu di-flush saat socket
//! writable. Write interest hanya aktif selama masih ada pending bytes.

use std::io;

use mio::net::TcpStream;
use mio::{Interest, Registry, Token};
use tracing::{debug, trace, warn};

use crate::core::{BufferQueue, Error, SendBuffer, SendFlags, Transmit};

/// Chunk size default - tuned untuk typical socket send buffer
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024; // 64KB

/// Connection configuration
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Kapasitas tiap buffer baru di outbound queue
    pub chunk_size: usize,
    /// Flags untuk setiap `send(2)`
    pub send_flags: SendFlags,
    /// Disable Nagle's algorithm
    pub nodelay: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            send_flags: SendFlags::NO_SIGNAL,
            nodelay: true,
        }
    }
}

/// Non-blocking connection wrapper dengan outbound queue
pub struct Connection {
    stream: TcpStream,
    outbound: BufferQueue,
    send_flags: SendFlags,
    write_interest: bool,
}

impl Connection {
    /// Wrap connected non-blocking stream
    pub fn new(stream: TcpStream, config: ConnectionConfig) -> io::Result<Self> {
        if config.nodelay {
            stream.set_nodelay(true)?;
        }

        Ok(Self {
            stream,
            outbound: BufferQueue::new(config.chunk_size),
            send_flags: config.send_flags,
            write_interest: false,
        })
    }

    /// Queue data untuk write (copy ke outbound chunks)
    #[inline]
    pub fn queue_write(&mut self, data: &[u8]) -> Result<(), Error> {
        self.outbound.put(data)
    }

    /// Queue buffer yang sudah diisi caller, tanpa copy
    #[inline]
    pub fn queue_buffer(&mut self, buffer: SendBuffer) {
        self.outbound.push_back(buffer);
    }

    /// Queue buffer di depan semua pending data
    #[inline]
    pub fn queue_urgent(&mut self, buffer: SendBuffer) {
        self.outbound.push_front(buffer);
    }

    /// Flush outbound queue ke socket sampai habis atau would-block.
    ///
    /// Returns total bytes terkirim. Would-block bukan error di sini;
    /// sisa data menunggu writable event berikutnya.
    pub fn flush(&mut self) -> Result<usize, Error> {
        flush_queue(&mut self.outbound, &mut self.stream, self.send_flags)
    }

    /// Interest yang sesuai dengan state outbound queue
    #[inline]
    pub fn interest(&self) -> Interest {
        if self.outbound.is_drained() {
            Interest::READABLE
        } else {
            Interest::READABLE | Interest::WRITABLE
        }
    }

    /// Register stream ke poll registry
    pub fn register(&mut self, registry: &Registry, token: Token) -> io::Result<()> {
        let interest = self.interest();
        registry.register(&mut self.stream, token, interest)?;
        self.write_interest = interest.is_writable();
        Ok(())
    }

    /// Reregister hanya jika write interest berubah.
    ///
    /// Returns `true` jika reregister dilakukan.
    pub fn update_interest(&mut self, registry: &Registry, token: Token) -> io::Result<bool> {
        let interest = self.interest();
        if interest.is_writable() == self.write_interest {
            return Ok(false);
        }

        registry.reregister(&mut self.stream, token, interest)?;
        self.write_interest = interest.is_writable();
        debug!(?token, writable = self.write_interest, "write interest changed");
        Ok(true)
    }

    pub fn deregister(&mut self, registry: &Registry) -> io::Result<()> {
        registry.deregister(&mut self.stream)
    }

    /// Get underlying stream untuk polling
    pub fn stream(&self) -> &TcpStream {
        &self.stream
    }

    pub fn stream_mut(&mut self) -> &mut TcpStream {
        &mut self.stream
    }

    /// Bytes pending in outbound queue
    #[inline(always)]
    pub fn write_pending(&self) -> usize {
        self.outbound.pending()
    }
}

/// Drain queue berulang sampai habis atau would-block.
///
/// Interrupted berarti tidak ada byte terkirim, jadi langsung dicoba lagi.
fn flush_queue<T>(
    outbound: &mut BufferQueue,
    socket: &mut T,
    flags: SendFlags,
) -> Result<usize, Error>
where
    T: Transmit + ?Sized,
{
    let mut written = 0;

    while !outbound.is_drained() {
        match outbound.drain(socket, flags) {
            Ok(0) => {
                return Err(Error::Transmit(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "Failed to write to socket",
                )));
            }
            Ok(n) => written += n,
            Err(ref e) if e.kind() == Some(io::ErrorKind::Interrupted) => continue,
            Err(ref e) if e.is_would_block() => {
                debug!(written, pending = outbound.pending(), "socket would block");
                break;
            }
            Err(e) => {
                warn!(error = %e, pending = outbound.pending(), "transmit failed");
                return Err(e);
            }
        }
    }

    trace!(written, pending = outbound.pending(), "flush");
    Ok(written)
}
