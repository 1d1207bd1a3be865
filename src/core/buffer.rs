//! Growable Send Buffer
//!
//! Staging area untuk bytes sebelum dikirim ke non-blocking socket.
//!
//! Layout:
//! ```text
//! 0 ........ cursor ........ len ........ capacity
//! |  sent     |    unsent     |    free     |
//! ```
//!
//! Append tidak pernah grow secara implisit: jika ruang kurang, hanya
//! bytes yang muat yang di-copy (short write). Growth selalu eksplisit.

use std::io;

use super::error::Error;
use super::transmit::{SendFlags, Transmit};

/// Owned, growable output buffer dengan write cursor.
///
/// Invariant: `cursor <= len <= capacity`.
#[derive(Debug, Default)]
pub struct SendBuffer {
    // store.len() == len; store.capacity() >= capacity, sudah di-reserve
    // tapi tidak pernah di-zero-fill
    store: Vec<u8>,
    capacity: usize,
    cursor: usize,
}

impl SendBuffer {
    /// Membuat buffer dengan kapasitas awal. `capacity == 0` valid.
    ///
    /// # Errors
    /// [`Error::Allocation`] jika storage tidak bisa dialokasikan.
    pub fn new(capacity: usize) -> Result<Self, Error> {
        let mut store = Vec::new();
        store
            .try_reserve_exact(capacity)
            .map_err(|_| Error::Allocation {
                capacity: 0,
                additional: capacity,
            })?;

        Ok(Self {
            store,
            capacity,
            cursor: 0,
        })
    }

    /// Menambah kapasitas sebesar tepat `additional` bytes.
    ///
    /// Isi `[0, len)` tidak berubah. Jika gagal, buffer tetap di state
    /// sebelumnya (capacity, len, cursor tidak berubah).
    pub fn grow(&mut self, additional: usize) -> Result<(), Error> {
        if additional == 0 {
            return Ok(());
        }

        let capacity = self.capacity();
        let overflow = Error::Allocation {
            capacity,
            additional,
        };

        let new_capacity = match capacity.checked_add(additional) {
            Some(n) => n,
            None => return Err(overflow),
        };

        // try_reserve tidak menyentuh isi atau len jika gagal
        if self
            .store
            .try_reserve_exact(new_capacity - self.store.len())
            .is_err()
        {
            return Err(overflow);
        }
        self.capacity = new_capacity;

        self.check_invariants();
        Ok(())
    }

    /// Copy sebanyak mungkin dari `data` ke free region.
    ///
    /// Returns jumlah bytes yang di-copy: `min(data.len(), remaining())`.
    /// Short write bukan error; caller yang memutuskan grow atau queue sisanya.
    #[inline]
    pub fn append(&mut self, data: &[u8]) -> usize {
        let n = data.len().min(self.remaining());
        if n == 0 {
            return 0;
        }

        // Tidak realloc: ruang sudah di-reserve sampai capacity
        self.store.extend_from_slice(&data[..n]);

        self.check_invariants();
        n
    }

    /// Satu kali non-blocking send untuk region `[cursor, len)`.
    ///
    /// Cursor maju tepat sebanyak bytes yang dilaporkan terkirim.
    /// `Ok(0)` berarti tidak ada yang dikirim tanpa error; kegagalan send
    /// selalu berupa `Err(Error::Transmit)`. Tidak ada retry atau loop.
    pub fn drain<T>(&mut self, socket: &mut T, flags: SendFlags) -> Result<usize, Error>
    where
        T: Transmit + ?Sized,
    {
        let offered = self.unsent_len();
        if offered == 0 {
            return Ok(0);
        }

        let sent = socket.transmit(&self.store[self.cursor..], flags)?;
        if sent > offered {
            return Err(Error::SendOverrun {
                reported: sent,
                offered,
            });
        }
        self.cursor += sent;

        self.check_invariants();
        Ok(sent)
    }

    /// Total allocated storage
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes of valid payload, `[0, len)`
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Index of the next byte to transmit
    #[inline(always)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Free space available for append
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.capacity - self.store.len()
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.store.len() == self.capacity
    }

    /// Valid payload (zero-copy)
    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.store
    }

    /// Bytes belum terkirim (zero-copy)
    #[inline(always)]
    pub fn unsent(&self) -> &[u8] {
        &self.store[self.cursor..]
    }

    #[inline(always)]
    pub fn unsent_len(&self) -> usize {
        self.store.len() - self.cursor
    }

    /// `cursor == len`: tidak ada lagi yang perlu dikirim.
    #[inline(always)]
    pub fn is_drained(&self) -> bool {
        self.cursor == self.store.len()
    }

    /// Reset untuk reuse. Kapasitas tetap, unsent bytes dibuang.
    #[inline(always)]
    pub fn reset(&mut self) {
        self.store.clear();
        self.cursor = 0;
    }

    /// Pindahkan unsent region ke awal buffer, membebaskan ruang
    /// tanpa grow. Unsent bytes tidak berubah.
    pub fn compact(&mut self) {
        if self.cursor == 0 {
            return;
        }

        let remaining = self.unsent_len();
        if remaining > 0 {
            self.store.copy_within(self.cursor.., 0);
        }
        self.store.truncate(remaining);
        self.cursor = 0;

        self.check_invariants();
    }

    #[inline(always)]
    fn check_invariants(&self) {
        debug_assert!(
            self.cursor <= self.store.len()
                && self.store.len() <= self.capacity
                && self.capacity <= self.store.capacity(),
            "cursor {} <= len {} <= capacity {} violated",
            self.cursor,
            self.store.len(),
            self.capacity
        );
    }
}

/// `write` mengikuti kontrak append: short write jika ruang kurang,
/// `Ok(0)` jika buffer penuh.
impl io::Write for SendBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.append(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
