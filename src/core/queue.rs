//! Pending buffer queue
//!
//! Urutan buffer yang menunggu dikirim. Tail-append, head-prepend,
//! head-pop: semantik double-ended queue biasa.

use std::collections::VecDeque;

use super::buffer::SendBuffer;
use super::error::Error;
use super::transmit::{SendFlags, Transmit};

/// Queue of [`SendBuffer`]s, drained from the head.
#[derive(Debug)]
pub struct BufferQueue {
    buffers: VecDeque<SendBuffer>,
    chunk_size: usize,
}

impl BufferQueue {
    /// `chunk_size` adalah kapasitas buffer baru yang dialokasikan oleh
    /// [`put`](Self::put). Nilai 0 diperlakukan sebagai 1.
    pub fn new(chunk_size: usize) -> Self {
        Self {
            buffers: VecDeque::new(),
            chunk_size: chunk_size.max(1),
        }
    }

    /// Enqueue at tail
    #[inline]
    pub fn push_back(&mut self, buffer: SendBuffer) {
        self.buffers.push_back(buffer);
    }

    /// Enqueue at head, dikirim sebelum semua buffer lain
    #[inline]
    pub fn push_front(&mut self, buffer: SendBuffer) {
        self.buffers.push_front(buffer);
    }

    /// Dequeue from head
    #[inline]
    pub fn pop_front(&mut self) -> Option<SendBuffer> {
        self.buffers.pop_front()
    }

    #[inline]
    pub fn front(&self) -> Option<&SendBuffer> {
        self.buffers.front()
    }

    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut SendBuffer> {
        self.buffers.front_mut()
    }

    /// Jumlah buffer dalam queue
    #[inline]
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Total unsent bytes di semua buffer
    pub fn pending(&self) -> usize {
        self.buffers.iter().map(SendBuffer::unsent_len).sum()
    }

    pub fn is_drained(&self) -> bool {
        self.buffers.iter().all(SendBuffer::is_drained)
    }

    /// Stage data dengan ukuran berapapun ke tail.
    ///
    /// Data yang tidak muat di tail buffer mengisi buffer baru berukuran
    /// `chunk_size`. Buffer yang sudah ada tidak pernah di-grow.
    ///
    /// Semua chunk dialokasikan sebelum copy: jika alokasi gagal, queue
    /// tidak berubah sama sekali.
    pub fn put(&mut self, data: &[u8]) -> Result<(), Error> {
        let room = self.buffers.back().map_or(0, SendBuffer::remaining);
        let overflow = data.len().saturating_sub(room);
        let count = overflow / self.chunk_size + usize::from(overflow % self.chunk_size != 0);

        let mut chunks = Vec::new();
        chunks
            .try_reserve_exact(count)
            .map_err(|_| Error::Allocation {
                capacity: 0,
                additional: count,
            })?;
        for _ in 0..count {
            chunks.push(SendBuffer::new(self.chunk_size)?);
        }

        let mut data = data;
        if let Some(tail) = self.buffers.back_mut() {
            let n = tail.append(data);
            data = &data[n..];
        }
        for mut chunk in chunks {
            let n = chunk.append(data);
            data = &data[n..];
            self.buffers.push_back(chunk);
        }

        debug_assert!(data.is_empty());
        Ok(())
    }

    /// Satu kali send attempt dari head buffer.
    ///
    /// Head buffer yang sudah drained dibuang lebih dulu; head yang
    /// menjadi drained setelah send di-pop.
    pub fn drain<T>(&mut self, socket: &mut T, flags: SendFlags) -> Result<usize, Error>
    where
        T: Transmit + ?Sized,
    {
        while self.buffers.front().is_some_and(SendBuffer::is_drained) {
            self.buffers.pop_front();
        }

        let head = match self.buffers.front_mut() {
            Some(head) => head,
            None => return Ok(0),
        };

        let sent = head.drain(socket, flags)?;
        if head.is_drained() {
            self.buffers.pop_front();
        }
        Ok(sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct Sink {
        per_call: usize,
        received: Vec<u8>,
    }

    impl Transmit for Sink {
        fn transmit(&mut self, data: &[u8], _flags: SendFlags) -> io::Result<usize> {
            let n = data.len().min(self.per_call);
            self.received.extend_from_slice(&data[..n]);
            Ok(n)
        }
    }

    fn filled(data: &[u8]) -> SendBuffer {
        let mut buf = SendBuffer::new(data.len()).unwrap();
        buf.append(data);
        buf
    }

    #[test]
    fn test_fifo_lifo_order() {
        let mut q = BufferQueue::new(16);
        q.push_back(filled(b"second"));
        q.push_back(filled(b"third"));
        q.push_front(filled(b"first"));

        assert_eq!(q.len(), 3);
        assert_eq!(q.pop_front().unwrap().as_bytes(), b"first");
        assert_eq!(q.pop_front().unwrap().as_bytes(), b"second");
        assert_eq!(q.pop_front().unwrap().as_bytes(), b"third");
        assert!(q.pop_front().is_none());
    }

    #[test]
    fn test_put_spans_chunks() {
        let mut q = BufferQueue::new(4);
        q.put(b"abcdefghij").unwrap();

        assert_eq!(q.len(), 3);
        assert_eq!(q.pending(), 10);
        assert_eq!(q.front().unwrap().as_bytes(), b"abcd");

        // Tail belum penuh, diisi dulu sebelum alokasi chunk baru
        q.put(b"kl").unwrap();
        assert_eq!(q.len(), 3);
        q.put(b"m").unwrap();
        assert_eq!(q.len(), 4);
    }

    #[test]
    fn test_put_zero_chunk_size() {
        let mut q = BufferQueue::new(0);
        q.put(b"ab").unwrap();
        assert_eq!(q.chunk_size(), 1);
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn test_put_allocation_failure_leaves_queue() {
        let mut q = BufferQueue::new(isize::MAX as usize + 1);
        q.push_back(SendBuffer::new(2).unwrap());

        let err = q.put(b"abcd").unwrap_err();
        assert!(matches!(err, Error::Allocation { .. }));

        // Tidak ada prefix yang ter-stage
        assert_eq!(q.len(), 1);
        assert_eq!(q.pending(), 0);
        assert!(q.front().unwrap().is_empty());

        // Data yang muat di tail tidak butuh alokasi
        q.put(b"ab").unwrap();
        assert_eq!(q.pending(), 2);
    }

    #[test]
    fn test_drain_walks_queue() {
        let mut q = BufferQueue::new(4);
        q.put(b"abcdefghij").unwrap();

        let mut sink = Sink {
            per_call: 3,
            received: Vec::new(),
        };
        let mut calls = 0;
        while !q.is_drained() {
            q.drain(&mut sink, SendFlags::NONE).unwrap();
            calls += 1;
        }

        // Tiap drain hanya menyentuh head buffer: 3+1, 3+1, 2
        assert_eq!(calls, 5);
        assert_eq!(sink.received, b"abcdefghij");
        assert!(q.is_empty());
    }

    #[test]
    fn test_drain_skips_drained_heads() {
        let mut q = BufferQueue::new(8);
        q.push_back(SendBuffer::new(8).unwrap());
        q.push_back(filled(b"xy"));

        let mut sink = Sink {
            per_call: 8,
            received: Vec::new(),
        };
        assert_eq!(q.drain(&mut sink, SendFlags::NONE).unwrap(), 2);
        assert!(q.is_empty());
        assert_eq!(q.drain(&mut sink, SendFlags::NONE).unwrap(), 0);
    }
}
