//! Thin façade over intra-process (thread) or inter-process (MPI) message
//! passing.
//!
//! Messages are *contiguous byte slices* (no zero-copy guarantees). All
//! handles are **waitable** but non-blocking — transfer.rs calls `.wait()`
//! before it trusts that a buffer is ready. The façade stays minimal: block
//! framing, pair exchange, and the distribute collective are built above it.

use bytes::Bytes;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, Barrier};
use std::thread::JoinHandle;

/// Typed message tag. The low bits address a protocol lane, the top bit
/// separates a transfer's count header from its payload frame so the two can
/// be in flight at once.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CommTag(u16);

impl CommTag {
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }
    pub const fn as_u16(self) -> u16 {
        self.0
    }
    /// Lane for the count header of a two-stage transfer.
    pub const fn header(self) -> u16 {
        self.0
    }
    /// Lane for the payload frame of a two-stage transfer.
    pub const fn payload(self) -> u16 {
        self.0 | 0x8000
    }
    /// Derive a per-round lane from a base tag.
    pub const fn offset(self, delta: u16) -> Self {
        Self(self.0 + delta)
    }
}

/// Tag lanes used by the sort protocol. Exchange rounds add the round number
/// to their base, so every in-flight message has a distinct (peer, lane) key.
pub mod tags {
    use super::CommTag;

    pub const SCATTER: CommTag = CommTag::new(0x0010);
    pub const EXCHANGE: CommTag = CommTag::new(0x0100);
    pub const COLLECT: CommTag = CommTag::new(0x0020);
}

/// Non-blocking communication interface (minimal by design).
pub trait Communicator: Send + Sync + 'static {
    /// Handle returned by `isend`.
    type SendHandle: Wait;
    /// Handle returned by `irecv`.
    type RecvHandle: Wait;

    /// This process's rank in `[0, size)`.
    fn rank(&self) -> usize;
    /// Number of cooperating ranks.
    fn size(&self) -> usize;
    /// True for the compile-time no-op backend used in serial unit tests.
    fn is_no_comm(&self) -> bool {
        false
    }

    fn isend(&self, peer: usize, tag: u16, buf: &[u8]) -> Self::SendHandle;
    fn irecv(&self, peer: usize, tag: u16, buf: &mut [u8]) -> Self::RecvHandle;

    /// Block until every rank of the world has entered.
    fn barrier(&self);
}

/// Anything that can be waited on.
pub trait Wait {
    /// Wait for completion and return the received data (if any).
    fn wait(self) -> Option<Vec<u8>>;
}

impl Wait for () {
    fn wait(self) -> Option<Vec<u8>> {
        None
    }
}

/// Compile-time no-op comm for pure serial unit tests.
#[derive(Clone, Debug, Default)]
pub struct NoComm;

impl Communicator for NoComm {
    type SendHandle = ();
    type RecvHandle = ();

    fn rank(&self) -> usize {
        0
    }
    fn size(&self) -> usize {
        1
    }
    fn is_no_comm(&self) -> bool {
        true
    }
    fn isend(&self, _peer: usize, _tag: u16, _buf: &[u8]) {}
    fn irecv(&self, _peer: usize, _tag: u16, _buf: &mut [u8]) {}
    fn barrier(&self) {}
}

// --- ThreadComm: intra-process / multi-thread ---

type Key = (usize, usize, u16); // (src, dst, tag)

static MAILBOX: Lazy<DashMap<Key, Bytes>> = Lazy::new(DashMap::new);

// One reusable barrier per world size. Worlds of equal size must not run
// concurrently in one process; tests serialize for the same reason the
// mailbox requires it.
static BARRIERS: Lazy<Mutex<HashMap<usize, Arc<Barrier>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

pub struct LocalHandle {
    buf: Arc<Mutex<Option<Vec<u8>>>>,
    handle: Option<JoinHandle<()>>,
}

impl Wait for LocalHandle {
    fn wait(mut self) -> Option<Vec<u8>> {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        let mut guard = self.buf.lock();
        guard.take()
    }
}

/// One simulated rank backed by OS threads within a single process.
///
/// Point-to-point transfers go through a process-global mailbox keyed by
/// `(src, dst, tag)`; receives spin on their key. Exactly one world may be
/// live at a time per (size, tag) namespace.
#[derive(Clone, Debug)]
pub struct ThreadComm {
    rank: usize,
    size: usize,
}

impl ThreadComm {
    pub fn new(rank: usize, size: usize) -> Self {
        Self { rank, size }
    }
}

impl Communicator for ThreadComm {
    type SendHandle = ();
    type RecvHandle = LocalHandle;

    fn rank(&self) -> usize {
        self.rank
    }
    fn size(&self) -> usize {
        self.size
    }

    fn isend(&self, peer: usize, tag: u16, buf: &[u8]) -> Self::SendHandle {
        let key = (self.rank, peer, tag);
        MAILBOX.insert(key, Bytes::from(buf.to_vec()));
    }

    fn irecv(&self, peer: usize, tag: u16, _buf: &mut [u8]) -> Self::RecvHandle {
        let key = (peer, self.rank, tag);
        let slot = Arc::new(Mutex::new(None));
        let slot_clone = slot.clone();
        let handle = std::thread::spawn(move || {
            loop {
                if let Some((_, bytes)) = MAILBOX.remove(&key) {
                    *slot_clone.lock() = Some(bytes.to_vec());
                    break;
                }
                std::thread::yield_now();
            }
        });
        LocalHandle {
            buf: slot,
            handle: Some(handle),
        }
    }

    fn barrier(&self) {
        if self.size <= 1 {
            return;
        }
        let barrier = {
            let mut registry = BARRIERS.lock();
            registry
                .entry(self.size)
                .or_insert_with(|| Arc::new(Barrier::new(self.size)))
                .clone()
        };
        barrier.wait();
    }
}

// --- MPI backend (feature = "mpi-support") ---

#[cfg(feature = "mpi-support")]
mod mpi_backend {
    use super::{Communicator, Wait};
    use mpi::environment::Universe;
    use mpi::request::StaticScope;
    use mpi::topology::SimpleCommunicator;
    use mpi::traits::{Communicator as _, Destination, Equivalence, Source};

    /// One MPI rank. Construct exactly once per process.
    pub struct MpiComm {
        _universe: Universe,
        world: SimpleCommunicator,
        rank: usize,
        size: usize,
    }

    // One MpiComm per process; it is never shared across threads and the
    // underlying library serializes access to the world handle.
    unsafe impl Send for MpiComm {}
    unsafe impl Sync for MpiComm {}

    impl MpiComm {
        pub fn new() -> Option<Self> {
            let universe = mpi::initialize()?;
            let world = universe.world();
            let rank = world.rank() as usize;
            let size = world.size() as usize;
            Some(Self {
                _universe: universe,
                world,
                rank,
                size,
            })
        }
    }

    pub struct MpiSendHandle {
        req: mpi::request::Request<'static>,
        buf: *mut [u8],
    }

    impl Wait for MpiSendHandle {
        fn wait(self) -> Option<Vec<u8>> {
            self.req.wait();
            // SAFETY: the send completed, so the leaked buffer is uniquely
            // owned here and can be reclaimed.
            drop(unsafe { Box::from_raw(self.buf) });
            None
        }
    }

    pub struct MpiRecvHandle {
        req: mpi::request::Request<'static>,
        buf: *mut [u8],
    }

    impl Wait for MpiRecvHandle {
        fn wait(self) -> Option<Vec<u8>> {
            let status = self.req.wait();
            // SAFETY: the receive completed; same ownership argument as the
            // send handle.
            let boxed = unsafe { Box::from_raw(self.buf) };
            let n = status.count(u8::equivalent_datatype()) as usize;
            Some(boxed[..n.min(boxed.len())].to_vec())
        }
    }

    impl Communicator for MpiComm {
        type SendHandle = MpiSendHandle;
        type RecvHandle = MpiRecvHandle;

        fn rank(&self) -> usize {
            self.rank
        }
        fn size(&self) -> usize {
            self.size
        }

        fn isend(&self, peer: usize, tag: u16, buf: &[u8]) -> MpiSendHandle {
            let ptr = Box::into_raw(buf.to_vec().into_boxed_slice());
            // SAFETY: ptr stays valid until the handle reclaims it in wait().
            let staged: &'static [u8] = unsafe { &*ptr };
            let req = self
                .world
                .process_at_rank(peer as i32)
                .immediate_send_with_tag(StaticScope, staged, tag as i32);
            MpiSendHandle { req, buf: ptr }
        }

        fn irecv(&self, peer: usize, tag: u16, buf: &mut [u8]) -> MpiRecvHandle {
            let ptr = Box::into_raw(vec![0u8; buf.len()].into_boxed_slice());
            // SAFETY: ptr stays valid until the handle reclaims it in wait().
            let staged: &'static mut [u8] = unsafe { &mut *ptr };
            let req = self
                .world
                .process_at_rank(peer as i32)
                .immediate_receive_into_with_tag(StaticScope, staged, tag as i32);
            MpiRecvHandle { req, buf: ptr }
        }

        fn barrier(&self) {
            mpi::traits::Communicator::barrier(&self.world);
        }
    }
}

#[cfg(feature = "mpi-support")]
pub use mpi_backend::MpiComm;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_lanes_are_disjoint() {
        let tag = CommTag::new(0x0100).offset(3);
        assert_eq!(tag.header(), 0x0103);
        assert_eq!(tag.payload(), 0x8103);
        assert_ne!(tag.header(), tag.payload());
    }
}
