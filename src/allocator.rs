//! Memory allocation tracking
//!
//! Installed as the global allocator by the binary to report peak heap usage,
//! and by leak tests to check that failed searches give back every byte.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::sync::atomic::{AtomicUsize, Ordering};

thread_local! {
    /// Net bytes allocated minus freed by the current thread
    static THREAD_LIVE: Cell<isize> = const { Cell::new(0) };
}

/// Adjust the calling thread's live-byte counter
///
/// `try_with` keeps this safe during thread teardown, when the slot may
/// already be gone.
#[allow(clippy::cast_possible_wrap)]
fn track_thread(delta: usize, grow: bool) {
    let _ = THREAD_LIVE.try_with(|live| {
        let delta = delta as isize;
        live.set(if grow { live.get() + delta } else { live.get() - delta });
    });
}

/// Allocator that counts live and peak heap usage
#[derive(Debug)]
pub struct TrackingAllocator {
    /// The underlying system allocator
    inner:     System,
    /// Total bytes currently allocated
    allocated: AtomicUsize,
    /// Peak memory usage
    peak:      AtomicUsize,
}

impl Default for TrackingAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackingAllocator {
    /// Create a new tracking allocator
    #[must_use]
    pub const fn new() -> Self {
        Self { inner: System, allocated: AtomicUsize::new(0), peak: AtomicUsize::new(0) }
    }

    /// Bytes currently allocated through this allocator
    pub fn allocated(&self) -> usize {
        self.allocated.load(Ordering::SeqCst)
    }

    /// Get peak allocation size
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Net bytes the calling thread has allocated and not yet freed
    ///
    /// Frees of memory allocated on another thread count against the thread
    /// doing the free, so compare two readings taken on the same thread
    /// around work that stays on it.
    #[must_use]
    pub fn thread_live() -> isize {
        THREAD_LIVE.try_with(Cell::get).unwrap_or(0)
    }
}

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        // SAFETY: We're implementing GlobalAlloc, and this is the required unsafe operation
        let ptr = unsafe { self.inner.alloc(layout) };
        if ptr.is_null() {
            return ptr;
        }

        let size = layout.size();
        let new_size = self.allocated.fetch_add(size, Ordering::SeqCst) + size;
        self.peak.fetch_max(new_size, Ordering::SeqCst);
        track_thread(size, true);

        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        let size = layout.size();
        self.allocated.fetch_sub(size, Ordering::SeqCst);
        track_thread(size, false);

        // SAFETY: We're implementing GlobalAlloc, and this is the required unsafe operation
        unsafe {
            self.inner.dealloc(ptr, layout);
        }
    }
}
