use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicUsize, Ordering};

static ALLOCATED: AtomicUsize = AtomicUsize::new(0);
static PEAK: AtomicUsize = AtomicUsize::new(0);

/**
 * System allocator that keeps process-wide counters of live and peak heap bytes.
 * Counters stay at zero unless it is installed with `#[global_allocator]`.
 */
pub struct CountingAllocator;

#[inline]
fn record_alloc(size: usize) {
    let now = ALLOCATED.fetch_add(size, Ordering::Relaxed) + size;
    PEAK.fetch_max(now, Ordering::Relaxed);
}

#[inline]
fn record_dealloc(size: usize) {
    ALLOCATED.fetch_sub(size, Ordering::Relaxed);
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc_zeroed(layout);
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        record_dealloc(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = System.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            record_dealloc(layout.size());
            record_alloc(new_size);
        }
        new_ptr
    }
}

/// Heap bytes currently allocated.
pub fn allocated_bytes() -> usize {
    ALLOCATED.load(Ordering::Relaxed)
}

/// Highest value `allocated_bytes` reached since the process started.
pub fn peak_bytes() -> usize {
    PEAK.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    // The lib test binary installs the allocator (see lib.rs).
    #[test]
    fn it_should_count_live_allocations() {
        let buffer: Vec<u8> = std::hint::black_box(vec![1; 1 << 20]);

        assert!(allocated_bytes() >= buffer.len());
        assert!(peak_bytes() >= buffer.len());
    }

    #[test]
    fn it_should_keep_the_peak_after_a_free() {
        let buffer: Vec<u64> = std::hint::black_box(Vec::with_capacity(1 << 18));
        let size = buffer.capacity() * std::mem::size_of::<u64>();
        drop(buffer);

        assert!(peak_bytes() >= size);
    }
}
