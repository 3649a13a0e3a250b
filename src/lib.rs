pub mod district_data;
pub mod district_finder;
pub mod finder_runner;
pub mod memory_tracking;

#[cfg(test)]
#[global_allocator]
static TEST_ALLOCATOR: memory_tracking::CountingAllocator = memory_tracking::CountingAllocator;
