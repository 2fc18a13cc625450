// Per-account evaluation history: an in-memory newest-first cache backed by
// the external persistence store. The cache is replaced wholesale at session
// start and cleared on sign-out, never merged.

pub mod cache;
pub mod store;

pub use cache::HistoryCache;
