// Gallery module - the scrolling session core
//
// Everything here is synchronous and runtime-free: the loader sequences
// page requests and folds outcomes into the item list, the phase machine
// says what the session may do next, and the sentinel decides when the
// viewport position calls for another page. The async shell lives in
// tui::App and src/source.

pub mod item;
pub mod loader;
pub mod phase;
pub mod sentinel;

pub use item::Item;
pub use loader::{FetchOutcome, PageLoader, PageRequest, DEFAULT_PAGE_SIZE};
pub use phase::FetchPhase;
pub use sentinel::{ScrollSentinel, Verdict};
