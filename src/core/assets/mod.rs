//=========================================================================
// Assets
//=========================================================================
//
// Background image loading behind a shared registry.
//
// Architecture:
//   request_load(id, path) → pending queue
//   start_loading(cb)      → worker thread per request → registry
//                                      └─ last one done → cb (lock released)
//   tick thread            → progress() / get(id)  (never blocks on I/O)
//
//=========================================================================

//=== Module Declarations =================================================

mod asset_manager;

//=== Public API ==========================================================

pub use asset_manager::{AssetManager, LoadComplete};
