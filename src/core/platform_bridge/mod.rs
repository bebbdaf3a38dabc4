//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the platform layer (winit + pixels) with core systems.
//
// Components:
// - `interface`: message and error types (the contract)
// - `event_collector`: core-side event collection and batching
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::{CoreEvent, PlatformEvent};
pub use interface::PlatformError;
