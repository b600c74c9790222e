//! The view-state facade a front end drives.
//!
//! [`MarketViewController`] owns the catalog, selection, orchestrator, cache
//! and tab state. It turns user actions into selection changes, drains the
//! selection queue into fetch rounds and exposes what the active tab shows.

mod view_controller;

pub use view_controller::{ControllerConfig, MarketViewController, TabView, ViewUpdate};
