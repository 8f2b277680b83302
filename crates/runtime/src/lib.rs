//! Application lifecycle: bootstrap, render trigger, resize reaction.
//!
//! # Invariants
//! - `Bootstrap::initialize` consumes the sequencer, so it runs once.
//! - The resize subscription is made during bootstrap; rendering only checks it.
//! - Within one notification, camera matrices are updated before the draw.
//! - Everything runs on the host's event thread; nothing here blocks.

mod bootstrap;
mod config;
mod context;
mod error;
mod host;
mod lighting;
mod resize;

pub use bootstrap::Bootstrap;
pub use config::{PlaceholderConfig, SceneConfig};
pub use context::AppContext;
pub use error::BootstrapError;
pub use host::{Host, ResizeSubscription};
pub use lighting::{LightingSetup, LightingStatus, PendingLighting};
pub use resize::ResizeReactor;
