//! # Studio Navigation
//!
//! Cross-section navigation for the single-page studio site.
//!
//! ```text
//! NavigationContext
//!     │
//!     ├──> section lookup ── missing ──> logged no-op
//!     │
//!     ├──> smooth scroll to (section top - header offset)
//!     │
//!     └──> deferred follow-up (cancellable ScheduledTask)
//!          ├─> portfolio: settle → filter category → center item → highlight → clear
//!          └─> services:  settle → center item
//! ```
//!
//! The page itself sits behind [`PageSurface`]; [`HeadlessPage`] is an
//! in-memory implementation driven by the content catalog.

mod config;
mod error;
mod gallery;
mod headless;
mod navigator;
mod surface;
mod task;

pub use config::NavigationConfig;
pub use error::{NavigationError, Result};
pub use gallery::PortfolioGallery;
pub use headless::{HeadlessPage, PageEvent, PageEventKind, DEFAULT_SECTION_HEIGHT_PX};
pub use navigator::{FollowUp, NavigationOutcome, Navigator};
pub use surface::{PageSurface, ScrollAlign, ScrollBehavior};
pub use task::ScheduledTask;
