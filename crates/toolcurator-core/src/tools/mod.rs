//! Tool discovery
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  ToolRegistry                            │
//! │                                          │
//! │  - refreshes every DiscoverySource       │
//! │  - skips sources that fail               │
//! │  - applies enabled/disabled state        │
//! │  - hands candidates to the curator       │
//! └──────────────────────────────────────────┘
//!       │                        │
//!       ▼                        ▼
//!  StaticToolSource        McpToolSource (tools/list)
//! ```

mod registry;
mod source;

pub use registry::{RefreshSummary, ToolFilter, ToolInfo, ToolRegistry};
pub use source::{DiscoveryError, DiscoveryResult, DiscoverySource, StaticToolSource};
