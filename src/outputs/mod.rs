//! Output generation for aggregated headlines.
//!
//! # Submodules
//!
//! - [`json`]: Writes `{ "news": [...] }` snapshots to dated directories
//!
//! # Output Structure
//!
//! ```text
//! out_dir/
//! └── 2025-07-22/
//!     ├── morning.json
//!     ├── afternoon.json
//!     └── evening.json
//! ```

pub mod json;
