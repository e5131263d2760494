//! Output generation.
//!
//! # Submodules
//!
//! - [`json`]: Writes one month of [`DailyRecord`](crate::models::DailyRecord)s per city
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── ambarawa/
//! │   └── 2024/
//! │       ├── 03.json
//! │       └── 04.json
//! └── jakartapusat/
//!     └── 2024/
//!         └── 03.json
//! ```

pub mod json;
