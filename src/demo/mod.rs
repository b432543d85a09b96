//! Demo Script Module
//!
//! The scripted round trip served at `/`.
//!
//! ## Workflow
//! 1. **Connect**: Health-check the configured engine nodes.
//! 2. **Create**: Create the `twitter` index.
//! 3. **Index**: Write one tweet as document `1`, refreshing so it is searchable at once.
//! 4. **Search**: Term query `user == "olivere"`, sorted by user, first ten hits.
//! 5. **Report**: Render query time, every decoded tweet and the hit count.
//! 6. **Delete**: Drop the index again.
//!
//! Any failed step ends the script; later steps (including the delete) are not attempted.
//!
//! ## Submodules
//! - **`handlers`**: Axum router and handler.
//! - **`runner`**: The script itself and transcript rendering.
//! - **`types`**: `Tweet`, `DemoError` and the script's fixed parameters.

pub mod handlers;
pub mod runner;
pub mod types;
