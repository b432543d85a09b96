//! Configuration Module
//!
//! Reads the service configuration from the process environment once at startup.
//! There are no configuration files and no command line flags.
//!
//! ## Variables
//! - **`PORT`**: TCP port the HTTP server listens on (required).
//! - **`ES_URLS`**: Comma-separated list of engine endpoints. Defaults to `http://127.0.0.1:9200`.
//! - **`ES_BASIC_AUTH`**: `username:password` sent as HTTP basic auth on every engine call.
//!   Only the first `:` separates the two, so `a:b:c` means user `a` with password `b:c`
//!   (a plain split-and-index would have taken `b`). A value without `:` is rejected.
//! - **`ES_DECODE_POLICY`**: `skip` (default) or `fail`; what to do with a search hit whose
//!   `_source` can't be decoded.

pub mod loader;
pub mod types;
