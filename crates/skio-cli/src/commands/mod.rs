// Module exports for CLI command handlers.
//
// main.rs parses arguments and dispatches here, keeping the entry point
// focused on parsing and coordination.

pub mod route;
