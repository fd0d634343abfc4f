pub mod protocol;
pub mod rest;
pub mod routes;
pub mod state;

// Re-export the router builder so the binary can assemble the server.
pub use routes::build_router;
