// External I/O operations module
pub mod keyboard; // Terminal key events while the dashboard is live
pub mod signals; // Unix signal handling
