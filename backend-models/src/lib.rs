//! Wire types for the illustration catalog REST backend.
//!
//! Every struct here mirrors a JSON document produced or accepted by the
//! backend. Server-computed aggregates (`*_count`) are optional because the
//! backend only annotates them on list endpoints.

pub mod models;
