//! Hops Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod component;
pub mod components;
pub mod dispatch;
pub mod error;
pub mod geometry;
pub mod marshal;
pub mod registry;
pub mod schema;
pub mod server;
pub mod value;

// Re-export commonly used types for convenience
pub use component::{ComponentBuilder, ComponentDescriptor};
pub use components::default_registry;
pub use dispatch::{dispatch, SolveRequest, SolveResponse};
pub use error::{DispatchError, RegistrationError};
pub use registry::Registry;
pub use schema::{ParamAccess, ParamKind, Schema};
pub use server::{run_server, RequestsLoggingLevel};
pub use value::{SlotValue, Value};
