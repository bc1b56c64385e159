//! Connected-peer model and registry.

mod client_registry;
mod model;
mod window_handle;

pub use client_registry::ClientRegistry;
pub use model::{ApplicationDescriptor, Client, ClientId};
pub use window_handle::WindowHandle;
