//! Listener-side types shared between the configuration generator and plugins.

mod filter_chain;
mod plugin;

pub use filter_chain::{FilterChain, ListenerProtocol, MutableObjects};
pub use plugin::{InboundListenerMutator, InputParams, Plugin};
