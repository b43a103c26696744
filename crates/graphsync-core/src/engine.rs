//! Rendering engine and container boundaries
//!
//! The engine owns layout, physics and drawing; this crate only feeds it
//! data, configuration and event bindings. Implementations live with the
//! host UI layer.

use graphsync_core_types::ViewId;

use crate::collection::DataView;
use crate::config::Configuration;
use crate::errors::Result;
use crate::events::EventTarget;

/// Stateful rendering/layout engine bound to one view
pub trait RenderingEngine: EventTarget + Sized {
    /// Mount point handle the engine renders into
    type Container;

    /// Build an engine over the live collections with a merged configuration
    ///
    /// # Errors
    ///
    /// Returns `Engine` if the engine cannot be created.
    fn construct(container: Self::Container, data: DataView<'_>, config: &Configuration)
        -> Result<Self>;

    /// Push a new merged configuration
    ///
    /// # Errors
    ///
    /// Returns `Engine` if the engine rejects the configuration.
    fn set_options(&mut self, config: &Configuration) -> Result<()>;

    /// Refresh the engine's view of the live collections
    ///
    /// # Errors
    ///
    /// Returns `Engine` if the engine cannot take the new data.
    fn set_data(&mut self, data: DataView<'_>) -> Result<()>;
}

/// Resolves a view's mount point
pub trait ContainerProvider {
    type Container;

    fn resolve(&self, view_id: &ViewId) -> Option<Self::Container>;
}
