//! Modular registration: group related registrations into reusable units.

use crate::{DiResult, ServiceCollection};

/// A unit of related service registrations.
///
/// Subsystems (renderer, asset pipeline, scripting host) implement this to
/// contribute their registrations without the application wiring each one
/// by hand.
///
/// # Examples
///
/// ```rust
/// use strata_di::{ServiceCollection, ServiceCollectionExt, ServiceModule, DiResult, Resolver};
///
/// #[derive(Default)]
/// struct RenderSettings;
///
/// struct Renderer;
/// impl Renderer {
///     fn new(_settings: std::sync::Arc<RenderSettings>) -> Self { Self }
/// }
///
/// struct RenderModule;
///
/// impl ServiceModule for RenderModule {
///     fn register_services(self, services: &mut ServiceCollection) -> DiResult<()> {
///         services.add_singleton(RenderSettings::default());
///         services.add_scoped_factory::<Renderer, _>(|r| {
///             Renderer::new(r.get_required::<RenderSettings>())
///         });
///         Ok(())
///     }
/// }
///
/// # fn main() -> DiResult<()> {
/// let mut services = ServiceCollection::new();
/// let root = services.add_module(RenderModule)?.build();
/// # Ok(())
/// # }
/// ```
pub trait ServiceModule {
    /// Registers this module's services.
    fn register_services(self, services: &mut ServiceCollection) -> DiResult<()>;
}

/// Chaining support for [`ServiceModule`] on [`ServiceCollection`].
pub trait ServiceCollectionExt {
    /// Applies a module in place, keeping the `&mut Self` chaining style of
    /// the `add_*` methods.
    fn add_module<M: ServiceModule>(&mut self, module: M) -> DiResult<&mut Self>;
}

impl ServiceCollectionExt for ServiceCollection {
    fn add_module<M: ServiceModule>(&mut self, module: M) -> DiResult<&mut Self> {
        module.register_services(self)?;
        Ok(self)
    }
}
