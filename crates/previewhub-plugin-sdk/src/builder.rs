//! Closure-based plugin assembly.
//!
//! Hook closures receive borrowed context and payload but must return an
//! owned (`'static`) future, so a handler that needs either across an
//! await point clones what it needs — `ExecutionContext` is cheap to
//! clone by design.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use previewhub_core::{PreviewResult, RenderFragment, ResourceDescriptor};
use previewhub_plugin::api::context::ExecutionContext;
use previewhub_plugin::hooks::definitions::{HookAction, HookPayload, HookPoint};
use previewhub_plugin::plugin::{PluginInfo, PreviewPlugin};

type HookFn = Arc<
    dyn Fn(&ExecutionContext, &HookPayload) -> BoxFuture<'static, PreviewResult<HookAction>>
        + Send
        + Sync,
>;
type SideEffectFn = Arc<dyn Fn() -> BoxFuture<'static, PreviewResult<()>> + Send + Sync>;
type CanHandleFn = Arc<dyn Fn(&ResourceDescriptor) -> bool + Send + Sync>;
type PriorityFn = Arc<dyn Fn(&ResourceDescriptor) -> i64 + Send + Sync>;
type RenderFn = Arc<dyn Fn(&ExecutionContext) -> Option<RenderFragment> + Send + Sync>;

/// Fluent construction of a [`PreviewPlugin`] from metadata and closures.
///
/// # Example
/// ```rust,ignore
/// let plugin = PluginBuilder::new("image-preview")
///     .version("1.0.0")
///     .supports_type("image/*")
///     .priority(10)
///     .on(HookPoint::BeforeLoad, |_ctx, _payload| async { Ok(HookAction::Pass) })
///     .render(|ctx| Some(RenderFragment::new("image-preview", json!({"src": ctx.resource().locator}))))
///     .build();
/// ```
pub struct PluginBuilder {
    info: PluginInfo,
    hooks: HashMap<HookPoint, HookFn>,
    init: Option<SideEffectFn>,
    destroy: Option<SideEffectFn>,
    can_handle: Option<CanHandleFn>,
    priority: Option<PriorityFn>,
    render: Option<RenderFn>,
    render_toolbar: Option<RenderFn>,
    render_overlay: Option<RenderFn>,
}

impl PluginBuilder {
    /// Starts a builder for a plugin with the given unique name.
    pub fn new(name: &str) -> Self {
        Self {
            info: PluginInfo::new(name),
            hooks: HashMap::new(),
            init: None,
            destroy: None,
            can_handle: None,
            priority: None,
            render: None,
            render_toolbar: None,
            render_overlay: None,
        }
    }

    /// Sets the version string.
    pub fn version(mut self, version: &str) -> Self {
        self.info.version = version.to_string();
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: &str) -> Self {
        self.info.description = description.to_string();
        self
    }

    /// Declares a supported MIME pattern (`type/*` wildcards allowed).
    pub fn supports_type(mut self, pattern: &str) -> Self {
        self.info.supported_types.push(pattern.to_string());
        self
    }

    /// Declares a supported extension suffix.
    pub fn supports_extension(mut self, suffix: &str) -> Self {
        self.info.supported_extensions.push(suffix.to_string());
        self
    }

    /// Sets a fixed resolution priority.
    pub fn priority(mut self, priority: i64) -> Self {
        self.priority = Some(Arc::new(move |_| priority));
        self
    }

    /// Sets a per-resource priority function.
    pub fn priority_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&ResourceDescriptor) -> i64 + Send + Sync + 'static,
    {
        self.priority = Some(Arc::new(f));
        self
    }

    /// Sets an authoritative capability predicate, overriding the default
    /// type/extension check in both directions.
    pub fn can_handle<F>(mut self, f: F) -> Self
    where
        F: Fn(&ResourceDescriptor) -> bool + Send + Sync + 'static,
    {
        self.can_handle = Some(Arc::new(f));
        self
    }

    /// Registers an async handler for a hook point. The built plugin
    /// subscribes to exactly the hooks registered this way.
    pub fn on<F, Fut>(mut self, hook: HookPoint, handler: F) -> Self
    where
        F: Fn(&ExecutionContext, &HookPayload) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = PreviewResult<HookAction>> + Send + 'static,
    {
        self.hooks.insert(
            hook,
            Arc::new(move |ctx, payload| Box::pin(handler(ctx, payload))),
        );
        self
    }

    /// Sets the init side effect.
    pub fn on_init<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = PreviewResult<()>> + Send + 'static,
    {
        self.init = Some(Arc::new(move || Box::pin(f())));
        self
    }

    /// Sets the destroy side effect.
    pub fn on_destroy<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = PreviewResult<()>> + Send + 'static,
    {
        self.destroy = Some(Arc::new(move || Box::pin(f())));
        self
    }

    /// Sets the content-pane render producer.
    pub fn render<F>(mut self, f: F) -> Self
    where
        F: Fn(&ExecutionContext) -> Option<RenderFragment> + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(f));
        self
    }

    /// Sets the toolbar render producer.
    pub fn render_toolbar<F>(mut self, f: F) -> Self
    where
        F: Fn(&ExecutionContext) -> Option<RenderFragment> + Send + Sync + 'static,
    {
        self.render_toolbar = Some(Arc::new(f));
        self
    }

    /// Sets the overlay render producer.
    pub fn render_overlay<F>(mut self, f: F) -> Self
    where
        F: Fn(&ExecutionContext) -> Option<RenderFragment> + Send + Sync + 'static,
    {
        self.render_overlay = Some(Arc::new(f));
        self
    }

    /// Finishes the builder into a registrable plugin instance.
    pub fn build(self) -> Arc<dyn PreviewPlugin> {
        Arc::new(BuiltPlugin {
            info: self.info,
            hooks: self.hooks,
            init: self.init,
            destroy: self.destroy,
            can_handle: self.can_handle,
            priority: self.priority,
            render: self.render,
            render_toolbar: self.render_toolbar,
            render_overlay: self.render_overlay,
        })
    }
}

struct BuiltPlugin {
    info: PluginInfo,
    hooks: HashMap<HookPoint, HookFn>,
    init: Option<SideEffectFn>,
    destroy: Option<SideEffectFn>,
    can_handle: Option<CanHandleFn>,
    priority: Option<PriorityFn>,
    render: Option<RenderFn>,
    render_toolbar: Option<RenderFn>,
    render_overlay: Option<RenderFn>,
}

impl std::fmt::Debug for BuiltPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltPlugin")
            .field("name", &self.info.name)
            .field("hooks", &self.hooks.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[async_trait]
impl PreviewPlugin for BuiltPlugin {
    fn info(&self) -> PluginInfo {
        self.info.clone()
    }

    async fn init(&self) -> PreviewResult<()> {
        match &self.init {
            Some(f) => f().await,
            None => Ok(()),
        }
    }

    async fn destroy(&self) -> PreviewResult<()> {
        match &self.destroy {
            Some(f) => f().await,
            None => Ok(()),
        }
    }

    async fn can_handle(&self, resource: &ResourceDescriptor) -> Option<bool> {
        self.can_handle.as_ref().map(|f| f(resource))
    }

    fn priority(&self, resource: &ResourceDescriptor) -> i64 {
        self.priority.as_ref().map_or(0, |f| f(resource))
    }

    fn subscribed_hooks(&self) -> Vec<HookPoint> {
        self.hooks.keys().copied().collect()
    }

    async fn handle_hook(
        &self,
        ctx: &ExecutionContext,
        payload: &HookPayload,
    ) -> PreviewResult<HookAction> {
        match self.hooks.get(&payload.hook) {
            Some(handler) => handler(ctx, payload).await,
            None => Ok(HookAction::Pass),
        }
    }

    fn render(&self, ctx: &ExecutionContext) -> Option<RenderFragment> {
        self.render.as_ref().and_then(|f| f(ctx))
    }

    fn render_toolbar(&self, ctx: &ExecutionContext) -> Option<RenderFragment> {
        self.render_toolbar.as_ref().and_then(|f| f(ctx))
    }

    fn render_overlay(&self, ctx: &ExecutionContext) -> Option<RenderFragment> {
        self.render_overlay.as_ref().and_then(|f| f(ctx))
    }
}
