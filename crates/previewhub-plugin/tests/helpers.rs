//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use previewhub_core::{PreviewError, PreviewResult, RenderFragment, ResourceDescriptor};
use previewhub_plugin::api::context::ExecutionContext;
use previewhub_plugin::hooks::definitions::{HookAction, HookPayload, HookPoint};
use previewhub_plugin::plugin::{PluginInfo, PreviewPlugin};

/// Shared invocation log, entries formatted as `"plugin:hook"`.
pub type HookLog = Arc<Mutex<Vec<String>>>;

pub fn new_log() -> HookLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn log_entries(log: &HookLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

pub fn png_resource() -> ResourceDescriptor {
    ResourceDescriptor::new("cat.png", 2048, "image/png", ".png", "mem://cat.png")
}

pub fn unknown_resource() -> ResourceDescriptor {
    ResourceDescriptor::new("blob.xyz", 16, "application/x-unknown", ".xyz", "mem://blob")
}

/// A test plugin whose hook behavior is scripted per hook point.
#[derive(Debug)]
pub struct ScriptedPlugin {
    pub info: PluginInfo,
    pub fixed_priority: i64,
    pub subscriptions: Vec<HookPoint>,
    /// Return `Veto` when this hook fires.
    pub veto_on: Option<HookPoint>,
    /// Return `Respond` with this value when the hook fires.
    pub respond_on: Option<(HookPoint, serde_json::Value)>,
    /// Return `Err` when this hook fires.
    pub fail_on: Option<HookPoint>,
    /// Capability override; `None` uses the declared types/extensions.
    pub can_handle_override: Option<bool>,
    /// Whether render producers emit fragments.
    pub renders: bool,
    pub log: Option<HookLog>,
}

impl ScriptedPlugin {
    pub fn new(name: &str) -> Self {
        Self {
            info: PluginInfo::new(name),
            fixed_priority: 0,
            subscriptions: Vec::new(),
            veto_on: None,
            respond_on: None,
            fail_on: None,
            can_handle_override: None,
            renders: false,
            log: None,
        }
    }

    pub fn with_types(mut self, types: &[&str]) -> Self {
        self.info.supported_types = types.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_extensions(mut self, extensions: &[&str]) -> Self {
        self.info.supported_extensions = extensions.iter().map(|e| e.to_string()).collect();
        self
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.fixed_priority = priority;
        self
    }

    pub fn subscribed(mut self, hooks: &[HookPoint]) -> Self {
        self.subscriptions = hooks.to_vec();
        self
    }

    pub fn veto_on(mut self, hook: HookPoint) -> Self {
        self.veto_on = Some(hook);
        self
    }

    pub fn respond_on(mut self, hook: HookPoint, value: serde_json::Value) -> Self {
        self.respond_on = Some((hook, value));
        self
    }

    pub fn fail_on(mut self, hook: HookPoint) -> Self {
        self.fail_on = Some(hook);
        self
    }

    pub fn can_handle_override(mut self, verdict: bool) -> Self {
        self.can_handle_override = Some(verdict);
        self
    }

    pub fn rendering(mut self) -> Self {
        self.renders = true;
        self
    }

    pub fn logging(mut self, log: &HookLog) -> Self {
        self.log = Some(log.clone());
        self
    }

    pub fn into_arc(self) -> Arc<dyn PreviewPlugin> {
        Arc::new(self)
    }

    fn record(&self, hook: HookPoint) {
        if let Some(log) = &self.log {
            log.lock()
                .unwrap()
                .push(format!("{}:{}", self.info.name, hook));
        }
    }
}

#[async_trait]
impl PreviewPlugin for ScriptedPlugin {
    fn info(&self) -> PluginInfo {
        self.info.clone()
    }

    async fn can_handle(&self, _resource: &ResourceDescriptor) -> Option<bool> {
        self.can_handle_override
    }

    fn priority(&self, _resource: &ResourceDescriptor) -> i64 {
        self.fixed_priority
    }

    fn subscribed_hooks(&self) -> Vec<HookPoint> {
        self.subscriptions.clone()
    }

    async fn handle_hook(
        &self,
        _ctx: &ExecutionContext,
        payload: &HookPayload,
    ) -> PreviewResult<HookAction> {
        self.record(payload.hook);
        if self.fail_on == Some(payload.hook) {
            return Err(PreviewError::plugin(format!(
                "{} scripted failure",
                self.info.name
            )));
        }
        if self.veto_on == Some(payload.hook) {
            return Ok(HookAction::Veto);
        }
        if let Some((hook, value)) = &self.respond_on {
            if *hook == payload.hook {
                return Ok(HookAction::Respond(value.clone()));
            }
        }
        Ok(HookAction::Pass)
    }

    fn render(&self, ctx: &ExecutionContext) -> Option<RenderFragment> {
        self.renders.then(|| {
            RenderFragment::new(
                &self.info.name,
                serde_json::json!({ "content": ctx.resource().locator }),
            )
        })
    }

    fn render_toolbar(&self, _ctx: &ExecutionContext) -> Option<RenderFragment> {
        self.renders
            .then(|| RenderFragment::new(&self.info.name, serde_json::json!({ "toolbar": true })))
    }

    fn render_overlay(&self, _ctx: &ExecutionContext) -> Option<RenderFragment> {
        self.renders
            .then(|| RenderFragment::new(&self.info.name, serde_json::json!({ "overlay": true })))
    }
}
