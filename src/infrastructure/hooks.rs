use crate::domain::SearchRequest;
use anyhow::Result;
use log::warn;

/// Trait for plugins that respond to a submitted search
pub trait SubmitHook: Send + Sync {
    /// Called after the user pressed "Найти билеты" with a valid request
    fn on_submit(&self, request: &SearchRequest) -> Result<()>;

    /// Human-readable name for this hook
    fn name(&self) -> &str;
}

/// Registry for managing submit hooks
pub struct HookRegistry {
    hooks: Vec<Box<dyn SubmitHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Register a new submit hook
    pub fn register<H>(&mut self, hook: H)
    where
        H: SubmitHook + 'static,
    {
        self.hooks.push(Box::new(hook));
    }

    /// Execute all registered hooks for a submission
    pub fn execute_submit_hooks(&self, request: &SearchRequest) -> Result<()> {
        for hook in &self.hooks {
            if let Err(e) = hook.on_submit(request) {
                warn!("Hook '{}' failed: {}", hook.name(), e);
                // Continue with other hooks even if one fails
            }
        }
        Ok(())
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}
