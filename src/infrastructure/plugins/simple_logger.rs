use crate::domain::SearchRequest;
use crate::infrastructure::SubmitHook;
use anyhow::Result;
use log::info;

/// Logs every submitted search as one JSON line
pub struct SimpleLoggerHook;

impl SimpleLoggerHook {
    pub fn format_request(request: &SearchRequest) -> Result<String> {
        Ok(serde_json::to_string(request)?)
    }
}

impl SubmitHook for SimpleLoggerHook {
    fn on_submit(&self, request: &SearchRequest) -> Result<()> {
        info!("Search request: {}", Self::format_request(request)?);
        Ok(())
    }

    fn name(&self) -> &str {
        "Simple Logger"
    }
}
