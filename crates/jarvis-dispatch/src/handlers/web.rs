//! Web search and website opening.

use jarvis_intent::Intent;
use tracing::{debug, warn};

use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::result::ExecutionResult;
use crate::tables::{BLANK_PAGE, display_name, search_url, site_url};

impl Dispatcher {
    pub(crate) async fn web_search(&self, intent: &Intent) -> Result<ExecutionResult> {
        let query = intent.target().trim();
        if query.is_empty() {
            return Ok(ExecutionResult::failure("No search query provided"));
        }

        let (url, shown) = search_url(query);
        debug!(url = %url, query = %shown, "web search");

        match self.collaborators.browser.open(&url).await {
            Ok(true) => Ok(ExecutionResult::success(format!(
                "Here's what I found for {shown}"
            ))),
            Ok(false) => Ok(ExecutionResult::failure("Search failed")),
            Err(e) => {
                warn!(url = %url, error = %e, "search could not be opened");
                Ok(ExecutionResult::failure(format!("Search failed: {e}")))
            }
        }
    }

    pub(crate) async fn open_website(&self, intent: &Intent) -> Result<ExecutionResult> {
        let lowered = intent.raw_text.to_lowercase();
        let target = intent.target().trim().to_lowercase();

        let url = if lowered.contains("new tab") || lowered.contains("open tab") || target.is_empty()
        {
            BLANK_PAGE.to_owned()
        } else {
            site_url(&target)
        };

        match self.collaborators.browser.open(&url).await {
            Ok(true) => Ok(ExecutionResult::success(format!(
                "Opening {}",
                display_name(&url)
            ))),
            Ok(false) => Ok(ExecutionResult::failure(format!("Could not open {url}"))),
            Err(e) => {
                warn!(url = %url, error = %e, "website could not be opened");
                Ok(ExecutionResult::failure(format!("Could not open {url}: {e}")))
            }
        }
    }
}
