use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use studio_protocol::{NavigationContext, SearchResult, PORTFOLIO_SECTION, SERVICES_SECTION};
use tokio::runtime::Handle;

use crate::config::NavigationConfig;
use crate::error::Result;
use crate::surface::{PageSurface, ScrollAlign, ScrollBehavior};
use crate::task::ScheduledTask;

/// Deferred step scheduled after the section scroll
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FollowUp {
    /// Filter the portfolio, center the item and pulse a highlight
    PortfolioHighlight { category: String, item_id: String },
    /// Center a service card, no highlight
    ServiceFocus { item_id: String },
}

impl FollowUp {
    /// Portfolio needs both category and item; services only the item.
    fn for_target(target: &NavigationContext) -> Option<Self> {
        let item_id = target.item_id.as_deref()?;
        match target.section_id.as_str() {
            PORTFOLIO_SECTION => Some(Self::PortfolioHighlight {
                category: target.category.clone()?,
                item_id: item_id.to_string(),
            }),
            SERVICES_SECTION => Some(Self::ServiceFocus {
                item_id: item_id.to_string(),
            }),
            _ => None,
        }
    }

    fn item_id(&self) -> &str {
        match self {
            Self::PortfolioHighlight { item_id, .. } | Self::ServiceFocus { item_id } => item_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NavigationOutcome {
    /// No element with the section id; nothing happened
    SectionMissing,
    Scrolled { top: f64 },
    ScrolledWithFollowUp { top: f64, follow_up: FollowUp },
}

#[derive(Debug)]
struct Pending {
    task: ScheduledTask,
    highlight: Option<String>,
    cancelled: Arc<AtomicBool>,
}

/// Clears the highlight when the follow-up finishes or is aborted mid-hold
struct HighlightGuard<S: PageSurface> {
    surface: Arc<S>,
    item_id: String,
}

impl<S: PageSurface> Drop for HighlightGuard<S> {
    fn drop(&mut self) {
        self.surface.set_highlight(&self.item_id, false);
    }
}

/// Scrolls the page to a section and, for catalog items, schedules the
/// settle-delayed filter/focus/highlight step.
///
/// Failures never reach the caller: a missing section or item degrades to a
/// logged no-op.
pub struct Navigator<S: PageSurface> {
    surface: Arc<S>,
    config: NavigationConfig,
    runtime: Handle,
    pending: Mutex<Vec<Pending>>,
}

impl<S: PageSurface> Navigator<S> {
    /// Must be called from within a tokio runtime; deferred steps run on it.
    pub fn new(surface: Arc<S>, config: NavigationConfig) -> Result<Self> {
        config.validate()?;
        let runtime = Handle::try_current()?;
        Ok(Self {
            surface,
            config,
            runtime,
            pending: Mutex::new(Vec::new()),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &Arc<S> {
        &self.surface
    }

    pub fn navigate(&self, target: &NavigationContext) -> NavigationOutcome {
        if self.config.cancel_pending {
            self.cancel_pending();
        } else {
            self.pending().retain(|pending| !pending.task.is_finished());
        }

        let Some(section_top) = self.surface.section_top(&target.section_id) else {
            log::warn!("Navigation target '#{}' not found", target.section_id);
            return NavigationOutcome::SectionMissing;
        };

        let top = (section_top - self.config.header_offset_px).max(0.0);
        self.surface.scroll_to(top, ScrollBehavior::Smooth);
        log::debug!("Scrolled to '#{}' at {top}px", target.section_id);

        match FollowUp::for_target(target) {
            Some(follow_up) => {
                self.schedule(follow_up.clone());
                NavigationOutcome::ScrolledWithFollowUp { top, follow_up }
            }
            None => NavigationOutcome::Scrolled { top },
        }
    }

    /// Menu items and calls to action
    pub fn navigate_to_section(&self, section_id: &str) -> NavigationOutcome {
        self.navigate(&NavigationContext::section(section_id))
    }

    pub fn navigate_to_result(&self, result: &SearchResult) -> NavigationOutcome {
        self.navigate(&result.navigation_context())
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending()
            .iter()
            .any(|pending| !pending.task.is_finished())
    }

    /// Abort scheduled follow-ups and clear any highlight they applied
    pub fn cancel_pending(&self) {
        let drained: Vec<Pending> = self.pending().drain(..).collect();
        for pending in drained {
            pending.cancelled.store(true, Ordering::SeqCst);
            pending.task.cancel();
            if let Some(item_id) = pending.highlight {
                self.surface.set_highlight(&item_id, false);
            }
        }
    }

    /// Wait until every scheduled follow-up has run to completion
    pub async fn settle(&self) {
        let drained: Vec<Pending> = self.pending().drain(..).collect();
        for pending in drained {
            pending.task.join().await;
        }
    }

    fn schedule(&self, follow_up: FollowUp) {
        let surface = Arc::clone(&self.surface);
        let label = format!("follow-up:{}", follow_up.item_id());
        let cancelled = Arc::new(AtomicBool::new(false));

        let (task, highlight) = match follow_up {
            FollowUp::PortfolioHighlight { category, item_id } => {
                let settle = self.config.portfolio_settle();
                let hold = self.config.highlight();
                let highlight = item_id.clone();
                let flag = Arc::clone(&cancelled);
                let task = ScheduledTask::spawn(&self.runtime, label, async move {
                    tokio::time::sleep(settle).await;
                    surface.select_category(&category);
                    if !surface.scroll_item_into_view(&item_id, ScrollAlign::Center) {
                        log::debug!("Portfolio item '{item_id}' not rendered, skipping highlight");
                        return;
                    }
                    // Cancellation can land while the surface call above is running.
                    if flag.load(Ordering::SeqCst) {
                        return;
                    }
                    surface.set_highlight(&item_id, true);
                    let _clear = HighlightGuard { surface, item_id };
                    tokio::time::sleep(hold).await;
                });
                (task, Some(highlight))
            }
            FollowUp::ServiceFocus { item_id } => {
                let settle = self.config.service_settle();
                let task = ScheduledTask::spawn(&self.runtime, label, async move {
                    tokio::time::sleep(settle).await;
                    if !surface.scroll_item_into_view(&item_id, ScrollAlign::Center) {
                        log::debug!("Service item '{item_id}' not rendered");
                    }
                });
                (task, None)
            }
        };

        self.pending().push(Pending {
            task,
            highlight,
            cancelled,
        });
    }

    fn pending(&self) -> MutexGuard<'_, Vec<Pending>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
