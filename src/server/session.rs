//! SignupSession — the one live form instance behind the HTTP adapter.

use tokio::sync::{RwLock, broadcast};
use tracing::debug;
use uuid::Uuid;

use crate::error::FlowError;
use crate::flow::{AdvanceOutcome, SignupStep, StepController};
use crate::form::{FieldName, SubmitOutcome};
use crate::notify::{BroadcastNotifier, Toast};
use crate::view::FormView;

const VIEW_BROADCAST_CAPACITY: usize = 64;

/// Wraps a [`StepController`] for shared async access and announces every
/// change to subscribers.
pub struct SignupSession {
    id: Uuid,
    flow: RwLock<StepController>,
    notifier: BroadcastNotifier,
    views: broadcast::Sender<FormView>,
}

impl SignupSession {
    pub fn new() -> Self {
        let (views, _rx) = broadcast::channel(VIEW_BROADCAST_CAPACITY);
        let session = Self {
            id: Uuid::new_v4(),
            flow: RwLock::new(StepController::new()),
            notifier: BroadcastNotifier::new(),
            views,
        };
        debug!(session_id = %session.id, "Sign-up session created");
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub async fn step(&self) -> SignupStep {
        self.flow.read().await.step()
    }

    /// Snapshot of what a renderer should draw right now.
    pub async fn view(&self) -> FormView {
        FormView::build(&*self.flow.read().await)
    }

    /// Subscribe to view changes.
    pub fn subscribe_views(&self) -> broadcast::Receiver<FormView> {
        self.views.subscribe()
    }

    /// Subscribe to toasts.
    pub fn subscribe_toasts(&self) -> broadcast::Receiver<Toast> {
        self.notifier.subscribe()
    }

    pub async fn set_field(&self, name: FieldName, value: String) -> FormView {
        let mut flow = self.flow.write().await;
        flow.set_field(name, value);
        self.publish(&flow)
    }

    pub async fn advance(&self) -> Result<(AdvanceOutcome, FormView), FlowError> {
        let mut flow = self.flow.write().await;
        let outcome = flow.advance()?;
        Ok((outcome, self.publish(&flow)))
    }

    pub async fn retreat(&self) -> Result<FormView, FlowError> {
        let mut flow = self.flow.write().await;
        flow.retreat()?;
        Ok(self.publish(&flow))
    }

    pub async fn submit(&self) -> Result<SubmitOutcome, FlowError> {
        let mut flow = self.flow.write().await;
        let outcome = flow.submit(&self.notifier)?;
        // Submit revalidates every field, so errors may have changed.
        self.publish(&flow);
        Ok(outcome)
    }

    fn publish(&self, flow: &StepController) -> FormView {
        let view = FormView::build(flow);
        // No subscribers is fine.
        let _ = self.views.send(view.clone());
        view
    }
}

impl Default for SignupSession {
    fn default() -> Self {
        Self::new()
    }
}
