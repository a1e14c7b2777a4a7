use crate::events::AppEvent;
use async_channel::Sender;
use std::time::Duration;

/// The engine's view of the external animation scheduler: deliver exactly
/// one completion signal after the given delay, on the same logical thread
/// as every other engine call.
pub trait Animator {
    fn schedule(&self, delay: Duration);
}

/// Animator used by the running app: sleeps on the local task set, then
/// reports completion through the event channel so the loop re-enters the
/// engine from its own thread.
pub struct ChannelAnimator {
    tx: Sender<AppEvent>,
}

impl ChannelAnimator {
    pub fn new(tx: Sender<AppEvent>) -> Self {
        Self { tx }
    }
}

impl Animator for ChannelAnimator {
    fn schedule(&self, delay: Duration) {
        let tx = self.tx.clone();
        tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            if tx.send(AppEvent::SpinComplete).await.is_err() {
                log::error!("event loop closed before spin completion could be delivered");
            }
        });
    }
}

/// Test animator: records every scheduled delay and fires nothing, so tests
/// drive completion explicitly.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingAnimator {
    pub scheduled: std::rc::Rc<std::cell::RefCell<Vec<Duration>>>,
}

#[cfg(test)]
impl Animator for RecordingAnimator {
    fn schedule(&self, delay: Duration) {
        self.scheduled.borrow_mut().push(delay);
    }
}
