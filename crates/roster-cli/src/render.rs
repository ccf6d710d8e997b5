//! Live rendering of presentation state.
//!
//! A background task follows the state channel and drives a spinner while the
//! client is busy. Final results are printed by the commands themselves.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

use roster_core::state::{Phase, ViewState};

use crate::output;

pub struct Renderer {
    task: JoinHandle<()>,
    stop: oneshot::Sender<()>,
}

impl Renderer {
    /// Start following `rx`. Disabled in JSON mode.
    pub fn spawn(mut rx: watch::Receiver<ViewState>) -> Self {
        let (stop, mut stopped) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            if output::is_json() {
                return;
            }
            let mut spinner: Option<ProgressBar> = None;
            loop {
                let label = status_label(&rx.borrow_and_update());
                match (label, spinner.as_ref()) {
                    (Some(msg), Some(pb)) => pb.set_message(msg),
                    (Some(msg), None) => spinner = Some(new_spinner(msg)),
                    (None, _) => {
                        if let Some(pb) = spinner.take() {
                            pb.finish_and_clear();
                        }
                    }
                }
                tokio::select! {
                    changed = rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    _ = &mut stopped => break,
                }
            }
            if let Some(pb) = spinner.take() {
                pb.finish_and_clear();
            }
        });
        Self { task, stop }
    }

    /// Stop rendering and clear the spinner line.
    pub async fn finish(self) {
        let _ = self.stop.send(());
        let _ = self.task.await;
    }
}

fn new_spinner(msg: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg);
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// What the spinner says for a given state, `None` when it must not draw.
///
/// `connecting` is the wallet approval step: the consent prompt owns the
/// terminal until it is answered.
pub fn status_label(state: &ViewState) -> Option<&'static str> {
    if state.phase == Phase::Connecting {
        return None;
    }
    if state.busy {
        return Some("Processing...");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_state() {
        let mut s = ViewState::default();
        assert_eq!(status_label(&s), None);

        s.phase = Phase::Connected;
        s.busy = true;
        assert_eq!(status_label(&s), Some("Processing..."));
    }

    #[test]
    fn no_spinner_while_wallet_consent_is_pending() {
        let mut s = ViewState { phase: Phase::Connecting, ..ViewState::default() };
        assert_eq!(status_label(&s), None);

        // Even a stray busy flag must not draw over the prompt.
        s.busy = true;
        assert_eq!(status_label(&s), None);
    }
}
