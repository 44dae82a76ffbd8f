//! Client comparison state machine
//!
//! Drives a single comparison through selection, submission, waiting and
//! result, independent of any transport or rendering. The flow is generic
//! over the preview resource attached to a selection: replacing or
//! clearing a selection drops its preview, so release is guaranteed on
//! every transition that discards one.
//!
//! Idle -> Selected -> Submitting -> Scanning -> Complete | Failed,
//! and an explicit reset from Complete/Failed back to Idle. There is no
//! automatic retry; resubmission starts a fresh comparison.

use artscan_common::api::FileMeta;
use artscan_common::RiskTier;
use std::path::PathBuf;
use thiserror::Error;

/// The two upload slots of a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    First,
    Second,
}

impl Slot {
    /// Multipart field name the slot maps to
    pub fn field(&self) -> &'static str {
        match self {
            Slot::First => "file1",
            Slot::Second => "file2",
        }
    }
}

/// A chosen file plus its preview resource
#[derive(Debug)]
pub struct SelectedFile<P> {
    pub name: String,
    pub size: u64,
    pub path: PathBuf,
    /// Released when the selection is replaced or cleared
    pub preview: P,
}

/// Result of a completed comparison as seen by the client
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub score: u8,
    /// Derived locally from the score
    pub tier: RiskTier,
    pub file1: FileMeta,
    pub file2: FileMeta,
}

impl Outcome {
    pub fn from_score(score: u8, file1: FileMeta, file2: FileMeta) -> Self {
        Self {
            score,
            tier: RiskTier::classify(score),
            file1,
            file2,
        }
    }
}

/// Current state of the comparison flow
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// No files chosen
    Idle,
    /// One or both files chosen
    Selected,
    /// Request in flight
    Submitting,
    /// Awaiting the comparison result
    Scanning,
    /// Result available
    Complete(Outcome),
    /// Error surfaced with a user-facing message
    Failed(String),
}

impl Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Selected => "selected",
            Phase::Submitting => "submitting",
            Phase::Scanning => "scanning",
            Phase::Complete(_) => "complete",
            Phase::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FlowError {
    /// Submit attempted without both files; the flow stays in Selected
    #[error("Please select both files to compare")]
    MissingSelection,

    /// Action not allowed in the current state
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },
}

/// State machine for one client-side comparison
pub struct ComparisonFlow<P> {
    phase: Phase,
    first: Option<SelectedFile<P>>,
    second: Option<SelectedFile<P>>,
}

impl<P> Default for ComparisonFlow<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> ComparisonFlow<P> {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            first: None,
            second: None,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn selection(&self, slot: Slot) -> Option<&SelectedFile<P>> {
        match slot {
            Slot::First => self.first.as_ref(),
            Slot::Second => self.second.as_ref(),
        }
    }

    /// True when both files are chosen and submission is allowed
    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Selected && self.first.is_some() && self.second.is_some()
    }

    /// Choose a file for a slot, replacing any prior selection
    ///
    /// The replaced selection's preview is dropped here.
    pub fn select(&mut self, slot: Slot, file: SelectedFile<P>) -> Result<(), FlowError> {
        match self.phase {
            Phase::Idle | Phase::Selected => {
                match slot {
                    Slot::First => self.first = Some(file),
                    Slot::Second => self.second = Some(file),
                }
                self.phase = Phase::Selected;
                Ok(())
            }
            _ => Err(FlowError::InvalidTransition {
                state: self.phase.name(),
                action: "select a file",
            }),
        }
    }

    /// Start submission; rejected locally if a slot is empty
    pub fn begin_submit(&mut self) -> Result<(), FlowError> {
        if self.phase != Phase::Selected {
            return Err(FlowError::InvalidTransition {
                state: self.phase.name(),
                action: "submit",
            });
        }
        if self.first.is_none() || self.second.is_none() {
            // Stays in Selected; nothing leaves the client
            return Err(FlowError::MissingSelection);
        }
        self.phase = Phase::Submitting;
        Ok(())
    }

    /// The request is on the wire; wait for the result
    pub fn begin_scanning(&mut self) -> Result<(), FlowError> {
        if self.phase != Phase::Submitting {
            return Err(FlowError::InvalidTransition {
                state: self.phase.name(),
                action: "scan",
            });
        }
        self.phase = Phase::Scanning;
        Ok(())
    }

    /// A successful response arrived
    pub fn complete(&mut self, outcome: Outcome) -> Result<(), FlowError> {
        if self.phase != Phase::Scanning {
            return Err(FlowError::InvalidTransition {
                state: self.phase.name(),
                action: "complete",
            });
        }
        self.phase = Phase::Complete(outcome);
        Ok(())
    }

    /// Surface an error; allowed while the request is in flight
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), FlowError> {
        match self.phase {
            Phase::Submitting | Phase::Scanning => {
                self.phase = Phase::Failed(message.into());
                Ok(())
            }
            _ => Err(FlowError::InvalidTransition {
                state: self.phase.name(),
                action: "fail",
            }),
        }
    }

    /// Explicit reset back to Idle, clearing both selections
    ///
    /// Both previews are dropped here.
    pub fn reset(&mut self) -> Result<(), FlowError> {
        match self.phase {
            Phase::Complete(_) | Phase::Failed(_) => {
                self.first = None;
                self.second = None;
                self.phase = Phase::Idle;
                Ok(())
            }
            _ => Err(FlowError::InvalidTransition {
                state: self.phase.name(),
                action: "reset",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Preview stand-in counting releases
    struct Preview {
        released: Arc<AtomicUsize>,
    }

    impl Drop for Preview {
        fn drop(&mut self) {
            self.released.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn file(name: &str, released: &Arc<AtomicUsize>) -> SelectedFile<Preview> {
        SelectedFile {
            name: name.to_string(),
            size: 1024,
            path: PathBuf::from(name),
            preview: Preview {
                released: Arc::clone(released),
            },
        }
    }

    fn outcome(score: u8) -> Outcome {
        Outcome::from_score(
            score,
            FileMeta {
                name: "a.png".to_string(),
                size: 1024,
            },
            FileMeta {
                name: "b.png".to_string(),
                size: 1024,
            },
        )
    }

    #[test]
    fn full_happy_path() {
        let released = Arc::new(AtomicUsize::new(0));
        let mut flow = ComparisonFlow::new();

        assert_eq!(*flow.phase(), Phase::Idle);
        flow.select(Slot::First, file("a.png", &released)).unwrap();
        assert_eq!(*flow.phase(), Phase::Selected);
        assert!(!flow.can_submit());
        flow.select(Slot::Second, file("b.png", &released)).unwrap();
        assert!(flow.can_submit());

        flow.begin_submit().unwrap();
        assert_eq!(*flow.phase(), Phase::Submitting);
        flow.begin_scanning().unwrap();
        assert_eq!(*flow.phase(), Phase::Scanning);

        flow.complete(outcome(95)).unwrap();
        match flow.phase() {
            Phase::Complete(result) => {
                assert_eq!(result.score, 95);
                assert_eq!(result.tier, RiskTier::High);
            }
            other => panic!("unexpected phase: {:?}", other),
        }
    }

    #[test]
    fn submit_without_second_file_stays_selected() {
        let released = Arc::new(AtomicUsize::new(0));
        let mut flow = ComparisonFlow::new();
        flow.select(Slot::First, file("a.png", &released)).unwrap();

        let err = flow.begin_submit().unwrap_err();
        assert_eq!(err, FlowError::MissingSelection);
        assert_eq!(*flow.phase(), Phase::Selected);
    }

    #[test]
    fn submit_is_rejected_while_in_flight() {
        let released = Arc::new(AtomicUsize::new(0));
        let mut flow = ComparisonFlow::new();
        flow.select(Slot::First, file("a.png", &released)).unwrap();
        flow.select(Slot::Second, file("b.png", &released)).unwrap();
        flow.begin_submit().unwrap();

        assert!(matches!(
            flow.begin_submit().unwrap_err(),
            FlowError::InvalidTransition { .. }
        ));
        flow.begin_scanning().unwrap();
        assert!(matches!(
            flow.begin_submit().unwrap_err(),
            FlowError::InvalidTransition { .. }
        ));
    }

    #[test]
    fn replacing_a_selection_releases_the_old_preview() {
        let released = Arc::new(AtomicUsize::new(0));
        let mut flow = ComparisonFlow::new();

        flow.select(Slot::First, file("a.png", &released)).unwrap();
        assert_eq!(released.load(Ordering::SeqCst), 0);

        flow.select(Slot::First, file("a2.png", &released)).unwrap();
        assert_eq!(released.load(Ordering::SeqCst), 1);

        // The other slot is untouched
        flow.select(Slot::Second, file("b.png", &released)).unwrap();
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn reset_clears_selections_and_releases_previews() {
        let released = Arc::new(AtomicUsize::new(0));
        let mut flow = ComparisonFlow::new();
        flow.select(Slot::First, file("a.png", &released)).unwrap();
        flow.select(Slot::Second, file("b.png", &released)).unwrap();
        flow.begin_submit().unwrap();
        flow.begin_scanning().unwrap();
        flow.complete(outcome(40)).unwrap();

        flow.reset().unwrap();

        assert_eq!(*flow.phase(), Phase::Idle);
        assert!(flow.selection(Slot::First).is_none());
        assert!(flow.selection(Slot::Second).is_none());
        assert_eq!(released.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failure_surfaces_message_and_resets_to_idle() {
        let released = Arc::new(AtomicUsize::new(0));
        let mut flow = ComparisonFlow::new();
        flow.select(Slot::First, file("a.png", &released)).unwrap();
        flow.select(Slot::Second, file("b.png", &released)).unwrap();
        flow.begin_submit().unwrap();

        // Failure is allowed straight from Submitting (e.g. connect error)
        flow.fail("Cannot connect to the comparison server").unwrap();
        assert_eq!(
            *flow.phase(),
            Phase::Failed("Cannot connect to the comparison server".to_string())
        );

        flow.reset().unwrap();
        assert_eq!(*flow.phase(), Phase::Idle);
    }

    #[test]
    fn reset_requires_a_terminal_state() {
        let mut flow: ComparisonFlow<()> = ComparisonFlow::new();
        assert!(matches!(
            flow.reset().unwrap_err(),
            FlowError::InvalidTransition { .. }
        ));
    }

    #[test]
    fn selection_is_locked_while_in_flight() {
        let released = Arc::new(AtomicUsize::new(0));
        let mut flow = ComparisonFlow::new();
        flow.select(Slot::First, file("a.png", &released)).unwrap();
        flow.select(Slot::Second, file("b.png", &released)).unwrap();
        flow.begin_submit().unwrap();

        let err = flow.select(Slot::First, file("c.png", &released)).unwrap_err();
        assert!(matches!(err, FlowError::InvalidTransition { .. }));
    }
}
