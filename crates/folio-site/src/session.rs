//! Submission lifecycle of one generation session.
//!
//! ```text
//! Idle -> Validating -> Fetching -> Rendering -> PreviewReady
//!   ^         |             |            |             |
//!   +---------+-------------+------------+        Packaging -> DownloadOffered
//!                (failure)                             |
//!                                   PreviewReady <-----+ (failure)
//! ```

use std::fmt;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    Fetching,
    Rendering,
    PreviewReady,
    Packaging,
    DownloadOffered,
}

impl Phase {
    /// Whether an action is in flight; new actions are refused meanwhile.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            Phase::Validating | Phase::Fetching | Phase::Rendering | Phase::Packaging
        )
    }

    /// Whether a preview exists to show or package.
    pub fn has_preview(&self) -> bool {
        matches!(self, Phase::PreviewReady | Phase::DownloadOffered)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Validating => "validating",
            Phase::Fetching => "fetching",
            Phase::Rendering => "rendering",
            Phase::PreviewReady => "preview ready",
            Phase::Packaging => "packaging",
            Phase::DownloadOffered => "download offered",
        };
        f.write_str(name)
    }
}

/// An action that is not allowed in the current phase.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Cannot {action} while {from}")]
pub struct TransitionError {
    pub from: Phase,
    pub action: &'static str,
}

/// Guarded lifecycle state for one generation session.
#[derive(Debug, Default)]
pub struct GenerationSession {
    phase: Phase,
}

impl GenerationSession {
    /// A session in [`Phase::Idle`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Accept a new submission. Allowed when idle or when a previous preview
    /// is showing.
    pub fn begin_submission(&mut self) -> Result<(), TransitionError> {
        self.advance(
            "submit",
            |p| matches!(p, Phase::Idle | Phase::PreviewReady | Phase::DownloadOffered),
            Phase::Validating,
        )
    }

    /// Input passed validation.
    pub fn validated(&mut self) -> Result<(), TransitionError> {
        self.advance("fetch", |p| p == Phase::Validating, Phase::Fetching)
    }

    /// Profile and repositories arrived.
    pub fn fetched(&mut self) -> Result<(), TransitionError> {
        self.advance("render", |p| p == Phase::Fetching, Phase::Rendering)
    }

    /// The preview document is ready.
    pub fn rendered(&mut self) -> Result<(), TransitionError> {
        self.advance("show preview", |p| p == Phase::Rendering, Phase::PreviewReady)
    }

    /// Validation, fetching or rendering failed; back to idle.
    pub fn submission_failed(&mut self) -> Result<(), TransitionError> {
        self.advance(
            "abandon submission",
            |p| matches!(p, Phase::Validating | Phase::Fetching | Phase::Rendering),
            Phase::Idle,
        )
    }

    /// Start packaging the download.
    pub fn begin_packaging(&mut self) -> Result<(), TransitionError> {
        self.advance("package", |p| p.has_preview(), Phase::Packaging)
    }

    /// The archive is ready to download.
    pub fn packaged(&mut self) -> Result<(), TransitionError> {
        self.advance("offer download", |p| p == Phase::Packaging, Phase::DownloadOffered)
    }

    /// Packaging failed; the preview stays as it was.
    pub fn packaging_failed(&mut self) -> Result<(), TransitionError> {
        self.advance("abandon packaging", |p| p == Phase::Packaging, Phase::PreviewReady)
    }

    fn advance(
        &mut self,
        action: &'static str,
        allowed: impl Fn(Phase) -> bool,
        to: Phase,
    ) -> Result<(), TransitionError> {
        if !allowed(self.phase) {
            return Err(TransitionError {
                from: self.phase,
                action,
            });
        }

        tracing::debug!("Session {} -> {}", self.phase, to);
        self.phase = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn previewing() -> GenerationSession {
        let mut session = GenerationSession::new();
        session.begin_submission().unwrap();
        session.validated().unwrap();
        session.fetched().unwrap();
        session.rendered().unwrap();
        session
    }

    #[test]
    fn walks_happy_path() {
        let mut session = previewing();
        assert_eq!(session.phase(), Phase::PreviewReady);

        session.begin_packaging().unwrap();
        assert!(session.phase().is_busy());
        session.packaged().unwrap();

        assert_eq!(session.phase(), Phase::DownloadOffered);
    }

    #[test]
    fn failures_return_to_idle() {
        for steps in 0..3 {
            let mut session = GenerationSession::new();
            session.begin_submission().unwrap();
            if steps > 0 {
                session.validated().unwrap();
            }
            if steps > 1 {
                session.fetched().unwrap();
            }

            session.submission_failed().unwrap();

            assert_eq!(session.phase(), Phase::Idle);
        }
    }

    #[test]
    fn refuses_submission_while_busy() {
        let mut session = GenerationSession::new();
        session.begin_submission().unwrap();
        session.validated().unwrap();

        let err = session.begin_submission().unwrap_err();

        assert_eq!(err.from, Phase::Fetching);
        assert_eq!(err.to_string(), "Cannot submit while fetching");
    }

    #[test]
    fn refuses_download_without_preview() {
        let mut session = GenerationSession::new();

        assert!(session.begin_packaging().is_err());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn packaging_failure_keeps_preview() {
        let mut session = previewing();
        session.begin_packaging().unwrap();

        session.packaging_failed().unwrap();

        assert_eq!(session.phase(), Phase::PreviewReady);
        session.begin_packaging().unwrap();
    }

    #[test]
    fn resubmits_after_download() {
        let mut session = previewing();
        session.begin_packaging().unwrap();
        session.packaged().unwrap();

        session.begin_submission().unwrap();

        assert_eq!(session.phase(), Phase::Validating);
    }

    #[test]
    fn cannot_fail_from_idle() {
        let mut session = GenerationSession::new();

        assert!(session.submission_failed().is_err());
    }
}
