// Fetch phase state machine for the gallery session
//
// One value answers every "may we fetch?" question. The earlier sketch of
// this logic used two booleans (has_more, is_loading) plus an implicit
// error condition; the combinations they allowed but the session never
// occupies (loading-after-exhaustion, error-while-loading) are simply not
// representable here.
//
// State Diagram:
//
//                FetchStarted
//      [Idle] ─────────────────▶ [Loading]
//        ▲                        │  │  │
//        │        PageArrived     │  │  │
//        └────────────────────────┘  │  │
//                                    │  │ EmptyPage
//                 FetchFailed        │  ▼
//      [Failed] ◀────────────────────┘ [Exhausted]  (terminal)
//        │                  ▲
//        │ RetryRequested   │
//        └──────▶ [Loading]─┘ (same Loading as above)
//
// Exhausted accepts no event: once the catalog reports its end, the
// session stays there. FetchStarted is only valid from Idle and
// RetryRequested only from Failed, so a failed session cannot be
// restarted by scrolling - only by an explicit retry.

/// Where the session is in its fetch lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchPhase {
    /// No request in flight, more pages may exist
    #[default]
    Idle,
    /// Exactly one page request is in flight
    Loading,
    /// The catalog reported its end (empty page); terminal
    Exhausted,
    /// The last request failed; waiting for a manual retry
    Failed {
        /// Human-readable cause, shown in the activity strip
        error: String,
    },
}

/// Events that can move the phase. Produced by PageLoader only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseEvent {
    /// A new page request is being issued (from Idle)
    FetchStarted,
    /// The in-flight request returned a non-empty batch
    PageArrived,
    /// The in-flight request returned an empty batch - end of catalog
    EmptyPage,
    /// The in-flight request failed with this error text
    FetchFailed(String),
    /// The user asked to retry a failed request
    RetryRequested,
}

impl FetchPhase {
    /// The single place a phase transition can happen.
    ///
    /// Returns true if the (state, event) pair is legal and the transition
    /// was taken; false leaves the phase untouched. Callers branch on the
    /// return value instead of re-checking state themselves.
    pub fn apply(&mut self, event: PhaseEvent) -> bool {
        use FetchPhase::*;
        use PhaseEvent::*;

        let next = match (&*self, event) {
            (Idle, FetchStarted) => Loading,
            (Failed { .. }, RetryRequested) => Loading,
            (Loading, PageArrived) => Idle,
            (Loading, EmptyPage) => Exhausted,
            (Loading, FetchFailed(error)) => Failed { error },
            _ => return false,
        };
        *self = next;
        true
    }

    /// A request may be started (not loading, not exhausted, not failed)
    pub fn is_idle(&self) -> bool {
        matches!(self, FetchPhase::Idle)
    }

    /// A request is currently in flight
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchPhase::Loading)
    }

    /// The catalog may still have pages (anything but Exhausted)
    pub fn has_more(&self) -> bool {
        !matches!(self, FetchPhase::Exhausted)
    }

    /// Error text when Failed, None otherwise
    #[allow(dead_code)] // rendering pattern-matches; tests assert through this
    pub fn error(&self) -> Option<&str> {
        match self {
            FetchPhase::Failed { error } => Some(error),
            _ => None,
        }
    }

    /// Short label for the status bar
    pub fn label(&self) -> &'static str {
        match self {
            FetchPhase::Idle => "idle",
            FetchPhase::Loading => "loading",
            FetchPhase::Exhausted => "end of catalog",
            FetchPhase::Failed { .. } => "failed",
        }
    }
}
