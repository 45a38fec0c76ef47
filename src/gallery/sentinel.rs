// Scroll sentinel - decides when the gallery should grow
//
// The terminal analogue of watching the last card scroll into view: the
// sentinel is attached to the index of the current last item (the marker)
// and observed against the rows the viewport is actually showing. When the
// marker is inside the visible range and the session is idle, the verdict
// is LoadNext; in every other situation the observation is dropped
// silently - no queueing, no deferral, the next observation re-evaluates
// from scratch.
//
// The sentinel never talks to the loader. It reads the phase and reports a
// verdict; tui::App turns LoadNext into PageLoader::begin(). That keeps
// "when to load" and "how to load" separately testable.

use crate::gallery::phase::FetchPhase;

/// Outcome of one sentinel observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The last item is on screen and the session can fetch - load page n+1
    LoadNext,
    /// Nothing to do (marker off-screen, none attached, or session busy/done)
    Hold,
}

/// Watches the current last item of the gallery.
#[derive(Debug, Default)]
pub struct ScrollSentinel {
    /// Index of the observed item; None when the gallery is empty
    marker: Option<usize>,
}

impl ScrollSentinel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the sentinel at a new marker, replacing any previous one.
    ///
    /// There is exactly one observation at a time: after a page is
    /// appended the old last item stops being watched and the new last
    /// item takes over. None detaches (empty gallery) and is a no-op
    /// observation-wise.
    pub fn attach(&mut self, marker: Option<usize>) {
        self.marker = marker;
    }

    /// Currently watched index, if any.
    pub fn marker(&self) -> Option<usize> {
        self.marker
    }

    /// Evaluate one observation against the visible half-open row range.
    ///
    /// Fires only when the marker is within [start, end) AND the phase is
    /// Idle. A Loading phase means a request is already in flight, an
    /// Exhausted phase means there is nothing left to fetch, and a Failed
    /// phase waits for a manual retry - all of those hold.
    pub fn observe(&self, visible: (usize, usize), phase: &FetchPhase) -> Verdict {
        let Some(marker) = self.marker else {
            return Verdict::Hold;
        };
        let (start, end) = visible;
        let in_view = marker >= start && marker < end;
        if in_view && phase.is_idle() {
            Verdict::LoadNext
        } else {
            Verdict::Hold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_marker_no_verdict() {
        let sentinel = ScrollSentinel::new();
        assert_eq!(sentinel.observe((0, 50), &FetchPhase::Idle), Verdict::Hold);
    }

    #[test]
    fn test_fires_when_marker_enters_view() {
        let mut sentinel = ScrollSentinel::new();
        sentinel.attach(Some(29));

        // Marker below the fold
        assert_eq!(sentinel.observe((0, 20), &FetchPhase::Idle), Verdict::Hold);
        // Scrolled down far enough
        assert_eq!(
            sentinel.observe((15, 35), &FetchPhase::Idle),
            Verdict::LoadNext
        );
    }

    #[test]
    fn test_visible_range_end_is_exclusive() {
        let mut sentinel = ScrollSentinel::new();
        sentinel.attach(Some(20));

        assert_eq!(sentinel.observe((10, 20), &FetchPhase::Idle), Verdict::Hold);
        assert_eq!(
            sentinel.observe((10, 21), &FetchPhase::Idle),
            Verdict::LoadNext
        );
    }

    #[test]
    fn test_busy_phases_hold() {
        let mut sentinel = ScrollSentinel::new();
        sentinel.attach(Some(5));
        let visible = (0, 10); // marker well inside

        assert_eq!(sentinel.observe(visible, &FetchPhase::Loading), Verdict::Hold);
        assert_eq!(
            sentinel.observe(visible, &FetchPhase::Exhausted),
            Verdict::Hold
        );
        assert_eq!(
            sentinel.observe(
                visible,
                &FetchPhase::Failed {
                    error: "x".into()
                }
            ),
            Verdict::Hold
        );
        assert_eq!(sentinel.observe(visible, &FetchPhase::Idle), Verdict::LoadNext);
    }

    #[test]
    fn test_attach_replaces_previous_marker() {
        let mut sentinel = ScrollSentinel::new();
        sentinel.attach(Some(29));
        sentinel.attach(Some(59));

        assert_eq!(sentinel.marker(), Some(59));
        // The old marker's position no longer triggers anything
        assert_eq!(sentinel.observe((25, 35), &FetchPhase::Idle), Verdict::Hold);
        assert_eq!(
            sentinel.observe((55, 65), &FetchPhase::Idle),
            Verdict::LoadNext
        );
    }

    #[test]
    fn test_detach_goes_quiet() {
        let mut sentinel = ScrollSentinel::new();
        sentinel.attach(Some(3));
        sentinel.attach(None);
        assert_eq!(sentinel.marker(), None);
        assert_eq!(sentinel.observe((0, 10), &FetchPhase::Idle), Verdict::Hold);
    }

    #[test]
    fn test_held_observation_is_not_queued() {
        // A drop during Loading must not fire later by itself: the next
        // observation is evaluated fresh against the new phase.
        let mut sentinel = ScrollSentinel::new();
        sentinel.attach(Some(29));
        let visible = (20, 40);

        assert_eq!(sentinel.observe(visible, &FetchPhase::Loading), Verdict::Hold);
        // Phase returns to Idle; only a new observation fires
        assert_eq!(
            sentinel.observe(visible, &FetchPhase::Idle),
            Verdict::LoadNext
        );
    }
}
