// Scroll state for the gallery viewport
//
// Owns position, content size and viewport size; App routes input here
// and ui.rs renders from visible_range(). Unlike a streaming log view
// there is no auto-follow: a gallery is read top-down and new pages are
// appended below the fold, so the offset only moves when the user moves
// it (update_dimensions just clamps it back into range when the viewport
// shrinks).

/// Scroll state for the gallery list.
#[derive(Debug, Clone, Default)]
pub struct ScrollState {
    /// Item index at the top of the viewport
    offset: usize,
    /// Total number of items in content
    total: usize,
    /// Number of rows visible in the viewport
    viewport: usize,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update content and viewport dimensions.
    /// Call this every loop iteration with current sizes.
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Scroll up by one row
    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    /// Scroll down by one row
    pub fn scroll_down(&mut self) {
        self.offset = (self.offset + 1).min(self.max_offset());
    }

    /// Scroll up by a viewport
    pub fn page_up(&mut self) {
        let page = self.viewport.max(1);
        self.offset = self.offset.saturating_sub(page);
    }

    /// Scroll down by a viewport
    pub fn page_down(&mut self) {
        let page = self.viewport.max(1);
        self.offset = (self.offset + page).min(self.max_offset());
    }

    /// Jump to the first item
    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    /// Jump to the last item
    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Current scroll offset
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Half-open visible range (start_index, end_index)
    pub fn visible_range(&self) -> (usize, usize) {
        let start = self.offset;
        let end = (self.offset + self.viewport).min(self.total);
        (start, end)
    }

    /// Content overflows the viewport (scrollbar needed)
    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.viewport
    }

    /// Maximum valid offset
    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }
}
