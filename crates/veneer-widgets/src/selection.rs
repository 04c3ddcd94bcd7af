//! Cursor and scroll state shared by option lists, time columns and wheels.

/// A cursor over `count` items with a scroll window of `visible` rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    cursor: usize,
    offset: usize,
    count: usize,
    visible: usize,
}

impl SelectionState {
    pub fn new(count: usize, visible: usize) -> Self {
        Self {
            cursor: 0,
            offset: 0,
            count,
            visible,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
    pub fn offset(&self) -> usize {
        self.offset
    }
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn set_visible(&mut self, visible: usize) {
        self.visible = visible;
        self.ensure_visible();
    }

    /// Wraps to the last item.
    pub fn move_up(&mut self) {
        if self.count == 0 {
            return;
        }
        self.cursor = if self.cursor == 0 {
            self.count - 1
        } else {
            self.cursor - 1
        };
        self.ensure_visible();
    }

    /// Wraps to the first item.
    pub fn move_down(&mut self) {
        if self.count == 0 {
            return;
        }
        self.cursor = if self.cursor + 1 >= self.count {
            0
        } else {
            self.cursor + 1
        };
        self.ensure_visible();
    }

    pub fn home(&mut self) {
        self.cursor = 0;
        self.ensure_visible();
    }

    pub fn end(&mut self) {
        if self.count > 0 {
            self.cursor = self.count - 1;
        }
        self.ensure_visible();
    }

    pub fn select(&mut self, index: usize) {
        if self.count == 0 {
            return;
        }
        self.cursor = index.min(self.count - 1);
        self.ensure_visible();
    }

    /// Index range currently on screen.
    pub fn window(&self) -> std::ops::Range<usize> {
        self.offset..(self.offset + self.visible).min(self.count)
    }

    fn ensure_visible(&mut self) {
        if self.count == 0 || self.visible == 0 {
            return;
        }
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.visible {
            self.offset = self.cursor + 1 - self.visible;
        }
    }
}
