use crate::error::{
    kind::{NothingToRedo, NothingToUndo},
    Error,
};

/// An append-only history of values with undo and redo.
///
/// The history keeps every value that was ever pushed after the last undo point. The `cursor` is
/// the number of visible entries; undoing moves it back without discarding anything, so that the
/// undone entries can be redone. Pushing a new entry discards the undone ones.
///
/// The first `floor` entries are the starting point of an exercise, and cannot be undone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History<T> {
    entries: Vec<T>,
    cursor: usize,
    floor: usize,
}

impl<T> History<T> {
    /// Creates a history whose initial entries cannot be undone.
    pub fn new(initial: impl IntoIterator<Item = T>) -> Self {
        let entries = initial.into_iter().collect::<Vec<_>>();
        let floor = entries.len();
        Self { entries, cursor: floor, floor }
    }

    /// Appends an entry, discarding every undone entry.
    pub fn push(&mut self, entry: T) {
        self.entries.truncate(self.cursor);
        self.entries.push(entry);
        self.cursor += 1;
    }

    /// Hides the last visible entry.
    pub fn undo(&mut self) -> Result<(), Error> {
        if !self.can_undo() {
            return Err(Error::spanless(NothingToUndo));
        }
        self.cursor -= 1;
        Ok(())
    }

    /// Shows the first undone entry again.
    pub fn redo(&mut self) -> Result<(), Error> {
        if !self.can_redo() {
            return Err(Error::spanless(NothingToRedo));
        }
        self.cursor += 1;
        Ok(())
    }

    /// Returns true if there is a visible entry above the floor.
    pub fn can_undo(&self) -> bool {
        self.cursor > self.floor
    }

    /// Returns true if there is an undone entry.
    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    /// Returns the visible entries.
    pub fn visible(&self) -> &[T] {
        &self.entries[..self.cursor]
    }

    /// Returns the visible entry at the given index.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.visible().get(index)
    }

    /// Returns the last visible entry.
    pub fn last(&self) -> Option<&T> {
        self.visible().last()
    }

    /// Returns the number of visible entries.
    pub fn len(&self) -> usize {
        self.cursor
    }

    /// Returns true if there are no visible entries.
    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn floor_cannot_be_undone() {
        let mut history = History::new([1, 2]);
        assert!(history.undo().unwrap_err().is::<NothingToUndo>());
        assert_eq!(history.visible(), &[1, 2]);
    }

    #[test]
    fn undo_redo() {
        let mut history = History::new([1, 2]);
        history.push(3);
        history.push(4);
        history.undo().unwrap();
        assert_eq!(history.visible(), &[1, 2, 3]);
        history.undo().unwrap();
        history.redo().unwrap();
        assert_eq!(history.visible(), &[1, 2, 3]);
        assert_eq!(history.last(), Some(&3));
        assert!(history.can_redo());
    }

    #[test]
    fn push_discards_undone_entries() {
        let mut history = History::new([1]);
        history.push(2);
        history.undo().unwrap();
        history.push(5);
        assert_eq!(history.visible(), &[1, 5]);
        assert!(history.redo().unwrap_err().is::<NothingToRedo>());
        assert_eq!(history.len(), 2);
    }
}
