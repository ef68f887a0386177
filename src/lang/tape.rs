/// Number of cells allocated for a program when nothing else is configured.
pub const DEFAULT_TAPE_CELLS: u32 = 4096;

/// Runtime memory of one running program: a zero-filled byte buffer plus the
/// cell pointer.
///
/// The pointer is a signed cell index relative to the tape base. Moving it is
/// never checked, so a program may wander off either edge and come back. Only
/// reading or writing through an out-of-range pointer fails, and the caller
/// decides what that failure means.
#[derive(Debug, Clone)]
pub struct Tape {
    cells: Vec<u8>,
    ptr: isize,
}

impl Tape {
    pub fn new(cells: u32) -> Self {
        Tape {
            cells: vec![0; cells as usize],
            ptr: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Current pointer position in cells from the base.
    pub fn position(&self) -> isize {
        self.ptr
    }

    /// Advance the pointer by `delta` cells (element-sized steps).
    pub fn move_ptr(&mut self, delta: i32) {
        self.ptr = self.ptr.wrapping_add(delta as isize);
    }

    fn index(&self) -> Option<usize> {
        usize::try_from(self.ptr)
            .ok()
            .filter(|&i| i < self.cells.len())
    }

    pub fn get(&self) -> Option<u8> {
        self.index().map(|i| self.cells[i])
    }

    pub fn set(&mut self, value: u8) -> Option<()> {
        let i = self.index()?;
        self.cells[i] = value;
        Some(())
    }

    /// Add `delta` to the current cell modulo 256.
    pub fn add(&mut self, delta: i8) -> Option<u8> {
        let i = self.index()?;
        self.cells[i] = self.cells[i].wrapping_add(delta as u8);
        Some(self.cells[i])
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }
}
