//=========================================================================
// Audio Block
//=========================================================================
//
// One half of the double-buffered audio channel.
//
// A block is either being filled by the simulation or drained by the audio
// callback, never both. It carries its own cursors:
//
// ```text
//   Filling:   [ written ........ | free ............ ]
//                                 ^ write_pos
//
//   Draining:  [ consumed | remaining | (stale, unread) ]
//                         ^ read_pos  ^ len
// ```
//
// Role changes reset the cursors, so a block that starts filling never
// exposes bytes from its previous cycle to the reader.
//
//=========================================================================

//=== Internal Imports ====================================================

use crate::core::config::AUDIO_BLOCK_BYTES;

//=== BlockRole ===========================================================

/// Which side of the channel currently owns a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRole {
    /// Accepting bytes from the simulation.
    Filling,

    /// Being read by the audio callback.
    Draining,
}

//=== AudioBlock ==========================================================

/// Fixed-capacity PCM byte buffer with role-dependent cursors.
#[derive(Debug)]
pub(crate) struct AudioBlock {
    data: Box<[u8; AUDIO_BLOCK_BYTES]>,
    role: BlockRole,
    write_pos: usize,
    read_pos: usize,
    len: usize,
}

impl AudioBlock {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(role: BlockRole) -> Self {
        Self {
            data: Box::new([0; AUDIO_BLOCK_BYTES]),
            role,
            write_pos: 0,
            read_pos: 0,
            len: 0,
        }
    }

    //--- Accessors --------------------------------------------------------

    pub(crate) fn role(&self) -> BlockRole {
        self.role
    }

    /// Bytes still to be read while draining (zero while filling).
    pub(crate) fn remaining(&self) -> usize {
        match self.role {
            BlockRole::Draining => self.len - self.read_pos,
            BlockRole::Filling => 0,
        }
    }

    /// Bytes that can still be written while filling (zero while draining).
    pub(crate) fn free(&self) -> usize {
        match self.role {
            BlockRole::Filling => AUDIO_BLOCK_BYTES - self.write_pos,
            BlockRole::Draining => 0,
        }
    }

    //--- Data Movement ----------------------------------------------------

    /// Appends as much of `buf` as fits and returns the byte count taken.
    pub(crate) fn write(&mut self, buf: &[u8]) -> usize {
        debug_assert_eq!(self.role, BlockRole::Filling);

        let count = buf.len().min(self.free());
        self.data[self.write_pos..self.write_pos + count].copy_from_slice(&buf[..count]);
        self.write_pos += count;
        count
    }

    /// Copies up to `out.len()` unread bytes into `out`.
    pub(crate) fn read(&mut self, out: &mut [u8]) -> usize {
        debug_assert_eq!(self.role, BlockRole::Draining);

        let count = out.len().min(self.remaining());
        out[..count].copy_from_slice(&self.data[self.read_pos..self.read_pos + count]);
        self.read_pos += count;
        count
    }

    //--- Role Transitions -------------------------------------------------

    /// Hands the block to the producer with an empty write cursor.
    pub(crate) fn begin_filling(&mut self) {
        self.role = BlockRole::Filling;
        self.write_pos = 0;
        self.read_pos = 0;
        self.len = 0;
    }

    /// Hands the block to the reader; everything written becomes readable.
    pub(crate) fn begin_draining(&mut self) {
        self.role = BlockRole::Draining;
        self.len = self.write_pos;
        self.read_pos = 0;
        self.write_pos = 0;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filling_block_accepts_up_to_capacity() {
        let mut block = AudioBlock::new(BlockRole::Filling);

        assert_eq!(block.write(&[1; 1500]), 1500);
        assert_eq!(block.write(&[2; 1500]), AUDIO_BLOCK_BYTES - 1500);
        assert_eq!(block.write(&[3; 10]), 0);
        assert_eq!(block.free(), 0);
    }

    #[test]
    fn draining_exposes_exactly_what_was_written() {
        let mut block = AudioBlock::new(BlockRole::Filling);
        block.write(&[9, 8, 7]);
        block.begin_draining();

        assert_eq!(block.remaining(), 3);

        let mut out = [0u8; 2];
        assert_eq!(block.read(&mut out), 2);
        assert_eq!(out, [9, 8]);
        assert_eq!(block.remaining(), 1);

        let mut out = [0u8; 8];
        assert_eq!(block.read(&mut out), 1);
        assert_eq!(out[0], 7);
        assert_eq!(block.remaining(), 0);
    }

    #[test]
    fn refilling_hides_previous_cycle() {
        let mut block = AudioBlock::new(BlockRole::Filling);
        block.write(&[5; 100]);
        block.begin_draining();
        block.begin_filling();
        block.begin_draining();

        assert_eq!(block.remaining(), 0, "Stale bytes must not be readable");
    }

    #[test]
    fn remaining_and_free_depend_on_role() {
        let block = AudioBlock::new(BlockRole::Draining);
        assert_eq!(block.remaining(), 0);
        assert_eq!(block.free(), 0);

        let block = AudioBlock::new(BlockRole::Filling);
        assert_eq!(block.remaining(), 0);
        assert_eq!(block.free(), AUDIO_BLOCK_BYTES);
    }
}
