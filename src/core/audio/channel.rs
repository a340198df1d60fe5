//=========================================================================
// Audio Channel
//=========================================================================
//
// Double-buffered PCM handoff from the simulation to the audio callback.
//
// Architecture:
// ```text
//  Simulation thread                       Audio callback
//  write_samples(buf)                      on_drain_request(out)
//        │                                        │
//        ▼                                        ▼
//  ┌───────────────┐   swap when draining   ┌───────────────┐
//  │ block[filling]│ ◄──── hits empty ────► │ block[other]  │
//  │  role=Filling │                        │ role=Draining │
//  └───────────────┘                        └───────────────┘
// ```
//
// Locking:
// - Each block sits behind its own lock.
// - The producer only ever locks the block whose role is `Filling`.
// - The callback only locks the `Draining` block while copying.
// - A swap locks both blocks, always in index order, and flips roles and
//   the `filling` index inside that scope.
//
// Because roles only change under both locks, a producer that locks a
// block and finds it `Filling` is guaranteed to be writing to the block
// the callback is not reading. If a swap raced between the index load and
// the lock, the producer sees `Draining` and retries with the new index.
//
// Underrun:
// When the callback asks for more than is available (including right after
// a swap onto a block nothing was written to), the rest of `out` is filled
// with silence. Old bytes are never replayed.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

//=== External Crates =====================================================

use log::trace;

//=== Internal Imports ====================================================

use super::block::{AudioBlock, BlockRole};
use crate::core::config::AUDIO_SILENCE;
use crate::core::sync::Exclusive;

//=== AudioStats ==========================================================

/// Running totals for the channel, readable from any thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AudioStats {
    /// Bytes accepted by `write_samples`.
    pub bytes_written: u64,

    /// Bytes of real sample data returned by `on_drain_request`.
    pub bytes_drained: u64,

    /// Bytes of silence used to pad short drains.
    pub bytes_silenced: u64,

    /// Number of role swaps performed.
    pub swaps: u64,
}

#[derive(Debug, Default)]
struct AtomicStats {
    bytes_written: AtomicU64,
    bytes_drained: AtomicU64,
    bytes_silenced: AtomicU64,
    swaps: AtomicU64,
}

//=== AudioChannel ========================================================

/// Two fixed blocks alternating between the simulation and the callback.
#[derive(Debug)]
pub struct AudioChannel {
    blocks: [Exclusive<AudioBlock>; 2],

    /// Index of the block currently in `Filling` role.
    ///
    /// Only written during a swap, with both block locks held.
    filling: AtomicUsize,

    stats: AtomicStats,
}

impl AudioChannel {
    //--- Construction -----------------------------------------------------

    /// Creates the channel with block 0 filling and block 1 drained.
    pub fn new() -> Self {
        Self {
            blocks: [
                Exclusive::new(AudioBlock::new(BlockRole::Filling)),
                Exclusive::new(AudioBlock::new(BlockRole::Draining)),
            ],
            filling: AtomicUsize::new(0),
            stats: AtomicStats::default(),
        }
    }

    //--- Producer Side ----------------------------------------------------

    /// Appends PCM bytes to the filling block.
    ///
    /// Returns how many bytes were accepted, which is less than
    /// `buf.len()` whenever the filling block runs out of room. The caller
    /// decides whether to re-offer the rest later or drop it.
    pub fn write_samples(&self, buf: &[u8]) -> usize {
        loop {
            let index = self.filling.load(Ordering::Acquire);

            let written = self.blocks[index].with(|block| {
                (block.role() == BlockRole::Filling).then(|| block.write(buf))
            });

            if let Some(written) = written {
                self.stats
                    .bytes_written
                    .fetch_add(written as u64, Ordering::Relaxed);

                if written < buf.len() {
                    trace!(
                        target: "bridge::audio",
                        "Short write: {} of {} bytes accepted",
                        written,
                        buf.len()
                    );
                }
                return written;
            }

            // A swap landed between the index load and the lock.
        }
    }

    //--- Consumer Side ----------------------------------------------------

    /// Fills `out` for the audio callback and returns the bytes of real data.
    ///
    /// Swaps roles first if the draining block is exhausted. Any part of
    /// `out` not covered by sample data is set to silence.
    pub fn on_drain_request(&self, out: &mut [u8]) -> usize {
        let copied = self.drain_block(out);
        self.pad_silence(out, copied);
        copied
    }

    /// Copies from the draining block into `out` without padding.
    ///
    /// Swaps first if the draining block is exhausted, so at most one
    /// block is read per call. Returns 0 once neither block has data.
    pub(crate) fn drain_block(&self, out: &mut [u8]) -> usize {
        let draining = 1 - self.filling.load(Ordering::Acquire);

        let copied = self.blocks[draining].with(|block| {
            (block.remaining() > 0).then(|| block.read(out))
        });

        let copied = match copied {
            Some(copied) => copied,
            None => {
                let draining = self.swap();
                self.blocks[draining].with(|block| block.read(out))
            }
        };

        self.stats
            .bytes_drained
            .fetch_add(copied as u64, Ordering::Relaxed);
        copied
    }

    /// Sets `out[copied..]` to silence and records it as underrun.
    pub(crate) fn pad_silence(&self, out: &mut [u8], copied: usize) {
        let silenced = out.len() - copied;
        if silenced == 0 {
            return;
        }

        out[copied..].fill(AUDIO_SILENCE);
        self.stats
            .bytes_silenced
            .fetch_add(silenced as u64, Ordering::Relaxed);

        trace!(
            target: "bridge::audio",
            "Underrun: padded {} of {} bytes with silence",
            silenced,
            out.len()
        );
    }

    //--- Diagnostics ------------------------------------------------------

    /// Snapshot of the running totals.
    pub fn stats(&self) -> AudioStats {
        AudioStats {
            bytes_written: self.stats.bytes_written.load(Ordering::Relaxed),
            bytes_drained: self.stats.bytes_drained.load(Ordering::Relaxed),
            bytes_silenced: self.stats.bytes_silenced.load(Ordering::Relaxed),
            swaps: self.stats.swaps.load(Ordering::Relaxed),
        }
    }

    /// Current roles of both blocks, read under both locks.
    pub fn roles(&self) -> [BlockRole; 2] {
        let [first, second] = &self.blocks;
        first.with(|a| second.with(|b| [a.role(), b.role()]))
    }

    //--- Internal Helpers -------------------------------------------------

    /// Exchanges the roles of the two blocks and returns the new draining
    /// index.
    ///
    /// Called only from the consumer side, once the draining block is
    /// empty.
    fn swap(&self) -> usize {
        let [first, second] = &self.blocks;

        let (draining, filled) = first.with(|a| {
            second.with(|b| {
                let old_filling = self.filling.load(Ordering::Relaxed);
                let (to_drain, to_fill) = if old_filling == 0 {
                    (&mut *a, &mut *b)
                } else {
                    (&mut *b, &mut *a)
                };

                to_drain.begin_draining();
                to_fill.begin_filling();
                self.filling.store(1 - old_filling, Ordering::Release);

                (old_filling, to_drain.remaining())
            })
        });

        self.stats.swaps.fetch_add(1, Ordering::Relaxed);
        trace!(
            target: "bridge::audio",
            "Swapped blocks: block {} draining with {} bytes",
            draining,
            filled
        );

        draining
    }
}

impl Default for AudioChannel {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AUDIO_BLOCK_BYTES;
    use proptest::prelude::*;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use std::thread;

    fn ramp(start: usize, len: usize) -> Vec<u8> {
        (start..start + len).map(|i| (i % 251) as u8).collect()
    }

    fn assert_exclusive_roles(channel: &AudioChannel) {
        let roles = channel.roles();
        assert_ne!(roles[0], roles[1], "Both blocks share role {:?}", roles[0]);
    }

    //=====================================================================
    // Scenarios
    //=====================================================================

    #[test]
    fn full_block_then_three_half_drains() {
        let channel = AudioChannel::new();
        let data = ramp(0, AUDIO_BLOCK_BYTES);

        assert_eq!(channel.write_samples(&data), 2048);

        let mut out = [0xAAu8; 1024];
        assert_eq!(channel.on_drain_request(&mut out), 1024);
        assert_eq!(&out[..], &data[..1024]);

        let mut out = [0xAAu8; 1024];
        assert_eq!(channel.on_drain_request(&mut out), 1024);
        assert_eq!(&out[..], &data[1024..]);

        let mut out = [0xAAu8; 1024];
        assert_eq!(channel.on_drain_request(&mut out), 0);
        assert!(out.iter().all(|&b| b == AUDIO_SILENCE), "Expected silence fill");

        let stats = channel.stats();
        assert_eq!(stats.swaps, 2);
        assert_eq!(stats.bytes_drained, 2048);
        assert_eq!(stats.bytes_silenced, 1024);
    }

    #[test]
    fn drain_before_any_write_is_silent() {
        let channel = AudioChannel::new();
        let mut out = [0x55u8; 256];

        assert_eq!(channel.on_drain_request(&mut out), 0);
        assert!(out.iter().all(|&b| b == AUDIO_SILENCE));
    }

    #[test]
    fn write_is_short_once_filling_block_is_full() {
        let channel = AudioChannel::new();

        assert_eq!(channel.write_samples(&ramp(0, 1500)), 1500);
        assert_eq!(channel.write_samples(&ramp(0, 1500)), AUDIO_BLOCK_BYTES - 1500);
        assert_eq!(channel.write_samples(&[1, 2, 3]), 0);
        assert_eq!(channel.stats().bytes_written, AUDIO_BLOCK_BYTES as u64);
    }

    #[test]
    fn short_drain_returns_partial_data_and_pads() {
        let channel = AudioChannel::new();
        channel.write_samples(&[7; 100]);

        let mut out = [0xFFu8; 300];
        assert_eq!(channel.on_drain_request(&mut out), 100);
        assert!(out[..100].iter().all(|&b| b == 7));
        assert!(out[100..].iter().all(|&b| b == AUDIO_SILENCE));
    }

    #[test]
    fn writes_during_drain_land_in_other_block() {
        let channel = AudioChannel::new();
        channel.write_samples(&[1; 512]);

        let mut out = [0u8; 256];
        channel.on_drain_request(&mut out); // swap, block 0 draining

        channel.write_samples(&[2; 64]);

        let mut out = [0u8; 256];
        assert_eq!(channel.on_drain_request(&mut out), 256);
        assert!(out.iter().all(|&b| b == 1), "Draining block must not see new writes");

        let mut out = [0u8; 64];
        assert_eq!(channel.on_drain_request(&mut out), 64); // swap to the 2s
        assert!(out.iter().all(|&b| b == 2));
    }

    #[test]
    fn roles_stay_exclusive_across_swaps() {
        let channel = AudioChannel::new();
        assert_exclusive_roles(&channel);

        for round in 0..5 {
            channel.write_samples(&ramp(round, 300));
            let mut out = [0u8; 200];
            channel.on_drain_request(&mut out);
            assert_exclusive_roles(&channel);
            channel.on_drain_request(&mut out);
            assert_exclusive_roles(&channel);
        }
    }

    //=====================================================================
    // Concurrency
    //=====================================================================

    #[test]
    fn concurrent_stream_is_delivered_in_order() {
        const TOTAL: usize = 200_000;
        let channel = Arc::new(AudioChannel::new());
        let done = Arc::new(AtomicBool::new(false));

        let producer = {
            let channel = Arc::clone(&channel);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let stream = ramp(0, TOTAL);
                let mut offset = 0;
                while offset < TOTAL {
                    let end = (offset + 700).min(TOTAL);
                    let written = channel.write_samples(&stream[offset..end]);
                    offset += written;
                    if written == 0 {
                        thread::yield_now();
                    }
                }
                done.store(true, Ordering::Release);
            })
        };

        let expected = ramp(0, TOTAL);
        let mut received = Vec::with_capacity(TOTAL);
        let mut out = [0u8; 333];
        loop {
            let finished = done.load(Ordering::Acquire);
            let copied = channel.on_drain_request(&mut out);
            received.extend_from_slice(&out[..copied]);

            let roles = channel.roles();
            assert_ne!(roles[0], roles[1]);

            if finished && copied == 0 && received.len() == TOTAL {
                break;
            }
            if copied == 0 {
                thread::yield_now();
            }
        }

        producer.join().unwrap();
        assert_eq!(received, expected);

        let stats = channel.stats();
        assert_eq!(stats.bytes_written, TOTAL as u64);
        assert_eq!(stats.bytes_drained, TOTAL as u64);
    }

    //=====================================================================
    // Properties
    //=====================================================================

    #[derive(Debug, Clone)]
    enum Op {
        Write(usize),
        Drain(usize),
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..3000).prop_map(Op::Write),
            (0usize..3000).prop_map(Op::Drain),
        ]
    }

    proptest! {
        #[test]
        fn drained_bytes_are_an_ordered_prefix_of_accepted_bytes(
            ops in proptest::collection::vec(arb_op(), 1..64)
        ) {
            let channel = AudioChannel::new();
            let mut accepted = Vec::new();
            let mut drained = Vec::new();
            let mut cursor = 0;

            for op in ops {
                match op {
                    Op::Write(len) => {
                        let data = ramp(cursor, len);
                        let written = channel.write_samples(&data);
                        prop_assert!(written <= len);
                        accepted.extend_from_slice(&data[..written]);
                        cursor += written;
                    }
                    Op::Drain(len) => {
                        let mut out = vec![0xEEu8; len];
                        let copied = channel.on_drain_request(&mut out);
                        prop_assert!(copied <= len);
                        prop_assert!(out[copied..].iter().all(|&b| b == AUDIO_SILENCE));
                        drained.extend_from_slice(&out[..copied]);
                    }
                }
                let roles = channel.roles();
                prop_assert_ne!(roles[0], roles[1]);
            }

            prop_assert!(drained.len() <= accepted.len());
            prop_assert_eq!(&accepted[..drained.len()], &drained[..]);

            let stats = channel.stats();
            prop_assert_eq!(stats.bytes_written, accepted.len() as u64);
            prop_assert_eq!(stats.bytes_drained, drained.len() as u64);
        }
    }
}
