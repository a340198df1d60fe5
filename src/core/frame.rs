//=========================================================================
// Frame Channel
//=========================================================================
//
// Latest-frame handoff from the simulation to the presentation thread.
//
// Architecture:
// ```text
//  Simulation thread          FrameSlot              Presentation thread
//  publish_frame(bytes) ──► [ pixels, gen ] ──► FramePresenter::present()
//                           (one lock)               │ copy to staging
//                                                    ▼ (lock released)
//                                         update_texture/clear/copy/flip
// ```
//
// - Last write wins: a frame published before the presenter picks it up
//   is simply overwritten. Nothing is queued.
// - The slot lock covers a single memcpy on either side. Backend calls
//   happen only after the presenter has released it.
// - Every publish bumps the generation. Generation 0 means nothing has
//   been published yet, and presenting is a no-op.
//
//=========================================================================

//=== External Crates =====================================================

use log::{trace, warn};

//=== Internal Imports ====================================================

use crate::core::config::{FRAME_BYTES, FRAME_PIXELS};
use crate::core::display::DisplayBackend;
use crate::core::sync::Exclusive;

//=== FrameSlot ===========================================================

#[derive(Debug)]
struct SlotState {
    pixels: Box<[u32]>,
    generation: u64,
}

/// The single shared "latest frame".
#[derive(Debug)]
pub struct FrameSlot {
    state: Exclusive<SlotState>,
}

impl FrameSlot {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            state: Exclusive::new(SlotState {
                pixels: vec![0; FRAME_PIXELS].into_boxed_slice(),
                generation: 0,
            }),
        }
    }

    //--- Producer Side ----------------------------------------------------

    /// Publishes a frame given as raw packed-pixel bytes.
    ///
    /// Copies at most one frame's worth of bytes; anything past
    /// `FRAME_BYTES` is ignored. A shorter buffer only replaces the leading
    /// part of the slot. Returns the number of bytes taken.
    pub fn publish_frame(&self, pixels: &[u8]) -> usize {
        let count = pixels.len().min(FRAME_BYTES);

        let generation = self.state.with(|slot| {
            let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut slot.pixels[..]);
            bytes[..count].copy_from_slice(&pixels[..count]);
            slot.generation += 1;
            slot.generation
        });

        if pixels.len() > FRAME_BYTES {
            warn!(
                target: "bridge::frame",
                "Frame of {} bytes truncated to {}",
                pixels.len(),
                FRAME_BYTES
            );
        }
        trace!(target: "bridge::frame", "Published frame {}", generation);

        count
    }

    /// Publishes a frame given as packed pixels.
    ///
    /// Same semantics as [`FrameSlot::publish_frame`], counted in pixels.
    pub fn publish_pixels(&self, pixels: &[u32]) -> usize {
        self.publish_frame(bytemuck::cast_slice(pixels)) / std::mem::size_of::<u32>()
    }

    //--- Consumer Side ----------------------------------------------------

    /// Generation of the latest published frame (0 if none).
    pub fn generation(&self) -> u64 {
        self.state.with(|slot| slot.generation)
    }

    /// Copies the latest frame into `dest` and returns its generation.
    ///
    /// Returns `None` without copying if nothing was ever published.
    pub(crate) fn copy_latest(&self, dest: &mut [u32]) -> Option<u64> {
        self.state.with(|slot| {
            if slot.generation == 0 {
                return None;
            }
            let count = dest.len().min(slot.pixels.len());
            dest[..count].copy_from_slice(&slot.pixels[..count]);
            Some(slot.generation)
        })
    }
}

impl Default for FrameSlot {
    fn default() -> Self {
        Self::new()
    }
}

//=== PresentOutcome ======================================================

/// What a call to [`FramePresenter::present`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentOutcome {
    /// The frame with this generation was pushed to the screen.
    Presented { generation: u64 },

    /// Nothing has been published yet.
    NoFrame,

    /// The display backend is not initialized.
    BackendUnavailable,

    /// The backend failed to show the frame (logged, not fatal).
    Failed,
}

//=== FramePresenter ======================================================

/// Presentation-thread side of the frame channel.
///
/// Owns the staging texture the slot is copied into, so the slot lock is
/// never held while the backend works.
pub struct FramePresenter {
    staging: Box<[u32]>,
    last_presented: u64,
}

impl FramePresenter {
    pub fn new() -> Self {
        Self {
            staging: vec![0; FRAME_PIXELS].into_boxed_slice(),
            last_presented: 0,
        }
    }

    /// Pushes the most recently published frame to `backend`.
    pub fn present<B>(&mut self, slot: &FrameSlot, backend: &mut B) -> PresentOutcome
    where
        B: DisplayBackend + ?Sized,
    {
        if !backend.is_ready() {
            return PresentOutcome::BackendUnavailable;
        }

        let Some(generation) = slot.copy_latest(&mut self.staging) else {
            return PresentOutcome::NoFrame;
        };

        backend.update_texture(&self.staging);
        backend.clear();
        backend.copy();

        if let Err(e) = backend.flip() {
            warn!(target: "bridge::frame", "Dropped frame {}: {}", generation, e);
            return PresentOutcome::Failed;
        }

        if generation > self.last_presented + 1 && self.last_presented != 0 {
            trace!(
                target: "bridge::frame",
                "Skipped {} stale frame(s)",
                generation - self.last_presented - 1
            );
        }
        self.last_presented = generation;

        PresentOutcome::Presented { generation }
    }

    /// Generation of the last frame successfully presented (0 if none).
    pub fn last_presented(&self) -> u64 {
        self.last_presented
    }
}

impl Default for FramePresenter {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::config::FRAME_WIDTH;
    use crate::core::display::DisplayError;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;

    //--- Test Backend -----------------------------------------------------

    /// Records every call and keeps the last texture upload.
    #[derive(Default)]
    pub(crate) struct RecordingBackend {
        pub ready: bool,
        pub fail_flip: bool,
        pub calls: Vec<&'static str>,
        pub texture: Vec<u32>,
        pub flips: usize,
    }

    impl RecordingBackend {
        pub(crate) fn ready() -> Self {
            Self {
                ready: true,
                ..Self::default()
            }
        }
    }

    impl DisplayBackend for RecordingBackend {
        fn is_ready(&self) -> bool {
            self.ready
        }

        fn update_texture(&mut self, pixels: &[u32]) {
            self.calls.push("update_texture");
            self.texture = pixels.to_vec();
        }

        fn clear(&mut self) {
            self.calls.push("clear");
        }

        fn copy(&mut self) {
            self.calls.push("copy");
        }

        fn flip(&mut self) -> Result<(), DisplayError> {
            self.calls.push("flip");
            if self.fail_flip {
                return Err(DisplayError::Present("test".to_string()));
            }
            self.flips += 1;
            Ok(())
        }
    }

    fn solid_frame(color: u32) -> Vec<u32> {
        vec![color; FRAME_PIXELS]
    }

    //=====================================================================
    // Presentation
    //=====================================================================

    #[test]
    fn present_before_publish_is_noop() {
        let slot = FrameSlot::new();
        let mut presenter = FramePresenter::new();
        let mut backend = RecordingBackend::ready();

        assert_eq!(presenter.present(&slot, &mut backend), PresentOutcome::NoFrame);
        assert!(backend.calls.is_empty());
    }

    #[test]
    fn present_without_backend_is_noop() {
        let slot = FrameSlot::new();
        slot.publish_pixels(&solid_frame(0x00FF_0000));

        let mut presenter = FramePresenter::new();
        let mut backend = RecordingBackend::default();

        assert_eq!(
            presenter.present(&slot, &mut backend),
            PresentOutcome::BackendUnavailable
        );
        assert!(backend.calls.is_empty());
    }

    #[test]
    fn frames_published_before_backend_is_ready_are_kept() {
        let slot = FrameSlot::new();
        let mut presenter = FramePresenter::new();
        let mut backend = RecordingBackend::default();

        slot.publish_pixels(&solid_frame(0x0000_0011));
        slot.publish_pixels(&solid_frame(0x0000_0022));
        assert_eq!(
            presenter.present(&slot, &mut backend),
            PresentOutcome::BackendUnavailable
        );
        assert_eq!(slot.generation(), 2);

        backend.ready = true;
        assert_eq!(
            presenter.present(&slot, &mut backend),
            PresentOutcome::Presented { generation: 2 }
        );
        assert_eq!(backend.texture, solid_frame(0x0000_0022));
    }

    #[test]
    fn present_drives_backend_in_order() {
        let slot = FrameSlot::new();
        slot.publish_pixels(&solid_frame(0x0000_FF00));

        let mut presenter = FramePresenter::new();
        let mut backend = RecordingBackend::ready();

        assert_eq!(
            presenter.present(&slot, &mut backend),
            PresentOutcome::Presented { generation: 1 }
        );
        assert_eq!(backend.calls, vec!["update_texture", "clear", "copy", "flip"]);
        assert!(backend.texture.iter().all(|&p| p == 0x0000_FF00));
    }

    #[test]
    fn latest_publish_wins() {
        let slot = FrameSlot::new();
        slot.publish_pixels(&solid_frame(1));
        slot.publish_pixels(&solid_frame(2));
        slot.publish_pixels(&solid_frame(3));

        let mut presenter = FramePresenter::new();
        let mut backend = RecordingBackend::ready();

        assert_eq!(
            presenter.present(&slot, &mut backend),
            PresentOutcome::Presented { generation: 3 }
        );
        assert!(backend.texture.iter().all(|&p| p == 3));
        assert_eq!(presenter.last_presented(), 3);
    }

    #[test]
    fn failed_flip_is_reported_not_fatal() {
        let slot = FrameSlot::new();
        slot.publish_pixels(&solid_frame(9));

        let mut presenter = FramePresenter::new();
        let mut backend = RecordingBackend {
            fail_flip: true,
            ..RecordingBackend::ready()
        };

        assert_eq!(presenter.present(&slot, &mut backend), PresentOutcome::Failed);
        assert_eq!(presenter.last_presented(), 0);

        backend.fail_flip = false;
        assert_eq!(
            presenter.present(&slot, &mut backend),
            PresentOutcome::Presented { generation: 1 }
        );
        assert_eq!(backend.flips, 1);
    }

    //=====================================================================
    // Publishing
    //=====================================================================

    #[test]
    fn publish_frame_accepts_raw_bytes() {
        let slot = FrameSlot::new();
        let pixels = solid_frame(0x0012_3456);
        let bytes: &[u8] = bytemuck::cast_slice(&pixels[..]);

        assert_eq!(slot.publish_frame(bytes), FRAME_BYTES);
        assert_eq!(slot.generation(), 1);

        let mut out = vec![0u32; FRAME_PIXELS];
        assert_eq!(slot.copy_latest(&mut out), Some(1));
        assert_eq!(out, pixels);
    }

    #[test]
    fn oversized_publish_is_truncated() {
        let slot = FrameSlot::new();
        let bytes = vec![0xABu8; FRAME_BYTES + 100];
        assert_eq!(slot.publish_frame(&bytes), FRAME_BYTES);
    }

    #[test]
    fn short_publish_replaces_leading_rows_only() {
        let slot = FrameSlot::new();
        slot.publish_pixels(&solid_frame(1));
        slot.publish_pixels(&vec![2; FRAME_WIDTH]);

        let mut out = vec![0u32; FRAME_PIXELS];
        slot.copy_latest(&mut out);
        assert!(out[..FRAME_WIDTH].iter().all(|&p| p == 2));
        assert!(out[FRAME_WIDTH..].iter().all(|&p| p == 1));
    }

    //=====================================================================
    // Concurrency
    //=====================================================================

    #[test]
    fn presented_frames_are_never_older_than_last_published() {
        let slot = Arc::new(FrameSlot::new());
        let stop = Arc::new(AtomicBool::new(false));

        let producer = {
            let slot = Arc::clone(&slot);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                let mut frame = vec![0u32; FRAME_PIXELS];
                for color in 1..=200u32 {
                    frame.fill(color);
                    slot.publish_pixels(&frame);
                }
                stop.store(true, Ordering::Release);
            })
        };

        let mut presenter = FramePresenter::new();
        let mut backend = RecordingBackend::ready();
        let mut last_color = 0;

        loop {
            let finished = stop.load(Ordering::Acquire);
            let published_before = slot.generation();

            if let PresentOutcome::Presented { generation } =
                presenter.present(&slot, &mut backend)
            {
                assert!(generation >= published_before);
                let color = backend.texture[0];
                assert!(backend.texture.iter().all(|&p| p == color), "Torn frame");
                assert!(color >= last_color);
                last_color = color;
            }

            if finished {
                break;
            }
        }

        producer.join().unwrap();
        presenter.present(&slot, &mut backend);
        assert_eq!(backend.texture[0], 200);
    }
}
