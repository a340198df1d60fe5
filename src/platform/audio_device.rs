//=========================================================================
// Audio Device
//=========================================================================
//
// Opens the default output device and wires its callback to the bridge.
//
// Architecture:
//   cpal callback (OS audio thread)
//     └─► data: &mut [i16] ──bytemuck──► &mut [u8]
//           └─► fill_callback(): drain blocks until `out` is full or
//               both are empty, then pad the rest with silence
//
// The stream is requested in the bridge's fixed format (stereo, signed
// 16-bit, 22 050 Hz). There is no resampling or format fallback: if the
// device refuses the format, opening fails and the engine refuses to run,
// because a simulation paced on audio would otherwise drift silently.
//
// The device buffer is fixed at one block's worth of frames. A larger
// callback would need more than the single filling block the simulation
// can stage between callbacks, so part of it would always be silence.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::Arc;

//=== External Dependencies ===============================================

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::audio::AudioChannel;
use crate::core::bridge::Bridge;
use crate::core::config::{
    AUDIO_BLOCK_BYTES, AUDIO_CHANNELS, AUDIO_FRAME_BYTES, AUDIO_SAMPLE_RATE,
};

/// Frames per device callback: exactly one audio block.
const CALLBACK_FRAMES: u32 = (AUDIO_BLOCK_BYTES / AUDIO_FRAME_BYTES) as u32;

//=== AudioError ==========================================================

/// Audio output initialization errors. All of them are fatal.
#[derive(Debug)]
pub enum AudioError {
    /// The host reports no default output device.
    NoDevice,

    /// The device rejected the stream configuration.
    BuildStream(cpal::BuildStreamError),

    /// The stream was built but would not start.
    PlayStream(cpal::PlayStreamError),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDevice => write!(f, "No audio output device available"),
            Self::BuildStream(e) => write!(f, "Audio stream creation failed: {}", e),
            Self::PlayStream(e) => write!(f, "Audio stream start failed: {}", e),
        }
    }
}

impl std::error::Error for AudioError {}

//=== AudioDevice =========================================================

/// Running output stream; audio stops when this is dropped.
///
/// `cpal::Stream` is not `Send` on every host, so this stays on the thread
/// that opened it.
pub(crate) struct AudioDevice {
    _stream: cpal::Stream,
}

impl AudioDevice {
    /// Opens the default output device and starts draining `bridge.audio`.
    pub(crate) fn open(bridge: Arc<Bridge>) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;

        let config = cpal::StreamConfig {
            channels: AUDIO_CHANNELS,
            sample_rate: cpal::SampleRate(AUDIO_SAMPLE_RATE),
            buffer_size: cpal::BufferSize::Fixed(CALLBACK_FRAMES),
        };

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [i16], _: &cpal::OutputCallbackInfo| {
                    fill_callback(&bridge.audio, bytemuck::cast_slice_mut(data));
                },
                |err| error!(target: "platform::audio", "Audio stream error: {}", err),
                None,
            )
            .map_err(AudioError::BuildStream)?;

        stream.play().map_err(AudioError::PlayStream)?;

        info!(
            target: "platform::audio",
            "Audio output started on '{}' ({} Hz, {} channels, i16, {} frames per callback)",
            device.name().unwrap_or_else(|_| "<unnamed>".to_string()),
            AUDIO_SAMPLE_RATE,
            AUDIO_CHANNELS,
            CALLBACK_FRAMES
        );

        Ok(Self { _stream: stream })
    }
}

//=== Callback ============================================================

/// Fills one device buffer from the channel.
///
/// Keeps draining while blocks yield data, so a block that becomes ready
/// partway through `out` is used instead of silenced. Only the part left
/// uncovered is padded. Returns the bytes of real data.
fn fill_callback(audio: &AudioChannel, out: &mut [u8]) -> usize {
    let mut filled = 0;
    while filled < out.len() {
        let copied = audio.drain_block(&mut out[filled..]);
        if copied == 0 {
            break;
        }
        filled += copied;
    }

    audio.pad_silence(out, filled);
    filled
}

//=========================================================================
// Tests
//=========================================================================
