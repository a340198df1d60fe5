//=========================================================================
// Bridge Configuration
//=========================================================================
//
// Compile-time constants shared by every channel.
//
// Frame format:
//   640 × 480 pixels, one packed `u32` per pixel laid out as 0x00RRGGBB
//   in native byte order (ARGB8888 with the alpha byte ignored). The same
//   word layout is used by the simulation, the frame slot and the
//   presentation surface, so no channel swizzling happens anywhere.
//
// Audio format:
//   Interleaved stereo, signed 16-bit native-endian samples at 22 050 Hz,
//   exchanged in blocks of 2048 bytes (512 sample frames, ~23 ms).
//
// None of these are runtime-configurable.
//
//=========================================================================

//=== Frame ===============================================================

/// Width of every published frame, in pixels.
pub const FRAME_WIDTH: usize = 640;

/// Height of every published frame, in pixels.
pub const FRAME_HEIGHT: usize = 480;

/// Bytes per packed pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Pixels in one frame.
pub const FRAME_PIXELS: usize = FRAME_WIDTH * FRAME_HEIGHT;

/// Bytes in one frame.
pub const FRAME_BYTES: usize = FRAME_PIXELS * BYTES_PER_PIXEL;

/// Color the presentation surface is cleared to before each copy.
pub const CLEAR_COLOR: u32 = 0x00FF_FFFF;

//=== Audio ===============================================================

/// Output sample rate in Hz.
pub const AUDIO_SAMPLE_RATE: u32 = 22_050;

/// Interleaved channel count.
pub const AUDIO_CHANNELS: u16 = 2;

/// Bytes per single-channel sample (signed 16-bit).
pub const AUDIO_BYTES_PER_SAMPLE: usize = 2;

/// Bytes per interleaved sample frame.
pub const AUDIO_FRAME_BYTES: usize = AUDIO_BYTES_PER_SAMPLE * AUDIO_CHANNELS as usize;

/// Capacity of each of the two audio blocks.
pub const AUDIO_BLOCK_BYTES: usize = 2048;

/// Byte value of silence for signed PCM.
pub const AUDIO_SILENCE: u8 = 0;

//=========================================================================
// Unit Tests
//=========================================================================
