//=========================================================================
// Bridge Demo
//
// Stand-in for an external engine loop: a 35 Hz simulation that renders a
// scrolling gradient with a movable square, plays a tone while Space is
// held, and reacts to arrow keys. Click or close the window to quit.
//
// Logging:
//   RUST_LOG=info cargo run
//   RUST_LOG=bridge::audio=trace,info cargo run
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::f32::consts::TAU;
use std::process::ExitCode;
use std::time::{Duration, Instant};

//=== External Crates =====================================================

use log::{error, info};
use tracing_subscriber::EnvFilter;

//=== Internal Imports ====================================================

use aetheric_bridge::prelude::*;

//=== Demo Simulation =====================================================

const TICKS_PER_SECOND: u32 = 35;
const SQUARE_SIZE: usize = 48;
const SQUARE_SPEED: i32 = 6;
const TONE_HZ: f32 = 440.0;
const TONE_AMPLITUDE: f32 = 6000.0;

/// Pending audio is capped so a stalled device cannot grow it forever.
const MAX_PENDING_AUDIO: usize = AUDIO_BLOCK_BYTES * 2;

#[derive(Default)]
struct Held {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    tone: bool,
}

struct Demo {
    tick: u32,
    x: i32,
    y: i32,
    held: Held,
    phase: f32,
    frame: Vec<u32>,
    pending_audio: Vec<u8>,
}

impl Demo {
    fn new() -> Self {
        Self {
            tick: 0,
            x: (FRAME_WIDTH - SQUARE_SIZE) as i32 / 2,
            y: (FRAME_HEIGHT - SQUARE_SIZE) as i32 / 2,
            held: Held::default(),
            phase: 0.0,
            frame: vec![0; FRAME_PIXELS],
            pending_audio: Vec::with_capacity(MAX_PENDING_AUDIO),
        }
    }

    fn run(mut self, ctx: SimulationContext) {
        let tick_duration = Duration::from_secs(1) / TICKS_PER_SECOND;
        info!("Demo simulation running at {} Hz", TICKS_PER_SECOND);

        loop {
            let tick_start = Instant::now();

            while let Some(event) = ctx.bridge.input.try_pop_event() {
                self.apply(event);
            }

            self.step();
            self.render();
            ctx.bridge.frames.publish_pixels(&self.frame);
            self.feed_audio(&ctx.bridge.audio);

            let remaining = tick_duration.saturating_sub(tick_start.elapsed());
            if ctx.shutdown.wait_timeout(remaining) {
                break;
            }
        }

        let stats = ctx.bridge.audio.stats();
        info!(
            "Demo simulation stopped after {} ticks ({} audio bytes written, {} drained, {} silence)",
            self.tick, stats.bytes_written, stats.bytes_drained, stats.bytes_silenced
        );
    }

    fn apply(&mut self, event: InputEvent) {
        let down = event.is_down();
        match event.code {
            KeyCode::ArrowLeft => self.held.left = down,
            KeyCode::ArrowRight => self.held.right = down,
            KeyCode::ArrowUp => self.held.up = down,
            KeyCode::ArrowDown => self.held.down = down,
            KeyCode::Space => self.held.tone = down,
            _ => {}
        }
    }

    fn step(&mut self) {
        self.tick = self.tick.wrapping_add(1);

        let dx = (self.held.right as i32 - self.held.left as i32) * SQUARE_SPEED;
        let dy = (self.held.down as i32 - self.held.up as i32) * SQUARE_SPEED;
        self.x = (self.x + dx).clamp(0, (FRAME_WIDTH - SQUARE_SIZE) as i32);
        self.y = (self.y + dy).clamp(0, (FRAME_HEIGHT - SQUARE_SIZE) as i32);
    }

    fn render(&mut self) {
        let shift = self.tick as usize;
        for (y, row) in self.frame.chunks_exact_mut(FRAME_WIDTH).enumerate() {
            for (x, pixel) in row.iter_mut().enumerate() {
                let r = ((x + shift) & 0xFF) as u32;
                let g = ((y + shift / 2) & 0xFF) as u32;
                *pixel = (r << 16) | (g << 8) | 0x40;
            }
        }

        let (x0, y0) = (self.x as usize, self.y as usize);
        for row in self.frame[y0 * FRAME_WIDTH..]
            .chunks_exact_mut(FRAME_WIDTH)
            .take(SQUARE_SIZE)
        {
            row[x0..x0 + SQUARE_SIZE].fill(0x00FF_FFFF);
        }
    }

    fn feed_audio(&mut self, audio: &AudioChannel) {
        let frames = (AUDIO_SAMPLE_RATE / TICKS_PER_SECOND) as usize;
        let step = TAU * TONE_HZ / AUDIO_SAMPLE_RATE as f32;

        for _ in 0..frames {
            let sample = if self.held.tone {
                (self.phase.sin() * TONE_AMPLITUDE) as i16
            } else {
                0
            };
            self.phase = (self.phase + step) % TAU;

            for _ in 0..AUDIO_CHANNELS {
                self.pending_audio.extend_from_slice(&sample.to_ne_bytes());
            }
        }

        // Short writes are expected; keep the rest for the next tick.
        let written = audio.write_samples(&self.pending_audio);
        self.pending_audio.drain(..written);

        if self.pending_audio.len() > MAX_PENDING_AUDIO {
            let excess = self.pending_audio.len() - MAX_PENDING_AUDIO;
            let excess = excess - excess % AUDIO_FRAME_BYTES;
            self.pending_audio.drain(..excess);
        }
    }
}

//=== Entry Point =========================================================

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let result = EngineBuilder::new()
        .with_title("Aetheric Bridge Demo")
        .build()
        .run(|ctx: SimulationContext| Demo::new().run(ctx));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
