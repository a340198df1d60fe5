//=========================================================================
// Software Display
//=========================================================================
//
// `DisplayBackend` over a softbuffer surface attached to the Winit window.
//
// Architecture:
//   texture (640×480) ──copy()──► canvas (window size) ──flip()──► surface
//
// - `copy()` scales the texture to the largest 4:3 rectangle that fits the
//   window (nearest neighbour) and centers it; `clear()` paints the bars.
// - A zero-sized window (minimized) leaves the backend not ready, so the
//   presenter skips it until the next resize.
// - Created and used only on the event-loop thread.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::num::NonZeroU32;
use std::rc::Rc;

//=== External Dependencies ===============================================

use log::debug;
use softbuffer::{Context, Surface};
use winit::window::Window;

//=== Internal Dependencies ===============================================

use crate::core::config::{CLEAR_COLOR, FRAME_HEIGHT, FRAME_PIXELS, FRAME_WIDTH};
use crate::core::display::{DisplayBackend, DisplayError};

//=== SoftbufferDisplay ===================================================

pub(crate) struct SoftbufferDisplay {
    _context: Context<Rc<Window>>,
    surface: Surface<Rc<Window>, Rc<Window>>,
    width: usize,
    height: usize,
    texture: Box<[u32]>,
    canvas: Vec<u32>,
}

impl SoftbufferDisplay {
    //--- Construction -----------------------------------------------------

    /// Attaches a surface to `window`, sized to its current inner size.
    pub(crate) fn new(window: Rc<Window>) -> Result<Self, DisplayError> {
        let context = Context::new(Rc::clone(&window))
            .map_err(|e| DisplayError::SurfaceCreation(e.to_string()))?;
        let surface = Surface::new(&context, Rc::clone(&window))
            .map_err(|e| DisplayError::SurfaceCreation(e.to_string()))?;

        let mut display = Self {
            _context: context,
            surface,
            width: 0,
            height: 0,
            texture: vec![0; FRAME_PIXELS].into_boxed_slice(),
            canvas: Vec::new(),
        };

        let size = window.inner_size();
        display.resize(size.width, size.height)?;

        Ok(display)
    }

    //--- Resizing ---------------------------------------------------------

    /// Follows the window's physical size.
    pub(crate) fn resize(&mut self, width: u32, height: u32) -> Result<(), DisplayError> {
        let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            debug!(target: "platform::display", "Window has zero area, presentation paused");
            self.width = 0;
            self.height = 0;
            return Ok(());
        };

        self.surface
            .resize(w, h)
            .map_err(|e| DisplayError::Resize(e.to_string()))?;

        self.width = width as usize;
        self.height = height as usize;
        self.canvas.resize(self.width * self.height, CLEAR_COLOR);

        debug!(target: "platform::display", "Surface resized to {}x{}", width, height);
        Ok(())
    }
}

//--- Trait Implementations -----------------------------------------------

impl DisplayBackend for SoftbufferDisplay {
    fn is_ready(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    fn update_texture(&mut self, pixels: &[u32]) {
        let count = pixels.len().min(self.texture.len());
        self.texture[..count].copy_from_slice(&pixels[..count]);
    }

    fn clear(&mut self) {
        self.canvas.fill(CLEAR_COLOR);
    }

    fn copy(&mut self) {
        blit_scaled(&self.texture, &mut self.canvas, self.width, self.height);
    }

    fn flip(&mut self) -> Result<(), DisplayError> {
        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| DisplayError::Present(e.to_string()))?;

        if buffer.len() != self.canvas.len() {
            return Err(DisplayError::Present(format!(
                "surface holds {} pixels, canvas {}",
                buffer.len(),
                self.canvas.len()
            )));
        }

        buffer.copy_from_slice(&self.canvas);
        buffer
            .present()
            .map_err(|e| DisplayError::Present(e.to_string()))
    }
}

//=== Scaling =============================================================

/// Placement of the scaled frame inside the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Viewport {
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

/// Largest centered rectangle with the frame's aspect ratio.
fn fit_viewport(canvas_width: usize, canvas_height: usize) -> Viewport {
    let (width, height) = if canvas_width * FRAME_HEIGHT > canvas_height * FRAME_WIDTH {
        (canvas_height * FRAME_WIDTH / FRAME_HEIGHT, canvas_height)
    } else {
        (canvas_width, canvas_width * FRAME_HEIGHT / FRAME_WIDTH)
    };

    Viewport {
        x: (canvas_width - width) / 2,
        y: (canvas_height - height) / 2,
        width,
        height,
    }
}

/// Nearest-neighbour copy of a full frame into the fitted viewport.
fn blit_scaled(texture: &[u32], canvas: &mut [u32], canvas_width: usize, canvas_height: usize) {
    if canvas.len() < canvas_width * canvas_height || texture.len() < FRAME_PIXELS {
        return;
    }

    let view = fit_viewport(canvas_width, canvas_height);
    if view.width == 0 || view.height == 0 {
        return;
    }

    for row in 0..view.height {
        let src_y = row * FRAME_HEIGHT / view.height;
        let src = &texture[src_y * FRAME_WIDTH..(src_y + 1) * FRAME_WIDTH];

        let start = (view.y + row) * canvas_width + view.x;
        let dst = &mut canvas[start..start + view.width];

        for (col, pixel) in dst.iter_mut().enumerate() {
            *pixel = src[col * FRAME_WIDTH / view.width];
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
