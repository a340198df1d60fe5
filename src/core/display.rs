//=========================================================================
// Display Backend Interface
//=========================================================================
//
// The capabilities the frame presenter drives on the presentation thread.
//
// Defines the contract between the frame channel and whatever actually
// puts pixels on screen, so the presenter can be exercised without a
// window and the backend can be swapped without touching core code.
//
// Call sequence per presented frame:
//   update_texture(pixels) → clear() → copy() → flip()
//
// A backend must only be used on the thread that created it.
//
//=========================================================================

//=== DisplayBackend ======================================================

/// Texture-and-flip style presentation target.
pub trait DisplayBackend {
    /// False until the window, surface and texture all exist.
    ///
    /// The presenter treats a backend that is not ready as absent and
    /// does nothing.
    fn is_ready(&self) -> bool;

    /// Replaces the texture contents with one full frame of packed pixels.
    fn update_texture(&mut self, pixels: &[u32]);

    /// Clears the render target.
    fn clear(&mut self);

    /// Copies the texture onto the render target, scaled to fit.
    fn copy(&mut self);

    /// Shows the render target.
    fn flip(&mut self) -> Result<(), DisplayError>;
}

//=== DisplayError ========================================================

/// Presentation surface errors.
///
/// Never fatal: a failed flip drops one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayError {
    /// Surface or context creation failed.
    SurfaceCreation(String),

    /// Resizing the surface failed.
    Resize(String),

    /// Acquiring or presenting the surface buffer failed.
    Present(String),
}

impl std::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SurfaceCreation(e) => write!(f, "Surface creation failed: {}", e),
            Self::Resize(e) => write!(f, "Surface resize failed: {}", e),
            Self::Present(e) => write!(f, "Surface present failed: {}", e),
        }
    }
}

impl std::error::Error for DisplayError {}

//=========================================================================
// Unit Tests
//=========================================================================
