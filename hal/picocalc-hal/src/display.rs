//! Display flush abstraction
//!
//! The frame buffer itself belongs to the renderer. The core only asks the
//! panel driver to push a buffer out to glass.

/// Hardware flush primitive
///
/// Transfers the contents of a frame buffer of type `B` to the physical
/// display. Implementations may take as long as the bus needs; callers
/// hold the frame lock for the whole call.
pub trait FlushTarget<B: ?Sized> {
    /// Error type for a failed transfer
    type Error;

    /// Push `buffer` to the display
    fn flush(&mut self, buffer: &B) -> Result<(), Self::Error>;
}

impl<B: ?Sized, T: FlushTarget<B>> FlushTarget<B> for &mut T {
    type Error = T::Error;

    fn flush(&mut self, buffer: &B) -> Result<(), Self::Error> {
        T::flush(self, buffer)
    }
}
