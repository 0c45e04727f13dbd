use crate::display::Bitmap;
use crate::render::win_cross;

use fugit::MicrosDurationU32;

pub trait Animation {
    /// Renders the next frame of the animation into `frame` and returns the duration this frame should be displayed for,
    /// or `None` once the animation has finished.
    ///
    /// `frame` is handed over dark. A frame that stays dark means the display should be cleared.
    fn render_frame(&mut self, frame: &mut Bitmap) -> Option<MicrosDurationU32>;
}

/// Alternates the diagonal cross with a dark screen for a fixed number of cycles.
pub struct WinFlash {
    cycles_left: u8,
    cross_next: bool,
    on: MicrosDurationU32,
    off: MicrosDurationU32,
}

impl WinFlash {
    pub fn new(cycles: u8, on: MicrosDurationU32, off: MicrosDurationU32) -> Self {
        Self {
            cycles_left: cycles,
            cross_next: true,
            on,
            off,
        }
    }
}

impl Animation for WinFlash {
    fn render_frame(&mut self, frame: &mut Bitmap) -> Option<MicrosDurationU32> {
        if self.cycles_left == 0 {
            return None;
        }

        frame.clear();
        if self.cross_next {
            *frame = win_cross();
            self.cross_next = false;
            Some(self.on)
        } else {
            self.cross_next = true;
            self.cycles_left -= 1;
            Some(self.off)
        }
    }
}
