//! Window-width breakpoints shared by the site layouts.

/// Pixels per rem used for the breakpoint table.
pub const REM_PX: u32 = 16;

/// Named layout breakpoints, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Breakpoint {
    /// From 24rem.
    Xs,
    /// From 27rem.
    Sm,
    /// From 45rem.
    Md,
    /// From 64rem.
    Lg,
}

impl Breakpoint {
    /// All breakpoints, smallest first.
    pub const ALL: [Breakpoint; 4] = [Breakpoint::Xs, Breakpoint::Sm, Breakpoint::Md, Breakpoint::Lg];

    /// Minimum width in rem.
    pub const fn min_width_rem(self) -> u32 {
        match self {
            Breakpoint::Xs => 24,
            Breakpoint::Sm => 27,
            Breakpoint::Md => 45,
            Breakpoint::Lg => 64,
        }
    }

    /// Minimum width in pixels.
    pub const fn min_width_px(self) -> u32 {
        self.min_width_rem() * REM_PX
    }

    /// Returns the largest breakpoint that applies at `width_px`.
    ///
    /// Widths narrower than [`Breakpoint::Xs`] match none.
    pub fn for_width(width_px: u32) -> Option<Breakpoint> {
        Self::ALL
            .into_iter()
            .rev()
            .find(|bp| width_px >= bp.min_width_px())
    }
}
