//! Preset anchor positions for auto-cycle mode
//!
//! Anchors are fractions of the canvas extents so the same table works for
//! any surface size. A preset either jumps straight to an anchor or sweeps
//! between two anchors in two consecutive hops.

use crate::cursor::types::CanvasSize;

/// Canvas-relative position, both axes in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub fx: f32,
    pub fy: f32,
}

impl Anchor {
    pub const fn new(fx: f32, fy: f32) -> Self {
        Self { fx, fy }
    }

    /// Resolve to render-target pixels
    pub fn resolve(&self, canvas: CanvasSize) -> (f32, f32) {
        (self.fx * canvas.width, self.fy * canvas.height)
    }
}

/// One entry of the preset table
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PresetMove {
    /// Single update to the anchor
    Jump(Anchor),
    /// Two updates: first to `from`, then immediately to `to`.
    ///
    /// The first hop is overwritten by the second, so the shader sees
    /// `previous = from` and `current = to` and animates the sweep between them.
    Sweep { from: Anchor, to: Anchor },
}

impl PresetMove {
    /// Anchors visited, in order
    pub fn hops(&self) -> Vec<Anchor> {
        match *self {
            PresetMove::Jump(to) => vec![to],
            PresetMove::Sweep { from, to } => vec![from, to],
        }
    }
}

const LOW: f32 = 0.1;
const HIGH: f32 = 0.9;

/// Corners at 10%/90% of the canvas, with sweeps along the top and bottom rows
pub const DEFAULT_PRESETS: &[PresetMove] = &[
    PresetMove::Jump(Anchor::new(LOW, HIGH)),
    PresetMove::Jump(Anchor::new(HIGH, HIGH)),
    PresetMove::Sweep {
        from: Anchor::new(LOW, HIGH),
        to: Anchor::new(HIGH, LOW),
    },
    PresetMove::Jump(Anchor::new(LOW, LOW)),
    PresetMove::Sweep {
        from: Anchor::new(LOW, LOW),
        to: Anchor::new(HIGH, LOW),
    },
    PresetMove::Jump(Anchor::new(0.5, 0.5)),
];

/// Cyclic index into a preset table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetCursor {
    index: usize,
    count: usize,
}

impl PresetCursor {
    /// Returns `None` for an empty table
    pub fn new(count: usize) -> Option<Self> {
        (count > 0).then_some(Self { index: 0, count })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Step by `delta` with wrap-around in both directions
    pub fn advance(&mut self, delta: i32) -> usize {
        let count = self.count as i64;
        // Euclidean remainder keeps negative steps in range
        self.index = (self.index as i64 + delta as i64).rem_euclid(count) as usize;
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_has_no_cursor() {
        assert!(PresetCursor::new(0).is_none());
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let count = DEFAULT_PRESETS.len();
        for start in 0..count {
            let mut cursor = PresetCursor::new(count).unwrap();
            cursor.advance(start as i32);
            assert_eq!(cursor.index(), start);

            for _ in 0..count {
                cursor.advance(1);
            }
            assert_eq!(cursor.index(), start, "cycle from {} did not return", start);
        }
    }

    #[test]
    fn test_negative_step_from_zero_wraps_to_last() {
        let mut cursor = PresetCursor::new(6).unwrap();
        assert_eq!(cursor.advance(-1), 5);
        assert_eq!(cursor.advance(-1), 4);
    }

    #[test]
    fn test_large_negative_step_stays_in_range() {
        let mut cursor = PresetCursor::new(4).unwrap();
        assert_eq!(cursor.advance(-9), 3);
    }

    #[test]
    fn test_anchor_resolves_against_canvas() {
        let (x, y) = Anchor::new(0.1, 0.9).resolve(CanvasSize::new(300.0, 200.0));
        assert!((x - 30.0).abs() < 1e-4);
        assert!((y - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_sweep_has_two_hops() {
        let sweep = PresetMove::Sweep {
            from: Anchor::new(0.0, 0.0),
            to: Anchor::new(1.0, 1.0),
        };
        assert_eq!(sweep.hops().len(), 2);
        assert_eq!(PresetMove::Jump(Anchor::new(0.5, 0.5)).hops().len(), 1);
    }
}
