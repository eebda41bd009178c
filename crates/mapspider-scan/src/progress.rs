//! Scanned-area accounting over the irregular recursion tree.

/// Accumulates scanned area against a fixed total and reports a saturating
/// percentage.
///
/// The total is the bounding square of the initial circle (`4 * radius²`);
/// accepted regions credit their own bounding squares. Because sibling
/// circles overlap their parent square at the seams, the sum is an
/// approximation, so the percentage clamps: anything within one point of
/// 100 reports exactly 100. A fresh tracker is created per origin.
#[derive(Debug)]
pub struct ScanProgress {
    scanned_area: f64,
    total_area: f64,
}

/// Report 100 once the raw percentage is this close to it, absorbing
/// floating-point and overlap drift.
const PERCENTAGE_EPSILON: f64 = 1.0;

impl ScanProgress {
    #[must_use]
    pub fn new(total_area: f64) -> Self {
        Self {
            scanned_area: 0.0,
            total_area,
        }
    }

    /// Credits an accepted region's bounding-square area.
    pub fn note_scanned(&mut self, area: f64) {
        self.scanned_area += area;
    }

    /// Current progress in `[0, 100]`. Monotonic across a run since scanned
    /// area only grows.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.total_area <= 0.0 {
            return 100.0;
        }
        let percentage = self.scanned_area / self.total_area * 100.0;
        if percentage + PERCENTAGE_EPSILON >= 100.0 {
            100.0
        } else {
            percentage
        }
    }
}
