use crate::error::{ChartError, ChartResult};

/// Ordinal scale giving every category index an evenly spaced pixel band.
///
/// Bands are keyed by index rather than label so repeated labels stay
/// distinguishable. Spacing follows the classic `rangeBands` layout:
/// `step = span / (count - padding + 2 * outer_padding)`, with the first band
/// starting `step * outer_padding` into the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryBandScale {
    count: usize,
    first_band_start: f64,
    step: f64,
    band_width: f64,
}

impl CategoryBandScale {
    pub fn new(
        count: usize,
        range_start: f64,
        range_end: f64,
        padding: f64,
        outer_padding: f64,
    ) -> ChartResult<Self> {
        if count == 0 {
            return Err(ChartError::InvalidData(
                "category scale needs at least one category".to_owned(),
            ));
        }
        if !(0.0..1.0).contains(&padding) || !outer_padding.is_finite() || outer_padding < 0.0 {
            return Err(ChartError::InvalidData(
                "category padding must be in [0, 1) and outer padding >= 0".to_owned(),
            ));
        }
        let span = range_end - range_start;
        if !span.is_finite() || span <= 0.0 {
            return Err(ChartError::InvalidData(
                "category range must be finite and increasing".to_owned(),
            ));
        }

        let step = span / (count as f64 - padding + 2.0 * outer_padding);
        Ok(Self {
            count,
            first_band_start: range_start + step * outer_padding,
            step,
            band_width: step * (1.0 - padding),
        })
    }

    #[must_use]
    pub fn count(self) -> usize {
        self.count
    }

    /// Width of one painted band.
    #[must_use]
    pub fn band_width(self) -> f64 {
        self.band_width
    }

    /// Horizontal space allotted to one category, band plus inter-band gap.
    #[must_use]
    pub fn slot_width(self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn band_start(self, index: usize) -> Option<f64> {
        (index < self.count).then(|| self.first_band_start + index as f64 * self.step)
    }

    #[must_use]
    pub fn band_center(self, index: usize) -> Option<f64> {
        self.band_start(index)
            .map(|start| start + self.band_width * 0.5)
    }

    /// Index of the band covering `x`, `None` for gaps and outer padding.
    #[must_use]
    pub fn index_at(self, x: f64) -> Option<usize> {
        if !x.is_finite() || x < self.first_band_start {
            return None;
        }
        let offset = x - self.first_band_start;
        let index = (offset / self.step).floor() as usize;
        if index >= self.count {
            return None;
        }
        let within = offset - index as f64 * self.step;
        (within <= self.band_width).then_some(index)
    }
}
