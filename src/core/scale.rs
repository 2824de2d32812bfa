use crate::error::{ChartError, ChartResult};

/// Continuous linear mapping from a value domain onto a pixel range.
///
/// `range_start` receives `domain_start`; a vertical value axis passes the
/// plot bottom as `range_start` so larger values sit higher. Input outside
/// the domain is clamped, so the mapping never needs to be inverted for
/// out-of-domain values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        range_start: f64,
        range_end: f64,
    ) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if domain_start >= domain_end {
            return Err(ChartError::InvalidData(format!(
                "scale domain must be increasing: [{domain_start}, {domain_end}]"
            )));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn value_to_pixel(self, value: f64) -> f64 {
        let clamped = if value.is_nan() {
            self.domain_start
        } else {
            value.clamp(self.domain_start, self.domain_end)
        };
        let normalized = (clamped - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    /// Tick values at round step multiples inside the domain.
    #[must_use]
    pub fn ticks(self, tick_count: usize) -> Vec<f64> {
        let step = tick_step(self.domain_start, self.domain_end, tick_count);
        if step <= 0.0 {
            return vec![self.domain_start];
        }

        let first = (self.domain_start / step).ceil() as i64;
        let last = (self.domain_end / step).floor() as i64;
        (first..=last)
            .map(|index| {
                let value = index as f64 * step;
                // Avoids "-0" labels for the zero tick.
                if value == 0.0 { 0.0 } else { value }
            })
            .collect()
    }
}

/// Round step (1, 2 or 5 times a power of ten) splitting the span into about
/// `tick_count` intervals.
#[must_use]
pub fn tick_step(start: f64, stop: f64, tick_count: usize) -> f64 {
    let span = stop - start;
    if !span.is_finite() || span <= 0.0 {
        return 0.0;
    }

    let raw = span / tick_count.max(1) as f64;
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    power * factor
}

/// Recommended value-axis tick count for a pixel span.
#[must_use]
pub fn recommended_value_tick_count(pixel_span: f64) -> usize {
    if pixel_span < 150.0 {
        3
    } else if pixel_span < 300.0 {
        5
    } else {
        8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_step_picks_round_multiples() {
        assert_eq!(tick_step(0.0, 10.0, 5), 2.0);
        assert_eq!(tick_step(0.0, 100.0, 3), 50.0);
        assert!((tick_step(0.0, 1.0, 8) - 0.1).abs() < 1e-12);
        assert_eq!(tick_step(5.0, 5.0, 3), 0.0);
    }

    #[test]
    fn out_of_domain_values_are_clamped() {
        let scale = LinearScale::new(0.0, 10.0, 100.0, 0.0).expect("valid scale");
        assert_eq!(scale.value_to_pixel(-5.0), 100.0);
        assert_eq!(scale.value_to_pixel(15.0), 0.0);
        assert_eq!(scale.value_to_pixel(5.0), 50.0);
    }
}
