//! Pipeline input: located measurements and the period they cover.

use std::fmt;

use chrono::NaiveDate;

use crate::error::PipelineError;

/// One gauge: a projected location and its accumulated measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    /// Planar `[x, y]` in projected units.
    pub coord: [f64; 2],
    pub value: f64,
}

impl SamplePoint {
    pub fn new(coord: [f64; 2], value: f64) -> Self {
        Self { coord, value }
    }
}

/// Accumulation period of a [`SampleSet`]: measurements dated after `start`
/// up to and including `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl ValidityWindow {
    /// # Errors
    ///
    /// [`PipelineError::InvalidWindow`] if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PipelineError> {
        if start > end {
            return Err(PipelineError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days covered, `end - start`.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Returns `true` if `date` falls in `(start, end]`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start < date && date <= self.end
    }
}

impl fmt::Display for ValidityWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// The samples to interpolate, optionally labelled with their period.
///
/// Coordinates need not be unique; coincident samples are averaged by the
/// estimator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    samples: Vec<SamplePoint>,
    window: Option<ValidityWindow>,
}

impl SampleSet {
    pub fn new(samples: Vec<SamplePoint>) -> Self {
        Self {
            samples,
            window: None,
        }
    }

    pub fn with_window(mut self, window: ValidityWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn samples(&self) -> &[SamplePoint] {
        &self.samples
    }

    pub fn window(&self) -> Option<ValidityWindow> {
        self.window
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample coordinates in input order.
    pub fn coords(&self) -> Vec<[f64; 2]> {
        self.samples.iter().map(|s| s.coord).collect()
    }

    /// Sample values in input order.
    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }
}

impl FromIterator<SamplePoint> for SampleSet {
    fn from_iter<I: IntoIterator<Item = SamplePoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
