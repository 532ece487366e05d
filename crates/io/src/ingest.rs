//! Gauge locations and daily measurements from CSV, accumulated into a
//! [`SampleSet`].

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use chrono::{Days, NaiveDate};
use csv::StringRecord;
use rainmap_pipeline::{SamplePoint, SampleSet, ValidityWindow};
use tracing::{debug, info, warn};

use crate::error::{IoError, csv_error};
use crate::validate::ValidationCollector;

// ---------------------------------------------------------------------------
// IngestConfig
// ---------------------------------------------------------------------------

/// Column names and accumulation settings for gauge CSV files.
///
/// The defaults match the rain gauge network exports: a sites table with
/// `pasture`, `Easting_UTM`, `Northing_UTM` and a measurements table with
/// `site`, `date`, `raw.value` in millimetres, accumulated over the last
/// 7 days and converted to inches.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestConfig {
    /// Site name column in the sites file.
    site_column: String,
    /// Projected x column in the sites file.
    easting_column: String,
    /// Projected y column in the sites file.
    northing_column: String,
    /// Site name column in the measurements file.
    measurement_site_column: String,
    date_column: String,
    value_column: String,
    /// `chrono` format string for the date column.
    date_format: String,
    /// Length of the accumulation window ending at the latest date.
    window_days: u32,
    /// Accumulated sums are divided by this (25.4 converts mm to inches).
    unit_divisor: f64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            site_column: "pasture".into(),
            easting_column: "Easting_UTM".into(),
            northing_column: "Northing_UTM".into(),
            measurement_site_column: "site".into(),
            date_column: "date".into(),
            value_column: "raw.value".into(),
            date_format: "%Y-%m-%d".into(),
            window_days: 7,
            unit_divisor: 25.4,
        }
    }
}

impl IngestConfig {
    /// Set the site name, easting and northing columns of the sites file.
    pub fn with_site_columns(
        mut self,
        name: impl Into<String>,
        easting: impl Into<String>,
        northing: impl Into<String>,
    ) -> Self {
        self.site_column = name.into();
        self.easting_column = easting.into();
        self.northing_column = northing.into();
        self
    }

    /// Set the site, date and value columns of the measurements file.
    pub fn with_measurement_columns(
        mut self,
        site: impl Into<String>,
        date: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.measurement_site_column = site.into();
        self.date_column = date.into();
        self.value_column = value.into();
        self
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    pub fn with_window_days(mut self, days: u32) -> Self {
        self.window_days = days;
        self
    }

    pub fn with_unit_divisor(mut self, divisor: f64) -> Self {
        self.unit_divisor = divisor;
        self
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    pub fn unit_divisor(&self) -> f64 {
        self.unit_divisor
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing every problem: a zero-day
    /// window, a non-positive or non-finite unit divisor, or an empty column
    /// name.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut c = ValidationCollector::new();
        if self.window_days == 0 {
            c.push("window_days must be at least 1");
        }
        if !self.unit_divisor.is_finite() || self.unit_divisor <= 0.0 {
            c.push(format!(
                "unit_divisor must be finite and positive, got {}",
                self.unit_divisor
            ));
        }
        for (what, name) in [
            ("site column", &self.site_column),
            ("easting column", &self.easting_column),
            ("northing column", &self.northing_column),
            ("measurement site column", &self.measurement_site_column),
            ("date column", &self.date_column),
            ("value column", &self.value_column),
        ] {
            if name.trim().is_empty() {
                c.push(format!("{what} name is empty"));
            }
        }
        c.finish()
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A gauge site. `location` is `None` when either coordinate is blank.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub name: String,
    pub location: Option<[f64; 2]>,
}

/// One dated reading at a named site, in source units.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub site: String,
    pub date: NaiveDate,
    pub value: f64,
    /// 1-based line in the source file, for error messages.
    pub line: u64,
}

// ---------------------------------------------------------------------------
// Readers
// ---------------------------------------------------------------------------

/// Reads the sites table.
///
/// Rows with a blank name are skipped with a warning. Blank or `NA`
/// coordinates leave the site without a location.
///
/// # Errors
///
/// [`IoError::FileNotFound`], [`IoError::MissingColumn`], [`IoError::Csv`],
/// or [`IoError::Parse`] for a malformed coordinate.
pub fn read_sites(path: &Path, config: &IngestConfig) -> Result<Vec<Site>, IoError> {
    config.validate()?;
    let mut reader = open(path)?;
    let headers = reader.headers().map_err(|e| csv_error(path, e))?.clone();
    let name_col = column(&headers, &config.site_column, path)?;
    let x_col = column(&headers, &config.easting_column, path)?;
    let y_col = column(&headers, &config.northing_column, path)?;

    let mut sites = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(path, e))?;
        let line = line_of(&record);

        let name = field(&record, name_col);
        if name.is_empty() {
            warn!(path = %path.display(), line, "skipping site row without a name");
            continue;
        }
        let x = parse_optional_f64(&record, x_col, &config.easting_column, path)?;
        let y = parse_optional_f64(&record, y_col, &config.northing_column, path)?;
        let location = match (x, y) {
            (Some(x), Some(y)) => Some([x, y]),
            _ => None,
        };
        sites.push(Site {
            name: name.to_string(),
            location,
        });
    }

    debug!(path = %path.display(), n_sites = sites.len(), "read sites");
    Ok(sites)
}

/// Reads the measurements table.
///
/// Rows with a blank or `NA` value are skipped with a warning.
///
/// # Errors
///
/// [`IoError::FileNotFound`], [`IoError::MissingColumn`], [`IoError::Csv`],
/// or [`IoError::Parse`] for a malformed date or value.
pub fn read_measurements(path: &Path, config: &IngestConfig) -> Result<Vec<Measurement>, IoError> {
    config.validate()?;
    let mut reader = open(path)?;
    let headers = reader.headers().map_err(|e| csv_error(path, e))?.clone();
    let site_col = column(&headers, &config.measurement_site_column, path)?;
    let date_col = column(&headers, &config.date_column, path)?;
    let value_col = column(&headers, &config.value_column, path)?;

    let mut measurements = Vec::new();
    let mut n_skipped = 0usize;
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(path, e))?;
        let line = line_of(&record);
        let site = field(&record, site_col);

        let Some(value) = parse_optional_f64(&record, value_col, &config.value_column, path)?
        else {
            warn!(path = %path.display(), line, site, "skipping measurement without a value");
            n_skipped += 1;
            continue;
        };

        let raw_date = field(&record, date_col);
        let date = NaiveDate::parse_from_str(raw_date, &config.date_format).map_err(|e| {
            IoError::Parse {
                path: path.to_path_buf(),
                line,
                column: config.date_column.clone(),
                value: raw_date.to_string(),
                reason: e.to_string(),
            }
        })?;

        measurements.push(Measurement {
            site: site.to_string(),
            date,
            value,
            line,
        });
    }

    debug!(
        path = %path.display(),
        n_measurements = measurements.len(),
        n_skipped,
        "read measurements"
    );
    Ok(measurements)
}

// ---------------------------------------------------------------------------
// accumulate
// ---------------------------------------------------------------------------

/// Sums each site's measurements over the window ending at the latest date
/// and joins the sums to site locations.
///
/// The window is `(end - window_days, end]` where `end` is the latest
/// measurement date. Sums are divided by the unit divisor. Samples are
/// ordered by site name. Sites without a location, or missing from the
/// sites table, are skipped with a warning. Sites whose readings all fall
/// outside the window contribute no sample.
///
/// # Errors
///
/// - [`IoError::EmptyInput`] if `measurements` is empty.
/// - [`IoError::Validation`] listing every negative reading.
pub fn accumulate(
    sites: &[Site],
    measurements: &[Measurement],
    config: &IngestConfig,
) -> Result<SampleSet, IoError> {
    config.validate()?;

    let Some(end) = measurements.iter().map(|m| m.date).max() else {
        return Err(IoError::EmptyInput {
            reason: "no measurements".to_string(),
        });
    };

    let mut c = ValidationCollector::new();
    for m in measurements.iter().filter(|m| m.value < 0.0) {
        c.push(format!(
            "negative value at line {} (site {}): {}",
            m.line, m.site, m.value
        ));
    }
    c.finish()?;

    let start = end
        .checked_sub_days(Days::new(u64::from(config.window_days)))
        .ok_or_else(|| IoError::Validation {
            count: 1,
            details: format!("window of {} days before {end} is out of range", config.window_days),
        })?;
    let window = ValidityWindow::new(start, end)?;

    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
    for m in measurements.iter().filter(|m| window.contains(m.date)) {
        *sums.entry(m.site.as_str()).or_insert(0.0) += m.value;
    }

    let mut locations: HashMap<&str, Option<[f64; 2]>> = HashMap::with_capacity(sites.len());
    for site in sites {
        if locations.contains_key(site.name.as_str()) {
            warn!(site = %site.name, "duplicate site; keeping the first row");
            continue;
        }
        locations.insert(site.name.as_str(), site.location);
    }

    let mut samples = Vec::with_capacity(sums.len());
    for (name, sum) in sums {
        match locations.get(name) {
            Some(Some(coord)) => {
                samples.push(SamplePoint::new(*coord, sum / config.unit_divisor));
            }
            Some(None) => warn!(site = name, "skipping site without a location"),
            None => warn!(site = name, "skipping site missing from the sites table"),
        }
    }

    info!(
        %window,
        n_measurements = measurements.len(),
        n_samples = samples.len(),
        "accumulated measurements"
    );
    Ok(SampleSet::new(samples).with_window(window))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn open(path: &Path) -> Result<csv::Reader<std::fs::File>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| csv_error(path, e))
}

fn column(headers: &StringRecord, name: &str, path: &Path) -> Result<usize, IoError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| IoError::MissingColumn {
            name: name.to_string(),
            path: path.to_path_buf(),
        })
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}

fn field(record: &StringRecord, col: usize) -> &str {
    record.get(col).unwrap_or("")
}

/// Blank, `NA` and non-finite fields are missing.
fn parse_optional_f64(
    record: &StringRecord,
    col: usize,
    column: &str,
    path: &Path,
) -> Result<Option<f64>, IoError> {
    let raw = field(record, col);
    if raw.is_empty() || raw.eq_ignore_ascii_case("na") {
        return Ok(None);
    }
    let value: f64 = raw.parse().map_err(|e: std::num::ParseFloatError| IoError::Parse {
        path: path.to_path_buf(),
        line: line_of(record),
        column: column.to_string(),
        value: raw.to_string(),
        reason: e.to_string(),
    })?;
    Ok(Some(value).filter(|v| v.is_finite()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn site(name: &str, location: Option<[f64; 2]>) -> Site {
        Site {
            name: name.to_string(),
            location,
        }
    }

    fn reading(site: &str, day: u32, value: f64) -> Measurement {
        Measurement {
            site: site.to_string(),
            date: date(2021, 6, day),
            value,
            line: u64::from(day) + 1,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(IngestConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_collects_all_problems() {
        let cfg = IngestConfig::default()
            .with_window_days(0)
            .with_unit_divisor(0.0)
            .with_measurement_columns("", "date", "raw.value");
        match cfg.validate().unwrap_err() {
            IoError::Validation { count, details } => {
                assert_eq!(count, 3);
                assert!(details.contains("window_days"));
                assert!(details.contains("unit_divisor"));
                assert!(details.contains("measurement site column"));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_accumulate_window_is_half_open() {
        let sites = [site("A", Some([0.0, 0.0]))];
        // end = June 10, window (June 3, June 10]
        let ms = [
            reading("A", 3, 100.0),
            reading("A", 4, 25.4),
            reading("A", 10, 25.4),
        ];
        let set = accumulate(&sites, &ms, &IngestConfig::default()).unwrap();
        assert_eq!(set.len(), 1);
        assert_abs_diff_eq!(set.samples()[0].value, 2.0, epsilon = 1e-12);

        let w = set.window().unwrap();
        assert_eq!(w.start(), date(2021, 6, 3));
        assert_eq!(w.end(), date(2021, 6, 10));
    }

    #[test]
    fn test_accumulate_orders_by_site_name() {
        let sites = [
            site("b", Some([2.0, 2.0])),
            site("a", Some([1.0, 1.0])),
            site("c", Some([3.0, 3.0])),
        ];
        let ms = [reading("c", 9, 3.0), reading("a", 9, 1.0), reading("b", 9, 2.0)];
        let cfg = IngestConfig::default().with_unit_divisor(1.0);
        let set = accumulate(&sites, &ms, &cfg).unwrap();
        assert_eq!(set.coords(), vec![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]]);
        assert_eq!(set.values(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_accumulate_skips_unlocated_sites() {
        let sites = [site("A", Some([0.0, 0.0])), site("B", None)];
        let ms = [reading("A", 9, 1.0), reading("B", 9, 1.0), reading("Z", 9, 1.0)];
        let set = accumulate(&sites, &ms, &IngestConfig::default()).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_accumulate_site_outside_window_contributes_nothing() {
        let sites = [site("A", Some([0.0, 0.0])), site("B", Some([1.0, 1.0]))];
        let ms = [reading("A", 1, 5.0), reading("B", 20, 5.0)];
        let set = accumulate(&sites, &ms, &IngestConfig::default()).unwrap();
        assert_eq!(set.coords(), vec![[1.0, 1.0]]);
    }

    #[test]
    fn test_accumulate_zero_readings_are_kept() {
        let sites = [site("A", Some([0.0, 0.0]))];
        let ms = [reading("A", 9, 0.0)];
        let set = accumulate(&sites, &ms, &IngestConfig::default()).unwrap();
        assert_eq!(set.values(), vec![0.0]);
    }

    #[test]
    fn test_accumulate_custom_window() {
        let sites = [site("A", Some([0.0, 0.0]))];
        let ms = [reading("A", 1, 1.0), reading("A", 5, 1.0), reading("A", 10, 1.0)];
        let cfg = IngestConfig::default()
            .with_window_days(21)
            .with_unit_divisor(1.0);
        let set = accumulate(&sites, &ms, &cfg).unwrap();
        assert_eq!(set.values(), vec![3.0]);
        assert_eq!(set.window().unwrap().days(), 21);
    }

    #[test]
    fn test_accumulate_rejects_negative() {
        let sites = [site("A", Some([0.0, 0.0]))];
        let ms = [reading("A", 8, -1.0), reading("A", 9, 2.0), reading("A", 10, -0.5)];
        match accumulate(&sites, &ms, &IngestConfig::default()).unwrap_err() {
            IoError::Validation { count, details } => {
                assert_eq!(count, 2);
                assert!(details.contains("line 9"));
                assert!(details.contains("-0.5"));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_accumulate_empty() {
        let sites = [site("A", Some([0.0, 0.0]))];
        assert!(matches!(
            accumulate(&sites, &[], &IngestConfig::default()),
            Err(IoError::EmptyInput { .. })
        ));
    }
}
