use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use edgewalk_core::{DEFAULT_ITERATIONS, Point, SamplerBuilder};
use tracing::{debug, warn};

use crate::errors::{ConfigError, MalformedLine};

/// Temperature used when the configuration has no `T=` line.
pub const DEFAULT_TEMPERATURE: f64 = 1.0;
/// Edge-cost coefficient used when the configuration has no `r=` line.
pub const DEFAULT_EDGE_COST: f64 = 1.0;

/// Vertex coordinates and run parameters read from a configuration.
///
/// Values are checked syntactically only; range checks such as a positive
/// temperature happen when the sampler is built.
///
/// # Examples
/// ```
/// use edgewalk_config::RunConfig;
///
/// let config = RunConfig::parse_str("# corners\nT=0.5\n0,0\n1, 0\n0,1\n")?;
/// assert_eq!(config.vertices().len(), 3);
/// assert_eq!(config.temperature(), 0.5);
/// assert_eq!(config.iterations(), 200);
/// # Ok::<(), edgewalk_config::ConfigError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RunConfig {
    vertices: Vec<Point>,
    temperature: f64,
    edge_cost: f64,
    iterations: u64,
}

impl RunConfig {
    /// Loads a configuration file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] when the file cannot be opened, and the
    /// errors of [`RunConfig::from_reader`] for its contents.
    pub fn load_path(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_reader(BufReader::new(file))?;
        debug!(
            path = %path.display(),
            vertices = config.vertices.len(),
            "loaded run configuration"
        );
        Ok(config)
    }

    /// Parses a configuration from any buffered reader.
    ///
    /// # Errors
    /// Returns [`ConfigError::Read`] on read failures,
    /// [`ConfigError::Malformed`] for unparseable lines, and
    /// [`ConfigError::NoVertices`] when no coordinates are listed.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, ConfigError> {
        let mut config = Self {
            vertices: Vec::new(),
            temperature: DEFAULT_TEMPERATURE,
            edge_cost: DEFAULT_EDGE_COST,
            iterations: DEFAULT_ITERATIONS,
        };
        for (index, line) in reader.lines().enumerate() {
            let number = index + 1;
            let line = line.map_err(|source| ConfigError::Read {
                line: number,
                source,
            })?;
            config
                .apply_line(line.trim(), number)
                .map_err(|kind| ConfigError::Malformed { line: number, kind })?;
        }
        if config.vertices.is_empty() {
            return Err(ConfigError::NoVertices);
        }
        Ok(config)
    }

    /// Parses a configuration held in memory.
    ///
    /// # Errors
    /// Returns the errors of [`RunConfig::from_reader`].
    pub fn parse_str(text: &str) -> Result<Self, ConfigError> {
        Self::from_reader(text.as_bytes())
    }

    fn apply_line(&mut self, line: &str, number: usize) -> Result<(), MalformedLine> {
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }
        match line.split_once('=') {
            Some((key, value)) => self.apply_setting(key.trim(), value.trim(), number),
            None => {
                self.vertices.push(parse_point(line)?);
                Ok(())
            }
        }
    }

    fn apply_setting(&mut self, key: &str, value: &str, number: usize) -> Result<(), MalformedLine> {
        match key {
            "T" => self.temperature = parse_float("T", value)?,
            "r" => self.edge_cost = parse_float("r", value)?,
            "iterations" => {
                self.iterations = value
                    .parse()
                    .map_err(|source| MalformedLine::Integer {
                        key: "iterations",
                        source,
                    })?;
            }
            unknown => warn!(key = unknown, line = number, "ignoring unknown configuration key"),
        }
        Ok(())
    }

    /// Vertex coordinates in input order.
    #[must_use]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Temperature `T`.
    #[must_use]
    #[rustfmt::skip]
    pub fn temperature(&self) -> f64 { self.temperature }

    /// Edge-cost coefficient `r`.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_cost(&self) -> f64 { self.edge_cost }

    /// Total iteration budget.
    #[must_use]
    #[rustfmt::skip]
    pub fn iterations(&self) -> u64 { self.iterations }

    /// Copies the run parameters onto `builder`.
    #[must_use]
    pub fn configure(&self, builder: SamplerBuilder) -> SamplerBuilder {
        builder
            .with_temperature(self.temperature)
            .with_edge_cost(self.edge_cost)
            .with_iterations(self.iterations)
    }
}

fn parse_float(key: &'static str, value: &str) -> Result<f64, MalformedLine> {
    value
        .parse()
        .map_err(|source| MalformedLine::Float { key, source })
}

fn parse_point(line: &str) -> Result<Point, MalformedLine> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [x, y] = fields.as_slice() else {
        return Err(MalformedLine::FieldCount {
            fields: fields.len(),
        });
    };
    Ok(Point::new(parse_coordinate(x)?, parse_coordinate(y)?))
}

fn parse_coordinate(raw: &str) -> Result<f64, MalformedLine> {
    raw.parse().map_err(|source| MalformedLine::Coordinate {
        raw: raw.to_owned(),
        source,
    })
}
