use std::path::{Path, PathBuf};
use std::{error::Error, fmt};

/// Everything one sweep needs, built once from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SweepConfig {
    pub grid_size: usize,
    pub min_pins: usize,
    pub max_pins: usize,
    pub repetitions: usize,
    pub seed: u64,
    /// Also write the text image of each grid and log progress.
    pub print: bool,
    pub output_dir: PathBuf,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            grid_size: 50,
            min_pins: 5,
            max_pins: 30,
            repetitions: 1,
            seed: 0,
            print: false,
            output_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepConfigError {
    ArgumentCount(usize),
    InvalidGridSize(String),
    GridSizeOverflow(usize),
    InvalidMinPins(String),
    InvalidMaxPins(String),
    InvalidRepetitions(String),
    MalformedOption { key: char, raw: String },
    DuplicateOption { key: char, raw: String },
    UnknownOption(String),
    InvalidSeed(String),
    InvalidPrintFlag(String),
    EmptyOutputDir,
}

impl fmt::Display for SweepConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepConfigError::ArgumentCount(n) => write!(f, "Wrong amount of arguments: {n}"),
            SweepConfigError::InvalidGridSize(raw) => write!(f, "Wrong parameter N = \"{raw}\""),
            SweepConfigError::GridSizeOverflow(n) => {
                write!(f, "Wrong parameter N = \"{n}\" (N * N overflows)")
            }
            SweepConfigError::InvalidMinPins(raw) => {
                write!(f, "Wrong parameter M_min = \"{raw}\"")
            }
            SweepConfigError::InvalidMaxPins(raw) => {
                write!(f, "Wrong parameter M_max = \"{raw}\"")
            }
            SweepConfigError::InvalidRepetitions(raw) => write!(f, "Wrong parameter K = \"{raw}\""),
            SweepConfigError::MalformedOption { key, raw } => {
                write!(f, "Wrong parameter (probably {key}): \"{raw}\"")
            }
            SweepConfigError::DuplicateOption { key, raw } => {
                write!(f, "Multiple parameters ({key}): \"{raw}\"")
            }
            SweepConfigError::UnknownOption(raw) => write!(f, "Wrong parameter: \"{raw}\""),
            SweepConfigError::InvalidSeed(raw) => write!(f, "Wrong parameter S = \"{raw}\""),
            SweepConfigError::InvalidPrintFlag(raw) => write!(f, "Wrong parameter P = \"{raw}\""),
            SweepConfigError::EmptyOutputDir => write!(f, "Wrong parameter D (empty)"),
        }
    }
}

impl Error for SweepConfigError {}

/// Usage screen printed after every argument error.
pub const USAGE: &str = "\
Use:  PROG N M_min M_max K [S=...] [P=...] [D=...]
N - grid size (N > 0) [50]
M_min - min number of terminals (M_min > 0) [5]
M_max - max number of terminals ((M_max >= M_min) && (M_max <= N * N)) [30]
K - number of benchmarks to generate for each M (K > 0) [1]
S - (optional) seed for random generator [S=12345]
P - (optional) print and log additional info (P = 0;1) [P=1]
D - (optional) output directory for benchmarks [D=./my_dir]";

/// Raw positional arguments, exactly as typed.
#[derive(Clone, Copy, Debug)]
pub struct PositionalArgs<'a> {
    pub grid_size: &'a str,
    pub min_pins: &'a str,
    pub max_pins: &'a str,
    pub repetitions: &'a str,
}

impl SweepConfig {
    pub const MAX_OPTIONS: usize = 3;

    /// Parse the `N M_min M_max K [S=..] [P=..] [D=..]` grammar.
    ///
    /// `default_seed` is used when no `S=` option is given.
    pub fn from_cli<S: AsRef<str>>(
        positional: PositionalArgs<'_>,
        options: &[S],
        default_seed: u64,
    ) -> Result<Self, SweepConfigError> {
        if options.len() > Self::MAX_OPTIONS {
            return Err(SweepConfigError::ArgumentCount(4 + options.len()));
        }

        let grid_size = parse_positive(positional.grid_size)
            .ok_or_else(|| SweepConfigError::InvalidGridSize(positional.grid_size.to_owned()))?;
        let cell_count = grid_size
            .checked_mul(grid_size)
            .ok_or(SweepConfigError::GridSizeOverflow(grid_size))?;
        let min_pins = parse_positive(positional.min_pins)
            .ok_or_else(|| SweepConfigError::InvalidMinPins(positional.min_pins.to_owned()))?;
        let max_pins = parse_positive(positional.max_pins)
            .filter(|&m| m >= min_pins && m <= cell_count)
            .ok_or_else(|| SweepConfigError::InvalidMaxPins(positional.max_pins.to_owned()))?;
        let repetitions = parse_positive(positional.repetitions).ok_or_else(|| {
            SweepConfigError::InvalidRepetitions(positional.repetitions.to_owned())
        })?;

        let mut seed = None;
        let mut print = None;
        let mut output_dir = None;
        for raw in options {
            let raw = raw.as_ref();
            let mut chars = raw.chars();
            let key = match chars.next() {
                Some(k @ ('S' | 'P' | 'D')) => k,
                _ => return Err(SweepConfigError::UnknownOption(raw.to_owned())),
            };
            let value = chars
                .as_str()
                .strip_prefix('=')
                .ok_or_else(|| SweepConfigError::MalformedOption {
                    key,
                    raw: raw.to_owned(),
                })?;
            let already_set = match key {
                'S' => seed.is_some(),
                'P' => print.is_some(),
                _ => output_dir.is_some(),
            };
            if already_set {
                return Err(SweepConfigError::DuplicateOption {
                    key,
                    raw: raw.to_owned(),
                });
            }
            match key {
                'S' => {
                    seed = Some(
                        value
                            .parse::<u64>()
                            .map_err(|_| SweepConfigError::InvalidSeed(value.to_owned()))?,
                    )
                }
                'P' => {
                    print = Some(match value {
                        "0" => false,
                        "1" => true,
                        _ => return Err(SweepConfigError::InvalidPrintFlag(value.to_owned())),
                    })
                }
                _ => output_dir = Some(parse_output_dir(value)?),
            }
        }

        let config = Self {
            grid_size,
            min_pins,
            max_pins,
            repetitions,
            seed: seed.unwrap_or(default_seed),
            print: print.unwrap_or(false),
            output_dir: output_dir.unwrap_or_else(|| PathBuf::from(".")),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SweepConfigError> {
        if self.grid_size == 0 {
            return Err(SweepConfigError::InvalidGridSize(self.grid_size.to_string()));
        }
        let cell_count = self.cell_count()?;
        if self.min_pins == 0 {
            return Err(SweepConfigError::InvalidMinPins(self.min_pins.to_string()));
        }
        if self.max_pins < self.min_pins || self.max_pins > cell_count {
            return Err(SweepConfigError::InvalidMaxPins(self.max_pins.to_string()));
        }
        if self.repetitions == 0 {
            return Err(SweepConfigError::InvalidRepetitions(
                self.repetitions.to_string(),
            ));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(SweepConfigError::EmptyOutputDir);
        }
        Ok(())
    }

    pub fn cell_count(&self) -> Result<usize, SweepConfigError> {
        self.grid_size
            .checked_mul(self.grid_size)
            .ok_or(SweepConfigError::GridSizeOverflow(self.grid_size))
    }

    /// Number of benchmark instances the sweep will produce.
    pub fn instance_count(&self) -> usize {
        (self.max_pins.saturating_sub(self.min_pins) + 1).saturating_mul(self.repetitions)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

fn parse_positive(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|&v| v > 0)
}

fn parse_output_dir(value: &str) -> Result<PathBuf, SweepConfigError> {
    let trimmed = value
        .strip_suffix('/')
        .or_else(|| value.strip_suffix('\\'))
        .unwrap_or(value);
    if trimmed.is_empty() {
        return Err(SweepConfigError::EmptyOutputDir);
    }
    Ok(PathBuf::from(trimmed))
}
