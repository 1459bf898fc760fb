pub mod summary;

pub use summary::SweepSummary;

use crate::config::{SweepConfig, SweepConfigError};
use crate::grid::OccupancyGrid;
use crate::output;
use crate::placement::{GridPlacer, PlacementError, PlacementStats};
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::{error::Error, fmt};

/// One filled grid, handed to a sink before the grid is cleared.
#[derive(Clone, Copy, Debug)]
pub struct BenchmarkInstance<'a> {
    pub pins: usize,
    /// 1-based repetition index within this pin count.
    pub repetition: usize,
    pub grid: &'a OccupancyGrid,
    pub stats: PlacementStats,
}

impl BenchmarkInstance<'_> {
    pub fn stem(&self) -> String {
        output::instance_stem(self.grid.size(), self.pins, self.repetition)
    }
}

/// Consumer of generated instances.
pub trait InstanceSink {
    fn accept(&mut self, instance: &BenchmarkInstance<'_>) -> Result<(), SweepError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOperation {
    CreateDir,
    WriteBench,
    WriteImage,
}

impl fmt::Display for IoOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoOperation::CreateDir => write!(f, "create a directory"),
            IoOperation::WriteBench => write!(f, "create benchmark file"),
            IoOperation::WriteImage => write!(f, "create image file"),
        }
    }
}

#[derive(Debug)]
pub enum SweepError {
    Config(SweepConfigError),
    Placement {
        pins: usize,
        repetition: usize,
        source: PlacementError,
    },
    Io {
        operation: IoOperation,
        path: PathBuf,
        source: io::Error,
    },
}

impl SweepError {
    /// `true` for logic defects, as opposed to bad input or a failing filesystem.
    pub fn is_internal_fault(&self) -> bool {
        matches!(self, SweepError::Placement { source, .. } if source.is_internal_fault())
    }
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepError::Config(e) => write!(f, "{e}"),
            SweepError::Placement {
                pins,
                repetition,
                source,
            } => write!(f, "placement failed for M={pins} k={repetition}: {source}"),
            SweepError::Io {
                operation,
                path,
                source,
            } => write!(f, "Couldn't {operation} \"{}\": {source}", path.display()),
        }
    }
}

impl From<SweepConfigError> for SweepError {
    fn from(err: SweepConfigError) -> Self {
        SweepError::Config(err)
    }
}

impl Error for SweepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SweepError::Config(e) => Some(e),
            SweepError::Placement { source, .. } => Some(source),
            SweepError::Io { source, .. } => Some(source),
        }
    }
}

/// Writes the XML benchmark (and optionally the text image) of every instance.
pub struct FileSink {
    dir: PathBuf,
    write_image: bool,
    files_written: usize,
}

impl FileSink {
    /// Make sure `dir` exists, then write into it.
    pub fn create(dir: impl Into<PathBuf>, write_image: bool) -> Result<Self, SweepError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| SweepError::Io {
            operation: IoOperation::CreateDir,
            path: dir.clone(),
            source,
        })?;
        Ok(Self {
            dir,
            write_image,
            files_written: 0,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn files_written(&self) -> usize {
        self.files_written
    }

    fn write(
        &mut self,
        name: String,
        contents: &str,
        operation: IoOperation,
    ) -> Result<PathBuf, SweepError> {
        let path = self.dir.join(name);
        fs::write(&path, contents).map_err(|source| SweepError::Io {
            operation,
            path: path.clone(),
            source,
        })?;
        self.files_written += 1;
        Ok(path)
    }
}

impl InstanceSink for FileSink {
    fn accept(&mut self, instance: &BenchmarkInstance<'_>) -> Result<(), SweepError> {
        let stem = instance.stem();
        debug!(
            "{stem}: {} first-draw, {} redraws, {} probed",
            instance.stats.first_draw_hits,
            instance.stats.redraws,
            instance.stats.probe_fallbacks
        );
        let bench_path = self.write(
            output::bench_file_name(&stem),
            &output::render_bench(instance.grid),
            IoOperation::WriteBench,
        )?;
        if self.write_image {
            let image_path = self.write(
                output::image_file_name(&stem),
                &output::render_image(instance.grid),
                IoOperation::WriteImage,
            )?;
            info!(
                "Created \"{}\" and \"{}\"",
                bench_path.display(),
                image_path.display()
            );
        }
        Ok(())
    }
}

/// Drives the (M, k) sweep over a single grid and random stream.
pub struct BenchmarkSweep {
    config: SweepConfig,
    placer: GridPlacer<ChaCha12Rng>,
}

impl BenchmarkSweep {
    pub fn new(config: SweepConfig) -> Result<Self, SweepError> {
        config.validate()?;
        let placer = GridPlacer::new(config.grid_size, ChaCha12Rng::seed_from_u64(config.seed));
        Ok(Self { config, placer })
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Place, validate, hand off and clear, for every M in range and every repetition.
    ///
    /// The first error aborts the whole sweep.
    pub fn run<S: InstanceSink + ?Sized>(
        &mut self,
        sink: &mut S,
    ) -> Result<SweepSummary, SweepError> {
        info!(
            "Generating {} instances on a {n}x{n} grid",
            self.config.instance_count(),
            n = self.config.grid_size
        );
        let mut summary = SweepSummary::for_config(&self.config);
        for pins in self.config.min_pins..=self.config.max_pins {
            for repetition in 1..=self.config.repetitions {
                let stats = self
                    .placer
                    .place(pins)
                    .map_err(|source| SweepError::Placement {
                        pins,
                        repetition,
                        source,
                    })?;
                sink.accept(&BenchmarkInstance {
                    pins,
                    repetition,
                    grid: self.placer.grid(),
                    stats,
                })?;
                self.placer.clear();
                summary.instances += 1;
                summary.placement.accumulate(&stats);
            }
        }
        Ok(summary)
    }
}

/// Run a full sweep writing files into `config.output_dir`.
pub fn run_to_files(config: SweepConfig) -> Result<SweepSummary, SweepError> {
    let mut sweep = BenchmarkSweep::new(config)?;
    let mut sink = FileSink::create(sweep.config().output_dir(), sweep.config().print)?;
    let mut summary = sweep.run(&mut sink)?;
    summary.files_written = sink.files_written();
    info!(
        "Wrote {} files for {} instances into \"{}\"",
        summary.files_written,
        summary.instances,
        sink.dir().display()
    );
    Ok(summary)
}
