//! External, non-recurrent spike sources injected into the column, the
//! routing table that dispatches each drive kind to its receptor subset and
//! source identifier scheme, and deterministic event time generation for
//! each synthetic source.

use std::collections::HashMap;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Normal};
use crate::cell::CellClass;


/// External drive classes
#[derive(Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum DriveKind {
    /// Rhythmic evoked drive onto proximal receptor groups
    EvokedProximal,
    /// Rhythmic evoked drive onto distal receptor groups
    EvokedDistal,
    /// Single Gaussian timed event per target cell
    Gaussian,
    /// Poisson spike train per target cell
    Poisson,
}

impl DriveKind {
    /// Converts the kind to its drive tag
    pub fn to_str(&self) -> &str {
        match self {
            DriveKind::EvokedProximal => "evprox",
            DriveKind::EvokedDistal => "evdist",
            DriveKind::Gaussian => "extgauss",
            DriveKind::Poisson => "extpois",
        }
    }
}

/// Receptor site group a drive is eligible to reach on a target cell
#[derive(Hash, PartialEq, Eq, Clone, Copy, Debug)]
pub enum TargetLocus {
    /// Basal and oblique dendrite group
    Proximal,
    /// Apical tuft group
    Distal,
}

/// How synthetic source identifiers are allocated within a drive's range
#[derive(Hash, PartialEq, Eq, Clone, Copy, Debug)]
pub enum SourceScheme {
    /// One synthetic source per trial, shared by every target cell
    Shared,
    /// One synthetic source per target cell, offset by the range start
    PerTarget,
}

/// Whether the slow excitatory path of a drive is materialized
#[derive(Hash, PartialEq, Eq, Clone, Copy, Debug)]
pub enum SlowPolicy {
    /// Always created, even at zero weight
    Always,
    /// Never created
    Never,
    /// Created only when the configured weight is strictly positive
    WhenPositive,
}

/// Routing entry of one drive kind, receptor subset, identifier scheme, and
/// slow path policy
#[derive(Debug, Clone, Copy)]
pub struct DriveRoute {
    pub locus: TargetLocus,
    pub scheme: SourceScheme,
    pub slow: SlowPolicy,
}

/// Routing table dispatching each drive kind, extending the network with a
/// new drive kind is a change to this table rather than to the wiring code
pub fn drive_route(kind: DriveKind) -> DriveRoute {
    match kind {
        DriveKind::EvokedProximal => DriveRoute {
            locus: TargetLocus::Proximal,
            scheme: SourceScheme::Shared,
            slow: SlowPolicy::Always,
        },
        DriveKind::EvokedDistal => DriveRoute {
            locus: TargetLocus::Distal,
            scheme: SourceScheme::Shared,
            slow: SlowPolicy::Always,
        },
        DriveKind::Gaussian => DriveRoute {
            locus: TargetLocus::Proximal,
            scheme: SourceScheme::PerTarget,
            slow: SlowPolicy::Never,
        },
        DriveKind::Poisson => DriveRoute {
            locus: TargetLocus::Proximal,
            scheme: SourceScheme::PerTarget,
            slow: SlowPolicy::WhenPositive,
        },
    }
}

/// Per-population strength of a drive
#[derive(Debug, Clone, Copy)]
pub struct DriveStrength {
    /// Fast excitatory weight (uS)
    pub ampa_weight: f32,
    /// Slow excitatory weight (uS)
    pub nmda_weight: f32,
    /// Base delay before distance scaling (ms)
    pub delay: f32,
}

/// Event timing model of a drive
#[derive(Debug, Clone, Copy)]
pub enum DriveTiming {
    /// Bursts of events at a fixed frequency with Gaussian jitter per event
    Rhythmic {
        /// First burst time (ms)
        start: f32,
        /// No events at or past this time (ms)
        stop: f32,
        /// Burst frequency (Hz)
        burst_frequency: f32,
        /// Standard deviation of event jitter (ms)
        jitter: f32,
        /// Events per burst
        events_per_burst: usize,
    },
    /// A single Gaussian timed event
    Single {
        /// Mean event time (ms)
        mean: f32,
        /// Standard deviation of the event time (ms)
        stdev: f32,
    },
    /// Exponential inter-arrival spike train
    PoissonTrain {
        /// Train onset (ms)
        start: f32,
        /// Train end (ms)
        stop: f32,
        /// Mean rate (Hz)
        rate: f32,
    },
}

/// Full specification of one external drive
#[derive(Debug, Clone)]
pub struct DriveSpec {
    /// Unique drive name, also the key of its source identifier range
    pub name: String,
    /// Drive kind dispatched through [`drive_route`]
    pub kind: DriveKind,
    /// Spatial origin of the drive (um)
    pub position: [f32; 3],
    /// Spatial decay constant of the drive's connections
    pub lamtha: f32,
    /// Presynaptic spike detection threshold (mV)
    pub threshold: f32,
    /// Trial count, sets the source count for the shared identifier scheme
    pub trials: usize,
    /// Seed of the drive's deterministic random stream
    pub seed: u64,
    /// Event timing model
    pub timing: DriveTiming,
    /// Per-population strengths, populations absent from this table are
    /// skipped during wiring
    pub strengths: HashMap<CellClass, DriveStrength>,
}

impl DriveSpec {
    /// Number of synthetic sources the drive owns given the cell count of
    /// the network
    pub fn source_count(&self, n_cells: usize) -> usize {
        match drive_route(self.kind).scheme {
            SourceScheme::Shared => self.trials.max(1),
            SourceScheme::PerTarget => n_cells,
        }
    }

    /// Generates the sorted, non-negative event times of the source at
    /// `index` within this drive's range, deterministic for a fixed seed
    pub fn event_times(&self, index: usize) -> Vec<f32> {
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(index as u64));

        let mut times = match self.timing {
            DriveTiming::Rhythmic { start, stop, burst_frequency, jitter, events_per_burst } => {
                let mut times = vec![];
                let interval = 1000. / burst_frequency;

                let mut burst = start;
                while burst < stop {
                    for _ in 0..events_per_burst {
                        times.push(clamped_normal(&mut rng, burst, jitter, start, stop));
                    }

                    burst += interval;
                }

                times
            },
            DriveTiming::Single { mean, stdev } => {
                vec![clamped_normal(&mut rng, mean, stdev, 0., f32::MAX)]
            },
            DriveTiming::PoissonTrain { start, stop, rate } => {
                let mut times = vec![];

                if rate > 0. {
                    let intervals = Exp::new(rate / 1000.).unwrap();

                    let mut current = start + intervals.sample(&mut rng);
                    while current < stop {
                        times.push(current);
                        current += intervals.sample(&mut rng);
                    }
                }

                times
            },
        };

        times.retain(|time| *time >= 0.);
        times.sort_by(f32::total_cmp);

        times
    }
}

/// Generated spike times of one synthetic drive source, handed to the
/// solver alongside the wired cells
#[derive(Debug, Clone)]
pub struct DriveEvents {
    /// Name of the owning drive
    pub drive: String,
    /// Synthetic source identifier
    pub source_gid: usize,
    /// Sorted event times (ms)
    pub times: Vec<f32>,
}

/// Draws from the normal distribution at the given mean and standard
/// deviation and clamps the output between the given minimum and maximum,
/// if the standard deviation is `0.` the mean is always returned
pub fn clamped_normal<R: Rng>(rng: &mut R, mean: f32, std: f32, minimum: f32, maximum: f32) -> f32 {
    if std == 0.0 {
        return mean;
    }

    let normal = Normal::new(mean, std).unwrap();
    let output: f32 = normal.sample(rng);

    output.max(minimum).min(maximum)
}
