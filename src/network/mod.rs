//! Network level assembly, the process wide topology of populations and
//! drive sources, pathway parameter tables, and the connectivity engine
//! that materializes every weighted, delayed, spatially attenuated
//! connection of the column.

use std::collections::HashMap;
use rayon::prelude::*;
use crate::cell::{Cell, CellClass};
use crate::cell::recipes::CellRecipe;
use crate::cell::synapse::{site_name, ReceptorClass};
use crate::error::{BuildError, NeocorticalNetworkError, ParameterError};
use crate::params::ParameterTable;

pub mod drives;

use self::drives::{drive_route, DriveEvents, DriveKind, DriveSpec, SlowPolicy, SourceScheme};


/// Tag identifying what produces the spikes entering a connection
#[derive(Hash, PartialEq, Eq, Clone, Copy, Debug)]
pub enum SourceTag {
    /// A recurrent population
    Cells(CellClass),
    /// An external drive
    Drive(DriveKind),
}

/// Contiguous range of synthetic source identifiers owned by one drive
#[derive(Debug, Clone, Copy)]
pub struct SourceRange {
    /// First identifier of the range
    pub start: usize,
    /// Number of identifiers in the range
    pub len: usize,
}

/// Process wide table of populations, their cell identifiers and positions
/// (index aligned), and the identifier ranges of every drive, built once at
/// network construction time and read only thereafter
#[derive(Debug, Clone, Default)]
pub struct NetworkTopology {
    /// Ordered cell identifiers per population
    pub cell_gids: HashMap<CellClass, Vec<usize>>,
    /// Ordered cell positions per population, index aligned with the
    /// identifier lists (grid units in x and y, um in z)
    pub cell_positions: HashMap<CellClass, Vec<[f32; 3]>>,
    /// Synthetic source identifier ranges keyed by drive name
    pub drive_ranges: HashMap<String, SourceRange>,
    /// Total cell count across populations
    pub n_cells: usize,
}

/// Height of the layer 2/3 sheet above layer 5 (um)
const LAYER_SEPARATION: f32 = 1307.4;

fn grid_positions(rows: usize, cols: usize, height: f32) -> Vec<[f32; 3]> {
    (0..rows)
        .flat_map(|row| (0..cols).map(move |col| [row as f32, col as f32, height]))
        .collect()
}

impl NetworkTopology {
    /// Builds the standard column topology, pyramidal cells on a
    /// `rows` x `cols` sheet per layer with basket cells on every third
    /// grid site, identifiers are assigned in a fixed population order and
    /// each drive gets one contiguous identifier range after the cells
    pub fn column_grid(rows: usize, cols: usize, drives: &[DriveSpec]) -> Self {
        let mut topology = NetworkTopology::default();

        let populations = [
            (CellClass::L2Basket, thinned_positions(rows, cols, LAYER_SEPARATION)),
            (CellClass::L2Pyramidal, grid_positions(rows, cols, LAYER_SEPARATION)),
            (CellClass::L5Basket, thinned_positions(rows, cols, 0.)),
            (CellClass::L5Pyramidal, grid_positions(rows, cols, 0.)),
        ];

        let mut next_gid = 0;
        for (class, positions) in populations {
            let gids: Vec<usize> = (next_gid..next_gid + positions.len()).collect();
            next_gid += positions.len();

            topology.cell_gids.insert(class, gids);
            topology.cell_positions.insert(class, positions);
        }
        topology.n_cells = next_gid;

        for drive in drives.iter() {
            let len = drive.source_count(topology.n_cells);
            topology.drive_ranges.insert(
                drive.name.clone(),
                SourceRange { start: next_gid, len },
            );
            next_gid += len;
        }

        topology
    }

    /// Identifier and position lists of a population, empty when the
    /// population is absent from the topology
    pub fn population(&self, class: CellClass) -> (&[usize], &[[f32; 3]]) {
        match (self.cell_gids.get(&class), self.cell_positions.get(&class)) {
            (Some(gids), Some(positions)) => (gids, positions),
            _ => (&[], &[]),
        }
    }
}

fn thinned_positions(rows: usize, cols: usize, height: f32) -> Vec<[f32; 3]> {
    grid_positions(rows, cols, height)
        .into_iter()
        .step_by(3)
        .collect()
}

/// Pathway key, one entry per (source population, target population,
/// receptor class) triple, absence of a key is the normal way to express
/// no connection of this kind
#[derive(Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub struct PathwayKey {
    pub source: CellClass,
    pub target: CellClass,
    pub receptor: ReceptorClass,
}

/// Parameters shared by every connection of one pathway
#[derive(Debug, Clone, Copy)]
pub struct PathwayParams {
    /// Maximal weight before distance attenuation (uS)
    pub weight: f32,
    /// Base delay before distance scaling (ms)
    pub delay: f32,
    /// Spatial decay constant (grid units)
    pub lamtha: f32,
    /// Presynaptic spike detection threshold (mV)
    pub threshold: f32,
}

/// One pathway, its parameters and the target compartments whose receptor
/// sites it reaches
#[derive(Debug, Clone)]
pub struct PathwaySpec {
    pub params: PathwayParams,
    /// Target compartment names, resolved to sites through the pathway's
    /// receptor class
    pub targets: Vec<String>,
}

fn validate_pathway(params: &PathwayParams, name: &str) -> Result<(), ParameterError> {
    if params.weight < 0. {
        return Err(ParameterError::OutOfRange(format!("{} weight", name)));
    }
    if params.delay < 0. {
        return Err(ParameterError::OutOfRange(format!("{} delay", name)));
    }
    if params.lamtha <= 0. {
        return Err(ParameterError::OutOfRange(format!("{} lamtha", name)));
    }

    Ok(())
}

/// Per-pathway parameter table of the recurrent network
#[derive(Debug, Clone, Default)]
pub struct ConnectivitySpec {
    pub pathways: HashMap<PathwayKey, PathwaySpec>,
}

impl ConnectivitySpec {
    pub fn new() -> Self {
        ConnectivitySpec { pathways: HashMap::new() }
    }

    /// Adds a pathway after validating its parameter invariants
    pub fn add(
        &mut self,
        source: CellClass,
        target: CellClass,
        receptor: ReceptorClass,
        params: PathwayParams,
        targets: &[&str],
    ) -> Result<(), ParameterError> {
        validate_pathway(
            &params,
            &format!("{}->{} {}", source.to_str(), target.to_str(), receptor.to_str()),
        )?;

        self.pathways.insert(
            PathwayKey { source, target, receptor },
            PathwaySpec {
                params,
                targets: targets.iter().map(|name| name.to_string()).collect(),
            },
        );

        Ok(())
    }

    /// Builds the standard recurrent pathway set of the column from a
    /// parameter table
    pub fn standard(params: &ParameterTable) -> Result<Self, ParameterError> {
        let threshold = params.get("threshold")?;
        let mut spec = ConnectivitySpec::new();

        let pathway = |weight: f32, lamtha: f32| PathwayParams {
            weight,
            delay: 1.,
            lamtha,
            threshold,
        };

        let proximal = ["apical_oblique", "basal_2", "basal_3"];

        // layer 2/3 recurrence
        spec.add(
            CellClass::L2Pyramidal, CellClass::L2Pyramidal, ReceptorClass::AMPA,
            pathway(params.get("gbar_L2Pyr_L2Pyr_ampa")?, 3.), &proximal,
        )?;
        spec.add(
            CellClass::L2Pyramidal, CellClass::L2Pyramidal, ReceptorClass::NMDA,
            pathway(params.get("gbar_L2Pyr_L2Pyr_nmda")?, 3.), &proximal,
        )?;
        spec.add(
            CellClass::L2Basket, CellClass::L2Pyramidal, ReceptorClass::GABAa,
            pathway(params.get("gbar_L2Basket_L2Pyr_gabaa")?, 50.), &["soma"],
        )?;
        spec.add(
            CellClass::L2Basket, CellClass::L2Pyramidal, ReceptorClass::GABAb,
            pathway(params.get("gbar_L2Basket_L2Pyr_gabab")?, 50.), &["soma"],
        )?;
        spec.add(
            CellClass::L2Pyramidal, CellClass::L2Basket, ReceptorClass::AMPA,
            pathway(params.get("gbar_L2Pyr_L2Basket_ampa")?, 3.), &["soma"],
        )?;
        spec.add(
            CellClass::L2Basket, CellClass::L2Basket, ReceptorClass::GABAa,
            pathway(params.get("gbar_L2Basket_L2Basket_gabaa")?, 20.), &["soma"],
        )?;

        // layer 5 recurrence
        spec.add(
            CellClass::L5Pyramidal, CellClass::L5Pyramidal, ReceptorClass::AMPA,
            pathway(params.get("gbar_L5Pyr_L5Pyr_ampa")?, 3.), &proximal,
        )?;
        spec.add(
            CellClass::L5Pyramidal, CellClass::L5Pyramidal, ReceptorClass::NMDA,
            pathway(params.get("gbar_L5Pyr_L5Pyr_nmda")?, 3.), &proximal,
        )?;
        spec.add(
            CellClass::L5Basket, CellClass::L5Pyramidal, ReceptorClass::GABAa,
            pathway(params.get("gbar_L5Basket_L5Pyr_gabaa")?, 70.), &["soma"],
        )?;
        spec.add(
            CellClass::L5Basket, CellClass::L5Pyramidal, ReceptorClass::GABAb,
            pathway(params.get("gbar_L5Basket_L5Pyr_gabab")?, 70.), &["soma"],
        )?;
        spec.add(
            CellClass::L5Pyramidal, CellClass::L5Basket, ReceptorClass::AMPA,
            pathway(params.get("gbar_L5Pyr_L5Basket_ampa")?, 3.), &["soma"],
        )?;
        spec.add(
            CellClass::L5Basket, CellClass::L5Basket, ReceptorClass::GABAa,
            pathway(params.get("gbar_L5Basket_L5Basket_gabaa")?, 20.), &["soma"],
        )?;

        // descending layer 2/3 to layer 5
        spec.add(
            CellClass::L2Pyramidal, CellClass::L5Pyramidal, ReceptorClass::AMPA,
            pathway(params.get("gbar_L2Pyr_L5Pyr_ampa")?, 3.),
            &["basal_2", "basal_3", "apical_tuft", "apical_oblique"],
        )?;
        spec.add(
            CellClass::L2Basket, CellClass::L5Pyramidal, ReceptorClass::GABAa,
            pathway(params.get("gbar_L2Basket_L5Pyr_gabaa")?, 50.), &["apical_tuft"],
        )?;
        spec.add(
            CellClass::L2Pyramidal, CellClass::L5Basket, ReceptorClass::AMPA,
            pathway(params.get("gbar_L2Pyr_L5Basket_ampa")?, 3.), &["soma"],
        )?;

        Ok(spec)
    }
}

/// A single wired connection from a spike source to a receptor site
#[derive(Debug, Clone)]
pub struct Connection {
    /// Identifier of the spike source, a cell gid or a synthetic drive gid
    pub source_gid: usize,
    /// Population or drive the source belongs to
    pub source: SourceTag,
    /// Spatial position of the source
    pub source_position: [f32; 3],
    /// Identifier of the target cell
    pub target_gid: usize,
    /// Receptor site name on the target cell
    pub target_site: String,
    /// Distance attenuated weight (uS)
    pub weight: f32,
    /// Distance scaled delay (ms)
    pub delay: f32,
    /// Spatial decay constant used for the attenuation
    pub lamtha: f32,
    /// Presynaptic spike detection threshold (mV)
    pub threshold: f32,
}

/// Planar Euclidean distance between two positions, the vertical component
/// does not contribute to connection attenuation
pub fn planar_distance(a: [f32; 3], b: [f32; 3]) -> f32 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];

    (dx * dx + dy * dy).sqrt()
}

/// Spatial attenuation factor, `exp(-d^2 / lamtha^2)`
pub fn spatial_attenuation(distance: f32, lamtha: f32) -> f32 {
    (-(distance * distance) / (lamtha * lamtha)).exp()
}

fn materialize(
    source_gid: usize,
    source: SourceTag,
    source_position: [f32; 3],
    cell: &Cell,
    target_site: String,
    params: &PathwayParams,
) -> Connection {
    let attenuation = spatial_attenuation(
        planar_distance(source_position, cell.position),
        params.lamtha,
    );

    Connection {
        source_gid,
        source,
        source_position,
        target_gid: cell.gid,
        target_site,
        weight: params.weight * attenuation,
        delay: params.delay / attenuation,
        lamtha: params.lamtha,
        threshold: params.threshold,
    }
}

/// Explicit context threaded through every construction call, a single
/// initialization point with no global state
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Recipe per population
    pub recipes: HashMap<CellClass, CellRecipe>,
    /// Recurrent pathway table
    pub connectivity: ConnectivitySpec,
    /// External drives in wiring order
    pub drives: Vec<DriveSpec>,
    /// Population and drive source layout
    pub topology: NetworkTopology,
}

/// A fully built column, read only once every cell is frozen, the solver
/// consumes this and produces voltage traces and spike events that this
/// crate never reads back
#[derive(Debug, Clone)]
pub struct Network {
    /// Cells indexed by gid
    pub cells: Vec<Cell>,
    /// The topology the network was built from
    pub topology: NetworkTopology,
    /// Generated event times of every drive source
    pub drive_events: Vec<DriveEvents>,
}

impl Network {
    pub fn cell(&self, gid: usize) -> Option<&Cell> {
        self.cells.get(gid)
    }

    /// Total inbound connection count across all cells
    pub fn connection_count(&self) -> usize {
        self.cells.iter().map(|cell| cell.connections().len()).sum()
    }
}

fn validate_drives(drives: &[DriveSpec]) -> Result<(), ParameterError> {
    for drive in drives.iter() {
        if drive.lamtha <= 0. {
            return Err(ParameterError::OutOfRange(format!("{} lamtha", drive.name)));
        }

        for strength in drive.strengths.values() {
            if strength.ampa_weight < 0. || strength.nmda_weight < 0. {
                return Err(ParameterError::OutOfRange(format!("{} weight", drive.name)));
            }
            if strength.delay < 0. {
                return Err(ParameterError::OutOfRange(format!("{} delay", drive.name)));
            }
        }
    }

    Ok(())
}

fn create_cells(topology: &NetworkTopology) -> Vec<Cell> {
    let mut cells: Vec<Cell> = topology.cell_gids
        .iter()
        .flat_map(|(class, gids)| {
            let positions = &topology.cell_positions[class];

            gids.iter()
                .zip(positions.iter())
                .map(|(gid, position)| Cell::new(*gid, *position, *class))
                .collect::<Vec<Cell>>()
        })
        .collect();

    cells.sort_by_key(|cell| cell.gid);

    cells
}

/// Collects the complete inbound connection list of one target cell,
/// recurrent pathways first in deterministic key order, then drives in
/// their configured order
fn collect_inbound(cell: &Cell, ctx: &BuildContext) -> Result<Vec<Connection>, NeocorticalNetworkError> {
    let mut connections = vec![];

    let mut keys: Vec<&PathwayKey> = ctx.connectivity.pathways
        .keys()
        .filter(|key| key.target == cell.class)
        .collect();
    keys.sort();

    for key in keys {
        let spec = &ctx.connectivity.pathways[key];
        let (gids, positions) = ctx.topology.population(key.source);

        for (source_gid, source_position) in gids.iter().zip(positions.iter()) {
            // no autapses
            if key.source == cell.class && *source_gid == cell.gid {
                continue;
            }

            for compartment in spec.targets.iter() {
                let site = site_name(compartment, key.receptor);
                if !cell.receptor_sites.contains_key(&site) {
                    return Err(BuildError::UnknownReceptorSite(site).into());
                }

                connections.push(materialize(
                    *source_gid,
                    SourceTag::Cells(key.source),
                    *source_position,
                    cell,
                    site,
                    &spec.params,
                ));
            }
        }
    }

    for drive in ctx.drives.iter() {
        let route = drive_route(drive.kind);

        let strength = match drive.strengths.get(&cell.class) {
            Some(strength) => *strength,
            None => continue,
        };

        let recipe = match ctx.recipes.get(&cell.class) {
            Some(recipe) => recipe,
            None => return Err(BuildError::MissingRecipe(cell.class.to_str().to_string()).into()),
        };

        let range = match ctx.topology.drive_ranges.get(&drive.name) {
            Some(range) => *range,
            None => return Err(BuildError::MissingDriveRange(drive.name.clone()).into()),
        };

        let sources: Vec<usize> = match route.scheme {
            SourceScheme::Shared => (range.start..range.start + range.len).collect(),
            SourceScheme::PerTarget => vec![range.start + cell.gid],
        };

        let fast_params = PathwayParams {
            weight: strength.ampa_weight,
            delay: strength.delay,
            lamtha: drive.lamtha,
            threshold: drive.threshold,
        };
        let slow_params = PathwayParams {
            weight: strength.nmda_weight,
            ..fast_params
        };

        let with_slow = match route.slow {
            SlowPolicy::Always => true,
            SlowPolicy::Never => false,
            SlowPolicy::WhenPositive => strength.nmda_weight > 0.,
        };

        for source_gid in sources {
            for compartment in recipe.locus_targets(route.locus).iter() {
                let fast_site = site_name(compartment, ReceptorClass::AMPA);
                if !cell.receptor_sites.contains_key(&fast_site) {
                    return Err(BuildError::UnknownReceptorSite(fast_site).into());
                }

                connections.push(materialize(
                    source_gid,
                    SourceTag::Drive(drive.kind),
                    drive.position,
                    cell,
                    fast_site,
                    &fast_params,
                ));

                if with_slow {
                    let slow_site = site_name(compartment, ReceptorClass::NMDA);
                    if !cell.receptor_sites.contains_key(&slow_site) {
                        return Err(BuildError::UnknownReceptorSite(slow_site).into());
                    }

                    connections.push(materialize(
                        source_gid,
                        SourceTag::Drive(drive.kind),
                        drive.position,
                        cell,
                        slow_site,
                        &slow_params,
                    ));
                }
            }
        }
    }

    Ok(connections)
}

fn generate_drive_events(
    topology: &NetworkTopology,
    drives: &[DriveSpec],
) -> Result<Vec<DriveEvents>, NeocorticalNetworkError> {
    let mut events = vec![];

    for drive in drives.iter() {
        let range = match topology.drive_ranges.get(&drive.name) {
            Some(range) => *range,
            None => return Err(BuildError::MissingDriveRange(drive.name.clone()).into()),
        };

        for index in 0..range.len {
            events.push(DriveEvents {
                drive: drive.name.clone(),
                source_gid: range.start + index,
                times: drive.event_times(index),
            });
        }
    }

    Ok(events)
}

/// Builds the whole network, the independent per-cell phases run in
/// parallel, wiring starts only after every cell's receptor sites exist and
/// is partitioned by target cell so each worker owns one inbound list, the
/// finished network is frozen before it is returned
pub fn build_network(ctx: &BuildContext) -> Result<Network, NeocorticalNetworkError> {
    validate_drives(&ctx.drives)?;

    let mut cells = create_cells(&ctx.topology);

    cells.par_iter_mut()
        .try_for_each(|cell| {
            let recipe = match ctx.recipes.get(&cell.class) {
                Some(recipe) => recipe,
                None => return Err(BuildError::MissingRecipe(cell.class.to_str().to_string()).into()),
            };

            cell.build(recipe)
        })?;

    // every receptor site of every cell exists past this point
    cells.par_iter_mut()
        .try_for_each(|cell| -> Result<(), NeocorticalNetworkError> {
            let connections = collect_inbound(cell, ctx)?;
            cell.wire(connections)?;

            Ok(())
        })?;

    for cell in cells.iter_mut() {
        cell.freeze()?;
    }

    let drive_events = generate_drive_events(&ctx.topology, &ctx.drives)?;

    Ok(Network {
        cells,
        topology: ctx.topology.clone(),
        drive_events,
    })
}
