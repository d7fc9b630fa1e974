//! Cells of the column, their population classes, and the strictly ordered
//! construction state machine every cell moves through, morphology, then
//! biophysics, then receptor sites, then wiring, then freezing.

use std::collections::HashMap;
use crate::error::{BuildError, NeocorticalNetworkError};
use crate::network::Connection;

pub mod morphology;
pub mod biophysics;
pub mod synapse;
pub mod recipes;

use self::morphology::DendriticTree;
use self::biophysics::assign_mechanisms;
use self::synapse::{ReceptorSite, create_receptor_sites};
use self::recipes::CellRecipe;


/// Population labels of the column
#[derive(Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum CellClass {
    /// Layer 2/3 pyramidal population
    L2Pyramidal,
    /// Layer 2/3 basket population
    L2Basket,
    /// Layer 5 pyramidal population
    L5Pyramidal,
    /// Layer 5 basket population
    L5Basket,
}

impl CellClass {
    /// Converts the class to its population tag
    pub fn to_str(&self) -> &str {
        match self {
            CellClass::L2Pyramidal => "L2_pyramidal",
            CellClass::L2Basket => "L2_basket",
            CellClass::L5Pyramidal => "L5_pyramidal",
            CellClass::L5Basket => "L5_basket",
        }
    }
}

/// Construction phase of a single cell, transitions are strictly sequential
/// and one-directional, any failure before `Frozen` invalidates the whole
/// network build
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BuildPhase {
    Unbuilt,
    MorphologyAssigned,
    BiophysicsAssigned,
    SynapsesCreated,
    Wired,
    Frozen,
}

/// A single cell of the network, population label and morphology are
/// immutable after construction, the inbound connection list grows only
/// during the wiring phase and is frozen before simulation starts
#[derive(Debug, Clone)]
pub struct Cell {
    /// Global identifier, unique across populations and drive sources
    pub gid: usize,
    /// Spatial position (um)
    pub position: [f32; 3],
    /// Population label
    pub class: CellClass,
    /// Compartment tree rooted at the soma
    pub tree: DendriticTree,
    /// Receptor sites keyed by stable site name
    pub receptor_sites: HashMap<String, ReceptorSite>,
    connections: Vec<Connection>,
    phase: BuildPhase,
}

impl Cell {
    pub fn new(gid: usize, position: [f32; 3], class: CellClass) -> Self {
        Cell {
            gid,
            position,
            class,
            tree: DendriticTree::default(),
            receptor_sites: HashMap::new(),
            connections: vec![],
            phase: BuildPhase::Unbuilt,
        }
    }

    pub fn phase(&self) -> BuildPhase {
        self.phase
    }

    pub fn is_frozen(&self) -> bool {
        self.phase == BuildPhase::Frozen
    }

    /// Inbound connections targeting this cell's receptor sites
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn receptor_site(&self, name: &str) -> Option<&ReceptorSite> {
        self.receptor_sites.get(name)
    }

    fn advance(&mut self, from: BuildPhase, to: BuildPhase) -> Result<(), BuildError> {
        if self.phase != from {
            return Err(BuildError::WrongPhase(
                format!("gid {}: expected {:?}, found {:?}", self.gid, from, self.phase)
            ));
        }

        self.phase = to;

        Ok(())
    }

    /// Builds the compartment tree from the recipe's geometry and topology
    pub fn assign_morphology(&mut self, recipe: &CellRecipe) -> Result<(), NeocorticalNetworkError> {
        self.advance(BuildPhase::Unbuilt, BuildPhase::MorphologyAssigned)?;

        self.tree = DendriticTree::build(
            &recipe.soma_name,
            recipe.soma_geometry,
            recipe.soma_start,
            recipe.soma_end,
            &recipe.dendrites,
            &recipe.topology,
        )?;

        Ok(())
    }

    /// Inserts membrane mechanisms and sets their parameters
    pub fn assign_biophysics(&mut self, recipe: &CellRecipe) -> Result<(), NeocorticalNetworkError> {
        self.advance(BuildPhase::MorphologyAssigned, BuildPhase::BiophysicsAssigned)?;

        assign_mechanisms(&mut self.tree, &recipe.mechanisms)?;

        Ok(())
    }

    /// Creates the population's receptor sites
    pub fn create_synapses(&mut self, recipe: &CellRecipe) -> Result<(), NeocorticalNetworkError> {
        self.advance(BuildPhase::BiophysicsAssigned, BuildPhase::SynapsesCreated)?;

        self.receptor_sites = create_receptor_sites(
            &self.tree,
            &recipe.synapse_layout,
            &recipe.kinetics,
        )?;

        Ok(())
    }

    /// Runs the three independent per-cell construction phases in order
    pub fn build(&mut self, recipe: &CellRecipe) -> Result<(), NeocorticalNetworkError> {
        self.assign_morphology(recipe)?;
        self.assign_biophysics(recipe)?;
        self.create_synapses(recipe)?;

        Ok(())
    }

    /// Installs the complete inbound connection list, called exactly once by
    /// the connectivity engine
    pub fn wire(&mut self, connections: Vec<Connection>) -> Result<(), BuildError> {
        self.advance(BuildPhase::SynapsesCreated, BuildPhase::Wired)?;

        self.connections = connections;

        Ok(())
    }

    /// Seals the cell for simulation, no further mutation is possible
    pub fn freeze(&mut self) -> Result<(), BuildError> {
        self.advance(BuildPhase::Wired, BuildPhase::Frozen)
    }
}
