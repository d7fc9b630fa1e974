//! Construction of per-cell compartment trees, a soma root plus ordered
//! dendrite sections attached by an explicit topology recipe, along with the
//! cable discretization and tree distance calculations the rest of the
//! build pipeline depends on.

use std::collections::HashMap;
use crate::error::MorphologyError;
use super::biophysics::MechanismInstance;


/// Cable geometry of a single compartment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionGeometry {
    /// Section length (um)
    pub length: f32,
    /// Section diameter (um)
    pub diameter: f32,
    /// Axial resistance (ohm cm)
    pub axial_resistance: f32,
    /// Membrane capacitance (uF/cm^2)
    pub capacitance: f32,
}

/// Specification of one named dendrite section before attachment
#[derive(Debug, Clone)]
pub struct DendriteSpec {
    /// Section name, unique within the cell
    pub name: String,
    /// Cable geometry
    pub geometry: SectionGeometry,
    /// Explicit 3-D coordinate of the section start (um)
    pub start: [f32; 3],
    /// Explicit 3-D coordinate of the section end (um)
    pub end: [f32; 3],
}

/// One step of a topology recipe, attaches the start of `child` to the
/// `parent_end` fraction of `parent`
#[derive(Debug, Clone)]
pub struct TopologyStep {
    pub child: String,
    pub parent: String,
    /// Attachment fraction on the parent, restricted to `0.` or `1.`
    pub parent_end: f32,
}

impl TopologyStep {
    pub fn new(child: &str, parent: &str, parent_end: f32) -> Self {
        TopologyStep {
            child: child.to_string(),
            parent: parent.to_string(),
            parent_end,
        }
    }
}

/// Link from a compartment to its parent within the tree
#[derive(Debug, Clone, Copy)]
pub struct Attachment {
    /// Index of the parent compartment
    pub parent: usize,
    /// Attachment fraction on the parent, `0.` or `1.`
    pub parent_end: f32,
    /// Attachment fraction on the child, always `0.` for this model
    pub child_end: f32,
}

/// A discretized stretch of neuronal membrane with its own cable geometry
/// and mechanism state
#[derive(Debug, Clone)]
pub struct Compartment {
    /// Section name, unique within the owning cell
    pub name: String,
    /// Cable geometry
    pub geometry: SectionGeometry,
    /// Number of discretization subsegments, always odd
    pub segments: usize,
    /// Parent link, `None` only for the soma root
    pub parent: Option<Attachment>,
    /// 3-D coordinate of the section start (um)
    pub start: [f32; 3],
    /// 3-D coordinate of the section end (um)
    pub end: [f32; 3],
    /// Inserted membrane mechanisms keyed by mechanism name
    pub mechanisms: HashMap<String, MechanismInstance>,
}

/// Computes the discretization count for a section, sections longer than
/// 100 um are split into roughly 50 um subsegments and the count is forced
/// odd so that no subsegment boundary coincides with the midpoint sampling
/// point used by mechanism insertion
pub fn discretization_segments(length: f32) -> usize {
    if length <= 100. {
        return 1;
    }

    let mut segments = (length / 50.) as usize;
    if segments % 2 == 0 {
        segments += 1;
    }

    segments
}

/// Fractional midpoints of each subsegment of a section split into
/// `segments` pieces
pub fn segment_midpoints(segments: usize) -> Vec<f32> {
    (0..segments)
        .map(|i| (2 * i + 1) as f32 / (2 * segments) as f32)
        .collect()
}

/// Rooted compartment tree of a single cell, the soma is always index 0,
/// dendrites are attached in recipe order so every parent precedes its
/// children and the tree is acyclic by construction
#[derive(Debug, Clone, Default)]
pub struct DendriticTree {
    compartments: Vec<Compartment>,
    index: HashMap<String, usize>,
}

impl DendriticTree {
    /// Creates a tree containing only the soma root
    pub fn new(soma_name: &str, soma_geometry: SectionGeometry, start: [f32; 3], end: [f32; 3]) -> Self {
        let soma = Compartment {
            name: soma_name.to_string(),
            geometry: soma_geometry,
            segments: discretization_segments(soma_geometry.length),
            parent: None,
            start,
            end,
            mechanisms: HashMap::new(),
        };

        DendriticTree {
            compartments: vec![soma],
            index: HashMap::from([(soma_name.to_string(), 0)]),
        }
    }

    /// Builds the full tree from dendrite specifications and a topology
    /// recipe, every dendrite must appear in exactly one topology step and
    /// every step must attach to an already built parent
    pub fn build(
        soma_name: &str,
        soma_geometry: SectionGeometry,
        soma_start: [f32; 3],
        soma_end: [f32; 3],
        dendrites: &[DendriteSpec],
        topology: &[TopologyStep],
    ) -> Result<Self, MorphologyError> {
        let mut tree = DendriticTree::new(soma_name, soma_geometry, soma_start, soma_end);

        let mut specs: HashMap<&str, &DendriteSpec> = HashMap::new();
        for dendrite in dendrites.iter() {
            if specs.insert(dendrite.name.as_str(), dendrite).is_some() {
                return Err(MorphologyError::DuplicateCompartment(dendrite.name.clone()));
            }
        }

        for step in topology.iter() {
            let spec = match specs.get(step.child.as_str()) {
                Some(spec) => *spec,
                None => return Err(MorphologyError::UnknownCompartment(step.child.clone())),
            };

            tree.attach(spec, &step.parent, step.parent_end)?;
        }

        for dendrite in dendrites.iter() {
            if !tree.index.contains_key(&dendrite.name) {
                return Err(MorphologyError::DetachedCompartment(dendrite.name.clone()));
            }
        }

        Ok(tree)
    }

    /// Attaches a new dendrite to an existing parent compartment
    pub fn attach(
        &mut self,
        spec: &DendriteSpec,
        parent: &str,
        parent_end: f32,
    ) -> Result<(), MorphologyError> {
        if self.index.contains_key(&spec.name) {
            return Err(MorphologyError::DuplicateCompartment(spec.name.clone()));
        }

        let parent_index = match self.index.get(parent) {
            Some(index) => *index,
            None => return Err(MorphologyError::UnknownCompartment(parent.to_string())),
        };

        if parent_end != 0. && parent_end != 1. {
            return Err(MorphologyError::InvalidAttachment(
                format!("{} -> {} at {}", spec.name, parent, parent_end)
            ));
        }

        let compartment = Compartment {
            name: spec.name.clone(),
            geometry: spec.geometry,
            segments: discretization_segments(spec.geometry.length),
            parent: Some(Attachment { parent: parent_index, parent_end, child_end: 0. }),
            start: spec.start,
            end: spec.end,
            mechanisms: HashMap::new(),
        };

        self.index.insert(spec.name.clone(), self.compartments.len());
        self.compartments.push(compartment);

        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Compartment> {
        self.index.get(name).map(|index| &self.compartments[*index])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Compartment> {
        match self.index.get(name) {
            Some(index) => Some(&mut self.compartments[*index]),
            None => None,
        }
    }

    /// Returns the soma root
    pub fn root(&self) -> &Compartment {
        &self.compartments[0]
    }

    pub fn compartments(&self) -> &[Compartment] {
        &self.compartments
    }

    pub fn compartments_mut(&mut self) -> &mut [Compartment] {
        &mut self.compartments
    }

    pub fn len(&self) -> usize {
        self.compartments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compartments.is_empty()
    }

    /// Returns the compartment indices from the named compartment up to and
    /// including the root
    pub fn path_to_root(&self, name: &str) -> Result<Vec<usize>, MorphologyError> {
        let mut current = match self.index.get(name) {
            Some(index) => *index,
            None => return Err(MorphologyError::UnknownCompartment(name.to_string())),
        };

        let mut path = vec![current];
        while let Some(attachment) = &self.compartments[current].parent {
            current = attachment.parent;
            path.push(current);
        }

        Ok(path)
    }

    /// Path distance (um) from position 0 of the soma root to the given
    /// fractional position on the named compartment, measured along the
    /// parent chain of the tree
    pub fn path_distance(&self, name: &str, position: f32) -> Result<f32, MorphologyError> {
        let index = match self.index.get(name) {
            Some(index) => *index,
            None => return Err(MorphologyError::UnknownCompartment(name.to_string())),
        };

        let mut distance = position * self.compartments[index].geometry.length;

        let mut current = index;
        while let Some(attachment) = &self.compartments[current].parent {
            distance += attachment.parent_end * self.compartments[attachment.parent].geometry.length;
            current = attachment.parent;
        }

        Ok(distance)
    }

    /// Path distances (um) from the soma root to each subsegment midpoint
    /// of the named compartment
    pub fn midpoint_distances(&self, name: &str) -> Result<Vec<f32>, MorphologyError> {
        let segments = match self.get(name) {
            Some(compartment) => compartment.segments,
            None => return Err(MorphologyError::UnknownCompartment(name.to_string())),
        };

        segment_midpoints(segments)
            .iter()
            .map(|midpoint| self.path_distance(name, *midpoint))
            .collect()
    }
}
