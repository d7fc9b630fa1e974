//! Insertion of membrane mechanisms into compartments and assignment of
//! their conductance and kinetic parameters, including the distance
//! dependent conductance gradient used by the inward rectifier mechanism.

use std::collections::HashMap;
use crate::error::MechanismError;
use super::morphology::DendriticTree;


/// Mechanism names the assigner accepts, any other name in a mechanism
/// table fails validation before any compartment is mutated
pub const KNOWN_MECHANISMS: [&str; 7] = ["hh2", "km", "ca", "cad", "kca", "cat", "ar"];

/// Parameter value of a mechanism as specified by a recipe
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MechanismParam {
    /// A single value shared by every subsegment of the compartment
    Uniform(f32),
    /// A conductance gradient, evaluated per subsegment midpoint as
    /// `base * exp(rate * d)` with `d` the path distance from the soma (um)
    DistanceScaled {
        /// Conductance at the soma (S/cm^2)
        base: f32,
        /// Spatial growth rate (1/um)
        rate: f32,
    },
}

/// Specification of one mechanism to insert on a compartment
#[derive(Debug, Clone)]
pub struct MechanismSpec {
    /// Mechanism name, must be one of [`KNOWN_MECHANISMS`]
    pub mechanism: String,
    /// Parameter name and value pairs to set after insertion
    pub params: Vec<(String, MechanismParam)>,
}

impl MechanismSpec {
    pub fn new(mechanism: &str) -> Self {
        MechanismSpec { mechanism: mechanism.to_string(), params: vec![] }
    }

    /// Adds a parameter to the specification
    pub fn with(mut self, name: &str, param: MechanismParam) -> Self {
        self.params.push((name.to_string(), param));

        self
    }
}

/// Parameter state held by an inserted mechanism
#[derive(Debug, Clone, PartialEq)]
pub enum MechanismValue {
    /// One value for the whole compartment
    Uniform(f32),
    /// One value per discretization subsegment
    PerSegment(Vec<f32>),
}

/// A mechanism inserted on a compartment together with its parameter state,
/// parameter values are only meaningful after insertion
#[derive(Debug, Clone, PartialEq)]
pub struct MechanismInstance {
    /// Mechanism name
    pub mechanism: String,
    /// Parameter name to assigned value
    pub params: HashMap<String, MechanismValue>,
}

/// Mechanism table keyed by compartment name
pub type MechanismTable = HashMap<String, Vec<MechanismSpec>>;

/// Validates a mechanism table against a compartment tree without mutating
/// anything, unknown compartment or mechanism names are fatal
pub fn validate_mechanisms(tree: &DendriticTree, table: &MechanismTable) -> Result<(), MechanismError> {
    for (compartment, specs) in table.iter() {
        if !tree.contains(compartment) {
            return Err(MechanismError::UnknownCompartment(compartment.clone()));
        }

        for spec in specs.iter() {
            if !KNOWN_MECHANISMS.contains(&spec.mechanism.as_str()) {
                return Err(MechanismError::UnknownMechanism(spec.mechanism.clone()));
            }
        }
    }

    Ok(())
}

/// Inserts every mechanism of the table into its compartment and assigns
/// parameter values, insertion is idempotent per (compartment, mechanism)
/// pair, re-insertion overwrites parameters without duplicating state
pub fn assign_mechanisms(tree: &mut DendriticTree, table: &MechanismTable) -> Result<(), MechanismError> {
    validate_mechanisms(tree, table)?;

    for (compartment, specs) in table.iter() {
        for spec in specs.iter() {
            let values: Vec<(String, MechanismValue)> = spec.params
                .iter()
                .map(|(name, param)| {
                    let value = match param {
                        MechanismParam::Uniform(value) => MechanismValue::Uniform(*value),
                        MechanismParam::DistanceScaled { base, rate } => {
                            let per_segment = tree.midpoint_distances(compartment)
                                .map_err(|_| MechanismError::UnknownCompartment(compartment.clone()))?
                                .iter()
                                .map(|distance| base * (rate * distance).exp())
                                .collect();

                            MechanismValue::PerSegment(per_segment)
                        },
                    };

                    Ok((name.clone(), value))
                })
                .collect::<Result<_, MechanismError>>()?;

            let section = match tree.get_mut(compartment) {
                Some(section) => section,
                None => return Err(MechanismError::UnknownCompartment(compartment.clone())),
            };

            let instance = section.mechanisms
                .entry(spec.mechanism.clone())
                .or_insert_with(|| MechanismInstance {
                    mechanism: spec.mechanism.clone(),
                    params: HashMap::new(),
                });

            for (name, value) in values {
                instance.params.insert(name, value);
            }
        }
    }

    Ok(())
}
