//! Receptor site creation, one site per (compartment, receptor class) pair
//! demanded by a population's synapse layout, with bi-exponential rise and
//! decay kinetics and a stable naming scheme used to address sites during
//! wiring.

use std::collections::HashMap;
use crate::error::{MorphologyError, NeocorticalNetworkError, ParameterError};
use super::morphology::DendriticTree;


/// Default kinetics for fast excitatory receptors
pub trait AMPADefault {
    fn ampa_default() -> Self;
}

/// Default kinetics for slow excitatory receptors
pub trait NMDADefault {
    fn nmda_default() -> Self;
}

/// Default kinetics for fast inhibitory receptors
pub trait GABAaDefault {
    fn gabaa_default() -> Self;
}

/// Default kinetics for slow inhibitory receptors
pub trait GABAbDefault {
    fn gabab_default() -> Self;
}

/// Available receptor classes for postsynaptic sites
#[derive(Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum ReceptorClass {
    /// Fast excitatory receptor
    AMPA,
    /// Slow excitatory receptor
    NMDA,
    /// Fast inhibitory receptor
    GABAa,
    /// Slow inhibitory receptor
    GABAb,
}

impl ReceptorClass {
    /// Converts the class to the lowercase tag used in site names
    pub fn to_str(&self) -> &str {
        match self {
            ReceptorClass::AMPA => "ampa",
            ReceptorClass::NMDA => "nmda",
            ReceptorClass::GABAa => "gabaa",
            ReceptorClass::GABAb => "gabab",
        }
    }

    pub fn is_excitatory(&self) -> bool {
        matches!(self, ReceptorClass::AMPA | ReceptorClass::NMDA)
    }
}

/// Bi-exponential postsynaptic kinetics of one receptor class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReceptorParams {
    /// Reversal potential (mV)
    pub reversal: f32,
    /// Rise time constant (ms)
    pub tau_rise: f32,
    /// Decay time constant (ms)
    pub tau_decay: f32,
}

macro_rules! impl_receptor_params_default {
    ($trait:ident, $method:ident, $reversal:expr, $tau_rise:expr, $tau_decay:expr) => {
        impl $trait for ReceptorParams {
            fn $method() -> Self {
                ReceptorParams {
                    reversal: $reversal, // mV
                    tau_rise: $tau_rise, // ms
                    tau_decay: $tau_decay, // ms
                }
            }
        }
    };
}

impl_receptor_params_default!(Default, default, 0., 0.5, 5.);
impl_receptor_params_default!(AMPADefault, ampa_default, 0., 0.5, 5.);
impl_receptor_params_default!(NMDADefault, nmda_default, 0., 1., 20.);
impl_receptor_params_default!(GABAaDefault, gabaa_default, -80., 0.5, 5.);
impl_receptor_params_default!(GABAbDefault, gabab_default, -80., 1., 20.);

/// Per-population kinetics keyed by receptor class
pub type KineticsTable = HashMap<ReceptorClass, ReceptorParams>;

/// A point on a compartment where an incoming spike is transduced into a
/// postsynaptic conductance change, created once per cell and never
/// destroyed during a simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct ReceptorSite {
    /// Name of the owning compartment
    pub compartment: String,
    /// Fractional position along the compartment in [0, 1]
    pub position: f32,
    /// Receptor class of the site
    pub receptor: ReceptorClass,
    /// Kinetics of the site
    pub params: ReceptorParams,
}

/// Stable addressing name of a receptor site
pub fn site_name(compartment: &str, receptor: ReceptorClass) -> String {
    format!("{}_{}", compartment, receptor.to_str())
}

/// Creates one receptor site per layout entry at the midpoint of the owning
/// compartment and returns the site map keyed by [`site_name`], all cells
/// sharing a population label get an identical site set
pub fn create_receptor_sites(
    tree: &DendriticTree,
    layout: &[(String, ReceptorClass)],
    kinetics: &KineticsTable,
) -> Result<HashMap<String, ReceptorSite>, NeocorticalNetworkError> {
    let mut sites = HashMap::new();

    for (compartment, receptor) in layout.iter() {
        if !tree.contains(compartment) {
            return Err(MorphologyError::UnknownCompartment(compartment.clone()).into());
        }

        let params = match kinetics.get(receptor) {
            Some(params) => *params,
            None => {
                return Err(ParameterError::Missing(
                    format!("receptor kinetics for {}", receptor.to_str())
                ).into());
            },
        };

        sites.insert(
            site_name(compartment, *receptor),
            ReceptorSite {
                compartment: compartment.clone(),
                position: 0.5,
                receptor: *receptor,
                params,
            },
        );
    }

    Ok(sites)
}
