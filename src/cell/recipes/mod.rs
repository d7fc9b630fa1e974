//! Data-driven population recipes, one recipe struct fully describes how to
//! build a cell of a population, geometry, explicit 3-D coordinates,
//! topology, mechanism table, receptor kinetics, and synapse layout, so a
//! single population-agnostic builder covers every variant.

use std::collections::HashMap;
use crate::error::ParameterError;
use crate::params::ParameterTable;
use crate::network::drives::TargetLocus;
use super::CellClass;
use super::morphology::{DendriteSpec, SectionGeometry, TopologyStep};
use super::biophysics::{MechanismParam, MechanismSpec, MechanismTable};
use super::synapse::{KineticsTable, ReceptorClass, ReceptorParams};


/// Spatial growth rate (1/um) of the inward rectifier conductance along the
/// apical axis of layer 5 pyramidal dendrites
const AR_SPATIAL_RATE: f32 = 3e-3;

/// Everything required to build one cell of a population
#[derive(Debug, Clone)]
pub struct CellRecipe {
    /// Population the recipe describes
    pub class: CellClass,
    /// Name of the soma root compartment
    pub soma_name: String,
    /// Soma cable geometry
    pub soma_geometry: SectionGeometry,
    /// 3-D coordinate of the soma start (um)
    pub soma_start: [f32; 3],
    /// 3-D coordinate of the soma end (um)
    pub soma_end: [f32; 3],
    /// Ordered dendrite specifications
    pub dendrites: Vec<DendriteSpec>,
    /// Topology recipe attaching each dendrite to its parent
    pub topology: Vec<TopologyStep>,
    /// Mechanism table keyed by compartment name
    pub mechanisms: MechanismTable,
    /// Receptor kinetics keyed by receptor class
    pub kinetics: KineticsTable,
    /// (compartment, receptor class) pairs that get a receptor site
    pub synapse_layout: Vec<(String, ReceptorClass)>,
    /// Compartments reached by proximally targeted drives
    pub proximal_targets: Vec<String>,
    /// Compartments reached by distally targeted drives
    pub distal_targets: Vec<String>,
}

impl CellRecipe {
    /// Receptor-site compartment group for a drive target locus
    pub fn locus_targets(&self, locus: TargetLocus) -> &[String] {
        match locus {
            TargetLocus::Proximal => &self.proximal_targets,
            TargetLocus::Distal => &self.distal_targets,
        }
    }
}

fn geometry(
    params: &ParameterTable,
    length_key: &str,
    diameter_key: &str,
    capacitance_key: &str,
    resistance_key: &str,
) -> Result<SectionGeometry, ParameterError> {
    Ok(SectionGeometry {
        length: params.get(length_key)?,
        diameter: params.get(diameter_key)?,
        axial_resistance: params.get(resistance_key)?,
        capacitance: params.get(capacitance_key)?,
    })
}

fn dendrite(
    params: &ParameterTable,
    name: &str,
    key: &str,
    population: &str,
    start: [f32; 3],
    end: [f32; 3],
) -> Result<DendriteSpec, ParameterError> {
    Ok(DendriteSpec {
        name: name.to_string(),
        geometry: geometry(
            params,
            &format!("{}_{}_L", population, key),
            &format!("{}_{}_diam", population, key),
            &format!("{}_dend_cm", population),
            &format!("{}_dend_Ra", population),
        )?,
        start,
        end,
    })
}

fn hh2_spec(params: &ParameterTable, prefix: &str) -> Result<MechanismSpec, ParameterError> {
    Ok(MechanismSpec::new("hh2")
        .with("gkbar", MechanismParam::Uniform(params.get(&format!("{}_gkbar_hh2", prefix))?))
        .with("gnabar", MechanismParam::Uniform(params.get(&format!("{}_gnabar_hh2", prefix))?))
        .with("gl", MechanismParam::Uniform(params.get(&format!("{}_gl_hh2", prefix))?))
        .with("el", MechanismParam::Uniform(params.get(&format!("{}_el_hh2", prefix))?)))
}

fn gbar_spec(params: &ParameterTable, mechanism: &str, key: &str) -> Result<MechanismSpec, ParameterError> {
    Ok(MechanismSpec::new(mechanism)
        .with("gbar", MechanismParam::Uniform(params.get(key)?)))
}

fn bi_exponential(
    params: &ParameterTable,
    population: &str,
    receptor: ReceptorClass,
) -> Result<ReceptorParams, ParameterError> {
    Ok(ReceptorParams {
        reversal: params.get(&format!("{}_{}_e", population, receptor.to_str()))?,
        tau_rise: params.get(&format!("{}_{}_tau1", population, receptor.to_str()))?,
        tau_decay: params.get(&format!("{}_{}_tau2", population, receptor.to_str()))?,
    })
}

fn excitatory_layout(compartments: &[&str]) -> Vec<(String, ReceptorClass)> {
    compartments
        .iter()
        .flat_map(|compartment| {
            [
                (compartment.to_string(), ReceptorClass::AMPA),
                (compartment.to_string(), ReceptorClass::NMDA),
            ]
        })
        .collect()
}

/// Recipe for the layer 2/3 pyramidal population, a 4-branch apical tree
/// plus a 3-branch basal tree
pub fn l2_pyramidal(params: &ParameterTable) -> Result<CellRecipe, ParameterError> {
    let dendrites = vec![
        dendrite(params, "apical_trunk", "apicaltrunk", "L2Pyr", [-50., 778., 0.], [-50., 813., 0.])?,
        dendrite(params, "apical_oblique", "apicaloblique", "L2Pyr", [-50., 813., 0.], [-250., 813., 0.])?,
        dendrite(params, "apical_1", "apical1", "L2Pyr", [-50., 813., 0.], [-50., 993., 0.])?,
        dendrite(params, "apical_tuft", "apicaltuft", "L2Pyr", [-50., 993., 0.], [-50., 1133., 0.])?,
        dendrite(params, "basal_1", "basal1", "L2Pyr", [-50., 765., 0.], [-50., 715., 0.])?,
        dendrite(params, "basal_2", "basal2", "L2Pyr", [-50., 715., 0.], [-156., 609., 0.])?,
        dendrite(params, "basal_3", "basal3", "L2Pyr", [-50., 715., 0.], [56., 609., 0.])?,
    ];

    let topology = vec![
        TopologyStep::new("apical_trunk", "soma", 1.),
        TopologyStep::new("apical_1", "apical_trunk", 1.),
        TopologyStep::new("apical_tuft", "apical_1", 1.),
        // apical_oblique comes off the distal end of apical_trunk
        TopologyStep::new("apical_oblique", "apical_trunk", 1.),
        TopologyStep::new("basal_1", "soma", 0.),
        TopologyStep::new("basal_2", "basal_1", 1.),
        TopologyStep::new("basal_3", "basal_1", 1.),
    ];

    let mut mechanisms: MechanismTable = HashMap::new();
    mechanisms.insert(String::from("soma"), vec![
        hh2_spec(params, "L2Pyr_soma")?,
        gbar_spec(params, "km", "L2Pyr_soma_gbar_km")?,
    ]);
    for dendrite in dendrites.iter() {
        mechanisms.insert(dendrite.name.clone(), vec![
            hh2_spec(params, "L2Pyr_dend")?,
            gbar_spec(params, "km", "L2Pyr_dend_gbar_km")?,
        ]);
    }

    let kinetics: KineticsTable = HashMap::from([
        (ReceptorClass::AMPA, bi_exponential(params, "L2Pyr", ReceptorClass::AMPA)?),
        (ReceptorClass::NMDA, bi_exponential(params, "L2Pyr", ReceptorClass::NMDA)?),
        (ReceptorClass::GABAa, bi_exponential(params, "L2Pyr", ReceptorClass::GABAa)?),
        (ReceptorClass::GABAb, bi_exponential(params, "L2Pyr", ReceptorClass::GABAb)?),
    ]);

    let mut synapse_layout = vec![
        (String::from("soma"), ReceptorClass::GABAa),
        (String::from("soma"), ReceptorClass::GABAb),
    ];
    synapse_layout.extend(excitatory_layout(&["apical_oblique", "basal_2", "basal_3", "apical_tuft"]));

    Ok(CellRecipe {
        class: CellClass::L2Pyramidal,
        soma_name: String::from("soma"),
        soma_geometry: geometry(params, "L2Pyr_soma_L", "L2Pyr_soma_diam", "L2Pyr_soma_cm", "L2Pyr_soma_Ra")?,
        soma_start: [-50., 765., 0.],
        soma_end: [-50., 778., 0.],
        dendrites,
        topology,
        mechanisms,
        kinetics,
        synapse_layout,
        proximal_targets: vec![
            String::from("apical_oblique"),
            String::from("basal_2"),
            String::from("basal_3"),
        ],
        distal_targets: vec![String::from("apical_tuft")],
    })
}

/// Recipe for the layer 5 pyramidal population, a 5-branch apical tree plus
/// a 3-branch basal tree with the inward rectifier conductance gradient on
/// every dendrite
pub fn l5_pyramidal(params: &ParameterTable) -> Result<CellRecipe, ParameterError> {
    let dendrites = vec![
        dendrite(params, "apical_trunk", "apicaltrunk", "L5Pyr", [0., 23., 0.], [0., 83., 0.])?,
        dendrite(params, "apical_oblique", "apicaloblique", "L5Pyr", [0., 83., 0.], [-150., 83., 0.])?,
        dendrite(params, "apical_1", "apical1", "L5Pyr", [0., 83., 0.], [0., 483., 0.])?,
        dendrite(params, "apical_2", "apical2", "L5Pyr", [0., 483., 0.], [0., 883., 0.])?,
        dendrite(params, "apical_tuft", "apicaltuft", "L5Pyr", [0., 883., 0.], [0., 1133., 0.])?,
        dendrite(params, "basal_1", "basal1", "L5Pyr", [0., 0., 0.], [0., -50., 0.])?,
        dendrite(params, "basal_2", "basal2", "L5Pyr", [0., -50., 0.], [-106., -156., 0.])?,
        dendrite(params, "basal_3", "basal3", "L5Pyr", [0., -50., 0.], [106., -156., 0.])?,
    ];

    let topology = vec![
        TopologyStep::new("apical_trunk", "soma", 1.),
        TopologyStep::new("apical_1", "apical_trunk", 1.),
        TopologyStep::new("apical_2", "apical_1", 1.),
        TopologyStep::new("apical_tuft", "apical_2", 1.),
        // apical_oblique comes off the distal end of apical_trunk
        TopologyStep::new("apical_oblique", "apical_trunk", 1.),
        TopologyStep::new("basal_1", "soma", 0.),
        TopologyStep::new("basal_2", "basal_1", 1.),
        TopologyStep::new("basal_3", "basal_1", 1.),
    ];

    let mut mechanisms: MechanismTable = HashMap::new();
    mechanisms.insert(String::from("soma"), vec![
        hh2_spec(params, "L5Pyr_soma")?,
        gbar_spec(params, "ca", "L5Pyr_soma_gbar_ca")?,
        MechanismSpec::new("cad")
            .with("taur", MechanismParam::Uniform(params.get("L5Pyr_soma_taur_cad")?)),
        gbar_spec(params, "kca", "L5Pyr_soma_gbar_kca")?,
        gbar_spec(params, "km", "L5Pyr_soma_gbar_km")?,
        gbar_spec(params, "cat", "L5Pyr_soma_gbar_cat")?,
        gbar_spec(params, "ar", "L5Pyr_soma_gbar_ar")?,
    ]);
    for dendrite in dendrites.iter() {
        mechanisms.insert(dendrite.name.clone(), vec![
            hh2_spec(params, "L5Pyr_dend")?,
            gbar_spec(params, "ca", "L5Pyr_dend_gbar_ca")?,
            MechanismSpec::new("cad")
                .with("taur", MechanismParam::Uniform(params.get("L5Pyr_dend_taur_cad")?)),
            gbar_spec(params, "kca", "L5Pyr_dend_gbar_kca")?,
            gbar_spec(params, "km", "L5Pyr_dend_gbar_km")?,
            gbar_spec(params, "cat", "L5Pyr_dend_gbar_cat")?,
            MechanismSpec::new("ar")
                .with("gbar", MechanismParam::DistanceScaled {
                    base: params.get("L5Pyr_dend_gbar_ar")?,
                    rate: AR_SPATIAL_RATE,
                }),
        ]);
    }

    let kinetics: KineticsTable = HashMap::from([
        (ReceptorClass::AMPA, bi_exponential(params, "L5Pyr", ReceptorClass::AMPA)?),
        (ReceptorClass::NMDA, bi_exponential(params, "L5Pyr", ReceptorClass::NMDA)?),
        (ReceptorClass::GABAa, bi_exponential(params, "L5Pyr", ReceptorClass::GABAa)?),
        (ReceptorClass::GABAb, bi_exponential(params, "L5Pyr", ReceptorClass::GABAb)?),
    ]);

    let mut synapse_layout = vec![
        (String::from("soma"), ReceptorClass::GABAa),
        (String::from("soma"), ReceptorClass::GABAb),
        (String::from("apical_tuft"), ReceptorClass::GABAa),
    ];
    synapse_layout.extend(excitatory_layout(&["apical_oblique", "basal_2", "basal_3", "apical_tuft"]));

    Ok(CellRecipe {
        class: CellClass::L5Pyramidal,
        soma_name: String::from("soma"),
        soma_geometry: geometry(params, "L5Pyr_soma_L", "L5Pyr_soma_diam", "L5Pyr_soma_cm", "L5Pyr_soma_Ra")?,
        soma_start: [0., 0., 0.],
        soma_end: [0., 23., 0.],
        dendrites,
        topology,
        mechanisms,
        kinetics,
        synapse_layout,
        proximal_targets: vec![
            String::from("apical_oblique"),
            String::from("basal_2"),
            String::from("basal_3"),
        ],
        distal_targets: vec![String::from("apical_tuft")],
    })
}

/// Recipe for a basket population, a single somatic compartment with all
/// receptor sites at the soma, both layers share one parameterization
pub fn basket(params: &ParameterTable, class: CellClass) -> Result<CellRecipe, ParameterError> {
    let mechanisms: MechanismTable = HashMap::from([
        (String::from("soma"), vec![hh2_spec(params, "Basket_soma")?]),
    ]);

    let kinetics: KineticsTable = HashMap::from([
        (ReceptorClass::AMPA, bi_exponential(params, "Basket", ReceptorClass::AMPA)?),
        (ReceptorClass::NMDA, bi_exponential(params, "Basket", ReceptorClass::NMDA)?),
        (ReceptorClass::GABAa, bi_exponential(params, "Basket", ReceptorClass::GABAa)?),
    ]);

    let soma_geometry = geometry(params, "Basket_soma_L", "Basket_soma_diam", "Basket_soma_cm", "Basket_soma_Ra")?;

    Ok(CellRecipe {
        class,
        soma_name: String::from("soma"),
        soma_geometry,
        soma_start: [0., 0., 0.],
        soma_end: [0., soma_geometry.length, 0.],
        dendrites: vec![],
        topology: vec![],
        mechanisms,
        kinetics,
        synapse_layout: vec![
            (String::from("soma"), ReceptorClass::AMPA),
            (String::from("soma"), ReceptorClass::NMDA),
            (String::from("soma"), ReceptorClass::GABAa),
        ],
        proximal_targets: vec![String::from("soma")],
        distal_targets: vec![String::from("soma")],
    })
}

/// Builds the four standard population recipes from a parameter table
pub fn standard_recipes(params: &ParameterTable) -> Result<HashMap<CellClass, CellRecipe>, ParameterError> {
    Ok(HashMap::from([
        (CellClass::L2Pyramidal, l2_pyramidal(params)?),
        (CellClass::L2Basket, basket(params, CellClass::L2Basket)?),
        (CellClass::L5Pyramidal, l5_pyramidal(params)?),
        (CellClass::L5Basket, basket(params, CellClass::L5Basket)?),
    ]))
}
