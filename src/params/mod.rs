//! A flat parameter table consumed from an external parameter loader along
//! with the default values of the published column model.

use std::collections::HashMap;
use crate::error::ParameterError;


/// Flat mapping from parameter name to numeric value, the hand-off format of
/// the external parameter loader, population, compartment, mechanism, and
/// field are encoded in the string key (`"L5Pyr_soma_gkbar_hh2"`)
#[derive(Debug, Clone, Default)]
pub struct ParameterTable {
    values: HashMap<String, f32>,
}

impl ParameterTable {
    pub fn new() -> Self {
        ParameterTable { values: HashMap::new() }
    }

    /// Looks up a required entry, a missing key is fatal to the build
    pub fn get(&self, name: &str) -> Result<f32, ParameterError> {
        match self.values.get(name) {
            Some(value) => Ok(*value),
            None => Err(ParameterError::Missing(name.to_string())),
        }
    }

    /// Sets a single entry, overwriting any previous value
    pub fn set(&mut self, name: &str, value: f32) {
        self.values.insert(name.to_string(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Overlays the given entries on top of this table, entries not present
    /// in `overrides` keep their current values
    pub fn with_overrides(mut self, overrides: &HashMap<String, f32>) -> Self {
        for (name, value) in overrides.iter() {
            self.values.insert(name.clone(), *value);
        }

        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn insert_all(table: &mut ParameterTable, entries: &[(&str, f32)]) {
    for (name, value) in entries.iter() {
        table.set(name, *value);
    }
}

/// Returns the default parameter table of the column model, geometry in um,
/// reversal potentials in mV, conductances in S/cm^2 unless noted, time
/// constants in ms
pub fn default_parameters() -> ParameterTable {
    let mut table = ParameterTable::new();

    // layer 2 pyramidal geometry
    insert_all(&mut table, &[
        ("L2Pyr_soma_L", 22.1),
        ("L2Pyr_soma_diam", 23.4),
        ("L2Pyr_soma_cm", 0.6195),
        ("L2Pyr_soma_Ra", 200.),
        ("L2Pyr_dend_cm", 0.6195),
        ("L2Pyr_dend_Ra", 200.),
        ("L2Pyr_apicaltrunk_L", 59.5),
        ("L2Pyr_apicaltrunk_diam", 4.25),
        ("L2Pyr_apical1_L", 306.),
        ("L2Pyr_apical1_diam", 4.08),
        ("L2Pyr_apicaltuft_L", 238.),
        ("L2Pyr_apicaltuft_diam", 3.4),
        ("L2Pyr_apicaloblique_L", 340.),
        ("L2Pyr_apicaloblique_diam", 3.91),
        ("L2Pyr_basal1_L", 85.),
        ("L2Pyr_basal1_diam", 4.25),
        ("L2Pyr_basal2_L", 255.),
        ("L2Pyr_basal2_diam", 2.72),
        ("L2Pyr_basal3_L", 255.),
        ("L2Pyr_basal3_diam", 2.72),
    ]);

    // layer 2 pyramidal membrane mechanisms
    insert_all(&mut table, &[
        ("L2Pyr_soma_gkbar_hh2", 0.01),
        ("L2Pyr_soma_gnabar_hh2", 0.18),
        ("L2Pyr_soma_gl_hh2", 4.26e-5),
        ("L2Pyr_soma_el_hh2", -65.),
        ("L2Pyr_soma_gbar_km", 250.),
        ("L2Pyr_dend_gkbar_hh2", 0.01),
        ("L2Pyr_dend_gnabar_hh2", 0.15),
        ("L2Pyr_dend_gl_hh2", 4.26e-5),
        ("L2Pyr_dend_el_hh2", -65.),
        ("L2Pyr_dend_gbar_km", 250.),
    ]);

    // layer 2 pyramidal receptor kinetics
    insert_all(&mut table, &[
        ("L2Pyr_ampa_e", 0.),
        ("L2Pyr_ampa_tau1", 0.5),
        ("L2Pyr_ampa_tau2", 5.),
        ("L2Pyr_nmda_e", 0.),
        ("L2Pyr_nmda_tau1", 1.),
        ("L2Pyr_nmda_tau2", 20.),
        ("L2Pyr_gabaa_e", -80.),
        ("L2Pyr_gabaa_tau1", 0.5),
        ("L2Pyr_gabaa_tau2", 5.),
        ("L2Pyr_gabab_e", -80.),
        ("L2Pyr_gabab_tau1", 1.),
        ("L2Pyr_gabab_tau2", 20.),
    ]);

    // layer 5 pyramidal geometry
    insert_all(&mut table, &[
        ("L5Pyr_soma_L", 39.),
        ("L5Pyr_soma_diam", 28.9),
        ("L5Pyr_soma_cm", 0.85),
        ("L5Pyr_soma_Ra", 200.),
        ("L5Pyr_dend_cm", 0.85),
        ("L5Pyr_dend_Ra", 200.),
        ("L5Pyr_apicaltrunk_L", 102.),
        ("L5Pyr_apicaltrunk_diam", 10.2),
        ("L5Pyr_apical1_L", 680.),
        ("L5Pyr_apical1_diam", 7.48),
        ("L5Pyr_apical2_L", 680.),
        ("L5Pyr_apical2_diam", 4.93),
        ("L5Pyr_apicaltuft_L", 425.),
        ("L5Pyr_apicaltuft_diam", 3.4),
        ("L5Pyr_apicaloblique_L", 255.),
        ("L5Pyr_apicaloblique_diam", 5.1),
        ("L5Pyr_basal1_L", 85.),
        ("L5Pyr_basal1_diam", 6.8),
        ("L5Pyr_basal2_L", 255.),
        ("L5Pyr_basal2_diam", 8.5),
        ("L5Pyr_basal3_L", 255.),
        ("L5Pyr_basal3_diam", 8.5),
    ]);

    // layer 5 pyramidal membrane mechanisms, km, ca, and cat conductances
    // are in pS/um^2
    insert_all(&mut table, &[
        ("L5Pyr_soma_gkbar_hh2", 0.01),
        ("L5Pyr_soma_gnabar_hh2", 0.16),
        ("L5Pyr_soma_gl_hh2", 4.26e-5),
        ("L5Pyr_soma_el_hh2", -65.),
        ("L5Pyr_soma_gbar_ca", 60.),
        ("L5Pyr_soma_taur_cad", 20.),
        ("L5Pyr_soma_gbar_kca", 2e-4),
        ("L5Pyr_soma_gbar_km", 200.),
        ("L5Pyr_soma_gbar_cat", 2e-4),
        ("L5Pyr_soma_gbar_ar", 1e-6),
        ("L5Pyr_dend_gkbar_hh2", 0.01),
        ("L5Pyr_dend_gnabar_hh2", 0.14),
        ("L5Pyr_dend_gl_hh2", 4.26e-5),
        ("L5Pyr_dend_el_hh2", -71.),
        ("L5Pyr_dend_gbar_ca", 60.),
        ("L5Pyr_dend_taur_cad", 20.),
        ("L5Pyr_dend_gbar_kca", 2e-4),
        ("L5Pyr_dend_gbar_km", 200.),
        ("L5Pyr_dend_gbar_cat", 2e-4),
        ("L5Pyr_dend_gbar_ar", 1e-6),
    ]);

    // layer 5 pyramidal receptor kinetics
    insert_all(&mut table, &[
        ("L5Pyr_ampa_e", 0.),
        ("L5Pyr_ampa_tau1", 0.5),
        ("L5Pyr_ampa_tau2", 5.),
        ("L5Pyr_nmda_e", 0.),
        ("L5Pyr_nmda_tau1", 1.),
        ("L5Pyr_nmda_tau2", 20.),
        ("L5Pyr_gabaa_e", -80.),
        ("L5Pyr_gabaa_tau1", 0.5),
        ("L5Pyr_gabaa_tau2", 5.),
        ("L5Pyr_gabab_e", -80.),
        ("L5Pyr_gabab_tau1", 1.),
        ("L5Pyr_gabab_tau2", 20.),
    ]);

    // basket cells, both layers share one parameterization
    insert_all(&mut table, &[
        ("Basket_soma_L", 39.),
        ("Basket_soma_diam", 20.),
        ("Basket_soma_cm", 0.85),
        ("Basket_soma_Ra", 200.),
        ("Basket_soma_gkbar_hh2", 0.036),
        ("Basket_soma_gnabar_hh2", 0.12),
        ("Basket_soma_gl_hh2", 3e-4),
        ("Basket_soma_el_hh2", -54.3),
        ("Basket_ampa_e", 0.),
        ("Basket_ampa_tau1", 0.5),
        ("Basket_ampa_tau2", 5.),
        ("Basket_nmda_e", 0.),
        ("Basket_nmda_tau1", 1.),
        ("Basket_nmda_tau2", 20.),
        ("Basket_gabaa_e", -80.),
        ("Basket_gabaa_tau1", 0.5),
        ("Basket_gabaa_tau2", 5.),
    ]);

    // recurrent pathway maximal conductances (uS) and shared spike threshold (mV)
    insert_all(&mut table, &[
        ("gbar_L2Pyr_L2Pyr_ampa", 5e-4),
        ("gbar_L2Pyr_L2Pyr_nmda", 5e-4),
        ("gbar_L2Basket_L2Pyr_gabaa", 5e-2),
        ("gbar_L2Basket_L2Pyr_gabab", 5e-2),
        ("gbar_L2Pyr_L2Basket_ampa", 5e-4),
        ("gbar_L2Basket_L2Basket_gabaa", 2e-2),
        ("gbar_L5Pyr_L5Pyr_ampa", 5e-4),
        ("gbar_L5Pyr_L5Pyr_nmda", 5e-4),
        ("gbar_L5Basket_L5Pyr_gabaa", 2.5e-2),
        ("gbar_L5Basket_L5Pyr_gabab", 2.5e-2),
        ("gbar_L2Pyr_L5Pyr_ampa", 2.5e-4),
        ("gbar_L2Basket_L5Pyr_gabaa", 1e-3),
        ("gbar_L2Pyr_L5Basket_ampa", 2.5e-4),
        ("gbar_L5Pyr_L5Basket_ampa", 5e-4),
        ("gbar_L5Basket_L5Basket_gabaa", 2e-2),
        ("threshold", 0.),
    ]);

    table
}
