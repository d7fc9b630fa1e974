#[cfg(test)]
mod tests {
    use neocortical_networks::cell::{BuildPhase, Cell, CellClass, recipes::standard_recipes};
    use neocortical_networks::params::default_parameters;

    fn fresh_cell() -> Cell {
        Cell::new(0, [0., 0., 0.], CellClass::L5Pyramidal)
    }

    #[test]
    pub fn test_phases_advance_in_order() {
        let params = default_parameters();
        let recipes = standard_recipes(&params).unwrap();
        let recipe = &recipes[&CellClass::L5Pyramidal];

        let mut cell = fresh_cell();
        assert!(cell.phase() == BuildPhase::Unbuilt);

        cell.assign_morphology(recipe).unwrap();
        assert!(cell.phase() == BuildPhase::MorphologyAssigned);

        cell.assign_biophysics(recipe).unwrap();
        assert!(cell.phase() == BuildPhase::BiophysicsAssigned);

        cell.create_synapses(recipe).unwrap();
        assert!(cell.phase() == BuildPhase::SynapsesCreated);

        cell.wire(vec![]).unwrap();
        assert!(cell.phase() == BuildPhase::Wired);

        cell.freeze().unwrap();
        assert!(cell.is_frozen());
    }

    #[test]
    pub fn test_skipping_a_phase_is_fatal() {
        let params = default_parameters();
        let recipes = standard_recipes(&params).unwrap();
        let recipe = &recipes[&CellClass::L5Pyramidal];

        let mut cell = fresh_cell();
        assert!(cell.assign_biophysics(recipe).is_err());

        let mut cell = fresh_cell();
        assert!(cell.wire(vec![]).is_err());

        let mut cell = fresh_cell();
        assert!(cell.freeze().is_err());
    }

    #[test]
    pub fn test_phases_cannot_be_retried() {
        let params = default_parameters();
        let recipes = standard_recipes(&params).unwrap();
        let recipe = &recipes[&CellClass::L5Pyramidal];

        let mut cell = fresh_cell();
        cell.build(recipe).unwrap();

        assert!(cell.assign_morphology(recipe).is_err());
        assert!(cell.create_synapses(recipe).is_err());

        cell.wire(vec![]).unwrap();
        assert!(cell.wire(vec![]).is_err());

        cell.freeze().unwrap();
        assert!(cell.freeze().is_err());
    }
}
