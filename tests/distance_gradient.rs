#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use neocortical_networks::cell::biophysics::{
        assign_mechanisms, MechanismParam, MechanismSpec, MechanismTable, MechanismValue,
    };
    use neocortical_networks::cell::morphology::DendriticTree;
    use neocortical_networks::cell::recipes::l5_pyramidal;
    use neocortical_networks::params::default_parameters;

    const BASE: f32 = 1e-6;
    const RATE: f32 = 3e-3;

    fn built_tree() -> DendriticTree {
        let params = default_parameters();
        let recipe = l5_pyramidal(&params).unwrap();

        let mut tree = DendriticTree::build(
            &recipe.soma_name,
            recipe.soma_geometry,
            recipe.soma_start,
            recipe.soma_end,
            &recipe.dendrites,
            &recipe.topology,
        ).unwrap();

        assign_mechanisms(&mut tree, &recipe.mechanisms).unwrap();

        tree
    }

    fn gradient_values<'a>(tree: &'a DendriticTree, compartment: &str) -> &'a [f32] {
        match &tree.get(compartment).unwrap().mechanisms["ar"].params["gbar"] {
            MechanismValue::PerSegment(values) => values,
            MechanismValue::Uniform(_) => panic!("expected a per-segment gradient"),
        }
    }

    #[test]
    pub fn test_soma_conductance_equals_base_value() {
        let tree = built_tree();

        let soma_gbar = &tree.root().mechanisms["ar"].params["gbar"];

        assert!(*soma_gbar == MechanismValue::Uniform(BASE));
    }

    #[test]
    pub fn test_gradient_matches_closed_form() {
        let tree = built_tree();

        for compartment in ["apical_trunk", "apical_1", "apical_tuft", "basal_2"] {
            let values = gradient_values(&tree, compartment);
            let distances = tree.midpoint_distances(compartment).unwrap();

            assert!(values.len() == tree.get(compartment).unwrap().segments);

            for (value, distance) in values.iter().zip(distances.iter()) {
                let expected = BASE * (RATE * distance).exp();

                assert!((value - expected).abs() < 1e-12);
                assert!(*value >= BASE);
            }
        }
    }

    #[test]
    pub fn test_gradient_strictly_increases_with_path_distance() {
        let tree = built_tree();

        for compartment in ["apical_1", "apical_2", "apical_oblique", "basal_2"] {
            let values = gradient_values(&tree, compartment);

            for pair in values.windows(2) {
                assert!(pair[1] > pair[0]);
            }
        }

        // the apical chain keeps growing across section boundaries
        let trunk = gradient_values(&tree, "apical_trunk");
        let apical_1 = gradient_values(&tree, "apical_1");
        let apical_2 = gradient_values(&tree, "apical_2");
        let tuft = gradient_values(&tree, "apical_tuft");

        assert!(apical_1[0] > *trunk.last().unwrap());
        assert!(apical_2[0] > *apical_1.last().unwrap());
        assert!(tuft[0] > *apical_2.last().unwrap());
    }

    #[test]
    pub fn test_insertion_is_idempotent() {
        let params = default_parameters();
        let recipe = l5_pyramidal(&params).unwrap();

        let mut tree = DendriticTree::build(
            &recipe.soma_name,
            recipe.soma_geometry,
            recipe.soma_start,
            recipe.soma_end,
            &recipe.dendrites,
            &recipe.topology,
        ).unwrap();

        assign_mechanisms(&mut tree, &recipe.mechanisms).unwrap();
        let counts: Vec<usize> = tree.compartments()
            .iter()
            .map(|compartment| compartment.mechanisms.len())
            .collect();

        // re-insertion overwrites parameters without duplicating state
        assign_mechanisms(&mut tree, &recipe.mechanisms).unwrap();
        let recounts: Vec<usize> = tree.compartments()
            .iter()
            .map(|compartment| compartment.mechanisms.len())
            .collect();

        assert!(counts == recounts);
    }

    #[test]
    pub fn test_unknown_mechanism_is_fatal_before_mutation() {
        let params = default_parameters();
        let recipe = l5_pyramidal(&params).unwrap();

        let mut tree = DendriticTree::build(
            &recipe.soma_name,
            recipe.soma_geometry,
            recipe.soma_start,
            recipe.soma_end,
            &recipe.dendrites,
            &recipe.topology,
        ).unwrap();

        let table: MechanismTable = HashMap::from([
            (String::from("soma"), vec![
                MechanismSpec::new("hh2").with("gkbar", MechanismParam::Uniform(0.01)),
                MechanismSpec::new("kv").with("gbar", MechanismParam::Uniform(1.)),
            ]),
        ]);

        assert!(assign_mechanisms(&mut tree, &table).is_err());
        assert!(tree.root().mechanisms.is_empty());
    }

    #[test]
    pub fn test_unknown_compartment_is_fatal_before_mutation() {
        let params = default_parameters();
        let recipe = l5_pyramidal(&params).unwrap();

        let mut tree = DendriticTree::build(
            &recipe.soma_name,
            recipe.soma_geometry,
            recipe.soma_start,
            recipe.soma_end,
            &recipe.dendrites,
            &recipe.topology,
        ).unwrap();

        let table: MechanismTable = HashMap::from([
            (String::from("soma"), vec![
                MechanismSpec::new("hh2").with("gkbar", MechanismParam::Uniform(0.01)),
            ]),
            (String::from("axon"), vec![
                MechanismSpec::new("hh2").with("gkbar", MechanismParam::Uniform(0.01)),
            ]),
        ]);

        assert!(assign_mechanisms(&mut tree, &table).is_err());
        assert!(tree.root().mechanisms.is_empty());
    }
}
