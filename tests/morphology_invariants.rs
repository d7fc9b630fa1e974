#[cfg(test)]
mod tests {
    use neocortical_networks::cell::morphology::{
        discretization_segments, segment_midpoints, DendriteSpec, DendriticTree,
        SectionGeometry, TopologyStep,
    };
    use neocortical_networks::cell::recipes::{l2_pyramidal, l5_pyramidal};
    use neocortical_networks::params::default_parameters;

    fn geometry(length: f32) -> SectionGeometry {
        SectionGeometry {
            length,
            diameter: 2.,
            axial_resistance: 200.,
            capacitance: 0.85,
        }
    }

    fn dendrite(name: &str, length: f32) -> DendriteSpec {
        DendriteSpec {
            name: name.to_string(),
            geometry: geometry(length),
            start: [0., 0., 0.],
            end: [0., length, 0.],
        }
    }

    #[test]
    pub fn test_short_sections_get_one_segment() {
        assert!(discretization_segments(10.) == 1);
        assert!(discretization_segments(85.) == 1);
        assert!(discretization_segments(100.) == 1);
    }

    #[test]
    pub fn test_long_sections_get_odd_segment_counts() {
        for length in [101., 238., 255., 306., 340., 425., 680., 1000.] {
            let segments = discretization_segments(length);
            let floor = (length / 50.) as usize;

            assert!(segments % 2 == 1);
            assert!(segments >= floor);
            assert!(segments <= floor + 1);
        }
    }

    #[test]
    pub fn test_segment_midpoints_avoid_boundaries() {
        for segments in [1, 3, 5, 7, 13] {
            let midpoints = segment_midpoints(segments);

            assert!(midpoints.len() == segments);
            // the section midpoint is always a sampling point, never a boundary
            assert!(midpoints.contains(&0.5));
            assert!(midpoints.iter().all(|x| *x > 0. && *x < 1.));
        }
    }

    #[test]
    pub fn test_standard_trees_are_rooted_and_acyclic() {
        let params = default_parameters();

        for recipe in [l2_pyramidal(&params).unwrap(), l5_pyramidal(&params).unwrap()] {
            let tree = DendriticTree::build(
                &recipe.soma_name,
                recipe.soma_geometry,
                recipe.soma_start,
                recipe.soma_end,
                &recipe.dendrites,
                &recipe.topology,
            ).unwrap();

            assert!(tree.root().parent.is_none());
            assert!(tree.root().name == "soma");

            for compartment in tree.compartments() {
                let path = tree.path_to_root(&compartment.name).unwrap();

                assert!(path.len() <= tree.len());
                assert!(*path.last().unwrap() == 0);
            }
        }
    }

    #[test]
    pub fn test_path_distance_follows_parent_chain() {
        let params = default_parameters();
        let recipe = l5_pyramidal(&params).unwrap();

        let tree = DendriticTree::build(
            &recipe.soma_name,
            recipe.soma_geometry,
            recipe.soma_start,
            recipe.soma_end,
            &recipe.dendrites,
            &recipe.topology,
        ).unwrap();

        let soma_length = recipe.soma_geometry.length;
        let trunk_length = tree.get("apical_trunk").unwrap().geometry.length;

        // apical_trunk attaches to the far end of the soma
        assert!((tree.path_distance("apical_trunk", 0.).unwrap() - soma_length).abs() < 1e-4);
        assert!(
            (tree.path_distance("apical_trunk", 0.5).unwrap()
                - (soma_length + 0.5 * trunk_length)).abs() < 1e-4
        );
        assert!(
            (tree.path_distance("apical_1", 0.).unwrap()
                - (soma_length + trunk_length)).abs() < 1e-4
        );

        // basal_1 attaches to the near end of the soma
        assert!(tree.path_distance("basal_1", 0.).unwrap() == 0.);
    }

    #[test]
    pub fn test_unknown_parent_is_fatal() {
        let result = DendriticTree::build(
            "soma",
            geometry(20.),
            [0., 0., 0.],
            [0., 20., 0.],
            &[dendrite("apical_trunk", 50.)],
            &[TopologyStep::new("apical_trunk", "apical_2", 1.)],
        );

        assert!(result.is_err());
    }

    #[test]
    pub fn test_unknown_child_is_fatal() {
        let result = DendriticTree::build(
            "soma",
            geometry(20.),
            [0., 0., 0.],
            [0., 20., 0.],
            &[dendrite("apical_trunk", 50.)],
            &[TopologyStep::new("apical_2", "soma", 1.)],
        );

        assert!(result.is_err());
    }

    #[test]
    pub fn test_detached_dendrite_is_fatal() {
        let result = DendriticTree::build(
            "soma",
            geometry(20.),
            [0., 0., 0.],
            [0., 20., 0.],
            &[dendrite("apical_trunk", 50.), dendrite("basal_1", 50.)],
            &[TopologyStep::new("apical_trunk", "soma", 1.)],
        );

        assert!(result.is_err());
    }

    #[test]
    pub fn test_fractional_attachment_is_rejected() {
        let result = DendriticTree::build(
            "soma",
            geometry(20.),
            [0., 0., 0.],
            [0., 20., 0.],
            &[dendrite("apical_trunk", 50.)],
            &[TopologyStep::new("apical_trunk", "soma", 0.5)],
        );

        assert!(result.is_err());
    }
}
