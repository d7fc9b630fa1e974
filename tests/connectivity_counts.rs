#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use neocortical_networks::cell::{CellClass, recipes::standard_recipes};
    use neocortical_networks::cell::synapse::ReceptorClass;
    use neocortical_networks::network::{
        build_network, spatial_attenuation, BuildContext, ConnectivitySpec, NetworkTopology,
        PathwayParams, SourceRange, SourceTag,
    };
    use neocortical_networks::network::drives::{DriveKind, DriveSpec, DriveStrength, DriveTiming};
    use neocortical_networks::params::default_parameters;

    fn two_cell_topology(drives: &[DriveSpec]) -> NetworkTopology {
        let mut topology = NetworkTopology {
            cell_gids: HashMap::from([(CellClass::L2Pyramidal, vec![0, 1])]),
            cell_positions: HashMap::from([
                (CellClass::L2Pyramidal, vec![[0., 0., 0.], [1., 0., 0.]]),
            ]),
            drive_ranges: HashMap::new(),
            n_cells: 2,
        };

        let mut next_gid = topology.n_cells;
        for drive in drives.iter() {
            let len = drive.source_count(topology.n_cells);
            topology.drive_ranges.insert(drive.name.clone(), SourceRange { start: next_gid, len });
            next_gid += len;
        }

        topology
    }

    fn poisson_drive(nmda_weight: f32) -> DriveSpec {
        DriveSpec {
            name: String::from("extpois"),
            kind: DriveKind::Poisson,
            position: [0., 0., 0.],
            lamtha: 100.,
            threshold: 0.,
            trials: 1,
            seed: 3,
            timing: DriveTiming::PoissonTrain { start: 0., stop: 100., rate: 10. },
            strengths: HashMap::from([
                (CellClass::L2Pyramidal, DriveStrength {
                    ampa_weight: 5e-4,
                    nmda_weight,
                    delay: 1.,
                }),
            ]),
        }
    }

    #[test]
    pub fn test_two_cells_one_pathway_two_receptor_classes() {
        let params = default_parameters();

        let shared = PathwayParams { weight: 1., delay: 1., lamtha: 3., threshold: 0. };
        let mut connectivity = ConnectivitySpec::new();
        connectivity.add(
            CellClass::L2Pyramidal, CellClass::L2Pyramidal, ReceptorClass::AMPA,
            shared, &["basal_2"],
        ).unwrap();
        connectivity.add(
            CellClass::L2Pyramidal, CellClass::L2Pyramidal, ReceptorClass::NMDA,
            shared, &["basal_2"],
        ).unwrap();

        let ctx = BuildContext {
            recipes: standard_recipes(&params).unwrap(),
            connectivity,
            drives: vec![],
            topology: two_cell_topology(&[]),
        };

        let network = build_network(&ctx).unwrap();

        // 2 directed non-self pairs x 2 receptor classes
        assert!(network.connection_count() == 4);

        let attenuation = spatial_attenuation(1., 3.);
        for cell in network.cells.iter() {
            assert!(cell.connections().len() == 2);

            for connection in cell.connections() {
                assert!((connection.weight - attenuation).abs() < 1e-7);
                assert!((connection.delay - 1. / attenuation).abs() < 1e-4);
                assert!(connection.threshold == 0.);
            }
        }
    }

    #[test]
    pub fn test_no_self_connections() {
        let params = default_parameters();

        let ctx = BuildContext {
            recipes: standard_recipes(&params).unwrap(),
            connectivity: ConnectivitySpec::standard(&params).unwrap(),
            drives: vec![],
            topology: NetworkTopology::column_grid(3, 3, &[]),
        };

        let network = build_network(&ctx).unwrap();

        for cell in network.cells.iter() {
            assert!(
                cell.connections()
                    .iter()
                    .all(|connection| connection.source_gid != cell.gid)
            );
        }
    }

    #[test]
    pub fn test_undefined_pathways_are_silently_skipped() {
        let params = default_parameters();

        let ctx = BuildContext {
            recipes: standard_recipes(&params).unwrap(),
            connectivity: ConnectivitySpec::new(),
            drives: vec![],
            topology: two_cell_topology(&[]),
        };

        let network = build_network(&ctx).unwrap();

        assert!(network.connection_count() == 0);
        assert!(network.cells.iter().all(|cell| cell.is_frozen()));
    }

    #[test]
    pub fn test_poisson_slow_path_doubles_connections_when_positive() {
        let params = default_parameters();

        let mut counts = vec![];
        for nmda_weight in [0., 5e-4] {
            let drives = vec![poisson_drive(nmda_weight)];

            let ctx = BuildContext {
                recipes: standard_recipes(&params).unwrap(),
                connectivity: ConnectivitySpec::new(),
                topology: two_cell_topology(&drives),
                drives,
            };

            let network = build_network(&ctx).unwrap();
            counts.push(network.connection_count());

            // the zero weight fast path is still materialized
            assert!(network.connection_count() > 0);
        }

        assert!(counts[1] == 2 * counts[0]);
    }

    #[test]
    pub fn test_negative_pathway_weight_is_rejected() {
        let mut connectivity = ConnectivitySpec::new();

        let result = connectivity.add(
            CellClass::L2Pyramidal, CellClass::L2Pyramidal, ReceptorClass::AMPA,
            PathwayParams { weight: -1., delay: 1., lamtha: 3., threshold: 0. },
            &["basal_2"],
        );

        assert!(result.is_err());
    }

    #[test]
    pub fn test_nonpositive_lamtha_is_rejected() {
        let mut connectivity = ConnectivitySpec::new();

        let result = connectivity.add(
            CellClass::L2Pyramidal, CellClass::L2Pyramidal, ReceptorClass::AMPA,
            PathwayParams { weight: 1., delay: 1., lamtha: 0., threshold: 0. },
            &["basal_2"],
        );

        assert!(result.is_err());
    }

    #[test]
    pub fn test_drive_sources_are_not_cells() {
        let params = default_parameters();
        let drives = vec![poisson_drive(0.)];

        let ctx = BuildContext {
            recipes: standard_recipes(&params).unwrap(),
            connectivity: ConnectivitySpec::new(),
            topology: two_cell_topology(&drives),
            drives,
        };

        let network = build_network(&ctx).unwrap();

        for cell in network.cells.iter() {
            for connection in cell.connections() {
                assert!(connection.source == SourceTag::Drive(DriveKind::Poisson));
                assert!(connection.source_gid >= network.topology.n_cells);
            }
        }
    }
}
