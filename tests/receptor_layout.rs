#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use neocortical_networks::cell::{CellClass, recipes::standard_recipes};
    use neocortical_networks::network::{
        build_network, BuildContext, ConnectivitySpec, Network, NetworkTopology,
    };
    use neocortical_networks::params::default_parameters;

    fn standard_network(rows: usize, cols: usize) -> Network {
        let params = default_parameters();

        let ctx = BuildContext {
            recipes: standard_recipes(&params).unwrap(),
            connectivity: ConnectivitySpec::standard(&params).unwrap(),
            drives: vec![],
            topology: NetworkTopology::column_grid(rows, cols, &[]),
        };

        build_network(&ctx).unwrap()
    }

    fn site_names(network: &Network, gid: usize) -> HashSet<String> {
        network.cell(gid)
            .unwrap()
            .receptor_sites
            .keys()
            .cloned()
            .collect()
    }

    #[test]
    pub fn test_cells_of_a_population_share_site_sets_and_kinetics() {
        let network = standard_network(3, 3);

        for class in [
            CellClass::L2Pyramidal,
            CellClass::L2Basket,
            CellClass::L5Pyramidal,
            CellClass::L5Basket,
        ] {
            let (gids, _) = network.topology.population(class);
            assert!(!gids.is_empty());

            let reference_names = site_names(&network, gids[0]);
            let reference_sites = &network.cell(gids[0]).unwrap().receptor_sites;

            for gid in gids.iter() {
                assert!(site_names(&network, *gid) == reference_names);

                let sites = &network.cell(*gid).unwrap().receptor_sites;
                for (name, site) in sites.iter() {
                    assert!(site.params == reference_sites[name].params);
                    assert!(site.position == 0.5);
                }
            }
        }
    }

    #[test]
    pub fn test_pyramidal_site_layouts() {
        let network = standard_network(2, 2);

        let (l2_gids, _) = network.topology.population(CellClass::L2Pyramidal);
        let expected_l2: HashSet<String> = [
            "soma_gabaa", "soma_gabab",
            "apical_oblique_ampa", "apical_oblique_nmda",
            "basal_2_ampa", "basal_2_nmda",
            "basal_3_ampa", "basal_3_nmda",
            "apical_tuft_ampa", "apical_tuft_nmda",
        ].iter().map(|name| name.to_string()).collect();

        assert!(site_names(&network, l2_gids[0]) == expected_l2);

        // layer 5 pyramidal cells add a fast inhibitory site at the tuft
        let (l5_gids, _) = network.topology.population(CellClass::L5Pyramidal);
        let l5_names = site_names(&network, l5_gids[0]);

        assert!(l5_names.len() == expected_l2.len() + 1);
        assert!(l5_names.contains("apical_tuft_gabaa"));
    }

    #[test]
    pub fn test_basket_sites_are_somatic_only() {
        let network = standard_network(2, 2);

        for class in [CellClass::L2Basket, CellClass::L5Basket] {
            let (gids, _) = network.topology.population(class);
            let expected: HashSet<String> = ["soma_ampa", "soma_nmda", "soma_gabaa"]
                .iter()
                .map(|name| name.to_string())
                .collect();

            assert!(site_names(&network, gids[0]) == expected);
        }
    }

    #[test]
    pub fn test_inhibitory_reversals_are_hyperpolarized() {
        let network = standard_network(2, 2);

        for cell in network.cells.iter() {
            for site in cell.receptor_sites.values() {
                if site.receptor.is_excitatory() {
                    assert!(site.params.reversal == 0.);
                } else {
                    assert!(site.params.reversal == -80.);
                }

                assert!(site.params.tau_rise > 0.);
                assert!(site.params.tau_decay > site.params.tau_rise);
            }
        }
    }
}
