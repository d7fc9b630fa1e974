//! # Neocortical Networks
//!
//! `neocortical_networks` is a package for assembling biophysically
//! detailed neocortical column networks. It builds per-cell dendritic
//! morphology trees from data driven recipes, inserts membrane mechanisms
//! with per compartment parameterization including a distance dependent
//! conductance gradient, places bi-exponential receptor sites of four
//! classes (AMPA, NMDA, GABAa, GABAb) at named dendritic and somatic
//! locations, and wires recurrent populations and external drives into a
//! distance attenuated connectivity graph. The finished, frozen network is
//! handed to a cable equation solver which this crate never reads back.
//!
//! Construction moves every cell through a strict phase order, morphology,
//! biophysics, receptor sites, wiring, freezing. The per-cell phases are
//! independent and run in parallel, wiring begins only after every cell's
//! receptor sites exist and is partitioned by target cell.
//!
//! ## Example Code
//!
//! ### Building the standard column
//!
//! ```rust
//! use neocortical_networks::{
//!     cell::recipes::standard_recipes,
//!     error::NeocorticalNetworkError,
//!     network::{build_network, BuildContext, ConnectivitySpec, NetworkTopology},
//!     params::default_parameters,
//! };
//!
//! fn main() -> Result<(), NeocorticalNetworkError> {
//!     let params = default_parameters();
//!
//!     // a 3x3 pyramidal sheet per layer, no external drives
//!     let ctx = BuildContext {
//!         recipes: standard_recipes(&params)?,
//!         connectivity: ConnectivitySpec::standard(&params)?,
//!         drives: vec![],
//!         topology: NetworkTopology::column_grid(3, 3, &[]),
//!     };
//!
//!     let network = build_network(&ctx)?;
//!
//!     assert!(network.cells.iter().all(|cell| cell.is_frozen()));
//!     assert!(network.connection_count() > 0);
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Driving the column with a Poisson source
//!
//! ```rust
//! use std::collections::HashMap;
//! use neocortical_networks::{
//!     cell::{recipes::standard_recipes, CellClass},
//!     error::NeocorticalNetworkError,
//!     network::{build_network, BuildContext, ConnectivitySpec, NetworkTopology},
//!     network::drives::{DriveKind, DriveSpec, DriveStrength, DriveTiming},
//!     params::default_parameters,
//! };
//!
//! fn main() -> Result<(), NeocorticalNetworkError> {
//!     let params = default_parameters();
//!
//!     let drive = DriveSpec {
//!         name: String::from("extpois"),
//!         kind: DriveKind::Poisson,
//!         position: [1., 1., 0.],
//!         lamtha: 100.,
//!         threshold: 0.,
//!         trials: 1,
//!         seed: 42,
//!         timing: DriveTiming::PoissonTrain { start: 0., stop: 250., rate: 40. },
//!         strengths: HashMap::from([
//!             (CellClass::L2Pyramidal, DriveStrength {
//!                 ampa_weight: 5e-4,
//!                 nmda_weight: 0.,
//!                 delay: 1.,
//!             }),
//!         ]),
//!     };
//!
//!     let drives = vec![drive];
//!     let ctx = BuildContext {
//!         recipes: standard_recipes(&params)?,
//!         connectivity: ConnectivitySpec::standard(&params)?,
//!         topology: NetworkTopology::column_grid(2, 2, &drives),
//!         drives,
//!     };
//!
//!     let network = build_network(&ctx)?;
//!
//!     // one deterministic event train per synthetic drive source
//!     assert!(!network.drive_events.is_empty());
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod params;
pub mod cell;
pub mod network;
