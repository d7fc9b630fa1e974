use std::fmt::{Display, Debug, Formatter, Result};


/// Error set for potential morphology errors
pub enum MorphologyError {
    /// A topology step references a compartment name that does not exist
    UnknownCompartment(String),
    /// A compartment name was declared twice within one cell
    DuplicateCompartment(String),
    /// An attachment fraction other than `0.` or `1.` was requested
    InvalidAttachment(String),
    /// A declared dendrite was never attached by the topology recipe
    DetachedCompartment(String),
}

impl Display for MorphologyError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let err_msg = match self {
            MorphologyError::UnknownCompartment(name) => format!("Unknown compartment: {}", name),
            MorphologyError::DuplicateCompartment(name) => format!("Duplicate compartment: {}", name),
            MorphologyError::InvalidAttachment(name) => format!("Attachment fraction must be 0 or 1: {}", name),
            MorphologyError::DetachedCompartment(name) => format!("Compartment never attached to the tree: {}", name),
        };

        write!(f, "{}", err_msg)
    }
}

impl Debug for MorphologyError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

/// Error set for potential membrane mechanism errors
pub enum MechanismError {
    /// Mechanism name is not in the known mechanism set
    UnknownMechanism(String),
    /// Mechanism table references a compartment the cell does not have
    UnknownCompartment(String),
}

impl Display for MechanismError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let err_msg = match self {
            MechanismError::UnknownMechanism(name) => format!("Unknown mechanism: {}", name),
            MechanismError::UnknownCompartment(name) => format!("Mechanism table references unknown compartment: {}", name),
        };

        write!(f, "{}", err_msg)
    }
}

impl Debug for MechanismError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

/// Error set for potential parameter table errors
pub enum ParameterError {
    /// A required entry is absent from the parameter table
    Missing(String),
    /// A table entry is outside its valid range (negative weight or delay,
    /// nonpositive space constant)
    OutOfRange(String),
}

impl Display for ParameterError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let err_msg = match self {
            ParameterError::Missing(name) => format!("Missing parameter: {}", name),
            ParameterError::OutOfRange(name) => format!("Parameter out of range: {}", name),
        };

        write!(f, "{}", err_msg)
    }
}

impl Debug for ParameterError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

/// Error set for potential network assembly errors
pub enum BuildError {
    /// A construction step was applied outside the required phase order
    WrongPhase(String),
    /// A pathway routes to a receptor site name the target cell does not have
    UnknownReceptorSite(String),
    /// No recipe was supplied for a population present in the topology
    MissingRecipe(String),
    /// A drive has no source identifier range in the topology
    MissingDriveRange(String),
}

impl Display for BuildError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let err_msg = match self {
            BuildError::WrongPhase(msg) => format!("Build phase violation: {}", msg),
            BuildError::UnknownReceptorSite(name) => format!("Unknown receptor site: {}", name),
            BuildError::MissingRecipe(name) => format!("No recipe for population: {}", name),
            BuildError::MissingDriveRange(name) => format!("No source identifier range for drive: {}", name),
        };

        write!(f, "{}", err_msg)
    }
}

impl Debug for BuildError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

/// A set of errors that may occur when using the library
pub enum NeocorticalNetworkError {
    /// Errors related to compartment tree construction
    MorphologyRelatedError(MorphologyError),
    /// Errors related to membrane mechanism assignment
    MechanismRelatedError(MechanismError),
    /// Errors related to parameter tables
    ParameterRelatedError(ParameterError),
    /// Errors related to network assembly and wiring
    BuildRelatedError(BuildError),
}

impl Display for NeocorticalNetworkError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            NeocorticalNetworkError::MorphologyRelatedError(err) => write!(f, "{}", err),
            NeocorticalNetworkError::MechanismRelatedError(err) => write!(f, "{}", err),
            NeocorticalNetworkError::ParameterRelatedError(err) => write!(f, "{}", err),
            NeocorticalNetworkError::BuildRelatedError(err) => write!(f, "{}", err),
        }
    }
}

impl Debug for NeocorticalNetworkError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

impl From<MorphologyError> for NeocorticalNetworkError {
    fn from(err: MorphologyError) -> NeocorticalNetworkError {
        NeocorticalNetworkError::MorphologyRelatedError(err)
    }
}

impl From<MechanismError> for NeocorticalNetworkError {
    fn from(err: MechanismError) -> NeocorticalNetworkError {
        NeocorticalNetworkError::MechanismRelatedError(err)
    }
}

impl From<ParameterError> for NeocorticalNetworkError {
    fn from(err: ParameterError) -> NeocorticalNetworkError {
        NeocorticalNetworkError::ParameterRelatedError(err)
    }
}

impl From<BuildError> for NeocorticalNetworkError {
    fn from(err: BuildError) -> NeocorticalNetworkError {
        NeocorticalNetworkError::BuildRelatedError(err)
    }
}
