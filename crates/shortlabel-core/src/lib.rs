pub mod amino_acid;
pub mod feature;
pub mod interactor;
pub mod notation;

pub use feature::*;
pub use interactor::*;
