pub mod policy;

pub use policy::{HeuristicPolicy, Policy, PolicyContext};
