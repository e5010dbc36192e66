//! Structures related to dynamics: rigid-bodies, joints, and the constraint solver.

pub use self::integration_parameters::IntegrationParameters;
pub use self::joint::{
    Joint, JointError, JointHandle, JointParams, JointSet, MouseJoint, MouseJointBuilder,
};
pub use self::rigid_body::{RigidBody, RigidBodyBuilder, RigidBodyHandle, RigidBodySet};

mod integration_parameters;
pub mod joint;
mod rigid_body;
pub(crate) mod solver;
