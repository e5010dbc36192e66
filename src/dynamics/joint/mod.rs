//! Joints and the set containing them.

pub use self::joint::{Joint, JointError, JointParams};
pub use self::joint_set::{JointHandle, JointSet};
pub use self::mouse_joint::{MouseJoint, MouseJointBuilder};

pub(crate) use self::joint_set::JointIndex;

mod joint;
mod joint_set;
mod mouse_joint;
