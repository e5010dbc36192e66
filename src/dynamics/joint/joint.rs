use crate::dynamics::{MouseJoint, RigidBodyHandle};
use crate::math::{Point, Real};

#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
/// An enum grouping all possible types of joints.
///
/// Joint kinds are fixed and known at build time, so per-kind solver dispatch
/// is done by exhaustive matching on this enum rather than through trait
/// objects.
pub enum JointParams {
    /// A mouse joint that softly drags one body's anchor toward a target point.
    MouseJoint(MouseJoint),
}

impl JointParams {
    /// An integer identifier for each type of joint.
    pub fn type_id(&self) -> usize {
        match self {
            JointParams::MouseJoint(_) => 0,
        }
    }

    /// Gets a reference to the underlying mouse joint, if `self` is one.
    pub fn as_mouse_joint(&self) -> Option<&MouseJoint> {
        match self {
            JointParams::MouseJoint(j) => Some(j),
        }
    }

    /// Gets a mutable reference to the underlying mouse joint, if `self` is one.
    pub fn as_mouse_joint_mut(&mut self) -> Option<&mut MouseJoint> {
        match self {
            JointParams::MouseJoint(j) => Some(j),
        }
    }
}

impl From<MouseJoint> for JointParams {
    fn from(j: MouseJoint) -> Self {
        JointParams::MouseJoint(j)
    }
}

#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
/// A joint attached to a single dynamic body.
pub struct Joint {
    /// Handle of the rigid body driven by this joint.
    pub body: RigidBodyHandle,
    /// The joint anchor, expressed in the local space of the driven body.
    pub local_anchor: Point<Real>,
    /// The joint variant and its parameters.
    pub params: JointParams,
}

impl Joint {
    /// Creates a joint driving `body` through its `local_anchor` point.
    pub fn new(
        body: RigidBodyHandle,
        local_anchor: Point<Real>,
        params: impl Into<JointParams>,
    ) -> Self {
        Self {
            body,
            local_anchor,
            params: params.into(),
        }
    }
}

/// Failure modes of handle-based joint accesses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum JointError {
    /// The handle does not resolve to a live joint: it belongs to another
    /// world, its slot was recycled, or the joint was removed.
    #[error("the joint handle is stale or belongs to a different world")]
    InvalidHandle,
    /// The handle resolves to a live joint of a different variant than the
    /// operation expects.
    #[error("the joint has a different type than expected")]
    TypeMismatch,
}
