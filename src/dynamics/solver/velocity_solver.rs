use std::collections::HashMap;

use crate::dynamics::solver::{MouseVelocityConstraint, SolverBodies};
use crate::dynamics::{IntegrationParameters, JointParams, JointSet, RigidBodyHandle};

/// Runs the velocity-level solve for one simulation step.
///
/// For every joint, its constraint is initialized exactly once, warmstarted,
/// then refined by `max_velocity_iterations` Gauss-Seidel passes before the
/// accumulated impulses are written back onto the joints.
pub(crate) struct VelocitySolver {
    constraints: Vec<MouseVelocityConstraint>,
}

impl VelocitySolver {
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
        }
    }

    pub fn solve(
        &mut self,
        params: &IntegrationParameters,
        joints: &mut JointSet,
        bodies: &mut SolverBodies,
        body_index: &HashMap<RigidBodyHandle, usize>,
    ) {
        self.constraints.clear();

        for (joint_id, joint) in joints.iter() {
            // A joint whose body was removed is skipped; it stays inert until
            // it is removed as well.
            let Some(&mj_lambda) = body_index.get(&joint.body) else {
                continue;
            };

            match &joint.params {
                JointParams::MouseJoint(mouse) => {
                    self.constraints.push(MouseVelocityConstraint::from_params(
                        params,
                        joint_id,
                        mj_lambda,
                        bodies,
                        joint.local_anchor,
                        mouse,
                    ));
                }
            }
        }

        for constraint in &self.constraints {
            constraint.warmstart(&mut bodies.vels);
        }

        for _ in 0..params.max_velocity_iterations {
            for constraint in &mut self.constraints {
                constraint.solve(&mut bodies.vels);
            }
        }

        for constraint in &self.constraints {
            constraint.writeback_impulses(joints);
        }
    }
}
