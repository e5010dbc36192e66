//! The physics world: bodies, joints, step parameters, and the step lock.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use log::warn;

use crate::dynamics::solver::{SolverBodies, VelocitySolver};
use crate::dynamics::{
    IntegrationParameters, Joint, JointError, JointHandle, JointParams, JointSet, RigidBodyHandle,
    RigidBodySet,
};
use crate::math::{Point, Real};

static NEXT_WORLD_ID: AtomicU32 = AtomicU32::new(0);

/// A world owning rigid bodies and joints, and stepping their simulation.
///
/// The world is `locked` for the duration of [`World::step`]: no external
/// mutation API may succeed while a step is in progress, so in-flight solver
/// state can never be corrupted by callbacks running during the step.
pub struct World {
    /// The set of rigid bodies simulated by this world.
    pub bodies: RigidBodySet,
    /// Parameters controlling the length and accuracy of each timestep.
    pub integration_parameters: IntegrationParameters,
    id: u32,
    joints: JointSet,
    locked: bool,
    solver: VelocitySolver,
    solver_bodies: SolverBodies,
    body_index: HashMap<RigidBodyHandle, usize>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Creates a new empty world with default integration parameters.
    pub fn new() -> Self {
        Self {
            id: NEXT_WORLD_ID.fetch_add(1, Ordering::Relaxed),
            bodies: RigidBodySet::new(),
            joints: JointSet::new(),
            integration_parameters: IntegrationParameters::default(),
            locked: false,
            solver: VelocitySolver::new(),
            solver_bodies: SolverBodies::default(),
            body_index: HashMap::new(),
        }
    }

    /// Is a simulation step currently in progress?
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// The number of joints in this world.
    pub fn num_joints(&self) -> usize {
        self.joints.len()
    }

    /// Inserts a joint driving `body` through its `local_anchor` point, and
    /// returns a handle valid for this world only.
    ///
    /// Joints must not be created while the world is stepping.
    pub fn insert_joint(
        &mut self,
        body: RigidBodyHandle,
        local_anchor: Point<Real>,
        params: impl Into<JointParams>,
    ) -> JointHandle {
        debug_assert!(!self.locked);
        let index = self.joints.insert(Joint::new(body, local_anchor, params));
        JointHandle {
            world: self.id,
            index,
        }
    }

    /// Removes a joint from this world, invalidating its handle.
    ///
    /// Joints must not be removed while the world is stepping.
    pub fn remove_joint(&mut self, handle: JointHandle) -> Option<Joint> {
        debug_assert!(!self.locked);
        if handle.world != self.id {
            return None;
        }
        self.joints.remove(handle.index)
    }

    /// Gets the joint with the given handle, if it is live and was minted by
    /// this world.
    pub fn joint(&self, handle: JointHandle) -> Option<&Joint> {
        if handle.world != self.id {
            return None;
        }
        self.joints.get(handle)
    }

    /// Updates the target point of the mouse joint identified by `handle`.
    ///
    /// If the world is locked (a step is in progress), the update is silently
    /// ignored: callers are expected to only mutate joints between steps. A
    /// handle that is stale, minted by another world, or resolving to a
    /// different joint variant yields a [`JointError`].
    pub fn set_mouse_target(
        &mut self,
        handle: JointHandle,
        target: Point<Real>,
    ) -> Result<(), JointError> {
        if self.locked {
            warn!("ignoring mouse-joint target update: the world is locked");
            return Ok(());
        }

        if handle.world != self.id {
            return Err(JointError::InvalidHandle);
        }

        let joint = self
            .joints
            .get_mut(handle.index)
            .ok_or(JointError::InvalidHandle)?;
        let mouse = joint
            .params
            .as_mouse_joint_mut()
            .ok_or(JointError::TypeMismatch)?;
        mouse.target = target;
        Ok(())
    }

    /// Advances the simulation by one timestep.
    ///
    /// For each joint this initializes its velocity constraint exactly once,
    /// runs `max_velocity_iterations` solve passes, writes the accumulated
    /// impulses back, then integrates body positions from the corrected
    /// velocities.
    pub fn step(&mut self) {
        self.locked = true;

        self.solver_bodies.clear();
        self.body_index.clear();
        for (handle, rb) in self.bodies.iter() {
            let index = self.solver_bodies.push(rb);
            self.body_index.insert(handle, index);
        }

        self.solver.solve(
            &self.integration_parameters,
            &mut self.joints,
            &mut self.solver_bodies,
            &self.body_index,
        );

        let dt = self.integration_parameters.dt;
        for (handle, rb) in self.bodies.iter_mut() {
            let vel = self.solver_bodies.vels[self.body_index[&handle]];
            rb.linvel = vel.linvel;
            rb.angvel = vel.angvel;
            rb.position += rb.linvel * dt;
            rb.rotation += rb.angvel * dt;
        }

        self.locked = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::{MouseJointBuilder, RigidBodyBuilder};
    use crate::math::Vector;
    use crate::utils;
    use approx::assert_relative_eq;

    fn dragged_body_world(stiffness: Real, damping: Real, max_force: Real) -> (World, JointHandle) {
        let mut world = World::new();
        // A unit-mass body that cannot rotate, with its anchor at the center
        // of mass, one unit away from the target.
        let body = world.bodies.insert(
            RigidBodyBuilder::dynamic()
                .mass(1.0)
                .angular_inertia(0.0)
                .build(),
        );
        let joint = MouseJointBuilder::new(Point::new(1.0, 0.0))
            .stiffness(stiffness)
            .damping(damping)
            .max_force(max_force)
            .build();
        let handle = world.insert_joint(body, Point::origin(), joint);
        (world, handle)
    }

    #[test]
    fn anchor_velocity_matches_hand_computed_reference() {
        let (stiffness, damping) = (500.0, 10.0);
        let (mut world, handle) = dragged_body_world(stiffness, damping, Real::MAX);
        world.step();

        // With invMass = 1, invI = 0 and the anchor at the center of mass,
        // the solve converges in one iteration to impulse = beta / (1 + gamma)
        // toward the target.
        let h = world.integration_parameters.dt;
        let gamma = utils::inv(h * (damping + h * stiffness));
        let beta = h * stiffness * gamma;
        let expected = beta / (1.0 + gamma);

        let body = world.joint(handle).unwrap().body;
        let rb = world.bodies.get(body).unwrap();
        assert_relative_eq!(rb.linvel(), Vector::new(expected, 0.0), epsilon = 1.0e-4);
        assert_eq!(rb.angvel(), 0.0);
    }

    #[test]
    fn impulse_clamped_to_force_budget_with_direction_preserved() {
        // dt * max_force = 0.01, far below the unclamped solution.
        let max_force = 0.01 * 60.0;
        let (mut world, handle) = dragged_body_world(500.0, 10.0, max_force);
        world.step();

        let mouse = world
            .joint(handle)
            .unwrap()
            .params
            .as_mouse_joint()
            .unwrap();
        assert_relative_eq!(mouse.impulse().norm(), 0.01, epsilon = 1.0e-6);
        // The unclamped impulse points from the anchor toward the target (+x).
        assert_relative_eq!(mouse.impulse(), Vector::new(0.01, 0.0), epsilon = 1.0e-6);
    }

    #[test]
    fn body_follows_a_moving_target() {
        let (mut world, handle) = dragged_body_world(50.0, 5.0, Real::MAX);

        for _ in 0..120 {
            world.step();
        }
        let body = world.joint(handle).unwrap().body;
        let x = world.bodies.get(body).unwrap().position().x;
        assert_relative_eq!(x, 1.0, epsilon = 1.0e-2);

        world.set_mouse_target(handle, Point::new(-2.0, 0.0)).unwrap();
        for _ in 0..240 {
            world.step();
        }
        let x = world.bodies.get(body).unwrap().position().x;
        assert_relative_eq!(x, -2.0, epsilon = 1.0e-2);
    }

    #[test]
    fn locked_world_ignores_target_updates() {
        let (mut world, handle) = dragged_body_world(500.0, 10.0, Real::MAX);
        let before = world.joint(handle).unwrap().params.as_mouse_joint().unwrap().target;

        world.locked = true;
        assert!(world.set_mouse_target(handle, Point::new(9.0, 9.0)).is_ok());
        let after = world.joint(handle).unwrap().params.as_mouse_joint().unwrap().target;
        assert_eq!(before, after);

        world.locked = false;
        world.set_mouse_target(handle, Point::new(9.0, 9.0)).unwrap();
        let after = world.joint(handle).unwrap().params.as_mouse_joint().unwrap().target;
        assert_eq!(after, Point::new(9.0, 9.0));
    }

    #[test]
    fn stale_and_foreign_handles_are_rejected() {
        let (mut world, handle) = dragged_body_world(500.0, 10.0, Real::MAX);

        let mut other = World::new();
        assert_eq!(
            other.set_mouse_target(handle, Point::origin()),
            Err(JointError::InvalidHandle)
        );

        assert!(world.remove_joint(handle).is_some());
        assert_eq!(
            world.set_mouse_target(handle, Point::origin()),
            Err(JointError::InvalidHandle)
        );
        assert!(world.joint(handle).is_none());
    }

    #[test]
    fn joints_with_removed_bodies_are_skipped() {
        let (mut world, handle) = dragged_body_world(500.0, 10.0, Real::MAX);
        let body = world.joint(handle).unwrap().body;
        world.bodies.remove(body);

        // Stepping must neither panic nor accumulate an impulse.
        world.step();
        let mouse = world
            .joint(handle)
            .unwrap()
            .params
            .as_mouse_joint()
            .unwrap();
        assert_eq!(mouse.impulse(), Vector::zeros());
    }
}
