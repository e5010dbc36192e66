use crate::dynamics::joint::JointIndex;
use crate::dynamics::solver::{SolverBodies, SolverVel};
use crate::dynamics::{IntegrationParameters, JointParams, JointSet, MouseJoint};
use crate::math::{Point, Real, Rotation, Vector};
use crate::utils::{self, WCross};
use na::Matrix2;

// p = attached point, m = target point
// C = p - m
// Cdot = v + cross(w, r)
// J = [I r_skew]
//
// The spring-damper is integrated implicitly: gamma regularizes the effective
// mass (units of inverse mass) and beta scales the positional error into a
// velocity bias (units of inverse time).
#[derive(Debug)]
pub(crate) struct MouseVelocityConstraint {
    mj_lambda: usize,

    joint_id: JointIndex,

    r: Vector<Real>,
    gamma: Real,
    bias: Vector<Real>,
    mass: Matrix2<Real>,
    impulse: Vector<Real>,
    max_impulse: Real,
    angvel_damping: Real,

    im: Real,
    ii: Real,
}

impl MouseVelocityConstraint {
    pub fn from_params(
        params: &IntegrationParameters,
        joint_id: JointIndex,
        mj_lambda: usize,
        bodies: &SolverBodies,
        local_anchor: Point<Real>,
        joint: &MouseJoint,
    ) -> Self {
        let mprops = &bodies.mprops[mj_lambda];
        let pos = &bodies.positions[mj_lambda];

        let im = mprops.inv_mass;
        let ii = mprops.inv_inertia;

        let h = params.dt;
        let gamma = utils::inv(h * (joint.damping + h * joint.stiffness));
        let beta = h * joint.stiffness * gamma;

        let rot = Rotation::new(pos.angle);
        let r = rot * (local_anchor - mprops.local_com);

        // K = invMass * I₂ + invI * skew(r)ᵗ * skew(r) + gamma * I₂
        //   = [invMass + invI*r.y*r.y + gamma      -invI*r.x*r.y            ]
        //     [-invI*r.x*r.y                       invMass + invI*r.x*r.x + gamma]
        let k11 = im + ii * r.y * r.y + gamma;
        let k12 = -ii * r.x * r.y;
        let k22 = im + ii * r.x * r.x + gamma;
        let mass = utils::inv22(&Matrix2::new(k11, k12, k12, k22));

        let bias = ((pos.com + r) - joint.target) * beta;

        let impulse = if params.warm_starting {
            joint.impulse * params.dt_ratio
        } else {
            na::zero()
        };

        Self {
            mj_lambda,
            joint_id,
            r,
            gamma,
            bias,
            mass,
            impulse,
            max_impulse: h * joint.max_force,
            angvel_damping: (1.0 - 0.02 * (60.0 * h)).max(0.0),
            im,
            ii,
        }
    }

    pub fn warmstart(&self, vels: &mut [SolverVel]) {
        let mut vel = vels[self.mj_lambda];

        // Cheat with some damping.
        vel.angvel *= self.angvel_damping;

        vel.linvel += self.impulse * self.im;
        vel.angvel += self.ii * self.r.gcross(self.impulse);

        vels[self.mj_lambda] = vel;
    }

    pub fn solve(&mut self, vels: &mut [SolverVel]) {
        let mut vel = vels[self.mj_lambda];

        let cdot = vel.linvel + vel.angvel.gcross(self.r);
        let soft_cdot = cdot + self.impulse * self.gamma + self.bias;

        let old_impulse = self.impulse;
        let mut new_impulse = old_impulse - self.mass * soft_cdot;

        // The accumulated impulse never exceeds the per-step force budget;
        // clamping rescales its magnitude and preserves its direction.
        if new_impulse.norm_squared() > self.max_impulse * self.max_impulse {
            new_impulse *= self.max_impulse / new_impulse.norm();
        }
        self.impulse = new_impulse;

        let applied = new_impulse - old_impulse;
        vel.linvel += applied * self.im;
        vel.angvel += self.ii * self.r.gcross(applied);

        vels[self.mj_lambda] = vel;
    }

    pub fn writeback_impulses(&self, joints: &mut JointSet) {
        if let Some(joint) = joints.get_mut(self.joint_id) {
            let JointParams::MouseJoint(mouse) = &mut joint.params;
            mouse.impulse = self.impulse;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Index;
    use crate::dynamics::RigidBodyBuilder;
    use approx::assert_relative_eq;

    fn single_body_setup(
        builder: RigidBodyBuilder,
        joint: &MouseJoint,
        params: &IntegrationParameters,
    ) -> (MouseVelocityConstraint, SolverBodies) {
        let rb = builder.build();
        let mut bodies = SolverBodies::default();
        let mj_lambda = bodies.push(&rb);
        let constraint = MouseVelocityConstraint::from_params(
            params,
            Index::from_raw_parts(0, 0),
            mj_lambda,
            &bodies,
            Point::origin(),
            joint,
        );
        (constraint, bodies)
    }

    #[test]
    fn zero_stiffness_and_damping_stay_rigid() {
        // With k = d = 0 the soft constraint degenerates to a rigid one:
        // gamma must remain exactly 0 (no division by zero) and the bias
        // vanishes regardless of the positional error.
        let joint = MouseJoint::new(Point::new(10.0, -3.0), 0.0, 0.0, Real::MAX);
        let params = IntegrationParameters::default();
        let (constraint, _) = single_body_setup(RigidBodyBuilder::dynamic(), &joint, &params);

        assert_eq!(constraint.gamma, 0.0);
        assert_eq!(constraint.bias, Vector::zeros());
    }

    #[test]
    fn fully_fixed_body_solves_as_noop() {
        // A body with zero inverse mass and inverse inertia plus a rigid
        // spring makes K singular. The guarded inverse must produce a zero
        // effective mass so the solve is a no-op instead of non-finite.
        let joint = MouseJoint::new(Point::new(1.0, 0.0), 0.0, 0.0, Real::MAX);
        let params = IntegrationParameters::default();
        let (mut constraint, mut bodies) =
            single_body_setup(RigidBodyBuilder::fixed(), &joint, &params);

        assert_eq!(constraint.mass, Matrix2::zeros());

        constraint.warmstart(&mut bodies.vels);
        constraint.solve(&mut bodies.vels);

        assert_eq!(bodies.vels[0].linvel, Vector::zeros());
        assert_eq!(bodies.vels[0].angvel, 0.0);
        assert_eq!(constraint.impulse, Vector::zeros());
        assert!(constraint.impulse.norm().is_finite());
    }

    #[test]
    fn impulse_never_exceeds_force_budget() {
        let max_force = 2.5;
        let joint = MouseJoint::new(Point::new(100.0, 50.0), 1.0e4, 1.0, max_force);
        let params = IntegrationParameters::default();
        let (mut constraint, mut bodies) =
            single_body_setup(RigidBodyBuilder::dynamic(), &joint, &params);

        constraint.warmstart(&mut bodies.vels);
        let max_impulse = params.dt * max_force;
        for _ in 0..8 {
            constraint.solve(&mut bodies.vels);
            assert!(constraint.impulse.norm() <= max_impulse * (1.0 + 1.0e-5));
        }
    }

    #[test]
    fn converged_solve_is_idempotent() {
        let joint = MouseJoint::new(Point::new(1.0, 2.0), 500.0, 10.0, Real::MAX);
        let params = IntegrationParameters::default();
        let (mut constraint, mut bodies) =
            single_body_setup(RigidBodyBuilder::dynamic(), &joint, &params);

        constraint.warmstart(&mut bodies.vels);
        for _ in 0..4 {
            constraint.solve(&mut bodies.vels);
        }

        let impulse = constraint.impulse;
        let vel = bodies.vels[0].linvel;
        constraint.solve(&mut bodies.vels);

        assert_relative_eq!(constraint.impulse, impulse, epsilon = 1.0e-6);
        assert_relative_eq!(bodies.vels[0].linvel, vel, epsilon = 1.0e-6);
    }

    #[test]
    fn warmstart_injects_previous_impulse() {
        // With dt_ratio = 1 the velocity injected by warmstarting is exactly
        // invMass * impulse and invI * (r × impulse).
        let mut joint = MouseJoint::new(Point::new(0.0, 0.0), 5.0, 0.7, Real::MAX);
        joint.impulse = Vector::new(0.5, -0.25);
        let params = IntegrationParameters::default();

        let builder = RigidBodyBuilder::dynamic()
            .mass(2.0)
            .angular_inertia(4.0)
            .local_com(Point::new(-1.0, 0.0));
        let (constraint, mut bodies) = single_body_setup(builder, &joint, &params);

        constraint.warmstart(&mut bodies.vels);

        let im = 1.0 / 2.0;
        let ii = 1.0 / 4.0;
        assert_relative_eq!(bodies.vels[0].linvel, joint.impulse * im, epsilon = 1.0e-6);
        assert_relative_eq!(
            bodies.vels[0].angvel,
            ii * constraint.r.gcross(joint.impulse),
            epsilon = 1.0e-6
        );
    }

    #[test]
    fn warmstart_rescales_impulse_by_dt_ratio() {
        // When the timestep changes, the warmstart seed is the previous
        // impulse rescaled by dt_ratio.
        let mut joint = MouseJoint::new(Point::new(0.0, 0.0), 5.0, 0.7, Real::MAX);
        joint.impulse = Vector::new(0.6, -0.3);
        let params = IntegrationParameters {
            dt_ratio: 0.5,
            ..Default::default()
        };
        let (constraint, mut bodies) =
            single_body_setup(RigidBodyBuilder::dynamic(), &joint, &params);

        assert_eq!(constraint.impulse, joint.impulse * 0.5);

        // With invMass = 1 the injected velocity equals the rescaled impulse.
        constraint.warmstart(&mut bodies.vels);
        assert_relative_eq!(
            bodies.vels[0].linvel,
            joint.impulse * 0.5,
            epsilon = 1.0e-6
        );
    }

    #[test]
    fn warmstart_damps_angular_velocity() {
        // A spinning body loses angular velocity by the empirical factor
        // max(0, 1 - 0.02 * (60 * h)), i.e. 0.98 at the default timestep.
        let joint = MouseJoint::new(Point::new(1.0, 0.0), 5.0, 0.7, Real::MAX);
        let params = IntegrationParameters::default();
        let builder = RigidBodyBuilder::dynamic().angvel(10.0);
        let (constraint, mut bodies) = single_body_setup(builder, &joint, &params);

        constraint.warmstart(&mut bodies.vels);

        let expected = 10.0 * (1.0 - 0.02 * (60.0 * params.dt)).max(0.0);
        assert_relative_eq!(bodies.vels[0].angvel, expected, epsilon = 1.0e-6);
        assert_relative_eq!(bodies.vels[0].angvel, 9.8, epsilon = 1.0e-4);
    }

    #[test]
    fn warmstart_disabled_resets_impulse() {
        let mut joint = MouseJoint::new(Point::new(0.0, 0.0), 5.0, 0.7, Real::MAX);
        joint.impulse = Vector::new(3.0, 4.0);
        let params = IntegrationParameters {
            warm_starting: false,
            ..Default::default()
        };
        let (constraint, mut bodies) =
            single_body_setup(RigidBodyBuilder::dynamic(), &joint, &params);

        assert_eq!(constraint.impulse, Vector::zeros());
        constraint.warmstart(&mut bodies.vels);
        assert_eq!(bodies.vels[0].linvel, Vector::zeros());
    }
}
