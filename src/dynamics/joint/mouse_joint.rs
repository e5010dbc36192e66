use crate::math::{Point, Real, Vector};

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
/// A joint that drags an anchor point of a single dynamic body toward a
/// moving world-space target, typically a cursor.
///
/// The constraint is soft: the target is reached through a spring-damper
/// integrated implicitly, so the body follows the target smoothly instead of
/// snapping to it. The force applied by the spring is capped by `max_force`,
/// which keeps a fast-moving target from launching the body.
pub struct MouseJoint {
    /// The world-space point the body's anchor is pulled toward.
    ///
    /// This is the only field meant to change while the joint is alive; use
    /// [`crate::world::World::set_mouse_target`] to update it between steps.
    pub target: Point<Real>,
    /// The spring stiffness, in mass/s².
    pub stiffness: Real,
    /// The spring damping, in mass/s.
    pub damping: Real,
    /// The maximum magnitude of the force the constraint may apply.
    pub max_force: Real,
    /// The impulse accumulated across solver iterations.
    ///
    /// This is the only solver state that survives between steps: it seeds
    /// the next step's solve when warmstarting is enabled.
    pub(crate) impulse: Vector<Real>,
}

impl MouseJoint {
    /// Creates a new mouse joint pulling toward `target`.
    pub fn new(target: Point<Real>, stiffness: Real, damping: Real, max_force: Real) -> Self {
        Self {
            target,
            stiffness,
            damping,
            max_force,
            impulse: na::zero(),
        }
    }

    /// The impulse accumulated by the solver during the last step.
    pub fn impulse(&self) -> Vector<Real> {
        self.impulse
    }
}

/// A [`MouseJoint`] using the builder pattern.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
#[must_use = "the builder does nothing unless `build` is called"]
pub struct MouseJointBuilder(pub MouseJoint);

impl MouseJointBuilder {
    /// Creates a new builder for a mouse joint pulling toward `target`.
    ///
    /// The joint starts with a moderately stiff, lightly damped spring and an
    /// unbounded force budget.
    pub fn new(target: Point<Real>) -> Self {
        Self(MouseJoint::new(target, 5.0, 0.7, Real::MAX))
    }

    /// Sets the spring stiffness, in mass/s².
    pub fn stiffness(mut self, stiffness: Real) -> Self {
        self.0.stiffness = stiffness;
        self
    }

    /// Sets the spring damping, in mass/s.
    pub fn damping(mut self, damping: Real) -> Self {
        self.0.damping = damping;
        self
    }

    /// Sets the maximum magnitude of the force the constraint may apply.
    pub fn max_force(mut self, max_force: Real) -> Self {
        self.0.max_force = max_force;
        self
    }

    /// Builds the mouse joint.
    pub fn build(self) -> MouseJoint {
        self.0
    }
}
