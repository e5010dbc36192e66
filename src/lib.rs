//! # tether2d
//!
//! tether2d implements the numerical core of a soft point-to-point "mouse"
//! joint for 2D impulse-based physics simulation. A mouse joint drags an
//! anchor point on a dynamic rigid-body toward a moving world-space target
//! (typically a cursor) through an implicitly-integrated spring-damper, so
//! the body follows the target smoothly instead of snapping to it.
//!
//! The crate provides:
//! - the constraint solver itself: soft-constraint coefficients, effective
//!   mass matrix, warm-starting, and a force-budgeted iterative velocity
//!   solve;
//! - a minimal [`world::World`] harness owning bodies and joints behind
//!   generational handles, guarding external mutation against an in-progress
//!   step, and driving the initialize-once/solve-N-times ordering each step.

#![deny(bare_trait_objects)]
#![warn(missing_docs)]

pub extern crate nalgebra as na;
#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;

pub(crate) const INVALID_U32: u32 = u32::MAX;

/// The string version of tether2d.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod data;
pub mod dynamics;
pub mod utils;
pub mod world;

/// Elementary mathematical entities (scalars, vectors, points, rotations).
pub mod math {
    /// The scalar type used throughout the solver.
    pub type Real = f32;

    /// The 2D vector type.
    pub type Vector<N> = na::Vector2<N>;

    /// The 2D point type.
    pub type Point<N> = na::Point2<N>;

    /// The angular vector type. A 2D body has a single angular degree of
    /// freedom, so this is a plain scalar.
    pub type AngVector<N> = N;

    /// The 2D rotation type, represented as a unit complex number.
    pub type Rotation<N> = na::UnitComplex<N>;
}

/// Prelude re-exporting the types needed by most users of this crate.
pub mod prelude {
    pub use crate::dynamics::{
        IntegrationParameters, Joint, JointError, JointHandle, JointParams, JointSet, MouseJoint,
        MouseJointBuilder, RigidBody, RigidBodyBuilder, RigidBodyHandle, RigidBodySet,
    };
    pub use crate::math::{Point, Real, Rotation, Vector};
    pub use crate::world::World;
}
