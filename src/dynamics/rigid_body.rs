use crate::data::{Arena, Index};
use crate::math::{Point, Real, Vector};
use crate::utils;

/// The unique handle of a rigid body added to a [`RigidBodySet`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct RigidBodyHandle(pub(crate) Index);

impl RigidBodyHandle {
    /// Converts this handle into its (index, generation) components.
    pub fn into_raw_parts(self) -> (u32, u32) {
        self.0.into_raw_parts()
    }

    /// Reconstructs a handle from its (index, generation) components.
    pub fn from_raw_parts(index: u32, generation: u32) -> Self {
        Self(Index::from_raw_parts(index, generation))
    }

    /// An always-invalid rigid-body handle.
    pub fn invalid() -> Self {
        Self(Index::from_raw_parts(crate::INVALID_U32, crate::INVALID_U32))
    }
}

/// A 2D rigid body.
///
/// Collision shapes are out of the scope of this crate, so mass properties
/// are provided explicitly when the body is built instead of being computed
/// from attached shapes.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct RigidBody {
    /// World-space position of the body's center of mass.
    pub(crate) position: Point<Real>,
    /// Orientation angle, in radians.
    pub(crate) rotation: Real,
    pub(crate) linvel: Vector<Real>,
    pub(crate) angvel: Real,
    /// Center of mass expressed in the body's local space.
    pub(crate) local_com: Point<Real>,
    pub(crate) inv_mass: Real,
    pub(crate) inv_inertia: Real,
}

impl RigidBody {
    /// The world-space position of this body's center of mass.
    pub fn position(&self) -> Point<Real> {
        self.position
    }

    /// The orientation angle of this body, in radians.
    pub fn rotation(&self) -> Real {
        self.rotation
    }

    /// The linear velocity of this body.
    pub fn linvel(&self) -> Vector<Real> {
        self.linvel
    }

    /// The angular velocity of this body.
    pub fn angvel(&self) -> Real {
        self.angvel
    }

    /// Sets the linear velocity of this body.
    pub fn set_linvel(&mut self, linvel: Vector<Real>) {
        self.linvel = linvel;
    }

    /// Sets the angular velocity of this body.
    pub fn set_angvel(&mut self, angvel: Real) {
        self.angvel = angvel;
    }

    /// The inverse mass of this body (zero for a fixed body).
    pub fn inv_mass(&self) -> Real {
        self.inv_mass
    }

    /// The inverse angular inertia of this body (zero for a fixed body).
    pub fn inv_inertia(&self) -> Real {
        self.inv_inertia
    }

    /// Is this body unable to move at all (both inverse mass and inverse
    /// angular inertia are zero)?
    pub fn is_fixed(&self) -> bool {
        self.inv_mass == 0.0 && self.inv_inertia == 0.0
    }
}

/// A builder for rigid-bodies.
#[derive(Copy, Clone, Debug)]
#[must_use = "the builder does nothing unless `build` is called"]
pub struct RigidBodyBuilder {
    position: Point<Real>,
    rotation: Real,
    linvel: Vector<Real>,
    angvel: Real,
    local_com: Point<Real>,
    mass: Real,
    angular_inertia: Real,
}

impl RigidBodyBuilder {
    /// Starts building a dynamic rigid body with unit mass and unit angular
    /// inertia.
    pub fn dynamic() -> Self {
        Self {
            position: Point::origin(),
            rotation: 0.0,
            linvel: na::zero(),
            angvel: 0.0,
            local_com: Point::origin(),
            mass: 1.0,
            angular_inertia: 1.0,
        }
    }

    /// Starts building a fixed rigid body (infinite mass and angular inertia,
    /// i.e., both inverses are zero).
    pub fn fixed() -> Self {
        Self {
            mass: 0.0,
            angular_inertia: 0.0,
            ..Self::dynamic()
        }
    }

    /// Sets the initial world-space position of the body's center of mass.
    pub fn position(mut self, position: Point<Real>) -> Self {
        self.position = position;
        self
    }

    /// Sets the initial orientation angle of the body, in radians.
    pub fn rotation(mut self, angle: Real) -> Self {
        self.rotation = angle;
        self
    }

    /// Sets the initial linear velocity of the body.
    pub fn linvel(mut self, linvel: Vector<Real>) -> Self {
        self.linvel = linvel;
        self
    }

    /// Sets the initial angular velocity of the body.
    pub fn angvel(mut self, angvel: Real) -> Self {
        self.angvel = angvel;
        self
    }

    /// Sets the body's center of mass, expressed in its local space.
    pub fn local_com(mut self, local_com: Point<Real>) -> Self {
        self.local_com = local_com;
        self
    }

    /// Sets the mass of the body. A zero mass makes the body translationally
    /// fixed.
    pub fn mass(mut self, mass: Real) -> Self {
        self.mass = mass;
        self
    }

    /// Sets the angular inertia of the body. A zero inertia makes the body
    /// rotationally fixed.
    pub fn angular_inertia(mut self, angular_inertia: Real) -> Self {
        self.angular_inertia = angular_inertia;
        self
    }

    /// Builds the rigid body.
    pub fn build(self) -> RigidBody {
        RigidBody {
            position: self.position,
            rotation: self.rotation,
            linvel: self.linvel,
            angvel: self.angvel,
            local_com: self.local_com,
            inv_mass: utils::inv(self.mass),
            inv_inertia: utils::inv(self.angular_inertia),
        }
    }
}

/// A set of rigid bodies that can be handled by a [`crate::world::World`].
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct RigidBodySet {
    bodies: Arena<RigidBody>,
}

impl RigidBodySet {
    /// Creates a new empty set of rigid bodies.
    pub fn new() -> Self {
        Self {
            bodies: Arena::new(),
        }
    }

    /// The number of rigid bodies in this set.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Is this set empty?
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Is the given handle valid in this set?
    pub fn contains(&self, handle: RigidBodyHandle) -> bool {
        self.bodies.contains(handle.0)
    }

    /// Inserts a rigid body into this set and returns its handle.
    pub fn insert(&mut self, rb: RigidBody) -> RigidBodyHandle {
        RigidBodyHandle(self.bodies.insert(rb))
    }

    /// Removes a rigid body from this set, invalidating its handle.
    pub fn remove(&mut self, handle: RigidBodyHandle) -> Option<RigidBody> {
        self.bodies.remove(handle.0)
    }

    /// Gets the rigid body with the given handle.
    pub fn get(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle.0)
    }

    /// Gets a mutable reference to the rigid body with the given handle.
    pub fn get_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle.0)
    }

    /// Iterates over the rigid bodies of this set.
    pub fn iter(&self) -> impl Iterator<Item = (RigidBodyHandle, &RigidBody)> {
        self.bodies.iter().map(|(i, rb)| (RigidBodyHandle(i), rb))
    }

    /// Mutably iterates over the rigid bodies of this set.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (RigidBodyHandle, &mut RigidBody)> {
        self.bodies
            .iter_mut()
            .map(|(i, rb)| (RigidBodyHandle(i), rb))
    }
}
