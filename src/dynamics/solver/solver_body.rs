use crate::dynamics::RigidBody;
use crate::math::{Point, Real, Vector};

/// Mass properties of a body, cached for one step of the solver.
#[derive(Copy, Clone, Debug)]
pub(crate) struct SolverBodyMprops {
    pub local_com: Point<Real>,
    pub inv_mass: Real,
    pub inv_inertia: Real,
}

/// Position snapshot of a body for one step: world center of mass and angle.
#[derive(Copy, Clone, Debug)]
pub(crate) struct SolverPosition {
    pub com: Point<Real>,
    pub angle: Real,
}

/// The linear and angular velocity of a solver body.
#[derive(Copy, Clone, Debug)]
pub(crate) struct SolverVel {
    pub linvel: Vector<Real>,
    pub angvel: Real,
}

/// The per-step body arrays read and written by constraint initialization and
/// the velocity solver.
///
/// These are owned by the stepping orchestrator for the duration of one step;
/// each constraint only touches the entries of the single body it is bound to.
#[derive(Clone, Debug, Default)]
pub(crate) struct SolverBodies {
    pub mprops: Vec<SolverBodyMprops>,
    pub positions: Vec<SolverPosition>,
    pub vels: Vec<SolverVel>,
}

impl SolverBodies {
    pub fn clear(&mut self) {
        self.mprops.clear();
        self.positions.clear();
        self.vels.clear();
    }

    /// Appends a snapshot of `rb` and returns its solver index.
    pub fn push(&mut self, rb: &RigidBody) -> usize {
        let index = self.vels.len();
        self.mprops.push(SolverBodyMprops {
            local_com: rb.local_com,
            inv_mass: rb.inv_mass,
            inv_inertia: rb.inv_inertia,
        });
        self.positions.push(SolverPosition {
            com: rb.position,
            angle: rb.rotation,
        });
        self.vels.push(SolverVel {
            linvel: rb.linvel,
            angvel: rb.angvel,
        });
        index
    }
}
