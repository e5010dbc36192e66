pub(crate) use self::mouse_velocity_constraint::MouseVelocityConstraint;
pub(crate) use self::solver_body::{SolverBodies, SolverVel};
pub(crate) use self::velocity_solver::VelocitySolver;

mod mouse_velocity_constraint;
mod solver_body;
mod velocity_solver;
