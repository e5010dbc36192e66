use crate::math::Real;

/// Parameters for a time-step of the physics engine.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct IntegrationParameters {
    /// The timestep length (default: `1.0 / 60.0`).
    pub dt: Real,
    /// The ratio of the current timestep length to the previous one
    /// (default: `1.0`).
    ///
    /// Warmstart impulses accumulated with the previous timestep are rescaled
    /// by this ratio before being reused, so that a variable timestep does not
    /// inject too much (or too little) energy at the start of a step.
    pub dt_ratio: Real,
    /// Whether accumulated impulses from the previous step seed the iterative
    /// solver of the current step (default: `true`).
    ///
    /// Warmstarting significantly improves convergence when the solution
    /// changes little between steps, which is the common case.
    pub warm_starting: bool,
    /// Maximum number of iterations performed by the velocity constraints
    /// solver for each simulation step (default: `4`).
    pub max_velocity_iterations: usize,
}

impl IntegrationParameters {
    /// The inverse of the timestep length, or zero if the timestep is zero.
    #[inline]
    pub fn inv_dt(&self) -> Real {
        crate::utils::inv(self.dt)
    }
}

impl Default for IntegrationParameters {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0,
            dt_ratio: 1.0,
            warm_starting: true,
            max_velocity_iterations: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn inv_dt_is_guarded() {
        let params = IntegrationParameters::default();
        assert_relative_eq!(params.inv_dt(), 60.0, epsilon = 1.0e-4);

        let params = IntegrationParameters {
            dt: 0.0,
            ..Default::default()
        };
        assert_eq!(params.inv_dt(), 0.0);
    }
}
