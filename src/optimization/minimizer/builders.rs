//! L-BFGS construction for both line searches, with the optional stopping
//! tolerances from [`MinimizerOptions`] applied. Starting point and
//! iteration cap are set later by the runner.
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    minimizer::{
        traits::MinimizerOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Theta,
        },
    },
};

pub fn build_optimizer_hager_zhang(opts: &MinimizerOptions) -> OptResult<LbfgsHagerZhang> {
    lbfgs_with(HagerZhangLS::new(), opts)
}

pub fn build_optimizer_more_thuente(opts: &MinimizerOptions) -> OptResult<LbfgsMoreThuente> {
    lbfgs_with(MoreThuenteLS::new(), opts)
}

fn lbfgs_with<L>(
    line_search: L, opts: &MinimizerOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    let memory = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LBFGS::new(line_search, memory), opts)
}

/// Apply `tol_grad` / `tol_cost` when present; argmin rejects negative
/// values with an error that is converted to `OptError`.
pub fn configure_lbfgs<L>(
    solver: LBFGS<L, Theta, Grad, Cost>, opts: &MinimizerOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    let solver = match opts.tols.tol_grad {
        Some(tol) => solver.with_tolerance_grad(tol)?,
        None => solver,
    };
    Ok(match opts.tols.tol_cost {
        Some(tol) => solver.with_tolerance_cost(tol)?,
        None => solver,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::minimizer::traits::{LineSearcher, Tolerances};

    #[test]
    // Purpose
    // -------
    // Both line searches build from the defaults and from an explicit
    // memory with only an iteration cap.
    //
    // Given
    // -----
    // - `MinimizerOptions::default()`.
    // - `lbfgs_mem = Some(3)`, `max_iter = 25`, no tolerances.
    //
    // Expect
    // ------
    // - Every build returns `Ok(_)`.
    fn builders_accept_default_and_sparse_options() {
        // Arrange
        let defaults = MinimizerOptions::default();
        let tols = Tolerances::new(None, None, Some(25)).expect("iteration cap alone is valid");
        let sparse = MinimizerOptions::new(tols, LineSearcher::HagerZhang, false, Some(3))
            .expect("memory 3 is valid");

        // Act & Assert
        assert!(build_optimizer_hager_zhang(&defaults).is_ok());
        assert!(build_optimizer_more_thuente(&defaults).is_ok());
        assert!(build_optimizer_hager_zhang(&sparse).is_ok());
        assert!(build_optimizer_more_thuente(&sparse).is_ok());
    }
}
