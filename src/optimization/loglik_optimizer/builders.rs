//! loglik_optimizer::builders — L-BFGS solver construction helpers.
//!
//! Purpose
//! -------
//! Provide small, focused builders for the L-BFGS solvers used by the
//! log-likelihood optimizer. These helpers hide Argmin’s generic wiring
//! and apply crate-level options (tolerances, memory size) so that
//! higher-level code can request a configured solver without touching
//! Argmin-specific types.
//!
//! Conventions
//! -----------
//! - The builders do **not** set an initial parameter vector (`theta0`)
//!   or `max_iters`; these are runtime concerns applied by the runner.
//! - Errors are always reported via [`OptResult`]; the underlying
//!   `argmin::core::Error` values never leak across module boundaries.
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Theta,
        },
    },
};

/// Construct an L-BFGS solver with Hager–Zhang line search.
///
/// Consults `opts.lbfgs_mem` (falling back to [`DEFAULT_LBFGS_MEM`]) and
/// wires `opts.tols.tol_grad` / `opts.tols.tol_cost` into the solver.
///
/// # Errors
/// `OptError` (via `From<argmin::core::Error>`) when Argmin rejects a
/// tolerance setting.
pub fn build_optimizer_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    let hager_zhang = HagerZhangLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(hager_zhang, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Construct an L-BFGS solver with More–Thuente line search.
///
/// Same configuration contract as [`build_optimizer_hager_zhang`], with the
/// More–Thuente line-search strategy.
///
/// # Errors
/// `OptError` (via `From<argmin::core::Error>`) when Argmin rejects a
/// tolerance setting.
pub fn build_optimizer_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    let more_thuente = MoreThuenteLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(more_thuente, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Apply optional tolerances to an L-BFGS solver.
///
/// When a tolerance is `None`, the corresponding `with_tolerance_*` method
/// is not called and Argmin’s defaults remain in effect. The generics are
/// kept minimal (`L` only) so new line-search types can reuse this function.
///
/// # Errors
/// `OptError` when `with_tolerance_grad` or `with_tolerance_cost` rejects a
/// value.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &MLEOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::loglik_optimizer::traits::{LineSearcher, MLEOptions, Tolerances};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Basic construction of L-BFGS solvers with Hager–Zhang and
    //   More–Thuente line searches.
    // - Propagation of `lbfgs_mem` (Some vs None) into the builder paths.
    // - Application of gradient and cost tolerances via `configure_lbfgs`.
    //
    // They intentionally DO NOT cover:
    // - End-to-end executor behavior (e.g., `run_lbfgs`), which is tested
    //   in the optimizer runner layer.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure that `build_optimizer_hager_zhang` succeeds and uses the
    // crate default L-BFGS memory when `opts.lbfgs_mem` is `None`.
    //
    // Given
    // -----
    // - Valid `Tolerances`.
    // - `MLEOptions` with `line_searcher = HagerZhang` and `lbfgs_mem = None`.
    //
    // Expect
    // ------
    // - `build_optimizer_hager_zhang` returns `Ok(_)` and does not panic.
    fn build_optimizer_hager_zhang_uses_default_memory_when_none() {
        // Arrange
        let tols =
            Tolerances::new(Some(1e-6), Some(1e-8), Some(50)).expect("Tolerances should be valid");
        let opts = MLEOptions::new(tols, LineSearcher::HagerZhang, None)
            .expect("MLEOptions should be valid");

        // Act
        let solver = build_optimizer_hager_zhang(&opts);

        // Assert
        assert!(
            solver.is_ok(),
            "Builder should succeed when lbfgs_mem is None and tolerances are valid"
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify that `build_optimizer_hager_zhang` accepts an explicit
    // L-BFGS memory value and still constructs a solver.
    //
    // Given
    // -----
    // - Valid `Tolerances`.
    // - `MLEOptions` with `line_searcher = HagerZhang` and `lbfgs_mem = Some(11)`.
    //
    // Expect
    // ------
    // - `build_optimizer_hager_zhang` returns `Ok(_)`.
    fn build_optimizer_hager_zhang_respects_explicit_memory() {
        // Arrange
        let tols = Tolerances::new(Some(1e-6), None, Some(25)).expect("Tolerances should be valid");
        let opts = MLEOptions::new(tols, LineSearcher::HagerZhang, Some(11))
            .expect("MLEOptions should be valid");

        // Act
        let solver = build_optimizer_hager_zhang(&opts);

        // Assert
        assert!(solver.is_ok(), "Builder should succeed when lbfgs_mem is explicitly provided");
    }

    #[test]
    // Purpose
    // -------
    // Ensure that `build_optimizer_more_thuente` succeeds and uses the
    // crate default L-BFGS memory when `opts.lbfgs_mem` is `None`.
    //
    // Given
    // -----
    // - Valid `Tolerances`.
    // - `MLEOptions` with `line_searcher = MoreThuente` and `lbfgs_mem = None`.
    //
    // Expect
    // ------
    // - `build_optimizer_more_thuente` returns `Ok(_)`.
    fn build_optimizer_more_thuente_uses_default_memory_when_none() {
        // Arrange
        let tols =
            Tolerances::new(Some(1e-6), Some(1e-8), Some(50)).expect("Tolerances should be valid");
        let opts = MLEOptions::new(tols, LineSearcher::MoreThuente, None)
            .expect("MLEOptions should be valid");

        // Act
        let solver = build_optimizer_more_thuente(&opts);

        // Assert
        assert!(
            solver.is_ok(),
            "Builder should succeed when lbfgs_mem is None and tolerances are valid"
        );
    }

    #[test]
    // Purpose
    // -------
    // Confirm that `configure_lbfgs` applies tolerances without error
    // when both `tol_grad` and `tol_cost` are present and valid, and also
    // succeeds when both are absent (Argmin defaults remain in effect).
    //
    // Given
    // -----
    // - An L-BFGS solver created with `DEFAULT_LBFGS_MEM`.
    // - One `MLEOptions` with finite positive tolerances, one with `None`s.
    //
    // Expect
    // ------
    // - `configure_lbfgs` returns `Ok(_)` in both cases.
    fn configure_lbfgs_handles_present_and_absent_tolerances() {
        // Arrange
        let raw_full = LBFGS::new(HagerZhangLS::new(), DEFAULT_LBFGS_MEM);
        let raw_empty = LBFGS::new(MoreThuenteLS::new(), DEFAULT_LBFGS_MEM);
        let tols_full =
            Tolerances::new(Some(1e-6), Some(1e-8), Some(100)).expect("Tolerances should be valid");
        let tols_empty = Tolerances::new(None, None, Some(50)).expect("Tolerances should be valid");
        let opts_full = MLEOptions::new(tols_full, LineSearcher::HagerZhang, None)
            .expect("MLEOptions should be valid");
        let opts_empty = MLEOptions::new(tols_empty, LineSearcher::MoreThuente, None)
            .expect("MLEOptions should be valid");

        // Act
        let configured_full = configure_lbfgs(raw_full, &opts_full);
        let configured_empty = configure_lbfgs(raw_empty, &opts_empty);

        // Assert
        assert!(configured_full.is_ok(), "configure_lbfgs should succeed for valid tolerances");
        assert!(
            configured_empty.is_ok(),
            "configure_lbfgs should succeed when both tolerances are None"
        );
    }
}
