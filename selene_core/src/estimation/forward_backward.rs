// selene_core/src/estimation/forward_backward.rs

use crate::error::Result;
use crate::models::ModelProvider;
use crate::types::Symbol;
use nalgebra::DVector;

/// PURE FUNCTION: one unnormalized forward step, `O_symbol · Tᵀ · prev`.
///
/// `T[i][j]` is `P(next = j | prev = i)`, so the mass arriving in `j` is
/// `sum_i T[i][j] * prev[i]`, which is the transpose product.
pub fn forward_step(
    model: &dyn ModelProvider,
    prev: &DVector<f64>,
    symbol: Symbol,
) -> Result<DVector<f64>> {
    let predicted = model.transition_matrix().tr_mul(prev);
    Ok(model.observation_matrix(symbol)? * predicted)
}

/// PURE FUNCTION: one unnormalized backward step, `T · O_symbol · next`,
/// where `symbol` is the observation made at the later time step.
pub fn backward_step(
    model: &dyn ModelProvider,
    next: &DVector<f64>,
    symbol: Symbol,
) -> Result<DVector<f64>> {
    let weighted = model.observation_matrix(symbol)? * next;
    Ok(model.transition_matrix() * weighted)
}

/// Messages of a scaled pass. Each message after the first is divided by
/// its own sum so long sequences never underflow; the divisors are kept in
/// `scales`, one per observation. A message that is all zeros stays zero and
/// records a scale of 0.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledPass {
    pub messages: Vec<DVector<f64>>,
    pub scales: Vec<f64>,
}

impl ScaledPass {
    /// Natural log of the product of the scales, `-inf` if any scale is 0.
    pub fn log_scale(&self) -> f64 {
        self.scales.iter().map(|s| s.ln()).sum()
    }
}

fn rescale(message: DVector<f64>) -> (DVector<f64>, f64) {
    let scale = message.sum();
    if scale > 0.0 && scale.is_finite() {
        (message / scale, scale)
    } else {
        (message, scale)
    }
}

/// Scaled forward messages `alpha_0 ..= alpha_L`, starting from `prior`.
///
/// `alpha_t` is proportional to `P(state_t, obs_1..t)`; for a normalized
/// prior the scales multiply to `P(obs_1..L)`.
pub fn forward_pass(
    model: &dyn ModelProvider,
    prior: &DVector<f64>,
    observations: &[Symbol],
) -> Result<ScaledPass> {
    let mut messages = Vec::with_capacity(observations.len() + 1);
    let mut scales = Vec::with_capacity(observations.len());
    messages.push(prior.clone());
    for (t, &symbol) in observations.iter().enumerate() {
        let (next, scale) = rescale(forward_step(model, &messages[t], symbol)?);
        messages.push(next);
        scales.push(scale);
    }
    Ok(ScaledPass { messages, scales })
}

/// Scaled backward messages `beta_0 ..= beta_L`, with `beta_L` all ones.
///
/// `beta_t` is proportional to `P(obs_t+1..L | state_t)`.
pub fn backward_pass(model: &dyn ModelProvider, observations: &[Symbol]) -> Result<ScaledPass> {
    let len = observations.len();
    let mut messages = vec![DVector::from_element(model.num_states(), 1.0); len + 1];
    let mut scales = vec![1.0; len];
    // The observation at index t is the evidence for time t + 1.
    for t in (0..len).rev() {
        let (beta, scale) = rescale(backward_step(model, &messages[t + 1], observations[t])?);
        messages[t] = beta;
        scales[t] = scale;
    }
    Ok(ScaledPass { messages, scales })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatrixModel;
    use approx::assert_abs_diff_eq;
    use nalgebra::DMatrix;

    // Asymmetric so that forgetting the transpose shows up.
    fn two_state() -> MatrixModel {
        let t = DMatrix::from_row_slice(2, 2, &[0.9, 0.1, 0.3, 0.7]);
        let e = DMatrix::from_row_slice(2, 2, &[0.8, 0.2, 0.4, 0.6]);
        MatrixModel::from_emissions(t, &e).unwrap()
    }

    #[test]
    fn forward_step_uses_the_transpose() {
        let model = two_state();
        let prev = DVector::from_vec(vec![1.0, 0.0]);
        let alpha = forward_step(&model, &prev, 0).unwrap();
        // From state 0: stay with 0.9, move with 0.1; then weight by P(0 | state).
        assert_abs_diff_eq!(alpha[0], 0.9 * 0.8, epsilon = 1e-12);
        assert_abs_diff_eq!(alpha[1], 0.1 * 0.4, epsilon = 1e-12);
    }

    #[test]
    fn backward_step_weights_then_propagates() {
        let model = two_state();
        let ones = DVector::from_element(2, 1.0);
        let beta = backward_step(&model, &ones, 1).unwrap();
        assert_abs_diff_eq!(beta[0], 0.9 * 0.2 + 0.1 * 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(beta[1], 0.3 * 0.2 + 0.7 * 0.6, epsilon = 1e-12);
    }

    #[test]
    fn passes_have_one_message_per_time_step() {
        let model = two_state();
        let prior = DVector::from_element(2, 0.5);
        let obs = [0, 1, 1, 0];
        let forward = forward_pass(&model, &prior, &obs).unwrap();
        let backward = backward_pass(&model, &obs).unwrap();
        assert_eq!(forward.messages.len(), 5);
        assert_eq!(backward.messages.len(), 5);
        assert_eq!(forward.scales.len(), 4);
        assert_eq!(backward.messages[4], DVector::from_element(2, 1.0));
        for alpha in &forward.messages[1..] {
            assert_abs_diff_eq!(alpha.sum(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn scales_recover_the_unnormalized_messages() {
        let model = two_state();
        let prior = DVector::from_element(2, 0.5);
        let obs = [0, 1, 1, 0];
        let forward = forward_pass(&model, &prior, &obs).unwrap();
        let backward = backward_pass(&model, &obs).unwrap();

        let mut alpha = prior.clone();
        for &symbol in &obs {
            alpha = forward_step(&model, &alpha, symbol).unwrap();
        }
        let total = alpha.sum();
        assert_abs_diff_eq!(forward.log_scale().exp(), total, epsilon = 1e-12);

        // alpha_t . beta_t is P(obs) for every t once both scales are undone.
        for t in 0..=obs.len() {
            let forward_scale: f64 = forward.scales[..t].iter().product();
            let backward_scale: f64 = backward.scales[t..].iter().product();
            let dot = forward.messages[t].dot(&backward.messages[t]);
            assert_abs_diff_eq!(dot * forward_scale * backward_scale, total, epsilon = 1e-12);
        }
    }

    #[test]
    fn long_sequences_do_not_underflow() {
        let model = two_state();
        let prior = DVector::from_element(2, 0.5);
        let obs: Vec<Symbol> = (0..5000).map(|t| (t / 7) % 2).collect();
        let forward = forward_pass(&model, &prior, &obs).unwrap();
        let backward = backward_pass(&model, &obs).unwrap();
        assert!(forward.log_scale().is_finite());
        assert!(forward.messages.iter().all(|m| m.sum() > 0.0));
        assert!(backward.messages.iter().all(|m| m.sum() > 0.0));
    }

    #[test]
    fn impossible_evidence_scales_to_zero() {
        let model = MatrixModel::from_emissions(
            DMatrix::identity(2, 2),
            &DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 1.0]),
        )
        .unwrap();
        let prior = DVector::from_vec(vec![1.0, 0.0]);
        let forward = forward_pass(&model, &prior, &[0, 1, 0]).unwrap();
        assert_eq!(forward.scales[1], 0.0);
        assert_eq!(forward.messages[3], DVector::zeros(2));
        assert_eq!(forward.log_scale(), f64::NEG_INFINITY);
    }

    #[test]
    fn out_of_alphabet_symbols_fail() {
        let model = two_state();
        let prior = DVector::from_element(2, 0.5);
        assert!(forward_pass(&model, &prior, &[0, 2]).is_err());
        assert!(backward_pass(&model, &[5]).is_err());
    }
}
