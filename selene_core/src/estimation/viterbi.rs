// selene_core/src/estimation/viterbi.rs

use crate::error::{HmmError, Result};
use crate::estimation::belief::argmax;
use crate::models::{validate_observations, ModelProvider};
use crate::types::{State, Symbol};
use nalgebra::DVector;

/// Recovers the single most probable state sequence for `observations`.
///
/// The result has `observations.len() + 1` entries: the inferred state at
/// time 0 followed by one state per observation. `delta_0` is all ones and
///
/// ```text
/// delta_{t+1}[j] = max_i T[i][j] * O_{obs[t]}[j][j] * delta_t[i]
/// ```
///
/// with the maximizing `i` stored as the backpointer `psi_{t+1}[j]`. Ties go
/// to the lowest index, both inside the sweep and when picking the final state.
/// Each `delta` is divided by its maximum, which keeps every argmax and stops
/// long sequences from underflowing; only evidence the model cannot produce
/// drives it to zero.
pub fn most_likely_path(model: &dyn ModelProvider, observations: &[Symbol]) -> Result<Vec<State>> {
    if observations.is_empty() {
        return Err(HmmError::EmptyObservation);
    }
    validate_observations(model, observations)?;

    let n = model.num_states();
    let transition = model.transition_matrix();

    let mut delta = DVector::from_element(n, 1.0);
    // backpointers[t] holds psi_{t+1}.
    let mut backpointers: Vec<Vec<State>> = Vec::with_capacity(observations.len());

    for &symbol in observations {
        let emission = model.emission_likelihoods(symbol)?;
        let mut next = DVector::zeros(n);
        let mut psi = vec![0; n];

        for j in 0..n {
            let mut best = (0, f64::NEG_INFINITY);
            for i in 0..n {
                let p = transition[(i, j)] * emission[j] * delta[i];
                if p > best.1 {
                    best = (i, p);
                }
            }
            psi[j] = best.0;
            next[j] = best.1;
        }

        backpointers.push(psi);
        let peak = next.max();
        delta = if peak > 0.0 { next / peak } else { next };
    }

    let len = observations.len();
    let (last, p_best) = argmax(&delta);
    if !(p_best > 0.0) {
        return Err(HmmError::DegenerateDistribution { time_step: len });
    }

    let mut path = vec![0; len + 1];
    path[len] = last;
    for t in (1..=len).rev() {
        path[t - 1] = backpointers[t - 1][path[t]];
    }
    Ok(path)
}
