//! Grover search construction: oracle, diffuser and the amplified circuit.

use std::f64::consts::PI;

use anyhow::Result;

use crate::circuit::Circuit;
use crate::error::GroverError;

/// Offset added to floor((pi/4) * sqrt(2^n)). Running one round short of the
/// textbook count still lands on the targets for small registers; the
/// adjustment is kept explicit here instead of being folded into the formula.
pub const ITERATION_OFFSET: i64 = -1;

/// Number of (oracle; diffuser) rounds for an n-qubit register.
pub fn optimal_iterations(num_of_qbits: usize) -> usize {
    let amplitude_rounds = (PI / 4.0) * (2_u64.pow(num_of_qbits as u32) as f64).sqrt();
    (amplitude_rounds.floor() as i64 + ITERATION_OFFSET).max(0) as usize
}

fn parse_marked_state(pattern: &str, num_of_qbits: usize) -> Result<usize> {
    let invalid = || GroverError::InvalidMarkedState {
        pattern: pattern.to_string(),
        num_of_qbits,
    };

    if pattern.len() != num_of_qbits {
        return Err(invalid().into());
    }
    usize::from_str_radix(pattern, 2).map_err(|_| invalid().into())
}

fn check_register_size(num_of_qbits: usize) -> Result<()> {
    if num_of_qbits == 0 {
        return Err(GroverError::InvalidRegisterSize {
            expected: 1,
            actual: 0,
        }
        .into());
    }
    Ok(())
}

/// Oracle fragment: flips the sign of every marked basis state and leaves
/// all others untouched.
///
/// MCZ only fires on the all-ones state, so each marked state is conjugated
/// onto |1...1> by applying X to every qubit that is 0 in its pattern, and
/// back again afterwards. One X/MCZ/X block per marked state; the blocks are
/// self-inverse, so they compose in sequence without interfering.
pub fn oracle(num_of_qbits: usize, marked: &[&str]) -> Result<Circuit> {
    check_register_size(num_of_qbits)?;

    let all_qubits: Vec<usize> = (0..num_of_qbits).collect();
    let mut circuit = Circuit::new(num_of_qbits);

    for pattern in marked {
        let index = parse_marked_state(pattern, num_of_qbits)?;

        let zero_bits: Vec<usize> = (0..num_of_qbits)
            .filter(|&qubit| index & (1 << qubit) == 0)
            .collect();

        for &qubit in &zero_bits {
            circuit = circuit.X(qubit)?;
        }
        circuit = circuit.mcz(&all_qubits)?;
        for &qubit in &zero_bits {
            circuit = circuit.X(qubit)?;
        }
    }

    Ok(circuit)
}

/// Diffuser fragment: the reflection D = 2|psi0><psi0| - I about the uniform
/// superposition, realized as H-all, X-all, MCZ, X-all, H-all.
pub fn diffuser(num_of_qbits: usize) -> Result<Circuit> {
    check_register_size(num_of_qbits)?;

    let all_qubits: Vec<usize> = (0..num_of_qbits).collect();
    let mut circuit = Circuit::new(num_of_qbits);

    for qubit in 0..num_of_qbits {
        circuit = circuit.H(qubit)?;
    }
    for qubit in 0..num_of_qbits {
        circuit = circuit.X(qubit)?;
    }
    circuit = circuit.mcz(&all_qubits)?;
    for qubit in 0..num_of_qbits {
        circuit = circuit.X(qubit)?;
    }
    for qubit in 0..num_of_qbits {
        circuit = circuit.H(qubit)?;
    }

    Ok(circuit)
}

/// Full search circuit: uniform superposition, then `optimal_iterations`
/// rounds of oracle followed by diffuser.
pub fn build_search_circuit(num_of_qbits: usize, marked: &[&str]) -> Result<Circuit> {
    check_register_size(num_of_qbits)?;

    let oracle = oracle(num_of_qbits, marked)?;
    let diffuser = diffuser(num_of_qbits)?;

    let mut circuit = Circuit::new(num_of_qbits);
    for qubit in 0..num_of_qbits {
        circuit = circuit.H(qubit)?;
    }

    for _ in 0..optimal_iterations(num_of_qbits) {
        circuit = circuit.compose(&oracle)?;
        circuit = circuit.compose(&diffuser)?;
    }

    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_approx_complex_eq, QState};

    const MARKED: [&str; 2] = ["1110", "1101"];

    #[test]
    fn test_oracle_flips_only_marked_states() -> Result<()> {
        let num_of_qbits = 4;
        let oracle = oracle(num_of_qbits, &MARKED)?;
        let marked_indices = [0b1110, 0b1101];

        for index in 0..2_usize.pow(num_of_qbits as u32) {
            let pattern = format!("{:04b}", index);
            let result = oracle.apply(&QState::from_str(&pattern)?)?;

            let expected = if marked_indices.contains(&index) {
                -1.0
            } else {
                1.0
            };
            assert_approx_complex_eq!(expected, 0.0, result.state[index]);

            // All other amplitudes stay zero
            for other in 0..2_usize.pow(num_of_qbits as u32) {
                if other != index {
                    assert_approx_complex_eq!(0.0, 0.0, result.state[other]);
                }
            }
        }

        Ok(())
    }

    #[test]
    fn test_oracle_twice_is_identity() -> Result<()> {
        let oracle = oracle(4, &MARKED)?;

        for index in 0..16 {
            let pattern = format!("{:04b}", index);
            let state = QState::from_str(&pattern)?;
            let result = oracle.apply(&oracle.apply(&state)?)?;

            for i in 0..16 {
                let expected = if i == index { 1.0 } else { 0.0 };
                assert_approx_complex_eq!(expected, 0.0, result.state[i]);
            }
        }

        Ok(())
    }

    #[test]
    fn test_diffuser_twice_is_identity() -> Result<()> {
        let diffuser = diffuser(3)?;

        for index in 0..8 {
            let pattern = format!("{:03b}", index);
            let state = QState::from_str(&pattern)?;
            let result = diffuser.apply(&diffuser.apply(&state)?)?;

            for i in 0..8 {
                let expected = if i == index { 1.0 } else { 0.0 };
                assert_approx_complex_eq!(expected, 0.0, result.state[i]);
            }
        }

        Ok(())
    }

    #[test]
    fn test_diffuser_fixes_uniform_superposition() -> Result<()> {
        // |psi0> is the reflection axis, so D|psi0> = |psi0>
        let num_of_qbits = 3;
        let mut uniform = Circuit::new(num_of_qbits);
        for qubit in 0..num_of_qbits {
            uniform = uniform.H(qubit)?;
        }

        let psi0 = uniform.apply(&QState::zero_state(num_of_qbits))?;
        let result = diffuser(num_of_qbits)?.apply(&psi0)?;

        let amp = 1.0 / 8.0_f64.sqrt();
        for i in 0..8 {
            assert_approx_complex_eq!(amp, 0.0, result.state[i]);
        }

        Ok(())
    }

    #[test]
    fn test_iteration_count_for_4_qubits() {
        // floor((pi/4) * sqrt(16)) - 1 = 3 - 1
        assert_eq!(2, optimal_iterations(4));
    }

    #[test]
    fn test_iteration_count_never_negative() {
        assert_eq!(0, optimal_iterations(1));
    }

    #[test]
    fn test_search_amplifies_marked_states() -> Result<()> {
        let num_of_qbits = 4;
        let circuit = build_search_circuit(num_of_qbits, &MARKED)?;
        let result = circuit.apply(&QState::zero_state(num_of_qbits))?;

        let probs = result.probabilities();
        let marked_prob = probs[0b1110] + probs[0b1101];
        assert!(
            marked_prob > 0.9,
            "marked states only reached probability {}",
            marked_prob
        );

        // Probabilities still sum to 1
        let total: f64 = probs.iter().sum();
        assert!((total - 1.0).abs() < 1e-10);

        Ok(())
    }

    #[test]
    fn test_search_with_single_marked_state_on_3_qubits() -> Result<()> {
        let circuit = build_search_circuit(3, &["101"])?;
        let result = circuit.apply(&QState::zero_state(3))?;

        let probs = result.probabilities();
        let best = probs
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| i);
        assert_eq!(Some(0b101), best);

        Ok(())
    }

    #[test]
    fn test_rejects_invalid_marked_state() {
        let err = oracle(4, &["111"]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<GroverError>(),
            Some(&GroverError::InvalidMarkedState {
                pattern: "111".to_string(),
                num_of_qbits: 4,
            })
        );

        assert!(oracle(4, &["11a0"]).is_err());
        assert!(oracle(4, &["11100"]).is_err());
    }

    #[test]
    fn test_rejects_empty_register() {
        assert!(oracle(0, &[]).is_err());
        assert!(diffuser(0).is_err());
        assert!(build_search_circuit(0, &[]).is_err());
    }
}
