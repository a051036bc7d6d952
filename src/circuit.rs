use anyhow::Result;
use nalgebra_sparse::{coo::CooMatrix, csr::CsrMatrix};
use num_complex::Complex;

use crate::error::GroverError;
use crate::gates::{h_matrix, x_matrix};
use crate::qstate::QState;
use crate::Qbit;

#[derive(Debug)]
pub struct Circuit {
    gates: Vec<CsrMatrix<Qbit>>,
    num_of_qbits: usize,
}

impl Circuit {
    pub fn new(num_of_qbits: usize) -> Self {
        Self {
            gates: Vec::new(),
            num_of_qbits,
        }
    }

    pub fn num_of_qbits(&self) -> usize {
        self.num_of_qbits
    }

    pub fn check_and_revsere_index(&self, index: usize) -> Result<usize> {
        if index >= self.num_of_qbits {
            return Err(anyhow::anyhow!(
                "Index out of bounds for the number of qubits {}",
                self.num_of_qbits
            ));
        }
        Ok(self.num_of_qbits - 1 - index)
    }

    pub fn gate_at(mut self, index: usize, gate: CsrMatrix<Qbit>) -> Result<Self> {
        let index = self.check_and_revsere_index(index)?;

        let mut matrix = CsrMatrix::identity(1);
        for i in 0..self.num_of_qbits {
            if i == index {
                matrix = kronecker_product(&matrix, &gate);
            } else {
                matrix = kronecker_product(&matrix, &CsrMatrix::identity(2));
            }
        }

        self.add_gate(matrix);
        Ok(self)
    }

    #[allow(non_snake_case)]
    pub fn H(self, index: usize) -> Result<Self> {
        self.gate_at(index, h_matrix())
    }

    #[allow(non_snake_case)]
    pub fn X(self, index: usize) -> Result<Self> {
        self.gate_at(index, x_matrix())
    }

    /// Multi-controlled Z over `qubits`. Flips the sign of every basis state
    /// whose bits are all 1 on the given qubits, which makes the gate
    /// diagonal, so the full matrix is built directly instead of lifting a
    /// 2x2 gate through Kronecker products.
    pub fn mcz(mut self, qubits: &[usize]) -> Result<Self> {
        if qubits.is_empty() {
            return Err(anyhow::anyhow!("MCZ needs at least one qubit"));
        }

        let mut mask = 0_usize;
        for &qubit in qubits {
            if qubit >= self.num_of_qbits {
                return Err(anyhow::anyhow!(
                    "Index out of bounds for the number of qubits {}",
                    self.num_of_qbits
                ));
            }
            if mask & (1 << qubit) != 0 {
                return Err(anyhow::anyhow!("Duplicate qubit {} in MCZ", qubit));
            }
            mask |= 1 << qubit;
        }

        let dim = 2_usize.pow(self.num_of_qbits as u32);
        let mut coo = CooMatrix::new(dim, dim);
        for index in 0..dim {
            let sign = if index & mask == mask { -1.0 } else { 1.0 };
            coo.push(index, index, Complex::new(sign, 0.0));
        }

        self.add_gate(CsrMatrix::from(&coo));
        Ok(self)
    }

    /// Appends every gate of `fragment` to this circuit. Both circuits must
    /// be built for the same register width.
    pub fn compose(mut self, fragment: &Circuit) -> Result<Self> {
        if fragment.num_of_qbits != self.num_of_qbits {
            return Err(GroverError::InvalidRegisterSize {
                expected: self.num_of_qbits,
                actual: fragment.num_of_qbits,
            }
            .into());
        }

        self.gates.extend(fragment.gates.iter().cloned());
        Ok(self)
    }

    fn add_gate(&mut self, gate: CsrMatrix<Qbit>) {
        self.gates.push(gate);
    }

    pub fn apply(&self, state: &QState) -> Result<QState> {
        if state.num_of_qbits() != self.num_of_qbits {
            return Err(GroverError::InvalidRegisterSize {
                expected: self.num_of_qbits,
                actual: state.num_of_qbits(),
            }
            .into());
        }

        let mut result = state.state.clone();
        for gate in &self.gates {
            result = gate * result;
        }
        Ok(QState { state: result })
    }
}

pub fn kronecker_product(x: &CsrMatrix<Qbit>, y: &CsrMatrix<Qbit>) -> CsrMatrix<Qbit> {
    let mut result = CooMatrix::new(x.nrows() * y.nrows(), x.ncols() * y.ncols());

    for (rx, cx, value_x) in x.triplet_iter() {
        for (ry, cy, value_y) in y.triplet_iter() {
            let new_row = rx * y.nrows() + ry;
            let new_col = cx * y.ncols() + cy;
            let new_value = value_x * value_y;
            result.push(new_row, new_col, new_value);
        }
    }

    CsrMatrix::from(&result)
}
