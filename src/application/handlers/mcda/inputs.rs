//! Boundary validation shared by the MCDA handlers.

use tracing::debug;

use crate::domain::mcda::{
    resolve_directions, Alternative, CriteriaTypes, CriterionType, DecisionMatrix, McdaError,
};

/// Validated engine inputs for one request.
pub(crate) struct PreparedInputs {
    pub matrix: DecisionMatrix,
    pub directions: Vec<CriterionType>,
}

/// Builds the decision matrix and direction vector.
///
/// Column order is `explicit` when given, else `weight_order` (the weights
/// map's key order).
pub(crate) fn prepare(
    alternatives: &[Alternative],
    explicit: Option<&[String]>,
    weight_order: Vec<String>,
    types: &CriteriaTypes,
) -> Result<PreparedInputs, McdaError> {
    let criteria = match explicit {
        Some(list) => list.to_vec(),
        None => weight_order,
    };

    let matrix = DecisionMatrix::build(alternatives, &criteria)?;
    let directions = resolve_directions(matrix.criteria(), types);

    for name in types.keys() {
        if !matrix.criteria().contains(name) {
            debug!(criterion = %name, "Ignoring direction for criterion outside the matrix");
        }
    }

    Ok(PreparedInputs { matrix, directions })
}
