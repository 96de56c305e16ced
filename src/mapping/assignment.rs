/// Minimum-cost perfect matching on a square cost matrix (Hungarian method,
/// O(n^3) with row/column potentials).
///
/// Returns `(assignment, total)` where `assignment[row]` is the chosen column.
pub fn solve_assignment(cost: &[Vec<f64>]) -> (Vec<usize>, f64) {
    let n = cost.len();
    if n == 0 {
        return (Vec::new(), 0.0);
    }
    debug_assert!(cost.iter().all(|row| row.len() == n));

    // 1-based internals; index 0 is the virtual start column.
    let mut u = vec![0.0f64; n + 1];
    let mut v = vec![0.0f64; n + 1];
    let mut matched_row = vec![0usize; n + 1];
    let mut way = vec![0usize; n + 1];

    for row in 1..=n {
        matched_row[0] = row;
        let mut col0 = 0usize;
        let mut min_v = vec![f64::INFINITY; n + 1];
        let mut used = vec![false; n + 1];
        loop {
            used[col0] = true;
            let r0 = matched_row[col0];
            let mut delta = f64::INFINITY;
            let mut col1 = 0usize;
            for col in 1..=n {
                if used[col] {
                    continue;
                }
                let cur = cost[r0 - 1][col - 1] - u[r0] - v[col];
                if cur < min_v[col] {
                    min_v[col] = cur;
                    way[col] = col0;
                }
                if min_v[col] < delta {
                    delta = min_v[col];
                    col1 = col;
                }
            }
            for col in 0..=n {
                if used[col] {
                    u[matched_row[col]] += delta;
                    v[col] -= delta;
                } else {
                    min_v[col] -= delta;
                }
            }
            col0 = col1;
            if matched_row[col0] == 0 {
                break;
            }
        }
        loop {
            let col1 = way[col0];
            matched_row[col0] = matched_row[col1];
            col0 = col1;
            if col0 == 0 {
                break;
            }
        }
    }

    let mut assignment = vec![0usize; n];
    for col in 1..=n {
        assignment[matched_row[col] - 1] = col - 1;
    }
    let total = assignment
        .iter()
        .enumerate()
        .map(|(row, &col)| cost[row][col])
        .sum();
    (assignment, total)
}

#[cfg(test)]
#[path = "../../tests/src_inline/mapping/assignment.rs"]
mod tests;
