//! Best prize-collecting path through a square board.
//!
//! A piece starts at `(0, 0)` and moves one square right or down at a time
//! until it reaches `(n - 1, n - 1)`, collecting the prize on every square it
//! visits. The answer is the largest total it can collect; a total that
//! does not fit in an `i32` is an error.

use crate::error::{AlgorithmError, Result};

/// Reshape a row-major flattened board into rows.
pub fn board_from_flat(prizes: &[i32]) -> Result<Vec<Vec<i32>>> {
    let n = prizes.len().isqrt();
    if n * n != prizes.len() {
        return Err(AlgorithmError::NonSquareBoard { len: prizes.len() });
    }
    if n == 0 {
        return Ok(Vec::new());
    }
    Ok(prizes.chunks(n).map(<[i32]>::to_vec).collect())
}

fn check_square(board: &[Vec<i32>]) -> Result<()> {
    let n = board.len();
    for (row, cells) in board.iter().enumerate() {
        if cells.len() != n {
            return Err(AlgorithmError::RaggedBoard {
                row,
                len: cells.len(),
                expected: n,
            });
        }
    }
    Ok(())
}

/// Bottom-up DP, filling the table from the bottom-right corner.
pub fn bottom_up(board: &[Vec<i32>]) -> Result<i32> {
    check_square(board)?;
    let n = board.len();
    if n == 0 {
        return Ok(0);
    }

    // best[j] holds the answer for (i, j) once row i is processed.
    let mut best = vec![0; n];
    for i in (0..n).rev() {
        for j in (0..n).rev() {
            let below = (i + 1 < n).then_some(best[j]);
            let right = (j + 1 < n).then(|| best[j + 1]);
            let tail = match (below, right) {
                (Some(b), Some(r)) => b.max(r),
                (Some(v), None) | (None, Some(v)) => v,
                (None, None) => 0,
            };
            best[j] = add(board[i][j], tail)?;
        }
    }
    Ok(best[0])
}

/// Top-down DP with memoization.
pub fn top_down(board: &[Vec<i32>]) -> Result<i32> {
    check_square(board)?;
    let n = board.len();
    if n == 0 {
        return Ok(0);
    }
    let mut memo = vec![vec![None; n]; n];
    collect(board, &mut memo, 0, 0)
}

fn collect(
    board: &[Vec<i32>],
    memo: &mut [Vec<Option<i32>>],
    row: usize,
    col: usize,
) -> Result<i32> {
    if let Some(value) = memo[row][col] {
        return Ok(value);
    }
    let n = board.len();
    let down = if row + 1 < n {
        Some(collect(board, memo, row + 1, col)?)
    } else {
        None
    };
    let right = if col + 1 < n {
        Some(collect(board, memo, row, col + 1)?)
    } else {
        None
    };
    let tail = match (down, right) {
        (Some(d), Some(r)) => d.max(r),
        (Some(v), None) | (None, Some(v)) => v,
        (None, None) => 0,
    };
    let value = add(board[row][col], tail)?;
    memo[row][col] = Some(value);
    Ok(value)
}

fn add(prize: i32, tail: i32) -> Result<i32> {
    prize.checked_add(tail).ok_or(AlgorithmError::Overflow)
}
