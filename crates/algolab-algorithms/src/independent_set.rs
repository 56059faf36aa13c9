//! Maximum-weight independent set on a line.
//!
//! Given weights `w[0..n]`, pick indices with no two adjacent so that the
//! total weight is maximal. Weights must be non-negative and the total must
//! fit in an `i32`.
//!
//! `opt[i] = max(opt[i - 1], opt[i - 2] + w[i])`

use crate::error::{AlgorithmError, Result};

fn check_weights(weights: &[i32]) -> Result<()> {
    match weights.iter().position(|&weight| weight < 0) {
        Some(index) => Err(AlgorithmError::NegativeWeight {
            index,
            weight: weights[index],
        }),
        None => Ok(()),
    }
}

fn add(a: i32, b: i32) -> Result<i32> {
    a.checked_add(b).ok_or(AlgorithmError::Overflow)
}

/// Bottom-up DP over prefixes, in constant space.
pub fn bottom_up(weights: &[i32]) -> Result<i32> {
    check_weights(weights)?;
    // (best for prefix ending two back, best for prefix ending one back)
    let mut before = 0;
    let mut last = 0;
    for &weight in weights {
        let best = last.max(add(before, weight)?);
        before = last;
        last = best;
    }
    Ok(last)
}

/// Top-down DP with memoization.
pub fn top_down(weights: &[i32]) -> Result<i32> {
    check_weights(weights)?;
    if weights.is_empty() {
        return Ok(0);
    }
    let mut memo = vec![None; weights.len()];
    solve(weights, &mut memo, weights.len() - 1)
}

fn solve(weights: &[i32], memo: &mut [Option<i32>], k: usize) -> Result<i32> {
    if let Some(best) = memo[k] {
        return Ok(best);
    }
    let best = match k {
        0 => weights[0],
        1 => weights[0].max(weights[1]),
        _ => {
            let skip = solve(weights, memo, k - 1)?;
            let take = add(solve(weights, memo, k - 2)?, weights[k])?;
            skip.max(take)
        }
    };
    memo[k] = Some(best);
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_examples() {
        let cases: [(&[i32], i32); 4] = [
            (&[], 0),
            (&[11, 10], 11),
            (&[100, 120, 21], 121),
            (&[53, 77, 102, 76, 65, 1, 1, 1], 221),
        ];
        for (weights, expected) in cases {
            assert_eq!(bottom_up(weights), Ok(expected), "bottom-up {weights:?}");
            assert_eq!(top_down(weights), Ok(expected), "top-down {weights:?}");
        }
    }

    #[test]
    fn test_single_weight() {
        assert_eq!(bottom_up(&[7]), Ok(7));
        assert_eq!(top_down(&[7]), Ok(7));
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let expected = Err(AlgorithmError::NegativeWeight {
            index: 0,
            weight: -5,
        });
        assert_eq!(bottom_up(&[-5]), expected);
        assert_eq!(top_down(&[-5]), expected);
        assert_eq!(
            bottom_up(&[3, 4, -1]),
            Err(AlgorithmError::NegativeWeight {
                index: 2,
                weight: -1
            })
        );
    }

    #[test]
    fn test_total_overflow_is_an_error() {
        let weights = [i32::MAX, 0, i32::MAX];
        assert_eq!(bottom_up(&weights), Err(AlgorithmError::Overflow));
        assert_eq!(top_down(&weights), Err(AlgorithmError::Overflow));
        // The largest single weight still fits.
        assert_eq!(bottom_up(&[i32::MAX, 1]), Ok(i32::MAX));
        assert_eq!(top_down(&[i32::MAX, 1]), Ok(i32::MAX));
    }
}
