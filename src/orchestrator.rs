use crate::selector::Selector;
use clap::ValueEnum;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

/// インクリメント時のオーバーフローの扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// `i32::MAX` のインクリメントはエラー
    #[default]
    Checked,
    /// 2の補数で `i32::MIN` に折り返す
    Wrapping,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IncrementError {
    #[error("incrementing {value} overflows i32")]
    Overflow { value: i32 },
}

/// 1回の評価結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub input: i32,
    pub incremented: i32,
    pub result: i32,
    pub policy: OverflowPolicy,
}

/// 参照渡しで呼び出し元の値をインクリメントする
///
/// `Checked` でオーバーフローした場合、値は変更されない。
pub fn increment_in_place(value: &mut i32, policy: OverflowPolicy) -> Result<(), IncrementError> {
    let current = *value;
    *value = match policy {
        OverflowPolicy::Checked => current
            .checked_add(1)
            .ok_or(IncrementError::Overflow { value: current })?,
        OverflowPolicy::Wrapping => {
            let next = current.wrapping_add(1);
            if next < current {
                warn!("Increment of {} wrapped to {}", current, next);
            }
            next
        }
    };
    Ok(())
}

/// 値渡しでインクリメントした新しい値を返す（引数は変更しない）
pub fn increment(value: i32, policy: OverflowPolicy) -> Result<i32, IncrementError> {
    let mut next = value;
    increment_in_place(&mut next, policy)?;
    Ok(next)
}

/// `d = c + 1` を計算し、`c` と `d` をセレクタで比較した結果を返す
///
/// オーバーフローしなければ結果は常に `c + 1`。
/// `Wrapping` で `c == i32::MAX` の場合は `d == i32::MIN` となり、結果は `c` になる。
pub fn increment_and_select(
    c: i32,
    selector: &dyn Selector,
    policy: OverflowPolicy,
) -> Result<Evaluation, IncrementError> {
    let d = increment(c, policy)?;
    let result = selector.select(c, d);
    debug!("increment_and_select: c={}, d={}, result={}", c, d, result);

    Ok(Evaluation {
        input: c,
        incremented: d,
        result,
        policy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::Larger;
    use proptest::prelude::*;

    #[test]
    fn test_increment_and_select_five() {
        let eval = increment_and_select(5, &Larger, OverflowPolicy::Checked).unwrap();
        assert_eq!(eval.input, 5);
        assert_eq!(eval.incremented, 6);
        assert_eq!(eval.result, 6);
    }

    #[test]
    fn test_checked_overflow_is_error() {
        let err = increment_and_select(i32::MAX, &Larger, OverflowPolicy::Checked).unwrap_err();
        assert_eq!(err, IncrementError::Overflow { value: i32::MAX });
        assert_eq!(err.to_string(), format!("incrementing {} overflows i32", i32::MAX));
    }

    #[test]
    fn test_wrapping_overflow_selects_input() {
        let eval = increment_and_select(i32::MAX, &Larger, OverflowPolicy::Wrapping).unwrap();
        assert_eq!(eval.incremented, i32::MIN);
        assert_eq!(eval.result, i32::MAX);
    }

    #[test]
    fn test_increment_leaves_argument() {
        let x = 5;
        let y = increment(x, OverflowPolicy::Checked).unwrap();
        assert_eq!(x, 5);
        assert_eq!(y, 6);
    }

    #[test]
    fn test_increment_by_reference_then_by_value() {
        let mut x = 5;
        increment_in_place(&mut x, OverflowPolicy::Checked).unwrap();
        assert_eq!(x, 6);

        let y = increment(x, OverflowPolicy::Checked).unwrap();
        assert_eq!(x, 6);
        assert_eq!(y, 7);
    }

    #[test]
    fn test_increment_in_place_overflow() {
        let mut x = i32::MAX;
        let err = increment_in_place(&mut x, OverflowPolicy::Checked).unwrap_err();
        assert_eq!(err, IncrementError::Overflow { value: i32::MAX });
        assert_eq!(x, i32::MAX);

        increment_in_place(&mut x, OverflowPolicy::Wrapping).unwrap();
        assert_eq!(x, i32::MIN);
    }

    #[test]
    fn test_uses_given_selector() {
        struct Smaller;
        impl Selector for Smaller {
            fn select(&self, a: i32, b: i32) -> i32 {
                a.min(b)
            }
        }
        let eval = increment_and_select(5, &Smaller, OverflowPolicy::Checked).unwrap();
        assert_eq!(eval.result, 5);
    }

    proptest! {
        #[test]
        fn prop_result_is_successor(c in i32::MIN..i32::MAX, wrapping in any::<bool>()) {
            let policy = if wrapping { OverflowPolicy::Wrapping } else { OverflowPolicy::Checked };
            let eval = increment_and_select(c, &Larger, policy).unwrap();
            prop_assert_eq!(eval.result, c + 1);
            prop_assert_eq!(eval.incremented, c + 1);
        }
    }
}
