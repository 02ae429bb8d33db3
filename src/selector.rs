/// 2つの整数から大きい方を選ぶ
///
/// `a > b` のときだけ `a` を返し、それ以外（同値を含む）は `b` を返す。
pub fn select_larger(a: i32, b: i32) -> i32 {
    if a > b { a } else { b }
}

/// 比較選択の能力
pub trait Selector {
    fn select(&self, a: i32, b: i32) -> i32;
}

/// `select_larger` を使う状態を持たないセレクタ
#[derive(Debug, Clone, Copy, Default)]
pub struct Larger;

impl Selector for Larger {
    fn select(&self, a: i32, b: i32) -> i32 {
        select_larger(a, b)
    }
}
