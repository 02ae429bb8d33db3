use tracing::debug;

/// 生成時の初期値
pub const DEFAULT_VALUE: i32 = 100;

/// 可変な整数属性を1つ持つエンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    value: i32,
}

impl Entity {
    pub fn new() -> Self {
        Self {
            value: DEFAULT_VALUE,
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn set(&mut self, value: i32) {
        debug!("Entity value {} -> {}", self.value, value);
        self.value = value;
    }

    /// 正の値のみ受け付ける。それ以外は属性を0にして `false` を返す
    pub fn set_positive(&mut self, value: i32) -> bool {
        if value > 0 {
            self.set(value);
            true
        } else {
            self.set(0);
            false
        }
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::new()
    }
}
