use crate::orchestrator::{Evaluation, OverflowPolicy};
use clap::ValueEnum;
use serde::Serialize;
use std::fmt::Display;

/// 標準出力のフォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// `Result: <値>` の1行
    #[default]
    Text,
    Json,
}

/// run のレスポンス
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub input: i32,
    pub incremented: i32,
    pub result: i32,
    pub overflow: OverflowPolicy,
}

/// select のレスポンス
#[derive(Debug, Clone, Serialize)]
pub struct SelectReport {
    pub a: i32,
    pub b: i32,
    pub result: i32,
}

/// entity のレスポンス
#[derive(Debug, Clone, Serialize)]
pub struct EntityReport {
    pub value: i32,
    pub instances: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted: Option<bool>,
}

impl From<Evaluation> for RunReport {
    fn from(eval: Evaluation) -> Self {
        Self {
            input: eval.input,
            incremented: eval.incremented,
            result: eval.result,
            overflow: eval.policy,
        }
    }
}

/// 指定フォーマットで1行に整形
pub fn render<T: Serialize>(
    format: OutputFormat,
    value: impl Display,
    report: &T,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(format!("Result: {value}")),
        OutputFormat::Json => serde_json::to_string(report),
    }
}
