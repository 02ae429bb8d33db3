use crate::orchestrator::Evaluation;
use clap::ValueEnum;
use std::collections::HashSet;
use std::fmt;

/// グラフの出力フォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum GraphFormat {
    #[default]
    Tree,
    Mermaid,
    Dot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Call,
    Return,
}

#[derive(Debug, Clone)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub label: String,
    pub kind: EdgeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphStats {
    pub nodes: usize,
    pub calls: usize,
    pub returns: usize,
}

impl fmt::Display for GraphStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "📊 Call Chain Statistics:\n\
             ├── Nodes: {}\n\
             ├── Calls: {}\n\
             └── Returns: {}\n",
            self.nodes, self.calls, self.returns
        )
    }
}

/// 1回の評価の呼び出しチェーン
pub struct CallChainGraph {
    nodes: Vec<String>,
    edges: Vec<GraphEdge>,
}

pub const ENTRY_POINT: &str = "main";

impl CallChainGraph {
    pub fn from_evaluation(eval: &Evaluation) -> Self {
        let orchestrator = format!("increment_and_select({})", eval.input);
        let selector = format!("select({}, {})", eval.input, eval.incremented);

        let edges = vec![
            GraphEdge {
                from: ENTRY_POINT.to_string(),
                to: orchestrator.clone(),
                label: format!("c = {}", eval.input),
                kind: EdgeKind::Call,
            },
            GraphEdge {
                from: orchestrator.clone(),
                to: selector.clone(),
                label: format!("d = {}", eval.incremented),
                kind: EdgeKind::Call,
            },
            GraphEdge {
                from: selector.clone(),
                to: orchestrator.clone(),
                label: eval.result.to_string(),
                kind: EdgeKind::Return,
            },
            GraphEdge {
                from: orchestrator.clone(),
                to: ENTRY_POINT.to_string(),
                label: eval.result.to_string(),
                kind: EdgeKind::Return,
            },
        ];

        Self {
            nodes: vec![ENTRY_POINT.to_string(), orchestrator, selector],
            edges,
        }
    }

    pub fn render(&self, format: GraphFormat, max_depth: usize) -> String {
        match format {
            GraphFormat::Tree => self.generate_tree_format(max_depth),
            GraphFormat::Mermaid => self.generate_mermaid_format(),
            GraphFormat::Dot => self.generate_dot_format(),
        }
    }

    pub fn generate_tree_format(&self, max_depth: usize) -> String {
        let mut result = format!("📞 Call chain for: {}\n\n", ENTRY_POINT);
        self.print_callees_recursive(ENTRY_POINT, 0, max_depth, &mut result, &mut HashSet::new());
        result
    }

    pub fn generate_mermaid_format(&self) -> String {
        let mut result = String::from("```mermaid\ngraph TD\n");

        for node in &self.nodes {
            result.push_str(&format!("    {}[\"{}\"]\n", self.node_id(node), node));
        }

        for edge in &self.edges {
            let arrow = match edge.kind {
                EdgeKind::Call => format!("-->|{}|", edge.label),
                EdgeKind::Return => format!("-.->|{}|", edge.label),
            };
            result.push_str(&format!(
                "    {} {} {}\n",
                self.node_id(&edge.from),
                arrow,
                self.node_id(&edge.to)
            ));
        }

        result.push_str("```\n");
        result
    }

    pub fn generate_dot_format(&self) -> String {
        let mut result = String::from("digraph call_chain {\n    node [shape=box];\n");

        for node in &self.nodes {
            result.push_str(&format!(
                "    {} [label=\"{}\"];\n",
                self.node_id(node),
                escape_dot(node)
            ));
        }

        for edge in &self.edges {
            let style = match edge.kind {
                EdgeKind::Call => "",
                EdgeKind::Return => ", style=dashed",
            };
            result.push_str(&format!(
                "    {} -> {} [label=\"{}\"{}];\n",
                self.node_id(&edge.from),
                self.node_id(&edge.to),
                escape_dot(&edge.label),
                style
            ));
        }

        result.push_str("}\n");
        result
    }

    fn print_callees_recursive(
        &self,
        function_name: &str,
        depth: usize,
        max_depth: usize,
        result: &mut String,
        visited: &mut HashSet<String>,
    ) {
        if depth > max_depth || visited.contains(function_name) {
            if visited.contains(function_name) {
                result.push_str(&format!(
                    "{}├── {} [🔄 recursive]\n",
                    "│   ".repeat(depth - 1),
                    function_name
                ));
            }
            return;
        }

        visited.insert(function_name.to_string());

        let indent = if depth == 0 {
            String::new()
        } else {
            "│   ".repeat(depth - 1) + "├── "
        };

        result.push_str(&format!(
            "{}{}{}\n",
            indent,
            function_name,
            self.return_info(function_name)
        ));

        for edge in self.calls_from(function_name) {
            self.print_callees_recursive(&edge.to, depth + 1, max_depth, result, visited);
        }

        visited.remove(function_name);
    }

    fn calls_from<'a>(&'a self, function_name: &'a str) -> impl Iterator<Item = &'a GraphEdge> {
        self.edges
            .iter()
            .filter(move |e| e.kind == EdgeKind::Call && e.from == function_name)
    }

    fn return_info(&self, function_name: &str) -> String {
        self.edges
            .iter()
            .find(|e| e.kind == EdgeKind::Return && e.from == function_name)
            .map(|e| format!(" = {}", e.label))
            .unwrap_or_default()
    }

    fn node_id(&self, name: &str) -> String {
        // Mermaid/DOT用のID生成（英数字のみ）
        name.chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect()
    }

    pub fn get_stats(&self) -> GraphStats {
        GraphStats {
            nodes: self.nodes.len(),
            calls: self.edges.iter().filter(|e| e.kind == EdgeKind::Call).count(),
            returns: self.edges.iter().filter(|e| e.kind == EdgeKind::Return).count(),
        }
    }
}

fn escape_dot(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::{OverflowPolicy, increment_and_select};
    use crate::selector::Larger;

    fn graph_for(c: i32) -> CallChainGraph {
        let eval = increment_and_select(c, &Larger, OverflowPolicy::Checked).unwrap();
        CallChainGraph::from_evaluation(&eval)
    }

    #[test]
    fn test_tree_format() {
        let tree = graph_for(5).generate_tree_format(10);
        assert_eq!(
            tree,
            "📞 Call chain for: main\n\n\
             main\n\
             ├── increment_and_select(5) = 6\n\
             │   ├── select(5, 6) = 6\n"
        );
    }

    #[test]
    fn test_tree_respects_depth() {
        let tree = graph_for(5).generate_tree_format(1);
        assert!(tree.contains("increment_and_select(5)"));
        assert!(!tree.contains("select(5, 6)"));
    }

    #[test]
    fn test_mermaid_format() {
        let mermaid = graph_for(5).generate_mermaid_format();
        assert!(mermaid.starts_with("```mermaid\ngraph TD\n"));
        assert!(mermaid.contains("    main[\"main\"]\n"));
        assert!(mermaid.contains("    main -->|c = 5| increment_and_select_5_\n"));
        assert!(mermaid.contains("    select_5__6_ -.->|6| increment_and_select_5_\n"));
        assert!(mermaid.ends_with("```\n"));
    }

    #[test]
    fn test_dot_format() {
        let dot = graph_for(-3).generate_dot_format();
        assert!(dot.starts_with("digraph call_chain {\n"));
        assert!(dot.contains("    increment_and_select__3_ [label=\"increment_and_select(-3)\"];\n"));
        assert!(dot.contains("    increment_and_select__3_ -> select__3___2_ [label=\"d = -2\"];\n"));
        assert!(dot.contains("    increment_and_select__3_ -> main [label=\"-2\", style=dashed];\n"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn test_stats() {
        let stats = graph_for(0).get_stats();
        assert_eq!(stats, GraphStats { nodes: 3, calls: 2, returns: 2 });
        assert_eq!(
            stats.to_string(),
            "📊 Call Chain Statistics:\n├── Nodes: 3\n├── Calls: 2\n└── Returns: 2\n"
        );
    }

    #[test]
    fn test_escape_dot() {
        assert_eq!(escape_dot(r#"a "b" \c"#), r#"a \"b\" \\c"#);
    }
}
