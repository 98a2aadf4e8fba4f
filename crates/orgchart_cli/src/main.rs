//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `orgchart_core` linkage.
//! - Print the persisted chart (or the default) as an indented tree.

use orgchart_core::{ChartService, Employee, JsonFileStore};
use std::sync::Arc;

const CHART_FILE: &str = "org-chart.json";

fn main() {
    println!("orgchart_core ping={}", orgchart_core::ping());
    println!("orgchart_core version={}", orgchart_core::core_version());

    let store = Arc::new(JsonFileStore::new(CHART_FILE));
    let service = ChartService::open(store);
    print_node(service.tree(), 0);
}

fn print_node(node: &Employee, depth: usize) {
    let indent = "  ".repeat(depth);
    match &node.title {
        Some(title) => println!("{indent}{} ({title}) [{}]", node.name, node.id),
        None => println!("{indent}{} [{}]", node.name, node.id),
    }
    for child in &node.children {
        print_node(child, depth + 1);
    }
}
