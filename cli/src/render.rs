use comfy_table::{CellAlignment, Table};

use common::{FlowSummary, TaskDetail};

pub const NO_DATA: &str = "No data.";
pub const PLACEHOLDER: &str = "--";

fn table_with_header(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_header(header.to_vec());
    table
}

/// Columns: URL, State, LastModifiedTime, Size(bytes).
pub fn flow_list_table(flows: &[FlowSummary]) -> Table {
    let mut table = table_with_header(&["URL", "State", "LastModifiedTime", "Size(bytes)"]);
    if flows.is_empty() {
        table.add_row(vec![NO_DATA]);
        return table;
    }

    for flow in flows {
        table.add_row(vec![
            flow.url.as_str(),
            flow.state.as_str(),
            flow.last_modified_time.as_str(),
            flow.size_bytes.as_str(),
        ]);
    }
    if let Some(column) = table.column_mut(3) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table
}

/// Columns: URL, Type, State, Depends, Script.
pub fn flow_detail_table(tasks: &[TaskDetail]) -> Table {
    let mut table = table_with_header(&["URL", "Type", "State", "Depends", "Script"]);
    if tasks.is_empty() {
        table.add_row(vec![NO_DATA]);
        return table;
    }

    for task in tasks {
        let depends = task
            .joined_depends()
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        let script = task.script().unwrap_or(PLACEHOLDER);
        table.add_row(vec![
            task.url.as_str(),
            task.task_type.as_str(),
            task.state.as_str(),
            depends.as_str(),
            script,
        ]);
    }
    table
}
