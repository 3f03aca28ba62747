// Copyright 2026 Tacker Client Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Rendering of results.

use anyhow::Result;
use clap::ValueEnum;
use serde_json::Value;
use tackerclient::ResourceView;

/// Output format of results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human readable table
    #[default]
    Table,
    /// JSON document
    Json,
    /// YAML document
    Yaml,
}

/// Render a list of resources, showing `columns` in the table format.
pub fn format_list(format: OutputFormat, items: &[Value], columns: &[&str]) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(items)?),
        OutputFormat::Table => {
            let rows = items
                .iter()
                .map(|item| {
                    columns
                        .iter()
                        .map(|column| cell(item.get(*column)))
                        .collect()
                })
                .collect::<Vec<Vec<String>>>();
            Ok(table(columns.iter().map(|c| c.to_string()).collect(), rows))
        }
    }
}

/// Render a single resource as a field/value table.
pub fn format_one(format: OutputFormat, item: &Value) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(item)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(item)?),
        OutputFormat::Table => match ResourceView::new(item.clone()) {
            Ok(view) => {
                let rows = view
                    .as_map()
                    .iter()
                    .map(|(k, v)| vec![k.clone(), cell(Some(v))])
                    .collect();
                Ok(table(vec!["Field".into(), "Value".into()], rows))
            }
            Err(_) => Ok(cell(Some(item))),
        },
    }
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn table(header: Vec<String>, rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (idx, value) in row.iter().enumerate() {
            let width = value.lines().map(|l| l.chars().count()).max().unwrap_or(0);
            widths[idx] = widths[idx].max(width);
        }
    }

    let separator = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+");
    let separator = format!("+{}+\n", separator);

    let mut result = separator.clone();
    result.push_str(&line(&header, &widths));
    result.push_str(&separator);
    for row in &rows {
        result.push_str(&line(row, &widths));
    }
    result.push_str(&separator);
    result
}

/// One table row; multi-line cells span several text lines.
fn line(values: &[String], widths: &[usize]) -> String {
    let split: Vec<Vec<&str>> = values.iter().map(|v| v.lines().collect()).collect();
    let height = split.iter().map(|l| l.len()).max().unwrap_or(0).max(1);
    let mut result = String::new();
    for idx in 0..height {
        result.push('|');
        for (lines, width) in split.iter().zip(widths) {
            let text = lines.get(idx).copied().unwrap_or("");
            let pad = width - text.chars().count();
            result.push_str(&format!(" {}{} |", text, " ".repeat(pad)));
        }
        result.push('\n');
    }
    result
}

#[cfg(test)]
pub mod test {
    use serde_json::json;

    use super::{format_list, format_one, OutputFormat};

    #[test]
    fn test_table_list() {
        let items = vec![
            json!({"id": "1", "name": "vnf1", "status": "ACTIVE"}),
            json!({"id": "22", "name": "vnf2"}),
        ];
        let out = format_list(OutputFormat::Table, &items, &["id", "name", "status"]).unwrap();
        assert_eq!(
            out,
            "+----+------+--------+\n\
             | id | name | status |\n\
             +----+------+--------+\n\
             | 1  | vnf1 | ACTIVE |\n\
             | 22 | vnf2 |        |\n\
             +----+------+--------+\n"
        );
    }

    #[test]
    fn test_table_one() {
        let out = format_one(OutputFormat::Table, &json!({"id": "1", "attributes": {"a": 1}}))
            .unwrap();
        assert!(out.contains("| attributes | {\"a\":1} |"));
        assert!(out.contains("| id         | 1       |"));
    }

    #[test]
    fn test_json_yaml() {
        let item = json!({"id": "1"});
        assert_eq!(
            format_one(OutputFormat::Json, &item).unwrap(),
            "{\n  \"id\": \"1\"\n}"
        );
        assert_eq!(format_one(OutputFormat::Yaml, &item).unwrap(), "id: '1'\n");
    }
}
