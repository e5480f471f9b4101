//! 表格数据集 - 从CSV解析，单次运行期间不可变

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::error::PipelineError;

/// 列数据，按类型存储。所有非空单元格均可解析为数值时推断为数值列
#[derive(Debug, Clone, Serialize)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

/// 数据集的一列
#[derive(Debug, Clone, Serialize)]
pub struct DatasetColumn {
    pub name: String,
    pub data: ColumnData,
}

impl DatasetColumn {
    /// 数值列的非空值视图，非数值列返回None
    pub fn numeric_values(&self) -> Option<Vec<f64>> {
        match &self.data {
            ColumnData::Numeric(values) => Some(values.iter().filter_map(|v| *v).collect()),
            ColumnData::Text(_) => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.data, ColumnData::Numeric(_))
    }
}

/// 表格数据集（行×命名列）
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    /// 数据集名称（如 "quality" / "process"），用于预览标题与错误信息
    name: String,
    columns: Vec<DatasetColumn>,
    row_count: usize,
}

impl Dataset {
    /// 从CSV文件加载数据集
    pub fn from_csv_path(name: &str, path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| {
            PipelineError::Input(format!(
                "cannot open {} data CSV {:?}: {}",
                name, path, e
            ))
        })?;
        Self::from_reader(name, file)
            .with_context(|| format!("failed to parse {} data CSV {:?}", name, path))
    }

    /// 从任意Reader加载数据集
    pub fn from_reader<R: std::io::Read>(name: &str, reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()
            .context("failed to read CSV headers")?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
        let mut row_count = 0usize;

        for record in csv_reader.records() {
            let record = record.context("failed to read CSV record")?;
            for (idx, column) in cells.iter_mut().enumerate() {
                let raw = record.get(idx).unwrap_or("");
                if raw.is_empty() {
                    column.push(None);
                } else {
                    column.push(Some(raw.to_string()));
                }
            }
            row_count += 1;
        }

        let columns = headers
            .into_iter()
            .zip(cells)
            .map(|(name, values)| DatasetColumn {
                data: infer_column_data(&values),
                name,
            })
            .collect();

        Ok(Self {
            name: name.to_string(),
            columns,
            row_count,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn columns(&self) -> &[DatasetColumn] {
        &self.columns
    }

    /// 数值列，按数据集声明顺序
    pub fn numeric_columns(&self) -> Vec<&DatasetColumn> {
        self.columns.iter().filter(|c| c.is_numeric()).collect()
    }

    /// 按列名查找
    pub fn column(&self, name: &str) -> Option<&DatasetColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// 前N行的Markdown预览表格，作为阶段指令中的命名数据段落
    pub fn preview_markdown(&self, limit: usize) -> String {
        let shown = self.row_count.min(limit);
        let mut out = String::new();

        out.push('|');
        for column in &self.columns {
            out.push_str(&format!(" {} |", column.name));
        }
        out.push('\n');
        out.push('|');
        for _ in &self.columns {
            out.push_str(" --- |");
        }
        out.push('\n');

        for row in 0..shown {
            out.push('|');
            for column in &self.columns {
                let cell = match &column.data {
                    ColumnData::Numeric(values) => values[row]
                        .map(format_number)
                        .unwrap_or_default(),
                    ColumnData::Text(values) => {
                        values[row].clone().unwrap_or_default()
                    }
                };
                out.push_str(&format!(" {} |", cell));
            }
            out.push('\n');
        }

        if shown < self.row_count {
            out.push_str(&format!(
                "\n({} of {} rows shown)\n",
                shown, self.row_count
            ));
        }

        out
    }
}

/// 推断列类型：所有非空单元格可解析为f64且至少有一个非空值时为数值列
fn infer_column_data(values: &[Option<String>]) -> ColumnData {
    let mut any_value = false;
    let mut all_numeric = true;

    for value in values.iter().flatten() {
        any_value = true;
        if value.parse::<f64>().is_err() {
            all_numeric = false;
            break;
        }
    }

    if any_value && all_numeric {
        ColumnData::Numeric(
            values
                .iter()
                .map(|v| v.as_ref().and_then(|s| s.parse::<f64>().ok()))
                .collect(),
        )
    } else {
        ColumnData::Text(values.to_vec())
    }
}

/// 预览中的数值格式化，整数不带小数位
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.4}", value)
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

// Include tests
#[cfg(test)]
mod tests;
