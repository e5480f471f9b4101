//! 统计函数 - 描述统计、IQR离群值检测与Pearson相关性分析
//!
//! 所有函数均为纯函数，给定相同的数据集输入返回相同结果。

use thiserror::Error;

use crate::types::dataset::format_number;
use crate::types::{ColumnData, Dataset, DatasetColumn};
use crate::utils::table_formatter::TextTable;

pub mod heatmap;

/// 统计计算错误
#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    #[error("dataset '{0}' has no rows")]
    EmptyDataset(String),

    #[error("dataset '{0}' has no numeric columns")]
    NoNumericColumns(String),
}

/// 描述统计：每个数值列的 count/mean/std/min/25%/50%/75%/max 定宽表格。
/// 列顺序跟随数据集声明顺序，重复调用输出稳定。
pub fn describe(dataset: &Dataset) -> Result<String, StatsError> {
    if dataset.is_empty() {
        return Err(StatsError::EmptyDataset(dataset.name().to_string()));
    }
    let numeric = numeric_columns_or_err(dataset)?;

    let mut headers = vec![String::new()];
    headers.extend(numeric.iter().map(|c| c.name.clone()));
    let mut table = TextTable::new(headers);

    let values: Vec<Vec<f64>> = numeric
        .iter()
        .map(|c| c.numeric_values().unwrap_or_default())
        .collect();

    table.push_row(stat_row("count", &values, |v| Some(v.len() as f64)));
    table.push_row(stat_row("mean", &values, |v| non_empty(v).map(mean)));
    table.push_row(stat_row("std", &values, sample_std));
    table.push_row(stat_row("min", &values, |v| non_empty(v).map(min_of)));
    table.push_row(stat_row("25%", &values, |v| quantile_of(v, 0.25)));
    table.push_row(stat_row("50%", &values, |v| quantile_of(v, 0.5)));
    table.push_row(stat_row("75%", &values, |v| quantile_of(v, 0.75)));
    table.push_row(stat_row("max", &values, |v| non_empty(v).map(max_of)));

    Ok(table.render())
}

/// 离群值检测：1.5×IQR规则，统计每个数值列落在
/// [Q1 − 1.5·IQR, Q3 + 1.5·IQR] 区间之外的值数量。非数值列不参与计算。
pub fn detect_outliers(dataset: &Dataset) -> Result<String, StatsError> {
    if dataset.is_empty() {
        return Err(StatsError::EmptyDataset(dataset.name().to_string()));
    }
    let numeric = numeric_columns_or_err(dataset)?;

    let mut table = TextTable::new(vec!["column", "lower", "upper", "outliers"]);

    for column in numeric {
        let values = column.numeric_values().unwrap_or_default();
        if values.is_empty() {
            table.push_row(vec![column.name.clone(), String::new(), String::new(), "0".to_string()]);
            continue;
        }

        let (Some(q1), Some(q3)) = (quantile_of(&values, 0.25), quantile_of(&values, 0.75))
        else {
            continue;
        };
        let iqr = q3 - q1;
        let lower = q1 - 1.5 * iqr;
        let upper = q3 + 1.5 * iqr;
        let outliers = values.iter().filter(|v| **v < lower || **v > upper).count();

        table.push_row(vec![
            column.name.clone(),
            format_number(lower),
            format_number(upper),
            outliers.to_string(),
        ]);
    }

    Ok(table.render())
}

/// 工艺数据摘要：efficiency列均值（缺失时为N/A）与各数值列最小值（瓶颈候选）
pub fn summarize_process(dataset: &Dataset) -> Result<String, StatsError> {
    if dataset.is_empty() {
        return Err(StatsError::EmptyDataset(dataset.name().to_string()));
    }
    let numeric = numeric_columns_or_err(dataset)?;

    let efficiency = dataset
        .column("efficiency")
        .and_then(|c| c.numeric_values())
        .and_then(|v| non_empty(&v).map(mean))
        .map(format_number)
        .unwrap_or_else(|| "N/A".to_string());

    let mut table = TextTable::new(vec!["column", "min"]);
    for column in numeric {
        let min = column
            .numeric_values()
            .and_then(|v| non_empty(&v).map(min_of))
            .map(format_number)
            .unwrap_or_default();
        table.push_row(vec![column.name.clone(), min]);
    }

    Ok(format!(
        "Process Efficiency (mean): {}\nPotential Bottlenecks (per-column minimum):\n{}",
        efficiency,
        table.render()
    ))
}

/// Pearson相关矩阵，标签顺序跟随数据集数值列顺序
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    /// values[i][j] 为第i列与第j列的相关系数；方差为零等无定义情况为None
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn size(&self) -> usize {
        self.labels.len()
    }
}

/// 数值列两两Pearson相关系数（成对完整观测）。
/// 单个数值列产生对角线为1.0的1×1矩阵。
pub fn correlation_matrix(dataset: &Dataset) -> Result<CorrelationMatrix, StatsError> {
    if dataset.is_empty() {
        return Err(StatsError::EmptyDataset(dataset.name().to_string()));
    }
    let numeric = numeric_columns_or_err(dataset)?;

    let labels: Vec<String> = numeric.iter().map(|c| c.name.clone()).collect();
    let series: Vec<&[Option<f64>]> = numeric
        .iter()
        .filter_map(|c| match &c.data {
            ColumnData::Numeric(values) => Some(values.as_slice()),
            ColumnData::Text(_) => None,
        })
        .collect();

    let n = labels.len();
    let mut values = vec![vec![None; n]; n];
    for i in 0..n {
        for j in 0..n {
            values[i][j] = if i == j {
                // 对角线恒为1.0（列存在至少一个观测时）
                series[i].iter().any(|v| v.is_some()).then_some(1.0)
            } else {
                pearson(series[i], series[j])
            };
        }
    }

    Ok(CorrelationMatrix { labels, values })
}

fn numeric_columns_or_err<'a>(
    dataset: &'a Dataset,
) -> Result<Vec<&'a DatasetColumn>, StatsError> {
    let numeric = dataset.numeric_columns();
    if numeric.is_empty() {
        return Err(StatsError::NoNumericColumns(dataset.name().to_string()));
    }
    Ok(numeric)
}

/// 单个统计量在所有数值列上的一行取值
fn stat_row<F>(label: &str, columns: &[Vec<f64>], compute: F) -> Vec<String>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    let mut row = vec![label.to_string()];
    for values in columns {
        row.push(compute(values).map(format_number).unwrap_or_default());
    }
    row
}

fn non_empty(values: &[f64]) -> Option<&[f64]> {
    (!values.is_empty()).then_some(values)
}

fn min_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// 样本标准差（n−1），观测少于2个时无定义
fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(var.sqrt())
}

/// 线性插值分位数
pub(crate) fn quantile_of(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let pos = (sorted.len() - 1) as f64 * q;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    Some(sorted[lo] + (pos - lo as f64) * (sorted[hi] - sorted[lo]))
}

/// 成对完整观测上的Pearson相关系数。观测不足或方差为零时为None
fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys.iter())
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let mx = mean(&pairs.iter().map(|p| p.0).collect::<Vec<_>>());
    let my = mean(&pairs.iter().map(|p| p.1).collect::<Vec<_>>());

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        cov += (x - mx) * (y - my);
        var_x += (x - mx).powi(2);
        var_y += (y - my).powi(2);
    }

    let denom = var_x.sqrt() * var_y.sqrt();
    if denom == 0.0 {
        return None;
    }
    Some(cov / denom)
}
