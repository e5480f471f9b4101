//! 定宽文本表格格式化

/// 定宽文本表格，用于统计工具的文本输出
pub struct TextTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new<S: Into<String>>(headers: Vec<S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row<S: Into<String>>(&mut self, cells: Vec<S>) {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        // 行长度与表头对齐，缺失单元格补空
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    /// 渲染为定宽表格。首列左对齐，其余列右对齐
    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (idx, cell) in row.iter().enumerate() {
                widths[idx] = widths[idx].max(cell.chars().count());
            }
        }

        let mut out = String::new();
        out.push_str(&Self::render_line(&self.headers, &widths));
        out.push('\n');

        for row in &self.rows {
            out.push_str(&Self::render_line(row, &widths));
            out.push('\n');
        }

        out
    }

    fn render_line(cells: &[String], widths: &[usize]) -> String {
        let mut line = String::new();
        for (idx, cell) in cells.iter().enumerate() {
            if idx > 0 {
                line.push_str("  ");
            }
            if idx == 0 {
                line.push_str(&format!("{:<width$}", cell, width = widths[idx]));
            } else {
                line.push_str(&format!("{:>width$}", cell, width = widths[idx]));
            }
        }
        line.trim_end().to_string()
    }
}
