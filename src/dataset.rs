// 📊 Health Dataset - tabular records behind the Visualizations page
// Cells are kept as text; numeric columns are detected the way a dataframe would

use crate::error::{HealthError, Result};
use serde::Serialize;
use std::io::Read;
use std::path::Path;

/// Column used as x-axis labels for bar charts
pub const NAME_COLUMN: &str = "Name";

/// Column used as x-axis values for line charts
pub const AGE_COLUMN: &str = "Age";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    Bar,
    Line,
    CorrelationHeatmap,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Bar, ChartKind::Line, ChartKind::CorrelationHeatmap];

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar Chart",
            ChartKind::Line => "Line Chart",
            ChartKind::CorrelationHeatmap => "Correlation Heatmap",
        }
    }

    /// Heatmap is computed over every numeric column, the others plot one metric
    pub fn needs_metric(&self) -> bool {
        !matches!(self, ChartKind::CorrelationHeatmap)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// Row-major, `values[i][j]` = corr(columns[i], columns[j]); NaN when undefined
    pub values: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Default)]
pub struct HealthDataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl HealthDataset {
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let dataset = Self::from_reader(file)?;
        tracing::info!(
            path = %path.display(),
            rows = dataset.len(),
            columns = dataset.headers.len(),
            "loaded health dataset"
        );
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        // Short rows are allowed; missing trailing cells read as empty
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(HealthDataset { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| HealthError::UnknownColumn(name.to_string()))
    }

    fn cells(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(String::as_str).unwrap_or(""))
    }

    /// All-empty columns count as numeric (missing values only); a dataset without rows has none
    fn is_numeric(&self, index: usize) -> bool {
        !self.rows.is_empty()
            && self
                .cells(index)
                .filter(|cell| !cell.is_empty())
                .all(|cell| cell.parse::<f64>().is_ok())
    }

    /// Columns whose non-empty cells all parse as numbers, in header order
    pub fn numeric_columns(&self) -> Vec<String> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(i, _)| self.is_numeric(*i))
            .map(|(_, h)| h.clone())
            .collect()
    }

    /// Values of a numeric column; empty cells become `None`
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let index = self.column_index(name)?;
        if !self.is_numeric(index) {
            return Err(HealthError::NotNumeric(name.to_string()));
        }
        Ok(self.cells(index).map(|c| c.parse::<f64>().ok()).collect())
    }

    /// (Name, value) per row, skipping rows without a value
    pub fn bar_series(&self, metric: &str) -> Result<Vec<(String, f64)>> {
        let names = self.column_index(NAME_COLUMN)?;
        let values = self.numeric_column(metric)?;

        Ok(self
            .cells(names)
            .zip(values)
            .filter_map(|(name, value)| value.map(|v| (name.to_string(), v)))
            .collect())
    }

    /// (Age, value) per row, skipping rows missing either
    pub fn line_series(&self, metric: &str) -> Result<Vec<(f64, f64)>> {
        let ages = self.numeric_column(AGE_COLUMN)?;
        let values = self.numeric_column(metric)?;

        Ok(ages
            .into_iter()
            .zip(values)
            .filter_map(|(age, value)| Some((age?, value?)))
            .collect())
    }

    /// Pearson correlation between every pair of numeric columns
    pub fn correlation_matrix(&self) -> CorrelationMatrix {
        let columns = self.numeric_columns();
        let data: Vec<Vec<Option<f64>>> = columns
            .iter()
            .filter_map(|c| self.numeric_column(c).ok())
            .collect();

        let values = data
            .iter()
            .map(|a| data.iter().map(|b| pearson(a, b)).collect())
            .collect();

        CorrelationMatrix { columns, values }
    }
}

/// Correlation over rows where both values are present
fn pearson(a: &[Option<f64>], b: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();

    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }

    (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0)
}
