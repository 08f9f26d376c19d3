//! Calculation history backed by two CSV tables.
//!
//! `option_pricing.csv` holds one row per priced calculation and
//! `heatmap_data.csv` holds the spot × volatility cells generated for a
//! calculation, keyed by `calc_id`. Deleting a calculation removes its
//! heatmap rows as well.

pub mod records;

pub use records::{
    heatmap_records, CalculationRecord, HeatmapRecord, StoredHeatmap, StoredHeatmapRow,
};

use anyhow::{anyhow, Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::models::bs::{OptionParameters, PricingResult};
use crate::sweep::types::{Axis, OutputField, ParameterField, SweepMatrix};
use records::{CALCULATION_HEADERS, HEATMAP_HEADERS};

const CALCULATIONS_FILE: &str = "option_pricing.csv";
const HEATMAPS_FILE: &str = "heatmap_data.csv";

/// Handle to the history tables in one data directory.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    config: StoreConfig,
}

impl HistoryStore {
    /// Opens the store, creating the directory and empty tables if missing.
    pub fn open(config: StoreConfig) -> Result<Self> {
        fs::create_dir_all(&config.data_dir).with_context(|| {
            format!(
                "failed to create data directory {}",
                config.data_dir.display()
            )
        })?;

        let store = Self { config };
        create_table_if_not_exists(&store.calculations_path(), &CALCULATION_HEADERS)?;
        create_table_if_not_exists(&store.heatmaps_path(), &HEATMAP_HEADERS)?;
        info!(
            data_dir = %store.config.data_dir.display(),
            "history tables verified/created"
        );
        Ok(store)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn calculations_path(&self) -> PathBuf {
        self.config.data_dir.join(CALCULATIONS_FILE)
    }

    fn heatmaps_path(&self) -> PathBuf {
        self.config.data_dir.join(HEATMAPS_FILE)
    }

    /// Stores a priced calculation and returns its new `calc_id`.
    pub fn insert_calculation(
        &self,
        params: &OptionParameters,
        result: &PricingResult,
    ) -> Result<u64> {
        let existing: Vec<CalculationRecord> = read_rows(&self.calculations_path())?;
        let calc_id = existing.iter().map(|r| r.calc_id).max().unwrap_or(0) + 1;

        let record = CalculationRecord::new(calc_id, unix_now(), params, result);
        append_rows(&self.calculations_path(), std::slice::from_ref(&record))?;

        info!(calc_id, "inserted calculation record");
        Ok(calc_id)
    }

    /// Stores heatmap cells for an existing calculation; returns the row count.
    ///
    /// Rows already stored for `calc_id` are replaced, so a calculation holds
    /// at most one grid.
    pub fn insert_heatmap_records(&self, calc_id: u64, records: &[HeatmapRecord]) -> Result<usize> {
        if self.get_calculation(calc_id)?.is_none() {
            return Err(anyhow!(
                "cannot store heatmap rows: calc_id={} does not exist",
                calc_id
            ));
        }

        let mut existing: Vec<StoredHeatmapRow> = read_rows(&self.heatmaps_path())?;
        let first_id = existing.iter().map(|r| r.heatmap_id).max().unwrap_or(0) + 1;

        let before = existing.len();
        existing.retain(|r| r.calc_id != calc_id);
        if existing.len() != before {
            rewrite_table(&self.heatmaps_path(), &HEATMAP_HEADERS, &existing)?;
            debug!(calc_id, replaced = before - existing.len(), "dropped previous heatmap rows");
        }

        let rows: Vec<StoredHeatmapRow> = records
            .iter()
            .zip(first_id..)
            .map(|(r, heatmap_id)| StoredHeatmapRow {
                heatmap_id,
                calc_id,
                spot: r.spot,
                volatility: r.volatility,
                call_price: r.call_price,
                put_price: r.put_price,
            })
            .collect();
        append_rows(&self.heatmaps_path(), &rows)?;

        info!(calc_id, count = rows.len(), "inserted heatmap records");
        Ok(rows.len())
    }

    /// All calculations, oldest first.
    pub fn list_calculations(&self) -> Result<Vec<CalculationRecord>> {
        let mut rows: Vec<CalculationRecord> = read_rows(&self.calculations_path())?;
        rows.sort_by_key(|r| (r.timestamp, r.calc_id));
        Ok(rows)
    }

    pub fn get_calculation(&self, calc_id: u64) -> Result<Option<CalculationRecord>> {
        let rows: Vec<CalculationRecord> = read_rows(&self.calculations_path())?;
        Ok(rows.into_iter().find(|r| r.calc_id == calc_id))
    }

    /// Reassembles the stored heatmap of `calc_id`, or `None` if it has no rows.
    ///
    /// Axes are the sorted distinct spots (columns) and volatilities (rows);
    /// cells without a stored row are NaN.
    pub fn load_heatmap(&self, calc_id: u64) -> Result<Option<StoredHeatmap>> {
        let mut rows: Vec<StoredHeatmapRow> = read_rows(&self.heatmaps_path())?;
        rows.retain(|r| r.calc_id == calc_id);
        if rows.is_empty() {
            return Ok(None);
        }
        rows.sort_by_key(|r| r.heatmap_id);
        debug!(calc_id, rows = rows.len(), "loaded heatmap rows");

        let spots = sorted_unique(rows.iter().map(|r| r.spot));
        let vols = sorted_unique(rows.iter().map(|r| r.volatility));

        let mut call = vec![vec![f64::NAN; spots.len()]; vols.len()];
        let mut put = vec![vec![f64::NAN; spots.len()]; vols.len()];
        for r in &rows {
            let (Ok(i), Ok(j)) = (
                vols.binary_search_by(|v| v.total_cmp(&r.volatility)),
                spots.binary_search_by(|s| s.total_cmp(&r.spot)),
            ) else {
                continue;
            };
            call[i][j] = r.call_price;
            put[i][j] = r.put_price;
        }

        let x_axis = Axis::new(ParameterField::Spot, spots);
        let y_axis = Axis::new(ParameterField::Volatility, vols);
        Ok(Some(StoredHeatmap {
            calc_id,
            call: SweepMatrix {
                x_axis: x_axis.clone(),
                y_axis: y_axis.clone(),
                output: OutputField::CallPrice,
                values: call,
            },
            put: SweepMatrix {
                x_axis,
                y_axis,
                output: OutputField::PutPrice,
                values: put,
            },
        }))
    }

    /// Removes a calculation and its heatmap rows; returns whether it existed.
    pub fn delete_calculation(&self, calc_id: u64) -> Result<bool> {
        let mut calcs: Vec<CalculationRecord> = read_rows(&self.calculations_path())?;
        let before = calcs.len();
        calcs.retain(|r| r.calc_id != calc_id);
        if calcs.len() == before {
            return Ok(false);
        }

        let mut cells: Vec<StoredHeatmapRow> = read_rows(&self.heatmaps_path())?;
        let cells_before = cells.len();
        cells.retain(|r| r.calc_id != calc_id);

        rewrite_table(&self.heatmaps_path(), &HEATMAP_HEADERS, &cells)?;
        rewrite_table(&self.calculations_path(), &CALCULATION_HEADERS, &calcs)?;

        info!(
            calc_id,
            heatmap_rows = cells_before - cells.len(),
            "deleted calculation"
        );
        Ok(true)
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

fn sorted_unique(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut v: Vec<f64> = values.collect();
    v.sort_by(|a, b| a.total_cmp(b));
    v.dedup();
    v
}

fn create_table_if_not_exists(path: &Path, headers: &[&str]) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    rewrite_table::<CalculationRecord>(path, headers, &[])
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: T = result.with_context(|| format!("malformed row in {}", path.display()))?;
        rows.push(row);
    }
    Ok(rows)
}

fn append_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let file = OpenOptions::new()
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open {} for append", path.display()))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Replaces a table with `headers` followed by `rows`, via a temp file.
fn rewrite_table<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> Result<()> {
    let tmp = path.with_extension("csv.tmp");
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp)
            .with_context(|| format!("failed to create {}", tmp.display()))?;
        writer.write_record(headers)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
    }
    fs::rename(&tmp, path).with_context(|| format!("failed to replace {}", path.display()))?;
    Ok(())
}
