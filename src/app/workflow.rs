//! Dashboard workflow: calculate, build heatmaps, browse history.
//!
//! Each method is what a GUI button or a script step triggers. Failures are
//! logged and returned; nothing is persisted or rendered for a failed step.

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::inputs::{HeatmapForm, PricingForm};
use crate::config::AppConfig;
use crate::history::{heatmap_records, CalculationRecord, HistoryStore};
use crate::models::bs::{price, OptionParameters, PricingResult};
use crate::render::{render_placeholder, render_price_heatmaps, RenderConfig};
use crate::sweep::config::HeatmapRanges;
use crate::sweep::grid::sweep_many;
use crate::sweep::types::{OutputField, SweepMatrix};

/// Outcome of a price calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    pub calc_id: u64,
    pub params: OptionParameters,
    pub result: PricingResult,
}

/// Call/put heatmaps for one calculation and the SVG they were drawn to.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapOutput {
    pub calc_id: u64,
    pub call: SweepMatrix,
    pub put: SweepMatrix,
    pub image_path: PathBuf,
}

/// Stateful driver holding the store handle and the last calculation id.
#[derive(Debug)]
pub struct Dashboard {
    store: HistoryStore,
    render: RenderConfig,
    output_dir: PathBuf,
    last_calc_id: Option<u64>,
}

impl Dashboard {
    pub fn new(store: HistoryStore, render: RenderConfig, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            render,
            output_dir: output_dir.into(),
            last_calc_id: None,
        }
    }

    /// Opens the store from `config` and writes images next to its tables.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let store = HistoryStore::open(config.store.clone())?;
        let output_dir = config.store.data_dir.join("plots");
        info!("dashboard initialized");
        Ok(Self::new(store, config.render.clone(), output_dir))
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    pub fn last_calc_id(&self) -> Option<u64> {
        self.last_calc_id
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Prices the form inputs and records the calculation.
    pub fn calculate_prices(&mut self, form: &PricingForm) -> Result<Calculation> {
        info!("calculating prices");
        let outcome = self.try_calculate(form);
        match &outcome {
            Ok(calc) => {
                self.last_calc_id = Some(calc.calc_id);
                info!(calc_id = calc.calc_id, "price calculation completed");
            }
            Err(e) => warn!(error = %e, "error while calculating prices"),
        }
        outcome
    }

    fn try_calculate(&self, form: &PricingForm) -> Result<Calculation> {
        let params = form.parse()?;
        let result = price(params)?;
        let calc_id = self.store.insert_calculation(&params, &result)?;
        Ok(Calculation {
            calc_id,
            params,
            result,
        })
    }

    /// Builds spot × volatility call/put heatmaps for the last calculation.
    ///
    /// Requires a prior [`Dashboard::calculate_prices`]. The whole grid is
    /// priced before anything is stored or drawn.
    pub fn generate_heatmap(
        &mut self,
        pricing: &PricingForm,
        heatmap: &HeatmapForm,
    ) -> Result<HeatmapOutput> {
        let Some(calc_id) = self.last_calc_id else {
            warn!("heatmap requested before any calculation");
            return Err(anyhow!(
                "Please calculate option prices first to generate heatmap."
            ));
        };

        info!(calc_id, "starting heatmap generation");
        let outcome = self.try_generate(calc_id, pricing, heatmap);
        match &outcome {
            Ok(out) => info!(
                calc_id,
                path = %out.image_path.display(),
                "heatmap generation completed"
            ),
            Err(e) => warn!(calc_id, error = %e, "error while generating heatmap"),
        }
        outcome
    }

    fn try_generate(
        &self,
        calc_id: u64,
        pricing: &PricingForm,
        heatmap: &HeatmapForm,
    ) -> Result<HeatmapOutput> {
        let base = pricing.parse()?;
        let ranges = heatmap.to_config()?.resolve_ranges(&base)?;
        log_ranges(&ranges);

        let (spot_axis, vol_axis) = ranges.axes();
        let mut matrices = sweep_many(
            base,
            &spot_axis,
            &vol_axis,
            &[OutputField::CallPrice, OutputField::PutPrice],
        )?;
        let put = matrices.pop().context("missing put matrix")?;
        let call = matrices.pop().context("missing call matrix")?;

        let records = heatmap_records(&call, &put).context("call/put matrices are misaligned")?;

        // Rows are stored only once the image exists
        let image_path = self.image_path(calc_id)?;
        render_price_heatmaps(&call, &put, "", &image_path, &self.render)?;
        if let Err(e) = self.store.insert_heatmap_records(calc_id, &records) {
            if let Err(rm) = fs::remove_file(&image_path) {
                warn!(calc_id, error = %rm, "failed to remove unsaved heatmap image");
            }
            return Err(e);
        }

        Ok(HeatmapOutput {
            calc_id,
            call,
            put,
            image_path,
        })
    }

    /// All stored calculations, oldest first.
    pub fn history(&self) -> Result<Vec<CalculationRecord>> {
        self.store.list_calculations()
    }

    /// Re-plots the stored heatmap of `calc_id`.
    pub fn load_history_item(&self, calc_id: u64) -> Result<HeatmapOutput> {
        let stored = self
            .store
            .load_heatmap(calc_id)?
            .ok_or_else(|| anyhow!("No heatmap rows found for calc_id={}", calc_id))?;

        let image_path = self.image_path(calc_id)?;
        render_price_heatmaps(
            &stored.call,
            &stored.put,
            &format!(" (calc_id={})", calc_id),
            &image_path,
            &self.render,
        )?;
        info!(calc_id, "loaded calculation from history and re-plotted");

        Ok(HeatmapOutput {
            calc_id,
            call: stored.call,
            put: stored.put,
            image_path,
        })
    }

    /// Draws the empty-state image and returns its path.
    pub fn placeholder(&self) -> Result<PathBuf> {
        self.ensure_output_dir()?;
        let path = self.output_dir.join("placeholder.svg");
        render_placeholder(&path, &self.render)?;
        Ok(path)
    }

    fn image_path(&self, calc_id: u64) -> Result<PathBuf> {
        self.ensure_output_dir()?;
        Ok(self.output_dir.join(format!("heatmap_{}.svg", calc_id)))
    }

    fn ensure_output_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "failed to create output directory {}",
                self.output_dir.display()
            )
        })
    }
}

fn log_ranges(r: &HeatmapRanges) {
    info!(
        "using spot range [{:.4}, {:.4}] and vol range [{:.4}, {:.4}] with resolution {}",
        r.spot_min, r.spot_max, r.vol_min, r.vol_max, r.resolution
    );
}
