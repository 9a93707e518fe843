use crate::consts::{DEFAULT_GROUP_COUNT, DEFAULT_GROUP_SIZE, DEFAULT_REPORT_INTERVAL};
use crate::constraints::{PinRule, PinnedGroup};
use crate::core_types::{CellId, GroupId};
use crate::error::{PackForgeError, PfResult};
use clap::{parser::ValueSource, ArgMatches, Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    #[serde(default)]
    pub search: SearchParams,
    #[command(flatten)]
    #[serde(default)]
    pub weights: ScoringWeights,
    #[command(flatten)]
    #[serde(default)]
    pub layout: PackLayout,
}

/// How the move generator picks the two cells of a swap.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SamplingMode {
    /// Draw from every cell and let the search discard swaps that touch a
    /// frozen group. Matches the reference optimizer's trajectory.
    #[default]
    AllCells,
    /// Draw only from cells of groups that may change.
    MutableOnly,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    #[arg(long, default_value_t = 100.0)]
    pub initial_temp: f64,
    #[arg(long, default_value_t = 0.99995)]
    pub cooling_rate: f64,
    #[arg(long, default_value_t = 2_000_000)]
    pub iterations: usize,
    #[arg(long, default_value_t = 20)]
    pub runs: usize,

    /// Worker threads (defaults to available parallelism)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Base seed; run i is seeded with seed + i
    #[arg(short = 'S', long, default_value_t = 0)]
    pub seed: u64,

    #[arg(long, default_value_t = DEFAULT_REPORT_INTERVAL)]
    pub report_interval: usize,

    #[arg(long, value_enum, default_value_t = SamplingMode::AllCells)]
    pub sampling: SamplingMode,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            initial_temp: 100.0,
            cooling_rate: 0.99995,
            iterations: 2_000_000,
            runs: 20,
            threads: None,
            seed: 0,
            report_interval: DEFAULT_REPORT_INTERVAL,
            sampling: SamplingMode::AllCells,
        }
    }
}

impl SearchParams {
    pub fn validate(&self) -> PfResult<()> {
        if self.initial_temp <= 0.0 || !self.initial_temp.is_finite() {
            return Err(PackForgeError::Config(format!(
                "initial temperature must be positive, got {}",
                self.initial_temp
            )));
        }
        if self.cooling_rate.is_nan() || self.cooling_rate <= 0.0 || self.cooling_rate > 1.0 {
            return Err(PackForgeError::Config(format!(
                "cooling rate must be in (0, 1], got {}",
                self.cooling_rate
            )));
        }
        if self.runs == 0 {
            return Err(PackForgeError::Config("at least one run is required".into()));
        }
        if self.threads == Some(0) {
            return Err(PackForgeError::Config("thread count must be positive".into()));
        }
        Ok(())
    }
}

/// Named weighting presets of the score engine.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum WeightProfile {
    /// All six terms, including current path and degradation balance.
    #[default]
    Advanced,
    /// Earlier variant without current path and degradation terms.
    Refined,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    #[arg(long, value_enum, default_value_t = WeightProfile::Advanced)]
    pub profile: WeightProfile,

    // === REWARDS ===
    #[arg(long, default_value_t = 2.0)]
    pub weight_surface_area: f64,
    #[arg(long, default_value_t = 50.0)]
    pub weight_interconnection: f64,
    #[arg(long, default_value_t = 10.0)]
    pub weight_edge_cooling: f64,

    // === PENALTIES ===
    #[arg(long, default_value_t = 3.0)]
    pub weight_spread: f64,
    #[arg(long, default_value_t = 5.0)]
    pub weight_current_path: f64,
    #[arg(long, default_value_t = 20.0)]
    pub weight_degradation: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::advanced()
    }
}

impl ScoringWeights {
    pub fn advanced() -> Self {
        Self {
            profile: WeightProfile::Advanced,
            weight_surface_area: 2.0,
            weight_interconnection: 50.0,
            weight_edge_cooling: 10.0,
            weight_spread: 3.0,
            weight_current_path: 5.0,
            weight_degradation: 20.0,
        }
    }

    pub fn refined() -> Self {
        Self {
            profile: WeightProfile::Refined,
            weight_current_path: 0.0,
            weight_degradation: 0.0,
            ..Self::advanced()
        }
    }

    pub fn for_profile(profile: WeightProfile) -> Self {
        match profile {
            WeightProfile::Advanced => Self::advanced(),
            WeightProfile::Refined => Self::refined(),
        }
    }

    /// Loads weights from JSON. Fields missing from the file fall back to
    /// the preset named by its `profile` key (advanced if absent).
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> PfResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> PfResult<Self> {
        let overrides: serde_json::Value = serde_json::from_str(content)?;
        let profile = match overrides.get("profile") {
            Some(p) => serde_json::from_value(p.clone())?,
            None => WeightProfile::default(),
        };

        let mut merged = serde_json::to_value(Self::for_profile(profile))?;
        match (merged.as_object_mut(), overrides.as_object()) {
            (Some(base), Some(fields)) => {
                for (k, v) in fields {
                    base.insert(k.clone(), v.clone());
                }
            }
            _ => {
                return Err(PackForgeError::Config(
                    "weights file must contain a JSON object".into(),
                ))
            }
        }
        Ok(serde_json::from_value(merged)?)
    }

    /// Copies every weight the user typed on the command line onto `self`.
    /// An explicit `--profile` resets the preset first.
    pub fn merge_from_cli(&mut self, cli_weights: &ScoringWeights, matches: &ArgMatches) {
        if matches.value_source("profile") == Some(ValueSource::CommandLine) {
            *self = Self::for_profile(cli_weights.profile);
        }

        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli_weights.$field;
                }
            };
        }

        update_if_present!(weight_surface_area, "weight_surface_area");
        update_if_present!(weight_interconnection, "weight_interconnection");
        update_if_present!(weight_edge_cooling, "weight_edge_cooling");
        update_if_present!(weight_spread, "weight_spread");
        update_if_present!(weight_current_path, "weight_current_path");
        update_if_present!(weight_degradation, "weight_degradation");
    }
}

/// Shape of the pack: how many groups, how big, and which are pinned.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PackLayout {
    #[arg(long, default_value_t = DEFAULT_GROUP_COUNT)]
    pub group_count: usize,
    #[arg(long, default_value_t = DEFAULT_GROUP_SIZE)]
    pub group_size: usize,

    /// Groups whose cell set is fixed, e.g. "1:127-140"
    #[arg(long, default_value = "1:127-140")]
    pub pin_exact: String,
    /// Groups that must contain cells, e.g. "10:1,2,6"
    #[arg(long, default_value = "10:1,2,6")]
    pub pin_contains: String,
    /// Groups that must not contain cells, e.g. "3:40,41"
    #[arg(long, default_value = "")]
    pub pin_excludes: String,
}

impl Default for PackLayout {
    fn default() -> Self {
        Self {
            group_count: DEFAULT_GROUP_COUNT,
            group_size: DEFAULT_GROUP_SIZE,
            pin_exact: "1:127-140".to_string(),
            pin_contains: "10:1,2,6".to_string(),
            pin_excludes: String::new(),
        }
    }
}

impl PackLayout {
    /// A layout with no pinned groups.
    pub fn unpinned(group_count: usize, group_size: usize) -> Self {
        Self {
            group_count,
            group_size,
            pin_exact: String::new(),
            pin_contains: String::new(),
            pin_excludes: String::new(),
        }
    }

    pub fn validate(&self) -> PfResult<()> {
        if self.group_count == 0 || self.group_count > GroupId::MAX as usize {
            return Err(PackForgeError::Config(format!(
                "group count must be in 1..={}, got {}",
                GroupId::MAX,
                self.group_count
            )));
        }
        if self.group_size == 0 {
            return Err(PackForgeError::Config("group size must be positive".into()));
        }
        Ok(())
    }

    pub fn total_cells(&self) -> usize {
        self.group_count * self.group_size
    }

    pub fn pinned_groups(&self) -> PfResult<Vec<PinnedGroup>> {
        let mut pins = Vec::new();
        pins.extend(parse_pins(&self.pin_exact, "pin_exact", PinRule::Exact)?);
        pins.extend(parse_pins(&self.pin_contains, "pin_contains", PinRule::Contains)?);
        pins.extend(parse_pins(&self.pin_excludes, "pin_excludes", PinRule::Excludes)?);

        for pin in &pins {
            if pin.group == 0 || pin.group as usize > self.group_count {
                return Err(PackForgeError::Config(format!(
                    "pinned group {} is outside 1..={}",
                    pin.group, self.group_count
                )));
            }
        }
        Ok(pins)
    }
}

/// Parses "g:ids;g:ids" where ids is a comma list of numbers or `a-b` ranges.
fn parse_pins(
    s: &str,
    name: &str,
    rule: fn(Vec<CellId>) -> PinRule,
) -> PfResult<Vec<PinnedGroup>> {
    let bad = |detail: String| PackForgeError::Config(format!("--{}: {}", name, detail));

    let mut pins = Vec::new();
    for entry in s.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        let (group_str, list_str) = entry
            .split_once(':')
            .ok_or_else(|| bad(format!("'{}' is not of the form group:cells", entry)))?;

        let group: GroupId = group_str
            .trim()
            .parse()
            .map_err(|_| bad(format!("invalid group '{}'", group_str.trim())))?;

        let mut cells = Vec::new();
        for item in list_str.split(',').map(str::trim).filter(|i| !i.is_empty()) {
            if let Some((lo, hi)) = item.split_once('-') {
                let lo: CellId = lo
                    .trim()
                    .parse()
                    .map_err(|_| bad(format!("invalid range '{}'", item)))?;
                let hi: CellId = hi
                    .trim()
                    .parse()
                    .map_err(|_| bad(format!("invalid range '{}'", item)))?;
                if lo > hi {
                    return Err(bad(format!("empty range '{}'", item)));
                }
                cells.extend(lo..=hi);
            } else {
                cells.push(
                    item.parse()
                        .map_err(|_| bad(format!("invalid cell id '{}'", item)))?,
                );
            }
        }

        if cells.is_empty() {
            return Err(bad(format!("group {} lists no cells", group)));
        }
        cells.sort_unstable();
        cells.dedup();
        pins.push(PinnedGroup {
            group,
            rule: rule(cells),
        });
    }
    Ok(pins)
}
