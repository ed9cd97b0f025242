use super::registry::TextRegistry;
use super::registry::ThemeRegistry;

pub const DEFAULT_TITLE: &str = "GARAGE";
pub const NAME_PLACEHOLDER: &str = "Vehicle";
pub const PLATE_PLACEHOLDER: &str = "????";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelPhase {
    Hidden,
    Open,
}

/// Host-supplied vehicle, already coerced out of its wire shape.
///
/// Condition readings are kept raw; they only get clamped on their way to
/// the display layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleRecord {
    pub name: Option<String>,
    pub plate: Option<String>,
    pub stored: bool,
    pub fuel: f64,
    pub engine: f64,
    pub body: f64,
}

impl VehicleRecord {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(NAME_PLACEHOLDER)
    }

    pub fn display_plate(&self) -> &str {
        self.plate.as_deref().unwrap_or(PLATE_PLACEHOLDER)
    }
}

#[derive(Debug, Clone)]
pub struct GarageState {
    pub vehicles: Vec<VehicleRecord>,
    pub selected: usize,
    pub visible: bool,
    pub title: String,
    pub fallback_title: String,
    pub texts: TextRegistry,
    pub theme: ThemeRegistry,
}

impl Default for GarageState {
    fn default() -> Self {
        Self::new()
    }
}

impl GarageState {
    pub fn new() -> Self {
        Self {
            vehicles: Vec::new(),
            selected: 0,
            visible: false,
            title: DEFAULT_TITLE.to_string(),
            fallback_title: DEFAULT_TITLE.to_string(),
            texts: TextRegistry::default(),
            theme: ThemeRegistry::default(),
        }
    }

    pub fn phase(&self) -> PanelPhase {
        if self.visible {
            PanelPhase::Open
        } else {
            PanelPhase::Hidden
        }
    }

    /// Drops session data. Registries survive; they live for the process.
    pub fn reset(&mut self) {
        self.vehicles.clear();
        self.selected = 0;
    }

    pub fn open(&mut self, vehicles: Vec<VehicleRecord>, title: Option<String>) {
        self.visible = true;
        self.vehicles = vehicles;
        self.selected = 0;
        self.title = title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| self.fallback_title.clone());
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.reset();
    }

    pub fn in_range(&self, index: usize) -> bool {
        index < self.vehicles.len()
    }
}
