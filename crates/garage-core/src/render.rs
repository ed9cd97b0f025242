use super::format::clamp;
use super::format::color_bucket;
use super::format::tag;
use super::format::ColorRole;
use super::format::ConditionTag;
use super::state::GarageState;
use super::state::VehicleRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeKind {
    Fuel,
    Engine,
    Body,
}

impl GaugeKind {
    pub const ALL: [GaugeKind; 3] = [Self::Fuel, Self::Engine, Self::Body];

    pub fn text_key(self) -> &'static str {
        match self {
            Self::Fuel => "fuel",
            Self::Engine => "engine",
            Self::Body => "body",
        }
    }

    fn reading(self, vehicle: &VehicleRecord) -> f64 {
        match self {
            Self::Fuel => vehicle.fuel,
            Self::Engine => vehicle.engine,
            Self::Body => vehicle.body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GaugeView {
    pub kind: GaugeKind,
    pub label: String,
    pub pct: u8,
    pub role: ColorRole,
    pub color: String,
    pub tag: ConditionTag,
    pub tag_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub gauges: Vec<GaugeView>,
    pub take_label: String,
    pub close_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub index: usize,
    pub name: String,
    pub plate: String,
    pub stored: bool,
    pub badge: String,
    pub selected: bool,
    pub detail: Option<DetailView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub visible: bool,
    pub title: String,
    pub subtitle: String,
    pub hint: String,
    pub rows: Vec<RowView>,
}

impl PanelView {
    pub fn selected_row(&self) -> Option<&RowView> {
        self.rows.iter().find(|row| row.selected)
    }
}

pub fn render_panel(state: &GarageState) -> PanelView {
    let rows = state
        .vehicles
        .iter()
        .enumerate()
        .map(|(index, vehicle)| render_row(state, index, vehicle))
        .collect();

    PanelView {
        visible: state.visible,
        title: state.title.clone(),
        subtitle: state.texts.get("vehiclesStored"),
        hint: state.texts.get("hint"),
        rows,
    }
}

fn render_row(state: &GarageState, index: usize, vehicle: &VehicleRecord) -> RowView {
    let selected = index == state.selected;
    let badge_key = if vehicle.stored { "stored" } else { "out" };
    RowView {
        index,
        name: vehicle.display_name().to_string(),
        plate: vehicle.display_plate().to_string(),
        stored: vehicle.stored,
        badge: state.texts.get(badge_key),
        selected,
        detail: selected.then(|| render_detail(state, vehicle)),
    }
}

fn render_detail(state: &GarageState, vehicle: &VehicleRecord) -> DetailView {
    let gauges = GaugeKind::ALL
        .into_iter()
        .map(|kind| render_gauge(state, kind, kind.reading(vehicle)))
        .collect();
    DetailView {
        gauges,
        take_label: state.texts.get("take"),
        close_label: state.texts.get("close"),
    }
}

pub fn render_gauge(state: &GarageState, kind: GaugeKind, reading: f64) -> GaugeView {
    let pct = clamp(reading);
    let role = color_bucket(pct);
    let tag = tag(pct);
    GaugeView {
        kind,
        label: state.texts.get(kind.text_key()),
        pct,
        role,
        color: state.theme.get(role.theme_key()).to_string(),
        tag,
        tag_label: state.texts.get(tag.text_key()),
    }
}
