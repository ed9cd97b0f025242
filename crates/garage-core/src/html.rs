use std::fmt::Write;

use super::format::escape_html;
use super::registry::ThemeRegistry;
use super::render::GaugeKind;
use super::render::GaugeView;
use super::render::PanelView;
use super::render::RowView;

const VEHICLE_ICON: &str = r#"<svg viewBox="0 0 24 24" class="iconSvg" fill="none" aria-hidden="true"><path d="M12 2l7 4v6c0 5-3 9-7 10-4-1-7-5-7-10V6l7-4Z" stroke="currentColor" stroke-width="2"/><path d="M9.5 12.5l1.8 1.8L15.5 10" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#;

const FUEL_ICON: &str = r#"<svg viewBox="0 0 24 24" fill="none" aria-hidden="true"><path d="M7 3h8v6H7V3Z" stroke="currentColor" stroke-width="2"/><path d="M6 9h10v12H6V9Z" stroke="currentColor" stroke-width="2"/><path d="M16 6h2l2 2v11a2 2 0 0 1-2 2h-2" stroke="currentColor" stroke-width="2" stroke-linecap="round"/></svg>"#;

const ENGINE_ICON: &str = r#"<svg viewBox="0 0 24 24" fill="none" aria-hidden="true"><path d="M7 10V8h4l1-2h4v2h2v4h-2v3a3 3 0 0 1-3 3H9a3 3 0 0 1-3-3v-2H4v-3h2V10h1Z" stroke="currentColor" stroke-width="2" stroke-linejoin="round"/></svg>"#;

const BODY_ICON: &str = r#"<svg viewBox="0 0 24 24" fill="none" aria-hidden="true"><path d="M7 15l1-5h8l1 5" stroke="currentColor" stroke-width="2" stroke-linecap="round"/><path d="M6 15h12v4H6v-4Z" stroke="currentColor" stroke-width="2"/><path d="M8 19v2M16 19v2" stroke="currentColor" stroke-width="2" stroke-linecap="round"/></svg>"#;

fn gauge_icon(kind: GaugeKind) -> &'static str {
    match kind {
        GaugeKind::Fuel => FUEL_ICON,
        GaugeKind::Engine => ENGINE_ICON,
        GaugeKind::Body => BODY_ICON,
    }
}

/// Full panel document, theme variables on the root element.
pub fn render_html(view: &PanelView, theme: &ThemeRegistry) -> String {
    let mut out = String::new();
    let style: String = theme
        .iter()
        .map(|(key, value)| format!("--{key}:{};", escape_html(value)))
        .collect();
    let hidden = if view.visible { "" } else { " hidden" };

    let _ = write!(
        out,
        r#"<div id="ui" class="panel{hidden}" style="{style}"><header><div class="title">{}</div><div class="subtitle">{}</div></header>"#,
        escape_html(&view.title),
        escape_html(&view.subtitle),
    );
    out.push_str(&render_list(view));
    let _ = write!(
        out,
        r#"<footer class="hint">{}</footer></div>"#,
        escape_html(&view.hint)
    );
    out
}

/// Only the list body; replaces the previous list content wholesale.
pub fn render_list(view: &PanelView) -> String {
    let mut out = String::from(r#"<div id="vehList">"#);
    for row in &view.rows {
        render_row(&mut out, row);
    }
    out.push_str("</div>");
    out
}

fn render_row(out: &mut String, row: &RowView) {
    let class = if row.selected { "item selected" } else { "item" };
    let _ = write!(
        out,
        r#"<div class="{class}" data-index="{}"><div class="vehIcon">{VEHICLE_ICON}</div><div class="main"><div class="top"><div class="name">{}</div><div class="meta"><span>[{}]</span><span class="badge">{}</span></div></div>"#,
        row.index,
        escape_html(&row.name),
        escape_html(&row.plate),
        escape_html(&row.badge),
    );

    if let Some(detail) = &row.detail {
        out.push_str(r#"<div class="details"><div class="statsRow">"#);
        for gauge in &detail.gauges {
            render_gauge(out, gauge);
        }
        let _ = write!(
            out,
            r#"</div><div class="itemActions"><button class="btn primary" data-action="take">{}</button><button class="btn" data-action="close">{}</button></div></div>"#,
            escape_html(&detail.take_label),
            escape_html(&detail.close_label),
        );
    }

    out.push_str("</div></div>");
}

fn render_gauge(out: &mut String, gauge: &GaugeView) {
    let _ = write!(
        out,
        r#"<div class="miniStat"><div class="miniLabel">{}<span>{}</span></div><div class="miniBar"><div class="miniFill" style="width:{}%;background:{}"></div></div><div class="miniTag">{}</div></div>"#,
        gauge_icon(gauge.kind),
        escape_html(&gauge.label),
        gauge.pct,
        escape_html(&gauge.color),
        escape_html(&gauge.tag_label),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_panel;
    use crate::state::GarageState;
    use crate::state::VehicleRecord;

    fn state_with(name: &str, plate: &str) -> GarageState {
        let mut state = GarageState::new();
        state.open(
            vec![VehicleRecord {
                name: Some(name.to_string()),
                plate: Some(plate.to_string()),
                stored: true,
                fuel: 80.0,
                engine: 30.0,
                body: 10.0,
            }],
            None,
        );
        state
    }

    #[test]
    fn hostile_names_are_escaped() {
        let state = state_with("<img src=x onerror=alert(1)>", "\"><script>");
        let html = render_html(&render_panel(&state), &state.theme);

        assert!(!html.contains("<img"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(html.contains("[&quot;&gt;&lt;script&gt;]"));
    }

    #[test]
    fn selected_row_renders_gauges_and_actions() {
        let state = state_with("Car", "ABC123");
        let html = render_list(&render_panel(&state));

        assert!(html.contains(r#"class="item selected" data-index="0""#));
        assert!(html.contains("width:80%"));
        assert!(html.contains(r#"data-action="take""#));
        assert!(html.contains(r#"data-action="close""#));
        assert_eq!(html.matches("miniStat").count(), 3);
    }

    #[test]
    fn theme_variables_land_on_root() {
        let state = state_with("Car", "ABC123");
        let html = render_html(&render_panel(&state), &state.theme);
        assert!(html.contains("--primary:#3b82f6;"));
        assert!(html.contains("--bad:#ef4444;"));
    }

    #[test]
    fn hidden_panel_has_empty_list() {
        let mut state = state_with("Car", "ABC123");
        state.hide();
        let html = render_html(&render_panel(&state), &state.theme);
        assert!(html.contains(r#"class="panel hidden""#));
        assert!(html.contains(r#"<div id="vehList"></div>"#));
    }
}
