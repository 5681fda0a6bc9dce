//! ECharts option builders.
//!
//! Options are plain JSON so the browser only has to mount them. Where
//! ECharts would want a callback, the data carries precomputed text and the
//! option names a formatter from the small registry in `static/js/charts.js`
//! with a `fn:` prefix.

use serde_json::{json, Value};

use evh_oi_common::compliance::ComplianceHeatMap;
use evh_oi_common::entities::EntityNode;
use evh_oi_common::personas::{Persona, PersonalityTraits};
use evh_oi_common::risk::RiskMetric;

const ACCENT: &str = "#34d399";
const AXIS_TEXT: &str = "#cbd5e1";
const AXIS_LINE: &str = "#475569";
const TOOLTIP_BG: &str = "rgba(0, 0, 0, 0.8)";

fn tooltip_base() -> Value {
    json!({
        "backgroundColor": TOOLTIP_BG,
        "borderColor": ACCENT,
        "textStyle": { "color": "#fff" },
    })
}

fn category_axis(data: &[String]) -> Value {
    json!({
        "type": "category",
        "data": data,
        "splitArea": { "show": true },
        "axisLabel": { "color": AXIS_TEXT, "fontSize": 11 },
        "axisLine": { "lineStyle": { "color": AXIS_LINE } },
    })
}

// ── Heat map ──────────────────────────────────────────────────────────────────

pub fn heatmap_option(map: &ComplianceHeatMap) -> Value {
    let data: Vec<Value> = map
        .cells
        .iter()
        .map(|&[month, entity, score]| {
            let entity_name = map.entities.get(entity as usize).map(String::as_str).unwrap_or("");
            let month_name = map.months.get(month as usize).map(String::as_str).unwrap_or("");
            json!({
                "value": [month, entity, score],
                "tooltip": format!(
                    "{entity_name}<br/>{month_name}: {score}%<br/>Risk Level: {}",
                    ComplianceHeatMap::risk_band(score)
                ),
            })
        })
        .collect();

    let mut tooltip = tooltip_base();
    tooltip["position"] = json!("top");
    tooltip["formatter"] = json!("fn:itemTooltip");

    json!({
        "backgroundColor": "transparent",
        "tooltip": tooltip,
        "grid": { "height": "60%", "top": "10%", "left": "15%", "right": "5%" },
        "xAxis": category_axis(&map.months),
        "yAxis": category_axis(&map.entities),
        "visualMap": {
            "min": 50,
            "max": 100,
            "calculable": true,
            "orient": "horizontal",
            "left": "center",
            "bottom": "15%",
            "inRange": { "color": ["#dc2626", "#f59e0b", "#10b981", ACCENT] },
            "textStyle": { "color": AXIS_TEXT },
        },
        "series": [{
            "name": "Compliance Score",
            "type": "heatmap",
            "coordinateSystem": "cartesian2d",
            "data": data,
            "label": { "show": true, "color": "#fff", "fontSize": 10, "formatter": "{@[2]}%" },
            "emphasis": { "itemStyle": { "shadowBlur": 10, "shadowColor": ACCENT } },
        }],
    })
}

// ── Entity tree ───────────────────────────────────────────────────────────────

/// Node size in pixels: a third of the document count, clamped to 20..=60.
pub fn tree_symbol_size(documents: u32) -> f64 {
    (f64::from(documents) / 3.0).clamp(20.0, 60.0)
}

fn tree_node(node: &EntityNode, depth: usize) -> Value {
    let color = match depth {
        0 => ACCENT,
        1 => "#22d3ee",
        _ => "#a78bfa",
    };
    let mut value = json!({
        "name": node.name,
        "value": node.documents,
        "symbolSize": tree_symbol_size(node.documents),
        "itemStyle": { "color": color },
    });
    if !node.children.is_empty() {
        value["children"] = node.children.iter().map(|c| tree_node(c, depth + 1)).collect();
    }
    value
}

pub fn entity_tree_option(root: &EntityNode) -> Value {
    let mut tooltip = tooltip_base();
    tooltip["trigger"] = json!("item");
    tooltip["triggerOn"] = json!("mousemove");
    tooltip["formatter"] = json!("{b}<br/>Documents: {c}");

    json!({
        "backgroundColor": "transparent",
        "tooltip": tooltip,
        "series": [{
            "type": "tree",
            "data": [tree_node(root, 0)],
            "top": "10%",
            "left": "10%",
            "bottom": "10%",
            "right": "20%",
            "label": {
                "position": "left",
                "verticalAlign": "middle",
                "align": "right",
                "fontSize": 12,
                "color": "#fff",
            },
            "leaves": {
                "label": { "position": "right", "verticalAlign": "middle", "align": "left" },
            },
            "emphasis": { "focus": "descendant" },
            "expandAndCollapse": true,
            "animationDuration": 550,
            "animationDurationUpdate": 750,
            "lineStyle": { "color": ACCENT, "width": 2 },
        }],
    })
}

// ── Gauge ─────────────────────────────────────────────────────────────────────

pub fn gauge_option(metric: &RiskMetric, unit: &str) -> Value {
    json!({
        "series": [{
            "name": metric.title,
            "type": "gauge",
            "startAngle": 180,
            "endAngle": 0,
            "center": ["50%", "75%"],
            "radius": "75%",
            "min": 0,
            "max": metric.max,
            "splitNumber": 8,
            "axisLine": {
                "lineStyle": {
                    "width": 6,
                    "color": [[0.3, "#10b981"], [0.7, "#f59e0b"], [1, "#ef4444"]],
                },
            },
            "pointer": {
                "icon": "path://M12.8,0.7l12,40.1H0.7L12.8,0.7z",
                "length": "12%",
                "width": 20,
                "offsetCenter": [0, "-60%"],
                "itemStyle": { "color": metric.color },
            },
            "axisTick": { "length": 12, "lineStyle": { "color": "auto", "width": 2 } },
            "splitLine": { "length": 20, "lineStyle": { "color": "auto", "width": 5 } },
            "axisLabel": {
                "color": "#ffffff",
                "fontSize": 12,
                "distance": -60,
                "rotate": "tangential",
                "formatter": format!("fn:gaugeEnds:{}", metric.max),
            },
            "title": { "offsetCenter": [0, "-10%"], "fontSize": 14, "color": "#ffffff" },
            "detail": {
                "fontSize": 30,
                "offsetCenter": [0, "-35%"],
                "valueAnimation": true,
                "formatter": format!("{{value}}{unit}"),
                "color": metric.color,
            },
            "data": [{ "value": metric.value.clamp(0.0, metric.max.max(0.0)), "name": metric.title }],
        }],
    })
}

// ── Radar ─────────────────────────────────────────────────────────────────────

pub fn radar_option(persona: &Persona) -> Value {
    let indicator: Vec<Value> = PersonalityTraits::AXES
        .iter()
        .map(|name| json!({ "name": name, "max": PersonalityTraits::MAX }))
        .collect();
    let ring = ["rgba(255, 255, 255, 0.02)", "rgba(255, 255, 255, 0.05)"];

    let mut tooltip = tooltip_base();
    tooltip["trigger"] = json!("item");
    tooltip["borderColor"] = json!("rgba(255, 255, 255, 0.2)");

    json!({
        "title": {
            "text": format!("{} Personality Profile", persona.name),
            "left": "center",
            "textStyle": { "color": "#ffffff", "fontSize": 16 },
        },
        "radar": {
            "indicator": indicator,
            "shape": "polygon",
            "splitNumber": 5,
            "axisName": { "color": "#ffffff", "fontSize": 12 },
            "splitLine": { "lineStyle": { "color": "rgba(255, 255, 255, 0.2)" } },
            "splitArea": {
                "show": true,
                "areaStyle": { "color": [ring[0], ring[1], ring[0], ring[1], ring[0]] },
            },
            "axisLine": { "lineStyle": { "color": "rgba(255, 255, 255, 0.3)" } },
        },
        "series": [{
            "name": "Personality Traits",
            "type": "radar",
            "data": [{
                "value": persona.personality.values(),
                "name": persona.name,
                "areaStyle": { "color": persona.color, "opacity": 0.3 },
                "lineStyle": { "color": persona.color, "width": 2 },
                "itemStyle": { "color": persona.color },
            }],
        }],
        "tooltip": tooltip,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use evh_oi_common::Catalog;

    #[test]
    fn test_heatmap_series_shape() {
        let catalog = Catalog::seeded();
        let option = heatmap_option(&catalog.heat_map);
        let data = option["series"][0]["data"].as_array().unwrap();
        assert_eq!(data.len(), 48);
        assert_eq!(data[0]["value"], json!([0, 0, 95]));
        assert_eq!(data[0]["tooltip"], "EVH Legal<br/>Jan: 95%<br/>Risk Level: Low");
        assert_eq!(option["visualMap"]["min"], 50);
        assert_eq!(option["visualMap"]["max"], 100);
        assert_eq!(option["yAxis"]["data"][3], "Entity C Partners");
    }

    #[test]
    fn test_heatmap_tooltip_bands() {
        let catalog = Catalog::seeded();
        let option = heatmap_option(&catalog.heat_map);
        let data = option["series"][0]["data"].as_array().unwrap();
        // Entity C Partners, March: 62
        let cell = data.iter().find(|d| d["value"] == json!([2, 3, 62])).unwrap();
        assert!(cell["tooltip"].as_str().unwrap().ends_with("Risk Level: High"));
    }

    #[test]
    fn test_tree_symbol_size_clamps() {
        assert_eq!(tree_symbol_size(150), 50.0);
        assert_eq!(tree_symbol_size(23), 20.0);
        assert_eq!(tree_symbol_size(300), 60.0);
    }

    #[test]
    fn test_entity_tree_nesting() {
        let option = entity_tree_option(&Catalog::seeded().entity_tree);
        let root = &option["series"][0]["data"][0];
        assert_eq!(root["name"], "EVH Legal");
        assert_eq!(root["children"][0]["children"][0]["name"], "Entity C Partners");
        assert!(root["children"][1].get("children").is_none());
    }

    #[test]
    fn test_gauge_option_uses_metric() {
        let catalog = Catalog::seeded();
        let option = gauge_option(&catalog.risk_metrics[0], "%");
        let series = &option["series"][0];
        assert_eq!(series["type"], "gauge");
        assert_eq!(series["startAngle"], 180);
        assert_eq!(series["endAngle"], 0);
        assert_eq!(series["data"][0]["value"], 73.0);
        assert_eq!(series["pointer"]["itemStyle"]["color"], "#f59e0b");
        assert_eq!(series["detail"]["formatter"], "{value}%");
    }

    #[test]
    fn test_radar_has_seven_axes() {
        let catalog = Catalog::seeded();
        let persona = catalog.persona("benjamin-cowart").unwrap();
        let option = radar_option(persona);
        assert_eq!(option["radar"]["indicator"].as_array().unwrap().len(), 7);
        assert_eq!(option["radar"]["indicator"][0]["max"], 10);
        assert_eq!(option["series"][0]["data"][0]["value"], json!([9, 5, 6, 9, 4, 3, 9]));
        assert_eq!(option["title"]["text"], "Benjamin Cowart Personality Profile");
    }
}
