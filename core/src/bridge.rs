//! JSON inn / JSON ut for vertsspråk (Python via `py`, eller et web-lag).
//! Feil returneres som `String` med JSON-sti, slik at kalleren kan vise dem direkte.

use serde::Deserialize;
use serde_json::{json, Value};
use serde_path_to_error as spte;

use crate::body::total_weight;
use crate::level::{compute_level, progress_to_next, tier_color};
use crate::models::{BodyState, MuscleGroup};
use crate::session::{summary_by_group, total_load};

fn parse<T: for<'de> Deserialize<'de>>(json_in: &str) -> Result<T, String> {
    let de = &mut serde_json::Deserializer::from_str(json_in);
    spte::deserialize(de).map_err(|e| format!("{} at {}", e.inner(), e.path()))
}

/// `{"weight": 5000}` -> `{"level": "Silver", "color": "#C0C0C0", ...}`
pub fn compute_level_json(json_in: &str) -> Result<String, String> {
    #[derive(Deserialize)]
    struct In {
        weight: f64,
    }
    let input: In = parse(json_in)?;
    let tier = compute_level(input.weight);
    let next = progress_to_next(input.weight);
    let out = json!({
        "level": tier,
        "color": tier_color(tier).hex(),
        "next_level": next.map(|(t, _)| t),
        "missing": next.map(|(_, m)| m),
    });
    Ok(out.to_string())
}

/// Liste med øvelser (frontend-format) -> total og per gruppe.
pub fn total_load_json(json_in: &str) -> Result<String, String> {
    #[derive(Deserialize)]
    struct In {
        exercises: Vec<crate::models::ExerciseEntry>,
    }
    let input: In = parse(json_in)?;
    let by_group: serde_json::Map<String, Value> = summary_by_group(&input.exercises)
        .into_iter()
        .map(|(g, load)| (g.as_str().to_string(), json!(load)))
        .collect();
    Ok(json!({
        "totalWeight": total_load(&input.exercises),
        "byGroup": by_group,
    })
    .to_string())
}

/// `{"Chest": 100, "Back": 20000}` -> nivå per gruppe for alle sju grupper.
pub fn body_levels_json(json_in: &str) -> Result<String, String> {
    let raw: std::collections::BTreeMap<MuscleGroup, f64> = parse(json_in)?;
    if let Some((g, w)) = raw.iter().find(|(_, w)| !w.is_finite() || **w < 0.0) {
        return Err(format!("weight for {g} must be >= 0, got {w}"));
    }
    let state: BodyState = raw.into_iter().collect();
    let rows: Vec<Value> = MuscleGroup::ALL
        .iter()
        .map(|&g| {
            let weight = state.get(g);
            let tier = compute_level(weight);
            json!({ "part": g, "weight": weight, "level": tier, "color": tier_color(tier).hex() })
        })
        .collect();
    Ok(json!({ "levels": rows, "total": total_weight(&state) }).to_string())
}
